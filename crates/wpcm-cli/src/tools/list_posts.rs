use super::{params, to_value, WpTool};
use serde_json::Value;
use wpcm_core::client::ListPostsQuery;
use wpcm_core::service::PostService;
use wpcm_core::types::PostStatus;
use wpcm_core::Result;

pub struct ListPostsTool;

impl WpTool for ListPostsTool {
    fn name(&self) -> &str {
        "list_posts"
    }

    fn description(&self) -> &str {
        "List WordPress posts with pagination and optional status, search and category filters"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "per_page": {
                    "type": "integer",
                    "description": "Posts per page (default 10)"
                },
                "page": {
                    "type": "integer",
                    "description": "Page number, starting at 1 (default 1)"
                },
                "status": {
                    "type": "string",
                    "description": "draft, publish, pending, private, trash or future (default publish)"
                },
                "search": {
                    "type": "string",
                    "description": "Free-text search term"
                },
                "categories": {
                    "type": "string",
                    "description": "Comma-separated category ids"
                }
            }
        })
    }

    fn call(&self, args: Value, service: &PostService) -> Result<Value> {
        let query = ListPostsQuery {
            per_page: params::u32_or(&args, "per_page", 10)?,
            page: params::u32_or(&args, "page", 1)?,
            status: params::optional_status(&args, "status")?.unwrap_or(PostStatus::Publish),
            search: params::optional_str(&args, "search")?,
            categories: params::id_list(&args, "categories")?,
        };
        to_value(service.list_posts(&query)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{service, wire_post};
    use mockito::Matcher;
    use serde_json::json;

    #[test]
    fn list_posts_applies_defaults_and_summarizes() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/wp-json/wp/v2/posts")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("per_page".into(), "10".into()),
                Matcher::UrlEncoded("page".into(), "1".into()),
                Matcher::UrlEncoded("status".into(), "publish".into()),
            ]))
            .with_status(200)
            .with_body(json!([wire_post(1, "First")]).to_string())
            .create();

        let result = ListPostsTool.call(json!({}), &service(&server)).unwrap();
        assert_eq!(
            result,
            json!([{
                "id": 1,
                "title": "First",
                "status": "publish",
                "date": "2024-06-01T08:00:00+00:00",
                "link": "https://blog.example.com/post-1/",
                "excerpt": "<p>Body.</p>"
            }])
        );
        mock.assert();
    }

    #[test]
    fn bad_category_list_fails_before_any_request() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/wp-json/wp/v2/posts")
            .match_query(Matcher::Any)
            .expect(0)
            .create();

        let err = ListPostsTool
            .call(json!({"categories": "1,two"}), &service(&server))
            .unwrap_err();
        assert_eq!(err.kind(), "parameter_error");
        mock.assert();
    }

    #[test]
    fn trailing_comma_in_categories_is_rejected() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/wp-json/wp/v2/posts")
            .match_query(Matcher::Any)
            .expect(0)
            .create();

        let err = ListPostsTool
            .call(json!({"categories": "1,"}), &service(&server))
            .unwrap_err();
        assert_eq!(err.kind(), "parameter_error");
        assert!(err.to_string().contains("categories"));
        mock.assert();
    }
}
