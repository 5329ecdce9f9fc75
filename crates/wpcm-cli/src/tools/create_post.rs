use super::{params, to_value, WpTool};
use serde_json::Value;
use wpcm_core::post::PostCreate;
use wpcm_core::service::{CreatedPost, PostService};
use wpcm_core::Result;

pub struct CreatePostTool;

impl WpTool for CreatePostTool {
    fn name(&self) -> &str {
        "create_post"
    }

    fn description(&self) -> &str {
        "Create a new post; status defaults to the configured default post status"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "title": { "type": "string", "description": "Post title" },
                "content": { "type": "string", "description": "Post body (HTML)" },
                "status": { "type": "string", "description": "draft, publish, pending, private or future" },
                "excerpt": { "type": "string", "description": "Short summary" },
                "categories": { "type": "string", "description": "Comma-separated category ids" },
                "tags": { "type": "string", "description": "Comma-separated tag ids" },
                "featured_media": { "type": "integer", "description": "Media id of the featured image" },
                "acf_fields": { "type": "string", "description": "Custom fields as a JSON object" }
            },
            "required": ["title", "content"]
        })
    }

    fn call(&self, args: Value, service: &PostService) -> Result<Value> {
        let title = params::required_str(&args, "title")?;
        let content = params::required_str(&args, "content")?;
        let status = params::optional_status(&args, "status")?.unwrap_or(service.default_status());

        let mut payload = PostCreate::new(title, content).with_status(status);
        payload.excerpt = params::optional_str(&args, "excerpt")?.filter(|e| !e.is_empty());
        payload.categories = params::id_list(&args, "categories")?;
        payload.tags = params::id_list(&args, "tags")?;
        payload.featured_media = params::optional_u64(&args, "featured_media")?;
        payload.acf_fields = params::json_object(&args, "acf_fields")?;

        to_value(CreatedPost::from(service.create_post(&payload)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{service, wire_post};
    use mockito::Matcher;
    use serde_json::json;

    #[test]
    fn minimal_create_sends_exactly_title_content_status() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/wp-json/wp/v2/posts")
            .match_body(Matcher::Json(json!({
                "title": "Hello",
                "content": "<p>World</p>",
                "status": "publish"
            })))
            .with_status(201)
            .with_body(wire_post(10, "Hello").to_string())
            .create();

        let result = CreatePostTool
            .call(
                json!({"title": "Hello", "content": "<p>World</p>", "status": "publish"}),
                &service(&server),
            )
            .unwrap();
        assert_eq!(
            result,
            json!({
                "id": 10,
                "title": "Hello",
                "link": "https://blog.example.com/post-10/",
                "status": "publish",
                "date": "2024-06-01T08:00:00+00:00"
            })
        );
        mock.assert();
    }

    #[test]
    fn status_defaults_to_draft() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/wp-json/wp/v2/posts")
            .match_body(Matcher::PartialJson(json!({"status": "draft"})))
            .with_status(201)
            .with_body(wire_post(11, "Draft").to_string())
            .create();

        CreatePostTool
            .call(json!({"title": "Draft", "content": "x"}), &service(&server))
            .unwrap();
        mock.assert();
    }

    #[test]
    fn optional_fields_are_forwarded() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/wp-json/wp/v2/posts")
            .match_body(Matcher::Json(json!({
                "title": "T",
                "content": "C",
                "status": "draft",
                "categories": [2, 3],
                "tags": [9],
                "featured_media": 5,
                "acf": {"rating": 4}
            })))
            .with_status(201)
            .with_body(wire_post(12, "T").to_string())
            .create();

        CreatePostTool
            .call(
                json!({
                    "title": "T",
                    "content": "C",
                    "categories": "2, 3",
                    "tags": [9],
                    "featured_media": "5",
                    "acf_fields": "{\"rating\": 4}"
                }),
                &service(&server),
            )
            .unwrap();
        mock.assert();
    }

    #[test]
    fn malformed_acf_is_parameter_error() {
        let server = mockito::Server::new();
        let err = CreatePostTool
            .call(
                json!({"title": "T", "content": "C", "acf_fields": "{oops"}),
                &service(&server),
            )
            .unwrap_err();
        assert_eq!(err.kind(), "parameter_error");
    }
}
