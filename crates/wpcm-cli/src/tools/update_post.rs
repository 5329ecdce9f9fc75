use super::{params, to_value, WpTool};
use serde_json::Value;
use wpcm_core::post::PostUpdate;
use wpcm_core::service::{PostService, UpdatedPost};
use wpcm_core::Result;

pub struct UpdatePostTool;

impl WpTool for UpdatePostTool {
    fn name(&self) -> &str {
        "update_post"
    }

    fn description(&self) -> &str {
        "Update an existing post; omitted fields are left unchanged"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "post_id": { "type": "integer", "description": "Post id" },
                "title": { "type": "string" },
                "content": { "type": "string" },
                "status": { "type": "string" },
                "excerpt": { "type": "string", "description": "An empty string clears the excerpt" },
                "categories": { "type": "string", "description": "Comma-separated category ids" },
                "tags": { "type": "string", "description": "Comma-separated tag ids" },
                "featured_media": { "type": "integer" },
                "acf_fields": { "type": "string", "description": "Custom fields as a JSON object" }
            },
            "required": ["post_id"]
        })
    }

    fn call(&self, args: Value, service: &PostService) -> Result<Value> {
        let post_id = params::required_u64(&args, "post_id")?;
        let update = PostUpdate {
            title: params::optional_str(&args, "title")?,
            content: params::optional_str(&args, "content")?,
            status: params::optional_status(&args, "status")?,
            excerpt: params::optional_str(&args, "excerpt")?,
            categories: params::id_list(&args, "categories")?,
            tags: params::id_list(&args, "tags")?,
            featured_media: params::optional_u64(&args, "featured_media")?,
            acf_fields: params::json_object(&args, "acf_fields")?,
        };
        to_value(UpdatedPost::from(service.update_post(post_id, &update)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{service, wire_post};
    use mockito::Matcher;
    use serde_json::json;

    #[test]
    fn only_given_fields_are_sent() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/wp-json/wp/v2/posts/3")
            .match_body(Matcher::Json(json!({"excerpt": "", "status": "pending"})))
            .with_status(200)
            .with_body(wire_post(3, "Three").to_string())
            .create();

        let result = UpdatePostTool
            .call(
                json!({"post_id": 3, "excerpt": "", "status": "pending", "title": null}),
                &service(&server),
            )
            .unwrap();
        assert_eq!(result["id"], 3);
        assert_eq!(result["modified"], "2024-06-01T09:30:00+00:00");
        mock.assert();
    }

    #[test]
    fn missing_post_id_is_parameter_error() {
        let server = mockito::Server::new();
        let err = UpdatePostTool
            .call(json!({"title": "x"}), &service(&server))
            .unwrap_err();
        assert_eq!(err.kind(), "parameter_error");
        assert!(err.to_string().contains("post_id"));
    }
}
