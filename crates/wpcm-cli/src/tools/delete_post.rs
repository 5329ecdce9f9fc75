use super::{params, to_value, WpTool};
use serde_json::Value;
use wpcm_core::service::PostService;
use wpcm_core::Result;

pub struct DeletePostTool;

impl WpTool for DeletePostTool {
    fn name(&self) -> &str {
        "delete_post"
    }

    fn description(&self) -> &str {
        "Move a post to the trash, or delete it permanently with force"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "post_id": { "type": "integer", "description": "Post id" },
                "force": {
                    "type": "boolean",
                    "description": "Skip the trash and delete permanently (default false)"
                }
            },
            "required": ["post_id"]
        })
    }

    fn call(&self, args: Value, service: &PostService) -> Result<Value> {
        let post_id = params::required_u64(&args, "post_id")?;
        let force = params::bool_or(&args, "force", false)?;
        to_value(service.delete_post(post_id, force)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::service;
    use mockito::Matcher;
    use serde_json::json;

    #[test]
    fn default_delete_trashes() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("DELETE", "/wp-json/wp/v2/posts/6")
            .match_query(Matcher::UrlEncoded("force".into(), "false".into()))
            .with_status(200)
            .with_body("{}")
            .create();

        let result = DeletePostTool
            .call(json!({"post_id": 6}), &service(&server))
            .unwrap();
        assert_eq!(result, json!({"status": "trashed", "post_id": 6}));
        mock.assert();
    }

    #[test]
    fn force_accepts_string_boolean() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("DELETE", "/wp-json/wp/v2/posts/6")
            .match_query(Matcher::UrlEncoded("force".into(), "true".into()))
            .with_status(200)
            .with_body(r#"{"deleted": true}"#)
            .create();

        let result = DeletePostTool
            .call(json!({"post_id": "6", "force": "true"}), &service(&server))
            .unwrap();
        assert_eq!(result["status"], "deleted");
        mock.assert();
    }
}
