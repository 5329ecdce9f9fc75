use super::{params, to_value, WpTool};
use serde_json::Value;
use wpcm_core::service::PostService;
use wpcm_core::Result;

pub struct GetPostTool;

impl WpTool for GetPostTool {
    fn name(&self) -> &str {
        "get_post"
    }

    fn description(&self) -> &str {
        "Get a single post with all fields, including custom fields"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "post_id": {
                    "type": "integer",
                    "description": "Post id"
                }
            },
            "required": ["post_id"]
        })
    }

    fn call(&self, args: Value, service: &PostService) -> Result<Value> {
        let post_id = params::required_u64(&args, "post_id")?;
        to_value(service.get_post(post_id)?)
    }
}
