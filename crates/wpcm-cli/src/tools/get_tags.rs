use super::{to_value, WpTool};
use serde_json::Value;
use wpcm_core::service::PostService;
use wpcm_core::Result;

pub struct GetTagsTool;

impl WpTool for GetTagsTool {
    fn name(&self) -> &str {
        "get_tags"
    }

    fn description(&self) -> &str {
        "List all post tags with their ids"
    }

    fn schema(&self) -> Value {
        serde_json::json!({ "type": "object", "properties": {} })
    }

    fn call(&self, _args: Value, service: &PostService) -> Result<Value> {
        to_value(service.list_tags()?)
    }
}
