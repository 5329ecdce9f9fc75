use super::{to_value, WpTool};
use serde_json::Value;
use wpcm_core::service::PostService;
use wpcm_core::Result;

pub struct GetCategoriesTool;

impl WpTool for GetCategoriesTool {
    fn name(&self) -> &str {
        "get_categories"
    }

    fn description(&self) -> &str {
        "List all post categories with their ids"
    }

    fn schema(&self) -> Value {
        serde_json::json!({ "type": "object", "properties": {} })
    }

    fn call(&self, _args: Value, service: &PostService) -> Result<Value> {
        to_value(service.list_categories()?)
    }
}
