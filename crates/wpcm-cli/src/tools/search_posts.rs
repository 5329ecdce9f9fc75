use super::{params, to_value, WpTool};
use serde_json::Value;
use wpcm_core::service::PostService;
use wpcm_core::Result;

pub struct SearchPostsTool;

impl WpTool for SearchPostsTool {
    fn name(&self) -> &str {
        "search_posts"
    }

    fn description(&self) -> &str {
        "Search posts by keyword in the title, content or excerpt"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": "Search term" },
                "search_in": {
                    "type": "string",
                    "description": "Comma-separated columns: title, content, excerpt (default title,content)"
                }
            },
            "required": ["query"]
        })
    }

    fn call(&self, args: Value, service: &PostService) -> Result<Value> {
        let query = params::required_str(&args, "query")?;
        let columns = match params::field(&args, "search_in") {
            None => vec!["title".to_string(), "content".to_string()],
            Some(_) => params::string_list(&args, "search_in")?.unwrap_or_default(),
        };
        to_value(service.search_posts(query, Some(columns.as_slice()))?)
    }
}
