use super::{params, to_value, WpTool};
use serde_json::Value;
use wpcm_core::service::PostService;
use wpcm_core::Result;

pub struct OptimizePostSeoTool;

impl WpTool for OptimizePostSeoTool {
    fn name(&self) -> &str {
        "optimize_post_seo"
    }

    fn description(&self) -> &str {
        "Suggest an SEO title, meta description and content changes; saving updates the title"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "post_id": { "type": "integer", "description": "Post id" },
                "target_keywords": { "type": "string", "description": "Comma-separated keywords to target" },
                "language": { "type": "string", "description": "Language code (default from settings)" },
                "save_changes": { "type": "boolean", "description": "Write the optimized title back (default false)" }
            },
            "required": ["post_id"]
        })
    }

    fn call(&self, args: Value, service: &PostService) -> Result<Value> {
        let post_id = params::required_u64(&args, "post_id")?;
        let keywords = params::string_list(&args, "target_keywords")?;
        let language = params::optional_str(&args, "language")?
            .unwrap_or_else(|| service.default_language().to_string());
        let save = params::bool_or(&args, "save_changes", false)?;
        to_value(service.optimize_post_seo(post_id, keywords.as_deref(), &language, save)?)
    }
}
