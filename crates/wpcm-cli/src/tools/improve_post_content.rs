use super::{params, to_value, WpTool};
use serde_json::Value;
use wpcm_core::service::PostService;
use wpcm_core::{Improvement, Result};

const DEFAULT_IMPROVEMENTS: &[Improvement] = &[
    Improvement::Seo,
    Improvement::Readability,
    Improvement::Structure,
];

pub struct ImprovePostContentTool;

impl WpTool for ImprovePostContentTool {
    fn name(&self) -> &str {
        "improve_post_content"
    }

    fn description(&self) -> &str {
        "Revise a post's content with AI; the result is only written back with save_changes"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "post_id": { "type": "integer", "description": "Post id" },
                "improvements": {
                    "type": "string",
                    "description": "Comma-separated: seo, readability, structure, grammar, or free-text instructions (default seo,readability,structure)"
                },
                "language": { "type": "string", "description": "Language code (default from settings)" },
                "save_changes": { "type": "boolean", "description": "Write the revised content back (default false)" }
            },
            "required": ["post_id"]
        })
    }

    fn call(&self, args: Value, service: &PostService) -> Result<Value> {
        let post_id = params::required_u64(&args, "post_id")?;
        let improvements = match params::field(&args, "improvements") {
            None => DEFAULT_IMPROVEMENTS.to_vec(),
            Some(_) => params::string_list(&args, "improvements")?
                .unwrap_or_default()
                .iter()
                .map(|s| Improvement::parse(s))
                .collect(),
        };
        let language = params::optional_str(&args, "language")?
            .unwrap_or_else(|| service.default_language().to_string());
        let save = params::bool_or(&args, "save_changes", false)?;
        to_value(service.improve_post(post_id, &improvements, &language, save)?)
    }
}
