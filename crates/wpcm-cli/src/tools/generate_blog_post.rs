use super::{params, to_value, WpTool};
use serde_json::Value;
use wpcm_core::service::PostService;
use wpcm_core::{ArticleLength, ArticleRequest, Result};

pub struct GenerateBlogPostTool;

impl WpTool for GenerateBlogPostTool {
    fn name(&self) -> &str {
        "generate_blog_post"
    }

    fn description(&self) -> &str {
        "Write a blog post with AI and optionally save it as a draft"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "topic": { "type": "string", "description": "What the post is about" },
                "keywords": { "type": "string", "description": "Comma-separated SEO keywords" },
                "tone": { "type": "string", "description": "Writing tone (default professional)" },
                "length": { "type": "string", "description": "short, medium or long (default medium)" },
                "language": { "type": "string", "description": "Language code (default from settings)" },
                "save_as_draft": { "type": "boolean", "description": "Create a draft post (default true)" }
            },
            "required": ["topic"]
        })
    }

    fn call(&self, args: Value, service: &PostService) -> Result<Value> {
        let request = ArticleRequest {
            topic: params::required_str(&args, "topic")?.to_string(),
            keywords: params::string_list(&args, "keywords")?,
            tone: params::optional_str(&args, "tone")?.unwrap_or_else(|| "professional".to_string()),
            length: params::optional_str(&args, "length")?
                .map(|l| ArticleLength::parse_lossy(&l))
                .unwrap_or(ArticleLength::Medium),
            language: params::optional_str(&args, "language")?
                .unwrap_or_else(|| service.default_language().to_string()),
        };
        let save = params::bool_or(&args, "save_as_draft", true)?;
        to_value(service.generate_post(&request, save)?)
    }
}
