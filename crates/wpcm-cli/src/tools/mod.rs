use serde::Serialize;
use serde_json::Value;
use wpcm_core::service::PostService;
use wpcm_core::{Result, WpcmError};

pub mod create_post;
pub mod delete_post;
pub mod generate_blog_post;
pub mod get_categories;
pub mod get_post;
pub mod get_tags;
pub mod improve_post_content;
pub mod list_posts;
pub mod optimize_post_seo;
pub mod params;
pub mod search_posts;
pub mod update_post;
pub mod upload_media;

pub trait WpTool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn schema(&self) -> Value;
    fn call(&self, args: Value, service: &PostService) -> Result<Value>;
}

pub fn all_tools() -> Vec<Box<dyn WpTool>> {
    vec![
        Box::new(list_posts::ListPostsTool),
        Box::new(get_post::GetPostTool),
        Box::new(create_post::CreatePostTool),
        Box::new(update_post::UpdatePostTool),
        Box::new(delete_post::DeletePostTool),
        Box::new(generate_blog_post::GenerateBlogPostTool),
        Box::new(improve_post_content::ImprovePostContentTool),
        Box::new(optimize_post_seo::OptimizePostSeoTool),
        Box::new(get_categories::GetCategoriesTool),
        Box::new(get_tags::GetTagsTool),
        Box::new(search_posts::SearchPostsTool),
        Box::new(upload_media::UploadMediaTool),
    ]
}

pub fn find<'a>(tools: &'a [Box<dyn WpTool>], name: &str) -> Option<&'a dyn WpTool> {
    tools.iter().find(|t| t.name() == name).map(|t| t.as_ref())
}

/// Failure payload carried in an `isError` tool result.
pub fn error_envelope(e: &WpcmError) -> Value {
    serde_json::json!({
        "error": {
            "kind": e.kind(),
            "message": e.to_string(),
        }
    })
}

pub(crate) fn to_value<T: Serialize>(value: T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| WpcmError::Format(format!("cannot serialize result: {e}")))
}
