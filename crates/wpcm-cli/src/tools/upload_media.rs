use super::{params, to_value, WpTool};
use serde_json::Value;
use std::path::Path;
use wpcm_core::service::PostService;
use wpcm_core::Result;

pub struct UploadMediaTool;

impl WpTool for UploadMediaTool {
    fn name(&self) -> &str {
        "upload_media"
    }

    fn description(&self) -> &str {
        "Upload a local file to the media library, e.g. to use as a featured image"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": { "type": "string", "description": "Path of the file to upload" },
                "alt_text": { "type": "string", "description": "Alternative text for images" }
            },
            "required": ["file_path"]
        })
    }

    fn call(&self, args: Value, service: &PostService) -> Result<Value> {
        let path = params::required_str(&args, "file_path")?;
        let alt_text = params::optional_str(&args, "alt_text")?;
        to_value(service.upload_media(Path::new(path), alt_text.as_deref())?)
    }
}
