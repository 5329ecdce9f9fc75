use crate::error::Result;
use crate::wire;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: u64,
    pub source_url: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub alt_text: String,
}

impl MediaItem {
    pub fn from_wire(value: &Value) -> Result<MediaItem> {
        wire::decode(value, "media item")
    }
}
