use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// PostStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    Publish,
    Pending,
    Private,
    Trash,
    /// Scheduled for later publication.
    Future,
}

impl PostStatus {
    pub fn all() -> &'static [PostStatus] {
        &[
            PostStatus::Draft,
            PostStatus::Publish,
            PostStatus::Pending,
            PostStatus::Private,
            PostStatus::Trash,
            PostStatus::Future,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Publish => "publish",
            PostStatus::Pending => "pending",
            PostStatus::Private => "private",
            PostStatus::Trash => "trash",
            PostStatus::Future => "future",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PostStatus {
    type Err = crate::error::WpcmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "publish" => Ok(PostStatus::Publish),
            "pending" => Ok(PostStatus::Pending),
            "private" => Ok(PostStatus::Private),
            "trash" => Ok(PostStatus::Trash),
            "future" => Ok(PostStatus::Future),
            _ => Err(crate::error::WpcmError::parameter(
                "status",
                format!(
                    "unknown status '{s}' (expected one of: {})",
                    PostStatus::all()
                        .iter()
                        .map(|p| p.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            )),
        }
    }
}
