use crate::error::{Result, WpcmError};
use crate::types::PostStatus;
use crate::wire::{self, RenderedText};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Platform-specific custom fields (ACF).
pub type ExtensionFields = Map<String, Value>;

// ---------------------------------------------------------------------------
// Wire record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct WirePost {
    id: u64,
    title: RenderedText,
    content: RenderedText,
    #[serde(default)]
    excerpt: Option<RenderedText>,
    status: String,
    slug: String,
    date: String,
    modified: String,
    author: u64,
    #[serde(default)]
    categories: Option<Vec<u64>>,
    #[serde(default)]
    tags: Option<Vec<u64>>,
    #[serde(default)]
    featured_media: Option<u64>,
    link: String,
    #[serde(default)]
    acf: Option<Value>,
}

// ---------------------------------------------------------------------------
// Post
// ---------------------------------------------------------------------------

/// Canonical form of a remote post.
///
/// Built fresh from every response and never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub status: PostStatus,
    pub slug: String,
    pub date: DateTime<FixedOffset>,
    pub modified: DateTime<FixedOffset>,
    pub author: u64,
    pub categories: Vec<u64>,
    pub tags: Vec<u64>,
    pub featured_media: Option<u64>,
    pub link: String,
    pub acf: Option<ExtensionFields>,
}

impl Post {
    /// Normalize one wire record. Pure: no I/O, same input gives same output.
    pub fn from_wire(value: &Value) -> Result<Post> {
        let wire: WirePost = wire::decode(value, "post")?;

        let status = wire.status.parse::<PostStatus>().map_err(|_| {
            WpcmError::Format(format!("post {}: unknown status '{}'", wire.id, wire.status))
        })?;

        Ok(Post {
            id: wire.id,
            title: wire.title.into_string(),
            content: wire.content.into_string(),
            excerpt: wire.excerpt.map(RenderedText::into_string).unwrap_or_default(),
            status,
            slug: wire.slug,
            date: wire::parse_timestamp("date", &wire.date)?,
            modified: wire::parse_timestamp("modified", &wire.modified)?,
            author: wire.author,
            categories: wire.categories.unwrap_or_default(),
            tags: wire.tags.unwrap_or_default(),
            // 0 is the platform's "no featured image"
            featured_media: wire.featured_media.filter(|id| *id != 0),
            link: wire.link,
            acf: normalize_acf(wire.id, wire.acf)?,
        })
    }

    pub fn list_from_wire(value: &Value) -> Result<Vec<Post>> {
        wire::expect_array(value, "posts")?
            .iter()
            .map(Post::from_wire)
            .collect()
    }
}

/// Objects are kept; an empty list or null (what the platform sends when a
/// post has no custom fields) means absent.
fn normalize_acf(post_id: u64, acf: Option<Value>) -> Result<Option<ExtensionFields>> {
    match acf {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) if items.is_empty() => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(WpcmError::Format(format!(
            "post {post_id}: acf must be an object, got {}",
            wire::type_name(&other)
        ))),
    }
}

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostSummary {
    pub id: u64,
    pub title: String,
    pub status: PostStatus,
    pub date: DateTime<FixedOffset>,
    pub link: String,
    pub excerpt: String,
}

impl From<Post> for PostSummary {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            title: p.title,
            status: p.status,
            date: p.date,
            link: p.link,
            excerpt: p.excerpt,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: u64,
    pub title: String,
    pub excerpt: String,
    pub link: String,
}

impl From<Post> for SearchHit {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            title: p.title,
            excerpt: p.excerpt,
            link: p.link,
        }
    }
}

// ---------------------------------------------------------------------------
// Write-side records
// ---------------------------------------------------------------------------

/// Payload for `POST posts`. Only `Some` optional fields are sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostCreate {
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_media: Option<u64>,
    #[serde(rename = "acf", skip_serializing_if = "Option::is_none")]
    pub acf_fields: Option<ExtensionFields>,
}

impl PostCreate {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            status: PostStatus::Draft,
            excerpt: None,
            categories: None,
            tags: None,
            featured_media: None,
            acf_fields: None,
        }
    }

    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = status;
        self
    }
}

/// Sparse payload for `POST posts/{id}`.
///
/// `None` leaves a field unchanged; `Some(String::new())` really clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PostUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_media: Option<u64>,
    #[serde(rename = "acf", skip_serializing_if = "Option::is_none")]
    pub acf_fields: Option<ExtensionFields>,
}

impl PostUpdate {
    pub fn is_empty(&self) -> bool {
        *self == PostUpdate::default()
    }
}
