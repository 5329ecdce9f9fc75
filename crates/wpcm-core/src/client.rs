use crate::config::Settings;
use crate::error::{Result, WpcmError};
use crate::post::{PostCreate, PostUpdate};
use crate::types::PostStatus;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Method;
use serde_json::Value;
use std::path::Path;

/// Page size used when fetching every category or tag.
const TERMS_PER_PAGE: u32 = 100;
/// Page size used by keyword search.
const SEARCH_PER_PAGE: u32 = 20;

// ---------------------------------------------------------------------------
// ListPostsQuery
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ListPostsQuery {
    pub per_page: u32,
    pub page: u32,
    pub status: PostStatus,
    pub search: Option<String>,
    /// `None` means no category filter; `Some(vec![])` is sent as no filter too.
    pub categories: Option<Vec<u64>>,
}

impl Default for ListPostsQuery {
    fn default() -> Self {
        Self {
            per_page: 10,
            page: 1,
            status: PostStatus::Publish,
            search: None,
            categories: None,
        }
    }
}

impl ListPostsQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("per_page", self.per_page.to_string()),
            ("page", self.page.to_string()),
            ("status", self.status.as_str().to_string()),
        ];
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            params.push(("search", search.to_string()));
        }
        if let Some(categories) = self.categories.as_deref().filter(|c| !c.is_empty()) {
            params.push(("categories", join_ids(categories)));
        }
        params
    }
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Map a friendly column name onto the REST API's `search_columns` value.
fn search_column(name: &str) -> &str {
    match name {
        "title" => "post_title",
        "content" => "post_content",
        "excerpt" => "post_excerpt",
        other => other,
    }
}

// ---------------------------------------------------------------------------
// WordPressClient
// ---------------------------------------------------------------------------

/// Authenticated client for the `wp/v2` REST API.
///
/// Returns raw wire records; normalization happens in [`crate::post`] and
/// friends. Never retries. The pooled `reqwest` client is safe to share
/// between threads.
pub struct WordPressClient {
    http: Client,
    base_url: String,
    username: String,
    app_password: String,
}

impl WordPressClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let http = Client::builder()
            .timeout(settings.request_timeout)
            .user_agent(concat!("wpcm/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport_error)?;
        tracing::info!(url = %settings.wordpress_url, "WordPress client initialized");
        Ok(Self {
            http,
            base_url: settings.api_base_url(),
            username: settings.username.clone(),
            app_password: settings.app_password.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        self.http
            .request(method, url)
            .basic_auth(&self.username, Some(&self.app_password))
    }

    fn send(&self, builder: RequestBuilder) -> Result<Value> {
        let request = builder.build().map_err(transport_error)?;
        let method = request.method().clone();
        let url = request.url().clone();
        tracing::debug!(%method, %url, "WordPress request");

        let response = self.http.execute(request).map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "WordPress request failed");
            transport_error(e)
        })?;
        let status = response.status();
        let body = response.text().map_err(transport_error)?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_default();
            tracing::warn!(%method, %url, status = status.as_u16(), %message, "WordPress API error");
            return Err(WpcmError::RemoteService {
                status: Some(status.as_u16()),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| WpcmError::RemoteService {
            status: Some(status.as_u16()),
            message: format!("response body is not JSON: {e}"),
        })
    }

    // -- posts --------------------------------------------------------------

    pub fn list_posts(&self, query: &ListPostsQuery) -> Result<Value> {
        self.send(self.request(Method::GET, "posts").query(&query.params()))
    }

    pub fn get_post(&self, post_id: u64) -> Result<Value> {
        self.send(self.request(Method::GET, &format!("posts/{post_id}")))
    }

    pub fn create_post(&self, payload: &PostCreate) -> Result<Value> {
        self.send(self.request(Method::POST, "posts").json(payload))
    }

    pub fn update_post(&self, post_id: u64, payload: &PostUpdate) -> Result<Value> {
        self.send(
            self.request(Method::POST, &format!("posts/{post_id}"))
                .json(payload),
        )
    }

    /// Without `force` the platform moves the post to the trash.
    pub fn delete_post(&self, post_id: u64, force: bool) -> Result<Value> {
        self.send(
            self.request(Method::DELETE, &format!("posts/{post_id}"))
                .query(&[("force", force.to_string())]),
        )
    }

    pub fn search_posts(&self, query: &str, columns: Option<&[String]>) -> Result<Value> {
        let mut params = vec![
            ("search", query.to_string()),
            ("per_page", SEARCH_PER_PAGE.to_string()),
        ];
        if let Some(columns) = columns.filter(|c| !c.is_empty()) {
            let joined = columns
                .iter()
                .map(|c| search_column(c))
                .collect::<Vec<_>>()
                .join(",");
            params.push(("search_columns", joined));
        }
        self.send(self.request(Method::GET, "posts").query(&params))
    }

    // -- taxonomies ---------------------------------------------------------

    pub fn list_categories(&self) -> Result<Value> {
        self.send(
            self.request(Method::GET, "categories")
                .query(&[("per_page", TERMS_PER_PAGE.to_string())]),
        )
    }

    pub fn list_tags(&self) -> Result<Value> {
        self.send(
            self.request(Method::GET, "tags")
                .query(&[("per_page", TERMS_PER_PAGE.to_string())]),
        )
    }

    // -- media --------------------------------------------------------------

    pub fn upload_media(&self, path: &Path) -> Result<Value> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| WpcmError::parameter("file_path", "must name a file"))?
            .to_string();
        let bytes = std::fs::read(path)?;
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime.as_ref())
            .map_err(transport_error)?;
        self.send(
            self.request(Method::POST, "media")
                .multipart(Form::new().part("file", part)),
        )
    }

    pub fn set_media_alt_text(&self, media_id: u64, alt_text: &str) -> Result<Value> {
        self.send(
            self.request(Method::POST, &format!("media/{media_id}"))
                .json(&serde_json::json!({ "alt_text": alt_text })),
        )
    }
}

fn transport_error(e: reqwest::Error) -> WpcmError {
    WpcmError::RemoteService {
        status: e.status().map(|s| s.as_u16()),
        message: format!("request failed: {e}"),
    }
}
