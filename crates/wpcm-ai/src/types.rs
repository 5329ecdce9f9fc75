use serde::{Deserialize, Serialize};

// ─── Request side ─────────────────────────────────────────────────────────

/// Speaker of a single chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// `response_format` body field. Only `json_object` is ever sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            kind: "json_object",
        }
    }
}

/// Body of a `POST /chat/completions` call.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl ChatRequest {
    /// A two-message request: system instruction followed by the user prompt.
    pub fn new(
        model: impl Into<String>,
        system: impl Into<String>,
        prompt: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(prompt)],
            temperature,
            response_format: None,
        }
    }

    /// Ask the provider for a strictly structured (JSON object) reply.
    pub fn json(mut self) -> Self {
        self.response_format = Some(ResponseFormat::json_object());
        self
    }

    pub fn wants_json(&self) -> bool {
        self.response_format.is_some()
    }
}

// ─── Response side ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub refusal: Option<String>,
}

/// Error envelope returned with non-2xx statuses: `{"error": {"message": …}}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorDetail {
    pub message: String,
}

// ─── Generation results ───────────────────────────────────────────────────

/// Output of full-article generation; not yet a post on the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub title: String,
    pub content: String,
    pub excerpt: String,
}

/// Structured SEO reply. `title` and `meta_description` are mandatory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoSuggestions {
    pub title: String,
    pub meta_description: String,
    #[serde(default)]
    pub content_suggestions: Vec<String>,
}
