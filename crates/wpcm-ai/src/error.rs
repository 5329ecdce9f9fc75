use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request to text-generation provider failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("text-generation provider returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("text-generation provider refused the request: {0}")]
    Refusal(String),

    #[error("text-generation provider returned no content (finish reason: {0})")]
    EmptyCompletion(String),

    #[error("failed to parse provider response: {source}\n  body: {body}")]
    Parse {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("structured response is not valid JSON for this task: {source}\n  content: {content}")]
    Structured {
        content: String,
        #[source]
        source: serde_json::Error,
    },
}
