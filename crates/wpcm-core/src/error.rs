use thiserror::Error;

#[derive(Debug, Error)]
pub enum WpcmError {
    #[error("invalid parameter '{name}': {reason}")]
    Parameter { name: String, reason: String },

    #[error("WordPress API error: {}", remote_message(.status, .message))]
    RemoteService {
        status: Option<u16>,
        message: String,
    },

    #[error("unexpected wire format: {0}")]
    Format(String),

    #[error(transparent)]
    Generation(#[from] wpcm_ai::GenerationError),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn remote_message(status: &Option<u16>, message: &str) -> String {
    match *status {
        Some(code) if message.is_empty() => code.to_string(),
        Some(code) => format!("{code} - {message}"),
        None => message.to_string(),
    }
}

impl WpcmError {
    pub fn parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable kind, surfaced at the tool boundary.
    pub fn kind(&self) -> &'static str {
        match self {
            WpcmError::Parameter { .. } => "parameter_error",
            WpcmError::RemoteService { .. } => "remote_service_error",
            WpcmError::Format(_) => "format_error",
            WpcmError::Generation(_) => "generation_error",
            WpcmError::Configuration(_) => "configuration_error",
            WpcmError::Io(_) => "io_error",
        }
    }

    /// HTTP status of a remote failure, when the platform answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            WpcmError::RemoteService { status, .. } => *status,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, WpcmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_message_includes_status_and_body_message() {
        let e = WpcmError::RemoteService {
            status: Some(404),
            message: "Invalid post ID.".to_string(),
        };
        assert_eq!(e.to_string(), "WordPress API error: 404 - Invalid post ID.");
        assert_eq!(e.status(), Some(404));
        assert_eq!(e.kind(), "remote_service_error");
    }

    #[test]
    fn transport_failure_has_no_status() {
        let e = WpcmError::RemoteService {
            status: None,
            message: "request failed: connection refused".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "WordPress API error: request failed: connection refused"
        );
        assert_eq!(e.status(), None);
    }

    #[test]
    fn generation_errors_convert() {
        let e: WpcmError = wpcm_ai::GenerationError::Refusal("policy".into()).into();
        assert_eq!(e.kind(), "generation_error");
        assert!(e.to_string().contains("policy"));
    }

    #[test]
    fn generation_errors_keep_their_source() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let e: WpcmError = wpcm_ai::GenerationError::Structured {
            content: "not json".into(),
            source,
        }
        .into();
        assert_eq!(e.kind(), "generation_error");
        let cause = std::error::Error::source(&e).expect("source is forwarded");
        assert!(cause.to_string().contains("expected"));
    }
}
