use crate::error::{Result, WpcmError};
use crate::types::PostStatus;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const ENV_WORDPRESS_URL: &str = "WORDPRESS_URL";
pub const ENV_WORDPRESS_USERNAME: &str = "WORDPRESS_USERNAME";
pub const ENV_WORDPRESS_APP_PASSWORD: &str = "WORDPRESS_APP_PASSWORD";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_OPENAI_MODEL: &str = "OPENAI_MODEL";
pub const ENV_OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_DEFAULT_POST_STATUS: &str = "DEFAULT_POST_STATUS";
pub const ENV_DEFAULT_LANGUAGE: &str = "DEFAULT_LANGUAGE";
pub const ENV_REQUEST_TIMEOUT: &str = "WPCM_REQUEST_TIMEOUT_SECS";

pub const DEFAULT_LANGUAGE: &str = "da";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const API_PATH: &str = "/wp-json/wp/v2";

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// RawSettings
// ---------------------------------------------------------------------------

/// Unvalidated configuration values, one field per setting.
///
/// Filled from CLI flags (with env fallback) or [`RawSettings::from_env`],
/// then turned into [`Settings`] exactly once at startup.
#[derive(Debug, Clone, Default)]
pub struct RawSettings {
    pub wordpress_url: Option<String>,
    pub wordpress_username: Option<String>,
    pub wordpress_app_password: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_model: Option<String>,
    pub openai_base_url: Option<String>,
    pub default_post_status: Option<String>,
    pub default_language: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl RawSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the process env in production).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            wordpress_url: lookup(ENV_WORDPRESS_URL),
            wordpress_username: lookup(ENV_WORDPRESS_USERNAME),
            wordpress_app_password: lookup(ENV_WORDPRESS_APP_PASSWORD),
            openai_api_key: lookup(ENV_OPENAI_API_KEY),
            openai_model: lookup(ENV_OPENAI_MODEL),
            openai_base_url: lookup(ENV_OPENAI_BASE_URL),
            default_post_status: lookup(ENV_DEFAULT_POST_STATUS),
            default_language: lookup(ENV_DEFAULT_LANGUAGE),
            request_timeout_secs: lookup(ENV_REQUEST_TIMEOUT).and_then(|v| v.trim().parse().ok()),
        }
    }

    /// Check required values and apply defaults.
    ///
    /// Every missing required value is named in the error, not just the
    /// first one.
    pub fn validate(self) -> Result<Settings> {
        let url = present(self.wordpress_url);
        let username = present(self.wordpress_username);
        let password = present(self.wordpress_app_password);

        let mut missing = Vec::new();
        if url.is_none() {
            missing.push(ENV_WORDPRESS_URL);
        }
        if username.is_none() {
            missing.push(ENV_WORDPRESS_USERNAME);
        }
        if password.is_none() {
            missing.push(ENV_WORDPRESS_APP_PASSWORD);
        }
        let (Some(wordpress_url), Some(username), Some(app_password)) = (url, username, password)
        else {
            return Err(WpcmError::Configuration(format!(
                "missing required settings: {}",
                missing.join(", ")
            )));
        };

        Ok(Settings {
            wordpress_url,
            username,
            app_password,
            openai_api_key: present(self.openai_api_key),
            openai_model: present(self.openai_model)
                .unwrap_or_else(|| wpcm_ai::client::DEFAULT_MODEL.to_string()),
            openai_base_url: present(self.openai_base_url)
                .unwrap_or_else(|| wpcm_ai::client::DEFAULT_BASE_URL.to_string()),
            default_post_status: present(self.default_post_status)
                .unwrap_or_else(|| PostStatus::Draft.as_str().to_string()),
            default_language: present(self.default_language)
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            request_timeout: Duration::from_secs(
                self.request_timeout_secs
                    .filter(|s| *s > 0)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Validated configuration, passed by reference into the clients.
#[derive(Clone)]
pub struct Settings {
    pub wordpress_url: String,
    pub username: String,
    pub app_password: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub default_post_status: String,
    pub default_language: String,
    pub request_timeout: Duration,
}

impl Settings {
    /// REST base, e.g. `https://example.com/wp-json/wp/v2`.
    pub fn api_base_url(&self) -> String {
        format!("{}{API_PATH}", self.wordpress_url.trim_end_matches('/'))
    }

    pub fn has_ai(&self) -> bool {
        self.openai_api_key.is_some()
    }

    /// Status applied to new posts when the caller gives none. Falls back to
    /// draft if the configured value is not a known status.
    pub fn default_status(&self) -> PostStatus {
        self.default_post_status.parse().unwrap_or(PostStatus::Draft)
    }

    pub fn warnings(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let url = self.wordpress_url.to_ascii_lowercase();
        if url.starts_with("http://") {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "{ENV_WORDPRESS_URL} uses plain http; credentials are sent on every request"
                ),
            });
        } else if !url.starts_with("https://") {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!("{ENV_WORDPRESS_URL} must start with http:// or https://"),
            });
        }
        if self.openai_api_key.is_none() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "{ENV_OPENAI_API_KEY} is not set; AI content tools will fail when called"
                ),
            });
        }
        if self.default_post_status.parse::<PostStatus>().is_err() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "{ENV_DEFAULT_POST_STATUS} '{}' is not a known status; using draft",
                    self.default_post_status
                ),
            });
        }
        warnings
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("wordpress_url", &self.wordpress_url)
            .field("username", &self.username)
            .field("app_password", &"<redacted>")
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("openai_model", &self.openai_model)
            .field("openai_base_url", &self.openai_base_url)
            .field("default_post_status", &self.default_post_status)
            .field("default_language", &self.default_language)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn raw(pairs: &[(&str, &str)]) -> RawSettings {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RawSettings::from_lookup(|k| map.get(k).cloned())
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![
            (ENV_WORDPRESS_URL, "https://blog.example.com/"),
            (ENV_WORDPRESS_USERNAME, "editor"),
            (ENV_WORDPRESS_APP_PASSWORD, "abcd efgh ijkl"),
        ]
    }

    #[test]
    fn defaults_applied() {
        let settings = raw(&required()).validate().unwrap();
        assert_eq!(settings.openai_model, "gpt-4o");
        assert_eq!(settings.openai_base_url, "https://api.openai.com/v1");
        assert_eq!(settings.default_language, "da");
        assert_eq!(settings.default_status(), PostStatus::Draft);
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
        assert!(!settings.has_ai());
    }

    #[test]
    fn api_base_url_strips_trailing_slash() {
        let settings = raw(&required()).validate().unwrap();
        assert_eq!(
            settings.api_base_url(),
            "https://blog.example.com/wp-json/wp/v2"
        );
    }

    #[test]
    fn missing_values_are_all_reported() {
        let err = raw(&[(ENV_WORDPRESS_URL, "https://x.test")])
            .validate()
            .unwrap_err();
        let msg = err.to_string();
        assert_eq!(err.kind(), "configuration_error");
        assert!(msg.contains(ENV_WORDPRESS_USERNAME));
        assert!(msg.contains(ENV_WORDPRESS_APP_PASSWORD));
        assert!(!msg.contains(ENV_WORDPRESS_URL));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let mut pairs = required();
        pairs[1] = (ENV_WORDPRESS_USERNAME, "   ");
        let err = raw(&pairs).validate().unwrap_err();
        assert!(err.to_string().contains(ENV_WORDPRESS_USERNAME));
    }

    #[test]
    fn optional_values_override_defaults() {
        let mut pairs = required();
        pairs.push((ENV_OPENAI_API_KEY, "sk-1"));
        pairs.push((ENV_OPENAI_MODEL, "gpt-4o-mini"));
        pairs.push((ENV_DEFAULT_POST_STATUS, "pending"));
        pairs.push((ENV_REQUEST_TIMEOUT, "5"));
        let settings = raw(&pairs).validate().unwrap();
        assert!(settings.has_ai());
        assert_eq!(settings.openai_model, "gpt-4o-mini");
        assert_eq!(settings.default_status(), PostStatus::Pending);
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn warnings_flag_plain_http_and_missing_key() {
        let mut pairs = required();
        pairs[0] = (ENV_WORDPRESS_URL, "http://blog.example.com");
        pairs.push((ENV_DEFAULT_POST_STATUS, "published"));
        let warnings = raw(&pairs).validate().unwrap().warnings();
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().all(|w| w.level == WarnLevel::Warning));
    }

    #[test]
    fn debug_redacts_secrets() {
        let mut pairs = required();
        pairs.push((ENV_OPENAI_API_KEY, "sk-secret"));
        let rendered = format!("{:?}", raw(&pairs).validate().unwrap());
        assert!(!rendered.contains("abcd efgh"));
        assert!(!rendered.contains("sk-secret"));
    }
}
