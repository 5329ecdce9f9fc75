//! Wire-format helpers shared by the normalizers.
//!
//! Nothing above this module sees the `{"rendered": …}` wrapper shape or
//! raw timestamp strings.

use crate::error::{Result, WpcmError};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;

/// A text field the REST API returns either plain or wrapped.
///
/// `{"rendered": "...", "protected": false}` and `"..."` both decode; extra
/// keys in the wrapper are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RenderedText {
    Plain(String),
    Rendered { rendered: String },
}

impl RenderedText {
    pub fn into_string(self) -> String {
        match self {
            RenderedText::Plain(s) | RenderedText::Rendered { rendered: s } => s,
        }
    }
}

/// Parse an ISO-8601 instant. A trailing `Z` is the same as `+00:00`.
///
/// The platform's `date`/`modified` fields carry no offset at all; those
/// are read as UTC.
pub fn parse_timestamp(field: &str, raw: &str) -> Result<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt);
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc().fixed_offset())
        .map_err(|e| WpcmError::Format(format!("{field}: '{raw}' is not an ISO-8601 timestamp ({e})")))
}

pub fn expect_array<'a>(value: &'a Value, what: &str) -> Result<&'a [Value]> {
    value
        .as_array()
        .map(|v| v.as_slice())
        .ok_or_else(|| WpcmError::Format(format!("expected a list of {what}, got {}", type_name(value))))
}

pub fn decode<'a, T: Deserialize<'a>>(value: &'a Value, what: &str) -> Result<T> {
    T::deserialize(value).map_err(|e| WpcmError::Format(format!("malformed {what}: {e}")))
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
