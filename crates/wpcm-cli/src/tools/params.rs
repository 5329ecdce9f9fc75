//! Coercion of loosely typed tool arguments into domain shapes.
//!
//! Agents send numbers as strings, booleans as `"true"`, and lists either as
//! JSON arrays or comma-separated strings. Absent and `null` are the same
//! thing here; an explicit empty string is not absent.

use serde_json::{Map, Value};
use wpcm_core::types::PostStatus;
use wpcm_core::{Result, WpcmError};

/// The argument, or `None` when missing or `null`.
pub fn field<'a>(args: &'a Value, name: &str) -> Option<&'a Value> {
    args.get(name).filter(|v| !v.is_null())
}

pub fn required_str<'a>(args: &'a Value, name: &str) -> Result<&'a str> {
    match field(args, name) {
        None => Err(WpcmError::parameter(name, "is required")),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(WpcmError::parameter(name, "must be a string")),
    }
}

pub fn optional_str(args: &Value, name: &str) -> Result<Option<String>> {
    match field(args, name) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(WpcmError::parameter(name, "must be a string")),
    }
}

pub fn required_u64(args: &Value, name: &str) -> Result<u64> {
    optional_u64(args, name)?.ok_or_else(|| WpcmError::parameter(name, "is required"))
}

pub fn optional_u64(args: &Value, name: &str) -> Result<Option<u64>> {
    field(args, name).map(|v| to_u64(name, v)).transpose()
}

pub fn u32_or(args: &Value, name: &str, default: u32) -> Result<u32> {
    match optional_u64(args, name)? {
        None => Ok(default),
        Some(n) => u32::try_from(n).map_err(|_| WpcmError::parameter(name, "is out of range")),
    }
}

fn to_u64(name: &str, value: &Value) -> Result<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| WpcmError::parameter(name, format!("'{n}' is not a non-negative integer"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| WpcmError::parameter(name, format!("'{s}' is not a non-negative integer"))),
        _ => Err(WpcmError::parameter(name, "must be an integer")),
    }
}

pub fn bool_or(args: &Value, name: &str, default: bool) -> Result<bool> {
    match field(args, name) {
        None => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(WpcmError::parameter(name, format!("'{s}' is not true or false"))),
        },
        Some(_) => Err(WpcmError::parameter(name, "must be a boolean")),
    }
}

/// Ordered, trimmed list. A blank string is `None`; blank segments such as
/// the middle of `"a,,b"` are kept as empty strings.
pub fn string_list(args: &Value, name: &str) -> Result<Option<Vec<String>>> {
    match field(args, name) {
        None => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(split_commas(s).map(str::to_string).collect())),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.trim().to_string()),
                _ => Err(WpcmError::parameter(name, "list items must be strings")),
            })
            .collect::<Result<Vec<_>>>()
            .map(Some),
        Some(_) => Err(WpcmError::parameter(
            name,
            "must be a comma-separated string or a list",
        )),
    }
}

/// Like [`string_list`], but every element must be an integer id, so an
/// empty segment is an error.
pub fn id_list(args: &Value, name: &str) -> Result<Option<Vec<u64>>> {
    match field(args, name) {
        None => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => split_commas(s)
            .map(|part| {
                if part.is_empty() {
                    return Err(WpcmError::parameter(name, "empty id in list"));
                }
                part.parse().map_err(|_| {
                    WpcmError::parameter(name, format!("'{part}' is not a valid integer id"))
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Some),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| to_u64(name, item))
            .collect::<Result<Vec<_>>>()
            .map(Some),
        Some(_) => Err(WpcmError::parameter(
            name,
            "must be a comma-separated string or a list of integers",
        )),
    }
}

fn split_commas(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(str::trim)
}

/// A JSON object given either inline or as an encoded string. Malformed
/// JSON is an error, never an empty mapping.
pub fn json_object(args: &Value, name: &str) -> Result<Option<Map<String, Value>>> {
    let parsed = match field(args, name) {
        None => return Ok(None),
        Some(Value::String(s)) => serde_json::from_str::<Value>(s)
            .map_err(|e| WpcmError::parameter(name, format!("malformed JSON: {e}")))?,
        Some(other) => other.clone(),
    };
    match parsed {
        Value::Object(map) => Ok(Some(map)),
        _ => Err(WpcmError::parameter(name, "must be a JSON object")),
    }
}

/// An explicit empty status is rejected rather than defaulted.
pub fn optional_status(args: &Value, name: &str) -> Result<Option<PostStatus>> {
    optional_str(args, name)?
        .map(|s| {
            s.trim()
                .parse::<PostStatus>()
                .map_err(|_| WpcmError::parameter(name, format!("unknown status '{s}'")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_list_trims_and_parses() {
        let args = json!({"categories": "1, 2,3"});
        assert_eq!(id_list(&args, "categories").unwrap(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn id_list_empty_or_absent_is_none() {
        assert_eq!(id_list(&json!({"tags": ""}), "tags").unwrap(), None);
        assert_eq!(id_list(&json!({}), "tags").unwrap(), None);
        assert_eq!(id_list(&json!({"tags": null}), "tags").unwrap(), None);
    }

    #[test]
    fn id_list_rejects_non_integers() {
        let err = id_list(&json!({"tags": "1,x"}), "tags").unwrap_err();
        assert_eq!(err.kind(), "parameter_error");
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn id_list_rejects_empty_segments() {
        for input in ["1,,2", "1,", ",3", "1, ,2"] {
            let err = id_list(&json!({"categories": input}), "categories").unwrap_err();
            assert_eq!(err.kind(), "parameter_error", "input {input:?}");
            assert!(err.to_string().contains("empty id"));
        }
    }

    #[test]
    fn id_list_accepts_arrays_of_numbers_and_strings() {
        let args = json!({"tags": [4, "5"]});
        assert_eq!(id_list(&args, "tags").unwrap(), Some(vec![4, 5]));
        assert!(id_list(&json!({"tags": [-1]}), "tags").is_err());
    }

    #[test]
    fn string_list_keeps_blank_segments_in_order() {
        let args = json!({"keywords": " rust , ,async "});
        assert_eq!(
            string_list(&args, "keywords").unwrap(),
            Some(vec!["rust".to_string(), String::new(), "async".to_string()])
        );
        assert_eq!(string_list(&json!({"keywords": "  "}), "keywords").unwrap(), None);
    }

    #[test]
    fn string_list_accepts_arrays() {
        let args = json!({"keywords": ["a", " b "]});
        assert_eq!(
            string_list(&args, "keywords").unwrap(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert!(string_list(&json!({"keywords": [1]}), "keywords").is_err());
    }

    #[test]
    fn json_object_rejects_malformed_input() {
        let err = json_object(&json!({"acf_fields": "{not json"}), "acf_fields").unwrap_err();
        assert_eq!(err.kind(), "parameter_error");
        assert!(json_object(&json!({"acf_fields": ""}), "acf_fields").is_err());
        assert!(json_object(&json!({"acf_fields": "[1,2]"}), "acf_fields").is_err());
    }

    #[test]
    fn json_object_accepts_string_or_inline_object() {
        let from_str = json_object(&json!({"acf_fields": r#"{"a": 1}"#}), "acf_fields")
            .unwrap()
            .unwrap();
        let inline = json_object(&json!({"acf_fields": {"a": 1}}), "acf_fields")
            .unwrap()
            .unwrap();
        assert_eq!(from_str, inline);
    }

    #[test]
    fn integers_from_numbers_or_strings() {
        let args = json!({"a": 7, "b": " 8 ", "c": "eight", "d": 1.5});
        assert_eq!(required_u64(&args, "a").unwrap(), 7);
        assert_eq!(required_u64(&args, "b").unwrap(), 8);
        assert!(required_u64(&args, "c").is_err());
        assert!(required_u64(&args, "d").is_err());
        assert!(required_u64(&args, "missing").is_err());
    }

    #[test]
    fn defaults_only_apply_when_absent() {
        assert_eq!(u32_or(&json!({}), "per_page", 10).unwrap(), 10);
        assert!(u32_or(&json!({"per_page": ""}), "per_page", 10).is_err());
        assert!(bool_or(&json!({}), "force", false).is_ok_and(|b| !b));
        assert!(bool_or(&json!({"force": ""}), "force", false).is_err());
    }

    #[test]
    fn booleans_from_strings() {
        assert!(bool_or(&json!({"force": "true"}), "force", false).unwrap());
        assert!(!bool_or(&json!({"force": "False"}), "force", true).unwrap());
        assert!(bool_or(&json!({"force": "yes"}), "force", false).is_err());
    }

    #[test]
    fn status_parses_and_rejects_empty() {
        assert_eq!(
            optional_status(&json!({"status": "pending"}), "status").unwrap(),
            Some(PostStatus::Pending)
        );
        assert_eq!(optional_status(&json!({}), "status").unwrap(), None);
        assert!(optional_status(&json!({"status": ""}), "status").is_err());
    }

    #[test]
    fn required_str_distinguishes_missing_from_wrong_type() {
        let args = json!({"topic": 3});
        assert!(required_str(&args, "topic")
            .unwrap_err()
            .to_string()
            .contains("must be a string"));
        assert!(required_str(&json!({}), "topic")
            .unwrap_err()
            .to_string()
            .contains("is required"));
    }
}
