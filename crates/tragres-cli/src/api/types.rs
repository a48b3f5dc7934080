//! Wire-level helpers for API error responses
//!
//! Resource payloads themselves are the domain types from
//! `tragres_common::types`.

use serde_json::{Map, Value};

/// Message used when an error response carries nothing readable
pub const GENERIC_ERROR_MESSAGE: &str = "Request failed";

/// Extract a human-readable message from an error response body
///
/// Understands `{"detail": "..."}` and field-keyed validation errors such as
/// `{"name": ["This field is required."]}`. Anything else, including bodies
/// that are not JSON, yields [`GENERIC_ERROR_MESSAGE`].
pub fn error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => detail(&fields)
            .or_else(|| field_errors(&fields))
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
        Ok(value @ Value::Array(_)) => {
            messages(&value).unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
        }
        _ => GENERIC_ERROR_MESSAGE.to_string(),
    }
}

fn detail(fields: &Map<String, Value>) -> Option<String> {
    fields
        .get("detail")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Fields are reported in name order
fn field_errors(fields: &Map<String, Value>) -> Option<String> {
    let mut entries: Vec<(&String, &Value)> = fields.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let parts: Vec<String> = entries
        .into_iter()
        .filter_map(|(field, value)| {
            let text = messages(value)?;
            if field == "non_field_errors" {
                Some(text)
            } else {
                Some(format!("{}: {}", field, text))
            }
        })
        .collect();

    (!parts.is_empty()).then(|| parts.join("; "))
}

fn messages(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Array(items) => {
            let texts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!texts.is_empty()).then(|| texts.join(" "))
        }
        _ => None,
    }
}
