//! Error types for bookview-parser

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid payload at {location}: {message}")]
    InvalidPayload { location: String, message: String },

    #[error("Not found: {path}")]
    NotFound { path: String },

    #[error("Invalid company id: {id:?}")]
    InvalidCompany { id: String },

    /// The collaborator answered with an error payload instead of data
    #[error("{message}")]
    Collaborator { message: String },

    #[error("IO error")]
    IoError(#[from] io::Error),
}

/// An error envelope is an object carrying an `error` or `errors` key
pub fn is_error_payload(payload: &serde_json::Value) -> bool {
    payload
        .as_object()
        .map(|object| object.contains_key("error") || object.contains_key("errors"))
        .unwrap_or(false)
}

/// Pick the most useful human-readable message out of an error payload.
///
/// Checks `message`, `error`, `errors` (arrays are joined with spaces) and
/// `detail` in that order, then accepts a bare string payload.
pub fn best_error_message(payload: &serde_json::Value) -> Option<String> {
    use serde_json::Value;

    if let Value::String(s) = payload {
        return if s.trim().is_empty() { None } else { Some(s.clone()) };
    }

    let object = payload.as_object()?;
    for key in ["message", "error", "errors", "detail"] {
        match object.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.clone()),
            Some(Value::Array(items)) if !items.is_empty() => {
                let parts: Vec<String> = items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect();
                return Some(parts.join(" "));
            }
            _ => {}
        }
    }

    None
}
