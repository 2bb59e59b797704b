use thiserror::Error;

use crate::repo::InvalidInput;

pub const MALFORMED_RESPONSE_MESSAGE: &str =
    "invalid JSON returned from server, if this continues to happen contact @CodeMyst";
pub const NOT_FOUND_MESSAGE: &str = "repo doesn't exist or has no open issues.";
pub const TRANSPORT_MESSAGE: &str =
    "could not reach the server, check your connection and try again";

/// Why a submission did not end with an issue on screen.
///
/// `Display` is the exact text shown in the error banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("invalid repo url")]
    InvalidInput,
    /// Non-200 answer. `message` comes from the response body when it is
    /// JSON, else from a fallback keyed on the status.
    #[error("{message}")]
    Server { status: u16, message: String },
    /// 200 with a body that is not an issue.
    #[error("{}", MALFORMED_RESPONSE_MESSAGE)]
    MalformedResponse,
    /// The request never got an answer. The payload is the underlying
    /// error, kept for the debug log only.
    #[error("{}", TRANSPORT_MESSAGE)]
    Transport(String),
}

impl From<InvalidInput> for FetchError {
    fn from(_: InvalidInput) -> Self {
        FetchError::InvalidInput
    }
}

impl FetchError {
    /// Build the `Server` variant from a non-200 status and its raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| message_from_json(&value))
            .unwrap_or_else(|| fallback_message(status));
        FetchError::Server { status, message }
    }
}

fn message_from_json(value: &serde_json::Value) -> Option<String> {
    use serde_json::Value;
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(map) => ["message", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_owned)
            .or_else(|| Some(value.to_string())),
        Value::Null | Value::String(_) => None,
        other => Some(other.to_string()),
    }
}

fn fallback_message(status: u16) -> String {
    if status == 404 {
        NOT_FOUND_MESSAGE.to_owned()
    } else {
        format!("server error (HTTP {status})")
    }
}
