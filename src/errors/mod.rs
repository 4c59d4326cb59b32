//! Error handling module for the travel console.
//!
//! Provides the client-side error taxonomy: failures talking to the catalog backend
//! and failures of the form state machine itself.

use serde_json::Value;

/// Error raised by the catalog client.
#[derive(Debug)]
pub enum ClientError {
    /// Client could not be constructed (bad base URL)
    Config(String),
    /// No response was received
    Transport(String),
    /// The backend answered with a non-success status
    Status {
        status: u16,
        message: Option<String>,
        body: Value,
    },
    /// The response body could not be decoded
    Decode(String),
}

impl ClientError {
    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message supplied by the backend, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Message to show an operator: the backend's own text, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }

    /// Build a status error from a response body, pulling out its `message` field.
    pub fn from_status(status: u16, body: Value) -> Self {
        let message = server_message_in(&body);
        ClientError::Status {
            status,
            message,
            body,
        }
    }
}

/// Locate a backend-supplied message: `{message}` or `{error: {message}}`.
fn server_message_in(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .or_else(|| {
            body.get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
        })
        .map(str::to_string)
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Config(msg) => write!(f, "CONFIG: {}", msg),
            ClientError::Transport(msg) => write!(f, "TRANSPORT: {}", msg),
            ClientError::Status {
                status,
                message: Some(msg),
                ..
            } => write!(f, "HTTP {}: {}", status, msg),
            ClientError::Status { status, body, .. } => write!(f, "HTTP {}: {}", status, body),
            ClientError::Decode(msg) => write!(f, "DECODE: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("API Error: {:?}", err);
        if err.is_decode() {
            ClientError::Decode(format!("Response decode error: {}", err))
        } else {
            ClientError::Transport(format!("Transport error: {}", err))
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        ClientError::Decode(format!("JSON error: {}", err))
    }
}

/// Error raised by a form before or around a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Required fields are empty; nothing was sent
    MissingFields(Vec<&'static str>),
    /// A submission is already in flight
    Busy,
    /// `change_field` was given a path the form does not have
    UnknownField(String),
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::MissingFields(fields) => {
                write!(f, "Please fill out required fields: {}", fields.join(", "))
            }
            FormError::Busy => write!(f, "A save is already in progress"),
            FormError::UnknownField(path) => write!(f, "Unknown field: {}", path),
        }
    }
}

impl std::error::Error for FormError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_message_top_level() {
        let err = ClientError::from_status(400, json!({ "message": "Name is required" }));
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.user_message("Failed to save hotel"), "Name is required");
    }

    #[test]
    fn test_server_message_nested_error() {
        let err = ClientError::from_status(
            409,
            json!({ "success": false, "error": { "code": "CONFLICT", "message": "Duplicate" } }),
        );
        assert_eq!(err.server_message(), Some("Duplicate"));
    }

    #[test]
    fn test_fallback_message() {
        let err = ClientError::from_status(500, json!("boom"));
        assert_eq!(err.user_message("Failed to save hotel"), "Failed to save hotel");

        let err = ClientError::Transport("connection refused".to_string());
        assert_eq!(
            err.user_message("Failed to load destinations"),
            "Failed to load destinations"
        );
    }

    #[test]
    fn test_blank_server_message_uses_fallback() {
        let err = ClientError::from_status(500, json!({ "message": "  " }));
        assert_eq!(err.user_message("Failed to delete hotel"), "Failed to delete hotel");
    }
}
