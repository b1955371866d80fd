//! API error classification

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("session expired or not signed in")]
    Unauthorized,
    #[error("permission denied")]
    Forbidden,
    #[error("record not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Map a non-2xx response to an error class
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound,
            400 | 409 | 422 => ApiError::Validation(
                extract_message(body).unwrap_or_else(|| "the request was rejected".to_string()),
            ),
            _ => ApiError::Server {
                status,
                message: extract_message(body).unwrap_or_else(|| "unexpected failure".to_string()),
            },
        }
    }

    /// Text for the alert dialog
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Could not reach the server. Check your connection and try again.".to_string(),
            ApiError::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            ApiError::Forbidden => "You do not have permission to do that.".to_string(),
            ApiError::NotFound => "That record no longer exists.".to_string(),
            ApiError::Validation(message) => format!("Please fix the following: {}", message),
            ApiError::Server { .. } => "The server ran into a problem. Please try again later.".to_string(),
            ApiError::Decode(_) => "The server sent a response this page could not read.".to_string(),
        }
    }
}

/// Pull `error` / `message` / `detail` out of a JSON error body
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    for key in ["error", "message", "detail"] {
        match value.get(key) {
            Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(Value::Object(inner)) => {
                if let Some(Value::String(s)) = inner.get("message") {
                    return Some(s.clone());
                }
            }
            _ => {}
        }
    }
    if let Some(Value::Object(errors)) = value.get("errors") {
        let parts: Vec<String> = errors
            .iter()
            .map(|(field, detail)| match detail {
                Value::Array(list) => format!(
                    "{} {}",
                    field,
                    list.iter().filter_map(Value::as_str).collect::<Vec<_>>().join(", ")
                ),
                Value::String(s) => format!("{} {}", field, s),
                other => format!("{} {}", field, other),
            })
            .collect();
        if !parts.is_empty() {
            return Some(parts.join("; "));
        }
    }
    None
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classes() {
        assert_eq!(ApiError::from_status(401, ""), ApiError::Unauthorized);
        assert_eq!(ApiError::from_status(403, "nope"), ApiError::Forbidden);
        assert_eq!(ApiError::from_status(404, ""), ApiError::NotFound);
        assert_eq!(
            ApiError::from_status(500, "<html>"),
            ApiError::Server { status: 500, message: "unexpected failure".to_string() }
        );
    }

    #[test]
    fn test_validation_message_extraction() {
        assert_eq!(
            ApiError::from_status(422, r#"{"error": "email is already taken"}"#),
            ApiError::Validation("email is already taken".to_string())
        );
        assert_eq!(
            ApiError::from_status(400, r#"{"error": {"message": "amount must be positive"}}"#),
            ApiError::Validation("amount must be positive".to_string())
        );
        assert_eq!(
            ApiError::from_status(422, r#"{"errors": {"name": ["can't be blank"]}}"#),
            ApiError::Validation("name can't be blank".to_string())
        );
        assert_eq!(
            ApiError::from_status(409, "conflict"),
            ApiError::Validation("the request was rejected".to_string())
        );
    }

    #[test]
    fn test_user_messages_differ_by_class() {
        let network = ApiError::Network("offline".into()).user_message();
        let validation = ApiError::Validation("name missing".into()).user_message();
        assert_ne!(network, validation);
        assert!(validation.contains("name missing"));
    }
}
