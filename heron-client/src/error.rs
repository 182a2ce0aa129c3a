//! Client error types

use std::collections::BTreeMap;
use thiserror::Error;

/// Fixed message shown for any transport-level failure
pub const CONNECTIVITY_MESSAGE: &str = "Cannot reach the server. Please try again later.";

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: network unreachable, timeout, malformed response
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response arrived but did not match the expected envelope shape
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Backend-reported logical failure (`success: false`), message verbatim
    #[error("{0}")]
    Backend(String),

    /// Resource not found (404 on a single-resource fetch)
    #[error("{0}")]
    NotFound(String),

    /// Client-side validation failure; request was never sent
    #[error("validation failed")]
    Validation(BTreeMap<&'static str, String>),
}

impl ClientError {
    /// Message suitable for a user-facing error banner.
    ///
    /// Transport failures collapse to one generic connectivity message;
    /// everything else surfaces its own text.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Transport(_) | ClientError::InvalidResponse(_) => {
                CONNECTIVITY_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }

    /// Field-level errors for a validation failure, empty otherwise
    pub fn field_errors(&self) -> Option<&BTreeMap<&'static str, String>> {
        match self {
            ClientError::Validation(map) => Some(map),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_surfaces_verbatim() {
        let err = ClientError::Backend("Leave overlaps an approved record".to_string());
        assert_eq!(err.user_message(), "Leave overlaps an approved record");
    }

    #[test]
    fn test_validation_exposes_field_map() {
        let mut fields = BTreeMap::new();
        fields.insert("reason", "Reason is required".to_string());
        let err = ClientError::Validation(fields);
        assert_eq!(
            err.field_errors().unwrap().get("reason").unwrap(),
            "Reason is required"
        );
    }
}
