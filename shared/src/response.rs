//! Backend response envelope
//!
//! Every HR backend endpoint replies with the same JSON shape:
//!
//! ```json
//! {
//!     "success": true,
//!     "data": { ... },
//!     "count": 12,
//!     "message": "optional human-readable text"
//! }
//! ```
//!
//! `success: false` carries the failure reason in `message`.

use serde::{Deserialize, Serialize};

/// Unified backend response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Logical outcome flag (transport-level success says nothing about this)
    pub success: bool,
    /// Response payload (absent on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Collection size, set by list endpoints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    /// Human-readable message (always set on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Create a successful envelope
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            count: None,
            message: None,
        }
    }

    /// Create a successful envelope with a collection count
    pub fn ok_with_count(data: T, count: u64) -> Self {
        Self {
            success: true,
            data: Some(data),
            count: Some(count),
            message: None,
        }
    }

    /// Create a failure envelope
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            count: None,
            message: Some(message.into()),
        }
    }

    /// Failure message, or a fixed fallback when the backend sent none
    pub fn message_or_default(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| "Request failed".to_string())
    }
}
