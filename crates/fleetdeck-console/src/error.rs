//! Error types surfaced by the API clients, stores, and controller.
//!
//! # Design
//! - Constant display strings; `user_message` renders the context shown in
//!   notifications.
//! - Three families: bridge failures, agent rejections (`success: false`),
//!   and client-side validation that blocks a call.

use fleetdeck_config::ConfigError;
use thiserror::Error;

use crate::bridge::BridgeError;

/// Primary error type for console operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or bridge failure, including non-2xx statuses.
    #[error("bridge call failed")]
    Bridge(#[from] BridgeError),
    /// A response did not match the expected shape.
    #[error("unexpected response shape")]
    Decode {
        /// Endpoint that produced the response.
        endpoint: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// A request body could not be encoded.
    #[error("failed to encode request")]
    Encode {
        /// Endpoint the body was destined for.
        endpoint: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// The agent reported `success: false`.
    #[error("operation rejected")]
    Rejected {
        /// Operation identifier.
        operation: &'static str,
        /// Agent message or the per-operation fallback.
        message: String,
    },
    /// Input failed validation before any call was made.
    #[error("invalid input")]
    Validation(String),
    /// Local settings could not be read, validated, or written.
    #[error("settings failure")]
    Settings(#[from] ConfigError),
}

impl ApiError {
    /// Text shown to the operator in notifications and error flags.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Bridge(err) => err.detail(),
            Self::Decode { endpoint, source } => {
                format!("Failed to parse response from {endpoint}: {source}")
            }
            Self::Encode { endpoint, source } => {
                format!("Failed to encode request for {endpoint}: {source}")
            }
            Self::Rejected { message, .. } | Self::Validation(message) => message.clone(),
            Self::Settings(err) => err.detail(),
        }
    }

    /// HTTP status of a rejected bridge call, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Bridge(BridgeError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

/// Convenience alias for console results.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_message_is_shown_verbatim() {
        let err = ApiError::Rejected {
            operation: "list_files",
            message: "Permission denied".into(),
        };
        assert_eq!(err.user_message(), "Permission denied");
        assert_eq!(err.to_string(), "operation rejected");
    }

    #[test]
    fn bridge_status_is_exposed() {
        let err = ApiError::from(BridgeError::Status {
            status: 502,
            body: String::new(),
        });
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.user_message(), "API error (502)");
    }
}
