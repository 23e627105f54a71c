//! Error types for settings operations.
//!
//! # Design
//! - Constant messages; context lives in fields so callers can render it.
//! - Preserve source errors without interpolating them into the message.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for settings operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Field contained an invalid value.
    #[error("invalid settings field")]
    InvalidField {
        /// Field that failed validation.
        field: &'static str,
        /// Machine-readable reason for the failure.
        reason: &'static str,
        /// Offending value when available.
        value: Option<String>,
    },
    /// No configuration directory could be derived from the environment.
    #[error("configuration directory unavailable")]
    ConfigDirUnavailable,
    /// File system operation failed.
    #[error("settings io failure")]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Path involved in the failure.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
    /// Settings document could not be encoded or decoded.
    #[error("settings json failure")]
    Json {
        /// Operation identifier.
        operation: &'static str,
        /// Path involved in the failure.
        path: PathBuf,
        /// Source JSON error.
        source: serde_json::Error,
    },
    /// In-memory store lock was poisoned by a panicking writer.
    #[error("settings store lock poisoned")]
    LockPoisoned,
}

impl ConfigError {
    /// Render the error with its context for display to an operator.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::InvalidField {
                field,
                reason,
                value,
            } => value.as_ref().map_or_else(
                || format!("invalid {field}: {reason}"),
                |value| format!("invalid {field} '{value}': {reason}"),
            ),
            Self::ConfigDirUnavailable => {
                "could not determine a configuration directory (set FLEETDECK_CONFIG_DIR)"
                    .to_string()
            }
            Self::Io {
                operation,
                path,
                source,
            } => format!("failed to {operation} {}: {source}", path.display()),
            Self::Json {
                operation,
                path,
                source,
            } => format!("failed to {operation} {}: {source}", path.display()),
            Self::LockPoisoned => self.to_string(),
        }
    }
}

/// Convenience alias for settings results.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_includes_field_context() {
        let err = ConfigError::InvalidField {
            field: "refresh_interval",
            reason: "must be between 5 and 300 seconds",
            value: Some("2".into()),
        };
        assert_eq!(err.to_string(), "invalid settings field");
        assert_eq!(
            err.detail(),
            "invalid refresh_interval '2': must be between 5 and 300 seconds"
        );
    }

    #[test]
    fn detail_includes_io_path() {
        let err = ConfigError::Io {
            operation: "read",
            path: PathBuf::from("/tmp/settings.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.detail().starts_with("failed to read /tmp/settings.json"));
    }
}
