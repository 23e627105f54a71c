//! CLI error type and console context construction.

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use fleetdeck_config::{ConfigError, FileSettingsStore};
use fleetdeck_console::{ApiError, AppContext, BridgeOptions};

use crate::cli::Cli;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }

    /// Classify a console error: bad input and 400/409/422 answers are
    /// validation failures, everything else is operational.
    pub(crate) fn from_api(err: ApiError) -> Self {
        let message = err.user_message();
        match &err {
            ApiError::Validation(_) | ApiError::Settings(ConfigError::InvalidField { .. }) => {
                Self::validation(message)
            }
            _ if matches!(err.status(), Some(400 | 409 | 422)) => Self::validation(message),
            _ => Self::failure(anyhow!(message)),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Open the settings store named by the flags and bootstrap the console.
///
/// Settings are loaded before any API call; `--api-url` then overrides the
/// persisted target for this invocation only.
pub(crate) fn build_context(cli: &Cli, trace_id: &str) -> CliResult<AppContext> {
    let store = match &cli.config_dir {
        Some(dir) => FileSettingsStore::in_dir(dir),
        None => FileSettingsStore::from_env()
            .map_err(|err| CliError::failure(anyhow!(err.detail())))?,
    };
    tracing::debug!(path = %store.path().display(), "using settings file");

    let options = BridgeOptions {
        timeout: Duration::from_secs(cli.timeout),
        request_id: Some(trace_id.to_string()),
    };
    let context = AppContext::bootstrap(Arc::new(store), &options).map_err(CliError::from_api)?;
    if let Some(api_url) = &cli.api_url {
        context
            .override_api_url(api_url)
            .map_err(CliError::from_api)?;
    }
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetdeck_console::BridgeError;

    #[test]
    fn exit_codes_follow_error_class() {
        assert_eq!(CliError::validation("bad").exit_code(), 2);
        assert_eq!(CliError::failure(anyhow!("down")).exit_code(), 3);
    }

    #[test]
    fn conflict_status_is_validation() {
        let err = CliError::from_api(ApiError::Bridge(BridgeError::Status {
            status: 409,
            body: "name taken".into(),
        }));
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.display_message(), "API error (409): name taken");
    }

    #[test]
    fn server_errors_are_failures() {
        let err = CliError::from_api(ApiError::Bridge(BridgeError::Status {
            status: 502,
            body: String::new(),
        }));
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.display_message(), "API error (502)");
    }

    #[test]
    fn rejected_envelope_is_failure() {
        let err = CliError::from_api(ApiError::Rejected {
            operation: "delete_file",
            message: "Failed to delete file".into(),
        });
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.display_message(), "Failed to delete file");
    }
}
