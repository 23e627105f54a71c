//! Validation helpers for the settings document.

use std::ops::RangeInclusive;

use url::Url;

use crate::error::{ConfigError, ConfigResult};
use crate::model::AppSettings;

/// Accepted refresh interval bounds in seconds.
pub const REFRESH_INTERVAL_RANGE: RangeInclusive<u32> = 5..=300;

/// Validate a settings document before it is persisted or applied.
///
/// # Errors
/// Returns [`ConfigError::InvalidField`] naming the first offending field.
pub fn validate_settings(settings: &AppSettings) -> ConfigResult<()> {
    parse_api_url(&settings.api_url)?;
    if !REFRESH_INTERVAL_RANGE.contains(&settings.refresh_interval) {
        return Err(ConfigError::InvalidField {
            field: "refresh_interval",
            reason: "must be between 5 and 300 seconds",
            value: Some(settings.refresh_interval.to_string()),
        });
    }
    Ok(())
}

/// Parse the backend URL, requiring an absolute `http` or `https` URL.
///
/// # Errors
/// Returns [`ConfigError::InvalidField`] when the URL is malformed or uses
/// another scheme.
pub fn parse_api_url(raw: &str) -> ConfigResult<Url> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|_| ConfigError::InvalidField {
        field: "api_url",
        reason: "must be an absolute URL",
        value: Some(trimmed.to_string()),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidField {
            field: "api_url",
            reason: "scheme must be http or https",
            value: Some(trimmed.to_string()),
        });
    }
    if url.host_str().is_none() {
        return Err(ConfigError::InvalidField {
            field: "api_url",
            reason: "must include a host",
            value: Some(trimmed.to_string()),
        });
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_settings(&AppSettings::default()).is_ok());
    }

    #[test]
    fn rejects_non_http_scheme() {
        let settings = AppSettings {
            api_url: "ftp://fleet.example".into(),
            ..AppSettings::default()
        };
        let err = validate_settings(&settings).expect_err("ftp rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidField {
                field: "api_url",
                ..
            }
        ));
    }

    #[test]
    fn rejects_relative_url() {
        assert!(parse_api_url("/api").is_err());
    }

    #[test]
    fn refresh_interval_bounds_are_inclusive() {
        for (interval, ok) in [(4, false), (5, true), (300, true), (301, false)] {
            let settings = AppSettings {
                refresh_interval: interval,
                ..AppSettings::default()
            };
            assert_eq!(validate_settings(&settings).is_ok(), ok, "interval {interval}");
        }
    }
}
