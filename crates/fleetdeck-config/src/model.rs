//! Persisted console settings.

use serde::{Deserialize, Serialize};

/// Backend URL used until the operator configures one.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";
/// Dashboard refresh interval used until the operator configures one.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u32 = 30;

/// Settings document stored in `settings.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppSettings {
    /// Base URL of the backend API.
    pub api_url: String,
    /// Dashboard refresh interval in seconds.
    pub refresh_interval: u32,
    /// Whether notifications are shown.
    pub notifications: bool,
    /// Whether the dark theme is active.
    pub dark_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL_SECS,
            notifications: true,
            dark_mode: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_documented_values() {
        let settings = AppSettings::default();
        assert_eq!(
            serde_json::to_value(&settings).expect("serialize"),
            json!({
                "api_url": "http://localhost:8080",
                "refresh_interval": 30,
                "notifications": true,
                "dark_mode": true
            })
        );
    }
}
