//! Settings state backed by a [`SettingsStore`].
//!
//! # Design
//! - `fetch` never leaves the console without settings: on failure the
//!   defaults are used, the error recorded, and the state still marked
//!   initialized.
//! - Every persisted change re-targets the façade at the saved `api_url`.
//!   The façade is re-targeted before the store is written and restored
//!   when the write fails.

use std::sync::Arc;

use fleetdeck_config::{
    AppSettings, ConfigResult, SettingsStore, validate::parse_api_url, validate_settings,
};

use crate::error::{ApiError, ApiResult};
use crate::facade::Facade;

/// Single-field edit applied by [`SettingsState::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingField {
    /// Backend base URL.
    ApiUrl(String),
    /// Refresh interval in seconds.
    RefreshInterval(u32),
    /// Notification toggle.
    Notifications(bool),
    /// Theme toggle.
    DarkMode(bool),
}

/// Settings currently in effect plus the edit/save flags.
pub struct SettingsState {
    store: Arc<dyn SettingsStore>,
    facade: Facade,
    settings: AppSettings,
    loading: bool,
    initialized: bool,
    saved: bool,
    error: Option<String>,
}

impl SettingsState {
    /// Defaults, not yet loaded from `store`.
    #[must_use]
    pub fn new(store: Arc<dyn SettingsStore>, facade: Facade) -> Self {
        Self {
            store,
            facade,
            settings: AppSettings::default(),
            loading: false,
            initialized: false,
            saved: false,
            error: None,
        }
    }

    /// Settings in effect (including unsaved edits).
    #[must_use]
    pub const fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Whether `fetch` has completed at least once.
    #[must_use]
    pub const fn initialized(&self) -> bool {
        self.initialized
    }

    /// Whether the in-memory settings match what was last persisted.
    #[must_use]
    pub const fn saved(&self) -> bool {
        self.saved
    }

    /// Whether a store call is in progress.
    #[must_use]
    pub const fn loading(&self) -> bool {
        self.loading
    }

    /// Message from the last failed call.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Load persisted settings and point the façade at their `api_url`.
    pub fn fetch(&mut self) {
        self.loading = true;
        self.error = None;
        let loaded: ApiResult<AppSettings> = self
            .store
            .load()
            .map_err(ApiError::from)
            .and_then(|settings| self.apply_target(&settings).map(|()| settings));
        self.loading = false;
        self.initialized = true;
        match loaded {
            Ok(settings) => self.settings = settings,
            Err(err) => {
                let message = err.user_message();
                tracing::warn!(error = %message, "settings unavailable; using defaults");
                self.error = Some(message);
                self.settings = AppSettings::default();
                if let Err(err) = self.apply_target(&self.settings) {
                    tracing::warn!(error = %err.user_message(), "default api_url not applied");
                }
            }
        }
    }

    /// Validate, persist, and apply `settings`.
    ///
    /// # Errors
    /// Returns validation, persistence, or retarget failures after recording
    /// them; the previous settings stay in effect.
    pub fn save(&mut self, settings: AppSettings) -> ApiResult<()> {
        self.loading = true;
        self.error = None;
        let result = validate_settings(&settings)
            .map_err(ApiError::from)
            .and_then(|()| self.retarget_then(&settings, |store| store.save(&settings)));
        self.loading = false;
        if let Err(err) = &result {
            self.error = Some(err.user_message());
            return result;
        }
        tracing::info!(api_url = %settings.api_url, refresh_interval = settings.refresh_interval, "settings saved");
        self.settings = settings;
        self.saved = true;
        Ok(())
    }

    /// Persist the in-memory settings, including unsaved edits.
    ///
    /// # Errors
    /// See [`SettingsState::save`].
    pub fn save_current(&mut self) -> ApiResult<()> {
        self.save(self.settings.clone())
    }

    /// Edit one field in memory; clears `saved`.
    pub fn update(&mut self, field: SettingField) {
        match field {
            SettingField::ApiUrl(url) => self.settings.api_url = url,
            SettingField::RefreshInterval(secs) => self.settings.refresh_interval = secs,
            SettingField::Notifications(enabled) => self.settings.notifications = enabled,
            SettingField::DarkMode(enabled) => self.settings.dark_mode = enabled,
        }
        self.saved = false;
    }

    /// Persist and apply the defaults.
    ///
    /// # Errors
    /// Returns persistence or retarget failures after recording them.
    pub fn reset(&mut self) -> ApiResult<()> {
        self.loading = true;
        self.error = None;
        let defaults = AppSettings::default();
        let result = self.retarget_then(&defaults, |store| store.reset());
        self.loading = false;
        match result {
            Ok(defaults) => {
                tracing::info!("settings reset to defaults");
                self.settings = defaults;
                self.saved = true;
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Clear the `saved` flag.
    pub fn clear_saved(&mut self) {
        self.saved = false;
    }

    /// Forget the last error.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Point the façade at `settings.api_url`, then run `persist`; the
    /// previous target is restored when persisting fails.
    fn retarget_then<T>(
        &self,
        settings: &AppSettings,
        persist: impl FnOnce(&dyn SettingsStore) -> ConfigResult<T>,
    ) -> ApiResult<T> {
        let previous = self.facade.target()?;
        self.apply_target(settings)?;
        persist(self.store.as_ref()).map_err(|err| {
            if let Err(restore) = self.facade.retarget(previous) {
                tracing::warn!(error = %restore.user_message(), "previous api_url not restored");
            }
            ApiError::from(err)
        })
    }

    fn apply_target(&self, settings: &AppSettings) -> ApiResult<()> {
        let url = parse_api_url(&settings.api_url)?;
        self.facade.retarget(url)
    }
}

impl std::fmt::Debug for SettingsState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsState")
            .field("settings", &self.settings)
            .field("initialized", &self.initialized)
            .field("saved", &self.saved)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
