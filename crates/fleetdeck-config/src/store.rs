//! Settings stores.
//!
//! # Design
//! - `SettingsStore` is the seam the console talks to; the file store is the
//!   production implementation, the memory store backs tests and
//!   non-persistent sessions.
//! - `load` never fails on a missing file: defaults are written and returned.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use directories::ProjectDirs;

use crate::error::{ConfigError, ConfigResult};
use crate::model::AppSettings;
use crate::validate::validate_settings;

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "FLEETDECK_CONFIG_DIR";
/// File name of the persisted settings document.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

const PROJECT_QUALIFIER: &str = "com";
const PROJECT_ORGANIZATION: &str = "fleetdeck";
const PROJECT_APPLICATION: &str = "fleetdeck";

/// Host-provided configuration store.
pub trait SettingsStore: Send + Sync {
    /// Load the persisted settings, creating defaults when none exist.
    ///
    /// # Errors
    /// Returns an error when the document cannot be read or decoded.
    fn load(&self) -> ConfigResult<AppSettings>;

    /// Validate and persist `settings`.
    ///
    /// # Errors
    /// Returns an error when validation fails or the document cannot be
    /// written.
    fn save(&self, settings: &AppSettings) -> ConfigResult<()>;

    /// Persist and return the default settings.
    ///
    /// # Errors
    /// Returns an error when the document cannot be written.
    fn reset(&self) -> ConfigResult<AppSettings> {
        let defaults = AppSettings::default();
        self.save(&defaults)?;
        Ok(defaults)
    }
}

/// Resolve the configuration directory from the environment.
///
/// `FLEETDECK_CONFIG_DIR` wins; otherwise the platform configuration
/// directory for the application is used.
///
/// # Errors
/// Returns [`ConfigError::ConfigDirUnavailable`] when no home directory can
/// be determined for the current user.
pub fn default_config_dir() -> ConfigResult<PathBuf> {
    resolve_config_dir(env::var(CONFIG_DIR_ENV).ok())
}

fn resolve_config_dir(override_dir: Option<String>) -> ConfigResult<PathBuf> {
    if let Some(dir) = override_dir.filter(|value| !value.trim().is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from(PROJECT_QUALIFIER, PROJECT_ORGANIZATION, PROJECT_APPLICATION)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(ConfigError::ConfigDirUnavailable)
}

/// JSON file-backed settings store.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    /// Store rooted at `dir`, using `settings.json` inside it.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SETTINGS_FILE_NAME),
        }
    }

    /// Store rooted at [`default_config_dir`].
    ///
    /// # Errors
    /// Returns an error when no configuration directory can be resolved.
    pub fn from_env() -> ConfigResult<Self> {
        default_config_dir().map(Self::in_dir)
    }

    /// Location of the settings document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, settings: &AppSettings) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content =
            serde_json::to_string_pretty(settings).map_err(|source| ConfigError::Json {
                operation: "encode",
                path: self.path.clone(),
                source,
            })?;
        fs::write(&self.path, content).map_err(|source| ConfigError::Io {
            operation: "write",
            path: self.path.clone(),
            source,
        })
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> ConfigResult<AppSettings> {
        if !self.path.exists() {
            let defaults = AppSettings::default();
            self.write(&defaults)?;
            tracing::info!(path = %self.path.display(), "created default settings");
            return Ok(defaults);
        }
        let content = fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            operation: "read",
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            operation: "parse",
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, settings: &AppSettings) -> ConfigResult<()> {
        validate_settings(settings)?;
        self.write(settings)?;
        tracing::debug!(path = %self.path.display(), api_url = %settings.api_url, "settings saved");
        Ok(())
    }
}

/// Non-persistent settings store.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: RwLock<Option<AppSettings>>,
}

impl MemorySettingsStore {
    /// Store pre-populated with `settings`.
    #[must_use]
    pub const fn with_settings(settings: AppSettings) -> Self {
        Self {
            settings: RwLock::new(Some(settings)),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> ConfigResult<AppSettings> {
        let mut guard = self
            .settings
            .write()
            .map_err(|_| ConfigError::LockPoisoned)?;
        Ok(guard.get_or_insert_with(AppSettings::default).clone())
    }

    fn save(&self, settings: &AppSettings) -> ConfigResult<()> {
        validate_settings(settings)?;
        let mut guard = self
            .settings
            .write()
            .map_err(|_| ConfigError::LockPoisoned)?;
        *guard = Some(settings.clone());
        Ok(())
    }
}
