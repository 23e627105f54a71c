use fleetdeck_config::{AppSettings, ConfigError, FileSettingsStore, SettingsStore};
use tempfile::TempDir;

#[test]
fn load_creates_defaults_when_missing() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = FileSettingsStore::in_dir(dir.path().join("nested"));

    let settings = store.load()?;
    assert_eq!(settings, AppSettings::default());
    assert!(store.path().exists(), "defaults should be persisted");

    let raw = std::fs::read_to_string(store.path())?;
    assert!(raw.contains("\"api_url\": \"http://localhost:8080\""));
    Ok(())
}

#[test]
fn save_then_load_round_trips() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = FileSettingsStore::in_dir(dir.path());
    let custom = AppSettings {
        api_url: "https://fleet.example:9443".into(),
        refresh_interval: 60,
        notifications: false,
        dark_mode: false,
    };

    store.save(&custom)?;
    assert_eq!(FileSettingsStore::in_dir(dir.path()).load()?, custom);
    Ok(())
}

#[test]
fn invalid_settings_are_not_written() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = FileSettingsStore::in_dir(dir.path());
    store.load()?;

    let err = store
        .save(&AppSettings {
            api_url: "not a url".into(),
            ..AppSettings::default()
        })
        .expect_err("invalid url rejected");
    assert!(matches!(err, ConfigError::InvalidField { field: "api_url", .. }));
    assert_eq!(store.load()?, AppSettings::default());
    Ok(())
}

#[test]
fn reset_overwrites_customisations() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = FileSettingsStore::in_dir(dir.path());
    store.save(&AppSettings {
        refresh_interval: 120,
        ..AppSettings::default()
    })?;

    assert_eq!(store.reset()?, AppSettings::default());
    assert_eq!(store.load()?.refresh_interval, 30);
    Ok(())
}

#[test]
fn corrupt_document_reports_parse_failure() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = FileSettingsStore::in_dir(dir.path());
    std::fs::write(store.path(), "{ not json")?;

    let err = store.load().expect_err("corrupt file");
    assert!(matches!(err, ConfigError::Json { operation: "parse", .. }));
    Ok(())
}
