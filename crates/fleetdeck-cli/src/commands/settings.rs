use fleetdeck_console::AppContext;
use fleetdeck_console::store::SettingField;

use crate::cli::{OutputFormat, SettingsCommand, SettingsSetArgs};
use crate::client::{CliError, CliResult};
use crate::output::render_settings;

pub(crate) fn handle_settings(
    ctx: &mut AppContext,
    command: SettingsCommand,
    format: OutputFormat,
) -> CliResult<()> {
    match command {
        SettingsCommand::Show => render_settings(ctx.settings.settings(), format),
        SettingsCommand::Set(args) => {
            let fields = fields(args);
            if fields.is_empty() {
                return Err(CliError::validation(
                    "nothing to set; pass at least one setting flag",
                ));
            }
            for field in fields {
                ctx.settings.update(field);
            }
            ctx.settings.save_current().map_err(CliError::from_api)?;
            println!("Settings saved.");
            render_settings(ctx.settings.settings(), format)
        }
        SettingsCommand::Reset => {
            ctx.settings.reset().map_err(CliError::from_api)?;
            println!("Settings reset to defaults.");
            render_settings(ctx.settings.settings(), format)
        }
    }
}

fn fields(args: SettingsSetArgs) -> Vec<SettingField> {
    let mut fields = Vec::new();
    if let Some(url) = args.api_url {
        fields.push(SettingField::ApiUrl(url));
    }
    if let Some(secs) = args.refresh_interval {
        fields.push(SettingField::RefreshInterval(secs));
    }
    if let Some(enabled) = args.notifications {
        fields.push(SettingField::Notifications(enabled));
    }
    if let Some(enabled) = args.dark_mode {
        fields.push(SettingField::DarkMode(enabled));
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use anyhow::{Result, anyhow};
    use fleetdeck_config::{AppSettings, FileSettingsStore, SettingsStore};
    use fleetdeck_console::BridgeOptions;

    fn unset() -> SettingsSetArgs {
        SettingsSetArgs {
            api_url: None,
            refresh_interval: None,
            notifications: None,
            dark_mode: None,
        }
    }

    fn file_context(dir: &std::path::Path) -> Result<(AppContext, Arc<FileSettingsStore>)> {
        let store = Arc::new(FileSettingsStore::in_dir(dir));
        let ctx = AppContext::bootstrap(store.clone(), &BridgeOptions::default())?;
        Ok((ctx, store))
    }

    #[test]
    fn set_persists_and_retargets() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (mut ctx, store) = file_context(dir.path())?;

        handle_settings(
            &mut ctx,
            SettingsCommand::Set(SettingsSetArgs {
                api_url: Some("http://fleet.lan:9000".into()),
                refresh_interval: Some(60),
                ..unset()
            }),
            OutputFormat::Table,
        )
        .map_err(|err| anyhow!(err.display_message()))?;

        let saved = store.load()?;
        assert_eq!(saved.api_url, "http://fleet.lan:9000");
        assert_eq!(saved.refresh_interval, 60);
        assert_eq!(ctx.facade.target()?.as_str(), "http://fleet.lan:9000/");
        Ok(())
    }

    #[test]
    fn out_of_range_interval_is_validation_and_not_saved() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (mut ctx, store) = file_context(dir.path())?;

        let err = handle_settings(
            &mut ctx,
            SettingsCommand::Set(SettingsSetArgs {
                refresh_interval: Some(1),
                ..unset()
            }),
            OutputFormat::Table,
        )
        .expect_err("interval below range");
        assert_eq!(err.exit_code(), 2);
        assert_eq!(store.load()?, AppSettings::default());
        Ok(())
    }

    #[test]
    fn set_without_flags_is_rejected() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (mut ctx, _store) = file_context(dir.path())?;
        let err = handle_settings(&mut ctx, SettingsCommand::Set(unset()), OutputFormat::Table)
            .expect_err("no flags");
        assert_eq!(err.exit_code(), 2);
        Ok(())
    }

    #[test]
    fn reset_restores_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = FileSettingsStore::in_dir(dir.path());
        store.save(&AppSettings {
            dark_mode: false,
            ..AppSettings::default()
        })?;
        let (mut ctx, store) = file_context(dir.path())?;
        assert!(!ctx.settings.settings().dark_mode);

        handle_settings(&mut ctx, SettingsCommand::Reset, OutputFormat::Json)
            .map_err(|err| anyhow!(err.display_message()))?;
        assert_eq!(store.load()?, AppSettings::default());
        assert_eq!(ctx.settings.settings(), &AppSettings::default());
        Ok(())
    }
}
