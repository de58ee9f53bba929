//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{PortalError, PortalResult};
use crate::ui::{self, UiContext};
use std::path::PathBuf;

const VALID_KEYS: [&str; 11] = [
    "general.audit_log",
    "api.base_url",
    "api.timeout_secs",
    "api.endpoints.check_token",
    "api.endpoints.officer",
    "api.endpoints.language_by_code",
    "api.endpoints.dictionary",
    "api.endpoints.set_language",
    "api.endpoints.notifications_seen",
    "storage.path",
    "locale.fallback",
];

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    manager: &ConfigManager,
    config: &Config,
    ctx: &UiContext,
) -> PortalResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => println!("{}", manager.path().display()),
        Some(ConfigAction::Init { force }) => init_config(manager, force, ctx).await?,
        Some(ConfigAction::Set { key, value }) => {
            let mut config = config.clone();
            apply_value(&mut config, &key, &value)?;
            manager.save(&config).await?;
            ui::step_ok(ctx, &format!("Set {} = {}", key, value));
        }
    }

    Ok(())
}

fn show_config(config: &Config) -> PortalResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

async fn init_config(manager: &ConfigManager, force: bool, ctx: &UiContext) -> PortalResult<()> {
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            ctx,
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;
    ui::step_ok_detail(ctx, "Configuration initialized", &path.display().to_string());
    Ok(())
}

/// Set a dot-separated key on `config`
fn apply_value(config: &mut Config, key: &str, value: &str) -> PortalResult<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let endpoints = &mut config.api.endpoints;

    match parts.as_slice() {
        ["general", "audit_log"] => config.general.audit_log = parse_bool(value)?,
        ["api", "base_url"] => config.api.base_url = value.to_string(),
        ["api", "timeout_secs"] => {
            config.api.timeout_secs = value
                .parse()
                .map_err(|_| PortalError::User(format!("Invalid number: {}", value)))?
        }
        ["api", "endpoints", "check_token"] => endpoints.check_token = value.to_string(),
        ["api", "endpoints", "officer"] => endpoints.officer = value.to_string(),
        ["api", "endpoints", "language_by_code"] => endpoints.language_by_code = value.to_string(),
        ["api", "endpoints", "dictionary"] => endpoints.dictionary = value.to_string(),
        ["api", "endpoints", "set_language"] => endpoints.set_language = value.to_string(),
        ["api", "endpoints", "notifications_seen"] => {
            endpoints.notifications_seen = value.to_string()
        }
        ["storage", "path"] => {
            config.storage.path = (!value.is_empty()).then(|| PathBuf::from(value))
        }
        ["locale", "fallback"] => config.locale.fallback = value.to_string(),
        _ => {
            return Err(PortalError::User(format!(
                "Unknown config key: {}. Valid keys: {}",
                key,
                VALID_KEYS.join(", ")
            )))
        }
    }

    Ok(())
}

fn parse_bool(value: &str) -> PortalResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(PortalError::User(format!(
            "Invalid boolean value: {}. Use true/false",
            value
        ))),
    }
}
