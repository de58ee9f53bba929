//! Status command - show session state

use super::Shell;
use crate::cli::args::{OutputFormat, StatusArgs};
use crate::config::Config;
use crate::error::PortalResult;
use crate::i18n::{self, LocaleSource};
use crate::session::SessionPhase;
use crate::ui::{self, UiContext};
use serde_json::json;

/// Execute the status command
pub async fn execute(args: StatusArgs, config: &Config, ctx: &UiContext) -> PortalResult<()> {
    let shell = Shell::open(config, ctx)?;
    let panels = shell.panels()?;
    let system = i18n::system_locale();
    let (locale, source) = i18n::resolve_locale(
        shell.storage.as_ref(),
        system.as_deref(),
        &config.locale.fallback,
    )?;

    let session = &shell.session;
    let user = session.user();
    let auth_type = user
        .and_then(|u| u.auth_type.as_ref())
        .map(|t| t.as_str().to_string());

    match args.format {
        OutputFormat::Json => {
            let status = json!({
                "logged_in": session.is_logged_in(),
                "phase": session.phase(),
                "user_id": user.and_then(|u| u.user_id),
                "auth_type": auth_type,
                "plant_id": user.and_then(|u| u.plant_id),
                "factory_name": user.and_then(|u| u.factory_name.as_deref()),
                "language": user.and_then(|u| u.language_code.as_deref()),
                "dictionary_entries": session.dictionary().len(),
                "active_panel": panels.active().as_str(),
                "locale": locale,
                "locale_source": source_name(source),
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        OutputFormat::Table => {
            let ctx = &shell.ctx;
            ui::intro(ctx, "Portal session");

            let phase = match session.phase() {
                SessionPhase::Anonymous => "anonymous",
                SessionPhase::CheckingToken => "checking token",
                SessionPhase::Authenticated => "authenticated",
            };
            ui::key_value_status(ctx, "Session", phase, session.is_logged_in());

            if let Some(user) = user {
                if let Some(id) = user.user_id {
                    ui::key_value(ctx, "User", &id.to_string());
                }
                ui::key_value(ctx, "Auth type", auth_type.as_deref().unwrap_or("-"));
                if let Some(name) = user.factory_name.as_deref() {
                    ui::key_value(ctx, "Factory", name);
                }
                if let Some(plant) = user.plant_id {
                    ui::key_value(ctx, "Plant", &plant.to_string());
                }
                ui::key_value(
                    ctx,
                    "Language",
                    user.language_code.as_deref().unwrap_or("-"),
                );
            }

            ui::key_value(
                ctx,
                "Dictionary",
                &format!("{} entries", session.dictionary().len()),
            );
            ui::key_value(ctx, "Panel", panels.active().as_str());
            ui::key_value(
                ctx,
                "Locale",
                &format!("{} ({})", locale, source_name(source)),
            );

            if !session.is_logged_in() {
                println!();
                ui::step_warn_hint(ctx, "Not logged in", "Run: portal login --token <token>");
            }
        }
    }

    Ok(())
}

fn source_name(source: LocaleSource) -> &'static str {
    match source {
        LocaleSource::User => "user",
        LocaleSource::Stored => "stored",
        LocaleSource::System => "system",
        LocaleSource::Fallback => "fallback",
    }
}
