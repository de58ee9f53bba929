//! Logout command - clear the stored session

use super::{open_storage, Shell};
use crate::audit::AuditLog;
use crate::cli::args::LogoutArgs;
use crate::config::Config;
use crate::error::{PortalError, PortalResult};
use crate::session::{SessionEvent, SessionStore};
use crate::ui::{self, UiContext};
use tracing::warn;

/// Execute the logout command
pub async fn execute(args: LogoutArgs, config: &Config, ctx: &UiContext) -> PortalResult<()> {
    let ctx = ctx.clone().with_auto_yes(args.yes);

    if !ui::confirm(&ctx, "Log out and clear the stored session?", true).await? {
        ui::outro_warn(&ctx, "Logout cancelled");
        return Ok(());
    }

    match Shell::open(config, &ctx) {
        Ok(mut shell) => {
            shell.session.logout_user()?;
            shell.settle().await;
        }
        // An unreadable session can still be thrown away
        Err(PortalError::CorruptState { key, source }) => {
            warn!("Discarding corrupt '{}' entry: {}", key, source);
            SessionStore::reset(open_storage(config).as_ref())?;
            AuditLog::new(config).record(&SessionEvent::LoggedOut).await;
            ui::step_warn_hint(
                &ctx,
                &format!("Stored '{}' was unreadable", key),
                "Session reset",
            );
        }
        Err(e) => return Err(e),
    }

    ui::outro_success(&ctx, "Logged out");
    Ok(())
}
