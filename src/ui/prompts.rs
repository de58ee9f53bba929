//! Confirmation prompt with non-interactive fallback

use super::context::UiContext;
use crate::error::{PortalError, PortalResult};

/// Ask for confirmation; returns `default` when not interactive
pub async fn confirm(ctx: &UiContext, message: &str, default: bool) -> PortalResult<bool> {
    if ctx.auto_yes() {
        return Ok(true);
    }

    if !ctx.is_interactive() {
        return Ok(default);
    }

    // cliclack blocks on stdin
    let message = message.to_string();
    let result = tokio::task::spawn_blocking(move || {
        cliclack::confirm(&message)
            .initial_value(default)
            .interact()
    })
    .await
    .map_err(|e| PortalError::Internal(format!("Prompt task failed: {}", e)))?;

    result.map_err(|e| PortalError::User(format!("Prompt failed: {}", e)))
}
