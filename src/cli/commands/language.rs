//! Language command - switch language and refresh the dictionary

use super::Shell;
use crate::cli::args::LanguageArgs;
use crate::config::Config;
use crate::error::{PortalError, PortalResult};
use crate::ui::{self, TaskSpinner, UiContext};

/// Execute the language command
pub async fn execute(args: LanguageArgs, config: &Config, ctx: &UiContext) -> PortalResult<()> {
    let mut shell = Shell::open(config, ctx)?;
    if shell.session.user().is_none() {
        return Err(PortalError::NotLoggedIn);
    }

    let mut spinner = TaskSpinner::new(&shell.ctx);
    spinner.start(&format!("Switching language to {}...", args.code));
    let outcome = shell.session.set_language(&args.code, !args.no_refresh).await?;

    match outcome.dictionary_entries {
        Some(count) => spinner.stop(&format!("Dictionary refreshed ({} entries)", count)),
        None => spinner.stop_error("Dictionary not refreshed, keeping the previous one"),
    }
    shell.settle().await;

    if outcome.changed {
        ui::outro_success(&shell.ctx, &format!("Language set to {}", args.code));
    } else {
        ui::outro_success(&shell.ctx, &format!("Language already {}", args.code));
    }
    Ok(())
}
