//! Check command - verify the stored token with the backend

use super::Shell;
use crate::config::Config;
use crate::error::{PortalError, PortalResult};
use crate::ui::{self, TaskSpinner, UiContext};

/// Execute the check command
pub async fn execute(config: &Config, ctx: &UiContext) -> PortalResult<()> {
    let mut shell = Shell::open(config, ctx)?;

    let mut spinner = TaskSpinner::new(&shell.ctx);
    spinner.start("Checking token...");
    let valid = shell.session.check_token().await;
    shell.session.set_loading(false);

    match valid {
        Ok(true) => {
            spinner.stop("Token valid");
            shell.settle().await;
            ui::outro_success(&shell.ctx, "Session active");
            Ok(())
        }
        Ok(false) => {
            spinner.stop_error("Token missing or rejected, session cleared");
            shell.settle().await;
            Err(PortalError::NotLoggedIn)
        }
        Err(e) => {
            spinner.stop_error("Token check failed");
            shell.settle().await;
            Err(e)
        }
    }
}
