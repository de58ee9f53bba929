//! Can command - permission check for the current user

use super::Shell;
use crate::cli::args::CanArgs;
use crate::config::Config;
use crate::error::{PortalError, PortalResult};
use crate::session::Action;
use crate::ui::UiContext;

/// Execute the can command; a denied check exits with failure
pub async fn execute(args: CanArgs, config: &Config, ctx: &UiContext) -> PortalResult<()> {
    let action: Action = args.action.parse()?;
    let shell = Shell::open(config, ctx)?;

    if shell.session.has_auth(&args.section, action) {
        println!("allowed");
        Ok(())
    } else {
        Err(PortalError::User(format!(
            "{} on '{}' denied",
            action, args.section
        )))
    }
}
