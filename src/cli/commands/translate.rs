//! Translate command - dictionary lookup

use super::Shell;
use crate::cli::args::TranslateArgs;
use crate::config::Config;
use crate::error::PortalResult;
use crate::ui::UiContext;

/// Execute the translate command
pub async fn execute(args: TranslateArgs, config: &Config, ctx: &UiContext) -> PortalResult<()> {
    let shell = Shell::open(config, ctx)?;
    println!("{}", shell.session.get_expression(&args.text));
    Ok(())
}
