//! Panel command - show, open or close the side panel

use super::Shell;
use crate::cli::args::{PanelAction, PanelArgs};
use crate::config::Config;
use crate::error::PortalResult;
use crate::panels::ActivePanel;
use crate::ui::{self, UiContext};

/// Execute the panel command
pub async fn execute(args: PanelArgs, config: &Config, ctx: &UiContext) -> PortalResult<()> {
    let mut shell = Shell::open(config, ctx)?;
    let mut panels = shell.panels()?;

    match args.action {
        None | Some(PanelAction::Show) => println!("{}", panels.active()),
        Some(PanelAction::Open { panel }) => {
            let panel: ActivePanel = panel.parse()?;
            panels.set_active(panel)?;
            ui::step_ok(&shell.ctx, &format!("Active panel: {}", panel));
        }
        Some(PanelAction::Close) => {
            let closed = panels.active();
            let acknowledged = panels.close(&shell.session, shell.api.as_ref()).await?;
            shell.settle().await;

            if acknowledged {
                ui::step_ok_detail(&shell.ctx, "Notifications marked as seen", closed.as_str());
            }
            ui::step_ok(&shell.ctx, &format!("Closed panel: {}", closed));
        }
    }

    Ok(())
}
