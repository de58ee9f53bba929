//! File command - base64 conversion for uploads and downloads

use crate::cli::args::{FileAction, FileArgs};
use crate::error::{PortalError, PortalResult};
use crate::helpers::{decode_base64_file, encode_file};
use crate::ui::{self, UiContext};
use tokio::fs;

/// Execute the file command
pub async fn execute(args: FileArgs, ctx: &UiContext) -> PortalResult<()> {
    match args.action {
        FileAction::Encode { path, mime } => {
            println!("{}", encode_file(&path, &mime).await?);
        }
        FileAction::Decode {
            out,
            content,
            input,
        } => {
            let content = match (content, input) {
                (Some(content), _) => content,
                (None, Some(input)) => fs::read_to_string(&input)
                    .await
                    .map_err(|e| PortalError::io(format!("reading {}", input.display()), e))?,
                (None, None) => {
                    return Err(PortalError::User(
                        "Provide base64 content or --input".to_string(),
                    ))
                }
            };

            let written = decode_base64_file(content.trim(), &out).await?;
            ui::step_ok_detail(
                ctx,
                &format!("Wrote {} bytes", written),
                &out.display().to_string(),
            );
        }
    }

    Ok(())
}
