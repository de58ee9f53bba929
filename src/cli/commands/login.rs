//! Login command - store a token and user record

use super::Shell;
use crate::cli::args::LoginArgs;
use crate::config::Config;
use crate::error::{PortalError, PortalResult};
use crate::session::UserRecord;
use crate::ui::{self, TaskSpinner, UiContext};
use serde_json::json;
use tokio::fs;

/// Execute the login command
pub async fn execute(args: LoginArgs, config: &Config, ctx: &UiContext) -> PortalResult<()> {
    let user = read_user(&args).await?;
    let mut shell = Shell::open(config, ctx)?;

    shell.session.set_token(args.token)?;

    if let Some(user) = user {
        let mut spinner = TaskSpinner::new(&shell.ctx);
        spinner.start("Storing user record...");
        if let Err(e) = shell.session.set_user(user).await {
            spinner.stop_error("Could not store user record");
            return Err(e);
        }
        spinner.stop("User record stored");
    }
    shell.session.set_loading(false);

    let user = shell.session.user();
    shell
        .audit
        .log(
            "session.logged_in",
            &json!({
                "user_id": user.and_then(|u| u.user_id),
                "auth_type": user.and_then(|u| u.auth_type.as_ref()).map(|t| t.as_str()),
            }),
        )
        .await;
    shell.settle().await;

    ui::outro_success(&shell.ctx, "Logged in");
    Ok(())
}

async fn read_user(args: &LoginArgs) -> PortalResult<Option<UserRecord>> {
    let raw = match (&args.user, &args.user_file) {
        (Some(raw), _) => raw.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .await
            .map_err(|e| PortalError::io(format!("reading {}", path.display()), e))?,
        (None, None) => return Ok(None),
    };

    let user = serde_json::from_str(&raw)
        .map_err(|e| PortalError::User(format!("Invalid user record: {}", e)))?;
    Ok(Some(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(user: Option<&str>, user_file: Option<PathBuf>) -> LoginArgs {
        LoginArgs {
            token: "abc".to_string(),
            user: user.map(str::to_string),
            user_file,
        }
    }

    #[tokio::test]
    async fn read_user_from_json_arg() {
        let user = read_user(&args(Some(r#"{"UserId":7,"AuthType":"Dealer"}"#), None))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.user_id, Some(7));
    }

    #[tokio::test]
    async fn read_user_from_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("user.json");
        std::fs::write(&path, r#"{"PlantId":3}"#).unwrap();

        let user = read_user(&args(None, Some(path))).await.unwrap().unwrap();
        assert_eq!(user.plant_id, Some(3));
    }

    #[tokio::test]
    async fn read_user_none() {
        assert!(read_user(&args(None, None)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn read_user_rejects_bad_json() {
        let err = read_user(&args(Some("not json"), None)).await.unwrap_err();
        assert!(err.to_string().contains("Invalid user record"));
    }
}
