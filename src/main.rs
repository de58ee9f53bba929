//! Portal - session shell for the dealer portal
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use portal_session::cli::commands;
use portal_session::cli::{Cli, Commands};
use portal_session::config::ConfigManager;
use portal_session::error::PortalResult;
use portal_session::ui::{self, UiContext};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> PortalResult<()> {
    let cli = Cli::parse();

    // 0 = warn (spinners only), 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("portal_session=warn"),
        1 => EnvFilter::new("portal_session=info"),
        _ => EnvFilter::new("portal_session=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    ui::init_theme();
    let ctx = UiContext::detect();

    // Stateless helpers need neither config nor storage
    match cli.command {
        Commands::Date(args) => return commands::date(args).await,
        Commands::File(args) => return commands::file(args, &ctx).await,
        Commands::Options(args) => return commands::options(args).await,
        _ => {}
    }

    let manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    debug!("Using config {}", manager.path().display());
    let config = manager.load().await?;

    ConfigManager::ensure_state_dir().await?;

    match cli.command {
        Commands::Login(args) => commands::login(args, &config, &ctx).await,
        Commands::Logout(args) => commands::logout(args, &config, &ctx).await,
        Commands::Status(args) => commands::status(args, &config, &ctx).await,
        Commands::Check => commands::check(&config, &ctx).await,
        Commands::Language(args) => commands::language(args, &config, &ctx).await,
        Commands::Can(args) => commands::can(args, &config, &ctx).await,
        Commands::Translate(args) => commands::translate(args, &config, &ctx).await,
        Commands::Panel(args) => commands::panel(args, &config, &ctx).await,
        Commands::Config(args) => commands::config(args, &manager, &config, &ctx).await,
        Commands::Date(_) | Commands::File(_) | Commands::Options(_) => {
            unreachable!("stateless commands handled above")
        }
    }
}
