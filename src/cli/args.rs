//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Portal - session shell for the dealer portal
///
/// Holds the auth token, user record and translation dictionary on disk and
/// keeps them in sync with the portal backend.
#[derive(Parser, Debug)]
#[command(name = "portal")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PORTAL_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store a token and user record
    Login(LoginArgs),

    /// Clear the stored session
    Logout(LogoutArgs),

    /// Show session state
    Status(StatusArgs),

    /// Verify the stored token with the backend
    Check,

    /// Switch the user's language and refresh the dictionary
    Language(LanguageArgs),

    /// Check a permission for the current user
    Can(CanArgs),

    /// Translate an expression through the dictionary
    Translate(TranslateArgs),

    /// Show or change the active side panel
    Panel(PanelArgs),

    /// Format a date as DD.MM.YYYY
    Date(DateArgs),

    /// Convert files to and from base64
    File(FileArgs),

    /// List fixed option sets
    Options(OptionsArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the login command
#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// Auth token issued by the backend
    #[arg(short, long)]
    pub token: String,

    /// User record as JSON
    #[arg(short, long, conflicts_with = "user_file")]
    pub user: Option<String>,

    /// Read the user record from a JSON file
    #[arg(long)]
    pub user_file: Option<PathBuf>,
}

/// Arguments for the logout command
#[derive(Parser, Debug)]
pub struct LogoutArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the status command
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the language command
#[derive(Parser, Debug)]
pub struct LanguageArgs {
    /// Language code (e.g. en, tr)
    pub code: String,

    /// Do not request a reload after a change
    #[arg(long)]
    pub no_refresh: bool,
}

/// Arguments for the can command
#[derive(Parser, Debug)]
pub struct CanArgs {
    /// Section name
    pub section: String,

    /// Action: read, write or delete
    pub action: String,
}

/// Arguments for the translate command
#[derive(Parser, Debug)]
pub struct TranslateArgs {
    /// Expression to look up
    pub text: String,
}

/// Arguments for the panel command
#[derive(Parser, Debug)]
pub struct PanelArgs {
    #[command(subcommand)]
    pub action: Option<PanelAction>,
}

/// Panel subcommands
#[derive(Subcommand, Debug)]
pub enum PanelAction {
    /// Show the active panel
    Show,

    /// Open a panel (search, languages, activity, task, notifications)
    Open {
        /// Panel id
        panel: String,
    },

    /// Close the active panel
    Close,
}

/// Arguments for the date command
#[derive(Parser, Debug)]
pub struct DateArgs {
    /// Date string from the backend
    pub value: String,
}

/// Arguments for the file command
#[derive(Parser, Debug)]
pub struct FileArgs {
    #[command(subcommand)]
    pub action: FileAction,
}

/// File subcommands
#[derive(Subcommand, Debug)]
pub enum FileAction {
    /// Print a file as a data URL
    Encode {
        /// File to encode
        path: PathBuf,

        /// MIME type for the data URL
        #[arg(long, default_value = "application/octet-stream")]
        mime: String,
    },

    /// Write base64 content (raw or data URL) to a file
    Decode {
        /// Output file
        #[arg(short, long)]
        out: PathBuf,

        /// Base64 content; read from --input when omitted
        #[arg(conflicts_with = "input", required_unless_present = "input")]
        content: Option<String>,

        /// File holding the base64 content
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Arguments for the options command
#[derive(Parser, Debug)]
pub struct OptionsArgs {
    /// Option set to list
    pub set: OptionSet,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Fixed option sets
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OptionSet {
    /// Credit limit renewal periods
    CreditRange,
    /// Control check periods
    ControlTime,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write the default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., api.base_url)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable
    Table,
    /// JSON output
    Json,
}
