//! Interactive vs plain output detection

use std::io::IsTerminal;

/// Forces plain output even on a terminal
pub const PLAIN_ENV: &str = "PORTAL_PLAIN";

/// Decides how the shell talks to the user
#[derive(Debug, Clone)]
pub struct UiContext {
    interactive: bool,
    auto_yes: bool,
}

impl UiContext {
    /// Detect the current environment
    pub fn detect() -> Self {
        Self {
            interactive: Self::detect_interactive(),
            auto_yes: false,
        }
    }

    /// Plain, prompt-free context
    pub fn non_interactive() -> Self {
        Self {
            interactive: false,
            auto_yes: false,
        }
    }

    /// Answer every confirmation with yes
    pub fn with_auto_yes(mut self, yes: bool) -> Self {
        self.auto_yes = yes;
        self
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn auto_yes(&self) -> bool {
        self.auto_yes
    }

    /// Spinners and cliclack boxes only on a real terminal
    pub fn use_fancy_output(&self) -> bool {
        self.interactive
    }

    fn detect_interactive() -> bool {
        if std::env::var_os(PLAIN_ENV).is_some() {
            return false;
        }

        if !std::io::stdout().is_terminal() || !std::io::stdin().is_terminal() {
            return false;
        }

        const CI_VARS: [&str; 5] = ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "JENKINS_URL", "TF_BUILD"];
        !CI_VARS.iter().any(|var| std::env::var_os(var).is_some())
    }
}
