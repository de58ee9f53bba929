//! Terminal output for the `portal` shell
//!
//! Uses `cliclack` in an interactive terminal and plain prefixed lines
//! everywhere else (CI, pipes, tests).

mod context;
mod output;
mod progress;
mod prompts;
mod theme;

pub use context::UiContext;
pub use output::{
    intro, key_value, key_value_status, outro_success, outro_warn, step_info, step_ok,
    step_ok_detail, step_warn_hint,
};
pub use progress::TaskSpinner;
pub use prompts::confirm;
pub use theme::{init_theme, PortalTheme};
