//! Session management module

pub mod state;
pub mod store;

pub use state::{
    Action, AuthType, DictionaryEntry, PermissionUnit, SessionEvent, SessionPhase, UserRecord,
};
pub use store::{LanguageOutcome, SessionStore, SharedSession};
