//! Error types for the portal session layer
//!
//! All modules use `PortalResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for portal operations
pub type PortalResult<T> = Result<T, PortalError>;

/// All errors that can occur in the portal session layer
#[derive(Error, Debug)]
pub enum PortalError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Session errors
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Corrupt persisted state under key '{key}': {source}")]
    CorruptState {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown action '{0}'. Expected one of: read, write, delete")]
    UnknownAction(String),

    #[error("Unknown panel '{0}'")]
    UnknownPanel(String),

    // Network errors
    #[error("HTTP request to {path} failed: {reason}")]
    Http { path: String, reason: String },

    #[error("Unexpected response from {path}: {reason}")]
    UnexpectedResponse { path: String, reason: String },

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Encoding errors
    #[error("Invalid base64 content: {0}")]
    Base64(#[from] base64::DecodeError),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl PortalError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an HTTP transport error
    pub fn http(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::Http {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an unexpected-response error
    pub fn unexpected(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Check if error came from the network collaborator
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::UnexpectedResponse { .. })
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NotLoggedIn => Some("Run: portal login --token <token> --user <json>"),
            Self::CorruptState { .. } => Some("Run: portal logout --yes to reset stored state"),
            Self::Http { .. } => Some("Check api.base_url with: portal config show"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PortalError::UnknownAction("fly".to_string());
        assert!(err.to_string().contains("Unknown action 'fly'"));
    }

    #[test]
    fn error_hint() {
        let err = PortalError::NotLoggedIn;
        assert!(err.hint().unwrap().contains("portal login"));
        assert_eq!(PortalError::Internal("x".into()).hint(), None);
    }

    #[test]
    fn error_is_network() {
        assert!(PortalError::http("Auth/CheckToken", "timeout").is_network());
        assert!(PortalError::unexpected("Language/GetByCode", "no id").is_network());
        assert!(!PortalError::NotLoggedIn.is_network());
    }
}
