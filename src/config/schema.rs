//! Configuration schema for the portal
//!
//! Configuration is stored at `~/.config/portal/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Backend API settings
    pub api: ApiConfig,

    /// Persistent storage settings
    pub storage: StorageConfig,

    /// Locale defaults
    pub locale: LocaleConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable audit logging of session events
    pub audit_log: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { audit_log: true }
    }
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined onto
    pub base_url: String,

    /// Global request timeout in seconds (0 = no timeout)
    pub timeout_secs: u64,

    /// Endpoint paths
    pub endpoints: EndpointsConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_secs: 30,
            endpoints: EndpointsConfig::default(),
        }
    }
}

/// Endpoint paths relative to `api.base_url`.
///
/// `{user_id}`, `{code}` and `{language_id}` are substituted at call time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    /// Token liveness check (GET)
    pub check_token: String,

    /// Factory officer record (GET)
    pub officer: String,

    /// Language lookup by code (GET)
    pub language_by_code: String,

    /// Dictionary for a language id (GET)
    pub dictionary: String,

    /// User language preference (POST)
    pub set_language: String,

    /// Mark machine notifications as seen (POST)
    pub notifications_seen: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            check_token: "Auth/CheckToken".to_string(),
            officer: "FactoryOfficer/GetById?id={user_id}".to_string(),
            language_by_code: "Language/GetByCode?code={code}".to_string(),
            dictionary: "Dictionary/GetByLanguageId?languageId={language_id}".to_string(),
            set_language: "User/SetLanguage".to_string(),
            notifications_seen: "MachineNotification/SetAsSeen".to_string(),
        }
    }
}

/// Persistent storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage file (defaults to `<state dir>/storage.json`)
    pub path: Option<PathBuf>,
}

/// Locale configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Locale used when neither the user nor the system provides one
    pub fallback: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            fallback: "tr".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[general]"));
        assert!(toml.contains("[api.endpoints]"));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.locale.fallback, "tr");
        assert_eq!(config.api.endpoints.check_token, "Auth/CheckToken");
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [api]
            base_url = "https://portal.example.com/api"

            [api.endpoints]
            check_token = "Session/Ping"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.api.base_url, "https://portal.example.com/api");
        assert_eq!(config.api.endpoints.check_token, "Session/Ping");
        assert_eq!(config.api.endpoints.set_language, "User/SetLanguage"); // default preserved
        assert_eq!(config.api.timeout_secs, 30);
    }
}
