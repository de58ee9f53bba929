//! Session data model
//!
//! The backend hands the portal a loosely shaped user object. The fields the
//! session layer reasons about are typed here; everything else is carried
//! through `extra` untouched so the persisted record round-trips.

use crate::error::PortalError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Authorization classification carried by the user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuthType {
    /// Top-level dealer: every section, every action
    Dealer,
    /// Factory officer: access limited to the record's permission units
    FactoryOfficer,
    /// Any other classification, kept verbatim
    Other(String),
}

impl AuthType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Dealer => "Dealer",
            Self::FactoryOfficer => "FactoryOfficer",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for AuthType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Dealer" => Self::Dealer,
            "FactoryOfficer" => Self::FactoryOfficer,
            _ => Self::Other(s),
        }
    }
}

impl From<AuthType> for String {
    fn from(t: AuthType) -> Self {
        match t {
            AuthType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action a permission unit can grant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Write,
    Delete,
}

impl FromStr for Action {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "read" => Ok(Self::Read),
            "write" => Ok(Self::Write),
            "delete" => Ok(Self::Delete),
            _ => Err(PortalError::UnknownAction(s.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Read => "Read",
            Self::Write => "Write",
            Self::Delete => "Delete",
        })
    }
}

/// Read/write/delete grant on one named section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionUnit {
    pub section: String,

    #[serde(default)]
    pub can_read: bool,

    #[serde(default)]
    pub can_write: bool,

    #[serde(default)]
    pub can_delete: bool,
}

impl PermissionUnit {
    /// Check whether this unit grants `action` on `section`
    pub fn grants(&self, section: &str, action: Action) -> bool {
        self.section == section
            && match action {
                Action::Read => self.can_read,
                Action::Write => self.can_write,
                Action::Delete => self.can_delete,
            }
    }
}

/// The persisted user record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Language the UI currently runs in
    #[serde(rename = "languageCode", default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,

    /// Preferred language sent by the backend at login
    #[serde(rename = "DefaultLanguage", default, skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,

    #[serde(rename = "AuthType", default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<AuthType>,

    #[serde(rename = "UserId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,

    #[serde(rename = "FactoryId", default, skip_serializing_if = "Option::is_none")]
    pub factory_id: Option<i64>,

    #[serde(rename = "PlantId", default, skip_serializing_if = "Option::is_none")]
    pub plant_id: Option<i64>,

    /// Facility name, filled by officer enrichment
    #[serde(rename = "FactoryName", default, skip_serializing_if = "Option::is_none")]
    pub factory_name: Option<String>,

    /// Permission units, only meaningful for factory officers
    #[serde(rename = "authUnits", default, skip_serializing_if = "Vec::is_empty")]
    pub auth_units: Vec<PermissionUnit>,

    /// Fields the session layer does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserRecord {
    /// Check for the factory officer classification
    pub fn is_officer(&self) -> bool {
        self.auth_type == Some(AuthType::FactoryOfficer)
    }

    /// Non-empty default language, if any
    pub fn preferred_language(&self) -> Option<&str> {
        self.default_language.as_deref().filter(|l| !l.is_empty())
    }
}

/// One expression-to-translation override
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    pub expression: String,
    pub equal_response: String,
}

/// Coarse lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Anonymous,
    CheckingToken,
    Authenticated,
}

/// Signal emitted by the session layer for the hosting shell to act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Token, user and dictionary were cleared
    LoggedOut,
    /// The user's language changed
    LanguageChanged { code: String },
    /// Machine notifications for a plant were acknowledged
    NotificationsSeen { plant_id: i64 },
}

impl SessionEvent {
    /// Whether a page-style shell should reload after this event
    pub fn requires_reload(&self) -> bool {
        match self {
            Self::LoggedOut | Self::LanguageChanged { .. } | Self::NotificationsSeen { .. } => true,
        }
    }

    /// Stable event name for audit logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoggedOut => "session.logged_out",
            Self::LanguageChanged { .. } => "session.language_changed",
            Self::NotificationsSeen { .. } => "panels.notifications_seen",
        }
    }

    /// Event payload for audit logging
    pub fn data(&self) -> Value {
        match self {
            Self::LoggedOut => Value::Object(Map::new()),
            Self::LanguageChanged { code } => serde_json::json!({ "code": code }),
            Self::NotificationsSeen { plant_id } => serde_json::json!({ "plantId": plant_id }),
        }
    }
}
