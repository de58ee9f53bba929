//! Session store: token/user lifecycle, language sync, permission checks
//!
//! The store mirrors every mutation to [`KeyValueStore`] immediately. Network
//! calls go through [`ApiClient`]; their failures are returned as `Result`s
//! and deliberately discarded at the call site, so a flaky backend degrades
//! the session (stale dictionary, missing officer data) instead of blocking
//! it. Only the token liveness check escalates, and it does so by logging the
//! user out.

use crate::api::{render_path, ApiClient};
use crate::config::schema::EndpointsConfig;
use crate::error::{PortalError, PortalResult};
use crate::session::state::{
    Action, AuthType, DictionaryEntry, PermissionUnit, SessionEvent, SessionPhase, UserRecord,
};
use crate::storage::{KeyValueStore, DICTIONARY_KEY, TOKEN_KEY, USER_KEY};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::{Arc, OnceLock};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

/// Capacity of the event channel; slow subscribers see `Lagged`
const EVENT_CAPACITY: usize = 16;

/// A store shared between several consumers. The mutex serializes whole
/// operations, so two `set_language` calls never interleave.
pub type SharedSession = Arc<tokio::sync::Mutex<SessionStore>>;

/// Result of a [`SessionStore::set_language`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageOutcome {
    /// Requested code differed from the user's current one
    pub changed: bool,
    /// A `LanguageChanged` event was emitted
    pub reload_requested: bool,
    /// Entries in the new dictionary, if one was fetched
    pub dictionary_entries: Option<usize>,
}

impl LanguageOutcome {
    fn skipped() -> Self {
        Self {
            changed: false,
            reload_requested: false,
            dictionary_entries: None,
        }
    }
}

/// Officer payload returned by the backend
#[derive(Debug, Deserialize)]
struct OfficerProfile {
    #[serde(rename = "factoryName", alias = "FactoryName", default)]
    factory_name: Option<String>,

    #[serde(rename = "authUnits", default)]
    auth_units: Option<Vec<PermissionUnit>>,
}

/// Session state owned by the application shell
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    api: Arc<dyn ApiClient>,
    endpoints: EndpointsConfig,
    token: Option<String>,
    user: Option<UserRecord>,
    loading: bool,
    phase: watch::Sender<SessionPhase>,
    dictionary: OnceLock<Vec<DictionaryEntry>>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    /// Rebuild the session from whatever is in storage.
    ///
    /// The dictionary is not read here; it loads on first use.
    pub fn restore(
        storage: Arc<dyn KeyValueStore>,
        api: Arc<dyn ApiClient>,
        endpoints: EndpointsConfig,
    ) -> PortalResult<Self> {
        let token = storage.get_item(TOKEN_KEY)?;
        let user = match storage.get_item(USER_KEY)? {
            Some(raw) => serde_json::from_str::<Option<UserRecord>>(&raw).map_err(|source| {
                PortalError::CorruptState {
                    key: USER_KEY.to_string(),
                    source,
                }
            })?,
            None => None,
        };

        api.set_bearer(token.as_deref());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        debug!(
            "Restored session (token: {}, user: {})",
            token.as_deref().is_some_and(|t| !t.is_empty()),
            user.is_some()
        );

        let store = Self {
            storage,
            api,
            endpoints,
            token,
            user,
            loading: true,
            phase: watch::Sender::new(SessionPhase::Anonymous),
            dictionary: OnceLock::new(),
            events,
        };
        store.publish_phase();
        Ok(store)
    }

    /// Subscribe to session events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub(crate) fn emit(&self, event: SessionEvent) {
        debug!("Session event: {:?}", event);
        // No subscribers is fine; the shell may not care
        let _ = self.events.send(event);
    }

    /// A token is present and non-empty
    pub fn is_logged_in(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> SessionPhase {
        *self.phase.borrow()
    }

    /// Follow phase changes, including `CheckingToken` while a check is in
    /// flight
    pub fn watch_phase(&self) -> watch::Receiver<SessionPhase> {
        self.phase.subscribe()
    }

    fn publish_phase(&self) {
        let phase = if self.is_logged_in() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        };
        self.phase.send_replace(phase);
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// The translation dictionary, read from storage on first access
    pub fn dictionary(&self) -> &[DictionaryEntry] {
        self.dictionary.get_or_init(|| self.read_dictionary())
    }

    fn read_dictionary(&self) -> Vec<DictionaryEntry> {
        let raw = match self.storage.get_item(DICTIONARY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Could not read dictionary from storage: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Ignoring corrupt dictionary in storage: {}", e);
                Vec::new()
            }
        }
    }

    /// Translate `text` through the dictionary, falling back to `text`
    pub fn get_expression<'a>(&'a self, text: &'a str) -> &'a str {
        self.dictionary()
            .iter()
            .find(|entry| entry.expression == text)
            .map(|entry| entry.equal_response.as_str())
            .unwrap_or(text)
    }

    /// Replace and persist the token. No shape validation.
    pub fn set_token(&mut self, token: impl Into<String>) -> PortalResult<()> {
        let token = token.into();
        self.storage.set_item(TOKEN_KEY, &token)?;
        self.api.set_bearer(Some(&token));
        self.token = Some(token);
        self.publish_phase();
        Ok(())
    }

    /// Replace and persist the user record.
    ///
    /// A non-empty `DefaultLanguage` runs the language flow; a factory officer
    /// is enriched with facility name and permission units from the backend.
    pub async fn set_user(&mut self, user: UserRecord) -> PortalResult<()> {
        let preferred = user.preferred_language().map(str::to_string);
        let officer = user.is_officer();

        self.user = Some(user);
        self.persist_user()?;

        if let Some(code) = preferred {
            self.set_language(&code, true).await?;
        }

        if officer {
            match self.fetch_officer_profile().await {
                Ok(profile) => {
                    if let Some(user) = self.user.as_mut() {
                        if profile.factory_name.is_some() {
                            user.factory_name = profile.factory_name;
                        }
                        if let Some(units) = profile.auth_units {
                            user.auth_units = units;
                        }
                    }
                    self.persist_user()?;
                    debug!("Officer profile merged");
                }
                // Stay logged in with whatever the login response carried
                Err(e) => warn!("Officer enrichment failed, continuing with partial data: {}", e),
            }
        }

        Ok(())
    }

    async fn fetch_officer_profile(&self) -> PortalResult<OfficerProfile> {
        let user_id = self
            .user
            .as_ref()
            .and_then(|u| u.user_id)
            .ok_or_else(|| PortalError::User("officer record has no UserId".to_string()))?;

        let user_id = user_id.to_string();
        let path = render_path(&self.endpoints.officer, &[("user_id", user_id.as_str())]);
        let response = self.api.get(&path).await?;
        if !response.is_success() {
            return Err(PortalError::unexpected(
                &path,
                format!("status {}", response.status),
            ));
        }

        serde_json::from_value(response.data)
            .map_err(|e| PortalError::unexpected(&path, e.to_string()))
    }

    /// Switch the user's language and refresh the dictionary.
    ///
    /// The dictionary chain runs even when the code is unchanged. A
    /// `LanguageChanged` event is emitted only for an actual change with
    /// `auto_refresh` set.
    pub async fn set_language(
        &mut self,
        code: &str,
        auto_refresh: bool,
    ) -> PortalResult<LanguageOutcome> {
        let Some(user) = self.user.as_mut() else {
            debug!("set_language({}) ignored: no user", code);
            return Ok(LanguageOutcome::skipped());
        };

        let changed = user.language_code.as_deref() != Some(code);
        if changed {
            user.language_code = Some(code.to_string());
        }

        let dictionary_entries = match self.refresh_dictionary(code).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Language refresh for '{}' incomplete: {}", code, e);
                None
            }
        };

        self.persist_user()?;

        let reload_requested = changed && auto_refresh;
        if reload_requested {
            info!("Language changed to {}", code);
            self.emit(SessionEvent::LanguageChanged {
                code: code.to_string(),
            });
        }

        Ok(LanguageOutcome {
            changed,
            reload_requested,
            dictionary_entries,
        })
    }

    /// Resolve `code`, fetch its dictionary, tell the backend.
    ///
    /// A fetched dictionary is committed before the preference call, so a
    /// failure there keeps the new dictionary.
    async fn refresh_dictionary(&mut self, code: &str) -> PortalResult<Option<usize>> {
        let lookup = render_path(&self.endpoints.language_by_code, &[("code", code)]);
        let response = self.api.get(&lookup).await?;
        let language_id = response
            .data
            .get("id")
            .filter(|id| !id.is_null())
            .cloned()
            .ok_or_else(|| PortalError::unexpected(&lookup, "missing data.id"))?;

        let id_text = match &language_id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        // Once the language is known the preference is sent, dictionary or not
        let fetched = match self.fetch_dictionary(&id_text).await {
            Ok(entries) if entries.is_empty() => {
                debug!("Empty dictionary for {}, keeping the cached one", code);
                None
            }
            Ok(entries) => {
                let count = entries.len();
                self.storage
                    .set_item(DICTIONARY_KEY, &serde_json::to_string(&entries)?)?;
                self.dictionary = OnceLock::from(entries);
                debug!("Dictionary for {} replaced ({} entries)", code, count);
                Some(count)
            }
            Err(e) => {
                warn!("Dictionary for {} not fetched: {}", code, e);
                None
            }
        };

        let user_id = self.user.as_ref().and_then(|u| u.user_id);
        self.api
            .post(
                &self.endpoints.set_language,
                &json!({ "userId": user_id, "languageId": language_id }),
            )
            .await?;

        Ok(fetched)
    }

    /// Fetch a dictionary; malformed records are skipped, not fatal
    async fn fetch_dictionary(&self, language_id: &str) -> PortalResult<Vec<DictionaryEntry>> {
        let path = render_path(&self.endpoints.dictionary, &[("language_id", language_id)]);
        let response = self.api.get(&path).await?;
        let Value::Array(items) = response.data else {
            return Err(PortalError::unexpected(&path, "data is not an array"));
        };

        let total = items.len();
        let entries: Vec<DictionaryEntry> = items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping dictionary record: {}", e);
                    None
                }
            })
            .collect();

        if entries.len() < total {
            warn!("Dropped {} of {} dictionary records", total - entries.len(), total);
        }
        Ok(entries)
    }

    /// Verify the token with the backend; log out on 401 or any failure.
    ///
    /// Returns whether the session is still logged in.
    pub async fn check_token(&mut self) -> PortalResult<bool> {
        if !self.is_logged_in() {
            debug!("No token to check");
            self.logout_user()?;
            return Ok(false);
        }

        // Storage may have been changed underneath us
        self.token = self.storage.get_item(TOKEN_KEY)?;
        if !self.is_logged_in() {
            info!("Token removed from storage");
            self.logout_user()?;
            return Ok(false);
        }
        self.api.set_bearer(self.token.as_deref());

        let guard = CheckingGuard::enter(&self.phase);
        let result = self.api.get(&self.endpoints.check_token).await;
        drop(guard);

        match result {
            Ok(response) if response.is_unauthorized() => {
                info!("Token rejected by backend");
                self.logout_user()?;
                Ok(false)
            }
            Ok(_) => Ok(true),
            Err(e) => {
                warn!("Token check failed: {}", e);
                self.logout_user()?;
                Ok(false)
            }
        }
    }

    /// Remove the session keys from `storage` without reading them.
    ///
    /// Works when the stored user is corrupt and [`SessionStore::restore`]
    /// refuses to start.
    pub fn reset(storage: &dyn KeyValueStore) -> PortalResult<()> {
        storage.remove_item(DICTIONARY_KEY)?;
        storage.remove_item(USER_KEY)?;
        storage.remove_item(TOKEN_KEY)
    }

    /// Clear token, user and dictionary everywhere, then emit `LoggedOut`
    pub fn logout_user(&mut self) -> PortalResult<()> {
        Self::reset(self.storage.as_ref())?;

        self.token = None;
        self.user = None;
        self.dictionary = OnceLock::new();
        self.api.set_bearer(None);
        self.publish_phase();

        info!("Logged out");
        self.emit(SessionEvent::LoggedOut);
        Ok(())
    }

    /// Check whether the current user may perform `action` on `section`
    pub fn has_auth(&self, section: &str, action: Action) -> bool {
        let Some(user) = self.user.as_ref() else {
            return false;
        };

        match &user.auth_type {
            Some(AuthType::Dealer) => true,
            Some(AuthType::FactoryOfficer) => user
                .auth_units
                .iter()
                .any(|unit| unit.grants(section, action)),
            _ => false,
        }
    }

    fn persist_user(&self) -> PortalResult<()> {
        let raw = serde_json::to_string(&self.user)?;
        self.storage.set_item(USER_KEY, &raw)
    }
}

/// Holds the phase at `CheckingToken` for the duration of a liveness check.
///
/// Dropping it (including when the check future is cancelled) restores
/// `Authenticated`; the check only starts with a token present.
struct CheckingGuard {
    phase: watch::Sender<SessionPhase>,
}

impl CheckingGuard {
    fn enter(phase: &watch::Sender<SessionPhase>) -> Self {
        phase.send_replace(SessionPhase::CheckingToken);
        Self {
            phase: phase.clone(),
        }
    }
}

impl Drop for CheckingGuard {
    fn drop(&mut self) {
        self.phase.send_if_modified(|phase| {
            let checking = *phase == SessionPhase::CheckingToken;
            if checking {
                *phase = SessionPhase::Authenticated;
            }
            checking
        });
    }
}
