//! CLI command implementations

pub mod can;
pub mod check;
pub mod config;
pub mod file;
pub mod language;
pub mod login;
pub mod logout;
pub mod panel;
pub mod status;
pub mod tools;
pub mod translate;

pub use can::execute as can;
pub use check::execute as check;
pub use config::execute as config;
pub use file::execute as file;
pub use language::execute as language;
pub use login::execute as login;
pub use logout::execute as logout;
pub use panel::execute as panel;
pub use status::execute as status;
pub use tools::{date, options};
pub use translate::execute as translate;

use crate::api::{ApiClient, HttpClient};
use crate::audit::AuditLog;
use crate::config::{Config, ConfigManager};
use crate::error::PortalResult;
use crate::panels::PanelStore;
use crate::session::{SessionEvent, SessionStore};
use crate::storage::{FileStore, KeyValueStore};
use crate::ui::{self, UiContext};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, warn};

/// The storage file named by `config`
pub fn open_storage(config: &Config) -> Arc<dyn KeyValueStore> {
    let path = ConfigManager::storage_path(config);
    debug!("Opening storage at {}", path.display());
    Arc::new(FileStore::open(path))
}

/// Everything a session-bound command needs, opened from config
pub struct Shell {
    pub ctx: UiContext,
    pub storage: Arc<dyn KeyValueStore>,
    pub api: Arc<dyn ApiClient>,
    pub session: SessionStore,
    pub audit: AuditLog,
    config: Config,
    events: broadcast::Receiver<SessionEvent>,
}

impl Shell {
    /// Open the persisted session described by `config`
    pub fn open(config: &Config, ctx: &UiContext) -> PortalResult<Self> {
        let storage = open_storage(config);
        let api: Arc<dyn ApiClient> = Arc::new(HttpClient::new(&config.api));
        Self::with_parts(config, ctx.clone(), storage, api)
    }

    /// Build a shell from explicit collaborators
    pub fn with_parts(
        config: &Config,
        ctx: UiContext,
        storage: Arc<dyn KeyValueStore>,
        api: Arc<dyn ApiClient>,
    ) -> PortalResult<Self> {
        let session = SessionStore::restore(
            Arc::clone(&storage),
            Arc::clone(&api),
            config.api.endpoints.clone(),
        )?;
        let events = session.subscribe();

        Ok(Self {
            ctx,
            storage,
            api,
            session,
            audit: AuditLog::new(config),
            config: config.clone(),
            events,
        })
    }

    /// Restore the side panel state from the same storage
    pub fn panels(&self) -> PortalResult<PanelStore> {
        PanelStore::restore(
            Arc::clone(&self.storage),
            self.config.api.endpoints.notifications_seen.clone(),
        )
    }

    /// Drain pending session events: audit each and report reloads.
    ///
    /// Returns the events seen, in emission order.
    pub async fn settle(&mut self) -> Vec<SessionEvent> {
        let mut seen = Vec::new();
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    self.audit.record(&event).await;
                    if event.requires_reload() {
                        ui::step_info(
                            &self.ctx,
                            &format!("Reload required ({})", event.name()),
                        );
                    }
                    seen.push(event);
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("Missed {} session events", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;
    use serde_json::Value;

    struct OfflineApi;

    #[async_trait]
    impl ApiClient for OfflineApi {
        async fn get(&self, path: &str) -> PortalResult<crate::api::ApiResponse> {
            Err(crate::error::PortalError::http(path, "offline"))
        }

        async fn post(&self, path: &str, _body: &Value) -> PortalResult<crate::api::ApiResponse> {
            Err(crate::error::PortalError::http(path, "offline"))
        }
    }

    fn shell() -> Shell {
        let mut config = Config::default();
        config.general.audit_log = false;
        let storage: Arc<dyn KeyValueStore> =
            Arc::new(MemoryStore::with_items([("token", "abc")]));
        Shell::with_parts(
            &config,
            UiContext::non_interactive(),
            storage,
            Arc::new(OfflineApi),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn settle_drains_logout_event() {
        let mut shell = shell();
        assert!(shell.session.is_logged_in());

        shell.session.logout_user().unwrap();
        let events = shell.settle().await;
        assert_eq!(events, vec![SessionEvent::LoggedOut]);

        assert!(shell.settle().await.is_empty());
    }

    #[tokio::test]
    async fn panels_share_storage() {
        let shell = shell();
        let mut panels = shell.panels().unwrap();
        panels
            .set_active(crate::panels::ActivePanel::Search)
            .unwrap();

        let reopened = shell.panels().unwrap();
        assert_eq!(reopened.active(), crate::panels::ActivePanel::Search);
    }
}
