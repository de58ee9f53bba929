//! Side panel state
//!
//! Tracks which side panel is open, persisted under `active-panel`. Closing
//! the notifications panel acknowledges the plant's machine notifications.

use crate::api::ApiClient;
use crate::error::{PortalError, PortalResult};
use crate::session::{SessionEvent, SessionStore};
use crate::storage::{KeyValueStore, ACTIVE_PANEL_KEY};
use serde_json::json;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Side panel ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivePanel {
    #[default]
    None,
    Search,
    Languages,
    Activity,
    Task,
    Notifications,
}

impl ActivePanel {
    pub const ALL: [ActivePanel; 6] = [
        Self::None,
        Self::Search,
        Self::Languages,
        Self::Activity,
        Self::Task,
        Self::Notifications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Search => "search",
            Self::Languages => "languages",
            Self::Activity => "activity",
            Self::Task => "task",
            Self::Notifications => "notifications",
        }
    }
}

impl FromStr for ActivePanel {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| PortalError::UnknownPanel(s.to_string()))
    }
}

impl fmt::Display for ActivePanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted active-panel state
pub struct PanelStore {
    storage: Arc<dyn KeyValueStore>,
    endpoint: String,
    active: ActivePanel,
}

impl PanelStore {
    /// Read the active panel from storage; unknown values fall back to `none`
    pub fn restore(
        storage: Arc<dyn KeyValueStore>,
        endpoint: impl Into<String>,
    ) -> PortalResult<Self> {
        let active = match storage.get_item(ACTIVE_PANEL_KEY)? {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("Unknown stored panel '{}', using none", raw);
                ActivePanel::None
            }),
            None => ActivePanel::None,
        };

        Ok(Self {
            storage,
            endpoint: endpoint.into(),
            active,
        })
    }

    pub fn active(&self) -> ActivePanel {
        self.active
    }

    /// Open a panel
    pub fn set_active(&mut self, panel: ActivePanel) -> PortalResult<()> {
        self.storage.set_item(ACTIVE_PANEL_KEY, panel.as_str())?;
        self.active = panel;
        Ok(())
    }

    /// Close the active panel.
    ///
    /// Closing notifications for a user with a plant marks them as seen; when
    /// the backend confirms (`recordId == 1`) the session emits
    /// `NotificationsSeen`. Returns whether that happened.
    pub async fn close(
        &mut self,
        session: &SessionStore,
        api: &dyn ApiClient,
    ) -> PortalResult<bool> {
        let plant_id = session.user().and_then(|u| u.plant_id);
        let mut acknowledged = false;

        if let (ActivePanel::Notifications, Some(plant_id)) = (self.active, plant_id) {
            match api
                .post(&self.endpoint, &json!({ "id": 0, "plantId": plant_id }))
                .await
            {
                Ok(response) => {
                    if response.data.get("recordId").and_then(|v| v.as_i64()) == Some(1) {
                        session.emit(SessionEvent::NotificationsSeen { plant_id });
                        acknowledged = true;
                    } else {
                        debug!("Notifications for plant {} not acknowledged", plant_id);
                    }
                }
                Err(e) => warn!("Marking notifications seen failed: {}", e),
            }
        }

        self.set_active(ActivePanel::None)?;
        Ok(acknowledged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiResponse;
    use crate::config::schema::EndpointsConfig;
    use crate::storage::{MemoryStore, USER_KEY};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Mutex;

    const ENDPOINT: &str = "MachineNotification/SetAsSeen";

    struct SeenApi {
        record_id: Option<i64>,
        posts: Mutex<Vec<Value>>,
    }

    impl SeenApi {
        fn new(record_id: Option<i64>) -> Self {
            Self {
                record_id,
                posts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ApiClient for SeenApi {
        async fn get(&self, path: &str) -> PortalResult<ApiResponse> {
            Err(PortalError::http(path, "unexpected GET"))
        }

        async fn post(&self, path: &str, body: &Value) -> PortalResult<ApiResponse> {
            self.posts.lock().unwrap().push(body.clone());
            match self.record_id {
                Some(id) => Ok(ApiResponse::ok(json!({ "recordId": id }))),
                None => Err(PortalError::http(path, "connection refused")),
            }
        }
    }

    fn setup(user: &str) -> (Arc<MemoryStore>, SessionStore) {
        let storage = Arc::new(MemoryStore::with_items([(USER_KEY, user)]));
        let session = SessionStore::restore(
            storage.clone(),
            Arc::new(SeenApi::new(None)),
            EndpointsConfig::default(),
        )
        .unwrap();
        (storage, session)
    }

    #[test]
    fn panel_ids_parse() {
        assert_eq!("task".parse::<ActivePanel>().unwrap(), ActivePanel::Task);
        assert!("sidebar".parse::<ActivePanel>().is_err());
        assert_eq!(ActivePanel::Notifications.to_string(), "notifications");
    }

    #[test]
    fn active_panel_persists() {
        let storage = Arc::new(MemoryStore::new());
        let mut panels = PanelStore::restore(storage.clone(), ENDPOINT).unwrap();
        assert_eq!(panels.active(), ActivePanel::None);

        panels.set_active(ActivePanel::Search).unwrap();

        let reopened = PanelStore::restore(storage, ENDPOINT).unwrap();
        assert_eq!(reopened.active(), ActivePanel::Search);
    }

    #[test]
    fn unknown_stored_panel_falls_back() {
        let storage = Arc::new(MemoryStore::with_items([(ACTIVE_PANEL_KEY, "sidebar")]));
        let panels = PanelStore::restore(storage, ENDPOINT).unwrap();
        assert_eq!(panels.active(), ActivePanel::None);
    }

    #[tokio::test]
    async fn closing_notifications_acknowledges() {
        let (storage, session) = setup(r#"{"PlantId": 4}"#);
        let mut events = session.subscribe();
        let api = SeenApi::new(Some(1));
        let mut panels = PanelStore::restore(storage, ENDPOINT).unwrap();
        panels.set_active(ActivePanel::Notifications).unwrap();

        assert!(panels.close(&session, &api).await.unwrap());

        assert_eq!(panels.active(), ActivePanel::None);
        assert_eq!(api.posts.lock().unwrap()[0], json!({"id": 0, "plantId": 4}));
        assert_eq!(
            events.try_recv().unwrap(),
            SessionEvent::NotificationsSeen { plant_id: 4 }
        );
    }

    #[tokio::test]
    async fn unconfirmed_acknowledgement_does_not_signal() {
        let (storage, session) = setup(r#"{"PlantId": 4}"#);
        let mut events = session.subscribe();
        let api = SeenApi::new(Some(0));
        let mut panels = PanelStore::restore(storage, ENDPOINT).unwrap();
        panels.set_active(ActivePanel::Notifications).unwrap();

        assert!(!panels.close(&session, &api).await.unwrap());
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn network_failure_still_closes() {
        let (storage, session) = setup(r#"{"PlantId": 4}"#);
        let api = SeenApi::new(None);
        let mut panels = PanelStore::restore(storage, ENDPOINT).unwrap();
        panels.set_active(ActivePanel::Notifications).unwrap();

        assert!(!panels.close(&session, &api).await.unwrap());
        assert_eq!(panels.active(), ActivePanel::None);
    }

    #[tokio::test]
    async fn other_panels_close_without_network() {
        let (storage, session) = setup(r#"{"PlantId": 4}"#);
        let api = SeenApi::new(Some(1));
        let mut panels = PanelStore::restore(storage, ENDPOINT).unwrap();
        panels.set_active(ActivePanel::Activity).unwrap();

        assert!(!panels.close(&session, &api).await.unwrap());
        assert!(api.posts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn notifications_without_plant_skip_network() {
        let (storage, session) = setup(r#"{"AuthType": "Dealer"}"#);
        let api = SeenApi::new(Some(1));
        let mut panels = PanelStore::restore(storage, ENDPOINT).unwrap();
        panels.set_active(ActivePanel::Notifications).unwrap();

        assert!(!panels.close(&session, &api).await.unwrap());
        assert!(api.posts.lock().unwrap().is_empty());
    }
}
