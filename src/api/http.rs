//! HTTP implementation of [`ApiClient`] on top of `ureq`

use super::{ApiClient, ApiResponse};
use crate::config::schema::ApiConfig;
use crate::error::{PortalError, PortalResult};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::RwLock;
use std::time::Duration;
use tracing::debug;
use ureq::Agent;

/// Blocking `ureq` agent driven from `spawn_blocking`
pub struct HttpClient {
    agent: Agent,
    base_url: String,
    bearer: RwLock<Option<String>>,
}

impl HttpClient {
    /// Create a client from API configuration
    pub fn new(config: &ApiConfig) -> Self {
        let timeout = (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs));
        let agent: Agent = Agent::config_builder()
            .timeout_global(timeout)
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer: RwLock::new(None),
        }
    }

    /// Join a relative endpoint path onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorization(&self) -> Option<String> {
        self.bearer
            .read()
            .ok()
            .and_then(|b| b.as_ref().map(|t| format!("Bearer {}", t)))
    }

    async fn send(&self, path: &str, body: Option<String>) -> PortalResult<ApiResponse> {
        let agent = self.agent.clone();
        let url = self.url(path);
        let auth = self.authorization();
        let owned_path = path.to_string();

        debug!("{} {}", if body.is_some() { "POST" } else { "GET" }, url);

        let result = tokio::task::spawn_blocking(move || -> Result<(u16, String), ureq::Error> {
            let mut response = match body {
                Some(body) => {
                    let mut req = agent
                        .post(url.as_str())
                        .header("Content-Type", "application/json");
                    if let Some(auth) = &auth {
                        req = req.header("Authorization", auth.as_str());
                    }
                    req.send(body.as_str())?
                }
                None => {
                    let mut req = agent.get(url.as_str());
                    if let Some(auth) = &auth {
                        req = req.header("Authorization", auth.as_str());
                    }
                    req.call()?
                }
            };
            let status = response.status().as_u16();
            let text = response.body_mut().read_to_string()?;
            Ok((status, text))
        })
        .await
        .map_err(|e| PortalError::Internal(format!("HTTP task failed: {}", e)))?;

        let (status, text) = result.map_err(|e| PortalError::http(&owned_path, e))?;
        debug!("{} -> {}", owned_path, status);

        Ok(ApiResponse {
            status,
            data: decode_body(&text),
        })
    }
}

/// Decode a response body; non-JSON text is kept as a string value
fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[async_trait]
impl ApiClient for HttpClient {
    async fn get(&self, path: &str) -> PortalResult<ApiResponse> {
        self.send(path, None).await
    }

    async fn post(&self, path: &str, body: &Value) -> PortalResult<ApiResponse> {
        let body = serde_json::to_string(body)?;
        self.send(path, Some(body)).await
    }

    fn set_bearer(&self, token: Option<&str>) {
        if let Ok(mut bearer) = self.bearer.write() {
            *bearer = token.filter(|t| !t.is_empty()).map(str::to_string);
        }
    }
}
