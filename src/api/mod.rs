//! Backend network client abstraction
//!
//! The session layer only looks at the HTTP status and a few fields of the
//! JSON `data` payload, so the trait stays small. `HttpClient` talks to the
//! real backend; tests substitute scripted clients.

mod http;

pub use http::HttpClient;

use crate::error::PortalResult;
use async_trait::async_trait;
use serde_json::Value;

/// Status code the backend returns for a dead or revoked token
pub const STATUS_UNAUTHORIZED: u16 = 401;

/// A decoded backend response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,

    /// JSON payload (`Value::Null` for an empty body)
    pub data: Value,
}

impl ApiResponse {
    /// A 200 response carrying `data`
    pub fn ok(data: Value) -> Self {
        Self { status: 200, data }
    }

    /// Check for an explicit unauthorized status
    pub fn is_unauthorized(&self) -> bool {
        self.status == STATUS_UNAUTHORIZED
    }

    /// Check for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstract backend client
///
/// Transport failures are errors; HTTP error statuses are not, so callers
/// can tell a 401 apart from an unreachable server.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// GET `path` relative to the backend base URL
    async fn get(&self, path: &str) -> PortalResult<ApiResponse>;

    /// POST a JSON body to `path`
    async fn post(&self, path: &str, body: &Value) -> PortalResult<ApiResponse>;

    /// Replace the bearer token attached to subsequent requests
    fn set_bearer(&self, _token: Option<&str>) {}
}

/// Substitute `{name}` placeholders in an endpoint template
pub fn render_path(template: &str, params: &[(&str, &str)]) -> String {
    params.iter().fold(template.to_string(), |path, (name, value)| {
        path.replace(&format!("{{{}}}", name), value)
    })
}
