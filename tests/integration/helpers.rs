//! Shared test helpers for integration tests.

use serde_json::{Value, json};
use wiremock::MockServer;

use ouvidoria_client::AuditLogClient;
use ouvidoria_console::AuditLogView;
use ouvidoria_core::config::api::ApiConfig;
use ouvidoria_core::types::PageSize;

/// Bearer token the mock backend expects.
pub const TOKEN: &str = "integration-token";

/// A mock backend plus a client and a fresh view pointed at it.
pub struct TestApp {
    /// Mock dashboard API
    pub server: MockServer,
    /// Client under test
    pub client: AuditLogClient,
    /// View under test
    pub view: AuditLogView,
}

impl TestApp {
    /// Start a mock backend with the default page size.
    pub async fn new() -> Self {
        Self::with_page_size(PageSize::default()).await
    }

    /// Start a mock backend with a specific page size.
    pub async fn with_page_size(page_size: PageSize) -> Self {
        let server = MockServer::start().await;
        let client = AuditLogClient::new(&ApiConfig {
            base_url: format!("{}/api/dashboard", server.uri()),
            token: Some(TOKEN.to_string()),
            timeout_seconds: 5,
            logs_path: "/logs".to_string(),
        })
        .expect("client");
        Self {
            server,
            client,
            view: AuditLogView::new(page_size),
        }
    }
}

/// One backend entry.
pub fn entry(id: i64, action: &str) -> Value {
    json!({
        "id": id,
        "action": action,
        "user": { "id": 7, "name": "Maria Souza", "email": "maria@example.com" },
        "timestamp": "2024-01-03T10:15:00Z",
        "ip_address": "10.0.0.8",
        "resource_type": "complaint",
        "resource_id": id * 10,
        "status": "success",
        "metadata": {}
    })
}

/// A paginated listing body.
pub fn page(ids: &[i64], action: &str, count: u64) -> Value {
    json!({
        "count": count,
        "results": ids.iter().map(|id| entry(*id, action)).collect::<Vec<_>>(),
    })
}
