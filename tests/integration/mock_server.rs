//! Mock HTTP server setup for integration tests

use dietplan_translate::{TranslationConfig, TranslationService};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

pub const TRANSLATE_PATH: &str = "/translate";

/// Test fixture that manages a mock translate endpoint
pub struct MockServerFixture {
    pub server: Arc<Mutex<ServerGuard>>,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self {
            server: Arc::new(Mutex::new(server)),
            base_url,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, TRANSLATE_PATH)
    }

    pub fn config(&self) -> TranslationConfig {
        TranslationConfig::new()
            .with_endpoint(self.endpoint())
            .with_request_timeout(Some(Duration::from_secs(5)))
    }

    /// Service pointed at the mock server
    pub fn service(&self) -> TranslationService {
        TranslationService::from_config(&self.config()).expect("valid mock endpoint")
    }

    /// Expect exactly `hits` requests translating `q` into `target`, answered with `translated`
    pub async fn mock_translation(
        &self,
        q: &str,
        source: &str,
        target: &str,
        translated: &str,
        hits: usize,
    ) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("POST", TRANSLATE_PATH)
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "q": q,
                "source": source,
                "target": target,
                "format": "text"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "translatedText": translated }).to_string())
            .expect(hits)
            .create_async()
            .await
    }

    /// Create a mock answering every request with `status` and `body`
    pub async fn mock_response(&self, status: usize, body: &str, hits: usize) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("POST", TRANSLATE_PATH)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(hits)
            .create_async()
            .await
    }
}
