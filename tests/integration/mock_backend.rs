//! Scriptable in-process translation backend

use async_trait::async_trait;
use dietplan_translate::{TranslateError, TranslateRequest, TranslationBackend};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// Translates `q` to `"{TARGET}_{q}"`, e.g. `ES_hello`.
///
/// Records every request, can delay per text, and can fail on demand with
/// HTTP 503.
#[derive(Default)]
pub struct MockBackend {
    calls: AtomicUsize,
    requests: Mutex<Vec<TranslateRequest>>,
    delay: Duration,
    text_delays: HashMap<String, Duration>,
    failing_texts: HashSet<String>,
    fail_all: AtomicBool,
}

impl MockBackend {
    pub fn prefixing() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_text_delay(mut self, text: &str, delay: Duration) -> Self {
        self.text_delays.insert(text.to_string(), delay);
        self
    }

    pub fn failing_on(mut self, text: &str) -> Self {
        self.failing_texts.insert(text.to_string());
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_all.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<TranslateRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl TranslationBackend for MockBackend {
    async fn translate(&self, request: &TranslateRequest) -> Result<String, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());

        let delay = self
            .text_delays
            .get(&request.q)
            .copied()
            .unwrap_or(self.delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if self.fail_all.load(Ordering::SeqCst) || self.failing_texts.contains(&request.q) {
            return Err(TranslateError::Http { status: 503 });
        }
        Ok(format!("{}_{}", request.target.to_uppercase(), request.q))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
