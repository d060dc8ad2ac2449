use super::TranslationService;
use crate::config::TranslationConfig;
use parking_lot::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Default quiet period before a debounced submission is dispatched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Coalesces rapidly changing input: a submission is only dispatched once no
/// newer submission has arrived for `delay`.
///
/// Superseded submissions resolve to `None`. A submission that has already
/// been dispatched is not affected by later ones.
pub struct Debouncer {
    service: TranslationService,
    delay: Duration,
    current: Mutex<Option<CancellationToken>>,
}

impl Debouncer {
    pub fn new(service: TranslationService, delay: Duration) -> Self {
        Self {
            service,
            delay,
            current: Mutex::new(None),
        }
    }

    /// Debouncer using the configured `debounce_ms` delay.
    pub fn from_config(service: TranslationService, config: &TranslationConfig) -> Self {
        Self::new(service, config.debounce())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn submit(&self, text: &str, source_lang: &str, target_lang: &str) -> Option<String> {
        let token = CancellationToken::new();
        let previous = self.current.lock().replace(token.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }

        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!(delay_ms = self.delay.as_millis() as u64, "debounced translation superseded");
                return None;
            }
            _ = tokio::time::sleep(self.delay) => {}
        }

        Some(self.service.translate_text(text, source_lang, target_lang).await)
    }

    /// Cancel the submission currently waiting out its delay, if any.
    pub fn cancel_pending(&self) {
        if let Some(token) = self.current.lock().take() {
            token.cancel();
        }
    }
}
