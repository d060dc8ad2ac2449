//! Cached, request-coalescing translation service.

use super::{TranslateError, TranslateRequest, TranslationBackend};
use crate::cache::{RequestKey, TranslationCache, DEFAULT_TTL};
use crate::config::TranslationConfig;
use crate::transport::LibreTranslateTransport;
use futures::future::{join_all, BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default upper bound for a single call to the backend.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

type InFlight = Shared<BoxFuture<'static, String>>;

struct PendingEntry {
    ticket: u64,
    result: InFlight,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceStats {
    /// Calls actually issued to the backend.
    pub network_calls: u64,
    pub cache_hits: u64,
    /// Callers that attached to an already in-flight call.
    pub coalesced: u64,
    /// Backend calls that failed and fell back to the original text.
    pub failures: u64,
    /// Calls answered without lookup (blank text or same language).
    pub passthrough: u64,
}

struct AtomicStats {
    network_calls: AtomicU64,
    cache_hits: AtomicU64,
    coalesced: AtomicU64,
    failures: AtomicU64,
    passthrough: AtomicU64,
}

impl AtomicStats {
    fn new() -> Self {
        Self {
            network_calls: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            coalesced: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            passthrough: AtomicU64::new(0),
        }
    }

    fn to_stats(&self) -> ServiceStats {
        ServiceStats {
            network_calls: self.network_calls.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            coalesced: self.coalesced.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            passthrough: self.passthrough.load(Ordering::Relaxed),
        }
    }
}

struct Inner {
    backend: Arc<dyn TranslationBackend>,
    cache: TranslationCache,
    pending: Mutex<HashMap<RequestKey, PendingEntry>>,
    next_ticket: AtomicU64,
    request_timeout: Option<Duration>,
    stats: AtomicStats,
}

/// Removes the pending entry for `key` when dropped, but only if it still
/// belongs to `ticket`: a clear followed by a fresh dispatch for the same key
/// must not lose the newer entry.
struct PendingRelease<'a> {
    inner: &'a Inner,
    key: &'a RequestKey,
    ticket: u64,
}

impl Drop for PendingRelease<'_> {
    fn drop(&mut self) {
        let mut pending = self.inner.pending.lock();
        if pending.get(self.key).map(|entry| entry.ticket) == Some(self.ticket) {
            pending.remove(self.key);
        }
    }
}

impl Inner {
    async fn fetch(self: Arc<Self>, key: RequestKey, ticket: u64) -> String {
        let release = PendingRelease {
            inner: &*self,
            key: &key,
            ticket,
        };

        self.stats.network_calls.fetch_add(1, Ordering::Relaxed);
        let request = TranslateRequest::text(&key.text, &key.source, &key.target);
        let outcome = match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, self.backend.translate(&request))
                .await
                .unwrap_or(Err(TranslateError::Timeout(limit))),
            None => self.backend.translate(&request).await,
        };

        let text = match outcome {
            Ok(translated) => {
                self.cache.insert(&key.text, &key.target, translated.clone());
                translated
            }
            Err(e) => {
                self.stats.failures.fetch_add(1, Ordering::Relaxed);
                warn!(
                    error = %e,
                    kind = e.kind(),
                    status = ?e.status(),
                    backend = self.backend.name(),
                    source_lang = %key.source,
                    target_lang = %key.target,
                    "Translation failed, using original text"
                );
                key.text.clone()
            }
        };

        drop(release);
        text
    }
}

enum Lookup {
    Ready(String),
    Pending(InFlight),
}

/// Translation service handle.
///
/// Cloning is cheap and every clone shares one cache and one in-flight map.
/// Build one per application and pass it to whatever needs translations.
#[derive(Clone)]
pub struct TranslationService {
    inner: Arc<Inner>,
}

impl TranslationService {
    pub fn new(backend: Arc<dyn TranslationBackend>) -> Self {
        Self::builder(backend).build()
    }

    pub fn builder(backend: Arc<dyn TranslationBackend>) -> TranslationServiceBuilder {
        TranslationServiceBuilder::new(backend)
    }

    /// Service backed by the HTTP endpoint described in `config`.
    pub fn from_config(config: &TranslationConfig) -> crate::Result<Self> {
        let transport = LibreTranslateTransport::from_config(config)?;
        Ok(Self::builder(Arc::new(transport))
            .with_cache_ttl(config.cache_ttl())
            .with_request_timeout(config.request_timeout())
            .build())
    }

    /// Translate `text`, degrading to `text` itself on any failure.
    pub async fn translate_text(&self, text: &str, source_lang: &str, target_lang: &str) -> String {
        if text.trim().is_empty() || source_lang == target_lang {
            self.inner.stats.passthrough.fetch_add(1, Ordering::Relaxed);
            return text.to_string();
        }

        if let Some(hit) = self.cached(text, target_lang) {
            return hit;
        }

        match self.attach_or_dispatch(RequestKey::new(text, source_lang, target_lang)) {
            Lookup::Ready(hit) => hit,
            Lookup::Pending(result) => result.await,
        }
    }

    /// Translate every element concurrently; `result[i]` corresponds to `texts[i]`.
    pub async fn translate_batch<S: AsRef<str>>(
        &self,
        texts: &[S],
        source_lang: &str,
        target_lang: &str,
    ) -> Vec<String> {
        join_all(
            texts
                .iter()
                .map(|text| self.translate_text(text.as_ref(), source_lang, target_lang)),
        )
        .await
    }

    /// Drop every cached translation and forget in-flight calls.
    ///
    /// Calls already dispatched still complete and resolve for their callers.
    pub fn clear_cache(&self) {
        let mut pending = self.inner.pending.lock();
        self.inner.cache.clear();
        pending.clear();
        debug!("translation cache cleared");
    }

    /// Number of distinct source texts in the cache.
    pub fn cache_size(&self) -> usize {
        self.inner.cache.len()
    }

    pub fn pending_count(&self) -> usize {
        self.inner.pending.lock().len()
    }

    pub fn stats(&self) -> ServiceStats {
        self.inner.stats.to_stats()
    }

    pub fn backend_name(&self) -> &'static str {
        self.inner.backend.name()
    }

    fn cached(&self, text: &str, target_lang: &str) -> Option<String> {
        let hit = self.inner.cache.get(text, target_lang);
        if hit.is_some() {
            self.inner.stats.cache_hits.fetch_add(1, Ordering::Relaxed);
        }
        hit
    }

    fn attach_or_dispatch(&self, key: RequestKey) -> Lookup {
        let mut pending = self.inner.pending.lock();

        // A call for this key may have completed between the first cache
        // check and taking the lock; it writes the cache before releasing.
        if let Some(hit) = self.cached(&key.text, &key.target) {
            return Lookup::Ready(hit);
        }

        if let Some(entry) = pending.get(&key) {
            self.inner.stats.coalesced.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, "joining in-flight translation");
            return Lookup::Pending(entry.result.clone());
        }

        let ticket = self.inner.next_ticket.fetch_add(1, Ordering::Relaxed);
        let original = key.text.clone();
        let task = tokio::spawn(Arc::clone(&self.inner).fetch(key.clone(), ticket));
        let result = async move {
            match task.await {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "translation task did not complete, using original text");
                    original
                }
            }
        }
        .boxed()
        .shared();

        pending.insert(
            key,
            PendingEntry {
                ticket,
                result: result.clone(),
            },
        );
        Lookup::Pending(result)
    }
}

impl std::fmt::Debug for TranslationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationService")
            .field("backend", &self.inner.backend.name())
            .field("cache_ttl", &self.inner.cache.ttl())
            .field("request_timeout", &self.inner.request_timeout)
            .finish()
    }
}

pub struct TranslationServiceBuilder {
    backend: Arc<dyn TranslationBackend>,
    cache_ttl: Duration,
    request_timeout: Option<Duration>,
}

impl TranslationServiceBuilder {
    pub fn new(backend: Arc<dyn TranslationBackend>) -> Self {
        Self {
            backend,
            cache_ttl: DEFAULT_TTL,
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        }
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// `None` lets a hung call hold its in-flight entry indefinitely.
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn build(self) -> TranslationService {
        TranslationService {
            inner: Arc::new(Inner {
                backend: self.backend,
                cache: TranslationCache::new(self.cache_ttl),
                pending: Mutex::new(HashMap::new()),
                next_ticket: AtomicU64::new(0),
                request_timeout: self.request_timeout,
                stats: AtomicStats::new(),
            }),
        }
    }
}
