//! Two-level translation store: source text → target language → entry.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Default lifetime of a cached translation.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone)]
struct CacheEntry {
    text: String,
    timestamp: Instant,
}

impl CacheEntry {
    fn new(text: String) -> Self {
        Self {
            text,
            timestamp: Instant::now(),
        }
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        self.timestamp.elapsed() < ttl
    }
}

/// In-memory cache of successful translations.
///
/// Entries are keyed by the original text and then by target language only;
/// the source language is not part of the cache key. Expired entries are
/// ignored on read and overwritten on the next successful fetch, never swept.
pub struct TranslationCache {
    entries: Mutex<HashMap<String, HashMap<String, CacheEntry>>>,
    ttl: Duration,
}

impl TranslationCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a fresh translation of `text` into `target_lang`.
    pub fn get(&self, text: &str, target_lang: &str) -> Option<String> {
        let entries = self.entries.lock();
        entries
            .get(text)
            .and_then(|by_lang| by_lang.get(target_lang))
            .filter(|entry| entry.is_fresh(self.ttl))
            .map(|entry| entry.text.clone())
    }

    pub fn insert(&self, text: &str, target_lang: &str, translated: String) {
        let mut entries = self.entries.lock();
        entries
            .entry(text.to_string())
            .or_default()
            .insert(target_lang.to_string(), CacheEntry::new(translated));
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Number of distinct source texts with at least one stored entry,
    /// fresh or not.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
