//! 会话模块：当前语言/地区与绑定语言的翻译入口。
//!
//! # Session Module
//!
//! A [`TranslationSession`] carries the reader's current language and region,
//! persists them through a [`PreferenceStore`], and exposes translation calls
//! that implicitly target the current language.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`TranslationSession`] | Language-bound translation over a shared service |
//! | [`PreferenceStore`] | Load/save of `preferredLanguage` and `preferredRegion` |
//! | [`CacheInfo`] | Cache size plus the current language |

mod preferences;

pub use preferences::{
    JsonFilePreferenceStore, MemoryPreferenceStore, PreferenceStore, Preferences,
};

use crate::error::{Error, ErrorContext};
use crate::object::ObjectTranslator;
use crate::translate::TranslationService;
use crate::Result;
use arc_swap::ArcSwap;
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_REGION: &str = "international";

pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "es", "fr"];

pub const REGIONS: &[&str] = &[
    "international",
    "north_america",
    "latin_america",
    "europe",
    "middle_east",
    "south_asia",
    "east_asia",
    "southeast_asia",
    "sub_saharan_africa",
    "australia_oceania",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheInfo {
    pub size: usize,
    pub current_language: String,
}

pub struct TranslationSession {
    translator: ObjectTranslator,
    source_lang: String,
    language: ArcSwap<String>,
    region: ArcSwap<String>,
    store: Arc<dyn PreferenceStore>,
    in_flight: AtomicUsize,
}

struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl TranslationSession {
    /// Start a session, restoring saved preferences.
    ///
    /// Unreadable or unknown saved values fall back to the defaults.
    pub fn new(service: TranslationService, store: Arc<dyn PreferenceStore>) -> Self {
        let saved = store.load().unwrap_or_else(|e| {
            warn!(error = %e, "cannot load preferences, using defaults");
            Preferences::default()
        });

        let language = saved
            .preferred_language
            .filter(|lang| is_supported_language(lang))
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
        let region = saved
            .preferred_region
            .filter(|region| REGIONS.contains(&region.as_str()))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        Self {
            translator: ObjectTranslator::new(service),
            source_lang: DEFAULT_LANGUAGE.to_string(),
            language: ArcSwap::from_pointee(language),
            region: ArcSwap::from_pointee(region),
            store,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Language the content is authored in (default `en`).
    pub fn with_source_lang(mut self, lang: impl Into<String>) -> Self {
        self.source_lang = lang.into();
        self
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    pub fn language(&self) -> String {
        self.language.load().as_ref().clone()
    }

    pub fn region(&self) -> String {
        self.region.load().as_ref().clone()
    }

    /// Switch the current language and persist it.
    ///
    /// The in-memory language changes even if saving fails; the save error is
    /// still returned.
    pub fn set_language(&self, lang: &str) -> Result<()> {
        if !is_supported_language(lang) {
            return Err(Error::validation_with_context(
                format!("unsupported language '{}'", lang),
                ErrorContext::new()
                    .with_field_path("preferredLanguage")
                    .with_details(format!("expected one of {:?}", SUPPORTED_LANGUAGES)),
            ));
        }
        self.language.store(Arc::new(lang.to_string()));
        debug!(language = lang, "language changed");
        self.persist()
    }

    pub fn set_region(&self, region: &str) -> Result<()> {
        if !REGIONS.contains(&region) {
            return Err(Error::validation_with_context(
                format!("unknown region '{}'", region),
                ErrorContext::new().with_field_path("preferredRegion"),
            ));
        }
        self.region.store(Arc::new(region.to_string()));
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let preferences = Preferences {
            preferred_language: Some(self.language()),
            preferred_region: Some(self.region()),
        };
        self.store.save(&preferences).map_err(|e| {
            warn!(error = %e, "cannot save preferences");
            e
        })
    }

    pub fn is_translation_needed(&self, source_lang: &str) -> bool {
        crate::translate::is_translation_needed(source_lang, &self.language())
    }

    /// True while any translation issued through this session is outstanding.
    pub fn is_translating(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub async fn translate_text(&self, text: &str) -> String {
        let _guard = InFlight::enter(&self.in_flight);
        let target = self.language();
        self.translator
            .service()
            .translate_text(text, &self.source_lang, &target)
            .await
    }

    pub async fn translate_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<String> {
        let _guard = InFlight::enter(&self.in_flight);
        let target = self.language();
        self.translator
            .service()
            .translate_batch(texts, &self.source_lang, &target)
            .await
    }

    pub async fn translate_objects<S: AsRef<str>>(
        &self,
        objects: &[Value],
        field_paths: &[S],
    ) -> Vec<Value> {
        let _guard = InFlight::enter(&self.in_flight);
        let target = self.language();
        self.translator
            .translate_object_array(objects, field_paths, &target, &self.source_lang)
            .await
    }

    /// Translate `text` written in `source_lang` only if it differs from the
    /// current language.
    pub async fn translate_if_needed(&self, text: &str, source_lang: &str) -> String {
        if !self.is_translation_needed(source_lang) {
            return text.to_string();
        }
        let _guard = InFlight::enter(&self.in_flight);
        let target = self.language();
        self.translator
            .service()
            .translate_text(text, source_lang, &target)
            .await
    }

    pub fn translator(&self) -> &ObjectTranslator {
        &self.translator
    }

    pub fn clear_cache(&self) {
        self.translator.service().clear_cache();
    }

    pub fn cache_info(&self) -> CacheInfo {
        CacheInfo {
            size: self.translator.service().cache_size(),
            current_language: self.language(),
        }
    }
}

impl std::fmt::Debug for TranslationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationSession")
            .field("source_lang", &self.source_lang)
            .field("language", &self.language())
            .field("region", &self.region())
            .finish()
    }
}

pub fn is_supported_language(lang: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&lang)
}
