//! # dietplan-translate
//!
//! 饮食计划内容的翻译缓存与批量分发层。
//!
//! Translation caching and batch-dispatch layer for diet-plan content: turns
//! `(text, source, target)` into translated text through a remote
//! LibreTranslate-compatible endpoint, and translates selected fields of
//! structured records in one batch.
//!
//! ## Overview
//!
//! Every translation goes through a [`TranslationService`]. It answers from an
//! in-memory cache when it can, shares one network call among concurrent
//! callers asking for the same text, and never fails: when the endpoint is
//! unreachable, slow, or returns an error, callers receive the original text.
//!
//! [`ObjectTranslator`] builds on the service to translate named fields
//! (dot paths such as `detailedInfo.tips`) across a list of JSON records, and
//! [`TranslationSession`] binds translations to the reader's current language.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dietplan_translate::{ObjectTranslator, TranslationConfig, TranslationService};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> dietplan_translate::Result<()> {
//!     let service = TranslationService::from_config(&TranslationConfig::from_env()?)?;
//!
//!     let title = service.translate_text("Mediterranean Diet", "en", "es").await;
//!     println!("{}", title);
//!
//!     let translator = ObjectTranslator::new(service);
//!     let recipes = vec![json!({"title": "Greek Yogurt with Berries", "tags": ["quick"]})];
//!     let translated = translator
//!         .translate_object_array(&recipes, &["title", "tags"], "fr", "en")
//!         .await;
//!     println!("{}", serde_json::to_string_pretty(&translated)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`translate`] | Cached, coalescing text translation and debouncing |
//! | [`object`] | Field-path extraction and record translation |
//! | [`cache`] | TTL cache keyed by text and target language |
//! | [`transport`] | HTTP client for the translate endpoint |
//! | [`session`] | Current language/region and preference persistence |
//! | [`config`] | YAML and environment configuration |
//! | [`catalog`] | Diet plan, recipe, and meal plan records (feature `catalog`) |

pub mod cache;
pub mod config;
pub mod object;
pub mod session;
pub mod translate;
pub mod transport;
pub mod utils;

#[cfg(feature = "catalog")]
pub mod catalog;

// Re-export main types for convenience
pub use config::TranslationConfig;
pub use object::{extract_translatable_text, ObjectTranslator, TranslatableText};
pub use session::{CacheInfo, TranslationSession};
pub use translate::{
    is_translation_needed, Debouncer, TranslateError, TranslateRequest, TranslationBackend,
    TranslationService, TranslationServiceBuilder,
};
pub use transport::LibreTranslateTransport;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
