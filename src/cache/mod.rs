//! 翻译缓存模块：按原文与目标语言缓存翻译结果，惰性过期。
//!
//! # Translation Cache Module
//!
//! Successful translations are stored per original text and target language
//! so repeated renders of the same content never reach the translation API
//! twice within the TTL window.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`TranslationCache`] | Two-level text → language store with lazy TTL expiry |
//! | [`RequestKey`] | `source:target:text` identity used to coalesce in-flight calls |
//!
//! ## Example
//!
//! ```rust
//! use dietplan_translate::cache::TranslationCache;
//! use std::time::Duration;
//!
//! let cache = TranslationCache::new(Duration::from_secs(3600));
//! cache.insert("Soup", "fr", "Soupe".to_string());
//! assert_eq!(cache.get("Soup", "fr").as_deref(), Some("Soupe"));
//! assert_eq!(cache.get("Soup", "es"), None);
//! ```

mod key;
mod store;

pub use key::RequestKey;
pub use store::{TranslationCache, DEFAULT_TTL};
