//! 文本翻译模块：带缓存、请求合并与失败回退的翻译服务。
//!
//! # Text Translation Module
//!
//! [`TranslationService`] turns `(text, source, target)` into translated text.
//! It consults the [`TranslationCache`](crate::cache::TranslationCache) first,
//! attaches concurrent callers for the same request to one in-flight call, and
//! falls back to the original text whenever the backend fails.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`TranslationService`] | Cached, coalescing single-text and batch translation |
//! | [`TranslationBackend`] | Seam for the remote endpoint (HTTP or test doubles) |
//! | [`TranslateRequest`] | Wire payload `{q, source, target, format}` |
//! | [`TranslateError`] | Network / HTTP / malformed-response / timeout failures |
//! | [`Debouncer`] | Defers dispatch until input has been stable for a delay |

mod debounce;
mod error;
mod service;

pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use error::TranslateError;
pub use service::{
    ServiceStats, TranslationService, TranslationServiceBuilder, DEFAULT_REQUEST_TIMEOUT,
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Request body sent to the translation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub q: String,
    pub source: String,
    pub target: String,
    pub format: String,
}

impl TranslateRequest {
    pub fn text(q: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            source: source.into(),
            target: target.into(),
            format: "text".to_string(),
        }
    }
}

/// Remote translation endpoint.
///
/// Implementations perform exactly one call per invocation; caching,
/// coalescing, and fallback live in [`TranslationService`].
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    async fn translate(&self, request: &TranslateRequest) -> Result<String, TranslateError>;

    fn name(&self) -> &'static str;
}

/// Whether text in `source_lang` needs translating for a reader of `target_lang`.
pub fn is_translation_needed(source_lang: &str, target_lang: &str) -> bool {
    source_lang != target_lang
}
