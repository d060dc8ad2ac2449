use std::time::Duration;

/// Failure of a single call to the translation endpoint.
///
/// These never escape [`TranslationService::translate_text`](super::TranslationService::translate_text);
/// they are logged and the original text is returned instead.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("network failure reaching translation endpoint: {0}")]
    Network(#[source] reqwest::Error),

    #[error("translation API error: {status}")]
    Http { status: u16 },

    #[error("malformed translation response: {0}")]
    MalformedResponse(String),

    #[error("translation timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

impl TranslateError {
    /// Stable, low-cardinality label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            TranslateError::Network(_) => "network",
            TranslateError::Http { .. } => "http",
            TranslateError::MalformedResponse(_) => "malformed_response",
            TranslateError::Timeout(_) => "timeout",
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            TranslateError::Http { status } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for showing next to untranslated content.
    pub fn user_message(&self) -> &'static str {
        match self {
            TranslateError::Http { status: 429 } => {
                "Translation rate limit exceeded. Please try again later."
            }
            TranslateError::Http { status: 503 } => "Translation service temporarily unavailable.",
            TranslateError::Network(_) | TranslateError::Timeout(_) => {
                "Network error. Please check your connection."
            }
            _ => "Translation failed. Using original text.",
        }
    }
}
