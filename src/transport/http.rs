use crate::config::TranslationConfig;
use crate::translate::{TranslateError, TranslateRequest, TranslationBackend};
use crate::Result;
use async_trait::async_trait;
use reqwest::Proxy;
use serde::Serialize;
use serde_json::Value;
use std::env;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for a LibreTranslate-compatible `POST /translate` endpoint.
pub struct LibreTranslateTransport {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct WireBody<'a> {
    #[serde(flatten)]
    request: &'a TranslateRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

impl LibreTranslateTransport {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::from_config(&TranslationConfig::new().with_endpoint(endpoint))
    }

    pub fn from_config(config: &TranslationConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Some(Duration::from_secs(config.pool_idle_timeout_secs)));

        // The service enforces its own per-call timeout; this one also bounds
        // connection setup when the transport is used on its own.
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        if let Ok(proxy_url) = env::var("DIETPLAN_TRANSLATE_PROXY_URL") {
            match Proxy::all(&proxy_url) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => warn!(proxy = %proxy_url, error = %e, "ignoring invalid proxy url"),
            }
        }

        let client = builder.build().map_err(TransportError::from)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TranslationBackend for LibreTranslateTransport {
    async fn translate(&self, request: &TranslateRequest) -> std::result::Result<String, TranslateError> {
        let body = WireBody {
            request,
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(TranslateError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Http {
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(TranslateError::Network)?;
        let translated = parse_translated_text(&text, &request.q)?;
        debug!(
            source_lang = %request.source,
            target_lang = %request.target,
            chars = request.q.chars().count(),
            "translation received"
        );
        Ok(translated)
    }

    fn name(&self) -> &'static str {
        "libretranslate"
    }
}

/// Extract `translatedText` from a success body.
///
/// A missing, null, or empty field yields `original`; a body that is not a
/// JSON object, or a non-string field, is malformed.
pub fn parse_translated_text(
    body: &str,
    original: &str,
) -> std::result::Result<String, TranslateError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| TranslateError::MalformedResponse(e.to_string()))?;
    let fields = value.as_object().ok_or_else(|| {
        TranslateError::MalformedResponse("response body is not a JSON object".to_string())
    })?;

    match fields.get("translatedText") {
        Some(Value::String(text)) if !text.is_empty() => Ok(text.clone()),
        None | Some(Value::Null) | Some(Value::String(_)) => Ok(original.to_string()),
        Some(other) => Err(TranslateError::MalformedResponse(format!(
            "translatedText is not a string: {}",
            other
        ))),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
