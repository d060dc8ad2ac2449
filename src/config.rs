//! Translation configuration
//!
//! Settings can come from a YAML file, from `DIETPLAN_TRANSLATE_*` environment
//! variables, or both (environment wins).

use crate::error::{Error, ErrorContext};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://libretranslate.de/translate";

const ENV_PREFIX: &str = "DIETPLAN_TRANSLATE_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Full URL of the POST translate endpoint.
    pub endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Language content is authored in.
    pub source_lang: String,
    pub cache_ttl_secs: u64,
    /// Per-call timeout; `None` or `0` disables it.
    pub request_timeout_ms: Option<u64>,
    pub debounce_ms: u64,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            source_lang: "en".to_string(),
            cache_ttl_secs: 24 * 60 * 60,
            request_timeout_ms: Some(10_000),
            debounce_ms: 300,
            pool_max_idle_per_host: 8,
            pool_idle_timeout_secs: 90,
        }
    }
}

impl TranslationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_source_lang(mut self, lang: impl Into<String>) -> Self {
        self.source_lang = lang.into();
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        // Round partial seconds up so a sub-second TTL never becomes zero.
        self.cache_ttl_secs = ttl.as_secs().saturating_add(u64::from(ttl.subsec_nanos() > 0));
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout_ms = timeout.map(duration_millis);
        self
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debounce_ms = duration_millis(delay);
        self
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration_with_context(
                format!("cannot read config file: {}", e),
                ErrorContext::new()
                    .with_details(path.display().to_string())
                    .with_source("config_loader"),
            )
        })?;
        Self::from_yaml_str(&content)
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Overlay `DIETPLAN_TRANSLATE_*` values obtained through `lookup`.
    /// Unparseable numbers are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |suffix: &str| lookup(&format!("{}{}", ENV_PREFIX, suffix));

        if let Some(endpoint) = var("ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Some(key) = var("API_KEY").filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(lang) = var("SOURCE_LANG") {
            self.source_lang = lang;
        }
        if let Some(ttl) = var("CACHE_TTL_SECS").and_then(|s| s.parse::<u64>().ok()) {
            self.cache_ttl_secs = ttl;
        }
        if let Some(ms) = var("TIMEOUT_MS").and_then(|s| s.parse::<u64>().ok()) {
            self.request_timeout_ms = Some(ms);
        }
        if let Some(ms) = var("DEBOUNCE_MS").and_then(|s| s.parse::<u64>().ok()) {
            self.debounce_ms = ms;
        }
        if let Some(n) = var("POOL_MAX_IDLE_PER_HOST").and_then(|s| s.parse::<usize>().ok()) {
            self.pool_max_idle_per_host = n;
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.endpoint).map_err(|e| {
            Error::configuration_with_context(
                "endpoint is not a valid URL",
                ErrorContext::new()
                    .with_field_path("endpoint")
                    .with_details(e.to_string())
                    .with_source("config_loader"),
            )
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::configuration_with_context(
                "endpoint must use http or https",
                ErrorContext::new()
                    .with_field_path("endpoint")
                    .with_details(url.scheme().to_string())
                    .with_source("config_loader"),
            ));
        }
        if self.source_lang.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "source language must not be empty",
                ErrorContext::new()
                    .with_field_path("source_lang")
                    .with_source("config_loader"),
            ));
        }
        if self.cache_ttl_secs == 0 {
            return Err(Error::configuration_with_context(
                "cache TTL must be positive",
                ErrorContext::new()
                    .with_field_path("cache_ttl_secs")
                    .with_source("config_loader"),
            ));
        }
        Ok(())
    }
}

fn duration_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
