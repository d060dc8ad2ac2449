//! Persisted language and region preferences.

use crate::error::{Error, ErrorContext};
use crate::Result;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Stored preferences. Keys match the `preferredLanguage` / `preferredRegion`
/// names the site keeps in local storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_region: Option<String>,
}

pub trait PreferenceStore: Send + Sync {
    fn load(&self) -> Result<Preferences>;

    fn save(&self, preferences: &Preferences) -> Result<()>;
}

/// In-process store, mainly for tests and short-lived tools.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    current: Mutex<Preferences>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: Preferences) -> Self {
        Self {
            current: Mutex::new(preferences),
        }
    }

    pub fn snapshot(&self) -> Preferences {
        self.current.lock().clone()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Result<Preferences> {
        Ok(self.current.lock().clone())
    }

    fn save(&self, preferences: &Preferences) -> Result<()> {
        *self.current.lock() = preferences.clone();
        Ok(())
    }
}

/// Preferences stored as a small JSON document on disk.
///
/// A missing file loads as empty preferences.
#[derive(Debug, Clone)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
}

impl JsonFilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn context(&self) -> ErrorContext {
        ErrorContext::new()
            .with_details(self.path.display().to_string())
            .with_source("preference_store")
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn load(&self) -> Result<Preferences> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Preferences::default())
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content).map_err(|e| {
            Error::validation_with_context(format!("invalid preferences file: {}", e), self.context())
        })
    }

    fn save(&self, preferences: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(preferences)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
