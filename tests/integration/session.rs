//! TranslationSession with persisted preferences

use crate::integration::mock_backend::MockBackend;
use dietplan_translate::session::{JsonFilePreferenceStore, PreferenceStore};
use dietplan_translate::{TranslationService, TranslationSession};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_language_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    let backend = Arc::new(MockBackend::prefixing());

    {
        let session = TranslationSession::new(
            TranslationService::new(backend.clone()),
            Arc::new(JsonFilePreferenceStore::new(&path)),
        );
        session.set_language("es").unwrap();
        session.set_region("latin_america").unwrap();
    }

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        raw,
        json!({"preferredLanguage": "es", "preferredRegion": "latin_america"})
    );

    let session = TranslationSession::new(
        TranslationService::new(backend.clone()),
        Arc::new(JsonFilePreferenceStore::new(&path)),
    );
    assert_eq!(session.language(), "es");
    assert_eq!(session.region(), "latin_america");
    assert_eq!(session.translate_text("Rice").await, "ES_Rice");
}

#[tokio::test]
async fn test_corrupt_preferences_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    std::fs::write(&path, "not json").unwrap();

    let store = Arc::new(JsonFilePreferenceStore::new(&path));
    assert!(store.load().is_err());

    let session = TranslationSession::new(
        TranslationService::new(Arc::new(MockBackend::prefixing())),
        store,
    );
    assert_eq!(session.language(), "en");
    assert_eq!(session.region(), "international");
}

#[tokio::test]
async fn test_is_translating_tracks_outstanding_work() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(MockBackend::prefixing().with_delay(Duration::from_millis(100)));
    let session = Arc::new(TranslationSession::new(
        TranslationService::new(backend.clone()),
        Arc::new(JsonFilePreferenceStore::new(dir.path().join("p.json"))),
    ));
    session.set_language("fr").unwrap();

    let task = {
        let session = session.clone();
        tokio::spawn(async move {
            session
                .translate_objects(&[json!({"title": "Salad"})], &["title"])
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(session.is_translating());

    let out = task.await.unwrap();
    assert_eq!(out, vec![json!({"title": "FR_Salad"})]);
    assert!(!session.is_translating());
    assert_eq!(session.cache_info().size, 1);
}
