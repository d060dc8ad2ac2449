//! TranslationService caching, coalescing, ordering, and fallback

use crate::integration::mock_backend::MockBackend;
use dietplan_translate::TranslationService;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;

fn service_with(backend: &Arc<MockBackend>) -> TranslationService {
    TranslationService::new(backend.clone())
}

#[tokio::test]
async fn test_identity_and_blank_never_reach_backend() {
    let backend = Arc::new(MockBackend::prefixing());
    let service = service_with(&backend);

    assert_eq!(service.translate_text("Salad", "fr", "fr").await, "Salad");
    assert_eq!(service.translate_text(" \t ", "en", "fr").await, " \t ");
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_sequential_calls_hit_network_once() {
    let backend = Arc::new(MockBackend::prefixing());
    let service = service_with(&backend);

    assert_eq!(service.translate_text("hello", "en", "es").await, "ES_hello");
    assert_eq!(service.translate_text("hello", "en", "es").await, "ES_hello");
    assert_eq!(service.translate_text("hello", "en", "fr").await, "FR_hello");

    assert_eq!(backend.calls(), 2);
    assert_eq!(service.cache_size(), 1);
}

#[tokio::test]
async fn test_concurrent_identical_calls_coalesce() {
    let backend = Arc::new(MockBackend::prefixing().with_delay(Duration::from_millis(100)));
    let service = service_with(&backend);

    let results = join_all((0..10).map(|_| service.translate_text("hello", "en", "es"))).await;

    assert!(results.iter().all(|r| r == "ES_hello"));
    assert_eq!(backend.calls(), 1);
    assert_eq!(service.stats().coalesced, 9);
    assert_eq!(service.pending_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_calls_across_tasks_coalesce() {
    let backend = Arc::new(MockBackend::prefixing().with_delay(Duration::from_millis(200)));
    let service = service_with(&backend);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.translate_text("bonjour", "fr", "en").await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), "EN_bonjour");
    }
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_batch_order_survives_out_of_order_completion() {
    let backend = Arc::new(
        MockBackend::prefixing()
            .with_text_delay("slow", Duration::from_millis(150))
            .with_text_delay("fast", Duration::from_millis(5))
            .with_text_delay("mid", Duration::from_millis(60)),
    );
    let service = service_with(&backend);

    let out = service
        .translate_batch(&["slow", "fast", "mid", "fast"], "en", "es")
        .await;

    assert_eq!(out, vec!["ES_slow", "ES_fast", "ES_mid", "ES_fast"]);
    assert_eq!(backend.calls(), 3);
}

#[tokio::test]
async fn test_failure_returns_original_and_is_not_cached() {
    let backend = Arc::new(MockBackend::prefixing());
    let service = service_with(&backend);

    backend.set_failing(true);
    assert_eq!(service.translate_text("Lentil soup", "en", "es").await, "Lentil soup");
    assert_eq!(service.cache_size(), 0);
    assert_eq!(service.stats().failures, 1);

    backend.set_failing(false);
    assert_eq!(
        service.translate_text("Lentil soup", "en", "es").await,
        "ES_Lentil soup"
    );
    assert_eq!(backend.calls(), 2);
}

#[tokio::test]
async fn test_batch_with_partial_failure() {
    let backend = Arc::new(MockBackend::prefixing().failing_on("bad"));
    let service = service_with(&backend);

    let out = service.translate_batch(&["good", "bad"], "en", "fr").await;
    assert_eq!(out, vec!["FR_good", "bad"]);
}

#[tokio::test]
async fn test_clear_cache_forces_refetch() {
    let backend = Arc::new(MockBackend::prefixing());
    let service = service_with(&backend);

    service.translate_text("Tofu", "en", "es").await;
    service.clear_cache();
    assert_eq!(service.cache_size(), 0);

    assert_eq!(service.translate_text("Tofu", "en", "es").await, "ES_Tofu");
    assert_eq!(backend.calls(), 2);
}

#[tokio::test]
async fn test_clear_during_flight_still_resolves_caller() {
    let backend = Arc::new(MockBackend::prefixing().with_delay(Duration::from_millis(100)));
    let service = service_with(&backend);

    let caller = {
        let service = service.clone();
        tokio::spawn(async move { service.translate_text("Quinoa", "en", "es").await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(service.pending_count(), 1);

    service.clear_cache();
    assert_eq!(service.pending_count(), 0);
    assert_eq!(caller.await.unwrap(), "ES_Quinoa");
}

#[tokio::test]
async fn test_dropped_caller_does_not_cancel_fetch() {
    let backend = Arc::new(MockBackend::prefixing().with_delay(Duration::from_millis(50)));
    let service = service_with(&backend);

    let caller = {
        let service = service.clone();
        tokio::spawn(async move { service.translate_text("Hummus", "en", "fr").await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    caller.abort();

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(service.cache_size(), 1);
    assert_eq!(service.pending_count(), 0);
    assert_eq!(service.translate_text("Hummus", "en", "fr").await, "FR_Hummus");
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_expired_entries_are_refetched() {
    let backend = Arc::new(MockBackend::prefixing());
    let service = TranslationService::builder(backend.clone())
        .with_cache_ttl(Duration::from_millis(40))
        .build();

    service.translate_text("Miso", "en", "es").await;
    tokio::time::sleep(Duration::from_millis(80)).await;
    service.translate_text("Miso", "en", "es").await;

    assert_eq!(backend.calls(), 2);
}

#[tokio::test]
async fn test_slow_backend_times_out_to_original() {
    let backend = Arc::new(MockBackend::prefixing().with_delay(Duration::from_millis(500)));
    let service = TranslationService::builder(backend.clone())
        .with_request_timeout(Some(Duration::from_millis(50)))
        .build();

    assert_eq!(service.translate_text("Kimchi", "en", "es").await, "Kimchi");
    assert_eq!(service.cache_size(), 0);
    assert_eq!(service.pending_count(), 0);
}

#[tokio::test]
async fn test_requests_carry_languages_and_text_format() {
    let backend = Arc::new(MockBackend::prefixing());
    let service = service_with(&backend);

    service.translate_text("Oats", "en", "fr").await;
    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].q, "Oats");
    assert_eq!(requests[0].source, "en");
    assert_eq!(requests[0].target, "fr");
    assert_eq!(requests[0].format, "text");
}
