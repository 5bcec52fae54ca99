//! Full-chain test: gateway dispatch against a real in-process worker whose
//! external sentiment API is unreachable, so the heuristic fallback answers.

use std::sync::Arc;
use std::time::Duration;

use classify_gateway::test_util::MemoryCache;
use classify_gateway::{AuditLogger, ClassifierClient, Dispatcher};
use classify_worker::{
    api, AppState as WorkerState, DefaultStrategy, SentimentConfig, SentimentStrategy,
    StrategyRegistry,
};
use tokio::net::TcpListener;

/// Boot the worker router on an ephemeral port and return its address.
async fn spawn_worker() -> String {
    let sentiment = SentimentConfig {
        // Nothing listens on port 9: every upstream call fails fast.
        api_url: "http://127.0.0.1:9".to_string(),
        token: Some("test-token".to_string()),
        connect_timeout_secs: 1,
        call_timeout_secs: 2,
        retry_backoff_ms: 10,
    };
    let registry = Arc::new(StrategyRegistry::new(
        Box::new(SentimentStrategy::new(&sentiment).unwrap()),
        Box::new(DefaultStrategy),
    ));
    let state = Arc::new(WorkerState::new(registry, "worker-cafe0001".to_string()));
    let app = api::router(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn empty_cache_and_dead_api_still_resolve_and_then_hit() {
    let worker_addr = spawn_worker().await;

    let cache = Arc::new(MemoryCache::new());
    let client = ClassifierClient::new(
        &worker_addr,
        Duration::from_secs(1),
        Duration::from_secs(5),
    );
    let audit = Arc::new(AuditLogger::new(":memory:").unwrap());
    let dispatcher = Dispatcher::new(cache, client, audit, Duration::from_secs(1800));

    let first = dispatcher.dispatch("sentiment", "I love this").await.unwrap();
    assert!(!first.cache_hit);
    assert_eq!(first.result.label, "POSITIVE");
    assert_eq!(first.result.score, 0.92);
    assert_eq!(first.result.worker_id, "worker-cafe0001");

    let second = dispatcher.dispatch("sentiment", "I love this").await.unwrap();
    assert!(second.cache_hit);
    assert_eq!(second.result, first.result);
}

#[tokio::test]
async fn unknown_model_resolves_through_the_default_arm() {
    let worker_addr = spawn_worker().await;

    let cache = Arc::new(MemoryCache::new());
    let client = ClassifierClient::new(
        &worker_addr,
        Duration::from_secs(1),
        Duration::from_secs(5),
    );
    let audit = Arc::new(AuditLogger::new(":memory:").unwrap());
    let dispatcher = Dispatcher::new(cache, client, audit, Duration::from_secs(1800));

    let outcome = dispatcher.dispatch("spam-filter", "whatever").await.unwrap();
    assert_eq!(outcome.result.label, "POSITIVE");
    assert_eq!(outcome.result.score, 0.90);
}
