//! Integration tests for the worker RPC surface and the sentiment strategy.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use classify_worker::{
    api, AppState, ClassifyStrategy, DefaultStrategy, SentimentConfig, SentimentStrategy,
    StrategyRegistry,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sentiment_config(api_url: &str, token: Option<&str>) -> SentimentConfig {
    SentimentConfig {
        api_url: api_url.to_string(),
        token: token.map(String::from),
        connect_timeout_secs: 1,
        call_timeout_secs: 2,
        retry_backoff_ms: 10,
    }
}

fn test_state(sentiment: SentimentConfig) -> Arc<AppState> {
    let registry = Arc::new(StrategyRegistry::new(
        Box::new(SentimentStrategy::new(&sentiment).unwrap()),
        Box::new(DefaultStrategy),
    ));
    Arc::new(AppState::new(registry, "worker-0badf00d".to_string()))
}

async fn post_classify(app: &axum::Router, model: &str, text: &str) -> (StatusCode, Value) {
    let body = serde_json::to_string(&json!({ "model": model, "input_text": text })).unwrap();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/rpc/classify")
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn health_endpoint_is_ok() {
    let app = api::router(test_state(sentiment_config("http://127.0.0.1:9", None)));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_model_lands_on_default_arm() {
    let app = api::router(test_state(sentiment_config("http://127.0.0.1:9", None)));

    let (status, body) = post_classify(&app, "fancy-new-model", "whatever").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "POSITIVE");
    assert_eq!(body["score"], 0.90);
    assert_eq!(body["worker_id"], "worker-0badf00d");
}

#[tokio::test]
async fn sentiment_model_matches_case_insensitively() {
    // Unreachable API forces the heuristic, whose confidence differs from the
    // default arm's. That difference proves which arm handled the request.
    let app = api::router(test_state(sentiment_config(
        "http://127.0.0.1:9",
        Some("test-token"),
    )));

    let (status, body) = post_classify(&app, "SENTIMENT", "I love this").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "POSITIVE");
    assert_eq!(body["score"], 0.92);
}

#[tokio::test]
async fn sentiment_falls_back_when_api_unreachable() {
    let app = api::router(test_state(sentiment_config(
        "http://127.0.0.1:9",
        Some("test-token"),
    )));

    let (_, positive) = post_classify(&app, "sentiment", "I love this").await;
    assert_eq!(positive["label"], "POSITIVE");
    assert_eq!(positive["score"], 0.92);

    let (_, negative) = post_classify(&app, "sentiment", "this is terrible").await;
    assert_eq!(negative["label"], "NEGATIVE");
    assert_eq!(negative["score"], 0.88);
}

#[tokio::test]
async fn sentiment_uses_upstream_result_when_available() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/model"))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_json(json!({ "inputs": "I love this" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[
            { "label": "POSITIVE", "score": 0.99 },
            { "label": "NEGATIVE", "score": 0.01 }
        ]])))
        .expect(1)
        .mount(&server)
        .await;

    let config = sentiment_config(&format!("{}/model", server.uri()), Some("test-token"));
    let strategy = SentimentStrategy::new(&config).unwrap();

    let prediction = strategy.classify("I love this").await;
    assert_eq!(prediction.label, "POSITIVE");
    assert_eq!(prediction.score, 0.99);
}

#[tokio::test]
async fn sentiment_retries_exactly_once_on_cold_start() {
    let server = MockServer::start().await;

    // First call: the model is still loading.
    Mock::given(method("POST"))
        .and(path("/model"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "estimated_time": 20.0 })),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    // Second call: the real result.
    Mock::given(method("POST"))
        .and(path("/model"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[
            { "label": "NEGATIVE", "score": 0.97 },
            { "label": "POSITIVE", "score": 0.03 }
        ]])))
        .expect(1)
        .mount(&server)
        .await;

    let config = sentiment_config(&format!("{}/model", server.uri()), Some("test-token"));
    let strategy = SentimentStrategy::new(&config).unwrap();

    let prediction = strategy.classify("meh").await;
    assert_eq!(prediction.label, "NEGATIVE");
    assert_eq!(prediction.score, 0.97);
}

#[tokio::test]
async fn sentiment_cold_start_twice_falls_back() {
    let server = MockServer::start().await;

    // The retry is bounded: a second cold-start answer is not retried again,
    // it is an invalid response and the heuristic takes over.
    Mock::given(method("POST"))
        .and(path("/model"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "estimated_time": 20.0 })),
        )
        .expect(2)
        .mount(&server)
        .await;

    let config = sentiment_config(&format!("{}/model", server.uri()), Some("test-token"));
    let strategy = SentimentStrategy::new(&config).unwrap();

    let prediction = strategy.classify("this is terrible").await;
    assert_eq!(prediction.label, "NEGATIVE");
    assert_eq!(prediction.score, 0.88);
}

#[tokio::test]
async fn sentiment_missing_token_never_calls_api() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let config = sentiment_config(&format!("{}/model", server.uri()), None);
    let strategy = SentimentStrategy::new(&config).unwrap();

    let prediction = strategy.classify("I love this").await;
    assert_eq!(prediction.label, "POSITIVE");
    assert_eq!(prediction.score, 0.92);
}

#[tokio::test]
async fn sentiment_error_status_falls_back() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/model"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .expect(1)
        .mount(&server)
        .await;

    let config = sentiment_config(&format!("{}/model", server.uri()), Some("test-token"));
    let strategy = SentimentStrategy::new(&config).unwrap();

    let prediction = strategy.classify("this is terrible").await;
    assert_eq!(prediction.label, "NEGATIVE");
    assert_eq!(prediction.score, 0.88);
}

#[tokio::test]
async fn sentiment_all_zero_scores_fall_back() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/model"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[
            { "label": "POSITIVE", "score": 0.0 },
            { "label": "NEGATIVE", "score": 0.0 }
        ]])))
        .expect(1)
        .mount(&server)
        .await;

    let config = sentiment_config(&format!("{}/model", server.uri()), Some("test-token"));
    let strategy = SentimentStrategy::new(&config).unwrap();

    let prediction = strategy.classify("I love this").await;
    assert_eq!(prediction.label, "POSITIVE");
    assert_eq!(prediction.score, 0.92);
}
