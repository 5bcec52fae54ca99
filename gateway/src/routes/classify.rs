use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use classify_common::ClassifyRequest;
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Response payload for a resolved classification.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    pub label: String,
    pub score: f64,
    pub latency_ms: u64,
    pub worker_id: String,
    pub cache_hit: bool,
}

/// POST /api/v1/classify - cache-aside classification endpoint.
async fn classify(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, (StatusCode, String)> {
    let outcome = state
        .dispatcher
        .dispatch(&request.model, &request.text)
        .await
        .map_err(|e| (StatusCode::BAD_GATEWAY, e.to_string()))?;

    tracing::info!(
        model = %request.model,
        cache_hit = outcome.cache_hit,
        latency_ms = outcome.latency_ms,
        "classify request resolved"
    );

    Ok(Json(ClassifyResponse {
        label: outcome.result.label,
        score: outcome.result.score,
        latency_ms: outcome.latency_ms,
        worker_id: outcome.result.worker_id,
        cache_hit: outcome.cache_hit,
    }))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/classify", post(classify))
        .with_state(state)
}
