//! Unary classify endpoint.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use classify_common::{WorkerClassifyRequest, WorkerClassifyResponse};

use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/rpc/classify", post(classify))
}

/// POST /rpc/classify - resolve one classification request.
///
/// Always answers: strategies degrade internally instead of erroring.
async fn classify(
    State(state): State<Arc<AppState>>,
    Json(request): Json<WorkerClassifyRequest>,
) -> Json<WorkerClassifyResponse> {
    let start = Instant::now();

    let strategy = state.registry.resolve(&request.model);
    let prediction = strategy.classify(&request.input_text).await;

    tracing::debug!(
        model = %request.model,
        label = %prediction.label,
        "classified"
    );

    Json(WorkerClassifyResponse {
        label: prediction.label,
        score: prediction.score,
        worker_id: state.worker_id.clone(),
        latency_ms: Some(start.elapsed().as_millis() as u64),
    })
}
