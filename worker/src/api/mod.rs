//! Worker HTTP surface: the unary classify RPC plus a health check.

pub mod classify;
pub mod health;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Build the full worker router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(classify::router())
        .merge(health::router())
        .with_state(state)
}
