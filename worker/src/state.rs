//! Shared application state.

use std::sync::Arc;

use crate::model::StrategyRegistry;

/// Shared application state passed to all handlers.
pub struct AppState {
    pub registry: Arc<StrategyRegistry>,
    /// Process-wide worker identity, fixed at startup and stamped on every
    /// response.
    pub worker_id: String,
}

impl AppState {
    pub fn new(registry: Arc<StrategyRegistry>, worker_id: String) -> Self {
        Self {
            registry,
            worker_id,
        }
    }
}
