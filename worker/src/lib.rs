//! Classify Worker - model dispatch behind a unary RPC surface.

pub mod api;
pub mod config;
pub mod model;
pub mod state;

pub use config::{Config, SentimentConfig};
pub use model::{
    ClassifyStrategy, DefaultStrategy, ModelKind, Prediction, SentimentStrategy, StrategyRegistry,
};
pub use state::AppState;
