//! Fixed-output strategy for unrecognized models.

use async_trait::async_trait;

use super::{ClassifyStrategy, Prediction};

/// Stub backend: always returns the same pair, no side effects, never fails.
pub struct DefaultStrategy;

#[async_trait]
impl ClassifyStrategy for DefaultStrategy {
    async fn classify(&self, _text: &str) -> Prediction {
        Prediction {
            label: "POSITIVE".to_string(),
            score: 0.90,
        }
    }
}
