//! Model dispatch layer.
//!
//! Defines the `ClassifyStrategy` trait implemented by each model backend
//! and the closed registry that maps requested model names onto strategies.

mod default_model;
mod sentiment;

pub use default_model::DefaultStrategy;
pub use sentiment::SentimentStrategy;

use async_trait::async_trait;

/// Label and confidence produced by a strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub score: f64,
}

/// A model backend able to classify a piece of text.
///
/// Strategies resolve internally: a backend with an unreliable upstream is
/// expected to fall back rather than surface an error to the RPC layer.
#[async_trait]
pub trait ClassifyStrategy: Send + Sync {
    async fn classify(&self, text: &str) -> Prediction;
}

/// The finite set of model identifiers the worker recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Sentiment,
    /// Any model name the worker does not recognize.
    Unknown,
}

impl ModelKind {
    /// Case-insensitive match against the known identifiers.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("sentiment") {
            ModelKind::Sentiment
        } else {
            ModelKind::Unknown
        }
    }
}

/// Closed mapping from model kinds to strategies.
///
/// Adding a model means adding a `ModelKind` variant and registering its
/// strategy here; unrecognized names always land on the default arm.
pub struct StrategyRegistry {
    sentiment: Box<dyn ClassifyStrategy>,
    default: Box<dyn ClassifyStrategy>,
}

impl StrategyRegistry {
    pub fn new(sentiment: Box<dyn ClassifyStrategy>, default: Box<dyn ClassifyStrategy>) -> Self {
        Self { sentiment, default }
    }

    /// Resolve the strategy for a requested model name.
    pub fn resolve(&self, model: &str) -> &dyn ClassifyStrategy {
        match ModelKind::from_name(model) {
            ModelKind::Sentiment => self.sentiment.as_ref(),
            ModelKind::Unknown => self.default.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_kind_matches_case_insensitively() {
        assert_eq!(ModelKind::from_name("sentiment"), ModelKind::Sentiment);
        assert_eq!(ModelKind::from_name("SENTIMENT"), ModelKind::Sentiment);
        assert_eq!(ModelKind::from_name("Sentiment"), ModelKind::Sentiment);
        assert_eq!(ModelKind::from_name("spam"), ModelKind::Unknown);
        assert_eq!(ModelKind::from_name(""), ModelKind::Unknown);
    }
}
