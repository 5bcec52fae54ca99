//! Classification domain and wire types.

use serde::{Deserialize, Serialize};

/// Inbound classification request at the gateway HTTP boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub model: String,
    pub text: String,
}

/// A resolved classification.
///
/// Produced once per request, either from the cache or from the worker,
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyResult {
    pub label: String,
    pub score: f64,
    pub worker_id: String,
}

/// Payload of the unary classify call on the gateway -> worker boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerClassifyRequest {
    pub model: String,
    pub input_text: String,
}

/// Worker reply to a classify call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerClassifyResponse {
    pub label: String,
    pub score: f64,
    pub worker_id: String,
    /// Worker-side timing; the gateway measures its own latency.
    #[serde(default)]
    pub latency_ms: Option<u64>,
}
