//! Transient-connection client for the worker's unary classify call.

use std::time::Duration;

use classify_common::{ClassifyResult, WorkerClassifyRequest, WorkerClassifyResponse};
use reqwest::Client;

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("worker transport error: {0}")]
    Transport(String),
    #[error("worker returned {0}: {1}")]
    Status(u16, String),
    #[error("invalid worker response: {0}")]
    InvalidResponse(String),
}

/// Issues one classify call per connection.
///
/// Each call builds its own plaintext transport and drops it on every exit
/// path. No pooling, no retries; a timeout is a failure like any other.
pub struct ClassifierClient {
    addr: String,
    connect_timeout: Duration,
    call_timeout: Duration,
}

impl ClassifierClient {
    pub fn new(addr: &str, connect_timeout: Duration, call_timeout: Duration) -> Self {
        Self {
            addr: addr.to_string(),
            connect_timeout,
            call_timeout,
        }
    }

    /// Dispatch one classification to the worker.
    pub async fn classify(&self, model: &str, text: &str) -> Result<ClassifyResult, WorkerError> {
        // Connection lives for exactly this call; keeping zero idle
        // connections makes the drop below tear it down.
        let client = Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.call_timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| WorkerError::Transport(e.to_string()))?;

        let url = format!("http://{}/rpc/classify", self.addr);
        let request = WorkerClassifyRequest {
            model: model.to_string(),
            input_text: text.to_string(),
        };

        let response = client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| WorkerError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(WorkerError::Status(status, body));
        }

        let reply: WorkerClassifyResponse = response
            .json()
            .await
            .map_err(|e| WorkerError::InvalidResponse(e.to_string()))?;

        Ok(ClassifyResult {
            label: reply.label,
            score: reply.score,
            worker_id: reply.worker_id,
        })
    }
}
