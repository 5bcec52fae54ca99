//! Cache-aside dispatch: the per-request path from key derivation through
//! cache lookup, worker call, write-back, and audit.

use std::sync::Arc;
use std::time::{Duration, Instant};

use classify_common::ClassifyResult;

use crate::audit::{AuditLogger, AuditRecord};
use crate::cache::{cache_key, text_digest, ResultCache};
use crate::rpc::{ClassifierClient, WorkerError};

/// Outcome of one resolved request.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub result: ClassifyResult,
    pub latency_ms: u64,
    pub cache_hit: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("worker dispatch failed: {0}")]
    Worker(#[from] WorkerError),
}

/// Orchestrates one request: derive key, check cache, dispatch on miss,
/// write back, audit.
///
/// Concurrent requests for the same key are not serialized: each miss
/// dispatches to the worker on its own and each writes the cache, last
/// writer wins.
pub struct Dispatcher {
    cache: Arc<dyn ResultCache>,
    client: ClassifierClient,
    audit: Arc<AuditLogger>,
    cache_ttl: Duration,
}

impl Dispatcher {
    pub fn new(
        cache: Arc<dyn ResultCache>,
        client: ClassifierClient,
        audit: Arc<AuditLogger>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            cache,
            client,
            audit,
            cache_ttl,
        }
    }

    pub async fn dispatch(
        &self,
        model: &str,
        text: &str,
    ) -> Result<DispatchOutcome, DispatchError> {
        let start = Instant::now();

        let text_hash = text_digest(text);
        let key = cache_key(model, &text_hash);

        // A store outage or a corrupt entry degrades to a miss; the cache is
        // never allowed to fail a request.
        let cached = match self.cache.get(&key).await {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("cache read failed, treating as miss: {}", e);
                None
            }
        };

        if let Some(result) = cached {
            let latency_ms = start.elapsed().as_millis() as u64;
            self.record(model, &text_hash, &result, latency_ms, true);
            return Ok(DispatchOutcome {
                result,
                latency_ms,
                cache_hit: true,
            });
        }

        // Miss: the worker call is the only failure that surfaces. A failed
        // call leaves no cache entry and no audit row.
        let result = self.client.classify(model, text).await?;

        // The response is already computed; a failed write-back only costs a
        // redundant dispatch later.
        if let Err(e) = self.cache.set(&key, &result, self.cache_ttl).await {
            tracing::warn!("cache write failed: {}", e);
        }

        let latency_ms = start.elapsed().as_millis() as u64;
        self.record(model, &text_hash, &result, latency_ms, false);
        Ok(DispatchOutcome {
            result,
            latency_ms,
            cache_hit: false,
        })
    }

    /// Fire-and-forget audit insert: a failure is logged, never surfaced.
    fn record(
        &self,
        model: &str,
        text_hash: &str,
        result: &ClassifyResult,
        latency_ms: u64,
        cache_hit: bool,
    ) {
        let record = AuditRecord {
            model: model.to_string(),
            text_hash: text_hash.to_string(),
            label: result.label.clone(),
            score: result.score,
            latency_ms,
            cache_hit,
            worker_id: result.worker_id.clone(),
        };

        if let Err(e) = self.audit.record(&record) {
            tracing::warn!("audit insert failed: {}", e);
        }
    }
}
