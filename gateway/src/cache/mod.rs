//! Result cache.
//!
//! The gateway treats the cache as a shared key-value store with per-entry
//! expiry enforced by the store itself. Lookups on absent or expired keys are
//! `None`; a store outage is an error the dispatcher degrades on rather than
//! failing the request. There is deliberately no get-or-compute operation:
//! concurrent misses on one key each dispatch upstream and each write back,
//! last writer wins.

mod key;
mod redis;

pub use key::{cache_key, derive_key, text_digest};
pub use redis::RedisCache;

use std::time::Duration;

use async_trait::async_trait;
use classify_common::ClassifyResult;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache store error: {0}")]
    Store(String),
    #[error("malformed cache entry: {0}")]
    MalformedEntry(String),
}

/// Get/set-with-expiry over the shared store.
#[async_trait]
pub trait ResultCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<ClassifyResult>, CacheError>;
    async fn set(
        &self,
        key: &str,
        result: &ClassifyResult,
        ttl: Duration,
    ) -> Result<(), CacheError>;
}

/// Encode a result as the `label|score|workerId` store value.
pub fn encode_entry(result: &ClassifyResult) -> String {
    format!("{}|{}|{}", result.label, result.score, result.worker_id)
}

/// Decode a `label|score|workerId` store value. Exactly three fields; the
/// worker id keeps any trailing pipes, matching the writer.
pub fn decode_entry(value: &str) -> Result<ClassifyResult, CacheError> {
    let mut parts = value.splitn(3, '|');
    let (Some(label), Some(score), Some(worker_id)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(CacheError::MalformedEntry(value.to_string()));
    };

    let score: f64 = score
        .parse()
        .map_err(|_| CacheError::MalformedEntry(value.to_string()))?;

    Ok(ClassifyResult {
        label: label.to_string(),
        score,
        worker_id: worker_id.to_string(),
    })
}
