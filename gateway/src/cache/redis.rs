//! Redis-backed result cache.

use std::time::Duration;

use async_trait::async_trait;
use classify_common::ClassifyResult;
use redis::AsyncCommands;

use super::{decode_entry, encode_entry, CacheError, ResultCache};

/// Cache entries live in Redis under the raw derived key; expiry is enforced
/// by the store itself via `SET ... EX`.
pub struct RedisCache {
    client: redis::Client,
}

impl RedisCache {
    pub fn new(url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(url)
            .map_err(|e| CacheError::Store(format!("invalid Redis URL: {e}")))?;
        Ok(Self { client })
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, CacheError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| CacheError::Store(format!("Redis connect error: {e}")))
    }
}

#[async_trait]
impl ResultCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<ClassifyResult>, CacheError> {
        let mut con = self.connection().await?;

        let raw: Option<String> = con
            .get(key)
            .await
            .map_err(|e| CacheError::Store(format!("Redis GET error: {e}")))?;

        raw.map(|value| decode_entry(&value)).transpose()
    }

    async fn set(
        &self,
        key: &str,
        result: &ClassifyResult,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let mut con = self.connection().await?;

        con.set_ex::<_, _, ()>(key, encode_entry(result), ttl.as_secs())
            .await
            .map_err(|e| CacheError::Store(format!("Redis SET error: {e}")))?;

        Ok(())
    }
}
