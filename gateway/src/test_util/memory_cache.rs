//! In-memory `ResultCache` implementations with a controllable clock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use classify_common::ClassifyResult;

use crate::cache::{CacheError, ResultCache};

/// HashMap-backed cache with a manually advanced clock, so expiry can be
/// exercised without waiting out a real TTL.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (ClassifyResult, u64)>>,
    now_secs: AtomicU64,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the cache's clock forward.
    pub fn advance_secs(&self, secs: u64) {
        self.now_secs.fetch_add(secs, Ordering::SeqCst);
    }
}

#[async_trait]
impl ResultCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<ClassifyResult>, CacheError> {
        let now = self.now_secs.load(Ordering::SeqCst);
        let entries = self
            .entries
            .lock()
            .map_err(|e| CacheError::Store(e.to_string()))?;

        Ok(entries
            .get(key)
            .filter(|(_, expires_at)| *expires_at > now)
            .map(|(result, _)| result.clone()))
    }

    async fn set(
        &self,
        key: &str,
        result: &ClassifyResult,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let now = self.now_secs.load(Ordering::SeqCst);
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| CacheError::Store(e.to_string()))?;

        entries.insert(key.to_string(), (result.clone(), now + ttl.as_secs()));
        Ok(())
    }
}

/// Cache whose reads or writes always fail, for store-outage tests.
pub struct FailingCache {
    inner: MemoryCache,
    fail_reads: bool,
    fail_writes: bool,
}

impl FailingCache {
    /// Every read errors; writes still land.
    pub fn reads() -> Self {
        Self {
            inner: MemoryCache::new(),
            fail_reads: true,
            fail_writes: false,
        }
    }

    /// Every write errors; reads still work.
    pub fn writes() -> Self {
        Self {
            inner: MemoryCache::new(),
            fail_reads: false,
            fail_writes: true,
        }
    }
}

#[async_trait]
impl ResultCache for FailingCache {
    async fn get(&self, key: &str) -> Result<Option<ClassifyResult>, CacheError> {
        if self.fail_reads {
            return Err(CacheError::Store("simulated outage".to_string()));
        }
        self.inner.get(key).await
    }

    async fn set(
        &self,
        key: &str,
        result: &ClassifyResult,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        if self.fail_writes {
            return Err(CacheError::Store("simulated outage".to_string()));
        }
        self.inner.set(key, result, ttl).await
    }
}
