//! Test doubles for the dispatch-path tests.

mod memory_cache;

pub use memory_cache::{FailingCache, MemoryCache};
