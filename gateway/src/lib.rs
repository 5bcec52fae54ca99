//! Classify Gateway
//!
//! Serves classification requests by delegating to the worker over a unary
//! RPC call, memoizing results in a shared cache and recording every resolved
//! request in the audit log.

pub mod audit;
pub mod cache;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod routes;
pub mod rpc;
pub mod test_util;

pub use audit::{AuditError, AuditLogger, AuditRecord};
pub use cache::{derive_key, CacheError, RedisCache, ResultCache};
pub use config::Config;
pub use dispatch::{DispatchError, DispatchOutcome, Dispatcher};
pub use rpc::{ClassifierClient, WorkerError};

/// Shared application state.
pub struct AppState {
    pub dispatcher: Dispatcher,
}
