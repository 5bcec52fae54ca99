//! Audit log: one append-only row per resolved request.

mod sqlite;

pub use sqlite::AuditLogger;

/// The seven fields persisted for every resolved request. Rows are
/// write-once; nothing in the gateway reads them back.
#[derive(Debug, Clone)]
pub struct AuditRecord {
    pub model: String,
    pub text_hash: String,
    pub label: String,
    pub score: f64,
    pub latency_ms: u64,
    pub cache_hit: bool,
    pub worker_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("IO error: {0}")]
    IoError(String),
}
