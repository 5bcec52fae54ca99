use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};

use super::{AuditError, AuditRecord};

/// SQLite-backed audit sink.
pub struct AuditLogger {
    conn: Mutex<Connection>,
}

impl AuditLogger {
    pub fn new(database_url: &str) -> Result<Self, AuditError> {
        // Parse sqlite: prefix if present
        let path = database_url.strip_prefix("sqlite:").unwrap_or(database_url);

        // Create parent directories if needed
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent).map_err(|e| AuditError::IoError(e.to_string()))?;
        }

        let conn =
            Connection::open(path).map_err(|e| AuditError::DatabaseError(e.to_string()))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS inference_log (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                model TEXT NOT NULL,
                text_hash TEXT NOT NULL,
                label TEXT NOT NULL,
                score REAL NOT NULL,
                latency_ms INTEGER NOT NULL,
                cache_hit INTEGER NOT NULL,
                worker_id TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| AuditError::DatabaseError(e.to_string()))?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_inference_log_model ON inference_log(model)",
            [],
        )
        .map_err(|e| AuditError::DatabaseError(e.to_string()))?;

        tracing::info!("Audit logger initialized with database: {}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Append one row.
    pub fn record(&self, record: &AuditRecord) -> Result<(), AuditError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| AuditError::DatabaseError(e.to_string()))?;

        conn.execute(
            "INSERT INTO inference_log (model, text_hash, label, score, latency_ms, cache_hit, worker_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.model,
                record.text_hash,
                record.label,
                record.score,
                record.latency_ms as i64,
                record.cache_hit,
                record.worker_id,
            ],
        )
        .map_err(|e| AuditError::DatabaseError(e.to_string()))?;

        tracing::debug!("Audited request for model: {}", record.model);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(cache_hit: bool) -> AuditRecord {
        AuditRecord {
            model: "sentiment".to_string(),
            text_hash: "e1f2a3b4".to_string(),
            label: "POSITIVE".to_string(),
            score: 0.99,
            latency_ms: 12,
            cache_hit,
            worker_id: "worker-1f2e3d4c".to_string(),
        }
    }

    #[test]
    fn rows_accumulate() {
        let logger = AuditLogger::new(":memory:").unwrap();
        logger.record(&record(false)).unwrap();
        logger.record(&record(true)).unwrap();

        let conn = logger.conn.lock().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM inference_log", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);

        let hits: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM inference_log WHERE cache_hit = 1",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(hits, 1);
    }
}
