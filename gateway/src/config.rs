use std::env;

/// Gateway configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host (default: 0.0.0.0)
    pub host: String,
    /// Server port (default: 8080)
    pub port: u16,
    /// Worker RPC address (default: 127.0.0.1:9090)
    pub worker_addr: String,
    /// Worker connect timeout in seconds (default: 5)
    pub worker_connect_timeout_secs: u64,
    /// Worker call timeout in seconds (default: 8)
    pub worker_call_timeout_secs: u64,
    /// Redis connection URL
    pub redis_url: String,
    /// Cache entry lifetime in seconds (default: 1800)
    pub cache_ttl_secs: u64,
    /// SQLite database path for the audit log
    pub database_url: String,
    /// Log level (default: info)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            worker_addr: env::var("WORKER_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:9090".to_string()),
            worker_connect_timeout_secs: parse_secs("WORKER_CONNECT_TIMEOUT_SECS", 5)?,
            worker_call_timeout_secs: parse_secs("WORKER_CALL_TIMEOUT_SECS", 8)?,
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            cache_ttl_secs: parse_secs("CACHE_TTL_SECS", 1800)?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:./data/audit.db".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn parse_secs(var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(var) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidDuration(var)),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("Invalid duration in {0}")]
    InvalidDuration(&'static str),
}
