//! Classify Gateway - cache-aside dispatch of classification requests.

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use classify_gateway::{
    logging, routes, AppState, AuditLogger, ClassifierClient, Config, Dispatcher, RedisCache,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting classify-gateway");

    // Initialize components
    let cache = Arc::new(RedisCache::new(&config.redis_url)?);
    let client = ClassifierClient::new(
        &config.worker_addr,
        Duration::from_secs(config.worker_connect_timeout_secs),
        Duration::from_secs(config.worker_call_timeout_secs),
    );
    let audit_logger = Arc::new(AuditLogger::new(&config.database_url)?);

    let dispatcher = Dispatcher::new(
        cache,
        client,
        audit_logger,
        Duration::from_secs(config.cache_ttl_secs),
    );
    tracing::info!("Dispatching to worker at {}", config.worker_addr);

    let state = Arc::new(AppState { dispatcher });

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .merge(routes::health::router())
        .merge(routes::classify::router(state))
        .layer(middleware::from_fn(logging::request_logger))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
