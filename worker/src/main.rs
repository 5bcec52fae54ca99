//! Classify Worker - hosts model strategies behind the unary classify RPC.

use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use classify_worker::{api, AppState, Config, DefaultStrategy, SentimentStrategy, StrategyRegistry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;

    // Identity is fixed for the lifetime of the process.
    let worker_id = format!("worker-{:08x}", rand::random::<u32>());
    tracing::info!("Starting classify-worker as {}", worker_id);

    if config.sentiment.token.is_none() {
        tracing::warn!("no sentiment API token configured, sentiment requests will use the heuristic fallback");
    }

    // Register strategies
    let sentiment = SentimentStrategy::new(&config.sentiment)?;
    let registry = Arc::new(StrategyRegistry::new(
        Box::new(sentiment),
        Box::new(DefaultStrategy),
    ));

    let state = Arc::new(AppState::new(registry, worker_id));

    // Build router
    let app = api::router(state).layer(CorsLayer::permissive());

    // Start server
    let addr = format!("{}:{}", config.api.host, config.api.port);
    tracing::info!("RPC listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
