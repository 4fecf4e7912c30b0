//! ScuPlan deco planner - Rust/Axum service
//!
//! Serves decompression plans to the app backend over HTTP.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scuplan_deco::cache::PlanCache;
use scuplan_deco::config::Config;
use scuplan_deco::{deco, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scuplan_deco=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        "Default gradient factors {}/{}",
        config.default_gradient_factors.low,
        config.default_gradient_factors.high
    );

    let state = AppState {
        cache: PlanCache::new(config.cache_capacity, config.cache_ttl),
        config: Arc::new(config.clone()),
    };

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/health/cache", get(cache_stats))
        .nest("/api/deco", deco::router())
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "scuplan-deco"
    }))
}

/// Cache statistics endpoint
async fn cache_stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.cache.stats())
}
