//! Launchpad event indexer.
//!
//! A background task polls Soroban `getEvents` for the launchpad contract and
//! stores decoded pool events in SQLite. An Axum API serves them back, per
//! pool, per contributor, and as folded pool summaries.

mod api;
mod config;
mod db;
mod errors;
mod events;
mod indexer;
mod rpc;
mod summary;

use std::sync::Arc;

use axum::{routing::get, Router};
use reqwest::Client;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use indexer::IndexerState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    let pool = db::init_pool(&config.database_url).await?;

    let client = Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    tokio::spawn(indexer::run(Arc::new(IndexerState {
        pool: pool.clone(),
        config: config.clone(),
        client,
    })));

    let app = router(Arc::new(api::ApiState { pool }));

    let addr = format!("0.0.0.0:{}", config.api_port);
    info!("API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<api::ApiState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/events", get(api::get_all_events))
        .route("/pools/:id/events", get(api::get_pool_events))
        .route("/pools/:id/summary", get(api::get_pool_summary))
        .route("/contributors/:address/events", get(api::get_contributor_events))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
