//! Crowdfund event indexer — entry point.
//!
//! Runs two halves off one SQLite pool: a background task that polls
//! Soroban `getEvents` for crowdfund contract events and persists them,
//! and an Axum REST API serving the stored events to frontends.

mod api;
mod config;
mod db;
mod errors;
mod events;
mod indexer;
mod rpc;

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::ApiState;
use config::Config;
use indexer::IndexerState;

fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/events", get(api::get_all_events))
        .route("/campaigns/:id/events", get(api::get_campaign_events))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG controls verbosity; .env is optional.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let _ = dotenvy::dotenv();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("{e}"))?;
    let pool = db::init_pool(&config.database_url).await?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;

    tokio::spawn(indexer::run(Arc::new(IndexerState {
        pool: pool.clone(),
        config: config.clone(),
        client,
    })));

    let addr = format!("0.0.0.0:{}", config.api_port);
    info!("API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(Arc::new(ApiState { pool }))).await?;

    Ok(())
}
