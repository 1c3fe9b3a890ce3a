//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::error;

use crate::db;
use crate::errors::IndexerError;
use crate::events::EventRecord;

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Log the underlying failure and hand the client an opaque 500.
fn internal_error(e: IndexerError) -> ApiError {
    error!("API query failed: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

// ─────────────────────────────────────────────────────────
// Request / response shapes
// ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct EventsQuery {
    pub limit: Option<i64>,
}

#[derive(Serialize)]
pub struct CampaignEventsResponse {
    pub campaign_id: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AllEventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /campaigns/:id/events`
///
/// Returns all indexed events for the given campaign identifier.
pub async fn get_campaign_events(
    State(state): State<Arc<ApiState>>,
    Path(campaign_id): Path<String>,
) -> Result<Json<CampaignEventsResponse>, ApiError> {
    let events = db::get_events_for_campaign(&state.pool, &campaign_id)
        .await
        .map_err(internal_error)?;

    Ok(Json(CampaignEventsResponse {
        campaign_id,
        count: events.len(),
        events,
    }))
}

/// `GET /events?limit=`
///
/// Returns indexed events across all campaigns, newest-ledger last.
pub async fn get_all_events(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<AllEventsResponse>, ApiError> {
    let events = db::get_all_events(&state.pool, query.limit)
        .await
        .map_err(internal_error)?;

    Ok(Json(AllEventsResponse {
        count: events.len(),
        events,
    }))
}
