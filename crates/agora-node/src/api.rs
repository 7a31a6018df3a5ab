//! HTTP API for the Agora node.

use crate::node::NodeState;
use crate::ws::ws_location_handler;
use agora_journal::{now_ms, LocationReport};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

type AppState = Arc<NodeState>;

/// Window for the crowd history projection.
const HISTORY_WINDOW: Duration = Duration::from_secs(60 * 60);

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    // CORS layer for browser access
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(health))
        .route("/ready", get(ready))
        // Location ingestion + active-set projection
        .route("/api/v1/location/update", post(update_location))
        .route("/api/v1/location/active", get(active_users))
        // Broader read-only history projection
        .route("/api/v1/crowd/history", get(crowd_history))
        // WebSocket: push-style ingestion and per-subject alert delivery
        .route("/api/v1/ws/location", get(ws_location_handler))
        .layer(cors)
        .with_state(state)
}

// --- Health endpoints ---

async fn health() -> &'static str {
    "OK"
}

async fn ready() -> &'static str {
    "OK"
}

// --- Location endpoints ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LocationUpdateRequest {
    pub subject_id: String,
    pub lat: f64,
    pub lng: f64,
}

async fn update_location(
    State(state): State<AppState>,
    Json(req): Json<LocationUpdateRequest>,
) -> Result<&'static str, StatusCode> {
    // Density and zone stay internal; the transport contract is only
    // "update succeeded". The HEAVY-zone alert rides the dispatch channel.
    state
        .monitor
        .record_location(req.subject_id.into(), req.lat, req.lng)
        .map_err(|e| {
            tracing::error!("location update failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok("Location updated")
}

async fn active_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<LocationReport>>, StatusCode> {
    let reports = state.monitor.active_reports().map_err(|e| {
        tracing::error!("active-set query failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(reports))
}

async fn crowd_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<LocationReport>>, StatusCode> {
    let cutoff = now_ms().saturating_sub(HISTORY_WINDOW.as_millis() as u64);
    let reports = state.storage.list_reports_newer_than(cutoff).map_err(|e| {
        tracing::error!("history query failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(reports))
}
