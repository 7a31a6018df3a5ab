//! WebSocket transport for location updates and alert delivery.
//!
//! A client connects once per subject (`/api/v1/ws/location?subject=<id>`)
//! and uses the socket both ways:
//!
//! - frames sent by the client drive the same update pipeline as the HTTP
//!   endpoint (the two entry points are behaviorally identical),
//! - the server pushes that subject's HEAVY-zone alerts and periodic
//!   heartbeats.
//!
//! Alerts for other subjects are filtered out here; the broadcast channel
//! carries every alert and each session keeps only its own.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::node::NodeState;
use agora_journal::{now_ms, SubjectId};

/// Heartbeat cadence for idle connections.
const HEARTBEAT_INTERVAL: std::time::Duration = std::time::Duration::from_secs(15);

/// Frames the client may send.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientFrame {
    /// One location observation; same semantics as the HTTP update.
    LocationUpdate { lat: f64, lng: f64 },
}

/// Frames the server sends.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A warning addressed to this session's subject.
    Alert { message: String },
    /// An update this session submitted could not be persisted.
    UpdateFailed { message: String },
    /// Keep-alive with the server clock.
    Heartbeat { timestamp: u64 },
}

#[derive(Debug, Deserialize)]
pub(crate) struct WsQuery {
    subject: String,
}

/// WebSocket handler for per-subject location sessions.
pub async fn ws_location_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
    State(state): State<Arc<NodeState>>,
) -> impl IntoResponse {
    let subject = SubjectId::new(query.subject);
    ws.on_upgrade(move |socket| handle_location_socket(socket, state, subject))
}

/// Handle one subject's WebSocket session.
async fn handle_location_socket(
    mut socket: WebSocket,
    state: Arc<NodeState>,
    subject: SubjectId,
) {
    info!(subject = %subject, "WebSocket session connected");

    // Subscribe before processing anything so an alert triggered by this
    // session's own first update is not missed.
    let mut alerts_rx = state.alerts.subscribe();
    let mut interval = tokio::time::interval(HEARTBEAT_INTERVAL);

    loop {
        tokio::select! {
            // Client frames: ingestion path
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if let Err(e) = handle_client_frame(&state, &subject, &text, &mut socket).await {
                            warn!(subject = %subject, "failed to answer client frame: {}", e);
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!(subject = %subject, "WebSocket session disconnected");
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if let Err(e) = socket.send(Message::Pong(data)).await {
                            warn!("Failed to send pong: {}", e);
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        error!(subject = %subject, "WebSocket error: {}", e);
                        break;
                    }
                    _ => {}
                }
            }
            // Alert fan-out: deliver only this subject's warnings
            alert = alerts_rx.recv() => {
                match alert {
                    Ok(alert) if alert.subject_id == subject => {
                        let event = SessionEvent::Alert { message: alert.message };
                        if let Err(e) = send_event(&mut socket, event).await {
                            warn!(subject = %subject, "failed to deliver alert: {}", e);
                            break;
                        }
                    }
                    Ok(_) => {} // someone else's alert
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // Best-effort delivery: skipped alerts are gone.
                        warn!(subject = %subject, skipped, "alert stream lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            // Keep-alive
            _ = interval.tick() => {
                let event = SessionEvent::Heartbeat { timestamp: now_ms() };
                if let Err(e) = send_event(&mut socket, event).await {
                    debug!(subject = %subject, "heartbeat failed, closing: {}", e);
                    break;
                }
            }
        }
    }
}

/// Parse and apply one client frame.
async fn handle_client_frame(
    state: &Arc<NodeState>,
    subject: &SubjectId,
    text: &str,
    socket: &mut WebSocket,
) -> Result<(), axum::Error> {
    let frame: ClientFrame = match serde_json::from_str(text) {
        Ok(frame) => frame,
        Err(e) => {
            debug!(subject = %subject, "ignoring malformed frame: {}", e);
            return Ok(());
        }
    };

    match frame {
        ClientFrame::LocationUpdate { lat, lng } => {
            // Same pipeline as the HTTP entry point; the alert (if any)
            // arrives through the broadcast subscription, not inline.
            if let Err(e) = state.monitor.record_location(subject.clone(), lat, lng) {
                error!(subject = %subject, "location update failed: {}", e);
                let event = SessionEvent::UpdateFailed {
                    message: e.to_string(),
                };
                send_event(socket, event).await?;
            }
        }
    }

    Ok(())
}

/// Send a session event over the socket as JSON.
async fn send_event(socket: &mut WebSocket, event: SessionEvent) -> Result<(), axum::Error> {
    let json = serde_json::to_string(&event).map_err(|e| {
        axum::Error::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })?;
    socket.send(Message::Text(json)).await
}
