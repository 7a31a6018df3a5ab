//! Alert dispatch - the notification collaborator.
//!
//! The density engine must never block or fail on a slow alert channel, so
//! delivery is split in two:
//!
//! 1. [`AlertHandle`] is the engine-facing [`AlertSink`]: a non-blocking
//!    send into an unbounded intake channel. It cannot fail the update path.
//! 2. A dispatch task drains the intake and fans each alert out on a
//!    broadcast channel that WebSocket sessions subscribe to. No subscriber,
//!    a lagging subscriber, or a closed session just means the alert goes
//!    undelivered - it is best-effort by contract.

use agora_density::AlertSink;
use agora_journal::SubjectId;
use serde::Serialize;
use tokio::sync::{broadcast, mpsc};

/// A warning addressed to one subject.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Who the warning is for.
    pub subject_id: SubjectId,
    /// Human-readable warning text.
    pub message: String,
}

/// Engine-facing sink: non-blocking handoff into the dispatch task.
#[derive(Clone)]
pub struct AlertHandle {
    intake_tx: mpsc::UnboundedSender<Alert>,
}

impl AlertSink for AlertHandle {
    fn notify(&self, subject: &SubjectId, message: &str) {
        let alert = Alert {
            subject_id: subject.clone(),
            message: message.to_string(),
        };
        if self.intake_tx.send(alert).is_err() {
            // Dispatch task gone (shutdown); the warning is droppable.
            tracing::warn!(subject = %subject, "alert channel closed, dropping warning");
        }
    }
}

/// Background dispatcher between the engine and WebSocket sessions.
pub struct AlertDispatcher;

impl AlertDispatcher {
    /// Channel capacity for the subscriber-facing broadcast.
    const FANOUT_CAPACITY: usize = 1024;

    /// Spawn the dispatch task.
    ///
    /// Returns the engine-facing handle and the broadcast sender sessions
    /// subscribe on.
    pub fn start() -> (AlertHandle, broadcast::Sender<Alert>) {
        let (intake_tx, mut intake_rx) = mpsc::unbounded_channel::<Alert>();
        let (fanout_tx, _) = broadcast::channel(Self::FANOUT_CAPACITY);

        let fanout = fanout_tx.clone();
        tokio::spawn(async move {
            while let Some(alert) = intake_rx.recv().await {
                tracing::info!(subject = %alert.subject_id, "dispatching crowd alert");
                // send() errs when nobody is subscribed; that is fine.
                let _ = fanout.send(alert);
            }
            tracing::debug!("alert intake closed, dispatcher exiting");
        });

        (AlertHandle { intake_tx }, fanout_tx)
    }
}
