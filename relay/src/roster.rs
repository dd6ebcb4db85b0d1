//! Roster service — join/part bookkeeping and envelope fan-out.
//!
//! DESIGN
//! ======
//! The roster is the relay's only mutable state: which clients are connected
//! and how to reach each one. Fan-out is best-effort fire-and-forget; there
//! is no acknowledgement, no delivery guarantee, and no retry. A slow
//! client whose channel is full simply misses that envelope.

#[cfg(test)]
#[path = "roster_test.rs"]
mod roster_test;

use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use wire::Envelope;

use crate::state::AppState;

/// Register a client's outbound sender.
pub async fn join(state: &AppState, client_id: Uuid, tx: mpsc::Sender<Envelope>) {
    let mut clients = state.clients.write().await;
    clients.insert(client_id, tx);
    info!(%client_id, clients = clients.len(), "client joined");
}

/// Remove a client. Safe to call for an unknown id.
pub async fn part(state: &AppState, client_id: Uuid) {
    let mut clients = state.clients.write().await;
    clients.remove(&client_id);
    info!(%client_id, remaining = clients.len(), "client left");
}

/// Broadcast an envelope to every connected client, optionally excluding one.
///
/// The exclusion implements the no-echo convention: a sender never receives
/// its own board event back.
pub async fn broadcast(state: &AppState, envelope: &Envelope, exclude: Option<Uuid>) {
    let clients = state.clients.read().await;
    for (client_id, tx) in clients.iter() {
        if exclude == Some(*client_id) {
            continue;
        }
        // Best-effort: if a client's channel is full, skip it.
        if tx.try_send(envelope.clone()).is_err() {
            warn!(%client_id, event = envelope.event.name(), "dropping envelope for slow client");
        }
    }
}
