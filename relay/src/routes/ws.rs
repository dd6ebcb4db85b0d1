//! WebSocket handler — bidirectional envelope relay.
//!
//! DESIGN
//! ======
//! On upgrade, generates a client ID and enters a `select!` loop:
//! - Inbound client envelopes → decode, stamp sender, fan out to peers
//! - Envelopes from peers → forward to this client
//!
//! The relay never interprets board payloads: `draw`, `text`, `clear`, and
//! `sharedSelection` are forwarded identically. Decoding the envelope is the
//! only validation; a malformed message earns the sender an `error` envelope
//! and affects nothing else.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → send `connected` with `client_id`
//! 2. Register in roster → broadcast `peerJoined` to peers
//! 3. Relay loop until close or socket error
//! 4. Close → deregister → broadcast `peerLeft`

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use wire::{Envelope, Event};

use crate::roster;
use crate::state::AppState;

/// Capacity of each client's outbound queue. Fan-out drops past this.
const CLIENT_QUEUE: usize = 256;

// =============================================================================
// UPGRADE
// =============================================================================

pub async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state))
}

// =============================================================================
// CONNECTION
// =============================================================================

async fn run_ws(mut socket: WebSocket, state: AppState) {
    let client_id = Uuid::new_v4();

    // Per-connection channel for receiving envelopes relayed from peers.
    let (client_tx, mut client_rx) = mpsc::channel::<Envelope>(CLIENT_QUEUE);

    // Welcome the client with its id before it appears in the roster.
    let welcome = Envelope::new(Event::Connected { client_id });
    if send_envelope(&mut socket, &welcome).await.is_err() {
        return;
    }

    roster::join(&state, client_id, client_tx).await;
    roster::broadcast(&state, &Envelope::new(Event::PeerJoined { client_id }), Some(client_id)).await;
    info!(%client_id, "ws: client connected");

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(msg) = msg else { break };
                let Ok(msg) = msg else { break };
                match msg {
                    Message::Text(text) => {
                        let mut send_failed = false;
                        for reply in process_inbound_text(&state, client_id, &text).await {
                            if send_envelope(&mut socket, &reply).await.is_err() {
                                send_failed = true;
                                break;
                            }
                        }
                        if send_failed {
                            break;
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            Some(envelope) = client_rx.recv() => {
                if send_envelope(&mut socket, &envelope).await.is_err() {
                    break;
                }
            }
        }
    }

    roster::part(&state, client_id).await;
    roster::broadcast(&state, &Envelope::new(Event::PeerLeft { client_id }), Some(client_id)).await;
    info!(%client_id, "ws: client disconnected");
}

// =============================================================================
// INBOUND
// =============================================================================

/// Decode and relay one inbound text frame, returning any reply envelopes
/// for the sender.
///
/// This keeps the websocket transport concerns separate from relay logic,
/// so tests can exercise stamping, rejection, and fan-out end-to-end.
async fn process_inbound_text(state: &AppState, client_id: Uuid, text: &str) -> Vec<Envelope> {
    let mut envelope = match wire::decode(text) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(%client_id, error = %e, "ws: invalid inbound envelope");
            return vec![Envelope::new(Event::Error { message: e.to_string() })];
        }
    };

    // Clients may only originate board events; the session kinds are the
    // relay's to send.
    if !envelope.event.is_board_event() {
        warn!(%client_id, event = envelope.event.name(), "ws: rejected non-board event");
        return vec![Envelope::new(Event::Error {
            message: format!("clients may not send `{}` events", envelope.event.name()),
        })];
    }

    // Stamp the sender; whatever the client claimed is overwritten.
    envelope.from = Some(client_id);

    // Draw events arrive per pointer sample — too chatty to log one by one.
    if !matches!(envelope.event, Event::Draw(_)) {
        info!(%client_id, id = %envelope.id, event = envelope.event.name(), "ws: relay envelope");
    }

    roster::broadcast(state, &envelope, Some(client_id)).await;
    Vec::new()
}

// =============================================================================
// HELPERS
// =============================================================================

async fn send_envelope(socket: &mut WebSocket, envelope: &Envelope) -> Result<(), ()> {
    let json = match wire::encode(envelope) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "ws: failed to serialize envelope");
            return Err(());
        }
    };
    socket.send(Message::Text(json.into())).await.map_err(|_| ())
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;
