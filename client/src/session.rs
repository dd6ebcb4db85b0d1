//! A board wired to a relay client.
//!
//! `BoardSession` is the participant glue: local input goes through the
//! board, and whatever event the board hands back is forwarded to the relay.
//! Inbound envelopes route board events into the board and keep the session
//! bookkeeping — assigned client id, live peers — out of it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::HashSet;

use tracing::warn;
use uuid::Uuid;

use board::engine::Board;
use board::mode::Mode;
use board::surface::Surface;
use wire::{Envelope, Event, Point, Selection};

use crate::net::RelayClient;

/// One participant: a board plus its relay connection.
pub struct BoardSession<S> {
    board: Board<S>,
    client: RelayClient,
    client_id: Option<Uuid>,
    peers: HashSet<Uuid>,
}

impl<S: Surface> BoardSession<S> {
    #[must_use]
    pub fn new(surface: S, client: RelayClient) -> Self {
        Self { board: Board::new(surface), client, client_id: None, peers: HashSet::new() }
    }

    /// The id the relay assigned, once `connected` has arrived.
    #[must_use]
    pub fn client_id(&self) -> Option<Uuid> {
        self.client_id
    }

    /// Peers currently connected, as observed from join/part notices.
    #[must_use]
    pub fn peers(&self) -> &HashSet<Uuid> {
        &self.peers
    }

    #[must_use]
    pub fn board(&self) -> &Board<S> {
        &self.board
    }

    // =========================================================================
    // LOCAL INPUT
    // =========================================================================

    pub fn set_mode(&mut self, mode: Mode) {
        self.board.set_mode(mode);
    }

    pub fn pointer_down(&mut self, at: Point) {
        self.board.pointer_down(at);
    }

    pub fn pointer_move(&mut self, to: Point) {
        if let Some(event) = self.board.pointer_move(to) {
            self.client.send(event);
        }
    }

    pub fn pointer_up(&mut self) {
        self.board.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.board.pointer_leave();
    }

    pub fn clear(&mut self) {
        let event = self.board.clear();
        self.client.send(event);
    }

    pub fn edit_text(&mut self, value: impl Into<String>) {
        if let Some(event) = self.board.edit_text(value) {
            self.client.send(event);
        }
    }

    pub fn select_text(&mut self, start: usize, end: usize) {
        if let Some(event) = self.board.select_text(start, end) {
            self.client.send(event);
        }
    }

    // =========================================================================
    // INBOUND
    // =========================================================================

    /// Route one relayed envelope: session events update the bookkeeping,
    /// board events land on the board. Nothing is ever sent back from here.
    pub fn apply_inbound(&mut self, envelope: &Envelope) {
        match &envelope.event {
            Event::Connected { client_id } => self.client_id = Some(*client_id),
            Event::PeerJoined { client_id } => {
                self.peers.insert(*client_id);
            }
            Event::PeerLeft { client_id } => {
                self.peers.remove(client_id);
            }
            Event::Error { message } => warn!(%message, "relay rejected an envelope"),
            event => self.board.apply(event),
        }
    }

    // =========================================================================
    // ACCESSORS / LIFECYCLE
    // =========================================================================

    #[must_use]
    pub fn text(&self) -> &str {
        self.board.text()
    }

    #[must_use]
    pub fn shared_selection(&self) -> Option<&Selection> {
        self.board.shared_selection()
    }

    /// Shut the connection down cleanly.
    pub async fn close(self) {
        self.client.close().await;
    }
}
