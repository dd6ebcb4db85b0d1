//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the one shared channel: every connected client's outbound sender,
//! keyed by client id. There is no per-room partitioning — all participants
//! share the single board — and no state beyond the live connections; the
//! relay holds no board content, so a client that joins late starts blank.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

use wire::Envelope;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — the client map is Arc-wrapped.
#[derive(Clone, Default)]
pub struct AppState {
    /// Connected clients: `client_id` -> sender for outgoing envelopes.
    pub clients: Arc<RwLock<HashMap<Uuid, mpsc::Sender<Envelope>>>>,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self { clients: Arc::new(RwLock::new(HashMap::new())) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
