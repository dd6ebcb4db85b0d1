//! Shared message envelope and event payloads for the realtime wire protocol.
//!
//! This crate owns the wire representation used by both `relay` and `client`.
//! Every message is an [`Envelope`]: identity and timing fields plus one
//! tagged [`Event`] variant. The tagged shape replaces the bare per-event
//! payloads of earlier iterations so new event kinds can be added without
//! ambiguous payload shapes, and so malformed messages fail at decode time
//! instead of at field access.
//!
//! Transport is JSON text frames. The relay forwards envelopes without
//! inspecting board payloads; only the `event` tag matters for routing.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;

// =============================================================================
// GEOMETRY
// =============================================================================

/// A position on the drawing surface, in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One straight line segment of a freehand stroke.
///
/// A stroke is a chain of these: each segment runs from the previous sampled
/// pointer position (`last_pos`) to the current one (`x`, `y`). Segments are
/// rendered and discarded; no stroke history exists anywhere in the system.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Where the segment starts — the previous pointer position.
    pub last_pos: Point,
    /// X of the segment end — the current pointer position.
    pub x: f64,
    /// Y of the segment end — the current pointer position.
    pub y: f64,
}

impl Segment {
    #[must_use]
    pub fn new(from: Point, to: Point) -> Self {
        Self { last_pos: from, x: to.x, y: to.y }
    }

    /// The segment end as a point.
    #[must_use]
    pub fn end(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

// =============================================================================
// SELECTION
// =============================================================================

/// Offsets of a selection within the shared text, plus the covered substring.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    /// Byte offset where the selection starts (inclusive).
    pub start: usize,
    /// Byte offset where the selection ends (exclusive).
    pub end: usize,
    /// The substring covered by `[start, end)` at capture time.
    pub text: String,
}

/// A display-only text selection broadcast to peers.
///
/// Receivers store and render it; it is never applied back into the text
/// value and never scopes future edits. The offsets describe the sender's
/// value at capture time and must not be used to index another client's copy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub selected_text: String,
    pub range: SelectionRange,
}

// =============================================================================
// EVENTS
// =============================================================================

/// The tagged event union — one variant per message kind on the wire.
///
/// The first four variants are board events: clients originate them and the
/// relay fans each out to every other client. The rest are session events
/// originated by the relay itself; a client attempting to send one is
/// rejected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum Event {
    /// One line segment to render.
    Draw(Segment),
    /// Full replacement of the shared text value. Last write wins.
    Text(String),
    /// Wipe the drawing surface.
    Clear,
    /// Display-only selection broadcast.
    SharedSelection(Selection),
    /// Welcome sent to a client on upgrade, assigning its id.
    #[serde(rename_all = "camelCase")]
    Connected { client_id: Uuid },
    /// A participant connected to the relay.
    #[serde(rename_all = "camelCase")]
    PeerJoined { client_id: Uuid },
    /// A participant disconnected from the relay.
    #[serde(rename_all = "camelCase")]
    PeerLeft { client_id: Uuid },
    /// The relay rejected an inbound envelope.
    Error { message: String },
}

impl Event {
    /// The wire tag of this event, for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Draw(_) => "draw",
            Self::Text(_) => "text",
            Self::Clear => "clear",
            Self::SharedSelection(_) => "sharedSelection",
            Self::Connected { .. } => "connected",
            Self::PeerJoined { .. } => "peerJoined",
            Self::PeerLeft { .. } => "peerLeft",
            Self::Error { .. } => "error",
        }
    }

    /// Whether this event is a board event clients may originate.
    #[must_use]
    pub fn is_board_event(&self) -> bool {
        matches!(self, Self::Draw(_) | Self::Text(_) | Self::Clear | Self::SharedSelection(_))
    }
}

// =============================================================================
// ENVELOPE
// =============================================================================

/// A single message on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Unique identifier for this message.
    pub id: Uuid,
    /// Milliseconds since the Unix epoch when the envelope was created.
    pub ts: i64,
    /// Sender's client id. Stamped by the relay; clients leave it unset.
    pub from: Option<Uuid>,
    /// The event payload.
    #[serde(flatten)]
    pub event: Event,
}

/// Current time as milliseconds since Unix epoch.
fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

impl Envelope {
    /// Wrap an event in a fresh envelope.
    #[must_use]
    pub fn new(event: Event) -> Self {
        Self { id: Uuid::new_v4(), ts: now_ms(), from: None, event }
    }

    #[must_use]
    pub fn with_from(mut self, from: Uuid) -> Self {
        self.from = Some(from);
        self
    }
}

// =============================================================================
// CODEC
// =============================================================================

/// Error returned by [`encode`] and [`decode`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The envelope could not be serialized to JSON.
    #[error("failed to encode envelope: {0}")]
    Encode(#[source] serde_json::Error),
    /// The text could not be decoded as an envelope. Covers malformed JSON,
    /// unknown event tags, and payloads missing required fields.
    #[error("failed to decode envelope: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Encode an envelope into a JSON text frame.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails.
pub fn encode(envelope: &Envelope) -> Result<String, CodecError> {
    serde_json::to_string(envelope).map_err(CodecError::Encode)
}

/// Decode a JSON text frame into an envelope.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed input. Unknown event tags and
/// missing payload fields are decode errors, never defaulted.
pub fn decode(text: &str) -> Result<Envelope, CodecError> {
    serde_json::from_str(text).map_err(CodecError::Decode)
}
