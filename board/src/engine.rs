//! The board aggregate: one participant's complete interaction state.
//!
//! DESIGN
//! ======
//! Local input methods mutate state, render through the injected surface,
//! and return the [`Event`] the owner must broadcast (or `None` when the
//! input produced no shared effect). Remote events enter through [`Board::apply`],
//! which returns nothing — re-broadcast is impossible by construction, so a
//! relayed event can never echo back out of a receiving board.
//!
//! Mode gating lives here, not in the input primitives: the pen ignores
//! pointer input in text mode and the notes ignore edits in drawing mode,
//! while remote events apply regardless of the local mode (a peer drawing
//! while this participant is typing still lands on the surface).

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use wire::{Event, Point, Selection};

use crate::mode::Mode;
use crate::notes::Notes;
use crate::pen::Pen;
use crate::surface::Surface;

/// One participant's board.
#[derive(Debug)]
pub struct Board<S> {
    surface: S,
    pen: Pen,
    notes: Notes,
    mode: Mode,
}

impl<S: Surface> Board<S> {
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self { surface, pen: Pen::new(), notes: Notes::new(), mode: Mode::default() }
    }

    // =========================================================================
    // MODE
    // =========================================================================

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch interaction mode. Transforms no data and emits no traffic.
    /// Leaving drawing mode drops any in-progress gesture; the next
    /// pointer-down re-anchors.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode == Mode::Drawing && mode != Mode::Drawing {
            self.pen.pointer_up();
        }
        self.mode = mode;
    }

    // =========================================================================
    // POINTER INPUT (drawing surface)
    // =========================================================================

    /// Begin a stroke at the pointer position. Ignored outside drawing mode.
    pub fn pointer_down(&mut self, at: Point) {
        if self.mode != Mode::Drawing {
            return;
        }
        self.pen.pointer_down(at);
    }

    /// Advance the stroke. Renders the segment locally and returns it for
    /// broadcast. `None` when no stroke is in progress or mode is not drawing.
    pub fn pointer_move(&mut self, to: Point) -> Option<Event> {
        if self.mode != Mode::Drawing {
            return None;
        }
        let segment = self.pen.pointer_move(to)?;
        self.surface.stroke(&segment);
        Some(Event::Draw(segment))
    }

    /// End the stroke.
    pub fn pointer_up(&mut self) {
        self.pen.pointer_up();
    }

    /// The pointer left the surface. Identical to pointer-up.
    pub fn pointer_leave(&mut self) {
        self.pen.pointer_leave();
    }

    /// Wipe the local surface and signal peers to wipe theirs. Not gated on
    /// mode — the clear action is always available. There is no undo.
    pub fn clear(&mut self) -> Event {
        self.surface.clear();
        Event::Clear
    }

    // =========================================================================
    // TEXT INPUT (note surface)
    // =========================================================================

    /// Replace the text value with a local edit and return the full new value
    /// for broadcast. Ignored outside text mode.
    pub fn edit_text(&mut self, value: impl Into<String>) -> Option<Event> {
        if self.mode != Mode::Text {
            return None;
        }
        let value = value.into();
        self.notes.set_value(value.clone());
        Some(Event::Text(value))
    }

    /// Capture a selection over the current value and return it for
    /// broadcast. Ignored outside text mode; empty captures produce nothing.
    pub fn select_text(&mut self, start: usize, end: usize) -> Option<Event> {
        if self.mode != Mode::Text {
            return None;
        }
        self.notes.select(start, end).map(Event::SharedSelection)
    }

    #[must_use]
    pub fn text(&self) -> &str {
        self.notes.value()
    }

    #[must_use]
    pub fn shared_selection(&self) -> Option<&Selection> {
        self.notes.shared_selection()
    }

    // =========================================================================
    // REMOTE EVENTS
    // =========================================================================

    /// Apply an event received from a peer.
    ///
    /// Board events apply regardless of the local mode. Session events
    /// (`connected`, `peerJoined`, `peerLeft`, `error`) carry no board state
    /// and are ignored here; the owning session tracks them.
    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::Draw(segment) => self.surface.stroke(segment),
            Event::Text(value) => self.notes.apply_remote_value(value.clone()),
            Event::Clear => self.surface.clear(),
            Event::SharedSelection(selection) => {
                self.notes.apply_remote_selection(selection.clone());
            }
            Event::Connected { .. }
            | Event::PeerJoined { .. }
            | Event::PeerLeft { .. }
            | Event::Error { .. } => {}
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.pen.is_drawing()
    }
}
