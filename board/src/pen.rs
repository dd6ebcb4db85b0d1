//! Pointer gesture state machine producing stroke segments.
//!
//! A stroke is approximated as a polyline: each pointer-move while the button
//! is held yields one straight [`Segment`] from the previous sampled position
//! to the current one, and the anchor advances. Rapid motion skips
//! intermediate positions — segments connect sampled points, not a
//! reconstructed curve. That is accepted behavior, not a defect.

#[cfg(test)]
#[path = "pen_test.rs"]
mod pen_test;

use wire::{Point, Segment};

/// The active gesture being tracked between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PenState {
    /// No gesture in progress; waiting for the next pointer-down.
    Idle,
    /// A stroke is in progress. `last` is the anchor the next segment
    /// starts from.
    Drawing { last: Point },
}

/// The freehand pen. Owns nothing but the current gesture state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    state: PenState,
}

impl Pen {
    #[must_use]
    pub fn new() -> Self {
        Self { state: PenState::Idle }
    }

    /// Whether a stroke is currently in progress.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, PenState::Drawing { .. })
    }

    /// Begin a stroke, anchoring at the pointer position.
    pub fn pointer_down(&mut self, at: Point) {
        self.state = PenState::Drawing { last: at };
    }

    /// Advance the stroke to a new pointer position.
    ///
    /// Returns the segment from the previous anchor to `to` and moves the
    /// anchor forward. Returns `None` when no stroke is in progress (a move
    /// without a prior down, or after up/leave).
    pub fn pointer_move(&mut self, to: Point) -> Option<Segment> {
        let PenState::Drawing { last } = self.state else {
            return None;
        };
        self.state = PenState::Drawing { last: to };
        Some(Segment::new(last, to))
    }

    /// End the stroke.
    pub fn pointer_up(&mut self) {
        self.state = PenState::Idle;
    }

    /// The pointer left the surface. Identical to pointer-up.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }
}

impl Default for Pen {
    fn default() -> Self {
        Self::new()
    }
}
