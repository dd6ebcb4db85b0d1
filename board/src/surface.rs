//! Rendering seam between the board core and its display backend.
//!
//! The core never touches pixels. Whatever renders — a canvas context behind
//! WASM bindings, a terminal, a test recorder — implements [`Surface`] and is
//! injected into [`crate::engine::Board`]. The surface is a raster
//! accumulation: segments are stroked and forgotten, so a backend that joins
//! late starts blank with no backfill.

use wire::Segment;

/// A drawing surface the board strokes onto.
pub trait Surface {
    /// Render one line segment.
    fn stroke(&mut self, segment: &Segment);

    /// Wipe the surface. Wiping an already-empty surface is a no-op.
    fn clear(&mut self);
}

/// Headless backend that discards everything. Used by participants with no
/// display, such as the CLI's send-only commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn stroke(&mut self, _segment: &Segment) {}

    fn clear(&mut self) {}
}
