//! Headless board core for the shared sketch-and-notes surface.
//!
//! This crate owns the full lifecycle of one participant's board: translating
//! pointer input into stroke segments, holding the shared text value and its
//! display-only selection, and applying events received from peers. It is
//! deliberately free of any transport or rendering dependency — rendering
//! backends plug in behind [`surface::Surface`], and the owning session wires
//! the returned [`wire::Event`]s to whatever channel it uses.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | The [`engine::Board`] aggregate tying everything together |
//! | [`pen`] | Pointer gesture state machine producing stroke segments |
//! | [`notes`] | Shared text value and display-only selection |
//! | [`mode`] | The two-state interaction mode toggle |
//! | [`surface`] | Rendering seam and the headless null backend |

pub mod engine;
pub mod mode;
pub mod notes;
pub mod pen;
pub mod surface;
