//! Shared text value and display-only selection.
//!
//! The text value is a single string, wholesale-replaced on every edit — no
//! per-character diffing, no merge. Concurrent edits from two participants
//! race and the later arrival silently wins. The selection is a captured
//! substring plus its offsets, broadcast for read-only highlighting by peers;
//! it is never applied back into the text value.

#[cfg(test)]
#[path = "notes_test.rs"]
mod notes_test;

use wire::{Selection, SelectionRange};

/// One participant's view of the shared note.
#[derive(Debug, Clone, Default)]
pub struct Notes {
    value: String,
    shared_selection: Option<Selection>,
}

impl Notes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current text value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The most recent selection, local or remote, if any.
    #[must_use]
    pub fn shared_selection(&self) -> Option<&Selection> {
        self.shared_selection.as_ref()
    }

    /// Replace the value with a local edit.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Replace the value with a remote edit. Unconditional: last write wins.
    pub fn apply_remote_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Capture a local selection over the current value.
    ///
    /// Offsets are clamped to the value's bounds and backed off to char
    /// boundaries. Returns `None` for an empty capture — empty selections are
    /// not stored or broadcast. The text value itself is never touched.
    pub fn select(&mut self, start: usize, end: usize) -> Option<Selection> {
        let start = floor_char_boundary(&self.value, start.min(self.value.len()));
        let end = floor_char_boundary(&self.value, end.min(self.value.len()));
        if start >= end {
            return None;
        }

        let text = self.value[start..end].to_owned();
        let selection = Selection {
            selected_text: text.clone(),
            range: SelectionRange { start, end, text },
        };
        self.shared_selection = Some(selection.clone());
        Some(selection)
    }

    /// Store a peer's selection for display. The offsets describe the peer's
    /// value at capture time; they are never used to index the local value.
    pub fn apply_remote_selection(&mut self, selection: Selection) {
        self.shared_selection = Some(selection);
    }
}

/// Largest index `<= at` that lies on a char boundary of `s`.
fn floor_char_boundary(s: &str, at: usize) -> usize {
    let mut index = at;
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}
