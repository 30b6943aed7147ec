// SPDX-License-Identifier: GPL-3.0-only

//! Interfaces to the host application.
//!
//! The keyboard never owns the text being edited. It issues insert and
//! delete calls on a [`TextDocumentProxy`] and asks the host to switch input
//! modes through [`KeyboardHost`]. Visual and audio feedback hooks default to
//! no-ops so a host only implements what it renders.

use crate::input::InputState;
use crate::layout::LayoutVariant;

/// The text document the keyboard types into.
pub trait TextDocumentProxy {
    fn insert_text(&mut self, text: &str);

    fn delete_backward(&mut self);

    /// Text before the cursor, if the host can provide it.
    fn document_context_before_input(&self) -> Option<String>;
}

/// Everything the keyboard needs from its host.
pub trait KeyboardHost: TextDocumentProxy {
    /// Switches to the next system keyboard (the globe key).
    fn advance_to_next_input_mode(&mut self);

    /// A finger went down on the keyboard.
    fn play_input_click(&mut self) {}

    /// Pop up the key under the finger.
    fn highlight_key(&mut self, _identifier: &str) {}

    /// Caps or caps lock changed; redraw labels and the shift key.
    fn caps_changed(&mut self, _state: &InputState) {}

    /// Another variant is now showing.
    fn layout_changed(&mut self, _variant: LayoutVariant) {}
}

/// An in-memory document host, used by the replay tool and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDocument {
    text: String,
    input_mode_switches: usize,
    clicks: usize,
    highlighted: Vec<String>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `text` before the cursor.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// How many times the globe key handed off to another keyboard.
    pub fn input_mode_switches(&self) -> usize {
        self.input_mode_switches
    }

    pub fn clicks(&self) -> usize {
        self.clicks
    }

    /// Keys highlighted so far, oldest first.
    pub fn highlighted(&self) -> &[String] {
        &self.highlighted
    }
}

impl TextDocumentProxy for MemoryDocument {
    fn insert_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn delete_backward(&mut self) {
        self.text.pop();
    }

    fn document_context_before_input(&self) -> Option<String> {
        if self.text.is_empty() {
            None
        } else {
            Some(self.text.clone())
        }
    }
}

impl KeyboardHost for MemoryDocument {
    fn advance_to_next_input_mode(&mut self) {
        self.input_mode_switches += 1;
    }

    fn play_input_click(&mut self) {
        self.clicks += 1;
    }

    fn highlight_key(&mut self, identifier: &str) {
        self.highlighted.push(identifier.to_string());
    }
}

// ============================================================================
// Tests
// ============================================================================
