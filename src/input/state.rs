// SPDX-License-Identifier: GPL-3.0-only

//! Input state machine: caps, caps lock, and the active layout variant.
//!
//! The machine turns resolved key identifiers plus tap counts into
//! [`EditCommand`]s for the host text document. It never fails and never
//! touches the document itself; the only document read it needs (the text
//! before the cursor, for word deletion) is passed in by the caller.
//!
//! # Caps Behaviour
//!
//! - **Shift tap**: toggles caps for the next character and clears caps lock.
//! - **Shift double tap**: toggles caps lock; caps follows the lock.
//! - **Character**: inserted upper- or lowercase; with caps on and lock off,
//!   caps turns off afterwards (shift-once).

use crate::layout::LayoutVariant;

// ============================================================================
// Key Actions
// ============================================================================

/// What a key identifier does when tapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Shift,
    /// Hands off to the next system input mode
    Globe,
    Backspace,
    Return,
    Space,
    /// One of "ABC", "123", "#+="
    SwitchLayout(LayoutVariant),
    /// Any other identifier is text to insert
    Character(String),
}

impl KeyAction {
    /// Maps a key identifier to its action.
    ///
    /// Returns `None` for the empty identifier, which never inserts anything.
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        let action = match identifier {
            "" => return None,
            "shift" => Self::Shift,
            "globus" => Self::Globe,
            "backspace" => Self::Backspace,
            "return" => Self::Return,
            "space" => Self::Space,
            "ABC" => Self::SwitchLayout(LayoutVariant::Letters),
            "123" => Self::SwitchLayout(LayoutVariant::Digits),
            "#+=" => Self::SwitchLayout(LayoutVariant::Symbols),
            text => Self::Character(text.to_string()),
        };
        Some(action)
    }

    /// Returns `true` for keys that should not pop up when touched.
    pub fn is_function_key(identifier: &str) -> bool {
        matches!(
            identifier.to_lowercase().as_str(),
            "abc" | "123" | "#+=" | "shift" | "globus" | "backspace"
        )
    }
}

/// A side effect for the host text document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    InsertText(String),
    /// Delete this many characters before the cursor
    DeleteBackward(usize),
    /// Switch to the next keyboard (the globe key)
    AdvanceInputMode,
}

// ============================================================================
// Input State
// ============================================================================

/// What the shift key should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftIndicator {
    Lowercase,
    Uppercase,
    Locked,
}

/// Caps and layout state of one keyboard session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputState {
    pub active_layout: LayoutVariant,
    pub caps_on: bool,
    pub caps_lock_on: bool,
}

impl Default for InputState {
    /// Letters with the first character capitalised.
    fn default() -> Self {
        Self {
            active_layout: LayoutVariant::Letters,
            caps_on: true,
            caps_lock_on: false,
        }
    }
}

impl InputState {
    /// Returns `true` when key labels are shown uppercased.
    pub fn is_uppercase(&self) -> bool {
        self.caps_lock_on || self.caps_on
    }

    pub fn shift_indicator(&self) -> ShiftIndicator {
        if self.caps_lock_on {
            ShiftIndicator::Locked
        } else if self.caps_on {
            ShiftIndicator::Uppercase
        } else {
            ShiftIndicator::Lowercase
        }
    }

    /// Label a key is drawn with in this state.
    ///
    /// Uppercase leaves "space" and "return" alone; lowercase leaves "ABC".
    pub fn display_label(&self, identifier: &str) -> String {
        if self.is_uppercase() {
            match identifier.to_lowercase().as_str() {
                "space" | "return" => identifier.to_string(),
                _ => identifier.to_uppercase(),
            }
        } else if identifier.eq_ignore_ascii_case("abc") {
            identifier.to_string()
        } else {
            identifier.to_lowercase()
        }
    }
}

// ============================================================================
// State Machine
// ============================================================================

/// Drives [`InputState`] from key taps.
#[derive(Debug, Clone, Default)]
pub struct InputStateMachine {
    state: InputState,
}

impl InputStateMachine {
    /// Creates a machine in the initial state (letters, caps on, no lock).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Dispatches a completed tap on `identifier`.
    ///
    /// Double taps are recognised for shift (exactly 2), space (2 or more)
    /// and backspace (exactly 2); every other count is a single tap.
    /// `context` is the document text before the cursor.
    pub fn handle_tap(
        &mut self,
        identifier: &str,
        tap_count: u32,
        context: Option<&str>,
    ) -> Vec<EditCommand> {
        match (identifier, tap_count) {
            (_, 1) => self.key_pressed(identifier),
            ("shift", 2) => {
                self.shift_double_pressed();
                Vec::new()
            }
            ("space", n) if n > 1 => self.space_double_pressed(),
            ("backspace", 2) => self.backspace_double_pressed(context),
            _ => self.key_pressed(identifier),
        }
    }

    /// Handles a single tap on `identifier`.
    pub fn key_pressed(&mut self, identifier: &str) -> Vec<EditCommand> {
        let Some(action) = KeyAction::from_identifier(identifier) else {
            tracing::debug!("Ignoring tap on unresolved key");
            return Vec::new();
        };

        tracing::debug!("Key pressed: {:?}", action);

        match action {
            KeyAction::Shift => {
                self.shift_pressed();
                Vec::new()
            }
            KeyAction::Globe => vec![EditCommand::AdvanceInputMode],
            KeyAction::Backspace => vec![EditCommand::DeleteBackward(1)],
            KeyAction::Return => vec![EditCommand::InsertText("\n".to_string())],
            KeyAction::Space => vec![EditCommand::InsertText(" ".to_string())],
            KeyAction::SwitchLayout(variant) => {
                self.state.active_layout = variant;
                Vec::new()
            }
            KeyAction::Character(text) => {
                let text = if self.state.caps_on {
                    text.to_uppercase()
                } else {
                    text.to_lowercase()
                };

                if self.state.caps_on && !self.state.caps_lock_on {
                    self.shift_pressed();
                }

                vec![EditCommand::InsertText(text)]
            }
        }
    }

    /// Single shift tap: toggle caps, drop caps lock.
    pub fn shift_pressed(&mut self) {
        self.state.caps_on = !self.state.caps_on;
        self.state.caps_lock_on = false;
    }

    /// Double shift tap: toggle caps lock and pin caps to it.
    pub fn shift_double_pressed(&mut self) {
        self.state.caps_lock_on = !self.state.caps_lock_on;
        self.state.caps_on = self.state.caps_lock_on;
    }

    /// Double space: replace the space just typed with ". ".
    pub fn space_double_pressed(&mut self) -> Vec<EditCommand> {
        vec![
            EditCommand::DeleteBackward(1),
            EditCommand::InsertText(". ".to_string()),
        ]
    }

    /// Double backspace: delete back towards the previous space.
    ///
    /// Nothing happens without a readable context.
    pub fn backspace_double_pressed(&mut self, context: Option<&str>) -> Vec<EditCommand> {
        match context.map(word_deletion_count) {
            Some(0) | None => Vec::new(),
            Some(count) => vec![EditCommand::DeleteBackward(count)],
        }
    }
}

/// Number of characters a double backspace removes from `context`.
///
/// With a space in the context this is the distance from the last space to
/// the end minus one, which keeps the space itself: `"hello world"` becomes
/// `"hello "`, and text already ending in a space loses nothing. Without a
/// space a single character is removed.
pub fn word_deletion_count(context: &str) -> usize {
    match context.rfind(' ') {
        Some(index) => context[index..].chars().count() - 1,
        None => 1,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
