// SPDX-License-Identifier: GPL-3.0-only

//! Input handling for the ankkit keyboard.
//!
//! Raw touches flow through three stages:
//!
//! 1. **Gesture tracking** ([`TouchTracker`]): decides whether a callback is a
//!    press, a hover, a backspace drag repeat, or a completed tap.
//! 2. **Touch resolution** ([`resolve`]): maps a touch point to the key with
//!    the nearest stored centroid on the active layout variant.
//! 3. **Input state machine** ([`InputStateMachine`]): updates caps, caps lock,
//!    and the active variant, and emits [`EditCommand`]s for the host.
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use ankkit::input::{InputStateMachine, EditCommand};
//!
//! let mut machine = InputStateMachine::new();
//!
//! // First letter of a sentence is capitalised, then shift releases.
//! assert_eq!(machine.key_pressed("h"), vec![EditCommand::InsertText("H".into())]);
//! assert_eq!(machine.key_pressed("i"), vec![EditCommand::InsertText("i".into())]);
//!
//! // Double-tapping space after a word ends the sentence.
//! let commands = machine.handle_tap("space", 2, Some("hi "));
//! ```

// Sub-modules
pub mod gesture;
pub mod resolver;
pub mod state;

// Re-export public API
pub use gesture::{BackspaceDragConfig, GestureEvent, TouchAction, TouchPhase, TouchTracker};
pub use resolver::{resolve, resolve_in_model, Resolution};
pub use state::{
    word_deletion_count, EditCommand, InputState, InputStateMachine, KeyAction, ShiftIndicator,
};

// ============================================================================
// Module Tests
// ============================================================================
