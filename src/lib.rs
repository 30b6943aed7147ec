// SPDX-License-Identifier: GPL-3.0-only

//! Ankkit - the input engine of a custom soft keyboard extension
//!
//! This crate decides which key a touch landed on and what that key does.
//! It never draws anything and never owns the edited text: the host
//! application renders keys and applies the [`EditCommand`]s it is handed
//! through the [`KeyboardHost`] trait.
//!
//! # Architecture
//!
//! 1. **Layout models** (`layout`): per-variant touch models (key centroids)
//!    and key layouts (frames), loaded from bundled JSON or a directory.
//!
//! 2. **Device profile** (`device`): screen class and orientation
//!    coefficients applied to the stored geometry.
//!
//! 3. **Input** (`input`): nearest-centroid touch resolution, the caps and
//!    layout state machine, and backspace hold-and-drag tracking.
//!
//! 4. **Keyboard session** (`keyboard`): wires the above to a host.
//!
//! # Modules
//!
//! - `app_settings`: Centralized constants (resource names, coefficients, thresholds)
//! - `config`: JSON keyboard configuration
//! - `device`: Screen class, orientation and geometry scaling
//! - `host`: Traits the host application implements, plus an in-memory host
//! - `input`: Touch resolution, gesture tracking and the input state machine
//! - `keyboard`: Keyboard session controller and builder
//! - `layout`: Layout model loading, parsing and validation

pub mod app_settings;
pub mod config;
pub mod device;
pub mod host;
pub mod input;
pub mod keyboard;
pub mod layout;

pub use config::KeyboardConfig;
pub use device::{DeviceProfile, Orientation, ScreenClass};
pub use host::{KeyboardHost, MemoryDocument, TextDocumentProxy};
pub use input::{EditCommand, GestureEvent, InputState, TouchPhase};
pub use keyboard::{Keyboard, KeyboardBuilder};
pub use layout::{LayoutVariant, LoadError, Point};

// ============================================================================
// Integration Tests
// ============================================================================
