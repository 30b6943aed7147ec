// SPDX-License-Identifier: GPL-3.0-only

//! Centralized keyboard settings and constants.

/// Layout identifier used when no other layout is configured.
pub const DEFAULT_LAYOUT_ID: &str = "qwerty_en";

/// Resource stem shared by every layout's digits variant.
pub const DIGITS_RESOURCE_STEM: &str = "123";

/// Resource stem shared by every layout's symbols variant.
pub const SYMBOLS_RESOURCE_STEM: &str = "spec";

/// Suffix of touch-model resources (`<stem>_touch_model.json`).
pub const TOUCH_MODEL_SUFFIX: &str = "_touch_model";

/// Suffix of key-layout resources (`<stem>_keyboard_layout.json`).
pub const KEY_LAYOUT_SUFFIX: &str = "_keyboard_layout";

/// Extension of every bundled resource.
pub const RESOURCE_EXTENSION: &str = "json";

// ============================================================================
// Device Coefficients
// ============================================================================

/// Geometry scale for the 4.7" screen class (iPhone 6 / 6s).
pub const REGULAR_SCREEN_COEFFICIENT: f32 = 1.171_875;

/// Geometry scale for the 5.5" screen class (iPhone 6 Plus / 6s Plus).
pub const PLUS_SCREEN_COEFFICIENT: f32 = 1.293_75;

/// Vertical offset subtracted on the larger screen classes.
pub const LARGE_SCREEN_Y_OFFSET: f32 = 6.0;

// ============================================================================
// Orientation Coefficients
// ============================================================================

/// Horizontal stretch applied to stored touch centroids in landscape.
pub const LANDSCAPE_TOUCH_X_SCALE: f32 = 1.755;

/// Horizontal stretch applied to key frames in landscape.
///
/// Differs from [`LANDSCAPE_TOUCH_X_SCALE`]; both values match the shipped
/// touch models and must not be unified without re-sampling them.
pub const LANDSCAPE_LAYOUT_X_SCALE: f32 = 1.775;

/// Vertical squash applied in landscape.
pub const LANDSCAPE_Y_SCALE: f32 = 0.75;

/// Vertical squash applied in landscape on the Plus screen class.
pub const LANDSCAPE_PLUS_Y_SCALE: f32 = 0.72;

// ============================================================================
// Gesture Thresholds
// ============================================================================

/// Leftward drag distance that triggers the first backspace repeat.
pub const BACKSPACE_DRAG_INITIAL_THRESHOLD: f32 = 7.0;

/// Leftward drag distance between subsequent backspace repeats.
pub const BACKSPACE_DRAG_REPEAT_THRESHOLD: f32 = 3.0;
