// SPDX-License-Identifier: GPL-3.0-only

//! Touch tracking: turns raw touch callbacks into key interactions.
//!
//! The tracker owns the backspace hold-and-drag state. Once a moving touch
//! passes over backspace, every leftward drag past a threshold repeats a
//! single backspace. Distances are measured from where the hold started and
//! then from the last repeat; the first repeat needs the initial threshold,
//! later ones the repeat threshold. Repeats are evaluated per move callback,
//! so their rate follows the host's touch delivery rate.

use serde::{Deserialize, Serialize};

use crate::app_settings;
use crate::layout::Point;

/// Phase of a touch callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    Began,
    Moved,
    Ended,
    Cancelled,
}

/// One touch callback from the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    pub point: Point,
    pub phase: TouchPhase,
    /// Number of taps the host counted at this location
    #[serde(default = "default_tap_count")]
    pub tap_count: u32,
}

fn default_tap_count() -> u32 {
    1
}

impl GestureEvent {
    pub fn new(point: Point, phase: TouchPhase, tap_count: u32) -> Self {
        Self {
            point,
            phase,
            tap_count,
        }
    }

    pub fn began(x: f32, y: f32) -> Self {
        Self::new(Point::new(x, y), TouchPhase::Began, 1)
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(Point::new(x, y), TouchPhase::Moved, 1)
    }

    pub fn ended(x: f32, y: f32, tap_count: u32) -> Self {
        Self::new(Point::new(x, y), TouchPhase::Ended, tap_count)
    }

    pub fn cancelled(x: f32, y: f32) -> Self {
        Self::new(Point::new(x, y), TouchPhase::Cancelled, 0)
    }
}

/// Drag distances for backspace repeat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackspaceDragConfig {
    /// Leftward distance needed before the first repeat
    pub initial_threshold: f32,
    /// Leftward distance needed between later repeats
    pub repeat_threshold: f32,
}

impl Default for BackspaceDragConfig {
    fn default() -> Self {
        Self {
            initial_threshold: app_settings::BACKSPACE_DRAG_INITIAL_THRESHOLD,
            repeat_threshold: app_settings::BACKSPACE_DRAG_REPEAT_THRESHOLD,
        }
    }
}

/// What a touch callback amounts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TouchAction {
    /// A finger went down; the host clicks and highlights the key, if any
    Pressed(Option<String>),
    /// A finger moved over a key
    Hovered(Option<String>),
    /// The backspace drag crossed its threshold
    RepeatBackspace,
    /// A finger lifted without a backspace hold
    Tapped { key: Option<String>, tap_count: u32 },
    /// Nothing to do
    Ignored,
}

/// Per-gesture touch state.
#[derive(Debug, Clone)]
pub struct TouchTracker {
    config: BackspaceDragConfig,
    holding_backspace: bool,
    prev_x: Option<f32>,
    threshold: f32,
}

impl Default for TouchTracker {
    fn default() -> Self {
        Self::new(BackspaceDragConfig::default())
    }
}

impl TouchTracker {
    pub fn new(config: BackspaceDragConfig) -> Self {
        Self {
            config,
            holding_backspace: false,
            prev_x: None,
            threshold: config.initial_threshold,
        }
    }

    /// Returns `true` while a backspace hold is in progress.
    pub fn is_holding_backspace(&self) -> bool {
        self.holding_backspace
    }

    /// Processes one touch callback.
    ///
    /// `resolve` maps a point to a key identifier and is only called when the
    /// phase needs it.
    pub fn process<F>(&mut self, event: GestureEvent, resolve: F) -> TouchAction
    where
        F: FnOnce(Point) -> Option<String>,
    {
        match event.phase {
            TouchPhase::Began => {
                if self.holding_backspace {
                    return TouchAction::Ignored;
                }
                TouchAction::Pressed(resolve(event.point))
            }
            TouchPhase::Moved => {
                if !self.holding_backspace {
                    let key = resolve(event.point);
                    if key.as_deref() == Some("backspace") {
                        tracing::debug!("Backspace hold started at x={:.1}", event.point.x);
                        self.holding_backspace = true;
                        self.prev_x = Some(event.point.x);
                    }
                    return TouchAction::Hovered(key);
                }

                if self.crossed_threshold(event.point.x) {
                    self.prev_x = Some(event.point.x);
                    self.threshold = self.config.repeat_threshold;
                    TouchAction::RepeatBackspace
                } else {
                    TouchAction::Ignored
                }
            }
            TouchPhase::Ended => {
                let was_holding = self.holding_backspace;
                self.reset();

                if was_holding {
                    return TouchAction::Ignored;
                }
                TouchAction::Tapped {
                    key: resolve(event.point),
                    tap_count: event.tap_count,
                }
            }
            TouchPhase::Cancelled => {
                tracing::debug!("Touch cancelled at ({:.1}, {:.1})", event.point.x, event.point.y);
                self.reset();
                TouchAction::Ignored
            }
        }
    }

    // Only leftward movement counts.
    fn crossed_threshold(&self, x: f32) -> bool {
        self.prev_x.is_some_and(|prev_x| prev_x - x > self.threshold)
    }

    fn reset(&mut self) {
        self.holding_backspace = false;
        self.prev_x = None;
        self.threshold = self.config.initial_threshold;
    }
}

// ============================================================================
// Tests
// ============================================================================
