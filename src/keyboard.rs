// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard session: loader, resolver, state machine and host wired together.
//!
//! A [`Keyboard`] is created once per keyboard session by [`KeyboardBuilder`].
//! It loads every layout variant up front, then handles touch callbacks on
//! the host's UI thread:
//!
//! ```text
//! GestureEvent -> TouchTracker -> resolve() -> InputStateMachine -> KeyboardHost
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use ankkit::{GestureEvent, KeyboardBuilder, MemoryDocument};
//!
//! let mut keyboard = KeyboardBuilder::new().build(MemoryDocument::new());
//!
//! keyboard.handle_touch(GestureEvent::began(192.0, 83.0));
//! keyboard.handle_touch(GestureEvent::ended(192.0, 83.0, 1));
//! assert_eq!(keyboard.host().text(), "H");
//! ```

use crate::config::KeyboardConfig;
use crate::device::DeviceProfile;
use crate::host::KeyboardHost;
use crate::input::{
    resolve, EditCommand, GestureEvent, InputState, InputStateMachine, KeyAction, TouchAction,
    TouchTracker,
};
use crate::layout::{
    BundledResources, DirectoryResources, KeyGeometry, KeyboardGeometry, LayoutModelLoader, Point,
    ResourceSource, TouchMap,
};

/// Builds a [`Keyboard`] for one session.
pub struct KeyboardBuilder {
    config: KeyboardConfig,
    profile: DeviceProfile,
    source: Option<Box<dyn ResourceSource>>,
}

impl Default for KeyboardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardBuilder {
    pub fn new() -> Self {
        Self {
            config: KeyboardConfig::default(),
            profile: DeviceProfile::default(),
            source: None,
        }
    }

    pub fn with_config(mut self, config: KeyboardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_device_profile(mut self, profile: DeviceProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Reads resources from `source`, overriding `resource_dir` and the bundled set.
    pub fn with_resource_source(mut self, source: Box<dyn ResourceSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Loads all layout variants and starts a session typing into `host`.
    ///
    /// Variants that fail to load are logged and left without keys.
    pub fn build<H: KeyboardHost>(self, host: H) -> Keyboard<H> {
        let source = match (self.source, &self.config.resource_dir) {
            (Some(source), _) => source,
            (None, Some(dir)) => Box::new(DirectoryResources::new(dir)) as Box<dyn ResourceSource>,
            (None, None) => Box::new(BundledResources),
        };

        let loader = LayoutModelLoader::new(source, self.config.layout_id.clone());
        tracing::info!("Loading keyboard layout '{}' ({:?})", loader.layout_id(), loader);

        let touch_map = loader.load_touch_map();
        let geometry = loader.load_keyboard_geometry(&touch_map);

        Keyboard {
            host,
            touch_map,
            geometry,
            profile: self.profile,
            machine: InputStateMachine::new(),
            tracker: TouchTracker::new(self.config.backspace_drag),
        }
    }
}

/// One keyboard session.
#[derive(Debug)]
pub struct Keyboard<H: KeyboardHost> {
    host: H,
    touch_map: TouchMap,
    geometry: KeyboardGeometry,
    profile: DeviceProfile,
    machine: InputStateMachine,
    tracker: TouchTracker,
}

impl<H: KeyboardHost> Keyboard<H> {
    pub fn state(&self) -> &InputState {
        self.machine.state()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Ends the session, handing the host back.
    pub fn into_host(self) -> H {
        self.host
    }

    pub fn touch_map(&self) -> &TouchMap {
        &self.touch_map
    }

    pub fn device_profile(&self) -> &DeviceProfile {
        &self.profile
    }

    /// Key under `point` on the active variant, if it has a touch model.
    pub fn resolve(&self, point: Point) -> Option<&str> {
        resolve(point, self.machine.state().active_layout, &self.touch_map, &self.profile)
    }

    /// Handles one touch callback from the host.
    pub fn handle_touch(&mut self, event: GestureEvent) {
        let variant = self.machine.state().active_layout;
        let touch_map = &self.touch_map;
        let profile = &self.profile;

        let action = self.tracker.process(event, |point| {
            resolve(point, variant, touch_map, profile).map(str::to_owned)
        });

        match action {
            TouchAction::Pressed(key) => {
                self.host.play_input_click();
                if let Some(key) = key {
                    self.highlight(&key);
                }
            }
            TouchAction::Hovered(key) => {
                if let Some(key) = key {
                    self.highlight(&key);
                }
            }
            TouchAction::RepeatBackspace => self.key_pressed("backspace"),
            TouchAction::Tapped { key, tap_count } => {
                let key = key.unwrap_or_default();
                self.tap(&key, tap_count);
            }
            TouchAction::Ignored => {}
        }
    }

    /// Single tap on `identifier`, as if touched.
    pub fn key_pressed(&mut self, identifier: &str) {
        self.tap(identifier, 1);
    }

    /// Applies a rotation or device change. Touch models are not reloaded.
    pub fn update_device_profile(&mut self, profile: DeviceProfile) {
        if profile != self.profile {
            tracing::debug!(
                "Device profile changed: {:?} {:?}",
                profile.screen_class(),
                profile.orientation()
            );
            self.profile = profile;
        }
    }

    /// Frames of the active variant's keys, scaled for the current device.
    pub fn key_frames(&self) -> Vec<KeyGeometry> {
        self.geometry
            .get(self.machine.state().active_layout)
            .map(|layout| layout.keys().iter().map(|key| self.profile.scale_key(key)).collect())
            .unwrap_or_default()
    }

    /// Label the key is currently drawn with.
    pub fn key_label(&self, identifier: &str) -> String {
        self.machine.state().display_label(identifier)
    }

    fn tap(&mut self, identifier: &str, tap_count: u32) {
        let before = *self.machine.state();

        let context = if identifier == "backspace" && tap_count == 2 {
            self.host.document_context_before_input()
        } else {
            None
        };

        let commands = self.machine.handle_tap(identifier, tap_count, context.as_deref());
        self.apply(commands);
        self.notify_state_change(before);
    }

    fn apply(&mut self, commands: Vec<EditCommand>) {
        for command in commands {
            match command {
                EditCommand::InsertText(text) => self.host.insert_text(&text),
                EditCommand::DeleteBackward(count) => {
                    for _ in 0..count {
                        self.host.delete_backward();
                    }
                }
                EditCommand::AdvanceInputMode => self.host.advance_to_next_input_mode(),
            }
        }
    }

    fn notify_state_change(&mut self, before: InputState) {
        let after = *self.machine.state();

        if after.active_layout != before.active_layout {
            tracing::debug!("Layout switched to {}", after.active_layout);
            self.host.layout_changed(after.active_layout);
        }
        if after.caps_on != before.caps_on || after.caps_lock_on != before.caps_lock_on {
            self.host.caps_changed(&after);
        }
    }

    fn highlight(&mut self, key: &str) {
        if !KeyAction::is_function_key(key) {
            self.host.highlight_key(key);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
