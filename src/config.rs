// SPDX-License-Identifier: GPL-3.0-only

use crate::app_settings;
use crate::input::BackspaceDragConfig;
use crate::layout::LoadError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Keyboard configuration, read from JSON. Every field is optional.
///
/// ```json
/// {
///     "layout_id": "qwerty_en",
///     "resource_dir": "/path/to/layouts",
///     "backspace_drag": { "initial_threshold": 7.0, "repeat_threshold": 3.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Layout whose letters variant is loaded
    pub layout_id: String,
    /// Read layout resources from this directory instead of the bundled set
    pub resource_dir: Option<PathBuf>,
    /// Leftward drag distances for backspace hold repeat
    pub backspace_drag: BackspaceDragConfig,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            layout_id: app_settings::DEFAULT_LAYOUT_ID.to_string(),
            resource_dir: None,
            backspace_drag: BackspaceDragConfig::default(),
        }
    }
}

impl KeyboardConfig {
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        serde_json::from_str(json).map_err(LoadError::json_error)
    }

    /// Reads a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let display_path = path.display().to_string();

        let json = fs::read_to_string(path)
            .map_err(|e| LoadError::io_error_with_path(e, &display_path))?;
        serde_json::from_str(&json)
            .map_err(|e| LoadError::json_error_with_resource(e, display_path))
    }
}
