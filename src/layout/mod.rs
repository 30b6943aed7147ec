// SPDX-License-Identifier: GPL-3.0-only

//! Layout model loader for ankkit keyboard layouts.
//!
//! Every layout variant (letters, digits, symbols) is described by two JSON
//! resources:
//!
//! - a **touch model** mapping key identifiers to the centroid points used for
//!   nearest-neighbour hit-testing:
//!
//!   ```json
//!   { "keys": { "q": [{ "x": 16.0, "y": 29.0 }], "space": [{ "x": 102.25, "y": 191.0 }, ...] } }
//!   ```
//!
//! - a **key layout** describing where keys are drawn:
//!
//!   ```json
//!   {
//!       "rows": [{ "keys": ["q", "w"], "x": 3, "y": 10, "key_padding": 6, "key_width": 26, "key_height": 38 }],
//!       "special_keys": { "shift": { "x": 3, "y": 118, "width": 42, "height": 38 } }
//!   }
//!   ```
//!
//! Both are stored unscaled; device and orientation coefficients are applied
//! when the geometry is consumed (see [`crate::device`]).
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use ankkit::layout::{BundledResources, LayoutModelLoader, LayoutVariant};
//!
//! let loader = LayoutModelLoader::new(Box::new(BundledResources), "qwerty_en");
//! match loader.load(LayoutVariant::Digits) {
//!     Ok(result) => println!("{} touch targets", result.value.len()),
//!     Err(e) => eprintln!("Digits unavailable: {}", e),
//! }
//!
//! // Failed variants are logged and left out of the map.
//! let touch_map = loader.load_touch_map();
//! ```

// Sub-modules
pub mod parser;
pub mod resources;
pub mod types;
pub mod validation;

// Re-export public API - Error handling types
pub use types::{LoadError, LoadResult, ValidationIssue};

// Re-export public API - Parser functions
pub use parser::{
    parse_key_layout_file, parse_key_layout_from_string, parse_touch_model_file,
    parse_touch_model_from_string,
};

// Re-export public API - Resource sources
pub use resources::{BundledResources, DirectoryResources, ResourceSource};

// Re-export public API - Data structures
pub use types::{
    FrameSpec, KeyGeometry, KeyKind, KeyLayout, KeyLayoutFile, KeyboardGeometry, LayoutVariant,
    Point, RowSpec, TouchMap, TouchModel, TouchModelFile, TouchTarget,
};

use crate::app_settings;

/// Loads the touch models and key layouts of one keyboard layout.
pub struct LayoutModelLoader {
    source: Box<dyn ResourceSource>,
    layout_id: String,
}

impl LayoutModelLoader {
    /// Creates a loader reading from `source` for the given layout id.
    pub fn new(source: Box<dyn ResourceSource>, layout_id: impl Into<String>) -> Self {
        Self {
            source,
            layout_id: layout_id.into(),
        }
    }

    /// Creates a loader for the default layout backed by the bundled resources.
    pub fn bundled() -> Self {
        Self::new(Box::new(BundledResources), app_settings::DEFAULT_LAYOUT_ID)
    }

    pub fn layout_id(&self) -> &str {
        &self.layout_id
    }

    /// Loads the touch model of a single variant.
    pub fn load(&self, variant: LayoutVariant) -> Result<LoadResult<TouchModel>, LoadError> {
        let resource = variant.touch_model_resource(&self.layout_id);
        let bytes = self.source.read(&resource)?;
        parser::parse_touch_model_bytes(&bytes, Some(&resource))
    }

    /// Loads the key geometry of a single variant.
    pub fn load_geometry(&self, variant: LayoutVariant) -> Result<LoadResult<KeyLayout>, LoadError> {
        let resource = variant.key_layout_resource(&self.layout_id);
        let bytes = self.source.read(&resource)?;
        parser::parse_key_layout_bytes(&bytes, Some(&resource))
    }

    /// Loads every variant's touch model.
    ///
    /// Failures are logged and the variant is left out, so touches on it
    /// resolve to nothing.
    pub fn load_touch_map(&self) -> TouchMap {
        let mut touch_map = TouchMap::new();

        for variant in LayoutVariant::ALL {
            match self.load(variant) {
                Ok(result) => {
                    log_warnings(variant, "touch model", &result.warnings);
                    tracing::debug!(
                        "Loaded {} touch targets for {} from {}",
                        result.value.len(),
                        variant,
                        self.source.describe()
                    );
                    touch_map.insert(variant, result.into_value());
                }
                Err(e) => {
                    tracing::warn!("Touch model for {} unavailable: {}", variant, e);
                }
            }
        }

        touch_map
    }

    /// Loads every variant's key geometry, cross-checking it against `touch_map`.
    pub fn load_keyboard_geometry(&self, touch_map: &TouchMap) -> KeyboardGeometry {
        let mut geometry = KeyboardGeometry::new();

        for variant in LayoutVariant::ALL {
            match self.load_geometry(variant) {
                Ok(result) => {
                    log_warnings(variant, "key layout", &result.warnings);
                    if let Some(model) = touch_map.get(variant) {
                        let mismatches = validation::cross_check(&result.value, model);
                        log_warnings(variant, "key layout", &mismatches);
                    }
                    geometry.insert(variant, result.into_value());
                }
                Err(e) => {
                    tracing::warn!("Key layout for {} unavailable: {}", variant, e);
                }
            }
        }

        geometry
    }
}

impl std::fmt::Debug for LayoutModelLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutModelLoader")
            .field("source", &self.source.describe())
            .field("layout_id", &self.layout_id)
            .finish()
    }
}

fn log_warnings(variant: LayoutVariant, what: &str, warnings: &[ValidationIssue]) {
    for warning in warnings {
        tracing::warn!("{} {}: {}", variant, what, warning);
    }
}

// ============================================================================
// Public API Integration Tests
// ============================================================================
