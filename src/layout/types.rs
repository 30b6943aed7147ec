// SPDX-License-Identifier: GPL-3.0-only

//! Core data types for the layout model loader.
//!
//! This module defines the error types, the raw JSON resource shapes, and the
//! immutable per-variant tables (touch models and key geometry) built from them.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::app_settings;

// ============================================================================
// Error Handling Types
// ============================================================================

/// A non-fatal issue discovered while validating a loaded model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Human-readable description of the issue
    pub message: String,
    /// Path to the offending field (e.g., "keys[space][2]")
    pub field_path: String,
    /// Optional suggestion for how to fix the issue
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Creates a new validation issue.
    pub fn new(message: impl Into<String>, field_path: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_path: field_path.into(),
            suggestion: None,
        }
    }

    /// Adds a suggestion to the validation issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[WARNING] {}: {}", self.field_path, self.message)?;

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Error type for resource loading.
///
/// Loading has exactly two failure kinds: the resource could not be read, or
/// its content could not be parsed. Both degrade to "no resolvable keys" for
/// the affected variant.
#[derive(Debug)]
pub enum LoadError {
    /// The named resource does not exist or could not be read
    NotFound {
        /// Resource name (e.g., "123_touch_model.json")
        resource: String,
        /// The underlying I/O error, when reading from disk
        source: Option<std::io::Error>,
        /// Optional suggestion for fixing the error
        suggestion: Option<String>,
    },

    /// The resource content is not valid JSON or has the wrong shape
    ParseError {
        /// The underlying JSON parsing error
        source: serde_json::Error,
        /// Resource being parsed, if known
        resource: Option<String>,
        /// Line number where the error occurred (from serde_json)
        line_number: Option<usize>,
        /// Optional suggestion for fixing the error
        suggestion: Option<String>,
    },
}

impl LoadError {
    /// Creates a not-found error for a resource missing from its source.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            source: None,
            suggestion: Some("Check that the resource is bundled with the keyboard".into()),
        }
    }

    /// Creates a not-found error from a failed file read.
    pub fn io_error_with_path(source: std::io::Error, resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            source: Some(source),
            suggestion: Some("Check that the file exists and you have read permissions".into()),
        }
    }

    /// Creates a parse error with context.
    pub fn json_error(source: serde_json::Error) -> Self {
        let line_number = Some(source.line()).filter(|line| *line > 0);
        Self::ParseError {
            source,
            resource: None,
            line_number,
            suggestion: Some("Check the JSON syntax at the indicated line".into()),
        }
    }

    /// Creates a parse error with the resource name.
    pub fn json_error_with_resource(
        source: serde_json::Error,
        resource: impl Into<String>,
    ) -> Self {
        let line_number = Some(source.line()).filter(|line| *line > 0);
        Self::ParseError {
            source,
            resource: Some(resource.into()),
            line_number,
            suggestion: Some("Check the JSON syntax at the indicated line".into()),
        }
    }

    /// Returns `true` for [`LoadError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` for [`LoadError::ParseError`].
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError { .. })
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::NotFound {
                resource,
                source,
                suggestion,
            } => {
                write!(f, "Resource '{}' not found", resource)?;
                if let Some(err) = source {
                    write!(f, ": {}", err)?;
                }
                if let Some(hint) = suggestion {
                    write!(f, "\n  Suggestion: {}", hint)?;
                }
            }
            LoadError::ParseError {
                source,
                resource,
                line_number,
                suggestion,
            } => {
                write!(f, "JSON parsing error")?;
                if let Some(name) = resource {
                    write!(f, " in resource '{}'", name)?;
                }
                if let Some(line) = line_number {
                    write!(f, " at line {}", line)?;
                }
                write!(f, ": {}", source)?;
                if let Some(hint) = suggestion {
                    write!(f, "\n  Suggestion: {}", hint)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::NotFound { source, .. } => source
                .as_ref()
                .map(|err| err as &(dyn std::error::Error + 'static)),
            LoadError::ParseError { source, .. } => Some(source),
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::json_error(err)
    }
}

// ============================================================================
// LoadResult Type
// ============================================================================

/// A successfully loaded value together with non-fatal validation warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadResult<T> {
    /// The loaded value
    pub value: T,
    /// Non-fatal validation warnings
    pub warnings: Vec<ValidationIssue>,
}

impl<T> LoadResult<T> {
    /// Creates a new load result with no warnings.
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Creates a new load result with warnings.
    pub fn with_warnings(value: T, warnings: Vec<ValidationIssue>) -> Self {
        Self { value, warnings }
    }

    /// Returns true if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Consumes the result and returns the value, discarding warnings.
    pub fn into_value(self) -> T {
        self.value
    }
}

// ============================================================================
// Layout Variants
// ============================================================================

/// One of the three key sets the keyboard can show. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutVariant {
    /// Alphabetic keys
    Letters,
    /// Digits and common punctuation
    Digits,
    /// Less common symbols
    Symbols,
}

impl LayoutVariant {
    /// All variants in loading order.
    pub const ALL: [LayoutVariant; 3] = [Self::Letters, Self::Digits, Self::Symbols];

    /// Resource stem for this variant; only letters depend on the layout id.
    pub fn resource_stem<'a>(&self, layout_id: &'a str) -> &'a str {
        match self {
            Self::Letters => layout_id,
            Self::Digits => app_settings::DIGITS_RESOURCE_STEM,
            Self::Symbols => app_settings::SYMBOLS_RESOURCE_STEM,
        }
    }

    /// File name of this variant's touch model.
    pub fn touch_model_resource(&self, layout_id: &str) -> String {
        format!(
            "{}{}.{}",
            self.resource_stem(layout_id),
            app_settings::TOUCH_MODEL_SUFFIX,
            app_settings::RESOURCE_EXTENSION
        )
    }

    /// File name of this variant's key layout.
    pub fn key_layout_resource(&self, layout_id: &str) -> String {
        format!(
            "{}{}.{}",
            self.resource_stem(layout_id),
            app_settings::KEY_LAYOUT_SUFFIX,
            app_settings::RESOURCE_EXTENSION
        )
    }
}

impl fmt::Display for LayoutVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Letters => write!(f, "letters"),
            Self::Digits => write!(f, "digits"),
            Self::Symbols => write!(f, "symbols"),
        }
    }
}

// ============================================================================
// Points
// ============================================================================

/// A point in keyboard-view coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance; hit-testing never needs the square root.
    pub fn distance_squared(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

// ============================================================================
// Raw Resource Shapes
// ============================================================================

/// Touch-model resource: `{"keys": {"<identifier>": [{"x":..,"y":..}, ...]}}`.
///
/// Keys are held in a `BTreeMap` so the resolver visits them in identifier
/// order on every platform and every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchModelFile {
    pub keys: BTreeMap<String, Vec<Point>>,
}

/// One row of regularly spaced keys in a key-layout resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowSpec {
    /// Key identifiers, left to right
    pub keys: Vec<String>,
    /// Leading edge of the first key
    pub x: f32,
    /// Top edge of every key in the row
    pub y: f32,
    /// Gap between neighbouring keys
    pub key_padding: f32,
    pub key_width: f32,
    pub key_height: f32,
}

/// Explicit frame of a special key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Key-layout resource: rows of letter keys plus named special keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyLayoutFile {
    pub rows: Vec<RowSpec>,
    #[serde(default)]
    pub special_keys: BTreeMap<String, FrameSpec>,
}

// ============================================================================
// Touch Models
// ============================================================================

/// The centroids used to hit-test one key.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchTarget {
    pub key_identifier: String,
    pub centroids: Vec<Point>,
}

/// Touch targets of one layout variant, in identifier order. Immutable once built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TouchModel {
    targets: Vec<TouchTarget>,
    index: HashMap<String, usize>,
}

impl TouchModel {
    pub fn new(targets: Vec<TouchTarget>) -> Self {
        let index = build_index(targets.iter().map(|target| target.key_identifier.as_str()));
        Self { targets, index }
    }

    pub fn targets(&self) -> &[TouchTarget] {
        &self.targets
    }

    /// Looks up the centroids of a key.
    pub fn centroids(&self, key_identifier: &str) -> Option<&[Point]> {
        self.index
            .get(key_identifier)
            .map(|&i| self.targets[i].centroids.as_slice())
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl From<TouchModelFile> for TouchModel {
    fn from(file: TouchModelFile) -> Self {
        Self::new(
            file.keys
                .into_iter()
                .map(|(key_identifier, centroids)| TouchTarget {
                    key_identifier,
                    centroids,
                })
                .collect(),
        )
    }
}

/// Touch models for every variant that loaded successfully.
///
/// Built once when the keyboard starts and read-only afterwards. A variant
/// whose resource failed to load is simply absent.
#[derive(Debug, Clone, Default)]
pub struct TouchMap {
    models: HashMap<LayoutVariant, TouchModel>,
}

impl TouchMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, variant: LayoutVariant, model: TouchModel) {
        self.models.insert(variant, model);
    }

    pub fn get(&self, variant: LayoutVariant) -> Option<&TouchModel> {
        self.models.get(&variant)
    }

    /// Returns `true` when the variant has a loaded model.
    pub fn is_loaded(&self, variant: LayoutVariant) -> bool {
        self.models.contains_key(&variant)
    }

    pub fn loaded_variants(&self) -> Vec<LayoutVariant> {
        let mut variants: Vec<LayoutVariant> = self.models.keys().copied().collect();
        variants.sort();
        variants
    }
}

// ============================================================================
// Key Geometry
// ============================================================================

/// Where a key's frame came from. Scaling order differs between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// Placed within a row of evenly spaced keys
    Row,
    /// Declared with its own frame under `special_keys`
    Special,
}

/// Unscaled frame of one key.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyGeometry {
    pub identifier: String,
    pub kind: KeyKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl KeyGeometry {
    /// Centre of the frame.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns `true` if `point` lies inside the frame (edges inclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Geometry table of one layout variant: row keys first, then special keys.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyLayout {
    keys: Vec<KeyGeometry>,
    index: HashMap<String, usize>,
}

impl KeyLayout {
    pub fn new(keys: Vec<KeyGeometry>) -> Self {
        let index = build_index(keys.iter().map(|key| key.identifier.as_str()));
        Self { keys, index }
    }

    pub fn keys(&self) -> &[KeyGeometry] {
        &self.keys
    }

    pub fn get(&self, identifier: &str) -> Option<&KeyGeometry> {
        self.index.get(identifier).map(|&i| &self.keys[i])
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl From<KeyLayoutFile> for KeyLayout {
    fn from(file: KeyLayoutFile) -> Self {
        let mut keys = Vec::new();

        for row in file.rows {
            let stride = row.key_width + row.key_padding;
            for (index, identifier) in row.keys.into_iter().enumerate() {
                keys.push(KeyGeometry {
                    identifier,
                    kind: KeyKind::Row,
                    x: row.x + index as f32 * stride,
                    y: row.y,
                    width: row.key_width,
                    height: row.key_height,
                });
            }
        }

        for (identifier, frame) in file.special_keys {
            keys.push(KeyGeometry {
                identifier,
                kind: KeyKind::Special,
                x: frame.x,
                y: frame.y,
                width: frame.width,
                height: frame.height,
            });
        }

        Self::new(keys)
    }
}

// Identifier to position; the first occurrence of a duplicate wins.
fn build_index<'a>(identifiers: impl Iterator<Item = &'a str>) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (i, identifier) in identifiers.enumerate() {
        index.entry(identifier.to_string()).or_insert(i);
    }
    index
}

/// Key geometry for every variant that loaded successfully.
#[derive(Debug, Clone, Default)]
pub struct KeyboardGeometry {
    layouts: HashMap<LayoutVariant, KeyLayout>,
}

impl KeyboardGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, variant: LayoutVariant, layout: KeyLayout) {
        self.layouts.insert(variant, layout);
    }

    pub fn get(&self, variant: LayoutVariant) -> Option<&KeyLayout> {
        self.layouts.get(&variant)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    /// Test 1: Parse errors carry the line number and resource name
    #[test]
    fn test_json_error_includes_line_number() {
        let json = "{\n  \"keys\": \n}";
        let err = serde_json::from_str::<TouchModelFile>(json).unwrap_err();
        let load_error = LoadError::json_error_with_resource(err, "qwerty_en_touch_model.json");

        match &load_error {
            LoadError::ParseError {
                line_number,
                resource,
                ..
            } => {
                assert_eq!(*line_number, Some(3));
                assert_eq!(resource.as_deref(), Some("qwerty_en_touch_model.json"));
            }
            _ => panic!("Expected ParseError variant"),
        }

        let display = load_error.to_string();
        assert!(display.contains("at line 3"));
        assert!(display.contains("Suggestion"));
        assert!(load_error.source().is_some());
    }

    /// Test 2: Not-found errors name the resource
    #[test]
    fn test_not_found_display() {
        let err = LoadError::not_found("spec_touch_model.json");

        assert!(err.is_not_found());
        assert!(!err.is_parse_error());
        assert!(err.to_string().contains("'spec_touch_model.json' not found"));
        assert!(err.source().is_none());
    }

    /// Test 3: Resource names per variant
    #[test]
    fn test_variant_resource_names() {
        assert_eq!(
            LayoutVariant::Letters.touch_model_resource("qwerty_en"),
            "qwerty_en_touch_model.json"
        );
        assert_eq!(
            LayoutVariant::Digits.touch_model_resource("qwerty_en"),
            "123_touch_model.json"
        );
        assert_eq!(
            LayoutVariant::Symbols.key_layout_resource("qwerty_en"),
            "spec_keyboard_layout.json"
        );
        assert_eq!(
            LayoutVariant::Letters.key_layout_resource("azerty_fr"),
            "azerty_fr_keyboard_layout.json"
        );
    }

    /// Test 4: Squared distance
    #[test]
    fn test_point_distance_squared() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, 6.0);

        assert_eq!(a.distance_squared(b), 25.0);
        assert_eq!(b.distance_squared(a), 25.0);
        assert_eq!(a.distance_squared(a), 0.0);
    }

    /// Test 5: Touch model keeps identifier order
    #[test]
    fn test_touch_model_from_file_is_ordered() {
        let json = r#"{"keys": {"w": [{"x": 48, "y": 29}], "q": [{"x": 16, "y": 29}]}}"#;
        let file: TouchModelFile = serde_json::from_str(json).unwrap();
        let model = TouchModel::from(file);

        let ids: Vec<&str> = model
            .targets()
            .iter()
            .map(|t| t.key_identifier.as_str())
            .collect();
        assert_eq!(ids, vec!["q", "w"]);
        assert_eq!(model.centroids("w"), Some(&[Point::new(48.0, 29.0)][..]));
        assert_eq!(model.centroids("e"), None);
    }

    /// Test 6: Row keys are laid out left to right with padding
    #[test]
    fn test_key_layout_row_placement() {
        let file = KeyLayoutFile {
            rows: vec![RowSpec {
                keys: vec!["a".into(), "b".into(), "c".into()],
                x: 3.0,
                y: 10.0,
                key_padding: 6.0,
                key_width: 26.0,
                key_height: 38.0,
            }],
            special_keys: BTreeMap::new(),
        };
        let layout = KeyLayout::from(file);

        assert_eq!(layout.len(), 3);
        assert_eq!(layout.get("a").unwrap().x, 3.0);
        assert_eq!(layout.get("b").unwrap().x, 35.0);
        assert_eq!(layout.get("c").unwrap().x, 67.0);
        assert!(layout.keys().iter().all(|k| k.kind == KeyKind::Row));
        assert_eq!(layout.get("c").unwrap().center(), Point::new(80.0, 29.0));
    }

    /// Test 7: Special keys follow the rows
    #[test]
    fn test_key_layout_special_keys() {
        let mut special_keys = BTreeMap::new();
        special_keys.insert(
            "space".to_string(),
            FrameSpec {
                x: 83.0,
                y: 172.0,
                width: 154.0,
                height: 38.0,
            },
        );
        let layout = KeyLayout::from(KeyLayoutFile {
            rows: vec![],
            special_keys,
        });

        let space = layout.get("space").unwrap();
        assert_eq!(space.kind, KeyKind::Special);
        assert!(space.contains(Point::new(100.0, 180.0)));
        assert!(!space.contains(Point::new(82.0, 180.0)));
    }

    /// Test 8: Touch map tracks which variants loaded
    #[test]
    fn test_touch_map_loaded_variants() {
        let mut map = TouchMap::new();
        assert!(map.loaded_variants().is_empty());

        map.insert(LayoutVariant::Symbols, TouchModel::default());
        map.insert(LayoutVariant::Letters, TouchModel::default());

        assert!(map.is_loaded(LayoutVariant::Letters));
        assert!(!map.is_loaded(LayoutVariant::Digits));
        assert_eq!(
            map.loaded_variants(),
            vec![LayoutVariant::Letters, LayoutVariant::Symbols]
        );
    }

    /// Test 9: Load result warnings
    #[test]
    fn test_load_result_with_warnings() {
        let result = LoadResult::with_warnings(
            1u8,
            vec![ValidationIssue::new("Key has no centroids", "keys[x]")],
        );
        assert!(result.has_warnings());
        assert_eq!(result.warning_count(), 1);
        assert_eq!(result.into_value(), 1);

        assert!(!LoadResult::new(()).has_warnings());
    }

    /// Test 10: Validation issue display
    #[test]
    fn test_validation_issue_display() {
        let issue = ValidationIssue::new("Key has no centroids", "keys[shift]")
            .with_suggestion("Add at least one {x, y} point");

        let display = issue.to_string();
        assert!(display.starts_with("[WARNING] keys[shift]: Key has no centroids"));
        assert!(display.contains("Suggestion: Add at least one"));
    }

    /// Test 11: Identifier lookups use the index, first duplicate wins
    #[test]
    fn test_identifier_index() {
        let key = |identifier: &str, x: f32| KeyGeometry {
            identifier: identifier.to_string(),
            kind: KeyKind::Row,
            x,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        let layout = KeyLayout::new(vec![key("a", 0.0), key("b", 20.0), key("a", 40.0)]);

        assert_eq!(layout.len(), 3);
        assert_eq!(layout.get("a").unwrap().x, 0.0);
        assert_eq!(layout.get("b").unwrap().x, 20.0);
        assert!(layout.get("c").is_none());

        let model = TouchModel::new(vec![
            TouchTarget {
                key_identifier: "space".into(),
                centroids: vec![Point::new(1.0, 1.0), Point::new(2.0, 1.0)],
            },
            TouchTarget {
                key_identifier: "q".into(),
                centroids: vec![Point::new(16.0, 29.0)],
            },
        ]);
        assert_eq!(model.centroids("space").map(<[Point]>::len), Some(2));
        assert_eq!(model.centroids("q"), Some(&[Point::new(16.0, 29.0)][..]));
        assert_eq!(model.targets()[0].key_identifier, "space");
    }
}
