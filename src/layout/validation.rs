// SPDX-License-Identifier: GPL-3.0-only

//! Validation rules for loaded touch models and key layouts.
//!
//! Validation is permissive: it never rejects a model, it only collects
//! warnings about keys that will behave oddly at runtime (unreachable keys,
//! centroids that tie between two keys, degenerate frames).

use crate::layout::types::{KeyLayout, LoadResult, TouchModel, ValidationIssue};
use std::collections::{HashMap, HashSet};

/// Validates a touch model and returns it with warnings.
pub fn validate_touch_model(model: TouchModel) -> LoadResult<TouchModel> {
    let mut warnings = Vec::new();

    if model.is_empty() {
        warnings.push(
            ValidationIssue::new("Touch model declares no keys", "keys")
                .with_suggestion("Every touch on this layout will be ignored"),
        );
    }

    // Exact centroid position -> first key that declared it
    let mut seen: HashMap<(u32, u32), &str> = HashMap::new();

    for target in model.targets() {
        let key_path = format!("keys[{}]", target.key_identifier);

        if target.key_identifier.is_empty() {
            warnings.push(ValidationIssue::new("Key identifier is empty", &key_path));
        }

        if target.centroids.is_empty() {
            warnings.push(
                ValidationIssue::new("Key has no centroids and can never be hit", &key_path)
                    .with_suggestion("Add at least one {x, y} point"),
            );
        }

        for (index, centroid) in target.centroids.iter().enumerate() {
            let position = (centroid.x.to_bits(), centroid.y.to_bits());
            match seen.get(&position) {
                Some(owner) if *owner != target.key_identifier => {
                    warnings.push(
                        ValidationIssue::new(
                            format!(
                                "Centroid ({}, {}) is also declared by key '{}'",
                                centroid.x, centroid.y, owner
                            ),
                            format!("{}[{}]", key_path, index),
                        )
                        .with_suggestion("Ties resolve to the key that sorts first"),
                    );
                }
                Some(_) => {}
                None => {
                    seen.insert(position, target.key_identifier.as_str());
                }
            }
        }
    }

    LoadResult::with_warnings(model, warnings)
}

/// Validates a key layout and returns it with warnings.
pub fn validate_key_layout(layout: KeyLayout) -> LoadResult<KeyLayout> {
    let mut warnings = Vec::new();
    let mut identifiers = HashSet::new();

    if layout.is_empty() {
        warnings.push(ValidationIssue::new("Key layout declares no keys", "rows"));
    }

    for key in layout.keys() {
        let key_path = format!("keys[{}]", key.identifier);

        if !identifiers.insert(key.identifier.as_str()) {
            warnings.push(
                ValidationIssue::new("Key is declared more than once", &key_path)
                    .with_suggestion("Only the first declaration is used for lookups"),
            );
        }

        if key.width <= 0.0 || key.height <= 0.0 {
            warnings.push(ValidationIssue::new(
                format!("Key frame has non-positive size {}x{}", key.width, key.height),
                &key_path,
            ));
        }
    }

    LoadResult::with_warnings(layout, warnings)
}

/// Cross-checks the geometry of a variant against its touch model.
///
/// Visible keys without touch targets can never be hit; touch targets without
/// geometry produce input from an invisible key.
pub fn cross_check(layout: &KeyLayout, model: &TouchModel) -> Vec<ValidationIssue> {
    let mut warnings = Vec::new();

    for key in layout.keys() {
        if model.centroids(&key.identifier).is_none() {
            warnings.push(
                ValidationIssue::new("Visible key has no touch target", format!("keys[{}]", key.identifier))
                    .with_suggestion("Add the key to the touch model"),
            );
        }
    }

    for target in model.targets() {
        if layout.get(&target.key_identifier).is_none() {
            warnings.push(ValidationIssue::new(
                "Touch target has no visible key",
                format!("keys[{}]", target.key_identifier),
            ));
        }
    }

    warnings
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::{KeyGeometry, KeyKind, Point, TouchTarget};

    fn target(id: &str, centroids: &[(f32, f32)]) -> TouchTarget {
        TouchTarget {
            key_identifier: id.to_string(),
            centroids: centroids.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        }
    }

    fn key(id: &str, width: f32) -> KeyGeometry {
        KeyGeometry {
            identifier: id.to_string(),
            kind: KeyKind::Row,
            x: 0.0,
            y: 0.0,
            width,
            height: 38.0,
        }
    }

    /// Test 1: A clean model has no warnings
    #[test]
    fn test_valid_touch_model() {
        let model = TouchModel::new(vec![
            target("q", &[(16.0, 29.0)]),
            target("w", &[(48.0, 29.0)]),
        ]);

        let result = validate_touch_model(model);
        assert!(!result.has_warnings(), "{:?}", result.warnings);
    }

    /// Test 2: Empty models and empty centroid lists are flagged
    #[test]
    fn test_empty_touch_model_and_targets() {
        assert_eq!(validate_touch_model(TouchModel::default()).warning_count(), 1);

        let result = validate_touch_model(TouchModel::new(vec![target("shift", &[])]));
        assert_eq!(result.warning_count(), 1);
        assert_eq!(result.warnings[0].field_path, "keys[shift]");
    }

    /// Test 3: Shared centroids between keys are flagged once
    #[test]
    fn test_shared_centroid_warning() {
        let model = TouchModel::new(vec![
            target("a", &[(10.0, 10.0)]),
            target("b", &[(10.0, 10.0), (20.0, 10.0)]),
        ]);

        let result = validate_touch_model(model);
        assert_eq!(result.warning_count(), 1);
        assert_eq!(result.warnings[0].field_path, "keys[b][0]");
        assert!(result.warnings[0].message.contains("'a'"));
    }

    /// Test 4: Duplicate identifiers and degenerate frames
    #[test]
    fn test_key_layout_warnings() {
        let layout = KeyLayout::new(vec![key("a", 26.0), key("a", 26.0), key("b", 0.0)]);

        let result = validate_key_layout(layout);
        assert_eq!(result.warning_count(), 2);
    }

    /// Test 5: Cross-check finds both kinds of mismatch
    #[test]
    fn test_cross_check() {
        let layout = KeyLayout::new(vec![key("a", 26.0), key("b", 26.0)]);
        let model = TouchModel::new(vec![target("a", &[(1.0, 1.0)]), target("c", &[(2.0, 2.0)])]);

        let warnings = cross_check(&layout, &model);
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].field_path, "keys[b]");
        assert_eq!(warnings[1].field_path, "keys[c]");
    }
}
