// SPDX-License-Identifier: GPL-3.0-only

//! Nearest-centroid touch resolution.
//!
//! A touch is assigned to the key owning the stored centroid closest to it,
//! after the centroid has been mapped through the current [`DeviceProfile`].
//! There is no distance threshold: any touch on a loaded variant resolves to
//! some key. Ties keep the first minimum found, in identifier order and then
//! centroid order, so the result is stable for a given model.

use crate::device::DeviceProfile;
use crate::layout::{LayoutVariant, Point, TouchMap, TouchModel};

/// The key a touch resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution<'a> {
    /// Identifier of the nearest key
    pub key: &'a str,
    /// Squared distance from the touch to the winning centroid
    pub distance_squared: f32,
}

/// Resolves a touch against the active variant of a touch map.
///
/// Returns `None` when the variant has no loaded model or its model has no
/// centroids.
pub fn resolve<'a>(
    point: Point,
    variant: LayoutVariant,
    touch_map: &'a TouchMap,
    profile: &DeviceProfile,
) -> Option<&'a str> {
    let Some(model) = touch_map.get(variant) else {
        tracing::trace!("No touch model for {}; touch ignored", variant);
        return None;
    };

    resolve_in_model(point, model, profile).map(|resolution| resolution.key)
}

/// Resolves a touch against a single touch model.
pub fn resolve_in_model<'a>(
    point: Point,
    model: &'a TouchModel,
    profile: &DeviceProfile,
) -> Option<Resolution<'a>> {
    let transform = profile.centroid_transform();
    let mut best: Option<Resolution<'a>> = None;

    for target in model.targets() {
        for centroid in &target.centroids {
            let distance_squared = point.distance_squared(transform.apply(*centroid));

            if best.is_none_or(|b| distance_squared < b.distance_squared) {
                best = Some(Resolution {
                    key: &target.key_identifier,
                    distance_squared,
                });
            }
        }
    }

    if let Some(resolution) = best {
        tracing::trace!(
            "Resolved touch ({:.1}, {:.1}) to '{}' (d²={:.1})",
            point.x,
            point.y,
            resolution.key,
            resolution.distance_squared
        );
    }

    best
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{Orientation, ScreenClass};
    use crate::layout::{LayoutModelLoader, TouchTarget};

    fn model(targets: &[(&str, &[(f32, f32)])]) -> TouchModel {
        TouchModel::new(
            targets
                .iter()
                .map(|(id, points)| TouchTarget {
                    key_identifier: id.to_string(),
                    centroids: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
                })
                .collect(),
        )
    }

    fn letters_map(m: TouchModel) -> TouchMap {
        let mut map = TouchMap::new();
        map.insert(LayoutVariant::Letters, m);
        map
    }

    /// Test 1: A touch strictly closer to one centroid resolves to its key
    #[test]
    fn test_resolves_nearest_key() {
        let map = letters_map(model(&[("a", &[(10.0, 10.0)]), ("b", &[(50.0, 10.0)])]));
        let profile = DeviceProfile::default();

        assert_eq!(resolve(Point::new(12.0, 30.0), LayoutVariant::Letters, &map, &profile), Some("a"));
        assert_eq!(resolve(Point::new(31.0, 10.0), LayoutVariant::Letters, &map, &profile), Some("b"));
    }

    /// Test 2: Far-away touches still resolve to the nearest key
    #[test]
    fn test_no_threshold() {
        let map = letters_map(model(&[("a", &[(10.0, 10.0)]), ("b", &[(50.0, 10.0)])]));

        let key = resolve(
            Point::new(10_000.0, -5_000.0),
            LayoutVariant::Letters,
            &map,
            &DeviceProfile::default(),
        );
        assert_eq!(key, Some("b"));
    }

    /// Test 3: Any centroid of a multi-centroid key can win
    #[test]
    fn test_multiple_centroids() {
        let map = letters_map(model(&[
            ("space", &[(100.0, 190.0), (140.0, 190.0), (180.0, 190.0)]),
            ("return", &[(260.0, 190.0)]),
        ]));
        let profile = DeviceProfile::default();

        assert_eq!(resolve(Point::new(185.0, 195.0), LayoutVariant::Letters, &map, &profile), Some("space"));
        assert_eq!(resolve(Point::new(225.0, 190.0), LayoutVariant::Letters, &map, &profile), Some("return"));
    }

    /// Test 4: Equidistant ties keep the first key in identifier order, every time
    #[test]
    fn test_tie_is_deterministic() {
        let map = letters_map(model(&[("a", &[(0.0, 0.0)]), ("b", &[(20.0, 0.0)])]));
        let profile = DeviceProfile::default();
        let midpoint = Point::new(10.0, 0.0);

        for _ in 0..10 {
            assert_eq!(resolve(midpoint, LayoutVariant::Letters, &map, &profile), Some("a"));
        }
    }

    /// Test 5: Missing and empty variants resolve to nothing
    #[test]
    fn test_missing_variant_resolves_nothing() {
        let map = letters_map(TouchModel::default());
        let profile = DeviceProfile::default();

        assert_eq!(resolve(Point::new(1.0, 1.0), LayoutVariant::Letters, &map, &profile), None);
        assert_eq!(resolve(Point::new(1.0, 1.0), LayoutVariant::Digits, &map, &profile), None);
    }

    /// Test 6: Centroids are scaled by the device profile before comparing
    #[test]
    fn test_profile_scales_centroids() {
        let map = letters_map(model(&[("a", &[(100.0, 50.0)]), ("b", &[(170.0, 50.0)])]));

        // (100, 50) stretched in landscape lands at x = 175.5, next to "b"'s stored x.
        let landscape = DeviceProfile::new(ScreenClass::Compact, Orientation::Landscape);
        let point = Point::new(175.0, 37.5);

        assert_eq!(resolve(point, LayoutVariant::Letters, &map, &DeviceProfile::default()), Some("b"));
        assert_eq!(resolve(point, LayoutVariant::Letters, &map, &landscape), Some("a"));
    }

    /// Test 7: Resolution reports the squared distance
    #[test]
    fn test_resolution_distance() {
        let m = model(&[("a", &[(0.0, 0.0)])]);
        let resolution = resolve_in_model(Point::new(3.0, 4.0), &m, &DeviceProfile::default()).unwrap();

        assert_eq!(resolution.key, "a");
        assert_eq!(resolution.distance_squared, 25.0);
    }

    /// Test 8: Touching the centre of a bundled key resolves to it
    #[test]
    fn test_bundled_key_centers_resolve_to_themselves() {
        let loader = LayoutModelLoader::bundled();
        let touch_map = loader.load_touch_map();
        let geometry = loader.load_keyboard_geometry(&touch_map);
        let profile = DeviceProfile::default();

        for variant in LayoutVariant::ALL {
            for key in geometry.get(variant).unwrap().keys() {
                let resolved = resolve(key.center(), variant, &touch_map, &profile);
                assert_eq!(resolved, Some(key.identifier.as_str()), "{} on {}", key.identifier, variant);
            }
        }
    }
}
