// SPDX-License-Identifier: GPL-3.0-only

//! Device profile: screen-size class and orientation coefficients.
//!
//! Stored touch centroids and key frames are authored for the smallest
//! portrait screen. A [`DeviceProfile`] carries the scale factors for the
//! current screen class and rotation, computed once per rotation and passed
//! explicitly to the resolver and to geometry consumers.
//!
//! # Coefficients
//!
//! | Screen class | Models                        | Scale      | Y offset |
//! |--------------|-------------------------------|------------|----------|
//! | Compact      | everything else               | 1.0        | 0        |
//! | Regular      | iPhone 6, iPhone 6s           | 1.171875   | 6        |
//! | Plus         | iPhone 6 Plus, iPhone 6s Plus | 1.29375    | 6        |
//!
//! Landscape stretches x and squashes y (0.72 on Plus, 0.75 otherwise).

use crate::app_settings;
use crate::layout::{KeyGeometry, KeyKind, Point};

/// Screen-size class of the device running the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenClass {
    /// The authoring size; no adjustment
    #[default]
    Compact,
    /// 4.7" phones
    Regular,
    /// 5.5" phones
    Plus,
}

impl ScreenClass {
    /// Classifies a device by its marketing model name.
    pub fn from_model_name(model_name: &str) -> Self {
        match model_name {
            "iPhone 6" | "iPhone 6s" => Self::Regular,
            "iPhone 6 Plus" | "iPhone 6s Plus" => Self::Plus,
            _ => Self::Compact,
        }
    }

    /// Uniform scale applied to stored geometry.
    pub fn coefficient(&self) -> f32 {
        match self {
            Self::Compact => 1.0,
            Self::Regular => app_settings::REGULAR_SCREEN_COEFFICIENT,
            Self::Plus => app_settings::PLUS_SCREEN_COEFFICIENT,
        }
    }

    /// Vertical offset subtracted from stored geometry.
    pub fn y_offset(&self) -> f32 {
        match self {
            Self::Compact => 0.0,
            Self::Regular | Self::Plus => app_settings::LARGE_SCREEN_Y_OFFSET,
        }
    }

    /// Returns `true` when stored geometry needs device scaling.
    pub fn is_adjusted(&self) -> bool {
        !matches!(self, Self::Compact)
    }

    fn landscape_y_scale(&self) -> f32 {
        match self {
            Self::Plus => app_settings::LANDSCAPE_PLUS_Y_SCALE,
            _ => app_settings::LANDSCAPE_Y_SCALE,
        }
    }
}

/// Interface orientation as far as the keyboard cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Portrait when the screen is narrower than it is tall.
    pub fn from_bounds(width: f32, height: f32) -> Self {
        if width < height {
            Self::Portrait
        } else {
            Self::Landscape
        }
    }
}

/// Affine transform `(x * x_scale, y * y_scale - y_offset)` for touch centroids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentroidTransform {
    pub x_scale: f32,
    pub y_scale: f32,
    pub y_offset: f32,
}

impl CentroidTransform {
    pub const IDENTITY: CentroidTransform = CentroidTransform {
        x_scale: 1.0,
        y_scale: 1.0,
        y_offset: 0.0,
    };

    pub fn apply(&self, point: Point) -> Point {
        Point::new(point.x * self.x_scale, point.y * self.y_scale - self.y_offset)
    }
}

/// Screen class and orientation, with the centroid transform precomputed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceProfile {
    screen_class: ScreenClass,
    orientation: Orientation,
    centroid_transform: CentroidTransform,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self::new(ScreenClass::Compact, Orientation::Portrait)
    }
}

impl DeviceProfile {
    pub fn new(screen_class: ScreenClass, orientation: Orientation) -> Self {
        Self {
            screen_class,
            orientation,
            centroid_transform: Self::compute_centroid_transform(screen_class, orientation),
        }
    }

    /// Builds a profile from the device model name and current screen bounds.
    pub fn detect(model_name: &str, screen_width: f32, screen_height: f32) -> Self {
        Self::new(
            ScreenClass::from_model_name(model_name),
            Orientation::from_bounds(screen_width, screen_height),
        )
    }

    /// Returns the same device in another orientation.
    pub fn with_orientation(self, orientation: Orientation) -> Self {
        Self::new(self.screen_class, orientation)
    }

    pub fn screen_class(&self) -> ScreenClass {
        self.screen_class
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn centroid_transform(&self) -> CentroidTransform {
        self.centroid_transform
    }

    /// Maps a stored centroid into current view coordinates.
    pub fn transform_centroid(&self, centroid: Point) -> Point {
        self.centroid_transform.apply(centroid)
    }

    // Landscape is applied before the device scale, and the device y offset
    // is only applied in portrait.
    fn compute_centroid_transform(
        screen_class: ScreenClass,
        orientation: Orientation,
    ) -> CentroidTransform {
        let landscape = orientation == Orientation::Landscape;
        let mut transform = CentroidTransform::IDENTITY;

        if landscape {
            transform.x_scale *= app_settings::LANDSCAPE_TOUCH_X_SCALE;
            transform.y_scale *= screen_class.landscape_y_scale();
        }

        if screen_class.is_adjusted() {
            transform.x_scale *= screen_class.coefficient();
            if !landscape {
                transform.y_offset = screen_class.y_offset();
            }
        }

        transform
    }

    /// Scales a stored key frame into current view coordinates.
    ///
    /// Row keys get the device scale first and the landscape scale second;
    /// special keys the other way around. The order only matters for `y`.
    pub fn scale_key(&self, key: &KeyGeometry) -> KeyGeometry {
        let mut scaled = key.clone();

        match key.kind {
            KeyKind::Row => {
                self.apply_device_scale(&mut scaled);
                self.apply_landscape_scale(&mut scaled);
            }
            KeyKind::Special => {
                self.apply_landscape_scale(&mut scaled);
                self.apply_device_scale(&mut scaled);
            }
        }

        scaled
    }

    fn apply_device_scale(&self, key: &mut KeyGeometry) {
        if !self.screen_class.is_adjusted() {
            return;
        }
        let coefficient = self.screen_class.coefficient();
        key.x *= coefficient;
        key.y -= self.screen_class.y_offset();
        key.width *= coefficient;
        key.height *= coefficient;
    }

    fn apply_landscape_scale(&self, key: &mut KeyGeometry) {
        if self.orientation != Orientation::Landscape {
            return;
        }
        key.x *= app_settings::LANDSCAPE_LAYOUT_X_SCALE;
        key.y *= app_settings::LANDSCAPE_Y_SCALE;
        key.width *= app_settings::LANDSCAPE_LAYOUT_X_SCALE;
        key.height *= self.screen_class.landscape_y_scale();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn key(kind: KeyKind) -> KeyGeometry {
        KeyGeometry {
            identifier: "k".into(),
            kind,
            x: 100.0,
            y: 20.0,
            width: 26.0,
            height: 38.0,
        }
    }

    /// Test 1: Model names map to screen classes
    #[test]
    fn test_screen_class_from_model_name() {
        assert_eq!(ScreenClass::from_model_name("iPhone 6"), ScreenClass::Regular);
        assert_eq!(ScreenClass::from_model_name("iPhone 6s"), ScreenClass::Regular);
        assert_eq!(ScreenClass::from_model_name("iPhone 6 Plus"), ScreenClass::Plus);
        assert_eq!(ScreenClass::from_model_name("iPhone 6s Plus"), ScreenClass::Plus);
        assert_eq!(ScreenClass::from_model_name("iPhone 5s"), ScreenClass::Compact);
        assert_eq!(ScreenClass::from_model_name("Simulator"), ScreenClass::Compact);
    }

    /// Test 2: Orientation from screen bounds
    #[test]
    fn test_orientation_from_bounds() {
        assert_eq!(Orientation::from_bounds(320.0, 568.0), Orientation::Portrait);
        assert_eq!(Orientation::from_bounds(568.0, 320.0), Orientation::Landscape);
        assert_eq!(Orientation::from_bounds(500.0, 500.0), Orientation::Landscape);
    }

    /// Test 3: Compact portrait leaves centroids untouched
    #[test]
    fn test_compact_portrait_is_identity() {
        let profile = DeviceProfile::default();
        assert_eq!(profile.centroid_transform(), CentroidTransform::IDENTITY);

        let p = Point::new(16.0, 29.0);
        assert_eq!(profile.transform_centroid(p), p);
    }

    /// Test 4: Regular portrait scales x and offsets y without scaling it
    #[test]
    fn test_regular_portrait_centroid() {
        let profile = DeviceProfile::new(ScreenClass::Regular, Orientation::Portrait);
        let p = profile.transform_centroid(Point::new(100.0, 50.0));

        assert!(approx(p.x, 117.1875));
        assert!(approx(p.y, 44.0));
    }

    /// Test 5: Landscape on Plus stretches x twice and squashes y without offset
    #[test]
    fn test_plus_landscape_centroid() {
        let profile = DeviceProfile::new(ScreenClass::Plus, Orientation::Landscape);
        let p = profile.transform_centroid(Point::new(100.0, 50.0));

        assert!(approx(p.x, 100.0 * 1.755 * 1.29375));
        assert!(approx(p.y, 36.0));
    }

    /// Test 6: Row and special keys scale in different orders
    #[test]
    fn test_key_scaling_order() {
        let profile = DeviceProfile::new(ScreenClass::Regular, Orientation::Landscape);

        let row = profile.scale_key(&key(KeyKind::Row));
        assert!(approx(row.y, (20.0 - 6.0) * 0.75));
        assert!(approx(row.x, 100.0 * 1.171875 * 1.775));
        assert!(approx(row.height, 38.0 * 1.171875 * 0.75));

        let special = profile.scale_key(&key(KeyKind::Special));
        assert!(approx(special.y, 20.0 * 0.75 - 6.0));
        assert!(approx(special.width, row.width));
    }

    /// Test 7: Rotating keeps the screen class
    #[test]
    fn test_with_orientation() {
        let portrait = DeviceProfile::detect("iPhone 6 Plus", 414.0, 736.0);
        let landscape = portrait.with_orientation(Orientation::Landscape);

        assert_eq!(portrait.orientation(), Orientation::Portrait);
        assert_eq!(landscape.screen_class(), ScreenClass::Plus);
        assert_eq!(landscape.orientation(), Orientation::Landscape);
        assert_ne!(portrait.centroid_transform(), landscape.centroid_transform());
    }
}
