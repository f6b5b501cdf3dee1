// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-finger pinch geometry.
//!
//! A pinch is described by the distance between the two fingers and their
//! midpoint. [`PinchStart`] captures both at the start of the gesture, along
//! with where the midpoint fell inside the content, so later moves can keep
//! that point under the fingers.
//!
//! ```
//! use kurbo::Point;
//! use loupe_event_state::pinch::{PinchGeometry, PinchStart};
//!
//! let start = PinchGeometry::from_points(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
//! assert_eq!(start.distance, 100.0);
//! assert_eq!(start.center, Point::new(50.0, 0.0));
//!
//! let pinch = PinchStart::new(1_u32, 2_u32, start, Point::new(0.5, 0.5));
//! let now = PinchGeometry::from_points(Point::new(-50.0, 0.0), Point::new(150.0, 0.0));
//! assert_eq!(pinch.zoom_value(now.distance, 1.0), 2.0);
//! ```

use kurbo::{Point, Vec2};

/// Distance and midpoint of two touch points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchGeometry {
    /// Distance between the two points.
    pub distance: f64,
    /// Midpoint of the two points.
    pub center: Point,
}

impl PinchGeometry {
    /// Measures the pinch formed by `a` and `b`.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self {
            distance: a.distance(b),
            center: a.midpoint(b),
        }
    }
}

/// State captured when a pinch begins.
///
/// `K` identifies touches; hosts typically use the platform's touch id.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchStart<K> {
    /// First finger.
    pub finger_a: K,
    /// Second finger.
    pub finger_b: K,
    /// Finger distance at the start.
    pub start_distance: f64,
    /// Finger midpoint at the start.
    pub start_center: Point,
    /// Where `start_center` fell within the content, as a fraction.
    pub anchor_fraction: Point,
}

impl<K: Copy + PartialEq> PinchStart<K> {
    /// Captures a pinch between `finger_a` and `finger_b`.
    pub fn new(finger_a: K, finger_b: K, geometry: PinchGeometry, anchor_fraction: Point) -> Self {
        Self {
            finger_a,
            finger_b,
            start_distance: geometry.distance,
            start_center: geometry.center,
            anchor_fraction,
        }
    }

    /// Returns `true` if `id` is one of the pinching fingers.
    pub fn involves(&self, id: K) -> bool {
        self.finger_a == id || self.finger_b == id
    }

    /// Zoom value implied by `current_distance`, relative to `base_zoom`.
    ///
    /// A pinch that started with both fingers on the same spot keeps
    /// `base_zoom`.
    pub fn zoom_value(&self, current_distance: f64, base_zoom: f64) -> f64 {
        if self.start_distance <= 0.0 {
            return base_zoom;
        }
        current_distance / self.start_distance * base_zoom
    }

    /// How far the midpoint has travelled since the start.
    pub fn center_shift(&self, current_center: Point) -> Vec2 {
        current_center - self.start_center
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_is_symmetric() {
        let a = Point::new(10.0, 10.0);
        let b = Point::new(13.0, 14.0);
        assert_eq!(PinchGeometry::from_points(a, b), PinchGeometry::from_points(b, a));
        assert_eq!(PinchGeometry::from_points(a, b).distance, 5.0);
    }

    #[test]
    fn zoom_value_scales_from_baseline() {
        let g = PinchGeometry::from_points(Point::ZERO, Point::new(100.0, 0.0));
        let pinch = PinchStart::new(7_u64, 9_u64, g, Point::new(0.25, 0.75));
        assert_eq!(pinch.zoom_value(50.0, 3.0), 1.5);
        assert_eq!(pinch.zoom_value(200.0, 1.5), 3.0);
        assert!(pinch.involves(9));
        assert!(!pinch.involves(8));
    }

    #[test]
    fn coincident_fingers_keep_zoom() {
        let g = PinchGeometry::from_points(Point::new(5.0, 5.0), Point::new(5.0, 5.0));
        let pinch = PinchStart::new(0_u8, 1_u8, g, Point::ZERO);
        assert_eq!(pinch.zoom_value(80.0, 1.25), 1.25);
    }

    #[test]
    fn center_shift_tracks_midpoint() {
        let g = PinchGeometry::from_points(Point::ZERO, Point::new(100.0, 100.0));
        let pinch = PinchStart::new(0_u8, 1_u8, g, Point::ZERO);
        assert_eq!(pinch.center_shift(Point::new(60.0, 40.0)), Vec2::new(10.0, -10.0));
    }
}
