// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use kurbo::{Point, Rect, Size};

/// A note pinned to a normalized position on the unscaled image.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnnotationMarker {
    /// Horizontal position, `0.0..=1.0`.
    pub x_fraction: f64,
    /// Vertical position, `0.0..=1.0`.
    pub y_fraction: f64,
    /// Marker payload.
    pub text: String,
}

impl AnnotationMarker {
    /// Creates a marker at `fraction`.
    #[must_use]
    pub fn new(fraction: Point, text: impl Into<String>) -> Self {
        Self {
            x_fraction: fraction.x,
            y_fraction: fraction.y,
            text: text.into(),
        }
    }

    /// The marker position as a fraction point.
    #[must_use]
    pub fn fraction(&self) -> Point {
        Point::new(self.x_fraction, self.y_fraction)
    }
}

/// Geometry of the marker layer that sits on top of the content.
///
/// The layer mirrors the content rectangle so markers stay glued to the image
/// while it is panned and zoomed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerOverlay {
    rect: Rect,
    visible: bool,
}

impl Default for MarkerOverlay {
    fn default() -> Self {
        Self {
            rect: Rect::ZERO,
            visible: true,
        }
    }
}

impl MarkerOverlay {
    /// Current overlay rectangle in viewport coordinates.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Whether markers are shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Aligns the overlay with the content. Returns `true` if it moved or
    /// resized.
    pub fn update_dimensions(&mut self, rect: Rect) -> bool {
        if self.rect == rect {
            return false;
        }
        self.rect = rect;
        true
    }

    /// Shows or hides the overlay. Returns `true` if visibility changed.
    pub fn toggle_container_display(&mut self, show: bool) -> bool {
        if self.visible == show {
            return false;
        }
        self.visible = show;
        true
    }

    /// Marker position relative to the overlay's top-left corner.
    #[must_use]
    pub fn marker_position(&self, marker: &AnnotationMarker) -> Point {
        let size = self.rect.size();
        Point::new(size.width * marker.x_fraction, size.height * marker.y_fraction)
    }

    /// Index of the first marker within `allowance` pixels of `fraction`,
    /// measured at the overlay's current size.
    #[must_use]
    pub fn marker_near(
        &self,
        fraction: Point,
        markers: &[AnnotationMarker],
        allowance: f64,
    ) -> Option<usize> {
        let size = self.rect.size();
        let at = scale(fraction, size);
        markers
            .iter()
            .position(|m| scale(m.fraction(), size).distance(at) <= allowance)
    }

    /// Returns `true` if a marker lies within `allowance` pixels of `fraction`.
    #[must_use]
    pub fn is_near_marker(&self, fraction: Point, markers: &[AnnotationMarker], allowance: f64) -> bool {
        self.marker_near(fraction, markers, allowance).is_some()
    }
}

fn scale(fraction: Point, size: Size) -> Point {
    Point::new(fraction.x * size.width, fraction.y * size.height)
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::{Point, Rect};

    use super::{AnnotationMarker, MarkerOverlay};

    #[test]
    fn markers_follow_overlay_size() {
        let mut overlay = MarkerOverlay::default();
        assert!(overlay.update_dimensions(Rect::new(-100.0, -50.0, 900.0, 450.0)));
        assert!(!overlay.update_dimensions(Rect::new(-100.0, -50.0, 900.0, 450.0)));

        let marker = AnnotationMarker::new(Point::new(0.25, 0.5), "note");
        assert_eq!(overlay.marker_position(&marker), Point::new(250.0, 250.0));
    }

    #[test]
    fn toggle_reports_changes_only() {
        let mut overlay = MarkerOverlay::default();
        assert!(overlay.is_visible());
        assert!(!overlay.toggle_container_display(true));
        assert!(overlay.toggle_container_display(false));
        assert!(!overlay.is_visible());
    }

    #[test]
    fn proximity_uses_pixels() {
        let mut overlay = MarkerOverlay::default();
        overlay.update_dimensions(Rect::new(0.0, 0.0, 1000.0, 1000.0));
        let markers = vec![
            AnnotationMarker::new(Point::new(0.1, 0.1), "a"),
            AnnotationMarker::new(Point::new(0.5, 0.5), "b"),
        ];
        assert_eq!(overlay.marker_near(Point::new(0.503, 0.5), &markers, 5.0), Some(1));
        assert!(!overlay.is_near_marker(Point::new(0.51, 0.5), &markers, 5.0));
    }
}
