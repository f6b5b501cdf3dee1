// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Translation bounds for content inside a viewport.
//!
//! Content is positioned by the offset of its top-left corner relative to the
//! viewport origin. [`bounds`] returns the most negative offset permitted on
//! each axis; [`clamp_offset`] applies the full clamping rule used by panning,
//! inertia, pinch and wheel zoom.
//!
//! ```
//! use kurbo::{Point, Size};
//! use loupe_view2d::{ClampLimits, bounds, clamp_offset};
//!
//! let content = Size::new(2000.0, 1500.0);
//! let viewport = Size::new(800.0, 600.0);
//!
//! let b = bounds(content, viewport);
//! assert_eq!(b.min_x, -1200.0);
//! assert_eq!(b.min_y, -900.0);
//!
//! let clamped = clamp_offset(Point::new(50.0, -5000.0), content, viewport, ClampLimits::pan(0.0));
//! assert_eq!(clamped, Point::new(0.0, -900.0));
//! ```

use kurbo::{Point, Size};

/// Most negative offsets permitted for content inside a viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Lower horizontal limit.
    ///
    /// Positive (the centering offset) when the content is narrower than the
    /// viewport.
    pub min_x: f64,
    /// Lower vertical limit.
    pub min_y: f64,
}

/// Computes the lower translation limits for `content` inside `viewport`.
///
/// - Narrower content is centered: `min_x = (viewport.width - content.width) / 2`.
/// - Wider content may not recede past the viewport's right edge:
///   `min_x = viewport.width - content.width`.
/// - Vertically the limit is always `viewport.height - content.height`; the
///   symmetric centering case is handled by [`clamp_offset`].
#[must_use]
pub fn bounds(content: Size, viewport: Size) -> Bounds {
    let min_x = if content.width < viewport.width {
        (viewport.width - content.width) / 2.0
    } else {
        viewport.width - content.width
    };
    Bounds {
        min_x,
        min_y: viewport.height - content.height,
    }
}

/// Upper horizontal limit applied by [`clamp_offset`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClampLimits {
    /// Largest offset allowed on the x axis.
    ///
    /// Usually `0.0`, or a non-negative allowance that keeps content from
    /// sliding under a persistent side panel.
    pub max_x: f64,
    /// Value used when the candidate x offset exceeds [`ClampLimits::max_x`].
    pub x_ceiling_fallback: f64,
}

impl ClampLimits {
    /// Limits used by panning, inertia and zooming: x is capped at `max_x`.
    #[must_use]
    pub fn pan(max_x: f64) -> Self {
        Self {
            max_x,
            x_ceiling_fallback: max_x,
        }
    }

    /// Limits used by the location zoom: an x offset past `max_x` snaps to
    /// `fallback` instead.
    #[must_use]
    pub fn with_fallback(max_x: f64, fallback: f64) -> Self {
        Self {
            max_x,
            x_ceiling_fallback: fallback,
        }
    }
}

impl Default for ClampLimits {
    fn default() -> Self {
        Self::pan(0.0)
    }
}

/// Clamps a candidate content offset.
///
/// Horizontal: past [`ClampLimits::max_x`] the offset becomes
/// [`ClampLimits::x_ceiling_fallback`]; below [`Bounds::min_x`] it becomes
/// `min_x`. The lower limit wins, which is what keeps narrow content centered.
///
/// Vertical: below [`Bounds::min_y`] the offset becomes `min_y`. A positive
/// offset is replaced by the centering offset when the content is shorter than
/// the viewport, or by `0.0` otherwise.
#[must_use]
pub fn clamp_offset(candidate: Point, content: Size, viewport: Size, limits: ClampLimits) -> Point {
    let Bounds { min_x, min_y } = bounds(content, viewport);

    let mut x = candidate.x;
    if x > limits.max_x {
        x = limits.x_ceiling_fallback;
    }
    if x < min_x {
        x = min_x;
    }

    let mut y = candidate.y;
    if y < min_y {
        y = min_y;
    }
    if y > 0.0 {
        y = centered_axis(content.height, viewport.height);
    }

    Point::new(x, y)
}

/// Offset that centers `content` along one axis, or `0.0` if it does not fit.
#[must_use]
pub fn centered_axis(content: f64, viewport: f64) -> f64 {
    if content < viewport {
        (viewport - content) / 2.0
    } else {
        0.0
    }
}

/// Offset that centers `content` inside `viewport` on both axes.
///
/// Axes where the content is at least as large as the viewport get `0.0`.
#[must_use]
pub fn centered_offset(content: Size, viewport: Size) -> Point {
    Point::new(
        centered_axis(content.width, viewport.width),
        centered_axis(content.height, viewport.height),
    )
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size};

    use super::{ClampLimits, bounds, centered_offset, clamp_offset};

    #[test]
    fn narrow_content_is_centered_horizontally() {
        let b = bounds(Size::new(400.0, 300.0), Size::new(800.0, 600.0));
        assert_eq!(b.min_x, 200.0);
        assert_eq!(b.min_y, 300.0);
    }

    #[test]
    fn wide_content_limits_are_negative() {
        for (cw, vw) in [(801.0, 800.0), (1600.0, 800.0), (10_000.0, 375.0)] {
            let b = bounds(Size::new(cw, 100.0), Size::new(vw, 100.0));
            assert!(b.min_x < 0.0, "expected negative limit for {cw} in {vw}");
            assert_eq!(b.min_x, vw - cw);
        }
    }

    #[test]
    fn equal_width_is_not_negative() {
        let b = bounds(Size::new(800.0, 100.0), Size::new(800.0, 100.0));
        assert_eq!(b.min_x, 0.0);
    }

    #[test]
    fn clamp_keeps_right_edge_inside_viewport() {
        let content = Size::new(1600.0, 1200.0);
        let viewport = Size::new(800.0, 600.0);
        let p = clamp_offset(Point::new(-5000.0, -5000.0), content, viewport, ClampLimits::pan(0.0));
        assert_eq!(p, Point::new(-800.0, -600.0));
    }

    #[test]
    fn clamp_respects_side_panel_allowance() {
        let content = Size::new(1600.0, 1200.0);
        let viewport = Size::new(800.0, 600.0);
        let p = clamp_offset(Point::new(500.0, 0.0), content, viewport, ClampLimits::pan(300.0));
        assert_eq!(p.x, 300.0);
    }

    #[test]
    fn clamp_centers_short_content_vertically() {
        let content = Size::new(1600.0, 400.0);
        let viewport = Size::new(800.0, 600.0);
        let p = clamp_offset(Point::new(-10.0, -50.0), content, viewport, ClampLimits::pan(0.0));
        assert_eq!(p.y, 100.0);
    }

    #[test]
    fn fallback_applies_only_past_the_ceiling() {
        let content = Size::new(1600.0, 1200.0);
        let viewport = Size::new(800.0, 600.0);
        let limits = ClampLimits::with_fallback(0.0, 120.0);
        assert_eq!(
            clamp_offset(Point::new(10.0, 0.0), content, viewport, limits).x,
            120.0
        );
        assert_eq!(
            clamp_offset(Point::new(-10.0, 0.0), content, viewport, limits).x,
            -10.0
        );
    }

    #[test]
    fn centered_offset_only_centers_smaller_axes() {
        let p = centered_offset(Size::new(400.0, 900.0), Size::new(800.0, 600.0));
        assert_eq!(p, Point::new(200.0, 0.0));
    }
}
