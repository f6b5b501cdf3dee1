// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot "zoom to location".
//!
//! Planning is pure: [`plan_location_zoom`] computes the target offset and size
//! for a normalized point, and [`ViewportState::apply_location_plan`] commits
//! it. Hosts typically position an annotation popover from the returned plan
//! once the (optional) transition completes.

use kurbo::{Point, Size};

use crate::bounds::{ClampLimits, clamp_offset};
use crate::viewport::ViewportState;

/// A request to center a normalized image point in the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LocationRequest {
    /// Horizontal position in the image, `0.0..=1.0`.
    pub x_fraction: f64,
    /// Vertical position in the image, `0.0..=1.0`.
    pub y_fraction: f64,
    /// Horizontal space reserved by the host (for example a side drawer).
    ///
    /// The target is shifted left by half of this.
    pub x_offset: f64,
    /// Vertical shift of the target in pixels.
    pub y_offset: f64,
    /// Offset used instead when the target x would exceed the side-panel
    /// allowance.
    pub x_min_offset: f64,
}

impl LocationRequest {
    /// Request for `fraction` with no shifts.
    #[must_use]
    pub fn at(fraction: Point) -> Self {
        Self {
            x_fraction: fraction.x,
            y_fraction: fraction.y,
            ..Self::default()
        }
    }
}

/// Tunables for [`plan_location_zoom`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocationParams {
    /// Zoom percent to force when no prior location zoom established a scale.
    pub zoom_to_percent: f64,
    /// Side-panel allowance (see [`ClampLimits::max_x`]).
    pub limit_x_offset: f64,
    /// Movement on both axes at or below this is applied without animation.
    pub animate_threshold: f64,
}

impl Default for LocationParams {
    fn default() -> Self {
        Self {
            zoom_to_percent: 50.0,
            limit_x_offset: 0.0,
            animate_threshold: 10.0,
        }
    }
}

/// Outcome of [`plan_location_zoom`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocationPlan {
    /// Final, clamped content offset.
    pub offset: Point,
    /// Final content size.
    pub content: Size,
    /// Zoom percent after the move.
    pub zoom_percent: f64,
    /// Whether the content was rescaled to the default zoom percent.
    pub forced_scale: bool,
    /// Whether the host should animate the move.
    pub animate: bool,
}

/// Plans centering `request` in the viewport.
///
/// A rescale to `zoom_to_percent` of the natural width is forced when no
/// location zoom happened yet, when the zoom percent is `0`, or when the
/// content is still shorter than the viewport. The forced width is kept within
/// `[base.width, natural.width]`.
///
/// Returns `None` for degenerate layouts.
#[must_use]
pub fn plan_location_zoom(
    state: &ViewportState,
    request: &LocationRequest,
    params: &LocationParams,
) -> Option<LocationPlan> {
    if state.is_degenerate() {
        return None;
    }
    let viewport = state.viewport_size();
    let current = state.content_size();
    let current_offset = state.offset();

    let forced_scale = !state.has_zoomed_to_location()
        || state.zoom_percent() == 0.0
        || current.height < viewport.height;

    let content = if forced_scale {
        let width = (state.max_content_width() * params.zoom_to_percent / 100.0)
            .min(state.max_content_width())
            .max(state.base_size().width);
        state.size_for_width(width)
    } else {
        current
    };

    let candidate = Point::new(
        -request.x_fraction * content.width - request.x_offset / 2.0 + viewport.width / 2.0,
        -request.y_fraction * content.height + viewport.height / 2.0 + request.y_offset,
    );
    let limits = ClampLimits::with_fallback(params.limit_x_offset, request.x_min_offset);
    let offset = clamp_offset(candidate, content, viewport, limits);

    let dx = offset.x - current_offset.x;
    let dy = offset.y - current_offset.y;
    let moved = dx != 0.0 || dy != 0.0;
    let still_short = dx == 0.0 && content.height < viewport.height;
    let small = dx.abs() <= params.animate_threshold && dy.abs() <= params.animate_threshold;
    let animate = moved && !(still_short || forced_scale || small);

    let zoom_percent = if forced_scale || !state.has_zoomed_to_location() {
        state.zoom_percent_for_width(content.width)
    } else {
        state.zoom_percent()
    };

    Some(LocationPlan {
        offset,
        content,
        zoom_percent,
        forced_scale,
        animate,
    })
}

impl ViewportState {
    /// Commits a [`LocationPlan`] and records that a location zoom happened.
    pub fn apply_location_plan(&mut self, plan: &LocationPlan) {
        self.commit(plan.offset, plan.content, plan.zoom_percent);
        self.mark_zoomed_to_location();
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size};

    use super::{LocationParams, LocationRequest, plan_location_zoom};
    use crate::modes::ViewMode;
    use crate::viewport::ViewportState;

    fn fresh() -> ViewportState {
        ViewportState::fit(
            Size::new(800.0, 600.0),
            Size::new(4000.0, 3000.0),
            ViewMode::Expanded,
        )
    }

    #[test]
    fn fresh_viewport_centers_midpoint_at_default_zoom() {
        let vp = fresh();
        let params = LocationParams::default();
        let plan = plan_location_zoom(&vp, &LocationRequest::at(Point::new(0.5, 0.5)), &params)
            .unwrap();

        assert!(plan.forced_scale);
        assert!(!plan.animate);
        assert_eq!(plan.content, Size::new(2000.0, 1500.0));
        assert_eq!(plan.offset, Point::new(-600.0, -450.0));
        assert_eq!(plan.zoom_percent, 37.5);

        let mut vp = vp;
        vp.apply_location_plan(&plan);
        let center = Point::new(400.0, 300.0);
        assert_eq!(vp.image_fraction_at(center), Point::new(0.5, 0.5));
        assert!(vp.has_zoomed_to_location());
    }

    #[test]
    fn second_jump_keeps_scale_and_animates() {
        let mut vp = fresh();
        let params = LocationParams::default();
        let first = plan_location_zoom(&vp, &LocationRequest::at(Point::new(0.5, 0.5)), &params)
            .unwrap();
        vp.apply_location_plan(&first);

        let second =
            plan_location_zoom(&vp, &LocationRequest::at(Point::new(0.25, 0.25)), &params).unwrap();
        assert!(!second.forced_scale);
        assert!(second.animate);
        assert_eq!(second.content, first.content);
        assert_eq!(second.zoom_percent, first.zoom_percent);
        assert_eq!(second.offset, Point::new(-100.0, -75.0));
    }

    #[test]
    fn tiny_moves_snap() {
        let mut vp = fresh();
        let params = LocationParams::default();
        let first = plan_location_zoom(&vp, &LocationRequest::at(Point::new(0.5, 0.5)), &params)
            .unwrap();
        vp.apply_location_plan(&first);

        let nudge =
            plan_location_zoom(&vp, &LocationRequest::at(Point::new(0.502, 0.5)), &params).unwrap();
        assert!(!nudge.animate);
    }

    #[test]
    fn positive_x_falls_back_to_min_offset() {
        let vp = fresh();
        let params = LocationParams::default();
        let request = LocationRequest {
            x_fraction: 0.0,
            y_fraction: 0.5,
            x_offset: 0.0,
            y_offset: 0.0,
            x_min_offset: 0.0,
        };
        let plan = plan_location_zoom(&vp, &request, &params).unwrap();
        assert_eq!(plan.offset.x, 0.0);
    }

    #[test]
    fn degenerate_layout_plans_nothing() {
        let vp = ViewportState::default();
        assert!(
            plan_location_zoom(&vp, &LocationRequest::default(), &LocationParams::default())
                .is_none()
        );
    }
}
