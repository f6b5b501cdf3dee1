// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::bounds::{ClampLimits, centered_axis, centered_offset, clamp_offset};
use crate::modes::ViewMode;

/// Authoritative pan/zoom state of an image inside a viewport.
///
/// `ViewportState` tracks where the content's top-left corner sits relative to
/// the viewport origin (the offset) and how large the content is currently
/// rendered. Zoom is uniform and expressed two ways:
/// - the zoom ratio, `content.width / base.width`;
/// - the zoom percent, a linear `0..=100` scale between the base (fitted) width
///   and the image's natural pixel width.
///
/// Content is never smaller than the base size nor wider than the natural
/// width, so the zoom percent always stays within `0..=100`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewportState {
    mode: ViewMode,
    viewport: Size,
    natural: Size,
    base: Size,
    content: Size,
    offset: Point,
    initial_offset: Point,
    zoom_percent: f64,
    has_zoomed_to_location: bool,
}

impl ViewportState {
    /// Lays out an image of `natural` size inside `viewport`.
    ///
    /// - [`ViewMode::Expanded`]: the image is fitted inside the viewport,
    ///   preserving aspect ratio, and centered on both axes.
    /// - [`ViewMode::Inline`]: the image spans the viewport width; the viewport
    ///   height is replaced by the resulting content height.
    ///
    /// The returned state is at zoom percent `0` and has not zoomed to any
    /// location. Degenerate input produces a state for which
    /// [`ViewportState::is_degenerate`] returns `true`.
    #[must_use]
    pub fn fit(viewport: Size, natural: Size, mode: ViewMode) -> Self {
        if !is_positive(viewport) || !is_positive(natural) {
            return Self {
                mode,
                viewport,
                natural,
                ..Self::default()
            };
        }

        let (viewport, base) = match mode {
            ViewMode::Expanded => {
                let scale = (viewport.width / natural.width).min(viewport.height / natural.height);
                (viewport, natural * scale)
            }
            ViewMode::Inline => {
                let height = viewport.width * natural.height / natural.width;
                let base = Size::new(viewport.width, height);
                (base, base)
            }
        };
        let offset = centered_offset(base, viewport);

        Self {
            mode,
            viewport,
            natural,
            base,
            content: base,
            offset,
            initial_offset: offset,
            zoom_percent: 0.0,
            has_zoomed_to_location: false,
        }
    }

    /// Returns `true` if the viewport or content has a zero, negative or
    /// non-finite dimension. Geometry operations are no-ops in that case.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !is_positive(self.viewport) || !is_positive(self.base) || !is_positive(self.content)
    }

    /// Presentation mode used for the last layout.
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Viewport size in logical pixels.
    #[must_use]
    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    /// Natural pixel size of the image.
    #[must_use]
    pub fn natural_size(&self) -> Size {
        self.natural
    }

    /// Content size at zoom percent `0`.
    #[must_use]
    pub fn base_size(&self) -> Size {
        self.base
    }

    /// Current rendered content size.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content
    }

    /// Current offset of the content's top-left corner.
    #[must_use]
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Offset chosen by the last layout.
    #[must_use]
    pub fn initial_offset(&self) -> Point {
        self.initial_offset
    }

    /// Current content rectangle in viewport coordinates.
    #[must_use]
    pub fn content_rect(&self) -> Rect {
        Rect::from_origin_size(self.offset, self.content)
    }

    /// Current zoom percent in `0..=100`.
    #[must_use]
    pub fn zoom_percent(&self) -> f64 {
        self.zoom_percent
    }

    /// Current zoom ratio, `content.width / base.width`.
    ///
    /// Returns `1.0` for degenerate layouts.
    #[must_use]
    pub fn zoom_ratio(&self) -> f64 {
        if self.base.width > 0.0 {
            self.content.width / self.base.width
        } else {
            1.0
        }
    }

    /// Largest permitted content width (the image's natural width).
    #[must_use]
    pub fn max_content_width(&self) -> f64 {
        self.natural.width
    }

    /// Returns `true` if there is room to zoom beyond the base size.
    #[must_use]
    pub fn can_zoom(&self) -> bool {
        self.natural.width > self.base.width
    }

    /// Whether a location zoom has happened since the last layout.
    #[must_use]
    pub fn has_zoomed_to_location(&self) -> bool {
        self.has_zoomed_to_location
    }

    /// Zoom percent for a content `width`, without clamping.
    ///
    /// Returns `0.0` when the image leaves no room to zoom.
    #[must_use]
    pub fn raw_zoom_percent_for_width(&self, width: f64) -> f64 {
        let range = self.natural.width - self.base.width;
        if range <= 0.0 {
            return 0.0;
        }
        (width - self.base.width) * 100.0 / range
    }

    /// Zoom percent for a content `width`, clamped into `0..=100`.
    #[must_use]
    pub fn zoom_percent_for_width(&self, width: f64) -> f64 {
        self.raw_zoom_percent_for_width(width).clamp(0.0, 100.0)
    }

    /// Content size for a given `width`, keeping the base aspect ratio.
    #[must_use]
    pub fn size_for_width(&self, width: f64) -> Size {
        if self.base.width <= 0.0 {
            return Size::ZERO;
        }
        Size::new(width, width * self.base.height / self.base.width)
    }

    /// Clamps a candidate offset against the current content and viewport.
    #[must_use]
    pub fn clamp(&self, candidate: Point, limits: ClampLimits) -> Point {
        clamp_offset(candidate, self.content, self.viewport, limits)
    }

    /// Moves the content to `candidate`, clamped.
    ///
    /// Returns `true` if the offset changed.
    pub fn pan_to(&mut self, candidate: Point, limits: ClampLimits) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let next = self.clamp(candidate, limits);
        if next == self.offset {
            return false;
        }
        self.offset = next;
        true
    }

    /// Moves the content by `delta`, clamped.
    ///
    /// Returns `true` if the offset changed.
    pub fn pan_by(&mut self, delta: Vec2, limits: ClampLimits) -> bool {
        self.pan_to(self.offset + delta, limits)
    }

    /// Rescales the content by `factor`, keeping the point at
    /// `anchor_fraction` of the content (in `0..=1` per axis) visually fixed.
    ///
    /// The new width is clamped into `[base.width, natural.width]` and the
    /// offset is clamped afterwards. This is the routine shared by wheel and
    /// button zoom. Returns `true` if the content size or offset changed.
    pub fn rescale_about(&mut self, factor: f64, anchor_fraction: Point, limits: ClampLimits) -> bool {
        if self.is_degenerate() || factor.is_nan() || factor <= 0.0 {
            return false;
        }
        let old = self.content;
        let mut width = factor * old.width;
        if width > self.natural.width {
            width = self.natural.width;
        }
        if width < self.base.width {
            width = self.base.width;
        }
        let next = self.size_for_width(width);
        let grow = (next.width - old.width) / old.width;
        let candidate = Point::new(
            -old.width * grow * anchor_fraction.x + self.offset.x,
            -old.height * grow * anchor_fraction.y + self.offset.y,
        );
        let before = (self.content, self.offset);
        self.content = next;
        self.offset = self.clamp(candidate, limits);
        self.zoom_percent = self.zoom_percent_for_width(next.width);
        before != (self.content, self.offset)
    }

    /// Applies one pinch step.
    ///
    /// `start_offset`/`start_size` are the values at pinch start,
    /// `anchor_fraction` is the pinch midpoint's position within the content at
    /// pinch start and `center_shift` is how far the midpoint has travelled
    /// since. `zoom_value` is the unclamped zoom ratio implied by the finger
    /// distance.
    ///
    /// The zoom ratio is clamped so the content width stays within
    /// `[base.width, natural.width]`; the applied ratio is returned.
    pub fn pinch_to(
        &mut self,
        start_offset: Point,
        start_size: Size,
        anchor_fraction: Point,
        center_shift: Vec2,
        zoom_value: f64,
        limits: ClampLimits,
    ) -> f64 {
        if self.is_degenerate() {
            return self.zoom_ratio();
        }
        let raw_percent = self.raw_zoom_percent_for_width(self.base.width * zoom_value);
        let applied = if raw_percent >= 100.0 {
            self.natural.width / self.base.width
        } else if raw_percent <= 0.0 {
            1.0
        } else {
            zoom_value
        };
        let next = self.base * applied;
        let candidate = Point::new(
            start_offset.x + (start_size.width - next.width) * anchor_fraction.x + center_shift.x,
            start_offset.y + (start_size.height - next.height) * anchor_fraction.y + center_shift.y,
        );
        self.content = next;
        self.offset = self.clamp(candidate, limits);
        self.zoom_percent = raw_percent.clamp(0.0, 100.0);
        applied
    }

    /// Sets the content width directly (clamped into the zoom range) and moves
    /// the content to `candidate`.
    pub fn set_content_width(&mut self, width: f64, candidate: Point, limits: ClampLimits) {
        if self.is_degenerate() {
            return;
        }
        let width = width.min(self.natural.width).max(self.base.width);
        self.content = self.size_for_width(width);
        self.offset = self.clamp(candidate, limits);
        self.zoom_percent = self.zoom_percent_for_width(width);
    }

    /// Commits a fully computed offset/size pair without clamping.
    ///
    /// Used for values that have already been clamped by a planner, such as
    /// [`crate::plan_location_zoom`].
    pub fn commit(&mut self, offset: Point, content: Size, zoom_percent: f64) {
        self.offset = offset;
        self.content = content;
        self.zoom_percent = zoom_percent.clamp(0.0, 100.0);
    }

    /// Records that a location zoom happened.
    pub fn mark_zoomed_to_location(&mut self) {
        self.has_zoomed_to_location = true;
    }

    /// Returns to the base size and the initial offset.
    ///
    /// Does nothing (and returns `false`) if the zoom percent is already `0`.
    pub fn recenter(&mut self) -> bool {
        if self.zoom_percent == 0.0 {
            return false;
        }
        self.content = self.base;
        self.offset = self.initial_offset;
        self.zoom_percent = 0.0;
        true
    }

    /// Pulls the content back so no positive offset remains.
    ///
    /// An axis with a positive offset is re-centered (or pinned to `0.0` when
    /// the content does not fit); other axes keep their offset. Returns the
    /// resulting offset. Calling this twice yields the same offset.
    pub fn reset_location(&mut self) -> Point {
        let x = if self.offset.x > 0.0 {
            centered_axis(self.content.width, self.viewport.width)
        } else {
            self.offset.x
        };
        let y = if self.offset.y > 0.0 {
            centered_axis(self.content.height, self.viewport.height)
        } else {
            self.offset.y
        };
        self.offset = Point::new(x, y);
        self.offset
    }

    /// Position of `point` (viewport coordinates) as a fraction of the content.
    ///
    /// `(0, 0)` is the content's top-left corner and `(1, 1)` its bottom-right.
    #[must_use]
    pub fn image_fraction_at(&self, point: Point) -> Point {
        if self.is_degenerate() {
            return Point::ZERO;
        }
        Point::new(
            (point.x - self.offset.x) / self.content.width,
            (point.y - self.offset.y) / self.content.height,
        )
    }

    /// Viewport position of a content fraction.
    #[must_use]
    pub fn point_at_fraction(&self, fraction: Point) -> Point {
        Point::new(
            self.offset.x + fraction.x * self.content.width,
            self.offset.y + fraction.y * self.content.height,
        )
    }

    /// The pure transform the host applies to the base-size content.
    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        ViewTransform {
            offset: self.offset.to_vec2(),
            scale: self.zoom_ratio(),
        }
    }

    /// Snapshot of the current state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            mode: self.mode,
            viewport: self.viewport,
            natural: self.natural,
            base: self.base,
            content_rect: self.content_rect(),
            zoom_percent: self.zoom_percent,
            zoom_ratio: self.zoom_ratio(),
            has_zoomed_to_location: self.has_zoomed_to_location,
        }
    }
}

/// Translation plus uniform scale applied to content laid out at base size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    /// Content offset in viewport coordinates.
    pub offset: Vec2,
    /// Uniform scale relative to the base size.
    pub scale: f64,
}

impl ViewTransform {
    /// Identity transform.
    pub const IDENTITY: Self = Self {
        offset: Vec2::ZERO,
        scale: 1.0,
    };

    /// Converts to an affine map from base-size content space to viewport space.
    #[must_use]
    pub fn to_affine(self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Debug snapshot of a [`ViewportState`].
#[derive(Clone, Copy, Debug)]
pub struct ViewportDebugInfo {
    /// Presentation mode.
    pub mode: ViewMode,
    /// Viewport size.
    pub viewport: Size,
    /// Natural image size.
    pub natural: Size,
    /// Content size at zoom percent `0`.
    pub base: Size,
    /// Current content rectangle in viewport coordinates.
    pub content_rect: Rect,
    /// Current zoom percent.
    pub zoom_percent: f64,
    /// Current zoom ratio.
    pub zoom_ratio: f64,
    /// Whether a location zoom happened since the last layout.
    pub has_zoomed_to_location: bool,
}

fn is_positive(size: Size) -> bool {
    size.width > 0.0 && size.height > 0.0 && size.is_finite()
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};

    use super::ViewportState;
    use crate::bounds::ClampLimits;
    use crate::modes::ViewMode;

    fn expanded() -> ViewportState {
        // 4000x2000 image in an 800x600 window: fitted to 800x400.
        ViewportState::fit(
            Size::new(800.0, 600.0),
            Size::new(4000.0, 2000.0),
            ViewMode::Expanded,
        )
    }

    #[test]
    fn expanded_fit_contains_and_centers() {
        let vp = expanded();
        assert_eq!(vp.base_size(), Size::new(800.0, 400.0));
        assert_eq!(vp.offset(), Point::new(0.0, 100.0));
        assert_eq!(vp.initial_offset(), vp.offset());
        assert_eq!(vp.zoom_percent(), 0.0);
        assert_eq!(vp.zoom_ratio(), 1.0);
    }

    #[test]
    fn inline_fit_spans_width() {
        let vp = ViewportState::fit(
            Size::new(1000.0, 10.0),
            Size::new(2000.0, 1000.0),
            ViewMode::Inline,
        );
        assert_eq!(vp.base_size(), Size::new(1000.0, 500.0));
        assert_eq!(vp.viewport_size(), Size::new(1000.0, 500.0));
        assert_eq!(vp.offset(), Point::ZERO);
    }

    #[test]
    fn degenerate_layout_is_a_no_op() {
        let mut vp = ViewportState::fit(Size::ZERO, Size::new(100.0, 100.0), ViewMode::Expanded);
        assert!(vp.is_degenerate());
        assert!(!vp.pan_by(Vec2::new(10.0, 10.0), ClampLimits::default()));
        assert!(!vp.rescale_about(2.0, Point::new(0.5, 0.5), ClampLimits::default()));
        assert_eq!(vp.image_fraction_at(Point::new(5.0, 5.0)), Point::ZERO);
    }

    #[test]
    fn zoom_percent_is_linear_between_base_and_natural() {
        let vp = expanded();
        assert_eq!(vp.zoom_percent_for_width(800.0), 0.0);
        assert_eq!(vp.zoom_percent_for_width(2400.0), 50.0);
        assert_eq!(vp.zoom_percent_for_width(4000.0), 100.0);
        assert_eq!(vp.zoom_percent_for_width(9000.0), 100.0);
        assert_eq!(vp.zoom_percent_for_width(10.0), 0.0);
    }

    #[test]
    fn rescale_keeps_anchor_fixed_when_unclamped() {
        let mut vp = expanded();
        // Zoom in first so the anchor is not affected by centering.
        vp.set_content_width(2400.0, Point::new(-800.0, -300.0), ClampLimits::default());
        let anchor_view = Point::new(400.0, 300.0);
        let fraction = vp.image_fraction_at(anchor_view);

        assert!(vp.rescale_about(1.25, fraction, ClampLimits::default()));
        let after = vp.point_at_fraction(fraction);
        assert!((after.x - anchor_view.x).abs() < 1e-9);
        assert!((after.y - anchor_view.y).abs() < 1e-9);
        assert_eq!(vp.content_size().width, 3000.0);
    }

    #[test]
    fn rescale_clamps_to_zoom_range() {
        let mut vp = expanded();
        vp.rescale_about(100.0, Point::new(0.5, 0.5), ClampLimits::default());
        assert_eq!(vp.content_size().width, 4000.0);
        assert_eq!(vp.zoom_percent(), 100.0);

        vp.rescale_about(0.001, Point::new(0.5, 0.5), ClampLimits::default());
        assert_eq!(vp.content_size().width, 800.0);
        assert_eq!(vp.zoom_percent(), 0.0);
    }

    #[test]
    fn pinch_clamps_to_exact_extremes() {
        let mut vp = expanded();
        let start = (vp.offset(), vp.content_size());
        let applied = vp.pinch_to(
            start.0,
            start.1,
            Point::new(0.5, 0.5),
            Vec2::ZERO,
            50.0,
            ClampLimits::default(),
        );
        assert_eq!(applied, 5.0);
        assert_eq!(vp.zoom_percent(), 100.0);
        assert_eq!(vp.content_size().width, 4000.0);

        let applied = vp.pinch_to(
            start.0,
            start.1,
            Point::new(0.5, 0.5),
            Vec2::ZERO,
            0.2,
            ClampLimits::default(),
        );
        assert_eq!(applied, 1.0);
        assert_eq!(vp.zoom_percent(), 0.0);
        assert_eq!(vp.content_size(), vp.base_size());
    }

    #[test]
    fn recenter_only_acts_when_zoomed() {
        let mut vp = expanded();
        assert!(!vp.recenter());
        vp.rescale_about(2.0, Point::new(0.5, 0.5), ClampLimits::default());
        assert!(vp.recenter());
        assert_eq!(vp.content_size(), vp.base_size());
        assert_eq!(vp.offset(), vp.initial_offset());
    }

    #[test]
    fn reset_location_is_idempotent() {
        let mut vp = expanded();
        vp.set_content_width(1600.0, Point::new(-100.0, -100.0), ClampLimits::pan(200.0));
        vp.commit(Point::new(150.0, -50.0), vp.content_size(), vp.zoom_percent());
        let first = vp.reset_location();
        assert_eq!(first, Point::new(0.0, -50.0));
        let second = vp.reset_location();
        assert_eq!(first, second);
    }

    #[test]
    fn fraction_round_trip_at_center() {
        let vp = expanded();
        let center = vp.content_rect().center();
        assert_eq!(vp.image_fraction_at(center), Point::new(0.5, 0.5));
    }

    #[test]
    fn transform_maps_base_corner_to_offset() {
        let mut vp = expanded();
        vp.set_content_width(1600.0, Point::new(-200.0, -100.0), ClampLimits::default());
        let t = vp.transform();
        assert_eq!(t.scale, 2.0);
        let corner = t.to_affine() * Point::new(800.0, 400.0);
        let rect = vp.content_rect();
        assert!((corner.x - rect.x1).abs() < 1e-9);
        assert!((corner.y - rect.y1).abs() < 1e-9);
    }
}
