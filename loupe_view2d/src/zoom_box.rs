// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimap ("zoom box") projection.
//!
//! The minimap shows the whole image at a fixed base size. A box on top of it
//! marks the part of the image currently visible in the main viewport. Dragging
//! the box pans the main view; the mapping between the two is a pure scale by
//! `content / minimap base`.

use kurbo::{Point, Rect, Size};

use crate::bounds::bounds;
use crate::viewport::ViewportState;

/// Minimap geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ZoomBox {
    base: Size,
}

/// Result of [`ZoomBox::retarget`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomBoxTarget {
    /// Clamped box origin within the minimap.
    pub box_origin: Point,
    /// Unclamped main-view offset candidate; clamp it with the pan rules.
    pub main_offset: Point,
}

impl ZoomBox {
    /// Creates a minimap whose image is rendered at `base` size.
    #[must_use]
    pub fn new(base: Size) -> Self {
        Self { base }
    }

    /// Size of the minimap image.
    #[must_use]
    pub fn base(&self) -> Size {
        self.base
    }

    /// Updates the minimap image size.
    pub fn set_base(&mut self, base: Size) {
        self.base = base;
    }

    /// The box covering the whole minimap.
    #[must_use]
    pub fn reset(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.base)
    }

    /// Projects the main view onto the minimap.
    ///
    /// Each axis shrinks proportionally to how much of the content is visible,
    /// and the box origin is the scaled negative main offset, floored at zero.
    #[must_use]
    pub fn project(&self, state: &ViewportState) -> Rect {
        if state.is_degenerate() {
            return self.reset();
        }
        let content = state.content_size();
        let viewport = state.viewport_size();
        let offset = state.offset();

        let width_ratio = if viewport.width < content.width {
            viewport.width / content.width
        } else {
            1.0
        };
        let height_ratio = if viewport.height < content.height {
            viewport.height / content.height
        } else {
            1.0
        };

        let x = (-offset.x * self.base.width / content.width).max(0.0);
        let y = (-offset.y * self.base.height / content.height).max(0.0);

        Rect::from_origin_size(
            Point::new(x, y),
            Size::new(self.base.width * width_ratio, self.base.height * height_ratio),
        )
    }

    /// Maps a pointer inside the minimap to a box origin and a main-view
    /// offset.
    ///
    /// The box is centered under `pointer` and kept inside the minimap. The
    /// main offset is derived from the unclamped box position.
    #[must_use]
    pub fn retarget(&self, pointer: Point, box_size: Size, state: &ViewportState) -> ZoomBoxTarget {
        let origin = Point::new(
            pointer.x - box_size.width / 2.0,
            pointer.y - box_size.height / 2.0,
        );

        let content = state.content_size();
        let main_offset = if self.base.width > 0.0 && self.base.height > 0.0 {
            Point::new(
                -origin.x * content.width / self.base.width,
                -origin.y * content.height / self.base.height,
            )
        } else {
            state.offset()
        };

        let limits = bounds(self.base, box_size);
        let box_origin = Point::new(
            origin.x.min(limits.min_x.abs()).max(0.0),
            origin.y.min(limits.min_y.abs()).max(0.0),
        );

        ZoomBoxTarget {
            box_origin,
            main_offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};

    use super::ZoomBox;
    use crate::bounds::ClampLimits;
    use crate::modes::ViewMode;
    use crate::viewport::ViewportState;

    fn zoomed() -> ViewportState {
        let mut vp = ViewportState::fit(
            Size::new(800.0, 400.0),
            Size::new(4000.0, 2000.0),
            ViewMode::Expanded,
        );
        vp.set_content_width(3200.0, Point::new(-800.0, -400.0), ClampLimits::default());
        vp
    }

    #[test]
    fn unzoomed_view_covers_the_minimap() {
        let vp = ViewportState::fit(
            Size::new(800.0, 400.0),
            Size::new(4000.0, 2000.0),
            ViewMode::Expanded,
        );
        let zb = ZoomBox::new(Size::new(200.0, 100.0));
        assert_eq!(zb.project(&vp), Rect::new(0.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn zoomed_view_shrinks_and_moves_the_box() {
        let zb = ZoomBox::new(Size::new(200.0, 100.0));
        let rect = zb.project(&zoomed());
        assert_eq!(rect, Rect::new(50.0, 25.0, 100.0, 50.0));
    }

    #[test]
    fn retarget_centers_box_under_pointer() {
        let zb = ZoomBox::new(Size::new(200.0, 100.0));
        let vp = zoomed();
        let t = zb.retarget(Point::new(100.0, 50.0), Size::new(50.0, 25.0), &vp);
        assert_eq!(t.box_origin, Point::new(75.0, 37.5));
        assert_eq!(t.main_offset, Point::new(-1200.0, -600.0));
    }

    #[test]
    fn retarget_keeps_box_inside_minimap() {
        let zb = ZoomBox::new(Size::new(200.0, 100.0));
        let vp = zoomed();
        let t = zb.retarget(Point::new(500.0, -40.0), Size::new(50.0, 25.0), &vp);
        assert_eq!(t.box_origin, Point::new(150.0, 0.0));
    }

    #[test]
    fn reset_restores_full_size() {
        let zb = ZoomBox::new(Size::new(120.0, 80.0));
        assert_eq!(zb.reset(), Rect::new(0.0, 0.0, 120.0, 80.0));
    }
}
