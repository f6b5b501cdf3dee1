// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host side of the engine: notifications and render output.
//!
//! The engine never touches a display surface. After each mutation it hands
//! the host a [`RenderState`] and fires the matching notification. All
//! callbacks are synchronous and have no-op defaults, so hosts implement only
//! what they need.
//!
//! `Vec<ViewportEvent>` implements [`ViewportHost`] by recording every call,
//! which is convenient for tests and scripted sessions.

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect, Size};
use loupe_view2d::{MarkerOverlay, Transition, ViewTransform};

use crate::error::EngineError;

/// Receives engine output.
pub trait ViewportHost {
    /// The content was laid out again.
    fn on_resize(&mut self, _content: Rect, _from_window_event: bool) {}
    /// A pan (pointer, touch or minimap) began.
    fn on_pan_start(&mut self) {}
    /// The content moved during a pan or inertia.
    fn on_pan_move(&mut self, _content: Rect) {}
    /// A pan, including any inertia, finished.
    fn on_pan_end(&mut self) {}
    /// A zoom step happened.
    fn on_zoom(&mut self) {}
    /// A zoom finished. `zoom_value` is the zoom ratio, or `0.0` after a
    /// recenter.
    fn on_zoom_end(&mut self, _content: Rect, _zoom_value: f64) {}
    /// The content was tapped without panning.
    fn on_canvas_click(&mut self, _click: CanvasClick) {}
    /// The image finished loading.
    fn on_image_load(&mut self) {}
    /// The image failed to load.
    fn on_image_error(&mut self, _error: &EngineError) {}
    /// The expanded pan/zoom mode was entered or left.
    fn on_pan_zoom_activate(&mut self, _active: bool) {}
    /// New presentation state.
    fn render(&mut self, _state: &RenderState) {}
    /// The engine wants [`crate::PanZoomEngine::advance`] on the next frame.
    fn request_frame(&mut self) {}
}

impl ViewportHost for () {}

/// A tap on the content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasClick {
    /// Tap position as a fraction of the content, `(0, 0)` top-left.
    pub fraction: Point,
    /// Content size at the time of the tap.
    pub content: Size,
}

/// Which image layer the host should show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageLayer {
    /// The full-resolution image.
    #[default]
    Full,
    /// The low-resolution stand-in, shown while zooming.
    Placeholder,
}

/// Zoom percent readout shown while a zoom is in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomIndicator {
    /// Current zoom percent.
    pub percent: f64,
}

impl fmt::Display for ZoomIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Zoom: {:.2}%", self.percent)
    }
}

/// Everything the host needs to draw the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderState {
    /// Transform for the content laid out at base size.
    pub transform: ViewTransform,
    /// Content rectangle in viewport coordinates.
    pub content: Rect,
    /// Minimap box in minimap coordinates.
    pub zoom_box: Rect,
    /// How to move to this state.
    pub transition: Transition,
    /// Visible image layer.
    pub layer: ImageLayer,
    /// Zoom readout, if it should be visible.
    pub indicator: Option<ZoomIndicator>,
    /// Whether the large-image support layer should be attached.
    pub support_image_attached: bool,
    /// Whether a pan is in progress (hosts typically change the cursor).
    pub panning: bool,
    /// Marker layer geometry.
    pub overlay: MarkerOverlay,
}

/// A recorded [`ViewportHost`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewportEvent {
    /// [`ViewportHost::on_resize`].
    Resize {
        /// Content rectangle.
        content: Rect,
        /// Whether a window event caused it.
        from_window_event: bool,
    },
    /// [`ViewportHost::on_pan_start`].
    PanStart,
    /// [`ViewportHost::on_pan_move`].
    PanMove(Rect),
    /// [`ViewportHost::on_pan_end`].
    PanEnd,
    /// [`ViewportHost::on_zoom`].
    Zoom,
    /// [`ViewportHost::on_zoom_end`].
    ZoomEnd {
        /// Content rectangle.
        content: Rect,
        /// Zoom ratio.
        zoom_value: f64,
    },
    /// [`ViewportHost::on_canvas_click`].
    CanvasClick(CanvasClick),
    /// [`ViewportHost::on_image_load`].
    ImageLoad,
    /// [`ViewportHost::on_image_error`].
    ImageError(EngineError),
    /// [`ViewportHost::on_pan_zoom_activate`].
    PanZoomActivate(bool),
    /// [`ViewportHost::render`].
    Render(RenderState),
    /// [`ViewportHost::request_frame`].
    FrameRequested,
}

impl ViewportEvent {
    /// Returns `true` for presentation-only events ([`ViewportEvent::Render`]
    /// and [`ViewportEvent::FrameRequested`]).
    pub fn is_presentation(&self) -> bool {
        matches!(self, Self::Render(_) | Self::FrameRequested)
    }
}

impl ViewportHost for Vec<ViewportEvent> {
    fn on_resize(&mut self, content: Rect, from_window_event: bool) {
        self.push(ViewportEvent::Resize {
            content,
            from_window_event,
        });
    }

    fn on_pan_start(&mut self) {
        self.push(ViewportEvent::PanStart);
    }

    fn on_pan_move(&mut self, content: Rect) {
        self.push(ViewportEvent::PanMove(content));
    }

    fn on_pan_end(&mut self) {
        self.push(ViewportEvent::PanEnd);
    }

    fn on_zoom(&mut self) {
        self.push(ViewportEvent::Zoom);
    }

    fn on_zoom_end(&mut self, content: Rect, zoom_value: f64) {
        self.push(ViewportEvent::ZoomEnd {
            content,
            zoom_value,
        });
    }

    fn on_canvas_click(&mut self, click: CanvasClick) {
        self.push(ViewportEvent::CanvasClick(click));
    }

    fn on_image_load(&mut self) {
        self.push(ViewportEvent::ImageLoad);
    }

    fn on_image_error(&mut self, error: &EngineError) {
        self.push(ViewportEvent::ImageError(error.clone()));
    }

    fn on_pan_zoom_activate(&mut self, active: bool) {
        self.push(ViewportEvent::PanZoomActivate(active));
    }

    fn render(&mut self, state: &RenderState) {
        self.push(ViewportEvent::Render(*state));
    }

    fn request_frame(&mut self) {
        self.push(ViewportEvent::FrameRequested);
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::ZoomIndicator;

    #[test]
    fn indicator_label_has_two_decimals() {
        let indicator = ZoomIndicator { percent: 12.3456 };
        assert_eq!(indicator.to_string(), "Zoom: 12.35%");
    }
}
