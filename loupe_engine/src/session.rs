// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size};
use loupe_event_state::pinch::PinchStart;

use crate::input::TouchId;

/// The active gesture.
///
/// Exactly one variant is active at a time; starting any gesture first
/// cancels a running inertia animation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GestureSession {
    /// No gesture.
    #[default]
    Idle,
    /// Dragging the content with a mouse (`touch == None`) or one finger.
    Panning {
        /// Where the pointer went down.
        pointer_origin: Point,
        /// Content offset when the pointer went down.
        origin_offset: Point,
        /// The finger driving the pan, for touch pans.
        touch: Option<TouchId>,
    },
    /// Two-finger zoom.
    Pinching {
        /// Fingers, start distance/center and anchor fraction.
        pinch: PinchStart<TouchId>,
        /// Content offset at pinch start.
        start_offset: Point,
        /// Content size at pinch start.
        start_size: Size,
        /// Zoom ratio at pinch start.
        start_zoom: f64,
    },
    /// Dragging the minimap box.
    BoxDragging {
        /// Current box origin within the minimap.
        box_origin: Point,
    },
}

impl GestureSession {
    /// Returns `true` for [`GestureSession::Idle`].
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns `true` while content is being dragged, by pointer, finger or
    /// minimap.
    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. } | Self::BoxDragging { .. })
    }

    /// Returns `true` while a pinch is in progress.
    pub fn is_pinching(&self) -> bool {
        matches!(self, Self::Pinching { .. })
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Panning { touch: None, .. } => "panning",
            Self::Panning { touch: Some(_), .. } => "touch-panning",
            Self::Pinching { .. } => "pinching",
            Self::BoxDragging { .. } => "box-dragging",
        }
    }
}
