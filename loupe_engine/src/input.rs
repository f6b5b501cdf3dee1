// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events consumed by the engine.
//!
//! Positions are in viewport coordinates (logical pixels, origin at the
//! viewport's top-left corner). Timestamps are host-supplied monotonic
//! milliseconds.

use kurbo::Point;

/// Mouse button of a pointer event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerButton {
    /// The primary (usually left) button.
    #[default]
    Primary,
    /// The secondary (usually right) button.
    Secondary,
    /// The middle button.
    Auxiliary,
}

/// A mouse pointer event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Pointer position.
    pub position: Point,
    /// Button involved in a press or release.
    pub button: PointerButton,
    /// Event time in milliseconds.
    pub timestamp: u64,
}

impl PointerEvent {
    /// A primary-button event at `position`.
    pub fn primary(position: Point, timestamp: u64) -> Self {
        Self {
            position,
            button: PointerButton::Primary,
            timestamp,
        }
    }
}

/// Platform touch identifier.
pub type TouchId = u64;

/// One active touch point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Touch {
    /// Stable identifier for the lifetime of the touch.
    pub id: TouchId,
    /// Touch position.
    pub position: Point,
}

impl Touch {
    /// Creates a touch.
    pub fn new(id: TouchId, position: Point) -> Self {
        Self { id, position }
    }
}

/// A wheel or trackpad scroll event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelEvent {
    /// Pointer position.
    pub position: Point,
    /// Standard vertical delta; negative scrolls up.
    pub delta_y: f64,
    /// Legacy vertical delta, if the platform reports one. Used to tell
    /// trackpads from mouse wheels.
    pub legacy_delta_y: Option<f64>,
    /// Whether ctrl was held (trackpad pinch on most platforms).
    pub ctrl_key: bool,
    /// Event time in milliseconds.
    pub timestamp: u64,
}

impl WheelEvent {
    /// A plain wheel event with no legacy delta and no modifiers.
    pub fn new(position: Point, delta_y: f64, timestamp: u64) -> Self {
        Self {
            position,
            delta_y,
            legacy_delta_y: None,
            ctrl_key: false,
            timestamp,
        }
    }
}
