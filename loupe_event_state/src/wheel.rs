// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wheel classification and zoom steps.
//!
//! Wheel events come from two very different devices: discrete mouse-wheel
//! notches and continuous trackpad gestures. Trackpads report a legacy delta
//! that is exactly `-3x` the standard delta, and trackpad pinches arrive as
//! ctrl-modified wheel events. Trackpad input gets a finer zoom step.
//!
//! ```
//! use loupe_event_state::wheel::{WheelConfig, WheelKind, scale_factor};
//!
//! let kind = WheelKind::classify(-4.0, Some(12.0), false);
//! assert_eq!(kind, WheelKind::Trackpad);
//!
//! let cfg = WheelConfig::default();
//! assert_eq!(scale_factor(kind, -4.0, &cfg), 1.0 + 1.0 / 40.0);
//! assert_eq!(scale_factor(WheelKind::Notch, 100.0, &cfg), 1.0 - 1.0 / 15.0);
//! ```

/// Origin of a wheel event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelKind {
    /// Continuous trackpad scroll or pinch.
    Trackpad,
    /// Discrete mouse-wheel notch.
    Notch,
}

impl WheelKind {
    /// Classifies a wheel event from its vertical delta, the legacy delta (if
    /// the platform reports one) and the ctrl modifier.
    pub fn classify(delta_y: f64, legacy_delta_y: Option<f64>, ctrl_key: bool) -> Self {
        let trackpad_ratio = legacy_delta_y.is_some_and(|legacy| legacy == delta_y * -3.0);
        if ctrl_key || trackpad_ratio {
            Self::Trackpad
        } else {
            Self::Notch
        }
    }
}

/// Zoom step divisors per wheel kind.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WheelConfig {
    /// One trackpad event zooms by `1 / trackpad_divisor`.
    pub trackpad_divisor: f64,
    /// One wheel notch zooms by `1 / notch_divisor`.
    pub notch_divisor: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            trackpad_divisor: 40.0,
            notch_divisor: 15.0,
        }
    }
}

/// Scale factor for one wheel event.
///
/// Scrolling up (negative `delta_y`) zooms in, scrolling down zooms out. Only
/// the direction of `delta_y` matters; a zero delta yields `1.0`.
pub fn scale_factor(kind: WheelKind, delta_y: f64, config: &WheelConfig) -> f64 {
    if delta_y == 0.0 || delta_y.is_nan() {
        return 1.0;
    }
    let direction = if delta_y < 0.0 { -1.0 } else { 1.0 };
    let divisor = match kind {
        WheelKind::Trackpad => config.trackpad_divisor,
        WheelKind::Notch => config.notch_divisor,
    };
    if divisor <= 0.0 {
        return 1.0;
    }
    1.0 - direction / divisor
}
