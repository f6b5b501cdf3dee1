// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.
//!
//! Every timing constant the engine uses lives here. The defaults reproduce
//! the behaviour hosts expect out of the box; the large-image delays in
//! particular were tuned by hand and can be adjusted per product.

pub use loupe_event_state::wheel::WheelConfig;

use crate::error::ConfigError;

/// Inertial panning parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InertiaConfig {
    /// Release speed (px/ms) above which inertia starts.
    pub min_speed: f64,
    /// Inertia lasts `ms_per_speed * speed` milliseconds...
    pub ms_per_speed: f64,
    /// ...but never less than this.
    pub min_duration_ms: u64,
    /// The per-frame step fades linearly to zero over this window.
    pub align_window_ms: u64,
}

impl Default for InertiaConfig {
    fn default() -> Self {
        Self {
            min_speed: 0.05,
            ms_per_speed: 400.0,
            min_duration_ms: 500,
            align_window_ms: 500,
        }
    }
}

impl InertiaConfig {
    /// Total inertia duration for a release at `speed`.
    pub fn duration_ms(&self, speed: f64) -> u64 {
        let scaled = self.ms_per_speed * speed.abs();
        #[expect(
            clippy::cast_possible_truncation,
            reason = "durations are a few seconds at most"
        )]
        let scaled = if scaled.is_finite() && scaled > 0.0 {
            scaled as u64
        } else {
            0
        };
        scaled.max(self.min_duration_ms)
    }
}

/// Configuration for [`crate::PanZoomEngine`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Zoom percent a location zoom establishes when no scale exists yet.
    /// Valid range `25..=50`.
    pub zoom_to_percent: u8,
    /// Images wider than this get the delayed zoom-support layer.
    pub large_image_limit: f64,
    /// Largest permitted positive x offset (room for a persistent side panel).
    pub limit_x_offset: f64,
    /// Inertial panning.
    pub inertia: InertiaConfig,
    /// Inactivity after a wheel or button zoom before it counts as settled.
    pub zoom_settle_ms: u64,
    /// Delay before the large-image support layer is attached.
    pub support_reveal_delay_ms: u64,
    /// Delay between attaching the support layer and allowing zoom.
    pub support_ready_delay_ms: u64,
    /// Delay before detaching the support layer once visible again.
    pub visibility_restore_ms: u64,
    /// Location zooms moving less than this on both axes are not animated.
    pub location_animate_threshold: f64,
    /// Duration of an animated location zoom.
    pub location_transition_ms: u64,
    /// Wheel zoom steps.
    pub wheel: WheelConfig,
    /// Zoom buttons scale by `1 ± button_zoom_step`.
    pub button_zoom_step: f64,
    /// Canvas clicks this close (px) to a marker count as hitting it.
    pub marker_distance_allowance: f64,
    /// Ignore window resizes in expanded mode that keep the same width.
    ///
    /// On-screen keyboards on some mobile platforms resize only the height.
    pub ignore_same_width_resize: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            zoom_to_percent: 50,
            large_image_limit: 10_000.0,
            limit_x_offset: 0.0,
            inertia: InertiaConfig::default(),
            zoom_settle_ms: 400,
            support_reveal_delay_ms: 2000,
            support_ready_delay_ms: 1000,
            visibility_restore_ms: 100,
            location_animate_threshold: 10.0,
            location_transition_ms: 1000,
            wheel: WheelConfig::default(),
            button_zoom_step: 0.1,
            marker_distance_allowance: 5.0,
            ignore_same_width_resize: false,
        }
    }
}

impl EngineConfig {
    /// Sets [`EngineConfig::zoom_to_percent`].
    #[must_use]
    pub fn with_zoom_to_percent(mut self, percent: u8) -> Self {
        self.zoom_to_percent = percent;
        self
    }

    /// Sets [`EngineConfig::large_image_limit`].
    #[must_use]
    pub fn with_large_image_limit(mut self, limit: f64) -> Self {
        self.large_image_limit = limit;
        self
    }

    /// Sets [`EngineConfig::limit_x_offset`].
    #[must_use]
    pub fn with_limit_x_offset(mut self, offset: f64) -> Self {
        self.limit_x_offset = offset;
        self
    }

    /// Sets [`EngineConfig::inertia`].
    #[must_use]
    pub fn with_inertia(mut self, inertia: InertiaConfig) -> Self {
        self.inertia = inertia;
        self
    }

    /// Sets [`EngineConfig::zoom_settle_ms`].
    #[must_use]
    pub fn with_zoom_settle_ms(mut self, ms: u64) -> Self {
        self.zoom_settle_ms = ms;
        self
    }

    /// Sets both large-image support delays.
    #[must_use]
    pub fn with_support_delays(mut self, reveal_ms: u64, ready_ms: u64) -> Self {
        self.support_reveal_delay_ms = reveal_ms;
        self.support_ready_delay_ms = ready_ms;
        self
    }

    /// Sets [`EngineConfig::wheel`].
    #[must_use]
    pub fn with_wheel(mut self, wheel: WheelConfig) -> Self {
        self.wheel = wheel;
        self
    }

    /// Sets [`EngineConfig::ignore_same_width_resize`].
    #[must_use]
    pub fn with_ignore_same_width_resize(mut self, ignore: bool) -> Self {
        self.ignore_same_width_resize = ignore;
        self
    }

    /// Checks the configuration, returning it unchanged if valid.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !(25..=50).contains(&self.zoom_to_percent) {
            return Err(ConfigError::ZoomPercentOutOfRange(self.zoom_to_percent));
        }
        if self.limit_x_offset.is_nan() || self.limit_x_offset < 0.0 {
            return Err(ConfigError::NegativeOffset(self.limit_x_offset));
        }
        for value in [
            self.large_image_limit,
            self.wheel.trackpad_divisor,
            self.wheel.notch_divisor,
            self.button_zoom_step,
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositiveThreshold(value));
            }
        }
        if self.button_zoom_step >= 1.0 {
            return Err(ConfigError::NonPositiveThreshold(1.0 - self.button_zoom_step));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(EngineConfig::default().validate(), Ok(EngineConfig::default()));
    }

    #[test]
    fn zoom_percent_range_is_enforced() {
        assert_eq!(
            EngineConfig::default().with_zoom_to_percent(24).validate(),
            Err(ConfigError::ZoomPercentOutOfRange(24))
        );
        assert!(EngineConfig::default().with_zoom_to_percent(25).validate().is_ok());
        assert_eq!(
            EngineConfig::default().with_zoom_to_percent(51).validate(),
            Err(ConfigError::ZoomPercentOutOfRange(51))
        );
    }

    #[test]
    fn negative_panel_offset_is_rejected() {
        assert_eq!(
            EngineConfig::default().with_limit_x_offset(-1.0).validate(),
            Err(ConfigError::NegativeOffset(-1.0))
        );
    }

    #[test]
    fn zero_divisor_is_rejected() {
        let wheel = WheelConfig {
            trackpad_divisor: 0.0,
            notch_divisor: 15.0,
        };
        assert_eq!(
            EngineConfig::default().with_wheel(wheel).validate(),
            Err(ConfigError::NonPositiveThreshold(0.0))
        );
    }

    #[test]
    fn inertia_duration_has_a_floor() {
        let inertia = InertiaConfig::default();
        assert_eq!(inertia.duration_ms(0.1), 500);
        assert_eq!(inertia.duration_ms(2.5), 1000);
        assert_eq!(inertia.duration_ms(-2.5), 1000);
    }
}
