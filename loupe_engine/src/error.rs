// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::Size;
use thiserror::Error;

/// Errors reported by [`crate::PanZoomEngine`].
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EngineError {
    /// The primary image failed to load. Gestures stay disabled until a new
    /// source is supplied.
    #[error("the image failed to load")]
    ImageLoad,
    /// Content or viewport has a zero, negative or non-finite dimension.
    #[error("invalid geometry: content {content:?} in viewport {viewport:?}")]
    InvalidBounds {
        /// Offending content size.
        content: Size,
        /// Offending viewport size.
        viewport: Size,
    },
    /// The configuration was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Reasons [`crate::EngineConfig::validate`] rejects a configuration.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The default location-zoom percent must lie in `25..=50`.
    #[error("zoom-to percent {0} is outside 25..=50")]
    ZoomPercentOutOfRange(u8),
    /// The side-panel allowance must be non-negative.
    #[error("side-panel offset {0} must be non-negative")]
    NegativeOffset(f64),
    /// A size threshold or divisor must be positive.
    #[error("threshold {0} must be positive")]
    NonPositiveThreshold(f64),
}

/// Result of feeding an input to the engine.
///
/// Ignored input is not an error: the engine is disabled, the pointer is over
/// a blocking region, the image is not ready, and so on.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The input changed engine state.
    Handled,
    /// The input was ignored.
    Ignored(IgnoreReason),
}

impl Outcome {
    /// Returns `true` for [`Outcome::Handled`].
    pub fn is_handled(self) -> bool {
        matches!(self, Self::Handled)
    }

    /// The reason the input was ignored, if it was.
    pub fn ignored(self) -> Option<IgnoreReason> {
        match self {
            Self::Handled => None,
            Self::Ignored(reason) => Some(reason),
        }
    }
}

/// Why an input was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The engine is disabled.
    Disabled,
    /// The viewport is not in its expanded pan/zoom mode.
    Inactive,
    /// The pointer is over a registered blocking region.
    Blocked,
    /// No image has loaded yet.
    ImageNotLoaded,
    /// The image failed to load.
    ImageFailed,
    /// Zoom is unavailable until the large-image support layer is ready.
    ZoomSupportPending,
    /// The viewport has not been laid out yet.
    NotLaidOut,
    /// Another gesture is active.
    Busy,
    /// The input does not apply in the current state.
    NotApplicable,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Disabled => "engine disabled",
            Self::Inactive => "pan/zoom inactive",
            Self::Blocked => "blocked region",
            Self::ImageNotLoaded => "image not loaded",
            Self::ImageFailed => "image failed",
            Self::ZoomSupportPending => "zoom support pending",
            Self::NotLaidOut => "not laid out",
            Self::Busy => "another gesture is active",
            Self::NotApplicable => "not applicable",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn config_errors_convert() {
        let err: EngineError = ConfigError::ZoomPercentOutOfRange(80).into();
        assert_eq!(
            err.to_string(),
            "invalid configuration: zoom-to percent 80 is outside 25..=50"
        );
    }

    #[test]
    fn outcome_helpers() {
        assert!(Outcome::Handled.is_handled());
        assert_eq!(Outcome::Handled.ignored(), None);
        let ignored = Outcome::Ignored(IgnoreReason::Blocked);
        assert!(!ignored.is_handled());
        assert_eq!(ignored.ignored(), Some(IgnoreReason::Blocked));
        assert_eq!(IgnoreReason::Blocked.to_string(), "blocked region");
    }
}
