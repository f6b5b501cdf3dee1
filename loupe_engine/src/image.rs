// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Image loading and zoom-support state.
//!
//! Very wide images are expensive to rescale the first time. In expanded mode
//! the engine therefore attaches a full-size "support" copy for a while before
//! it allows zooming; smaller images are zoomable as soon as the mode is
//! entered. Panning never waits for the support layer.

use kurbo::Size;

use crate::error::IgnoreReason;
use crate::host::ImageLayer;

/// Describes a newly assigned image source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImageSource {
    /// Whether a low-resolution stand-in accompanies the image.
    pub low_res: bool,
}

impl ImageSource {
    /// A source with no low-resolution stand-in.
    pub fn new() -> Self {
        Self::default()
    }

    /// A source with a low-resolution stand-in.
    pub fn with_low_res() -> Self {
        Self { low_res: true }
    }
}

/// Load state of the primary image.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ImageStatus {
    /// No source assigned.
    #[default]
    Empty,
    /// A source is assigned but has not loaded yet.
    Loading,
    /// The image loaded with the given natural size.
    Loaded {
        /// Natural pixel size.
        natural: Size,
    },
    /// The image failed to load.
    Failed,
}

impl ImageStatus {
    /// Natural size, once loaded.
    pub fn natural(self) -> Option<Size> {
        match self {
            Self::Loaded { natural } => Some(natural),
            _ => None,
        }
    }

    /// Why gestures are unavailable, if they are.
    pub(crate) fn gate(self) -> Result<Size, IgnoreReason> {
        match self {
            Self::Loaded { natural } => Ok(natural),
            Self::Failed => Err(IgnoreReason::ImageFailed),
            Self::Empty | Self::Loading => Err(IgnoreReason::ImageNotLoaded),
        }
    }
}

/// Progress of the large-image zoom support.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ZoomSupport {
    /// Not ready; zoom gestures are ignored.
    #[default]
    Pending,
    /// The support layer is attached; zoom becomes ready after a delay.
    Revealed,
    /// Zoom is available. Stays ready until the source changes.
    Ready,
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ImageState {
    pub(crate) status: ImageStatus,
    pub(crate) support: ZoomSupport,
    pub(crate) support_attached: bool,
    has_low_res: bool,
    low_res_width: Option<f64>,
}

impl ImageState {
    pub(crate) fn assign(&mut self, source: ImageSource) {
        *self = Self {
            status: ImageStatus::Loading,
            has_low_res: source.low_res,
            ..Self::default()
        };
    }

    pub(crate) fn is_loaded(&self) -> bool {
        matches!(self.status, ImageStatus::Loaded { .. })
    }

    pub(crate) fn zoom_ready(&self) -> bool {
        self.support == ZoomSupport::Ready
    }

    pub(crate) fn set_low_res_width(&mut self, width: f64) {
        self.low_res_width = Some(width);
    }

    /// Layer to show after a re-layout or while zooming.
    pub(crate) fn zooming_layer(&self) -> ImageLayer {
        if self.has_low_res {
            ImageLayer::Placeholder
        } else {
            ImageLayer::Full
        }
    }

    /// Layer to show once a zoom settles at `content_width`.
    ///
    /// The stand-in stays visible while it is at least as wide as the content.
    pub(crate) fn settled_layer(&self, content_width: f64, current: ImageLayer) -> ImageLayer {
        if !self.has_low_res {
            return ImageLayer::Full;
        }
        match self.low_res_width {
            Some(width) if content_width <= width => current,
            _ => ImageLayer::Full,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_follows_load_status() {
        assert_eq!(ImageStatus::Empty.gate(), Err(IgnoreReason::ImageNotLoaded));
        assert_eq!(ImageStatus::Loading.gate(), Err(IgnoreReason::ImageNotLoaded));
        assert_eq!(ImageStatus::Failed.gate(), Err(IgnoreReason::ImageFailed));
        let natural = Size::new(10.0, 20.0);
        assert_eq!(ImageStatus::Loaded { natural }.gate(), Ok(natural));
    }

    #[test]
    fn assigning_a_source_resets_support() {
        let mut image = ImageState {
            support: ZoomSupport::Ready,
            support_attached: true,
            ..ImageState::default()
        };
        image.assign(ImageSource::with_low_res());
        assert_eq!(image.status, ImageStatus::Loading);
        assert_eq!(image.support, ZoomSupport::Pending);
        assert!(!image.support_attached);
        assert_eq!(image.zooming_layer(), ImageLayer::Placeholder);
    }

    #[test]
    fn full_layer_returns_once_wider_than_the_stand_in() {
        let mut image = ImageState::default();
        image.assign(ImageSource::with_low_res());
        image.set_low_res_width(1000.0);
        assert_eq!(
            image.settled_layer(900.0, ImageLayer::Placeholder),
            ImageLayer::Placeholder
        );
        assert_eq!(
            image.settled_layer(1200.0, ImageLayer::Placeholder),
            ImageLayer::Full
        );

        image.assign(ImageSource::new());
        assert_eq!(image.settled_layer(10.0, ImageLayer::Placeholder), ImageLayer::Full);
    }
}
