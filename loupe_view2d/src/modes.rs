// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// How the viewport is presented by the host.
///
/// This enum is consulted by [`crate::ViewportState::fit`] when the content
/// is (re)laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Embedded in the page: the content spans the viewport width and the
    /// viewport height follows the content. Gestures are not accepted.
    #[default]
    Inline,
    /// The full-viewport pan/zoom experience.
    ///
    /// The content is fitted inside the viewport and centered on both axes.
    Expanded,
}

impl ViewMode {
    /// Returns `true` for [`ViewMode::Expanded`].
    #[must_use]
    pub fn is_expanded(self) -> bool {
        matches!(self, Self::Expanded)
    }
}

/// How the host should move from the previous transform to the new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Transition {
    /// Apply the new transform immediately.
    #[default]
    Instant,
    /// Ease towards the new transform over `duration_ms` milliseconds.
    Animated {
        /// Length of the transition.
        duration_ms: u64,
    },
}

impl Transition {
    /// Returns `true` if the host is expected to animate.
    #[must_use]
    pub fn is_animated(self) -> bool {
        matches!(self, Self::Animated { .. })
    }
}
