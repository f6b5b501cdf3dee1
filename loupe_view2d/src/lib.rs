// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=loupe_view2d --heading-base-level=0

//! Loupe View 2D: headless pan/zoom geometry for a single image.
//!
//! This crate models an image shown inside a fixed viewport that can be
//! panned and uniformly zoomed. It focuses on:
//! - Translation bounds and clamping ([`bounds`], [`clamp_offset`]).
//! - The authoritative pan/zoom state ([`ViewportState`]) and the pure
//!   transform a renderer applies ([`ViewTransform`]).
//! - Minimap projection ([`ZoomBox`]).
//! - One-shot "zoom to location" planning ([`plan_location_zoom`]).
//! - Annotation marker placement ([`MarkerOverlay`]).
//!
//! It does **not** interpret input events, run animations or own a renderer.
//! Gesture handling and inertia live in `loupe_engine`, which drives the
//! types in this crate.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use loupe_view2d::{ClampLimits, ViewMode, ViewportState};
//!
//! // A 4000x3000 photo in an 800x600 window.
//! let mut view = ViewportState::fit(
//!     Size::new(800.0, 600.0),
//!     Size::new(4000.0, 3000.0),
//!     ViewMode::Expanded,
//! );
//! assert_eq!(view.base_size(), Size::new(800.0, 600.0));
//!
//! // Zoom in 2x around the window center.
//! let anchor = view.image_fraction_at(Point::new(400.0, 300.0));
//! view.rescale_about(2.0, anchor, ClampLimits::default());
//! assert_eq!(view.zoom_ratio(), 2.0);
//!
//! // The host applies this transform to the image laid out at base size.
//! let transform = view.transform().to_affine();
//! # let _ = transform;
//! ```
//!
//! ## Design notes
//!
//! - Zoom is uniform; content never shrinks below its fitted (base) size and
//!   never grows past the image's natural pixel width.
//! - Offsets are the position of the content's top-left corner relative to
//!   the viewport origin, so panning right-to-left produces negative offsets.
//! - Degenerate sizes make every operation a no-op rather than dividing by
//!   zero.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod annotation;
mod bounds;
mod location;
mod modes;
mod viewport;
mod zoom_box;

pub use annotation::{AnnotationMarker, MarkerOverlay};
pub use bounds::{Bounds, ClampLimits, bounds, centered_axis, centered_offset, clamp_offset};
pub use location::{LocationParams, LocationPlan, LocationRequest, plan_location_zoom};
pub use modes::{Transition, ViewMode};
pub use viewport::{ViewTransform, ViewportDebugInfo, ViewportState};
pub use zoom_box::{ZoomBox, ZoomBoxTarget};
