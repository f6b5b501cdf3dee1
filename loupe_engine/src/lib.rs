// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=loupe_engine --heading-base-level=0

//! Loupe Engine: a host-agnostic pan/zoom gesture engine for a single image.
//!
//! The engine turns pointer, touch and wheel input into a clamped
//! translation plus uniform scale, runs inertia after a fast drag, keeps a
//! minimap box in sync, and offers a "zoom to location" command for jumping
//! to annotations.
//!
//! It owns no display surface and no clock. The host:
//! - feeds input through methods such as [`PanZoomEngine::pointer_down`] and
//!   [`PanZoomEngine::touch_move`];
//! - reports layout and image events ([`PanZoomEngine::resize`],
//!   [`PanZoomEngine::image_loaded`]);
//! - drives time with [`PanZoomEngine::advance`];
//! - receives notifications and [`RenderState`]s through a [`ViewportHost`].
//!
//! Geometry lives in `loupe_view2d`; small input helpers (drag, velocity,
//! pinch, wheel) in `loupe_event_state`.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use loupe_engine::{PanZoomEngine, PointerEvent, ViewportEvent};
//!
//! let mut engine = PanZoomEngine::new(Vec::<ViewportEvent>::new());
//! let _ = engine.resize(Size::new(800.0, 600.0), false);
//! engine.set_expanded(true, 0);
//! engine.image_loaded(Size::new(3200.0, 2400.0), 0).unwrap();
//!
//! // Zoom in twice, then drag the image to the left.
//! let _ = engine.zoom_in(0);
//! let _ = engine.zoom_in(10);
//! let _ = engine.pointer_down(PointerEvent::primary(Point::new(400.0, 300.0), 20));
//! let _ = engine.pointer_move(PointerEvent::primary(Point::new(300.0, 300.0), 40));
//! let _ = engine.pointer_up(PointerEvent::primary(Point::new(300.0, 300.0), 50));
//!
//! // The release was fast, so inertia runs until the host stops calling back.
//! while engine.needs_frame() {
//!     engine.advance(60);
//! }
//! assert!(engine.viewport().offset().x < 0.0);
//! assert!(engine.host().contains(&ViewportEvent::PanEnd));
//! ```
//!
//! ## Ordering
//!
//! Only one writer changes the view at a time. Starting a gesture, a location
//! zoom or a zoom step cancels running inertia (which reports pan-end first);
//! a resize re-derives the view from scratch and ends whatever was running.
//! Inertia tasks carry the generation they started in and are dropped at
//! their next frame once a newer writer took over.
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: `no_std` float math through `kurbo/libm`.
//! - `serde`: `Serialize`/`Deserialize` for [`EngineConfig`].
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod blocking;
mod config;
mod engine;
mod error;
mod host;
mod image;
mod inertia;
mod input;
mod session;
mod timer;

pub use blocking::{BlockerId, BlockingRegions};
pub use config::{EngineConfig, InertiaConfig, WheelConfig};
pub use engine::PanZoomEngine;
pub use error::{ConfigError, EngineError, IgnoreReason, Outcome};
pub use host::{
    CanvasClick, ImageLayer, RenderState, ViewportEvent, ViewportHost, ZoomIndicator,
};
pub use image::{ImageSource, ImageStatus, ZoomSupport};
pub use inertia::{InertiaStep, InertiaTask};
pub use input::{PointerButton, PointerEvent, Touch, TouchId, WheelEvent};
pub use session::GestureSession;

pub use loupe_view2d::{
    AnnotationMarker, LocationPlan, LocationRequest, MarkerOverlay, Transition, ViewMode,
    ViewTransform, ViewportState,
};
