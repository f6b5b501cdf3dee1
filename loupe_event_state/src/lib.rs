// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=loupe_event_state --heading-base-level=0

//! Loupe Event State: small input state helpers for pan/zoom gestures.
//!
//! Each module covers one piece of per-gesture bookkeeping:
//!
//! - [`drag`]: Per-move deltas and the "did it move" flag that separates taps from drags
//! - [`velocity`]: Release velocity and speed for inertial panning
//! - [`pinch`]: Two-finger distance, midpoint and the anchor captured at pinch start
//! - [`wheel`]: Trackpad vs. mouse-wheel classification and zoom steps
//!
//! ## Design Philosophy
//!
//! - **Minimal and focused**: each helper tracks just enough state for one job
//! - **Host-agnostic**: positions are plain [`kurbo`] points and timestamps are
//!   host-supplied milliseconds
//! - **Generic where it matters**: pinch state accepts any touch id type
//!
//! None of these helpers know about viewports or content. `loupe_engine`
//! combines them into a gesture state machine.
//!
//! ## Usage
//!
//! ```rust
//! # #[cfg(all(feature = "drag", feature = "velocity"))]
//! # fn example() {
//! use kurbo::Point;
//! use loupe_event_state::drag::DragState;
//! use loupe_event_state::velocity::VelocityTracker;
//!
//! let mut drag = DragState::default();
//! let mut velocity = VelocityTracker::default();
//!
//! drag.start(Point::new(100.0, 100.0));
//! velocity.sample(Point::new(0.0, 0.0), 0);
//!
//! let delta = drag.update(Point::new(80.0, 100.0)).unwrap();
//! velocity.sample(Point::new(delta.x, delta.y), 16);
//!
//! assert!(drag.has_moved());
//! assert!(velocity.speed() > 1.0);
//! # }
//! ```
//!
//! ## Features
//!
//! - `drag`, `velocity`, `pinch`: enable the matching module (requires `kurbo`)
//! - `wheel`: enable wheel classification
//! - `serde`: derive `Serialize`/`Deserialize` for configuration types
//!
//! This crate is `no_std` compatible.

#![no_std]

#[cfg(feature = "drag")]
pub mod drag;
#[cfg(feature = "pinch")]
pub mod pinch;
#[cfg(feature = "velocity")]
pub mod velocity;
#[cfg(feature = "wheel")]
pub mod wheel;
