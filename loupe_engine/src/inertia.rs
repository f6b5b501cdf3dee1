// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Post-release inertial panning.
//!
//! An [`InertiaTask`] is a cancellable, cooperative animation. It captures the
//! engine generation at creation; the engine bumps the generation whenever a
//! new writer takes over, and a task whose captured generation is stale is
//! dropped at its next tick.

use kurbo::{Point, Vec2};

use crate::config::InertiaConfig;

/// A running inertia animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InertiaTask {
    generation: u64,
    started_at: u64,
    duration_ms: u64,
    velocity: Vec2,
}

/// Result of one [`InertiaTask::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InertiaStep {
    /// Unclamped candidate offset for this frame.
    pub candidate: Point,
    /// Whether the task's time is up after this frame.
    pub expired: bool,
}

impl InertiaTask {
    /// Starts inertia at `now` with the release `velocity` (pixels per sample)
    /// and `speed` (pixels per millisecond).
    ///
    /// Returns `None` if the speed does not exceed the configured minimum.
    pub fn start(
        generation: u64,
        now: u64,
        velocity: Vec2,
        speed: f64,
        config: &InertiaConfig,
    ) -> Option<Self> {
        if speed.abs() <= config.min_speed {
            return None;
        }
        Some(Self {
            generation,
            started_at: now,
            duration_ms: config.duration_ms(speed),
            velocity,
        })
    }

    /// Generation captured at start.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the task still belongs to the engine's current `generation`.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Total duration in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Time the task started.
    pub fn started_at(&self) -> u64 {
        self.started_at
    }

    /// Computes the frame at `now` starting from `offset`.
    ///
    /// The velocity is applied in full at the start and fades linearly to
    /// zero over `align_window_ms`.
    pub fn step(&self, now: u64, offset: Point, config: &InertiaConfig) -> InertiaStep {
        let elapsed = now.saturating_sub(self.started_at);
        let align = if config.align_window_ms == 0 {
            0.0
        } else {
            1.0 - (elapsed as f64 / config.align_window_ms as f64).min(1.0)
        };
        InertiaStep {
            candidate: offset + self.velocity * align,
            expired: elapsed >= self.duration_ms,
        }
    }
}
