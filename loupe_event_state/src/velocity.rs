// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Release velocity estimation.
//!
//! [`VelocityTracker`] keeps only the most recent sample. The velocity is the
//! displacement between the last two samples (pixels per sample) and the speed
//! is that displacement's length divided by the elapsed milliseconds.
//!
//! The tracker is agnostic to what the point is. `loupe_engine` samples the
//! clamped content offset rather than the raw pointer, so a drag pinned
//! against a pan bound releases with no velocity.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use loupe_event_state::velocity::VelocityTracker;
//!
//! let mut v = VelocityTracker::default();
//! v.sample(Point::new(0.0, 0.0), 1000);
//! assert_eq!(v.speed(), 0.0);
//!
//! v.sample(Point::new(30.0, 40.0), 1010);
//! assert_eq!(v.velocity(), Vec2::new(30.0, 40.0));
//! assert_eq!(v.speed(), 5.0);
//! ```

use kurbo::{Point, Vec2};

/// Tracks the most recent movement of a point over time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VelocityTracker {
    last: Option<(Point, u64)>,
    velocity: Vec2,
    speed: f64,
}

impl VelocityTracker {
    /// Records `pos` at `timestamp_ms`.
    ///
    /// The first sample after a reset only stores the position. Intervals
    /// shorter than one millisecond count as one millisecond.
    pub fn sample(&mut self, pos: Point, timestamp_ms: u64) {
        if let Some((last_pos, last_time)) = self.last {
            let delta = pos - last_pos;
            let interval = timestamp_ms.saturating_sub(last_time).max(1);
            self.velocity = delta;
            self.speed = delta.hypot() / interval as f64;
        }
        self.last = Some((pos, timestamp_ms));
    }

    /// Clears all samples.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Displacement between the last two samples.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Pixels per millisecond between the last two samples.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Position and time of the most recent sample.
    pub fn last_sample(&self) -> Option<(Point, u64)> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_has_no_velocity() {
        let mut v = VelocityTracker::default();
        v.sample(Point::new(10.0, 10.0), 5);
        assert_eq!(v.velocity(), Vec2::ZERO);
        assert_eq!(v.speed(), 0.0);
        assert_eq!(v.last_sample(), Some((Point::new(10.0, 10.0), 5)));
    }

    #[test]
    fn zero_interval_is_guarded() {
        let mut v = VelocityTracker::default();
        v.sample(Point::ZERO, 100);
        v.sample(Point::new(3.0, 4.0), 100);
        assert_eq!(v.speed(), 5.0);
    }

    #[test]
    fn only_the_last_pair_counts() {
        let mut v = VelocityTracker::default();
        v.sample(Point::ZERO, 0);
        v.sample(Point::new(100.0, 0.0), 10);
        v.sample(Point::new(102.0, 0.0), 30);
        assert_eq!(v.velocity(), Vec2::new(2.0, 0.0));
        assert_eq!(v.speed(), 0.1);
    }

    #[test]
    fn reset_forgets_everything() {
        let mut v = VelocityTracker::default();
        v.sample(Point::ZERO, 0);
        v.sample(Point::new(5.0, 0.0), 1);
        v.reset();
        assert_eq!(v, VelocityTracker::default());
        v.sample(Point::new(50.0, 0.0), 2);
        assert_eq!(v.speed(), 0.0);
    }
}
