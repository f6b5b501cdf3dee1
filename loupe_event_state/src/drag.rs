// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag tracking: per-move deltas plus a "did it actually move" flag.
//!
//! A press that is released without any movement is a tap, not a drag. The
//! [`DragState::has_moved`] flag lets callers tell the two apart at release.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use loupe_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//! drag.start(Point::new(10.0, 20.0));
//! assert!(!drag.has_moved());
//!
//! assert_eq!(drag.update(Point::new(15.0, 25.0)), Some(Vec2::new(5.0, 5.0)));
//! assert!(drag.has_moved());
//!
//! let summary = drag.end();
//! assert_eq!(summary, Some(true));
//! ```

use kurbo::{Point, Vec2};

/// Tracks a single pointer drag.
#[derive(Debug, Clone, Default, Copy, PartialEq)]
pub struct DragState {
    start_pos: Option<Point>,
    last_pos: Option<Point>,
    moved: bool,
}

impl DragState {
    /// Starts tracking from `pos`, discarding any previous drag.
    pub fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.moved = false;
    }

    /// Records a new position and returns the delta since the last one.
    ///
    /// Returns `None` when no drag is active. A non-zero delta marks the drag
    /// as moved.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        let last = self.last_pos?;
        let delta = pos - last;
        self.last_pos = Some(pos);
        if delta != Vec2::ZERO {
            self.moved = true;
        }
        Some(delta)
    }

    /// Offset of `current_pos` from the drag start.
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start| current_pos - start)
    }

    /// Start position of the active drag.
    pub fn start_pos(&self) -> Option<Point> {
        self.start_pos
    }

    /// Last recorded position of the active drag.
    pub fn last_pos(&self) -> Option<Point> {
        self.last_pos
    }

    /// Whether the active drag has moved at all.
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// Returns `true` while a drag is active.
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }

    /// Ends the drag.
    ///
    /// Returns whether it moved, or `None` if no drag was active.
    pub fn end(&mut self) -> Option<bool> {
        let was_dragging = self.is_dragging();
        let moved = self.moved;
        *self = Self::default();
        was_dragging.then_some(moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_idle() {
        let drag = DragState::default();
        assert!(!drag.is_dragging());
        assert!(!drag.has_moved());
        assert_eq!(drag.total_offset(Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn update_without_start_is_ignored() {
        let mut drag = DragState::default();
        assert_eq!(drag.update(Point::new(15.0, 25.0)), None);
        assert!(drag.last_pos().is_none());
    }

    #[test]
    fn zero_delta_is_still_a_tap() {
        let mut drag = DragState::default();
        let p = Point::new(50.0, 50.0);
        drag.start(p);
        assert_eq!(drag.update(p), Some(Vec2::ZERO));
        assert!(!drag.has_moved());
        assert_eq!(drag.end(), Some(false));
    }

    #[test]
    fn deltas_are_incremental() {
        let mut drag = DragState::default();
        drag.start(Point::ZERO);
        assert_eq!(drag.update(Point::new(5.0, 3.0)), Some(Vec2::new(5.0, 3.0)));
        assert_eq!(drag.update(Point::new(8.0, 7.0)), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(drag.update(Point::new(2.0, 1.0)), Some(Vec2::new(-6.0, -6.0)));
        assert_eq!(
            drag.total_offset(Point::new(2.0, 1.0)),
            Some(Vec2::new(2.0, 1.0))
        );
    }

    #[test]
    fn moving_back_to_start_keeps_moved_flag() {
        let mut drag = DragState::default();
        drag.start(Point::ZERO);
        drag.update(Point::new(4.0, 0.0));
        drag.update(Point::ZERO);
        assert!(drag.has_moved());
        assert_eq!(drag.total_offset(Point::ZERO), Some(Vec2::ZERO));
    }

    #[test]
    fn restart_clears_previous_drag() {
        let mut drag = DragState::default();
        drag.start(Point::ZERO);
        drag.update(Point::new(10.0, 10.0));

        drag.start(Point::new(50.0, 60.0));
        assert!(!drag.has_moved());
        assert_eq!(drag.start_pos(), drag.last_pos());
    }

    #[test]
    fn end_on_idle_state_reports_none() {
        let mut drag = DragState::default();
        assert_eq!(drag.end(), None);
    }
}
