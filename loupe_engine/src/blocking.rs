// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture-blocking regions.
//!
//! Hosts register the rectangles of overlapping UI (an open dialog, a side
//! drawer) that must not start a pan or zoom even though they lie on top of
//! the viewport.

use hashbrown::HashMap;
use kurbo::{Point, Rect};

/// Host-chosen identifier of a blocking region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockerId(pub u64);

/// Registered blocking regions, in viewport coordinates.
#[derive(Clone, Debug, Default)]
pub struct BlockingRegions {
    regions: HashMap<BlockerId, Rect>,
}

impl BlockingRegions {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or moves a region. Returns the previous rectangle for `id`.
    pub fn register(&mut self, id: BlockerId, rect: Rect) -> Option<Rect> {
        self.regions.insert(id, rect)
    }

    /// Removes a region. Returns its rectangle if it was registered.
    pub fn unregister(&mut self, id: BlockerId) -> Option<Rect> {
        self.regions.remove(&id)
    }

    /// Returns `true` if `point` lies inside any region.
    pub fn contains(&self, point: Point) -> bool {
        self.regions.values().any(|r| r.contains(point))
    }

    /// Number of registered regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns `true` if no region is registered.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_testing_tracks_registration() {
        let mut regions = BlockingRegions::new();
        let dialog = BlockerId(1);
        assert!(!regions.contains(Point::new(50.0, 50.0)));

        regions.register(dialog, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(regions.contains(Point::new(50.0, 50.0)));
        assert!(!regions.contains(Point::new(150.0, 50.0)));

        let old = regions.register(dialog, Rect::new(100.0, 0.0, 200.0, 100.0));
        assert_eq!(old, Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert!(regions.contains(Point::new(150.0, 50.0)));
        assert_eq!(regions.len(), 1);

        assert!(regions.unregister(dialog).is_some());
        assert!(regions.is_empty());
        assert!(!regions.contains(Point::new(150.0, 50.0)));
    }
}
