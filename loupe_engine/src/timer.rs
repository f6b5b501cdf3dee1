// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tiny host-agnostic timer queue.
//!
//! The engine never sleeps. Deadlines are absolute host milliseconds; the host
//! asks for [`TimerQueue::next_deadline`] and calls back once it has passed.

use smallvec::SmallVec;

/// Timers the engine schedules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TimerKind {
    /// Wheel/button zoom inactivity.
    ZoomSettle,
    /// Attach the large-image support layer.
    SupportReveal,
    /// Large-image support is ready; zoom becomes available.
    SupportReady,
    /// Detach the support layer after the page became visible again.
    VisibilityRestore,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Entry<K> {
    kind: K,
    deadline: u64,
}

/// At most one pending deadline per timer kind.
#[derive(Clone, Debug)]
pub(crate) struct TimerQueue<K> {
    entries: SmallVec<[Entry<K>; 4]>,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }
}

impl<K: Copy + PartialEq> TimerQueue<K> {
    /// Schedules `kind` at `deadline`, replacing a pending one of that kind.
    pub(crate) fn schedule(&mut self, kind: K, deadline: u64) {
        self.cancel(kind);
        self.entries.push(Entry { kind, deadline });
    }

    /// Cancels `kind`. Returns `true` if it was pending.
    pub(crate) fn cancel(&mut self, kind: K) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.kind != kind);
        self.entries.len() != before
    }

    /// Whether `kind` is pending.
    pub(crate) fn is_scheduled(&self, kind: K) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }

    /// Earliest pending deadline.
    pub(crate) fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Removes and returns the earliest timer due at `now`.
    pub(crate) fn pop_due(&mut self, now: u64) -> Option<K> {
        let (index, _) = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= now)
            .min_by_key(|(_, e)| e.deadline)?;
        Some(self.entries.remove(index).kind)
    }

    /// Drops every pending timer.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
