use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::core::{FrameIndex, FrameRange};

/// Lifecycle of a [`DispatchCursor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchState {
    /// Nothing handed out yet.
    Idle,
    /// Some, but not all, indices handed out.
    Dispatching,
    /// Every index handed out; further requests get `None`.
    Drained,
}

/// Shared cursor over a frame range.
///
/// The only mutable state shared between workers. Each index in the range is returned by
/// [`DispatchCursor::next_index`] exactly once across all threads; once the range is exhausted
/// every call returns `None` and the cursor never moves again.
#[derive(Debug)]
pub struct DispatchCursor {
    range: FrameRange,
    next: AtomicU64,
}

impl DispatchCursor {
    pub fn new(range: FrameRange) -> Self {
        Self {
            range,
            next: AtomicU64::new(range.start.0),
        }
    }

    pub fn range(&self) -> FrameRange {
        self.range
    }

    /// Claim the next undispatched index, or `None` when drained.
    pub fn next_index(&self) -> Option<FrameIndex> {
        let end = self.range.end.0;
        self.next
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < end).then_some(n + 1)
            })
            .ok()
            .map(FrameIndex)
    }

    pub fn state(&self) -> DispatchState {
        let n = self.next.load(Ordering::Acquire);
        if n >= self.range.end.0 {
            DispatchState::Drained
        } else if n == self.range.start.0 {
            DispatchState::Idle
        } else {
            DispatchState::Dispatching
        }
    }

    /// Indices not yet handed out.
    pub fn remaining(&self) -> u64 {
        self.range
            .end
            .0
            .saturating_sub(self.next.load(Ordering::Acquire))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dispatch/cursor.rs"]
mod tests;
