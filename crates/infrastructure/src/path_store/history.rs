use std::collections::VecDeque;
use std::sync::Arc;

/// Bounded FIFO of past best-k selections, newest at the back.
#[derive(Debug)]
pub struct SnapshotHistory<S> {
    limit: usize,
    snapshots: VecDeque<Vec<Arc<S>>>,
}

impl<S> SnapshotHistory<S> {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            snapshots: VecDeque::with_capacity(limit.min(16)),
        }
    }

    /// Retains `snapshot`, dropping the oldest beyond the limit.
    pub fn push(&mut self, snapshot: Vec<Arc<S>>) {
        if self.limit == 0 {
            return;
        }
        if self.snapshots.len() == self.limit {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
    }

    pub fn latest(&self) -> Option<&[Arc<S>]> {
        self.snapshots.back().map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
