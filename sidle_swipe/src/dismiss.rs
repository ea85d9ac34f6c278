// Copyright 2026 the Sidle Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reconciliation of concurrent dismiss animations into one host
//! notification.
//!
//! Several rows may be animating out at once. Each dismissal
//! [`begin`](DismissBatch::begin)s before its first animation starts and
//! [`finish`](DismissBatch::finish)es when its last one ends; the batch is
//! settled when the count returns to zero. Settling drains the pending rows
//! sorted by *descending* position, so the host can apply removals in order
//! without earlier removals shifting the positions of later ones.

use alloc::vec::Vec;
use core::mem;

use smallvec::SmallVec;

/// A queued row removal, waiting for its batch to settle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PendingDismiss<S> {
    /// Position of the row being removed.
    pub row: usize,
    /// The rendered surface that animated out, if the row was on screen.
    pub surface: Option<S>,
    /// The surface's height before the removal animation, for restoring the
    /// view when it is recycled.
    pub height: f64,
}

/// Reference-counted batch of pending row dismissals.
#[derive(Clone, Debug, Default)]
pub struct DismissBatch<S> {
    pending: SmallVec<[PendingDismiss<S>; 4]>,
    active: usize,
}

impl<S> DismissBatch<S> {
    /// Create an idle batch.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: SmallVec::new(),
            active: 0,
        }
    }

    /// Account for one dismissal whose animations are about to start.
    pub fn begin(&mut self) {
        self.active += 1;
    }

    /// Account for one dismissal whose animations have all ended.
    ///
    /// Returns `true` when this was the last active dismissal, i.e. the
    /// batch has settled and the pending rows should be reported.
    pub fn finish(&mut self) -> bool {
        debug_assert!(self.active > 0, "dismiss batch finished more than begun");
        self.active = self.active.saturating_sub(1);
        self.active == 0
    }

    /// Whether no dismissal is currently animating.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active == 0
    }

    /// Number of rows waiting to be reported.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Queue a row for the next settle.
    pub fn push(&mut self, row: usize, surface: Option<S>, height: f64) {
        self.pending.push(PendingDismiss {
            row,
            surface,
            height,
        });
    }

    /// Drain the pending rows, sorted by descending position.
    pub fn take_pending(&mut self) -> Vec<PendingDismiss<S>> {
        let mut pending: Vec<_> = mem::take(&mut self.pending).into_vec();
        pending.sort_by(|a, b| b.row.cmp(&a.row));
        pending
    }

    /// Discard all pending rows without reporting them.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.active = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn rows(pending: &[PendingDismiss<u32>]) -> Vec<usize> {
        pending.iter().map(|p| p.row).collect()
    }

    #[test]
    fn settles_in_descending_row_order() {
        let mut batch: DismissBatch<u32> = DismissBatch::new();
        for row in [5, 2, 7] {
            batch.begin();
            batch.push(row, Some(row as u32), 48.0);
        }
        assert!(!batch.finish());
        assert!(!batch.finish());
        assert!(batch.finish());
        assert_eq!(rows(&batch.take_pending()), vec![7, 5, 2]);
    }

    #[test]
    fn completion_order_does_not_matter() {
        let mut batch: DismissBatch<u32> = DismissBatch::new();
        batch.begin();
        batch.push(3, None, 0.0);
        batch.begin();
        batch.push(9, None, 0.0);
        // The second dismissal completes first.
        assert!(!batch.finish());
        assert!(batch.finish());
        assert_eq!(rows(&batch.take_pending()), vec![9, 3]);
    }

    #[test]
    fn take_pending_reports_once() {
        let mut batch: DismissBatch<u32> = DismissBatch::new();
        batch.begin();
        batch.push(1, None, 0.0);
        batch.finish();
        assert_eq!(batch.take_pending().len(), 1);
        assert!(batch.take_pending().is_empty());
    }

    #[test]
    fn a_new_batch_starts_fresh_after_settling() {
        let mut batch: DismissBatch<u32> = DismissBatch::new();
        batch.begin();
        batch.push(4, None, 0.0);
        assert!(batch.finish());
        batch.take_pending();

        batch.begin();
        batch.push(2, None, 0.0);
        assert!(batch.finish());
        assert_eq!(rows(&batch.take_pending()), vec![2]);
    }

    #[test]
    fn idle_tracks_the_active_count() {
        let mut batch: DismissBatch<u32> = DismissBatch::new();
        assert!(batch.is_idle());
        batch.begin();
        assert!(!batch.is_idle());
        batch.finish();
        assert!(batch.is_idle());
    }

    #[test]
    fn heights_ride_along_per_row() {
        let mut batch: DismissBatch<u32> = DismissBatch::new();
        batch.begin();
        batch.push(0, Some(10), 48.0);
        batch.begin();
        batch.push(1, Some(11), 72.0);
        batch.finish();
        batch.finish();
        let pending = batch.take_pending();
        assert_eq!(pending[0], PendingDismiss { row: 1, surface: Some(11), height: 72.0 });
        assert_eq!(pending[1], PendingDismiss { row: 0, surface: Some(10), height: 48.0 });
    }
}
