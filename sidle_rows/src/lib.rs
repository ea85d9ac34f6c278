// Copyright 2026 the Sidle Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=sidle_rows --heading-base-level=0

//! Sidle Rows: per-row open/selection state for swipeable lists.
//!
//! This crate owns the bookkeeping half of a swipeable list widget: for every
//! row index it records whether the row is currently swiped open, which side
//! it opened toward, and whether it is selected ("checked") in choice mode.
//! It knows nothing about views, gestures, or animations; the gesture engine
//! (for example `sidle_swipe`) mutates it as gestures commit and queries it
//! when classifying new ones.
//!
//! Row indices are the host list's absolute positions and are stable only
//! between resets. Storage grows on demand as the backing data set grows
//! ([`RowStates::ensure_rows`]) and is rebuilt from scratch — truncating any
//! excess — on a full reset ([`RowStates::reset`]).
//!
//! Selection toggles report when the selected count crosses the 0↔1
//! boundary ([`ChoiceCrossing`]), which is the signal a widget uses to enter
//! and leave choice mode:
//!
//! ```rust
//! use sidle_rows::{ChoiceCrossing, RowStates};
//!
//! let mut rows = RowStates::with_rows(4);
//!
//! // The first selection starts a choice session…
//! assert_eq!(rows.toggle_checked(2), (true, ChoiceCrossing::Began));
//! assert_eq!(rows.toggle_checked(3), (true, ChoiceCrossing::None));
//! assert_eq!(rows.checked_count(), 2);
//!
//! // …and clearing the last one ends it.
//! assert_eq!(rows.toggle_checked(3), (false, ChoiceCrossing::None));
//! assert_eq!(rows.toggle_checked(2), (false, ChoiceCrossing::Ended));
//! ```
//!
//! Open-state queries are total over `usize`: out-of-range indices read as
//! closed and unchecked, so callers racing a data-set change never observe a
//! phantom open row. Mutations, by contrast, require an in-range index — a
//! mutation of a row the store has never been told about is a caller bug and
//! panics.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// State of a single row.
///
/// `opened_right` is meaningful only while `opened` is set; a closed row
/// keeps whatever direction it last had, and readers must not interpret it.
/// Use [`RowStates::open_direction`] for a reading that enforces this.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RowState {
    /// Whether the row is swiped open.
    pub opened: bool,
    /// Which side the row opened toward (`true` = right). Only meaningful
    /// while `opened` is set.
    pub opened_right: bool,
    /// Whether the row is selected in choice mode.
    pub checked: bool,
}

/// Whether a selection toggle crossed the 0↔1 selected-count boundary.
///
/// Widgets enter choice mode on [`ChoiceCrossing::Began`] and leave it on
/// [`ChoiceCrossing::Ended`]; every other toggle reports
/// [`ChoiceCrossing::None`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChoiceCrossing {
    /// The selected count did not cross the boundary.
    None,
    /// The selected count went from 0 to 1.
    Began,
    /// The selected count went from 1 to 0.
    Ended,
}

/// Arena of per-row swipe/selection state, indexed by row position.
///
/// The three per-row flags live in one record per row rather than parallel
/// sequences, so a row's state always moves as a unit.
#[derive(Clone, Debug, Default)]
pub struct RowStates {
    rows: Vec<RowState>,
    checked_count: usize,
}

impl RowStates {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: Vec::new(),
            checked_count: 0,
        }
    }

    /// Create a store tracking `count` rows, all closed and unchecked.
    #[must_use]
    pub fn with_rows(count: usize) -> Self {
        let mut rows = Self::new();
        rows.ensure_rows(count);
        rows
    }

    /// Number of rows currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if no rows are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Grow storage so that at least `count` rows are tracked.
    ///
    /// New rows start closed and unchecked. Existing state is untouched and
    /// storage never shrinks here; call this whenever the backing data set
    /// reports a new item count.
    pub fn ensure_rows(&mut self, count: usize) {
        if count > self.rows.len() {
            self.rows.resize(count, RowState::default());
        }
    }

    /// Rebuild the store for exactly `count` rows, discarding all state.
    ///
    /// Unlike [`ensure_rows`](Self::ensure_rows) this also truncates, so a
    /// long session of data-set churn does not grow storage without bound.
    pub fn reset(&mut self, count: usize) {
        self.rows.clear();
        self.rows.resize(count, RowState::default());
        self.checked_count = 0;
    }

    /// The state record for `row`, or `None` when out of range.
    #[must_use]
    pub fn get(&self, row: usize) -> Option<RowState> {
        self.rows.get(row).copied()
    }

    /// Whether `row` is swiped open. Out-of-range rows read as closed.
    #[must_use]
    pub fn is_opened(&self, row: usize) -> bool {
        self.rows.get(row).is_some_and(|r| r.opened)
    }

    /// The side an open row is swiped toward (`true` = right).
    ///
    /// Returns `None` when the row is closed or out of range, so the
    /// direction of a closed row can never leak into a computation.
    #[must_use]
    pub fn open_direction(&self, row: usize) -> Option<bool> {
        let r = self.rows.get(row)?;
        r.opened.then_some(r.opened_right)
    }

    /// Mark `row` open toward `to_right`.
    ///
    /// # Panics
    ///
    /// Panics when `row` has not been allocated via
    /// [`ensure_rows`](Self::ensure_rows)/[`reset`](Self::reset).
    pub fn set_opened(&mut self, row: usize, to_right: bool) {
        let r = &mut self.rows[row];
        r.opened = true;
        r.opened_right = to_right;
    }

    /// Mark `row` closed.
    ///
    /// # Panics
    ///
    /// Panics when `row` is out of range.
    pub fn set_closed(&mut self, row: usize) {
        self.rows[row].opened = false;
    }

    /// Mark every row closed.
    pub fn close_all(&mut self) {
        for r in &mut self.rows {
            r.opened = false;
        }
    }

    /// Indices of all currently open rows, in ascending order.
    pub fn opened_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.opened.then_some(i))
    }

    /// Number of currently open rows.
    #[must_use]
    pub fn opened_count(&self) -> usize {
        self.opened_rows().count()
    }

    /// Whether `row` is selected. Out-of-range rows read as unchecked.
    #[must_use]
    pub fn is_checked(&self, row: usize) -> bool {
        self.rows.get(row).is_some_and(|r| r.checked)
    }

    /// Set the selected flag of `row`, reporting any 0↔1 crossing.
    ///
    /// Setting a row to the state it already has is a no-op and reports
    /// [`ChoiceCrossing::None`].
    ///
    /// # Panics
    ///
    /// Panics when `row` is out of range.
    pub fn set_checked(&mut self, row: usize, checked: bool) -> ChoiceCrossing {
        let r = &mut self.rows[row];
        if r.checked == checked {
            return ChoiceCrossing::None;
        }
        r.checked = checked;
        if checked {
            self.checked_count += 1;
            if self.checked_count == 1 {
                return ChoiceCrossing::Began;
            }
        } else {
            self.checked_count -= 1;
            if self.checked_count == 0 {
                return ChoiceCrossing::Ended;
            }
        }
        ChoiceCrossing::None
    }

    /// Flip the selected flag of `row`.
    ///
    /// Returns the new state and any 0↔1 crossing.
    ///
    /// # Panics
    ///
    /// Panics when `row` is out of range.
    pub fn toggle_checked(&mut self, row: usize) -> (bool, ChoiceCrossing) {
        let now = !self.rows[row].checked;
        (now, self.set_checked(row, now))
    }

    /// Number of selected rows.
    #[must_use]
    pub fn checked_count(&self) -> usize {
        self.checked_count
    }

    /// Indices of all selected rows, in ascending order.
    pub fn checked_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.checked.then_some(i))
    }

    /// Clear every selected flag.
    ///
    /// Returns the rows that were selected, in ascending order. Callers that
    /// track choice-mode sessions should treat a non-empty return as an
    /// [`ChoiceCrossing::Ended`] transition.
    pub fn clear_checked(&mut self) -> Vec<usize> {
        let was: Vec<usize> = self.checked_rows().collect();
        for r in &mut self.rows {
            r.checked = false;
        }
        self.checked_count = 0;
        was
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn starts_empty_and_grows() {
        let mut rows = RowStates::new();
        assert!(rows.is_empty());

        rows.ensure_rows(3);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.get(2), Some(RowState::default()));

        // Growing never shrinks.
        rows.ensure_rows(1);
        assert_eq!(rows.len(), 3);
        rows.ensure_rows(5);
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn out_of_range_reads_are_closed_and_unchecked() {
        let rows = RowStates::with_rows(2);
        assert!(!rows.is_opened(17));
        assert!(!rows.is_checked(17));
        assert_eq!(rows.open_direction(17), None);
        assert_eq!(rows.get(17), None);
    }

    #[test]
    fn open_direction_is_meaningless_while_closed() {
        let mut rows = RowStates::with_rows(2);
        rows.set_opened(0, true);
        assert_eq!(rows.open_direction(0), Some(true));

        rows.set_closed(0);
        // The stored direction survives but must not be readable.
        assert_eq!(rows.open_direction(0), None);
    }

    #[test]
    fn close_all_closes_everything() {
        let mut rows = RowStates::with_rows(4);
        rows.set_opened(1, true);
        rows.set_opened(3, false);
        assert_eq!(rows.opened_rows().collect::<Vec<_>>(), vec![1, 3]);

        rows.close_all();
        assert_eq!(rows.opened_count(), 0);
    }

    #[test]
    fn toggle_reports_boundary_crossings_exactly_once() {
        let mut rows = RowStates::with_rows(3);

        assert_eq!(rows.toggle_checked(0), (true, ChoiceCrossing::Began));
        assert_eq!(rows.toggle_checked(1), (true, ChoiceCrossing::None));
        assert_eq!(rows.toggle_checked(0), (false, ChoiceCrossing::None));
        assert_eq!(rows.toggle_checked(1), (false, ChoiceCrossing::Ended));

        // A fresh session crosses again.
        assert_eq!(rows.toggle_checked(2), (true, ChoiceCrossing::Began));
    }

    #[test]
    fn redundant_set_checked_is_a_no_op() {
        let mut rows = RowStates::with_rows(1);
        assert_eq!(rows.set_checked(0, true), ChoiceCrossing::Began);
        assert_eq!(rows.set_checked(0, true), ChoiceCrossing::None);
        assert_eq!(rows.checked_count(), 1);
    }

    #[test]
    fn checked_count_matches_flags_after_many_toggles() {
        let mut rows = RowStates::with_rows(8);
        for row in [0, 3, 5, 3, 7, 0, 0] {
            rows.toggle_checked(row);
        }
        let by_scan = rows.checked_rows().count();
        assert_eq!(rows.checked_count(), by_scan);
    }

    #[test]
    fn clear_checked_reports_previous_selection() {
        let mut rows = RowStates::with_rows(6);
        rows.set_checked(4, true);
        rows.set_checked(1, true);

        assert_eq!(rows.clear_checked(), vec![1, 4]);
        assert_eq!(rows.checked_count(), 0);
        assert!(rows.clear_checked().is_empty());
    }

    #[test]
    fn reset_truncates_and_discards() {
        let mut rows = RowStates::with_rows(10);
        rows.set_opened(9, true);
        rows.set_checked(2, true);

        rows.reset(4);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows.checked_count(), 0);
        assert!(!rows.is_checked(2));
        assert!(!rows.is_opened(9));
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn mutating_an_unknown_row_panics() {
        let mut rows = RowStates::with_rows(1);
        rows.set_opened(1, true);
    }
}
