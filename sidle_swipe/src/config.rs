// Copyright 2026 the Sidle Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget configuration and platform-derived touch thresholds.

use bitflags::bitflags;

use crate::host::SurfaceId;

bitflags! {
    /// Sides a closed row may be swiped toward.
    ///
    /// An empty set disables swiping entirely. Note that these gate the
    /// direction of *travel*: `RIGHT` permits dragging a row toward the
    /// right, which reveals the left portion of its back surface.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct SwipeDirections: u8 {
        /// The row may travel toward the left.
        const LEFT = 1 << 0;
        /// The row may travel toward the right.
        const RIGHT = 1 << 1;
    }
}

impl SwipeDirections {
    /// Whether travel toward the given side is permitted.
    #[must_use]
    pub fn allows(&self, to_right: bool) -> bool {
        self.contains(if to_right { Self::RIGHT } else { Self::LEFT })
    }
}

impl Default for SwipeDirections {
    fn default() -> Self {
        Self::all()
    }
}

/// Outcome a committed swipe performs on its row.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SwipeAction {
    /// Slide the front surface aside and keep the row open.
    #[default]
    Reveal,
    /// Remove the row from the list.
    Dismiss,
    /// Toggle the row's selection; the front surface snaps back.
    Choice,
    /// Do nothing; the row snaps back.
    None,
}

/// How a row's open offset is measured.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OffsetMode {
    /// Offsets are the distance the front surface travels from rest.
    #[default]
    Traveled,
    /// Offsets are measured back from the far edge: the front surface
    /// travels the row width minus the configured amount.
    FullWidth,
}

/// Platform-derived gesture thresholds.
///
/// These values are in logical pixels (or logical pixels per second) and the
/// defaults follow common platform conventions for baseline-density touch
/// screens. Hosts with access to real platform configuration should
/// construct this from it instead.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchThresholds {
    /// Movement needed before a press can arm a drag.
    pub touch_slop: f64,
    /// Coarser movement needed before a gesture is classified as scrolling
    /// horizontally or vertically at the container level.
    pub paging_slop: f64,
    /// Minimum horizontal speed for a release to count as a fling.
    pub min_fling_velocity: f64,
    /// Maximum horizontal speed for a release to count as a fling; faster
    /// movement is treated as tracker noise.
    pub max_fling_velocity: f64,
    /// Press duration after which a still pointer becomes a long press.
    pub long_press_ms: u64,
}

impl Default for TouchThresholds {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            paging_slop: 16.0,
            min_fling_velocity: 50.0,
            max_fling_velocity: 8_000.0,
            long_press_ms: 500,
        }
    }
}

/// Immutable per-widget swipe configuration.
///
/// Construct with a struct literal over [`Default`]:
///
/// ```rust
/// use sidle_swipe::{SwipeAction, SwipeConfig, SwipeDirections};
///
/// let config = SwipeConfig {
///     directions: SwipeDirections::LEFT,
///     action_left: SwipeAction::Dismiss,
///     ..SwipeConfig::default()
/// };
/// assert!(!config.directions.allows(true));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SwipeConfig {
    /// Sides a closed row may be swiped toward.
    pub directions: SwipeDirections,
    /// Action committed by a leftward swipe.
    pub action_left: SwipeAction,
    /// Action committed by a rightward swipe.
    pub action_right: SwipeAction,
    /// How `left_offset`/`right_offset` are interpreted.
    pub offset_mode: OffsetMode,
    /// Offset amount anchored at the row's left edge.
    pub left_offset: f64,
    /// Offset amount anchored at the row's right edge.
    pub right_offset: f64,
    /// Duration of every outcome animation, in milliseconds.
    pub animation_ms: u64,
    /// Whether several rows may be open at once.
    pub multiple_select: bool,
    /// Whether a long press on a closed row opens it.
    pub open_on_long_press: bool,
    /// Whether all open rows are closed as soon as the list starts
    /// scrolling.
    pub close_on_scroll: bool,
    /// Identifier the host resolves to a row's front surface.
    pub front_surface: SurfaceId,
    /// Identifier the host resolves to a row's back surface, if any.
    pub back_surface: Option<SurfaceId>,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            directions: SwipeDirections::default(),
            action_left: SwipeAction::Reveal,
            action_right: SwipeAction::Reveal,
            offset_mode: OffsetMode::default(),
            left_offset: 0.0,
            right_offset: 0.0,
            animation_ms: 200,
            multiple_select: false,
            open_on_long_press: false,
            close_on_scroll: false,
            front_surface: SurfaceId(0),
            back_surface: None,
        }
    }
}

impl SwipeConfig {
    /// The front surface's horizontal offset when a row rests open toward
    /// `to_right`.
    ///
    /// This single formula is both the drag-clamp bound and the terminal
    /// translation of the reveal/dismiss animations. Opening toward the
    /// right reveals the *left* portion of the back surface, which is why
    /// the rightward branch reads `left_offset` in traveled mode.
    #[must_use]
    pub fn open_offset(&self, view_width: f64, to_right: bool) -> f64 {
        match (self.offset_mode, to_right) {
            (OffsetMode::Traveled, true) => self.left_offset,
            (OffsetMode::Traveled, false) => -self.right_offset,
            (OffsetMode::FullWidth, true) => view_width - self.right_offset,
            (OffsetMode::FullWidth, false) => -view_width + self.left_offset,
        }
    }

    /// The configured action for travel toward the given side.
    #[must_use]
    pub fn action_toward(&self, to_right: bool) -> SwipeAction {
        if to_right {
            self.action_right
        } else {
            self.action_left
        }
    }

    /// Whether any swipe direction is enabled at all.
    #[must_use]
    pub fn swipe_enabled(&self) -> bool {
        !self.directions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_symmetric_with_equal_traveled_amounts() {
        let config = SwipeConfig {
            left_offset: 120.0,
            right_offset: 120.0,
            offset_mode: OffsetMode::Traveled,
            ..SwipeConfig::default()
        };
        for width in [100.0, 320.0, 1000.0] {
            assert_eq!(
                config.open_offset(width, true),
                -config.open_offset(width, false),
            );
        }
    }

    #[test]
    fn full_width_with_zero_margins_travels_the_whole_row() {
        let config = SwipeConfig {
            offset_mode: OffsetMode::FullWidth,
            ..SwipeConfig::default()
        };
        assert_eq!(config.open_offset(300.0, true), 300.0);
        assert_eq!(config.open_offset(300.0, false), -300.0);
    }

    #[test]
    fn full_width_subtracts_the_far_margin() {
        let config = SwipeConfig {
            offset_mode: OffsetMode::FullWidth,
            left_offset: 40.0,
            right_offset: 64.0,
            ..SwipeConfig::default()
        };
        assert_eq!(config.open_offset(300.0, true), 300.0 - 64.0);
        assert_eq!(config.open_offset(300.0, false), -300.0 + 40.0);
    }

    #[test]
    fn direction_flags_gate_travel() {
        assert!(SwipeDirections::all().allows(true));
        assert!(SwipeDirections::all().allows(false));
        assert!(SwipeDirections::LEFT.allows(false));
        assert!(!SwipeDirections::LEFT.allows(true));
        assert!(!SwipeDirections::empty().allows(true));
        assert!(!SwipeDirections::empty().allows(false));
    }

    #[test]
    fn per_side_actions() {
        let config = SwipeConfig {
            action_left: SwipeAction::Dismiss,
            action_right: SwipeAction::Choice,
            ..SwipeConfig::default()
        };
        assert_eq!(config.action_toward(false), SwipeAction::Dismiss);
        assert_eq!(config.action_toward(true), SwipeAction::Choice);
    }
}
