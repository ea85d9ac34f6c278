// Copyright 2026 the Sidle Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gesture state machine.
//!
//! ## Overview
//!
//! [`SwipeController`] turns a raw pointer stream into swipe outcomes. A
//! gesture moves through three states: at rest, armed (a hit row is being
//! tracked but the pointer hasn't committed to a horizontal drag), and
//! dragging. Release classifies the drag as a committed swipe, a fling, or a
//! snap-back, and hands the outcome to the animation half of the controller
//! (the `animate` module).
//!
//! ## Interception
//!
//! Containers that own vertical scrolling call
//! [`should_intercept`](SwipeController::should_intercept) with the same
//! stream. While a gesture is unclassified the controller accumulates
//! movement against the paging slop; once the gesture reads as horizontal,
//! interception returns `true` and the container should withhold its own
//! scroll handling.
//!
//! ## Direction gating
//!
//! Travel that conflicts with the configured directions — or, for an open
//! row, with the one direction that closes it — is clamped to zero and the
//! drag origin re-anchors to the current pointer position, so a reversal
//! acts immediately instead of fighting the accumulated delta.

use alloc::vec::Vec;

use log::{debug, trace};
use sidle_rows::{ChoiceCrossing, RowStates};
use smallvec::SmallVec;

use crate::animate::Completion;
use crate::config::{SwipeAction, SwipeConfig, SwipeDirections, TouchThresholds};
use crate::dismiss::DismissBatch;
use crate::host::{AnimationToken, ListModel, ScrollSignal, SurfaceAnimator, SwipeListener};
use crate::motion::{Motion, MovingItem, PointerEvent, PointerPhase, ScrollAxis, VelocityTracker};

/// How far the front surface follows the finger in choice mode, in logical
/// pixels. Selection is acknowledged with a nudge, never a full reveal.
pub(crate) const CHOICE_DISPLACE_LIMIT: f64 = 80.0;

/// Gesture state machine and animation orchestrator for one swipeable list.
///
/// The controller is plain data: the host list, listener, and animator are
/// passed by reference into every entry point, so the same controller drives
/// a real view system in production and deterministic doubles in tests.
///
/// `S` is the host's surface handle type (see
/// [`ListModel::Surface`](crate::ListModel::Surface)).
pub struct SwipeController<S> {
    pub(crate) config: SwipeConfig,
    pub(crate) thresholds: TouchThresholds,
    pub(crate) rows: RowStates,
    pub(crate) motion: Option<Motion>,
    pub(crate) moving: Option<MovingItem<S>>,
    pub(crate) paused: bool,
    // 1 and not 0 so offset math can never divide by zero before the first
    // layout pass is observed.
    pub(crate) view_width: f64,
    pub(crate) current_action: SwipeAction,
    pub(crate) action_left: SwipeAction,
    pub(crate) action_right: SwipeAction,
    pub(crate) batch: DismissBatch<S>,
    pub(crate) in_flight: SmallVec<[(AnimationToken, Completion<S>); 4]>,
    pub(crate) next_token: u64,
}

impl<S> core::fmt::Debug for SwipeController<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SwipeController")
            .field("paused", &self.paused)
            .field("view_width", &self.view_width)
            .field("current_action", &self.current_action)
            .field("dragging", &self.motion.as_ref().is_some_and(|m| m.dragging))
            .finish_non_exhaustive()
    }
}

impl<S: Copy + PartialEq> SwipeController<S> {
    /// Create a controller with default touch thresholds.
    #[must_use]
    pub fn new(config: SwipeConfig) -> Self {
        Self::with_thresholds(config, TouchThresholds::default())
    }

    /// Create a controller with explicit (typically platform-derived) touch
    /// thresholds.
    #[must_use]
    pub fn with_thresholds(config: SwipeConfig, thresholds: TouchThresholds) -> Self {
        let action_left = config.action_left;
        let action_right = config.action_right;
        Self {
            config,
            thresholds,
            rows: RowStates::new(),
            motion: None,
            moving: None,
            paused: false,
            view_width: 1.0,
            current_action: SwipeAction::None,
            action_left,
            action_right,
            batch: DismissBatch::new(),
            in_flight: SmallVec::new(),
            next_token: 0,
        }
    }

    /// The immutable configuration this controller was built with.
    #[must_use]
    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    /// Read access to the per-row open/selection state.
    #[must_use]
    pub fn rows(&self) -> &RowStates {
        &self.rows
    }

    /// Whether gesture handling is currently paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether any swipe direction is enabled.
    #[must_use]
    pub fn swipe_enabled(&self) -> bool {
        self.config.swipe_enabled()
    }

    /// Grow per-row state to cover `count` items.
    ///
    /// Call whenever the backing data set grows; existing open/selection
    /// state is preserved and storage never shrinks here.
    pub fn set_item_count(&mut self, count: usize) {
        self.rows.ensure_rows(count);
    }

    /// Rebuild all per-row state for a data set of `count` items and drop
    /// any gesture or animation bookkeeping in progress.
    pub fn reset(&mut self, count: usize) {
        self.rows.reset(count);
        self.motion = None;
        self.moving = None;
        self.batch.clear();
        self.in_flight.clear();
        self.action_left = self.config.action_left;
        self.action_right = self.config.action_right;
        self.current_action = SwipeAction::None;
    }

    /// Enable or disable gesture handling.
    ///
    /// Disabling mid-gesture snaps the tracked row back and clears the
    /// session; no partial commit survives.
    pub fn set_enabled<H, A>(&mut self, enabled: bool, host: &mut H, anim: &mut A)
    where
        H: ListModel<Surface = S> + SwipeListener,
        A: SurfaceAnimator<Surface = S>,
    {
        self.paused = !enabled;
        if !enabled {
            self.cancel_gesture(host, anim);
        }
    }

    /// React to the host list's own scroll activity.
    ///
    /// Gesture handling pauses while the user is touch-scrolling, and when
    /// [`SwipeConfig::close_on_scroll`] is set every open row closes as
    /// scrolling starts.
    pub fn scroll_state_changed<H, A>(&mut self, signal: ScrollSignal, host: &mut H, anim: &mut A)
    where
        H: ListModel<Surface = S> + SwipeListener,
        A: SurfaceAnimator<Surface = S>,
    {
        match signal {
            ScrollSignal::TouchScroll | ScrollSignal::Fling => {
                self.paused = signal == ScrollSignal::TouchScroll;
                if self.config.close_on_scroll {
                    debug!("list scrolling, closing open rows");
                    self.close_opened(host, anim);
                }
            }
            ScrollSignal::Idle => {
                self.paused = false;
                self.moving = None;
                if let Some(m) = &mut self.motion {
                    m.axis = ScrollAxis::Rest;
                }
            }
        }
    }

    /// Container-level pass deciding whether to withhold vertical scrolling.
    ///
    /// Feed the same pointer stream here that the container would otherwise
    /// scroll with. Returns `true` once the gesture has been classified as
    /// horizontal.
    pub fn should_intercept<H>(&mut self, ev: &PointerEvent, host: &H) -> bool
    where
        H: ListModel<Surface = S>,
    {
        if !self.swipe_enabled() {
            return false;
        }
        match ev.phase {
            PointerPhase::Down => {
                self.init_motion(ev, host);
                false
            }
            PointerPhase::Move => {
                self.update_scroll_axis(ev);
                let horizontal = self
                    .motion
                    .as_ref()
                    .is_some_and(|m| m.axis == ScrollAxis::Horizontal);
                trace!("intercept move, horizontal={horizontal}");
                horizontal
            }
            PointerPhase::Up | PointerPhase::Cancel => {
                if let Some(m) = &mut self.motion {
                    m.axis = ScrollAxis::Rest;
                }
                false
            }
        }
    }

    /// Item-level pass consuming the pointer stream.
    ///
    /// Returns whether the event was consumed by a swipe gesture. Events
    /// that match no tracked row, arrive while paused, or come from a
    /// pointer other than the one that went down are not consumed.
    pub fn handle_event<H, A>(&mut self, ev: &PointerEvent, host: &mut H, anim: &mut A) -> bool
    where
        H: ListModel<Surface = S> + SwipeListener,
        A: SurfaceAnimator<Surface = S>,
    {
        if !self.swipe_enabled() {
            return false;
        }
        self.view_width = host.width().max(1.0);

        if ev.phase != PointerPhase::Down
            && let Some(m) = &self.motion
            && ev.pointer_or_default() != m.pointer
        {
            // Single-pointer model: later pointers are noise, not gestures.
            return false;
        }

        match ev.phase {
            PointerPhase::Down => {
                if self.paused {
                    return false;
                }
                self.init_motion(ev, host);
                true
            }
            PointerPhase::Move => self.on_move(ev, host, anim),
            PointerPhase::Up => self.on_up(ev, host, anim),
            PointerPhase::Cancel => {
                self.cancel_gesture(host, anim);
                false
            }
        }
    }

    fn on_move<H, A>(&mut self, ev: &PointerEvent, host: &mut H, anim: &mut A) -> bool
    where
        H: ListModel<Surface = S> + SwipeListener,
        A: SurfaceAnimator<Surface = S>,
    {
        if self.paused {
            return false;
        }
        let Some(item) = self.moving else {
            return false;
        };
        let row = item.row;

        let (mut delta, was_dragging, vel) = {
            let Some(m) = self.motion.as_mut() else {
                return false;
            };
            let tracker = m
                .tracker
                .as_mut()
                .expect("velocity tracker must exist while a row is tracked");
            tracker.push(ev.time, ev.position);
            let vel = tracker.velocity();
            (ev.position.x - m.down_x, m.dragging, vel)
        };

        if !was_dragging {
            if delta != 0.0 && !Self::allows_direction(&self.config, &self.rows, row, delta > 0.0) {
                self.reanchor(ev);
                delta = 0.0;
            }
            if delta.abs() > self.thresholds.touch_slop && vel.y.abs() < vel.x.abs() {
                let to_right = delta > 0.0;
                if let Some(m) = self.motion.as_mut() {
                    m.dragging = true;
                    m.to_right = to_right;
                    // Re-anchor so arming doesn't jump the surface by the
                    // slop distance.
                    m.down_x = ev.position.x;
                }
                delta = 0.0;
                // The row's previous outcome animation may still be in
                // flight; classify against where it will settle.
                self.force_reveal_end_state(row, host);
                self.current_action = if self.rows.is_opened(row) {
                    SwipeAction::Reveal
                } else {
                    self.action_toward(to_right)
                };
                debug!(
                    "drag armed on row {row}, to_right={to_right}, action={:?}",
                    self.current_action
                );
                if !self.rows.is_opened(row) && !self.config.multiple_select {
                    self.close_opened(host, anim);
                }
                if let Some(back) = item.back {
                    anim.set_hidden(back, self.current_action == SwipeAction::Choice);
                }
            }
        }

        if !self.motion.as_ref().is_some_and(|m| m.dragging) {
            return false;
        }

        if delta != 0.0 && !Self::allows_direction(&self.config, &self.rows, row, delta > 0.0) {
            self.reanchor(ev);
            delta = 0.0;
        }

        // A drag that crosses back over its resting point changes effective
        // direction, and with it the action it would commit.
        let pos_x = anim.offset_x(item.front);
        let was_right = self.motion.as_ref().is_some_and(|m| m.to_right);
        let flipped = if pos_x > 0.0 && !was_right {
            Some(true)
        } else if pos_x < 0.0 && was_right {
            Some(false)
        } else {
            None
        };
        if let Some(to_right) = flipped {
            if let Some(m) = self.motion.as_mut() {
                m.to_right = to_right;
            }
            self.current_action = if self.rows.is_opened(row) {
                SwipeAction::Reveal
            } else {
                self.action_toward(to_right)
            };
            trace!("drag direction flipped on row {row}, to_right={to_right}");
            if let Some(back) = item.back {
                anim.set_hidden(back, self.current_action == SwipeAction::Choice);
            }
        }

        let resting = match self.rows.open_direction(row) {
            Some(dir) => self.config.open_offset(self.view_width, dir),
            None => 0.0,
        };
        // Choice drags never travel to an open offset, so the configured
        // travel interval doesn't apply; they get their own nudge limit.
        let target = if self.current_action == SwipeAction::Choice {
            resting + delta
        } else {
            self.clamp_target(resting + delta, row, resting)
        };

        match self.current_action {
            SwipeAction::Dismiss => {
                anim.set_offset_x(item.root, target);
                let opacity = (1.0 - 2.0 * target.abs() / self.view_width).clamp(0.0, 1.0);
                anim.set_opacity(item.root, opacity);
            }
            SwipeAction::Choice => {
                anim.set_offset_x(
                    item.front,
                    target.clamp(-CHOICE_DISPLACE_LIMIT, CHOICE_DISPLACE_LIMIT),
                );
            }
            _ => anim.set_offset_x(item.front, target),
        }
        host.on_move(row, target);
        true
    }

    fn on_up<H, A>(&mut self, ev: &PointerEvent, host: &mut H, anim: &mut A) -> bool
    where
        H: ListModel<Surface = S> + SwipeListener,
        A: SurfaceAnimator<Surface = S>,
    {
        let Some(mut m) = self.motion.take() else {
            return false;
        };

        if !m.dragging || self.moving.is_none() {
            // The gesture never armed; a hit row makes this a tap or a long
            // press.
            if let Some(item) = self.moving
                && !self.paused
                && !m.dragging
            {
                let row = item.row;
                let held = ev.time.saturating_sub(m.down_time);
                if self.config.open_on_long_press
                    && held >= self.thresholds.long_press_ms
                    && !self.rows.is_opened(row)
                {
                    debug!("long press opens row {row}");
                    self.open_row(row, host, anim);
                } else {
                    if self.rows.is_opened(row) {
                        host.on_click_back(row);
                    } else {
                        host.on_click_front(row);
                    }
                    self.moving = None;
                }
            }
            return false;
        }

        let item = self.moving.expect("checked above");
        let tracker = m
            .tracker
            .as_mut()
            .expect("velocity tracker must exist while a row is tracked");
        tracker.push(ev.time, ev.position);
        let vel = tracker.velocity();
        let delta = ev.position.x - m.down_x;

        let mut to_right = delta > 0.0;
        let mut valid = delta.abs() > self.view_width / 2.0;
        if !valid && self.is_valid_fling(vel, item.row) {
            valid = true;
            // A fast flick can be released while the finger still moves the
            // "wrong" way; the velocity's sign wins over the measured delta.
            to_right = vel.x > 0.0;
        }
        debug!(
            "release on row {}: delta={delta:.1}, vx={:.0}, valid={valid}, to_right={to_right}",
            item.row, vel.x
        );

        self.generate_animate(item, valid, to_right, host, anim);
        if self.current_action == SwipeAction::Choice && valid {
            self.swap_checked(item.row, host, anim);
        }
        false
    }

    /// Classify a release's velocity as a horizontal fling, with the same
    /// direction gating a drag is subject to.
    fn is_valid_fling(&self, vel: kurbo::Vec2, row: usize) -> bool {
        let vx = vel.x.abs();
        let vy = vel.y.abs();
        if vx < self.thresholds.min_fling_velocity
            || vx > self.thresholds.max_fling_velocity
            || vy * 2.0 > vx
        {
            return false;
        }
        Self::allows_direction(&self.config, &self.rows, row, vel.x > 0.0)
    }

    /// Whether travel toward `to_right` is permitted for `row` right now.
    ///
    /// An open row only accepts its closing direction; a closed row follows
    /// the configured direction set.
    fn allows_direction(
        config: &SwipeConfig,
        rows: &RowStates,
        row: usize,
        to_right: bool,
    ) -> bool {
        if let Some(open_right) = rows.open_direction(row) {
            return to_right != open_right;
        }
        config.directions.allows(to_right)
    }

    /// Clamp a drag target to the travel interval the configuration allows.
    fn clamp_target(&self, target: f64, row: usize, resting: f64) -> f64 {
        let directions = self.config.directions;
        if directions == SwipeDirections::all() || directions.is_empty() {
            return target;
        }
        let bound = if self.rows.is_opened(row) {
            resting
        } else {
            self.config
                .open_offset(self.view_width, directions.allows(true))
        };
        let (lo, hi) = if bound < 0.0 { (bound, 0.0) } else { (0.0, bound) };
        target.clamp(lo, hi)
    }

    /// The session's action for travel toward `to_right`. Differs from the
    /// configured actions while a choice session overrides both sides.
    pub(crate) fn action_toward(&self, to_right: bool) -> SwipeAction {
        if to_right {
            self.action_right
        } else {
            self.action_left
        }
    }

    fn reanchor(&mut self, ev: &PointerEvent) {
        if let Some(m) = self.motion.as_mut() {
            m.down_x = ev.position.x;
        }
    }

    /// Start tracking the gesture that `ev` begins, hit-testing the rendered
    /// rows for a swipeable one.
    fn init_motion<H>(&mut self, ev: &PointerEvent, host: &H)
    where
        H: ListModel<Surface = S>,
    {
        debug_assert!(
            self.rows.len() >= host.item_count(),
            "row state must cover the item count; call set_item_count after data changes"
        );
        self.current_action = SwipeAction::None;
        self.moving = self.hit_row(ev, host);
        let mut m = Motion::begin(ev);
        if self.moving.is_some() {
            let mut tracker = VelocityTracker::new();
            tracker.push(ev.time, ev.position);
            m.tracker = Some(tracker);
        }
        self.motion = Some(m);
    }

    /// Find the rendered row under the pointer, rejecting rows that never
    /// swipe (headers, disabled rows, ignored view types).
    fn hit_row<H>(&self, ev: &PointerEvent, host: &H) -> Option<MovingItem<S>>
    where
        H: ListModel<Surface = S>,
    {
        for slot in 0..host.child_count() {
            let Some(root) = host.child_at(slot) else {
                continue;
            };
            if !host.bounds(root).contains(ev.position) {
                continue;
            }
            let Some(row) = host.position_of(root) else {
                trace!("touch landed on a non-data child");
                return None;
            };
            if row < host.header_count() || !host.is_enabled(row) || host.is_ignored(row) {
                trace!("row {row} rejected for swipe");
                return None;
            }
            let Some(front) = host.surface(root, self.config.front_surface) else {
                debug_assert!(false, "front surface must resolve for row {row}");
                return None;
            };
            let back = self
                .config
                .back_surface
                .and_then(|id| host.surface(root, id));
            return Some(MovingItem {
                row,
                root,
                front,
                back,
            });
        }
        None
    }

    /// Accumulate container-level movement and classify the gesture's axis
    /// once it travels past the paging slop.
    fn update_scroll_axis(&mut self, ev: &PointerEvent) {
        let Some(m) = self.motion.as_mut() else {
            return;
        };
        let dx = (ev.position.x - m.last_x).abs();
        let dy = (ev.position.y - m.last_y).abs();
        if dx > self.thresholds.paging_slop || dy > self.thresholds.paging_slop {
            m.axis = if dx > dy {
                ScrollAxis::Horizontal
            } else {
                ScrollAxis::Vertical
            };
            m.last_x = ev.position.x;
            m.last_y = ev.position.y;
        }
    }

    /// Abort any live gesture with a snap-back; no partial commit survives.
    fn cancel_gesture<H, A>(&mut self, host: &mut H, anim: &mut A)
    where
        H: ListModel<Surface = S> + SwipeListener,
        A: SurfaceAnimator<Surface = S>,
    {
        let Some(m) = self.motion.take() else {
            self.moving = None;
            return;
        };
        if m.dragging
            && let Some(item) = self.moving
        {
            debug!("gesture cancelled while dragging row {}", item.row);
            self.start_reveal(item.front, false, m.to_right, item.row, host, anim);
            // The snap-back's completion resets the moving item.
            return;
        }
        self.moving = None;
    }

    /// Dispatch a release to its configured outcome animation.
    fn generate_animate<H, A>(
        &mut self,
        item: MovingItem<S>,
        valid_move: bool,
        to_right: bool,
        host: &mut H,
        anim: &mut A,
    ) where
        H: ListModel<Surface = S> + SwipeListener,
        A: SurfaceAnimator<Surface = S>,
    {
        let row = item.row;
        let action = if self.rows.is_opened(row) {
            SwipeAction::Reveal
        } else {
            self.action_toward(to_right)
        };
        match action {
            SwipeAction::Reveal => {
                self.start_reveal(item.front, valid_move, to_right, row, host, anim);
            }
            SwipeAction::Dismiss => {
                self.start_dismiss(item.root, valid_move, to_right, row, anim);
            }
            SwipeAction::Choice => self.start_choice(item.front, anim),
            SwipeAction::None => {
                // No outcome configured for this side; the row snaps back.
                self.start_reveal(item.front, false, to_right, row, host, anim);
            }
        }
    }

    /// Toggle a row's selection and drive the choice-session transitions.
    fn swap_checked<H, A>(&mut self, row: usize, host: &mut H, anim: &mut A)
    where
        H: ListModel<Surface = S> + SwipeListener,
        A: SurfaceAnimator<Surface = S>,
    {
        let (checked, crossing) = self.rows.toggle_checked(row);
        debug!("row {row} checked={checked}");
        self.apply_crossing(crossing, host, anim);
        host.on_choice_changed(row, checked);
    }

    fn apply_crossing<H, A>(&mut self, crossing: ChoiceCrossing, host: &mut H, anim: &mut A)
    where
        H: ListModel<Surface = S> + SwipeListener,
        A: SurfaceAnimator<Surface = S>,
    {
        match crossing {
            ChoiceCrossing::Began => {
                host.on_choice_started();
                self.close_opened(host, anim);
                self.action_left = SwipeAction::Choice;
                self.action_right = SwipeAction::Choice;
            }
            ChoiceCrossing::Ended => {
                host.on_choice_ended();
                self.action_left = self.config.action_left;
                self.action_right = self.config.action_right;
            }
            ChoiceCrossing::None => {}
        }
    }

    /// Programmatically set a row's selection, with the same choice-session
    /// transitions a gesture toggle performs.
    pub fn set_row_checked<H, A>(&mut self, row: usize, checked: bool, host: &mut H, anim: &mut A)
    where
        H: ListModel<Surface = S> + SwipeListener,
        A: SurfaceAnimator<Surface = S>,
    {
        if self.rows.is_checked(row) == checked {
            return;
        }
        let crossing = self.rows.set_checked(row, checked);
        self.apply_crossing(crossing, host, anim);
        host.on_choice_changed(row, checked);
    }

    /// Deselect every row, ending any choice session.
    ///
    /// No animation runs: deselection only repaints, which the host does in
    /// response to [`SwipeListener::on_choice_changed`].
    pub fn unselect_all<H>(&mut self, host: &mut H)
    where
        H: ListModel<Surface = S> + SwipeListener,
    {
        let first = host.first_visible();
        let last = host.last_visible();
        let was = self.rows.clear_checked();
        if was.is_empty() {
            return;
        }
        for &row in &was {
            if row >= first && row <= last {
                host.on_choice_changed(row, false);
            }
        }
        host.on_choice_ended();
        self.action_left = self.config.action_left;
        self.action_right = self.config.action_right;
    }

    /// Programmatically open a row.
    ///
    /// A visible row animates open; an off-screen row just records the
    /// state. Opens toward the right only when that is the sole configured
    /// direction.
    pub fn open_row<H, A>(&mut self, row: usize, host: &mut H, anim: &mut A)
    where
        H: ListModel<Surface = S> + SwipeListener,
        A: SurfaceAnimator<Surface = S>,
    {
        self.view_width = host.width().max(1.0);
        let to_right = self.config.directions == SwipeDirections::RIGHT;
        if let Some(front) = self.front_surface_at(row, host) {
            if !self.rows.is_opened(row) {
                self.start_reveal(front, true, to_right, row, host, anim);
            }
        } else {
            self.rows.set_opened(row, to_right);
        }
    }

    /// Programmatically close a row.
    pub fn close_row<H, A>(&mut self, row: usize, host: &mut H, anim: &mut A)
    where
        H: ListModel<Surface = S> + SwipeListener,
        A: SurfaceAnimator<Surface = S>,
    {
        self.view_width = host.width().max(1.0);
        if let Some(front) = self.front_surface_at(row, host) {
            if let Some(dir) = self.rows.open_direction(row) {
                self.start_reveal(front, true, dir, row, host, anim);
            }
        } else {
            self.rows.set_closed(row);
        }
    }

    /// Close every open row: visible ones animate shut, off-screen ones are
    /// recorded closed immediately.
    pub fn close_opened<H, A>(&mut self, host: &mut H, anim: &mut A)
    where
        H: ListModel<Surface = S> + SwipeListener,
        A: SurfaceAnimator<Surface = S>,
    {
        let open: Vec<usize> = self.rows.opened_rows().collect();
        if open.is_empty() {
            return;
        }
        let first = host.first_visible();
        let last = host.last_visible();
        for row in open {
            if row >= first
                && row <= last
                && let Some(front) = self.front_surface_at(row, host)
            {
                let dir = self.rows.open_direction(row).unwrap_or(false);
                self.start_reveal(front, true, dir, row, host, anim);
            }
            self.rows.set_closed(row);
        }
    }

    /// Dismiss a row programmatically, joining any dismiss batch already in
    /// flight. Returns the height of the removed view, or `0.0` when the
    /// row is off screen.
    pub fn dismiss_row<H, A>(&mut self, row: usize, host: &mut H, anim: &mut A) -> f64
    where
        H: ListModel<Surface = S> + SwipeListener,
        A: SurfaceAnimator<Surface = S>,
    {
        self.view_width = host.width().max(1.0);
        self.batch.begin();
        let first = host.first_visible();
        let last = host.last_visible();
        if row >= first
            && row <= last
            && let Some(root) = host.child_at(row - first)
        {
            let height = host.bounds(root).height();
            self.perform_dismiss(root, row, host, anim);
            return height;
        }
        // Off screen: queue it and force a settle pass unless a concurrent
        // animated batch will settle for us.
        self.batch.push(row, None, 0.0);
        if self.batch.finish() {
            let token = self.issue(Completion::Settle);
            anim.run_delayed(0, token);
        }
        0.0
    }

    /// The front surface of `row`, when the row is currently rendered.
    pub(crate) fn front_surface_at<H>(&self, row: usize, host: &H) -> Option<S>
    where
        H: ListModel<Surface = S>,
    {
        let first = host.first_visible();
        if row > host.last_visible() {
            return None;
        }
        let slot = row.checked_sub(first)?;
        let root = host.child_at(slot)?;
        host.surface(root, self.config.front_surface)
    }
}
