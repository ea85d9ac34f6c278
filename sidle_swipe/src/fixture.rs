// Copyright 2026 the Sidle Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic host and animator doubles shared by the unit tests.
//!
//! `TestList` renders `rendered` rows of `ROW_HEIGHT` logical pixels
//! stacked vertically from position `first`, and records every notification
//! it receives. `TestAnim` applies immediate setters synchronously and
//! queues animations; [`run_animations`] completes them at their terminal
//! values in FIFO order, which is how a real compositor would resolve them.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::{
    AnimationTarget, AnimationToken, ListModel, PointerEvent, PointerPhase, SurfaceAnimator,
    SurfaceId, SwipeController, SwipeListener,
};

pub(crate) const FRONT: SurfaceId = SurfaceId(1);
pub(crate) const BACK: SurfaceId = SurfaceId(2);
pub(crate) const ROW_HEIGHT: f64 = 48.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Part {
    Root,
    Front,
    Back,
}

/// Surface handle used by the doubles: a row position plus which of the
/// row's surfaces it names.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Surf {
    pub(crate) row: usize,
    pub(crate) part: Part,
}

pub(crate) fn root(row: usize) -> Surf {
    Surf {
        row,
        part: Part::Root,
    }
}

pub(crate) fn front(row: usize) -> Surf {
    Surf {
        row,
        part: Part::Front,
    }
}

pub(crate) fn back(row: usize) -> Surf {
    Surf {
        row,
        part: Part::Back,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Event {
    Opened(usize, bool),
    Closed(usize, bool),
    Dismissed(Vec<usize>),
    ChoiceStarted,
    ChoiceChanged(usize, bool),
    ChoiceEnded,
    ClickFront(usize),
    ClickBack(usize),
}

#[derive(Clone, Debug)]
pub(crate) struct TestList {
    pub(crate) items: usize,
    pub(crate) headers: usize,
    pub(crate) first: usize,
    pub(crate) rendered: usize,
    pub(crate) width: f64,
    pub(crate) disabled: Vec<usize>,
    pub(crate) ignored: Vec<usize>,
    pub(crate) events: Vec<Event>,
    pub(crate) moves: Vec<(usize, f64)>,
}

impl TestList {
    pub(crate) fn new(items: usize) -> Self {
        Self {
            items,
            headers: 0,
            first: 0,
            rendered: items,
            width: 300.0,
            disabled: Vec::new(),
            ignored: Vec::new(),
            events: Vec::new(),
            moves: Vec::new(),
        }
    }
}

impl ListModel for TestList {
    type Surface = Surf;

    fn item_count(&self) -> usize {
        self.items
    }

    fn header_count(&self) -> usize {
        self.headers
    }

    fn first_visible(&self) -> usize {
        self.first
    }

    fn last_visible(&self) -> usize {
        self.first + self.rendered.saturating_sub(1)
    }

    fn child_count(&self) -> usize {
        self.rendered
    }

    fn child_at(&self, slot: usize) -> Option<Surf> {
        (slot < self.rendered).then(|| root(self.first + slot))
    }

    fn position_of(&self, child: Surf) -> Option<usize> {
        Some(child.row)
    }

    fn bounds(&self, surface: Surf) -> Rect {
        let slot = surface.row - self.first;
        let y = slot as f64 * ROW_HEIGHT;
        Rect::new(0.0, y, self.width, y + ROW_HEIGHT)
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn is_enabled(&self, position: usize) -> bool {
        !self.disabled.contains(&position)
    }

    fn is_ignored(&self, position: usize) -> bool {
        self.ignored.contains(&position)
    }

    fn surface(&self, root: Surf, id: SurfaceId) -> Option<Surf> {
        if id == FRONT {
            Some(front(root.row))
        } else if id == BACK {
            Some(back(root.row))
        } else {
            None
        }
    }
}

impl SwipeListener for TestList {
    fn on_opened(&mut self, row: usize, to_right: bool) {
        self.events.push(Event::Opened(row, to_right));
    }

    fn on_closed(&mut self, row: usize, from_right: bool) {
        self.events.push(Event::Closed(row, from_right));
    }

    fn on_dismiss(&mut self, rows: &[usize]) {
        self.events.push(Event::Dismissed(rows.to_vec()));
    }

    fn on_move(&mut self, row: usize, offset: f64) {
        self.moves.push((row, offset));
    }

    fn on_choice_started(&mut self) {
        self.events.push(Event::ChoiceStarted);
    }

    fn on_choice_changed(&mut self, row: usize, checked: bool) {
        self.events.push(Event::ChoiceChanged(row, checked));
    }

    fn on_choice_ended(&mut self) {
        self.events.push(Event::ChoiceEnded);
    }

    fn on_click_front(&mut self, row: usize) {
        self.events.push(Event::ClickFront(row));
    }

    fn on_click_back(&mut self, row: usize) {
        self.events.push(Event::ClickBack(row));
    }
}

#[derive(Clone, Debug)]
pub(crate) struct QueuedAnimation {
    /// `None` for a delayed callback.
    pub(crate) surface: Option<Surf>,
    pub(crate) target: AnimationTarget,
    pub(crate) token: AnimationToken,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct TestAnim {
    pub(crate) offsets: BTreeMap<Surf, f64>,
    pub(crate) opacities: BTreeMap<Surf, f64>,
    pub(crate) heights: BTreeMap<Surf, f64>,
    pub(crate) hidden: BTreeMap<Surf, bool>,
    pub(crate) queue: Vec<QueuedAnimation>,
}

impl TestAnim {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn offset(&self, surface: Surf) -> f64 {
        self.offsets.get(&surface).copied().unwrap_or(0.0)
    }

    pub(crate) fn opacity(&self, surface: Surf) -> f64 {
        self.opacities.get(&surface).copied().unwrap_or(1.0)
    }

    pub(crate) fn is_hidden(&self, surface: Surf) -> bool {
        self.hidden.get(&surface).copied().unwrap_or(false)
    }

    fn apply(&mut self, q: &QueuedAnimation) {
        if let Some(surface) = q.surface {
            if let Some(x) = q.target.offset_x {
                self.offsets.insert(surface, x);
            }
            if let Some(a) = q.target.opacity {
                self.opacities.insert(surface, a);
            }
            if let Some(h) = q.target.height {
                self.heights.insert(surface, h);
            }
        }
    }
}

impl SurfaceAnimator for TestAnim {
    type Surface = Surf;

    fn offset_x(&self, surface: Surf) -> f64 {
        self.offset(surface)
    }

    fn set_offset_x(&mut self, surface: Surf, offset_x: f64) {
        self.offsets.insert(surface, offset_x);
    }

    fn set_opacity(&mut self, surface: Surf, opacity: f64) {
        self.opacities.insert(surface, opacity);
    }

    fn set_height(&mut self, surface: Surf, height: f64) {
        self.heights.insert(surface, height);
    }

    fn set_hidden(&mut self, surface: Surf, hidden: bool) {
        self.hidden.insert(surface, hidden);
    }

    fn animate(
        &mut self,
        surface: Surf,
        target: AnimationTarget,
        _duration_ms: u64,
        token: AnimationToken,
    ) {
        self.queue.push(QueuedAnimation {
            surface: Some(surface),
            target,
            token,
        });
    }

    fn run_delayed(&mut self, _delay_ms: u64, token: AnimationToken) {
        self.queue.push(QueuedAnimation {
            surface: None,
            target: AnimationTarget::default(),
            token,
        });
    }
}

/// Complete one queued animation (by index) at its terminal values.
pub(crate) fn finish_one(
    ctl: &mut SwipeController<Surf>,
    host: &mut TestList,
    anim: &mut TestAnim,
    index: usize,
) {
    let q = anim.queue.remove(index);
    anim.apply(&q);
    ctl.animation_finished(q.token, host, anim);
}

/// Complete queued animations FIFO until none remain, including any that
/// completions themselves start.
pub(crate) fn run_animations(
    ctl: &mut SwipeController<Surf>,
    host: &mut TestList,
    anim: &mut TestAnim,
) {
    while !anim.queue.is_empty() {
        finish_one(ctl, host, anim, 0);
    }
}

pub(crate) fn ev(phase: PointerPhase, x: f64, y: f64, time: u64) -> PointerEvent {
    PointerEvent::new(phase, Point::new(x, y), time)
}

pub(crate) fn press(
    ctl: &mut SwipeController<Surf>,
    host: &mut TestList,
    anim: &mut TestAnim,
    x: f64,
    y: f64,
    time: u64,
) -> bool {
    ctl.handle_event(&ev(PointerPhase::Down, x, y, time), host, anim)
}

pub(crate) fn move_to(
    ctl: &mut SwipeController<Surf>,
    host: &mut TestList,
    anim: &mut TestAnim,
    x: f64,
    y: f64,
    time: u64,
) -> bool {
    ctl.handle_event(&ev(PointerPhase::Move, x, y, time), host, anim)
}

pub(crate) fn release(
    ctl: &mut SwipeController<Surf>,
    host: &mut TestList,
    anim: &mut TestAnim,
    x: f64,
    y: f64,
    time: u64,
) -> bool {
    ctl.handle_event(&ev(PointerPhase::Up, x, y, time), host, anim)
}

/// Press at `from_x` and drag horizontally to `to_x` in 10 px steps, 10 ms
/// apart (1000 px/s). Returns the timestamp of the last move.
pub(crate) fn drag(
    ctl: &mut SwipeController<Surf>,
    host: &mut TestList,
    anim: &mut TestAnim,
    y: f64,
    from_x: f64,
    to_x: f64,
    t0: u64,
) -> u64 {
    let mut t = t0;
    press(ctl, host, anim, from_x, y, t);
    let dir = if to_x >= from_x { 1.0 } else { -1.0 };
    let mut x = from_x;
    while (to_x - x) * dir > 0.0 {
        x = if dir > 0.0 {
            (x + 10.0).min(to_x)
        } else {
            (x - 10.0).max(to_x)
        };
        t += 10;
        move_to(ctl, host, anim, x, y, t);
    }
    t
}

/// Hold the pointer still long enough for its velocity to read as zero.
pub(crate) fn settle_hold(
    ctl: &mut SwipeController<Surf>,
    host: &mut TestList,
    anim: &mut TestAnim,
    x: f64,
    y: f64,
    t0: u64,
) -> u64 {
    let mut t = t0;
    for _ in 0..3 {
        t += 30;
        move_to(ctl, host, anim, x, y, t);
    }
    t
}

/// A full drag-and-release swipe, still moving at release (so a fling is
/// possible).
pub(crate) fn swipe(
    ctl: &mut SwipeController<Surf>,
    host: &mut TestList,
    anim: &mut TestAnim,
    y: f64,
    from_x: f64,
    to_x: f64,
    t0: u64,
) -> u64 {
    let t = drag(ctl, host, anim, y, from_x, to_x, t0) + 10;
    release(ctl, host, anim, to_x, y, t);
    t
}

/// A drag that comes to rest before release, so only the traveled distance
/// can commit it.
pub(crate) fn slow_swipe(
    ctl: &mut SwipeController<Surf>,
    host: &mut TestList,
    anim: &mut TestAnim,
    y: f64,
    from_x: f64,
    to_x: f64,
    t0: u64,
) -> u64 {
    let t = drag(ctl, host, anim, y, from_x, to_x, t0);
    let t = settle_hold(ctl, host, anim, to_x, y, t) + 10;
    release(ctl, host, anim, to_x, y, t);
    t
}
