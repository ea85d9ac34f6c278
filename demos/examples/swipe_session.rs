// Copyright 2026 the Sidle Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted swipe session against deterministic host doubles.
//!
//! This example wires `sidle_swipe::SwipeController` to an in-memory list
//! and a queue-based animator, then replays a few gestures: a committed
//! reveal, a tap on the open row, a second reveal that closes the first,
//! and a batched dismissal of three rows at once.
//!
//! Run:
//! - `cargo run -p sidle_demos --example swipe_session`

use std::collections::BTreeMap;

use kurbo::{Point, Rect};
use sidle_swipe::{
    AnimationTarget, AnimationToken, ListModel, OffsetMode, PointerEvent, PointerPhase,
    SurfaceAnimator, SurfaceId, SwipeAction, SwipeConfig, SwipeController, SwipeDirections,
    SwipeListener,
};

const FRONT: SurfaceId = SurfaceId(1);
const BACK: SurfaceId = SurfaceId(2);
const ROW_HEIGHT: f64 = 48.0;
const WIDTH: f64 = 320.0;

/// Surface handles: `row * 10 + part`, where part 0 is the row root,
/// 1 the front surface, and 2 the back surface.
type Surface = u64;

fn root_of(row: usize) -> Surface {
    (row as u64) * 10
}

/// Five fully rendered rows that print every notification they receive.
struct DemoList {
    items: usize,
}

impl ListModel for DemoList {
    type Surface = Surface;

    fn item_count(&self) -> usize {
        self.items
    }

    fn first_visible(&self) -> usize {
        0
    }

    fn last_visible(&self) -> usize {
        self.items - 1
    }

    fn child_count(&self) -> usize {
        self.items
    }

    fn child_at(&self, slot: usize) -> Option<Surface> {
        (slot < self.items).then(|| root_of(slot))
    }

    fn position_of(&self, child: Surface) -> Option<usize> {
        Some((child / 10) as usize)
    }

    fn bounds(&self, surface: Surface) -> Rect {
        let y = (surface / 10) as f64 * ROW_HEIGHT;
        Rect::new(0.0, y, WIDTH, y + ROW_HEIGHT)
    }

    fn width(&self) -> f64 {
        WIDTH
    }

    fn surface(&self, root: Surface, id: SurfaceId) -> Option<Surface> {
        match id {
            FRONT => Some(root + 1),
            BACK => Some(root + 2),
            _ => None,
        }
    }
}

impl SwipeListener for DemoList {
    fn on_opened(&mut self, row: usize, to_right: bool) {
        println!("  -> opened row {row} toward the {}", side(to_right));
    }

    fn on_closed(&mut self, row: usize, from_right: bool) {
        println!("  -> closed row {row} (was open {})", side(from_right));
    }

    fn on_dismiss(&mut self, rows: &[usize]) {
        println!("  -> dismiss rows {rows:?} (descending, apply in order)");
    }

    fn on_choice_started(&mut self) {
        println!("  -> choice mode started");
    }

    fn on_choice_changed(&mut self, row: usize, checked: bool) {
        println!("  -> row {row} checked={checked}");
    }

    fn on_choice_ended(&mut self) {
        println!("  -> choice mode ended");
    }

    fn on_click_front(&mut self, row: usize) {
        println!("  -> front of row {row} clicked");
    }

    fn on_click_back(&mut self, row: usize) {
        println!("  -> back of row {row} clicked");
    }
}

fn side(to_right: bool) -> &'static str {
    if to_right { "right" } else { "left" }
}

/// Queue-based animator: gestures enqueue animations, and the session loop
/// completes them at their terminal values, like a compositor frame would.
#[derive(Default)]
struct DemoAnim {
    offsets: BTreeMap<Surface, f64>,
    queue: Vec<(Option<Surface>, AnimationTarget, AnimationToken)>,
}

impl SurfaceAnimator for DemoAnim {
    type Surface = Surface;

    fn offset_x(&self, surface: Surface) -> f64 {
        self.offsets.get(&surface).copied().unwrap_or(0.0)
    }

    fn set_offset_x(&mut self, surface: Surface, offset_x: f64) {
        self.offsets.insert(surface, offset_x);
    }

    fn set_opacity(&mut self, _surface: Surface, _opacity: f64) {}

    fn set_height(&mut self, _surface: Surface, _height: f64) {}

    fn set_hidden(&mut self, _surface: Surface, _hidden: bool) {}

    fn animate(
        &mut self,
        surface: Surface,
        target: AnimationTarget,
        _duration_ms: u64,
        token: AnimationToken,
    ) {
        self.queue.push((Some(surface), target, token));
    }

    fn run_delayed(&mut self, _delay_ms: u64, token: AnimationToken) {
        self.queue.push((None, AnimationTarget::default(), token));
    }
}

/// Complete queued animations until the queue drains.
fn run_animations(ctl: &mut SwipeController<Surface>, host: &mut DemoList, anim: &mut DemoAnim) {
    while !anim.queue.is_empty() {
        let (surface, target, token) = anim.queue.remove(0);
        if let (Some(surface), Some(x)) = (surface, target.offset_x) {
            anim.offsets.insert(surface, x);
        }
        ctl.animation_finished(token, host, anim);
    }
}

/// Drag horizontally in 10 px / 10 ms steps, then release.
fn swipe(
    ctl: &mut SwipeController<Surface>,
    host: &mut DemoList,
    anim: &mut DemoAnim,
    y: f64,
    from_x: f64,
    to_x: f64,
    t0: u64,
) {
    let mut t = t0;
    ctl.handle_event(
        &PointerEvent::new(PointerPhase::Down, Point::new(from_x, y), t),
        host,
        anim,
    );
    let step = if to_x >= from_x { 10.0 } else { -10.0 };
    let mut x = from_x;
    while (to_x - x) * step > 0.0 {
        x += step;
        t += 10;
        ctl.handle_event(
            &PointerEvent::new(PointerPhase::Move, Point::new(x, y), t),
            host,
            anim,
        );
    }
    ctl.handle_event(
        &PointerEvent::new(PointerPhase::Up, Point::new(to_x, y), t + 10),
        host,
        anim,
    );
}

fn tap(
    ctl: &mut SwipeController<Surface>,
    host: &mut DemoList,
    anim: &mut DemoAnim,
    y: f64,
    t0: u64,
) {
    ctl.handle_event(
        &PointerEvent::new(PointerPhase::Down, Point::new(40.0, y), t0),
        host,
        anim,
    );
    ctl.handle_event(
        &PointerEvent::new(PointerPhase::Up, Point::new(40.0, y), t0 + 60),
        host,
        anim,
    );
}

fn row_y(row: usize) -> f64 {
    row as f64 * ROW_HEIGHT + ROW_HEIGHT / 2.0
}

fn main() {
    let mut host = DemoList { items: 5 };

    println!("== Reveal: swipe rows open and closed ==");
    let config = SwipeConfig {
        directions: SwipeDirections::all(),
        offset_mode: OffsetMode::FullWidth,
        right_offset: 80.0,
        left_offset: 80.0,
        front_surface: FRONT,
        back_surface: Some(BACK),
        ..SwipeConfig::default()
    };
    let mut ctl = SwipeController::new(config);
    ctl.set_item_count(host.items);
    let mut anim = DemoAnim::default();

    println!("swipe row 1 right, 240 px:");
    swipe(&mut ctl, &mut host, &mut anim, row_y(1), 20.0, 260.0, 0);
    run_animations(&mut ctl, &mut host, &mut anim);
    println!("  front of row 1 rests at {:+.0} px", anim.offset_x(11));

    println!("tap the open row:");
    tap(&mut ctl, &mut host, &mut anim, row_y(1), 1000);

    println!("swipe row 3 right (row 1 closes first):");
    swipe(&mut ctl, &mut host, &mut anim, row_y(3), 20.0, 260.0, 2000);
    run_animations(&mut ctl, &mut host, &mut anim);

    println!("\n== Dismiss: one settled batch for three rows ==");
    let config = SwipeConfig {
        directions: SwipeDirections::LEFT,
        action_left: SwipeAction::Dismiss,
        offset_mode: OffsetMode::FullWidth,
        front_surface: FRONT,
        back_surface: Some(BACK),
        ..SwipeConfig::default()
    };
    let mut ctl = SwipeController::new(config);
    ctl.set_item_count(host.items);
    let mut anim = DemoAnim::default();

    println!("swipe row 2 left to dismiss it, and queue rows 4 and 0 programmatically:");
    swipe(&mut ctl, &mut host, &mut anim, row_y(2), 300.0, 60.0, 0);
    ctl.dismiss_row(4, &mut host, &mut anim);
    ctl.dismiss_row(0, &mut host, &mut anim);
    run_animations(&mut ctl, &mut host, &mut anim);

    println!("\n== Choice: swipes select instead of revealing ==");
    let config = SwipeConfig {
        action_left: SwipeAction::Choice,
        action_right: SwipeAction::Choice,
        front_surface: FRONT,
        back_surface: Some(BACK),
        ..SwipeConfig::default()
    };
    let mut ctl = SwipeController::new(config);
    ctl.set_item_count(host.items);
    let mut anim = DemoAnim::default();

    println!("swipe rows 0 and 2 to select them:");
    swipe(&mut ctl, &mut host, &mut anim, row_y(0), 20.0, 260.0, 0);
    run_animations(&mut ctl, &mut host, &mut anim);
    swipe(&mut ctl, &mut host, &mut anim, row_y(2), 20.0, 260.0, 1000);
    run_animations(&mut ctl, &mut host, &mut anim);
    println!(
        "selected rows: {:?}",
        ctl.rows().checked_rows().collect::<Vec<_>>()
    );

    println!("clear the selection:");
    ctl.unselect_all(&mut host);
}
