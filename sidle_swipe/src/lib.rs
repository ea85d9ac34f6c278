// Copyright 2026 the Sidle Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=sidle_swipe --heading-base-level=0

//! Sidle Swipe: touch-gesture handling for swipeable list rows.
//!
//! ## Overview
//!
//! This crate is the gesture half of a swipe-to-reveal/dismiss list widget:
//! it classifies a raw pointer stream into scroll-vs-swipe-vs-tap, drives a
//! tracked row's surfaces while the finger moves, and commits releases into
//! one of three outcome animations — reveal, dismiss, or choice (selection).
//! Per-row open/selection state lives in [`sidle_rows`]; this crate mutates
//! it as gestures commit.
//!
//! It deliberately knows nothing about any view system. The host provides
//! three capabilities, passed by reference into every entry point:
//!
//! - [`ListModel`]: row counts, the rendered window, child bounds, and
//!   surface resolution;
//! - [`SwipeListener`]: notifications (opened/closed/dismissed/moved,
//!   choice transitions, taps);
//! - [`SurfaceAnimator`]: set/animate horizontal offset, opacity, and
//!   height. Animations complete asynchronously: the engine tags each with
//!   an [`AnimationToken`] and the host reports completion through
//!   [`SwipeController::animation_finished`].
//!
//! Because all three are traits, a synchronous deterministic double makes
//! the whole engine unit-testable; the crate's own tests drive it that way.
//!
//! ## Gesture model
//!
//! A container that owns vertical scrolling feeds the same stream to
//! [`SwipeController::should_intercept`]; once accumulated movement past
//! the paging slop reads as horizontal, the container should withhold its
//! scroll handling. Item-level events go to
//! [`SwipeController::handle_event`]. A drag arms once travel beats the
//! touch slop with horizontal velocity dominating; a release commits when
//! it traveled past half the row width or qualifies as a fling (horizontal
//! velocity within the configured window, vertical at most half of it, and
//! the direction permitted). Direction-violating travel is clamped and the
//! drag origin re-anchored, so reversals act immediately.
//!
//! ## Minimal example
//!
//! A single 300 px row opened by a rightward swipe, with an animator double
//! that completes instantly:
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use sidle_swipe::{
//!     AnimationTarget, AnimationToken, ListModel, OffsetMode, PointerEvent, PointerPhase,
//!     SurfaceAnimator, SurfaceId, SwipeConfig, SwipeController, SwipeDirections, SwipeListener,
//! };
//!
//! const FRONT: SurfaceId = SurfaceId(1);
//!
//! struct OneRow {
//!     opened: Vec<(usize, bool)>,
//! }
//!
//! impl ListModel for OneRow {
//!     type Surface = u32;
//!     fn item_count(&self) -> usize { 1 }
//!     fn first_visible(&self) -> usize { 0 }
//!     fn last_visible(&self) -> usize { 0 }
//!     fn child_count(&self) -> usize { 1 }
//!     fn child_at(&self, slot: usize) -> Option<u32> { (slot == 0).then_some(10) }
//!     fn position_of(&self, _child: u32) -> Option<usize> { Some(0) }
//!     fn bounds(&self, _surface: u32) -> Rect { Rect::new(0.0, 0.0, 300.0, 48.0) }
//!     fn width(&self) -> f64 { 300.0 }
//!     fn surface(&self, root: u32, _id: SurfaceId) -> Option<u32> { Some(root + 1) }
//! }
//!
//! impl SwipeListener for OneRow {
//!     fn on_opened(&mut self, row: usize, to_right: bool) {
//!         self.opened.push((row, to_right));
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Instant {
//!     offsets: std::collections::BTreeMap<u32, f64>,
//!     done: Vec<AnimationToken>,
//! }
//!
//! impl SurfaceAnimator for Instant {
//!     type Surface = u32;
//!     fn offset_x(&self, s: u32) -> f64 { self.offsets.get(&s).copied().unwrap_or(0.0) }
//!     fn set_offset_x(&mut self, s: u32, x: f64) { self.offsets.insert(s, x); }
//!     fn set_opacity(&mut self, _s: u32, _a: f64) {}
//!     fn set_height(&mut self, _s: u32, _h: f64) {}
//!     fn set_hidden(&mut self, _s: u32, _hidden: bool) {}
//!     fn animate(&mut self, s: u32, target: AnimationTarget, _ms: u64, token: AnimationToken) {
//!         if let Some(x) = target.offset_x {
//!             self.offsets.insert(s, x);
//!         }
//!         self.done.push(token);
//!     }
//!     fn run_delayed(&mut self, _ms: u64, token: AnimationToken) {
//!         self.done.push(token);
//!     }
//! }
//!
//! let config = SwipeConfig {
//!     directions: SwipeDirections::RIGHT,
//!     offset_mode: OffsetMode::FullWidth,
//!     front_surface: FRONT,
//!     ..SwipeConfig::default()
//! };
//! let mut ctl = SwipeController::new(config);
//! ctl.set_item_count(1);
//!
//! let mut host = OneRow { opened: Vec::new() };
//! let mut anim = Instant::default();
//!
//! // Drag the row 200 px to the right and let go.
//! let down = PointerEvent::new(PointerPhase::Down, Point::new(10.0, 24.0), 0);
//! ctl.handle_event(&down, &mut host, &mut anim);
//! let mut t = 0;
//! for step in 1..=20_u64 {
//!     t = step * 10;
//!     let x = 10.0 + step as f64 * 10.0;
//!     let mv = PointerEvent::new(PointerPhase::Move, Point::new(x, 24.0), t);
//!     ctl.handle_event(&mv, &mut host, &mut anim);
//! }
//! let up = PointerEvent::new(PointerPhase::Up, Point::new(210.0, 24.0), t + 10);
//! ctl.handle_event(&up, &mut host, &mut anim);
//!
//! // Deliver the completion of the reveal animation the release started.
//! for token in std::mem::take(&mut anim.done) {
//!     ctl.animation_finished(token, &mut host, &mut anim);
//! }
//!
//! assert_eq!(host.opened, vec![(0, true)]);
//! assert!(ctl.rows().is_opened(0));
//! assert_eq!(anim.offset_x(11), 300.0);
//! ```
//!
//! ## Dismiss batches
//!
//! Several rows may animate out concurrently; their completions are
//! reconciled by a reference-counted [`DismissBatch`] so the host receives
//! exactly one [`SwipeListener::on_dismiss`] per batch, with positions in
//! descending order — safe to apply one by one without re-indexing.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as
//!   `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for
//!   floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod animate;
mod config;
mod dismiss;
#[cfg(test)]
mod fixture;
mod host;
mod machine;
mod motion;

pub use config::{OffsetMode, SwipeAction, SwipeConfig, SwipeDirections, TouchThresholds};
pub use dismiss::{DismissBatch, PendingDismiss};
pub use host::{
    AnimationTarget, AnimationToken, ListModel, ScrollSignal, SurfaceAnimator, SurfaceId,
    SwipeListener,
};
pub use machine::SwipeController;
pub use motion::{PointerEvent, PointerId, PointerPhase, VelocityTracker, VelocityTracker1D};
