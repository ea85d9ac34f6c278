// Copyright 2026 the Sidle Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-gesture motion tracking: pointer events, velocity estimation, and the
//! ephemeral gesture session.

use core::num::NonZeroU64;

use kurbo::{Point, Vec2};

/// Pointer identifier, defaulting to 1 when the platform does not report one.
pub type PointerId = NonZeroU64;

/// Phase of a pointer event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    /// The pointer made contact.
    Down,
    /// The pointer moved while down.
    Move,
    /// The pointer lifted.
    Up,
    /// The gesture was taken away (for example by the platform).
    Cancel,
}

/// One event from the platform's pointer stream.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Phase of this event.
    pub phase: PointerPhase,
    /// Pointer position, in the host list's coordinate space.
    pub position: Point,
    /// Event timestamp in milliseconds. Any monotonic base works as long as
    /// it is shared across one gesture.
    pub time: u64,
    /// Reporting pointer, if the platform distinguishes them.
    pub pointer: Option<PointerId>,
}

impl PointerEvent {
    /// Create an event for the default pointer.
    #[must_use]
    pub fn new(phase: PointerPhase, position: Point, time: u64) -> Self {
        Self {
            phase,
            position,
            time,
            pointer: None,
        }
    }

    pub(crate) fn pointer_or_default(&self) -> PointerId {
        self.pointer
            .unwrap_or(NonZeroU64::new(1).expect("1 is valid non-zero"))
    }
}

/// Ring buffer size for velocity samples.
const HISTORY_SIZE: usize = 20;

/// Only samples within this window of the newest one contribute.
const HORIZON_MS: u64 = 100;

/// If the pointer barely moved for this long, treat it as stopped.
const ASSUME_STOPPED_MS: u64 = 40;

/// Total movement below this over `ASSUME_STOPPED_MS` reads as zero velocity.
const MIN_MOVEMENT: f64 = 2.0;

#[derive(Copy, Clone, Debug)]
struct Sample {
    time: u64,
    value: f64,
}

/// Single-axis pointer velocity estimator.
///
/// Keeps a short ring buffer of timestamped positions and fits a
/// recency-weighted regression line over the samples inside a 100 ms
/// horizon, yielding velocity in units per second. Linear input produces the
/// exact slope; jittery input is smoothed toward the recent samples.
#[derive(Clone, Debug)]
pub struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    /// Create an empty tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    /// Record a position at the given timestamp.
    pub fn push(&mut self, time: u64, value: f64) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time, value });
    }

    /// Drop all recorded samples.
    pub fn clear(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }

    /// Estimated velocity in units per second.
    ///
    /// Returns 0.0 with fewer than two usable samples, or when the pointer
    /// has effectively stopped moving.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        let Some(newest) = self.samples[self.index] else {
            return 0.0;
        };

        let mut values = [0.0; HISTORY_SIZE];
        let mut ages = [0.0; HISTORY_SIZE];
        let mut count = 0;
        let mut oldest = newest;

        let mut current = self.index;
        loop {
            let Some(sample) = self.samples[current] else {
                break;
            };
            let age = newest.time.saturating_sub(sample.time);
            if age > HORIZON_MS {
                break;
            }
            oldest = sample;
            values[count] = sample.value;
            // Negative: we walk backwards from the newest sample.
            ages[count] = -(age as f64);
            count += 1;
            if count >= HISTORY_SIZE {
                break;
            }
            current = if current == 0 {
                HISTORY_SIZE - 1
            } else {
                current - 1
            };
        }

        if count < 2 {
            return 0.0;
        }

        // A pointer that rested in place before lifting should not fling.
        let span = newest.time.saturating_sub(oldest.time);
        if span > ASSUME_STOPPED_MS && (newest.value - oldest.value).abs() < MIN_MOVEMENT {
            return 0.0;
        }

        Self::weighted_slope(&values, &ages, count) * 1000.0
    }

    /// Recency-weighted least-squares slope in units per millisecond.
    fn weighted_slope(values: &[f64; HISTORY_SIZE], ages: &[f64; HISTORY_SIZE], count: usize) -> f64 {
        let mut sum_w = 0.0;
        let mut sum_t = 0.0;
        let mut sum_x = 0.0;
        let mut sum_tt = 0.0;
        let mut sum_tx = 0.0;

        // Half-life of a few samples; the newest sample carries the most
        // weight so a late direction change is reflected quickly.
        let decay: f64 = 0.95;
        let mut weight = 1.0;
        for i in 0..count {
            let t = ages[i];
            let x = values[i];
            sum_w += weight;
            sum_t += weight * t;
            sum_x += weight * x;
            sum_tt += weight * t * t;
            sum_tx += weight * t * x;
            weight *= decay;
        }

        let denom = sum_w * sum_tt - sum_t * sum_t;
        if denom.abs() < f64::EPSILON {
            return 0.0;
        }
        (sum_w * sum_tx - sum_t * sum_x) / denom
    }
}

/// Two-axis velocity estimator over pointer positions.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    x: VelocityTracker1D,
    y: VelocityTracker1D,
}

impl VelocityTracker {
    /// Create an empty tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            x: VelocityTracker1D::new(),
            y: VelocityTracker1D::new(),
        }
    }

    /// Record a pointer position at the given timestamp.
    pub fn push(&mut self, time: u64, position: Point) {
        self.x.push(time, position.x);
        self.y.push(time, position.y);
    }

    /// Estimated pointer velocity in units per second.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.x.velocity(), self.y.velocity())
    }
}

/// Which axis a not-yet-armed gesture has been classified to scroll along.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum ScrollAxis {
    #[default]
    Rest,
    Horizontal,
    Vertical,
}

/// Ephemeral per-gesture session state.
///
/// Created on pointer-down, threaded through the state machine's move
/// handling, and dropped (releasing the velocity tracker) on up/cancel.
#[derive(Clone, Debug)]
pub(crate) struct Motion {
    pub(crate) pointer: PointerId,
    pub(crate) axis: ScrollAxis,
    pub(crate) down_x: f64,
    pub(crate) down_time: u64,
    pub(crate) last_x: f64,
    pub(crate) last_y: f64,
    pub(crate) dragging: bool,
    pub(crate) to_right: bool,
    /// Present only while a hit row is being tracked.
    pub(crate) tracker: Option<VelocityTracker>,
}

impl Motion {
    pub(crate) fn begin(ev: &PointerEvent) -> Self {
        Self {
            pointer: ev.pointer_or_default(),
            axis: ScrollAxis::Rest,
            down_x: ev.position.x,
            down_time: ev.time,
            last_x: ev.position.x,
            last_y: ev.position.y,
            dragging: false,
            to_right: false,
            tracker: None,
        }
    }
}

/// The row currently being manipulated, with its resolved surfaces.
///
/// Non-owning handles into the host's currently-rendered views; valid only
/// while the gesture or its outcome animation is live.
#[derive(Copy, Clone, Debug)]
pub(crate) struct MovingItem<S> {
    pub(crate) row: usize,
    pub(crate) root: S,
    pub(crate) front: S,
    pub(crate) back: Option<S>,
}
