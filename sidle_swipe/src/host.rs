// Copyright 2026 the Sidle Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability interfaces connecting the engine to its host list view and to
//! an animation provider.
//!
//! The engine never owns views or timers: the host implements [`ListModel`]
//! (queries over the rendered list), [`SwipeListener`] (state-change
//! notifications), and [`SurfaceAnimator`] (property animation). All three
//! are passed by reference into each engine entry point, so deterministic
//! test doubles can stand in for real view systems.

use kurbo::Rect;

/// Identifier the host resolves to one of a row's surfaces.
///
/// The engine never interprets the value; it only hands configured ids back
/// to [`ListModel::surface`]. Hosts typically map them from resource ids or
/// an interned table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// Token identifying one in-flight animation or delayed callback.
///
/// Issued by the engine when it starts an animation through
/// [`SurfaceAnimator::animate`] or schedules a callback through
/// [`SurfaceAnimator::run_delayed`]. When the host's animation completes —
/// at its terminal values — the host must hand the token back via
/// [`SwipeController::animation_finished`](crate::SwipeController::animation_finished).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AnimationToken(pub(crate) u64);

/// Terminal property values for one animation.
///
/// Properties left `None` keep their current value. The engine animates at
/// most offset, opacity, and height; anything else a row renders is the
/// host's concern.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AnimationTarget {
    /// Horizontal translation to end at.
    pub offset_x: Option<f64>,
    /// Opacity to end at, in `0.0..=1.0`.
    pub opacity: Option<f64>,
    /// Layout height to end at.
    pub height: Option<f64>,
}

impl AnimationTarget {
    /// Target only a horizontal translation.
    #[must_use]
    pub fn offset_x(offset_x: f64) -> Self {
        Self {
            offset_x: Some(offset_x),
            ..Self::default()
        }
    }

    /// Target only a height.
    #[must_use]
    pub fn height(height: f64) -> Self {
        Self {
            height: Some(height),
            ..Self::default()
        }
    }
}

/// Scroll activity reported by the host list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScrollSignal {
    /// The user is dragging the list itself.
    TouchScroll,
    /// The list is coasting after a scroll fling.
    Fling,
    /// Scrolling has settled.
    Idle,
}

/// Read access to the host list.
///
/// Positions are the list's absolute row positions: the first
/// [`header_count`](Self::header_count) positions are header rows, and
/// footer or otherwise non-interactive rows report as disabled or ignored.
/// The rendered window is described in the same position space.
pub trait ListModel {
    /// Handle to a rendered view surface. Copied freely and compared for
    /// identity; must stay valid while the engine animates it.
    type Surface: Copy + PartialEq;

    /// Total number of row positions the backing data currently has.
    fn item_count(&self) -> usize;

    /// Number of leading header positions, which never swipe.
    fn header_count(&self) -> usize {
        0
    }

    /// First rendered position.
    fn first_visible(&self) -> usize;

    /// Last rendered position (inclusive).
    fn last_visible(&self) -> usize;

    /// Number of currently rendered children.
    fn child_count(&self) -> usize;

    /// The rendered child in the given slot (`0..child_count`).
    fn child_at(&self, slot: usize) -> Option<Self::Surface>;

    /// The absolute position a rendered child is bound to, or `None` for
    /// children that represent no data row.
    fn position_of(&self, child: Self::Surface) -> Option<usize>;

    /// A surface's bounds, in the same coordinate space pointer events use.
    fn bounds(&self, surface: Self::Surface) -> Rect;

    /// Width of the list's rows.
    fn width(&self) -> f64;

    /// Whether the row at `position` accepts interaction.
    fn is_enabled(&self, position: usize) -> bool {
        let _ = position;
        true
    }

    /// Whether the row at `position` is of a type excluded from swiping.
    fn is_ignored(&self, position: usize) -> bool {
        let _ = position;
        false
    }

    /// Resolve a per-row surface by id within a rendered row.
    fn surface(&self, root: Self::Surface, id: SurfaceId) -> Option<Self::Surface>;
}

/// State-change notifications delivered to the host.
///
/// All methods default to no-ops so hosts implement only what they observe.
pub trait SwipeListener {
    /// A row finished opening toward `to_right`.
    fn on_opened(&mut self, row: usize, to_right: bool) {
        let _ = (row, to_right);
    }

    /// A row finished closing. `from_right` is the side it had been open
    /// toward.
    fn on_closed(&mut self, row: usize, from_right: bool) {
        let _ = (row, from_right);
    }

    /// A dismiss batch settled. `rows` is in descending order, so the host
    /// may remove them one by one without re-indexing the rest.
    fn on_dismiss(&mut self, rows: &[usize]) {
        let _ = rows;
    }

    /// A tracked row's surface moved to `offset` during a drag.
    fn on_move(&mut self, row: usize, offset: f64) {
        let _ = (row, offset);
    }

    /// The first row became selected; choice mode begins.
    fn on_choice_started(&mut self) {}

    /// A row's selection flag changed. Hosts repaint any checked indicator
    /// here.
    fn on_choice_changed(&mut self, row: usize, checked: bool) {
        let _ = (row, checked);
    }

    /// The last selected row was deselected; choice mode ends.
    fn on_choice_ended(&mut self) {}

    /// The front surface of a closed row was tapped.
    fn on_click_front(&mut self, row: usize) {
        let _ = row;
    }

    /// An open row was tapped (its back surface is what's under the
    /// pointer).
    fn on_click_back(&mut self, row: usize) {
        let _ = row;
    }
}

/// Animation capability provider.
///
/// Immediate setters apply synchronously; [`animate`](Self::animate) and
/// [`run_delayed`](Self::run_delayed) complete later on the same thread,
/// after which the host reports the token back to the engine. A provider
/// used in tests may simply record calls and complete them on demand.
pub trait SurfaceAnimator {
    /// Handle to an animatable surface; matches the list model's surfaces.
    type Surface: Copy;

    /// Current horizontal translation of a surface.
    fn offset_x(&self, surface: Self::Surface) -> f64;

    /// Set a surface's horizontal translation immediately.
    fn set_offset_x(&mut self, surface: Self::Surface, offset_x: f64);

    /// Set a surface's opacity immediately.
    fn set_opacity(&mut self, surface: Self::Surface, opacity: f64);

    /// Set a surface's layout height immediately.
    fn set_height(&mut self, surface: Self::Surface, height: f64);

    /// Hide or show a surface without affecting layout state.
    fn set_hidden(&mut self, surface: Self::Surface, hidden: bool);

    /// Animate a surface to the target values over `duration_ms`, then
    /// report `token` back.
    fn animate(
        &mut self,
        surface: Self::Surface,
        target: AnimationTarget,
        duration_ms: u64,
        token: AnimationToken,
    );

    /// Report `token` back after `delay_ms` without animating anything.
    fn run_delayed(&mut self, delay_ms: u64, token: AnimationToken);
}
