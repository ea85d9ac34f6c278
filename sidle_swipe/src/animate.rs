// Copyright 2026 the Sidle Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The animation orchestrator: outcome animations and their completions.
//!
//! Three mutually exclusive outcomes exist per row: reveal (slide open or
//! shut), dismiss (slide-and-fade, then shrink away), and choice (snap back
//! while the selection toggles). Each started animation carries an
//! [`AnimationToken`]; the host reports tokens back through
//! [`SwipeController::animation_finished`], which runs the continuation the
//! token stands for. Continuations capture their decision state when the
//! animation *starts*, so bookkeeping that runs while an animation is in
//! flight (such as close-all marking rows closed) cannot skew them.

use alloc::vec::Vec;

use log::debug;

use crate::config::SwipeAction;
use crate::host::{AnimationTarget, AnimationToken, ListModel, SurfaceAnimator, SwipeListener};
use crate::machine::SwipeController;
use crate::motion::ScrollAxis;

/// Continuation to run when an animation or delayed callback ends.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Completion<S> {
    /// A reveal animation ended; apply the open/close transition.
    Reveal {
        row: usize,
        change_state: bool,
        was_open: bool,
        /// The open side involved: the side being opened toward, or the
        /// side the row had been open toward when closing.
        to_right: bool,
    },
    /// A dismiss slide-and-fade ended; on commit, shrink the row away.
    Dismiss { row: usize, commit: bool, surface: S },
    /// A choice snap-back ended.
    Choice,
    /// A dismissal's height shrink ended.
    Shrink,
    /// A deferred settle pass for a batch with no animations.
    Settle,
}

impl<S: Copy + PartialEq> SwipeController<S> {
    /// Report that a host animation (or delayed callback) identified by
    /// `token` has completed at its terminal values.
    ///
    /// Unknown or already-completed tokens are ignored.
    pub fn animation_finished<H, A>(&mut self, token: AnimationToken, host: &mut H, anim: &mut A)
    where
        H: ListModel<Surface = S> + SwipeListener,
        A: SurfaceAnimator<Surface = S>,
    {
        let Some(slot) = self.in_flight.iter().position(|(t, _)| *t == token) else {
            debug!("ignoring unknown animation token {token:?}");
            return;
        };
        let (_, completion) = self.in_flight.remove(slot);
        match completion {
            Completion::Reveal {
                row,
                change_state,
                was_open,
                to_right,
            } => {
                if let Some(m) = &mut self.motion {
                    m.axis = ScrollAxis::Rest;
                }
                self.apply_reveal_transition(row, change_state, was_open, to_right, host);
                self.reset_cell(anim);
            }
            Completion::Dismiss {
                row,
                commit,
                surface,
            } => {
                if commit {
                    self.close_opened(host, anim);
                    self.perform_dismiss(surface, row, host, anim);
                }
                self.reset_cell(anim);
            }
            Completion::Choice => {
                if let Some(m) = &mut self.motion {
                    m.axis = ScrollAxis::Rest;
                }
                self.reset_cell(anim);
            }
            Completion::Shrink => {
                if self.batch.finish() {
                    self.settle(host, anim);
                }
            }
            Completion::Settle => {
                // Only settle if no animated batch took over in the
                // meantime; that batch will settle on its own.
                if self.batch.is_idle() {
                    self.settle(host, anim);
                }
            }
        }
    }

    /// Record a finished reveal's open/close transition and notify the
    /// host. Rows no longer covered by the state store (a reset raced the
    /// animation) are skipped.
    fn apply_reveal_transition<H>(
        &mut self,
        row: usize,
        change_state: bool,
        was_open: bool,
        to_right: bool,
        host: &mut H,
    ) where
        H: ListModel<Surface = S> + SwipeListener,
    {
        if row >= self.rows.len() {
            return;
        }
        if change_state && !was_open {
            self.rows.set_opened(row, to_right);
            host.on_opened(row, to_right);
        } else if change_state && was_open {
            self.rows.set_closed(row);
            host.on_closed(row, to_right);
        }
    }

    /// Adopt the logical end-state of any in-flight reveal animations for
    /// `row`, so a drag that begins mid-animation classifies against where
    /// the row will settle. The forced animations' tokens are forgotten;
    /// their late completions report as unknown and are ignored.
    pub(crate) fn force_reveal_end_state<H>(&mut self, row: usize, host: &mut H)
    where
        H: ListModel<Surface = S> + SwipeListener,
    {
        let mut slot = 0;
        while slot < self.in_flight.len() {
            let completion = self.in_flight[slot].1;
            match completion {
                Completion::Reveal {
                    row: r,
                    change_state,
                    was_open,
                    to_right,
                } if r == row => {
                    self.in_flight.remove(slot);
                    self.apply_reveal_transition(row, change_state, was_open, to_right, host);
                }
                _ => slot += 1,
            }
        }
    }

    /// Animate the front surface between rest and its open offset.
    ///
    /// `change_state == false` is a snap-back: the surface returns to
    /// wherever the row currently rests and nothing is recorded.
    pub(crate) fn start_reveal<H, A>(
        &mut self,
        front: S,
        change_state: bool,
        to_right: bool,
        row: usize,
        host: &mut H,
        anim: &mut A,
    ) where
        H: ListModel<Surface = S> + SwipeListener,
        A: SurfaceAnimator<Surface = S>,
    {
        let was_open = self.rows.is_opened(row);
        if change_state && !was_open && !self.config.multiple_select {
            self.close_opened(host, anim);
        }
        // For an open row the relevant side is the one it opened toward; a
        // snap-back must never animate it across to the other side.
        let dir = if was_open {
            self.rows.open_direction(row).unwrap_or(to_right)
        } else {
            to_right
        };
        let target = if change_state != was_open {
            self.config.open_offset(self.view_width, dir)
        } else {
            0.0
        };
        debug!("reveal on row {row}: change_state={change_state}, target={target:.1}");
        let token = self.issue(Completion::Reveal {
            row,
            change_state,
            was_open,
            to_right: dir,
        });
        anim.animate(
            front,
            AnimationTarget::offset_x(target),
            self.config.animation_ms,
            token,
        );
    }

    /// Animate a dismissal: slide the whole row to its target offset,
    /// fading it out when it is actually being removed.
    pub(crate) fn start_dismiss<A>(
        &mut self,
        root: S,
        commit: bool,
        to_right: bool,
        row: usize,
        anim: &mut A,
    ) where
        A: SurfaceAnimator<Surface = S>,
    {
        let was_open = self.rows.is_opened(row);
        let target = if was_open != commit {
            let dir = if was_open {
                self.rows.open_direction(row).unwrap_or(to_right)
            } else {
                to_right
            };
            self.config.open_offset(self.view_width, dir)
        } else {
            0.0
        };
        let opacity = if commit { 0.0 } else { 1.0 };
        if commit {
            self.batch.begin();
        }
        debug!("dismiss on row {row}: commit={commit}, target={target:.1}");
        let token = self.issue(Completion::Dismiss {
            row,
            commit,
            surface: root,
        });
        anim.animate(
            root,
            AnimationTarget {
                offset_x: Some(target),
                opacity: Some(opacity),
                height: None,
            },
            self.config.animation_ms,
            token,
        );
    }

    /// Animate the front surface back to rest; selection never leaves a row
    /// visually offset.
    pub(crate) fn start_choice<A>(&mut self, front: S, anim: &mut A)
    where
        A: SurfaceAnimator<Surface = S>,
    {
        let token = self.issue(Completion::Choice);
        anim.animate(
            front,
            AnimationTarget::offset_x(0.0),
            self.config.animation_ms,
            token,
        );
    }

    /// Queue `row` for removal and shrink its view away. The caller (or the
    /// dismissal that led here) must have balanced the batch with a
    /// [`begin`](crate::dismiss::DismissBatch::begin); the shrink's
    /// completion provides the matching finish.
    pub(crate) fn perform_dismiss<H, A>(&mut self, surface: S, row: usize, host: &H, anim: &mut A)
    where
        H: ListModel<Surface = S>,
        A: SurfaceAnimator<Surface = S>,
    {
        let height = host.bounds(surface).height();
        self.batch.push(row, Some(surface), height);
        let token = self.issue(Completion::Shrink);
        anim.animate(
            surface,
            AnimationTarget::height(1.0),
            self.config.animation_ms,
            token,
        );
    }

    /// Report the settled batch to the host — descending, exactly once —
    /// and restore every participating view for reuse.
    pub(crate) fn settle<H, A>(&mut self, host: &mut H, anim: &mut A)
    where
        H: ListModel<Surface = S> + SwipeListener,
        A: SurfaceAnimator<Surface = S>,
    {
        let pending = self.batch.take_pending();
        if pending.is_empty() {
            return;
        }
        let rows: Vec<usize> = pending.iter().map(|p| p.row).collect();
        debug!("dismiss batch settled: {rows:?}");
        host.on_dismiss(&rows);
        for p in &pending {
            if let Some(surface) = p.surface {
                anim.set_opacity(surface, 1.0);
                anim.set_offset_x(surface, 0.0);
                anim.set_height(surface, p.height);
            }
        }
    }

    /// Release the moving-item context once its outcome animation is done,
    /// restoring the back surface if choice mode hid it.
    pub(crate) fn reset_cell<A>(&mut self, anim: &mut A)
    where
        A: SurfaceAnimator<Surface = S>,
    {
        if let Some(item) = self.moving.take()
            && self.current_action == SwipeAction::Choice
            && let Some(back) = item.back
        {
            anim.set_hidden(back, false);
        }
    }

    pub(crate) fn issue(&mut self, completion: Completion<S>) -> AnimationToken {
        self.next_token += 1;
        let token = AnimationToken(self.next_token);
        self.in_flight.push((token, completion));
        token
    }
}
