#![forbid(unsafe_code)]

//! Presentation and dismissal transitions for a sheet.
//!
//! One [`SheetTransition`] serves both directions of a presentation. It owns
//! at most one animator at a time, tracked by [`ActiveAnimator`]:
//!
//! ```text
//!            begin presenting                 settle
//!   None ──────────────────────▶ Presenting ─────────▶ None
//!    │
//!    │       begin dismissing                 settle
//!    └─────────────────────────▶ Dismissing ─────────▶ None
//!                                  ▲      │
//!                          interrupt│      │pause / scrub / continue
//!                                  └──────┘
//! ```
//!
//! # Invariants
//!
//! - Exactly one direction owns the animator slot; asking for the other
//!   direction while it is occupied fails with [`TransitionError::Busy`].
//! - On settle the transition reports completion to the host's
//!   [`TransitionContext`] and empties the slot before returning, so a
//!   following presentation always starts with no animator and a dismiss
//!   fraction of zero.
//! - Progress updates only reach a paused dismissal animator; updates before
//!   an interactive dismissal has begun are ignored.

use std::fmt;
use std::time::Duration;

use tracing::debug;

use sheetkit_core::geometry::Rect;

use crate::animator::{AnimatingPosition, PropertyAnimator, SpringTiming};
use crate::layers::SheetLayer;

/// Which way the sheet is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionDirection {
    Presenting,
    Dismissing,
}

/// Lifecycle of the transition as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionPhase {
    Idle,
    /// Animated, never interactive.
    Presenting,
    Presented,
    Dismissing { interactive: bool },
}

/// Animator slot shared by both directions.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ActiveAnimator {
    #[default]
    None,
    Presenting(PropertyAnimator),
    Dismissing(PropertyAnimator),
}

impl ActiveAnimator {
    pub fn direction(&self) -> Option<TransitionDirection> {
        match self {
            Self::None => None,
            Self::Presenting(_) => Some(TransitionDirection::Presenting),
            Self::Dismissing(_) => Some(TransitionDirection::Dismissing),
        }
    }

    pub fn animator(&self) -> Option<&PropertyAnimator> {
        match self {
            Self::None => None,
            Self::Presenting(a) | Self::Dismissing(a) => Some(a),
        }
    }

    fn animator_mut(&mut self) -> Option<&mut PropertyAnimator> {
        match self {
            Self::None => None,
            Self::Presenting(a) | Self::Dismissing(a) => Some(a),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Duration and spring damping for both directions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TransitionTiming {
    pub duration_secs: f64,
    pub damping_ratio: f64,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            duration_secs: 0.75,
            damping_ratio: 0.9,
        }
    }
}

impl TransitionTiming {
    /// Duration as a [`Duration`]; invalid values collapse to zero.
    pub fn duration(&self) -> Duration {
        if self.duration_secs.is_finite() && self.duration_secs > 0.0 {
            Duration::from_secs_f64(self.duration_secs)
        } else {
            Duration::ZERO
        }
    }

    pub fn spring(&self) -> SpringTiming {
        SpringTiming::new(self.damping_ratio)
    }
}

/// The host's view of an in-flight transition.
///
/// Mirrors the platform transition-context contract: the transition reports
/// interactive updates and, exactly once per run, its completion.
pub trait TransitionContext {
    /// Whether the interactive part of the transition was cancelled.
    ///
    /// Host-side bookkeeping only. The transition decides completion from
    /// where its animator settles, so a stale flag cannot flip the outcome.
    fn transition_was_cancelled(&self) -> bool;

    fn update_interactive_transition(&mut self, _fraction: f64) {}

    fn finish_interactive_transition(&mut self);

    fn cancel_interactive_transition(&mut self);

    /// Final report: `true` if the transition took effect.
    fn complete_transition(&mut self, completed: bool);
}

/// Misuse of the transition API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// The other direction currently owns the animator slot.
    Busy { active: TransitionDirection },
    /// There is no attached sheet to dismiss.
    NotPresented,
    /// A presentation is already in progress or on screen.
    AlreadyPresented,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy { active } => write!(f, "transition busy: {active:?} animator is active"),
            Self::NotPresented => write!(f, "no presented sheet to dismiss"),
            Self::AlreadyPresented => write!(f, "a sheet is already presented"),
        }
    }
}

impl std::error::Error for TransitionError {}

/// Result of one animation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionTick {
    pub direction: TransitionDirection,
    /// How presented the sheet looks: `1` on screen, `0` off screen. Drives
    /// the scrim and corner-radius cross-fade.
    pub presented_amount: f64,
    /// `Some(completed)` on the tick the animator settled.
    pub completion: Option<bool>,
}

/// Animated and interactive transition shared by both directions.
#[derive(Debug, Clone)]
pub struct SheetTransition {
    direction: TransitionDirection,
    timing: TransitionTiming,
    active: ActiveAnimator,
    phase: TransitionPhase,
}

impl Default for SheetTransition {
    fn default() -> Self {
        Self::new(TransitionTiming::default())
    }
}

impl SheetTransition {
    pub fn new(timing: TransitionTiming) -> Self {
        Self {
            direction: TransitionDirection::Presenting,
            timing,
            active: ActiveAnimator::None,
            phase: TransitionPhase::Idle,
        }
    }

    pub fn direction(&self) -> TransitionDirection {
        self.direction
    }

    pub fn is_presenting(&self) -> bool {
        self.direction == TransitionDirection::Presenting
    }

    /// Select which animator subsequent calls refer to.
    pub fn set_direction(&mut self, direction: TransitionDirection) {
        self.direction = direction;
    }

    pub fn transition_duration(&self) -> Duration {
        self.timing.duration()
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn active(&self) -> &ActiveAnimator {
        &self.active
    }

    /// Fraction of the dismissal animator, zero when none is active.
    pub fn dismiss_fraction_complete(&self) -> f64 {
        match &self.active {
            ActiveAnimator::Dismissing(a) => a.fraction_complete(),
            _ => 0.0,
        }
    }

    /// Whether a paused dismissal is waiting for progress updates.
    pub fn is_interactive(&self) -> bool {
        matches!(&self.active, ActiveAnimator::Dismissing(a) if !a.is_running())
    }

    /// Animator for the current direction, created on first use.
    ///
    /// Presenting: the sheet is attached at `final_frame` shifted just below
    /// `container`, and animates to `final_frame`. Dismissing: the sheet
    /// animates from its current frame to just below `container`.
    pub fn interruptible_animator(
        &mut self,
        sheet: &mut SheetLayer,
        container: Rect,
        final_frame: Rect,
    ) -> Result<&mut PropertyAnimator, TransitionError> {
        match (self.direction, self.active.direction()) {
            (direction, Some(active)) if direction != active => {
                return Err(TransitionError::Busy { active });
            }
            (_, None) => {
                self.active = self.make_animator(sheet, container, final_frame)?;
                self.phase = match self.direction {
                    TransitionDirection::Presenting => TransitionPhase::Presenting,
                    TransitionDirection::Dismissing => {
                        TransitionPhase::Dismissing { interactive: false }
                    }
                };
                debug!(direction = ?self.direction, "transition animator created");
            }
            _ => {}
        }
        self.active
            .animator_mut()
            .ok_or(TransitionError::NotPresented)
    }

    fn make_animator(
        &self,
        sheet: &mut SheetLayer,
        container: Rect,
        final_frame: Rect,
    ) -> Result<ActiveAnimator, TransitionError> {
        let duration = self.timing.duration();
        let spring = self.timing.spring();
        match self.direction {
            TransitionDirection::Presenting => {
                let from = final_frame.with_y(container.max_y());
                sheet.frame = from;
                sheet.attached = true;
                Ok(ActiveAnimator::Presenting(PropertyAnimator::new(
                    from,
                    final_frame,
                    duration,
                    spring,
                )))
            }
            TransitionDirection::Dismissing => {
                if !sheet.attached {
                    return Err(TransitionError::NotPresented);
                }
                let from = sheet.frame;
                Ok(ActiveAnimator::Dismissing(PropertyAnimator::new(
                    from,
                    from.with_y(container.max_y()),
                    duration,
                    spring,
                )))
            }
        }
    }

    /// Run the current direction's animation without user interaction.
    pub fn animate_transition(
        &mut self,
        sheet: &mut SheetLayer,
        container: Rect,
        final_frame: Rect,
    ) -> Result<(), TransitionError> {
        self.interruptible_animator(sheet, container, final_frame)?.start();
        Ok(())
    }

    /// Begin (or take over) an interactive dismissal.
    ///
    /// Returns the dismiss progress the interaction starts from: zero for a
    /// fresh dismissal, or the current position when interrupting a
    /// dismissal animator that is still running.
    pub fn begin_interactive_dismissal(
        &mut self,
        sheet: &mut SheetLayer,
        container: Rect,
    ) -> Result<f64, TransitionError> {
        self.direction = TransitionDirection::Dismissing;
        let start = match self.active.direction() {
            Some(TransitionDirection::Presenting) => {
                return Err(TransitionError::Busy {
                    active: TransitionDirection::Presenting,
                });
            }
            Some(TransitionDirection::Dismissing) => {
                let Some(animator) = self.active.animator_mut() else {
                    return Err(TransitionError::NotPresented);
                };
                let progress = animator.progress();
                animator.pause();
                animator.set_fraction_complete(progress);
                debug!(progress, "dismissal interrupted");
                progress
            }
            None => {
                let frame = sheet.frame;
                self.interruptible_animator(sheet, container, frame)?.pause();
                0.0
            }
        };
        self.phase = TransitionPhase::Dismissing { interactive: true };
        Ok(start)
    }

    /// Scrub the paused dismissal to `progress`.
    ///
    /// Returns the presented amount for alongside animations, or `None` if
    /// no interactive dismissal is in progress.
    pub fn update_interactive(
        &mut self,
        progress: f64,
        sheet: &mut SheetLayer,
        ctx: &mut dyn TransitionContext,
    ) -> Option<f64> {
        let ActiveAnimator::Dismissing(animator) = &mut self.active else {
            return None;
        };
        if animator.is_running() {
            return None;
        }
        animator.set_fraction_complete(progress);
        sheet.frame = animator.current_frame();
        ctx.update_interactive_transition(animator.fraction_complete());
        Some(1.0 - animator.progress())
    }

    /// Let the dismissal run to completion from where the gesture left it.
    pub fn finish_interactive(&mut self, ctx: &mut dyn TransitionContext) -> bool {
        self.release_interactive(ctx, false)
    }

    /// Reverse the dismissal back to the presented frame.
    pub fn cancel_interactive(&mut self, ctx: &mut dyn TransitionContext) -> bool {
        self.release_interactive(ctx, true)
    }

    fn release_interactive(&mut self, ctx: &mut dyn TransitionContext, reverse: bool) -> bool {
        let ActiveAnimator::Dismissing(animator) = &mut self.active else {
            return false;
        };
        if reverse {
            ctx.cancel_interactive_transition();
        } else {
            ctx.finish_interactive_transition();
        }
        animator.continue_animation(reverse);
        self.phase = TransitionPhase::Dismissing { interactive: false };
        true
    }

    /// Advance the active animator by `dt` and write its frame to `sheet`.
    ///
    /// Returns `None` when no animator is active.
    pub fn tick(
        &mut self,
        dt: Duration,
        sheet: &mut SheetLayer,
        ctx: &mut dyn TransitionContext,
    ) -> Option<TransitionTick> {
        let direction = self.active.direction()?;
        let animator = self.active.animator_mut()?;
        let settled = animator.tick(dt);
        sheet.frame = animator.current_frame();
        let progress = animator.progress();
        let presented_amount = match direction {
            TransitionDirection::Presenting => progress,
            TransitionDirection::Dismissing => 1.0 - progress,
        };

        let completion = settled.map(|position| {
            // A cancelled interaction reverses to the start; every other run
            // (animated, or finished interactively) settles at the end.
            let completed = position == AnimatingPosition::End;
            if completed && direction == TransitionDirection::Dismissing {
                sheet.attached = false;
            }
            ctx.complete_transition(completed);
            self.active = ActiveAnimator::None;
            self.phase = match (direction, completed) {
                (TransitionDirection::Presenting, true)
                | (TransitionDirection::Dismissing, false) => TransitionPhase::Presented,
                (TransitionDirection::Presenting, false)
                | (TransitionDirection::Dismissing, true) => TransitionPhase::Idle,
            };
            debug!(?direction, completed, "transition completed, animator released");
            completed
        });

        Some(TransitionTick {
            direction,
            presented_amount,
            completion,
        })
    }
}
