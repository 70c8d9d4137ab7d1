#![forbid(unsafe_code)]

//! Interruptible frame animator.
//!
//! [`PropertyAnimator`] moves a [`Rect`] between two frames over a fixed
//! duration. It can run on its own (timed by a spring curve), be paused and
//! scrubbed to an arbitrary fraction, and then be continued forward or in
//! reverse from wherever it was left.
//!
//! # Timing
//!
//! The timeline position (`fraction_complete`) always advances linearly at
//! `1 / duration` per second. Visual progress maps the timeline through a
//! damped spring that settles exactly at the end of the duration:
//!
//! ```text
//! ω₀ = ln(1000) / ζ            (envelope reaches 0.1% at t = 1)
//! x(t) = 1 - e^(-ζω₀t) · (cos(ω_d t) + ζω₀/ω_d · sin(ω_d t)),   ω_d = ω₀√(1-ζ²)
//! ```
//!
//! Once an animator has been scrubbed, visual progress equals the timeline
//! position for the rest of its life so a released drag continues from the
//! exact frame under the finger.
//!
//! # Invariants
//!
//! - `fraction_complete` stays within `[0, 1]`.
//! - `tick` reports a position exactly once per run, then the animator is
//!   inactive until started or continued again.

use std::time::Duration;

use sheetkit_core::geometry::Rect;

/// `ln(1000)`: spring envelope decays to 0.1% by the end of the duration.
const SETTLE_DECAY: f64 = 6.907_755_278_982_137;

/// Damped-spring timing curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringTiming {
    damping_ratio: f64,
}

impl Default for SpringTiming {
    fn default() -> Self {
        Self::new(0.9)
    }
}

impl SpringTiming {
    /// Non-positive or non-finite ratios fall back to critical damping.
    pub fn new(damping_ratio: f64) -> Self {
        let damping_ratio = if damping_ratio.is_finite() && damping_ratio > 0.0 {
            damping_ratio
        } else {
            1.0
        };
        Self { damping_ratio }
    }

    pub fn damping_ratio(&self) -> f64 {
        self.damping_ratio
    }

    /// Visual progress for a normalized time `t` in `[0, 1]`.
    pub fn value(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let zeta = self.damping_ratio;
        let omega = SETTLE_DECAY / zeta;
        let envelope = (-zeta * omega * t).exp();
        if (zeta - 1.0).abs() < 1e-9 {
            1.0 - envelope * (1.0 + omega * t)
        } else if zeta < 1.0 {
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            1.0 - envelope
                * ((omega_d * t).cos() + (zeta * omega / omega_d) * (omega_d * t).sin())
        } else {
            let omega_d = omega * (zeta * zeta - 1.0).sqrt();
            1.0 - envelope
                * ((omega_d * t).cosh() + (zeta * omega / omega_d) * (omega_d * t).sinh())
        }
    }
}

/// Lifecycle state of an animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimatorState {
    /// Not started, or finished.
    Inactive,
    /// Started; either running or paused.
    Active,
}

/// Where an animator settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimatingPosition {
    /// Back at the `from` frame (a reversed run finished).
    Start,
    /// At the `to` frame.
    End,
}

/// Animates a frame from `from` to `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyAnimator {
    from: Rect,
    to: Rect,
    duration: Duration,
    timing: SpringTiming,
    state: AnimatorState,
    running: bool,
    reversed: bool,
    fraction: f64,
    scrubbed: bool,
}

impl PropertyAnimator {
    /// Create an inactive animator at fraction zero.
    pub fn new(from: Rect, to: Rect, duration: Duration, timing: SpringTiming) -> Self {
        Self {
            from,
            to,
            duration,
            timing,
            state: AnimatorState::Inactive,
            running: false,
            reversed: false,
            fraction: 0.0,
            scrubbed: false,
        }
    }

    /// Frame at fraction zero.
    pub fn from_frame(&self) -> Rect {
        self.from
    }

    /// Frame at fraction one.
    pub fn to_frame(&self) -> Rect {
        self.to
    }

    /// Time a full run takes.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Current animator state.
    pub fn state(&self) -> AnimatorState {
        self.state
    }

    /// Whether ticks advance the timeline.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the animator is running back toward `from`.
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Timeline position in `[0, 1]`.
    pub fn fraction_complete(&self) -> f64 {
        self.fraction
    }

    /// Visual progress from `from` (0) toward `to` (1).
    pub fn progress(&self) -> f64 {
        if self.scrubbed {
            self.fraction
        } else {
            self.timing.value(self.fraction)
        }
    }

    /// Frame at the current progress.
    pub fn current_frame(&self) -> Rect {
        self.from.lerp(self.to, self.progress())
    }

    /// Run forward from the current fraction.
    pub fn start(&mut self) {
        self.state = AnimatorState::Active;
        self.running = true;
        self.reversed = false;
    }

    /// Stop advancing but stay active, e.g. to hand control to a gesture.
    pub fn pause(&mut self) {
        self.state = AnimatorState::Active;
        self.running = false;
    }

    /// Scrub to `fraction`. Ignored while running.
    pub fn set_fraction_complete(&mut self, fraction: f64) {
        if self.running || !fraction.is_finite() {
            return;
        }
        self.state = AnimatorState::Active;
        self.fraction = fraction.clamp(0.0, 1.0);
        self.scrubbed = true;
    }

    /// Resume from the current fraction, optionally toward `from`.
    ///
    /// The remaining portion takes `remaining fraction * duration`.
    pub fn continue_animation(&mut self, reversed: bool) {
        self.state = AnimatorState::Active;
        self.running = true;
        self.reversed = reversed;
    }

    /// Advance by `dt`. Returns the settle position when the run completes.
    pub fn tick(&mut self, dt: Duration) -> Option<AnimatingPosition> {
        if self.state != AnimatorState::Active || !self.running {
            return None;
        }
        let total = self.duration.as_secs_f64();
        let step = if total > 0.0 {
            dt.as_secs_f64() / total
        } else {
            1.0
        };
        if self.reversed {
            self.fraction = (self.fraction - step).max(0.0);
        } else {
            self.fraction = (self.fraction + step).min(1.0);
        }

        let settled = match (self.reversed, self.fraction) {
            (false, f) if f >= 1.0 => Some(AnimatingPosition::End),
            (true, f) if f <= 0.0 => Some(AnimatingPosition::Start),
            _ => None,
        };
        if settled.is_some() {
            self.running = false;
            self.state = AnimatorState::Inactive;
        }
        settled
    }
}
