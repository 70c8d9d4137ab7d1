#![forbid(unsafe_code)]

//! Gesture-to-progress mapping for interactive dismissal.
//!
//! A [`ProgressTracker`] turns a stream of downward translation deltas into a
//! normalized dismiss progress and, on release, a [`DismissDecision`].
//!
//! ```text
//! remaining = sheet_height - translation
//! progress  = clamp(1 - remaining / sheet_height, 0, 1)
//! ```
//!
//! # Decision Rule
//!
//! Commit when any of:
//!
//! 1. `progress > progress_threshold` (default 0.3)
//! 2. `velocity > velocity_multiplier * sheet_height` per second (default 2x)
//! 3. `remaining_on_screen < remaining_height_fraction * sheet_height` (default 0.75)
//!
//! Rules 2 and 3 only apply to pan input unless
//! [`DismissThresholds::velocity_for_scroll`] is set.
//!
//! # Invariants
//!
//! - Accumulated translation never goes negative: dragging above the
//!   presented position does not move the sheet.
//! - `update` before `begin` (or after `end`) is ignored and reports `None`.

use tracing::{debug, trace};

use sheetkit_core::geometry::Rect;

/// Which input drives the interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Pan,
    Scroll,
}

/// Terminal outcome of an interactive dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissDecision {
    /// Complete the dismissal.
    Commit,
    /// Snap back to the presented frame.
    Cancel,
}

/// Thresholds for the commit/cancel decision.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DismissThresholds {
    /// Progress above which a release always commits.
    pub progress_threshold: f64,
    /// Release velocity, in sheet heights per second, above which a release commits.
    pub velocity_multiplier: f64,
    /// Commit when less than this fraction of the sheet remains on screen.
    pub remaining_height_fraction: f64,
    /// Apply the velocity and remaining-height rules to scroll input too.
    pub velocity_for_scroll: bool,
}

impl Default for DismissThresholds {
    fn default() -> Self {
        Self {
            progress_threshold: 0.3,
            velocity_multiplier: 2.0,
            remaining_height_fraction: 0.75,
            velocity_for_scroll: false,
        }
    }
}

/// Everything the decision rule looks at when the user lets go.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleaseSample {
    pub kind: InputKind,
    pub progress: f64,
    /// Downward velocity in points per second.
    pub velocity: f64,
    /// Height of the sheet still visible above the container's bottom edge.
    pub remaining_height: f64,
    pub sheet_height: f64,
}

impl DismissThresholds {
    pub fn decide(&self, sample: &ReleaseSample) -> DismissDecision {
        if sample.progress > self.progress_threshold {
            return DismissDecision::Commit;
        }
        let heuristics = match sample.kind {
            InputKind::Pan => true,
            InputKind::Scroll => self.velocity_for_scroll,
        };
        if heuristics && sample.sheet_height > 0.0 {
            let fast = sample.velocity > sample.sheet_height * self.velocity_multiplier;
            let mostly_gone =
                sample.remaining_height < sample.sheet_height * self.remaining_height_fraction;
            if fast || mostly_gone {
                return DismissDecision::Commit;
            }
        }
        DismissDecision::Cancel
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Interaction {
    kind: InputKind,
    presented: Rect,
    container_bottom: f64,
    translation: f64,
}

/// Tracks one interactive dismissal at a time.
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    thresholds: DismissThresholds,
    active: Option<Interaction>,
}

impl ProgressTracker {
    pub fn new(thresholds: DismissThresholds) -> Self {
        Self {
            thresholds,
            active: None,
        }
    }

    pub fn thresholds(&self) -> &DismissThresholds {
        &self.thresholds
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn kind(&self) -> Option<InputKind> {
        self.active.map(|i| i.kind)
    }

    /// Start tracking from the presented frame; progress resets to zero.
    pub fn begin(&mut self, kind: InputKind, presented: Rect, container_bottom: f64) {
        debug!(?kind, height = presented.height, "dismiss interaction began");
        self.active = Some(Interaction {
            kind,
            presented,
            container_bottom,
            translation: 0.0,
        });
    }

    /// Take over a dismissal that is already `progress` of the way out, e.g.
    /// when the user grabs a sheet that is still animating back.
    pub fn resume(
        &mut self,
        kind: InputKind,
        presented: Rect,
        container_bottom: f64,
        progress: f64,
    ) {
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        debug!(?kind, progress, "dismiss interaction resumed");
        self.active = Some(Interaction {
            kind,
            presented,
            container_bottom,
            translation: progress * presented.height.max(0.0),
        });
    }

    /// Feed a downward translation delta; returns the new progress.
    pub fn update(&mut self, delta: f64) -> Option<f64> {
        let interaction = self.active.as_mut()?;
        if delta.is_finite() {
            interaction.translation = (interaction.translation + delta).max(0.0);
        }
        let progress = progress_for(interaction.translation, interaction.presented.height);
        trace!(
            translation = interaction.translation,
            progress, "dismiss progress"
        );
        Some(progress)
    }

    /// Current progress, zero when idle.
    pub fn progress(&self) -> f64 {
        self.active
            .map_or(0.0, |i| progress_for(i.translation, i.presented.height))
    }

    /// Accumulated downward translation, zero when idle.
    pub fn translation(&self) -> f64 {
        self.active.map_or(0.0, |i| i.translation)
    }

    /// Finish the interaction and decide its outcome.
    ///
    /// Returns `None` if no interaction was active.
    pub fn end(&mut self, velocity: f64) -> Option<DismissDecision> {
        let interaction = self.active.take()?;
        let height = interaction.presented.height;
        let top = interaction.presented.min_y() + interaction.translation;
        let sample = ReleaseSample {
            kind: interaction.kind,
            progress: progress_for(interaction.translation, height),
            velocity: if velocity.is_finite() { velocity } else { 0.0 },
            remaining_height: (interaction.container_bottom - top).max(0.0),
            sheet_height: height,
        };
        let decision = self.thresholds.decide(&sample);
        debug!(
            ?decision,
            kind = ?sample.kind,
            progress = sample.progress,
            velocity = sample.velocity,
            remaining = sample.remaining_height,
            "dismiss interaction ended"
        );
        Some(decision)
    }

    /// Drop any active interaction without deciding.
    pub fn reset(&mut self) {
        self.active = None;
    }
}

/// Normalized dismiss progress for a downward translation.
pub fn progress_for(translation: f64, sheet_height: f64) -> f64 {
    if sheet_height <= 0.0 {
        return if translation > 0.0 { 1.0 } else { 0.0 };
    }
    (translation / sheet_height).clamp(0.0, 1.0)
}
