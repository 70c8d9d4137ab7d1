#![forbid(unsafe_code)]

//! Input events delivered by a host to the sheet.
//!
//! Hosts translate their native gesture recognizer and scroll delegate
//! callbacks into these types. All values are in logical points; velocities
//! are in points per second along the y axis (positive = downward).

/// Lifecycle phase of a continuous gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
    Failed,
}

impl GesturePhase {
    /// Whether this phase terminates the gesture.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled | Self::Failed)
    }
}

/// A pan gesture sample.
///
/// `translation_y` is cumulative since [`GesturePhase::Began`], matching the
/// way platform pan recognizers report translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanEvent {
    pub phase: GesturePhase,
    pub translation_y: f64,
    pub velocity_y: f64,
}

impl PanEvent {
    pub const fn new(phase: GesturePhase, translation_y: f64, velocity_y: f64) -> Self {
        Self {
            phase,
            translation_y,
            velocity_y,
        }
    }

    pub const fn began() -> Self {
        Self::new(GesturePhase::Began, 0.0, 0.0)
    }

    pub const fn changed(translation_y: f64) -> Self {
        Self::new(GesturePhase::Changed, translation_y, 0.0)
    }

    pub const fn ended(translation_y: f64, velocity_y: f64) -> Self {
        Self::new(GesturePhase::Ended, translation_y, velocity_y)
    }
}

/// Scroll-view delegate callbacks for an embedded scrollable region.
///
/// `offset_y` is the content offset: `0` is the top of the content and
/// negative values are an overscroll past the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollEvent {
    WillBeginDragging { offset_y: f64 },
    DidScroll { offset_y: f64 },
    WillEndDragging { velocity_y: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_phases() {
        assert!(!GesturePhase::Began.is_terminal());
        assert!(!GesturePhase::Changed.is_terminal());
        assert!(GesturePhase::Ended.is_terminal());
        assert!(GesturePhase::Cancelled.is_terminal());
        assert!(GesturePhase::Failed.is_terminal());
    }
}
