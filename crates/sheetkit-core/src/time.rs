#![forbid(unsafe_code)]

//! Frame clock for driving animation ticks from wall time.

use std::time::Duration;

pub use web_time::Instant;

/// Longest delta a single tick will report.
///
/// A host that stalls (debugger, backgrounded app) would otherwise jump every
/// running animation straight to its end on the next frame.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

/// Produces per-frame time deltas for [`tick`]-style animation APIs.
///
/// [`tick`]: FrameClock::tick
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Time since the previous tick, capped at [`MAX_FRAME_DELTA`].
    ///
    /// The first tick returns zero.
    pub fn tick(&mut self) -> Duration {
        self.tick_at(Instant::now())
    }

    /// Same as [`tick`](Self::tick) with an explicit timestamp.
    pub fn tick_at(&mut self, now: Instant) -> Duration {
        let delta = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };
        self.last = Some(now);
        delta.min(MAX_FRAME_DELTA)
    }

    /// Forget the previous timestamp; the next tick returns zero.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(), Duration::ZERO);
    }

    #[test]
    fn deltas_are_capped() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.tick_at(start);
        assert_eq!(
            clock.tick_at(start + Duration::from_millis(16)),
            Duration::from_millis(16)
        );
        assert_eq!(
            clock.tick_at(start + Duration::from_secs(5)),
            MAX_FRAME_DELTA
        );
    }

    #[test]
    fn reset_restarts() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.tick_at(start);
        clock.reset();
        assert_eq!(
            clock.tick_at(start + Duration::from_millis(40)),
            Duration::ZERO
        );
    }
}
