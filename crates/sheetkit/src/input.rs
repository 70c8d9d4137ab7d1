#![forbid(unsafe_code)]

//! Dismiss input sources.
//!
//! A presentation is dismissed interactively by exactly one source, chosen
//! once geometry is known:
//!
//! - [`ScrollSource`] when the content embeds a scrollable region that
//!   overflows its viewport. Pulling the list down past its top drags the
//!   sheet instead of overscrolling the list.
//! - [`PanSource`] otherwise: a pan gesture on the sheet itself.
//!
//! Sources translate raw host events into [`DismissSignal`]s; they never
//! touch the transition directly.

use std::fmt;

use smallvec::{SmallVec, smallvec};

use sheetkit_core::event::{GesturePhase, PanEvent, ScrollEvent};

use crate::surface::ScrollRegion;
use crate::tracker::InputKind;

/// A host input event routed to the active source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Pan(PanEvent),
    Scroll(ScrollEvent),
}

impl From<PanEvent> for InputEvent {
    fn from(event: PanEvent) -> Self {
        Self::Pan(event)
    }
}

impl From<ScrollEvent> for InputEvent {
    fn from(event: ScrollEvent) -> Self {
        Self::Scroll(event)
    }
}

/// What an input event means for the dismissal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DismissSignal {
    Began,
    /// Downward translation since the previous signal.
    Moved { delta: f64 },
    /// Points per second, positive downward.
    Released { velocity: f64 },
}

/// Signals produced by one event plus any scroll-offset correction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputResponse {
    pub signals: SmallVec<[DismissSignal; 2]>,
    /// New content offset the host must write back to its scroll view.
    pub content_offset: Option<f64>,
}

impl InputResponse {
    fn ignored() -> Self {
        Self::default()
    }

    fn signals(signals: SmallVec<[DismissSignal; 2]>) -> Self {
        Self {
            signals,
            content_offset: None,
        }
    }
}

/// A source of interactive-dismiss input.
pub trait DismissInputSource: fmt::Debug {
    fn kind(&self) -> InputKind;

    fn handle(&mut self, event: &InputEvent) -> InputResponse;

    /// Forget any in-progress gesture.
    fn reset(&mut self);
}

/// Pick the source for a presentation.
pub fn select_input(scroll: Option<ScrollRegion>) -> Box<dyn DismissInputSource> {
    match scroll {
        Some(region) if region.is_scrollable() => Box::new(ScrollSource::new(region)),
        _ => Box::new(PanSource::new()),
    }
}

/// Pan gesture on the sheet.
///
/// Cumulative gesture translation is converted into per-event deltas.
/// `Changed` before `Began` produces nothing.
#[derive(Debug, Clone, Default)]
pub struct PanSource {
    last_translation: Option<f64>,
}

impl PanSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tracking(&self) -> bool {
        self.last_translation.is_some()
    }
}

impl DismissInputSource for PanSource {
    fn kind(&self) -> InputKind {
        InputKind::Pan
    }

    fn handle(&mut self, event: &InputEvent) -> InputResponse {
        let InputEvent::Pan(pan) = event else {
            return InputResponse::ignored();
        };
        match pan.phase {
            GesturePhase::Began => {
                self.last_translation = Some(pan.translation_y);
                InputResponse::signals(smallvec![DismissSignal::Began])
            }
            GesturePhase::Changed => {
                let Some(last) = self.last_translation else {
                    return InputResponse::ignored();
                };
                self.last_translation = Some(pan.translation_y);
                InputResponse::signals(smallvec![DismissSignal::Moved {
                    delta: pan.translation_y - last,
                }])
            }
            GesturePhase::Ended | GesturePhase::Cancelled | GesturePhase::Failed => {
                let Some(last) = self.last_translation.take() else {
                    return InputResponse::ignored();
                };
                let mut signals = SmallVec::new();
                let delta = pan.translation_y - last;
                if delta != 0.0 {
                    signals.push(DismissSignal::Moved { delta });
                }
                signals.push(DismissSignal::Released {
                    velocity: pan.velocity_y,
                });
                InputResponse::signals(signals)
            }
        }
    }

    fn reset(&mut self) {
        self.last_translation = None;
    }
}

/// Scroll-driven dismissal for content with its own scrollable region.
///
/// A drag that starts with the list at (or above) its top is armed. Once
/// armed, pulling past the top becomes sheet translation and the list offset
/// is pinned to zero, so the list itself never shows elastic overscroll while
/// the sheet moves. Pushing back up returns translation first; any excess
/// scrolls the list again.
#[derive(Debug, Clone)]
pub struct ScrollSource {
    region: ScrollRegion,
    armed: bool,
    dismissing: bool,
    translation: f64,
}

impl ScrollSource {
    pub fn new(region: ScrollRegion) -> Self {
        Self {
            region,
            armed: false,
            dismissing: false,
            translation: 0.0,
        }
    }

    pub fn region(&self) -> ScrollRegion {
        self.region
    }

    pub fn is_dismissing(&self) -> bool {
        self.dismissing
    }

    fn did_scroll(&mut self, offset: f64) -> InputResponse {
        if !self.armed {
            return InputResponse::ignored();
        }
        if !self.dismissing {
            if offset >= 0.0 {
                return InputResponse::ignored();
            }
            self.dismissing = true;
            self.translation = -offset;
            return InputResponse {
                signals: smallvec![
                    DismissSignal::Began,
                    DismissSignal::Moved { delta: -offset }
                ],
                content_offset: Some(0.0),
            };
        }

        let next = self.translation - offset;
        if next > 0.0 {
            self.translation = next;
            InputResponse {
                signals: smallvec![DismissSignal::Moved { delta: -offset }],
                content_offset: Some(0.0),
            }
        } else if self.translation > 0.0 {
            let delta = -self.translation;
            self.translation = 0.0;
            InputResponse {
                signals: smallvec![DismissSignal::Moved { delta }],
                content_offset: Some(-next),
            }
        } else {
            InputResponse::ignored()
        }
    }
}

impl DismissInputSource for ScrollSource {
    fn kind(&self) -> InputKind {
        InputKind::Scroll
    }

    fn handle(&mut self, event: &InputEvent) -> InputResponse {
        let InputEvent::Scroll(scroll) = event else {
            return InputResponse::ignored();
        };
        match *scroll {
            ScrollEvent::WillBeginDragging { offset_y } => {
                self.armed = offset_y <= 0.0;
                self.dismissing = false;
                self.translation = 0.0;
                InputResponse::ignored()
            }
            ScrollEvent::DidScroll { offset_y } => self.did_scroll(offset_y),
            ScrollEvent::WillEndDragging { velocity_y } => {
                self.armed = false;
                self.translation = 0.0;
                if std::mem::take(&mut self.dismissing) {
                    InputResponse::signals(smallvec![DismissSignal::Released {
                        velocity: velocity_y
                    }])
                } else {
                    InputResponse::ignored()
                }
            }
        }
    }

    fn reset(&mut self) {
        self.armed = false;
        self.dismissing = false;
        self.translation = 0.0;
    }
}
