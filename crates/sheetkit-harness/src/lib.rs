#![forbid(unsafe_code)]

//! Simulated host for exercising sheetkit end to end.
//!
//! [`Stage`] plays the part of a platform host: it owns a
//! [`SheetTransitioningDelegate`], a fixed container, and a
//! [`SimulatedHost`] transition context, and drives presentations with
//! scripted gestures and fixed-size frame ticks. Every context callback is
//! recorded so tests can assert on the exact sequence the engine produced.
//!
//! ```
//! use sheetkit_harness::{FixedContent, Stage};
//!
//! let mut stage = Stage::phone();
//! stage.present(&FixedContent::adaptive(300.0));
//! assert_eq!(stage.settle(), Some(true));
//! assert_eq!(stage.sheet_frame().unwrap().y, 480.0);
//! ```

use std::time::Duration;

use serde_json::json;
use tracing::debug;

use sheetkit::{
    ContainerGeometry, ContentFit, PresentableSurface, ScrollRegion, SheetConfiguration,
    SheetLayers, SheetPolicy, SheetTransitioningDelegate, SizingMode, TransitionContext,
    TransitionTick,
};
use sheetkit_core::{FrameClock, Insets, Instant, PanEvent, Rect, ScrollEvent};

/// One frame at 60 Hz, rounded to whole milliseconds.
pub const FRAME: Duration = Duration::from_millis(16);

/// Upper bound on ticks before [`Stage::settle`] gives up.
pub const MAX_SETTLE_TICKS: usize = 1_000;

/// A recorded transition-context callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    Update(f64),
    Finish,
    Cancel,
    Complete(bool),
}

/// Transition context that records every callback.
#[derive(Debug, Default, Clone)]
pub struct SimulatedHost {
    cancelled: bool,
    events: Vec<HostEvent>,
}

impl SimulatedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[HostEvent] {
        &self.events
    }

    /// Completion reports, in order.
    pub fn completions(&self) -> Vec<bool> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HostEvent::Complete(completed) => Some(*completed),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Recorded callbacks as JSON lines, one object per callback.
    pub fn transcript_jsonl(&self) -> String {
        self.events
            .iter()
            .map(|event| {
                let value = match event {
                    HostEvent::Update(fraction) => json!({"event": "update", "fraction": fraction}),
                    HostEvent::Finish => json!({"event": "finish"}),
                    HostEvent::Cancel => json!({"event": "cancel"}),
                    HostEvent::Complete(completed) => {
                        json!({"event": "complete", "completed": completed})
                    }
                };
                value.to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TransitionContext for SimulatedHost {
    fn transition_was_cancelled(&self) -> bool {
        self.cancelled
    }

    fn update_interactive_transition(&mut self, fraction: f64) {
        self.events.push(HostEvent::Update(fraction));
    }

    fn finish_interactive_transition(&mut self) {
        self.cancelled = false;
        self.events.push(HostEvent::Finish);
    }

    fn cancel_interactive_transition(&mut self) {
        self.cancelled = true;
        self.events.push(HostEvent::Cancel);
    }

    fn complete_transition(&mut self, completed: bool) {
        self.events.push(HostEvent::Complete(completed));
        // A new transition starts uncancelled.
        self.cancelled = false;
    }
}

/// Content with a fixed intrinsic height and no scrollable region.
#[derive(Debug, Clone, Copy)]
pub struct FixedContent {
    pub configuration: SheetConfiguration,
    pub height: f64,
}

impl FixedContent {
    pub fn new(configuration: SheetConfiguration, height: f64) -> Self {
        Self {
            configuration,
            height,
        }
    }

    pub fn adaptive(height: f64) -> Self {
        Self::new(
            SheetConfiguration::default().sizing_mode(SizingMode::Adaptive),
            height,
        )
    }
}

impl PresentableSurface for FixedContent {
    fn configuration(&self) -> SheetConfiguration {
        self.configuration
    }

    fn content_fit(&self, _width: f64) -> ContentFit {
        ContentFit::new(self.height)
    }
}

/// A header above an embedded list of equal-height rows.
#[derive(Debug, Clone, Copy)]
pub struct ScrollList {
    pub configuration: SheetConfiguration,
    pub header_height: f64,
    pub rows: usize,
    pub row_height: f64,
    pub viewport_height: f64,
}

impl ScrollList {
    pub fn new(rows: usize) -> Self {
        Self {
            configuration: SheetConfiguration::default(),
            header_height: 56.0,
            rows,
            row_height: 44.0,
            viewport_height: 400.0,
        }
    }

    pub fn content_height(&self) -> f64 {
        self.rows as f64 * self.row_height
    }
}

impl PresentableSurface for ScrollList {
    fn configuration(&self) -> SheetConfiguration {
        self.configuration
    }

    fn content_fit(&self, _width: f64) -> ContentFit {
        ContentFit::new(self.header_height).with_scroll_content(self.content_height())
    }

    fn scroll_region(&self) -> Option<ScrollRegion> {
        Some(ScrollRegion::new(
            self.content_height(),
            self.viewport_height,
        ))
    }
}

/// Phone-sized container: 375x800 with 44pt top and 20pt bottom safe area.
pub fn phone() -> ContainerGeometry {
    ContainerGeometry::new(
        Rect::new(0.0, 0.0, 375.0, 800.0),
        Insets::vertical(44.0, 20.0),
    )
}

/// A host with one container and one transitioning delegate.
#[derive(Debug)]
pub struct Stage {
    pub delegate: SheetTransitioningDelegate,
    pub host: SimulatedHost,
    pub container: ContainerGeometry,
    /// Content offset of the embedded scroll view, as written back by the engine.
    pub scroll_offset: f64,
    clock: FrameClock,
}

impl Stage {
    pub fn new(container: ContainerGeometry, policy: SheetPolicy) -> Self {
        Self {
            delegate: SheetTransitioningDelegate::new(policy),
            host: SimulatedHost::new(),
            container,
            scroll_offset: 0.0,
            clock: FrameClock::new(),
        }
    }

    pub fn phone() -> Self {
        Self::new(phone(), SheetPolicy::default())
    }

    /// Present `surface`; panics if a sheet is already up.
    pub fn present(&mut self, surface: &dyn PresentableSurface) {
        self.scroll_offset = 0.0;
        if let Err(err) = self.delegate.present(surface, self.container) {
            panic!("present failed: {err}");
        }
    }

    pub fn layout(&mut self, surface: &dyn PresentableSurface) {
        self.delegate.layout(self.container, surface);
    }

    pub fn tick(&mut self) -> Option<TransitionTick> {
        self.delegate.tick(FRAME, &mut self.host)
    }

    /// Tick with the wall-clock delta since the previous call.
    pub fn frame_at(&mut self, now: Instant) -> Option<TransitionTick> {
        let dt = self.clock.tick_at(now);
        self.delegate.tick(dt, &mut self.host)
    }

    /// Tick until the running transition settles.
    ///
    /// Returns the completion flag, or `None` if nothing was animating.
    pub fn settle(&mut self) -> Option<bool> {
        for _ in 0..MAX_SETTLE_TICKS {
            let tick = self.tick()?;
            if let Some(completed) = tick.completion {
                debug!(completed, "stage settled");
                return Some(completed);
            }
        }
        panic!("transition did not settle within {MAX_SETTLE_TICKS} ticks");
    }

    /// Tick `frames` times regardless of completion.
    pub fn advance(&mut self, frames: usize) {
        for _ in 0..frames {
            self.tick();
        }
    }

    pub fn layers(&self) -> Option<&SheetLayers> {
        self.delegate.layers()
    }

    pub fn sheet_frame(&self) -> Option<Rect> {
        self.layers().map(|layers| layers.sheet.frame)
    }

    pub fn is_presenting(&self) -> bool {
        self.delegate.is_presenting()
    }

    pub fn pan(&mut self, event: PanEvent) {
        self.delegate.handle_input(&event.into(), &mut self.host);
    }

    /// A full pan gesture: began, one changed event per translation step, then
    /// ended at the last translation with `velocity`.
    pub fn drag(&mut self, translations: &[f64], velocity: f64) {
        self.pan(PanEvent::began());
        for &translation in translations {
            self.pan(PanEvent::changed(translation));
        }
        let last = translations.last().copied().unwrap_or(0.0);
        self.pan(PanEvent::ended(last, velocity));
    }

    pub fn scroll(&mut self, event: ScrollEvent) {
        if let ScrollEvent::DidScroll { offset_y } = event {
            self.scroll_offset = offset_y;
        }
        if let Some(offset) = self.delegate.handle_input(&event.into(), &mut self.host) {
            self.scroll_offset = offset;
        }
    }

    /// A full scroll drag: the finger moves the content by each delta in turn.
    ///
    /// Negative deltas pull the content down (toward overscroll).
    pub fn scroll_drag(&mut self, deltas: &[f64], velocity: f64) {
        self.scroll(ScrollEvent::WillBeginDragging {
            offset_y: self.scroll_offset,
        });
        for &delta in deltas {
            self.scroll(ScrollEvent::DidScroll {
                offset_y: self.scroll_offset + delta,
            });
        }
        self.scroll(ScrollEvent::WillEndDragging {
            velocity_y: velocity,
        });
    }
}
