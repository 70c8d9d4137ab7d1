#![forbid(unsafe_code)]

//! Presentation controller: the state machine for one sheet presentation.
//!
//! ```text
//!  Created ──will_begin──▶ Presenting ──did_end(true)──▶ Presented
//!                              │                          │   ▲
//!                     did_end(false)          input/dismiss│   │did_end(false)
//!                              ▼                          ▼   │
//!                          Dismissed ◀──did_end(true)── Dismissing
//! ```
//!
//! The controller owns the per-presentation view state ([`SheetLayers`]),
//! the dismiss input source, and the progress tracker. It never owns the
//! transition; the caller lends it for input handling and programmatic
//! dismissal so both directions always go through the same
//! [`SheetTransition`].
//!
//! # Invariants
//!
//! - Exactly one dismiss input source is selected per presentation, on the
//!   first layout pass.
//! - Layout never moves the sheet while a transition or an interaction owns
//!   its frame.
//! - Input with no attached sheet, or before the first layout, is a no-op.

use tracing::{debug, debug_span};

use sheetkit_core::geometry::{CornerMask, Rect};

use crate::config::{SheetConfiguration, SizingMode};
use crate::input::{DismissInputSource, DismissSignal, InputEvent, select_input};
use crate::layers::{GrabberLayer, SheetLayer, SheetLayers};
use crate::sizing::{ContainerGeometry, resolve_frame};
use crate::surface::PresentableSurface;
use crate::tracker::{DismissDecision, DismissThresholds, InputKind, ProgressTracker};
use crate::transition::{
    SheetTransition, TransitionContext, TransitionDirection, TransitionError, TransitionTick,
};

/// Slack for comparing the sheet's bottom edge with the container's.
const EDGE_TOLERANCE: f64 = 1e-6;

/// Lifecycle of one presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresentationPhase {
    Created,
    Presenting,
    Presented,
    Dismissing { interactive: bool },
    Dismissed,
}

/// Owns the state of one sheet presentation.
#[derive(Debug)]
pub struct PresentationController {
    configuration: SheetConfiguration,
    tracker: ProgressTracker,
    layers: SheetLayers,
    container: Option<ContainerGeometry>,
    presented_frame: Rect,
    input: Option<Box<dyn DismissInputSource>>,
    phase: PresentationPhase,
}

impl PresentationController {
    pub fn new(configuration: SheetConfiguration, thresholds: DismissThresholds) -> Self {
        Self {
            configuration,
            tracker: ProgressTracker::new(thresholds),
            layers: SheetLayers::default(),
            container: None,
            presented_frame: Rect::ZERO,
            input: None,
            phase: PresentationPhase::Created,
        }
    }

    pub fn configuration(&self) -> &SheetConfiguration {
        &self.configuration
    }

    pub fn phase(&self) -> PresentationPhase {
        self.phase
    }

    pub fn layers(&self) -> &SheetLayers {
        &self.layers
    }

    pub(crate) fn sheet_mut(&mut self) -> &mut SheetLayer {
        &mut self.layers.sheet
    }

    pub fn container(&self) -> Option<ContainerGeometry> {
        self.container
    }

    /// Frame the sheet rests at once presented, as of the last layout pass.
    pub fn presented_frame(&self) -> Rect {
        self.presented_frame
    }

    /// Which input drives interactive dismissal; `None` before first layout.
    pub fn input_kind(&self) -> Option<InputKind> {
        self.input.as_ref().map(|source| source.kind())
    }

    pub fn is_interacting(&self) -> bool {
        self.tracker.is_active()
    }

    pub fn dismiss_progress(&self) -> f64 {
        self.tracker.progress()
    }

    /// Resolve the sheet frame for the current container.
    ///
    /// Returns [`Rect::ZERO`] before the first layout pass.
    pub fn frame_of_presented_view(&self, surface: &dyn PresentableSurface) -> Rect {
        let Some(container) = self.container else {
            return Rect::ZERO;
        };
        let fit = match self.configuration.sizing_mode {
            SizingMode::Adaptive => Some(surface.content_fit(container.bounds.width)),
            SizingMode::PinnedToTopSafeArea | SizingMode::Fixed { .. } => None,
        };
        resolve_frame(self.configuration.sizing_mode, &container, fit.as_ref())
    }

    /// Attach the scrim (transparent) and prepare the sheet's corners and
    /// grabber ahead of the presentation animation.
    pub fn presentation_transition_will_begin(&mut self) {
        self.phase = PresentationPhase::Presenting;
        let sheet = &mut self.layers.sheet;
        sheet.masked_corners = CornerMask::TOP;
        sheet.corner_radius = self.configuration.dismiss_corner_radius;
        self.layers.grabber = self
            .configuration
            .grabber
            .visible
            .then(|| self.grabber_layer());
        let scrim = &mut self.layers.scrim;
        scrim.alpha = 0.0;
        scrim.attached = true;
        if let Some(container) = self.container {
            scrim.frame = container.bounds;
        }
        debug!(
            mode = ?self.configuration.sizing_mode,
            grabber = self.configuration.grabber.visible,
            "presentation will begin"
        );
    }

    /// Layout pass: recompute the frame, scrim, grabber, and content inset.
    pub fn container_did_layout(
        &mut self,
        container: ContainerGeometry,
        surface: &dyn PresentableSurface,
    ) {
        let bounds = container.bounds;
        let _span = debug_span!(
            "sheet_layout",
            w = bounds.width,
            h = bounds.height,
            top = container.safe_area.top,
            bottom = container.safe_area.bottom
        )
        .entered();

        self.container = Some(container);
        self.layers.sheet.interaction_enabled = true;

        let frame = self.frame_of_presented_view(surface);
        // Centered in the vertical gap: the bottom edge sits on the container's.
        self.presented_frame = Rect::new(
            bounds.center().x - frame.width / 2.0,
            bounds.max_y() - frame.height,
            frame.width,
            frame.height,
        );
        if self.phase == PresentationPhase::Presented && !self.tracker.is_active() {
            self.layers.sheet.frame = self.presented_frame;
        }
        self.layers.scrim.frame = bounds;

        if self.configuration.grabber.visible {
            self.layers.grabber = Some(self.grabber_layer());
            self.layers.additional_top_inset = self.configuration.grabber.reserved_height();
        }

        if self.input.is_none() {
            let source = select_input(surface.scroll_region());
            debug!(kind = ?source.kind(), "dismiss input selected");
            self.input = Some(source);
        }
        debug!(frame = ?self.presented_frame, "sheet laid out");
    }

    fn grabber_layer(&self) -> GrabberLayer {
        let grabber = &self.configuration.grabber;
        let x = (self.presented_frame.width - grabber.size.width) / 2.0;
        GrabberLayer {
            frame: Rect::new(x, grabber.top_inset, grabber.size.width, grabber.size.height),
            corner_radius: grabber.size.height / 2.0,
        }
    }

    pub fn dismissal_transition_will_begin(&mut self, interactive: bool) {
        self.phase = PresentationPhase::Dismissing { interactive };
        debug!(interactive, "dismissal will begin");
    }

    /// Alongside animation: scrim opacity and corner radius follow how
    /// presented the sheet looks.
    pub fn apply_transition_progress(&mut self, presented_amount: f64) {
        let amount = presented_amount.clamp(0.0, 1.0);
        self.layers.scrim.alpha = amount;
        self.layers.sheet.corner_radius = self.configuration.corner_radius_at(amount);
    }

    /// Feed one transition tick into the alongside animation and, on settle,
    /// the matching `did_end` callback.
    pub fn transition_did_tick(&mut self, tick: &TransitionTick) {
        self.apply_transition_progress(tick.presented_amount);
        if let Some(completed) = tick.completion {
            match tick.direction {
                TransitionDirection::Presenting => self.presentation_transition_did_end(completed),
                TransitionDirection::Dismissing => self.dismissal_transition_did_end(completed),
            }
        }
    }

    pub fn presentation_transition_did_end(&mut self, completed: bool) {
        if completed {
            self.phase = PresentationPhase::Presented;
            self.layers.sheet.frame = self.presented_frame;
            self.apply_transition_progress(1.0);
        } else {
            self.layers.scrim.attached = false;
            self.layers.sheet.attached = false;
            self.phase = PresentationPhase::Dismissed;
        }
        debug!(completed, "presentation did end");
    }

    pub fn dismissal_transition_did_end(&mut self, completed: bool) {
        self.tracker.reset();
        if let Some(input) = self.input.as_mut() {
            input.reset();
        }
        if completed {
            self.layers.scrim.attached = false;
            self.layers.sheet.attached = false;
            self.phase = PresentationPhase::Dismissed;
        } else {
            self.layers.sheet.frame = self.presented_frame;
            self.apply_transition_progress(1.0);
            self.phase = PresentationPhase::Presented;
        }
        debug!(completed, "dismissal did end");
    }

    /// Run the animated, non-interactive dismissal.
    ///
    /// A dismissal already in flight is left alone.
    pub fn dismiss(&mut self, transition: &mut SheetTransition) -> Result<(), TransitionError> {
        match self.phase {
            PresentationPhase::Presented => {}
            PresentationPhase::Dismissing { .. } => return Ok(()),
            PresentationPhase::Presenting => {
                return Err(TransitionError::Busy {
                    active: TransitionDirection::Presenting,
                });
            }
            PresentationPhase::Created | PresentationPhase::Dismissed => {
                return Err(TransitionError::NotPresented);
            }
        }
        let container = self.container.ok_or(TransitionError::NotPresented)?;
        transition.set_direction(TransitionDirection::Dismissing);
        let frame = self.layers.sheet.frame;
        transition.animate_transition(&mut self.layers.sheet, container.bounds, frame)?;
        self.dismissal_transition_will_begin(false);
        Ok(())
    }

    /// Tapping the scrim dismisses a presented sheet.
    pub fn tap_scrim(&mut self, transition: &mut SheetTransition) -> bool {
        if self.phase != PresentationPhase::Presented {
            return false;
        }
        match self.dismiss(transition) {
            Ok(()) => true,
            Err(err) => {
                debug!(%err, "scrim tap ignored");
                false
            }
        }
    }

    /// Route a host input event through the dismiss input source.
    ///
    /// Returns a scroll content offset the host must apply, if any.
    pub fn handle_input(
        &mut self,
        event: &InputEvent,
        transition: &mut SheetTransition,
        ctx: &mut dyn TransitionContext,
    ) -> Option<f64> {
        if !self.layers.sheet.attached {
            return None;
        }
        let container = self.container?;
        let input = self.input.as_mut()?;
        let kind = input.kind();
        let response = input.handle(event);

        for signal in response.signals {
            match signal {
                DismissSignal::Began => {
                    if !self.begin_interaction(kind, container, transition) {
                        if let Some(input) = self.input.as_mut() {
                            input.reset();
                        }
                        return None;
                    }
                }
                DismissSignal::Moved { delta } => {
                    self.move_interaction(delta, container, transition, ctx);
                }
                DismissSignal::Released { velocity } => {
                    self.release_interaction(velocity, transition, ctx);
                }
            }
        }
        response.content_offset
    }

    fn begin_interaction(
        &mut self,
        kind: InputKind,
        container: ContainerGeometry,
        transition: &mut SheetTransition,
    ) -> bool {
        if self.tracker.is_active() {
            return true;
        }
        if !matches!(
            self.phase,
            PresentationPhase::Presented | PresentationPhase::Dismissing { .. }
        ) {
            return false;
        }
        match transition.begin_interactive_dismissal(&mut self.layers.sheet, container.bounds) {
            Ok(start) => {
                let bottom = container.bounds.max_y();
                if start > 0.0 {
                    self.tracker
                        .resume(kind, self.presented_frame, bottom, start);
                } else {
                    self.tracker.begin(kind, self.presented_frame, bottom);
                }
                self.dismissal_transition_will_begin(true);
                true
            }
            Err(err) => {
                debug!(%err, "interactive dismissal rejected");
                false
            }
        }
    }

    fn move_interaction(
        &mut self,
        delta: f64,
        container: ContainerGeometry,
        transition: &mut SheetTransition,
        ctx: &mut dyn TransitionContext,
    ) {
        if !self.tracker.is_active() {
            return;
        }
        // Nothing left to drag once the bottom edge is above the container's.
        if self.layers.sheet.frame.max_y() + EDGE_TOLERANCE < container.bounds.max_y() {
            return;
        }
        let Some(progress) = self.tracker.update(delta) else {
            return;
        };
        if let Some(amount) = transition.update_interactive(progress, &mut self.layers.sheet, ctx) {
            self.apply_transition_progress(amount);
        }
    }

    fn release_interaction(
        &mut self,
        velocity: f64,
        transition: &mut SheetTransition,
        ctx: &mut dyn TransitionContext,
    ) {
        let Some(decision) = self.tracker.end(velocity) else {
            return;
        };
        match decision {
            DismissDecision::Commit => transition.finish_interactive(ctx),
            DismissDecision::Cancel => transition.cancel_interactive(ctx),
        };
        self.phase = PresentationPhase::Dismissing { interactive: false };
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use sheetkit_core::event::{GesturePhase, PanEvent, ScrollEvent};
    use sheetkit_core::geometry::{Insets, Size};

    use super::*;
    use crate::sizing::ContentFit;
    use crate::surface::ScrollRegion;

    #[derive(Debug, Default)]
    struct Ctx {
        cancelled: bool,
        completions: Vec<bool>,
    }

    impl TransitionContext for Ctx {
        fn transition_was_cancelled(&self) -> bool {
            self.cancelled
        }
        fn finish_interactive_transition(&mut self) {
            self.cancelled = false;
        }
        fn cancel_interactive_transition(&mut self) {
            self.cancelled = true;
        }
        fn complete_transition(&mut self, completed: bool) {
            self.completions.push(completed);
        }
    }

    struct Content {
        height: f64,
        scroll: Option<ScrollRegion>,
    }

    impl PresentableSurface for Content {
        fn content_fit(&self, _width: f64) -> ContentFit {
            ContentFit::new(self.height)
        }

        fn scroll_region(&self) -> Option<ScrollRegion> {
            self.scroll
        }
    }

    const CONTENT: Content = Content {
        height: 300.0,
        scroll: None,
    };

    fn phone() -> ContainerGeometry {
        ContainerGeometry::new(
            Rect::new(0.0, 0.0, 375.0, 800.0),
            Insets::vertical(44.0, 20.0),
        )
    }

    fn adaptive() -> SheetConfiguration {
        SheetConfiguration::default().sizing_mode(SizingMode::Adaptive)
    }

    fn settle(
        controller: &mut PresentationController,
        transition: &mut SheetTransition,
        ctx: &mut Ctx,
    ) {
        for _ in 0..1_000 {
            let Some(tick) = transition.tick(
                Duration::from_millis(16),
                &mut controller.layers.sheet,
                ctx,
            ) else {
                return;
            };
            controller.transition_did_tick(&tick);
            if tick.completion.is_some() {
                return;
            }
        }
        panic!("transition never settled");
    }

    fn presented(
        configuration: SheetConfiguration,
        surface: &dyn PresentableSurface,
    ) -> (PresentationController, SheetTransition, Ctx) {
        let mut controller = PresentationController::new(configuration, DismissThresholds::default());
        let mut transition = SheetTransition::default();
        let mut ctx = Ctx::default();
        controller.container_did_layout(phone(), surface);
        controller.presentation_transition_will_begin();
        let frame = controller.presented_frame();
        transition
            .animate_transition(&mut controller.layers.sheet, phone().bounds, frame)
            .unwrap();
        settle(&mut controller, &mut transition, &mut ctx);
        (controller, transition, ctx)
    }

    #[test]
    fn frame_is_zero_before_layout() {
        let controller = PresentationController::new(adaptive(), DismissThresholds::default());
        assert_eq!(controller.frame_of_presented_view(&CONTENT), Rect::ZERO);
        assert_eq!(controller.input_kind(), None);
    }

    #[test]
    fn layout_resolves_and_centers_frame() {
        let mut controller = PresentationController::new(adaptive(), DismissThresholds::default());
        controller.container_did_layout(phone(), &CONTENT);
        assert_eq!(
            controller.presented_frame(),
            Rect::new(0.0, 480.0, 375.0, 320.0)
        );
        assert_eq!(controller.layers().scrim.frame, phone().bounds);
        assert!(controller.layers().sheet.interaction_enabled);
        assert_eq!(controller.input_kind(), Some(InputKind::Pan));
        // Not presented yet: layout leaves the sheet alone.
        assert_eq!(controller.layers().sheet.frame, Rect::ZERO);
    }

    #[test]
    fn grabber_reserves_top_inset() {
        let config = adaptive()
            .wants_grabber(true)
            .grabber_size(Size::new(36.0, 5.0));
        let mut controller = PresentationController::new(config, DismissThresholds::default());
        controller.container_did_layout(phone(), &CONTENT);
        let grabber = controller.layers().grabber.unwrap();
        assert_eq!(grabber.frame, Rect::new(169.5, 8.0, 36.0, 5.0));
        assert_eq!(grabber.corner_radius, 2.5);
        assert_eq!(controller.layers().additional_top_inset, 21.0);
    }

    #[test]
    fn no_grabber_no_inset() {
        let mut controller = PresentationController::new(adaptive(), DismissThresholds::default());
        controller.container_did_layout(phone(), &CONTENT);
        controller.presentation_transition_will_begin();
        assert_eq!(controller.layers().grabber, None);
        assert_eq!(controller.layers().additional_top_inset, 0.0);
    }

    #[test]
    fn will_begin_prepares_scrim_and_corners() {
        let config = adaptive().dismiss_corner_radius(0.0);
        let mut controller = PresentationController::new(config, DismissThresholds::default());
        controller.container_did_layout(phone(), &CONTENT);
        controller.presentation_transition_will_begin();
        let layers = controller.layers();
        assert!(layers.scrim.attached);
        assert_eq!(layers.scrim.alpha, 0.0);
        assert_eq!(layers.sheet.corner_radius, 0.0);
        assert_eq!(layers.sheet.masked_corners, CornerMask::TOP);
        assert_eq!(controller.phase(), PresentationPhase::Presenting);
    }

    #[test]
    fn presentation_completes_fully_opaque() {
        let (controller, transition, ctx) = presented(adaptive(), &CONTENT);
        assert_eq!(controller.phase(), PresentationPhase::Presented);
        assert_eq!(controller.layers().scrim.alpha, 1.0);
        assert_eq!(controller.layers().sheet.corner_radius, 12.0);
        assert_eq!(controller.layers().sheet.frame, controller.presented_frame());
        assert!(transition.active().is_none());
        assert_eq!(ctx.completions, vec![true]);
    }

    #[test]
    fn drag_past_threshold_commits() {
        let (mut c, mut t, mut ctx) = presented(adaptive(), &CONTENT);
        c.handle_input(&PanEvent::began().into(), &mut t, &mut ctx);
        assert!(c.is_interacting());
        assert_eq!(c.phase(), PresentationPhase::Dismissing { interactive: true });
        c.handle_input(&PanEvent::changed(400.0).into(), &mut t, &mut ctx);
        assert_eq!(c.dismiss_progress(), 1.0);
        assert_eq!(c.layers().sheet.frame.y, 800.0);
        c.handle_input(&PanEvent::ended(400.0, 0.0).into(), &mut t, &mut ctx);
        assert!(!c.is_interacting());

        settle(&mut c, &mut t, &mut ctx);
        assert_eq!(c.phase(), PresentationPhase::Dismissed);
        assert!(!c.layers().scrim.attached);
        assert!(!c.layers().sheet.attached);
        assert_eq!(ctx.completions, vec![true, true]);
        assert_eq!(t.dismiss_fraction_complete(), 0.0);
    }

    #[test]
    fn short_drag_cancels_and_restores() {
        let config = adaptive().dismiss_corner_radius(0.0);
        let (mut c, mut t, mut ctx) = presented(config, &CONTENT);
        c.handle_input(&PanEvent::began().into(), &mut t, &mut ctx);
        c.handle_input(&PanEvent::changed(32.0).into(), &mut t, &mut ctx);
        assert!((c.layers().scrim.alpha - 0.9).abs() < 1e-9);
        assert!(c.layers().sheet.corner_radius < 12.0);
        c.handle_input(&PanEvent::ended(32.0, 0.0).into(), &mut t, &mut ctx);

        settle(&mut c, &mut t, &mut ctx);
        assert_eq!(c.phase(), PresentationPhase::Presented);
        assert_eq!(c.layers().scrim.alpha, 1.0);
        assert!(c.layers().scrim.attached);
        assert_eq!(c.layers().sheet.corner_radius, 12.0);
        assert_eq!(c.layers().sheet.frame, c.presented_frame());
        assert_eq!(ctx.completions, vec![true, false]);
        assert!(t.active().is_none());
    }

    #[test]
    fn fast_flick_commits() {
        let (mut c, mut t, mut ctx) = presented(adaptive(), &CONTENT);
        c.handle_input(&PanEvent::began().into(), &mut t, &mut ctx);
        c.handle_input(&PanEvent::changed(20.0).into(), &mut t, &mut ctx);
        c.handle_input(&PanEvent::ended(20.0, 1_000.0).into(), &mut t, &mut ctx);
        settle(&mut c, &mut t, &mut ctx);
        assert_eq!(c.phase(), PresentationPhase::Dismissed);
    }

    #[test]
    fn cancelled_gesture_after_short_drag_reverses() {
        let (mut c, mut t, mut ctx) = presented(adaptive(), &CONTENT);
        c.handle_input(&PanEvent::began().into(), &mut t, &mut ctx);
        c.handle_input(&PanEvent::changed(30.0).into(), &mut t, &mut ctx);
        let cancelled = PanEvent::new(GesturePhase::Cancelled, 30.0, 0.0);
        c.handle_input(&cancelled.into(), &mut t, &mut ctx);
        assert!(!c.is_interacting());
        assert_eq!(c.phase(), PresentationPhase::Dismissing { interactive: false });

        settle(&mut c, &mut t, &mut ctx);
        assert_eq!(c.phase(), PresentationPhase::Presented);
        assert_eq!(c.layers().sheet.frame, c.presented_frame());
        assert!(t.active().is_none());
        assert_eq!(ctx.completions, vec![true, false]);
    }

    #[test]
    fn failed_gesture_after_long_drag_commits() {
        let (mut c, mut t, mut ctx) = presented(adaptive(), &CONTENT);
        c.handle_input(&PanEvent::began().into(), &mut t, &mut ctx);
        c.handle_input(&PanEvent::changed(150.0).into(), &mut t, &mut ctx);
        // The terminal sample carries further translation.
        let failed = PanEvent::new(GesturePhase::Failed, 200.0, 0.0);
        c.handle_input(&failed.into(), &mut t, &mut ctx);
        assert!(!c.is_interacting());

        settle(&mut c, &mut t, &mut ctx);
        assert_eq!(c.phase(), PresentationPhase::Dismissed);
        assert!(!c.layers().sheet.attached);
        assert!(!c.layers().scrim.attached);
        assert!(t.active().is_none());
        assert_eq!(ctx.completions, vec![true, true]);
    }

    #[test]
    fn fractional_geometry_still_drags() {
        let container = ContainerGeometry::new(
            Rect::new(0.0, 0.3, 375.1, 812.7),
            Insets::vertical(47.3, 33.9),
        );
        let content = Content {
            height: 301.7,
            scroll: None,
        };
        let mut c = PresentationController::new(adaptive(), DismissThresholds::default());
        let mut t = SheetTransition::default();
        let mut ctx = Ctx::default();
        c.container_did_layout(container, &content);
        c.presentation_transition_will_begin();
        let frame = c.presented_frame();
        assert!((frame.max_y() - container.bounds.max_y()).abs() < 1e-9);
        t.animate_transition(&mut c.layers.sheet, container.bounds, frame)
            .unwrap();
        settle(&mut c, &mut t, &mut ctx);
        assert_eq!(c.phase(), PresentationPhase::Presented);

        c.handle_input(&PanEvent::began().into(), &mut t, &mut ctx);
        c.handle_input(&PanEvent::changed(10.3).into(), &mut t, &mut ctx);
        assert!(c.dismiss_progress() > 0.0);
        assert!(c.layers().sheet.frame.y > frame.y);
    }

    #[test]
    fn input_while_presenting_is_ignored() {
        let mut c = PresentationController::new(adaptive(), DismissThresholds::default());
        let mut t = SheetTransition::default();
        let mut ctx = Ctx::default();
        assert_eq!(
            c.handle_input(&PanEvent::began().into(), &mut t, &mut ctx),
            None
        );
        c.container_did_layout(phone(), &CONTENT);
        c.presentation_transition_will_begin();
        let frame = c.presented_frame();
        t.animate_transition(&mut c.layers.sheet, phone().bounds, frame)
            .unwrap();
        c.handle_input(&PanEvent::began().into(), &mut t, &mut ctx);
        c.handle_input(&PanEvent::changed(100.0).into(), &mut t, &mut ctx);
        assert!(!c.is_interacting());
        assert_eq!(c.phase(), PresentationPhase::Presenting);
    }

    #[test]
    fn input_after_dismissal_is_noop() {
        let (mut c, mut t, mut ctx) = presented(adaptive(), &CONTENT);
        c.dismiss(&mut t).unwrap();
        settle(&mut c, &mut t, &mut ctx);
        assert_eq!(c.phase(), PresentationPhase::Dismissed);
        assert_eq!(
            c.handle_input(&PanEvent::began().into(), &mut t, &mut ctx),
            None
        );
        assert!(!c.is_interacting());
        assert_eq!(c.dismiss(&mut t), Err(TransitionError::NotPresented));
    }

    #[test]
    fn scrim_tap_dismisses_once() {
        let (mut c, mut t, mut ctx) = presented(adaptive(), &CONTENT);
        assert!(c.tap_scrim(&mut t));
        assert_eq!(c.phase(), PresentationPhase::Dismissing { interactive: false });
        assert!(!c.tap_scrim(&mut t));
        settle(&mut c, &mut t, &mut ctx);
        assert_eq!(c.phase(), PresentationPhase::Dismissed);
        assert!(!c.layers().scrim.attached);
    }

    #[test]
    fn scrollable_content_dismisses_by_scrolling() {
        let list = Content {
            height: 200.0,
            scroll: Some(ScrollRegion::new(2_000.0, 400.0)),
        };
        let (mut c, mut t, mut ctx) = presented(SheetConfiguration::default(), &list);
        assert_eq!(c.input_kind(), Some(InputKind::Scroll));
        // Pan input does not reach a scroll-driven presentation.
        c.handle_input(&PanEvent::began().into(), &mut t, &mut ctx);
        assert!(!c.is_interacting());

        c.handle_input(
            &ScrollEvent::WillBeginDragging { offset_y: 0.0 }.into(),
            &mut t,
            &mut ctx,
        );
        let offset = c.handle_input(
            &ScrollEvent::DidScroll { offset_y: -400.0 }.into(),
            &mut t,
            &mut ctx,
        );
        assert_eq!(offset, Some(0.0));
        assert!(c.is_interacting());
        c.handle_input(
            &ScrollEvent::WillEndDragging { velocity_y: 0.0 }.into(),
            &mut t,
            &mut ctx,
        );
        settle(&mut c, &mut t, &mut ctx);
        assert_eq!(c.phase(), PresentationPhase::Dismissed);
    }
}
