#![forbid(unsafe_code)]

//! Transitioning delegate: binds a presentation request to one controller
//! and one shared transition.
//!
//! The host assigns a [`SheetTransitioningDelegate`] as the transition
//! provider of whatever it presents. Every callback answers from the same
//! [`SheetPresentation`], so the presentation animator, the dismissal
//! animator, and the interactive progress all live on one
//! [`SheetTransition`].
//!
//! # Lifecycle
//!
//! | Event | Effect |
//! |-------|--------|
//! | [`present`](SheetTransitioningDelegate::present) | Controller created, first layout, presentation animator started |
//! | [`tick`](SheetTransitioningDelegate::tick) settles a dismissal | Presentation released |
//! | [`tick`](SheetTransitioningDelegate::tick) settles a cancelled presentation | Presentation released |
//! | Any call with no presentation | No-op |

use std::time::Duration;

use tracing::debug;

use crate::controller::{PresentationController, PresentationPhase};
use crate::input::InputEvent;
use crate::layers::SheetLayers;
use crate::policy::SheetPolicy;
use crate::sizing::ContainerGeometry;
use crate::surface::PresentableSurface;
use crate::transition::{
    SheetTransition, TransitionContext, TransitionDirection, TransitionError, TransitionTick,
};

/// Controller and transition for one presentation.
#[derive(Debug)]
pub struct SheetPresentation {
    pub controller: PresentationController,
    pub transition: SheetTransition,
}

impl SheetPresentation {
    /// Advance the transition and feed the result to the controller.
    pub fn tick(&mut self, dt: Duration, ctx: &mut dyn TransitionContext) -> Option<TransitionTick> {
        let tick = self
            .transition
            .tick(dt, self.controller.sheet_mut(), ctx)?;
        self.controller.transition_did_tick(&tick);
        Some(tick)
    }

    /// Whether this presentation is finished and can be released.
    pub fn is_finished(&self) -> bool {
        self.controller.phase() == PresentationPhase::Dismissed
    }
}

/// Transition provider for sheet presentations.
#[derive(Debug, Default)]
pub struct SheetTransitioningDelegate {
    policy: SheetPolicy,
    presentation: Option<SheetPresentation>,
}

impl SheetTransitioningDelegate {
    pub fn new(policy: SheetPolicy) -> Self {
        Self {
            policy,
            presentation: None,
        }
    }

    pub fn policy(&self) -> &SheetPolicy {
        &self.policy
    }

    pub fn presentation(&self) -> Option<&SheetPresentation> {
        self.presentation.as_ref()
    }

    pub fn layers(&self) -> Option<&SheetLayers> {
        self.presentation
            .as_ref()
            .map(|presentation| presentation.controller.layers())
    }

    pub fn is_presenting(&self) -> bool {
        self.presentation.is_some()
    }

    /// "How is the modal framed": create the presentation controller.
    ///
    /// Any previous presentation is replaced.
    pub fn presentation_controller(
        &mut self,
        surface: &dyn PresentableSurface,
    ) -> &mut PresentationController {
        let controller =
            PresentationController::new(surface.configuration(), self.policy.thresholds);
        let presentation = self.presentation.insert(SheetPresentation {
            controller,
            transition: SheetTransition::new(self.policy.timing),
        });
        &mut presentation.controller
    }

    /// The shared transition, pointed at the presenting animator.
    pub fn animation_controller_for_presented(&mut self) -> Option<&mut SheetTransition> {
        self.transition_for(TransitionDirection::Presenting)
    }

    /// The shared transition, pointed at the dismissal animator.
    pub fn animation_controller_for_dismissed(&mut self) -> Option<&mut SheetTransition> {
        self.transition_for(TransitionDirection::Dismissing)
    }

    /// The shared transition as the interaction controller for dismissal.
    pub fn interaction_controller_for_dismissal(&mut self) -> Option<&mut SheetTransition> {
        self.transition_for(TransitionDirection::Dismissing)
    }

    fn transition_for(&mut self, direction: TransitionDirection) -> Option<&mut SheetTransition> {
        let transition = &mut self.presentation.as_mut()?.transition;
        transition.set_direction(direction);
        Some(transition)
    }

    /// Present `surface` in `container` with the animated presentation.
    pub fn present(
        &mut self,
        surface: &dyn PresentableSurface,
        container: ContainerGeometry,
    ) -> Result<(), TransitionError> {
        if self.presentation.is_some() {
            return Err(TransitionError::AlreadyPresented);
        }
        let controller = self.presentation_controller(surface);
        controller.container_did_layout(container, surface);
        controller.presentation_transition_will_begin();

        let Some(presentation) = self.presentation.as_mut() else {
            return Err(TransitionError::NotPresented);
        };
        let frame = presentation.controller.presented_frame();
        presentation
            .transition
            .set_direction(TransitionDirection::Presenting);
        let started = presentation.transition.animate_transition(
            presentation.controller.sheet_mut(),
            container.bounds,
            frame,
        );
        if let Err(err) = started {
            self.presentation = None;
            return Err(err);
        }
        debug!(?frame, "sheet presentation started");
        Ok(())
    }

    /// Forward a layout pass to the controller.
    pub fn layout(&mut self, container: ContainerGeometry, surface: &dyn PresentableSurface) {
        if let Some(presentation) = self.presentation.as_mut() {
            presentation
                .controller
                .container_did_layout(container, surface);
        }
    }

    /// Route input to the active presentation.
    ///
    /// Returns a scroll content offset the host must apply, if any.
    pub fn handle_input(
        &mut self,
        event: &InputEvent,
        ctx: &mut dyn TransitionContext,
    ) -> Option<f64> {
        let presentation = self.presentation.as_mut()?;
        let SheetPresentation {
            controller,
            transition,
        } = presentation;
        controller.handle_input(event, transition, ctx)
    }

    /// Programmatic, animated dismissal.
    pub fn dismiss(&mut self) -> Result<(), TransitionError> {
        let presentation = self
            .presentation
            .as_mut()
            .ok_or(TransitionError::NotPresented)?;
        presentation
            .controller
            .dismiss(&mut presentation.transition)
    }

    /// A tap on the scrim. Returns whether it started a dismissal.
    pub fn tap_scrim(&mut self) -> bool {
        let Some(presentation) = self.presentation.as_mut() else {
            return false;
        };
        presentation
            .controller
            .tap_scrim(&mut presentation.transition)
    }

    /// Advance the active animator by `dt`.
    ///
    /// Releases the presentation once it is fully dismissed.
    pub fn tick(&mut self, dt: Duration, ctx: &mut dyn TransitionContext) -> Option<TransitionTick> {
        let presentation = self.presentation.as_mut()?;
        let tick = presentation.tick(dt, ctx);
        if presentation.is_finished() {
            self.presentation = None;
            debug!("sheet presentation released");
        }
        tick
    }
}
