#![forbid(unsafe_code)]

//! Bottom-sheet presentation engine.
//!
//! Slides a presented surface up from the bottom of a container, sizes it
//! adaptively, to a fixed height, or to the top safe area, and lets the user
//! drag (or scroll) it back down to dismiss.
//!
//! The engine does not draw. Hosts implement [`PresentableSurface`] for their
//! content and [`TransitionContext`] for their transition bookkeeping, feed
//! layout passes, input events, and frame ticks into a
//! [`SheetTransitioningDelegate`], and mirror the resulting [`SheetLayers`]
//! onto native views.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use sheetkit::{
//!     ContainerGeometry, ContentFit, PresentableSurface, SheetConfiguration,
//!     SheetTransitioningDelegate, SizingMode, TransitionContext,
//! };
//! use sheetkit_core::{Insets, PanEvent, Rect};
//!
//! struct Note;
//!
//! impl PresentableSurface for Note {
//!     fn configuration(&self) -> SheetConfiguration {
//!         SheetConfiguration::default().sizing_mode(SizingMode::Adaptive)
//!     }
//!
//!     fn content_fit(&self, _width: f64) -> ContentFit {
//!         ContentFit::new(300.0)
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Host {
//!     cancelled: bool,
//! }
//!
//! impl TransitionContext for Host {
//!     fn transition_was_cancelled(&self) -> bool {
//!         self.cancelled
//!     }
//!     fn finish_interactive_transition(&mut self) {
//!         self.cancelled = false;
//!     }
//!     fn cancel_interactive_transition(&mut self) {
//!         self.cancelled = true;
//!     }
//!     fn complete_transition(&mut self, _completed: bool) {}
//! }
//!
//! let container = ContainerGeometry::new(
//!     Rect::new(0.0, 0.0, 375.0, 800.0),
//!     Insets::vertical(44.0, 20.0),
//! );
//! let mut sheets = SheetTransitioningDelegate::default();
//! let mut host = Host::default();
//!
//! sheets.present(&Note, container).unwrap();
//! while sheets.tick(Duration::from_millis(16), &mut host).is_some_and(|t| t.completion.is_none()) {}
//! assert_eq!(sheets.layers().unwrap().sheet.frame, Rect::new(0.0, 480.0, 375.0, 320.0));
//!
//! sheets.handle_input(&PanEvent::began().into(), &mut host);
//! sheets.handle_input(&PanEvent::changed(400.0).into(), &mut host);
//! sheets.handle_input(&PanEvent::ended(400.0, 0.0).into(), &mut host);
//! while sheets.tick(Duration::from_millis(16), &mut host).is_some() {}
//! assert!(!sheets.is_presenting());
//! ```

pub mod animator;
pub mod config;
pub mod controller;
pub mod coordinator;
pub mod input;
pub mod layers;
pub mod policy;
pub mod sizing;
pub mod surface;
pub mod tracker;
pub mod transition;

pub use animator::{AnimatingPosition, AnimatorState, PropertyAnimator, SpringTiming};
pub use config::{GrabberConfig, SheetConfiguration, SizingMode};
pub use controller::{PresentationController, PresentationPhase};
pub use coordinator::{SheetPresentation, SheetTransitioningDelegate};
pub use input::{
    DismissInputSource, DismissSignal, InputEvent, InputResponse, PanSource, ScrollSource,
    select_input,
};
pub use layers::{GrabberLayer, ScrimLayer, SheetLayer, SheetLayers};
pub use policy::{PolicyError, SheetPolicy};
pub use sizing::{ContainerGeometry, ContentFit, pinned_frame, resolve_frame};
pub use surface::{PresentableSurface, ScrollRegion};
pub use tracker::{
    DismissDecision, DismissThresholds, InputKind, ProgressTracker, ReleaseSample, progress_for,
};
pub use transition::{
    ActiveAnimator, SheetTransition, TransitionContext, TransitionDirection, TransitionError,
    TransitionPhase, TransitionTick, TransitionTiming,
};
