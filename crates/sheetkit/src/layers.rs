#![forbid(unsafe_code)]

//! View state written by the presentation engine and read by the host.
//!
//! The engine never draws. Every visible side effect of a presentation is a
//! field on [`SheetLayers`]; hosts mirror these onto their native views after
//! each layout pass, input event, or animation tick.

use sheetkit_core::geometry::{CornerMask, Rect};

/// The presented sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetLayer {
    /// Frame in container coordinates.
    pub frame: Rect,
    pub corner_radius: f64,
    pub masked_corners: CornerMask,
    /// Whether the sheet is in the container's view hierarchy.
    pub attached: bool,
    pub interaction_enabled: bool,
}

impl Default for SheetLayer {
    fn default() -> Self {
        Self {
            frame: Rect::ZERO,
            corner_radius: 0.0,
            masked_corners: CornerMask::TOP,
            attached: false,
            interaction_enabled: false,
        }
    }
}

/// Background scrim behind the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrimLayer {
    pub frame: Rect,
    /// Opacity in `[0, 1]`.
    pub alpha: f64,
    pub attached: bool,
}

/// Drag handle drawn on top of the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GrabberLayer {
    /// Frame in sheet-local coordinates.
    pub frame: Rect,
    pub corner_radius: f64,
}

/// All layers of one presentation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SheetLayers {
    pub sheet: SheetLayer,
    pub scrim: ScrimLayer,
    pub grabber: Option<GrabberLayer>,
    /// Extra top safe-area inset for the presented content so nothing renders
    /// under the grabber.
    pub additional_top_inset: f64,
}
