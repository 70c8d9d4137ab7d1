#![forbid(unsafe_code)]

//! Per-presentation sheet configuration.
//!
//! A presented surface describes how it wants to be framed and decorated
//! through a [`SheetConfiguration`]. The configuration is read once when the
//! presentation controller is created and is immutable afterwards.

use sheetkit_core::geometry::Size;

/// How the sheet's height is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "mode", rename_all = "snake_case")
)]
pub enum SizingMode {
    /// Fit the content's intrinsic height; pin to the top safe area when it
    /// would not fit.
    Adaptive,
    /// Top edge aligned to the top safe-area inset.
    #[default]
    PinnedToTopSafeArea,
    /// A fixed height; pin to the top safe area when it would not fit.
    Fixed { height: f64 },
}

/// Grabber (drag handle) decoration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GrabberConfig {
    pub visible: bool,
    pub size: Size,
    /// Gap between the sheet's top edge and the grabber.
    pub top_inset: f64,
    /// Gap between the grabber and the sheet's content.
    pub bottom_inset: f64,
}

impl Default for GrabberConfig {
    fn default() -> Self {
        Self {
            visible: false,
            size: Size::new(32.0, 4.0),
            top_inset: 8.0,
            bottom_inset: 8.0,
        }
    }
}

impl GrabberConfig {
    /// Height reserved above the content when the grabber is visible.
    ///
    /// Zero when the grabber is hidden.
    pub fn reserved_height(&self) -> f64 {
        if self.visible {
            self.top_inset + self.size.height + self.bottom_inset
        } else {
            0.0
        }
    }
}

/// Sheet configuration supplied by the presented surface.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SheetConfiguration {
    pub sizing_mode: SizingMode,
    pub grabber: GrabberConfig,
    /// Corner radius once fully presented.
    pub preferred_corner_radius: f64,
    /// Corner radius while off screen; differing from the preferred radius
    /// animates the radius during transitions.
    pub dismiss_corner_radius: f64,
}

impl Default for SheetConfiguration {
    fn default() -> Self {
        Self {
            sizing_mode: SizingMode::default(),
            grabber: GrabberConfig::default(),
            preferred_corner_radius: 12.0,
            dismiss_corner_radius: 12.0,
        }
    }
}

impl SheetConfiguration {
    /// Set how the sheet's height is chosen.
    pub fn sizing_mode(mut self, mode: SizingMode) -> Self {
        self.sizing_mode = mode;
        self
    }

    /// Show or hide the grabber.
    pub fn wants_grabber(mut self, visible: bool) -> Self {
        self.grabber.visible = visible;
        self
    }

    /// Set grabber size.
    pub fn grabber_size(mut self, size: Size) -> Self {
        self.grabber.size = size;
        self
    }

    /// Set the gap above the grabber.
    pub fn top_grabber_inset(mut self, inset: f64) -> Self {
        self.grabber.top_inset = inset;
        self
    }

    /// Set the gap between the grabber and the content.
    pub fn bottom_grabber_inset(mut self, inset: f64) -> Self {
        self.grabber.bottom_inset = inset;
        self
    }

    /// Set the corner radius when fully presented.
    pub fn preferred_corner_radius(mut self, radius: f64) -> Self {
        self.preferred_corner_radius = radius;
        self
    }

    /// Set the corner radius when off screen.
    pub fn dismiss_corner_radius(mut self, radius: f64) -> Self {
        self.dismiss_corner_radius = radius;
        self
    }

    /// Corner radius at a given presentation progress (`0` = off screen).
    pub fn corner_radius_at(&self, presented: f64) -> f64 {
        let t = presented.clamp(0.0, 1.0);
        self.dismiss_corner_radius + (self.preferred_corner_radius - self.dismiss_corner_radius) * t
    }
}
