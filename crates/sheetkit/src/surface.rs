#![forbid(unsafe_code)]

//! The capability a presented surface exposes to the engine.

use crate::config::SheetConfiguration;
use crate::sizing::ContentFit;

/// An embedded scrollable region inside the presented content.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollRegion {
    pub content_height: f64,
    pub viewport_height: f64,
}

impl ScrollRegion {
    pub const fn new(content_height: f64, viewport_height: f64) -> Self {
        Self {
            content_height,
            viewport_height,
        }
    }

    /// Whether the content overflows its own viewport.
    pub fn is_scrollable(&self) -> bool {
        self.content_height > self.viewport_height
    }
}

/// Anything that can be presented as a sheet.
///
/// The engine depends only on this trait; hosts implement it for whatever
/// widget or controller they present.
pub trait PresentableSurface {
    /// Sheet configuration. Surfaces without preferences get the defaults
    /// (pinned to the top safe area, no grabber, 12pt corners).
    fn configuration(&self) -> SheetConfiguration {
        SheetConfiguration::default()
    }

    /// Measure the content at `width`. Return an intrinsic height of zero
    /// when the content cannot be measured.
    fn content_fit(&self, width: f64) -> ContentFit;

    /// The embedded scrollable region, if the content has one.
    fn scroll_region(&self) -> Option<ScrollRegion> {
        None
    }
}
