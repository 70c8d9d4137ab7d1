#![forbid(unsafe_code)]

//! Frame resolution for the presented sheet.
//!
//! [`resolve_frame`] is a pure function of the sizing mode, a snapshot of the
//! container geometry, and the content's measured fit. It runs on every
//! layout pass; nothing here is cached.
//!
//! # Invariants
//!
//! - The resolved height never exceeds the pinned frame's height
//!   (`container height - top safe-area inset`). Every mode falls back to
//!   exactly the pinned frame when it would be taller.
//! - Resolved frames span the container's full width and are anchored to its
//!   bottom edge.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Adaptive with no content to measure | `Rect::ZERO` (no-op layout) |
//! | Intrinsic height measures as zero | Treated as the maximum height (pinned frame) |
//! | Top inset taller than the container | Pinned height clamps to zero |
//! | Negative or non-finite fixed height | Clamped to zero |

use sheetkit_core::geometry::{Insets, Rect};

use crate::config::SizingMode;

/// Snapshot of the hosting surface, taken at each layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerGeometry {
    pub bounds: Rect,
    pub safe_area: Insets,
}

impl ContainerGeometry {
    pub const fn new(bounds: Rect, safe_area: Insets) -> Self {
        Self { bounds, safe_area }
    }

    /// Height available to a sheet pinned to the top safe area.
    pub fn max_sheet_height(&self) -> f64 {
        (self.bounds.height - self.safe_area.top).max(0.0)
    }
}

/// Measured size of the presented content for the current width.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContentFit {
    /// Natural height of the content at the container's width. Zero means
    /// the content could not be measured.
    pub intrinsic_height: f64,
    /// Full content height of an embedded scrollable region, if any.
    ///
    /// Scrollable regions under-report their intrinsic size, so their whole
    /// content height is added on top of the fitted height.
    pub scroll_content_height: Option<f64>,
}

impl ContentFit {
    pub const fn new(intrinsic_height: f64) -> Self {
        Self {
            intrinsic_height,
            scroll_content_height: None,
        }
    }

    pub const fn with_scroll_content(mut self, height: f64) -> Self {
        self.scroll_content_height = Some(height);
        self
    }
}

/// Frame for a sheet whose top edge sits on the top safe-area inset.
pub fn pinned_frame(container: &ContainerGeometry) -> Rect {
    let bounds = container.bounds;
    let top = container.safe_area.top.clamp(0.0, bounds.height.max(0.0));
    Rect::new(
        bounds.x,
        bounds.y + top,
        bounds.width,
        container.max_sheet_height(),
    )
}

/// Resolve the presented frame for `mode`.
///
/// `fit` is only consulted for [`SizingMode::Adaptive`]; pass `None` when the
/// presented content is gone (e.g. during teardown).
pub fn resolve_frame(
    mode: SizingMode,
    container: &ContainerGeometry,
    fit: Option<&ContentFit>,
) -> Rect {
    match mode {
        SizingMode::PinnedToTopSafeArea => pinned_frame(container),
        SizingMode::Fixed { height } => bottom_anchored(container, sanitize(height)),
        SizingMode::Adaptive => match fit {
            Some(fit) => bottom_anchored(container, adaptive_height(container, fit)),
            None => Rect::ZERO,
        },
    }
}

fn adaptive_height(container: &ContainerGeometry, fit: &ContentFit) -> f64 {
    let intrinsic = sanitize(fit.intrinsic_height);
    // Unmeasurable content fails open to full height.
    let intrinsic = if intrinsic == 0.0 {
        container.max_sheet_height()
    } else {
        intrinsic
    };
    let scroll = fit.scroll_content_height.map_or(0.0, sanitize);
    intrinsic + scroll + container.safe_area.bottom.max(0.0)
}

fn bottom_anchored(container: &ContainerGeometry, height: f64) -> Rect {
    let pinned = pinned_frame(container);
    if height > pinned.height {
        return pinned;
    }
    let bounds = container.bounds;
    Rect::new(bounds.x, bounds.max_y() - height, bounds.width, height)
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn phone() -> ContainerGeometry {
        ContainerGeometry::new(
            Rect::new(0.0, 0.0, 375.0, 800.0),
            Insets::vertical(44.0, 20.0),
        )
    }

    #[test]
    fn pinned_starts_at_top_inset() {
        let frame = resolve_frame(SizingMode::PinnedToTopSafeArea, &phone(), None);
        assert_eq!(frame, Rect::new(0.0, 44.0, 375.0, 756.0));
    }

    #[test]
    fn adaptive_adds_bottom_inset() {
        let fit = ContentFit::new(300.0);
        let frame = resolve_frame(SizingMode::Adaptive, &phone(), Some(&fit));
        assert_eq!(frame, Rect::new(0.0, 480.0, 375.0, 320.0));
    }

    #[test]
    fn adaptive_adds_scroll_content() {
        let fit = ContentFit::new(100.0).with_scroll_content(200.0);
        let frame = resolve_frame(SizingMode::Adaptive, &phone(), Some(&fit));
        assert_eq!(frame.height, 320.0);
        assert_eq!(frame.y, 480.0);
    }

    #[test]
    fn adaptive_too_tall_falls_back_to_pinned() {
        let fit = ContentFit::new(100.0).with_scroll_content(2_000.0);
        let frame = resolve_frame(SizingMode::Adaptive, &phone(), Some(&fit));
        assert_eq!(frame, pinned_frame(&phone()));
    }

    #[test]
    fn adaptive_unmeasurable_fails_open() {
        let fit = ContentFit::new(0.0);
        let frame = resolve_frame(SizingMode::Adaptive, &phone(), Some(&fit));
        assert_eq!(frame, pinned_frame(&phone()));
    }

    #[test]
    fn adaptive_without_content_is_zero() {
        assert_eq!(resolve_frame(SizingMode::Adaptive, &phone(), None), Rect::ZERO);
    }

    #[test]
    fn fixed_fits() {
        let frame = resolve_frame(SizingMode::Fixed { height: 480.0 }, &phone(), None);
        assert_eq!(frame, Rect::new(0.0, 320.0, 375.0, 480.0));
    }

    #[test]
    fn fixed_too_tall_is_exactly_pinned() {
        let frame = resolve_frame(SizingMode::Fixed { height: 900.0 }, &phone(), None);
        assert_eq!(frame, pinned_frame(&phone()));
    }

    #[test]
    fn fixed_at_limit_is_kept() {
        let frame = resolve_frame(SizingMode::Fixed { height: 756.0 }, &phone(), None);
        assert_eq!(frame, Rect::new(0.0, 44.0, 375.0, 756.0));
    }

    #[test]
    fn degenerate_container() {
        let container = ContainerGeometry::new(
            Rect::new(0.0, 0.0, 100.0, 30.0),
            Insets::vertical(44.0, 0.0),
        );
        let frame = resolve_frame(SizingMode::PinnedToTopSafeArea, &container, None);
        assert_eq!(frame.height, 0.0);
        assert_eq!(frame.y, 30.0);
        let frame = resolve_frame(SizingMode::Fixed { height: f64::NAN }, &container, None);
        assert_eq!(frame.height, 0.0);
    }

    #[test]
    fn offset_container_anchors_to_its_bottom() {
        let container = ContainerGeometry::new(
            Rect::new(10.0, 100.0, 300.0, 600.0),
            Insets::vertical(20.0, 10.0),
        );
        let frame = resolve_frame(SizingMode::Fixed { height: 200.0 }, &container, None);
        assert_eq!(frame, Rect::new(10.0, 500.0, 300.0, 200.0));
    }

    fn any_mode() -> impl Strategy<Value = SizingMode> {
        prop_oneof![
            Just(SizingMode::Adaptive),
            Just(SizingMode::PinnedToTopSafeArea),
            (-100.0f64..3000.0).prop_map(|height| SizingMode::Fixed { height }),
        ]
    }

    proptest! {
        #[test]
        fn never_taller_than_pinned(
            mode in any_mode(),
            height in 0.0f64..2000.0,
            top in 0.0f64..200.0,
            bottom in 0.0f64..100.0,
            intrinsic in 0.0f64..3000.0,
            scroll in proptest::option::of(0.0f64..3000.0),
        ) {
            let container = ContainerGeometry::new(
                Rect::new(0.0, 0.0, 390.0, height),
                Insets::vertical(top, bottom),
            );
            let fit = ContentFit { intrinsic_height: intrinsic, scroll_content_height: scroll };
            let frame = resolve_frame(mode, &container, Some(&fit));
            let pinned = pinned_frame(&container);
            prop_assert!(frame.height <= pinned.height);
            prop_assert!(frame.height >= 0.0);
            prop_assert!(frame.max_y() <= container.bounds.max_y() + 1e-9);
        }

        #[test]
        fn adaptive_height_is_content_plus_inset(
            intrinsic in 1.0f64..400.0,
            scroll in proptest::option::of(0.0f64..200.0),
        ) {
            let container = phone();
            let fit = ContentFit { intrinsic_height: intrinsic, scroll_content_height: scroll };
            let frame = resolve_frame(SizingMode::Adaptive, &container, Some(&fit));
            let expected = intrinsic + scroll.unwrap_or(0.0) + 20.0;
            prop_assert!((frame.height - expected).abs() < 1e-9);
        }
    }
}
