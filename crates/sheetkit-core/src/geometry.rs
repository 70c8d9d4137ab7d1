#![forbid(unsafe_code)]

//! Geometric primitives in logical points.
//!
//! Coordinates follow the usual top-left origin convention: `y` grows
//! downward, so "below the container" means a larger `y`.

use bitflags::bitflags;

/// A point in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Edge insets, e.g. the safe area of a hosting surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Insets {
    pub const ZERO: Self = Self {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    #[inline]
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Insets with only top and bottom set (the common portrait case).
    #[inline]
    pub const fn vertical(top: f64, bottom: f64) -> Self {
        Self::new(top, 0.0, bottom, 0.0)
    }
}

/// An axis-aligned rectangle: origin plus size.
///
/// Widths and heights are expected to be non-negative; constructors do not
/// normalize, but [`Rect::inset`] never produces negative extents.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// The zero rectangle, used as the "no layout" frame.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Create a rectangle from origin and size components.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Top-left corner.
    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Top edge.
    #[inline]
    pub fn min_y(&self) -> f64 {
        self.y
    }

    /// Bottom edge.
    #[inline]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Right edge.
    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True when either extent is zero or negative.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Same size, moved so its center sits at `center`.
    pub fn with_center(self, center: Point) -> Self {
        Self::new(
            center.x - self.width / 2.0,
            center.y - self.height / 2.0,
            self.width,
            self.height,
        )
    }

    /// Same size, moved vertically to `y`.
    #[inline]
    pub fn with_y(self, y: f64) -> Self {
        Self { y, ..self }
    }

    /// Same origin, height replaced.
    #[inline]
    pub fn with_height(self, height: f64) -> Self {
        Self { height, ..self }
    }

    /// Shrink by `insets`, clamping extents at zero.
    pub fn inset(self, insets: Insets) -> Self {
        Self::new(
            self.x + insets.left,
            self.y + insets.top,
            (self.width - insets.left - insets.right).max(0.0),
            (self.height - insets.top - insets.bottom).max(0.0),
        )
    }

    /// Component-wise linear interpolation; `t = 0` yields `self`.
    pub fn lerp(self, to: Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self::new(
            mix(self.x, to.x),
            mix(self.y, to.y),
            mix(self.width, to.width),
            mix(self.height, to.height),
        )
    }
}

bitflags! {
    /// Which corners of a layer receive the corner radius.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CornerMask: u8 {
        const TOP_LEFT = 0b0001;
        const TOP_RIGHT = 0b0010;
        const BOTTOM_LEFT = 0b0100;
        const BOTTOM_RIGHT = 0b1000;
        const TOP = Self::TOP_LEFT.bits() | Self::TOP_RIGHT.bits();
        const ALL = Self::TOP.bits() | Self::BOTTOM_LEFT.bits() | Self::BOTTOM_RIGHT.bits();
    }
}

impl Default for CornerMask {
    fn default() -> Self {
        Self::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn inset_clamps_at_zero() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0).inset(Insets::new(8.0, 6.0, 8.0, 6.0));
        assert_eq!(r, Rect::new(6.0, 8.0, 0.0, 0.0));
        assert!(r.is_empty());
    }

    #[test]
    fn with_center_keeps_size() {
        let r = Rect::new(0.0, 0.0, 100.0, 40.0).with_center(Point::new(50.0, 780.0));
        assert_eq!(r, Rect::new(0.0, 760.0, 100.0, 40.0));
        assert_eq!(r.max_y(), 800.0);
    }

    #[test]
    fn lerp_endpoints() {
        let a = Rect::new(0.0, 480.0, 375.0, 320.0);
        let b = a.with_y(800.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5).y, 640.0);
    }

    #[test]
    fn corner_mask_top_is_both_top_corners() {
        assert!(CornerMask::TOP.contains(CornerMask::TOP_LEFT | CornerMask::TOP_RIGHT));
        assert!(!CornerMask::TOP.intersects(CornerMask::BOTTOM_LEFT));
    }

    proptest! {
        #[test]
        fn inset_never_grows(
            w in 0.0f64..2000.0,
            h in 0.0f64..2000.0,
            top in 0.0f64..300.0,
            bottom in 0.0f64..300.0,
        ) {
            let r = Rect::new(0.0, 0.0, w, h).inset(Insets::vertical(top, bottom));
            prop_assert!(r.height <= h);
            prop_assert!(r.height >= 0.0);
            prop_assert_eq!(r.width, w);
        }
    }
}
