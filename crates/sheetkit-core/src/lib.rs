#![forbid(unsafe_code)]

//! Core primitives for sheetkit.
//!
//! This crate holds the host-independent vocabulary shared by the
//! presentation engine and its hosts:
//!
//! - [`geometry`]: points, sizes, rectangles, and edge insets in logical points.
//! - [`event`]: pan-gesture and scroll-view input as delivered by a host.
//! - [`time`]: a frame clock for turning wall time into animation ticks.

pub mod event;
pub mod geometry;
pub mod time;

pub use event::{GesturePhase, PanEvent, ScrollEvent};
pub use geometry::{CornerMask, Insets, Point, Rect, Size};
pub use time::{FrameClock, Instant};
