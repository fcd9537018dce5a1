//! Constrained-size resolution core for retained-mode UI layout.
//!
//! The pieces live in small foundation crates and are re-exported here:
//! geometry and trait snapshots from `trellis-types`, dimensions from
//! `trellis-style`, and contexts, caching and propagation from
//! `trellis-layout`. [`LayoutSession`] ties the cache protocol together.

pub mod error;
pub mod session;

pub use error::TrellisError;
pub use session::LayoutSession;

pub use trellis_layout::{
    CacheState, DebugProfiler, LayoutCacheEntry, LayoutCacheSlot, LayoutConfig, LayoutContext,
    LayoutContextBuilder, LayoutElement, LayoutError, LayoutVersion, NoOpProfiler, Profiler,
    SIGNIFICANT_AREA_THRESHOLD, StaleReason, propagate_traits_down,
};
pub use trellis_style::{
    Dimension, DimensionError, DimensionUnit, LayoutSize, resolve_dimension, resolve_size,
};
pub use trellis_types::{
    Axis, ForceTouchCapability, InterfaceIdiom, Point, Rect, Size, SizeClass, TraitSnapshot,
    points_valid_for_layout, position_points_valid_for_layout, position_valid_for_layout,
    rect_valid_for_layout, size_valid_for_layout,
};
