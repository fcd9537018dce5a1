use thiserror::Error;
use trellis_types::Axis;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("inverted {axis} range: min {min} > max {max}")]
    InvalidRange { axis: Axis, min: f32, max: f32 },
    #[error("invalid layout bound {field} = {value}")]
    InvalidBound { field: &'static str, value: f32 },
}

pub mod cache;
pub mod config;
pub mod context;
pub mod perf;
pub mod propagation;

pub use self::cache::{CacheState, LayoutCacheEntry, LayoutCacheSlot, LayoutVersion, StaleReason};
pub use self::config::LayoutConfig;
pub use self::context::{LayoutContext, LayoutContextBuilder, SIGNIFICANT_AREA_THRESHOLD};
pub use self::perf::{DebugProfiler, NoOpProfiler, Profiler};
pub use self::propagation::{LayoutElement, propagate_traits_down};

// Re-export the value types that appear in this crate's signatures
pub use trellis_types::{Size, TraitSnapshot};

#[cfg(test)]
mod test_utils;
