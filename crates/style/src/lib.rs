pub mod dimension;
pub mod parsers;

pub use dimension::{Dimension, DimensionUnit, LayoutSize, resolve_dimension, resolve_size};
pub use parsers::DimensionError;
