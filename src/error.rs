// src/error.rs
use thiserror::Error;
use trellis_layout::LayoutError;
use trellis_style::DimensionError;

/// The error type for every fallible operation exposed by `trellis`.
#[derive(Error, Debug)]
pub enum TrellisError {
    #[error("Dimension error: {0}")]
    Dimension(#[from] DimensionError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// A failure reported by a caller's measurement that has no typed variant.
    #[error("Measurement failed: {0}")]
    Measurement(String),
}
