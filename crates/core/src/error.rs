//! Error types for grid construction.

use thiserror::Error;

use crate::types::{MAX_DIMENSION, MIN_DIMENSION};

/// Grid errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// Requested size is outside `[MIN_DIMENSION, MAX_DIMENSION]` on at least one axis.
    #[error(
        "Invalid grid dimensions {rows}x{cols}: rows and cols must be within {min}..={max}",
        min = MIN_DIMENSION,
        max = MAX_DIMENSION
    )]
    InvalidDimensions { rows: i64, cols: i64 },
}
