//! All kinds of errors in this crate.

use displaydoc::Display;
use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Clone, Debug, PartialEq, Display, Error)]
pub enum Error {
    /// Cell ({column}, {row}) lies outside the {columns}x{rows} grid.
    OutOfBounds {
        column: usize,
        row: usize,
        columns: usize,
        rows: usize,
    },
    /// Cell ({column}, {row}) must not have negative coordinates.
    NegativeCoordinate { column: isize, row: isize },
    /// Grid dimensions {columns}x{rows} must be positive and within the supported maximum.
    InvalidDimensions { columns: usize, rows: usize },
    /// Density must lie within [0, 1], got {0}.
    InvalidDensity(f64),
    /// Grid {columns}x{rows} is too small for shape {name} ({width}x{height}).
    PatternTooLarge {
        name: String,
        width: usize,
        height: usize,
        columns: usize,
        rows: usize,
    },
}

impl Error {
    /// Whether the error reports a bad argument rather than a rejected operation.
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(self, Error::PatternTooLarge { .. })
    }
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, Error>;
