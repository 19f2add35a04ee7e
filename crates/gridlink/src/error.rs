//! Lattice error types.

use std::{collections::TryReserveError, fmt};

use thiserror::Error;

/// One of the three lattice axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in storage order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        };
        f.write_str(name)
    }
}

/// Lattice error type.
#[derive(Debug, Error)]
pub enum LatticeError {
    /// Axis bounds are non-finite or `max <= min`.
    #[error("invalid {axis} bounds: [{min}, {max}]")]
    InvalidBounds { axis: Axis, min: f64, max: f64 },

    /// Search radius is non-finite or not positive.
    #[error("invalid search radius: {0}")]
    InvalidRadius(f64),

    /// Refine factor of zero on an axis.
    #[error("refine factor on {axis} must be at least 1")]
    InvalidRefineFactor { axis: Axis },

    /// A build configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),

    /// Coordinate slices passed to the builder differ in length.
    #[error("coordinate length mismatch: x={x}, y={y}, z={z}")]
    LengthMismatch { x: usize, y: usize, z: usize },

    /// `nx * ny * nz` does not fit in `usize`.
    #[error("cell count overflow: {nx} x {ny} x {nz}")]
    CellCountOverflow { nx: usize, ny: usize, nz: usize },

    /// A point lies outside the declared domain.
    #[error(
        "point {index} at ({x}, {y}, {z}) is outside the domain (cell indices {ix}, {iy}, {iz})"
    )]
    OutOfDomain {
        index: usize,
        x: f64,
        y: f64,
        z: f64,
        ix: i64,
        iy: i64,
        iz: i64,
    },

    /// Cell storage could not be allocated.
    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
}

impl LatticeError {
    /// Whether the error is unrecoverable resource exhaustion.
    ///
    /// Fatal errors should not be retried: the same batch needs the same memory.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Allocation(_))
    }
}

/// Result type for lattice operations.
pub type LatticeResult<T> = Result<T, LatticeError>;
