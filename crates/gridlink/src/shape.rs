//! Flattened 3D cell indexing.
//!
//! Cells are stored x-major: `linear = ix * (ny * nz) + iy * nz + iz`.
//!
//! ```text
//!   linear:  0      1      ..  nz-1       nz     ..
//!   coord:  (0,0,0)(0,0,1) .. (0,0,nz-1) (0,1,0) ..
//! ```

use crate::{LatticeError, LatticeResult};

/// Integer cell coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl CellCoord {
    #[must_use]
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }
}

impl From<[usize; 3]> for CellCoord {
    fn from([x, y, z]: [usize; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Lattice dimensions in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridShape {
    nx: usize,
    ny: usize,
    nz: usize,
    total: usize,
}

impl GridShape {
    /// Create a shape, checking that `nx * ny * nz` fits in `usize`.
    pub fn new(nx: usize, ny: usize, nz: usize) -> LatticeResult<Self> {
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(LatticeError::InvalidConfig("every axis needs at least one cell"));
        }

        let total = nx
            .checked_mul(ny)
            .and_then(|t| t.checked_mul(nz))
            .ok_or(LatticeError::CellCountOverflow { nx, ny, nz })?;

        Ok(Self { nx, ny, nz, total })
    }

    /// Cells per axis as `[nx, ny, nz]`.
    #[must_use]
    pub const fn dims(&self) -> [usize; 3] {
        [self.nx, self.ny, self.nz]
    }

    #[must_use]
    pub const fn nx(&self) -> usize {
        self.nx
    }

    #[must_use]
    pub const fn ny(&self) -> usize {
        self.ny
    }

    #[must_use]
    pub const fn nz(&self) -> usize {
        self.nz
    }

    /// Total number of cells.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Whether `coord` addresses a cell of this shape.
    #[must_use]
    pub const fn contains(&self, coord: CellCoord) -> bool {
        coord.x < self.nx && coord.y < self.ny && coord.z < self.nz
    }

    /// Linear index of `coord`, or `None` if it is out of range.
    #[must_use]
    pub const fn linear(&self, coord: CellCoord) -> Option<usize> {
        if self.contains(coord) {
            Some(self.linear_unchecked(coord))
        } else {
            None
        }
    }

    /// Linear index of an in-range `coord`.
    ///
    /// Out-of-range coordinates alias other cells or exceed `total`.
    #[must_use]
    pub const fn linear_unchecked(&self, coord: CellCoord) -> usize {
        coord.x * (self.ny * self.nz) + coord.y * self.nz + coord.z
    }

    /// Inverse of [`GridShape::linear`].
    #[must_use]
    pub const fn coord_of(&self, linear: usize) -> Option<CellCoord> {
        if linear >= self.total {
            return None;
        }
        let plane = self.ny * self.nz;
        Some(CellCoord {
            x: linear / plane,
            y: (linear % plane) / self.nz,
            z: linear % self.nz,
        })
    }

    /// All coordinates in linear order.
    pub fn coords(&self) -> impl Iterator<Item = CellCoord> + use<> {
        let (ny, nz) = (self.ny, self.nz);
        (0..self.nx).flat_map(move |x| {
            (0..ny).flat_map(move |y| (0..nz).map(move |z| CellCoord { x, y, z }))
        })
    }
}
