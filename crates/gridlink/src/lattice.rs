//! Lattice construction.
//!
//! A build runs in two passes:
//!
//! 1. Plan each axis, then pre-size every cell from the uniform-density
//!    estimate `N * cell_volume / box_volume * growth_margin`.
//! 2. Bucket every point into its owning cell, growing cells that fill up.
//!
//! The build is one-shot; the returned [`Lattice`] is never mutated.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::{
    Axis, LatticeConfig, LatticeError, LatticeResult,
    axis::{AxisPlan, plan_axis},
    cell::Cell,
    point::{Domain, Point, Real, to_f64},
    shape::{CellCoord, GridShape},
};

/// What to grid and how finely.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridParameters<T> {
    /// Box every point must lie in.
    pub domain: Domain<T>,
    /// Maximum search radius of the downstream neighbor search.
    pub radius: T,
    /// Per-axis oversampling `[x, y, z]`.
    pub refine: [u32; 3],
}

impl<T: Real> GridParameters<T> {
    /// Parameters with a refine factor of 1 on every axis.
    #[must_use]
    pub const fn new(domain: Domain<T>, radius: T) -> Self {
        Self {
            domain,
            radius,
            refine: [1, 1, 1],
        }
    }

    #[must_use]
    pub const fn with_refine(mut self, refine: [u32; 3]) -> Self {
        self.refine = refine;
        self
    }
}

/// Diagnostics from one build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Points bucketed.
    pub points: usize,
    /// Initial capacity given to every cell.
    pub expected_per_cell: usize,
    /// Number of times any cell had to grow.
    pub regrowths: usize,
    /// Largest cell occupancy.
    pub max_occupancy: usize,
    /// Wall-clock build time.
    pub elapsed: Duration,
}

/// A populated 3D cell lattice.
#[derive(Clone, Debug)]
pub struct Lattice<T> {
    shape: GridShape,
    axes: [AxisPlan<T>; 3],
    cells: Vec<Cell<T>>,
    stats: BuildStats,
}

impl<T: Real> Lattice<T> {
    /// Build a lattice from parallel coordinate slices.
    pub fn build(
        x: &[T],
        y: &[T],
        z: &[T],
        params: &GridParameters<T>,
        config: &LatticeConfig,
    ) -> LatticeResult<Self> {
        if x.len() != y.len() || x.len() != z.len() {
            return Err(LatticeError::LengthMismatch {
                x: x.len(),
                y: y.len(),
                z: z.len(),
            });
        }

        let points = x
            .iter()
            .zip(y)
            .zip(z)
            .map(|((&x, &y), &z)| Point::new(x, y, z));

        Self::build_from(x.len(), points, params, config)
    }

    /// Build a lattice from point records.
    pub fn from_points(
        points: &[Point<T>],
        params: &GridParameters<T>,
        config: &LatticeConfig,
    ) -> LatticeResult<Self> {
        Self::build_from(points.len(), points.iter().copied(), params, config)
    }

    fn build_from(
        n: usize,
        points: impl Iterator<Item = Point<T>>,
        params: &GridParameters<T>,
        config: &LatticeConfig,
    ) -> LatticeResult<Self> {
        let start = Instant::now();
        config.validate()?;

        let cap = config.max_cells_per_axis;
        let plan = |axis: Axis, refine: u32| {
            plan_axis(axis, *params.domain.axis(axis), params.radius, refine, cap)
        };
        let axes = [
            plan(Axis::X, params.refine[0])?,
            plan(Axis::Y, params.refine[1])?,
            plan(Axis::Z, params.refine[2])?,
        ];
        let shape = GridShape::new(axes[0].cells(), axes[1].cells(), axes[2].cells())?;

        let cell_volume = axes[0].bin_width() * axes[1].bin_width() * axes[2].bin_width();
        let fraction = to_f64(cell_volume / params.domain.volume());
        let expected_per_cell = (n as f64 * fraction * config.growth_margin) as usize;

        debug!(
            nx = shape.nx(),
            ny = shape.ny(),
            nz = shape.nz(),
            expected_per_cell,
            "allocating lattice"
        );

        let mut cells = Vec::new();
        cells.try_reserve_exact(shape.total())?;
        for _ in 0..shape.total() {
            cells.push(Cell::with_capacity(expected_per_cell)?);
        }

        let policy = config.growth_policy();
        let mut regrowths = 0;

        for (index, point) in points.enumerate() {
            let coord = locate_point(&axes, &point)
                .ok_or_else(|| out_of_domain(&axes, index, &point))?;
            let linear = shape.linear_unchecked(coord);
            if cells[linear].push(point, &policy)? {
                regrowths += 1;
            }
        }

        let stats = BuildStats {
            points: n,
            expected_per_cell,
            regrowths,
            max_occupancy: cells.iter().map(Cell::len).max().unwrap_or(0),
            elapsed: start.elapsed(),
        };

        info!(
            nx = shape.nx(),
            ny = shape.ny(),
            nz = shape.nz(),
            points = n,
            expected_per_cell,
            regrowths,
            elapsed_ms = stats.elapsed.as_secs_f64() * 1e3,
            "lattice built"
        );

        Ok(Self {
            shape,
            axes,
            cells,
            stats,
        })
    }

    /// Lattice dimensions.
    #[must_use]
    pub const fn shape(&self) -> &GridShape {
        &self.shape
    }

    /// Resolved cells per axis `[nx, ny, nz]`.
    #[must_use]
    pub const fn cell_counts(&self) -> [usize; 3] {
        self.shape.dims()
    }

    /// Binning along `axis`.
    #[must_use]
    pub const fn axis(&self, axis: Axis) -> &AxisPlan<T> {
        match axis {
            Axis::X => &self.axes[0],
            Axis::Y => &self.axes[1],
            Axis::Z => &self.axes[2],
        }
    }

    /// Cell widths `[dx, dy, dz]`.
    #[must_use]
    pub fn bin_widths(&self) -> [T; 3] {
        self.axes.map(|a| a.bin_width())
    }

    /// Cell at `coord`, or `None` if out of range.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<&Cell<T>> {
        self.shape.linear(coord).map(|i| &self.cells[i])
    }

    /// All cells in linear order.
    #[must_use]
    pub fn cells(&self) -> &[Cell<T>] {
        &self.cells
    }

    /// Cells paired with their coordinates, in linear order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &Cell<T>)> {
        self.shape.coords().zip(&self.cells)
    }

    /// Total number of points stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.iter().map(Cell::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }

    /// Cell a point belongs to, using the same arithmetic as the build.
    #[must_use]
    pub fn locate(&self, point: &Point<T>) -> Option<CellCoord> {
        locate_point(&self.axes, point)
    }

    /// Diagnostics recorded during the build.
    #[must_use]
    pub const fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Take ownership of the cells.
    #[must_use]
    pub fn into_cells(self) -> (GridShape, Vec<Cell<T>>) {
        (self.shape, self.cells)
    }
}

fn locate_point<T: Real>(axes: &[AxisPlan<T>; 3], point: &Point<T>) -> Option<CellCoord> {
    Some(CellCoord {
        x: axes[0].locate(point.x)?,
        y: axes[1].locate(point.y)?,
        z: axes[2].locate(point.z)?,
    })
}

fn out_of_domain<T: Real>(axes: &[AxisPlan<T>; 3], index: usize, point: &Point<T>) -> LatticeError {
    LatticeError::OutOfDomain {
        index,
        x: to_f64(point.x),
        y: to_f64(point.y),
        z: to_f64(point.z),
        ix: axes[0].raw_index(point.x),
        iy: axes[1].raw_index(point.y),
        iz: axes[2].raw_index(point.z),
    }
}
