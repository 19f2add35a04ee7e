//! Uniform 3D cell lattice for radius-bounded neighbor searches.
//!
//! Points are bucketed into a grid of cells whose widths are derived from the
//! search radius, so a pair counter only has to compare points in nearby
//! cells instead of all N² pairs.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  plan_axis (x3)                                              │
//! │    - cells = clamp(floor(refine * extent / radius), 1, cap)  │
//! │    - bin_width = extent / cells                              │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Lattice::build                                              │
//! │    - nx*ny*nz cells pre-sized from expected density          │
//! │    - one pass: point -> (ix, iy, iz) -> linear -> push       │
//! │    - full cells grow by GrowthPolicy                         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use gridlink::{Domain, GridParameters, Lattice, LatticeConfig};
//!
//! let x = [0.0, 9.9, 5.0];
//! let params = GridParameters::new(Domain::cube(0.0, 10.0), 5.0);
//! let lattice = Lattice::build(&x, &x, &x, &params, &LatticeConfig::default())?;
//!
//! assert_eq!(lattice.cell_counts(), [2, 2, 2]);
//! assert_eq!(lattice.len(), 3);
//! # Ok::<(), gridlink::LatticeError>(())
//! ```

pub mod axis;
pub mod cell;
pub mod config;
mod error;
pub mod lattice;
pub mod point;
pub mod shape;

pub use axis::{AxisPlan, plan_axis};
pub use cell::{Cell, GrowthPolicy};
pub use config::LatticeConfig;
pub use error::{Axis, LatticeError, LatticeResult};
pub use lattice::{BuildStats, GridParameters, Lattice};
pub use point::{AxisBounds, Domain, Point, Real};
pub use shape::{CellCoord, GridShape};
