//! Build configuration.

use serde::{Deserialize, Serialize};

use crate::{LatticeError, LatticeResult, cell::GrowthPolicy};

/// Default cap on cells per axis.
pub const DEFAULT_MAX_CELLS_PER_AXIS: usize = 100;

/// Default oversampling of the initial per-cell capacity.
pub const DEFAULT_GROWTH_MARGIN: f64 = 1.2;

/// Default multiplicative growth of a full cell.
pub const DEFAULT_GROWTH_FACTOR: f64 = 1.2;

/// Default growth increment when the multiplicative step makes no progress.
pub const DEFAULT_MIN_GROWTH: usize = 3;

/// Tunables for the lattice build.
///
/// Every field has a serde default, so a partial JSON document such as
/// `{"max_cells_per_axis": 64}` is a valid config.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    /// Hard cap on cells along any one axis.
    pub max_cells_per_axis: usize,
    /// Multiplier on the uniform-density estimate used to pre-size cells.
    pub growth_margin: f64,
    /// Multiplier applied to a full cell's capacity.
    pub growth_factor: f64,
    /// Fallback increment for small capacities.
    pub min_growth: usize,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            max_cells_per_axis: DEFAULT_MAX_CELLS_PER_AXIS,
            growth_margin: DEFAULT_GROWTH_MARGIN,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            min_growth: DEFAULT_MIN_GROWTH,
        }
    }
}

impl LatticeConfig {
    #[must_use]
    pub const fn with_max_cells_per_axis(mut self, cap: usize) -> Self {
        self.max_cells_per_axis = cap;
        self
    }

    #[must_use]
    pub const fn with_growth_margin(mut self, margin: f64) -> Self {
        self.growth_margin = margin;
        self
    }

    #[must_use]
    pub const fn with_growth_factor(mut self, factor: f64) -> Self {
        self.growth_factor = factor;
        self
    }

    #[must_use]
    pub const fn with_min_growth(mut self, increment: usize) -> Self {
        self.min_growth = increment;
        self
    }

    /// Check every field is in range.
    pub fn validate(&self) -> LatticeResult<()> {
        if self.max_cells_per_axis == 0 {
            return Err(LatticeError::InvalidConfig("max_cells_per_axis must be at least 1"));
        }
        if !self.growth_margin.is_finite() || self.growth_margin < 1.0 {
            return Err(LatticeError::InvalidConfig("growth_margin must be finite and >= 1"));
        }
        if !self.growth_factor.is_finite() || self.growth_factor <= 1.0 {
            return Err(LatticeError::InvalidConfig("growth_factor must be finite and > 1"));
        }
        if self.min_growth == 0 {
            return Err(LatticeError::InvalidConfig("min_growth must be at least 1"));
        }
        Ok(())
    }

    /// Growth policy for full cells.
    #[must_use]
    pub const fn growth_policy(&self) -> GrowthPolicy {
        GrowthPolicy {
            factor: self.growth_factor,
            min_increment: self.min_growth,
        }
    }
}
