//! Per-axis bin sizing.
//!
//! Each axis is cut into `floor(refine * extent / radius)` equal bins, capped
//! at the configured maximum and never fewer than one. With `refine = 1` a
//! bin is at least one radius wide, so the 3x3x3 block around a point's cell
//! covers its whole search sphere. Larger refine factors shrink the bins and
//! widen the block a search must visit to `2 * refine + 1` cells per axis.

use tracing::debug;

use crate::{
    Axis, LatticeError, LatticeResult,
    point::{AxisBounds, Real, to_f64},
};

/// Cast a cell count into the coordinate type.
pub(crate) fn from_usize<T: Real>(n: usize) -> T {
    T::from(n).unwrap_or_else(T::max_value)
}

/// Resolved binning for one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisPlan<T> {
    bounds: AxisBounds<T>,
    cells: usize,
    bin_width: T,
    inv_width: T,
}

impl<T: Real> AxisPlan<T> {
    /// Bounds this plan covers.
    #[must_use]
    pub const fn bounds(&self) -> &AxisBounds<T> {
        &self.bounds
    }

    /// Number of cells along the axis, in `[1, cap]`.
    #[must_use]
    pub const fn cells(&self) -> usize {
        self.cells
    }

    /// Width of one cell.
    #[must_use]
    pub const fn bin_width(&self) -> T {
        self.bin_width
    }

    /// Unclamped `floor((coord - min) / bin_width)`.
    ///
    /// Saturates to `i64::MAX`/`i64::MIN` for coordinates far outside the
    /// bounds; NaN maps to `i64::MIN`.
    #[must_use]
    pub fn raw_index(&self, coord: T) -> i64 {
        let scaled = ((coord - self.bounds.min) * self.inv_width).floor();
        scaled.to_i64().unwrap_or(if scaled > T::zero() {
            i64::MAX
        } else {
            i64::MIN
        })
    }

    /// Cell index owning `coord`, or `None` if `coord` is outside the bounds.
    ///
    /// A coordinate on the upper bound belongs to the last cell.
    #[must_use]
    pub fn locate(&self, coord: T) -> Option<usize> {
        if !self.bounds.contains(coord) {
            return None;
        }

        match usize::try_from(self.raw_index(coord)) {
            Ok(i) if i < self.cells => Some(i),
            Ok(i) if i == self.cells => Some(i - 1),
            _ => None,
        }
    }
}

/// Choose the cell count and bin width for one axis.
///
/// `cells = max(1, min(floor(refine * extent / radius), cap))` and
/// `bin_width = extent / cells`.
pub fn plan_axis<T: Real>(
    axis: Axis,
    bounds: AxisBounds<T>,
    radius: T,
    refine: u32,
    cap: usize,
) -> LatticeResult<AxisPlan<T>> {
    bounds.validate(axis)?;
    if !radius.is_finite() || radius <= T::zero() {
        return Err(LatticeError::InvalidRadius(to_f64(radius)));
    }
    if refine == 0 {
        return Err(LatticeError::InvalidRefineFactor { axis });
    }
    if cap == 0 {
        return Err(LatticeError::InvalidConfig("max_cells_per_axis must be at least 1"));
    }

    let extent = bounds.extent();
    let refine_t = T::from(refine).unwrap_or_else(T::one);
    let ideal = (refine_t * extent / radius)
        .floor()
        .to_usize()
        .unwrap_or(usize::MAX);

    let cells = if ideal == 0 {
        debug!(
            %axis,
            extent = to_f64(extent),
            radius = to_f64(radius),
            "radius exceeds refined extent, using one cell"
        );
        1
    } else if ideal > cap {
        debug!(%axis, ideal, cap, "cell count capped");
        cap
    } else {
        ideal
    };

    let bin_width = extent / from_usize::<T>(cells);
    let inv_width = T::one() / bin_width;
    if !bin_width.is_finite() || !inv_width.is_finite() || bin_width <= T::zero() {
        return Err(LatticeError::InvalidBounds {
            axis,
            min: to_f64(bounds.min),
            max: to_f64(bounds.max),
        });
    }

    Ok(AxisPlan {
        bounds,
        cells,
        bin_width,
        inv_width,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(min: f64, max: f64, radius: f64, refine: u32, cap: usize) -> AxisPlan<f64> {
        plan_axis(Axis::X, AxisBounds::new(min, max), radius, refine, cap).unwrap()
    }

    #[test]
    fn test_plan_basic() {
        let p = plan(0.0, 10.0, 5.0, 1, 100);
        assert_eq!(p.cells(), 2);
        assert_eq!(p.bin_width(), 5.0);
    }

    #[test]
    fn test_refine_multiplies_cells() {
        let p = plan(0.0, 100.0, 10.0, 3, 100);
        assert_eq!(p.cells(), 30);
        assert!((p.bin_width() * 30.0 - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_cap_applies() {
        let p = plan(0.0, 1000.0, 1.0, 2, 100);
        assert_eq!(p.cells(), 100);
        assert_eq!(p.bin_width(), 10.0);
    }

    #[test]
    fn test_radius_larger_than_extent_floors_to_one() {
        let p = plan(-1.0, 1.0, 25.0, 1, 100);
        assert_eq!(p.cells(), 1);
        assert_eq!(p.bin_width(), 2.0);
    }

    #[test]
    fn test_fractional_ratio_truncates() {
        // 10 / 3 = 3.33 -> 3 cells
        let p = plan(0.0, 10.0, 3.0, 1, 100);
        assert_eq!(p.cells(), 3);
        assert!((p.bin_width() * 3.0 - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_inputs() {
        let b = AxisBounds::new(0.0, 10.0);
        assert!(matches!(
            plan_axis(Axis::Y, b, 0.0, 1, 100),
            Err(LatticeError::InvalidRadius(_))
        ));
        assert!(matches!(
            plan_axis(Axis::Y, b, f64::NAN, 1, 100),
            Err(LatticeError::InvalidRadius(_))
        ));
        assert!(matches!(
            plan_axis(Axis::Z, b, 1.0, 0, 100),
            Err(LatticeError::InvalidRefineFactor { axis: Axis::Z })
        ));
        assert!(matches!(
            plan_axis(Axis::X, b, 1.0, 1, 0),
            Err(LatticeError::InvalidConfig(_))
        ));
        assert!(matches!(
            plan_axis(Axis::X, AxisBounds::new(3.0, 3.0), 1.0, 1, 10),
            Err(LatticeError::InvalidBounds { axis: Axis::X, .. })
        ));
    }

    #[test]
    fn test_unrepresentable_bin_width_rejected() {
        // Subnormal extent: 1 / bin_width overflows.
        assert!(matches!(
            plan_axis(Axis::Y, AxisBounds::new(0.0, 1e-310), 1.0, 1, 100),
            Err(LatticeError::InvalidBounds { axis: Axis::Y, .. })
        ));
        // Extent overflows to infinity.
        assert!(matches!(
            plan_axis(Axis::X, AxisBounds::new(-1e308, 1e308), 1.0, 1, 100),
            Err(LatticeError::InvalidBounds { axis: Axis::X, .. })
        ));
    }

    #[test]
    fn test_wide_finite_extent_places_bounds() {
        let p = plan(-1e307, 1e307, 1e305, 1, 100);
        assert_eq!(p.cells(), 100);
        assert!(p.bin_width().is_finite());
        assert_eq!(p.locate(-1e307), Some(0));
        assert_eq!(p.locate(1e307), Some(99));
        assert_eq!(p.locate(1.5e305), Some(50));
    }

    #[test]
    fn test_locate() {
        let p = plan(0.0, 10.0, 5.0, 1, 100);
        assert_eq!(p.locate(0.0), Some(0));
        assert_eq!(p.locate(4.999), Some(0));
        assert_eq!(p.locate(5.0), Some(1));
        assert_eq!(p.locate(9.9), Some(1));
        assert_eq!(p.locate(10.0), Some(1));
        assert_eq!(p.locate(-0.001), None);
        assert_eq!(p.locate(10.001), None);
        assert_eq!(p.locate(f64::NAN), None);
    }

    #[test]
    fn test_raw_index_saturates() {
        let p = plan(0.0, 10.0, 5.0, 1, 100);
        assert_eq!(p.raw_index(-0.5), -1);
        assert_eq!(p.raw_index(10.0), 2);
        assert_eq!(p.raw_index(1e300), i64::MAX);
        assert_eq!(p.raw_index(-1e300), i64::MIN);
        assert_eq!(p.raw_index(f64::NAN), i64::MIN);
    }

    #[test]
    fn test_upper_bound_lands_in_last_cell_f32() {
        let p = plan_axis(Axis::X, AxisBounds::new(0.1_f32, 0.7), 0.013, 2, 100).unwrap();
        assert_eq!(p.locate(0.7), Some(p.cells() - 1));
        assert_eq!(p.locate(0.1), Some(0));
    }
}
