//! Points and domain bounds.

use std::fmt::{Debug, Display};

use num_traits::Float;

use crate::{Axis, LatticeError, LatticeResult};

/// Coordinate scalar. Implemented for `f32` and `f64`.
pub trait Real: Float + Debug + Display + Send + Sync + 'static {}

impl<T> Real for T where T: Float + Debug + Display + Send + Sync + 'static {}

/// Widen a coordinate for error reporting.
pub(crate) fn to_f64<T: Real>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// A point in 3D space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Real> Point<T> {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Coordinate along `axis`.
    #[must_use]
    pub fn get(&self, axis: Axis) -> T {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

impl<T: Real> From<[T; 3]> for Point<T> {
    fn from([x, y, z]: [T; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Closed interval `[min, max]` along one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisBounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: Real> AxisBounds<T> {
    #[must_use]
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// `max - min`.
    #[must_use]
    pub fn extent(&self) -> T {
        self.max - self.min
    }

    /// Whether `value` lies in `[min, max]`. NaN is never contained.
    #[must_use]
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    pub(crate) fn validate(&self, axis: Axis) -> LatticeResult<()> {
        let ok = self.min.is_finite()
            && self.max.is_finite()
            && self.max > self.min
            && self.extent().is_finite();
        if ok {
            Ok(())
        } else {
            Err(LatticeError::InvalidBounds {
                axis,
                min: to_f64(self.min),
                max: to_f64(self.max),
            })
        }
    }
}

/// Axis-aligned box the lattice covers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain<T> {
    pub x: AxisBounds<T>,
    pub y: AxisBounds<T>,
    pub z: AxisBounds<T>,
}

impl<T: Real> Domain<T> {
    #[must_use]
    pub const fn new(x: AxisBounds<T>, y: AxisBounds<T>, z: AxisBounds<T>) -> Self {
        Self { x, y, z }
    }

    /// Cube `[min, max]^3`.
    #[must_use]
    pub const fn cube(min: T, max: T) -> Self {
        let b = AxisBounds::new(min, max);
        Self { x: b, y: b, z: b }
    }

    /// Smallest box containing every point, or `None` for an empty slice.
    ///
    /// Flat axes (all points sharing a coordinate) are returned as-is and will
    /// be rejected by the builder.
    #[must_use]
    pub fn enclosing(points: &[Point<T>]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut lo = *first;
        let mut hi = *first;

        for p in rest {
            lo = Point::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z));
            hi = Point::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z));
        }

        Some(Self {
            x: AxisBounds::new(lo.x, hi.x),
            y: AxisBounds::new(lo.y, hi.y),
            z: AxisBounds::new(lo.z, hi.z),
        })
    }

    /// Bounds along `axis`.
    #[must_use]
    pub const fn axis(&self, axis: Axis) -> &AxisBounds<T> {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    /// Box volume.
    #[must_use]
    pub fn volume(&self) -> T {
        self.x.extent() * self.y.extent() * self.z.extent()
    }

    /// Whether every coordinate of `point` lies inside the box.
    #[must_use]
    pub fn contains(&self, point: &Point<T>) -> bool {
        self.x.contains(point.x) && self.y.contains(point.y) && self.z.contains(point.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enclosing_box() {
        let points = [
            Point::new(1.0, -2.0, 3.0),
            Point::new(-1.0, 5.0, 0.5),
            Point::new(0.0, 0.0, 4.0),
        ];
        let domain = Domain::enclosing(&points).unwrap();

        assert_eq!(domain.x, AxisBounds::new(-1.0, 1.0));
        assert_eq!(domain.y, AxisBounds::new(-2.0, 5.0));
        assert_eq!(domain.z, AxisBounds::new(0.5, 4.0));
        assert!(points.iter().all(|p| domain.contains(p)));
    }

    #[test]
    fn test_enclosing_empty() {
        assert!(Domain::<f64>::enclosing(&[]).is_none());
    }

    #[test]
    fn test_bounds_validation() {
        assert!(AxisBounds::new(0.0, 1.0).validate(Axis::X).is_ok());
        assert!(AxisBounds::new(1.0, 1.0).validate(Axis::X).is_err());
        assert!(AxisBounds::new(2.0, 1.0).validate(Axis::Y).is_err());
        assert!(AxisBounds::new(0.0, f64::INFINITY).validate(Axis::Z).is_err());
        assert!(AxisBounds::new(f32::NAN, 1.0).validate(Axis::Z).is_err());
    }

    #[test]
    fn test_bounds_with_overflowing_extent_rejected() {
        let wide = AxisBounds::new(-1e308, 1e308);
        assert!(wide.extent().is_infinite());
        assert!(matches!(
            wide.validate(Axis::X),
            Err(LatticeError::InvalidBounds { axis: Axis::X, .. })
        ));
        assert!(AxisBounds::new(-f32::MAX, f32::MAX).validate(Axis::Y).is_err());
        assert!(AxisBounds::new(-1e307, 1e307).validate(Axis::Z).is_ok());
    }

    #[test]
    fn test_contains_rejects_nan() {
        let b = AxisBounds::new(0.0_f32, 1.0);
        assert!(b.contains(0.0));
        assert!(b.contains(1.0));
        assert!(!b.contains(f32::NAN));
        assert!(!b.contains(1.000_001));
    }
}
