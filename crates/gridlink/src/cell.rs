//! Lattice cells with policy-driven growth.

use tracing::trace;

use crate::{
    LatticeResult,
    point::{Point, Real},
};

/// How a full cell grows.
///
/// The next capacity is `floor(capacity * factor)`. When that makes no
/// progress (small capacities) the cell grows by `min_increment` instead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrowthPolicy {
    pub factor: f64,
    pub min_increment: usize,
}

impl GrowthPolicy {
    /// Capacity after one growth step from `current`.
    #[must_use]
    pub fn next_capacity(&self, current: usize) -> usize {
        let grown = (current as f64 * self.factor) as usize;
        if grown > current {
            grown
        } else {
            current.saturating_add(self.min_increment.max(1))
        }
    }
}

/// One bucket of the lattice.
///
/// Points are kept in insertion order. `capacity` is the planned size of
/// the storage and only grows; `len() <= capacity()` always holds.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell<T> {
    points: Vec<Point<T>>,
    capacity: usize,
}

impl<T: Real> Cell<T> {
    /// Create an empty cell with storage for `capacity` points.
    pub(crate) fn with_capacity(capacity: usize) -> LatticeResult<Self> {
        let mut points = Vec::new();
        points.try_reserve_exact(capacity)?;
        Ok(Self { points, capacity })
    }

    /// Append a point, growing storage per `policy` if the cell is full.
    ///
    /// Returns `true` if the cell had to grow.
    pub(crate) fn push(&mut self, point: Point<T>, policy: &GrowthPolicy) -> LatticeResult<bool> {
        let grew = self.points.len() == self.capacity;
        if grew {
            let next = policy.next_capacity(self.capacity);
            self.points.try_reserve_exact(next - self.points.len())?;
            trace!(from = self.capacity, to = next, "cell grown");
            self.capacity = next;
        }

        self.points.push(point);
        Ok(grew)
    }

    /// Number of points in the cell.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Planned capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Points in insertion order.
    #[must_use]
    pub fn points(&self) -> &[Point<T>] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point<T>> {
        self.points.iter()
    }
}

impl<'a, T: Real> IntoIterator for &'a Cell<T> {
    type Item = &'a Point<T>;
    type IntoIter = std::slice::Iter<'a, Point<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICY: GrowthPolicy = GrowthPolicy {
        factor: 1.2,
        min_increment: 3,
    };

    #[test]
    fn test_next_capacity() {
        assert_eq!(POLICY.next_capacity(0), 3);
        assert_eq!(POLICY.next_capacity(1), 4);
        assert_eq!(POLICY.next_capacity(4), 7);
        assert_eq!(POLICY.next_capacity(5), 6);
        assert_eq!(POLICY.next_capacity(10), 12);
        assert_eq!(POLICY.next_capacity(100), 120);
    }

    #[test]
    fn test_next_capacity_always_progresses() {
        let stuck = GrowthPolicy {
            factor: 1.0,
            min_increment: 0,
        };
        assert_eq!(stuck.next_capacity(8), 9);
        assert_eq!(stuck.next_capacity(usize::MAX), usize::MAX);
    }

    #[test]
    fn test_push_grows_and_preserves_order() {
        let mut cell = Cell::with_capacity(2).unwrap();
        let mut grows = 0;

        for i in 0..50 {
            let v = f64::from(i);
            if cell.push(Point::new(v, -v, v * 0.5), &POLICY).unwrap() {
                grows += 1;
            }
            assert!(cell.len() <= cell.capacity());
        }

        assert_eq!(cell.len(), 50);
        assert!(grows > 0);
        for (i, p) in cell.iter().enumerate() {
            let v = i as f64;
            assert_eq!(*p, Point::new(v, -v, v * 0.5));
        }
    }

    #[test]
    fn test_capacity_only_grows() {
        let mut cell = Cell::with_capacity(0).unwrap();
        let mut last = cell.capacity();

        for _ in 0..20 {
            cell.push(Point::new(0.0_f32, 0.0, 0.0), &POLICY).unwrap();
            assert!(cell.capacity() >= last);
            last = cell.capacity();
        }
        // 0 -> 3 -> 6 -> 7 -> 8 -> 9 -> 10 -> 12 -> 14 -> 16 -> 19 -> 22
        assert_eq!(cell.capacity(), 22);
    }

    #[test]
    fn test_no_growth_within_capacity() {
        let mut cell = Cell::with_capacity(4).unwrap();
        for _ in 0..4 {
            assert!(!cell.push(Point::new(1.0, 2.0, 3.0), &POLICY).unwrap());
        }
        assert!(cell.push(Point::new(1.0, 2.0, 3.0), &POLICY).unwrap());
        assert_eq!(cell.capacity(), 7);
    }
}
