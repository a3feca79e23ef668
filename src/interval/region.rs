use std::fmt;
use std::iter::FromIterator;
use std::ops::{Deref, DerefMut};

use nalgebra::{DMatrix, DVector};

use super::Interval;

/// Matrix of intervals, used for interval Jacobians.
pub type IntervalMatrix = DMatrix<Interval>;

/// Vector of intervals, used in interval linear algebra.
pub type IntervalVector = DVector<Interval>;

/// Interval box, a cartesian product of *n* intervals (*n* >= 1).
///
/// A one-dimensional box is used to represent a single interval. The box is
/// empty if any of its components is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalBox(IntervalVector);

impl IntervalBox {
    /// Creates the box from its components.
    pub fn new(components: IntervalVector) -> Self {
        Self(components)
    }

    /// Creates the degenerate box containing a single point.
    pub fn point(x: &DVector<f64>) -> Self {
        Self(x.map(Interval::point))
    }

    /// Dimension of the box.
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    /// Returns the components as a vector.
    pub fn as_vector(&self) -> &IntervalVector {
        &self.0
    }

    /// Unwraps the vector of the components.
    pub fn into_vector(self) -> IntervalVector {
        self.0
    }

    /// Returns the same box with [bare](Interval::bare) components.
    pub fn bare(&self) -> Self {
        Self(self.0.map(|xi| xi.bare()))
    }

    /// Returns `true` if any component is empty.
    pub fn is_empty(&self) -> bool {
        self.0.iter().any(Interval::is_empty)
    }

    /// Returns `true` if all components are bounded.
    pub fn is_bounded(&self) -> bool {
        self.0.iter().all(Interval::is_bounded)
    }

    /// Returns `true` if all components are trusted (see
    /// [`Interval::is_trusted`]).
    pub fn is_trusted(&self) -> bool {
        self.0.iter().all(Interval::is_trusted)
    }

    /// Returns `true` if every component contains zero.
    pub fn contains_zero(&self) -> bool {
        self.0.iter().all(Interval::contains_zero)
    }

    /// Returns `true` if the point is in the box.
    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.dim() && self.0.iter().zip(x).all(|(xi, &v)| xi.contains(v))
    }

    /// Width of the box, the largest width of its components.
    pub fn width(&self) -> f64 {
        self.0.iter().map(Interval::width).fold(0.0, f64::max)
    }

    /// Component-wise widths.
    pub fn widths(&self) -> DVector<f64> {
        self.0.map(|xi| xi.width())
    }

    /// Midpoint of the box.
    pub fn mid(&self) -> DVector<f64> {
        self.0.map(|xi| xi.mid())
    }

    /// Index of the widest component. Ties are resolved to the lowest index.
    pub fn widest_dim(&self) -> usize {
        self.0
            .iter()
            .map(Interval::width)
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(imax, wmax), (i, w)| {
                if w > wmax {
                    (i, w)
                } else {
                    (imax, wmax)
                }
            })
            .0
    }

    /// Returns `true` if the box is a subset of `other` (component-wise).
    pub fn is_subset(&self, other: &Self) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| a.is_subset(b))
    }

    /// Returns `true` if the box is in the interior of `other` (component-wise).
    pub fn is_interior(&self, other: &Self) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| a.is_interior(b))
    }

    /// Returns `true` if the boxes have no point in common, that is, any pair
    /// of components is disjoint.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .any(|(a, b)| a.is_disjoint(b))
    }

    /// Component-wise intersection.
    pub fn intersect(&self, other: &Self) -> Self {
        Self(self.0.zip_map(&other.0, |a, b| a.intersect(&b)))
    }

    /// Component-wise hull.
    pub fn hull(&self, other: &Self) -> Self {
        Self(self.0.zip_map(&other.0, |a, b| a.hull(&b)))
    }

    /// Splits the box in dimension `dim` at relative position `ratio`.
    pub fn bisect_at(&self, dim: usize, ratio: f64) -> (Self, Self) {
        let (left, right) = self.0[dim].bisect_at(ratio);
        let mut a = self.clone();
        let mut b = self.clone();
        a.0[dim] = left;
        b.0[dim] = right;
        (a, b)
    }

    /// Volume of the box (rounded up).
    pub fn volume(&self) -> f64 {
        self.0.iter().map(Interval::width).product()
    }
}

impl Deref for IntervalBox {
    type Target = IntervalVector;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for IntervalBox {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Interval> for IntervalBox {
    fn from(x: Interval) -> Self {
        Self(DVector::from_element(1, x))
    }
}

impl From<IntervalVector> for IntervalBox {
    fn from(x: IntervalVector) -> Self {
        Self(x)
    }
}

impl From<Vec<Interval>> for IntervalBox {
    fn from(x: Vec<Interval>) -> Self {
        Self(DVector::from_vec(x))
    }
}

impl<const N: usize> From<[Interval; N]> for IntervalBox {
    fn from(x: [Interval; N]) -> Self {
        Self(DVector::from_iterator(N, x))
    }
}

impl FromIterator<Interval> for IntervalBox {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        Self(DVector::from_vec(iter.into_iter().collect()))
    }
}

impl fmt::Display for IntervalBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dim() == 1 {
            return fmt::Display::fmt(&self.0[0], f);
        }

        f.write_str("(")?;
        for (i, xi) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" × ")?;
            }
            fmt::Display::fmt(xi, f)?;
        }
        f.write_str(")")
    }
}

/// Product of an interval matrix and an interval vector.
pub fn mat_vec(a: &IntervalMatrix, x: &IntervalVector) -> IntervalVector {
    IntervalVector::from_fn(a.nrows(), |i, _| {
        (0..a.ncols()).fold(Interval::ZERO, |acc, j| acc + a[(i, j)] * x[j])
    })
}

/// Product of two interval matrices.
pub fn mat_mul(a: &IntervalMatrix, b: &IntervalMatrix) -> IntervalMatrix {
    IntervalMatrix::from_fn(a.nrows(), b.ncols(), |i, j| {
        (0..a.ncols()).fold(Interval::ZERO, |acc, k| acc + a[(i, k)] * b[(k, j)])
    })
}

/// Converts a real matrix into a matrix of degenerate intervals.
pub fn point_matrix(a: &DMatrix<f64>) -> IntervalMatrix {
    a.map(Interval::point)
}

/// Matrix of the midpoints of the components.
pub fn mid_matrix(a: &IntervalMatrix) -> DMatrix<f64> {
    a.map(|aij| aij.mid())
}

#[cfg(test)]
mod tests {
    use super::*;

    use nalgebra::{dmatrix, dvector};

    use crate::interval::Decoration;

    fn i(lo: f64, hi: f64) -> Interval {
        Interval::new(lo, hi)
    }

    #[test]
    fn box_queries() {
        let x = IntervalBox::from([i(-1.0, 1.0), i(0.0, 4.0)]);

        assert_eq!(x.dim(), 2);
        assert_eq!(x.width(), 4.0);
        assert_eq!(x.widest_dim(), 1);
        assert_eq!(x.mid(), dvector![0.0, 2.0]);
        assert_eq!(x.volume(), 8.0);
        assert!(x.contains(&[0.5, 3.0]));
        assert!(!x.contains(&[0.5, 5.0]));
        assert!(x.contains_zero());
        assert!(!x.is_empty());
    }

    #[test]
    fn widest_dim_tie() {
        let x = IntervalBox::from([i(0.0, 1.0), i(5.0, 6.0)]);
        assert_eq!(x.widest_dim(), 0);
    }

    #[test]
    fn containment_is_componentwise() {
        let x = IntervalBox::from([i(-1.0, 1.0), i(-1.0, 1.0)]);
        let inner = IntervalBox::from([i(-0.5, 0.5), i(-0.5, 0.5)]);
        let touching = IntervalBox::from([i(-1.0, 0.5), i(-0.5, 0.5)]);
        let apart = IntervalBox::from([i(-0.5, 0.5), i(2.0, 3.0)]);

        assert!(inner.is_interior(&x));
        assert!(touching.is_subset(&x));
        assert!(!touching.is_interior(&x));
        assert!(apart.is_disjoint(&x));
        assert!(!inner.is_disjoint(&x));
        assert!(x.intersect(&apart).is_empty());
        assert_eq!(x.hull(&apart), IntervalBox::from([i(-1.0, 1.0), i(-1.0, 3.0)]));
    }

    #[test]
    fn bisection_along_dimension() {
        let x = IntervalBox::from([i(0.0, 1.0), i(0.0, 8.0)]);
        let (a, b) = x.bisect_at(1, 0.25);

        assert_eq!(a, IntervalBox::from([i(0.0, 1.0), i(0.0, 2.0)]));
        assert_eq!(b, IntervalBox::from([i(0.0, 1.0), i(2.0, 8.0)]));
    }

    #[test]
    fn bare_box_is_trusted() {
        let x = IntervalBox::from([i(0.0, 1.0).degrade(Decoration::Trv), i(2.0, 3.0)]);
        assert!(!x.is_trusted());

        let bare = x.bare();
        assert_eq!(bare, x);
        assert!(bare.is_trusted());
    }

    #[test]
    fn interval_matrix_products() {
        let a = point_matrix(&dmatrix![1.0, 2.0; 3.0, 4.0]);
        let x = dvector![i(-1.0, 1.0), i(0.0, 1.0)];

        let y = mat_vec(&a, &x);
        assert_eq!(y, dvector![i(-1.0, 3.0), i(-3.0, 7.0)]);

        let b = mat_mul(&a, &a);
        assert_eq!(mid_matrix(&b), dmatrix![7.0, 10.0; 15.0, 22.0]);
    }
}
