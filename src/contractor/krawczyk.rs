//! Interval Krawczyk contractor.
//!
//! The Krawczyk operator
//!
//! ```text
//! K(X) = m - Y F(m) + (I - Y J(X)) (X - m)
//! ```
//!
//! where *m* is the midpoint of region *X*, *J(X)* is an enclosure of the
//! Jacobian matrix over *X* and *Y* is the inverse of the midpoint of *J(X)*
//! (the same [preconditioner](crate::linear::midpoint_inverse) as in the
//! interval linear solvers), contains every root of *F* in *X*. The classification is the same as for
//! the [Newton](super::newton) operator. Only one point matrix needs to be
//! inverted, no interval linear system is solved. This makes the operator
//! cheaper and less sensitive to wide Jacobian matrices, at the cost of
//! looser enclosures.
//!
//! # References
//!
//! \[1\] [Applied Interval
//! Analysis](https://link.springer.com/book/10.1007/978-1-4471-0249-6)

use log::debug;

use crate::core::{Contraction, Contractor, Root, System};
use crate::derivatives::{self, Derivative};
use crate::interval::{
    mat_mul, mat_vec, point_matrix, Interval, IntervalBox, IntervalMatrix, IntervalVector,
};
use crate::linear::midpoint_inverse;

use super::{checked_jacobian, classify, exclude, guarded_mid, undetermined};

/// Interval Krawczyk contractor. See [module](self) documentation for more
/// details.
#[derive(Debug, Clone, Copy, Default)]
pub struct Krawczyk;

impl Krawczyk {
    /// Initializes Krawczyk contractor.
    pub fn new() -> Self {
        Self
    }
}

impl<F: System> Contractor<F> for Krawczyk {
    const NAME: &'static str = "Krawczyk";

    fn contract<D: Derivative<F>>(&self, f: &F, derivative: &D, root: &Root) -> Contraction {
        if let Some(excluded) = exclude(f, root) {
            return excluded;
        }

        let x = root.region();

        let jac = match checked_jacobian(f, derivative, x) {
            Some(jac) => jac,
            None => return undetermined(root),
        };

        let inv = match midpoint_inverse(&jac) {
            Ok(inv) => inv,
            Err(error) => {
                debug!("cannot precondition jacobian on {}: {}", x, error);
                return undetermined(root);
            }
        };

        let (m, fm) = guarded_mid(f, x);
        let n = f.dim();

        let y = point_matrix(&inv);
        let yj = mat_mul(&y, &jac);
        let residual = IntervalMatrix::from_fn(n, n, |i, j| {
            if i == j {
                Interval::ONE - yj[(i, j)]
            } else {
                -yj[(i, j)]
            }
        });

        let yfm = mat_vec(&y, fm.as_vector());
        let xm = IntervalVector::from_fn(n, |i, _| x[i] - Interval::point(m[i]));
        let correction = mat_vec(&residual, &xm);

        let image: IntervalBox = (0..n)
            .map(|i| Interval::point(m[i]) - yfm[i] + correction[i])
            .collect();

        let trusted = fm.is_trusted() && derivatives::is_trusted(&jac);
        classify(root, &image, trusted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::core::RootStatus;
    use crate::derivatives::{AutoDiff, ExplicitJacobian};
    use crate::linear::LinearError;
    use crate::testing::{Quadratic, SinCos, Sphere3};

    fn single(c: Contraction) -> Root {
        match c {
            Contraction::Single(root) => root,
            Contraction::Split(..) => panic!("krawczyk does not split"),
        }
    }

    #[test]
    fn proves_uniqueness() {
        let f = Quadratic::new();
        let root = Root::unknown(IntervalBox::from(Interval::new(1.3, 1.5)));
        let contracted = single(Krawczyk.contract(&f, &AutoDiff, &root));

        assert_eq!(contracted.status(), RootStatus::Unique);
        assert!(contracted.region()[0].contains(2f64.sqrt()));
        assert!(contracted.region().width() < root.region().width());
    }

    #[test]
    fn wide_region_is_unknown() {
        let f = Quadratic::new();
        let root = Root::unknown(IntervalBox::from(Interval::new(0.0, 3.0)));
        let contracted = single(Krawczyk.contract(&f, &AutoDiff, &root));

        // K([0, 3]) reaches below zero, so only the upper bound is contracted.
        assert_eq!(contracted.status(), RootStatus::Unknown);
        assert!(contracted.region()[0].contains(2f64.sqrt()));
        assert!(contracted.region()[0].hi() < 3.0);
    }

    #[test]
    fn excludes_by_image() {
        // F([1.5, 1.6]) = [0.25, 0.56]
        let f = Quadratic::new();
        let root = Root::unknown(IntervalBox::from(Interval::new(1.5, 1.6)));
        assert_eq!(
            single(Krawczyk.contract(&f, &AutoDiff, &root)).status(),
            RootStatus::Empty
        );
    }

    #[test]
    fn singular_midpoint_jacobian() {
        let f = Quadratic::new();
        let root = Root::unknown(IntervalBox::from(Interval::new(-1.5, 1.5)));

        let jac = AutoDiff.jacobian(&f, root.region());
        assert_eq!(midpoint_inverse(&jac), Err(LinearError::SingularMidpoint));

        let contracted = single(Krawczyk.contract(&f, &AutoDiff, &root));
        assert_eq!(contracted, root);
    }

    #[test]
    fn explicit_jacobian_system() {
        let f = SinCos::new();
        let derivative = ExplicitJacobian(|x: &IntervalBox| {
            let mut jac = IntervalMatrix::from_element(2, 2, Interval::ZERO);
            jac[(0, 0)] = x[0].cos();
            jac[(1, 1)] = -x[1].sin();
            jac
        });

        let root = Root::unknown(IntervalBox::from([
            Interval::new(-0.1, 0.2),
            Interval::new(1.5, 1.7),
        ]));
        let contracted = single(Krawczyk.contract(&f, &derivative, &root));

        assert_eq!(contracted.status(), RootStatus::Unique);
        assert!(contracted
            .region()
            .contains(&[0.0, std::f64::consts::FRAC_PI_2]));
    }

    #[test]
    fn three_dimensional_system() {
        let f = Sphere3::new();
        let x3 = 5f64.sqrt() - 2.0;
        let x1 = (0.25 - x3 * x3).sqrt();
        let x2 = 0.75f64.sqrt();

        let root = Root::unknown(IntervalBox::from([
            Interval::new(x1 - 0.01, x1 + 0.01),
            Interval::new(x2 - 0.01, x2 + 0.01),
            Interval::new(x3 - 0.01, x3 + 0.01),
        ]));
        let contracted = single(Krawczyk.contract(&f, &AutoDiff, &root));

        assert_eq!(contracted.status(), RootStatus::Unique);
        assert!(contracted.region().contains(&[x1, x2, x3]));
    }
}
