//! Collection of contractors.
//!
//! * [Newton](newton) -- Interval Newton method. Recommended for most
//!   problems and the default one.
//! * [Krawczyk](krawczyk) -- Interval Krawczyk method. Does not need to solve
//!   an interval linear system, which makes it more forgiving for wide
//!   Jacobian matrices of multivariate systems.
//! * [Bisection](bisection) -- Only excludes regions where the system has no
//!   root. Never proves uniqueness, but does not need any derivative.
//!
//! All contractors implement [`Contractor`] trait and share the same
//! classification rules. A region is
//!
//! * *empty* if the image of the system over the region does not contain
//!   zero, or if the contraction operator does not intersect the region,
//! * *unique* if the contraction operator maps the region into its interior,
//! * *unknown* otherwise, in which case the region is replaced by its
//!   intersection with the contraction operator.
//!
//! The operator-based conclusions are drawn only if the function value at the
//! midpoint and the Jacobian matrix are [trusted](crate::Interval::is_trusted),
//! that is, the system is defined and continuous on the whole region.

pub mod bisection;
pub mod krawczyk;
pub mod newton;

pub use bisection::Bisection;
pub use krawczyk::Krawczyk;
pub use newton::{newton1d, LinearSolver, Newton, Newton1dOptions, NewtonOptions};

use log::{debug, warn};
use nalgebra::DVector;

use crate::core::{Contraction, Contractor, Root, RootStatus, System, SystemExt};
use crate::derivatives::Derivative;
use crate::interval::{IntervalBox, IntervalMatrix};

/// Relative position of the midpoint when the exact midpoint is a root.
const SHIFTED_MID_RATIO: f64 = 127.0 / 256.0;

/// Tests whether the image of the system over the region contains zero.
///
/// Returns the empty root if it does not.
pub(crate) fn exclude<F: System>(f: &F, root: &Root) -> Option<Contraction> {
    let fx = f.eval_region(root.region());

    if fx.contains_zero() {
        None
    } else {
        debug!("excluded {} with image {}", root.region(), fx);
        Some(Contraction::Single(Root::empty(root.region().clone())))
    }
}

/// Evaluates the Jacobian matrix and checks its shape.
pub(crate) fn checked_jacobian<F, D>(f: &F, derivative: &D, x: &IntervalBox) -> Option<IntervalMatrix>
where
    F: System,
    D: Derivative<F>,
{
    let jac = derivative.jacobian(f, x);
    let n = f.dim();

    if jac.shape() == (n, n) {
        Some(jac)
    } else {
        warn!(
            "jacobian has shape {:?}, expected ({}, {}); region left undetermined",
            jac.shape(),
            n,
            n
        );
        None
    }
}

/// Returns the midpoint of the region and the value of the system in it.
///
/// If the midpoint is an exact root, it is shifted so that the contraction
/// operators do not degenerate to a point.
pub(crate) fn guarded_mid<F: System>(f: &F, x: &IntervalBox) -> (DVector<f64>, IntervalBox) {
    let m = x.mid();
    let fm = f.eval_point(&m);

    if fm.iter().all(|fi| fi.lo() == 0.0 && fi.hi() == 0.0) {
        let m = x.map(|xi| xi.mid_at(SHIFTED_MID_RATIO));
        let fm = f.eval_point(&m);
        (m, fm)
    } else {
        (m, fm)
    }
}

/// Root with the same region and status unknown (or unique if it was).
pub(crate) fn undetermined(root: &Root) -> Contraction {
    let status = if root.is_unique() {
        RootStatus::Unique
    } else {
        RootStatus::Unknown
    };

    Contraction::Single(Root::new(root.region().clone(), status))
}

/// Classifies the region by the result of a contraction operator.
///
/// `trusted` tells whether the operator is valid on the whole region.
pub(crate) fn classify(root: &Root, image: &IntervalBox, trusted: bool) -> Contraction {
    let x = root.region();

    if !trusted {
        debug!("operator is not trusted on {}", x);
        return undetermined(root);
    }

    let contracted = image.intersect(x);

    if contracted.is_empty() {
        if root.is_unique() {
            return Contraction::Single(root.clone());
        }

        debug!("operator image {} misses {}", image, x);
        return Contraction::Single(Root::empty(x.clone()));
    }

    if root.is_unique() || image.is_interior(x) {
        Contraction::Single(Root::unique(contracted))
    } else {
        Contraction::Single(Root::unknown(contracted))
    }
}

/// Repeatedly contracts a unique root as long as its region shrinks.
///
/// The result is unique and a subset of the input region. If the root is not
/// unique, it is returned unchanged.
pub fn refine<F, D, C>(
    f: &F,
    derivative: &D,
    contractor: &C,
    root: &Root,
    max_iterations: usize,
) -> Root
where
    F: System,
    D: Derivative<F>,
    C: Contractor<F>,
{
    let mut root = root.clone();

    if !root.is_unique() {
        return root;
    }

    for _ in 0..max_iterations {
        let next = match contractor.contract(f, derivative, &root) {
            Contraction::Single(next) => next,
            Contraction::Split(..) => break,
        };

        if !next.is_unique() || next.region() == root.region() {
            break;
        }

        if !next.region().is_subset(root.region()) {
            break;
        }

        root = next;
    }

    root
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::derivatives::AutoDiff;
    use crate::interval::Interval;
    use crate::testing::{Quadratic, ShiftedQuadratic};

    fn region(lo: f64, hi: f64) -> IntervalBox {
        IntervalBox::from(Interval::new(lo, hi))
    }

    #[test]
    fn exclusion_test() {
        let f = Quadratic::new();

        assert!(exclude(&f, &Root::unknown(region(2.0, 3.0))).is_some());
        assert!(exclude(&f, &Root::unknown(region(1.0, 2.0))).is_none());
    }

    #[test]
    fn guarded_mid_avoids_exact_root() {
        let f = ShiftedQuadratic::new();

        let (m, fm) = guarded_mid(&f, &region(1.0, 3.0));
        assert_ne!(m[0], 2.0);
        assert!(m[0] > 1.0 && m[0] < 3.0);
        assert!(!fm[0].contains_zero());

        let (m, _) = guarded_mid(&f, &region(2.0, 4.0));
        assert_eq!(m[0], 3.0);
    }

    #[test]
    fn classification() {
        let root = Root::unknown(region(0.0, 4.0));

        let c = classify(&root, &region(1.0, 2.0), true);
        assert_eq!(c, Contraction::Single(Root::unique(region(1.0, 2.0))));

        let c = classify(&root, &region(-1.0, 2.0), true);
        assert_eq!(c, Contraction::Single(Root::unknown(region(0.0, 2.0))));

        let c = classify(&root, &region(5.0, 6.0), true);
        assert_eq!(c, Contraction::Single(Root::empty(region(0.0, 4.0))));

        let c = classify(&root, &region(5.0, 6.0), false);
        assert_eq!(c, Contraction::Single(Root::unknown(region(0.0, 4.0))));

        let unique = Root::unique(region(0.0, 4.0));
        let c = classify(&unique, &region(-1.0, 2.0), true);
        assert_eq!(c, Contraction::Single(Root::unique(region(0.0, 2.0))));

        let c = classify(&unique, &region(5.0, 6.0), true);
        assert_eq!(c, Contraction::Single(unique));
    }

    #[test]
    fn refine_tightens_unique_root() {
        let f = Quadratic::new();
        let root = Root::unique(region(1.0, 2.0));

        let refined = refine(&f, &AutoDiff, &Newton::new(), &root, 100);
        assert!(refined.is_unique());
        assert!(refined.region().is_subset(root.region()));
        assert!(refined.region().width() < 1e-12);
        assert!(refined.region()[0].contains(2f64.sqrt()));
    }

    #[test]
    fn refine_is_idempotent() {
        let f = Quadratic::new();
        let root = Root::unique(region(1.0, 2.0));

        let once = refine(&f, &AutoDiff, &Newton::new(), &root, 100);
        let twice = refine(&f, &AutoDiff, &Newton::new(), &once, 100);
        assert_eq!(once, twice);

        let krawczyk = refine(&f, &AutoDiff, &Krawczyk::new(), &once, 100);
        assert!(krawczyk.is_unique());
        assert!(krawczyk.region().is_subset(once.region()));
    }

    #[test]
    fn refine_ignores_unknown_root() {
        let f = Quadratic::new();
        let root = Root::unknown(region(1.0, 2.0));

        assert_eq!(refine(&f, &AutoDiff, &Newton::new(), &root, 100), root);
    }
}
