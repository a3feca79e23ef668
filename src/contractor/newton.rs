//! Interval Newton contractor.
//!
//! The interval Newton operator
//!
//! ```text
//! N(X) = m - J(X)⁻¹ F(m)
//! ```
//!
//! where *m* is the midpoint of region *X* and *J(X)* is an enclosure of the
//! Jacobian matrix over *X*, contains every root of *F* in *X*. Therefore, if
//! *N(X)* does not intersect *X*, there is no root in *X*, and if *N(X)* lies
//! in the interior of *X*, there is exactly one root in *X*.
//!
//! For one-dimensional systems, the division by a derivative containing zero
//! is done by extended division, which may split the region into two
//! disjoint candidates. For systems with more equations, the product
//! *J(X)⁻¹ F(m)* is enclosed by an [interval linear solver](crate::linear).
//!
//! For scalar functions with a known derivative, [`newton1d`] runs the whole
//! method on its own, without the [search driver](crate::driver).
//!
//! # References
//!
//! \[1\] [Validated Numerics: A Short Introduction to Rigorous
//! Computations](https://press.princeton.edu/books/hardcover/9780691147819/validated-numerics)

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use getset::{CopyGetters, Setters};
use log::debug;
use nalgebra::DVector;

use crate::core::{Contraction, Contractor, Root, RootStatus, System};
use crate::derivatives::{self, Derivative};
use crate::interval::{Interval, IntervalBox, IntervalMatrix, IntervalVector};
use crate::linear::{gauss_elimination, gauss_seidel, GaussSeidelOptions};

use super::{checked_jacobian, classify, exclude, guarded_mid, undetermined, SHIFTED_MID_RATIO};

/// Interval linear solver used by the [`Newton`] contractor for systems with
/// more than one equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum LinearSolver {
    /// Preconditioned Gaussian elimination (see
    /// [`gauss_elimination`](crate::linear::gauss_elimination)).
    GaussElimination,
    /// Preconditioned Hansen-Sengupta iteration (see
    /// [`gauss_seidel`](crate::linear::gauss_seidel)) contracting the enclosure
    /// `m - X`.
    GaussSeidel,
}

/// Options for [`Newton`] contractor.
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct NewtonOptions {
    /// Linear solver for systems with more than one equation. Default:
    /// GaussElimination (see [`LinearSolver`]).
    linear_solver: LinearSolver,
}

impl Default for NewtonOptions {
    fn default() -> Self {
        Self {
            linear_solver: LinearSolver::GaussElimination,
        }
    }
}

/// Interval Newton contractor. See [module](self) documentation for more
/// details.
#[derive(Debug, Clone, Default)]
pub struct Newton {
    options: NewtonOptions,
}

impl Newton {
    /// Initializes Newton contractor with default options.
    pub fn new() -> Self {
        Self::with_options(NewtonOptions::default())
    }

    /// Initializes Newton contractor with given options.
    pub fn with_options(options: NewtonOptions) -> Self {
        Self { options }
    }

    fn contract_scalar(&self, root: &Root, m: f64, fm: Interval, j: Interval) -> Contraction {
        let x = root.region();
        let trusted = fm.is_trusted() && j.is_trusted();

        if !j.contains_zero() {
            let image = IntervalBox::from(Interval::point(m) - fm / j);
            return classify(root, &image, trusted);
        }

        // With zero in the derivative, uniqueness cannot be proven and the
        // region can only be split.
        if !trusted || root.is_unique() {
            return undetermined(root);
        }

        let [lower, upper] = fm.div_pair(&j);
        let xi = x[0];

        // Subtracting the upper piece gives the lower candidate.
        let first = (Interval::point(m) - upper).intersect(&xi);
        let second = (Interval::point(m) - lower).intersect(&xi);

        match (first.is_empty(), second.is_empty()) {
            (false, false) => {
                debug!("extended division split {} into {} and {}", x, first, second);
                Contraction::Split(
                    Root::unknown(IntervalBox::from(first)),
                    Root::unknown(IntervalBox::from(second)),
                )
            }
            (false, true) => Contraction::Single(Root::unknown(IntervalBox::from(first))),
            (true, false) => Contraction::Single(Root::unknown(IntervalBox::from(second))),
            (true, true) => {
                debug!("extended division excluded {}", x);
                Contraction::Single(Root::empty(x.clone()))
            }
        }
    }

    fn solve(
        &self,
        jac: &IntervalMatrix,
        fm: &IntervalBox,
        m: &DVector<f64>,
        x: &IntervalBox,
    ) -> Option<IntervalVector> {
        let result = match self.options.linear_solver {
            LinearSolver::GaussElimination => gauss_elimination(jac, fm.as_vector(), true),
            LinearSolver::GaussSeidel => {
                let x0 = IntervalVector::from_fn(m.len(), |i, _| Interval::point(m[i]) - x[i]);
                gauss_seidel(jac, fm.as_vector(), &x0, &GaussSeidelOptions::default())
            }
        };

        match result {
            Ok(delta) => Some(delta),
            Err(error) => {
                debug!("linear solver failed on {}: {}", x, error);
                None
            }
        }
    }
}

impl<F: System> Contractor<F> for Newton {
    const NAME: &'static str = "Newton";

    fn contract<D: Derivative<F>>(&self, f: &F, derivative: &D, root: &Root) -> Contraction {
        if let Some(excluded) = exclude(f, root) {
            return excluded;
        }

        let x = root.region();

        let jac = match checked_jacobian(f, derivative, x) {
            Some(jac) => jac,
            None => return undetermined(root),
        };

        let (m, fm) = guarded_mid(f, x);

        if f.dim() == 1 {
            return self.contract_scalar(root, m[0], fm[0], jac[(0, 0)]);
        }

        let delta = match self.solve(&jac, &fm, &m, x) {
            Some(delta) => delta,
            None => return undetermined(root),
        };

        let image: IntervalBox = m
            .iter()
            .zip(delta.iter())
            .map(|(&mi, &di)| Interval::point(mi) - di)
            .collect();

        let trusted = fm.is_trusted() && derivatives::is_trusted(&jac) && image.is_trusted();
        classify(root, &image, trusted)
    }
}

/// Options for [`newton1d`].
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct Newton1dOptions {
    /// A candidate is accepted when its width is at most `reltol * mag +
    /// abstol`. Default: `4 * f64::EPSILON`.
    reltol: f64,
    /// See `reltol`. Default: `2e-12`.
    abstol: f64,
    /// Maximum number of Newton steps. Default: `1000`.
    max_evaluations: usize,
}

impl Default for Newton1dOptions {
    fn default() -> Self {
        Self {
            reltol: 4.0 * f64::EPSILON,
            abstol: 2e-12,
            max_evaluations: 1000,
        }
    }
}

struct Candidate {
    x: Interval,
    status: RootStatus,
}

impl Candidate {
    fn new(x: Interval, status: RootStatus) -> Self {
        Self { x: x.bare(), status }
    }

    fn into_root(self) -> Root {
        Root::new(IntervalBox::from(self.x), self.status)
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

// The widest candidate is processed first.
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x.width().total_cmp(&other.x.width())
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Finds all roots of a scalar function in the interval by the interval
/// Newton method.
///
/// `f` is the interval extension of the function and `df` of its derivative.
/// The widest candidate is processed first. A candidate is returned when its
/// width is at most `reltol * mag + abstol`, when a Newton step does not
/// improve a unique root, or when the budget of Newton steps is exhausted.
/// Candidates where the function or the derivative are not
/// [trusted](Interval::is_trusted) are bisected. The returned roots are sorted
/// by their lower bounds.
///
/// ```rust
/// use ivroots::contractor::newton::{newton1d, Newton1dOptions};
/// use ivroots::Interval;
///
/// let roots = newton1d(
///     |x: Interval| x.sqr() - 2.0,
///     |x: Interval| x * 2.0,
///     Interval::new(0.0, 2.0),
///     &Newton1dOptions::default(),
/// );
///
/// assert_eq!(roots.len(), 1);
/// assert!(roots[0].is_unique());
/// assert!(roots[0].region()[0].contains(2f64.sqrt()));
/// ```
pub fn newton1d<F, D>(f: F, df: D, x: Interval, options: &Newton1dOptions) -> Vec<Root>
where
    F: Fn(Interval) -> Interval,
    D: Fn(Interval) -> Interval,
{
    let mut roots = Vec::new();
    let mut queue = BinaryHeap::new();

    if !x.is_empty() {
        queue.push(Candidate::new(x, RootStatus::Unknown));
    }

    let mut evaluations = 0;

    while evaluations < options.max_evaluations {
        let Candidate { x, status } = match queue.pop() {
            Some(candidate) => candidate,
            None => break,
        };

        if x.width() <= options.reltol * x.mag() + options.abstol {
            roots.push(Candidate::new(x, status).into_root());
            continue;
        }

        evaluations += 1;

        if !f(x).contains_zero() {
            debug!("excluded {}", x);
            continue;
        }

        let m = x.mid();
        let fm = f(Interval::point(m));
        let dfx = df(x);

        if !fm.is_trusted() || !dfx.is_trusted() || (dfx.contains_zero() && fm.contains_zero()) {
            // Either the operator is not valid or the midpoint is a root up
            // to the precision of f. Bisect away from the midpoint.
            let (lower, upper) = x.bisect_at(SHIFTED_MID_RATIO);
            if lower.hi() <= x.lo() || lower.hi() >= x.hi() {
                roots.push(Candidate::new(x, RootStatus::Unknown).into_root());
            } else {
                queue.push(Candidate::new(lower, RootStatus::Unknown));
                queue.push(Candidate::new(upper, RootStatus::Unknown));
            }
            continue;
        }

        if dfx.contains_zero() {
            for q in fm.div_pair(&dfx) {
                let piece = (Interval::point(m) - q).intersect(&x);
                if !piece.is_empty() {
                    queue.push(Candidate::new(piece, status));
                }
            }
            continue;
        }

        let n = Interval::point(m) - fm / dfx;
        let contracted = n.intersect(&x);

        if contracted.is_empty() {
            debug!("newton step excluded {}", x);
            continue;
        }

        let status = if status == RootStatus::Unique || n.is_interior(&x) {
            RootStatus::Unique
        } else {
            RootStatus::Unknown
        };

        if contracted != x {
            queue.push(Candidate::new(contracted, status));
        } else if status == RootStatus::Unique {
            roots.push(Candidate::new(contracted, status).into_root());
        } else {
            let (lower, upper) = x.bisect_at(SHIFTED_MID_RATIO);
            if lower.hi() <= x.lo() || lower.hi() >= x.hi() {
                roots.push(Candidate::new(x, status).into_root());
            } else {
                queue.push(Candidate::new(lower, status));
                queue.push(Candidate::new(upper, status));
            }
        }
    }

    roots.extend(queue.into_iter().map(Candidate::into_root));
    roots.sort_by(|a, b| a.region()[0].lo().total_cmp(&b.region()[0].lo()));
    roots
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;

    use crate::core::RootStatus;
    use crate::derivatives::{AutoDiff, ExplicitJacobian};
    use crate::interval::Decoration;
    use crate::testing::{DoubleRoots, Logarithm, Quadratic, SinCos, Squares};

    fn region(lo: f64, hi: f64) -> IntervalBox {
        IntervalBox::from(Interval::new(lo, hi))
    }

    fn single(c: Contraction) -> Root {
        match c {
            Contraction::Single(root) => root,
            Contraction::Split(..) => panic!("unexpected split"),
        }
    }

    #[test]
    fn proves_uniqueness() {
        let f = Quadratic::new();
        let root = single(Newton::new().contract(&f, &AutoDiff, &Root::unknown(region(1.0, 2.0))));

        // N([1, 2]) = [1.375, 1.4375] is in the interior of [1, 2].
        assert_eq!(root.status(), RootStatus::Unique);
        assert_eq!(root.region()[0], Interval::new(1.375, 1.4375));
    }

    #[test]
    fn decorated_region_is_proven_unique() {
        let f = Quadratic::new();
        let x = IntervalBox::from(Interval::new(1.0, 2.0).degrade(Decoration::Trv));
        let root = single(Newton::new().contract(&f, &AutoDiff, &Root::unknown(x)));

        assert_eq!(root.status(), RootStatus::Unique);
        assert_eq!(root.region()[0], Interval::new(1.375, 1.4375));
    }

    #[test]
    fn split_pieces_are_contracted_further() {
        let f = Quadratic::new();
        let pieces = Newton::new()
            .contract(&f, &AutoDiff, &Root::unknown(region(-5.0, 5.0)))
            .into_roots();
        assert_eq!(pieces.len(), 2);

        for piece in pieces {
            let mut root = piece;
            for _ in 0..10 {
                if root.is_unique() {
                    break;
                }
                root = single(Newton::new().contract(&f, &AutoDiff, &root));
            }

            assert!(root.is_unique(), "{} was not proven unique", root);
            assert!(root.region()[0].contains(2f64.sqrt()) || root.region()[0].contains(-(2f64.sqrt())));
        }
    }

    #[test]
    fn excludes_by_image() {
        let f = Quadratic::new();

        // F([1.5, 3]) = [0.25, 7] does not contain zero.
        let root = single(Newton::new().contract(&f, &AutoDiff, &Root::unknown(region(1.5, 3.0))));
        assert_eq!(root.status(), RootStatus::Empty);
    }

    #[test]
    fn extended_division_splits() {
        let f = Quadratic::new();
        let c = Newton::new().contract(&f, &AutoDiff, &Root::unknown(region(-5.0, 5.0)));

        match c {
            Contraction::Split(lower, upper) => {
                assert_eq!(lower.status(), RootStatus::Unknown);
                assert_eq!(upper.status(), RootStatus::Unknown);

                // m = 0, F(m) = -2 and J = [-10, 10].
                assert_eq!(lower.region()[0].lo(), -5.0);
                assert_abs_diff_eq!(lower.region()[0].hi(), -0.2, epsilon = 1e-15);
                assert_abs_diff_eq!(upper.region()[0].lo(), 0.2, epsilon = 1e-15);
                assert_eq!(upper.region()[0].hi(), 5.0);

                // The pieces come from a division by zero-containing
                // derivative, but as regions they are ordinary sets.
                assert_eq!(lower.region()[0].decoration(), Decoration::Com);
                assert_eq!(upper.region()[0].decoration(), Decoration::Com);
            }
            Contraction::Single(root) => panic!("expected split, got {}", root),
        }
    }

    #[test]
    fn double_root_is_never_unique() {
        let f = DoubleRoots::new();
        let root = Root::unknown(region(1.41, 1.42));
        let contracted = Newton::new().contract(&f, &AutoDiff, &root).into_roots();

        assert!(contracted.iter().all(|r| !r.is_unique()));
        assert!(contracted
            .iter()
            .any(|r| r.region()[0].contains(2f64.sqrt())));
    }

    #[test]
    fn untrusted_region_is_kept() {
        let f = Logarithm::new();
        let root = single(Newton::new().contract(&f, &AutoDiff, &Root::unknown(region(-0.5, 2.0))));

        assert_eq!(root.status(), RootStatus::Unknown);
        assert_eq!(root.region(), &region(-0.5, 2.0));
    }

    #[test]
    fn unique_stays_unique() {
        let f = Quadratic::new();
        let unique = single(Newton::new().contract(&f, &AutoDiff, &Root::unknown(region(1.0, 2.0))));
        let again = single(Newton::new().contract(&f, &AutoDiff, &unique));

        assert!(again.is_unique());
        assert!(again.region().is_subset(unique.region()));
    }

    #[test]
    fn multivariate_linear_solvers() {
        let f = Squares::new();
        let root = Root::unknown(IntervalBox::from([
            Interval::new(1.5, 2.5),
            Interval::new(3.5, 4.5),
        ]));

        for linear_solver in [LinearSolver::GaussElimination, LinearSolver::GaussSeidel] {
            let mut options = NewtonOptions::default();
            options.set_linear_solver(linear_solver);

            let contracted = single(Newton::with_options(options).contract(&f, &AutoDiff, &root));
            assert_eq!(contracted.status(), RootStatus::Unique);
            assert!(contracted.region().contains(&[2.0, 4.0]));
            assert!(contracted.region().is_subset(root.region()));
        }
    }

    #[test]
    fn singular_midpoint_is_undetermined() {
        let f = SinCos::new();
        let derivative = ExplicitJacobian(|_: &IntervalBox| {
            IntervalMatrix::from_element(2, 2, Interval::new(-1.0, 1.0))
        });

        let root = Root::unknown(IntervalBox::from([
            Interval::new(-1.0, 1.0),
            Interval::new(1.0, 2.0),
        ]));
        let contracted = single(Newton::new().contract(&f, &derivative, &root));

        assert_eq!(contracted, root);
    }

    #[test]
    fn wrong_jacobian_shape_is_undetermined() {
        let f = Squares::new();
        let derivative =
            ExplicitJacobian(|_: &IntervalBox| IntervalMatrix::from_element(1, 1, Interval::ONE));
        let root = Root::unknown(IntervalBox::from([
            Interval::new(1.5, 2.5),
            Interval::new(3.5, 4.5),
        ]));

        assert_eq!(single(Newton::new().contract(&f, &derivative, &root)), root);
    }

    #[test]
    fn newton1d_finds_both_roots() {
        let roots = newton1d(
            |x: Interval| x.sqr() - 2.0,
            |x: Interval| x * 2.0,
            Interval::new(-5.0, 5.0),
            &Newton1dOptions::default(),
        );

        assert_eq!(roots.len(), 2);
        assert!(roots.iter().all(Root::is_unique));
        assert!(roots[0].region()[0].contains(-(2f64.sqrt())));
        assert!(roots[1].region()[0].contains(2f64.sqrt()));
        assert!(roots.iter().all(|root| root.region().width() < 1e-11));
    }

    #[test]
    fn newton1d_outside_of_domain() {
        let roots = newton1d(
            |x: Interval| x.ln(),
            |x: Interval| 1.0 / x,
            Interval::new(-2.0, 2.0),
            &Newton1dOptions::default(),
        );

        assert_eq!(roots.len(), 1);
        assert!(roots[0].is_unique());
        assert!(roots[0].region()[0].contains(1.0));
    }

    #[test]
    fn newton1d_without_roots() {
        let roots = newton1d(
            |x: Interval| x.sqr() + 1.0,
            |x: Interval| x * 2.0,
            Interval::new(-5.0, 5.0),
            &Newton1dOptions::default(),
        );

        assert!(roots.is_empty());
    }

    #[test]
    fn newton1d_evaluation_budget() {
        let mut options = Newton1dOptions::default();
        options.set_max_evaluations(1);

        let roots = newton1d(
            |x: Interval| x.sqr() - 2.0,
            |x: Interval| x * 2.0,
            Interval::new(-5.0, 5.0),
            &options,
        );

        // The first step splits the region by extended division.
        assert_eq!(roots.len(), 2);
        assert!(roots.iter().all(|root| root.status() == RootStatus::Unknown));
        assert!(roots[0].region()[0].contains(-(2f64.sqrt())));
        assert!(roots[1].region()[0].contains(2f64.sqrt()));
        assert!(roots.iter().all(|root| root.region().is_trusted()));
    }
}
