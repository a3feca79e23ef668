//! Testing systems and utilities useful for benchmarking, debugging and smoke
//! testing.
//!
//! Every system knows its standard search region and all its roots in the
//! region. [`Quadratic`] and [`Squares`] are recommended for first tests.
//! Others can be used for specific conditions (e.g., a root at the boundary
//! of the region, multiple roots or evaluation outside of the domain).
//!
//! # References
//!
//! \[1\] [Validated Numerics: A Short Introduction to Rigorous
//! Computations](https://press.princeton.edu/books/hardcover/9780691147819/validated-numerics)
//!
//! \[2\] [Applied Interval
//! Analysis](https://link.springer.com/book/10.1007/978-1-4471-0249-6)

#![allow(unused)]

use std::f64::consts::PI;

use nalgebra::{dvector, DVector};

use crate::core::{Function, Number, System, SystemExt};
use crate::interval::{Interval, IntervalBox};

/// Extension of the [`System`] trait that provides additional information that
/// is useful for testing contractors and searches.
pub trait TestSystem: System {
    /// Standard search region for the system. Using the same region is
    /// essential for fair comparison of methods.
    fn region(&self) -> IntervalBox;

    /// All roots of the system in the [standard region](TestSystem::region).
    ///
    /// Irrational roots are computed in floating point arithmetic and may be
    /// a few ulps away from the true root. A tight enclosure of the root does
    /// not need to contain them.
    fn roots(&self) -> Vec<DVector<f64>>;

    /// Test if given point is a root of the system, given the tolerance `eps`
    /// for the magnitude of every component of the image.
    fn is_root(&self, x: &DVector<f64>, eps: f64) -> bool {
        self.eval_point(x).iter().all(|fx| fx.mag() <= eps)
    }
}

fn interval_box(bounds: &[(f64, f64)]) -> IntervalBox {
    bounds.iter().map(|&(lo, hi)| Interval::new(lo, hi)).collect()
}

/// *x² - 2* on \[-5, 5\].
///
/// Two simple roots *±√2*, symmetric with respect to the midpoint of the
/// region.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quadratic(());

impl Quadratic {
    /// Initializes the system.
    pub fn new() -> Self {
        Self(())
    }
}

impl Function for Quadratic {
    fn apply<N: Number>(&self, x: N) -> N {
        x.sqr() - 2.0
    }
}

impl TestSystem for Quadratic {
    fn region(&self) -> IntervalBox {
        IntervalBox::from(Interval::new(-5.0, 5.0))
    }

    fn roots(&self) -> Vec<DVector<f64>> {
        vec![dvector![-(2f64.sqrt())], dvector![2f64.sqrt()]]
    }
}

/// *x² - 2x* on \[0, 10\].
///
/// One root lies on the boundary of the region, where uniqueness can never
/// be proven.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftedQuadratic(());

impl ShiftedQuadratic {
    /// Initializes the system.
    pub fn new() -> Self {
        Self(())
    }
}

impl Function for ShiftedQuadratic {
    fn apply<N: Number>(&self, x: N) -> N {
        x.sqr() - x * 2.0
    }
}

impl TestSystem for ShiftedQuadratic {
    fn region(&self) -> IntervalBox {
        IntervalBox::from(Interval::new(0.0, 10.0))
    }

    fn roots(&self) -> Vec<DVector<f64>> {
        vec![dvector![0.0], dvector![2.0]]
    }
}

/// *(x² - 2)² (x² - 3)* on \[-10, 10\].
///
/// The roots *±√2* are double, the derivative vanishes there and they can be
/// enclosed only up to the tolerance. The roots *±√3* are simple.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleRoots(());

impl DoubleRoots {
    /// Initializes the system.
    pub fn new() -> Self {
        Self(())
    }
}

impl Function for DoubleRoots {
    fn apply<N: Number>(&self, x: N) -> N {
        let x2 = x.sqr();
        (x2 - 2.0).sqr() * (x2 - 3.0)
    }
}

impl TestSystem for DoubleRoots {
    fn region(&self) -> IntervalBox {
        IntervalBox::from(Interval::new(-10.0, 10.0))
    }

    fn roots(&self) -> Vec<DVector<f64>> {
        vec![
            dvector![-(3f64.sqrt())],
            dvector![-(2f64.sqrt())],
            dvector![2f64.sqrt()],
            dvector![3f64.sqrt()],
        ]
    }
}

/// *ln x* on \[-2, 2\].
///
/// Half of the region is outside of the domain of the function.
#[derive(Debug, Clone, Copy, Default)]
pub struct Logarithm(());

impl Logarithm {
    /// Initializes the system.
    pub fn new() -> Self {
        Self(())
    }
}

impl Function for Logarithm {
    fn apply<N: Number>(&self, x: N) -> N {
        x.ln()
    }
}

impl TestSystem for Logarithm {
    fn region(&self) -> IntervalBox {
        IntervalBox::from(Interval::new(-2.0, 2.0))
    }

    fn roots(&self) -> Vec<DVector<f64>> {
        vec![dvector![1.0]]
    }
}

/// *sin(eˣ)* on \[0, 2\].
///
/// Roots *ln π* and *ln 2π*.
#[derive(Debug, Clone, Copy, Default)]
pub struct SinExp(());

impl SinExp {
    /// Initializes the system.
    pub fn new() -> Self {
        Self(())
    }
}

impl Function for SinExp {
    fn apply<N: Number>(&self, x: N) -> N {
        x.exp().sin()
    }
}

impl TestSystem for SinExp {
    fn region(&self) -> IntervalBox {
        IntervalBox::from(Interval::new(0.0, 2.0))
    }

    fn roots(&self) -> Vec<DVector<f64>> {
        vec![dvector![PI.ln()], dvector![(2.0 * PI).ln()]]
    }
}

/// *cos(x) sin(1/x)* on \[0.05, 1\].
///
/// The function oscillates faster towards zero. Roots are *1/(kπ)* for *k =
/// 1, ..., 6*.
#[derive(Debug, Clone, Copy, Default)]
pub struct SinRecip(());

impl SinRecip {
    /// Initializes the system.
    pub fn new() -> Self {
        Self(())
    }
}

impl Function for SinRecip {
    fn apply<N: Number>(&self, x: N) -> N {
        x.cos() * x.powi(-1).sin()
    }
}

impl TestSystem for SinRecip {
    fn region(&self) -> IntervalBox {
        IntervalBox::from(Interval::new(0.05, 1.0))
    }

    fn roots(&self) -> Vec<DVector<f64>> {
        (1..=6)
            .rev()
            .map(|k| dvector![1.0 / (k as f64 * PI)])
            .collect()
    }
}

/// *\[sin x, cos y\]* on \[-3, 3\]².
///
/// Roots *(0, ±π/2)*. The Jacobian matrix is diagonal, which makes the system
/// suitable for testing explicit Jacobians.
#[derive(Debug, Clone, Copy, Default)]
pub struct SinCos(());

impl SinCos {
    /// Initializes the system.
    pub fn new() -> Self {
        Self(())
    }
}

impl System for SinCos {
    fn dim(&self) -> usize {
        2
    }

    fn eval<N: Number>(&self, x: &DVector<N>, fx: &mut DVector<N>) {
        fx[0] = x[0].sin();
        fx[1] = x[1].cos();
    }
}

impl TestSystem for SinCos {
    fn region(&self) -> IntervalBox {
        interval_box(&[(-3.0, 3.0), (-3.0, 3.0)])
    }

    fn roots(&self) -> Vec<DVector<f64>> {
        vec![dvector![0.0, -PI / 2.0], dvector![0.0, PI / 2.0]]
    }
}

/// *\[x² - 4, y² - 16\]* on \[-10, 10\]².
///
/// Four roots *(±2, ±4)*.
#[derive(Debug, Clone, Copy, Default)]
pub struct Squares(());

impl Squares {
    /// Initializes the system.
    pub fn new() -> Self {
        Self(())
    }
}

impl System for Squares {
    fn dim(&self) -> usize {
        2
    }

    fn eval<N: Number>(&self, x: &DVector<N>, fx: &mut DVector<N>) {
        fx[0] = x[0].sqr() - 4.0;
        fx[1] = x[1].sqr() - 16.0;
    }
}

impl TestSystem for Squares {
    fn region(&self) -> IntervalBox {
        interval_box(&[(-10.0, 10.0), (-10.0, 10.0)])
    }

    fn roots(&self) -> Vec<DVector<f64>> {
        let mut roots = Vec::new();
        for x in [-2.0, 2.0] {
            for y in [-4.0, 4.0] {
                roots.push(dvector![x, y]);
            }
        }
        roots
    }
}

/// Intersection of a sphere, a cylinder and a paraboloid \[2\].
///
/// ```text
/// x₁² + x₂² + x₃² = 1
/// x₁² + x₃² = 1/4
/// x₁² + x₂² = 4 x₃
/// ```
///
/// on \[-5, 5\]³. Four roots *(±√(1/4 - x₃²), ±√3/2, √5 - 2)*.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sphere3(());

impl Sphere3 {
    /// Initializes the system.
    pub fn new() -> Self {
        Self(())
    }
}

impl System for Sphere3 {
    fn dim(&self) -> usize {
        3
    }

    fn eval<N: Number>(&self, x: &DVector<N>, fx: &mut DVector<N>) {
        let x1 = x[0].sqr();
        let x2 = x[1].sqr();
        let x3 = x[2].sqr();

        fx[0] = x1 + x2 + x3 - 1.0;
        fx[1] = x1 + x3 - 0.25;
        fx[2] = x1 + x2 - x[2] * 4.0;
    }
}

impl TestSystem for Sphere3 {
    fn region(&self) -> IntervalBox {
        interval_box(&[(-5.0, 5.0), (-5.0, 5.0), (-5.0, 5.0)])
    }

    fn roots(&self) -> Vec<DVector<f64>> {
        let x3 = 5f64.sqrt() - 2.0;
        let x1 = (0.25 - x3 * x3).sqrt();
        let x2 = 3f64.sqrt() / 2.0;

        let mut roots = Vec::new();
        for s1 in [-1.0, 1.0] {
            for s2 in [-1.0, 1.0] {
                roots.push(dvector![s1 * x1, s2 * x2, x3]);
            }
        }
        roots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check<F: TestSystem>(f: &F) {
        let region = f.region();
        assert_eq!(region.dim(), f.dim());

        for x in f.roots() {
            assert!(region.contains(x.as_slice()), "{:?} outside of region", x.as_slice());
            assert!(f.is_root(&x, 1e-12), "{:?} is not a root", x.as_slice());
        }
    }

    #[test]
    fn roots_are_roots() {
        check(&Quadratic::new());
        check(&ShiftedQuadratic::new());
        check(&DoubleRoots::new());
        check(&Logarithm::new());
        check(&SinExp::new());
        check(&SinRecip::new());
        check(&SinCos::new());
        check(&Squares::new());
        check(&Sphere3::new());
    }

    #[test]
    fn not_a_root() {
        let f = Squares::new();
        assert!(!f.is_root(&dvector![2.0, 3.0], 1e-6));
    }
}
