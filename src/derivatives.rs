//! Tools for derivative-based contractors.
//!
//! The [Newton](crate::contractor::newton) and
//! [Krawczyk](crate::contractor::krawczyk) contractors need an enclosure of the
//! Jacobian matrix of the system over the whole region. This module provides
//! the [`Derivative`] capability and its implementations:
//!
//! * [`AutoDiff`] -- Forward-mode automatic differentiation using [dual
//!   numbers](Dual). Works for any [`System`] and is the default.
//! * [`ExplicitJacobian`] -- Jacobian matrix given by a user closure.
//! * [`ExplicitDerivative`] -- Derivative of a scalar function given by a user
//!   closure.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use nalgebra::DVector;
use num_traits::{One, Zero};

use crate::core::{Number, System};
use crate::interval::{Interval, IntervalBox, IntervalMatrix};

/// Capability of enclosing the Jacobian matrix of a system over a region.
pub trait Derivative<F: System> {
    /// Returns an interval matrix that contains the Jacobian matrix of the
    /// system in every point of the region.
    ///
    /// The matrix is expected to be square of the dimension of the system.
    /// Contractors treat a matrix of a different shape as unusable.
    fn jacobian(&self, f: &F, x: &IntervalBox) -> IntervalMatrix;
}

/// Dual number with interval components for forward-mode automatic
/// differentiation.
///
/// The value encloses the function value and the derivative encloses the
/// directional derivative of the function with respect to the seeded
/// variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dual {
    v: Interval,
    d: Interval,
}

impl Dual {
    /// Creates a dual number with given value and derivative.
    pub fn new(value: Interval, derivative: Interval) -> Self {
        Self {
            v: value,
            d: derivative,
        }
    }

    /// Creates an independent variable (with unit derivative).
    pub fn variable(value: Interval) -> Self {
        Self::new(value, Interval::ONE)
    }

    /// Value part.
    pub fn value(&self) -> Interval {
        self.v
    }

    /// Derivative part.
    pub fn derivative(&self) -> Interval {
        self.d
    }

    // Functions outside of their domain: the derivative is no more trustworthy
    // than the value.
    fn chain(v: Interval, d: Interval) -> Self {
        Self::new(v, d.degrade(v.decoration()))
    }
}

impl Neg for Dual {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.v, -self.d)
    }
}

impl Add for Dual {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.v + rhs.v, self.d + rhs.d)
    }
}

impl Sub for Dual {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.v - rhs.v, self.d - rhs.d)
    }
}

impl Mul for Dual {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(self.v * rhs.v, self.d * rhs.v + self.v * rhs.d)
    }
}

impl Div for Dual {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        let q = self.v / rhs.v;
        Self::new(q, (self.d - q * rhs.d) / rhs.v)
    }
}

impl Add<f64> for Dual {
    type Output = Self;

    fn add(self, rhs: f64) -> Self::Output {
        Self::new(self.v + rhs, self.d)
    }
}

impl Sub<f64> for Dual {
    type Output = Self;

    fn sub(self, rhs: f64) -> Self::Output {
        Self::new(self.v - rhs, self.d)
    }
}

impl Mul<f64> for Dual {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.v * rhs, self.d * rhs)
    }
}

impl Div<f64> for Dual {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.v / rhs, self.d / rhs)
    }
}

impl AddAssign for Dual {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Dual {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Dual {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl DivAssign for Dual {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl Zero for Dual {
    fn zero() -> Self {
        Self::new(Interval::ZERO, Interval::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.v.is_zero() && self.d.is_zero()
    }
}

impl One for Dual {
    fn one() -> Self {
        Self::new(Interval::ONE, Interval::ZERO)
    }
}

impl Number for Dual {
    fn constant(x: f64) -> Self {
        Self::new(Interval::constant(x), Interval::ZERO)
    }

    fn sqr(self) -> Self {
        let two = Interval::point(2.0);
        Self::new(self.v.sqr(), two * self.v * self.d)
    }

    fn powi(self, n: i32) -> Self {
        if n == 0 {
            return Self::new(self.v.powi(0), Interval::ZERO);
        }

        let dn = Interval::point(n as f64) * self.v.powi(n - 1);
        Self::chain(self.v.powi(n), dn * self.d)
    }

    fn sqrt(self) -> Self {
        let s = self.v.sqrt();
        Self::chain(s, self.d / (Interval::point(2.0) * s))
    }

    fn exp(self) -> Self {
        let e = self.v.exp();
        Self::new(e, e * self.d)
    }

    fn ln(self) -> Self {
        Self::chain(self.v.ln(), self.d / self.v)
    }

    fn sin(self) -> Self {
        Self::new(self.v.sin(), self.v.cos() * self.d)
    }

    fn cos(self) -> Self {
        Self::new(self.v.cos(), -self.v.sin() * self.d)
    }

    fn tan(self) -> Self {
        let t = self.v.tan();
        Self::chain(t, (Interval::ONE + t.sqr()) * self.d)
    }

    fn atan(self) -> Self {
        Self::new(self.v.atan(), self.d / (Interval::ONE + self.v.sqr()))
    }
}

/// Forward-mode automatic differentiation.
///
/// The Jacobian matrix is computed column by column, each column by one
/// evaluation of the system over [dual numbers](Dual) seeded in the
/// corresponding variable.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoDiff;

impl AutoDiff {
    /// Initializes automatic differentiation.
    pub fn new() -> Self {
        Self
    }
}

impl<F: System> Derivative<F> for AutoDiff {
    fn jacobian(&self, f: &F, x: &IntervalBox) -> IntervalMatrix {
        let n = f.dim();
        let mut jac = IntervalMatrix::from_element(n, n, Interval::ZERO);
        let mut fx = DVector::from_element(n, Dual::zero());

        for j in 0..n {
            let xd = DVector::from_fn(n, |i, _| {
                if i == j {
                    Dual::variable(x[i])
                } else {
                    Dual::new(x[i], Interval::ZERO)
                }
            });

            f.eval(&xd, &mut fx);

            for i in 0..n {
                jac[(i, j)] = fx[i].derivative();
            }
        }

        jac
    }
}

/// Jacobian matrix given explicitly by a closure.
///
/// ```rust
/// use ivroots::derivatives::ExplicitJacobian;
/// use ivroots::nalgebra::dmatrix;
/// use ivroots::{Interval, IntervalBox};
///
/// // Jacobian matrix of [sin(x), cos(y)].
/// let derivative = ExplicitJacobian(|x: &IntervalBox| {
///     dmatrix![x[0].cos(), Interval::ZERO; Interval::ZERO, -x[1].sin()]
/// });
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ExplicitJacobian<G>(pub G);

impl<F, G> Derivative<F> for ExplicitJacobian<G>
where
    F: System,
    G: Fn(&IntervalBox) -> IntervalMatrix,
{
    fn jacobian(&self, _f: &F, x: &IntervalBox) -> IntervalMatrix {
        (self.0)(x)
    }
}

/// Derivative of a scalar function given explicitly by a closure.
///
/// ```rust
/// use ivroots::derivatives::ExplicitDerivative;
/// use ivroots::Interval;
///
/// // Derivative of ln(x).
/// let derivative = ExplicitDerivative(|x: Interval| Interval::ONE / x);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ExplicitDerivative<G>(pub G);

impl<F, G> Derivative<F> for ExplicitDerivative<G>
where
    F: System,
    G: Fn(Interval) -> Interval,
{
    fn jacobian(&self, _f: &F, x: &IntervalBox) -> IntervalMatrix {
        IntervalMatrix::from_element(1, 1, (self.0)(x[0]))
    }
}

/// Returns `true` if all entries of the matrix are
/// [trusted](Interval::is_trusted).
pub(crate) fn is_trusted(jac: &IntervalMatrix) -> bool {
    jac.iter().all(Interval::is_trusted)
}
