use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use nalgebra::Scalar;
use num_traits::{One, Zero};

use crate::interval::Interval;

/// Numeric type in which systems are evaluated.
///
/// Systems are written once, generically over `N: Number`, and the library
/// evaluates them over [intervals](Interval) (to enclose the image of a
/// region) and over [dual numbers](crate::derivatives::Dual) (to enclose the
/// Jacobian matrix by automatic differentiation).
///
/// Numeric literals must be introduced either through the operators with `f64`
/// on the right-hand side (`x * 2.0`) or with [`Number::constant`].
pub trait Number:
    Scalar
    + Copy
    + Debug
    + Zero
    + One
    + Neg<Output = Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Add<f64, Output = Self>
    + Sub<f64, Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
{
    /// Converts a constant to the number type.
    ///
    /// The constant is not guaranteed to be the exact value intended by the
    /// user (think of `0.1`), which is recorded in the guarantee flag of the
    /// interval.
    fn constant(x: f64) -> Self;

    /// Square.
    fn sqr(self) -> Self;

    /// Integer power.
    fn powi(self, n: i32) -> Self;

    /// Square root.
    fn sqrt(self) -> Self;

    /// Exponential function.
    fn exp(self) -> Self;

    /// Natural logarithm.
    fn ln(self) -> Self;

    /// Sine.
    fn sin(self) -> Self;

    /// Cosine.
    fn cos(self) -> Self;

    /// Tangent.
    fn tan(self) -> Self;

    /// Inverse tangent.
    fn atan(self) -> Self;
}

impl Number for Interval {
    fn constant(x: f64) -> Self {
        Interval::constant(x)
    }

    fn sqr(self) -> Self {
        Interval::sqr(&self)
    }

    fn powi(self, n: i32) -> Self {
        Interval::powi(&self, n)
    }

    fn sqrt(self) -> Self {
        Interval::sqrt(&self)
    }

    fn exp(self) -> Self {
        Interval::exp(&self)
    }

    fn ln(self) -> Self {
        Interval::ln(&self)
    }

    fn sin(self) -> Self {
        Interval::sin(&self)
    }

    fn cos(self) -> Self {
        Interval::cos(&self)
    }

    fn tan(self) -> Self {
        Interval::tan(&self)
    }

    fn atan(self) -> Self {
        Interval::atan(&self)
    }
}
