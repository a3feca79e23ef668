//! Abstractions and types for defining equation systems.
//!
//! # Defining a system
//!
//! A system is any type that implements [`System`] trait. There are two
//! required methods: [`eval`](System::eval) and [`dim`](System::dim). The
//! evaluation is generic over the [number type](Number) so that the library
//! can evaluate the system over intervals as well as over dual numbers for
//! automatic differentiation.
//!
//! ```rust
//! use ivroots::nalgebra as na;
//! use ivroots::{Number, System};
//!
//! // A problem is represented by a type.
//! struct Circle {
//!     r: f64,
//! }
//!
//! impl System for Circle {
//!     // Return the dimension of the system.
//!     fn dim(&self) -> usize {
//!         2
//!     }
//!
//!     // Evaluate the system in given values of the variables.
//!     fn eval<N: Number>(&self, x: &na::DVector<N>, fx: &mut na::DVector<N>) {
//!         fx[0] = x[0].sqr() + x[1].sqr() - self.r * self.r;
//!         fx[1] = x[0] - x[1];
//!     }
//! }
//! ```
//!
//! Scalar functions can implement simpler [`Function`] trait instead.
//!
//! ```rust
//! use ivroots::{Function, Number};
//!
//! struct Quadratic;
//!
//! impl Function for Quadratic {
//!     fn apply<N: Number>(&self, x: N) -> N {
//!         x.sqr() - 2.0
//!     }
//! }
//! ```

use nalgebra::DVector;

use super::number::Number;
use crate::interval::{Interval, IntervalBox};

/// The trait for defining equations systems.
pub trait System {
    /// Return the dimension of the system, i.e., the number of equations and
    /// unknowns.
    fn dim(&self) -> usize;

    /// Calculate the values of the system given values of the variables.
    ///
    /// The implementation must compute the value of every equation into `fx`
    /// using only the operations of [`Number`], so that the result encloses
    /// the image of the system.
    fn eval<N: Number>(&self, x: &DVector<N>, fx: &mut DVector<N>);
}

/// The trait for defining scalar functions of a single variable.
///
/// Every function is a one-dimensional [`System`].
pub trait Function {
    /// Calculate the function value given the value of the variable.
    fn apply<N: Number>(&self, x: N) -> N;
}

impl<F: Function> System for F {
    fn dim(&self) -> usize {
        1
    }

    fn eval<N: Number>(&self, x: &DVector<N>, fx: &mut DVector<N>) {
        fx[0] = self.apply(x[0]);
    }
}

/// Some extensions methods for the [`System`] that are used by the
/// contractors.
pub trait SystemExt: System {
    /// Evaluates the interval extension of the system over the region.
    fn eval_region(&self, x: &IntervalBox) -> IntervalBox;

    /// Evaluates the system in a point, enclosing the rounding errors.
    fn eval_point(&self, x: &DVector<f64>) -> IntervalBox;
}

impl<F: System + ?Sized> SystemExt for F {
    fn eval_region(&self, x: &IntervalBox) -> IntervalBox {
        let mut fx = DVector::from_element(self.dim(), Interval::ZERO);
        self.eval(x.as_vector(), &mut fx);
        IntervalBox::new(fx)
    }

    fn eval_point(&self, x: &DVector<f64>) -> IntervalBox {
        self.eval_region(&IntervalBox::point(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::testing::{Quadratic, SinCos};

    #[test]
    fn function_is_one_dimensional_system() {
        let f = Quadratic::new();
        assert_eq!(f.dim(), 1);

        let fx = f.eval_region(&IntervalBox::from(Interval::new(1.0, 2.0)));
        assert_eq!(fx, IntervalBox::from(Interval::new(-1.0, 2.0)));
    }

    fn image_at_origin<F: System + ?Sized>(f: &F) -> IntervalBox {
        f.eval_point(&DVector::zeros(f.dim()))
    }

    #[test]
    fn extension_without_sized_bound() {
        let fx = image_at_origin(&Quadratic::new());
        assert_eq!(fx, IntervalBox::from(Interval::new(-2.0, -2.0)));
    }

    #[test]
    fn point_evaluation_encloses_value() {
        let f = SinCos::new();
        let fx = f.eval_point(&DVector::from_vec(vec![0.5, 0.5]));

        assert!(fx[0].contains(0.5f64.sin()));
        assert!(fx[1].contains(0.5f64.cos()));
        assert!(fx.is_trusted());
    }
}
