#![allow(clippy::many_single_char_names)]
#![allow(clippy::type_complexity)]
#![warn(missing_docs)]

//! # ivroots
//!
//! A pure Rust framework and implementation of rigorous methods for finding
//! *all* roots of nonlinear systems of equations in a bounded region.
//!
//! The library combines interval arithmetic with a branch-and-bound search.
//! Every returned region either provably contains exactly one root, or is
//! reported as undetermined. The complement of the returned regions is
//! certified to contain no root at all. Unlike local numerical methods, no
//! initial guess is needed and no root is missed, even in regions where the
//! function is not defined.
//!
//! ## Contractors
//!
//! * [Newton](contractor::newton) -- Interval Newton method. Recommended
//!   method to be used as a default.
//! * [Krawczyk](contractor::krawczyk) -- Interval Krawczyk method. Does not
//!   solve an interval linear system, more forgiving for wide Jacobian
//!   matrices of multivariate systems.
//! * [Bisection](contractor::bisection) -- Only discards regions without
//!   roots. Useful when no derivative is available.
//!
//! ## Problem
//!
//! The problem of finding roots of a system of nonlinear equations is about
//! finding values of *n* variables given *n* equations that have to be
//! satisfied, here within a given region *X*.
//!
//! Mathematically, the problem is formulated as
//!
//! ```text
//! F(x) = 0, x ∈ X
//!
//! where F(x) = { f1(x), ..., fn(x) }
//! and X = [L1, U1] × ... × [Ln, Un]
//! ```
//!
//! When it comes to code, the problem is any type that implements the
//! [`System`] trait, or the [`Function`] trait for scalar functions.
//!
//! ```rust
//! // ivroots is based on `nalgebra` crate.
//! use ivroots::nalgebra as na;
//! use ivroots::{Number, System};
//!
//! // A problem is represented by a type.
//! struct Circle {
//!     r: f64,
//! }
//!
//! impl System for Circle {
//!     // The number of equations and unknowns.
//!     fn dim(&self) -> usize {
//!         2
//!     }
//!
//!     // Evaluate trial values of variables to the system.
//!     fn eval<N: Number>(&self, x: &na::DVector<N>, fx: &mut na::DVector<N>) {
//!         // Compute the residuals of all equations.
//!         fx[0] = x[0].sqr() + x[1].sqr() - self.r * self.r;
//!         fx[1] = x[0] - x[1];
//!     }
//! }
//! ```
//!
//! And that's it. There is no need for defining the Jacobian matrix. The
//! evaluation is generic over the number type, so the library evaluates the
//! system over [intervals](Interval) to bound its image and over [dual
//! numbers](derivatives::Dual) to bound its derivatives. If you know the
//! Jacobian matrix in a closed form, you can still provide it (see
//! [`derivatives`]).
//!
//! ## Searching
//!
//! When you have your system available, you can use the [`RootSearch`] to
//! run the search until every region is resolved.
//!
//! ```rust
//! use ivroots::{Interval, IntervalBox, RootSearch};
//! # use ivroots::nalgebra as na;
//! # use ivroots::{Number, System};
//! #
//! # struct Circle {
//! #     r: f64,
//! # }
//! #
//! # impl System for Circle {
//! #     fn dim(&self) -> usize {
//! #         2
//! #     }
//! #
//! #     fn eval<N: Number>(&self, x: &na::DVector<N>, fx: &mut na::DVector<N>) {
//! #         fx[0] = x[0].sqr() + x[1].sqr() - self.r * self.r;
//! #         fx[1] = x[0] - x[1];
//! #     }
//! # }
//!
//! let f = Circle { r: 1.0 };
//! let region = IntervalBox::from([Interval::new(-3.0, 3.0), Interval::new(-3.0, 3.0)]);
//!
//! let mut search = RootSearch::builder(&f, region)
//!     .with_abstol(1e-10)
//!     .build()
//!     .expect("invalid configuration");
//!
//! let roots = search.find(|state| {
//!     println!("iter = {}\tworking = {}", state.iter(), state.worklist().len());
//!     state.iter() >= 10_000
//! });
//!
//! for root in roots {
//!     println!("{}", root);
//! }
//! ```
//!
//! ## Logging
//!
//! The library logs the decisions of the search and contractors through the
//! [`log`](https://docs.rs/log) facade at the debug level. No logger is
//! installed by the library.
//!
//! ## License
//!
//! Licensed under MIT.

pub mod contractor;
mod core;
pub mod derivatives;
pub mod driver;
pub mod interval;
pub mod linear;
pub mod quadratic;
pub mod tree;

pub use core::*;
pub use driver::{roots, RootSearch};
pub use interval::{Decoration, Interval, IntervalBox, IntervalMatrix, IntervalVector};

#[cfg(feature = "testing")]
pub mod testing;

#[cfg(not(feature = "testing"))]
pub(crate) mod testing;

pub use nalgebra;
