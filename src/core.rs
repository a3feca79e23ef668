//! Core abstractions and types for ivroots.
//!
//! *Users* are mainly interested in implementing the [`System`] trait (or
//! [`Function`] trait for scalar functions) and reading the resulting
//! [roots](Root).
//!
//! Algorithms *developers* are interested in implementing the [`Contractor`]
//! trait and using extension trait [`SystemExt`] as well as tools in
//! [derivatives](crate::derivatives) and [linear](crate::linear) modules.

mod base;
mod contractor;
mod number;
mod root;
mod system;

pub use base::*;
pub use contractor::*;
pub use number::*;
pub use root::*;
pub use system::*;
