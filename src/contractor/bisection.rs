//! Bisection contractor.
//!
//! Evaluates the interval extension of the system over the region and
//! discards the region if the image does not contain zero. Otherwise the
//! region is left for further bisection. The contractor can never prove
//! existence or uniqueness of a root, it only prunes the search space. On the
//! other hand it does not need any derivative.

use crate::core::{Contraction, Contractor, Root, System};
use crate::derivatives::Derivative;

use super::{exclude, undetermined};

/// Bisection contractor. See [module](self) documentation for more details.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bisection;

impl Bisection {
    /// Initializes bisection contractor.
    pub fn new() -> Self {
        Self
    }
}

impl<F: System> Contractor<F> for Bisection {
    const NAME: &'static str = "Bisection";

    fn contract<D: Derivative<F>>(&self, f: &F, _derivative: &D, root: &Root) -> Contraction {
        exclude(f, root).unwrap_or_else(|| undetermined(root))
    }
}
