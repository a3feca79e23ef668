use super::{root::Contraction, root::Root, system::System};
use crate::derivatives::Derivative;

/// Interface of a contractor.
///
/// A contractor takes a region and classifies it with respect to the roots of
/// the system inside it. It may also tighten the region, cutting off parts
/// that are proven to contain no root. The search driver repeatedly applies a
/// contractor and bisects the regions that remain inconclusive.
///
/// ## Implementing a contractor
///
/// Here is an implementation of a contractor for systems that are known to
/// have no roots with all variables positive.
///
/// ```rust
/// use ivroots::derivatives::Derivative;
/// use ivroots::{Contraction, Contractor, Root, System};
///
/// struct Positive;
///
/// impl<F: System> Contractor<F> for Positive {
///     const NAME: &'static str = "Positive";
///
///     fn contract<D: Derivative<F>>(&self, _f: &F, _derivative: &D, root: &Root) -> Contraction {
///         let region = root.region().clone();
///
///         if region.iter().all(|xi| xi.lo() > 0.0) {
///             Contraction::Single(Root::empty(region))
///         } else {
///             Contraction::Single(Root::unknown(region))
///         }
///     }
/// }
/// ```
pub trait Contractor<F: System> {
    /// Name of the contractor.
    const NAME: &'static str;

    /// Contracts the region of the root.
    ///
    /// The implementations must not lose any root: every root of the system in
    /// the input region must be in one of the resulting regions with status
    /// other than empty. A root that is already unique must stay unique.
    fn contract<D: Derivative<F>>(&self, f: &F, derivative: &D, root: &Root) -> Contraction;
}
