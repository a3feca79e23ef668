use thiserror::Error;

/// Error in the configuration of a root search.
///
/// These are reported before any search work begins. Numerical difficulties
/// encountered during the search (singular Jacobian matrices, evaluations
/// outside of the domain of the function) never surface as errors, they are
/// reflected in the [status](super::RootStatus) of the returned roots instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The dimension of the search region does not match the dimension
    /// ([`System::dim`](super::System::dim)) of the system, or the system is
    /// zero-dimensional.
    #[error("invalid dimensionality: system has {system}, region has {region}")]
    InvalidDimensionality {
        /// Dimension of the system.
        system: usize,
        /// Dimension of the search region.
        region: usize,
    },
    /// The search region is empty.
    #[error("search region is empty")]
    EmptyRegion,
    /// The search region has an infinite bound.
    #[error("search region is unbounded")]
    UnboundedRegion,
    /// The absolute tolerance is not a positive finite number.
    #[error("invalid tolerance {0}")]
    InvalidTolerance(f64),
    /// The split ratio is not in the open interval (0, 1).
    #[error("invalid split ratio {0}")]
    InvalidSplitRatio(f64),
}
