//! High-level API for finding all roots in a region.
//!
//! The driver encapsulates the whole branch-and-bound process. Regions are
//! taken one by one from a worklist and passed to a [contractor](Contractor).
//! Regions without roots are discarded, regions with a unique root and
//! regions narrower than the tolerance are stored, and the other regions are
//! bisected along their widest dimension and put back to the worklist. The
//! history of the search is kept in a [`SearchTree`].
//!
//! The simplest way of using the driver is the [`roots`] function with the
//! defaults:
//!
//! ```rust
//! use ivroots::{Function, Interval, Number};
//!
//! struct Quadratic;
//!
//! impl Function for Quadratic {
//!     fn apply<N: Number>(&self, x: N) -> N {
//!         x.sqr() - 2.0
//!     }
//! }
//!
//! let roots = ivroots::roots(&Quadratic, Interval::new(-5.0, 5.0)).unwrap();
//!
//! assert_eq!(roots.len(), 2);
//! assert!(roots.iter().all(|root| root.is_unique()));
//! ```
//!
//! If you need to specify additional settings, use the builder:
//!
//! ```rust
//! use ivroots::contractor::Krawczyk;
//! use ivroots::driver::SearchOrder;
//! use ivroots::{Function, Interval, Number, RootSearch};
//! #
//! # struct Quadratic;
//! #
//! # impl Function for Quadratic {
//! #     fn apply<N: Number>(&self, x: N) -> N {
//! #         x.sqr() - 2.0
//! #     }
//! # }
//!
//! let f = Quadratic;
//!
//! let mut search = RootSearch::builder(&f, Interval::new(-5.0, 5.0))
//!     .with_contractor(Krawczyk::new())
//!     .with_search_order(SearchOrder::DepthFirst)
//!     .with_abstol(1e-10)
//!     .build()
//!     .unwrap();
//!
//! let roots = search.run();
//! ```
//!
//! If you need more control over the process, you can do the steps manually
//! and inspect the search tree and the worklist in between:
//!
//! ```rust
//! # use ivroots::{Function, Interval, Number, RootSearch};
//! #
//! # struct Quadratic;
//! #
//! # impl Function for Quadratic {
//! #     fn apply<N: Number>(&self, x: N) -> N {
//! #         x.sqr() - 2.0
//! #     }
//! # }
//! #
//! # let f = Quadratic;
//! let mut search = RootSearch::new(&f, Interval::new(-5.0, 5.0)).unwrap();
//!
//! while let Some(state) = search.step() {
//!     println!("iteration {}: {} regions to process", state.iter(), state.worklist().len());
//!     println!("{}", state.tree());
//! }
//! ```

use std::collections::VecDeque;

use getset::{CopyGetters, Setters};
use log::debug;

use crate::contractor::{refine, Newton};
use crate::core::{Contraction, Contractor, Error, Root, RootStatus, System};
use crate::derivatives::{AutoDiff, Derivative};
use crate::interval::IntervalBox;
use crate::tree::{NodeId, SearchTree};

/// Order in which the regions in the worklist are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOrder {
    /// All regions at a depth of the search tree are processed before the
    /// regions at the next depth.
    BreadthFirst,
    /// Children of a bisected region are processed before its siblings.
    DepthFirst,
}

/// Options for [`RootSearch`].
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct SearchOptions {
    /// Order of processing the regions. Default: BreadthFirst (see
    /// [`SearchOrder`]).
    search_order: SearchOrder,
    /// Regions with unknown roots narrower than this in every dimension are
    /// not bisected anymore. Default: `1e-7`.
    abstol: f64,
    /// Relative position of the split point in bisection. Default: `127/256`.
    split_ratio: f64,
    /// Maximum number of contractions applied to tighten a unique root.
    /// Default: `100`.
    max_refine_iterations: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            search_order: SearchOrder::BreadthFirst,
            abstol: 1e-7,
            split_ratio: 127.0 / 256.0,
            max_refine_iterations: 100,
        }
    }
}

impl SearchOptions {
    fn validate(&self) -> Result<(), Error> {
        if !self.abstol.is_finite() || self.abstol <= 0.0 {
            return Err(Error::InvalidTolerance(self.abstol));
        }

        // Also rejects NaN.
        if !(self.split_ratio > 0.0 && self.split_ratio < 1.0) {
            return Err(Error::InvalidSplitRatio(self.split_ratio));
        }

        Ok(())
    }
}

/// Builder for the [`RootSearch`].
pub struct RootSearchBuilder<'a, F, C, D> {
    f: &'a F,
    region: IntervalBox,
    contractor: C,
    derivative: D,
    options: SearchOptions,
}

impl<'a, F: System, C, D> RootSearchBuilder<'a, F, C, D> {
    /// Sets specific contractor to be used.
    pub fn with_contractor<C2: Contractor<F>>(self, contractor: C2) -> RootSearchBuilder<'a, F, C2, D> {
        RootSearchBuilder {
            f: self.f,
            region: self.region,
            contractor,
            derivative: self.derivative,
            options: self.options,
        }
    }

    /// Sets the evaluator of the Jacobian matrix, for example
    /// [`ExplicitJacobian`](crate::derivatives::ExplicitJacobian).
    pub fn with_derivative<D2: Derivative<F>>(self, derivative: D2) -> RootSearchBuilder<'a, F, C, D2> {
        RootSearchBuilder {
            f: self.f,
            region: self.region,
            contractor: self.contractor,
            derivative,
            options: self.options,
        }
    }

    /// Replaces all options.
    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the order of processing the regions.
    pub fn with_search_order(mut self, search_order: SearchOrder) -> Self {
        self.options.set_search_order(search_order);
        self
    }

    /// Sets the absolute tolerance for the width of regions with unknown
    /// roots.
    pub fn with_abstol(mut self, abstol: f64) -> Self {
        self.options.set_abstol(abstol);
        self
    }

    /// Sets the relative position of the split point in bisection.
    pub fn with_split_ratio(mut self, split_ratio: f64) -> Self {
        self.options.set_split_ratio(split_ratio);
        self
    }
}

impl<'a, F: System, C: Contractor<F>, D: Derivative<F>> RootSearchBuilder<'a, F, C, D> {
    /// Validates the configuration and builds the [`RootSearch`].
    pub fn build(self) -> Result<RootSearch<'a, F, C, D>, Error> {
        let Self {
            f,
            region,
            contractor,
            derivative,
            options,
        } = self;

        if f.dim() == 0 || region.dim() != f.dim() {
            return Err(Error::InvalidDimensionality {
                system: f.dim(),
                region: region.dim(),
            });
        }

        if region.is_empty() {
            return Err(Error::EmptyRegion);
        }

        if !region.is_bounded() {
            return Err(Error::UnboundedRegion);
        }

        options.validate()?;

        let tree = SearchTree::new(Root::unknown(region));
        let worklist = VecDeque::from(vec![tree.root_id()]);

        Ok(RootSearch {
            f,
            contractor,
            derivative,
            options,
            tree,
            worklist,
            iter: 0,
        })
    }
}

/// The driver for the process of finding all roots in a region.
///
/// For default settings, use [`RootSearch::new`]. For more flexibility, use
/// [`RootSearch::builder`]. For the usage of the driver, see [module](self)
/// documentation.
pub struct RootSearch<'a, F, C = Newton, D = AutoDiff> {
    f: &'a F,
    contractor: C,
    derivative: D,
    options: SearchOptions,
    tree: SearchTree,
    worklist: VecDeque<NodeId>,
    iter: usize,
}

impl<'a, F: System> RootSearch<'a, F, Newton, AutoDiff> {
    /// Returns the builder for specifying additional settings.
    pub fn builder<R: Into<IntervalBox>>(f: &'a F, region: R) -> RootSearchBuilder<'a, F, Newton, AutoDiff> {
        RootSearchBuilder {
            f,
            region: region.into(),
            contractor: Newton::new(),
            derivative: AutoDiff::new(),
            options: SearchOptions::default(),
        }
    }

    /// Initializes the driver with the default settings.
    pub fn new<R: Into<IntervalBox>>(f: &'a F, region: R) -> Result<Self, Error> {
        Self::builder(f, region).build()
    }
}

impl<'a, F: System, C: Contractor<F>, D: Derivative<F>> RootSearch<'a, F, C, D> {
    /// Processes one region from the worklist.
    ///
    /// Returns the state after the step, or `None` if there was nothing to
    /// process.
    pub fn step(&mut self) -> Option<SearchState<'_>> {
        let (id, root) = loop {
            let id = self.worklist.pop_front()?;

            if let Some(root) = self.tree.working_root(id) {
                break (id, root.clone());
            }
        };

        match self.contractor.contract(self.f, &self.derivative, &root) {
            Contraction::Single(contracted) => self.process(id, contracted),
            Contraction::Split(lower, upper) => {
                debug!("split {} into {} and {}", root.region(), lower.region(), upper.region());
                self.branch(id, lower, upper);
            }
        }

        self.iter += 1;
        Some(self.state())
    }

    fn process(&mut self, id: NodeId, root: Root) {
        match root.status() {
            RootStatus::Empty => {
                debug!("discarded {}", root.region());
                self.tree.set_root(id, root);
                self.tree.finalize(id);
            }
            RootStatus::Unique => {
                let refined = refine(
                    self.f,
                    &self.derivative,
                    &self.contractor,
                    &root,
                    self.options.max_refine_iterations,
                );
                debug!("stored unique root {}", refined.region());
                self.tree.set_root(id, refined);
                self.tree.finalize(id);
            }
            RootStatus::Unknown if root.region().width() <= self.options.abstol => {
                debug!("stored unknown root {} under tolerance", root.region());
                self.tree.set_root(id, root);
                self.tree.finalize(id);
            }
            RootStatus::Unknown => {
                let x = root.region();
                let dim = x.widest_dim();
                let (lower, upper) = x.bisect_at(dim, self.options.split_ratio);

                // The split point coincides with a bound when the region is
                // too narrow to be split in floating point numbers.
                let split = lower[dim].hi();
                if split <= x[dim].lo() || split >= x[dim].hi() {
                    debug!("stored unknown root {} that cannot be bisected", x);
                    self.tree.set_root(id, root);
                    self.tree.finalize(id);
                    return;
                }

                debug!("bisected {} in dimension {} at {}", x, dim, split);
                self.branch(id, Root::unknown(lower), Root::unknown(upper));
            }
        }
    }

    fn branch(&mut self, id: NodeId, lower: Root, upper: Root) {
        let [lower, upper] = self.tree.branch(id, lower, upper);

        match self.options.search_order {
            SearchOrder::BreadthFirst => {
                self.worklist.push_back(lower);
                self.worklist.push_back(upper);
            }
            SearchOrder::DepthFirst => {
                self.worklist.push_front(upper);
                self.worklist.push_front(lower);
            }
        }
    }

    /// Runs the search until given stopping criterion is satisfied or there
    /// are no regions left to process. Returns the roots found so far.
    ///
    /// Stopping early does not invalidate the returned roots, but the regions
    /// still in the worklist are not covered by them.
    pub fn find<S>(&mut self, stop: S) -> Vec<Root>
    where
        S: Fn(SearchState<'_>) -> bool,
    {
        loop {
            let done = match self.step() {
                Some(state) => stop(state),
                None => true,
            };

            if done {
                return self.roots();
            }
        }
    }

    /// Runs the search to completion and returns the roots.
    pub fn run(&mut self) -> Vec<Root> {
        self.find(|_| false)
    }

    /// Returns the name of the used contractor.
    pub fn name(&self) -> &str {
        C::NAME
    }
}

impl<'a, F, C, D> RootSearch<'a, F, C, D> {
    /// Returns the current state of the search.
    pub fn state(&self) -> SearchState<'_> {
        SearchState {
            tree: &self.tree,
            worklist: &self.worklist,
            iter: self.iter,
        }
    }

    /// Returns the roots stored so far, ordered from left to right.
    pub fn roots(&self) -> Vec<Root> {
        self.tree.roots()
    }

    /// Returns `true` if there are no regions left to process.
    pub fn is_finished(&self) -> bool {
        self.worklist.is_empty()
    }

    /// Returns the options.
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }
}

/// State of the search after a step.
#[derive(Debug, Clone, Copy)]
pub struct SearchState<'a> {
    tree: &'a SearchTree,
    worklist: &'a VecDeque<NodeId>,
    iter: usize,
}

impl<'a> SearchState<'a> {
    /// Returns the search tree.
    pub fn tree(&self) -> &'a SearchTree {
        self.tree
    }

    /// Returns the leaves waiting to be processed, in the order they will be
    /// processed.
    pub fn worklist(&self) -> &'a VecDeque<NodeId> {
        self.worklist
    }

    /// Returns the number of steps done.
    pub fn iter(&self) -> usize {
        self.iter
    }
}

/// Finds all roots of the system in the region with the default settings.
///
/// See [`RootSearch::builder`] for more options.
pub fn roots<F: System, R: Into<IntervalBox>>(f: &F, region: R) -> Result<Vec<Root>, Error> {
    Ok(RootSearch::new(f, region)?.run())
}
