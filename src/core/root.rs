use std::fmt;

use getset::{CopyGetters, Getters};

use crate::interval::IntervalBox;

/// Classification of a region with respect to the roots inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootStatus {
    /// The region contains exactly one root.
    Unique,
    /// Nothing is known about the roots in the region. It may contain no,
    /// one or many roots.
    Unknown,
    /// The region contains no root. Such regions are discarded by the search
    /// and never returned to the user.
    Empty,
}

impl fmt::Display for RootStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RootStatus::Unique => "unique",
            RootStatus::Unknown => "unknown",
            RootStatus::Empty => "empty",
        };
        f.write_str(s)
    }
}

/// Region paired with its [status](RootStatus).
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct Root {
    /// The region.
    #[getset(get = "pub")]
    region: IntervalBox,
    /// Status of the region.
    #[getset(get_copy = "pub")]
    status: RootStatus,
}

impl Root {
    /// Creates the root from a region and its status.
    ///
    /// The region is stored [bare](IntervalBox::bare), the decorations of the
    /// computation that produced it are dropped.
    pub fn new(region: IntervalBox, status: RootStatus) -> Self {
        Self {
            region: region.bare(),
            status,
        }
    }

    /// Creates a region containing exactly one root.
    pub fn unique(region: IntervalBox) -> Self {
        Self::new(region, RootStatus::Unique)
    }

    /// Creates a region with unknown roots.
    pub fn unknown(region: IntervalBox) -> Self {
        Self::new(region, RootStatus::Unknown)
    }

    /// Creates a region without roots.
    pub fn empty(region: IntervalBox) -> Self {
        Self::new(region, RootStatus::Empty)
    }

    /// Returns `true` if the region contains exactly one root.
    pub fn is_unique(&self) -> bool {
        self.status == RootStatus::Unique
    }

    /// Returns `true` if the region contains no root.
    pub fn is_empty(&self) -> bool {
        self.status == RootStatus::Empty
    }

    /// Unwraps the region.
    pub fn into_region(self) -> IntervalBox {
        self.region
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Root(")?;
        fmt::Display::fmt(&self.region, f)?;
        write!(f, ", {})", self.status)
    }
}

/// Result of a contraction.
///
/// Most contractions produce a single root (possibly empty). The extended
/// division in the one-dimensional Newton contractor may split the region
/// into two disjoint candidates, lower one first.
#[derive(Debug, Clone, PartialEq)]
pub enum Contraction {
    /// The region was classified (and possibly tightened).
    Single(Root),
    /// The region was split into two candidates with unknown roots.
    Split(Root, Root),
}

impl Contraction {
    /// Returns the resulting roots.
    pub fn into_roots(self) -> Vec<Root> {
        match self {
            Contraction::Single(root) => vec![root],
            Contraction::Split(lower, upper) => vec![lower, upper],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::interval::{Decoration, Interval};

    #[test]
    fn display() {
        let root = Root::unique(IntervalBox::from(Interval::new(1.0, 2.0)));
        assert_eq!(format!("{}", root), "Root([1, 2]_com, unique)");

        let root = Root::unknown(IntervalBox::from([
            Interval::new(0.0, 1.0),
            Interval::new(-1.0, 0.0),
        ]));
        assert_eq!(
            format!("{}", root),
            "Root(([0, 1]_com × [-1, 0]_com), unknown)"
        );
    }

    #[test]
    fn region_is_stored_bare() {
        let x = (Interval::new(1.0, 2.0) * 2.0).degrade(Decoration::Trv);
        let root = Root::unknown(IntervalBox::from(x));

        assert_eq!(root.region()[0], Interval::new(2.0, 4.0));
        assert_eq!(root.region()[0].decoration(), Decoration::Com);
        assert!(!root.region()[0].is_guaranteed());
    }

    #[test]
    fn split_contraction_is_ordered() {
        let lower = Root::unknown(IntervalBox::from(Interval::new(-2.0, -1.0)));
        let upper = Root::unknown(IntervalBox::from(Interval::new(1.0, 2.0)));
        let roots = Contraction::Split(lower.clone(), upper.clone()).into_roots();

        assert_eq!(roots, vec![lower, upper]);
    }
}
