//! Interval arithmetic with decorations.
//!
//! [`Interval`] is a closed real interval `[lo, hi]` with `f64` bounds (which
//! may be infinite) or the empty set. It is a thin layer over the decorated
//! intervals of the [inari](https://docs.rs/inari) crate, which implements the
//! IEEE 1788 standard: all operations round outward, elementary functions are
//! correctly rounded, and functions evaluated partially outside of their
//! natural domain (such as [`ln`](Interval::ln) of an interval reaching below
//! zero) return the image of the part inside the domain.
//!
//! Each interval carries a [`Decoration`] telling whether all operations that
//! produced it were defined and continuous on their inputs and a guarantee
//! flag that is cleared when a non-interval `f64` constant (that may not be
//! what the user intended, such as `0.1`) was mixed in. The root finding
//! algorithms only use the decoration to decide whether a result is
//! [trusted](Interval::is_trusted).
//!
//! # References
//!
//! \[1\] [IEEE Standard for Interval Arithmetic (IEEE
//! 1788-2015)](https://standards.ieee.org/ieee/1788/4431/)
//!
//! \[2\] [Validated Numerics: A Short Introduction to Rigorous
//! Computations](https://press.princeton.edu/books/hardcover/9780691147819/validated-numerics)

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use inari::{const_dec_interval, DecInterval};
use num_traits::{One, Zero};

mod region;

pub use inari::Decoration;
pub use region::*;

fn worse(a: Decoration, b: Decoration) -> Decoration {
    if a <= b {
        a
    } else {
        b
    }
}

fn decoration_name(dec: Decoration) -> &'static str {
    match dec {
        Decoration::Ill => "ill",
        Decoration::Trv => "trv",
        Decoration::Def => "def",
        Decoration::Dac => "dac",
        Decoration::Com => "com",
    }
}

/// Closed interval of real numbers with outward rounded bounds. See
/// [module](self) documentation for more details.
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    x: DecInterval,
    guaranteed: bool,
}

impl Interval {
    /// The empty interval.
    pub const EMPTY: Self = Self::from_parts(DecInterval::EMPTY, true);

    /// The whole real line.
    pub const ENTIRE: Self = Self::from_parts(DecInterval::ENTIRE, true);

    /// The interval `[0, 0]`.
    pub const ZERO: Self = Self::from_parts(const_dec_interval!(0.0, 0.0), true);

    /// The interval `[1, 1]`.
    pub const ONE: Self = Self::from_parts(const_dec_interval!(1.0, 1.0), true);

    const fn from_parts(x: DecInterval, guaranteed: bool) -> Self {
        Self { x, guaranteed }
    }

    /// Creates interval `[lo, hi]`.
    ///
    /// The bounds are taken as exact. Panics if the bounds do not form a valid
    /// interval (see [`Interval::try_new`]).
    pub fn new(lo: f64, hi: f64) -> Self {
        match Self::try_new(lo, hi) {
            Some(x) => x,
            None => panic!("invalid interval [{}, {}]", lo, hi),
        }
    }

    /// Creates interval `[lo, hi]` if the bounds form a valid interval, that
    /// is, neither is NaN, `lo <= hi`, `lo` is not `+∞` and `hi` is not `-∞`.
    pub fn try_new(lo: f64, hi: f64) -> Option<Self> {
        inari::Interval::try_from((lo, hi))
            .ok()
            .map(|x| Self::from_parts(DecInterval::new(x), true))
    }

    /// Creates degenerate interval `[x, x]`.
    pub fn point(x: f64) -> Self {
        Self::new(x, x)
    }

    /// Creates degenerate interval `[x, x]` from a constant that is not
    /// guaranteed to be the exact value intended by the user.
    pub fn constant(x: f64) -> Self {
        Self::from_parts(Self::point(x).x, false)
    }

    fn inner(&self) -> inari::Interval {
        self.x.interval().unwrap_or(inari::Interval::EMPTY)
    }

    fn with_dec(x: inari::Interval, dec: Decoration, guaranteed: bool) -> Self {
        Self::from_parts(DecInterval::set_dec(x, dec), guaranteed)
    }

    /// Returns the same set of numbers with the decoration of a freshly
    /// created interval, as if it was constructed by [`Interval::new`]. The
    /// guarantee flag is kept.
    ///
    /// Regions are sets, not results of computations. The decoration of the
    /// operation that produced a region must not leak into the evaluations
    /// over it.
    pub fn bare(&self) -> Self {
        Self::from_parts(DecInterval::new(self.inner()), self.guaranteed)
    }

    /// Returns the same interval with the decoration lowered to at most
    /// `dec`.
    pub fn degrade(&self, dec: Decoration) -> Self {
        Self::with_dec(self.inner(), worse(self.x.decoration(), dec), self.guaranteed)
    }

    /// Lower bound.
    pub fn lo(&self) -> f64 {
        self.inner().inf()
    }

    /// Upper bound.
    pub fn hi(&self) -> f64 {
        self.inner().sup()
    }

    /// Decoration of the interval.
    pub fn decoration(&self) -> Decoration {
        self.x.decoration()
    }

    /// Returns `false` if a non-interval constant was involved in the
    /// computation of the interval.
    pub fn is_guaranteed(&self) -> bool {
        self.guaranteed
    }

    /// Returns `true` if all operations that produced the interval were
    /// defined and continuous on their inputs, i.e., the decoration is at
    /// least [`Decoration::Dac`].
    pub fn is_trusted(&self) -> bool {
        self.x.decoration() >= Decoration::Dac
    }

    /// Returns `true` if the interval is the empty set.
    pub fn is_empty(&self) -> bool {
        self.inner().is_empty()
    }

    /// Returns `true` if both bounds are finite.
    pub fn is_bounded(&self) -> bool {
        self.inner().is_common_interval()
    }

    /// Returns `true` if the interval contains only one point.
    pub fn is_point(&self) -> bool {
        self.inner().is_singleton()
    }

    /// Width of the interval (rounded up). The width of the empty interval is
    /// zero.
    pub fn width(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.inner().wid()
        }
    }

    /// Midpoint of the interval. For unbounded intervals, a finite point
    /// inside the interval is returned. The midpoint of the empty interval is
    /// NaN.
    pub fn mid(&self) -> f64 {
        self.mid_at(0.5)
    }

    /// Point at relative position `ratio` in the interval (`0` gives the lower
    /// bound, `1` the upper bound). For unbounded intervals, a finite point
    /// inside the interval is returned.
    pub fn mid_at(&self, ratio: f64) -> f64 {
        if self.is_empty() {
            return f64::NAN;
        }

        let (lo, hi) = (self.lo(), self.hi());

        let m = match (lo.is_finite(), hi.is_finite()) {
            (true, true) => {
                let m = (1.0 - ratio) * lo + ratio * hi;
                m.max(lo).min(hi)
            }
            (false, false) => 0.0,
            (false, true) => hi.min(0.0) - hi.abs().max(1.0),
            (true, false) => lo.max(0.0) + lo.abs().max(1.0),
        };

        m.max(-f64::MAX).min(f64::MAX)
    }

    /// Magnitude, the largest absolute value of the points in the interval.
    pub fn mag(&self) -> f64 {
        self.inner().mag()
    }

    /// Mignitude, the smallest absolute value of the points in the interval.
    pub fn mig(&self) -> f64 {
        self.inner().mig()
    }

    /// Returns `true` if `x` is in the interval.
    pub fn contains(&self, x: f64) -> bool {
        self.inner().contains(x)
    }

    /// Returns `true` if zero is in the interval.
    pub fn contains_zero(&self) -> bool {
        self.contains(0.0)
    }

    /// Returns `true` if the interval is a subset of `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.inner().subset(other.inner())
    }

    /// Returns `true` if the interval is in the interior of `other`.
    ///
    /// Infinite bounds of `other` are considered interior to allow unbounded
    /// intervals to contain themselves in the interior.
    pub fn is_interior(&self, other: &Self) -> bool {
        self.inner().interior(other.inner())
    }

    /// Returns `true` if the intervals have no point in common.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.inner().disjoint(other.inner())
    }

    /// Intersection of the intervals. The decoration is the worse of the two.
    pub fn intersect(&self, other: &Self) -> Self {
        Self::with_dec(
            self.inner().intersection(other.inner()),
            worse(self.decoration(), other.decoration()),
            self.guaranteed && other.guaranteed,
        )
    }

    /// The smallest interval containing both intervals. The decoration is the
    /// worse of the two.
    pub fn hull(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }

        if other.is_empty() {
            return *self;
        }

        Self::with_dec(
            self.inner().convex_hull(other.inner()),
            worse(self.decoration(), other.decoration()),
            self.guaranteed && other.guaranteed,
        )
    }

    /// Splits the interval at relative position `ratio` into two intervals
    /// sharing the split point. Both halves are [bare](Interval::bare).
    pub fn bisect_at(&self, ratio: f64) -> (Self, Self) {
        if self.is_empty() {
            return (Self::EMPTY, Self::EMPTY);
        }

        let m = self.mid_at(ratio);
        let left = Self::from_parts(Self::new(self.lo(), m).x, self.guaranteed);
        let right = Self::from_parts(Self::new(m, self.hi()).x, self.guaranteed);
        (left, right)
    }

    /// Extended division `self / divisor` for a divisor containing zero.
    ///
    /// The set `{x : x * d ∈ self for some d ∈ divisor}` is returned as two
    /// intervals (possibly empty), the first one being the lower. If the
    /// divisor does not contain zero, the ordinary quotient is the first
    /// element and the second one is empty.
    pub fn div_pair(&self, divisor: &Self) -> [Self; 2] {
        if self.is_empty() || divisor.is_empty() {
            return [Self::EMPTY, Self::EMPTY];
        }

        if !divisor.contains_zero() {
            return [*self / *divisor, Self::EMPTY];
        }

        let guaranteed = self.guaranteed && divisor.guaranteed;
        let [a, b] = divisor.inner().mul_rev_to_pair(self.inner());
        let a = Self::with_dec(a, Decoration::Trv, guaranteed);
        let b = Self::with_dec(b, Decoration::Trv, guaranteed);

        if a.is_empty() || (!b.is_empty() && b.lo() < a.lo()) {
            [b, a]
        } else {
            [a, b]
        }
    }

    /// Square.
    pub fn sqr(&self) -> Self {
        Self::from_parts(self.x.sqr(), self.guaranteed)
    }

    /// Integer power. Negative powers of intervals containing zero are
    /// untrusted.
    pub fn powi(&self, n: i32) -> Self {
        Self::from_parts(self.x.pown(n), self.guaranteed)
    }

    /// Square root over the nonnegative part of the interval.
    pub fn sqrt(&self) -> Self {
        Self::from_parts(self.x.sqrt(), self.guaranteed)
    }

    /// Exponential function.
    pub fn exp(&self) -> Self {
        Self::from_parts(self.x.exp(), self.guaranteed)
    }

    /// Natural logarithm over the positive part of the interval.
    pub fn ln(&self) -> Self {
        Self::from_parts(self.x.ln(), self.guaranteed)
    }

    /// Sine.
    pub fn sin(&self) -> Self {
        Self::from_parts(self.x.sin(), self.guaranteed)
    }

    /// Cosine.
    pub fn cos(&self) -> Self {
        Self::from_parts(self.x.cos(), self.guaranteed)
    }

    /// Tangent. The whole real line if the interval contains a pole.
    pub fn tan(&self) -> Self {
        Self::from_parts(self.x.tan(), self.guaranteed)
    }

    /// Inverse tangent.
    pub fn atan(&self) -> Self {
        Self::from_parts(self.x.atan(), self.guaranteed)
    }
}

impl PartialEq for Interval {
    fn eq(&self, other: &Self) -> bool {
        self.inner() == other.inner()
    }
}

impl From<f64> for Interval {
    fn from(x: f64) -> Self {
        Self::point(x)
    }
}

impl From<DecInterval> for Interval {
    fn from(x: DecInterval) -> Self {
        Self::from_parts(x, true)
    }
}

impl From<Interval> for DecInterval {
    fn from(x: Interval) -> Self {
        x.x
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("∅")?;
        } else if let Some(precision) = f.precision() {
            write!(f, "[{:.*}, {:.*}]", precision, self.lo(), precision, self.hi())?;
        } else {
            write!(f, "[{}, {}]", self.lo(), self.hi())?;
        }

        write!(f, "_{}", decoration_name(self.decoration()))?;

        if !self.guaranteed {
            f.write_str("_NG")?;
        }

        Ok(())
    }
}

impl Neg for Interval {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::from_parts(-self.x, self.guaranteed)
    }
}

macro_rules! impl_ops {
    ($($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident);*) => {
        $(
            impl $trait for Interval {
                type Output = Interval;

                fn $method(self, rhs: Interval) -> Self::Output {
                    Interval::from_parts(
                        $trait::$method(self.x, rhs.x),
                        self.guaranteed && rhs.guaranteed,
                    )
                }
            }

            impl $trait<f64> for Interval {
                type Output = Interval;

                fn $method(self, rhs: f64) -> Self::Output {
                    $trait::$method(self, Interval::constant(rhs))
                }
            }

            impl $trait<Interval> for f64 {
                type Output = Interval;

                fn $method(self, rhs: Interval) -> Self::Output {
                    $trait::$method(Interval::constant(self), rhs)
                }
            }

            impl $assign_trait for Interval {
                fn $assign_method(&mut self, rhs: Interval) {
                    *self = $trait::$method(*self, rhs);
                }
            }

            impl $assign_trait<f64> for Interval {
                fn $assign_method(&mut self, rhs: f64) {
                    *self = $trait::$method(*self, rhs);
                }
            }
        )*
    };
}

impl_ops!(
    Add, add, AddAssign, add_assign;
    Sub, sub, SubAssign, sub_assign;
    Mul, mul, MulAssign, mul_assign;
    Div, div, DivAssign, div_assign
);

impl Zero for Interval {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        self.lo() == 0.0 && self.hi() == 0.0
    }
}

impl One for Interval {
    fn one() -> Self {
        Self::ONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f64::consts::{FRAC_PI_2, PI};

    fn i(lo: f64, hi: f64) -> Interval {
        Interval::new(lo, hi)
    }

    #[test]
    fn basic_arithmetic_encloses() {
        let a = i(1.0, 2.0);
        let b = i(-3.0, 0.5);

        assert_eq!(a + b, i(-2.0, 2.5));
        assert_eq!(a - b, i(0.5, 5.0));
        assert_eq!(a * b, i(-6.0, 1.0));
        assert_eq!(-a, i(-2.0, -1.0));
        assert_eq!(a / i(2.0, 4.0), i(0.25, 1.0));
    }

    #[test]
    fn inexact_arithmetic_is_rounded_outward() {
        let tenth = Interval::point(0.1);
        let sum = tenth + tenth + tenth;
        assert!(sum.lo() < sum.hi());
        assert!(sum.contains(0.30000000000000004) || sum.contains(0.3));

        let third = Interval::ONE / Interval::point(3.0);
        assert!(third.lo() < third.hi());
        assert!((third * 3.0).contains(1.0));
    }

    #[test]
    fn invalid_bounds() {
        assert!(Interval::try_new(2.0, 1.0).is_none());
        assert!(Interval::try_new(f64::NAN, 1.0).is_none());
        assert!(Interval::try_new(f64::INFINITY, f64::INFINITY).is_none());
        assert!(Interval::try_new(f64::NEG_INFINITY, f64::NEG_INFINITY).is_none());
        assert!(Interval::try_new(f64::NEG_INFINITY, f64::INFINITY).is_some());
    }

    #[test]
    #[should_panic]
    fn new_rejects_infinite_point() {
        Interval::new(f64::INFINITY, f64::INFINITY);
    }

    #[test]
    fn empty_propagates() {
        let e = Interval::EMPTY;
        assert!(e.is_empty());
        assert!((e + i(1.0, 2.0)).is_empty());
        assert!((i(1.0, 2.0) * e).is_empty());
        assert!(!e.contains_zero());
        assert!(e.is_subset(&i(0.0, 1.0)));
        assert_eq!(e.width(), 0.0);
    }

    #[test]
    fn division_by_zero_containing() {
        let q = i(1.0, 2.0) / i(-1.0, 1.0);
        assert_eq!(q, Interval::ENTIRE);
        assert!(!q.is_trusted());

        let q = i(1.0, 2.0) / i(0.0, 1.0);
        assert_eq!(q.lo(), 1.0);
        assert_eq!(q.hi(), f64::INFINITY);

        assert!((i(1.0, 2.0) / Interval::ZERO).is_empty());
    }

    #[test]
    fn extended_division_two_pieces() {
        let [neg, pos] = i(1.0, 2.0).div_pair(&i(-2.0, 4.0));
        assert_eq!(neg.lo(), f64::NEG_INFINITY);
        assert_eq!(neg.hi(), -0.5);
        assert_eq!(pos.lo(), 0.25);
        assert_eq!(pos.hi(), f64::INFINITY);

        let [neg, pos] = i(-2.0, -1.0).div_pair(&i(-2.0, 4.0));
        assert_eq!(neg.hi(), -0.25);
        assert_eq!(pos.lo(), 0.5);

        let [whole, none] = i(-1.0, 1.0).div_pair(&i(-2.0, 4.0));
        assert_eq!(whole, Interval::ENTIRE);
        assert!(none.is_empty());

        let [half, none] = i(1.0, 2.0).div_pair(&i(0.0, 4.0));
        assert_eq!(half.lo(), 0.25);
        assert_eq!(half.hi(), f64::INFINITY);
        assert!(none.is_empty());

        let [first, second] = i(1.0, 2.0).div_pair(&i(4.0, 8.0));
        assert_eq!(first, i(0.125, 0.5));
        assert!(first.is_trusted());
        assert!(second.is_empty());
    }

    #[test]
    fn set_operations() {
        let a = i(0.0, 2.0);
        let b = i(1.0, 3.0);

        assert_eq!(a.intersect(&b), i(1.0, 2.0));
        assert_eq!(a.hull(&b), i(0.0, 3.0));
        assert!(a.intersect(&i(5.0, 6.0)).is_empty());
        assert!(i(0.5, 1.0).is_subset(&a));
        assert!(i(0.5, 1.0).is_interior(&a));
        assert!(i(0.0, 1.0).is_subset(&a));
        assert!(!i(0.0, 1.0).is_interior(&a));
        assert!(a.is_disjoint(&i(2.5, 3.0)));
        assert!(!a.is_disjoint(&i(2.0, 3.0)));

        let untrusted = a.degrade(Decoration::Trv);
        assert!(!untrusted.intersect(&b).is_trusted());
        assert!(!b.hull(&untrusted).is_trusted());
    }

    #[test]
    fn midpoints_and_widths() {
        let a = i(-5.0, 5.0);
        assert_eq!(a.mid(), 0.0);
        assert_eq!(a.width(), 10.0);
        assert_eq!(a.mid_at(127.0 / 256.0), -5.0 + 10.0 * 127.0 / 256.0);
        assert_eq!(Interval::ENTIRE.mid(), 0.0);
        assert!(i(1.0, f64::INFINITY).mid().is_finite());
        assert!(i(f64::NEG_INFINITY, -3.0).mid() < -3.0);

        let (left, right) = a.bisect_at(0.25);
        assert_eq!(left, i(-5.0, -2.5));
        assert_eq!(right, i(-2.5, 5.0));
    }

    #[test]
    fn decorations_and_guarantee() {
        let a = i(1.0, 2.0);
        assert_eq!(a.decoration(), Decoration::Com);
        assert!(a.is_guaranteed());

        let b = a + 0.1;
        assert!(!b.is_guaranteed());
        assert!(b.is_trusted());

        assert_eq!(Interval::ENTIRE.decoration(), Decoration::Dac);
        assert!(!a.degrade(Decoration::Def).is_trusted());
        assert_eq!(format!("{:.1}", b), "[1.1, 2.1]_com_NG");
    }

    #[test]
    fn bare_resets_decoration() {
        let x = i(1.0, 2.0).degrade(Decoration::Trv);
        assert!(!x.is_trusted());

        let bare = x.bare();
        assert_eq!(bare, x);
        assert_eq!(bare.decoration(), Decoration::Com);

        let x = Interval::constant(3.0) / i(-1.0, 1.0);
        let bare = x.bare();
        assert_eq!(bare, Interval::ENTIRE);
        assert_eq!(bare.decoration(), Decoration::Dac);
        assert!(!bare.is_guaranteed());

        assert!(Interval::EMPTY.bare().is_empty());

        let (left, right) = x.degrade(Decoration::Trv).bisect_at(0.5);
        assert!(left.is_trusted());
        assert!(right.is_trusted());
    }

    #[test]
    fn powers() {
        assert_eq!(i(-1.0, 2.0).sqr(), i(0.0, 4.0));
        assert_eq!(i(-3.0, -2.0).sqr(), i(4.0, 9.0));
        assert_eq!(i(-2.0, 1.0).powi(3), i(-8.0, 1.0));
        assert_eq!(i(2.0, 3.0).powi(0), Interval::ONE);
        assert_eq!(i(2.0, 4.0).powi(-1), i(0.25, 0.5));
        assert!(!i(-1.0, 1.0).powi(-2).is_trusted());
    }

    #[test]
    fn sqrt_and_ln_natural_domain() {
        assert_eq!(i(4.0, 9.0).sqrt(), i(2.0, 3.0));

        let s = i(-4.0, 9.0).sqrt();
        assert_eq!(s, i(0.0, 3.0));
        assert!(!s.is_trusted());
        assert!(i(-4.0, -1.0).sqrt().is_empty());

        let l = i(1.0, std::f64::consts::E).ln();
        assert!(l.contains(0.0));
        assert!(l.is_trusted());

        let l = i(-2.0, 2.0).ln();
        assert_eq!(l.lo(), f64::NEG_INFINITY);
        assert!(l.contains(2f64.ln()));
        assert!(!l.is_trusted());

        assert!(i(-2.0, -0.5).ln().is_empty());
    }

    #[test]
    fn trigonometric_functions() {
        assert_eq!(i(0.0, 10.0).sin(), i(-1.0, 1.0));

        let s = i(0.0, PI).sin();
        assert_eq!(s.hi(), 1.0);
        assert!(s.lo() <= 0.0 && s.lo() > -1e-15);

        let c = i(3.0, 3.5).cos();
        assert_eq!(c.lo(), -1.0);

        let t = i(-1.0, 1.0).tan();
        assert!(t.contains(1f64.tan()));
        assert!(t.is_trusted());

        let t = i(1.0, 2.0).tan();
        assert_eq!(t, Interval::ENTIRE);
        assert!(!t.is_trusted());

        let a = Interval::ENTIRE.atan();
        assert!(a.contains(FRAC_PI_2));
        assert!(a.contains(-FRAC_PI_2));
        assert!(a.is_bounded());

        assert!(i(0.0, 1.0).exp().contains(std::f64::consts::E));
    }
}
