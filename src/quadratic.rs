//! Quadratic equations with interval coefficients.
//!
//! The solution set of *\[a\] x² + \[b\] x + \[c\] = 0* is the set of all *x*
//! for which the equation holds for some coefficients from the intervals. It
//! is the intersection of the set where the lower bound of the image is
//! nonpositive with the set where the upper bound is nonnegative. On each
//! half-line both bounds are real quadratics, so the set is computed there
//! from their real roots.
//!
//! # References
//!
//! \[1\] [Global Optimization Using Interval Analysis, chapter
//! 8](https://www.routledge.com/Global-Optimization-Using-Interval-Analysis-Revised-And-Expanded/Hansen-Walster/p/book/9780824740597)

use crate::interval::Interval;

/// Encloses all real solutions of *\[a\] x² + \[b\] x + \[c\] = 0*.
///
/// The solution set consists of at most three disjoint intervals, returned
/// sorted. When there are three, the first one is unbounded from below and the
/// last one from above. If any coefficient is unbounded, the whole real line is
/// returned.
///
/// ```rust
/// use ivroots::quadratic::quadratic_roots;
/// use ivroots::Interval;
///
/// // x² ∈ [1, 4]
/// let roots = quadratic_roots(
///     Interval::new(1.0, 1.0),
///     Interval::new(0.0, 0.0),
///     Interval::new(-4.0, -1.0),
/// );
///
/// assert_eq!(roots, vec![Interval::new(-2.0, -1.0), Interval::new(1.0, 2.0)]);
/// ```
pub fn quadratic_roots(a: Interval, b: Interval, c: Interval) -> Vec<Interval> {
    if a.is_empty() || b.is_empty() || c.is_empty() {
        return Vec::new();
    }

    if !(a.is_bounded() && b.is_bounded() && c.is_bounded()) {
        return vec![Interval::ENTIRE];
    }

    // The bound of b that minimizes b x differs on the two half-lines.
    let halves = [
        (Interval::new(f64::NEG_INFINITY, 0.0), b.hi(), b.lo()),
        (Interval::new(0.0, f64::INFINITY), b.lo(), b.hi()),
    ];

    let mut pieces = Vec::new();

    for (half, b_lower, b_upper) in halves {
        let lower = nonpositive(a.lo(), b_lower, c.lo(), &half);
        let upper = nonpositive(-a.hi(), -b_upper, -c.hi(), &half);

        for l in lower.iter() {
            for u in upper.iter() {
                let x = l.intersect(u);
                if !x.is_empty() {
                    pieces.push(x.bare());
                }
            }
        }
    }

    merge(pieces)
}

/// Encloses the set of *x* in `half` with *αx² + βx + γ ≤ 0*.
fn nonpositive(alpha: f64, beta: f64, gamma: f64, half: &Interval) -> Vec<Interval> {
    let set = if alpha == 0.0 {
        if beta == 0.0 {
            if gamma <= 0.0 {
                vec![Interval::ENTIRE]
            } else {
                Vec::new()
            }
        } else {
            let r = Interval::point(-gamma) / Interval::point(beta);
            if beta > 0.0 {
                vec![Interval::new(f64::NEG_INFINITY, r.hi())]
            } else {
                vec![Interval::new(r.lo(), f64::INFINITY)]
            }
        }
    } else {
        let alpha_i = Interval::point(alpha);
        let beta_i = Interval::point(beta);
        let gamma_i = Interval::point(gamma);
        let nonnegative = Interval::new(0.0, f64::INFINITY);

        let disc = beta_i.sqr() - alpha_i * gamma_i * Interval::point(4.0);

        if disc.hi() < 0.0 {
            // No real roots, the sign is the sign of alpha everywhere.
            if alpha > 0.0 {
                Vec::new()
            } else {
                vec![Interval::ENTIRE]
            }
        } else if alpha < 0.0 && disc.lo() < 0.0 {
            // Possibly no real roots.
            vec![Interval::ENTIRE]
        } else {
            let (r1, r2) = roots(&alpha_i, &beta_i, &gamma_i, &disc.intersect(&nonnegative));

            if alpha > 0.0 {
                vec![r1.hull(&r2)]
            } else if r1.hi() >= r2.lo() {
                vec![Interval::ENTIRE]
            } else {
                vec![
                    Interval::new(f64::NEG_INFINITY, r1.hi()),
                    Interval::new(r2.lo(), f64::INFINITY),
                ]
            }
        }
    };

    set.into_iter()
        .map(|x| x.intersect(half))
        .filter(|x| !x.is_empty())
        .collect()
}

/// Encloses both real roots of *αx² + βx + γ*, the lower one first.
fn roots(
    alpha: &Interval,
    beta: &Interval,
    gamma: &Interval,
    disc: &Interval,
) -> (Interval, Interval) {
    if beta.contains_zero() {
        let r = (-*gamma / *alpha)
            .intersect(&Interval::new(0.0, f64::INFINITY))
            .sqrt();
        let r = if r.is_empty() { Interval::ZERO } else { r };
        return (-r, r);
    }

    // Avoids cancellation between beta and the square root of the
    // discriminant.
    let s = disc.sqrt();
    let half = Interval::point(-0.5);
    let q = if beta.lo() > 0.0 {
        (*beta + s) * half
    } else {
        (*beta - s) * half
    };

    let x1 = q / *alpha;
    let x2 = *gamma / q;

    if x1.mid() <= x2.mid() {
        (x1, x2)
    } else {
        (x2, x1)
    }
}

/// Sorts the pieces and merges those that overlap or touch.
fn merge(mut pieces: Vec<Interval>) -> Vec<Interval> {
    pieces.sort_by(|a, b| a.lo().total_cmp(&b.lo()));

    let mut merged: Vec<Interval> = Vec::with_capacity(pieces.len());
    for x in pieces {
        match merged.last_mut() {
            Some(last) if last.hi() >= x.lo() => *last = last.hull(&x),
            _ => merged.push(x),
        }
    }
    merged
}
