//! Solvers of interval linear systems.
//!
//! Given an interval matrix **A** and an interval vector **b**, the solvers
//! return an interval vector that encloses the solution of every real system
//! `A x = b` with `A ∈ **A**` and `b ∈ **b**`. They are used by the
//! [Newton](crate::contractor::newton) contractor for systems with more than
//! one equation.
//!
//! * [`gauss_elimination`] -- Interval Gaussian elimination with partial
//!   pivoting.
//! * [`gauss_seidel`] -- Hansen-Sengupta variant of the interval Gauss-Seidel
//!   iteration, contracting an initial enclosure.
//!
//! Both are preconditioned by default by the inverse of the midpoint matrix
//! (see [`preconditioner`]), which substantially reduces the overestimation.
//!
//! # References
//!
//! \[1\] [Applied Interval
//! Analysis](https://link.springer.com/book/10.1007/978-1-4471-0249-6), page 72
//!
//! \[2\] [Global Optimization Using Interval
//! Analysis](https://www.taylorfrancis.com/books/mono/10.1201/9780203026922),
//! chapter 5

use getset::{CopyGetters, Setters};
use log::debug;
use nalgebra::DMatrix;
use thiserror::Error;

use crate::interval::{
    mat_mul, mat_vec, mid_matrix, point_matrix, Interval, IntervalMatrix, IntervalVector,
};

/// Error returned from the interval linear solvers.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LinearError {
    /// The midpoint matrix is singular and cannot be used for
    /// preconditioning.
    #[error("midpoint matrix is singular")]
    SingularMidpoint,
    /// A pivot in the elimination contains zero.
    #[error("pivot contains zero")]
    SingularPivot,
    /// The matrix is not square or its dimension does not match the
    /// dimension of the right-hand side.
    #[error("dimension mismatch")]
    DimensionMismatch,
}

/// Options for [`gauss_seidel`] solver.
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct GaussSeidelOptions {
    /// Precondition the system by the inverse of the midpoint matrix. Default:
    /// `true`.
    precondition: bool,
    /// Maximum number of sweeps. Default: `100`.
    max_iterations: usize,
    /// The iteration stops when no component shrinks by more than this.
    /// Default: `1e-12`.
    tolerance: f64,
}

impl Default for GaussSeidelOptions {
    fn default() -> Self {
        Self {
            precondition: true,
            max_iterations: 100,
            tolerance: 1e-12,
        }
    }
}

fn check_dims(a: &IntervalMatrix, b: &IntervalVector) -> Result<(), LinearError> {
    if a.nrows() != a.ncols() || a.nrows() != b.len() || b.is_empty() {
        Err(LinearError::DimensionMismatch)
    } else {
        Ok(())
    }
}

/// Preconditions the system `A x = b` by multiplying both sides by the
/// inverse of the midpoint matrix of `A`.
///
/// Returns the preconditioned matrix and right-hand side.
pub fn preconditioner(
    a: &IntervalMatrix,
    b: &IntervalVector,
) -> Result<(IntervalMatrix, IntervalVector), LinearError> {
    check_dims(a, b)?;

    let y = point_matrix(&midpoint_inverse(a)?);
    Ok((mat_mul(&y, a), mat_vec(&y, b)))
}

/// Inverts the midpoint matrix of a square interval matrix.
///
/// Fails with [`LinearError::SingularMidpoint`] if the midpoint matrix is
/// singular or its computed inverse is not finite.
pub fn midpoint_inverse(a: &IntervalMatrix) -> Result<DMatrix<f64>, LinearError> {
    if !a.is_square() {
        return Err(LinearError::DimensionMismatch);
    }

    mid_matrix(a)
        .try_inverse()
        .filter(|inv| inv.iter().all(|x| x.is_finite()))
        .ok_or(LinearError::SingularMidpoint)
}

/// Solves the interval linear system by Gaussian elimination.
///
/// The pivot of every column is the entry with the largest mignitude. If it
/// contains zero, the elimination fails with [`LinearError::SingularPivot`].
#[allow(clippy::needless_range_loop)]
pub fn gauss_elimination(
    a: &IntervalMatrix,
    b: &IntervalVector,
    precondition: bool,
) -> Result<IntervalVector, LinearError> {
    check_dims(a, b)?;

    let (mut a, mut b) = if precondition {
        preconditioner(a, b)?
    } else {
        (a.clone(), b.clone())
    };

    let n = b.len();

    // Forward elimination.
    for k in 0..n {
        let p = (k..n).fold(k, |p, i| {
            if a[(i, k)].mig() > a[(p, k)].mig() {
                i
            } else {
                p
            }
        });

        if a[(p, k)].contains_zero() {
            return Err(LinearError::SingularPivot);
        }

        if p != k {
            a.swap_rows(p, k);
            b.swap_rows(p, k);
        }

        for i in (k + 1)..n {
            let factor = a[(i, k)] / a[(k, k)];

            for j in (k + 1)..n {
                let akj = a[(k, j)];
                a[(i, j)] -= factor * akj;
            }

            let bk = b[k];
            b[i] -= factor * bk;
            a[(i, k)] = Interval::ZERO;
        }
    }

    // Back substitution.
    let mut x = IntervalVector::from_element(n, Interval::ZERO);
    for i in (0..n).rev() {
        let sum = ((i + 1)..n).fold(b[i], |sum, j| sum - a[(i, j)] * x[j]);
        x[i] = sum / a[(i, i)];
    }

    Ok(x)
}

/// Contracts the enclosure `x0` of the solution of the interval linear system
/// by the Hansen-Sengupta (Gauss-Seidel) iteration.
///
/// Diagonal entries containing zero are handled by extended division. If a
/// component becomes empty, the system has no solution in `x0` and the
/// returned vector is empty in all components.
#[allow(clippy::needless_range_loop)]
pub fn gauss_seidel(
    a: &IntervalMatrix,
    b: &IntervalVector,
    x0: &IntervalVector,
    options: &GaussSeidelOptions,
) -> Result<IntervalVector, LinearError> {
    check_dims(a, b)?;

    if x0.len() != b.len() {
        return Err(LinearError::DimensionMismatch);
    }

    let (a, b) = if options.precondition {
        preconditioner(a, b)?
    } else {
        (a.clone(), b.clone())
    };

    let n = b.len();
    let mut x = x0.clone();

    for iter in 0..options.max_iterations {
        let mut progress = 0.0f64;

        for i in 0..n {
            let rhs = (0..n)
                .filter(|&j| j != i)
                .fold(b[i], |rhs, j| rhs - a[(i, j)] * x[j]);

            let [lower, upper] = rhs.div_pair(&a[(i, i)]);
            let xi = lower.intersect(&x[i]).hull(&upper.intersect(&x[i]));

            if xi.is_empty() {
                debug!("inconsistent system detected in iteration {}", iter);
                return Ok(IntervalVector::from_element(n, Interval::EMPTY));
            }

            progress = progress.max(x[i].width() - xi.width());
            x[i] = xi;
        }

        if progress <= options.tolerance {
            break;
        }
    }

    Ok(x)
}
