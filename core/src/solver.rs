//! Dense Gaussian elimination with partial pivoting.
//!
//! The solver takes ownership of `a` and `b` and rewrites them in place.
//! Callers that need the original system must clone it first.
//!
//! Pivot selection scans rows p..n of column p and keeps the first row
//! with the largest magnitude (strict `>`), so ties go to the lowest row.
//!
//! `solve` never inspects the pivot: a singular system divides by zero
//! and the non-finite values flow through back-substitution into the
//! result. `solve_checked` validates the shape and rejects a pivot that
//! is exactly 0.0.

use crate::{
    error::{FlowError, FlowResult},
    types::Matrix,
};

/// Solve `a · x = b`. Assumes `a` is n×n and `b` has length n.
pub fn solve(mut a: Matrix, mut b: Vec<f64>) -> Vec<f64> {
    debug_assert!(check_shape(&a, &b).is_ok(), "solve() called on a non-square system");
    for p in 0..b.len() {
        swap_in_pivot(&mut a, &mut b, p);
        eliminate_below(&mut a, &mut b, p);
    }
    back_substitute(&a, &b)
}

/// Like [`solve`], but fails on a malformed shape or an exactly-zero pivot.
pub fn solve_checked(mut a: Matrix, mut b: Vec<f64>) -> FlowResult<Vec<f64>> {
    check_shape(&a, &b)?;
    for p in 0..b.len() {
        swap_in_pivot(&mut a, &mut b, p);
        if a[p][p] == 0.0 {
            return Err(FlowError::SingularPivot { column: p });
        }
        eliminate_below(&mut a, &mut b, p);
    }
    Ok(back_substitute(&a, &b))
}

/// Largest absolute component of `a · x − b`. NaN if any component is NaN,
/// so a non-finite solution never reports a clean residual.
pub fn residual(a: &Matrix, x: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(row, &rhs)| {
            let lhs: f64 = row.iter().zip(x).map(|(aij, xj)| aij * xj).sum();
            (lhs - rhs).abs()
        })
        .fold(0.0, |acc: f64, r| {
            if acc.is_nan() || r.is_nan() {
                f64::NAN
            } else {
                acc.max(r)
            }
        })
}

fn check_shape(a: &Matrix, b: &[f64]) -> FlowResult<()> {
    let rows = a.len();
    if let Some(row) = a.iter().find(|row| row.len() != rows) {
        return Err(FlowError::DimensionMismatch { rows, cols: row.len(), rhs: b.len() });
    }
    if b.len() != rows {
        return Err(FlowError::DimensionMismatch { rows, cols: rows, rhs: b.len() });
    }
    Ok(())
}

/// Move the pivot row for column `p` into row `p`, in both `a` and `b`.
fn swap_in_pivot(a: &mut Matrix, b: &mut [f64], p: usize) {
    let pivot = pivot_row(a, p);
    if pivot != p {
        log::trace!("column {p}: swapping rows {p} and {pivot}");
        a.swap(p, pivot);
        b.swap(p, pivot);
    }
}

/// Zero column `p` below the diagonal, applying the same row operations to `b`.
#[allow(clippy::needless_range_loop)]
fn eliminate_below(a: &mut Matrix, b: &mut [f64], p: usize) {
    let n = b.len();
    for i in (p + 1)..n {
        let alpha = a[i][p] / a[p][p];
        b[i] -= alpha * b[p];
        for j in p..n {
            a[i][j] -= alpha * a[p][j];
        }
    }
}

fn pivot_row(a: &Matrix, p: usize) -> usize {
    let mut best = p;
    for i in (p + 1)..a.len() {
        if a[i][p].abs() > a[best][p].abs() {
            best = i;
        }
    }
    best
}

#[allow(clippy::needless_range_loop)]
fn back_substitute(a: &Matrix, b: &[f64]) -> Vec<f64> {
    let n = b.len();
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += a[i][j] * x[j];
        }
        x[i] = (b[i] - sum) / a[i][i];
    }
    x
}
