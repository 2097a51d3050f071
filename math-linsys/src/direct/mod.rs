//! Direct solvers for linear systems
//!
//! This module provides direct (non-iterative) solvers:
//! - [`solve_gauss`]: Gaussian elimination with partial pivoting
//! - [`factorize_lu`] / [`solve_with_factorization`]: LU decomposition with
//!   partial pivoting, reusable across right-hand sides
//!
//! Both share the same pivot policy: largest magnitude in the column, first
//! row on ties, and a pivot at or below `n·ε·max_i|A[i,k]|` (the scale of
//! column `k` in the input matrix) is treated as zero.

mod gauss;
mod lu;
mod permutation;
mod substitution;

pub use gauss::{GaussianElimination, eliminate, solve_augmented, solve_gauss};
pub use lu::{LuFactorization, factorize_lu, lu_solve, solve_with_factorization};
pub use permutation::Permutation;
pub use substitution::{back_substitute, forward_substitute_unit};

use crate::dense::DenseMatrix;
use crate::traits::RealField;

/// Per-column magnitude at or below which a pivot is considered zero
///
/// Scaled by each column of the input so that columns of very different
/// magnitude do not mask each other's pivots.
pub(crate) fn pivot_tolerances<T: RealField>(a: &DenseMatrix<T>) -> Vec<T> {
    let scale = T::from_count(a.nrows()) * T::machine_epsilon();
    a.as_array()
        .columns()
        .into_iter()
        .map(|col| scale * col.iter().fold(T::zero(), |m, v| m.max(v.abs())))
        .collect()
}
