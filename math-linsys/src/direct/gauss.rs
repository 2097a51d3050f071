//! Gaussian elimination with partial pivoting
//!
//! One-shot direct solver: the augmented system is reduced to upper
//! triangular form and then back-substituted. The caller's matrix and
//! right-hand side are copied on entry and never modified.

use super::permutation::Permutation;
use super::pivot_tolerances;
use super::substitution::back_substitute;
use crate::dense::DenseMatrix;
use crate::error::{LinsysError, LinsysResult};
use crate::traits::RealField;
use ndarray::{Array1, s};

/// Upper-triangular system produced by forward elimination
///
/// `upper · x = rhs` has the same solution as the original system.
#[derive(Debug, Clone)]
pub struct GaussianElimination<T: RealField> {
    /// Row-echelon form of the coefficient matrix
    pub upper: DenseMatrix<T>,
    /// Right-hand side after the same row operations
    pub rhs: Array1<T>,
    /// Row exchanges performed while pivoting
    pub permutation: Permutation,
}

impl<T: RealField> GaussianElimination<T> {
    /// Back-substitute the reduced system
    pub fn back_substitute(&self) -> LinsysResult<Array1<T>, T> {
        back_substitute(&self.upper, &self.rhs)
    }
}

fn check_dimensions<T: RealField>(a: &DenseMatrix<T>, b: &Array1<T>) -> LinsysResult<usize, T> {
    let n = a.require_square()?;
    if n == 0 {
        return Err(LinsysError::DimensionMismatch {
            expected: 1,
            got: 0,
        });
    }
    if b.len() != n {
        return Err(LinsysError::DimensionMismatch {
            expected: n,
            got: b.len(),
        });
    }
    Ok(n)
}

/// Reduce `A·x = b` to upper-triangular form using partial pivoting
///
/// For each column the row with the largest magnitude entry at or below the
/// diagonal becomes the pivot (the first such row on ties). A pivot whose
/// magnitude does not exceed `n·ε·max_i|A[i,k]|` fails with `SingularMatrix`.
pub fn eliminate<T: RealField>(
    a: &DenseMatrix<T>,
    b: &Array1<T>,
) -> LinsysResult<GaussianElimination<T>, T> {
    let n = check_dimensions(a, b)?;
    let tol = pivot_tolerances(a);

    let mut upper = a.clone();
    let mut rhs = b.clone();
    let mut permutation = Permutation::identity(n);

    for k in 0..n {
        let (max_row, max_val) = find_pivot(&upper, k)?;
        if max_val <= tol[k] {
            return Err(LinsysError::SingularMatrix { pivot: k });
        }

        if max_row != k {
            upper.swap_rows(k, max_row)?;
            rhs.swap(k, max_row);
            permutation.swap(k, max_row);
            log::trace!("gauss: swapped rows {} and {}", k, max_row);
        }

        let pivot = upper.get(k, k)?;
        for i in (k + 1)..n {
            let factor = upper.get(i, k)? / pivot;
            if factor == T::zero() {
                continue;
            }
            upper.row_axpy(i, k, factor, (k + 1)..n)?;
            upper.set(i, k, T::zero())?;
            rhs[i] = rhs[i] - factor * rhs[k];
        }
    }

    Ok(GaussianElimination {
        upper,
        rhs,
        permutation,
    })
}

/// Row index and magnitude of the largest entry of column `k` in rows `k..n`
pub(crate) fn find_pivot<T: RealField>(
    m: &DenseMatrix<T>,
    k: usize,
) -> LinsysResult<(usize, T), T> {
    let mut max_row = k;
    let mut max_val = m.get(k, k)?.abs();
    for i in (k + 1)..m.nrows() {
        let val = m.get(i, k)?.abs();
        if val > max_val {
            max_val = val;
            max_row = i;
        }
    }
    Ok((max_row, max_val))
}

/// Solve `A·x = b` by Gaussian elimination with partial pivoting
///
/// # Errors
/// - `NotSquare` if `A` is not square
/// - `DimensionMismatch` if `A` is empty or `b.len() != n`
/// - `SingularMatrix` if a pivot is numerically zero
pub fn solve_gauss<T: RealField>(a: &DenseMatrix<T>, b: &Array1<T>) -> LinsysResult<Array1<T>, T> {
    eliminate(a, b)?.back_substitute()
}

/// Solve a system given as an `n x (n+1)` augmented matrix `[A | b]`
pub fn solve_augmented<T: RealField>(augmented: &DenseMatrix<T>) -> LinsysResult<Array1<T>, T> {
    let n = augmented.nrows();
    if augmented.ncols() != n + 1 {
        return Err(LinsysError::DimensionMismatch {
            expected: n + 1,
            got: augmented.ncols(),
        });
    }
    let array = augmented.as_array();
    let a = DenseMatrix::from_array(array.slice(s![.., ..n]).to_owned());
    let b = array.column(n).to_owned();
    solve_gauss(&a, &b)
}
