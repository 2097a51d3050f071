//! Triangular substitution
//!
//! Shared by Gaussian elimination and LU solves. Both routines read only the
//! relevant triangle of the matrix, so a combined LU storage works as well as
//! separate factors.

use crate::dense::DenseMatrix;
use crate::error::{LinsysError, LinsysResult};
use crate::traits::RealField;
use ndarray::Array1;

fn check_system<T: RealField>(m: &DenseMatrix<T>, rhs: &Array1<T>) -> LinsysResult<usize, T> {
    let n = m.require_square()?;
    if rhs.len() != n {
        return Err(LinsysError::DimensionMismatch {
            expected: n,
            got: rhs.len(),
        });
    }
    Ok(n)
}

/// Solve `L·y = b` where `L` has an implicit unit diagonal
///
/// `y[i] = b[i] - Σ_{j<i} L[i,j]·y[j]`
pub fn forward_substitute_unit<T: RealField>(
    l: &DenseMatrix<T>,
    b: &Array1<T>,
) -> LinsysResult<Array1<T>, T> {
    let n = check_system(l, b)?;
    let mut y = Array1::zeros(n);
    for i in 0..n {
        y[i] = b[i] - l.row_dot(i, 0..i, &y)?;
    }
    Ok(y)
}

/// Solve `U·x = y` for upper-triangular `U`
///
/// `x[i] = (y[i] - Σ_{j>i} U[i,j]·x[j]) / U[i,i]`, from the last row up.
/// A zero on the diagonal fails with `SingularMatrix`.
pub fn back_substitute<T: RealField>(
    u: &DenseMatrix<T>,
    y: &Array1<T>,
) -> LinsysResult<Array1<T>, T> {
    let n = check_system(u, y)?;
    let mut x = Array1::zeros(n);
    for i in (0..n).rev() {
        let u_ii = u.get(i, i)?;
        if u_ii == T::zero() {
            return Err(LinsysError::SingularMatrix { pivot: i });
        }
        x[i] = (y[i] - u.row_dot(i, (i + 1)..n, &x)?) / u_ii;
    }
    Ok(x)
}
