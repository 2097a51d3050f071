//! Strict diagonal dominance check
//!
//! `|A[i,i]| > Σ_{j≠i} |A[i,j]|` for every row is a sufficient condition for
//! both Jacobi and Gauss-Seidel to converge from any starting point.

use crate::dense::DenseMatrix;
use crate::traits::RealField;

/// Outcome of [`verify_diagonal_dominance`]
#[derive(Debug, Clone, PartialEq)]
pub struct DominanceReport<T: RealField> {
    /// Rows where the diagonal does not strictly dominate
    pub violating_rows: Vec<usize>,
    /// Largest ratio `Σ_{j≠i} |A[i,j]| / |A[i,i]|` over all rows
    ///
    /// Below one means the matrix is strictly diagonally dominant; infinite
    /// when some diagonal entry is zero.
    pub max_ratio: T,
}

impl<T: RealField> DominanceReport<T> {
    pub fn is_dominant(&self) -> bool {
        self.violating_rows.is_empty()
    }
}

/// Check every row of a square matrix for strict diagonal dominance
///
/// Non-square matrices report every row as violating.
pub fn verify_diagonal_dominance<T: RealField>(a: &DenseMatrix<T>) -> DominanceReport<T> {
    let data = a.as_array();
    if !a.is_square() {
        return DominanceReport {
            violating_rows: (0..a.nrows()).collect(),
            max_ratio: T::infinity(),
        };
    }

    let mut violating_rows = Vec::new();
    let mut max_ratio = T::zero();
    for (i, row) in data.rows().into_iter().enumerate() {
        let diag = row[i].abs();
        let off_diag = row
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .fold(T::zero(), |acc, (_, &v)| acc + v.abs());

        if diag <= off_diag {
            violating_rows.push(i);
        }

        let ratio = if diag > T::zero() {
            off_diag / diag
        } else {
            T::infinity()
        };
        if ratio > max_ratio {
            max_ratio = ratio;
        }
    }

    DominanceReport {
        violating_rows,
        max_ratio,
    }
}
