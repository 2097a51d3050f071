//! Row permutation produced by partial pivoting

use crate::dense::DenseMatrix;
use crate::error::{LinsysError, LinsysResult};
use crate::traits::RealField;
use ndarray::{Array1, Array2};

/// Row permutation stored as an index array
///
/// Row `i` of `P·A` is row `perm[i]` of `A`. The number of transpositions
/// applied so far is tracked so the sign of the permutation is known without
/// recomputing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    perm: Vec<usize>,
    swaps: usize,
}

impl Permutation {
    /// Identity permutation of length `n`
    pub fn identity(n: usize) -> Self {
        Self {
            perm: (0..n).collect(),
            swaps: 0,
        }
    }

    /// Record the exchange of rows `i` and `j`
    pub fn swap(&mut self, i: usize, j: usize) {
        if i != j {
            self.perm.swap(i, j);
            self.swaps += 1;
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.perm.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.perm.is_empty()
    }

    /// Source row index for each permuted row
    pub fn indices(&self) -> &[usize] {
        &self.perm
    }

    /// `+1` for an even permutation, `-1` for an odd one
    pub fn sign<T: RealField>(&self) -> T {
        if self.swaps % 2 == 0 {
            T::one()
        } else {
            -T::one()
        }
    }

    /// Compute `P·b`
    pub fn apply<T: RealField>(&self, b: &Array1<T>) -> LinsysResult<Array1<T>, T> {
        if b.len() != self.len() {
            return Err(LinsysError::DimensionMismatch {
                expected: self.len(),
                got: b.len(),
            });
        }
        Ok(self.perm.iter().map(|&src| b[src]).collect())
    }

    /// Explicit permutation matrix `P`
    pub fn to_matrix<T: RealField>(&self) -> DenseMatrix<T> {
        let n = self.len();
        let mut p = Array2::zeros((n, n));
        for (i, &src) in self.perm.iter().enumerate() {
            p[[i, src]] = T::one();
        }
        DenseMatrix::from_array(p)
    }
}
