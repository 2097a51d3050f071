//! Dense row-major matrix
//!
//! [`DenseMatrix`] is the mutable substrate every solver works on. It wraps an
//! `ndarray::Array2` and adds bounds-checked element access plus the row
//! operations used by elimination:
//! - `swap_rows`: exchange two rows in O(cols)
//! - `row_axpy`: `row_i -= factor * row_j` restricted to a column range
//! - `row_dot`: dot product of a row slice with a vector slice

use crate::error::{LinsysError, LinsysResult};
use crate::traits::{LinearOperator, RealField};
use ndarray::{Array1, Array2, Zip, s};
use std::ops::Range;

/// Dense rectangular matrix with exclusive ownership of its storage
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T: RealField> {
    data: Array2<T>,
}

impl<T: RealField> DenseMatrix<T> {
    /// Create a `rows x cols` matrix filled with zeros
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: Array2::zeros((rows, cols)),
        }
    }

    /// Create the `n x n` identity matrix
    pub fn identity(n: usize) -> Self {
        Self {
            data: Array2::eye(n),
        }
    }

    /// Build a matrix from nested rows
    ///
    /// Every row must have the same length as the first one.
    pub fn from_rows(rows: &[Vec<T>]) -> LinsysResult<Self, T> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);

        let mut data = Array2::zeros((nrows, ncols));
        for (i, row) in rows.iter().enumerate() {
            if row.len() != ncols {
                return Err(LinsysError::RaggedRows {
                    row: i,
                    expected: ncols,
                    got: row.len(),
                });
            }
            for (j, &value) in row.iter().enumerate() {
                data[[i, j]] = value;
            }
        }

        Ok(Self { data })
    }

    /// Wrap an existing array (takes ownership, no copy)
    pub fn from_array(data: Array2<T>) -> Self {
        Self { data }
    }

    /// Borrow the underlying array
    pub fn as_array(&self) -> &Array2<T> {
        &self.data
    }

    /// Consume the matrix and return the underlying array
    pub fn into_array(self) -> Array2<T> {
        self.data
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    /// Fail with `NotSquare` unless the matrix is square, returning its order
    pub fn require_square(&self) -> LinsysResult<usize, T> {
        if self.is_square() {
            Ok(self.nrows())
        } else {
            Err(LinsysError::NotSquare {
                rows: self.nrows(),
                cols: self.ncols(),
            })
        }
    }

    #[inline]
    fn check_index(&self, row: usize, col: usize) -> LinsysResult<(), T> {
        if row >= self.nrows() || col >= self.ncols() {
            return Err(LinsysError::IndexOutOfRange {
                row,
                col,
                rows: self.nrows(),
                cols: self.ncols(),
            });
        }
        Ok(())
    }

    #[inline]
    fn check_row(&self, row: usize) -> LinsysResult<(), T> {
        if row >= self.nrows() {
            return Err(LinsysError::IndexOutOfRange {
                row,
                col: 0,
                rows: self.nrows(),
                cols: self.ncols(),
            });
        }
        Ok(())
    }

    #[inline]
    fn check_cols(&self, cols: &Range<usize>) -> LinsysResult<(), T> {
        if cols.start > cols.end || cols.end > self.ncols() {
            return Err(LinsysError::IndexOutOfRange {
                row: 0,
                col: cols.end,
                rows: self.nrows(),
                cols: self.ncols(),
            });
        }
        Ok(())
    }

    /// Read element `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> LinsysResult<T, T> {
        self.check_index(row, col)?;
        Ok(self.data[[row, col]])
    }

    /// Write element `(row, col)`
    pub fn set(&mut self, row: usize, col: usize, value: T) -> LinsysResult<(), T> {
        self.check_index(row, col)?;
        self.data[[row, col]] = value;
        Ok(())
    }

    /// Exchange rows `i` and `j`
    pub fn swap_rows(&mut self, i: usize, j: usize) -> LinsysResult<(), T> {
        self.check_row(i)?;
        self.check_row(j)?;
        if i == j {
            return Ok(());
        }
        for c in 0..self.ncols() {
            self.data.swap([i, c], [j, c]);
        }
        Ok(())
    }

    /// `row[target][c] -= factor * row[source][c]` for every `c` in `cols`
    pub fn row_axpy(
        &mut self,
        target: usize,
        source: usize,
        factor: T,
        cols: Range<usize>,
    ) -> LinsysResult<(), T> {
        self.check_row(target)?;
        self.check_row(source)?;
        self.check_cols(&cols)?;
        if target == source {
            // Same-row update degenerates to a scaling.
            let scale = T::one() - factor;
            self.data
                .slice_mut(s![target, cols])
                .mapv_inplace(|v| v * scale);
            return Ok(());
        }

        let pivot_row = self.data.slice(s![source, cols.clone()]).to_owned();
        Zip::from(self.data.slice_mut(s![target, cols]))
            .and(&pivot_row)
            .for_each(|t, &p| *t -= factor * p);
        Ok(())
    }

    /// `Σ_{c in cols} A[row, c] * x[c]`
    pub fn row_dot(&self, row: usize, cols: Range<usize>, x: &Array1<T>) -> LinsysResult<T, T> {
        self.check_row(row)?;
        self.check_cols(&cols)?;
        if x.len() < cols.end {
            return Err(LinsysError::DimensionMismatch {
                expected: cols.end,
                got: x.len(),
            });
        }
        Ok(self
            .data
            .slice(s![row, cols.clone()])
            .iter()
            .zip(x.slice(s![cols]).iter())
            .fold(T::zero(), |acc, (&a, &xi)| acc + a * xi))
    }

    /// Matrix-vector product `A * x`
    pub fn matvec(&self, x: &Array1<T>) -> LinsysResult<Array1<T>, T> {
        if x.len() != self.ncols() {
            return Err(LinsysError::DimensionMismatch {
                expected: self.ncols(),
                got: x.len(),
            });
        }
        Ok(self.apply(x))
    }

    /// Main diagonal (length `min(rows, cols)`)
    pub fn diagonal(&self) -> Array1<T> {
        self.data.diag().to_owned()
    }

    /// Largest absolute entry (0 for an empty matrix)
    pub fn max_abs(&self) -> T {
        self.data.iter().fold(T::zero(), |acc, &v| acc.max(v.abs()))
    }

    /// Copy of row `i`
    pub fn row(&self, i: usize) -> LinsysResult<Array1<T>, T> {
        self.check_row(i)?;
        Ok(self.data.row(i).to_owned())
    }
}

impl<T: RealField> LinearOperator<T> for DenseMatrix<T> {
    fn num_rows(&self) -> usize {
        self.nrows()
    }

    fn num_cols(&self) -> usize {
        self.ncols()
    }

    fn apply(&self, x: &Array1<T>) -> Array1<T> {
        self.data
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .zip(x.iter())
                    .fold(T::zero(), |acc, (&a, &xi)| acc + a * xi)
            })
            .collect()
    }
}

impl<T: RealField> From<Array2<T>> for DenseMatrix<T> {
    fn from(data: Array2<T>) -> Self {
        Self::from_array(data)
    }
}
