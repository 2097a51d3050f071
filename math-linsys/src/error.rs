//! Error taxonomy shared by every solver

use crate::traits::RealField;
use ndarray::Array1;
use thiserror::Error;

/// Errors that can occur while building or solving a linear system
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinsysError<T: RealField = f64> {
    #[error("Matrix dimensions mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("Row {row} has {got} entries, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("Index ({row}, {col}) out of range for a {rows}x{cols} matrix")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Matrix is singular or nearly singular (zero pivot in column {pivot})")]
    SingularMatrix { pivot: usize },

    #[error("Matrix is not strictly diagonally dominant (rows {rows:?})")]
    NotDiagonallyDominant { rows: Vec<usize> },

    /// The iteration cap was reached; `best` is the last iterate.
    #[error("Failed to converge after {iterations} iterations (relative change: {change:.3e})")]
    NonConvergence {
        iterations: usize,
        change: T,
        best: Array1<T>,
    },

    /// The iterate stopped being finite; `best` is the last finite iterate.
    #[error("Iteration diverged after {iterations} iterations")]
    Diverged { iterations: usize, best: Array1<T> },
}

impl<T: RealField> LinsysError<T> {
    /// Best iterate carried by an iterative failure, if any
    pub fn best_iterate(&self) -> Option<&Array1<T>> {
        match self {
            LinsysError::NonConvergence { best, .. } | LinsysError::Diverged { best, .. } => {
                Some(best)
            }
            _ => None,
        }
    }
}

/// Result type used throughout the crate
pub type LinsysResult<V, T = f64> = Result<V, LinsysError<T>>;
