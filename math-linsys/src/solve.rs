//! Strategy selection at the call boundary
//!
//! Callers that do not care about the internals of a particular solver pick
//! one with [`Method`] and call [`solve`].

use crate::dense::DenseMatrix;
use crate::direct::{lu_solve, solve_gauss};
use crate::error::{LinsysError, LinsysResult};
use crate::iterative::{IterativeMethod, StationaryConfig, solve_iterative};
use crate::traits::{LinearOperator, RealField, inf_norm};
use ndarray::Array1;

/// Solver to use
#[derive(Debug, Clone)]
pub enum Method<T> {
    /// Gaussian elimination with partial pivoting
    Gauss,
    /// LU factorization with partial pivoting
    Lu,
    /// Jacobi or Gauss-Seidel iteration from a zero initial guess
    Iterative(StationaryConfig<T>),
}

impl<T> Method<T> {
    pub fn name(&self) -> &'static str {
        match self {
            Method::Gauss => "gauss",
            Method::Lu => "lu",
            Method::Iterative(config) => match config.method {
                IterativeMethod::Jacobi => "jacobi",
                IterativeMethod::GaussSeidel => "gauss-seidel",
            },
        }
    }
}

/// Solution result from [`solve`]
#[derive(Debug, Clone)]
pub struct Solution<T: RealField> {
    /// Solution vector
    pub x: Array1<T>,
    /// Number of iterations (0 for direct solvers)
    pub iterations: usize,
    /// Infinity norm of the residual `A·x - b`
    pub residual: T,
}

/// `‖A·x - b‖∞`
pub fn residual_norm<T: RealField>(
    a: &DenseMatrix<T>,
    x: &Array1<T>,
    b: &Array1<T>,
) -> LinsysResult<T, T> {
    let ax = a.matvec(x)?;
    if ax.len() != b.len() {
        return Err(LinsysError::DimensionMismatch {
            expected: ax.len(),
            got: b.len(),
        });
    }
    Ok(inf_norm(&(&ax - b)))
}

/// Solve `A·x = b` with the selected method
pub fn solve<T: RealField>(
    a: &DenseMatrix<T>,
    b: &Array1<T>,
    method: &Method<T>,
) -> LinsysResult<Solution<T>, T> {
    let (x, iterations) = match method {
        Method::Gauss => (solve_gauss(a, b)?, 0),
        Method::Lu => (lu_solve(a, b)?, 0),
        Method::Iterative(config) => {
            let solution = solve_iterative(a, b, None, config)?;
            (solution.x, solution.iterations)
        }
    };

    let residual = inf_norm(&(&a.apply(&x) - b));
    log::debug!(
        "{} solve of {}x{} system: residual {:e}",
        method.name(),
        a.nrows(),
        a.ncols(),
        residual
    );

    Ok(Solution {
        x,
        iterations,
        residual,
    })
}
