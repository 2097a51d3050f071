//! Newton's method for systems of nonlinear equations
//!
//! Each step solves `J(x)·Δ = -F(x)` with an LU factorization of the
//! Jacobian and updates `x += Δ`. Iteration stops once `‖Δ‖∞` drops below
//! the tolerance.

use crate::dense::DenseMatrix;
use crate::direct::factorize_lu;
use crate::error::{LinsysError, LinsysResult};
use crate::traits::{RealField, inf_norm};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Newton solver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewtonConfig<R> {
    /// Maximum number of Newton steps
    pub max_iterations: usize,
    /// Tolerance on the infinity norm of the step
    pub tolerance: R,
    /// Print progress every N iterations (0 = no output)
    pub print_interval: usize,
}

impl Default for NewtonConfig<f64> {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            tolerance: 1e-10,
            print_interval: 0,
        }
    }
}

/// Newton solver result
#[derive(Debug, Clone)]
pub struct NewtonSolution<T: RealField> {
    /// Approximate root
    pub x: Array1<T>,
    /// Number of Newton steps taken
    pub iterations: usize,
    /// Infinity norm of the last step
    pub step_norm: T,
}

/// Find a root of `F(x) = 0` starting from `x0`
///
/// `f` evaluates the residual vector and `jacobian` its Jacobian matrix, both
/// at the current iterate.
///
/// # Errors
/// - `DimensionMismatch` if `F` or `J` do not match the length of `x0`
/// - `SingularMatrix` if a Jacobian cannot be factored
/// - `NonConvergence` after `max_iterations` steps, carrying the last iterate
/// - `Diverged` if an iterate becomes non-finite
pub fn newton_system<T, F, J>(
    f: F,
    jacobian: J,
    x0: &Array1<T>,
    config: &NewtonConfig<T>,
) -> LinsysResult<NewtonSolution<T>, T>
where
    T: RealField,
    F: Fn(&Array1<T>) -> Array1<T>,
    J: Fn(&Array1<T>) -> DenseMatrix<T>,
{
    let n = x0.len();
    let mut x = x0.clone();
    let mut step_norm = T::infinity();

    for iter in 0..config.max_iterations {
        let fx = f(&x);
        if fx.len() != n {
            return Err(LinsysError::DimensionMismatch {
                expected: n,
                got: fx.len(),
            });
        }

        let jac = jacobian(&x);
        if jac.nrows() != n || jac.ncols() != n {
            return Err(LinsysError::DimensionMismatch {
                expected: n,
                got: jac.nrows().max(jac.ncols()),
            });
        }

        let delta = factorize_lu(&jac)?.solve(&fx.mapv(|v| -v))?;
        let next = &x + &delta;
        if next.iter().any(|v| !v.is_finite()) {
            return Err(LinsysError::Diverged {
                iterations: iter + 1,
                best: x,
            });
        }
        x = next;
        step_norm = inf_norm(&delta);

        if config.print_interval > 0 && (iter + 1) % config.print_interval == 0 {
            log::info!("Newton iteration {}: step = {:.6e}", iter + 1, step_norm);
        }

        if step_norm < config.tolerance {
            return Ok(NewtonSolution {
                x,
                iterations: iter + 1,
                step_norm,
            });
        }
    }

    Err(LinsysError::NonConvergence {
        iterations: config.max_iterations,
        change: step_norm,
        best: x,
    })
}
