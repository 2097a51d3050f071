//! Jacobi and Gauss-Seidel stationary iteration
//!
//! Both methods split `A = D + R` and iterate
//! `x_new[i] = (b[i] - Σ_{j≠i} A[i,j]·x[j]) / A[i,i]`.
//! Jacobi reads only the previous iterate (double buffered); Gauss-Seidel
//! reads components already updated in the current sweep, which typically
//! needs about half as many sweeps.
//!
//! Iteration stops when the relative infinity-norm change
//! `max|x_new - x_old| / max|x_new|` drops below the tolerance. If the new
//! iterate is identically zero the absolute change is used instead.

use super::dominance::verify_diagonal_dominance;
use crate::dense::DenseMatrix;
use crate::error::{LinsysError, LinsysResult};
use crate::traits::{RealField, inf_norm};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Stationary iteration scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IterativeMethod {
    /// Every component uses the previous full iterate
    Jacobi,
    /// Components updated earlier in the sweep are used immediately
    GaussSeidel,
}

/// What to do when the matrix is not strictly diagonally dominant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DominancePolicy {
    /// Fail with `NotDiagonallyDominant` before iterating
    Reject,
    /// Log a warning and iterate anyway
    Warn,
}

/// Stationary solver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationaryConfig<R> {
    /// Iteration scheme
    pub method: IterativeMethod,
    /// Maximum number of sweeps
    pub max_iterations: usize,
    /// Relative tolerance on the infinity-norm change between sweeps
    pub tolerance: R,
    /// Diagonal dominance precondition handling
    pub dominance: DominancePolicy,
    /// Print progress every N iterations (0 = no output)
    pub print_interval: usize,
}

impl Default for StationaryConfig<f64> {
    fn default() -> Self {
        Self {
            method: IterativeMethod::GaussSeidel,
            max_iterations: 100,
            tolerance: 1e-8,
            dominance: DominancePolicy::Reject,
            print_interval: 0,
        }
    }
}

impl<R> StationaryConfig<R> {
    /// Same configuration with a different scheme
    pub fn with_method(mut self, method: IterativeMethod) -> Self {
        self.method = method;
        self
    }
}

/// Stationary solver result
#[derive(Debug, Clone)]
pub struct StationarySolution<T: RealField> {
    /// Solution vector
    pub x: Array1<T>,
    /// Number of sweeps performed
    pub iterations: usize,
    /// Relative change of the final sweep
    pub change: T,
    /// Whether convergence was achieved
    pub converged: bool,
}

/// Lifecycle of an [`IterationState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationStatus {
    Initialized,
    Iterating,
    Converged,
    MaxIterExceeded,
    Diverged,
}

/// Working state of a stationary iteration
#[derive(Debug, Clone)]
pub struct IterationState<T: RealField> {
    current: Array1<T>,
    previous: Array1<T>,
    iterations: usize,
    change: T,
    status: IterationStatus,
}

impl<T: RealField> IterationState<T> {
    /// Start from the initial guess `x0`
    pub fn new(x0: Array1<T>) -> Self {
        Self {
            previous: x0.clone(),
            current: x0,
            iterations: 0,
            change: T::infinity(),
            status: IterationStatus::Initialized,
        }
    }

    pub fn status(&self) -> IterationStatus {
        self.status
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn current(&self) -> &Array1<T> {
        &self.current
    }

    /// Relative change of the last sweep (infinite before the first)
    pub fn change(&self) -> T {
        self.change
    }

    /// Perform one sweep and update the status against `tolerance`
    ///
    /// `A` must be square and match the lengths of `b` and the iterate. A zero
    /// diagonal entry shows up as a non-finite iterate (`Diverged`).
    pub fn sweep(
        &mut self,
        a: &DenseMatrix<T>,
        b: &Array1<T>,
        method: IterativeMethod,
        tolerance: T,
    ) -> LinsysResult<IterationStatus, T> {
        let n = a.require_square()?;
        for len in [b.len(), self.current.len()] {
            if len != n {
                return Err(LinsysError::DimensionMismatch {
                    expected: n,
                    got: len,
                });
            }
        }
        self.previous.assign(&self.current);
        self.status = IterationStatus::Iterating;

        match method {
            IterativeMethod::Jacobi => {
                for i in 0..n {
                    let sigma = a.row_dot(i, 0..i, &self.previous)?
                        + a.row_dot(i, (i + 1)..n, &self.previous)?;
                    self.current[i] = (b[i] - sigma) / a.get(i, i)?;
                }
            }
            IterativeMethod::GaussSeidel => {
                for i in 0..n {
                    let sigma = a.row_dot(i, 0..i, &self.current)?
                        + a.row_dot(i, (i + 1)..n, &self.current)?;
                    self.current[i] = (b[i] - sigma) / a.get(i, i)?;
                }
            }
        }
        self.iterations += 1;

        if self.current.iter().any(|v| !v.is_finite()) {
            self.status = IterationStatus::Diverged;
            return Ok(self.status);
        }

        self.change = relative_change(&self.current, &self.previous);
        if self.change < tolerance {
            self.status = IterationStatus::Converged;
        }
        Ok(self.status)
    }
}

/// `max|x_new - x_old| / max|x_new|`, or the absolute change when `x_new == 0`
fn relative_change<T: RealField>(x_new: &Array1<T>, x_old: &Array1<T>) -> T {
    let diff = x_new
        .iter()
        .zip(x_old.iter())
        .fold(T::zero(), |acc, (&a, &b)| acc.max((a - b).abs()));
    let scale = inf_norm(x_new);
    if scale > T::zero() { diff / scale } else { diff }
}

/// Solve `A·x = b` with Jacobi or Gauss-Seidel iteration
///
/// `x0` defaults to the zero vector. Inputs are never modified.
///
/// # Errors
/// - `NotSquare` / `DimensionMismatch` for malformed input
/// - `SingularMatrix` if a diagonal entry is zero
/// - `NotDiagonallyDominant` under [`DominancePolicy::Reject`]
/// - `NonConvergence` when `max_iterations` sweeps do not meet the tolerance
/// - `Diverged` when the iterate overflows
pub fn solve_iterative<T: RealField>(
    a: &DenseMatrix<T>,
    b: &Array1<T>,
    x0: Option<&Array1<T>>,
    config: &StationaryConfig<T>,
) -> LinsysResult<StationarySolution<T>, T> {
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
    let x0 = match x0 {
        Some(x0) if x0.len() != n => {
            return Err(LinsysError::DimensionMismatch {
                expected: n,
                got: x0.len(),
            });
        }
        Some(x0) => x0.clone(),
        None => Array1::zeros(n),
    };

    if let Some(i) = a.diagonal().iter().position(|d| *d == T::zero()) {
        return Err(LinsysError::SingularMatrix { pivot: i });
    }

    let report = verify_diagonal_dominance(a);
    if !report.is_dominant() {
        match config.dominance {
            DominancePolicy::Reject => {
                return Err(LinsysError::NotDiagonallyDominant {
                    rows: report.violating_rows,
                });
            }
            DominancePolicy::Warn => {
                log::warn!(
                    "Matrix is not strictly diagonally dominant (rows {:?}); convergence is not guaranteed",
                    report.violating_rows
                );
            }
        }
    }

    let mut state = IterationState::new(x0);
    loop {
        if state.status != IterationStatus::Converged
            && state.status != IterationStatus::Diverged
            && state.iterations >= config.max_iterations
        {
            state.status = IterationStatus::MaxIterExceeded;
        }

        match state.status {
            IterationStatus::Converged => {
                log::debug!(
                    "{:?} converged in {} iterations",
                    config.method,
                    state.iterations
                );
                return Ok(StationarySolution {
                    x: state.current,
                    iterations: state.iterations,
                    change: state.change,
                    converged: true,
                });
            }
            IterationStatus::Diverged => {
                return Err(LinsysError::Diverged {
                    iterations: state.iterations,
                    best: state.previous,
                });
            }
            IterationStatus::MaxIterExceeded => {
                return Err(LinsysError::NonConvergence {
                    iterations: state.iterations,
                    change: state.change,
                    best: state.current,
                });
            }
            IterationStatus::Initialized | IterationStatus::Iterating => {
                state.sweep(a, b, config.method, config.tolerance)?;

                if config.print_interval > 0 && state.iterations % config.print_interval == 0 {
                    log::info!(
                        "{:?} iteration {}: relative change = {:.6e}",
                        config.method,
                        state.iterations,
                        state.change.to_f64().unwrap_or(f64::NAN)
                    );
                }
            }
        }
    }
}

/// Jacobi iteration from a zero initial guess
pub fn jacobi<T: RealField>(
    a: &DenseMatrix<T>,
    b: &Array1<T>,
    config: &StationaryConfig<T>,
) -> LinsysResult<StationarySolution<T>, T> {
    let config = config.clone().with_method(IterativeMethod::Jacobi);
    solve_iterative(a, b, None, &config)
}

/// Gauss-Seidel iteration from a zero initial guess
pub fn gauss_seidel<T: RealField>(
    a: &DenseMatrix<T>,
    b: &Array1<T>,
    config: &StationaryConfig<T>,
) -> LinsysResult<StationarySolution<T>, T> {
    let config = config.clone().with_method(IterativeMethod::GaussSeidel);
    solve_iterative(a, b, None, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn dominant_system() -> (DenseMatrix<f64>, Array1<f64>) {
        let a = DenseMatrix::from_rows(&[
            vec![10.0, 2.0, 1.0],
            vec![1.0, 5.0, 1.0],
            vec![2.0, 3.0, 10.0],
        ])
        .unwrap();
        (a, array![7.0, -8.0, 6.0])
    }

    #[test]
    fn test_jacobi_converges() {
        let (a, b) = dominant_system();
        let solution = jacobi(&a, &b, &StationaryConfig::default()).unwrap();

        assert!(solution.converged);
        assert!(solution.change < 1e-8);
        assert_relative_eq!(solution.x[0], 1.0, epsilon = 1e-7);
        assert_relative_eq!(solution.x[1], -2.0, epsilon = 1e-7);
        assert_relative_eq!(solution.x[2], 1.0, epsilon = 1e-7);
    }

    #[test]
    fn test_gauss_seidel_needs_fewer_sweeps() {
        let (a, b) = dominant_system();
        let config = StationaryConfig::default();
        let j = jacobi(&a, &b, &config).unwrap();
        let gs = gauss_seidel(&a, &b, &config).unwrap();

        assert!(gs.iterations <= j.iterations);
        for i in 0..3 {
            assert_relative_eq!(gs.x[i], j.x[i], epsilon = 1e-7);
        }
    }

    #[test]
    fn test_jacobi_first_sweep_uses_previous_iterate() {
        let (a, b) = dominant_system();
        let mut state = IterationState::new(Array1::zeros(3));
        assert_eq!(state.status(), IterationStatus::Initialized);

        state.sweep(&a, &b, IterativeMethod::Jacobi, 1e-12).unwrap();
        assert_eq!(state.status(), IterationStatus::Iterating);
        assert_eq!(state.current(), &array![0.7, -1.6, 0.6]);

        let mut state = IterationState::new(Array1::zeros(3));
        state.sweep(&a, &b, IterativeMethod::GaussSeidel, 1e-12).unwrap();
        // x1 = (-8 - 0.7) / 5, x2 = (6 - 2*0.7 - 3*x1) / 10
        let x1 = (-8.0 - 0.7) / 5.0;
        assert_relative_eq!(state.current()[1], x1, epsilon = 1e-12);
        assert_relative_eq!(
            state.current()[2],
            (6.0 - 2.0 * 0.7 - 3.0 * x1) / 10.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_initial_guess_is_not_mutated() {
        let (a, b) = dominant_system();
        let x0 = array![1.0, 1.0, 1.0];
        let solution = solve_iterative(&a, &b, Some(&x0), &StationaryConfig::default()).unwrap();
        assert!(solution.converged);
        assert_eq!(x0, array![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_rejects_non_dominant() {
        let a = DenseMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 1.0]]).unwrap();
        let b = array![1.0, 1.0];
        assert_eq!(
            solve_iterative(&a, &b, None, &StationaryConfig::default()).unwrap_err(),
            LinsysError::NotDiagonallyDominant { rows: vec![0, 1] }
        );
    }

    #[test]
    fn test_warn_policy_still_iterates() {
        // Not diagonally dominant but symmetric positive definite, so
        // Gauss-Seidel still converges.
        let a = DenseMatrix::from_rows(&[vec![2.0, 2.5], vec![2.5, 4.0]]).unwrap();
        let b = array![1.0, 2.0];
        let config = StationaryConfig {
            dominance: DominancePolicy::Warn,
            max_iterations: 500,
            ..StationaryConfig::default()
        };
        let solution = solve_iterative(&a, &b, None, &config).unwrap();
        assert!(solution.converged);
        let ax = crate::traits::LinearOperator::apply(&a, &solution.x);
        assert_relative_eq!(ax[0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(ax[1], 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_non_convergence_carries_best_iterate() {
        let (a, b) = dominant_system();
        let config = StationaryConfig {
            max_iterations: 2,
            ..StationaryConfig::default()
        };
        match solve_iterative(&a, &b, None, &config) {
            Err(LinsysError::NonConvergence {
                iterations,
                change,
                best,
            }) => {
                assert_eq!(iterations, 2);
                assert!(change > 1e-8);
                assert_eq!(best.len(), 3);
                assert!(best.iter().all(|v| v.is_finite()));
            }
            other => panic!("expected NonConvergence, got {:?}", other),
        }
    }

    #[test]
    fn test_diverging_iteration() {
        // Jacobi iteration matrix has spectral radius 3
        let a = DenseMatrix::from_rows(&[vec![1.0, 3.0], vec![3.0, 1.0]]).unwrap();
        let b = array![1.0, 1.0];
        let config = StationaryConfig {
            method: IterativeMethod::Jacobi,
            dominance: DominancePolicy::Warn,
            max_iterations: 2000,
            ..StationaryConfig::default()
        };
        match solve_iterative(&a, &b, None, &config) {
            Err(LinsysError::Diverged { best, .. }) => {
                assert!(best.iter().all(|v| v.is_finite()));
            }
            other => panic!("expected Diverged, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_rhs_does_not_produce_nan() {
        let (a, _) = dominant_system();
        let b = Array1::zeros(3);
        let solution = solve_iterative(&a, &b, None, &StationaryConfig::default()).unwrap();
        assert!(solution.converged);
        assert_eq!(solution.iterations, 1);
        assert_eq!(solution.x, Array1::<f64>::zeros(3));
        assert_eq!(solution.change, 0.0);
    }

    #[test]
    fn test_zero_diagonal_is_singular() {
        let a = DenseMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        let b = array![1.0, 1.0];
        assert_eq!(
            solve_iterative(&a, &b, None, &StationaryConfig::default()).unwrap_err(),
            LinsysError::SingularMatrix { pivot: 0 }
        );
    }

    #[test]
    fn test_dimension_checks() {
        let (a, b) = dominant_system();
        let config = StationaryConfig::default();
        assert!(matches!(
            solve_iterative(&a, &array![1.0], None, &config),
            Err(LinsysError::DimensionMismatch {
                expected: 3,
                got: 1
            })
        ));
        assert!(matches!(
            solve_iterative(&a, &b, Some(&array![0.0, 0.0]), &config),
            Err(LinsysError::DimensionMismatch {
                expected: 3,
                got: 2
            })
        ));
    }

    #[test]
    fn test_zero_iteration_budget() {
        let (a, b) = dominant_system();
        let config = StationaryConfig {
            max_iterations: 0,
            ..StationaryConfig::default()
        };
        match solve_iterative(&a, &b, None, &config) {
            Err(LinsysError::NonConvergence {
                iterations, best, ..
            }) => {
                assert_eq!(iterations, 0);
                assert_eq!(best, Array1::<f64>::zeros(3));
            }
            other => panic!("expected NonConvergence, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_system_is_rejected() {
        let a = DenseMatrix::<f64>::zeros(0, 0);
        let b = Array1::<f64>::zeros(0);
        for method in [IterativeMethod::Jacobi, IterativeMethod::GaussSeidel] {
            let config = StationaryConfig::default().with_method(method);
            assert_eq!(
                solve_iterative(&a, &b, None, &config).unwrap_err(),
                LinsysError::DimensionMismatch {
                    expected: 1,
                    got: 0
                }
            );
        }
    }

    #[test]
    fn test_sweep_checks_shapes() {
        let (a, b) = dominant_system();
        let mut state = IterationState::new(Array1::zeros(3));
        assert!(matches!(
            state.sweep(&a, &array![7.0, -8.0], IterativeMethod::Jacobi, 1e-8),
            Err(LinsysError::DimensionMismatch {
                expected: 3,
                got: 2
            })
        ));

        let mut short = IterationState::new(Array1::zeros(2));
        assert!(matches!(
            short.sweep(&a, &b, IterativeMethod::GaussSeidel, 1e-8),
            Err(LinsysError::DimensionMismatch {
                expected: 3,
                got: 2
            })
        ));
        assert_eq!(short.status(), IterationStatus::Initialized);
        assert_eq!(short.iterations(), 0);

        let rect = DenseMatrix::<f64>::zeros(2, 3);
        assert!(matches!(
            state.sweep(&rect, &b, IterativeMethod::Jacobi, 1e-8),
            Err(LinsysError::NotSquare { rows: 2, cols: 3 })
        ));
    }
}
