//! Random test systems
//!
//! Generators for systems with a known solution, used by the property tests,
//! the benchmarks and the `linsys --random` command.

use crate::dense::DenseMatrix;
use crate::traits::LinearOperator;
use ndarray::{Array1, Array2};
use rand::Rng;

/// A system `A·x = b` together with its exact solution
#[derive(Debug, Clone)]
pub struct RandomSystem {
    pub a: DenseMatrix<f64>,
    pub b: Array1<f64>,
    /// Solution used to build `b`
    pub x: Array1<f64>,
}

/// Uniform sample from `(-range, range)` excluding zero
fn non_zero<R: Rng>(rng: &mut R, range: f64) -> f64 {
    loop {
        let v = rng.random_range(-range..range);
        if v != 0.0 {
            return v;
        }
    }
}

/// Random `rows x cols` matrix with nonzero entries in `(-range, range)`
///
/// # Panics
/// If `range` is not a positive finite number. The generators below share
/// this requirement.
pub fn random_matrix<R: Rng>(
    rows: usize,
    cols: usize,
    range: f64,
    rng: &mut R,
) -> DenseMatrix<f64> {
    DenseMatrix::from_array(Array2::from_shape_simple_fn((rows, cols), || non_zero(rng, range)))
}

/// Random strictly diagonally dominant `n x n` system
///
/// Off-diagonal entries and the solution are drawn from `(-range, range)`;
/// each diagonal entry is the row's absolute off-diagonal sum plus a margin
/// in `[1, 5)`, so Jacobi and Gauss-Seidel are guaranteed to converge.
pub fn random_diagonally_dominant<R: Rng>(n: usize, range: f64, rng: &mut R) -> RandomSystem {
    let mut a = random_matrix(n, n, range, rng).into_array();
    for i in 0..n {
        let off_diag: f64 = (0..n).filter(|&j| j != i).map(|j| a[[i, j]].abs()).sum();
        a[[i, i]] = off_diag + rng.random_range(1.0..5.0);
    }
    let a = DenseMatrix::from_array(a);
    let x: Array1<f64> = (0..n).map(|_| non_zero(rng, range)).collect();
    let b = a.apply(&x);
    RandomSystem { a, b, x }
}

/// Random general `n x n` system (nonsingular with probability one)
pub fn random_system<R: Rng>(n: usize, range: f64, rng: &mut R) -> RandomSystem {
    let a = random_matrix(n, n, range, rng);
    let x: Array1<f64> = (0..n).map(|_| non_zero(rng, range)).collect();
    let b = a.apply(&x);
    RandomSystem { a, b, x }
}
