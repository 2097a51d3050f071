//! Dense linear system solvers
//!
//! This crate provides the solver kernel behind interpolation, least-squares
//! and Newton-type methods: given a square matrix `A` and a right-hand side
//! `b`, find `x` with `A·x = b`.
//!
//! # Features
//!
//! - **Gaussian elimination**: partial pivoting, one-shot
//! - **LU decomposition**: `P·A = L·U` with partial pivoting, reusable across
//!   right-hand sides, plus determinant and inverse
//! - **Stationary iteration**: Jacobi and Gauss-Seidel with a diagonal
//!   dominance check and a relative infinity-norm stopping rule
//! - **Newton's method** for nonlinear systems built on the LU solver
//! - **Generic scalar types**: works with `f64` and `f32`
//!
//! Every entry point borrows its inputs and works on copies; caller data is
//! never modified.
//!
//! # Example
//!
//! ```
//! use math_linsys::{DenseMatrix, factorize_lu, solve_gauss};
//! use ndarray::array;
//!
//! let a = DenseMatrix::from_rows(&[
//!     vec![2.0_f64, 1.0, -1.0],
//!     vec![-3.0, -1.0, 2.0],
//!     vec![-2.0, 1.0, 2.0],
//! ])?;
//! let b = array![8.0, -11.0, -3.0];
//!
//! let x = solve_gauss(&a, &b)?;
//! assert!((x[1] - 3.0).abs() < 1e-12);
//!
//! // Factor once, solve many
//! let lu = factorize_lu(&a)?;
//! let x2 = lu.solve(&array![1.0, 0.0, 0.0])?;
//! assert_eq!(x2.len(), 3);
//! # Ok::<(), math_linsys::LinsysError>(())
//! ```

pub mod dense;
pub mod direct;
pub mod error;
pub mod iterative;
pub mod nonlinear;
pub mod solve;
pub mod testing;
pub mod traits;

// Re-export main types
pub use dense::DenseMatrix;
pub use error::{LinsysError, LinsysResult};
pub use traits::{LinearOperator, RealField};

// Re-export direct solvers
pub use direct::{
    GaussianElimination, LuFactorization, Permutation, eliminate, factorize_lu, lu_solve,
    solve_augmented, solve_gauss, solve_with_factorization,
};

// Re-export iterative solvers
pub use iterative::{
    DominancePolicy, DominanceReport, IterationState, IterationStatus, IterativeMethod,
    StationaryConfig, StationarySolution, gauss_seidel, jacobi, solve_iterative,
    verify_diagonal_dominance,
};

pub use nonlinear::{NewtonConfig, NewtonSolution, newton_system};
pub use solve::{Method, Solution, residual_norm, solve};
