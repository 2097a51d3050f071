//! Iterative solvers for linear systems
//!
//! This module provides stationary iterations for diagonally dominant systems:
//! - [`IterativeMethod::Jacobi`]: every component uses the previous iterate
//! - [`IterativeMethod::GaussSeidel`]: updated components are used immediately
//!
//! [`verify_diagonal_dominance`] is checked before iterating; see
//! [`DominancePolicy`] for how a failed check is handled.

mod dominance;
mod stationary;

pub use dominance::{DominanceReport, verify_diagonal_dominance};
pub use stationary::{
    DominancePolicy, IterationState, IterationStatus, IterativeMethod, StationaryConfig,
    StationarySolution, gauss_seidel, jacobi, solve_iterative,
};
