//! Core traits for dense linear algebra
//!
//! This module defines the abstractions shared by every solver in the crate:
//! - [`RealField`]: Trait for the real scalar types the kernels operate on
//! - [`LinearOperator`]: Trait for matrix-like objects that can perform matrix-vector products

use ndarray::Array1;
use num_traits::{Float, FromPrimitive, NumAssign, ToPrimitive};
use std::fmt::{Debug, Display, LowerExp};

/// Trait for scalar types that can be used by the solvers.
///
/// The reference type is `f64`; `f32` is provided for memory-constrained
/// callers. Pivot and convergence thresholds are expressed through
/// [`RealField::machine_epsilon`] so that both precisions behave sensibly.
pub trait RealField:
    Float
    + NumAssign
    + FromPrimitive
    + ToPrimitive
    + Debug
    + Display
    + LowerExp
    + Default
    + Send
    + Sync
    + 'static
{
    /// Machine epsilon of the underlying floating point format
    fn machine_epsilon() -> Self;

    /// Convert a dimension or count into the scalar type
    fn from_count(n: usize) -> Self;

    /// Check if this is approximately zero
    fn is_zero_approx(&self, tol: Self) -> bool {
        self.abs() <= tol
    }
}

impl RealField for f64 {
    #[inline]
    fn machine_epsilon() -> Self {
        f64::EPSILON
    }

    #[inline]
    fn from_count(n: usize) -> Self {
        n as f64
    }
}

impl RealField for f32 {
    #[inline]
    fn machine_epsilon() -> Self {
        f32::EPSILON
    }

    #[inline]
    fn from_count(n: usize) -> Self {
        n as f32
    }
}

/// Trait for linear operators (matrices) that can perform matrix-vector products.
///
/// Residual checks and the Newton stepper only need `y = A * x`, so they are
/// written against this trait rather than a concrete storage type.
pub trait LinearOperator<T: RealField> {
    /// Number of rows in the operator
    fn num_rows(&self) -> usize;

    /// Number of columns in the operator
    fn num_cols(&self) -> usize;

    /// Apply the operator: y = A * x
    ///
    /// Callers must pass `x.len() == self.num_cols()`.
    fn apply(&self, x: &Array1<T>) -> Array1<T>;

    /// Check if the operator is square
    fn is_square(&self) -> bool {
        self.num_rows() == self.num_cols()
    }
}

/// Infinity norm `max_i |x_i|` of a vector (0 for an empty vector)
#[inline]
pub fn inf_norm<T: RealField>(x: &Array1<T>) -> T {
    x.iter().fold(T::zero(), |acc, &xi| acc.max(xi.abs()))
}
