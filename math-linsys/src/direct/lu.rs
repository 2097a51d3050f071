//! LU decomposition solver
//!
//! Provides LU factorization with partial pivoting for solving dense linear
//! systems. The factorization is computed once in O(n³); every subsequent
//! right-hand side costs only an O(n²) forward and back substitution.

use super::gauss::find_pivot;
use super::permutation::Permutation;
use super::pivot_tolerances;
use super::substitution::{back_substitute, forward_substitute_unit};
use crate::dense::DenseMatrix;
use crate::error::{LinsysError, LinsysResult};
use crate::traits::RealField;
use ndarray::{Array1, Array2};

/// LU factorization result
///
/// Satisfies `P·A = L·U` for the matrix it was computed from. It is a
/// snapshot: mutating the source matrix afterwards does not update it.
#[derive(Debug, Clone)]
pub struct LuFactorization<T: RealField> {
    /// Unit lower triangular factor
    l: DenseMatrix<T>,
    /// Upper triangular factor
    u: DenseMatrix<T>,
    /// Row permutation from pivoting
    permutation: Permutation,
}

impl<T: RealField> LuFactorization<T> {
    /// Matrix dimension
    pub fn dim(&self) -> usize {
        self.u.nrows()
    }

    pub fn l(&self) -> &DenseMatrix<T> {
        &self.l
    }

    pub fn u(&self) -> &DenseMatrix<T> {
        &self.u
    }

    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Explicit permutation matrix `P`
    pub fn p(&self) -> DenseMatrix<T> {
        self.permutation.to_matrix()
    }

    /// Decompose into `(P, L, U)`
    pub fn into_parts(self) -> (Permutation, DenseMatrix<T>, DenseMatrix<T>) {
        (self.permutation, self.l, self.u)
    }

    /// Solve `A·x = b` using the pre-computed factorization
    pub fn solve(&self, b: &Array1<T>) -> LinsysResult<Array1<T>, T> {
        if b.len() != self.dim() {
            return Err(LinsysError::DimensionMismatch {
                expected: self.dim(),
                got: b.len(),
            });
        }

        // b' = P·b
        let pb = self.permutation.apply(b)?;
        // L·y = b'
        let y = forward_substitute_unit(&self.l, &pb)?;
        // U·x = y
        back_substitute(&self.u, &y)
    }

    /// Solve against several right-hand sides with a single factorization
    pub fn solve_many(&self, rhs: &[Array1<T>]) -> LinsysResult<Vec<Array1<T>>, T> {
        rhs.iter().map(|b| self.solve(b)).collect()
    }

    /// Determinant of the factored matrix: `sign(P) · Π U[i,i]`
    pub fn determinant(&self) -> T {
        self.u
            .diagonal()
            .iter()
            .fold(self.permutation.sign::<T>(), |acc, &d| acc * d)
    }

    /// Inverse of the factored matrix, one column per unit vector
    pub fn inverse(&self) -> LinsysResult<DenseMatrix<T>, T> {
        let n = self.dim();
        let mut inv = Array2::zeros((n, n));
        let mut e = Array1::zeros(n);
        for j in 0..n {
            e[j] = T::one();
            let column = self.solve(&e)?;
            inv.column_mut(j).assign(&column);
            e[j] = T::zero();
        }
        Ok(DenseMatrix::from_array(inv))
    }
}

/// Compute the LU factorization `P·A = L·U` with partial pivoting
///
/// # Errors
/// - `NotSquare` if `A` is not square
/// - `DimensionMismatch` if `A` is empty
/// - `SingularMatrix` if a pivot is numerically zero
pub fn factorize_lu<T: RealField>(a: &DenseMatrix<T>) -> LinsysResult<LuFactorization<T>, T> {
    let n = a.require_square()?;
    if n == 0 {
        return Err(LinsysError::DimensionMismatch {
            expected: 1,
            got: 0,
        });
    }
    let tol = pivot_tolerances(a);

    let mut u = a.clone();
    let mut l = DenseMatrix::zeros(n, n);
    let mut permutation = Permutation::identity(n);

    for k in 0..n {
        let (max_row, max_val) = find_pivot(&u, k)?;

        // Check for singularity
        if max_val <= tol[k] {
            return Err(LinsysError::SingularMatrix { pivot: k });
        }

        // Swap rows if needed; only columns < k of L are populated so far
        if max_row != k {
            u.swap_rows(k, max_row)?;
            l.swap_rows(k, max_row)?;
            permutation.swap(k, max_row);
        }

        // Compute multipliers and eliminate the trailing submatrix
        let pivot = u.get(k, k)?;
        for i in (k + 1)..n {
            let mult = u.get(i, k)? / pivot;
            l.set(i, k, mult)?;
            if mult != T::zero() {
                u.row_axpy(i, k, mult, (k + 1)..n)?;
            }
            u.set(i, k, T::zero())?;
        }
    }

    for i in 0..n {
        l.set(i, i, T::one())?;
    }

    log::debug!(
        "LU factorization of {}x{} matrix, {} rows displaced by pivoting",
        n,
        n,
        permutation
            .indices()
            .iter()
            .enumerate()
            .filter(|(i, p)| i != *p)
            .count()
    );

    Ok(LuFactorization { l, u, permutation })
}

/// Solve `A·x = b` with a previously computed factorization
pub fn solve_with_factorization<T: RealField>(
    lu: &LuFactorization<T>,
    b: &Array1<T>,
) -> LinsysResult<Array1<T>, T> {
    lu.solve(b)
}

/// Solve `A·x = b` using LU decomposition
///
/// This is a convenience function that combines factorization and solve.
pub fn lu_solve<T: RealField>(a: &DenseMatrix<T>, b: &Array1<T>) -> LinsysResult<Array1<T>, T> {
    let factorization = factorize_lu(a)?;
    factorization.solve(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::LinearOperator;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn matrix(rows: &[Vec<f64>]) -> DenseMatrix<f64> {
        DenseMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_lu_solve_real() {
        let a = matrix(&[vec![4.0, 1.0], vec![1.0, 3.0]]);
        let b = array![1.0, 2.0];

        let x = lu_solve(&a, &b).expect("LU solve should succeed");

        // Verify: Ax = b
        let ax = a.apply(&x);
        for i in 0..2 {
            assert_relative_eq!(ax[i], b[i], epsilon = 1e-10);
        }
    }

    #[test]
    fn test_lu_identity() {
        let n = 5;
        let a = DenseMatrix::<f64>::identity(n);
        let b = Array1::from_iter((1..=n).map(|i| i as f64));

        let x = lu_solve(&a, &b).expect("LU solve should succeed");

        for i in 0..n {
            assert_relative_eq!(x[i], b[i], epsilon = 1e-10);
        }
    }

    #[test]
    fn test_lu_singular() {
        let a = matrix(&[vec![1.0, 2.0], vec![2.0, 4.0]]);
        assert!(matches!(
            factorize_lu(&a),
            Err(LinsysError::SingularMatrix { pivot: 1 })
        ));
    }

    #[test]
    fn test_pa_equals_lu() {
        let a = matrix(&[
            vec![2.0, 1.0, -1.0],
            vec![-3.0, -1.0, 2.0],
            vec![-2.0, 1.0, 2.0],
        ]);
        let lu = factorize_lu(&a).unwrap();

        let pa = lu.p().as_array().dot(a.as_array());
        let prod = lu.l().as_array().dot(lu.u().as_array());
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(pa[[i, j]], prod[[i, j]], epsilon = 1e-12);
            }
        }

        for i in 0..3 {
            assert_eq!(lu.l().get(i, i).unwrap(), 1.0);
            for j in (i + 1)..3 {
                assert_eq!(lu.l().get(i, j).unwrap(), 0.0);
            }
            for j in 0..i {
                assert_eq!(lu.u().get(i, j).unwrap(), 0.0);
            }
        }
        // multipliers are bounded by one under partial pivoting
        assert!(lu.l().max_abs() <= 1.0);
    }

    #[test]
    fn test_lu_factorize_and_solve() {
        let a = matrix(&[
            vec![4.0, 1.0, 0.0],
            vec![1.0, 3.0, 1.0],
            vec![0.0, 1.0, 2.0],
        ]);

        let factorization = factorize_lu(&a).expect("Factorization should succeed");

        // Solve multiple RHS
        let b1 = array![1.0, 2.0, 3.0];
        let x1 = solve_with_factorization(&factorization, &b1).expect("Solve should succeed");

        let ax1 = a.apply(&x1);
        for i in 0..3 {
            assert_relative_eq!(ax1[i], b1[i], epsilon = 1e-10);
        }

        let b2 = array![4.0, 5.0, 6.0];
        let xs = factorization.solve_many(&[b1.clone(), b2.clone()]).unwrap();
        assert_eq!(xs[0], x1);

        let ax2 = a.apply(&xs[1]);
        for i in 0..3 {
            assert_relative_eq!(ax2[i], b2[i], epsilon = 1e-10);
        }
    }

    #[test]
    fn test_lu_solve_dimension_mismatch() {
        let lu = factorize_lu(&DenseMatrix::<f64>::identity(3)).unwrap();
        assert_eq!(
            lu.solve(&array![1.0, 2.0]),
            Err(LinsysError::DimensionMismatch {
                expected: 3,
                got: 2
            })
        );
    }

    #[test]
    fn test_determinant() {
        let a = matrix(&[vec![0.0, 2.0], vec![3.0, 1.0]]);
        let lu = factorize_lu(&a).unwrap();
        // one row swap, det = 0*1 - 2*3
        assert_relative_eq!(lu.determinant(), -6.0, epsilon = 1e-12);

        let a = matrix(&[
            vec![2.0, 1.0, -1.0],
            vec![-3.0, -1.0, 2.0],
            vec![-2.0, 1.0, 2.0],
        ]);
        assert_relative_eq!(factorize_lu(&a).unwrap().determinant(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse() {
        let a = matrix(&[vec![4.0, 7.0], vec![2.0, 6.0]]);
        let inv = factorize_lu(&a).unwrap().inverse().unwrap();
        assert_relative_eq!(inv.get(0, 0).unwrap(), 0.6, epsilon = 1e-12);
        assert_relative_eq!(inv.get(0, 1).unwrap(), -0.7, epsilon = 1e-12);
        assert_relative_eq!(inv.get(1, 0).unwrap(), -0.2, epsilon = 1e-12);
        assert_relative_eq!(inv.get(1, 1).unwrap(), 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_factorization_does_not_mutate_input() {
        let a = matrix(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
        let before = a.clone();
        let (p, l, u) = factorize_lu(&a).unwrap().into_parts();
        assert_eq!(a, before);
        assert_eq!(p.indices(), &[1, 0]);
        assert_relative_eq!(l.get(1, 0).unwrap(), 1.0 / 3.0, epsilon = 1e-15);
        assert_relative_eq!(u.get(1, 1).unwrap(), 2.0 - 4.0 / 3.0, epsilon = 1e-15);
    }

    #[test]
    fn test_mixed_column_scales_are_not_singular() {
        let diag = matrix(&[vec![1.0, 0.0], vec![0.0, 1e16]]);
        let lu = factorize_lu(&diag).unwrap();
        assert_relative_eq!(lu.determinant(), 1e16, max_relative = 1e-15);

        let scaled = matrix(&[vec![4.0, 1e16], vec![1.0, 3e16]]);
        let x = factorize_lu(&scaled)
            .unwrap()
            .solve(&array![5.0, 4.0])
            .unwrap();
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 1e-16, max_relative = 1e-12);
    }
}
