//! Cholesky decomposition and inversion of the resulting lower-triangular factor.

use crate::{CholeskyError, Matrix, MatrixDataType};

/// Decomposes a symmetric positive definite matrix in place into its lower-triangular
/// Cholesky factor `L`, such that `L × Lᵀ` equals the original matrix.
///
/// Rows are processed top to bottom (Cholesky–Banachiewicz). Only the lower triangle,
/// including the diagonal, holds `L` afterwards; the strictly upper triangle keeps
/// whatever it contained before.
///
/// ## Errors
/// Returns [`CholeskyError::NotPositiveDefinite`] when a pivot is zero, negative or
/// NaN. The matrix is partially overwritten in that case.
pub fn decompose_lower<T>(mat: &mut Matrix<'_, T>) -> Result<(), CholeskyError>
where
    T: MatrixDataType,
{
    debug_assert!(mat.is_square(), "Cholesky decomposition requires a square matrix");
    let n = mat.rows();

    for i in 0..n {
        for j in 0..=i {
            let mut sum = mat.get(i, j);
            {
                let l_i = &mat.row(i)[..j];
                let l_j = &mat.row(j)[..j];
                for (a, b) in l_i.iter().zip(l_j.iter()) {
                    sum -= *a * *b;
                }
            }

            if i == j {
                if sum <= T::zero() || sum.is_nan() {
                    return Err(CholeskyError::NotPositiveDefinite { row: i });
                }
                mat.set(i, i, sum.square_root());
            } else {
                let l_jj = mat.get(j, j);
                mat.set(i, j, sum / l_jj);
            }
        }
    }

    Ok(())
}

/// Given the Cholesky factor `L` of a matrix `M`, computes `M⁻¹ = (L × Lᵀ)⁻¹`.
///
/// The first pass inverts `L` by forward substitution and parks the result in the
/// upper triangle of `inverse`. The second pass back-substitutes against `Lᵀ` and
/// writes both triangles, so `inverse` ends up fully populated and symmetric.
///
/// Only the lower triangle of `lower` is read. `lower` must come from a successful
/// [`decompose_lower`]; a zero pivot yields infinities.
pub fn invert_lower<T>(lower: &Matrix<'_, T>, inverse: &mut Matrix<'_, T>)
where
    T: MatrixDataType,
{
    debug_assert!(lower.is_square());
    debug_assert_eq!(lower.rows(), inverse.rows());
    debug_assert_eq!(lower.cols(), inverse.cols());
    let n = lower.rows();

    // L⁻¹, stored transposed in the upper triangle
    for i in 0..n {
        let el_ii = lower.get(i, i);
        for j in 0..=i {
            let mut sum = if i == j { T::one() } else { T::zero() };
            for k in (j..i).rev() {
                sum -= lower.get(i, k) * inverse.get(j, k);
            }
            inverse.set(j, i, sum / el_ii);
        }
    }

    // L⁻ᵀ × L⁻¹
    for i in (0..n).rev() {
        let el_ii = lower.get(i, i);
        for j in 0..=i {
            let mut sum = inverse.get(j, i);
            for k in (i + 1)..n {
                sum -= lower.get(k, i) * inverse.get(j, k);
            }
            inverse.set_symmetric(i, j, sum / el_ii);
        }
    }
}
