use nalgebra::{DMatrix, DVector};

use crate::error::{FitError, Result};

use super::{Tolerance, TOLERANCE};

/// Singular values (descending) and the matching right-singular vectors of
/// a matrix whose rows are samples.
#[derive(Debug, Clone)]
pub struct RightSingular {
    /// Singular values, largest first. Always `cols` entries long.
    pub values: Vec<f64>,
    /// Right-singular vectors, in the same order as `values`.
    pub vectors: Vec<DVector<f64>>,
}

impl RightSingular {
    /// Decomposes `matrix` (`rows x cols`).
    ///
    /// Matrices with fewer rows than columns are padded with zero rows first,
    /// which leaves the singular vectors unchanged but yields a complete
    /// orthonormal basis of right-singular vectors.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::SvdFailed`] if the matrix is empty or the
    /// decomposition does not produce `V^T`.
    pub fn of(matrix: &DMatrix<f64>) -> Result<Self> {
        let (rows, cols) = matrix.shape();
        if rows == 0 || cols == 0 {
            return Err(FitError::SvdFailed.into());
        }

        let padded = if rows < cols {
            DMatrix::from_fn(cols, cols, |i, j| if i < rows { matrix[(i, j)] } else { 0.0 })
        } else {
            matrix.clone()
        };

        let svd = padded.svd(false, true);
        let v_t = svd.v_t.ok_or(FitError::SvdFailed)?;

        let mut order: Vec<usize> = (0..svd.singular_values.len()).collect();
        order.sort_by(|&a, &b| {
            svd.singular_values[b]
                .partial_cmp(&svd.singular_values[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let values = order.iter().map(|&i| svd.singular_values[i]).collect();
        let vectors = order
            .iter()
            .map(|&i| v_t.row(i).transpose().into_owned())
            .collect();

        Ok(Self { values, vectors })
    }
}

/// Numerical rank of a matrix: the number of singular values above the
/// threshold chosen by `tol`.
#[must_use]
pub fn matrix_rank(matrix: &DMatrix<f64>, tol: Tolerance) -> usize {
    let (rows, cols) = matrix.shape();
    if rows == 0 || cols == 0 {
        return 0;
    }
    let singular = matrix.singular_values();
    let sigma_max = singular.max();
    let threshold = tol.rank_threshold(sigma_max, rows, cols);
    singular.iter().filter(|&&s| s > threshold).count()
}

/// Least-squares solution of `a * x = b` via SVD.
///
/// # Errors
///
/// Returns [`FitError::SvdFailed`] if the solve fails.
pub fn lstsq(a: DMatrix<f64>, b: &DVector<f64>) -> Result<DVector<f64>> {
    let svd = a.svd(true, true);
    svd.solve(b, 1e-12).map_err(|_| FitError::SvdFailed.into())
}

/// Solves the 2x2 system `[[a, b], [c, d]] * [x, y] = [e, f]`.
///
/// Returns `None` if the determinant is (near) zero.
#[must_use]
pub fn solve_2x2(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Option<(f64, f64)> {
    let det = a * d - b * c;
    if det.abs() < TOLERANCE {
        return None;
    }
    Some(((e * d - b * f) / det, (a * f - e * c) / det))
}

/// Real roots of `a x^2 + b x + c = 0`, smallest first.
///
/// A discriminant within `tol.abs` of zero, on either side, is treated as
/// zero and the double root is returned twice. Returns `None` when `a` is
/// zero or the roots are complex.
#[must_use]
pub fn solve_quadratic(a: f64, b: f64, c: f64, tol: Tolerance) -> Option<(f64, f64)> {
    if a.abs() < TOLERANCE {
        return None;
    }
    let discriminant = b * b - 4.0 * a * c;
    if tol.is_zero(discriminant) {
        let x = -b / (2.0 * a);
        return Some((x, x));
    }
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let x1 = (-b - root) / (2.0 * a);
    let x2 = (-b + root) / (2.0 * a);
    Some((x1.min(x2), x1.max(x2)))
}
