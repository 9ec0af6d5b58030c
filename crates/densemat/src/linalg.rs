//! Matrix multiplication entry points.
//!
//! ```text
//! matmul(a, b)
//!     → check a.cols == b.rows
//!     → coerce both to promote(kind(a), kind(b))
//!     → allocate zero result a.rows × b.cols
//!     → Kernels::gemm(α = 1, β = 0)
//! ```

use tracing::debug;

use crate::config::LinalgConfig;
use crate::error::MatrixError;
use crate::kind::promote;
use crate::matrix::{Matrix, checked_len};
use crate::scalar::Element;
use crate::storage::{Dense, Storage, coerce_view};
use crate::with_element;

/// Matrix product `a · b`, computed sequentially.
///
/// # Example
///
/// ```
/// use densemat::{Matrix, matmul};
///
/// // [[1, 2, 3], [4, 5, 6]] · [[7, 8], [9, 10], [11, 12]]
/// let a = Matrix::from_vec(vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0], 2, 3).unwrap();
/// let b = Matrix::from_vec(vec![7.0, 9.0, 11.0, 8.0, 10.0, 12.0], 3, 2).unwrap();
/// let c = matmul(&a, &b).unwrap();
/// assert_eq!(c.size(), (2, 2));
/// assert_eq!(c.as_slice::<f64>(), Some(&[58.0, 139.0, 64.0, 154.0][..]));
/// ```
pub fn matmul(a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
    matmul_with(a, b, &LinalgConfig::default())
}

/// Matrix product `a · b` with explicit configuration.
///
/// # Errors
///
/// [`MatrixError::IncompatibleDimensions`] if `a.cols() != b.rows()`.
pub fn matmul_with(a: &Matrix, b: &Matrix, config: &LinalgConfig) -> Result<Matrix, MatrixError> {
    if a.cols() != b.rows() {
        return Err(MatrixError::IncompatibleDimensions {
            lhs: a.size(),
            rhs: b.size(),
        });
    }
    let kind = promote(a.kind(), b.kind());
    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    debug!(
        m,
        n,
        k,
        kind = %kind,
        parallelism = ?config.parallelism,
        "dispatching gemm"
    );
    let storage = with_element!(kind, E => gemm_typed::<E>(a, b, config)?);
    Ok(Matrix::from_storage(m, n, storage))
}

fn gemm_typed<T: Element>(
    a: &Matrix,
    b: &Matrix,
    config: &LinalgConfig,
) -> Result<Storage, MatrixError> {
    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    let av = coerce_view::<T>(a.storage())?;
    let bv = coerce_view::<T>(b.storage())?;
    let mut c = Dense::<T>::try_zeros(checked_len(m, n)?)?;
    T::gemm(
        m,
        n,
        k,
        T::one(),
        &av,
        &bv,
        T::zero(),
        c.as_mut_slice(),
        config.parallelism.to_par(),
    );
    Ok(T::into_storage(c))
}
