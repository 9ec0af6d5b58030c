//! Zero-copy faer views and faer-backed kernels.
//!
//! Matrix buffers and faer both use column-major storage order, so a buffer
//! of `rows * cols` elements is viewed as a faer matrix without copying.

use faer::linalg::matmul::matmul;
use faer::{Accum, MatMut, MatRef, Par};
use faer_traits::ComplexField;

use crate::backend::{Kernels, generic};
use crate::scalar::{Element, c64};

/// View a column-major buffer as an immutable faer matrix.
///
/// # Panics
///
/// Panics if `rows * cols != data.len()`.
///
/// # Example
///
/// ```
/// use densemat::backend::as_faer_mat;
///
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let mat = as_faer_mat(&data, 2, 3);
/// assert_eq!(mat.nrows(), 2);
/// assert_eq!(mat[(0, 1)], 3.0);
/// ```
pub fn as_faer_mat<T: ComplexField>(data: &[T], rows: usize, cols: usize) -> MatRef<'_, T> {
    assert_eq!(
        rows * cols,
        data.len(),
        "Matrix dimensions ({} x {} = {}) must match buffer size ({})",
        rows,
        cols,
        rows * cols,
        data.len()
    );
    MatRef::from_column_major_slice(data, rows, cols)
}

/// View a column-major buffer as a mutable faer matrix.
///
/// # Panics
///
/// Panics if `rows * cols != data.len()`.
pub fn as_faer_mat_mut<T: ComplexField>(
    data: &mut [T],
    rows: usize,
    cols: usize,
) -> MatMut<'_, T> {
    assert_eq!(
        rows * cols,
        data.len(),
        "Matrix dimensions ({} x {} = {}) must match buffer size ({})",
        rows,
        cols,
        rows * cols,
        data.len()
    );
    MatMut::from_column_major_slice_mut(data, rows, cols)
}

#[allow(clippy::too_many_arguments)]
fn faer_gemm<T: Element + ComplexField>(
    m: usize,
    n: usize,
    k: usize,
    alpha: T,
    a: &[T],
    b: &[T],
    beta: T,
    c: &mut [T],
    par: Par,
) {
    let accum = if Element::is_zero(beta) {
        Accum::Replace
    } else {
        if beta != <T as Element>::one() {
            generic::scal(beta, c);
        }
        Accum::Add
    };

    let a_mat = as_faer_mat(a, m, k);
    let b_mat = as_faer_mat(b, k, n);
    let mut c_mat = as_faer_mat_mut(c, m, n);

    matmul(c_mat.as_mut(), accum, a_mat, b_mat, alpha, par);
}

impl Kernels for f64 {
    fn scal(alpha: Self, x: &mut [Self]) {
        generic::scal(alpha, x);
    }

    fn axpy(alpha: Self, x: &[Self], incx: usize, y: &mut [Self]) {
        generic::axpy(alpha, x, incx, y);
    }

    fn gemm(
        m: usize,
        n: usize,
        k: usize,
        alpha: Self,
        a: &[Self],
        b: &[Self],
        beta: Self,
        c: &mut [Self],
        par: Par,
    ) {
        faer_gemm(m, n, k, alpha, a, b, beta, c, par);
    }
}

impl Kernels for c64 {
    fn scal(alpha: Self, x: &mut [Self]) {
        generic::scal(alpha, x);
    }

    fn axpy(alpha: Self, x: &[Self], incx: usize, y: &mut [Self]) {
        generic::axpy(alpha, x, incx, y);
    }

    fn gemm(
        m: usize,
        n: usize,
        k: usize,
        alpha: Self,
        a: &[Self],
        b: &[Self],
        beta: Self,
        c: &mut [Self],
        par: Par,
    ) {
        faer_gemm(m, n, k, alpha, a, b, beta, c, par);
    }
}
