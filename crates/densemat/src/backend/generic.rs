//! Generic (naive loop-based) kernels.

use std::ops::{Add, Mul};

use faer::Par;

use crate::backend::Kernels;

/// `x ← αx` for any ring-like element type.
pub(crate) fn scal<T: Copy + Mul<Output = T>>(alpha: T, x: &mut [T]) {
    for v in x.iter_mut() {
        *v = alpha * *v;
    }
}

/// `y ← αx + y`; `incx == 0` broadcasts `x[0]`.
pub(crate) fn axpy<T: Copy + Add<Output = T> + Mul<Output = T>>(
    alpha: T,
    x: &[T],
    incx: usize,
    y: &mut [T],
) {
    if incx == 0 {
        let Some(&x0) = x.first() else { return };
        let ax = alpha * x0;
        for v in y.iter_mut() {
            *v = ax + *v;
        }
    } else {
        debug_assert_eq!(x.len(), y.len());
        for (v, &u) in y.iter_mut().zip(x.iter()) {
            *v = alpha * u + *v;
        }
    }
}

/// Naive integer kernels. Arithmetic wraps on overflow.
impl Kernels for i64 {
    fn scal(alpha: Self, x: &mut [Self]) {
        for v in x.iter_mut() {
            *v = v.wrapping_mul(alpha);
        }
    }

    fn axpy(alpha: Self, x: &[Self], incx: usize, y: &mut [Self]) {
        if incx == 0 {
            let Some(&x0) = x.first() else { return };
            let ax = alpha.wrapping_mul(x0);
            for v in y.iter_mut() {
                *v = v.wrapping_add(ax);
            }
        } else {
            debug_assert_eq!(x.len(), y.len());
            for (v, &u) in y.iter_mut().zip(x.iter()) {
                *v = v.wrapping_add(alpha.wrapping_mul(u));
            }
        }
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
        _par: Par,
    ) {
        for j in 0..n {
            for i in 0..m {
                let mut sum: i64 = 0;
                for l in 0..k {
                    sum = sum.wrapping_add(a[i + l * m].wrapping_mul(b[l + j * k]));
                }
                let cij = &mut c[i + j * m];
                *cij = alpha.wrapping_mul(sum).wrapping_add(beta.wrapping_mul(*cij));
            }
        }
    }
}
