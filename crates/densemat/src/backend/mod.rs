//! Numeric kernels the matrix engine delegates bulk work to.
//!
//! The kernels follow the BLAS level-1/level-3 contracts:
//!
//! ```text
//! scal:  x ← αx
//! axpy:  y ← αx + y      (incx = 0 broadcasts x[0])
//! gemm:  C ← αAB + βC    (column-major, no transposes)
//! ```
//!
//! # Backends
//!
//! - `generic`: naive loops, used for the Integer kind and for level-1
//!   kernels of every kind
//! - `faer_interop`: zero-copy faer views and faer's `matmul` for Real and
//!   Complex gemm

mod faer_interop;
mod generic;

use faer::Par;

pub use faer_interop::{as_faer_mat, as_faer_mat_mut};

/// Kernel entry points, implemented once per element type.
pub trait Kernels: Copy {
    /// Scale `x` in place by `alpha`.
    fn scal(alpha: Self, x: &mut [Self]);

    /// Add `alpha * x` to `y`.
    ///
    /// With `incx == 0`, `x` must hold one element that is broadcast over
    /// `y`; with `incx == 1`, `x` and `y` have equal length.
    fn axpy(alpha: Self, x: &[Self], incx: usize, y: &mut [Self]);

    /// General matrix multiply on column-major buffers.
    ///
    /// `a` is `m × k`, `b` is `k × n`, `c` is `m × n`.
    #[allow(clippy::too_many_arguments)]
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
    );
}
