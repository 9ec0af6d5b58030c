//! Transposition.
//!
//! ```text
//! src (R × C):  src[i + j*R]
//! dst (C × R):  dst[j + i*C] = src[i + j*R]
//! ```

use crate::error::MatrixError;
use crate::matrix::Matrix;
use crate::scalar::Element;
use crate::storage::{Dense, Storage, with_dense};

fn transpose_into<T: Element>(src: &[T], dst: &mut [T], rows: usize, cols: usize) {
    for j in 0..cols {
        for i in 0..rows {
            dst[j + i * cols] = src[i + j * rows];
        }
    }
}

fn transposed<T: Element>(src: &Dense<T>, rows: usize, cols: usize) -> Result<Storage, MatrixError> {
    let mut out = Dense::<T>::try_zeros(src.len())?;
    transpose_into(src.as_slice(), out.as_mut_slice(), rows, cols);
    Ok(T::into_storage(out))
}

/// Transpose, keeping the kind.
///
/// # Example
///
/// ```
/// use densemat::Matrix;
/// use densemat::operations::transpose;
///
/// // [[1, 2, 3], [4, 5, 6]]
/// let m = Matrix::from_vec(vec![1i64, 4, 2, 5, 3, 6], 2, 3).unwrap();
/// let t = transpose(&m).unwrap();
/// assert_eq!(t.size(), (3, 2));
/// assert_eq!(t.as_slice::<i64>(), Some(&[1, 2, 3, 4, 5, 6][..]));
/// ```
pub fn transpose(m: &Matrix) -> Result<Matrix, MatrixError> {
    let (rows, cols) = m.size();
    let storage = with_dense!(m.storage(), d => transposed(d, rows, cols)?);
    Ok(Matrix::from_storage(cols, rows, storage))
}

/// Conjugate transpose. Same as [`transpose`] for non-complex kinds.
pub fn ctranspose(m: &Matrix) -> Result<Matrix, MatrixError> {
    let mut t = transpose(m)?;
    if let Storage::Complex(d) = t.storage_mut() {
        for z in d.as_mut_slice() {
            *z = z.conj();
        }
    }
    Ok(t)
}
