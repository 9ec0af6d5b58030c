//! Dense column-major matrix of a runtime-selected element kind.
//!
//! ```text
//! Matrix { rows, cols, storage }
//!              └── Storage::{Integer, Real, Complex}(Dense<T>)
//!
//! element (i, j) lives at flat offset i + j * rows
//! ```

use crate::error::MatrixError;
use crate::kind::ElementKind;
use crate::scalar::{Element, Number};
use crate::storage::{Dense, Storage, with_dense};

/// A dense rectangular matrix.
///
/// The kind is fixed at construction; the buffer always holds exactly
/// `rows * cols` elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    storage: Storage,
}

impl Matrix {
    /// Assemble a matrix from a buffer of `rows * cols` elements.
    pub(crate) fn from_storage(rows: usize, cols: usize, storage: Storage) -> Self {
        debug_assert_eq!(rows * cols, storage.len());
        Self {
            rows,
            cols,
            storage,
        }
    }

    /// Create a matrix from column-major data.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::SizeChange`] if `data.len() != rows * cols`.
    ///
    /// # Example
    ///
    /// ```
    /// use densemat::{ElementKind, Matrix, Number};
    ///
    /// let m = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
    /// assert_eq!(m.kind(), ElementKind::Real);
    /// assert_eq!(m.size(), (2, 3));
    /// assert_eq!(m.element(1), Some(Number::Real(2.0))); // (1, 0)
    /// assert_eq!(m.element(2), Some(Number::Real(3.0))); // (0, 1)
    /// ```
    pub fn from_vec<T: Element>(data: Vec<T>, rows: usize, cols: usize) -> Result<Self, MatrixError> {
        let requested = checked_len(rows, cols)?;
        if data.len() != requested {
            return Err(MatrixError::SizeChange {
                current: data.len(),
                requested,
            });
        }
        Ok(Self::from_storage(rows, cols, T::into_storage(Dense::from_vec(data))))
    }

    /// Element kind.
    #[inline]
    pub fn kind(&self) -> ElementKind {
        self.storage.kind()
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// One-character type code of the kind: `'i'`, `'d'` or `'z'`.
    pub fn typecode(&self) -> char {
        self.kind().type_code()
    }

    /// Kind-tagged buffer.
    #[inline]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    #[inline]
    pub(crate) fn storage_mut(&mut self) -> &mut Storage {
        &mut self.storage
    }

    /// Typed column-major data, if the matrix holds elements of type `T`.
    #[inline]
    pub fn as_slice<T: Element>(&self) -> Option<&[T]> {
        T::dense(&self.storage).map(Dense::as_slice)
    }

    /// Mutable typed column-major data, if the matrix holds elements of type `T`.
    #[inline]
    pub fn as_mut_slice<T: Element>(&mut self) -> Option<&mut [T]> {
        T::dense_mut(&mut self.storage).map(Dense::as_mut_slice)
    }

    /// Element at flat offset `i`.
    #[inline]
    pub fn element(&self, i: usize) -> Option<Number> {
        self.storage.get(i)
    }

    /// Element at `(i, j)`.
    pub fn at(&self, i: usize, j: usize) -> Option<Number> {
        if i >= self.rows || j >= self.cols {
            return None;
        }
        self.storage.get(i + j * self.rows)
    }

    /// Elements in column-major order.
    pub fn iter(&self) -> impl Iterator<Item = Number> + '_ {
        (0..self.len()).filter_map(|i| self.storage.get(i))
    }

    /// Whether any element is non-zero.
    pub fn is_nonzero(&self) -> bool {
        with_dense!(&self.storage, d => d.as_slice().iter().any(|v| !v.is_zero()))
    }

    /// Reinterpret the buffer as `rows × cols` without moving data.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::SizeChange`] if the element count would change.
    pub fn set_size(&mut self, rows: usize, cols: usize) -> Result<(), MatrixError> {
        let requested = checked_len(rows, cols)?;
        if requested != self.len() {
            return Err(MatrixError::SizeChange {
                current: self.len(),
                requested,
            });
        }
        self.rows = rows;
        self.cols = cols;
        Ok(())
    }

    /// Consume and return the matrix reshaped to `rows × cols`.
    ///
    /// # Example
    ///
    /// ```
    /// use densemat::Matrix;
    ///
    /// let m = Matrix::from_vec(vec![1i64, 2, 3, 4, 5, 6], 6, 1).unwrap();
    /// let m = m.with_size(2, 3).unwrap();
    /// assert_eq!(m.size(), (2, 3));
    /// assert!(m.with_size(4, 2).is_err());
    /// ```
    pub fn with_size(mut self, rows: usize, cols: usize) -> Result<Self, MatrixError> {
        self.set_size(rows, cols)?;
        Ok(self)
    }
}

/// `rows * cols`, reporting overflow as an allocation failure.
pub(crate) fn checked_len(rows: usize, cols: usize) -> Result<usize, MatrixError> {
    rows.checked_mul(cols)
        .ok_or(MatrixError::OutOfMemory { elements: usize::MAX })
}
