//! Compressed-column sparse input and its dense-conversion contract.
//!
//! Sparse matrices are not a storage kind of their own; they are consumed
//! through [`SparseSource`] when densified, concatenated or assigned.
//!
//! ```text
//! colptr: [0, 1, 3]          column j holds entries colptr[j]..colptr[j+1]
//! rowind: [2, 0, 1]          row of each entry
//! values: [a, b, c]          value of each entry
//! ```

use crate::error::MatrixError;
use crate::kind::ElementKind;
use crate::matrix::{Matrix, checked_len};
use crate::scalar::{Element, Number};
use crate::storage::{Storage, with_dense};

/// Element-wise dense view of a sparse matrix.
///
/// Assignment reads sources through this trait one element at a time, so a
/// source that fails partway leaves earlier destination elements written.
pub trait SparseSource {
    fn rows(&self) -> usize;

    fn cols(&self) -> usize;

    /// Kind of the values the source declares.
    fn kind(&self) -> ElementKind;

    /// Dense value at `(i, j)`; structural zeros read as zero.
    fn value_at(&self, i: usize, j: usize) -> Result<Number, MatrixError>;
}

/// A validated compressed-column sparse matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    rows: usize,
    cols: usize,
    colptr: Vec<usize>,
    rowind: Vec<usize>,
    values: Storage,
}

impl SparseMatrix {
    /// Build from compressed-column arrays.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidSparse`] if `colptr` does not have
    /// `cols + 1` non-decreasing entries starting at zero, if its last entry
    /// differs from the number of values, or if a row index is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use densemat::{SparseMatrix, storage::{Dense, Storage}};
    ///
    /// // [[0, 2], [1, 0]]
    /// let s = SparseMatrix::new(
    ///     2,
    ///     2,
    ///     vec![0, 1, 2],
    ///     vec![1, 0],
    ///     Storage::Real(Dense::from_vec(vec![1.0, 2.0])),
    /// )
    /// .unwrap();
    /// assert_eq!(s.nnz(), 2);
    /// ```
    pub fn new(
        rows: usize,
        cols: usize,
        colptr: Vec<usize>,
        rowind: Vec<usize>,
        values: Storage,
    ) -> Result<Self, MatrixError> {
        if cols.checked_add(1) != Some(colptr.len()) || colptr.first() != Some(&0) {
            return Err(MatrixError::InvalidSparse("column pointer has wrong length"));
        }
        if colptr.windows(2).any(|w| w[0] > w[1]) {
            return Err(MatrixError::InvalidSparse("column pointer is not monotone"));
        }
        let nnz = colptr[cols];
        if rowind.len() != nnz || values.len() != nnz {
            return Err(MatrixError::InvalidSparse(
                "row indices and values must match the column pointer",
            ));
        }
        if rowind.iter().any(|&i| i >= rows) {
            return Err(MatrixError::InvalidSparse("row index out of range"));
        }
        Ok(Self {
            rows,
            cols,
            colptr,
            rowind,
            values,
        })
    }

    /// `(rows, cols)`.
    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn kind(&self) -> ElementKind {
        self.values.kind()
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.rowind.len()
    }

    /// Stored entries as `(row, col, value)` in column order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, Number)> + '_ {
        (0..self.cols).flat_map(move |j| {
            (self.colptr[j]..self.colptr[j + 1]).filter_map(move |k| {
                self.values.get(k).map(|v| (self.rowind[k], j, v))
            })
        })
    }
}

impl SparseSource for SparseMatrix {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn kind(&self) -> ElementKind {
        self.values.kind()
    }

    fn value_at(&self, i: usize, j: usize) -> Result<Number, MatrixError> {
        if i >= self.rows || j >= self.cols {
            let offset = j.saturating_mul(self.rows).saturating_add(i);
            return Err(MatrixError::IndexOutOfRange {
                index: i64::try_from(offset).unwrap_or(i64::MAX),
                dim: self.rows.saturating_mul(self.cols),
            });
        }
        let range = self.colptr[j]..self.colptr[j + 1];
        let zero = Number::Integer(0).to_kind(self.kind())?;
        Ok(self.rowind[range.clone()]
            .iter()
            .rposition(|&r| r == i)
            .and_then(|pos| self.values.get(range.start + pos))
            .unwrap_or(zero))
    }
}

impl Matrix {
    /// Densify a sparse matrix, promoting to `kind` if given.
    ///
    /// Duplicate entries for the same position keep the last value.
    pub fn from_sparse(src: &SparseMatrix, kind: Option<ElementKind>) -> Result<Self, MatrixError> {
        let kind = crate::construct::target_kind(src.kind(), kind)?;
        let (rows, cols) = src.size();
        let mut storage = Storage::zeros(checked_len(rows, cols)?, kind)?;
        with_dense!(&mut storage, d => scatter(d.as_mut_slice(), rows, src)?);
        Ok(Matrix::from_storage(rows, cols, storage))
    }
}

fn scatter<T: Element>(dst: &mut [T], rows: usize, src: &SparseMatrix) -> Result<(), MatrixError> {
    for (i, j, v) in src.entries() {
        dst[i + j * rows] = T::from_number(v)?;
    }
    Ok(())
}
