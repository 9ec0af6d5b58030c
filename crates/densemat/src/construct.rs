//! Matrix construction paths.
//!
//! Every constructor takes an optional requested kind. `None` infers the
//! kind from the data; a requested kind lower than the data's kind is an
//! [`MatrixError::IllegalConversion`].

use crate::error::MatrixError;
use crate::kind::{ElementKind, promote};
use crate::matrix::{Matrix, checked_len};
use crate::scalar::{Element, Number, c64};
use crate::sparse::SparseMatrix;
use crate::storage::{Dense, Storage, coerce_view, convert_into, with_dense};
use crate::with_element;

/// One block of a concatenation.
#[derive(Debug, Clone, Copy)]
pub enum Block<'a> {
    Dense(&'a Matrix),
    Sparse(&'a SparseMatrix),
    /// A `1 × 1` block.
    Scalar(Number),
}

impl Block<'_> {
    fn size(&self) -> (usize, usize) {
        match self {
            Block::Dense(m) => m.size(),
            Block::Sparse(s) => s.size(),
            Block::Scalar(_) => (1, 1),
        }
    }

    fn kind(&self) -> ElementKind {
        match self {
            Block::Dense(m) => m.kind(),
            Block::Sparse(s) => s.kind(),
            Block::Scalar(n) => n.kind(),
        }
    }
}

impl<'a> From<&'a Matrix> for Block<'a> {
    fn from(m: &'a Matrix) -> Self {
        Block::Dense(m)
    }
}

impl<'a> From<&'a SparseMatrix> for Block<'a> {
    fn from(s: &'a SparseMatrix) -> Self {
        Block::Sparse(s)
    }
}

macro_rules! scalar_block_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Block<'_> {
                fn from(n: $t) -> Self {
                    Block::Scalar(n.into())
                }
            }
        )*
    };
}

scalar_block_from!(Number, i32, i64, f64, c64);

/// Resolve the kind to build: the requested one, or `natural` if none.
pub(crate) fn target_kind(
    natural: ElementKind,
    requested: Option<ElementKind>,
) -> Result<ElementKind, MatrixError> {
    match requested {
        Some(kind) if kind < natural => Err(MatrixError::IllegalConversion {
            from: natural,
            to: kind,
        }),
        Some(kind) => Ok(kind),
        None => Ok(natural),
    }
}

impl Matrix {
    /// Zero-filled `rows × cols` matrix.
    ///
    /// # Example
    ///
    /// ```
    /// use densemat::{ElementKind, Matrix};
    ///
    /// let m = Matrix::zeros(2, 3, ElementKind::Complex).unwrap();
    /// assert_eq!(m.size(), (2, 3));
    /// assert!(!m.is_nonzero());
    /// ```
    pub fn zeros(rows: usize, cols: usize, kind: ElementKind) -> Result<Self, MatrixError> {
        let len = checked_len(rows, cols)?;
        Ok(Matrix::from_storage(rows, cols, Storage::zeros(len, kind)?))
    }

    /// `rows × cols` matrix with every element equal to `value`.
    pub fn filled(
        rows: usize,
        cols: usize,
        value: impl Into<Number>,
        kind: Option<ElementKind>,
    ) -> Result<Self, MatrixError> {
        let value = value.into();
        let kind = target_kind(value.kind(), kind)?;
        let len = checked_len(rows, cols)?;
        Ok(Matrix::from_storage(rows, cols, Storage::filled(len, value, kind)?))
    }

    /// Copy `src`, promoting it to `kind` if given.
    ///
    /// # Example
    ///
    /// ```
    /// use densemat::{ElementKind, Matrix};
    ///
    /// let a = Matrix::from_vec(vec![1i64, 2], 2, 1).unwrap();
    /// let b = Matrix::from_matrix(&a, Some(ElementKind::Real)).unwrap();
    /// assert_eq!(b.as_slice::<f64>(), Some(&[1.0, 2.0][..]));
    /// assert!(Matrix::from_matrix(&b, Some(ElementKind::Integer)).is_err());
    /// ```
    pub fn from_matrix(src: &Matrix, kind: Option<ElementKind>) -> Result<Self, MatrixError> {
        let kind = target_kind(src.kind(), kind)?;
        if kind == src.kind() {
            return Ok(src.clone());
        }
        let storage = with_element!(kind, E => {
            let mut out = Dense::<E>::try_zeros(src.len())?;
            convert_into(src.storage(), out.as_mut_slice())?;
            E::into_storage(out)
        });
        Ok(Matrix::from_storage(src.rows(), src.cols(), storage))
    }

    /// Column vector from a flat sequence of scalars.
    ///
    /// The inferred kind is the promotion of all elements; an empty
    /// sequence yields a `0 × 1` Integer matrix.
    pub fn from_sequence(values: &[Number], kind: Option<ElementKind>) -> Result<Self, MatrixError> {
        let natural = values
            .iter()
            .map(|v| v.kind())
            .fold(ElementKind::Integer, promote);
        let kind = target_kind(natural, kind)?;
        let storage = with_element!(kind, E => {
            let mut out = Dense::<E>::try_zeros(values.len())?;
            for (o, &v) in out.as_mut_slice().iter_mut().zip(values) {
                *o = E::from_number(v)?;
            }
            E::into_storage(out)
        });
        Ok(Matrix::from_storage(values.len(), 1, storage))
    }

    /// Concatenate block columns.
    ///
    /// `columns[j]` is a list of blocks stacked top to bottom. Blocks within
    /// a column share a width; all columns share a total height.
    ///
    /// # Example
    ///
    /// ```
    /// use densemat::{Block, Matrix};
    ///
    /// let a = Matrix::from_vec(vec![1i64, 2], 2, 1).unwrap();
    /// // [a; 3] next to [4; 5; 6]
    /// let m = Matrix::concat(
    ///     &[
    ///         vec![Block::Dense(&a), 3.into()],
    ///         vec![4.into(), 5.into(), 6.into()],
    ///     ],
    ///     None,
    /// )
    /// .unwrap();
    /// assert_eq!(m.size(), (3, 2));
    /// assert_eq!(m.as_slice::<i64>(), Some(&[1, 2, 3, 4, 5, 6][..]));
    /// ```
    pub fn concat(columns: &[Vec<Block<'_>>], kind: Option<ElementKind>) -> Result<Self, MatrixError> {
        let mut rows = 0;
        let mut cols = 0;
        let mut natural = ElementKind::Integer;
        for (j, column) in columns.iter().enumerate() {
            let mut height = 0;
            let width = column.first().map_or(0, |b| b.size().1);
            for block in column {
                let (r, c) = block.size();
                if c != width {
                    return Err(MatrixError::IncompatibleBlocks);
                }
                height += r;
                natural = promote(natural, block.kind());
            }
            if j == 0 {
                rows = height;
            } else if height != rows {
                return Err(MatrixError::IncompatibleBlocks);
            }
            cols += width;
        }
        let kind = target_kind(natural, kind)?;

        let mut storage = Storage::zeros(checked_len(rows, cols)?, kind)?;
        with_dense!(&mut storage, d => fill_blocks(d.as_mut_slice(), rows, columns)?);
        Ok(Matrix::from_storage(rows, cols, storage))
    }
}

fn fill_blocks<T: Element>(
    dst: &mut [T],
    rows: usize,
    columns: &[Vec<Block<'_>>],
) -> Result<(), MatrixError> {
    let mut col0 = 0;
    for column in columns {
        let mut row0 = 0;
        let mut width = 0;
        for block in column {
            let (r, c) = block.size();
            match block {
                Block::Dense(m) => {
                    let src = coerce_view::<T>(m.storage())?;
                    for jk in 0..c {
                        let start = row0 + (col0 + jk) * rows;
                        dst[start..start + r].copy_from_slice(&src[jk * r..(jk + 1) * r]);
                    }
                }
                Block::Sparse(s) => {
                    for (i, j, v) in s.entries() {
                        dst[row0 + i + (col0 + j) * rows] = T::from_number(v)?;
                    }
                }
                Block::Scalar(n) => {
                    dst[row0 + col0 * rows] = T::from_number(*n)?;
                }
            }
            row0 += r;
            width = c;
        }
        col0 += width;
    }
    Ok(())
}
