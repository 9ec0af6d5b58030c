//! Element and block reads and writes.
//!
//! ```text
//! get(Int)             → scalar at the wrapped linear offset
//! get(Slice|List|Mat)  → |I| × 1 matrix
//! get((Int, Int))      → scalar at i + j * rows
//! get((I, J))          → |I| × |J| matrix, column by column
//! ```

use std::borrow::Cow;

use tracing::warn;

use crate::error::MatrixError;
use crate::foreign::ArrayDescriptor;
use crate::index::{Index, IndexExpr, SliceIndices, product_offsets, wrap};
use crate::kind::{ElementKind, promote};
use crate::matrix::Matrix;
use crate::scalar::{Element, Number, c64};
use crate::sparse::{SparseMatrix, SparseSource};
use crate::storage::{Dense, Storage, coerce_view, with_dense};

/// Result of [`Matrix::get`].
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Scalar(Number),
    Matrix(Matrix),
}

impl Selection {
    /// The scalar, if a single element was selected.
    pub fn into_scalar(self) -> Option<Number> {
        match self {
            Selection::Scalar(n) => Some(n),
            Selection::Matrix(_) => None,
        }
    }

    /// The matrix, if a block was selected.
    pub fn into_matrix(self) -> Option<Matrix> {
        match self {
            Selection::Scalar(_) => None,
            Selection::Matrix(m) => Some(m),
        }
    }
}

/// Right-hand side of [`Matrix::set`].
#[derive(Clone, Copy)]
pub enum Assignment<'a> {
    Scalar(Number),
    Matrix(&'a Matrix),
    /// Converted to a column of the destination's kind before writing.
    Sequence(&'a [Number]),
    /// Converted to a matrix of the array's own kind before writing.
    Array(&'a ArrayDescriptor<'a>),
    Sparse(&'a dyn SparseSource),
}

macro_rules! scalar_assignment_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Assignment<'_> {
                fn from(n: $t) -> Self {
                    Assignment::Scalar(n.into())
                }
            }
        )*
    };
}

scalar_assignment_from!(Number, i32, i64, f64, c64);

impl<'a> From<&'a Matrix> for Assignment<'a> {
    fn from(m: &'a Matrix) -> Self {
        Assignment::Matrix(m)
    }
}

impl<'a> From<&'a [Number]> for Assignment<'a> {
    fn from(values: &'a [Number]) -> Self {
        Assignment::Sequence(values)
    }
}

impl<'a> From<&'a ArrayDescriptor<'a>> for Assignment<'a> {
    fn from(desc: &'a ArrayDescriptor<'a>) -> Self {
        Assignment::Array(desc)
    }
}

impl<'a> From<&'a SparseMatrix> for Assignment<'a> {
    fn from(s: &'a SparseMatrix) -> Self {
        Assignment::Sparse(s)
    }
}

/// An assignment source after sequences and arrays have been materialized.
enum Source<'a> {
    Broadcast(Number),
    Dense {
        matrix: Cow<'a, Matrix>,
        /// Synthesized by this call, so its shape may be reinterpreted.
        temporary: bool,
        ndim: usize,
    },
    Sparse(&'a dyn SparseSource),
}

impl Source<'_> {
    fn kind(&self) -> ElementKind {
        match self {
            Source::Broadcast(n) => n.kind(),
            Source::Dense { matrix, .. } => matrix.kind(),
            Source::Sparse(s) => s.kind(),
        }
    }

    /// Promote a single-element matrix to a broadcast scalar.
    fn into_broadcast(self) -> Self {
        if let Source::Dense { matrix, .. } = &self {
            if let (1, Some(n)) = (matrix.len(), matrix.element(0)) {
                return Source::Broadcast(n);
            }
        }
        self
    }

    /// Reshape a temporary to `rows × cols` if the element count allows it.
    fn fit_temporary(&mut self, rows: usize, cols: usize, max_ndim: usize) -> Result<(), MatrixError> {
        if let Source::Dense {
            matrix,
            temporary: true,
            ndim,
        } = self
        {
            if *ndim <= max_ndim && matrix.len() == rows * cols && matrix.size() != (rows, cols) {
                matrix.to_mut().set_size(rows, cols)?;
            }
        }
        Ok(())
    }
}

impl Matrix {
    /// Read the element or block selected by `index`.
    ///
    /// # Example
    ///
    /// ```
    /// use densemat::{Index, Matrix, Number};
    ///
    /// let m = Matrix::from_vec(vec![10.0, 20.0, 30.0], 3, 1).unwrap();
    /// assert_eq!(m.get(-1).unwrap().into_scalar(), Some(Number::Real(30.0)));
    ///
    /// let sel = m.get(Index::list([-1, 0])).unwrap().into_matrix().unwrap();
    /// assert_eq!(sel.as_slice::<f64>(), Some(&[30.0, 10.0][..]));
    /// ```
    pub fn get<'a>(&self, index: impl Into<IndexExpr<'a>>) -> Result<Selection, MatrixError> {
        match index.into() {
            IndexExpr::Single(Index::Int(i)) => {
                let offset = wrap(i, self.len())?;
                self.scalar_at(offset)
            }
            IndexExpr::Single(index) => {
                let offsets = index.resolve(self.len())?;
                let n = offsets.len();
                self.gather(offsets.into_iter(), n, 1).map(Selection::Matrix)
            }
            IndexExpr::Pair(Index::Int(i), Index::Int(j)) => {
                let offset = wrap(i, self.rows())? + wrap(j, self.cols())? * self.rows();
                self.scalar_at(offset)
            }
            IndexExpr::Pair(Index::Slice(r), Index::Slice(c)) => {
                let (rs, cs) = (r.indices(self.rows())?, c.indices(self.cols())?);
                self.gather(slice_offsets(&rs, &cs, self.rows()), rs.len, cs.len)
                    .map(Selection::Matrix)
            }
            IndexExpr::Pair(r, c) => {
                let (rows, cols) = (r.resolve(self.rows())?, c.resolve(self.cols())?);
                self.gather(
                    product_offsets(&rows, &cols, self.rows()),
                    rows.len(),
                    cols.len(),
                )
                .map(Selection::Matrix)
            }
        }
    }

    /// Write `value` into the elements selected by `index`.
    ///
    /// Scalars and single-element matrices are broadcast. A matrix source
    /// must match the selection's shape; sources synthesized from a sequence
    /// or a 1-D array are reshaped to fit when their element count matches.
    /// The value's kind must not exceed the destination's.
    ///
    /// Elements are written one at a time. If reading a sparse source fails
    /// partway, the elements written before the failure stay written.
    ///
    /// # Example
    ///
    /// ```
    /// use densemat::{Matrix, Number};
    ///
    /// let mut m = Matrix::from_vec(vec![0i64; 4], 2, 2).unwrap();
    /// m.set((.., 1), 7).unwrap();
    /// assert_eq!(m.as_slice::<i64>(), Some(&[0, 0, 7, 7][..]));
    ///
    /// let values = [Number::from(1), Number::from(2)];
    /// m.set((0, ..), &values[..]).unwrap();
    /// assert_eq!(m.as_slice::<i64>(), Some(&[1, 0, 2, 7][..]));
    ///
    /// assert!(m.set(0, 0.5).is_err());
    /// ```
    pub fn set<'a>(
        &mut self,
        index: impl Into<IndexExpr<'a>>,
        value: impl Into<Assignment<'a>>,
    ) -> Result<(), MatrixError> {
        let index = index.into();
        let source = self.materialize(value.into())?;
        if source.kind() > self.kind() {
            return Err(MatrixError::InvalidAssignment {
                value: source.kind(),
                target: self.kind(),
            });
        }

        match index {
            IndexExpr::Single(index) => {
                let offsets = index.resolve(self.len())?;
                let source = source.into_broadcast();
                match &source {
                    Source::Dense { matrix, .. } => {
                        if matrix.len() != offsets.len() || matrix.cols() > 1 {
                            return Err(MatrixError::WrongSize {
                                expected: (offsets.len(), 1),
                                actual: matrix.size(),
                            });
                        }
                    }
                    Source::Sparse(s) => {
                        if s.rows() != offsets.len() || s.cols() > 1 {
                            return Err(MatrixError::WrongSize {
                                expected: (offsets.len(), 1),
                                actual: (s.rows(), s.cols()),
                            });
                        }
                    }
                    Source::Broadcast(_) => {}
                }
                self.scatter(offsets.into_iter(), &source)
            }
            IndexExpr::Pair(Index::Slice(r), Index::Slice(c))
                if matches!(&source, Source::Dense { matrix, .. }
                    if matrix.kind() == self.kind() && matrix.len() != 1) =>
            {
                let (rs, cs) = (r.indices(self.rows())?, c.indices(self.cols())?);
                let mut source = source;
                source.fit_temporary(rs.len, cs.len, usize::MAX)?;
                check_shape(&source, rs.len, cs.len)?;
                let offsets = slice_offsets(&rs, &cs, self.rows());
                self.scatter(offsets, &source)
            }
            IndexExpr::Pair(r, c) => {
                let (rows, cols) = (r.resolve(self.rows())?, c.resolve(self.cols())?);
                let mut source = source;
                source.fit_temporary(rows.len(), cols.len(), 1)?;
                let source = source.into_broadcast();
                check_shape(&source, rows.len(), cols.len())?;
                let nrows = self.rows();
                self.scatter(product_offsets(&rows, &cols, nrows), &source)
            }
        }
    }

    /// Deleting entries is not supported.
    pub fn delete<'a>(&mut self, _index: impl Into<IndexExpr<'a>>) -> Result<(), MatrixError> {
        Err(MatrixError::NotImplemented("deleting matrix entries"))
    }

    fn scalar_at(&self, offset: usize) -> Result<Selection, MatrixError> {
        self.element(offset)
            .map(Selection::Scalar)
            .ok_or(MatrixError::IndexOutOfRange {
                index: offset as i64,
                dim: self.len(),
            })
    }

    fn gather(
        &self,
        offsets: impl Iterator<Item = usize>,
        rows: usize,
        cols: usize,
    ) -> Result<Matrix, MatrixError> {
        let storage = with_dense!(self.storage(), d => gather_typed(d.as_slice(), offsets, rows * cols)?);
        Ok(Matrix::from_storage(rows, cols, storage))
    }

    fn materialize<'a>(&self, value: Assignment<'a>) -> Result<Source<'a>, MatrixError> {
        Ok(match value {
            Assignment::Scalar(n) => Source::Broadcast(n),
            Assignment::Matrix(m) => Source::Dense {
                matrix: Cow::Borrowed(m),
                temporary: false,
                ndim: 2,
            },
            Assignment::Sequence(values) => {
                let natural = values
                    .iter()
                    .map(|v| v.kind())
                    .fold(ElementKind::Integer, promote);
                if natural > self.kind() {
                    return Err(MatrixError::InvalidAssignment {
                        value: natural,
                        target: self.kind(),
                    });
                }
                Source::Dense {
                    matrix: Cow::Owned(Matrix::from_sequence(values, Some(self.kind()))?),
                    temporary: true,
                    ndim: 1,
                }
            }
            Assignment::Array(desc) => Source::Dense {
                matrix: Cow::Owned(Matrix::from_array(desc, None)?),
                temporary: true,
                ndim: desc.ndim(),
            },
            Assignment::Sparse(s) => Source::Sparse(s),
        })
    }

    fn scatter(
        &mut self,
        offsets: impl Iterator<Item = usize>,
        source: &Source<'_>,
    ) -> Result<(), MatrixError> {
        with_dense!(self.storage_mut(), d => scatter_typed(d.as_mut_slice(), offsets, source))
    }
}

fn check_shape(source: &Source<'_>, rows: usize, cols: usize) -> Result<(), MatrixError> {
    let actual = match source {
        Source::Broadcast(_) => return Ok(()),
        Source::Dense { matrix, .. } => matrix.size(),
        Source::Sparse(s) => (s.rows(), s.cols()),
    };
    if actual != (rows, cols) {
        return Err(MatrixError::WrongSize {
            expected: (rows, cols),
            actual,
        });
    }
    Ok(())
}

fn slice_offsets<'s>(
    rows: &'s SliceIndices,
    cols: &'s SliceIndices,
    nrows: usize,
) -> impl Iterator<Item = usize> + 's {
    cols.iter()
        .flat_map(move |j| rows.iter().map(move |i| i + j * nrows))
}

fn gather_typed<T: Element>(
    src: &[T],
    offsets: impl Iterator<Item = usize>,
    len: usize,
) -> Result<Storage, MatrixError> {
    let mut out = Dense::<T>::try_zeros(len)?;
    for (o, k) in out.as_mut_slice().iter_mut().zip(offsets) {
        *o = src[k];
    }
    Ok(T::into_storage(out))
}

fn scatter_typed<T: Element>(
    dst: &mut [T],
    offsets: impl Iterator<Item = usize>,
    source: &Source<'_>,
) -> Result<(), MatrixError> {
    match source {
        Source::Broadcast(n) => {
            let v = T::from_number(*n)?;
            for k in offsets {
                dst[k] = v;
            }
        }
        Source::Dense { matrix, .. } => {
            let values = coerce_view::<T>(matrix.storage())?;
            for (k, &v) in offsets.zip(values.iter()) {
                dst[k] = v;
            }
        }
        Source::Sparse(s) => {
            let nrows = s.rows();
            let total = nrows * s.cols();
            for (cnt, k) in offsets.enumerate() {
                match s
                    .value_at(cnt % nrows, cnt / nrows)
                    .and_then(T::from_number)
                {
                    Ok(v) => dst[k] = v,
                    Err(err) => {
                        warn!(
                            written = cnt,
                            total,
                            error = %err,
                            "sparse assignment aborted after partial write"
                        );
                        return Err(err);
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Slice;

    fn int_matrix(data: Vec<i64>, rows: usize, cols: usize) -> Matrix {
        Matrix::from_vec(data, rows, cols).unwrap()
    }

    #[test]
    fn test_get_scalar_and_wraparound() {
        let m = int_matrix(vec![1, 3, 2, 4], 2, 2);
        assert_eq!(m.get(3).unwrap(), Selection::Scalar(Number::Integer(4)));
        assert_eq!(m.get(-4).unwrap(), m.get(0).unwrap());
        assert_eq!(m.get((0, 1)).unwrap(), Selection::Scalar(Number::Integer(2)));
        assert_eq!(m.get((-1, -1)).unwrap(), Selection::Scalar(Number::Integer(4)));
        assert!(m.get(4).is_err());
        assert!(m.get((2, 0)).is_err());
    }

    #[test]
    fn test_get_block() {
        let m = int_matrix((0..6).collect(), 2, 3);
        let sel = m.get((.., Index::list([2, 0]))).unwrap().into_matrix().unwrap();
        assert_eq!(sel.size(), (2, 2));
        assert_eq!(sel.as_slice::<i64>(), Some(&[4, 5, 0, 1][..]));

        let rev = m
            .get((Slice::full().step_by(-1), Slice::from(1..)))
            .unwrap()
            .into_matrix()
            .unwrap();
        assert_eq!(rev.as_slice::<i64>(), Some(&[3, 2, 5, 4][..]));
    }

    #[test]
    fn test_get_single_slice_is_column() {
        let m = int_matrix((0..6).collect(), 2, 3);
        let sel = m.get(1..5).unwrap().into_matrix().unwrap();
        assert_eq!(sel.size(), (4, 1));
        assert_eq!(sel.as_slice::<i64>(), Some(&[1, 2, 3, 4][..]));
    }

    #[test]
    fn test_set_broadcast_scalar() {
        let mut m = Matrix::zeros(2, 2, ElementKind::Real).unwrap();
        m.set(.., 2).unwrap();
        assert!(m.iter().all(|v| v == Number::Real(2.0)));

        let one = Matrix::from_vec(vec![5.0], 1, 1).unwrap();
        m.set((.., 0), &one).unwrap();
        assert_eq!(m.as_slice::<f64>(), Some(&[5.0, 5.0, 2.0, 2.0][..]));
    }

    #[test]
    fn test_set_rejects_higher_kind() {
        let mut m = Matrix::zeros(2, 1, ElementKind::Real).unwrap();
        let err = m.set(0, c64::new(0.0, 1.0)).unwrap_err();
        assert!(matches!(err, MatrixError::InvalidAssignment { .. }));
        assert!(!m.is_nonzero());
    }

    #[test]
    fn test_set_block_shape_rules() {
        let mut m = Matrix::zeros(2, 3, ElementKind::Integer).unwrap();
        let block = int_matrix(vec![1, 2, 3, 4], 2, 2);
        m.set((.., 1..), &block).unwrap();
        assert_eq!(m.as_slice::<i64>(), Some(&[0, 0, 1, 2, 3, 4][..]));

        let wrong = int_matrix(vec![1, 2, 3, 4], 4, 1);
        let err = m.set((.., 1..), &wrong).unwrap_err();
        assert!(matches!(err, MatrixError::WrongSize { .. }));
    }

    #[test]
    fn test_set_sequence_is_reshaped() {
        let mut m = Matrix::zeros(2, 2, ElementKind::Real).unwrap();
        let values: Vec<Number> = vec![1.into(), 2.into(), 3.into(), 4.into()];
        m.set((.., ..), &values[..]).unwrap();
        assert_eq!(m.as_slice::<f64>(), Some(&[1.0, 2.0, 3.0, 4.0][..]));

        m.set((Index::list([0, 1]), Index::list([1, 0])), &values[..])
            .unwrap();
        assert_eq!(m.as_slice::<f64>(), Some(&[3.0, 4.0, 1.0, 2.0][..]));
    }

    #[test]
    fn test_set_two_dimensional_array_is_not_reshaped() {
        let data = [1i64, 2, 3, 4];
        let desc = ArrayDescriptor::fortran(bytemuck::cast_slice(&data), 'i', 8, 4, 1);
        let mut m = Matrix::zeros(2, 2, ElementKind::Integer).unwrap();
        let err = m.set((Index::list([0, 1]), Index::list([0, 1])), &desc).unwrap_err();
        assert!(matches!(err, MatrixError::WrongSize { .. }));

        let desc = ArrayDescriptor::vector(bytemuck::cast_slice(&data), 'i', 8, 4);
        m.set((Index::list([0, 1]), Index::list([0, 1])), &desc).unwrap();
        assert_eq!(m.as_slice::<i64>(), Some(&data[..]));
    }

    #[test]
    fn test_set_single_index_with_column() {
        let mut m = Matrix::zeros(3, 1, ElementKind::Complex).unwrap();
        let v = Matrix::from_vec(vec![1.0, 2.0], 2, 1).unwrap();
        m.set(Index::list([2, 0]), &v).unwrap();
        assert_eq!(m.element(0), Some(Number::Complex(c64::new(2.0, 0.0))));
        assert_eq!(m.element(2), Some(Number::Complex(c64::new(1.0, 0.0))));

        let row = Matrix::from_vec(vec![1.0, 2.0], 1, 2).unwrap();
        assert!(m.set(Index::list([2, 0]), &row).is_err());
    }

    #[test]
    fn test_delete_not_implemented() {
        let mut m = Matrix::zeros(1, 1, ElementKind::Integer).unwrap();
        let err = m.delete(0).unwrap_err();
        assert_eq!(err.category(), crate::error::ErrorCategory::NotImplemented);
    }
}
