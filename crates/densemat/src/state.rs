//! Persisted representation and raw bulk transfer.
//!
//! [`MatrixState`] is the serde-friendly triple `(values, size, typecode)`.
//! The raw interface moves exactly `rows * cols` native-width,
//! native-endian elements with no header.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::construct::target_kind;
use crate::error::MatrixError;
use crate::kind::ElementKind;
use crate::matrix::{Matrix, checked_len};
use crate::scalar::Number;
use crate::storage::Storage;

/// Column-major values, shape and type code of a matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixState {
    pub values: Vec<Number>,
    pub size: (usize, usize),
    pub typecode: char,
}

impl Matrix {
    /// Snapshot this matrix as a [`MatrixState`].
    pub fn state(&self) -> MatrixState {
        MatrixState {
            values: self.iter().collect(),
            size: self.size(),
            typecode: self.typecode(),
        }
    }

    /// Rebuild a matrix from a [`MatrixState`].
    ///
    /// # Errors
    ///
    /// - [`MatrixError::InvalidTypeCode`] for an unknown type code
    /// - [`MatrixError::WrongSize`] if the values, read as one column, do not fill the shape
    /// - [`MatrixError::IllegalConversion`] if a value is above the type code
    ///
    /// # Example
    ///
    /// ```
    /// use densemat::Matrix;
    ///
    /// let m = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
    /// let back = Matrix::from_state(&m.state()).unwrap();
    /// assert_eq!(back, m);
    /// ```
    pub fn from_state(state: &MatrixState) -> Result<Self, MatrixError> {
        let kind = ElementKind::from_type_code(state.typecode)?;
        let (rows, cols) = state.size;
        let len = checked_len(rows, cols)?;
        if state.values.len() != len {
            return Err(MatrixError::WrongSize {
                expected: state.size,
                actual: (state.values.len(), 1),
            });
        }
        let natural = state
            .values
            .iter()
            .map(|v| v.kind())
            .max()
            .unwrap_or(ElementKind::Integer);
        target_kind(natural, Some(kind))?;
        let mut storage = Storage::zeros(len, kind)?;
        for (i, &v) in state.values.iter().enumerate() {
            storage.set(i, v)?;
        }
        Ok(Matrix::from_storage(rows, cols, storage))
    }

    /// Write the elements as raw native bytes.
    pub fn write_raw<W: Write>(&self, writer: &mut W) -> Result<(), MatrixError> {
        writer.write_all(self.storage().as_bytes())?;
        Ok(())
    }

    /// Overwrite the elements from raw native bytes.
    ///
    /// Reads exactly `len() * item_size` bytes; a short read is an I/O
    /// error and leaves the contents unspecified.
    ///
    /// # Example
    ///
    /// ```
    /// use densemat::{ElementKind, Matrix};
    ///
    /// let m = Matrix::from_vec(vec![7i64, -2, 5], 3, 1).unwrap();
    /// let mut buf = Vec::new();
    /// m.write_raw(&mut buf).unwrap();
    /// assert_eq!(buf.len(), 24);
    ///
    /// let mut n = Matrix::zeros(3, 1, ElementKind::Integer).unwrap();
    /// n.read_raw(&mut buf.as_slice()).unwrap();
    /// assert_eq!(n, m);
    /// ```
    pub fn read_raw<R: Read>(&mut self, reader: &mut R) -> Result<(), MatrixError> {
        reader.read_exact(self.storage_mut().as_bytes_mut())?;
        Ok(())
    }
}
