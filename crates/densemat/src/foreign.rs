//! Import from foreign strided arrays.

use bytemuck::pod_read_unaligned;

use crate::construct::target_kind;
use crate::error::MatrixError;
use crate::kind::ElementKind;
use crate::matrix::{Matrix, checked_len};
use crate::scalar::{Element, Number, c64};
use crate::storage::{Storage, with_dense};

/// Description of a 1- or 2-dimensional array living in a byte buffer.
///
/// Element `(i, j)` starts at byte `i * strides[0] + j * strides[1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayDescriptor<'a> {
    pub data: &'a [u8],
    pub shape: Vec<usize>,
    /// Byte strides, one per dimension.
    pub strides: Vec<isize>,
    /// `'i'` (integer), `'f'` (floating) or `'c'` (complex).
    pub typekind: char,
    /// Bytes per element.
    pub itemsize: usize,
    pub c_contiguous: bool,
    pub f_contiguous: bool,
}

impl<'a> ArrayDescriptor<'a> {
    /// Describe a column-major `rows × cols` buffer of native elements.
    ///
    /// # Example
    ///
    /// ```
    /// use densemat::{ArrayDescriptor, Matrix};
    ///
    /// let data = [1.0f64, 2.0, 3.0, 4.0];
    /// let desc = ArrayDescriptor::fortran(bytemuck::cast_slice(&data), 'f', 8, 2, 2);
    /// let m = Matrix::from_array(&desc, None).unwrap();
    /// assert_eq!(m.as_slice::<f64>(), Some(&data[..]));
    /// ```
    pub fn fortran(data: &'a [u8], typekind: char, itemsize: usize, rows: usize, cols: usize) -> Self {
        Self {
            data,
            shape: vec![rows, cols],
            strides: vec![itemsize as isize, (rows * itemsize) as isize],
            typekind,
            itemsize,
            c_contiguous: cols <= 1,
            f_contiguous: true,
        }
    }

    /// Describe a contiguous vector of native elements.
    pub fn vector(data: &'a [u8], typekind: char, itemsize: usize, len: usize) -> Self {
        Self {
            data,
            shape: vec![len],
            strides: vec![itemsize as isize],
            typekind,
            itemsize,
            c_contiguous: true,
            f_contiguous: true,
        }
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Element kind tagged by `typekind`.
    pub fn kind(&self) -> Result<ElementKind, MatrixError> {
        match self.typekind {
            'i' => Ok(ElementKind::Integer),
            'f' => Ok(ElementKind::Real),
            'c' => Ok(ElementKind::Complex),
            _ => Err(MatrixError::InvalidArray("invalid array type")),
        }
    }

    fn validate(&self) -> Result<ElementKind, MatrixError> {
        if self.ndim() != 1 && self.ndim() != 2 {
            return Err(MatrixError::InvalidArray(
                "imported array must have 1 or 2 dimensions",
            ));
        }
        if self.strides.len() != self.ndim() {
            return Err(MatrixError::InvalidArray("strides do not match dimensions"));
        }
        let kind = self.kind()?;
        if self.itemsize != kind.item_size() {
            return Err(MatrixError::InvalidArray("invalid array type"));
        }
        if !self.c_contiguous && !self.f_contiguous {
            return Err(MatrixError::InvalidArray("error converting array"));
        }
        Ok(kind)
    }

    fn rows(&self) -> usize {
        self.shape[0]
    }

    fn cols(&self) -> usize {
        self.shape.get(1).copied().unwrap_or(1)
    }

    /// Byte range of element `(i, j)`.
    fn element_bytes(&self, i: usize, j: usize) -> Result<&'a [u8], MatrixError> {
        let col_stride = self.strides.get(1).copied().unwrap_or(0);
        let offset = (i as isize)
            .checked_mul(self.strides[0])
            .zip((j as isize).checked_mul(col_stride))
            .and_then(|(a, b)| a.checked_add(b))
            .and_then(|off| usize::try_from(off).ok())
            .ok_or(MatrixError::InvalidArray("array data out of bounds"))?;
        self.data
            .get(offset..offset + self.itemsize)
            .ok_or(MatrixError::InvalidArray("array data out of bounds"))
    }

    fn read(&self, kind: ElementKind, i: usize, j: usize) -> Result<Number, MatrixError> {
        let bytes = self.element_bytes(i, j)?;
        Ok(match kind {
            ElementKind::Integer => Number::Integer(pod_read_unaligned::<i64>(bytes)),
            ElementKind::Real => Number::Real(pod_read_unaligned::<f64>(bytes)),
            ElementKind::Complex => Number::Complex(pod_read_unaligned::<c64>(bytes)),
        })
    }
}

impl Matrix {
    /// Copy a foreign strided array into a new matrix.
    ///
    /// A 1-D array becomes a column vector. The kind defaults to the
    /// array's own kind and may only be raised.
    ///
    /// # Errors
    ///
    /// - [`MatrixError::InvalidArray`] for a dimension count other than 1
    ///   or 2, an unknown type tag, an item size that differs from the
    ///   native size, non-contiguous flags or strides leaving the buffer
    /// - [`MatrixError::IllegalConversion`] if `kind` is below the array's kind
    pub fn from_array(desc: &ArrayDescriptor<'_>, kind: Option<ElementKind>) -> Result<Self, MatrixError> {
        let src_kind = desc.validate()?;
        let kind = target_kind(src_kind, kind)?;
        let (rows, cols) = (desc.rows(), desc.cols());
        let mut storage = Storage::zeros(checked_len(rows, cols)?, kind)?;
        with_dense!(&mut storage, d => gather(d.as_mut_slice(), desc, src_kind)?);
        Ok(Matrix::from_storage(rows, cols, storage))
    }
}

fn gather<T: Element>(
    dst: &mut [T],
    desc: &ArrayDescriptor<'_>,
    src_kind: ElementKind,
) -> Result<(), MatrixError> {
    let rows = desc.rows();
    for j in 0..desc.cols() {
        for i in 0..rows {
            dst[i + j * rows] = T::from_number(desc.read(src_kind, i, j)?)?;
        }
    }
    Ok(())
}
