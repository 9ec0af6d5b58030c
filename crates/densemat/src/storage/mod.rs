//! Kind-tagged matrix storage.
//!
//! ```text
//! Storage
//! ├── Integer(Dense<i64>)
//! ├── Real(Dense<f64>)
//! └── Complex(Dense<c64>)
//! ```
//!
//! Shape lives on the `Matrix` wrapper; storage is always a flat buffer.

mod coerce;
mod dense;

use crate::error::MatrixError;
use crate::kind::ElementKind;
use crate::scalar::{Element, Number, c64};
use crate::with_element;

pub use coerce::{coerce_view, convert_into};
pub use dense::Dense;

/// Run `$body` with `$d` bound to the typed buffer inside `$storage`.
macro_rules! with_dense {
    ($storage:expr, $d:ident => $body:expr) => {
        match $storage {
            $crate::storage::Storage::Integer($d) => $body,
            $crate::storage::Storage::Real($d) => $body,
            $crate::storage::Storage::Complex($d) => $body,
        }
    };
}

pub(crate) use with_dense;

/// A flat buffer tagged with its element kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Storage {
    Integer(Dense<i64>),
    Real(Dense<f64>),
    Complex(Dense<c64>),
}

impl Storage {
    /// Zero-filled storage of `len` elements of `kind`.
    pub fn zeros(len: usize, kind: ElementKind) -> Result<Self, MatrixError> {
        with_element!(kind, E => Dense::<E>::try_zeros(len).map(E::into_storage))
    }

    /// `len` copies of `value` converted to `kind`.
    pub fn filled(len: usize, value: Number, kind: ElementKind) -> Result<Self, MatrixError> {
        with_element!(kind, E => {
            let v = E::from_number(value)?;
            Dense::<E>::try_filled(len, v).map(E::into_storage)
        })
    }

    /// Element kind of the buffer.
    pub fn kind(&self) -> ElementKind {
        match self {
            Storage::Integer(_) => ElementKind::Integer,
            Storage::Real(_) => ElementKind::Real,
            Storage::Complex(_) => ElementKind::Complex,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        with_dense!(self, d => d.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at flat offset `i`.
    pub fn get(&self, i: usize) -> Option<Number> {
        with_dense!(self, d => d.as_slice().get(i).map(|v| v.into_number()))
    }

    /// Store `value` at flat offset `i`, converting it to the storage kind.
    pub fn set(&mut self, i: usize, value: Number) -> Result<(), MatrixError> {
        let len = self.len();
        with_dense!(self, d => {
            let slot = d.as_mut_slice().get_mut(i).ok_or(MatrixError::IndexOutOfRange {
                index: i64::try_from(i).unwrap_or(i64::MAX),
                dim: len,
            })?;
            *slot = Element::from_number(value)?;
        });
        Ok(())
    }

    /// Native-width bytes of the buffer.
    pub fn as_bytes(&self) -> &[u8] {
        with_dense!(self, d => bytemuck::cast_slice(d.as_slice()))
    }

    /// Mutable native-width bytes of the buffer.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        with_dense!(self, d => bytemuck::cast_slice_mut(d.as_mut_slice()))
    }
}
