//! Owned flat buffers in column-major order.

use crate::error::MatrixError;
use crate::scalar::Element;

/// Dense storage: a contiguous buffer of `T` in column-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dense<T: Element> {
    data: Vec<T>,
}

impl<T: Element> Dense<T> {
    /// Allocate `len` zero elements.
    ///
    /// Reports a failed reservation as [`MatrixError::OutOfMemory`] instead
    /// of aborting.
    pub fn try_zeros(len: usize) -> Result<Self, MatrixError> {
        Self::try_filled(len, T::zero())
    }

    /// Allocate `len` copies of `value`.
    pub fn try_filled(len: usize, value: T) -> Result<Self, MatrixError> {
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| MatrixError::OutOfMemory { elements: len })?;
        data.resize(len, value);
        Ok(Self { data })
    }

    /// Wrap an existing vector (takes ownership).
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Length of storage.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Apply `f` to every element, collecting into a new buffer.
    pub fn try_map<U: Element>(&self, mut f: impl FnMut(T) -> U) -> Result<Dense<U>, MatrixError> {
        let mut out = Dense::<U>::try_zeros(self.len())?;
        for (o, &v) in out.as_mut_slice().iter_mut().zip(&self.data) {
            *o = f(v);
        }
        Ok(out)
    }

    /// Unwrap into the underlying vector.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Element> std::ops::Index<usize> for Dense<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T: Element> std::ops::IndexMut<usize> for Dense<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}
