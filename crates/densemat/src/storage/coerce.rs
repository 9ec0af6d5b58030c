//! Scoped coercion of storage to a requested element type.

use std::borrow::Cow;

use tracing::trace;

use crate::error::MatrixError;
use crate::scalar::Element;
use crate::storage::{Dense, Storage, with_dense};

/// View `storage` as a slice of `T`.
///
/// Borrows when the kinds match, otherwise allocates a converted copy.
/// Converting to a lower kind fails with
/// [`MatrixError::IllegalConversion`].
///
/// # Example
///
/// ```
/// use std::borrow::Cow;
/// use densemat::storage::{Dense, Storage, coerce_view};
///
/// let s = Storage::Integer(Dense::from_vec(vec![1, 2]));
/// let v = coerce_view::<f64>(&s).unwrap();
/// assert!(matches!(v, Cow::Owned(_)));
/// assert_eq!(&*v, &[1.0, 2.0]);
/// ```
pub fn coerce_view<T: Element>(storage: &Storage) -> Result<Cow<'_, [T]>, MatrixError> {
    if let Some(d) = T::dense(storage) {
        return Ok(Cow::Borrowed(d.as_slice()));
    }
    if storage.kind() > T::KIND {
        return Err(MatrixError::IllegalConversion {
            from: storage.kind(),
            to: T::KIND,
        });
    }

    trace!(
        from = %storage.kind(),
        to = %T::KIND,
        len = storage.len(),
        "allocating coerced temporary"
    );
    let mut out = Dense::<T>::try_zeros(storage.len())?;
    convert_into(storage, out.as_mut_slice())?;
    Ok(Cow::Owned(out.into_vec()))
}

/// Overwrite `dest` with the elements of `storage` converted to `T`.
///
/// Stops at the first element that cannot be represented in `T`.
///
/// # Errors
///
/// [`MatrixError::SizeChange`] if `dest.len() != storage.len()`.
pub fn convert_into<T: Element>(storage: &Storage, dest: &mut [T]) -> Result<(), MatrixError> {
    if storage.len() != dest.len() {
        return Err(MatrixError::SizeChange {
            current: dest.len(),
            requested: storage.len(),
        });
    }
    if let Some(d) = T::dense(storage) {
        dest.copy_from_slice(d.as_slice());
        return Ok(());
    }
    with_dense!(storage, d => {
        for (o, v) in dest.iter_mut().zip(d.as_slice()) {
            *o = T::from_number(v.into_number())?;
        }
    });
    Ok(())
}
