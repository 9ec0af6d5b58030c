//! Element types and dynamically typed scalars.
//!
//! [`Element`] is implemented once per native element type (`i64`, `f64`,
//! `c64`); kind-generic code is written against it and instantiated through
//! [`with_element!`](crate::with_element) after a runtime kind check.
//! [`Number`] is a single value tagged with its kind.

use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

use bytemuck::Pod;
use serde::{Deserialize, Serialize};

pub use faer::c64;

use crate::backend::Kernels;
use crate::error::MatrixError;
use crate::kind::ElementKind;
use crate::storage::{Dense, Storage};

/// Trait for native element types stored in a matrix.
pub trait Element:
    Kernels
    + Copy
    + Debug
    + Default
    + PartialEq
    + Pod
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// Kind tag of this element type.
    const KIND: ElementKind;

    /// Returns the additive identity (zero).
    fn zero() -> Self {
        Self::default()
    }

    /// Returns the multiplicative identity (one).
    fn one() -> Self;

    /// Convert a scalar into this element type.
    ///
    /// Fails when the scalar's kind is higher than `Self::KIND`.
    fn from_number(n: Number) -> Result<Self, MatrixError>;

    /// Wrap this value as a [`Number`].
    fn into_number(self) -> Number;

    /// Borrow the typed buffer if `storage` holds this element type.
    fn dense(storage: &Storage) -> Option<&Dense<Self>>;

    /// Mutably borrow the typed buffer if `storage` holds this element type.
    fn dense_mut(storage: &mut Storage) -> Option<&mut Dense<Self>>;

    /// Wrap a typed buffer into kind-tagged storage.
    fn into_storage(dense: Dense<Self>) -> Storage;

    /// Quotient. Integer division truncates toward zero.
    fn quotient(self, rhs: Self) -> Self;

    /// Remainder with the sign of the dividend.
    fn remainder(self, rhs: Self) -> Result<Self, MatrixError>;

    /// Check for zero.
    fn is_zero(self) -> bool {
        self == Self::zero()
    }
}

impl Element for i64 {
    const KIND: ElementKind = ElementKind::Integer;

    fn one() -> Self {
        1
    }

    fn from_number(n: Number) -> Result<Self, MatrixError> {
        match n {
            Number::Integer(i) => Ok(i),
            other => Err(MatrixError::IllegalConversion {
                from: other.kind(),
                to: Self::KIND,
            }),
        }
    }

    fn into_number(self) -> Number {
        Number::Integer(self)
    }

    fn dense(storage: &Storage) -> Option<&Dense<Self>> {
        match storage {
            Storage::Integer(d) => Some(d),
            _ => None,
        }
    }

    fn dense_mut(storage: &mut Storage) -> Option<&mut Dense<Self>> {
        match storage {
            Storage::Integer(d) => Some(d),
            _ => None,
        }
    }

    fn into_storage(dense: Dense<Self>) -> Storage {
        Storage::Integer(dense)
    }

    fn quotient(self, rhs: Self) -> Self {
        self.wrapping_div(rhs)
    }

    fn remainder(self, rhs: Self) -> Result<Self, MatrixError> {
        Ok(self.wrapping_rem(rhs))
    }
}

impl Element for f64 {
    const KIND: ElementKind = ElementKind::Real;

    fn one() -> Self {
        1.0
    }

    fn from_number(n: Number) -> Result<Self, MatrixError> {
        match n {
            Number::Integer(i) => Ok(i as f64),
            Number::Real(x) => Ok(x),
            Number::Complex(_) => Err(MatrixError::IllegalConversion {
                from: ElementKind::Complex,
                to: Self::KIND,
            }),
        }
    }

    fn into_number(self) -> Number {
        Number::Real(self)
    }

    fn dense(storage: &Storage) -> Option<&Dense<Self>> {
        match storage {
            Storage::Real(d) => Some(d),
            _ => None,
        }
    }

    fn dense_mut(storage: &mut Storage) -> Option<&mut Dense<Self>> {
        match storage {
            Storage::Real(d) => Some(d),
            _ => None,
        }
    }

    fn into_storage(dense: Dense<Self>) -> Storage {
        Storage::Real(dense)
    }

    fn quotient(self, rhs: Self) -> Self {
        self / rhs
    }

    fn remainder(self, rhs: Self) -> Result<Self, MatrixError> {
        // `%` on f64 has C fmod semantics
        Ok(self % rhs)
    }
}

impl Element for c64 {
    const KIND: ElementKind = ElementKind::Complex;

    fn one() -> Self {
        c64::new(1.0, 0.0)
    }

    fn from_number(n: Number) -> Result<Self, MatrixError> {
        Ok(match n {
            Number::Integer(i) => c64::new(i as f64, 0.0),
            Number::Real(x) => c64::new(x, 0.0),
            Number::Complex(z) => z,
        })
    }

    fn into_number(self) -> Number {
        Number::Complex(self)
    }

    fn dense(storage: &Storage) -> Option<&Dense<Self>> {
        match storage {
            Storage::Complex(d) => Some(d),
            _ => None,
        }
    }

    fn dense_mut(storage: &mut Storage) -> Option<&mut Dense<Self>> {
        match storage {
            Storage::Complex(d) => Some(d),
            _ => None,
        }
    }

    fn into_storage(dense: Dense<Self>) -> Storage {
        Storage::Complex(dense)
    }

    fn quotient(self, rhs: Self) -> Self {
        self / rhs
    }

    fn remainder(self, _rhs: Self) -> Result<Self, MatrixError> {
        Err(MatrixError::NotImplemented("complex modulo"))
    }
}

/// Run `$body` with `$T` bound to the native element type of `$kind`.
///
/// ```ignore
/// let len = with_element!(kind, E => Dense::<E>::zeros(4).len());
/// ```
#[macro_export]
macro_rules! with_element {
    ($kind:expr, $T:ident => $body:expr) => {
        match $kind {
            $crate::ElementKind::Integer => {
                type $T = i64;
                $body
            }
            $crate::ElementKind::Real => {
                type $T = f64;
                $body
            }
            $crate::ElementKind::Complex => {
                type $T = $crate::c64;
                $body
            }
        }
    };
}

/// A single scalar tagged with its kind.
///
/// Bare Rust numbers convert by representation: integers become
/// [`Number::Integer`], floats [`Number::Real`], `c64` [`Number::Complex`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Number {
    Integer(i64),
    Real(f64),
    Complex(c64),
}

impl Number {
    /// Kind of this scalar.
    pub fn kind(self) -> ElementKind {
        match self {
            Number::Integer(_) => ElementKind::Integer,
            Number::Real(_) => ElementKind::Real,
            Number::Complex(_) => ElementKind::Complex,
        }
    }

    /// Convert to `kind`, failing if that would narrow.
    pub fn to_kind(self, kind: ElementKind) -> Result<Number, MatrixError> {
        with_element!(kind, E => E::from_number(self).map(E::into_number))
    }

    /// Check for zero.
    pub fn is_zero(self) -> bool {
        match self {
            Number::Integer(i) => i == 0,
            Number::Real(x) => x == 0.0,
            Number::Complex(z) => z.re == 0.0 && z.im == 0.0,
        }
    }

    /// Integer value, if this is an integer.
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(i),
            _ => None,
        }
    }

    /// Real value, for integer and real scalars.
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Number::Integer(i) => Some(i as f64),
            Number::Real(x) => Some(x),
            Number::Complex(_) => None,
        }
    }

    /// Complex value; always available.
    pub fn as_c64(self) -> c64 {
        match self {
            Number::Integer(i) => c64::new(i as f64, 0.0),
            Number::Real(x) => c64::new(x, 0.0),
            Number::Complex(z) => z,
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(value.into())
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Real(value)
    }
}

impl From<c64> for Number {
    fn from(value: c64) -> Self {
        Number::Complex(value)
    }
}
