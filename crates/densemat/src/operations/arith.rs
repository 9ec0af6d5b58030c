//! Broadcasting arithmetic with kind promotion.
//!
//! ```text
//! scalar ⊕ M   → copy of M promoted, then axpy with a stride-0 scalar
//! M ⊕ scalar   → same, scalar on the right
//! M ⊕ M        → copy of the left promoted, axpy with the coerced right
//! M × M        → matrix product
//! ```
//!
//! A single-element matrix counts as a scalar. The result kind is always
//! the promotion of both operand kinds.

use std::borrow::Cow;

use crate::error::MatrixError;
use crate::kind::{ElementKind, promote};
use crate::linalg::matmul;
use crate::matrix::Matrix;
use crate::scalar::{Element, Number, c64};
use crate::storage::{Storage, coerce_view, with_dense};

/// An arithmetic operand: a bare scalar or a matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand<'a> {
    Scalar(Number),
    Matrix(&'a Matrix),
}

macro_rules! scalar_operand_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Operand<'_> {
                fn from(n: $t) -> Self {
                    Operand::Scalar(n.into())
                }
            }
        )*
    };
}

scalar_operand_from!(Number, i32, i64, f64, c64);

impl<'a> From<&'a Matrix> for Operand<'a> {
    fn from(m: &'a Matrix) -> Self {
        Operand::Matrix(m)
    }
}

impl<'a> Operand<'a> {
    pub fn kind(&self) -> ElementKind {
        match self {
            Operand::Scalar(n) => n.kind(),
            Operand::Matrix(m) => m.kind(),
        }
    }

    /// The value if this operand broadcasts as a scalar.
    pub fn as_scalar(&self) -> Option<Number> {
        match self {
            Operand::Scalar(n) => Some(*n),
            Operand::Matrix(m) if m.len() == 1 => m.element(0),
            Operand::Matrix(_) => None,
        }
    }

    fn is_bare_scalar(&self) -> bool {
        matches!(self, Operand::Scalar(_))
    }

    /// The operand as a matrix; a bare scalar becomes `1 × 1`.
    fn to_matrix(self) -> Result<Cow<'a, Matrix>, MatrixError> {
        match self {
            Operand::Scalar(n) => Matrix::filled(1, 1, n, None).map(Cow::Owned),
            Operand::Matrix(m) => Ok(Cow::Borrowed(m)),
        }
    }
}

/// `y ← ±x + y` with `x` broadcast from a scalar.
fn axpy_scalar<T: Element>(y: &mut [T], negate: bool, x: Number) -> Result<(), MatrixError> {
    let alpha = if negate { -T::one() } else { T::one() };
    T::axpy(alpha, &[T::from_number(x)?], 0, y);
    Ok(())
}

/// `y ← ±x + y` elementwise.
fn axpy_matrix<T: Element>(y: &mut [T], negate: bool, x: &Matrix) -> Result<(), MatrixError> {
    let alpha = if negate { -T::one() } else { T::one() };
    let x = coerce_view::<T>(x.storage())?;
    T::axpy(alpha, &x, 1, y);
    Ok(())
}

fn scal_scalar<T: Element>(x: &mut [T], alpha: Number) -> Result<(), MatrixError> {
    T::scal(T::from_number(alpha)?, x);
    Ok(())
}

fn additive<'a>(
    a: Operand<'a>,
    b: Operand<'a>,
    negate: bool,
    op: &'static str,
) -> Result<Matrix, MatrixError> {
    if a.is_bare_scalar() && b.is_bare_scalar() {
        return Err(MatrixError::UnsupportedOperands { op });
    }
    let kind = promote(a.kind(), b.kind());

    if let Some(n) = a.as_scalar() {
        let mut ret = Matrix::from_matrix(&*b.to_matrix()?, Some(kind))?;
        with_dense!(ret.storage_mut(), d => {
            if negate {
                scal_scalar(d.as_mut_slice(), Number::Integer(-1))?;
            }
            axpy_scalar(d.as_mut_slice(), false, n)?;
        });
        return Ok(ret);
    }

    let mut ret = Matrix::from_matrix(&*a.to_matrix()?, Some(kind))?;
    add_operand(&mut ret, b, negate)?;
    Ok(ret)
}

/// `a + b`.
///
/// # Example
///
/// ```
/// use densemat::{ElementKind, Matrix};
/// use densemat::operations::add;
///
/// let m = Matrix::from_vec(vec![1i64, 3, 2, 4], 2, 2).unwrap();
/// let r = add(&m, 1.5).unwrap();
/// assert_eq!(r.kind(), ElementKind::Real);
/// assert_eq!(r.as_slice::<f64>(), Some(&[2.5, 4.5, 3.5, 5.5][..]));
/// ```
pub fn add<'a>(a: impl Into<Operand<'a>>, b: impl Into<Operand<'a>>) -> Result<Matrix, MatrixError> {
    additive(a.into(), b.into(), false, "+")
}

/// `a - b`.
pub fn sub<'a>(a: impl Into<Operand<'a>>, b: impl Into<Operand<'a>>) -> Result<Matrix, MatrixError> {
    additive(a.into(), b.into(), true, "-")
}

/// `a * b`: scaling when either side is scalar-like, otherwise the matrix
/// product.
pub fn mul<'a>(a: impl Into<Operand<'a>>, b: impl Into<Operand<'a>>) -> Result<Matrix, MatrixError> {
    let (a, b) = (a.into(), b.into());
    if a.is_bare_scalar() && b.is_bare_scalar() {
        return Err(MatrixError::UnsupportedOperands { op: "*" });
    }
    let kind = promote(a.kind(), b.kind());

    let (n, other) = match (a.as_scalar(), b.as_scalar()) {
        (Some(n), _) => (n, b),
        (None, Some(n)) => (n, a),
        (None, None) => {
            return match (a, b) {
                (Operand::Matrix(x), Operand::Matrix(y)) => matmul(x, y),
                _ => Err(MatrixError::UnsupportedOperands { op: "*" }),
            };
        }
    };
    let mut ret = Matrix::from_matrix(&*other.to_matrix()?, Some(kind))?;
    with_dense!(ret.storage_mut(), d => scal_scalar(d.as_mut_slice(), n))?;
    Ok(ret)
}

/// Checked scalar divisor converted to `kind`.
fn divisor(b: &Operand<'_>, kind: ElementKind, op: &'static str) -> Result<Number, MatrixError> {
    let n = b
        .as_scalar()
        .ok_or(MatrixError::NotImplemented(op))?
        .to_kind(kind)?;
    if n.is_zero() {
        return Err(MatrixError::DivisionByZero);
    }
    Ok(n)
}

fn div_in_place<T: Element>(x: &mut [T], n: Number) -> Result<(), MatrixError> {
    let n = T::from_number(n)?;
    for v in x.iter_mut() {
        *v = v.quotient(n);
    }
    Ok(())
}

fn rem_in_place<T: Element>(x: &mut [T], n: Number) -> Result<(), MatrixError> {
    let n = T::from_number(n)?;
    for v in x.iter_mut() {
        *v = v.remainder(n)?;
    }
    Ok(())
}

/// `a / b` for a scalar-like divisor.
///
/// Integer division truncates toward zero. A zero divisor is
/// [`MatrixError::DivisionByZero`]; a matrix divisor is not implemented.
pub fn div<'a>(a: impl Into<Operand<'a>>, b: impl Into<Operand<'a>>) -> Result<Matrix, MatrixError> {
    let (a, b) = (a.into(), b.into());
    if a.is_bare_scalar() && b.is_bare_scalar() {
        return Err(MatrixError::UnsupportedOperands { op: "/" });
    }
    let kind = promote(a.kind(), b.kind());
    let n = divisor(&b, kind, "division by a matrix")?;
    let mut ret = Matrix::from_matrix(&*a.to_matrix()?, Some(kind))?;
    with_dense!(ret.storage_mut(), d => div_in_place(d.as_mut_slice(), n))?;
    Ok(ret)
}

/// `a % b` for a scalar-like divisor.
///
/// The result has the sign of the dividend. Complex remainder is not
/// implemented.
pub fn rem<'a>(a: impl Into<Operand<'a>>, b: impl Into<Operand<'a>>) -> Result<Matrix, MatrixError> {
    let (a, b) = (a.into(), b.into());
    if a.is_bare_scalar() && b.is_bare_scalar() {
        return Err(MatrixError::UnsupportedOperands { op: "%" });
    }
    let kind = promote(a.kind(), b.kind());
    if b.as_scalar().is_some() && kind == ElementKind::Complex {
        return Err(MatrixError::NotImplemented("complex modulo"));
    }
    let n = divisor(&b, kind, "remainder by a matrix")?;
    let mut ret = Matrix::from_matrix(&*a.to_matrix()?, Some(kind))?;
    with_dense!(ret.storage_mut(), d => rem_in_place(d.as_mut_slice(), n))?;
    Ok(ret)
}

/// Reject in-place operations that would change the destination's kind or
/// make a single-element destination absorb a larger operand.
fn check_inplace(dst: &Matrix, rhs: &Operand<'_>, op: &'static str) -> Result<(), MatrixError> {
    let grows = dst.len() == 1 && matches!(rhs, Operand::Matrix(m) if m.len() != 1);
    if promote(dst.kind(), rhs.kind()) != dst.kind() || grows {
        return Err(MatrixError::InvalidInplace { op });
    }
    Ok(())
}

/// `dst ← dst ± rhs` where `dst` already has the result kind.
fn add_operand(dst: &mut Matrix, rhs: Operand<'_>, negate: bool) -> Result<(), MatrixError> {
    if let Some(n) = rhs.as_scalar() {
        return with_dense!(dst.storage_mut(), d => axpy_scalar(d.as_mut_slice(), negate, n));
    }
    if let Operand::Matrix(other) = rhs {
        if dst.size() != other.size() {
            return Err(MatrixError::IncompatibleDimensions {
                lhs: dst.size(),
                rhs: other.size(),
            });
        }
        with_dense!(dst.storage_mut(), d => axpy_matrix(d.as_mut_slice(), negate, other))?;
    }
    Ok(())
}

fn additive_assign(dst: &mut Matrix, rhs: Operand<'_>, negate: bool, op: &'static str) -> Result<(), MatrixError> {
    check_inplace(dst, &rhs, op)?;
    add_operand(dst, rhs, negate)
}

/// `dst += rhs` without changing `dst`'s kind or shape.
///
/// # Example
///
/// ```
/// use densemat::Matrix;
/// use densemat::operations::add_assign;
///
/// let mut m = Matrix::from_vec(vec![1i64, 2], 2, 1).unwrap();
/// add_assign(&mut m, 3).unwrap();
/// assert_eq!(m.as_slice::<i64>(), Some(&[4, 5][..]));
///
/// // promoting the destination to Real is rejected
/// assert!(add_assign(&mut m, 0.5).is_err());
/// assert_eq!(m.as_slice::<i64>(), Some(&[4, 5][..]));
/// ```
pub fn add_assign<'a>(dst: &mut Matrix, rhs: impl Into<Operand<'a>>) -> Result<(), MatrixError> {
    additive_assign(dst, rhs.into(), false, "+=")
}

/// `dst -= rhs` without changing `dst`'s kind or shape.
pub fn sub_assign<'a>(dst: &mut Matrix, rhs: impl Into<Operand<'a>>) -> Result<(), MatrixError> {
    additive_assign(dst, rhs.into(), true, "-=")
}

/// `dst *= rhs` for a scalar-like `rhs`.
pub fn mul_assign<'a>(dst: &mut Matrix, rhs: impl Into<Operand<'a>>) -> Result<(), MatrixError> {
    let rhs = rhs.into();
    check_inplace(dst, &rhs, "*=")?;
    let n = rhs
        .as_scalar()
        .ok_or(MatrixError::InvalidInplace { op: "*=" })?;
    with_dense!(dst.storage_mut(), d => scal_scalar(d.as_mut_slice(), n))
}

/// `dst /= rhs` for a scalar-like `rhs` of at most `dst`'s kind.
pub fn div_assign<'a>(dst: &mut Matrix, rhs: impl Into<Operand<'a>>) -> Result<(), MatrixError> {
    let rhs = rhs.into();
    let kind = promote(dst.kind(), rhs.kind());
    if rhs.as_scalar().is_none() {
        return Err(MatrixError::NotImplemented("division by a matrix"));
    }
    if kind != dst.kind() {
        return Err(MatrixError::InvalidInplace { op: "/=" });
    }
    let n = divisor(&rhs, kind, "division by a matrix")?;
    with_dense!(dst.storage_mut(), d => div_in_place(d.as_mut_slice(), n))
}

/// `dst %= rhs` for a scalar-like `rhs` of at most `dst`'s kind.
pub fn rem_assign<'a>(dst: &mut Matrix, rhs: impl Into<Operand<'a>>) -> Result<(), MatrixError> {
    let rhs = rhs.into();
    let kind = promote(dst.kind(), rhs.kind());
    if rhs.as_scalar().is_none() {
        return Err(MatrixError::NotImplemented("remainder by a matrix"));
    }
    if kind == ElementKind::Complex {
        return Err(MatrixError::NotImplemented("complex modulo"));
    }
    if kind != dst.kind() {
        return Err(MatrixError::InvalidInplace { op: "%=" });
    }
    let n = divisor(&rhs, kind, "remainder by a matrix")?;
    with_dense!(dst.storage_mut(), d => rem_in_place(d.as_mut_slice(), n))
}

/// `-m`.
pub fn neg(m: &Matrix) -> Result<Matrix, MatrixError> {
    let mut ret = m.clone();
    with_dense!(ret.storage_mut(), d => scal_scalar(d.as_mut_slice(), Number::Integer(-1)))?;
    Ok(ret)
}

/// `+m`, a copy.
pub fn pos(m: &Matrix) -> Matrix {
    m.clone()
}

/// Elementwise absolute value. Complex input yields a Real matrix of
/// magnitudes.
pub fn abs(m: &Matrix) -> Result<Matrix, MatrixError> {
    let storage = match m.storage() {
        Storage::Integer(d) => Storage::Integer(d.try_map(i64::wrapping_abs)?),
        Storage::Real(d) => Storage::Real(d.try_map(f64::abs)?),
        Storage::Complex(d) => Storage::Real(d.try_map(|z| z.norm())?),
    };
    Ok(Matrix::from_storage(m.rows(), m.cols(), storage))
}
