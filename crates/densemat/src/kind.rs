//! Element kinds and their promotion order.
//!
//! The three kinds form a chain `Integer < Real < Complex`. Binary operations
//! compute their result kind as the join ([`promote`]) of both operand kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MatrixError;

/// The element domain of a matrix.
///
/// The derived order is the promotion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Integer,
    Real,
    Complex,
}

/// Least kind that represents values of both `a` and `b` without loss.
///
/// # Example
///
/// ```
/// use densemat::{ElementKind, promote};
///
/// assert_eq!(promote(ElementKind::Integer, ElementKind::Real), ElementKind::Real);
/// assert_eq!(promote(ElementKind::Complex, ElementKind::Real), ElementKind::Complex);
/// ```
#[inline]
pub fn promote(a: ElementKind, b: ElementKind) -> ElementKind {
    a.max(b)
}

impl ElementKind {
    /// All kinds in promotion order.
    pub const ALL: [ElementKind; 3] = [
        ElementKind::Integer,
        ElementKind::Real,
        ElementKind::Complex,
    ];

    /// One-character type code: `'i'`, `'d'` or `'z'`.
    pub fn type_code(self) -> char {
        match self {
            ElementKind::Integer => 'i',
            ElementKind::Real => 'd',
            ElementKind::Complex => 'z',
        }
    }

    /// Parse a type code. `'f'` is accepted as an alias for `'d'`.
    pub fn from_type_code(code: char) -> Result<Self, MatrixError> {
        match code {
            'i' => Ok(ElementKind::Integer),
            'd' | 'f' => Ok(ElementKind::Real),
            'z' => Ok(ElementKind::Complex),
            other => Err(MatrixError::InvalidTypeCode(other)),
        }
    }

    /// Native width of one element in bytes.
    pub fn item_size(self) -> usize {
        match self {
            ElementKind::Integer => size_of::<i64>(),
            ElementKind::Real => size_of::<f64>(),
            ElementKind::Complex => 2 * size_of::<f64>(),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Integer => "integer",
            ElementKind::Real => "real",
            ElementKind::Complex => "complex",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order() {
        assert!(ElementKind::Integer < ElementKind::Real);
        assert!(ElementKind::Real < ElementKind::Complex);
    }

    #[test]
    fn test_promote_table() {
        use ElementKind::*;
        assert_eq!(promote(Integer, Integer), Integer);
        assert_eq!(promote(Integer, Real), Real);
        assert_eq!(promote(Real, Integer), Real);
        assert_eq!(promote(Integer, Complex), Complex);
        assert_eq!(promote(Real, Complex), Complex);
        assert_eq!(promote(Complex, Complex), Complex);
    }

    #[test]
    fn test_type_codes() {
        for kind in ElementKind::ALL {
            assert_eq!(ElementKind::from_type_code(kind.type_code()).unwrap(), kind);
        }
        assert_eq!(ElementKind::from_type_code('f').unwrap(), ElementKind::Real);
        assert!(ElementKind::from_type_code('x').is_err());
    }

    #[test]
    fn test_item_size() {
        assert_eq!(ElementKind::Integer.item_size(), 8);
        assert_eq!(ElementKind::Real.item_size(), 8);
        assert_eq!(ElementKind::Complex.item_size(), 16);
    }
}
