//! Error types for densemat.

use thiserror::Error;

use crate::kind::ElementKind;

/// Errors that can occur in matrix operations.
#[derive(Debug, Error)]
pub enum MatrixError {
    /// A value cannot be represented in the requested element kind.
    #[error("illegal type conversion from {from} to {to}")]
    IllegalConversion { from: ElementKind, to: ElementKind },

    /// Operand shapes are incompatible for the operation.
    #[error("incompatible dimensions: {lhs:?} and {rhs:?}")]
    IncompatibleDimensions {
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    /// Assigned value does not match the shape of the selected entries.
    #[error("argument has wrong size: expected {expected:?}, got {actual:?}")]
    WrongSize {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// Reshape would change the number of elements.
    #[error("number of elements in matrix cannot change: {current} != {requested}")]
    SizeChange { current: usize, requested: usize },

    /// In-place operation would change the destination's kind or shape.
    #[error("invalid inplace operation: {op}")]
    InvalidInplace { op: &'static str },

    /// Assigned value has a higher kind than the destination.
    #[error("invalid type in assignment: cannot store {value} in a {target} matrix")]
    InvalidAssignment {
        value: ElementKind,
        target: ElementKind,
    },

    /// Operand combination the operation is not defined for.
    #[error("unsupported operand types for {op}")]
    UnsupportedOperands { op: &'static str },

    /// Malformed index argument.
    #[error("invalid index argument: {0}")]
    InvalidIndex(&'static str),

    /// Foreign array descriptor cannot be imported.
    #[error("invalid array: {0}")]
    InvalidArray(&'static str),

    /// Compressed-column arrays are inconsistent.
    #[error("invalid sparse matrix: {0}")]
    InvalidSparse(&'static str),

    /// Unknown type code character.
    #[error("invalid type code '{0}', expected 'i', 'd' or 'z'")]
    InvalidTypeCode(char),

    /// Blocks of a concatenation do not line up.
    #[error("incompatible dimensions of subblocks")]
    IncompatibleBlocks,

    /// Index outside `[-dim, dim)`.
    #[error("index {index} out of range for dimension {dim}")]
    IndexOutOfRange { index: i64, dim: usize },

    /// Argument outside the mathematical domain of the operation.
    #[error("domain error in {op}")]
    Domain { op: &'static str },

    /// Division or remainder by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Slice with a zero step.
    #[error("slice step cannot be zero")]
    ZeroSliceStep,

    /// Operation that is deliberately not provided.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    /// Buffer allocation failed.
    #[error("out of memory allocating {elements} elements")]
    OutOfMemory { elements: usize },

    /// Raw dump or load failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Coarse classification of [`MatrixError`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Type,
    Index,
    Value,
    NotImplemented,
    Memory,
    Io,
}

impl MatrixError {
    /// The category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            MatrixError::IllegalConversion { .. }
            | MatrixError::IncompatibleDimensions { .. }
            | MatrixError::WrongSize { .. }
            | MatrixError::SizeChange { .. }
            | MatrixError::InvalidInplace { .. }
            | MatrixError::InvalidAssignment { .. }
            | MatrixError::UnsupportedOperands { .. }
            | MatrixError::InvalidIndex(_)
            | MatrixError::InvalidArray(_)
            | MatrixError::InvalidSparse(_)
            | MatrixError::InvalidTypeCode(_)
            | MatrixError::IncompatibleBlocks => ErrorCategory::Type,
            MatrixError::IndexOutOfRange { .. } => ErrorCategory::Index,
            MatrixError::Domain { .. }
            | MatrixError::DivisionByZero
            | MatrixError::ZeroSliceStep => ErrorCategory::Value,
            MatrixError::NotImplemented(_) => ErrorCategory::NotImplemented,
            MatrixError::OutOfMemory { .. } => ErrorCategory::Memory,
            MatrixError::Io(_) => ErrorCategory::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let err = MatrixError::IndexOutOfRange { index: 5, dim: 3 };
        assert_eq!(err.category(), ErrorCategory::Index);
        assert_eq!(
            MatrixError::Domain { op: "sqrt" }.category(),
            ErrorCategory::Value
        );
        assert_eq!(
            MatrixError::NotImplemented("matrix deletion").category(),
            ErrorCategory::NotImplemented
        );
        assert_eq!(
            MatrixError::OutOfMemory { elements: 1 }.category(),
            ErrorCategory::Memory
        );
    }

    #[test]
    fn test_display() {
        let err = MatrixError::IllegalConversion {
            from: ElementKind::Complex,
            to: ElementKind::Real,
        };
        assert_eq!(
            err.to_string(),
            "illegal type conversion from complex to real"
        );
    }
}
