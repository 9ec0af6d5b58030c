//! densemat - dense column-major matrices over integer, real and complex
//! elements.
//!
//! A [`Matrix`] owns a flat buffer of one [`ElementKind`]; element `(i, j)`
//! of an `R × C` matrix lives at offset `i + j*R`. Kinds form the chain
//! `Integer < Real < Complex` and binary operations promote to the higher
//! of their operand kinds.
//!
//! # Architecture
//!
//! ```text
//! Level 1: Public API
//!     → construction (construct, foreign, sparse, random, state)
//!     → indexing (access, index)
//!     → arithmetic (operations, linalg)
//!
//! Level 2: Kind dispatch
//!     → Storage enum, with_element!, coerce_view
//!
//! Level 3: Kernels (backend module)
//!     → generic loops (Integer, level 1)
//!     → faer matmul (Real/Complex gemm)
//! ```
//!
//! # Example
//!
//! ```
//! use densemat::{ElementKind, Matrix, Number};
//! use densemat::operations::add;
//!
//! // [[1, 2], [3, 4]] in column-major order
//! let m = Matrix::from_vec(vec![1i64, 3, 2, 4], 2, 2).unwrap();
//! let r = add(&m, 1.5).unwrap();
//! assert_eq!(r.kind(), ElementKind::Real);
//! assert_eq!(r.at(0, 1), Some(Number::Real(3.5)));
//!
//! // negative indices wrap around
//! let v = Matrix::from_vec(vec![10.0, 20.0, 30.0], 3, 1).unwrap();
//! let picked = v.get(vec![-1i64, 0]).unwrap().into_matrix().unwrap();
//! assert_eq!(picked.as_slice::<f64>(), Some(&[30.0, 10.0][..]));
//! ```

mod access;
pub mod backend;
mod config;
mod construct;
pub mod error;
mod foreign;
mod index;
mod kind;
mod linalg;
mod matrix;
pub mod operations;
mod random;
pub mod scalar;
mod sparse;
mod state;
pub mod storage;

pub use access::{Assignment, Selection};
pub use config::{LinalgConfig, NUM_THREADS_ENV, Parallelism};
pub use construct::Block;
pub use error::{ErrorCategory, MatrixError};
pub use foreign::ArrayDescriptor;
pub use index::{Index, IndexExpr, IndexList, Slice, SliceIndices, wrap};
pub use kind::{ElementKind, promote};
pub use linalg::{matmul, matmul_with};
pub use matrix::Matrix;
pub use operations::Operand;
pub use random::{RandomNormal, RandomUniform};
pub use scalar::{Element, Number, c64};
pub use sparse::{SparseMatrix, SparseSource};
pub use state::MatrixState;
