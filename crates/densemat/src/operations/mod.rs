//! Matrix operations.
//!
//! Every operation allocates its result and leaves the operands untouched,
//! except the `*_assign` family, which validates first and then mutates the
//! destination in place:
//!
//! ```text
//! add(a, b)          → result kind = promote(a, b), new matrix
//! add_assign(m, b)   → promote(m, b) must equal kind(m), m mutated
//! ```

mod arith;
mod elementwise;
mod transpose;

pub use arith::{
    Operand, abs, add, add_assign, div, div_assign, mul, mul_assign, neg, pos, rem, rem_assign,
    sub, sub_assign,
};
pub use elementwise::{cos, exp, imag, log, pow, real, sin, sqrt};
pub use transpose::{ctranspose, transpose};
