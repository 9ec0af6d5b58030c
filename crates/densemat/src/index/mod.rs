//! Index expressions and their resolution into offset lists.
//!
//! Every index shape resolves against a dimension bound `n` into a flat
//! sequence of offsets in `[0, n)`:
//!
//! ```text
//! Int(i)       → [i]             i ∈ [-n, n), negative wraps to i + n
//! Slice(s)     → s.indices(n)    bounds clamped, never rejected
//! List(v)      → v               each entry checked and wrapped
//! Matrix(m)    → m's elements    m must be of Integer kind
//! ```

mod slice;

use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use smallvec::SmallVec;

use crate::error::MatrixError;
use crate::matrix::Matrix;

pub use slice::{Slice, SliceIndices};

/// Resolved offsets along one axis.
pub type IndexList = SmallVec<[usize; 8]>;

/// One axis worth of indexing.
#[derive(Debug, Clone, PartialEq)]
pub enum Index<'a> {
    Int(i64),
    Slice(Slice),
    List(Vec<i64>),
    /// An Integer-kind matrix whose elements are used as a list.
    Matrix(&'a Matrix),
}

/// A single index over the linear length, or a `(row, column)` pair.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexExpr<'a> {
    Single(Index<'a>),
    Pair(Index<'a>, Index<'a>),
}

impl<'a> Index<'a> {
    /// Build a list index from any integer iterator.
    pub fn list(items: impl IntoIterator<Item = i64>) -> Self {
        Index::List(items.into_iter().collect())
    }

    /// Resolve against a dimension of length `dim`.
    ///
    /// # Example
    ///
    /// ```
    /// use densemat::Index;
    ///
    /// let offsets = Index::list([-1, 0, -1]).resolve(3).unwrap();
    /// assert_eq!(offsets.as_slice(), &[2, 0, 2]);
    /// assert!(Index::Int(3).resolve(3).is_err());
    /// ```
    pub fn resolve(&self, dim: usize) -> Result<IndexList, MatrixError> {
        match self {
            Index::Int(i) => Ok(smallvec::smallvec![wrap(*i, dim)?]),
            Index::Slice(s) => Ok(s.indices(dim)?.iter().collect()),
            Index::List(items) => items.iter().map(|&i| wrap(i, dim)).collect(),
            Index::Matrix(m) => {
                let items = m
                    .as_slice::<i64>()
                    .ok_or(MatrixError::InvalidIndex("not an integer index list"))?;
                items.iter().map(|&i| wrap(i, dim)).collect()
            }
        }
    }
}

/// Check `index` against `[-dim, dim)` and wrap negatives.
#[inline]
pub fn wrap(index: i64, dim: usize) -> Result<usize, MatrixError> {
    let n = dim as i64;
    if index < -n || index >= n {
        return Err(MatrixError::IndexOutOfRange { index, dim });
    }
    Ok(if index < 0 { index + n } else { index } as usize)
}

macro_rules! int_index_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Index<'_> {
                fn from(i: $t) -> Self {
                    Index::Int(i as i64)
                }
            }

            impl From<$t> for IndexExpr<'_> {
                fn from(i: $t) -> Self {
                    IndexExpr::Single(Index::Int(i as i64))
                }
            }
        )*
    };
}

int_index_from!(i32, i64, isize, usize);

macro_rules! slice_index_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Index<'_> {
                fn from(s: $t) -> Self {
                    Index::Slice(s.into())
                }
            }

            impl From<$t> for IndexExpr<'_> {
                fn from(s: $t) -> Self {
                    IndexExpr::Single(Index::Slice(s.into()))
                }
            }
        )*
    };
}

slice_index_from!(Slice, Range<i64>, RangeFrom<i64>, RangeTo<i64>, RangeFull);

impl From<Vec<i64>> for Index<'_> {
    fn from(items: Vec<i64>) -> Self {
        Index::List(items)
    }
}

impl From<&[i64]> for Index<'_> {
    fn from(items: &[i64]) -> Self {
        Index::List(items.to_vec())
    }
}

impl<'a> From<&'a Matrix> for Index<'a> {
    fn from(m: &'a Matrix) -> Self {
        Index::Matrix(m)
    }
}

impl<'a> From<Index<'a>> for IndexExpr<'a> {
    fn from(index: Index<'a>) -> Self {
        IndexExpr::Single(index)
    }
}

impl From<Vec<i64>> for IndexExpr<'_> {
    fn from(items: Vec<i64>) -> Self {
        IndexExpr::Single(Index::List(items))
    }
}

impl<'a> From<&'a Matrix> for IndexExpr<'a> {
    fn from(m: &'a Matrix) -> Self {
        IndexExpr::Single(Index::Matrix(m))
    }
}

impl<'a, R, C> From<(R, C)> for IndexExpr<'a>
where
    R: Into<Index<'a>>,
    C: Into<Index<'a>>,
{
    fn from((r, c): (R, C)) -> Self {
        IndexExpr::Pair(r.into(), c.into())
    }
}

/// Column-major offsets of the Cartesian product `rows × cols` in a matrix
/// with `nrows` rows.
pub(crate) fn product_offsets(
    rows: &[usize],
    cols: &[usize],
    nrows: usize,
) -> impl Iterator<Item = usize> {
    cols.iter()
        .flat_map(move |&j| rows.iter().map(move |&i| i + j * nrows))
}
