//! Python-style slices with optional bounds and signed steps.

use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use crate::error::MatrixError;

/// A `start:stop:step` slice. Missing parts take their defaults when the
/// slice is normalized against a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slice {
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub step: Option<i64>,
}

/// A slice normalized against a concrete dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceIndices {
    pub start: i64,
    pub stop: i64,
    pub step: i64,
    /// Number of selected offsets.
    pub len: usize,
}

impl Slice {
    pub fn new(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Self {
        Self { start, stop, step }
    }

    /// The slice selecting every offset, `:`.
    pub fn full() -> Self {
        Self::default()
    }

    /// Replace the step.
    pub fn step_by(self, step: i64) -> Self {
        Self {
            step: Some(step),
            ..self
        }
    }

    /// Normalize against a dimension of length `dim`.
    ///
    /// Out-of-range bounds are clamped, not rejected; negative bounds count
    /// from the end.
    ///
    /// # Example
    ///
    /// ```
    /// use densemat::Slice;
    ///
    /// let s = Slice::new(None, None, Some(-1)).indices(4).unwrap();
    /// assert_eq!((s.start, s.len), (3, 4));
    ///
    /// let s = Slice::new(Some(-10), Some(2), None).indices(4).unwrap();
    /// assert_eq!((s.start, s.len), (0, 2));
    /// ```
    pub fn indices(&self, dim: usize) -> Result<SliceIndices, MatrixError> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(MatrixError::ZeroSliceStep);
        }
        // keep -step representable
        let step = step.max(-i64::MAX);
        let len = dim as i64;

        let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };
        let clamp = |bound: i64| {
            if bound < 0 {
                (bound + len).max(lower)
            } else {
                bound.min(upper)
            }
        };
        let start = self
            .start
            .map_or(if step < 0 { upper } else { lower }, clamp);
        let stop = self
            .stop
            .map_or(if step < 0 { lower } else { upper }, clamp);

        let count = if step < 0 {
            if stop < start {
                (start - stop - 1) / (-step) + 1
            } else {
                0
            }
        } else if start < stop {
            (stop - start - 1) / step + 1
        } else {
            0
        };

        Ok(SliceIndices {
            start,
            stop,
            step,
            len: count as usize,
        })
    }
}

impl SliceIndices {
    /// The selected offsets in order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len as i64).map(move |k| (self.start + k * self.step) as usize)
    }
}

impl From<Range<i64>> for Slice {
    fn from(r: Range<i64>) -> Self {
        Slice::new(Some(r.start), Some(r.end), None)
    }
}

impl From<RangeFrom<i64>> for Slice {
    fn from(r: RangeFrom<i64>) -> Self {
        Slice::new(Some(r.start), None, None)
    }
}

impl From<RangeTo<i64>> for Slice {
    fn from(r: RangeTo<i64>) -> Self {
        Slice::new(None, Some(r.end), None)
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Slice::full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(s: Slice, dim: usize) -> Vec<usize> {
        s.indices(dim).unwrap().iter().collect()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(offsets(Slice::full(), 4), vec![0, 1, 2, 3]);
        assert_eq!(offsets(Slice::full().step_by(-1), 4), vec![3, 2, 1, 0]);
        assert_eq!(offsets(Slice::full().step_by(2), 5), vec![0, 2, 4]);
    }

    #[test]
    fn test_negative_bounds() {
        assert_eq!(offsets(Slice::from(-2..4), 4), vec![2, 3]);
        assert_eq!(offsets(Slice::new(Some(-1), None, Some(-2)), 5), vec![4, 2, 0]);
    }

    #[test]
    fn test_clamping() {
        assert_eq!(offsets(Slice::from(1..100), 3), vec![1, 2]);
        assert_eq!(offsets(Slice::from(-100..1), 3), vec![0]);
        assert_eq!(offsets(Slice::new(Some(100), None, Some(-1)), 3), vec![2, 1, 0]);
        assert_eq!(offsets(Slice::new(None, Some(-100), Some(-1)), 3), vec![2, 1, 0]);
    }

    #[test]
    fn test_empty() {
        assert!(offsets(Slice::from(3..1), 5).is_empty());
        assert!(offsets(Slice::full(), 0).is_empty());
        assert!(offsets(Slice::full().step_by(-1), 0).is_empty());
    }

    #[test]
    fn test_zero_step() {
        let err = Slice::full().step_by(0).indices(3).unwrap_err();
        assert!(matches!(err, MatrixError::ZeroSliceStep));
    }

    #[test]
    fn test_extreme_steps() {
        let s = Slice::full().step_by(i64::MIN).indices(3).unwrap();
        assert_eq!(s.step, -i64::MAX);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![2]);
        assert_eq!(offsets(Slice::full().step_by(i64::MAX), 3), vec![0]);
        assert!(offsets(Slice::full().step_by(i64::MIN), 0).is_empty());
    }

    #[test]
    fn test_ranges() {
        assert_eq!(offsets(Slice::from(1..), 3), vec![1, 2]);
        assert_eq!(offsets(Slice::from(..2), 3), vec![0, 1]);
        assert_eq!(offsets(Slice::from(..), 2), vec![0, 1]);
    }
}
