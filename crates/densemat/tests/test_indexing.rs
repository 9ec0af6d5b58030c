//! Tests for element and block reads and writes.

use densemat::{
    ArrayDescriptor, ElementKind, ErrorCategory, Index, Matrix, MatrixError, Number, Slice, c64,
};
use proptest::prelude::*;

fn grid(rows: usize, cols: usize) -> Matrix {
    let data: Vec<i64> = (0..(rows * cols) as i64).collect();
    Matrix::from_vec(data, rows, cols).unwrap()
}

fn slice_strategy() -> impl Strategy<Value = Slice> {
    (
        proptest::option::of(-7i64..7),
        proptest::option::of(-7i64..7),
        prop_oneof![-3i64..0, 1i64..4],
    )
        .prop_map(|(start, stop, step)| Slice::new(start, stop, Some(step)))
}

/// The offsets a slice selects, spelled out as an index list.
fn expanded<'a>(s: &Slice, dim: usize) -> Index<'a> {
    Index::list(s.indices(dim).unwrap().iter().map(|o| o as i64))
}

#[test]
fn test_scalar_reads() {
    let m = grid(2, 3);
    assert_eq!(m.get(4).unwrap().into_scalar(), Some(Number::Integer(4)));
    assert_eq!(m.get(-1).unwrap().into_scalar(), Some(Number::Integer(5)));
    assert_eq!(m.get((1, 2)).unwrap().into_scalar(), Some(Number::Integer(5)));
    assert_eq!(m.get((-1, -3)).unwrap().into_scalar(), Some(Number::Integer(1)));

    let err = m.get(6).unwrap_err();
    assert!(matches!(err, MatrixError::IndexOutOfRange { index: 6, dim: 6 }));
    assert_eq!(err.category(), ErrorCategory::Index);
    assert!(m.get((2, 0)).is_err());
    assert!(m.get(-7).is_err());
}

#[test]
fn test_block_reads() {
    let m = grid(3, 3);

    let col = m.get((.., 1)).unwrap().into_matrix().unwrap();
    assert_eq!(col.size(), (3, 1));
    assert_eq!(col.as_slice::<i64>(), Some(&[3, 4, 5][..]));

    let row = m.get((1, ..)).unwrap().into_matrix().unwrap();
    assert_eq!(row.size(), (1, 3));
    assert_eq!(row.as_slice::<i64>(), Some(&[1, 4, 7][..]));

    // reversed rows, every other column
    let sub = m
        .get((Slice::full().step_by(-1), Slice::full().step_by(2)))
        .unwrap()
        .into_matrix()
        .unwrap();
    assert_eq!(sub.size(), (3, 2));
    assert_eq!(sub.as_slice::<i64>(), Some(&[2, 1, 0, 8, 7, 6][..]));

    let picked = m
        .get((Index::list([0, -1]), Index::list([2])))
        .unwrap()
        .into_matrix()
        .unwrap();
    assert_eq!(picked.as_slice::<i64>(), Some(&[6, 8][..]));

    let linear = m.get(2..5).unwrap().into_matrix().unwrap();
    assert_eq!(linear.size(), (3, 1));
    assert_eq!(linear.as_slice::<i64>(), Some(&[2, 3, 4][..]));
}

#[test]
fn test_matrix_as_index() {
    let m = grid(2, 2);
    let idx = Matrix::from_vec(vec![3i64, -4], 2, 1).unwrap();
    let sel = m.get(&idx).unwrap().into_matrix().unwrap();
    assert_eq!(sel.as_slice::<i64>(), Some(&[3, 0][..]));

    let bad = Matrix::from_vec(vec![1.0], 1, 1).unwrap();
    assert!(matches!(m.get(&bad).unwrap_err(), MatrixError::InvalidIndex(_)));
}

#[test]
fn test_zero_step_slice() {
    let m = grid(2, 2);
    let err = m.get(Slice::full().step_by(0)).unwrap_err();
    assert!(matches!(err, MatrixError::ZeroSliceStep));
    assert_eq!(err.category(), ErrorCategory::Value);
}

#[test]
fn test_most_negative_step() {
    let m = grid(3, 1);
    let sel = m
        .get(Slice::full().step_by(i64::MIN))
        .unwrap()
        .into_matrix()
        .unwrap();
    assert_eq!(sel.as_slice::<i64>(), Some(&[2][..]));
}

#[test]
fn test_empty_selection() {
    let m = grid(2, 2);
    let sel = m.get(Slice::new(Some(1), Some(1), None)).unwrap().into_matrix().unwrap();
    assert_eq!(sel.size(), (0, 1));
    assert!(sel.is_empty());
}

#[test]
fn test_broadcast_assignment() {
    let mut m = Matrix::zeros(2, 3, ElementKind::Real).unwrap();
    m.set((.., Slice::new(Some(1), None, None)), 2).unwrap();
    assert_eq!(m.as_slice::<f64>(), Some(&[0.0, 0.0, 2.0, 2.0, 2.0, 2.0][..]));

    // single-element matrix broadcasts like a scalar
    let one = Matrix::from_vec(vec![9.0], 1, 1).unwrap();
    m.set((0, ..), &one).unwrap();
    assert_eq!(m.as_slice::<f64>(), Some(&[9.0, 0.0, 9.0, 2.0, 9.0, 2.0][..]));
}

#[test]
fn test_block_assignment_shape_rules() {
    let mut m = grid(3, 3);
    let block = Matrix::from_vec(vec![-1i64, -2, -3, -4], 2, 2).unwrap();
    m.set((0..2, 1..3), &block).unwrap();
    assert_eq!(m.at(0, 1), Some(Number::Integer(-1)));
    assert_eq!(m.at(1, 2), Some(Number::Integer(-4)));

    // a caller-owned matrix is never reshaped
    let flat = Matrix::from_vec(vec![1i64, 2, 3, 4], 4, 1).unwrap();
    let err = m.set((0..2, 1..3), &flat).unwrap_err();
    assert!(matches!(err, MatrixError::WrongSize { .. }));

    // a sequence is reshaped to fit
    let values: Vec<Number> = [5, 6, 7, 8].into_iter().map(Number::from).collect();
    m.set((Index::list([0, 2]), Index::list([0, 2])), &values[..]).unwrap();
    assert_eq!(m.at(0, 0), Some(Number::Integer(5)));
    assert_eq!(m.at(2, 0), Some(Number::Integer(6)));
    assert_eq!(m.at(0, 2), Some(Number::Integer(7)));
    assert_eq!(m.at(2, 2), Some(Number::Integer(8)));
}

#[test]
fn test_linear_assignment_from_list() {
    let mut m = Matrix::zeros(2, 2, ElementKind::Complex).unwrap();
    let src = Matrix::from_vec(vec![1i64, 2], 2, 1).unwrap();
    m.set(Index::list([3, 0]), &src).unwrap();
    assert_eq!(m.element(3), Some(Number::Complex(c64::new(1.0, 0.0))));
    assert_eq!(m.element(0), Some(Number::Complex(c64::new(2.0, 0.0))));

    let wide = Matrix::from_vec(vec![1i64, 2], 1, 2).unwrap();
    assert!(m.set(Index::list([3, 0]), &wide).is_err());
}

#[test]
fn test_array_assignment() {
    let data = [1.5f64, 2.5];
    let desc = ArrayDescriptor::vector(bytemuck::cast_slice(&data), 'f', 8, 2);
    let mut m = Matrix::zeros(2, 2, ElementKind::Real).unwrap();
    m.set((1, ..), &desc).unwrap();
    assert_eq!(m.as_slice::<f64>(), Some(&[0.0, 1.5, 0.0, 2.5][..]));
}

#[test]
fn test_assignment_kind_check() {
    let mut m = grid(2, 2);
    let err = m.set(0, 1.5).unwrap_err();
    assert!(matches!(err, MatrixError::InvalidAssignment { .. }));

    let values = [Number::from(1), Number::from(2.5)];
    assert!(m.set(0..2, &values[..]).is_err());
    assert_eq!(m, grid(2, 2));
}

#[test]
fn test_delete_not_implemented() {
    let mut m = grid(2, 2);
    let err = m.delete(0).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NotImplemented);
}

proptest! {
    #[test]
    fn prop_negative_index_wraps(len in 1usize..40, seed in any::<usize>()) {
        let m = grid(len, 1);
        let i = (seed % len) as i64;
        let pos = m.get(i).unwrap().into_scalar();
        let neg = m.get(i - len as i64).unwrap().into_scalar();
        prop_assert_eq!(pos, neg);
    }

    #[test]
    fn prop_set_then_get_round_trips(
        rows in 1usize..6,
        cols in 1usize..6,
        r in any::<usize>(),
        c in any::<usize>(),
        value in -1000i64..1000,
    ) {
        let mut m = Matrix::zeros(rows, cols, ElementKind::Real).unwrap();
        let (i, j) = ((r % rows) as i64, (c % cols) as i64);
        m.set((i, j), value).unwrap();
        prop_assert_eq!(
            m.get((i, j)).unwrap().into_scalar(),
            Some(Number::Real(value as f64))
        );
    }

    #[test]
    fn prop_slice_pair_read_matches_list_pair(
        rows in 0usize..6,
        cols in 0usize..6,
        r in slice_strategy(),
        c in slice_strategy(),
    ) {
        let m = grid(rows, cols);
        let fast = m.get((r, c)).unwrap();
        let general = m.get((expanded(&r, rows), expanded(&c, cols))).unwrap();
        prop_assert_eq!(fast, general);
    }

    #[test]
    fn prop_slice_pair_write_matches_list_pair(
        rows in 0usize..6,
        cols in 0usize..6,
        r in slice_strategy(),
        c in slice_strategy(),
    ) {
        let (rn, cn) = (
            r.indices(rows).unwrap().len,
            c.indices(cols).unwrap().len,
        );
        let data: Vec<i64> = (0..(rn * cn) as i64).map(|v| -1 - v).collect();
        let src = Matrix::from_vec(data, rn, cn).unwrap();

        let mut fast = grid(rows, cols);
        fast.set((r, c), &src).unwrap();
        let mut general = grid(rows, cols);
        general
            .set((expanded(&r, rows), expanded(&c, cols)), &src)
            .unwrap();
        prop_assert_eq!(fast, general);
    }

    #[test]
    fn prop_int_pair_read_matches_list_pair(
        rows in 1usize..6,
        cols in 1usize..6,
        r in any::<usize>(),
        c in any::<usize>(),
    ) {
        let m = grid(rows, cols);
        // negative forms exercise wraparound on both paths
        let (i, j) = ((r % rows) as i64 - rows as i64, (c % cols) as i64);
        let fast = m.get((i, j)).unwrap().into_scalar();
        let general = m
            .get((Index::list([i]), Index::list([j])))
            .unwrap()
            .into_matrix()
            .unwrap();
        prop_assert_eq!(general.size(), (1, 1));
        prop_assert_eq!(fast, general.element(0));
    }

    #[test]
    fn prop_out_of_range_rejected(len in 0usize..20, extra in 0i64..5) {
        let m = grid(len, 1);
        let n = len as i64;
        prop_assert!(m.get(n + extra).is_err());
        prop_assert!(m.get(-n - 1 - extra).is_err());
    }
}
