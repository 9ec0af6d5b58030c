//! Tests for the persisted state and raw bulk transfer.

use densemat::{ElementKind, ErrorCategory, Matrix, MatrixState, Number, c64};

#[test]
fn test_state_json_round_trip() {
    let m = Matrix::from_vec(
        vec![c64::new(1.0, -1.0), c64::new(0.0, 0.5), c64::new(2.0, 0.0), c64::new(-3.0, 4.0)],
        2,
        2,
    )
    .unwrap();

    let json = serde_json::to_string(&m.state()).unwrap();
    let state: MatrixState = serde_json::from_str(&json).unwrap();
    assert_eq!(state.size, (2, 2));
    assert_eq!(state.typecode, 'z');

    let back = Matrix::from_state(&state).unwrap();
    assert_eq!(back, m);
}

#[test]
fn test_state_preserves_each_kind() {
    let cases = [
        Matrix::from_vec(vec![1i64, -2, 3], 3, 1).unwrap(),
        Matrix::from_vec(vec![0.5, 1.5], 1, 2).unwrap(),
        Matrix::zeros(0, 2, ElementKind::Complex).unwrap(),
    ];
    for m in cases {
        let state = m.state();
        assert_eq!(state.values.len(), m.len());
        assert_eq!(state.typecode, m.typecode());
        assert_eq!(Matrix::from_state(&state).unwrap(), m);
    }
}

#[test]
fn test_hand_written_state() {
    let state: MatrixState = serde_json::from_str(
        r#"{"values":[{"Integer":1},{"Real":2.5}],"size":[1,2],"typecode":"d"}"#,
    )
    .unwrap();
    let m = Matrix::from_state(&state).unwrap();
    assert_eq!(m.size(), (1, 2));
    assert_eq!(m.at(0, 0), Some(Number::Real(1.0)));
    assert_eq!(m.at(0, 1), Some(Number::Real(2.5)));
}

#[test]
fn test_raw_round_trip() {
    for kind in ElementKind::ALL {
        let src = Matrix::from_matrix(
            &Matrix::from_vec(vec![3i64, -1, 4, 1, -5, 9], 3, 2).unwrap(),
            Some(kind),
        )
        .unwrap();

        let mut buf = Vec::new();
        src.write_raw(&mut buf).unwrap();
        assert_eq!(buf.len(), src.len() * kind.item_size());

        let mut dst = Matrix::zeros(3, 2, kind).unwrap();
        dst.read_raw(&mut buf.as_slice()).unwrap();
        assert_eq!(dst, src);
    }
}

#[test]
fn test_raw_short_read() {
    let src = Matrix::from_vec(vec![1.0, 2.0, 3.0], 3, 1).unwrap();
    let mut buf = Vec::new();
    src.write_raw(&mut buf).unwrap();
    buf.truncate(buf.len() - 1);

    let mut dst = Matrix::zeros(3, 1, ElementKind::Real).unwrap();
    let err = dst.read_raw(&mut buf.as_slice()).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Io);
}
