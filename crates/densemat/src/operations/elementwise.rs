//! Element-wise transcendental functions and complex parts.
//!
//! Integer and Real inputs produce Real results; Complex inputs stay
//! Complex. Domain checks run per element and abort the whole operation.

use crate::error::MatrixError;
use crate::kind::{ElementKind, promote};
use crate::matrix::Matrix;
use crate::scalar::{Element, Number, c64};
use crate::storage::{Dense, Storage, coerce_view};

type RealFn = fn(f64) -> Result<f64, MatrixError>;
type ComplexFn = fn(c64) -> Result<c64, MatrixError>;

fn domain(op: &'static str) -> MatrixError {
    MatrixError::Domain { op }
}

fn exp_real(x: f64) -> Result<f64, MatrixError> {
    Ok(x.exp())
}

fn exp_complex(z: c64) -> Result<c64, MatrixError> {
    Ok(z.exp())
}

fn log_real(x: f64) -> Result<f64, MatrixError> {
    if x <= 0.0 {
        return Err(domain("log"));
    }
    Ok(x.ln())
}

fn log_complex(z: c64) -> Result<c64, MatrixError> {
    if z.re == 0.0 && z.im == 0.0 {
        return Err(domain("log"));
    }
    Ok(z.ln())
}

fn sqrt_real(x: f64) -> Result<f64, MatrixError> {
    if x < 0.0 {
        return Err(domain("sqrt"));
    }
    Ok(x.sqrt())
}

fn sqrt_complex(z: c64) -> Result<c64, MatrixError> {
    Ok(z.sqrt())
}

fn sin_real(x: f64) -> Result<f64, MatrixError> {
    Ok(x.sin())
}

fn sin_complex(z: c64) -> Result<c64, MatrixError> {
    Ok(z.sin())
}

fn cos_real(x: f64) -> Result<f64, MatrixError> {
    Ok(x.cos())
}

fn cos_complex(z: c64) -> Result<c64, MatrixError> {
    Ok(z.cos())
}

fn pow_real(x: f64, e: f64) -> Result<f64, MatrixError> {
    if (x == 0.0 && e < 0.0) || (x < 0.0 && e > 0.0 && e < 1.0) {
        return Err(domain("pow"));
    }
    Ok(x.powf(e))
}

fn pow_complex(z: c64, e: c64) -> Result<c64, MatrixError> {
    if z.re == 0.0 && z.im == 0.0 {
        if e.im != 0.0 || e.re < 0.0 {
            return Err(domain("pow"));
        }
        let v = if e.re == 0.0 { 1.0 } else { 0.0 };
        return Ok(c64::new(v, 0.0));
    }
    Ok(z.powc(e))
}

/// Map `m` viewed as `T` through `f` into a new matrix of `U`.
fn map_as<T: Element, U: Element>(
    m: &Matrix,
    f: impl Fn(T) -> Result<U, MatrixError>,
) -> Result<Matrix, MatrixError> {
    let src = coerce_view::<T>(m.storage())?;
    let mut out = Dense::<U>::try_zeros(src.len())?;
    for (o, &v) in out.as_mut_slice().iter_mut().zip(src.iter()) {
        *o = f(v)?;
    }
    Ok(Matrix::from_storage(m.rows(), m.cols(), U::into_storage(out)))
}

fn unary(m: &Matrix, real: RealFn, complex: ComplexFn) -> Result<Matrix, MatrixError> {
    match m.kind() {
        ElementKind::Complex => map_as::<c64, c64>(m, complex),
        _ => map_as::<f64, f64>(m, real),
    }
}

fn unary_number(n: Number, real: RealFn, complex: ComplexFn) -> Result<Number, MatrixError> {
    match n {
        Number::Complex(z) => complex(z).map(Number::Complex),
        Number::Integer(i) => real(i as f64).map(Number::Real),
        Number::Real(x) => real(x).map(Number::Real),
    }
}

/// Element-wise `e^x`.
pub fn exp(m: &Matrix) -> Result<Matrix, MatrixError> {
    unary(m, exp_real, exp_complex)
}

/// Element-wise natural logarithm.
///
/// # Errors
///
/// [`MatrixError::Domain`] if a non-complex element is `<= 0` or a complex
/// element is zero.
pub fn log(m: &Matrix) -> Result<Matrix, MatrixError> {
    unary(m, log_real, log_complex)
}

/// Element-wise square root; non-complex input must be non-negative.
///
/// # Example
///
/// ```
/// use densemat::{Matrix, c64};
/// use densemat::operations::sqrt;
///
/// let r = Matrix::from_vec(vec![4.0, -1.0], 2, 1).unwrap();
/// assert!(sqrt(&r).is_err());
///
/// let z = Matrix::from_vec(vec![c64::new(-1.0, 0.0)], 1, 1).unwrap();
/// assert_eq!(sqrt(&z).unwrap().as_slice::<c64>(), Some(&[c64::new(0.0, 1.0)][..]));
/// ```
pub fn sqrt(m: &Matrix) -> Result<Matrix, MatrixError> {
    unary(m, sqrt_real, sqrt_complex)
}

pub fn sin(m: &Matrix) -> Result<Matrix, MatrixError> {
    unary(m, sin_real, sin_complex)
}

pub fn cos(m: &Matrix) -> Result<Matrix, MatrixError> {
    unary(m, cos_real, cos_complex)
}

/// Raise every element to a scalar power.
///
/// The result kind is at least Real. For a Real result, a zero base with a
/// negative exponent or a negative base with an exponent in `(0, 1)` is a
/// domain error; other negative bases follow `powf` (fractional exponents
/// give NaN). For a Complex result, a zero base needs an exponent with zero
/// imaginary part and non-negative real part, and `0^0 = 1`.
pub fn pow(m: &Matrix, exponent: impl Into<Number>) -> Result<Matrix, MatrixError> {
    let e = exponent.into();
    match promote(ElementKind::Real, promote(m.kind(), e.kind())) {
        ElementKind::Complex => {
            let e = e.as_c64();
            map_as::<c64, c64>(m, |z| pow_complex(z, e))
        }
        _ => {
            let e = e.as_f64().ok_or(MatrixError::IllegalConversion {
                from: ElementKind::Complex,
                to: ElementKind::Real,
            })?;
            map_as::<f64, f64>(m, |x| pow_real(x, e))
        }
    }
}

/// Real parts. Non-complex input is copied unchanged.
pub fn real(m: &Matrix) -> Result<Matrix, MatrixError> {
    match m.storage() {
        Storage::Complex(d) => Ok(Matrix::from_storage(
            m.rows(),
            m.cols(),
            Storage::Real(d.try_map(|z| z.re)?),
        )),
        _ => Ok(m.clone()),
    }
}

/// Imaginary parts. Non-complex input yields zeros of the same kind.
pub fn imag(m: &Matrix) -> Result<Matrix, MatrixError> {
    match m.storage() {
        Storage::Complex(d) => Ok(Matrix::from_storage(
            m.rows(),
            m.cols(),
            Storage::Real(d.try_map(|z| z.im)?),
        )),
        _ => Matrix::zeros(m.rows(), m.cols(), m.kind()),
    }
}

fn map_number(n: Number, real: fn(f64) -> f64, complex: fn(c64) -> c64) -> Number {
    match n {
        Number::Integer(i) => Number::Real(real(i as f64)),
        Number::Real(x) => Number::Real(real(x)),
        Number::Complex(z) => Number::Complex(complex(z)),
    }
}

/// Scalar counterparts of the matrix functions.
impl Number {
    pub fn exp(self) -> Number {
        map_number(self, f64::exp, |z| z.exp())
    }

    pub fn log(self) -> Result<Number, MatrixError> {
        unary_number(self, log_real, log_complex)
    }

    pub fn sqrt(self) -> Result<Number, MatrixError> {
        unary_number(self, sqrt_real, sqrt_complex)
    }

    pub fn sin(self) -> Number {
        map_number(self, f64::sin, |z| z.sin())
    }

    pub fn cos(self) -> Number {
        map_number(self, f64::cos, |z| z.cos())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reals(data: Vec<f64>) -> Matrix {
        let n = data.len();
        Matrix::from_vec(data, n, 1).unwrap()
    }

    #[test]
    fn test_integer_input_becomes_real() {
        let m = Matrix::from_vec(vec![0i64, 1], 1, 2).unwrap();
        let e = exp(&m).unwrap();
        assert_eq!(e.kind(), ElementKind::Real);
        assert_eq!(e.size(), (1, 2));
        assert_relative_eq!(e.as_slice::<f64>().unwrap()[1], std::f64::consts::E);
    }

    #[test]
    fn test_log_domain() {
        assert!(matches!(
            log(&reals(vec![1.0, 0.0])).unwrap_err(),
            MatrixError::Domain { op: "log" }
        ));
        let z = Matrix::from_vec(vec![c64::new(0.0, 0.0)], 1, 1).unwrap();
        assert!(log(&z).is_err());

        let l = log(&reals(vec![1.0])).unwrap();
        assert_eq!(l.as_slice::<f64>(), Some(&[0.0][..]));
    }

    #[test]
    fn test_sqrt_domain() {
        assert!(matches!(
            sqrt(&reals(vec![4.0, -1.0])).unwrap_err(),
            MatrixError::Domain { op: "sqrt" }
        ));
        let z = Matrix::from_vec(vec![c64::new(-1.0, 0.0)], 1, 1).unwrap();
        let r = sqrt(&z).unwrap();
        let v = r.as_slice::<c64>().unwrap()[0];
        assert_relative_eq!(v.re, 0.0);
        assert_relative_eq!(v.im, 1.0);
    }

    #[test]
    fn test_empty_input() {
        let m = Matrix::zeros(0, 3, ElementKind::Integer).unwrap();
        let s = sin(&m).unwrap();
        assert_eq!(s.size(), (0, 3));
        assert_eq!(s.kind(), ElementKind::Real);
        assert!(log(&m).unwrap().is_empty());
    }

    #[test]
    fn test_pow_real() {
        let m = reals(vec![4.0, 9.0]);
        let r = pow(&m, 0.5).unwrap();
        assert_eq!(r.as_slice::<f64>(), Some(&[2.0, 3.0][..]));

        assert!(pow(&reals(vec![0.0]), -1).is_err());
        assert!(pow(&reals(vec![-8.0]), 0.5).is_err());
        assert!(pow(&reals(vec![-8.0]), 1.5).unwrap().as_slice::<f64>().unwrap()[0].is_nan());

        let i = Matrix::from_vec(vec![2i64], 1, 1).unwrap();
        let r = pow(&i, 3).unwrap();
        assert_eq!(r.kind(), ElementKind::Real);
        assert_eq!(r.as_slice::<f64>(), Some(&[8.0][..]));
    }

    #[test]
    fn test_pow_complex_zero_base() {
        let z = Matrix::from_vec(vec![c64::new(0.0, 0.0)], 1, 1).unwrap();
        assert_eq!(
            pow(&z, 0).unwrap().as_slice::<c64>(),
            Some(&[c64::new(1.0, 0.0)][..])
        );
        assert_eq!(
            pow(&z, 2.0).unwrap().as_slice::<c64>(),
            Some(&[c64::new(0.0, 0.0)][..])
        );
        assert!(pow(&z, c64::new(1.0, 1.0)).is_err());
        assert!(pow(&z, -1.0).is_err());

        let r = pow(&reals(vec![-4.0]), c64::new(0.5, 0.0)).unwrap();
        let v = r.as_slice::<c64>().unwrap()[0];
        assert_relative_eq!(v.re, 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.im, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_real_imag() {
        let z = Matrix::from_vec(vec![c64::new(1.0, 2.0), c64::new(3.0, -4.0)], 1, 2).unwrap();
        assert_eq!(real(&z).unwrap().as_slice::<f64>(), Some(&[1.0, 3.0][..]));
        assert_eq!(imag(&z).unwrap().as_slice::<f64>(), Some(&[2.0, -4.0][..]));

        let i = Matrix::from_vec(vec![5i64, 6], 2, 1).unwrap();
        assert_eq!(real(&i).unwrap(), i);
        let im = imag(&i).unwrap();
        assert_eq!(im.kind(), ElementKind::Integer);
        assert_eq!(im.as_slice::<i64>(), Some(&[0, 0][..]));
    }

    #[test]
    fn test_number_functions() {
        assert_eq!(Number::Integer(0).exp(), Number::Real(1.0));
        assert_eq!(Number::Real(4.0).sqrt().unwrap(), Number::Real(2.0));
        assert!(Number::Real(-4.0).sqrt().is_err());
        assert!(Number::Integer(0).log().is_err());
        assert_eq!(Number::Real(0.0).sin(), Number::Real(0.0));
        assert_eq!(Number::Integer(0).cos(), Number::Real(1.0));
        assert!(matches!(
            Number::Complex(c64::new(-1.0, 0.0)).sqrt().unwrap(),
            Number::Complex(_)
        ));
    }
}
