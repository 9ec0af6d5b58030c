//! Random matrix construction.
//!
//! Only Real and Complex element types can be sampled.

use rand::Rng;
use rand::distr::StandardUniform;
use rand_distr::StandardNormal;

use crate::error::MatrixError;
use crate::matrix::{Matrix, checked_len};
use crate::scalar::{Element, c64};
use crate::storage::Dense;

/// Element types that can be sampled uniformly from `[0, 1)`.
pub trait RandomUniform: Element {
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self;
}

impl RandomUniform for f64 {
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self {
        rng.sample(StandardUniform)
    }
}

impl RandomUniform for c64 {
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self {
        c64::new(rng.sample(StandardUniform), rng.sample(StandardUniform))
    }
}

/// Element types that can be sampled from a standard normal distribution.
pub trait RandomNormal: Element {
    fn sample_normal<R: Rng>(rng: &mut R) -> Self;
}

impl RandomNormal for f64 {
    fn sample_normal<R: Rng>(rng: &mut R) -> Self {
        rng.sample(StandardNormal)
    }
}

impl RandomNormal for c64 {
    fn sample_normal<R: Rng>(rng: &mut R) -> Self {
        // real and imaginary parts are N(0, 1/2) so E|z|^2 = 1
        let scale = std::f64::consts::FRAC_1_SQRT_2;
        c64::new(
            rng.sample::<f64, _>(StandardNormal) * scale,
            rng.sample::<f64, _>(StandardNormal) * scale,
        )
    }
}

fn sampled<T: Element>(
    rows: usize,
    cols: usize,
    mut sample: impl FnMut() -> T,
) -> Result<Matrix, MatrixError> {
    let mut d = Dense::<T>::try_zeros(checked_len(rows, cols)?)?;
    for v in d.as_mut_slice() {
        *v = sample();
    }
    Ok(Matrix::from_storage(rows, cols, T::into_storage(d)))
}

impl Matrix {
    /// Uniform random values in `[0, 1)` (both parts for complex).
    ///
    /// # Example
    ///
    /// ```
    /// use densemat::{ElementKind, Matrix};
    ///
    /// let m = Matrix::random::<f64>(2, 3).unwrap();
    /// assert_eq!(m.size(), (2, 3));
    /// assert_eq!(m.kind(), ElementKind::Real);
    /// assert!(m.as_slice::<f64>().unwrap().iter().all(|v| (0.0..1.0).contains(v)));
    /// ```
    pub fn random<T: RandomUniform>(rows: usize, cols: usize) -> Result<Self, MatrixError> {
        Self::random_with_rng::<T, _>(rows, cols, &mut rand::rng())
    }

    /// Uniform random values drawn from `rng`, for reproducible results.
    ///
    /// # Example
    ///
    /// ```
    /// use densemat::Matrix;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let a = Matrix::random_with_rng::<f64, _>(2, 2, &mut StdRng::seed_from_u64(7)).unwrap();
    /// let b = Matrix::random_with_rng::<f64, _>(2, 2, &mut StdRng::seed_from_u64(7)).unwrap();
    /// assert_eq!(a, b);
    /// ```
    pub fn random_with_rng<T: RandomUniform, R: Rng>(
        rows: usize,
        cols: usize,
        rng: &mut R,
    ) -> Result<Self, MatrixError> {
        sampled(rows, cols, || T::sample_uniform(rng))
    }

    /// Standard normal random values.
    pub fn randn<T: RandomNormal>(rows: usize, cols: usize) -> Result<Self, MatrixError> {
        Self::randn_with_rng::<T, _>(rows, cols, &mut rand::rng())
    }

    pub fn randn_with_rng<T: RandomNormal, R: Rng>(
        rows: usize,
        cols: usize,
        rng: &mut R,
    ) -> Result<Self, MatrixError> {
        sampled(rows, cols, || T::sample_normal(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::ElementKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_c64() {
        let m = Matrix::random::<c64>(2, 3).unwrap();
        assert_eq!(m.kind(), ElementKind::Complex);
        for v in m.as_slice::<c64>().unwrap() {
            assert!((0.0..1.0).contains(&v.re), "real part {} not in [0, 1)", v.re);
            assert!((0.0..1.0).contains(&v.im), "imaginary part {} not in [0, 1)", v.im);
        }
    }

    #[test]
    fn test_randn_f64_moments() {
        let m = Matrix::randn_with_rng::<f64, _>(100, 1, &mut StdRng::seed_from_u64(54321)).unwrap();
        let data = m.as_slice::<f64>().unwrap();
        let mean = data.iter().sum::<f64>() / 100.0;
        assert!(mean.abs() < 0.5, "mean {} too far from 0", mean);

        let var = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / 100.0;
        assert!(var > 0.3 && var < 2.0, "variance {} too far from 1", var);
    }

    #[test]
    fn test_randn_c64_unit_power() {
        let m = Matrix::randn::<c64>(100, 1).unwrap();
        let mean_sq = m.as_slice::<c64>().unwrap().iter().map(|z| z.norm_sqr()).sum::<f64>() / 100.0;
        assert!(mean_sq > 0.3 && mean_sq < 2.0, "mean |z|^2 {} too far from 1", mean_sq);
    }

    #[test]
    fn test_random_empty() {
        let m = Matrix::random::<f64>(0, 4).unwrap();
        assert_eq!(m.size(), (0, 4));
        assert!(m.is_empty());
    }
}
