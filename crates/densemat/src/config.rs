//! Runtime configuration for the linear-algebra bridge.

use faer::Par;

/// Environment variable read by [`LinalgConfig::from_env`].
pub const NUM_THREADS_ENV: &str = "DENSEMAT_NUM_THREADS";

/// Parallelism used inside matrix multiplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parallelism {
    #[default]
    Sequential,
    /// Rayon with the given number of threads; `0` lets rayon choose.
    Rayon(usize),
}

impl Parallelism {
    pub(crate) fn to_par(self) -> Par {
        match self {
            Parallelism::Sequential => Par::Seq,
            Parallelism::Rayon(n) => Par::rayon(n),
        }
    }
}

/// Options for [`matmul_with`](crate::matmul_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinalgConfig {
    pub parallelism: Parallelism,
}

impl LinalgConfig {
    pub fn sequential() -> Self {
        Self::default()
    }

    pub fn rayon(threads: usize) -> Self {
        Self {
            parallelism: Parallelism::Rayon(threads),
        }
    }

    /// Read `DENSEMAT_NUM_THREADS`.
    ///
    /// Unset, unparsable or `1` means sequential; any other value selects
    /// rayon with that many threads.
    pub fn from_env() -> Self {
        Self::from_threads(std::env::var(NUM_THREADS_ENV).ok().as_deref())
    }

    fn from_threads(value: Option<&str>) -> Self {
        match value.and_then(|v| v.trim().parse::<usize>().ok()) {
            None | Some(1) => Self::sequential(),
            Some(n) => Self::rayon(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sequential() {
        assert_eq!(LinalgConfig::default().parallelism, Parallelism::Sequential);
        assert!(matches!(Parallelism::Sequential.to_par(), Par::Seq));
    }

    #[test]
    fn test_thread_parsing() {
        assert_eq!(LinalgConfig::from_threads(None), LinalgConfig::sequential());
        assert_eq!(LinalgConfig::from_threads(Some("1")), LinalgConfig::sequential());
        assert_eq!(LinalgConfig::from_threads(Some("four")), LinalgConfig::sequential());
        assert_eq!(LinalgConfig::from_threads(Some(" 4 ")), LinalgConfig::rayon(4));
        assert_eq!(LinalgConfig::from_threads(Some("0")), LinalgConfig::rayon(0));
    }
}
