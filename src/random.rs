//! Random value sources for randomized tensor construction
//!
//! [`Tensor::random`](crate::tensor::Tensor::random) draws one value per
//! element from any [`RandomSource`]. Two kinds of source are provided:
//!
//! - [`Sampler`]: an RNG paired with a validated [`Distribution`]
//! - any `FnMut() -> f64` closure, for callers that bring their own generator
//!
//! ```
//! use densr::prelude::*;
//!
//! let dist = Distribution::Normal { mean: 0.0, std_dev: 0.5 };
//! let a = Tensor::random(&[3, 3], &mut Sampler::seeded(dist, 42)?)?;
//! let b = Tensor::random(&[3, 3], &mut Sampler::seeded(dist, 42)?)?;
//! assert_eq!(a, b);
//!
//! let mut counter = 0.0;
//! let c = Tensor::random(&[3], &mut || { counter += 1.0; counter })?;
//! assert_eq!(c.to_vec(), [1.0, 2.0, 3.0]);
//! # Ok::<(), densr::error::Error>(())
//! ```

use crate::error::{Error, Result};
use rand::distr::Uniform;
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use rand_distr::Distribution as _;
use rand_distr::Normal;
use std::fmt;

/// A source of `f64` values, consumed one value per tensor element
pub trait RandomSource {
    /// Produce the next value
    fn sample(&mut self) -> f64;
}

impl<F: FnMut() -> f64> RandomSource for F {
    fn sample(&mut self) -> f64 {
        self()
    }
}

/// Probability distribution for [`Sampler`]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Distribution {
    /// Uniform over `[low, high)`
    Uniform {
        /// Inclusive lower bound
        low: f64,
        /// Exclusive upper bound
        high: f64,
    },
    /// Normal (Gaussian)
    Normal {
        /// Mean
        mean: f64,
        /// Standard deviation, `>= 0`
        std_dev: f64,
    },
}

impl Default for Distribution {
    /// Uniform over `[0, 1)`
    fn default() -> Self {
        Self::Uniform {
            low: 0.0,
            high: 1.0,
        }
    }
}

enum Law {
    Uniform(Uniform<f64>),
    Normal(Normal<f64>),
}

impl Distribution {
    fn law(self) -> Result<Law> {
        match self {
            Self::Uniform { low, high } => {
                Uniform::new(low, high).map(Law::Uniform).map_err(|err| {
                    Error::invalid_argument(
                        "distribution",
                        format!("uniform [{low}, {high}): {err}"),
                    )
                })
            }
            Self::Normal { mean, std_dev } => {
                // Normal::new accepts a negative std_dev (it mirrors the samples).
                if std_dev.is_nan() || std_dev < 0.0 {
                    return Err(Error::invalid_argument(
                        "distribution",
                        format!("normal(mean={mean}, std_dev={std_dev}): std_dev must be >= 0"),
                    ));
                }
                Normal::new(mean, std_dev).map(Law::Normal).map_err(|err| {
                    Error::invalid_argument(
                        "distribution",
                        format!("normal(mean={mean}, std_dev={std_dev}): {err}"),
                    )
                })
            }
        }
    }
}

/// An RNG paired with a validated distribution
pub struct Sampler<R> {
    rng: R,
    distribution: Distribution,
    law: Law,
}

impl<R: Rng> Sampler<R> {
    /// Pair `rng` with `distribution`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an empty or non-finite uniform range, or
    /// a negative or non-finite standard deviation.
    pub fn new(distribution: Distribution, rng: R) -> Result<Self> {
        Ok(Self {
            rng,
            distribution,
            law: distribution.law()?,
        })
    }

    /// The distribution this sampler draws from
    pub fn distribution(&self) -> Distribution {
        self.distribution
    }
}

impl Sampler<ThreadRng> {
    /// Sampler over the thread-local RNG
    pub fn thread(distribution: Distribution) -> Result<Self> {
        Self::new(distribution, rand::rng())
    }
}

impl Sampler<StdRng> {
    /// Deterministic sampler: equal seeds produce equal sequences
    pub fn seeded(distribution: Distribution, seed: u64) -> Result<Self> {
        Self::new(distribution, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for Sampler<R> {
    fn sample(&mut self) -> f64 {
        match &self.law {
            Law::Uniform(dist) => dist.sample(&mut self.rng),
            Law::Normal(dist) => dist.sample(&mut self.rng),
        }
    }
}

impl<R> fmt::Debug for Sampler<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sampler")
            .field("distribution", &self.distribution)
            .finish_non_exhaustive()
    }
}
