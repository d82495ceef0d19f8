//! Input uncertainty distributions
//!
//! A tagged union of the distribution families the Monte Carlo input sweep
//! supports. Malformed specs (negative spread, inverted support) are caught
//! at construction via [`Distribution::validated`], never at sampling time.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rng::RngManager;

/// Errors raised when validating a distribution spec.
#[derive(Debug, Error, PartialEq)]
pub enum DistributionError {
    #[error("std_dev cannot be negative (got {0})")]
    NegativeStd(f64),

    #[error("support is empty: low {low} exceeds high {high}")]
    EmptySupport { low: f64, high: f64 },

    #[error("mode {mode} lies outside support [{low}, {high}]")]
    ModeOutsideSupport { low: f64, mode: f64, high: f64 },
}

/// Distribution spec for one uncertain model input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Distribution {
    Normal { mean: f64, std_dev: f64 },
    Uniform { low: f64, high: f64 },
    Triangular { low: f64, mode: f64, high: f64 },
}

impl Distribution {
    /// Validate the spec, returning it unchanged on success.
    ///
    /// # Errors
    ///
    /// Returns `DistributionError` for a negative std dev, an inverted
    /// support, or a triangular mode outside its support.
    pub fn validated(self) -> Result<Self, DistributionError> {
        match self {
            Self::Normal { std_dev, .. } => {
                if std_dev < 0.0 {
                    return Err(DistributionError::NegativeStd(std_dev));
                }
            }
            Self::Uniform { low, high } => {
                if low > high {
                    return Err(DistributionError::EmptySupport { low, high });
                }
            }
            Self::Triangular { low, mode, high } => {
                if low > high {
                    return Err(DistributionError::EmptySupport { low, high });
                }
                if mode < low || mode > high {
                    return Err(DistributionError::ModeOutsideSupport { low, mode, high });
                }
            }
        }
        Ok(self)
    }

    /// Draw one value.
    pub fn sample(&self, rng: &mut RngManager) -> f64 {
        match *self {
            Self::Normal { mean, std_dev } => rng.normal(mean, std_dev),
            Self::Uniform { low, high } => rng.uniform(low, high),
            Self::Triangular { low, mode, high } => rng.triangular(low, mode, high),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_std() {
        let dist = Distribution::Normal { mean: 0.0, std_dev: -1.0 };
        assert_eq!(dist.validated(), Err(DistributionError::NegativeStd(-1.0)));
    }

    #[test]
    fn rejects_inverted_support() {
        let dist = Distribution::Uniform { low: 2.0, high: 1.0 };
        assert!(matches!(
            dist.validated(),
            Err(DistributionError::EmptySupport { .. })
        ));
    }

    #[test]
    fn rejects_mode_outside_support() {
        let dist = Distribution::Triangular { low: 0.0, mode: 3.0, high: 2.0 };
        assert!(matches!(
            dist.validated(),
            Err(DistributionError::ModeOutsideSupport { .. })
        ));
    }

    #[test]
    fn uniform_samples_stay_in_support() {
        let dist = Distribution::Uniform { low: 0.05, high: 0.09 }.validated().unwrap();
        let mut rng = RngManager::new(7);
        for _ in 0..1000 {
            let x = dist.sample(&mut rng);
            assert!((0.05..0.09).contains(&x));
        }
    }

    #[test]
    fn normal_sample_mean_near_analytic_mean() {
        let dist = Distribution::Normal { mean: 49.0, std_dev: 7.35 };
        let mut rng = RngManager::new(11);
        let n = 20_000;
        let mean = (0..n).map(|_| dist.sample(&mut rng)).sum::<f64>() / n as f64;
        assert!((mean - 49.0).abs() < 0.25, "sample mean {mean}");
    }
}
