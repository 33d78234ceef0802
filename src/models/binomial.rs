//! Binomial family.
//!
//! The number of trials is taken to be the largest observed value, and the
//! success probability follows from the sample mean: `p = mean / n`.

use statrs::distribution::{Binomial as BinomialDist, Discrete};

use super::{DiscreteFamily, clamp_probability, parameter_mismatch};
use crate::domain::{Family, FittedParameters, ObservedData};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, Default)]
pub struct Binomial;

impl DiscreteFamily for Binomial {
    fn family(&self) -> Family {
        Family::Binomial
    }

    fn estimate(&self, data: &ObservedData) -> FittedParameters {
        let n = data.max_value().unwrap_or(0);
        let total = data.total();

        // n = 0 means every observation sat at 0: no trials, no successes.
        let p = if total > 0 && n > 0 {
            clamp_probability(data.weighted_sum() / (n as f64 * total as f64))
        } else {
            0.0
        };

        FittedParameters::Binomial { n, p }
    }

    fn pmf(&self, k: u64, params: &FittedParameters) -> Result<f64, AppError> {
        match params {
            FittedParameters::Binomial { n, p } => binomial_pmf(k, *n, *p),
            other => Err(parameter_mismatch(Family::Binomial, other)),
        }
    }
}

pub fn binomial_pmf(k: u64, n: u64, p: f64) -> Result<f64, AppError> {
    let dist = BinomialDist::new(p, n)
        .map_err(|e| AppError::new(4, format!("Binomial distribution error (n={n}, p={p}): {e}")))?;
    Ok(dist.pmf(k))
}
