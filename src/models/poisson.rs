//! Poisson family: rate estimated as the sample mean.

use statrs::distribution::{Discrete, Poisson as PoissonDist};

use super::{DiscreteFamily, parameter_mismatch};
use crate::domain::{Family, FittedParameters, ObservedData};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, Default)]
pub struct Poisson;

impl DiscreteFamily for Poisson {
    fn family(&self) -> Family {
        Family::Poisson
    }

    /// λ = Σ k·f / Σ f, or 0 without observations.
    fn estimate(&self, data: &ObservedData) -> FittedParameters {
        FittedParameters::Poisson {
            lambda: data.mean().unwrap_or(0.0),
        }
    }

    fn pmf(&self, k: u64, params: &FittedParameters) -> Result<f64, AppError> {
        match params {
            FittedParameters::Poisson { lambda } => poisson_pmf(k, *lambda),
            other => Err(parameter_mismatch(Family::Poisson, other)),
        }
    }
}

/// Poisson pmf; `lambda = 0` is a point mass at 0.
pub fn poisson_pmf(k: u64, lambda: f64) -> Result<f64, AppError> {
    if !(lambda.is_finite() && lambda >= 0.0) {
        return Err(AppError::new(4, format!("Invalid Poisson rate: {lambda}")));
    }
    if lambda == 0.0 {
        return Ok(if k == 0 { 1.0 } else { 0.0 });
    }
    let dist = PoissonDist::new(lambda)
        .map_err(|e| AppError::new(4, format!("Poisson distribution error: {e}")))?;
    Ok(dist.pmf(k))
}
