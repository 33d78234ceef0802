//! Geometric family on `{1, 2, 3, ...}` (trials up to and including the first success).

use super::{DiscreteFamily, clamp_probability, parameter_mismatch};
use crate::domain::{Family, FittedParameters, ObservedData};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, Default)]
pub struct Geometric;

impl DiscreteFamily for Geometric {
    fn family(&self) -> Family {
        Family::Geometric
    }

    /// `p = 1 / mean`, clamped to `[0, 1]`; 0 when the mean is not positive.
    ///
    /// A mean below 1 would put `p` above 1, so it saturates at a point mass on 1.
    fn estimate(&self, data: &ObservedData) -> FittedParameters {
        let p = match data.mean() {
            Some(mean) if mean > 0.0 => clamp_probability(1.0 / mean),
            _ => 0.0,
        };
        FittedParameters::Geometric { p }
    }

    fn pmf(&self, k: u64, params: &FittedParameters) -> Result<f64, AppError> {
        match params {
            FittedParameters::Geometric { p } => geometric_pmf(k, *p),
            other => Err(parameter_mismatch(Family::Geometric, other)),
        }
    }
}

/// Geometric pmf `p (1 - p)^(k - 1)`; 0 at `k = 0` and everywhere when `p = 0`.
///
/// Evaluated in log space over the full `u64` range of `k`.
pub fn geometric_pmf(k: u64, p: f64) -> Result<f64, AppError> {
    if !(p.is_finite() && (0.0..=1.0).contains(&p)) {
        return Err(AppError::new(4, format!("Invalid geometric probability: {p}")));
    }
    if k == 0 || p == 0.0 {
        return Ok(0.0);
    }
    if p == 1.0 {
        return Ok(if k == 1 { 1.0 } else { 0.0 });
    }
    let failures = (k - 1) as f64;
    Ok(p * (failures * (-p).ln_1p()).exp())
}
