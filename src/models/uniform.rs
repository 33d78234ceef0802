//! Discrete uniform family over the observed support.

use super::{DiscreteFamily, parameter_mismatch};
use crate::domain::{Family, FittedParameters, ObservedData};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, Default)]
pub struct Uniform;

impl DiscreteFamily for Uniform {
    fn family(&self) -> Family {
        Family::Uniform
    }

    /// Equal mass on each distinct observed value, not on a declared range.
    fn estimate(&self, data: &ObservedData) -> FittedParameters {
        let support: Vec<u64> = data.values().collect();
        let p = if support.is_empty() {
            0.0
        } else {
            1.0 / support.len() as f64
        };
        FittedParameters::Uniform { p, support }
    }

    fn pmf(&self, k: u64, params: &FittedParameters) -> Result<f64, AppError> {
        match params {
            FittedParameters::Uniform { p, support } => {
                if !p.is_finite() {
                    return Err(AppError::new(4, format!("Invalid uniform probability: {p}")));
                }
                Ok(if support.binary_search(&k).is_ok() { *p } else { 0.0 })
            }
            other => Err(parameter_mismatch(Family::Uniform, other)),
        }
    }
}
