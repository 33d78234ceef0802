//! Discrete family implementations.
//!
//! Each family exposes the same two primitive operations so the fitting
//! pipeline can stay generic:
//! - estimate parameters from observed data (method-of-moments)
//! - evaluate the probability mass function at a value
//!
//! Families are small unit structs behind the [`DiscreteFamily`] trait;
//! [`model_for`] maps the closed [`Family`] enum onto them.

pub mod binomial;
pub mod geometric;
pub mod poisson;
pub mod uniform;

pub use binomial::Binomial;
pub use geometric::Geometric;
pub use poisson::Poisson;
pub use uniform::Uniform;

use crate::domain::{Family, FittedParameters, ObservedData};
use crate::error::AppError;

/// Parameter estimation and probability mass for one discrete family.
pub trait DiscreteFamily: Sync {
    fn family(&self) -> Family;

    /// Method-of-moments parameters. Degenerate data yields fallback values
    /// (zero rates or probabilities), never an error.
    fn estimate(&self, data: &ObservedData) -> FittedParameters;

    /// `P(X = k)` under `params`.
    ///
    /// Fails only if `params` belongs to another family or holds a non-finite
    /// value.
    fn pmf(&self, k: u64, params: &FittedParameters) -> Result<f64, AppError>;
}

/// The model implementing `family`.
pub fn model_for(family: Family) -> &'static dyn DiscreteFamily {
    match family {
        Family::Poisson => &Poisson,
        Family::Binomial => &Binomial,
        Family::Geometric => &Geometric,
        Family::Uniform => &Uniform,
    }
}

pub(crate) fn parameter_mismatch(expected: Family, params: &FittedParameters) -> AppError {
    AppError::new(
        4,
        format!(
            "{} pmf called with {} parameters.",
            expected.display_name(),
            params.family().display_name()
        ),
    )
}

/// Clamp a probability estimate into `[0, 1]`; non-finite inputs become 0.
pub(crate) fn clamp_probability(p: f64) -> f64 {
    if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 }
}
