//! Synthetic observed data drawn from a known family.
//!
//! Draws are seeded, so the same spec always yields the same table. Geometric
//! draws are shifted onto `{1, 2, ...}` to match the fitted family's support.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::{Binomial, Geometric, Poisson};

use crate::domain::{Family, ObservedData};
use crate::error::AppError;

/// What to draw, and how many.
#[derive(Debug, Clone)]
pub struct SampleSpec {
    pub family: Family,
    pub count: usize,
    pub seed: u64,
    /// Poisson rate.
    pub lambda: f64,
    /// Binomial trial count.
    pub trials: u64,
    /// Binomial / geometric success probability.
    pub p: f64,
    /// Inclusive uniform range.
    pub low: u64,
    pub high: u64,
}

pub fn generate_sample(spec: &SampleSpec) -> Result<ObservedData, AppError> {
    if spec.count == 0 {
        return Err(AppError::new(2, "Sample count must be > 0."));
    }

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let mut data = ObservedData::new();

    match spec.family {
        Family::Poisson => {
            if !(spec.lambda.is_finite() && spec.lambda > 0.0) {
                return Err(AppError::new(2, "Poisson rate must be > 0."));
            }
            let dist = Poisson::new(spec.lambda)
                .map_err(|e| AppError::new(2, format!("Poisson sampler error: {e}")))?;
            for _ in 0..spec.count {
                let x: f64 = dist.sample(&mut rng);
                data.add(x as u64, 1)?;
            }
        }
        Family::Binomial => {
            let dist = Binomial::new(spec.trials, spec.p)
                .map_err(|e| AppError::new(2, format!("Binomial sampler error: {e}")))?;
            for _ in 0..spec.count {
                data.add(dist.sample(&mut rng), 1)?;
            }
        }
        Family::Geometric => {
            if !(spec.p > 0.0 && spec.p <= 1.0) {
                return Err(AppError::new(2, "Geometric probability must be in (0, 1]."));
            }
            let dist = Geometric::new(spec.p)
                .map_err(|e| AppError::new(2, format!("Geometric sampler error: {e}")))?;
            for _ in 0..spec.count {
                // Failures before the first success -> trials including it.
                data.add(dist.sample(&mut rng).saturating_add(1), 1)?;
            }
        }
        Family::Uniform => {
            if spec.low > spec.high {
                return Err(AppError::new(2, "Uniform range requires low <= high."));
            }
            for _ in 0..spec.count {
                data.add(rng.gen_range(spec.low..=spec.high), 1)?;
            }
        }
    }

    Ok(data)
}
