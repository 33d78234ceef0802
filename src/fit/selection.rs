//! Family selection by minimum chi-squared statistic.
//!
//! Each requested family runs the full pipeline independently:
//! estimate -> expected table -> merge -> statistic
//!
//! Families are evaluated in parallel, but results are kept in enumeration
//! order and the winner is the first minimal statistic in that order, so the
//! outcome never depends on scheduling.

use rayon::prelude::*;

use crate::domain::{Family, FamilyFit, ObservedData};
use crate::error::AppError;
use crate::fit::chi_squared::chi_squared_statistic;
use crate::fit::merge::merge_categories;
use crate::fit::table::expected_frequency_table;
use crate::models::model_for;

/// Output of fitting + selection.
#[derive(Debug, Clone)]
pub struct FitSelection {
    /// Index into `fits` of the selected family.
    pub best: usize,
    /// One fit per requested family, in enumeration order.
    pub fits: Vec<FamilyFit>,
}

impl FitSelection {
    pub fn best_fit(&self) -> &FamilyFit {
        &self.fits[self.best]
    }

    /// Fits ordered by ascending statistic; equal statistics keep enumeration order.
    pub fn ranking(&self) -> Vec<&FamilyFit> {
        let mut ranked: Vec<&FamilyFit> = self.fits.iter().collect();
        ranked.sort_by(|a, b| {
            a.statistic
                .partial_cmp(&b.statistic)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }
}

/// Run the pipeline for a single family.
pub fn fit_family(data: &ObservedData, family: Family) -> Result<FamilyFit, AppError> {
    let model = model_for(family);
    let parameters = model.estimate(data);
    let table = expected_frequency_table(data, model, &parameters)?;
    let merged = merge_categories(&table);
    let statistic = chi_squared_statistic(&merged);

    if !statistic.is_finite() {
        return Err(AppError::new(
            4,
            format!("Non-finite chi-squared statistic for {}.", family.display_name()),
        ));
    }

    Ok(FamilyFit {
        family,
        parameters,
        table,
        merged,
        statistic,
    })
}

/// Fit every requested family and select the lowest statistic.
///
/// `families` is normalized to enumeration order (duplicates dropped) before
/// fitting, which fixes the tie-break regardless of how it was supplied.
pub fn fit_and_select(data: &ObservedData, families: &[Family]) -> Result<FitSelection, AppError> {
    // Several estimators divide by the total; refuse before any of them run.
    if data.total() == 0 {
        return Err(AppError::empty_input());
    }

    let mut order = families.to_vec();
    order.sort();
    order.dedup();
    if order.is_empty() {
        return Err(AppError::new(2, "No candidate families selected."));
    }

    let fits: Vec<FamilyFit> = order
        .par_iter()
        .map(|&family| fit_family(data, family))
        .collect::<Result<Vec<_>, AppError>>()?;

    let best = select_min(&fits);
    Ok(FitSelection { best, fits })
}

/// Index of the first minimal statistic.
fn select_min(fits: &[FamilyFit]) -> usize {
    let mut best = 0;
    for (idx, f) in fits.iter().enumerate().skip(1) {
        if f.statistic < fits[best].statistic {
            best = idx;
        }
    }
    best
}
