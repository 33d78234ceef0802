//! Expected-frequency tables.
//!
//! One row per distinct observed value, in ascending value order:
//! `expected = pmf(k) * N`, `observed = f(k)`. Values recorded with zero
//! frequency are kept.

use crate::domain::{CategoryKey, FittedParameters, FrequencyRow, FrequencyTable, ObservedData};
use crate::error::AppError;
use crate::models::DiscreteFamily;

/// Build the pre-merge table for `model` under `params`.
pub fn expected_frequency_table(
    data: &ObservedData,
    model: &dyn DiscreteFamily,
    params: &FittedParameters,
) -> Result<FrequencyTable, AppError> {
    let total = data.total() as f64;
    let mut table = FrequencyTable::new();

    for (k, observed) in data.iter() {
        let probability = model.pmf(k, params)?;
        if !probability.is_finite() {
            return Err(AppError::new(
                4,
                format!(
                    "Non-finite probability at k={k} for {}.",
                    model.family().display_name()
                ),
            ));
        }
        table.push(
            CategoryKey::single(k),
            FrequencyRow {
                expected: probability * total,
                observed,
            },
        );
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Family;
    use crate::models::model_for;

    fn row(table: &FrequencyTable, k: u64) -> &FrequencyRow {
        let key = CategoryKey::single(k);
        &table.iter().find(|c| c.key == key).unwrap().row
    }

    fn example() -> ObservedData {
        [(0, 10), (1, 20), (2, 15), (3, 5)].into_iter().collect()
    }

    #[test]
    fn one_row_per_observed_value_in_ascending_order() {
        let data = example();
        let model = model_for(Family::Poisson);
        let params = model.estimate(&data);
        let table = expected_frequency_table(&data, model, &params).unwrap();

        let keys: Vec<String> = table.iter().map(|c| c.key.to_string()).collect();
        assert_eq!(keys, vec!["0", "1", "2", "3"]);
        assert_eq!(table.total_observed(), 50);

        let lambda: f64 = 1.3;
        let expected_k0 = (-lambda).exp() * 50.0;
        let row = row(&table, 0);
        assert!((row.expected - expected_k0).abs() < 1e-9);
        assert_eq!(row.observed, 10);
    }

    #[test]
    fn uniform_rows_share_expected_frequency() {
        let data = example();
        let model = model_for(Family::Uniform);
        let params = model.estimate(&data);
        let table = expected_frequency_table(&data, model, &params).unwrap();

        for category in table.iter() {
            assert!((category.row.expected - 12.5).abs() < 1e-12);
        }
    }

    #[test]
    fn zero_count_values_are_kept() {
        let data: ObservedData = [(1, 6), (2, 0), (4, 3)].into_iter().collect();
        for family in Family::ALL {
            let model = model_for(family);
            let params = model.estimate(&data);
            let table = expected_frequency_table(&data, model, &params).unwrap();
            assert_eq!(table.len(), 3, "{family}");
            assert_eq!(row(&table, 2).observed, 0);
        }
    }
}
