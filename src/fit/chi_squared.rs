//! Pearson chi-squared statistic over a merged table.

use crate::domain::FrequencyTable;

/// χ² = Σ (O − E)² / E over the table's categories.
///
/// Categories with zero expected frequency contribute nothing. The result is
/// never `-0.0` (a float `sum` of no terms is).
pub fn chi_squared_statistic(table: &FrequencyTable) -> f64 {
    table
        .iter()
        .filter(|c| c.row.expected > 0.0)
        .map(|c| {
            let diff = c.row.observed as f64 - c.row.expected;
            diff * diff / c.row.expected
        })
        .fold(0.0, |acc, term| acc + term)
}
