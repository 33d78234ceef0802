//! Category merging for chi-squared validity.
//!
//! Keys are visited in descending value order. Expected and observed counts
//! accumulate until the running expected frequency reaches
//! [`MIN_EXPECTED_FREQUENCY`], at which point the accumulated run is emitted as
//! one category. Whatever is left after the smallest value is emitted as a
//! final category even if it falls short, so excess mass collects at the low
//! end of the support.
//!
//! Example (threshold 5):
//!
//! ```text
//! k:        0     1     2     3
//! expected: 13.6  17.7  11.5  4.99
//! merged:   "0"   "1"   "2-3"
//! ```

use crate::domain::{Category, CategoryKey, FrequencyRow, FrequencyTable};

/// Minimum expected frequency per merged category.
pub const MIN_EXPECTED_FREQUENCY: f64 = 5.0;

/// Merge adjacent categories, highest values first.
///
/// Rows in the result appear in emission order (highest category first).
/// Observed and expected totals are preserved exactly.
pub fn merge_categories(table: &FrequencyTable) -> FrequencyTable {
    let mut ordered: Vec<&Category> = table.iter().collect();
    ordered.sort_by(|a, b| b.key.low().cmp(&a.key.low()));

    let mut merged = FrequencyTable::new();
    let mut label: Option<CategoryKey> = None;
    let mut acc = FrequencyRow::default();

    for category in ordered {
        acc.expected += category.row.expected;
        acc.observed += category.row.observed;

        match label.as_mut() {
            Some(key) => {
                for &v in category.key.values().iter().rev() {
                    key.prepend(v);
                }
            }
            None => label = Some(category.key.clone()),
        }

        if acc.expected >= MIN_EXPECTED_FREQUENCY {
            if let Some(key) = label.take() {
                merged.push(key, acc);
            }
            acc = FrequencyRow::default();
        }
    }

    // Low tail that never reached the threshold.
    if let Some(key) = label {
        merged.push(key, acc);
    }

    merged
}
