//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - rendered as terminal tables
//! - exported as JSON for scripting

use std::collections::BTreeMap;
use std::fmt;

use clap::ValueEnum;
use serde::{Serialize, Serializer};

use crate::error::AppError;

/// Observed frequency per random-variable value.
///
/// Keys are unique and iterate in ascending order, which fixes the row order
/// of every table derived from the data. The total count is kept alongside
/// and never exceeds `u64::MAX`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ObservedData {
    counts: BTreeMap<u64, u64>,
    #[serde(skip)]
    total: u64,
}

impl ObservedData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `frequency` observations of `value`, accumulating repeated keys.
    ///
    /// Fails (exit code 2) if the total number of observations would overflow;
    /// the table is left unchanged in that case.
    pub fn add(&mut self, value: u64, frequency: u64) -> Result<(), AppError> {
        let total = self.total.checked_add(frequency).ok_or_else(|| {
            AppError::new(
                2,
                format!("Total frequency overflows at value {value} (+{frequency})."),
            )
        })?;
        // Per-key counts never exceed the total, so this cannot overflow.
        *self.counts.entry(value).or_insert(0) += frequency;
        self.total = total;
        Ok(())
    }

    /// Observed frequency of `value` (0 when the value was never recorded).
    pub fn frequency(&self, value: u64) -> u64 {
        self.counts.get(&value).copied().unwrap_or(0)
    }

    /// `(value, frequency)` pairs in ascending value order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.counts.iter().map(|(&k, &f)| (k, f))
    }

    /// Distinct observed values in ascending order.
    pub fn values(&self) -> impl Iterator<Item = u64> + '_ {
        self.counts.keys().copied()
    }

    /// Number of distinct values (including values recorded with frequency 0).
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of observations, Σ frequency.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Σ value·frequency, accumulated in `f64` to stay clear of integer overflow.
    pub fn weighted_sum(&self) -> f64 {
        self.counts
            .iter()
            .map(|(&k, &f)| k as f64 * f as f64)
            .sum()
    }

    pub fn max_value(&self) -> Option<u64> {
        self.counts.keys().next_back().copied()
    }

    /// Sample mean, or `None` when there are no observations.
    pub fn mean(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.weighted_sum() / self.total as f64)
    }
}

#[cfg(test)]
impl FromIterator<(u64, u64)> for ObservedData {
    fn from_iter<I: IntoIterator<Item = (u64, u64)>>(iter: I) -> Self {
        let mut data = ObservedData::new();
        for (value, frequency) in iter {
            data.add(value, frequency).expect("test data fits in u64");
        }
        data
    }
}

/// Candidate discrete family.
///
/// The declaration order is the enumeration order used to break ties between
/// equal statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Poisson,
    Binomial,
    Geometric,
    Uniform,
}

impl Family {
    pub const ALL: [Family; 4] = [
        Family::Poisson,
        Family::Binomial,
        Family::Geometric,
        Family::Uniform,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Family::Poisson => "Poisson Distribution",
            Family::Binomial => "Binomial Distribution",
            Family::Geometric => "Geometric Distribution",
            Family::Uniform => "Uniform Distribution",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Parameters estimated for one family by method-of-moments.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum FittedParameters {
    Poisson {
        lambda: f64,
    },
    /// `n` is the largest observed value.
    Binomial {
        n: u64,
        p: f64,
    },
    /// Support is `{1, 2, 3, ...}`.
    Geometric {
        p: f64,
    },
    /// Equal mass `p` on each observed value in `support` (ascending).
    Uniform {
        p: f64,
        support: Vec<u64>,
    },
}

impl FittedParameters {
    pub fn family(&self) -> Family {
        match self {
            FittedParameters::Poisson { .. } => Family::Poisson,
            FittedParameters::Binomial { .. } => Family::Binomial,
            FittedParameters::Geometric { .. } => Family::Geometric,
            FittedParameters::Uniform { .. } => Family::Uniform,
        }
    }

    /// Compact parameter summary, e.g. `lambda=1.300000`.
    pub fn summary(&self) -> String {
        match self {
            FittedParameters::Poisson { lambda } => format!("lambda={lambda:.6}"),
            FittedParameters::Binomial { n, p } => format!("n={n}, p={p:.6}"),
            FittedParameters::Geometric { p } => format!("p={p:.6}"),
            FittedParameters::Uniform { p, support } => {
                format!("p={p:.6}, support={}", support.len())
            }
        }
    }
}

/// Expected and observed frequency of one category.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FrequencyRow {
    pub expected: f64,
    pub observed: u64,
}

/// Key of a table row: a single value, or a contiguous run of merged values.
///
/// Values are kept ascending; the label joins them with `-` (e.g. `2-3-4`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryKey {
    values: Vec<u64>,
}

impl CategoryKey {
    pub fn single(value: u64) -> Self {
        Self {
            values: vec![value],
        }
    }

    /// Extend the run downwards with a smaller value.
    pub fn prepend(&mut self, value: u64) {
        self.values.insert(0, value);
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn low(&self) -> Option<u64> {
        self.values.first().copied()
    }

    pub fn is_merged(&self) -> bool {
        self.values.len() > 1
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

impl Serialize for CategoryKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One labelled row of a frequency table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub key: CategoryKey,
    #[serde(flatten)]
    pub row: FrequencyRow,
}

/// Ordered category table (insertion order is preserved).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    rows: Vec<Category>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: CategoryKey, row: FrequencyRow) {
        self.rows.push(Category { key, row });
    }

    pub fn rows(&self) -> &[Category] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_observed(&self) -> u64 {
        self.rows.iter().map(|c| c.row.observed).sum()
    }

    pub fn total_expected(&self) -> f64 {
        self.rows.iter().map(|c| c.row.expected).sum()
    }
}

/// Complete pipeline output for one family.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyFit {
    pub family: Family,
    pub parameters: FittedParameters,
    /// One row per observed value, ascending.
    pub table: FrequencyTable,
    /// Rows after merging, in emission order (highest values first).
    pub merged: FrequencyTable,
    pub statistic: f64,
}

/// Output format for the `fit` / `rank` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Candidate families (normalized to enumeration order when fitting).
    pub families: Vec<Family>,
    pub format: OutputFormat,
    /// Include the pre-merge table of every family in text output.
    pub show_raw: bool,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observed_data_accumulates_and_summarizes() {
        let data: ObservedData = [(3, 5), (0, 10), (1, 20), (2, 15), (3, 0)]
            .into_iter()
            .collect();

        assert_eq!(data.len(), 4);
        assert_eq!(data.total(), 50);
        assert_eq!(data.max_value(), Some(3));
        assert_eq!(data.values().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert!((data.weighted_sum() - 65.0).abs() < 1e-12);
        assert!((data.mean().unwrap() - 1.3).abs() < 1e-12);
    }

    #[test]
    fn mean_is_none_without_observations() {
        let data: ObservedData = [(4, 0)].into_iter().collect();
        assert!(!data.is_empty());
        assert_eq!(data.total(), 0);
        assert!(data.mean().is_none());
    }

    #[test]
    fn add_refuses_to_overflow_the_total() {
        let mut data = ObservedData::new();
        data.add(0, u64::MAX).unwrap();

        let err = data.add(1, 1).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(data.add(0, 1).is_err());

        assert_eq!(data.total(), u64::MAX);
        assert_eq!(data.len(), 1);
        assert_eq!(data.frequency(1), 0);
        data.add(1, 0).unwrap();
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn serializes_counts_only() {
        let data: ObservedData = [(1, 2)].into_iter().collect();
        assert_eq!(serde_json::to_string(&data).unwrap(), r#"{"1":2}"#);
    }

    #[test]
    fn category_key_label_is_ascending() {
        let mut key = CategoryKey::single(4);
        key.prepend(3);
        key.prepend(2);
        assert_eq!(key.to_string(), "2-3-4");
        assert_eq!(key.low(), Some(2));
        assert_eq!(key.values(), &[2, 3, 4]);
        assert!(key.is_merged());
        assert!(!CategoryKey::single(7).is_merged());
    }

    #[test]
    fn category_serializes_label_and_row() {
        let mut table = FrequencyTable::new();
        table.push(
            CategoryKey::single(1),
            FrequencyRow {
                expected: 2.5,
                observed: 3,
            },
        );
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json[0]["key"], "1");
        assert_eq!(json[0]["expected"], 2.5);
        assert_eq!(json[0]["observed"], 3);
    }
}
