//! Machine-readable outputs.
//!
//! - full analysis as pretty JSON (every family's parameters, tables, statistic)
//! - observed tables as `value,frequency` CSV (used by `distfit sample`)

use std::io::Write;

use serde::Serialize;

use crate::domain::{Family, FamilyFit, ObservedData};
use crate::error::AppError;
use crate::fit::selection::FitSelection;

/// JSON document describing one analysis.
#[derive(Debug, Serialize)]
pub struct AnalysisReport<'a> {
    pub total_observations: u64,
    pub distinct_values: usize,
    pub observed: &'a ObservedData,
    pub fits: Vec<FitEntry<'a>>,
    /// Families by ascending statistic.
    pub ranking: Vec<Family>,
    pub best: Family,
}

#[derive(Debug, Serialize)]
pub struct FitEntry<'a> {
    #[serde(flatten)]
    pub fit: &'a FamilyFit,
    pub categories: usize,
}

impl<'a> AnalysisReport<'a> {
    pub fn new(data: &'a ObservedData, selection: &'a FitSelection) -> Self {
        Self {
            total_observations: data.total(),
            distinct_values: data.len(),
            observed: data,
            fits: selection
                .fits
                .iter()
                .map(|fit| FitEntry {
                    fit,
                    categories: fit.merged.len(),
                })
                .collect(),
            ranking: selection.ranking().iter().map(|f| f.family).collect(),
            best: selection.best_fit().family,
        }
    }
}

/// Render the analysis as pretty JSON.
pub fn analysis_json(data: &ObservedData, selection: &FitSelection) -> Result<String, AppError> {
    serde_json::to_string_pretty(&AnalysisReport::new(data, selection))
        .map_err(|e| AppError::new(4, format!("Failed to serialize analysis JSON: {e}")))
}

/// Write an observed table as `value,frequency` CSV.
pub fn write_observed_csv<W: Write>(writer: W, data: &ObservedData) -> Result<(), AppError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["value", "frequency"])
        .map_err(|e| AppError::new(2, format!("Failed to write CSV header: {e}")))?;
    for (value, frequency) in data.iter() {
        out.write_record([value.to_string(), frequency.to_string()])
            .map_err(|e| AppError::new(2, format!("Failed to write CSV row: {e}")))?;
    }
    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush CSV output: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::selection::fit_and_select;
    use crate::io::ingest::read_observed_csv;

    fn example() -> ObservedData {
        [(0, 10), (1, 20), (2, 15), (3, 5)].into_iter().collect()
    }

    #[test]
    fn json_contains_every_family_and_the_winner() {
        let data = example();
        let selection = fit_and_select(&data, &Family::ALL).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&analysis_json(&data, &selection).unwrap()).unwrap();

        assert_eq!(json["total_observations"], 50);
        assert_eq!(json["observed"]["1"], 20);
        assert_eq!(json["fits"].as_array().unwrap().len(), 4);
        assert_eq!(json["fits"][0]["family"], "poisson");
        assert_eq!(json["fits"][0]["parameters"]["family"], "poisson");
        assert_eq!(json["fits"][0]["merged"][0]["key"], "2-3");
        assert_eq!(json["fits"][0]["categories"], 3);
        assert_eq!(json["ranking"].as_array().unwrap().len(), 4);
        assert_eq!(json["best"], json["ranking"][0]);
    }

    #[test]
    fn observed_csv_reads_back() {
        let data = example();
        let mut buf = Vec::new();
        write_observed_csv(&mut buf, &data).unwrap();

        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("value,frequency\n0,10\n"));
        assert_eq!(read_observed_csv(buf.as_slice()).unwrap().data, data);
    }
}
