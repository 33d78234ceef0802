//! Observed-data ingest and validation.
//!
//! This module turns user input into an `ObservedData` table:
//!
//! - **Frequency CSV**: `value,frequency` columns (`count` / `freq` accepted)
//! - **Raw CSV**: a single `value` column, one observation per row, tallied here
//! - **Inline**: `value:frequency` pairs separated by commas, e.g. `0:10,1:20`
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Separation of concerns**: no fitting logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;

use crate::domain::ObservedData;
use crate::error::AppError;

/// Where observed data comes from.
#[derive(Debug, Clone)]
pub enum InputSource {
    File(PathBuf),
    Inline(String),
}

/// How the rows were interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputLayout {
    Frequencies,
    RawValues,
    Inline,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: observed table + row diagnostics.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub data: ObservedData,
    pub layout: InputLayout,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

pub fn load_observed(source: &InputSource) -> Result<IngestedData, AppError> {
    match source {
        InputSource::File(path) => load_observed_csv(path),
        InputSource::Inline(text) => parse_inline(text),
    }
}

/// Load observed data from a CSV file.
pub fn load_observed_csv(path: &Path) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_observed_csv(file)
}

/// Read observed data from any CSV source with a header row.
pub fn read_observed_csv<R: Read>(reader: R) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let value_idx = *header_map
        .get("value")
        .ok_or_else(|| AppError::new(2, "Missing required column: `value`"))?;
    let frequency_idx = ["frequency", "count", "freq"]
        .iter()
        .find_map(|name| header_map.get(*name).copied());
    let layout = if frequency_idx.is_some() {
        InputLayout::Frequencies
    } else {
        InputLayout::RawValues
    };

    let mut data = ObservedData::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_used = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: records start after the header line, lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, value_idx, frequency_idx) {
            Ok((value, frequency)) => {
                data.add(value, frequency)
                    .map_err(|e| AppError::new(2, format!("Line {line}: {e}")))?;
                rows_used += 1;
            }
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    Ok(IngestedData {
        data,
        layout,
        row_errors,
        rows_read,
        rows_used,
    })
}

/// Parse `value:frequency` pairs separated by commas (whitespace ignored).
///
/// Any malformed pair fails the whole input; inline data is typed by hand.
pub fn parse_inline(text: &str) -> Result<IngestedData, AppError> {
    let mut data = ObservedData::new();
    let mut rows_used = 0usize;

    for pair in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (value, frequency) = pair.split_once(':').ok_or_else(|| {
            AppError::new(2, format!("Inline data entry `{pair}` is not `value:frequency`."))
        })?;
        let value = parse_count(value, "value").map_err(|e| AppError::new(2, e))?;
        let frequency = parse_count(frequency, "frequency").map_err(|e| AppError::new(2, e))?;
        data.add(value, frequency)?;
        rows_used += 1;
    }

    Ok(IngestedData {
        data,
        layout: InputLayout::Inline,
        row_errors: Vec::new(),
        rows_read: rows_used,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports may prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_row(
    record: &StringRecord,
    value_idx: usize,
    frequency_idx: Option<usize>,
) -> Result<(u64, u64), String> {
    let value = record
        .get(value_idx)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "Missing `value`.".to_string())?;
    let value = parse_count(value, "value")?;

    let frequency = match frequency_idx {
        Some(idx) => {
            let raw = record
                .get(idx)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| "Missing `frequency`.".to_string())?;
            parse_count(raw, "frequency")?
        }
        None => 1,
    };

    Ok((value, frequency))
}

/// Parse a non-negative integer, also accepting integral decimals like `3.0`.
fn parse_count(raw: &str, field: &str) -> Result<u64, String> {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<u64>() {
        return Ok(v);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v < 0.0 => Err(format!("Negative `{field}`: {raw}")),
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v <= u64::MAX as f64 => Ok(v as u64),
        Ok(_) => Err(format!("Non-integer `{field}`: {raw}")),
        Err(_) => Err(format!("Invalid `{field}`: {raw}")),
    }
}
