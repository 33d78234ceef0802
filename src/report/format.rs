//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the fitting code stays clean and testable
//! - output changes are localized

use crate::domain::{AnalysisConfig, FamilyFit, FrequencyTable};
use crate::fit::selection::FitSelection;
use crate::io::ingest::{IngestedData, InputLayout, RowError};

/// Maximum number of row errors echoed before summarizing the rest.
const MAX_ROW_ERRORS_SHOWN: usize = 5;

/// Format the full run: dataset summary, then every family's merged table and
/// statistic, then the selected family.
pub fn format_run_summary(ingest: &IngestedData, selection: &FitSelection, config: &AnalysisConfig) -> String {
    let mut out = String::new();

    out.push_str("=== distfit - discrete goodness of fit ===\n");
    out.push_str(&format!(
        "Observations: n={} | distinct values={} | input={}\n",
        ingest.data.total(),
        ingest.data.len(),
        layout_label(ingest.layout),
    ));
    if let (Some(lo), Some(hi)) = (ingest.data.values().next(), ingest.data.max_value()) {
        out.push_str(&format!("Support: [{lo}, {hi}]\n"));
    }

    for fit in &selection.fits {
        out.push('\n');
        out.push_str(&format!("Analyzing data using {}\n", fit.family.display_name()));
        out.push_str(&format!("Parameters: {}\n", fit.parameters.summary()));
        if config.show_raw {
            out.push_str("Expected frequencies:\n");
            out.push_str(&format_table(&fit.table));
        }
        out.push_str("Merged categories:\n");
        out.push_str(&format_table(&fit.merged));
        out.push_str(&format!("Chi-squared: {:.6}\n", fit.statistic));
        out.push_str(&"_".repeat(68));
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&format_best(selection));
    out
}

/// Format the per-family statistics, lowest first.
pub fn format_rankings(selection: &FitSelection) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<4} {:<24} {:>14} {:>10}\n", "rank", "family", "chi_squared", "categories"));
    out.push_str(&format!("{:-<4} {:-<24} {:-<14} {:-<10}\n", "", "", "", ""));

    let best = selection.best_fit().family;
    for (i, fit) in selection.ranking().into_iter().enumerate() {
        let marker = if fit.family == best { "*" } else { "" };
        out.push_str(
            format!(
                "{:<4} {:<24} {:>14.6} {:>10} {marker}\n",
                i + 1,
                fit.family.display_name(),
                fit.statistic,
                fit.merged.len(),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&format_best(selection));
    out
}

/// Summarize ingest row errors (for stderr). Empty when there were none.
pub fn format_row_errors(ingest: &IngestedData) -> String {
    if ingest.row_errors.is_empty() {
        return String::new();
    }

    let mut out = format!(
        "Skipped {} of {} rows:\n",
        ingest.row_errors.len(),
        ingest.rows_read
    );
    for RowError { line, message } in ingest.row_errors.iter().take(MAX_ROW_ERRORS_SHOWN) {
        out.push_str(&format!("  line {line}: {message}\n"));
    }
    let hidden = ingest.row_errors.len().saturating_sub(MAX_ROW_ERRORS_SHOWN);
    if hidden > 0 {
        out.push_str(&format!("  ... and {hidden} more\n"));
    }
    out
}

fn format_best(selection: &FitSelection) -> String {
    let best: &FamilyFit = selection.best_fit();
    format!(
        "Distribution with the lowest test statistic:\n{} (chi-squared={:.6})\n",
        best.family.display_name(),
        best.statistic
    )
}

fn format_table(table: &FrequencyTable) -> String {
    let mut out = String::new();
    out.push_str(&format!("  {:<16} {:>14} {:>10}\n", "category", "expected", "observed"));
    out.push_str(&format!("  {:-<16} {:-<14} {:-<10}\n", "", "", ""));
    for c in table.iter() {
        out.push_str(&format!(
            "  {:<16} {:>14.4} {:>10}\n",
            truncate(&c.key.to_string(), 16),
            c.row.expected,
            c.row.observed
        ));
    }
    out.push_str(&format!(
        "  {:<16} {:>14.4} {:>10}\n",
        "total",
        table.total_expected(),
        table.total_observed()
    ));
    out
}

fn layout_label(layout: InputLayout) -> &'static str {
    match layout {
        InputLayout::Frequencies => "frequency table",
        InputLayout::RawValues => "raw values",
        InputLayout::Inline => "inline",
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Family, OutputFormat};
    use crate::fit::selection::fit_and_select;
    use crate::io::ingest::parse_inline;

    fn config(show_raw: bool) -> AnalysisConfig {
        AnalysisConfig {
            families: Family::ALL.to_vec(),
            format: OutputFormat::Text,
            show_raw,
            plot: false,
            plot_width: 40,
            plot_height: 12,
        }
    }

    #[test]
    fn summary_lists_every_family_and_the_winner() {
        let ingest = parse_inline("0:10,1:20,2:15,3:5").unwrap();
        let selection = fit_and_select(&ingest.data, &Family::ALL).unwrap();
        let text = format_run_summary(&ingest, &selection, &config(false));

        for family in Family::ALL {
            assert!(text.contains(&format!("Analyzing data using {}", family.display_name())));
        }
        assert!(text.contains("Observations: n=50"));
        assert!(text.contains("2-3"));
        assert!(!text.contains("Expected frequencies:"));
        assert!(text.ends_with(&format_best(&selection)));
    }

    #[test]
    fn raw_tables_are_optional() {
        let ingest = parse_inline("0:10,1:20,2:15,3:5").unwrap();
        let selection = fit_and_select(&ingest.data, &Family::ALL).unwrap();
        let text = format_run_summary(&ingest, &selection, &config(true));
        assert_eq!(text.matches("Expected frequencies:").count(), 4);
    }

    #[test]
    fn rankings_mark_the_winner_first() {
        let ingest = parse_inline("0:12").unwrap();
        let selection = fit_and_select(&ingest.data, &Family::ALL).unwrap();
        let text = format_rankings(&selection);

        let first_row = text.lines().nth(2).unwrap();
        assert!(first_row.starts_with("1"));
        assert!(first_row.contains("Poisson Distribution"));
        assert!(first_row.ends_with('*'));
        assert!(!text.contains("-0.000000"));
    }

    #[test]
    fn row_errors_are_truncated() {
        let mut ingest = parse_inline("1:1").unwrap();
        ingest.rows_read = 8;
        ingest.row_errors = (0..7)
            .map(|i| RowError {
                line: i + 2,
                message: "bad".to_string(),
            })
            .collect();

        let text = format_row_errors(&ingest);
        assert!(text.starts_with("Skipped 7 of 8 rows:"));
        assert!(text.contains("... and 2 more"));
        assert!(format_row_errors(&parse_inline("1:1").unwrap()).is_empty());
    }

    #[test]
    fn truncate_marks_cut_labels() {
        assert_eq!(truncate("0-1-2", 16), "0-1-2");
        assert_eq!(truncate("0-1-2-3-4-5-6-7-8", 8), "0-1-2-3.");
    }
}
