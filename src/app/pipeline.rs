//! Shared analysis pipeline used by the `fit` and `rank` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> empty-input guard -> per-family fit -> selection
//!
//! The commands can then focus on presentation (tables, rankings, JSON).

use crate::domain::AnalysisConfig;
use crate::error::AppError;
use crate::fit::selection::{FitSelection, fit_and_select};
use crate::io::ingest::IngestedData;

/// All computed outputs of a single analysis.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub selection: FitSelection,
}

/// Run the analysis on already-ingested data.
///
/// Zero total observations short-circuit with [`AppError::empty_input`] before
/// any family is fitted.
pub fn analyze(ingest: IngestedData, config: &AnalysisConfig) -> Result<RunOutput, AppError> {
    if ingest.data.total() == 0 {
        return Err(AppError::empty_input());
    }

    let selection = fit_and_select(&ingest.data, &config.families)?;
    Ok(RunOutput { ingest, selection })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Family, OutputFormat};
    use crate::io::ingest::{InputSource, load_observed};

    fn config(families: &[Family]) -> AnalysisConfig {
        AnalysisConfig {
            families: families.to_vec(),
            format: OutputFormat::Text,
            show_raw: false,
            plot: false,
            plot_width: 60,
            plot_height: 15,
        }
    }

    fn run(source: &InputSource, config: &AnalysisConfig) -> Result<RunOutput, AppError> {
        analyze(load_observed(source)?, config)
    }

    #[test]
    fn example_observations_sum_for_every_family() {
        let source = InputSource::Inline("0:10,1:20,2:15,3:5".to_string());
        let run = run(&source, &config(&Family::ALL)).unwrap();

        assert_eq!(run.selection.fits.len(), 4);
        for fit in &run.selection.fits {
            assert_eq!(fit.merged.total_observed(), 50, "{}", fit.family);
            assert!(fit.statistic.is_finite() && fit.statistic >= 0.0);
        }
    }

    #[test]
    fn empty_input_short_circuits() {
        let source = InputSource::Inline(String::new());
        let err = run(&source, &config(&Family::ALL)).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.message(), "Not enough data to work on.");
    }

    #[test]
    fn family_subset_is_respected() {
        let source = InputSource::Inline("1:4,2:6,3:2".to_string());
        let run = run(&source, &config(&[Family::Geometric])).unwrap();
        assert_eq!(run.selection.fits.len(), 1);
        assert_eq!(run.selection.best_fit().family, Family::Geometric);
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let source = InputSource::File("does/not/exist.csv".into());
        let err = run(&source, &config(&Family::ALL)).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
