//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - reads observed data
//! - runs the per-family fit + selection
//! - prints reports/plots (or JSON)
//! - generates synthetic samples

use std::io;

use clap::Parser;

use crate::cli::{Command, FitArgs, SampleArgs};
use crate::data::sample::{SampleSpec, generate_sample};
use crate::domain::{AnalysisConfig, OutputFormat};
use crate::error::AppError;
use crate::io::ingest::InputSource;

pub mod pipeline;

/// Entry point for the `distfit` binary.
pub fn run() -> Result<(), AppError> {
    // Environment fallbacks for flags (e.g. DISTFIT_FORMAT) may live in `.env`;
    // a missing file is fine.
    dotenvy::dotenv().ok();
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args, OutputMode::Full),
        Command::Rank(args) => handle_fit(args, OutputMode::RankOnly),
        Command::Sample(args) => handle_sample(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    RankOnly,
}

fn handle_fit(args: FitArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = config_from_args(&args);
    let source = source_from_args(&args)?;

    let ingest = crate::io::ingest::load_observed(&source)?;
    let row_errors = crate::report::format_row_errors(&ingest);
    if !row_errors.is_empty() {
        eprint!("{row_errors}");
    }

    let run = pipeline::analyze(ingest, &config)?;

    if config.format == OutputFormat::Json {
        println!(
            "{}",
            crate::io::export::analysis_json(&run.ingest.data, &run.selection)?
        );
        return Ok(());
    }

    match mode {
        OutputMode::Full => {
            println!(
                "{}",
                crate::report::format_run_summary(&run.ingest, &run.selection, &config)
            );
        }
        OutputMode::RankOnly => {
            println!("{}", crate::report::format_rankings(&run.selection));
        }
    }

    if mode == OutputMode::Full && config.plot {
        let plot = crate::plot::render_fit_plot(
            run.selection.best_fit(),
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let spec = SampleSpec {
        family: args.family,
        count: args.count,
        seed: args.seed,
        lambda: args.lambda,
        trials: args.trials,
        p: args.p,
        low: args.low,
        high: args.high,
    };
    let data = generate_sample(&spec)?;
    crate::io::export::write_observed_csv(io::stdout().lock(), &data)
}

pub fn config_from_args(args: &FitArgs) -> AnalysisConfig {
    AnalysisConfig {
        families: args.families.clone(),
        format: args.format,
        show_raw: args.raw,
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
    }
}

fn source_from_args(args: &FitArgs) -> Result<InputSource, AppError> {
    match (&args.input, &args.data) {
        (Some(path), None) => Ok(InputSource::File(path.clone())),
        (None, Some(text)) => Ok(InputSource::Inline(text.clone())),
        _ => Err(AppError::new(
            2,
            "Provide exactly one of a CSV path or `--data`.",
        )),
    }
}
