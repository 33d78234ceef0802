//! Command-line parsing for the discrete goodness-of-fit tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting code.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};

use crate::domain::{Family, OutputFormat};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "distfit",
    version,
    about = "Chi-squared goodness of fit against Poisson, Binomial, Geometric and Uniform families"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit every family, print each merged table and statistic, and the best family.
    Fit(FitArgs),
    /// Print the statistic ranking only (useful for scripting).
    Rank(FitArgs),
    /// Draw a synthetic sample from a family and print it as `value,frequency` CSV.
    Sample(SampleArgs),
}

/// Common options for fitting and ranking.
#[derive(Debug, Parser, Clone)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "data"])))]
pub struct FitArgs {
    /// CSV file with a `value` column and optional `frequency` column.
    #[arg(value_name = "CSV")]
    pub input: Option<PathBuf>,

    /// Inline observations as `value:frequency` pairs, e.g. `0:10,1:20,2:15`.
    #[arg(short = 'd', long)]
    pub data: Option<String>,

    /// Candidate families (comma-separated). Ties resolve in the order
    /// poisson, binomial, geometric, uniform regardless of the order given.
    #[arg(
        short = 'f',
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = Family::ALL.to_vec()
    )]
    pub families: Vec<Family>,

    /// Output format.
    #[arg(long, value_enum, env = "DISTFIT_FORMAT", default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also print each family's table before category merging.
    #[arg(long)]
    pub raw: bool,

    /// Render an ASCII plot of the best family's merged categories.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, env = "DISTFIT_PLOT_WIDTH", default_value_t = 60)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, env = "DISTFIT_PLOT_HEIGHT", default_value_t = 15)]
    pub height: usize,
}

/// Options for synthetic sample generation.
#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Family to draw from.
    #[arg(short = 'f', long, value_enum)]
    pub family: Family,

    /// Number of observations.
    #[arg(short = 'n', long, default_value_t = 100)]
    pub count: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Poisson rate.
    #[arg(long, default_value_t = 2.0)]
    pub lambda: f64,

    /// Binomial number of trials.
    #[arg(long, default_value_t = 10)]
    pub trials: u64,

    /// Binomial / geometric success probability.
    #[arg(short = 'p', long, default_value_t = 0.3)]
    pub p: f64,

    /// Uniform lower bound (inclusive).
    #[arg(long, default_value_t = 0)]
    pub low: u64,

    /// Uniform upper bound (inclusive).
    #[arg(long, default_value_t = 9)]
    pub high: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_defaults_to_all_families() {
        let cli = Cli::try_parse_from(["distfit", "fit", "--data", "0:1"]).unwrap();
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.families, Family::ALL.to_vec());
        assert_eq!(args.data.as_deref(), Some("0:1"));
        assert!(args.input.is_none());
    }

    #[test]
    fn families_are_comma_separated() {
        let cli =
            Cli::try_parse_from(["distfit", "rank", "obs.csv", "-f", "uniform,poisson"]).unwrap();
        let Command::Rank(args) = cli.command else {
            panic!("expected rank");
        };
        assert_eq!(args.families, vec![Family::Uniform, Family::Poisson]);
        assert_eq!(args.input, Some(PathBuf::from("obs.csv")));
    }

    #[test]
    fn an_input_source_is_required() {
        assert!(Cli::try_parse_from(["distfit", "fit"]).is_err());
        assert!(Cli::try_parse_from(["distfit", "fit", "a.csv", "--data", "0:1"]).is_err());
    }

    #[test]
    fn sample_requires_a_family() {
        assert!(Cli::try_parse_from(["distfit", "sample"]).is_err());
        let cli = Cli::try_parse_from(["distfit", "sample", "-f", "geometric", "-p", "0.5"]).unwrap();
        let Command::Sample(args) = cli.command else {
            panic!("expected sample");
        };
        assert_eq!(args.family, Family::Geometric);
        assert_eq!(args.p, 0.5);
    }
}
