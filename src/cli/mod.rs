//! Command-line parsing for the Galactic realization tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the sampling/GW code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{GxComponent, GxModel, RowFilter};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "gxreal",
    version,
    about = "Milky Way realizations of binary populations and their LISA observability"
)]
pub struct Cli {
    /// Verbose logging (overridden by GXREAL_LOG / RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sample a Galactic realization from a fixed population CSV.
    Sample(SampleArgs),
    /// Compute SNRs and the foreground of a realization CSV.
    Lisa(LisaArgs),
    /// Sample a realization and observe it with LISA in one go.
    Run(RunArgs),
}

/// Options for generating a realization.
#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    /// Fixed population CSV (one row per binary).
    #[arg(short, long, value_name = "CSV")]
    pub population: PathBuf,

    /// Total stellar mass (Msun) sampled to produce the fixed population.
    #[arg(short = 'm', long)]
    pub fixed_mass: f64,

    /// Galactic component to populate.
    #[arg(short, long, value_enum, default_value_t = GxComponent::ThinDisk)]
    pub component: GxComponent,

    /// Galactic density model.
    #[arg(long, value_enum, default_value_t = GxModel::McMillan)]
    pub model: GxModel,

    /// Columns resampled with the KDE.
    #[arg(long, value_delimiter = ',', default_value = "mass1,mass2,porb,ecc")]
    pub params: Vec<String>,

    /// Keep only rows with `column` in `[min, max]` (`column:min:max`, bounds optional).
    #[arg(long = "select", value_name = "COL:MIN:MAX")]
    pub filters: Vec<RowFilter>,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Realization size (defaults to the mass-weighted number).
    #[arg(long)]
    pub n_samp: Option<usize>,

    /// Write the realization to CSV.
    #[arg(short, long, value_name = "CSV")]
    pub out: Option<PathBuf>,
}

/// Options for the LISA stage.
#[derive(Debug, Args, Clone)]
pub struct ObsArgs {
    /// Observation time (years).
    #[arg(long, default_value_t = 4.0)]
    pub t_obs: f64,

    /// Maximum number of orbital harmonics per binary (at least 2).
    #[arg(long, default_value_t = 150)]
    pub harmonics: u32,

    /// SNR above which a binary counts as resolved.
    #[arg(long, default_value_t = 7.0)]
    pub snr_threshold: f64,

    /// Render the foreground plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export per-binary SNRs to CSV.
    #[arg(long, value_name = "CSV")]
    pub snr_out: Option<PathBuf>,

    /// Export the binned foreground to CSV.
    #[arg(long, value_name = "CSV")]
    pub foreground_out: Option<PathBuf>,

    /// Export a JSON run summary.
    #[arg(long, value_name = "JSON")]
    pub summary: Option<PathBuf>,
}

/// Options for observing a saved realization.
#[derive(Debug, Args, Clone)]
pub struct LisaArgs {
    /// Realization CSV produced by `gxreal sample --out`.
    #[arg(short, long, value_name = "CSV")]
    pub realization: PathBuf,

    #[command(flatten)]
    pub obs: ObsArgs,
}

/// Options for `gxreal run`.
#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub sample: SampleArgs,

    #[command(flatten)]
    pub obs: ObsArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_sample_with_defaults() {
        let cli = Cli::parse_from(["gxreal", "sample", "-p", "pop.csv", "-m", "1e7"]);
        let Command::Sample(args) = cli.command else {
            panic!("expected sample");
        };
        assert_eq!(args.component, GxComponent::ThinDisk);
        assert_eq!(args.params, vec!["mass1", "mass2", "porb", "ecc"]);
        assert_eq!(args.seed, 42);
        assert!(args.filters.is_empty());
    }

    #[test]
    fn parses_run_with_filters_and_obs_flags() {
        let cli = Cli::parse_from([
            "gxreal", "-v", "run", "-p", "pop.csv", "-m", "2e6", "-c", "bulge", "--select", "porb::0.001",
            "--t-obs", "2", "--no-plot",
        ]);
        assert!(cli.verbose);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.sample.component, GxComponent::Bulge);
        assert_eq!(args.sample.filters[0].max, Some(0.001));
        assert_eq!(args.obs.t_obs, 2.0);
        assert!(args.obs.no_plot);
    }
}
