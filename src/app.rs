//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs the logger
//! - runs the sampling and/or LISA pipelines
//! - prints reports/plots and writes optional exports

use clap::Parser;

use crate::cli::{Cli, Command, LisaArgs, ObsArgs, RunArgs, SampleArgs};
use crate::data::Table;
use crate::domain::{LisaConfig, SampleConfig};
use crate::error::AppError;
use crate::io::summary::{RunSummary, write_summary_json};

pub mod pipeline;

/// Entry point for the `gxreal` binary.
pub fn run() -> Result<(), AppError> {
    // A missing `.env` is fine; it only supplies GXREAL_LOG / RUST_LOG.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    crate::logging::init_logger(cli.verbose);

    match cli.command {
        Command::Sample(args) => handle_sample(args),
        Command::Lisa(args) => handle_lisa(args),
        Command::Run(args) => handle_run(args),
    }
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = sample_config_from_args(&args)?;
    let out = pipeline::run_sample(&config)?;

    println!(
        "{}",
        crate::report::format_sample_summary(&out.summary, out.rows_read, out.rows_skipped)
    );
    if config.export_realization.is_none() {
        tracing::warn!("no --out given; the realization was not saved");
    }
    Ok(())
}

fn handle_lisa(args: LisaArgs) -> Result<(), AppError> {
    let config = lisa_config_from_args(&args.obs)?;
    let realization = pipeline::load_realization(&args.realization)?;
    observe_and_report(&config, &realization, None)
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let sample_config = sample_config_from_args(&args.sample)?;
    let lisa_config = lisa_config_from_args(&args.obs)?;

    let out = pipeline::run_sample(&sample_config)?;
    println!(
        "{}",
        crate::report::format_sample_summary(&out.summary, out.rows_read, out.rows_skipped)
    );

    observe_and_report(&lisa_config, out.realization()?, Some(out.summary.clone()))
}

fn observe_and_report(
    config: &LisaConfig,
    realization: &Table,
    realization_summary: Option<crate::io::summary::RealizationSummary>,
) -> Result<(), AppError> {
    let out = pipeline::run_lisa(config, realization)?;

    println!("{}", crate::report::format_lisa_summary(&out.summary));
    let top = crate::report::top_snr(&out.observation.snr, 10);
    if !top.is_empty() {
        println!("{}", crate::report::format_top_snr(&top));
    }

    if config.plot {
        let plot =
            crate::plot::render_foreground_plot(&out.observation.foreground, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    if let Some(path) = &config.export_summary {
        let summary = RunSummary::new(realization_summary, Some(out.summary));
        write_summary_json(path, &summary)?;
        tracing::info!(path = %path.display(), "wrote run summary");
    }

    Ok(())
}

pub fn sample_config_from_args(args: &SampleArgs) -> Result<SampleConfig, AppError> {
    if !(args.fixed_mass.is_finite() && args.fixed_mass > 0.0) {
        return Err(AppError::config(format!(
            "--fixed-mass must be finite and > 0, got {}.",
            args.fixed_mass
        )));
    }

    let params: Vec<String> = args
        .params
        .iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();

    Ok(SampleConfig {
        population_path: args.population.clone(),
        fixed_mass: args.fixed_mass,
        component: args.component,
        model: args.model,
        params,
        filters: args.filters.clone(),
        seed: args.seed,
        n_samp: args.n_samp,
        export_realization: args.out.clone(),
    })
}

pub fn lisa_config_from_args(args: &ObsArgs) -> Result<LisaConfig, AppError> {
    if !(args.t_obs.is_finite() && args.t_obs > 0.0) {
        return Err(AppError::config(format!("--t-obs must be finite and > 0, got {}.", args.t_obs)));
    }
    // n = 2 is the lowest harmonic a binary radiates at.
    if args.harmonics < 2 {
        return Err(AppError::config(format!("--harmonics must be >= 2, got {}.", args.harmonics)));
    }

    Ok(LisaConfig {
        t_obs_years: args.t_obs,
        n_harmonics: args.harmonics,
        snr_threshold: args.snr_threshold,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_snr: args.snr_out.clone(),
        export_foreground: args.foreground_out.clone(),
        export_summary: args.summary.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Command {
        Cli::parse_from(argv.iter().copied()).command
    }

    #[test]
    fn sample_args_become_config() {
        let Command::Sample(args) = parse(&["gxreal", "sample", "-p", "pop.csv", "-m", "1e6", "--params", "mass1, porb"])
        else {
            panic!("expected sample");
        };
        let cfg = sample_config_from_args(&args).unwrap();
        assert_eq!(cfg.params, vec!["mass1", "porb"]);
        assert_eq!(cfg.fixed_mass, 1e6);
        assert!(cfg.export_realization.is_none());
    }

    #[test]
    fn negative_fixed_mass_is_rejected() {
        let Command::Sample(args) = parse(&["gxreal", "sample", "-p", "pop.csv", "--fixed-mass=-5"]) else {
            panic!("expected sample");
        };
        assert_eq!(sample_config_from_args(&args).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn no_plot_wins_over_plot() {
        let Command::Lisa(args) = parse(&["gxreal", "lisa", "-r", "real.csv", "--no-plot", "--t-obs", "1"]) else {
            panic!("expected lisa");
        };
        let cfg = lisa_config_from_args(&args.obs).unwrap();
        assert!(!cfg.plot);
        assert_eq!(cfg.t_obs_years, 1.0);
        assert_eq!(cfg.n_harmonics, 150);
    }

    #[test]
    fn harmonics_below_two_are_rejected() {
        for h in ["0", "1"] {
            let Command::Lisa(args) = parse(&["gxreal", "lisa", "-r", "real.csv", "--harmonics", h]) else {
                panic!("expected lisa");
            };
            assert_eq!(lisa_config_from_args(&args.obs).unwrap_err().exit_code(), 2);
        }

        let Command::Lisa(args) = parse(&["gxreal", "lisa", "-r", "real.csv", "--harmonics", "2"]) else {
            panic!("expected lisa");
        };
        assert_eq!(lisa_config_from_args(&args.obs).unwrap().n_harmonics, 2);
    }
}
