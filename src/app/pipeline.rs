//! Shared pipeline logic used by the `sample`, `lisa` and `run` subcommands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> KDE resampling -> positions -> SNR/PSD -> foreground
//!
//! The CLI handlers can then focus on presentation (printing, exports).

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::data::{FixedPopulation, Table};
use crate::domain::{LisaConfig, SampleConfig};
use crate::error::AppError;
use crate::gw::count_resolved;
use crate::gxreal::{GxReal, LisaObservation, observe_realization};
use crate::io::ingest::{load_table, read_table};
use crate::io::summary::{LisaSummary, RealizationSummary};

/// All computed outputs of a sampling run.
#[derive(Debug, Clone)]
pub struct SampleOutput {
    pub gx: GxReal,
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub summary: RealizationSummary,
}

impl SampleOutput {
    /// The sampled realization.
    pub fn realization(&self) -> Result<&Table, AppError> {
        self.gx.realization().ok_or(AppError::NotSampled)
    }
}

/// All computed outputs of a LISA observation.
#[derive(Debug, Clone)]
pub struct LisaOutput {
    pub observation: LisaObservation,
    pub n_resolved: usize,
    pub summary: LisaSummary,
}

/// Columns that must be read from the fixed population CSV.
fn required_columns(config: &SampleConfig) -> Vec<String> {
    let mut cols = config.params.clone();
    for f in &config.filters {
        if !cols.contains(&f.column) {
            cols.push(f.column.clone());
        }
    }
    cols
}

/// Load the fixed population and sample a Galactic realization.
pub fn run_sample(config: &SampleConfig) -> Result<SampleOutput, AppError> {
    if config.params.is_empty() {
        return Err(AppError::config("At least one KDE parameter is required (--params)."));
    }

    // 1) Ingest the fixed population.
    let columns = required_columns(config);
    let ingest = load_table(&config.population_path, Some(&columns))?;
    let rows_skipped = ingest.row_errors.len();
    tracing::info!(
        path = %config.population_path.display(),
        rows = ingest.rows_used,
        skipped = rows_skipped,
        "loaded fixed population"
    );
    let fixed_pop = FixedPopulation::new(ingest.table, config.fixed_mass)?;
    let n_fixed = fixed_pop.n_binaries();

    // 2) Resample and place the binaries.
    let mut gx = GxReal::new(fixed_pop, config.model, config.component, config.params.clone())
        .with_filters(config.filters.clone());
    if let Some(n) = config.n_samp {
        gx = gx.with_n_samp(n);
    }
    let mut rng = StdRng::seed_from_u64(config.seed);
    let n_samp = gx.sample_population(&mut rng)?.n_rows();
    let diagnostics = gx.diagnostics().cloned().ok_or(AppError::NotSampled)?;

    // 3) Optional export.
    if let Some(path) = &config.export_realization {
        let realization = gx.realization().ok_or(AppError::NotSampled)?;
        crate::io::export::write_table_csv(path, realization)?;
        tracing::info!(path = %path.display(), "wrote realization");
    }

    let summary = RealizationSummary {
        component: config.component,
        model: config.model,
        params: config.params.clone(),
        fixed_mass: config.fixed_mass,
        n_fixed,
        n_kde: diagnostics.n_kde,
        n_samp,
        bandwidth: diagnostics.bandwidth,
        seed: config.seed,
    };

    Ok(SampleOutput {
        gx,
        rows_read: ingest.rows_read,
        rows_skipped,
        summary,
    })
}

/// Observe a realization with LISA and write the configured exports.
pub fn run_lisa(config: &LisaConfig, realization: &Table) -> Result<LisaOutput, AppError> {
    if config.n_harmonics < 2 {
        return Err(AppError::config(format!(
            "Number of harmonics must be >= 2, got {}.",
            config.n_harmonics
        )));
    }

    let observation = observe_realization(realization, config.t_obs_years, config.n_harmonics)?;
    let n_resolved = count_resolved(&observation.snr, config.snr_threshold);
    let max_snr = observation.snr.iter().map(|r| r.snr).fold(0.0, f64::max);

    if let Some(path) = &config.export_snr {
        crate::io::export::write_snr_csv(path, &observation.snr)?;
    }
    if let Some(path) = &config.export_foreground {
        crate::io::export::write_foreground_csv(path, &observation.foreground)?;
    }

    let summary = LisaSummary {
        t_obs_years: config.t_obs_years,
        n_harmonics: config.n_harmonics,
        snr_threshold: config.snr_threshold,
        n_binaries: observation.snr.len(),
        n_resolved,
        max_snr,
        n_foreground_bins: observation.foreground.len(),
        foreground_f_min: observation.foreground.first().map(|b| b.f_low),
        foreground_f_max: observation.foreground.last().map(|b| b.f_high),
    };

    Ok(LisaOutput {
        observation,
        n_resolved,
        summary,
    })
}

/// Load a realization CSV written by `run_sample`.
///
/// An empty realization (header only, as written for `n_samp = 0`) loads as a
/// table with no rows.
pub fn load_realization(path: &std::path::Path) -> Result<Table, AppError> {
    let ingest = read_table(path, None)?;
    tracing::info!(path = %path.display(), rows = ingest.rows_used, "loaded realization");
    Ok(ingest.table)
}
