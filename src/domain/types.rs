//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - selected from the command line (`ValueEnum`)
//! - exported to CSV/JSON
//! - passed between the sampling and GW stages without copying tables

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Milky Way component the realization is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GxComponent {
    ThinDisk,
    ThickDisk,
    Bulge,
}

impl GxComponent {
    pub fn display_name(self) -> &'static str {
        match self {
            GxComponent::ThinDisk => "ThinDisk",
            GxComponent::ThickDisk => "ThickDisk",
            GxComponent::Bulge => "Bulge",
        }
    }
}

/// Spatial density model for the Galactic components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GxModel {
    /// McMillan (2011) best-fitting Milky Way mass model.
    #[default]
    #[value(name = "mcmillan")]
    McMillan,
}

impl GxModel {
    pub fn display_name(self) -> &'static str {
        match self {
            GxModel::McMillan => "McMillan",
        }
    }
}

/// Inclusive range filter on one fixed-population column.
///
/// Parsed from `column:min:max`; either bound may be left empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowFilter {
    pub column: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RowFilter {
    pub fn accepts(&self, value: f64) -> bool {
        self.min.is_none_or(|lo| value >= lo) && self.max.is_none_or(|hi| value <= hi)
    }
}

impl std::str::FromStr for RowFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let [column, min, max] = parts.as_slice() else {
            return Err(format!("Invalid filter '{s}'. Expected `column:min:max`."));
        };
        if column.is_empty() {
            return Err(format!("Invalid filter '{s}': missing column name."));
        }

        let parse_bound = |v: &str| -> Result<Option<f64>, String> {
            if v.is_empty() {
                return Ok(None);
            }
            v.parse::<f64>()
                .ok()
                .filter(|x| x.is_finite())
                .map(Some)
                .ok_or_else(|| format!("Invalid bound '{v}' in filter '{s}'."))
        };

        let min = parse_bound(min)?;
        let max = parse_bound(max)?;
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(format!("Invalid filter '{s}': min > max."));
            }
        }

        Ok(RowFilter {
            column: column.to_string(),
            min,
            max,
        })
    }
}

/// Per-binary signal-to-noise ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnrRecord {
    /// Row index into the realization.
    pub index: usize,
    /// Orbital frequency (Hz).
    pub f_orb: f64,
    pub snr: f64,
}

/// PSD contribution of one harmonic of one binary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PsdRecord {
    pub index: usize,
    pub harmonic: u32,
    /// Gravitational-wave frequency `n * f_orb` (Hz).
    pub f_gw: f64,
    /// One-sided PSD (1/Hz) deposited in the frequency bin containing `f_gw`.
    pub psd: f64,
}

/// One frequency bin of the unresolved foreground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForegroundBin {
    pub f_low: f64,
    pub f_high: f64,
    pub f_center: f64,
    pub psd: f64,
    /// Number of harmonic contributions summed into the bin.
    pub n_sources: usize,
}

/// Configuration for generating a Galactic realization.
///
/// Derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub population_path: PathBuf,
    /// Total stellar mass (Msun) sampled to produce the fixed population.
    pub fixed_mass: f64,
    pub component: GxComponent,
    pub model: GxModel,
    /// Columns to resample with the KDE.
    pub params: Vec<String>,
    pub filters: Vec<RowFilter>,
    pub seed: u64,
    /// Overrides the mass-weighted number of systems when set.
    pub n_samp: Option<usize>,
    pub export_realization: Option<PathBuf>,
}

/// Configuration for the LISA observability stage.
#[derive(Debug, Clone)]
pub struct LisaConfig {
    /// Observation time in years.
    pub t_obs_years: f64,
    /// Maximum number of orbital harmonics per binary.
    pub n_harmonics: u32,
    pub snr_threshold: f64,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub export_snr: Option<PathBuf>,
    pub export_foreground: Option<PathBuf>,
    pub export_summary: Option<PathBuf>,
}
