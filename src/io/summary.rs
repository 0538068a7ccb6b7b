//! Read/write run summary JSON files.
//!
//! The summary is the "portable" record of a run:
//! - realization settings (component, model, parameters, sizes, bandwidth)
//! - LISA settings (observation time, harmonics, SNR threshold)
//! - headline results (resolved count, loudest source, foreground extent)

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{GxComponent, GxModel};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealizationSummary {
    pub component: GxComponent,
    pub model: GxModel,
    pub params: Vec<String>,
    pub fixed_mass: f64,
    pub n_fixed: usize,
    pub n_kde: usize,
    pub n_samp: usize,
    pub bandwidth: f64,
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LisaSummary {
    pub t_obs_years: f64,
    pub n_harmonics: u32,
    pub snr_threshold: f64,
    pub n_binaries: usize,
    pub n_resolved: usize,
    pub max_snr: f64,
    pub n_foreground_bins: usize,
    pub foreground_f_min: Option<f64>,
    pub foreground_f_max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub realization: Option<RealizationSummary>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub lisa: Option<LisaSummary>,
}

impl RunSummary {
    pub fn new(realization: Option<RealizationSummary>, lisa: Option<LisaSummary>) -> Self {
        Self {
            tool: "gxreal".to_string(),
            generated_at: Utc::now(),
            realization,
            lisa,
        }
    }
}

/// Write a run summary JSON file.
pub fn write_summary_json(path: &Path, summary: &RunSummary) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create summary JSON '{}'", path.display()), e))?;
    serde_json::to_writer_pretty(file, summary).map_err(|e| AppError::json("Failed to write summary JSON", e))?;
    Ok(())
}

/// Read a run summary JSON file.
pub fn read_summary_json(path: &Path) -> Result<RunSummary, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open summary JSON '{}'", path.display()), e))?;
    serde_json::from_reader(file).map_err(|e| AppError::json("Invalid summary JSON", e))
}
