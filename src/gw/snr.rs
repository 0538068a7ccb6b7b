//! Signal-to-noise ratios for a population of quasi-monochromatic binaries.
//!
//! Over an observation of length `T_obs` each harmonic is a monochromatic
//! signal, so
//!
//! ```text
//! SNR^2 = Σ_n h_n^2 T_obs / S_n(f_n)
//! ```
//!
//! summed over harmonics inside the LISA band. Binaries are independent, so the
//! population is evaluated in parallel.

use rayon::prelude::*;

use crate::domain::SnrRecord;
use crate::error::AppError;
use crate::gw::constants::{LISA_F_MAX, LISA_F_MIN};
use crate::gw::eccentric::Binary;
use crate::gw::noise::lisa_psd;

pub(crate) fn in_band(f: f64) -> bool {
    (LISA_F_MIN..=LISA_F_MAX).contains(&f)
}

pub(crate) fn validate_inputs(binaries: &[Binary], t_obs: f64) -> Result<(), AppError> {
    if !(t_obs.is_finite() && t_obs > 0.0) {
        return Err(AppError::config(format!("Observation time must be finite and > 0, got {t_obs}.")));
    }
    binaries
        .iter()
        .enumerate()
        .try_for_each(|(i, b)| b.validate(i))
}

/// SNR of a single binary.
pub fn binary_snr(binary: &Binary, n_harmonics: u32, t_obs: f64) -> f64 {
    binary
        .harmonics(n_harmonics)
        .into_iter()
        .filter(|h| in_band(h.f_gw))
        .map(|h| h.strain * h.strain * t_obs / lisa_psd(h.f_gw))
        .sum::<f64>()
        .sqrt()
}

/// SNR for every binary, in input order. `t_obs` is in seconds.
pub fn snr_calcs(binaries: &[Binary], n_harmonics: u32, t_obs: f64) -> Result<Vec<SnrRecord>, AppError> {
    validate_inputs(binaries, t_obs)?;

    let out: Vec<SnrRecord> = binaries
        .par_iter()
        .enumerate()
        .map(|(index, b)| SnrRecord {
            index,
            f_orb: b.f_orb(),
            snr: binary_snr(b, n_harmonics, t_obs),
        })
        .collect();

    if let Some(bad) = out.iter().find(|r| !r.snr.is_finite()) {
        return Err(AppError::numerics(format!("Non-finite SNR for binary {}.", bad.index)));
    }
    Ok(out)
}

/// Number of sources at or above `threshold`.
pub fn count_resolved(snr: &[SnrRecord], threshold: f64) -> usize {
    snr.iter().filter(|r| r.snr >= threshold).count()
}
