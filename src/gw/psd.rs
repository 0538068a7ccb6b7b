//! Population PSD and the binned Galactic foreground.
//!
//! A harmonic with strain `h_n` observed for `T_obs` deposits `h_n^2 T_obs` of
//! one-sided PSD into the frequency bin of width `1/T_obs` that contains `f_n`.
//! Summing all deposits per bin gives the (unresolved) foreground.

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::domain::{ForegroundBin, PsdRecord};
use crate::error::AppError;
use crate::gw::eccentric::Binary;
use crate::gw::snr::{in_band, validate_inputs};

/// Per-harmonic PSD contributions for every binary (in-band harmonics only).
///
/// Records are ordered by binary index, then harmonic number.
pub fn psd_calcs(binaries: &[Binary], n_harmonics: u32, t_obs: f64) -> Result<Vec<PsdRecord>, AppError> {
    validate_inputs(binaries, t_obs)?;

    let out: Vec<PsdRecord> = binaries
        .par_iter()
        .enumerate()
        .flat_map_iter(|(index, b)| {
            b.harmonics(n_harmonics)
                .into_iter()
                .filter(|h| in_band(h.f_gw))
                .map(move |h| PsdRecord {
                    index,
                    harmonic: h.n,
                    f_gw: h.f_gw,
                    psd: h.strain * h.strain * t_obs,
                })
        })
        .collect();

    Ok(out)
}

/// Sum PSD records into frequency bins of width `1/t_obs`.
///
/// Only non-empty bins are returned, sorted by frequency.
pub fn compute_foreground(psd: &[PsdRecord], t_obs: f64) -> Result<Vec<ForegroundBin>, AppError> {
    if !(t_obs.is_finite() && t_obs > 0.0) {
        return Err(AppError::config(format!("Observation time must be finite and > 0, got {t_obs}.")));
    }
    let df = 1.0 / t_obs;

    let mut bins: BTreeMap<u64, (f64, usize)> = BTreeMap::new();
    for rec in psd {
        if !(rec.f_gw.is_finite() && rec.f_gw >= 0.0 && rec.psd.is_finite()) {
            return Err(AppError::numerics(format!(
                "Invalid PSD record for binary {} (harmonic {}).",
                rec.index, rec.harmonic
            )));
        }
        let k = (rec.f_gw / df).floor() as u64;
        let entry = bins.entry(k).or_insert((0.0, 0));
        entry.0 += rec.psd;
        entry.1 += 1;
    }

    Ok(bins
        .into_iter()
        .map(|(k, (psd, n_sources))| {
            let f_low = k as f64 * df;
            let f_high = f_low + df;
            ForegroundBin {
                f_low,
                f_high,
                f_center: 0.5 * (f_low + f_high),
                psd,
                n_sources,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gw::constants::SEC_IN_YEAR;

    fn record(index: usize, f_gw: f64, psd: f64) -> PsdRecord {
        PsdRecord {
            index,
            harmonic: 2,
            f_gw,
            psd,
        }
    }

    #[test]
    fn psd_of_circular_binary_is_single_record() {
        let b = Binary::from_galactic_units(0.6, 0.6, 600.0 / SEC_IN_YEAR, 0.0, 1.0);
        let t = 4.0 * SEC_IN_YEAR;
        let recs = psd_calcs(&[b], 150, t).unwrap();
        assert_eq!(recs.len(), 1);
        let h0 = b.strain_amplitude();
        assert!((recs[0].psd - h0 * h0 * t).abs() / recs[0].psd < 1e-12);
    }

    #[test]
    fn eccentric_binary_spreads_power_over_harmonics() {
        let b = Binary::from_galactic_units(0.6, 0.6, 3600.0 / SEC_IN_YEAR, 0.5, 1.0);
        let recs = psd_calcs(&[b], 150, SEC_IN_YEAR).unwrap();
        assert!(recs.len() > 2);
        let harmonics: Vec<u32> = recs.iter().map(|r| r.harmonic).collect();
        let mut sorted = harmonics.clone();
        sorted.sort_unstable();
        assert_eq!(harmonics, sorted);
    }

    #[test]
    fn foreground_sums_within_bins() {
        // T = 100 s -> bins of 0.01 Hz.
        let recs = vec![
            record(0, 0.012, 1.0),
            record(1, 0.019, 2.0),
            record(2, 0.031, 4.0),
        ];
        let fg = compute_foreground(&recs, 100.0).unwrap();
        assert_eq!(fg.len(), 2);
        assert_eq!(fg[0].n_sources, 2);
        assert!((fg[0].psd - 3.0).abs() < 1e-12);
        assert!((fg[0].f_low - 0.01).abs() < 1e-12);
        assert!((fg[0].f_center - 0.015).abs() < 1e-12);
        assert!((fg[1].psd - 4.0).abs() < 1e-12);
    }

    #[test]
    fn foreground_rejects_bad_observation_time() {
        assert!(compute_foreground(&[], 0.0).is_err());
        assert!(compute_foreground(&[], 1.0).unwrap().is_empty());
    }
}
