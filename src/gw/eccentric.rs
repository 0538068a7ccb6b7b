//! Gravitational-wave emission from eccentric binaries.
//!
//! Peters & Mathews (1963) distribute the radiated power over orbital harmonics
//! `n f_orb` with relative weights `g(n, e)`; for a circular orbit all power is in
//! `n = 2` and `g(2, 0) = 1`. The strain amplitude of harmonic `n` is
//!
//! ```text
//! h_n = (2/n) sqrt(g(n, e)) h_0,    h_0 = sqrt(32/5) (G Mc)^(5/3) (2π f_orb)^(2/3) / (c^4 d)
//! ```

use std::f64::consts::PI;

use crate::error::AppError;
use crate::gw::constants::{C, G, MSUN, PARSEC, SEC_IN_YEAR};
use crate::math::bessel_j;

/// Eccentricities below this are treated as circular (only `n = 2` radiates).
pub const CIRCULAR_ECC: f64 = 1e-4;

/// Largest eccentricity a sampled binary may take (bound orbits need `e < 1`).
pub const MAX_ECC: f64 = 1.0 - 1e-6;

/// Multiple of the peak harmonic beyond which harmonics are dropped.
const PEAK_HARMONIC_MULTIPLE: f64 = 10.0;

/// A binary in SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binary {
    /// Primary mass (kg).
    pub m1: f64,
    /// Secondary mass (kg).
    pub m2: f64,
    /// Orbital period (s).
    pub porb: f64,
    pub ecc: f64,
    /// Distance (m).
    pub dist: f64,
}

impl Binary {
    /// Build from Galactic units: masses in Msun, period in years, distance in kpc.
    pub fn from_galactic_units(m1_msun: f64, m2_msun: f64, porb_yr: f64, ecc: f64, dist_kpc: f64) -> Self {
        Self {
            m1: m1_msun * MSUN,
            m2: m2_msun * MSUN,
            porb: porb_yr * SEC_IN_YEAR,
            ecc,
            dist: dist_kpc * 1000.0 * PARSEC,
        }
    }

    pub fn validate(&self, index: usize) -> Result<(), AppError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !(positive(self.m1) && positive(self.m2)) {
            return Err(AppError::input(format!("Binary {index}: masses must be finite and > 0.")));
        }
        if !positive(self.porb) {
            return Err(AppError::input(format!("Binary {index}: orbital period must be finite and > 0.")));
        }
        if !positive(self.dist) {
            return Err(AppError::input(format!("Binary {index}: distance must be finite and > 0.")));
        }
        if !(self.ecc.is_finite() && (0.0..1.0).contains(&self.ecc)) {
            return Err(AppError::input(format!(
                "Binary {index}: eccentricity {} outside [0, 1).",
                self.ecc
            )));
        }
        Ok(())
    }

    pub fn f_orb(&self) -> f64 {
        1.0 / self.porb
    }

    pub fn chirp_mass(&self) -> f64 {
        (self.m1 * self.m2).powf(0.6) / (self.m1 + self.m2).powf(0.2)
    }

    /// Circular-equivalent strain amplitude `h_0`.
    pub fn strain_amplitude(&self) -> f64 {
        let gm = G * self.chirp_mass();
        (32.0_f64 / 5.0).sqrt() * gm.powf(5.0 / 3.0) * (2.0 * PI * self.f_orb()).powf(2.0 / 3.0)
            / (C.powi(4) * self.dist)
    }

    /// `(n, f_n, h_n)` for every harmonic up to the cutoff.
    pub fn harmonics(&self, n_max: u32) -> Vec<Harmonic> {
        let h0 = self.strain_amplitude();
        let f_orb = self.f_orb();

        if self.ecc < CIRCULAR_ECC {
            return vec![Harmonic {
                n: 2,
                f_gw: 2.0 * f_orb,
                strain: h0,
            }];
        }

        (1..=harmonic_cutoff(self.ecc, n_max))
            .map(|n| Harmonic {
                n,
                f_gw: n as f64 * f_orb,
                strain: 2.0 / n as f64 * peters_g(n, self.ecc).max(0.0).sqrt() * h0,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Harmonic {
    pub n: u32,
    pub f_gw: f64,
    pub strain: f64,
}

/// Peters & Mathews relative power in harmonic `n` for eccentricity `e`.
pub fn peters_g(n: u32, e: f64) -> f64 {
    let ni = n as i64;
    let nf = n as f64;
    let x = nf * e;

    let jm2 = bessel_j(ni - 2, x);
    let jm1 = bessel_j(ni - 1, x);
    let j0 = bessel_j(ni, x);
    let jp1 = bessel_j(ni + 1, x);
    let jp2 = bessel_j(ni + 2, x);

    let a = jm2 - 2.0 * e * jm1 + 2.0 / nf * j0 + 2.0 * e * jp1 - jp2;
    let b = jm2 - 2.0 * j0 + jp2;
    let c = 4.0 / (3.0 * nf * nf) * j0 * j0;

    nf.powi(4) / 32.0 * (a * a + (1.0 - e * e) * b * b + c)
}

/// Enhancement of total GW power over a circular orbit, `Σ_n g(n, e)`.
pub fn peters_f(e: f64) -> f64 {
    let e2 = e * e;
    (1.0 + 73.0 / 24.0 * e2 + 37.0 / 96.0 * e2 * e2) / (1.0 - e2).powf(3.5)
}

/// Highest harmonic worth computing for eccentricity `e`, capped at `n_max`.
///
/// Never below 2: callers validate `n_max >= 2` since every binary radiates at
/// `n = 2`.
///
/// Uses the peak-harmonic fit `n_peak = 2 (1 + e)^1.1954 / (1 - e^2)^1.5`
/// (Wen 2003); power falls off steeply beyond a few times `n_peak`.
pub fn harmonic_cutoff(e: f64, n_max: u32) -> u32 {
    if e < CIRCULAR_ECC {
        return 2;
    }
    let n_peak = 2.0 * (1.0 + e).powf(1.1954) / (1.0 - e * e).powf(1.5);
    let cutoff = (PEAK_HARMONIC_MULTIPLE * n_peak).ceil().min(u32::MAX as f64) as u32;
    cutoff.max(2).min(n_max.max(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circular_orbit_radiates_only_at_second_harmonic() {
        assert!((peters_g(2, 0.0) - 1.0).abs() < 1e-12);
        assert!(peters_g(1, 0.0).abs() < 1e-12);
        assert!(peters_g(3, 0.0).abs() < 1e-12);
    }

    #[test]
    fn harmonic_power_sums_to_peters_enhancement() {
        for &e in &[0.3, 0.7] {
            let cutoff = harmonic_cutoff(e, 1000);
            let total: f64 = (1..=cutoff).map(|n| peters_g(n, e)).sum();
            let expected = peters_f(e);
            assert!((total - expected).abs() / expected < 1e-9, "e={e}: {total} vs {expected}");
        }
    }

    #[test]
    fn cutoff_respects_user_cap() {
        assert_eq!(harmonic_cutoff(0.0, 150), 2);
        assert_eq!(harmonic_cutoff(0.3, 150), 32);
        assert_eq!(harmonic_cutoff(0.9, 150), 150);
    }

    #[test]
    fn strain_of_compact_white_dwarf_pair() {
        // 0.6 + 0.6 Msun, 10 minute orbit, 1 kpc.
        let b = Binary::from_galactic_units(0.6, 0.6, 600.0 / SEC_IN_YEAR, 0.0, 1.0);
        let h0 = b.strain_amplitude();
        assert!((h0 - 5.683_193_008_924_672e-22).abs() / h0 < 1e-9, "h0 = {h0}");

        let harmonics = b.harmonics(150);
        assert_eq!(harmonics.len(), 1);
        assert_eq!(harmonics[0].n, 2);
        assert!((harmonics[0].f_gw - 2.0 / 600.0).abs() < 1e-15);
    }

    #[test]
    fn validate_rejects_unbound_orbits() {
        let mut b = Binary::from_galactic_units(0.6, 0.6, 1e-5, 0.5, 1.0);
        assert!(b.validate(0).is_ok());
        b.ecc = 1.0;
        assert!(b.validate(0).is_err());
        b.ecc = 0.1;
        b.dist = 0.0;
        assert!(b.validate(0).is_err());
    }
}
