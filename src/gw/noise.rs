//! LISA sky-averaged sensitivity curve (Robson, Cornish & Liu 2019).
//!
//! ```text
//! S_n(f) = 10/(3 L^2) [P_oms + 2 (1 + cos^2(f/f*)) P_acc / (2πf)^4] (1 + 0.6 (f/f*)^2)
//! ```
//!
//! Instrument noise only; the Galactic confusion foreground is computed from the
//! realization itself.

use std::f64::consts::PI;

/// Arm length (m).
const ARM_LENGTH: f64 = 2.5e9;

/// Transfer frequency `c / (2π L)` (Hz).
const F_STAR: f64 = 19.09e-3;

/// One-sided noise PSD (1/Hz) at frequency `f` (Hz).
pub fn lisa_psd(f: f64) -> f64 {
    let p_oms = 1.5e-11_f64.powi(2) * (1.0 + (2e-3 / f).powi(4));
    let p_acc = 3e-15_f64.powi(2) * (1.0 + (0.4e-3 / f).powi(2)) * (1.0 + (f / 8e-3).powi(4));
    let transfer = 1.0 + 0.6 * (f / F_STAR).powi(2);
    let cos2 = (f / F_STAR).cos().powi(2);

    10.0 / (3.0 * ARM_LENGTH * ARM_LENGTH)
        * (p_oms + 2.0 * (1.0 + cos2) * p_acc / (2.0 * PI * f).powi(4))
        * transfer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensitivity_matches_reference_values() {
        let cases = [
            (1e-4, 2.113_466_613_692_501e-33),
            (1e-3, 1.634_100_272_595_434e-38),
            (1e-2, 1.443_073_435_179_772_2e-40),
        ];
        for (f, expected) in cases {
            let got = lisa_psd(f);
            assert!((got - expected).abs() / expected < 1e-9, "S_n({f}) = {got}");
        }
    }

    #[test]
    fn bucket_is_in_the_millihertz_band() {
        assert!(lisa_psd(1e-2) < lisa_psd(1e-4));
        assert!(lisa_psd(1e-2) < lisa_psd(1e-1));
    }
}
