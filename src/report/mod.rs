//! Formatted terminal output for realizations and LISA observations.
//!
//! We keep formatting code in one place so:
//! - the sampling/GW code stays clean and testable
//! - output changes are localized (golden tests below)

use std::cmp::Ordering;

use crate::domain::SnrRecord;
use crate::io::summary::{LisaSummary, RealizationSummary};

/// Format the realization summary (inputs, KDE diagnostics, size).
pub fn format_sample_summary(summary: &RealizationSummary, rows_read: usize, rows_skipped: usize) -> String {
    let mut out = String::new();

    out.push_str("=== gxreal - Galactic realization ===\n");
    out.push_str(&format!(
        "Component: {} | model: {}\n",
        summary.component.display_name(),
        summary.model.display_name()
    ));
    out.push_str(&format!(
        "Fixed population: n={} (read {rows_read}, skipped {rows_skipped}) | mass={:.3e} Msun\n",
        summary.n_fixed, summary.fixed_mass
    ));
    out.push_str(&format!("KDE: params=[{}] | n={}\n", summary.params.join(", "), summary.n_kde));
    out.push_str(&format!("Bandwidth (Knuth): {:.6}\n", summary.bandwidth));
    out.push_str(&format!("Realization: n={} | seed={}\n", summary.n_samp, summary.seed));

    out
}

/// Format the LISA observation summary.
pub fn format_lisa_summary(summary: &LisaSummary) -> String {
    let mut out = String::new();

    out.push_str("=== gxreal - LISA observation ===\n");
    out.push_str(&format!(
        "T_obs: {:.2} yr | harmonics<={} | binaries: {}\n",
        summary.t_obs_years, summary.n_harmonics, summary.n_binaries
    ));
    out.push_str(&format!(
        "Resolved (SNR >= {:.1}): {} | max SNR: {:.3}\n",
        summary.snr_threshold, summary.n_resolved, summary.max_snr
    ));
    match (summary.foreground_f_min, summary.foreground_f_max) {
        (Some(lo), Some(hi)) => out.push_str(&format!(
            "Foreground: {} bins | f=[{lo:.3e}, {hi:.3e}] Hz\n",
            summary.n_foreground_bins
        )),
        _ => out.push_str("Foreground: empty (no harmonics in band)\n"),
    }

    out
}

/// Loudest `top_n` binaries, highest SNR first (ties by index).
pub fn top_snr(snr: &[SnrRecord], top_n: usize) -> Vec<SnrRecord> {
    let mut sorted = snr.to_vec();
    sorted.sort_by(|a, b| {
        b.snr
            .partial_cmp(&a.snr)
            .unwrap_or(Ordering::Equal)
            .then(a.index.cmp(&b.index))
    });
    sorted.truncate(top_n);
    sorted
}

/// Format the loudest-binaries table.
pub fn format_top_snr(rows: &[SnrRecord]) -> String {
    let mut out = String::new();
    out.push_str("Loudest binaries:\n");
    out.push_str(format!("{:>8} {:>14} {:>14} {:>12}", "index", "f_orb [Hz]", "f_gw,2 [Hz]", "SNR").trim_end());
    out.push('\n');
    out.push_str(format!("{:->8} {:->14} {:->14} {:->12}", "", "", "", "").trim_end());
    out.push('\n');

    for r in rows {
        out.push_str(
            format!(
                "{:>8} {:>14.6e} {:>14.6e} {:>12.3}",
                r.index,
                r.f_orb,
                2.0 * r.f_orb,
                r.snr
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(index: usize, snr: f64) -> SnrRecord {
        SnrRecord { index, f_orb: 1e-3, snr }
    }

    #[test]
    fn top_snr_sorts_descending_with_index_tiebreak() {
        let rows = vec![rec(0, 1.0), rec(1, 9.0), rec(2, 9.0), rec(3, 3.0)];
        let top = top_snr(&rows, 3);
        let idx: Vec<usize> = top.iter().map(|r| r.index).collect();
        assert_eq!(idx, vec![1, 2, 3]);
    }

    #[test]
    fn top_snr_table_golden() {
        let txt = format_top_snr(&[rec(7, 12.5)]);
        let expected = concat!(
            "Loudest binaries:\n",
            "   index     f_orb [Hz]    f_gw,2 [Hz]          SNR\n",
            "-------- -------------- -------------- ------------\n",
            "       7    1.000000e-3    2.000000e-3       12.500\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn lisa_summary_reports_empty_foreground() {
        let s = LisaSummary {
            t_obs_years: 4.0,
            n_harmonics: 150,
            snr_threshold: 7.0,
            n_binaries: 0,
            n_resolved: 0,
            max_snr: 0.0,
            n_foreground_bins: 0,
            foreground_f_min: None,
            foreground_f_max: None,
        };
        let txt = format_lisa_summary(&s);
        assert!(txt.contains("Resolved (SNR >= 7.0): 0"));
        assert!(txt.contains("Foreground: empty"));
    }
}
