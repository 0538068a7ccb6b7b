//! Special functions needed by the bandwidth selector and the GW harmonics.
//!
//! - `ln_gamma`: Lanczos approximation (g = 7, 9 coefficients), ~15 digits for x > 0.
//! - `bessel_j`: integer-order Bessel functions of the first kind via Bessel's integral
//!
//! ```text
//! J_n(x) = (1/π) ∫_0^π cos(nτ - x sin τ) dτ
//! ```
//!
//! The integrand extends to a smooth 2π-periodic function, so the trapezoid rule
//! converges geometrically once the node count exceeds `|n| + |x|`.

use std::f64::consts::PI;

const LANCZOS_G: f64 = 7.0;

const LANCZOS_COEFFS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Extra trapezoid nodes beyond `|n| + |x|`.
const BESSEL_EXTRA_NODES: usize = 32;

/// Natural log of the gamma function for `x > 0`.
///
/// Uses the reflection formula below 0.5 so small arguments (e.g. `Γ(1/2)`) keep
/// full precision.
pub fn ln_gamma(x: f64) -> f64 {
    if x < 0.5 {
        // Γ(x) Γ(1-x) = π / sin(πx)
        return (PI / (PI * x).sin()).ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let mut acc = LANCZOS_COEFFS[0];
    for (i, &c) in LANCZOS_COEFFS.iter().enumerate().skip(1) {
        acc += c / (x + i as f64);
    }
    let t = x + LANCZOS_G + 0.5;
    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + acc.ln()
}

/// Bessel function of the first kind, integer order `n` (negative orders allowed).
pub fn bessel_j(n: i64, x: f64) -> f64 {
    if x == 0.0 {
        return if n == 0 { 1.0 } else { 0.0 };
    }

    let nodes = n.unsigned_abs() as usize + x.abs().ceil() as usize + BESSEL_EXTRA_NODES;
    let h = PI / nodes as f64;
    let nf = n as f64;

    let integrand = |tau: f64| (nf * tau - x * tau.sin()).cos();

    let mut sum = 0.5 * (integrand(0.0) + integrand(PI));
    for k in 1..nodes {
        sum += integrand(k as f64 * h);
    }
    sum * h / PI
}
