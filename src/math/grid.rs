//! Grids and tabulated inverse-CDF sampling.
//!
//! Densities without a closed-form inverse CDF (e.g. the bulge profile) are
//! tabulated on a fixed grid, integrated with the trapezoid rule, and inverted by
//! linear interpolation. This keeps sampling deterministic for a given RNG stream.

use crate::error::AppError;

/// Generate `steps` evenly spaced points between `min` and `max` (inclusive).
pub fn lin_space(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, AppError> {
    if !(min.is_finite() && max.is_finite() && max > min) {
        return Err(AppError::config(format!(
            "Invalid grid range: min={min}, max={max} (must be finite and max>min)."
        )));
    }
    if steps < 2 {
        return Err(AppError::config("Grid steps must be >= 2."));
    }

    let step = (max - min) / (steps as f64 - 1.0);
    Ok((0..steps).map(|i| min + step * i as f64).collect())
}

/// Generate `steps` log-spaced points between `min` and `max` (inclusive).
pub fn log_space(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, AppError> {
    if !(min > 0.0 && max > 0.0) {
        return Err(AppError::config(format!(
            "Invalid log grid range: min={min}, max={max} (must be >0)."
        )));
    }
    Ok(lin_space(min.ln(), max.ln(), steps)?
        .into_iter()
        .map(f64::exp)
        .collect())
}

pub fn linear_interp(a: (f64, f64), b: (f64, f64), x: f64) -> f64 {
    let (x0, y0) = a;
    let (x1, y1) = b;
    if (x1 - x0).abs() < 1e-300 {
        return y0;
    }
    let u = (x - x0) / (x1 - x0);
    y0 + u * (y1 - y0)
}

/// Tabulated inverse CDF of an unnormalised 1-D density.
#[derive(Debug, Clone)]
pub struct InverseCdf {
    x: Vec<f64>,
    cdf: Vec<f64>,
}

impl InverseCdf {
    /// Tabulate `pdf` on `grid` (must be increasing) and normalise.
    pub fn from_pdf(grid: Vec<f64>, pdf: impl Fn(f64) -> f64) -> Result<Self, AppError> {
        if grid.len() < 2 {
            return Err(AppError::config("Inverse CDF grid needs at least 2 points."));
        }

        let dens: Vec<f64> = grid.iter().map(|&x| pdf(x).max(0.0)).collect();
        if dens.iter().any(|d| !d.is_finite()) {
            return Err(AppError::numerics("Density is not finite on the sampling grid."));
        }

        let mut cdf = Vec::with_capacity(grid.len());
        cdf.push(0.0);
        for i in 1..grid.len() {
            let area = 0.5 * (dens[i] + dens[i - 1]) * (grid[i] - grid[i - 1]);
            cdf.push(cdf[i - 1] + area);
        }

        let total = cdf[cdf.len() - 1];
        if !(total.is_finite() && total > 0.0) {
            return Err(AppError::numerics("Density integrates to zero on the sampling grid."));
        }
        for c in cdf.iter_mut() {
            *c /= total;
        }

        Ok(Self { x: grid, cdf })
    }

    /// Map a uniform deviate `u ∈ [0, 1]` to a sample.
    pub fn sample(&self, u: f64) -> f64 {
        let u = u.clamp(0.0, 1.0);
        // First index with cdf >= u.
        let idx = self.cdf.partition_point(|&c| c < u);
        if idx == 0 {
            return self.x[0];
        }
        if idx >= self.cdf.len() {
            return self.x[self.x.len() - 1];
        }
        linear_interp(
            (self.cdf[idx - 1], self.x[idx - 1]),
            (self.cdf[idx], self.x[idx]),
            u,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_space_includes_endpoints() {
        let v = log_space(1e-5, 1.0, 6).unwrap();
        assert!((v[0] - 1e-5).abs() < 1e-18);
        assert!((v[5] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn lin_space_rejects_bad_range() {
        assert!(lin_space(1.0, 1.0, 10).is_err());
        assert!(lin_space(0.0, 1.0, 1).is_err());
    }

    #[test]
    fn inverse_cdf_of_uniform_is_identity() {
        let grid = lin_space(0.0, 2.0, 101).unwrap();
        let inv = InverseCdf::from_pdf(grid, |_| 1.0).unwrap();
        assert!((inv.sample(0.0) - 0.0).abs() < 1e-12);
        assert!((inv.sample(0.25) - 0.5).abs() < 1e-12);
        assert!((inv.sample(1.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn inverse_cdf_of_linear_density() {
        // pdf ∝ x on [0, 1] -> CDF = x^2 -> inverse = sqrt(u)
        let grid = lin_space(0.0, 1.0, 2001).unwrap();
        let inv = InverseCdf::from_pdf(grid, |x| x).unwrap();
        for &u in &[0.1, 0.5, 0.9] {
            assert!((inv.sample(u) - f64::sqrt(u)).abs() < 1e-3);
        }
    }

    #[test]
    fn inverse_cdf_rejects_zero_density() {
        let grid = lin_space(0.0, 1.0, 11).unwrap();
        assert!(InverseCdf::from_pdf(grid, |_| 0.0).is_err());
    }
}
