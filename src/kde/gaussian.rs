//! Multivariate Gaussian kernel density estimate.
//!
//! Follows the `scipy.stats.gaussian_kde` convention for a scalar bandwidth:
//! the kernel covariance is the (unbiased) data covariance scaled by
//! `bw_factor^2`, so the bandwidth is relative to the spread of the data.

use std::f64::consts::PI;

use nalgebra::{DMatrix, DVector};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::error::AppError;
use crate::math::covariance;

/// Diagonal jitter levels (relative to the mean variance) tried when the kernel
/// covariance is not positive definite.
const JITTER_LEVELS: [f64; 4] = [0.0, 1e-12, 1e-9, 1e-6];

#[derive(Debug, Clone)]
pub struct GaussianKde {
    /// `d × n` training samples.
    dataset: DMatrix<f64>,
    bw_factor: f64,
    covariance: DMatrix<f64>,
    /// Lower Cholesky factor of `covariance`.
    chol_lower: DMatrix<f64>,
    inv_covariance: DMatrix<f64>,
    log_norm: f64,
}

impl GaussianKde {
    pub fn new(dataset: DMatrix<f64>, bw_factor: f64) -> Result<Self, AppError> {
        let (d, n) = dataset.shape();
        if d == 0 || n < 2 {
            return Err(AppError::input(format!(
                "KDE needs at least 1 variable and 2 samples, got {d} x {n}."
            )));
        }
        if !(bw_factor.is_finite() && bw_factor > 0.0) {
            return Err(AppError::numerics(format!("Invalid KDE bandwidth factor: {bw_factor}.")));
        }

        let data_cov = covariance(&dataset)
            .ok_or_else(|| AppError::numerics("Failed to compute data covariance."))?;
        let base = data_cov * (bw_factor * bw_factor);

        let scale = base.diagonal().iter().map(|v| v.abs()).sum::<f64>() / d as f64;
        let (cov, chol) = JITTER_LEVELS
            .iter()
            .find_map(|&jitter| {
                let mut cov = base.clone();
                for i in 0..d {
                    cov[(i, i)] += jitter * scale.max(f64::MIN_POSITIVE);
                }
                cov.clone()
                    .cholesky()
                    .filter(|c| c.l_dirty().diagonal().iter().all(|v| v.is_finite() && *v > 0.0))
                    .map(|c| (cov, c))
            })
            .ok_or_else(|| {
                AppError::numerics("KDE covariance is singular (are some parameters perfectly correlated?).")
            })?;

        let chol_lower = chol.l();
        let inv_covariance = chol.inverse();
        let log_det: f64 = 2.0 * chol_lower.diagonal().iter().map(|v| v.ln()).sum::<f64>();
        let log_norm = -0.5 * (d as f64 * (2.0 * PI).ln() + log_det) - (n as f64).ln();

        tracing::debug!(d, n, bw_factor, log_det, "built Gaussian KDE");

        Ok(Self {
            dataset,
            bw_factor,
            covariance: cov,
            chol_lower,
            inv_covariance,
            log_norm,
        })
    }

    pub fn dim(&self) -> usize {
        self.dataset.nrows()
    }

    pub fn n_samples(&self) -> usize {
        self.dataset.ncols()
    }

    pub fn bw_factor(&self) -> f64 {
        self.bw_factor
    }

    pub fn covariance(&self) -> &DMatrix<f64> {
        &self.covariance
    }

    /// Draw `size` new samples as a `d × size` matrix.
    pub fn resample<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> DMatrix<f64> {
        let d = self.dim();
        let n = self.n_samples();
        let mut out = DMatrix::<f64>::zeros(d, size);
        let mut z = DVector::<f64>::zeros(d);

        for k in 0..size {
            let src = rng.gen_range(0..n);
            for i in 0..d {
                z[i] = StandardNormal.sample(rng);
            }
            let noise = &self.chol_lower * &z;
            for i in 0..d {
                out[(i, k)] = self.dataset[(i, src)] + noise[i];
            }
        }
        out
    }

    /// Density at `point` (length `d`).
    pub fn evaluate(&self, point: &[f64]) -> Result<f64, AppError> {
        if point.len() != self.dim() {
            return Err(AppError::input(format!(
                "KDE point has {} coordinates, expected {}.",
                point.len(),
                self.dim()
            )));
        }

        let x = DVector::from_column_slice(point);
        let mut total = 0.0;
        for col in self.dataset.column_iter() {
            let diff = &x - col;
            let m = (diff.transpose() * &self.inv_covariance * &diff)[(0, 0)];
            total += (self.log_norm - 0.5 * m).exp();
        }
        Ok(total)
    }
}
