//! Bounded-to-unbounded transform for KDE sampling.
//!
//! Each column is rescaled into `(0, 1)` with a small margin outside the observed
//! range, then mapped to the real line with `logit`. Sampling the KDE in logit
//! space and mapping back with `expit` keeps every resampled value inside the
//! padded bounds, so e.g. periods stay positive.
//!
//! Padding a bound that sits on zero pushes it below zero, so un-transformed
//! values are also clamped to the column's limits: `[0, ∞)` for non-negative
//! data, narrowed further by `with_limits` for quantities such as eccentricity.

use nalgebra::DMatrix;

use crate::data::Table;
use crate::error::AppError;
use crate::math::min_max;

/// Fractional margin applied to each bound.
const BOUND_PAD: f64 = 0.05;

pub fn logit(x: f64) -> f64 {
    (x / (1.0 - x)).ln()
}

pub fn expit(x: f64) -> f64 {
    // Stable for large |x|.
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Fitted per-column bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct DatTransform {
    columns: Vec<String>,
    /// Observed `(min, max)` per column.
    ranges: Vec<(f64, f64)>,
    /// Padded transform bounds.
    bounds: Vec<(f64, f64)>,
    /// Clamp range for un-transformed values.
    limits: Vec<(f64, f64)>,
}

impl DatTransform {
    /// Compute padded bounds for `columns` of `table`.
    ///
    /// For strictly positive data the bounds are `0.95 min` and `1.05 max`; a bound
    /// that sits on zero is padded by 5% of the column span instead. Constant
    /// columns are rejected.
    pub fn fit(table: &Table, columns: &[String]) -> Result<Self, AppError> {
        if columns.is_empty() {
            return Err(AppError::config("No parameters selected for KDE sampling."));
        }

        let mut ranges = Vec::with_capacity(columns.len());
        let mut bounds = Vec::with_capacity(columns.len());
        let mut limits = Vec::with_capacity(columns.len());
        for name in columns {
            let values = table.require_column(name)?;
            if values.iter().any(|v| !v.is_finite()) {
                return Err(AppError::input(format!("Column `{name}` contains non-finite values.")));
            }
            let (lo, hi) = min_max(values)
                .ok_or_else(|| AppError::input(format!("Column `{name}` is empty.")))?;
            if hi <= lo {
                return Err(AppError::input(format!(
                    "Column `{name}` is constant ({lo}); the KDE cannot resample it. Remove it from the parameter list."
                )));
            }

            let span = hi - lo;
            ranges.push((lo, hi));
            bounds.push((lo - pad(lo, span), hi + pad(hi, span)));
            limits.push((if lo >= 0.0 { 0.0 } else { f64::NEG_INFINITY }, f64::INFINITY));
        }

        Ok(Self {
            columns: columns.to_vec(),
            ranges,
            bounds,
            limits,
        })
    }

    /// Restrict `column` to the physical range `[lo, hi]`.
    ///
    /// Bounds are pulled inside the limits wherever the data leaves room, and
    /// un-transformed values are clamped to them. Columns not being sampled are
    /// ignored; observed data outside the limits is an input error.
    pub fn with_limits(mut self, column: &str, lo: f64, hi: f64) -> Result<Self, AppError> {
        let Some(i) = self.columns.iter().position(|c| c == column) else {
            return Ok(self);
        };
        let (d_min, d_max) = self.ranges[i];
        if d_min < lo || d_max > hi {
            return Err(AppError::input(format!(
                "Column `{column}` spans [{d_min}, {d_max}], outside its physical range [{lo}, {hi}]."
            )));
        }

        let (b_lo, b_hi) = &mut self.bounds[i];
        if d_min > lo {
            *b_lo = b_lo.max(lo);
        }
        if d_max < hi {
            *b_hi = b_hi.min(hi);
        }
        let (l_lo, l_hi) = &mut self.limits[i];
        *l_lo = l_lo.max(lo);
        *l_hi = l_hi.min(hi);
        Ok(self)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn bounds(&self) -> &[(f64, f64)] {
        &self.bounds
    }

    pub fn limits(&self) -> &[(f64, f64)] {
        &self.limits
    }

    /// Transform `table` into a `d × n` logit-space matrix.
    pub fn dat_transform(&self, table: &Table) -> Result<DMatrix<f64>, AppError> {
        let n = table.n_rows();
        let mut out = DMatrix::<f64>::zeros(self.columns.len(), n);
        for (i, (name, &(lo, hi))) in self.columns.iter().zip(self.bounds.iter()).enumerate() {
            let values = table.require_column(name)?;
            for (k, &v) in values.iter().enumerate() {
                let y = logit((v - lo) / (hi - lo));
                if !y.is_finite() {
                    return Err(AppError::input(format!(
                        "Value {v} of `{name}` lies outside the KDE bounds [{lo}, {hi}]."
                    )));
                }
                out[(i, k)] = y;
            }
        }
        Ok(out)
    }

    /// Map a `d × n` logit-space matrix back to a table with the original columns.
    pub fn dat_un_transform(&self, samples: &DMatrix<f64>) -> Result<Table, AppError> {
        if samples.nrows() != self.columns.len() {
            return Err(AppError::numerics(format!(
                "Sample matrix has {} rows, expected {}.",
                samples.nrows(),
                self.columns.len()
            )));
        }

        let columns = self
            .columns
            .iter()
            .zip(self.bounds.iter().zip(self.limits.iter()))
            .enumerate()
            .map(|(i, (name, (&(lo, hi), &(min, max))))| {
                let values = samples
                    .row(i)
                    .iter()
                    .map(|&y| (expit(y) * (hi - lo) + lo).max(min).min(max))
                    .collect();
                (name.clone(), values)
            });
        Table::from_columns(columns)
    }
}

fn pad(bound: f64, span: f64) -> f64 {
    let p = BOUND_PAD * bound.abs();
    if p > 0.0 { p } else { BOUND_PAD * span }
}
