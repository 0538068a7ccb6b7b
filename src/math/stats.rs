//! Summary statistics on slices and `d × n` sample matrices.

use nalgebra::DMatrix;

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Unbiased (ddof = 1) standard deviation.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let mu = mean(data)?;
    let ss: f64 = data.iter().map(|v| (v - mu) * (v - mu)).sum();
    Some((ss / (data.len() as f64 - 1.0)).sqrt())
}

pub fn min_max(data: &[f64]) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in data {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if lo.is_finite() && hi.is_finite() {
        Some((lo, hi))
    } else {
        None
    }
}

/// Unbiased covariance of a `d × n` matrix (rows are variables, columns samples).
///
/// Returns `None` with fewer than two samples.
pub fn covariance(data: &DMatrix<f64>) -> Option<DMatrix<f64>> {
    let (d, n) = data.shape();
    if n < 2 {
        return None;
    }

    let means: Vec<f64> = (0..d).map(|i| data.row(i).sum() / n as f64).collect();
    let mut cov = DMatrix::<f64>::zeros(d, d);
    for i in 0..d {
        for j in i..d {
            let mut acc = 0.0;
            for k in 0..n {
                acc += (data[(i, k)] - means[i]) * (data[(j, k)] - means[j]);
            }
            let v = acc / (n as f64 - 1.0);
            cov[(i, j)] = v;
            cov[(j, i)] = v;
        }
    }
    Some(cov)
}
