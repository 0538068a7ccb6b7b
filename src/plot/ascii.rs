//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid, log-log axes), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - foreground bins: `o`
//! - LISA noise PSD: `-` line

use crate::domain::ForegroundBin;
use crate::gw::constants::{LISA_F_MAX, LISA_F_MIN};
use crate::gw::lisa_psd;
use crate::math::log_space;

/// Render the binned foreground against the LISA sensitivity curve.
pub fn render_foreground_plot(foreground: &[ForegroundBin], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (f_min, f_max) = freq_range(foreground).unwrap_or((LISA_F_MIN, LISA_F_MAX));
    let noise = noise_curve(f_min, f_max, width);
    let points: Vec<(f64, f64)> = foreground
        .iter()
        .filter(|b| b.psd > 0.0)
        .map(|b| (b.f_center.log10(), b.psd.log10()))
        .collect();

    let (x_min, x_max) = (f_min.log10(), f_max.log10());
    let (y_min, y_max) = y_range(&points, &noise).unwrap_or((-45.0, -30.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Curve first so points overlay it.
    draw_curve(&mut grid, &noise, x_min, x_max, y_min, y_max);
    for &(x, y) in &points {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: f=[{f_min:.2e}, {f_max:.2e}] Hz | log10 PSD=[{y_min:.2}, {y_max:.2}] (o foreground, - LISA)\n"
    ));
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }

    out
}

fn freq_range(foreground: &[ForegroundBin]) -> Option<(f64, f64)> {
    let mut min_f = f64::INFINITY;
    let mut max_f = f64::NEG_INFINITY;
    for b in foreground {
        min_f = min_f.min(b.f_center);
        max_f = max_f.max(b.f_center);
    }
    if min_f > 0.0 && max_f.is_finite() && max_f > min_f {
        Some((min_f, max_f))
    } else {
        None
    }
}

fn noise_curve(f_min: f64, f_max: f64, n: usize) -> Vec<(f64, f64)> {
    log_space(f_min, f_max, n.max(2))
        .map(|freqs| {
            freqs
                .into_iter()
                .map(|f| (f.log10(), lisa_psd(f).log10()))
                .filter(|(_, y)| y.is_finite())
                .collect()
        })
        .unwrap_or_default()
}

fn y_range(points: &[(f64, f64)], curve: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &(_, y) in points.iter().chain(curve) {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, '-');
        } else {
            grid[row][col] = '-';
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
