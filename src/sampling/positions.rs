//! Galactic positions and orbital orientations for sampled binaries.
//!
//! Coordinates are Galactocentric Cartesian (kpc) with the Sun on the +x axis.
//!
//! Disk components (McMillan 2011) have density
//!
//! ```text
//! ρ(R, z) ∝ exp(-R/Rd - |z|/zd)
//! ```
//!
//! so `R` follows `Gamma(2, Rd)` (the area element contributes a factor `R`) and
//! `|z|` is exponential with mean `zd`. The bulge profile
//!
//! ```text
//! ρ(r') ∝ (1 + r'/r0)^-α exp(-(r'/rcut)^2),   r'^2 = x^2 + y^2 + (z/q)^2
//! ```
//!
//! is spherical in `(x, y, z/q)`, so we sample `r'` from a tabulated inverse CDF,
//! pick an isotropic direction, and squash `z` by `q`.

use std::f64::consts::TAU;

use rand::Rng;
use rand_distr::{Distribution, Exp, Gamma};

use crate::data::Table;
use crate::domain::{GxComponent, GxModel};
use crate::error::AppError;
use crate::math::{InverseCdf, lin_space};

/// Galactocentric radius of the Sun (kpc).
pub const R_SUN: f64 = 8.5;

/// Column names appended to a realization, in order.
pub const POSITION_COLUMNS: [&str; 7] = ["xGx", "yGx", "zGx", "dist", "inc", "OMEGA", "omega"];

const BULGE_GRID_STEPS: usize = 4001;

#[derive(Debug, Clone, Copy)]
struct DiskParams {
    scale_length: f64,
    scale_height: f64,
}

#[derive(Debug, Clone, Copy)]
struct BulgeParams {
    r0: f64,
    r_cut: f64,
    q: f64,
    alpha: f64,
}

const MCMILLAN_THIN: DiskParams = DiskParams {
    scale_length: 2.9,
    scale_height: 0.3,
};

const MCMILLAN_THICK: DiskParams = DiskParams {
    scale_length: 3.31,
    scale_height: 0.9,
};

const MCMILLAN_BULGE: BulgeParams = BulgeParams {
    r0: 0.075,
    r_cut: 2.1,
    q: 0.5,
    alpha: 1.8,
};

/// Sampled positions and orientations, one entry per binary.
#[derive(Debug, Clone, Default)]
pub struct Positions {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    /// Heliocentric distance (kpc).
    pub dist: Vec<f64>,
    /// Inclination (rad), isotropic.
    pub inc: Vec<f64>,
    /// Longitude of the ascending node (rad).
    pub big_omega: Vec<f64>,
    /// Argument of periapsis (rad).
    pub small_omega: Vec<f64>,
}

impl Positions {
    fn with_capacity(n: usize) -> Self {
        Self {
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
            z: Vec::with_capacity(n),
            dist: Vec::with_capacity(n),
            inc: Vec::with_capacity(n),
            big_omega: Vec::with_capacity(n),
            small_omega: Vec::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn into_table(self) -> Result<Table, AppError> {
        Table::from_columns(POSITION_COLUMNS.into_iter().zip([
            self.x,
            self.y,
            self.z,
            self.dist,
            self.inc,
            self.big_omega,
            self.small_omega,
        ]))
    }
}

/// Sample `size` positions within `component` and random orbital orientations.
pub fn galactic_positions<R: Rng + ?Sized>(
    component: GxComponent,
    size: usize,
    model: GxModel,
    rng: &mut R,
) -> Result<Positions, AppError> {
    let mut out = Positions::with_capacity(size);

    match (model, component) {
        (GxModel::McMillan, GxComponent::ThinDisk) => sample_disk(MCMILLAN_THIN, size, rng, &mut out)?,
        (GxModel::McMillan, GxComponent::ThickDisk) => sample_disk(MCMILLAN_THICK, size, rng, &mut out)?,
        (GxModel::McMillan, GxComponent::Bulge) => sample_bulge(MCMILLAN_BULGE, size, rng, &mut out)?,
    }

    for i in 0..size {
        let (x, y, z) = (out.x[i], out.y[i], out.z[i]);
        out.dist.push(((x - R_SUN).powi(2) + y * y + z * z).sqrt());

        let cos_inc: f64 = rng.gen_range(-1.0..=1.0);
        out.inc.push(cos_inc.acos());
        out.big_omega.push(rng.gen_range(0.0..TAU));
        out.small_omega.push(rng.gen_range(0.0..TAU));
    }

    Ok(out)
}

fn sample_disk<R: Rng + ?Sized>(
    params: DiskParams,
    size: usize,
    rng: &mut R,
    out: &mut Positions,
) -> Result<(), AppError> {
    let radial = Gamma::new(2.0, params.scale_length)
        .map_err(|e| AppError::numerics(format!("Disk radial distribution error: {e}")))?;
    let vertical = Exp::new(1.0 / params.scale_height)
        .map_err(|e| AppError::numerics(format!("Disk vertical distribution error: {e}")))?;

    for _ in 0..size {
        let r = radial.sample(rng);
        let phi = rng.gen_range(0.0..TAU);
        let abs_z = vertical.sample(rng);
        let z = if rng.r#gen::<bool>() { abs_z } else { -abs_z };

        out.x.push(r * phi.cos());
        out.y.push(r * phi.sin());
        out.z.push(z);
    }
    Ok(())
}

fn sample_bulge<R: Rng + ?Sized>(
    params: BulgeParams,
    size: usize,
    rng: &mut R,
    out: &mut Positions,
) -> Result<(), AppError> {
    let grid = lin_space(0.0, 5.0 * params.r_cut, BULGE_GRID_STEPS)?;
    let radial = InverseCdf::from_pdf(grid, |r| {
        r * r * (1.0 + r / params.r0).powf(-params.alpha) * (-(r / params.r_cut).powi(2)).exp()
    })?;

    for _ in 0..size {
        let r = radial.sample(rng.r#gen::<f64>());
        let cos_theta: f64 = rng.gen_range(-1.0..=1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
        let phi = rng.gen_range(0.0..TAU);

        out.x.push(r * sin_theta * phi.cos());
        out.y.push(r * sin_theta * phi.sin());
        out.z.push(params.q * r * cos_theta);
    }
    Ok(())
}
