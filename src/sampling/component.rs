//! Stellar mass of each Galactic component and the mass-weighted sample size.

use crate::domain::GxComponent;
use crate::error::AppError;

/// Stellar mass (Msun) of a Milky Way component (McMillan 2011).
pub fn select_component_mass(component: GxComponent) -> f64 {
    match component {
        GxComponent::ThinDisk => 4.32e10,
        GxComponent::ThickDisk => 1.44e10,
        GxComponent::Bulge => 8.9e9,
    }
}

/// Number of systems in a realization of a component with `component_mass`.
///
/// The fixed population of `n_fixed` binaries represents `fixed_mass` of sampled
/// stars, so the realization scales it by `component_mass / fixed_mass` (floored).
pub fn mass_weighted_number(n_fixed: usize, fixed_mass: f64, component_mass: f64) -> Result<usize, AppError> {
    if n_fixed == 0 {
        return Err(AppError::input("Fixed population is empty."));
    }
    if !(fixed_mass.is_finite() && fixed_mass > 0.0) {
        return Err(AppError::config(format!(
            "Fixed mass must be finite and > 0, got {fixed_mass}."
        )));
    }
    if !(component_mass.is_finite() && component_mass > 0.0) {
        return Err(AppError::config(format!(
            "Component mass must be finite and > 0, got {component_mass}."
        )));
    }

    let n = (n_fixed as f64 * component_mass / fixed_mass).floor();
    if n > usize::MAX as f64 {
        return Err(AppError::numerics("Mass-weighted sample size overflows."));
    }
    Ok(n as usize)
}
