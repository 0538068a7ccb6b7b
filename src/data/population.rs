//! Fixed population: the evolved binaries a realization is resampled from.

use crate::data::table::Table;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct FixedPopulation {
    pub table: Table,
    /// Total stellar mass (Msun) sampled to produce `table`.
    pub fixed_mass: f64,
}

impl FixedPopulation {
    pub fn new(table: Table, fixed_mass: f64) -> Result<Self, AppError> {
        if !(fixed_mass.is_finite() && fixed_mass > 0.0) {
            return Err(AppError::config(format!(
                "Fixed mass must be finite and > 0, got {fixed_mass}."
            )));
        }
        Ok(Self { table, fixed_mass })
    }

    pub fn n_binaries(&self) -> usize {
        self.table.n_rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_fixed_mass() {
        assert!(FixedPopulation::new(Table::new(), 0.0).is_err());
        assert!(FixedPopulation::new(Table::new(), f64::NAN).is_err());
        assert!(FixedPopulation::new(Table::new(), 1e6).is_ok());
    }
}
