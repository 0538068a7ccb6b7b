//! Column-major numeric table.
//!
//! Fixed populations and realizations are both stored as named `f64` columns of
//! equal length. Rows are binaries; columns are physical parameters.

use crate::domain::RowFilter;
use crate::error::AppError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, values)` pairs.
    pub fn from_columns<I, S>(columns: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (name, values) in columns {
            table.push_column(name, values)?;
        }
        Ok(table)
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        let idx = self.names.iter().position(|n| n == name)?;
        Some(&self.columns[idx])
    }

    pub fn require_column(&self, name: &str) -> Result<&[f64], AppError> {
        self.column(name)
            .ok_or_else(|| AppError::input(format!("Missing required column: `{name}`")))
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.names
            .iter()
            .zip(self.columns.iter())
            .map(|(n, c)| (n.as_str(), c.as_slice()))
    }

    /// Values of row `i` in column order.
    pub fn row(&self, i: usize) -> Vec<f64> {
        self.columns.iter().map(|c| c[i]).collect()
    }

    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<(), AppError> {
        let name = name.into();
        if self.names.contains(&name) {
            return Err(AppError::input(format!("Duplicate column: `{name}`")));
        }
        if !self.columns.is_empty() && values.len() != self.n_rows() {
            return Err(AppError::input(format!(
                "Column `{name}` has {} rows, expected {}.",
                values.len(),
                self.n_rows()
            )));
        }
        self.names.push(name);
        self.columns.push(values);
        Ok(())
    }

    /// New table with only `names`, in the given order.
    pub fn select_columns(&self, names: &[String]) -> Result<Table, AppError> {
        let mut out = Table::new();
        for name in names {
            out.push_column(name.clone(), self.require_column(name)?.to_vec())?;
        }
        Ok(out)
    }

    /// Append the columns of `other` (same row count, distinct names).
    pub fn extend(&mut self, other: Table) -> Result<(), AppError> {
        for (name, values) in other.names.into_iter().zip(other.columns) {
            self.push_column(name, values)?;
        }
        Ok(())
    }

    /// Keep only rows accepted by every filter.
    pub fn filter_rows(&self, filters: &[RowFilter]) -> Result<Table, AppError> {
        if filters.is_empty() {
            return Ok(self.clone());
        }

        let mut keep = vec![true; self.n_rows()];
        for f in filters {
            let col = self.require_column(&f.column)?;
            for (k, &v) in keep.iter_mut().zip(col) {
                *k = *k && f.accepts(v);
            }
        }

        let columns = self
            .names
            .iter()
            .zip(self.columns.iter())
            .map(|(name, col)| {
                let values = col
                    .iter()
                    .zip(keep.iter())
                    .filter_map(|(&v, &k)| k.then_some(v))
                    .collect();
                (name.clone(), values)
            });
        Table::from_columns(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::from_columns([
            ("mass1", vec![0.6, 0.8, 1.0]),
            ("porb", vec![0.001, 0.01, 0.1]),
        ])
        .unwrap()
    }

    #[test]
    fn push_column_rejects_length_mismatch() {
        let mut t = sample_table();
        assert!(t.push_column("ecc", vec![0.0]).is_err());
        assert!(t.push_column("mass1", vec![0.0, 0.0, 0.0]).is_err());
    }

    #[test]
    fn filter_rows_applies_all_filters() {
        let t = sample_table();
        let filters = vec![
            RowFilter { column: "porb".into(), min: None, max: Some(0.05) },
            RowFilter { column: "mass1".into(), min: Some(0.7), max: None },
        ];
        let out = t.filter_rows(&filters).unwrap();
        assert_eq!(out.n_rows(), 1);
        assert_eq!(out.column("mass1").unwrap(), &[0.8]);
    }

    #[test]
    fn filter_on_unknown_column_is_an_error() {
        let t = sample_table();
        let filters = vec![RowFilter { column: "sep".into(), min: None, max: None }];
        assert!(t.filter_rows(&filters).is_err());
    }

    #[test]
    fn select_columns_reorders() {
        let t = sample_table();
        let out = t.select_columns(&["porb".to_string(), "mass1".to_string()]).unwrap();
        assert_eq!(out.names(), &["porb".to_string(), "mass1".to_string()]);
        assert_eq!(out.row(2), vec![0.1, 1.0]);
    }
}
