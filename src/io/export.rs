//! CSV exports for realizations and LISA observables.
//!
//! The exports are meant to be easy to consume in spreadsheets, notebooks or
//! downstream scripts, and the realization CSV can be read back by `load_table`.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::data::Table;
use crate::domain::{ForegroundBin, SnrRecord};
use crate::error::AppError;

fn create_writer(path: &Path, what: &str) -> Result<csv::Writer<File>, AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create {what} CSV '{}'", path.display()), e))?;
    Ok(csv::Writer::from_writer(file))
}

/// Write a table with one header row and full-precision values.
pub fn write_table_csv(path: &Path, table: &Table) -> Result<(), AppError> {
    let mut w = create_writer(path, "realization")?;
    w.write_record(table.names())
        .map_err(|e| AppError::csv("Failed to write realization CSV header", e))?;

    for i in 0..table.n_rows() {
        let row: Vec<String> = table.row(i).iter().map(|v| format!("{v:e}")).collect();
        w.write_record(&row)
            .map_err(|e| AppError::csv("Failed to write realization CSV row", e))?;
    }
    w.flush()
        .map_err(|e| AppError::io(format!("Failed to flush '{}'", path.display()), e))?;
    Ok(())
}

fn write_records<T: Serialize>(path: &Path, what: &str, records: &[T]) -> Result<(), AppError> {
    let mut w = create_writer(path, what)?;
    for rec in records {
        w.serialize(rec)
            .map_err(|e| AppError::csv(format!("Failed to write {what} CSV row"), e))?;
    }
    w.flush()
        .map_err(|e| AppError::io(format!("Failed to flush '{}'", path.display()), e))?;
    Ok(())
}

/// Write per-binary SNRs (`index,f_orb,snr`).
pub fn write_snr_csv(path: &Path, snr: &[SnrRecord]) -> Result<(), AppError> {
    write_records(path, "SNR", snr)
}

/// Write the binned foreground (`f_low,f_high,f_center,psd,n_sources`).
pub fn write_foreground_csv(path: &Path, foreground: &[ForegroundBin]) -> Result<(), AppError> {
    write_records(path, "foreground", foreground)
}
