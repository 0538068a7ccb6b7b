//! CSV ingest for fixed populations and realizations.
//!
//! Design goals:
//! - **Strict schema**: every requested column must exist in the header
//! - **Row-level validation**: unparseable rows are skipped and reported, not fatal
//! - **Deterministic behavior**: column order follows the file header

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::data::Table;
use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: parsed table plus row bookkeeping.
#[derive(Debug, Clone)]
pub struct IngestedTable {
    pub table: Table,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load a numeric CSV that must contain at least one valid row.
///
/// When `columns` is `Some`, only those columns are kept (and must exist);
/// otherwise every column of the header is parsed. A leading unnamed index
/// column (as written by dataframe exports) is ignored.
pub fn load_table(path: &Path, columns: Option<&[String]>) -> Result<IngestedTable, AppError> {
    let ingest = read_table(path, columns)?;
    if ingest.rows_used == 0 {
        return Err(AppError::input(format!("No valid rows in CSV '{}'.", path.display())));
    }
    Ok(ingest)
}

/// Like [`load_table`], but a header-only file yields an empty table.
pub fn read_table(path: &Path, columns: Option<&[String]>) -> Result<IngestedTable, AppError> {
    let file = File::open(path).map_err(|e| AppError::io(format!("Failed to open CSV '{}'", path.display()), e))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::csv("Failed to read CSV headers", e))?
        .clone();
    let header_map = build_header_map(&headers);

    let wanted: Vec<String> = match columns {
        Some(cols) => {
            for name in cols {
                if !header_map.contains_key(name.as_str()) {
                    return Err(AppError::input(format!(
                        "Missing required column in '{}': `{name}`",
                        path.display()
                    )));
                }
            }
            cols.to_vec()
        }
        None => headers
            .iter()
            .map(normalize_header_name)
            .filter(|h| !h.is_empty())
            .collect(),
    };
    if wanted.is_empty() {
        return Err(AppError::input(format!("CSV '{}' has no named columns.", path.display())));
    }
    let indices: Vec<usize> = wanted.iter().map(|name| header_map[name.as_str()]).collect();

    let mut values: Vec<Vec<f64>> = vec![Vec::new(); wanted.len()];
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header and CSV lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &wanted, &indices) {
            Ok(row) => {
                for (col, v) in values.iter_mut().zip(row) {
                    col.push(v);
                }
            }
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    let rows_used = values[0].len();
    if !row_errors.is_empty() {
        tracing::warn!(
            path = %path.display(),
            skipped = row_errors.len(),
            first_line = row_errors[0].line,
            first_error = %row_errors[0].message,
            "skipped invalid CSV rows"
        );
    }

    let table = Table::from_columns(wanted.into_iter().zip(values))?;
    Ok(IngestedTable {
        table,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Strip a UTF-8 BOM on the first header so `mass1` is still found.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn parse_row(record: &StringRecord, names: &[String], indices: &[usize]) -> Result<Vec<f64>, String> {
    names
        .iter()
        .zip(indices)
        .map(|(name, &i)| {
            let raw = record
                .get(i)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| format!("Missing value: `{name}`"))?;
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| format!("Invalid number '{raw}' in `{name}`"))
        })
        .collect()
}
