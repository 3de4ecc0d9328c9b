//! CSV table read/write helpers.
//!
//! # Responsibility
//! - Load a whole tabular file into memory as columns plus string rows.
//! - Rewrite a whole tabular file from memory in one pass.
//!
//! # Invariants
//! - A missing file reads as `None`; the caller decides what empty means.
//! - Writes replace the entire file; there is no in-place row update.

use super::{StoreError, StoreResult};
use std::path::Path;

/// An in-memory tabular file: ordered header plus rows of raw cells.
///
/// Rows are stored positionally; row length always equals the column count
/// after a read (short rows are padded, long rows truncated).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }
}

/// Reads a whole table, or `None` when the file does not exist.
pub fn read_table(path: &Path) -> StoreResult<Option<Table>> {
    if !path.exists() {
        return Ok(None);
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|err| StoreError::csv(path, err))?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(|err| StoreError::csv(path, err))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|err| StoreError::csv(path, err))?;
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(columns.len(), String::new());
        rows.push(row);
    }

    Ok(Some(Table { columns, rows }))
}

/// Rewrites the whole table at `path`, creating parent directories.
pub fn write_table(path: &Path, table: &Table) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))?;
    }

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|err| StoreError::csv(path, err))?;

    writer
        .write_record(&table.columns)
        .map_err(|err| StoreError::csv(path, err))?;

    for row in &table.rows {
        let mut cells = row.clone();
        cells.resize(table.columns.len(), String::new());
        writer
            .write_record(&cells)
            .map_err(|err| StoreError::csv(path, err))?;
    }

    writer
        .flush()
        .map_err(|err| StoreError::io(path, err))?;
    Ok(())
}
