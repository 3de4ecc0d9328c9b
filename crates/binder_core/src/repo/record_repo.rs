//! Record store: ordered records of one collection over a CSV file.
//!
//! # Responsibility
//! - CRUD, reordering and UUID assignment for a collection's records.
//! - Keep the full record set persisted synchronously after every change.
//!
//! # Invariants
//! - A record's UUID is assigned once, by `ensure_uuid`, and never changes.
//! - Ad hoc field insertion appends a storage column but never touches the
//!   schema template.
//! - A failed write leaves the in-memory record set untouched.

use super::registry::CollectionEntry;
use super::{MoveDirection, RepoError, RepoResult};
use crate::model::field_value::FieldValue;
use crate::model::record::{Record, RecordId, UUID_FIELD};
use crate::store::{read_table, write_table, DataLayout, Table};
use log::info;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Ordered, file-backed record set of one collection.
#[derive(Debug)]
pub struct RecordStore {
    collection: String,
    path: PathBuf,
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl RecordStore {
    /// Loads the collection's records; missing storage yields an empty set.
    pub fn load(layout: &DataLayout, entry: &CollectionEntry) -> RepoResult<Self> {
        let path = layout.records_path(&entry.storage);
        let (columns, rows) = match read_table(&path)? {
            Some(table) => {
                let rows = table
                    .rows
                    .into_iter()
                    .map(|cells| {
                        Record::from_cells(
                            table.columns.iter().cloned().zip(cells).collect(),
                        )
                    })
                    .collect();
                (table.columns, rows)
            }
            None => (Vec::new(), Vec::new()),
        };

        Ok(Self {
            collection: entry.name.clone(),
            path,
            columns,
            rows,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Storage columns in persisted order (the template may differ).
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> RepoResult<&Record> {
        self.rows.get(index).ok_or(RepoError::RowOutOfRange {
            index,
            len: self.rows.len(),
        })
    }

    /// Decoded value of one cell.
    pub fn value(&self, index: usize, key: &str) -> RepoResult<FieldValue> {
        Ok(self.get(index)?.value(key))
    }

    /// Appends a record with every known field set to empty text. No UUID
    /// is assigned yet; identity stays lazy until the record is detailed.
    ///
    /// # Errors
    /// - `SchemaUndefined` when the collection has no fields and no rows.
    pub fn create(&mut self) -> RepoResult<usize> {
        if self.columns.is_empty() && self.rows.is_empty() {
            return Err(RepoError::SchemaUndefined(self.collection.clone()));
        }

        let mut rows = self.rows.clone();
        rows.push(Record::empty(&self.columns));
        self.persist(&self.columns, &rows)?;
        self.rows = rows;
        Ok(self.rows.len() - 1)
    }

    /// Writes one cell. Unknown keys append a storage column; the schema
    /// template is deliberately left alone.
    ///
    /// # Errors
    /// - `ReservedField` for the UUID column (managed by `ensure_uuid`).
    pub fn update(&mut self, index: usize, key: &str, value: &FieldValue) -> RepoResult<()> {
        self.get(index)?;
        if key == UUID_FIELD {
            return Err(RepoError::ReservedField(UUID_FIELD.to_string()));
        }

        let mut columns = self.columns.clone();
        if !columns.iter().any(|column| column == key) {
            columns.push(key.to_string());
        }
        let mut rows = self.rows.clone();
        rows[index].set_raw(key, value.encode());

        self.persist(&columns, &rows)?;
        self.columns = columns;
        self.rows = rows;
        Ok(())
    }

    /// Removes a record; subsequent positions renumber.
    pub fn delete(&mut self, index: usize) -> RepoResult<()> {
        self.get(index)?;
        let mut rows = self.rows.clone();
        rows.remove(index);
        self.persist(&self.columns, &rows)?;
        self.rows = rows;
        Ok(())
    }

    /// Swaps a record with its neighbor; no-op at either boundary.
    pub fn move_record(&mut self, index: usize, direction: MoveDirection) -> RepoResult<()> {
        self.get(index)?;
        let Some(neighbor) = direction.neighbor(index, self.rows.len()) else {
            return Ok(());
        };

        let mut rows = self.rows.clone();
        rows.swap(index, neighbor);
        self.persist(&self.columns, &rows)?;
        self.rows = rows;
        Ok(())
    }

    /// Returns the record's stable ID, generating and persisting one on
    /// first call. Idempotent: an assigned ID is returned as-is with no
    /// further write.
    pub fn ensure_uuid(&mut self, index: usize) -> RepoResult<RecordId> {
        let raw = self.get(index)?.raw(UUID_FIELD);
        if !raw.is_empty() {
            return Uuid::parse_str(raw).map_err(|_| {
                RepoError::InvalidData(format!(
                    "record {index} of `{}` has a corrupt UUID cell `{raw}`",
                    self.collection
                ))
            });
        }

        let id = Uuid::new_v4();
        let mut columns = self.columns.clone();
        if !columns.iter().any(|column| column == UUID_FIELD) {
            columns.push(UUID_FIELD.to_string());
        }
        let mut rows = self.rows.clone();
        rows[index].set_raw(UUID_FIELD, id.to_string());

        self.persist(&columns, &rows)?;
        self.columns = columns;
        self.rows = rows;
        info!(
            "event=uuid_assign module=records status=ok collection={} position={index} uuid={id}",
            self.collection
        );
        Ok(id)
    }

    /// Writes the selected columns of every record to `dest` as a table,
    /// preserving record order and the given field order. The destination is
    /// caller-chosen and independent of the collection's own storage.
    ///
    /// # Errors
    /// - `UnknownField` (before anything is written) when a requested field
    ///   is not a storage column.
    pub fn export_fields(&self, fields: &[String], dest: &Path) -> RepoResult<()> {
        for field in fields {
            if !self.columns.iter().any(|column| column == field) {
                return Err(RepoError::UnknownField(field.clone()));
            }
        }

        let table = Table {
            columns: fields.to_vec(),
            rows: self
                .rows
                .iter()
                .map(|record| {
                    fields
                        .iter()
                        .map(|field| record.raw(field).to_string())
                        .collect()
                })
                .collect(),
        };
        write_table(dest, &table)?;

        info!(
            "event=records_export module=records status=ok collection={} fields={} dest={}",
            self.collection,
            fields.len(),
            dest.display()
        );
        Ok(())
    }

    /// Linear scan for the record carrying `id`. Explicit not-found when
    /// the ID is absent or the collection has no UUID column at all.
    pub fn resolve_by_uuid(&self, id: RecordId) -> Option<(usize, &Record)> {
        if !self.columns.iter().any(|column| column == UUID_FIELD) {
            return None;
        }
        let wanted = id.to_string();
        self.rows
            .iter()
            .enumerate()
            .find(|(_, record)| record.raw(UUID_FIELD) == wanted)
    }

    /// Rewrites the whole collection file from a candidate state; callers
    /// commit to memory only after this succeeds.
    fn persist(&self, columns: &[String], rows: &[Record]) -> RepoResult<()> {
        let table = Table {
            columns: columns.to_vec(),
            rows: rows
                .iter()
                .map(|record| {
                    columns
                        .iter()
                        .map(|column| record.raw(column).to_string())
                        .collect()
                })
                .collect(),
        };
        write_table(&self.path, &table)?;
        Ok(())
    }
}
