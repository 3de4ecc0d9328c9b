//! Change log: append-only manual change history per collection.
//!
//! # Responsibility
//! - Load and append `data/changes_<collection>.csv`.
//! - Derive each entry's before-value from the prior entry of the same
//!   record.
//!
//! # Invariants
//! - Entries are appended in insertion order and never mutated or removed.
//! - Blank titles or after-values (after trimming) append nothing.

use super::{RepoError, RepoResult};
use crate::model::change::{ChangeEntry, NO_PRIOR_VALUE};
use crate::model::record::RecordId;
use crate::model::reminder::format_date;
use crate::store::{read_table, write_table, DataLayout, Table};
use log::info;
use std::path::PathBuf;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

const COLUMNS: [&str; 5] = ["title", "loggedDate", "valueBefore", "valueAfter", "uuid"];

/// One collection's append-only change history.
#[derive(Debug)]
pub struct ChangeLog {
    collection: String,
    path: PathBuf,
    entries: Vec<ChangeEntry>,
}

impl ChangeLog {
    /// Loads the persisted log; missing storage yields an empty log.
    pub fn load(layout: &DataLayout, collection: &str) -> RepoResult<Self> {
        let path = layout.changes_path(collection);
        let mut entries = Vec::new();

        if let Some(table) = read_table(&path)? {
            let position = |column: &str| table.columns.iter().position(|name| name == column);
            let columns: Vec<Option<usize>> = COLUMNS.iter().map(|name| position(name)).collect();
            let cell = |row: &[String], slot: usize| -> String {
                columns[slot]
                    .and_then(|position| row.get(position))
                    .cloned()
                    .unwrap_or_default()
            };

            for row in &table.rows {
                let uuid_text = cell(row, 4);
                let record = Uuid::parse_str(&uuid_text).map_err(|_| {
                    RepoError::InvalidData(format!(
                        "change entry of `{collection}` has a corrupt uuid `{uuid_text}`"
                    ))
                })?;
                entries.push(ChangeEntry {
                    title: cell(row, 0),
                    logged_date: cell(row, 1),
                    value_before: cell(row, 2),
                    value_after: cell(row, 3),
                    record,
                });
            }
        }

        Ok(Self {
            collection: collection.to_string(),
            path,
            entries,
        })
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[ChangeEntry] {
        &self.entries
    }

    /// Entries for one record, oldest first. Restartable: calling this
    /// again yields a fresh iterator over the same history.
    pub fn entries_for(&self, record: RecordId) -> impl Iterator<Item = &ChangeEntry> + '_ {
        self.entries
            .iter()
            .filter(move |entry| entry.record == record)
    }

    /// Appends one entry stamped with today's date. Returns `false` (and
    /// writes nothing) when the trimmed title or after-value is empty.
    pub fn append(&mut self, record: RecordId, title: &str, after: &str) -> RepoResult<bool> {
        self.append_on(record, title, after, OffsetDateTime::now_utc().date())
    }

    /// Appends one entry with an explicit log date.
    ///
    /// The before-value is the after-value of the most recent prior entry
    /// for the same record (insertion order, not date order), or the
    /// `"none"` sentinel when this record has no history yet.
    pub fn append_on(
        &mut self,
        record: RecordId,
        title: &str,
        after: &str,
        date: Date,
    ) -> RepoResult<bool> {
        let title = title.trim();
        let after = after.trim();
        if title.is_empty() || after.is_empty() {
            return Ok(false);
        }

        let value_before = self
            .entries_for(record)
            .last()
            .map(|entry| entry.value_after.clone())
            .unwrap_or_else(|| NO_PRIOR_VALUE.to_string());

        let mut entries = self.entries.clone();
        entries.push(ChangeEntry {
            title: title.to_string(),
            logged_date: format_date(date),
            value_before,
            value_after: after.to_string(),
            record,
        });
        self.persist(&entries)?;
        self.entries = entries;

        info!(
            "event=change_append module=changes status=ok collection={} uuid={record}",
            self.collection
        );
        Ok(true)
    }

    fn persist(&self, entries: &[ChangeEntry]) -> RepoResult<()> {
        let table = Table {
            columns: COLUMNS.iter().map(|column| column.to_string()).collect(),
            rows: entries
                .iter()
                .map(|entry| {
                    vec![
                        entry.title.clone(),
                        entry.logged_date.clone(),
                        entry.value_before.clone(),
                        entry.value_after.clone(),
                        entry.record.to_string(),
                    ]
                })
                .collect(),
        };
        write_table(&self.path, &table)?;
        Ok(())
    }
}
