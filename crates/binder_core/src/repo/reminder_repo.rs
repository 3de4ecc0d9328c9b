//! Reminder engine: per-record periodic reminder tables.
//!
//! # Responsibility
//! - Load and save `period/<uuid>_period_1.csv` files.
//! - Recompute derived next-due cells on every save.
//!
//! # Invariants
//! - A record's reminder file is keyed by its stable UUID only; it survives
//!   collection deletion (orphaned, not cascaded).
//! - Saving rewrites the full set for that UUID, overwriting prior content.

use super::RepoResult;
use crate::model::record::RecordId;
use crate::model::reminder::ReminderEntry;
use crate::store::{read_table, write_table, DataLayout, Table};
use log::info;
use time::Date;

/// Persisted column order of a reminder table.
const COLUMNS: [&str; 5] = [
    "title",
    "intervalMonths",
    "reminderLeadMonths",
    "lastExecutedDate",
    "nextDueDate",
];

/// Stateless engine over the period folder; cheap to construct per call.
#[derive(Debug)]
pub struct ReminderEngine {
    layout: DataLayout,
}

impl ReminderEngine {
    pub fn new(layout: DataLayout) -> Self {
        Self { layout }
    }

    /// Loads the reminder entries for one record, empty when none exist.
    pub fn load(&self, record: RecordId) -> RepoResult<Vec<ReminderEntry>> {
        let path = self.layout.reminder_path(record);
        let Some(table) = read_table(&path)? else {
            return Ok(Vec::new());
        };

        let cell = |row: &[String], column: &str| -> String {
            table
                .columns
                .iter()
                .position(|name| name == column)
                .and_then(|position| row.get(position))
                .cloned()
                .unwrap_or_default()
        };

        Ok(table
            .rows
            .iter()
            .map(|row| ReminderEntry {
                title: cell(row, COLUMNS[0]),
                interval_months: cell(row, COLUMNS[1]),
                lead_months: cell(row, COLUMNS[2]),
                last_executed: cell(row, COLUMNS[3]),
                next_due: cell(row, COLUMNS[4]),
            })
            .collect())
    }

    /// Recomputes every entry's derived next-due cell and rewrites the
    /// record's reminder file. Returns the refreshed entries.
    pub fn save(
        &self,
        record: RecordId,
        mut entries: Vec<ReminderEntry>,
    ) -> RepoResult<Vec<ReminderEntry>> {
        for entry in &mut entries {
            entry.refresh_next_due();
        }

        let table = Table {
            columns: COLUMNS.iter().map(|column| column.to_string()).collect(),
            rows: entries
                .iter()
                .map(|entry| {
                    vec![
                        entry.title.clone(),
                        entry.interval_months.clone(),
                        entry.lead_months.clone(),
                        entry.last_executed.clone(),
                        entry.next_due.clone(),
                    ]
                })
                .collect(),
        };
        write_table(&self.layout.reminder_path(record), &table)?;

        info!(
            "event=reminders_save module=reminders status=ok uuid={record} count={}",
            entries.len()
        );
        Ok(entries)
    }

    /// Whether any reminder of this record is due for attention on `today`.
    /// Computed on demand; nothing is cached.
    pub fn record_needs_attention(&self, record: RecordId, today: Date) -> RepoResult<bool> {
        Ok(self
            .load(record)?
            .iter()
            .any(|entry| entry.is_due_for_attention(today)))
    }
}
