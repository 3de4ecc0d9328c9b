//! Collection service: registry plus per-collection handles.
//!
//! # Responsibility
//! - Open a data root and expose the collection registry.
//! - Hand out one `Collection` handle owning a collection's record,
//!   schema, change-log and reminder state.
//!
//! # Invariants
//! - Handles are snapshots of their backing files; callers re-fetch after
//!   mutating through another handle (single active writer assumed).
//! - Internal links resolve only within the handle's own collection.

use crate::model::field_value::FieldValue;
use crate::model::record::Record;
use crate::repo::change_repo::ChangeLog;
use crate::repo::record_repo::RecordStore;
use crate::repo::registry::CollectionRegistry;
use crate::repo::reminder_repo::ReminderEngine;
use crate::repo::schema_repo::SchemaManager;
use crate::repo::{RepoError, RepoResult};
use crate::store::DataLayout;
use std::path::{Path, PathBuf};
use time::Date;

/// Entry point over one data root directory.
#[derive(Debug)]
pub struct CollectionService {
    registry: CollectionRegistry,
}

impl CollectionService {
    /// Opens (or seeds) the data root and loads the registry.
    pub fn open(root: impl Into<PathBuf>) -> RepoResult<Self> {
        let registry = CollectionRegistry::open(DataLayout::new(root))?;
        Ok(Self { registry })
    }

    pub fn layout(&self) -> &DataLayout {
        self.registry.layout()
    }

    pub fn registry(&self) -> &CollectionRegistry {
        &self.registry
    }

    /// Mutable registry access for create/delete/reorder.
    pub fn registry_mut(&mut self) -> &mut CollectionRegistry {
        &mut self.registry
    }

    /// Loads a fresh handle for one collection.
    pub fn collection(&self, name: &str) -> RepoResult<Collection> {
        let Some(entry) = self.registry.entry(name) else {
            return Err(RepoError::UnknownCollection(name.to_string()));
        };
        let layout = self.registry.layout();

        Ok(Collection {
            name: entry.name.clone(),
            records: RecordStore::load(layout, entry)?,
            schema: SchemaManager::load(layout, entry)?,
            changes: ChangeLog::load(layout, &entry.name)?,
            reminders: ReminderEngine::new(layout.clone()),
        })
    }
}

/// One collection's state: records, schema, change log and reminders.
#[derive(Debug)]
pub struct Collection {
    name: String,
    records: RecordStore,
    schema: SchemaManager,
    changes: ChangeLog,
    reminders: ReminderEngine,
}

impl Collection {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut RecordStore {
        &mut self.records
    }

    pub fn schema(&self) -> &SchemaManager {
        &self.schema
    }

    pub fn schema_mut(&mut self) -> &mut SchemaManager {
        &mut self.schema
    }

    pub fn changes(&self) -> &ChangeLog {
        &self.changes
    }

    pub fn changes_mut(&mut self) -> &mut ChangeLog {
        &mut self.changes
    }

    pub fn reminders(&self) -> &ReminderEngine {
        &self.reminders
    }

    /// Exports the selected field columns of every record to `dest`.
    /// Callers pick the fields (typically via the schema's groups) and the
    /// destination file.
    pub fn export_fields(&self, fields: &[String], dest: &Path) -> RepoResult<()> {
        self.records.export_fields(fields, dest)
    }

    /// Follows an internal link to its target record in this collection.
    /// Non-link values and missing targets are an explicit `None`.
    pub fn resolve_link(&self, value: &FieldValue) -> Option<(usize, &Record)> {
        match value {
            FieldValue::InternalLink { target, .. } => self.records.resolve_by_uuid(*target),
            _ => None,
        }
    }

    /// Per-record attention flags for list rendering: true when any of the
    /// record's reminders is due on `today`. Records without an assigned
    /// UUID have no reminders and flag false.
    pub fn attention_flags(&self, today: Date) -> RepoResult<Vec<bool>> {
        let mut flags = Vec::with_capacity(self.records.len());
        for record in self.records.records() {
            let flag = match record.id() {
                Some(id) => self.reminders.record_needs_attention(id, today)?,
                None => false,
            };
            flags.push(flag);
        }
        Ok(flags)
    }
}
