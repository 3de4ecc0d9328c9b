//! Schema manager: per-collection field template and groups.
//!
//! # Responsibility
//! - Load and persist `templates_<collection>.json` and
//!   `groups_<collection>.json`.
//! - Recompute the template on full schema replacement.
//!
//! # Invariants
//! - `replace_schema` is the sole writer of the template.
//! - First load without a persisted template falls back to the columns
//!   found in record storage; missing groups default to empty.

use super::registry::{groups_to_json, write_json, CollectionEntry};
use super::{RepoError, RepoResult};
use crate::model::schema::{Group, Schema};
use crate::store::{read_table, DataLayout, StoreError};
use log::info;
use serde_json::Value;

/// Schema state for one collection.
#[derive(Debug)]
pub struct SchemaManager {
    layout: DataLayout,
    collection: String,
    schema: Schema,
}

impl SchemaManager {
    /// Loads the persisted schema, applying first-load defaults.
    pub fn load(layout: &DataLayout, entry: &CollectionEntry) -> RepoResult<Self> {
        let template_path = layout.template_path(&entry.name);
        let template: Vec<String> = if template_path.exists() {
            let raw = std::fs::read_to_string(&template_path)
                .map_err(|err| StoreError::io(&template_path, err))?;
            serde_json::from_str(&raw).map_err(|err| StoreError::json(&template_path, err))?
        } else {
            // No template ever saved: the raw storage columns are all we know.
            read_table(&layout.records_path(&entry.storage))?
                .map(|table| table.columns)
                .unwrap_or_default()
        };

        let groups_path = layout.groups_path(&entry.name);
        let groups = if groups_path.exists() {
            let raw = std::fs::read_to_string(&groups_path)
                .map_err(|err| StoreError::io(&groups_path, err))?;
            let map: serde_json::Map<String, Value> =
                serde_json::from_str(&raw).map_err(|err| StoreError::json(&groups_path, err))?;
            parse_groups(&entry.name, map)?
        } else {
            Vec::new()
        };

        Ok(Self {
            layout: layout.clone(),
            collection: entry.name.clone(),
            schema: Schema::new(template, groups),
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Ordered field keys known to this collection.
    pub fn template(&self) -> &[String] {
        self.schema.template()
    }

    pub fn groups(&self) -> &[Group] {
        self.schema.groups()
    }

    /// Replaces the groups, recomputes the template from them, and persists
    /// both files.
    pub fn replace_schema(&mut self, groups: Vec<Group>) -> RepoResult<()> {
        let mut candidate = self.schema.clone();
        candidate.replace_groups(groups);

        write_json(
            &self.layout.template_path(&self.collection),
            &serde_json::json!(candidate.template()),
        )?;
        write_json(
            &self.layout.groups_path(&self.collection),
            &groups_to_json(candidate.groups()),
        )?;

        self.schema = candidate;
        info!(
            "event=schema_replace module=schema status=ok collection={} fields={}",
            self.collection,
            self.schema.template().len()
        );
        Ok(())
    }
}

fn parse_groups(
    collection: &str,
    map: serde_json::Map<String, Value>,
) -> RepoResult<Vec<Group>> {
    let mut groups = Vec::with_capacity(map.len());
    for (name, value) in map {
        let Some(fields) = value.as_array() else {
            return Err(RepoError::InvalidData(format!(
                "group `{name}` of `{collection}` is not a field list"
            )));
        };
        let mut parsed = Vec::with_capacity(fields.len());
        for field in fields {
            let Some(field) = field.as_str() else {
                return Err(RepoError::InvalidData(format!(
                    "group `{name}` of `{collection}` holds a non-string field key"
                )));
            };
            parsed.push(field.to_string());
        }
        groups.push(Group::new(name, parsed));
    }
    Ok(groups)
}
