//! Collection registry: ordered name -> storage-path mapping.
//!
//! # Responsibility
//! - Own `data/database_config.json` and the collection lifecycle.
//! - Cascade file cleanup when a collection is deleted.
//!
//! # Invariants
//! - Collection names are unique; duplicates are rejected before any write.
//! - Every mutating operation rewrites the whole mapping immediately.
//! - Record-scoped reminder and attachment files are orphaned on delete,
//!   not cascaded.

use super::{MoveDirection, RepoError, RepoResult};
use crate::model::schema::Group;
use crate::store::{tabular, DataLayout, StoreError, Table};
use log::info;
use serde_json::Value;
use std::path::Path;

/// Seeded on first run with no persisted config.
const DEFAULT_COLLECTIONS: &[(&str, &str)] =
    &[("vehicles", "data/vehicles.csv"), ("vendors", "data/vendors.csv")];

/// Starter schema written for a freshly created collection.
const STARTER_FIELD: &str = "Field 1";
const STARTER_GROUP: &str = "Group 1";

/// One registered collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionEntry {
    pub name: String,
    /// Storage path relative to the data root, as persisted in the config.
    pub storage: String,
}

/// Ordered registry of collections backed by the config file.
#[derive(Debug)]
pub struct CollectionRegistry {
    layout: DataLayout,
    entries: Vec<CollectionEntry>,
}

impl CollectionRegistry {
    /// Loads the registry, seeding the two predefined collections when no
    /// config exists yet.
    pub fn open(layout: DataLayout) -> RepoResult<Self> {
        let config_path = layout.config_path();
        if !config_path.exists() {
            let registry = Self {
                layout,
                entries: DEFAULT_COLLECTIONS
                    .iter()
                    .map(|(name, storage)| CollectionEntry {
                        name: name.to_string(),
                        storage: storage.to_string(),
                    })
                    .collect(),
            };
            registry.persist(&registry.entries)?;
            info!("event=registry_open module=registry status=ok mode=seeded");
            return Ok(registry);
        }

        let raw = std::fs::read_to_string(&config_path)
            .map_err(|err| StoreError::io(&config_path, err))?;
        let map: serde_json::Map<String, Value> =
            serde_json::from_str(&raw).map_err(|err| StoreError::json(&config_path, err))?;

        let mut entries = Vec::with_capacity(map.len());
        for (name, value) in map {
            let Some(storage) = value.as_str() else {
                return Err(RepoError::InvalidData(format!(
                    "config entry `{name}` is not a storage path string"
                )));
            };
            entries.push(CollectionEntry {
                name,
                storage: storage.to_string(),
            });
        }

        info!(
            "event=registry_open module=registry status=ok mode=loaded count={}",
            entries.len()
        );
        Ok(Self { layout, entries })
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    /// Registered collections in display order.
    pub fn list(&self) -> &[CollectionEntry] {
        &self.entries
    }

    pub fn entry(&self, name: &str) -> Option<&CollectionEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Registers a new collection and seeds its starter files.
    ///
    /// `file_stem` overrides the storage file name; it defaults to the
    /// collection name. A `.csv` suffix is appended when missing.
    ///
    /// # Errors
    /// - `EmptyName` for a blank name.
    /// - `DuplicateName` when the name is taken (checked before any write).
    pub fn create(&mut self, name: &str, file_stem: Option<&str>) -> RepoResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RepoError::EmptyName);
        }
        if self.entry(name).is_some() {
            return Err(RepoError::DuplicateName(name.to_string()));
        }

        let mut file_name = file_stem
            .map(str::trim)
            .filter(|stem| !stem.is_empty())
            .unwrap_or(name)
            .to_string();
        if !file_name.ends_with(".csv") {
            file_name.push_str(".csv");
        }
        let storage = format!("data/{file_name}");

        self.seed_collection_files(name, &storage)?;

        let mut entries = self.entries.clone();
        entries.push(CollectionEntry {
            name: name.to_string(),
            storage: storage.clone(),
        });
        self.persist(&entries)?;
        self.entries = entries;

        info!("event=collection_create module=registry status=ok name={name} storage={storage}");
        Ok(())
    }

    /// Unregisters a collection and deletes its records file, schema files
    /// and change log. Reminder and attachment files stay behind.
    pub fn delete(&mut self, name: &str) -> RepoResult<()> {
        let Some(index) = self.entries.iter().position(|entry| entry.name == name) else {
            return Err(RepoError::UnknownCollection(name.to_string()));
        };

        remove_if_present(&self.layout.records_path(&self.entries[index].storage))?;
        remove_if_present(&self.layout.template_path(name))?;
        remove_if_present(&self.layout.groups_path(name))?;
        remove_if_present(&self.layout.changes_path(name))?;

        let mut entries = self.entries.clone();
        entries.remove(index);
        self.persist(&entries)?;
        self.entries = entries;

        info!("event=collection_delete module=registry status=ok name={name}");
        Ok(())
    }

    /// Swaps a collection with its neighbor; no-op at either boundary.
    pub fn reorder(&mut self, name: &str, direction: MoveDirection) -> RepoResult<()> {
        let Some(index) = self.entries.iter().position(|entry| entry.name == name) else {
            return Err(RepoError::UnknownCollection(name.to_string()));
        };
        let Some(neighbor) = direction.neighbor(index, self.entries.len()) else {
            return Ok(());
        };

        let mut entries = self.entries.clone();
        entries.swap(index, neighbor);
        self.persist(&entries)?;
        self.entries = entries;
        Ok(())
    }

    fn seed_collection_files(&self, name: &str, storage: &str) -> RepoResult<()> {
        let starter = vec![STARTER_FIELD.to_string()];
        tabular::write_table(&self.layout.records_path(storage), &Table::new(starter.clone()))?;

        let template_path = self.layout.template_path(name);
        write_json(&template_path, &serde_json::json!(starter))?;

        let groups = vec![Group::new(STARTER_GROUP, starter)];
        let groups_path = self.layout.groups_path(name);
        write_json(&groups_path, &groups_to_json(&groups))?;
        Ok(())
    }

    /// Rewrites the config as an ordered JSON object.
    fn persist(&self, entries: &[CollectionEntry]) -> RepoResult<()> {
        let mut map = serde_json::Map::new();
        for entry in entries {
            map.insert(entry.name.clone(), Value::String(entry.storage.clone()));
        }
        write_json(&self.layout.config_path(), &Value::Object(map))
    }
}

/// Serializes ordered groups into the persisted JSON-object shape.
pub(crate) fn groups_to_json(groups: &[Group]) -> Value {
    let mut map = serde_json::Map::new();
    for group in groups {
        map.insert(group.name.clone(), serde_json::json!(group.fields));
    }
    Value::Object(map)
}

pub(crate) fn write_json(path: &Path, value: &Value) -> RepoResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))?;
    }
    let text = serde_json::to_string_pretty(value).map_err(|err| StoreError::json(path, err))?;
    std::fs::write(path, text).map_err(|err| StoreError::io(path, err))?;
    Ok(())
}

fn remove_if_present(path: &Path) -> RepoResult<()> {
    if path.exists() {
        std::fs::remove_file(path).map_err(|err| StoreError::io(path, err))?;
    }
    Ok(())
}
