//! On-disk layout of a binder data directory.
//!
//! # Responsibility
//! - Map collection names and record IDs to their backing files.
//! - Own the attachment folders (`links/`, `tables/`) naming contract.
//!
//! # Invariants
//! - Paths are logical contract: renaming any of them breaks existing
//!   data directories.
//! - Attachment tables and reminder files are keyed by record UUID and are
//!   deliberately left behind when a collection is deleted.

use super::{StoreError, StoreResult};
use crate::model::record::RecordId;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const DATA_DIR: &str = "data";
const PERIOD_DIR: &str = "period";
const TABLES_DIR: &str = "tables";
const LINKS_DIR: &str = "links";
const CONFIG_FILE: &str = "database_config.json";

/// Path map for one data root. Cheap to clone and hand to repositories.
#[derive(Debug, Clone)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR)
    }

    /// `data/database_config.json`: the ordered collection registry.
    pub fn config_path(&self) -> PathBuf {
        self.data_dir().join(CONFIG_FILE)
    }

    /// Records file for a collection, from its registered storage path
    /// (the registry persists paths relative to the root, e.g.
    /// `data/vehicles.csv`).
    pub fn records_path(&self, registered: &str) -> PathBuf {
        self.root.join(registered)
    }

    /// `data/templates_<collection>.json`
    pub fn template_path(&self, collection: &str) -> PathBuf {
        self.data_dir().join(format!("templates_{collection}.json"))
    }

    /// `data/groups_<collection>.json`
    pub fn groups_path(&self, collection: &str) -> PathBuf {
        self.data_dir().join(format!("groups_{collection}.json"))
    }

    /// `data/changes_<collection>.csv`
    pub fn changes_path(&self, collection: &str) -> PathBuf {
        self.data_dir().join(format!("changes_{collection}.csv"))
    }

    /// `period/<uuid>_period_1.csv`: one reminder table per record.
    pub fn reminder_path(&self, record: RecordId) -> PathBuf {
        self.root
            .join(PERIOD_DIR)
            .join(format!("{record}_period_1.csv"))
    }

    pub fn links_dir(&self) -> PathBuf {
        self.root.join(LINKS_DIR)
    }

    /// Copies an external file into `links/` under a collision-free name
    /// and returns the destination path for use in an `ExternalLink`.
    pub fn attach_file(&self, source: &Path) -> StoreResult<PathBuf> {
        let links = self.links_dir();
        std::fs::create_dir_all(&links).map_err(|err| StoreError::io(&links, err))?;

        let original = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        let dest = links.join(format!("{}_{original}", Uuid::new_v4().simple()));

        std::fs::copy(source, &dest).map_err(|err| StoreError::io(source, err))?;
        Ok(dest)
    }

    /// Existing attachment tables for a record, sorted by file name.
    pub fn attachment_tables(&self, record: RecordId) -> StoreResult<Vec<PathBuf>> {
        let dir = self.root.join(TABLES_DIR);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let prefix = format!("{record}_table_");
        let mut tables = Vec::new();
        let entries = std::fs::read_dir(&dir).map_err(|err| StoreError::io(&dir, err))?;
        for entry in entries {
            let entry = entry.map_err(|err| StoreError::io(&dir, err))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with(&prefix) && name.ends_with(".csv") {
                tables.push(entry.path());
            }
        }
        tables.sort();
        Ok(tables)
    }

    /// Path for the next attachment table of a record: one past the
    /// highest numeric suffix already on disk.
    pub fn next_attachment_table(&self, record: RecordId) -> StoreResult<PathBuf> {
        let highest = self
            .attachment_tables(record)?
            .iter()
            .filter_map(|path| table_index(path))
            .max()
            .unwrap_or(0);
        Ok(self
            .root
            .join(TABLES_DIR)
            .join(format!("{record}_table_{}.csv", highest + 1)))
    }
}

fn table_index(path: &Path) -> Option<u32> {
    path.file_stem()?
        .to_string_lossy()
        .rsplit('_')
        .next()?
        .parse()
        .ok()
}
