//! File-backed persistence primitives.
//!
//! # Responsibility
//! - Map logical storage locations to concrete paths (`layout`).
//! - Read and write the CSV tables that back records, reminders and the
//!   change log (`tabular`).
//!
//! # Invariants
//! - Transport failures surface as `StoreError`; no retries, no partial
//!   writes are reported as success.
//! - File naming is part of the external contract and must not change.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod layout;
pub mod tabular;

pub use layout::DataLayout;
pub use tabular::{read_table, write_table, Table};

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence transport error, fatal to the operation that hit it.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Csv {
        path: PathBuf,
        source: csv::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// Path of the file the failed operation was touching.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Csv { path, .. } | Self::Json { path, .. } => path,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "io failure at `{}`: {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "csv failure at `{}`: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "json failure at `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}
