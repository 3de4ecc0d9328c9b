//! Repository layer: per-concern persistence over the file store.
//!
//! # Responsibility
//! - Define the registry, schema, record, reminder and change-log
//!   repositories plus their shared error type.
//! - Keep file-format details out of services and callers.
//!
//! # Invariants
//! - Every mutating operation persists synchronously before returning.
//! - On a failed write the in-memory state is left as it was before the
//!   mutation, so the caller may retry or abandon.

use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod change_repo;
pub mod record_repo;
pub mod registry;
pub mod reminder_repo;
pub mod schema_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Semantic repository error on top of store transport failures.
#[derive(Debug)]
pub enum RepoError {
    /// Creating a collection with a blank name.
    EmptyName,
    /// Creating a collection under a name that is already registered.
    DuplicateName(String),
    /// Addressing a collection the registry does not know.
    UnknownCollection(String),
    /// Creating a record while the collection has no fields and no rows.
    SchemaUndefined(String),
    /// Addressing a record position outside the collection.
    RowOutOfRange { index: usize, len: usize },
    /// Writing to a column the core manages itself.
    ReservedField(String),
    /// Exporting a field that is not a storage column of the collection.
    UnknownField(String),
    /// Persisted state that cannot be interpreted (e.g. a broken UUID cell).
    InvalidData(String),
    Store(StoreError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "collection name cannot be empty"),
            Self::DuplicateName(name) => write!(f, "collection `{name}` already exists"),
            Self::UnknownCollection(name) => write!(f, "unknown collection `{name}`"),
            Self::SchemaUndefined(name) => write!(
                f,
                "collection `{name}` has no fields yet; define a schema or a first row"
            ),
            Self::RowOutOfRange { index, len } => {
                write!(f, "record position {index} out of range (len {len})")
            }
            Self::ReservedField(field) => write!(f, "field `{field}` is managed by the core"),
            Self::UnknownField(field) => {
                write!(f, "field `{field}` is not a storage column of this collection")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Adjacent-swap direction for record and collection reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    /// Neighbor position for an adjacent swap, `None` past a boundary.
    pub(crate) fn neighbor(self, index: usize, len: usize) -> Option<usize> {
        match self {
            Self::Up => index.checked_sub(1),
            Self::Down => {
                let next = index + 1;
                (next < len).then_some(next)
            }
        }
    }
}
