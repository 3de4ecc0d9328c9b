//! Core domain logic for Binder, a multi-collection record keeper.
//! This crate is the single source of truth for business invariants;
//! window/form rendering lives in external callers.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::change::{ChangeEntry, NO_PRIOR_VALUE};
pub use model::field_value::FieldValue;
pub use model::record::{Record, RecordId, UUID_FIELD};
pub use model::reminder::{parse_date, ReminderEntry, DAYS_PER_MONTH};
pub use model::schema::{Group, Schema};
pub use repo::change_repo::ChangeLog;
pub use repo::record_repo::RecordStore;
pub use repo::registry::{CollectionEntry, CollectionRegistry};
pub use repo::reminder_repo::ReminderEngine;
pub use repo::schema_repo::SchemaManager;
pub use repo::{MoveDirection, RepoError, RepoResult};
pub use service::collection_service::{Collection, CollectionService};
pub use store::{DataLayout, StoreError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
