//! Record domain model.
//!
//! # Responsibility
//! - Hold one row of a collection as a field-key to raw-cell mapping.
//! - Expose the reserved UUID cell as a typed identity.
//!
//! # Invariants
//! - `RecordId` is stable once assigned and unique within its collection.
//! - Column order is owned by the store, not by the record; a record only
//!   answers "what is the raw text for this key".

use crate::model::field_value::FieldValue;
use std::collections::HashMap;
use uuid::Uuid;

/// Reserved column holding a record's stable identity.
pub const UUID_FIELD: &str = "UUID";

/// Stable identifier for a detailed record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type RecordId = Uuid;

/// One row of a collection: field key -> raw persisted cell text.
///
/// Cells are raw text; callers go through [`FieldValue`] to interpret them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    values: HashMap<String, String>,
}

impl Record {
    /// Creates a record with every given field initialized to empty text.
    pub fn empty(fields: &[String]) -> Self {
        Self {
            values: fields
                .iter()
                .map(|field| (field.clone(), String::new()))
                .collect(),
        }
    }

    /// Creates a record from already-persisted cells.
    pub fn from_cells(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Returns the raw cell text for `key`, empty when the cell is unset.
    pub fn raw(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    /// Returns the decoded value for `key`.
    pub fn value(&self, key: &str) -> FieldValue {
        FieldValue::decode(self.raw(key))
    }

    /// Overwrites the raw cell text for `key`.
    pub fn set_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns the assigned stable ID, or `None` while the record has not
    /// been detailed yet (or the UUID cell holds unparseable text).
    pub fn id(&self) -> Option<RecordId> {
        Uuid::parse_str(self.raw(UUID_FIELD)).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::{Record, UUID_FIELD};
    use uuid::Uuid;

    #[test]
    fn empty_record_has_blank_cells_and_no_id() {
        let record = Record::empty(&["plate".to_string(), "owner".to_string()]);
        assert_eq!(record.raw("plate"), "");
        assert_eq!(record.raw("missing"), "");
        assert!(record.id().is_none());
    }

    #[test]
    fn id_reads_the_reserved_cell() {
        let mut record = Record::default();
        let id = Uuid::new_v4();
        record.set_raw(UUID_FIELD, id.to_string());
        assert_eq!(record.id(), Some(id));
    }

    #[test]
    fn garbage_uuid_cell_reads_as_unset() {
        let mut record = Record::default();
        record.set_raw(UUID_FIELD, "not-a-uuid");
        assert!(record.id().is_none());
    }
}
