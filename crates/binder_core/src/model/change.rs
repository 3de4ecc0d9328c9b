//! Manual change-history entries.
//!
//! # Responsibility
//! - Model one append-only history row for a record.
//!
//! # Invariants
//! - Entries are never mutated or deleted once appended.
//! - `value_before` is derived from the previous entry for the same record
//!   at append time; it is not independently authoritative.

use crate::model::record::RecordId;

/// Sentinel written as `value_before` when a record has no prior entry.
pub const NO_PRIOR_VALUE: &str = "none";

/// One row of a collection's change log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEntry {
    pub title: String,
    /// `YYYY-MM-DD`, stamped at append time.
    pub logged_date: String,
    /// The previous entry's `value_after`, or [`NO_PRIOR_VALUE`].
    pub value_before: String,
    pub value_after: String,
    pub record: RecordId,
}
