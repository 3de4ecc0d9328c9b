//! Domain model for collections, records, field values and histories.
//!
//! # Responsibility
//! - Define the canonical data structures used by core business logic.
//! - Keep value encoding/decoding behind one codec boundary.
//!
//! # Invariants
//! - Every detailed record is identified by a stable `RecordId`.
//! - A field value's variant is decided only by `FieldValue::decode`,
//!   never by ad hoc structural probing elsewhere.

pub mod change;
pub mod field_value;
pub mod record;
pub mod reminder;
pub mod schema;
