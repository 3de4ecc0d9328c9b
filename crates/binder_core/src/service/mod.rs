//! Core use-case services.
//!
//! # Responsibility
//! - Bundle the per-collection repositories behind one handle.
//! - Keep UI callers decoupled from file-layout details.

pub mod collection_service;
