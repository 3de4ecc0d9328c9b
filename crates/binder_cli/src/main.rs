//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `binder_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("binder_core version={}", binder_core::core_version());
    println!("binder_core default_log_level={}", binder_core::default_log_level());
}
