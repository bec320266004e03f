//! Domain entities for projects, estimates, clients and settings.
//!
//! # Responsibility
//! - Define immutable value types shared by every layer above storage.
//! - Keep derived money fields as pure functions of stored fields.
//!
//! # Invariants
//! - Every entity is identified by a stable UUID unique within its type.
//! - Entities reference each other only through resolved values built by
//!   the data source layer, never through shared mutable state.
//! - Computed fields (`subtotal`, `tax`, `total`) are never stored.

pub mod client;
pub mod estimate;
pub mod project;
pub mod settings;

use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current wall-clock time in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
