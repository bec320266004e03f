//! Repository layer contracts and local implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Map every data-source fault into a typed [`Failure`].
//! - Own multi-step sequencing and cascade deletes.
//!
//! # Invariants
//! - Repository APIs never panic and never leak `SourceError`.
//! - Multi-step operations are fail-fast: the first `Err` is returned
//!   unchanged and later steps are skipped.
//! - Cascades delete dependents before the parent and do not roll back
//!   completed deletions when a later step fails.

pub mod client_repo;
pub mod estimate_repo;
pub mod failure;
pub mod integrity_repo;
pub mod project_repo;
pub mod settings_repo;

use serde::Serialize;

/// Counts of dependent records removed by a cascade delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub estimates_deleted: usize,
    pub line_items_deleted: usize,
}

impl CascadeReport {
    fn absorb(&mut self, other: CascadeReport) {
        self.estimates_deleted += other.estimates_deleted;
        self.line_items_deleted += other.line_items_deleted;
    }
}
