//! Business operations.
//!
//! # Responsibility
//! - Expose one type per externally invokable operation.
//! - Validate input before any repository access.
//!
//! # Invariants
//! - A validation failure performs zero repository calls.
//! - Repository failures are forwarded unchanged.
//! - Operations depend on repository traits only.

pub mod client;
pub mod estimate;
pub mod integrity;
pub mod project;
pub mod settings;
mod validate;

use crate::repo::failure::CoreResult;

/// One business operation taking a single parameter value.
pub trait UseCase: Send + Sync {
    type Params;
    type Output;

    fn execute(&self, params: Self::Params) -> CoreResult<Self::Output>;
}
