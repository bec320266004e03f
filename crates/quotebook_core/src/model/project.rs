//! Project domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable project identifier.
pub type ProjectId = Uuid;

/// Top-level grouping that owns estimates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Project {
    /// Creates a project with a generated id.
    ///
    /// The name is stored as given; trimming and emptiness checks belong to
    /// the use-case layer.
    pub fn new(name: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at,
        }
    }

    /// Returns a renamed snapshot, leaving `self` untouched.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}
