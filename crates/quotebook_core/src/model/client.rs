//! Client domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable client identifier.
pub type ClientId = Uuid;

/// Customer contact referenced by estimates.
///
/// Estimates keep only the client id in storage; a deleted client simply
/// resolves to `None` on the estimate side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Client {
    /// Creates a client with a generated id and no contact details.
    pub fn new(name: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: None,
            phone: None,
            address: None,
            created_at,
        }
    }
}
