//! Estimate and line item domain models.
//!
//! # Invariants
//! - `line_items` keep the user-visible order; storage persists it as an
//!   ordinal position on each line item record.
//! - `subtotal`, `tax` and `total` are derived on every call and never
//!   cached or stored.
//! - `client` is a resolved relation; `None` covers both "no client" and a
//!   reference whose client record no longer exists.

use crate::model::client::Client;
use crate::model::project::ProjectId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable estimate identifier.
pub type EstimateId = Uuid;
/// Stable line item identifier.
pub type LineItemId = Uuid;

/// One priced row of an estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub estimate_id: EstimateId,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
}

impl LineItem {
    /// Creates a line item bound to `estimate_id` with a generated id.
    pub fn new(
        estimate_id: EstimateId,
        description: impl Into<String>,
        quantity: f64,
        unit_price: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            estimate_id,
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    /// `quantity * unit_price`.
    pub fn total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// Priced proposal that belongs to one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub id: EstimateId,
    pub project_id: ProjectId,
    pub name: String,
    pub line_items: Vec<LineItem>,
    pub client: Option<Client>,
    /// Percentage in `0..=100`.
    pub tax_rate: f64,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Estimate {
    /// Creates an empty estimate under `project_id` with a generated id.
    pub fn new(project_id: ProjectId, name: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            name: name.into(),
            line_items: Vec::new(),
            client: None,
            tax_rate: 0.0,
            created_at,
        }
    }

    /// Sum of line item totals.
    pub fn subtotal(&self) -> f64 {
        self.line_items.iter().map(LineItem::total).sum()
    }

    /// Tax owed on the subtotal at `tax_rate` percent.
    pub fn tax(&self) -> f64 {
        self.subtotal() * self.tax_rate / 100.0
    }

    pub fn total(&self) -> f64 {
        self.subtotal() + self.tax()
    }

    /// Returns a snapshot with one more line item appended.
    ///
    /// The item is re-bound to this estimate so callers cannot attach a
    /// line item that points elsewhere.
    pub fn with_line_item(&self, item: LineItem) -> Self {
        let mut next = self.clone();
        next.line_items.push(LineItem {
            estimate_id: self.id,
            ..item
        });
        next
    }

    /// Client id this estimate references, if a client is resolved.
    pub fn client_id(&self) -> Option<Uuid> {
        self.client.as_ref().map(|client| client.id)
    }
}
