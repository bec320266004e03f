use crate::model::client::{Client, ClientId};
use crate::model::estimate::{Estimate, EstimateId, LineItem, LineItemId};
use crate::model::project::{Project, ProjectId};
use crate::model::settings::{Settings, ThemePreference};
use crate::storage::{type_ids, Snapshot, StorageRecord};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed key of the singleton settings record.
pub const SETTINGS_KEY: Uuid = Uuid::nil();

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub name: String,
    pub created_at: i64,
}

impl StorageRecord for ProjectRecord {
    const TYPE_ID: u32 = type_ids::PROJECT;
    const COLLECTION: &'static str = "projects";

    fn key(&self) -> Uuid {
        self.id
    }
}

impl Snapshot for ProjectRecord {
    type Entity = Project;
    type Relations = ();

    fn to_snapshot(entity: &Project) -> Self {
        Self {
            id: entity.id,
            name: entity.name.clone(),
            created_at: entity.created_at,
        }
    }

    fn from_snapshot(&self, _relations: ()) -> Project {
        Project {
            id: self.id,
            name: self.name.clone(),
            created_at: self.created_at,
        }
    }
}

/// Estimate row. Line items live in their own collection and the client is
/// referenced by id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRecord {
    pub id: EstimateId,
    pub project_id: ProjectId,
    pub name: String,
    pub client_id: Option<ClientId>,
    pub tax_rate: f64,
    pub created_at: i64,
}

impl StorageRecord for EstimateRecord {
    const TYPE_ID: u32 = type_ids::ESTIMATE;
    const COLLECTION: &'static str = "estimates";

    fn key(&self) -> Uuid {
        self.id
    }

    fn parent_key(&self) -> Option<Uuid> {
        Some(self.project_id)
    }
}

/// Resolved relations needed to rebuild an [`Estimate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EstimateRelations {
    /// Already ordered by position.
    pub line_items: Vec<LineItem>,
    pub client: Option<Client>,
}

impl Snapshot for EstimateRecord {
    type Entity = Estimate;
    type Relations = EstimateRelations;

    fn to_snapshot(entity: &Estimate) -> Self {
        Self {
            id: entity.id,
            project_id: entity.project_id,
            name: entity.name.clone(),
            client_id: entity.client_id(),
            tax_rate: entity.tax_rate,
            created_at: entity.created_at,
        }
    }

    fn from_snapshot(&self, relations: EstimateRelations) -> Estimate {
        Estimate {
            id: self.id,
            project_id: self.project_id,
            name: self.name.clone(),
            line_items: relations.line_items,
            client: relations.client,
            tax_rate: self.tax_rate,
            created_at: self.created_at,
        }
    }
}

/// Everything persisted for one estimate, parent first.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateSnapshot {
    pub estimate: EstimateRecord,
    pub line_items: Vec<LineItemRecord>,
}

impl EstimateSnapshot {
    pub fn from_entity(entity: &Estimate) -> Self {
        Self {
            estimate: EstimateRecord::to_snapshot(entity),
            line_items: entity
                .line_items
                .iter()
                .enumerate()
                .map(|(position, item)| LineItemRecord::from_item(item, position as u32))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemRecord {
    pub id: LineItemId,
    pub estimate_id: EstimateId,
    /// Ordinal inside the owning estimate.
    pub position: u32,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
}

impl LineItemRecord {
    pub fn from_item(item: &LineItem, position: u32) -> Self {
        Self {
            id: item.id,
            estimate_id: item.estimate_id,
            position,
            description: item.description.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }

    pub fn to_item(&self) -> LineItem {
        LineItem {
            id: self.id,
            estimate_id: self.estimate_id,
            description: self.description.clone(),
            quantity: self.quantity,
            unit_price: self.unit_price,
        }
    }
}

impl StorageRecord for LineItemRecord {
    const TYPE_ID: u32 = type_ids::LINE_ITEM;
    const COLLECTION: &'static str = "line_items";

    fn key(&self) -> Uuid {
        self.id
    }

    fn parent_key(&self) -> Option<Uuid> {
        Some(self.estimate_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: ClientId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: i64,
}

impl StorageRecord for ClientRecord {
    const TYPE_ID: u32 = type_ids::CLIENT;
    const COLLECTION: &'static str = "clients";

    fn key(&self) -> Uuid {
        self.id
    }
}

impl Snapshot for ClientRecord {
    type Entity = Client;
    type Relations = ();

    fn to_snapshot(entity: &Client) -> Self {
        Self {
            id: entity.id,
            name: entity.name.clone(),
            email: entity.email.clone(),
            phone: entity.phone.clone(),
            address: entity.address.clone(),
            created_at: entity.created_at,
        }
    }

    fn from_snapshot(&self, _relations: ()) -> Client {
        Client {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsRecord {
    pub business_name: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub theme: ThemePreference,
    pub currency_symbol: String,
}

impl StorageRecord for SettingsRecord {
    const TYPE_ID: u32 = type_ids::SETTINGS;
    const COLLECTION: &'static str = "settings";

    fn key(&self) -> Uuid {
        SETTINGS_KEY
    }
}

impl Snapshot for SettingsRecord {
    type Entity = Settings;
    type Relations = ();

    fn to_snapshot(entity: &Settings) -> Self {
        Self {
            business_name: entity.business_name.clone(),
            contact_email: entity.contact_email.clone(),
            contact_phone: entity.contact_phone.clone(),
            theme: entity.theme,
            currency_symbol: entity.currency_symbol.clone(),
        }
    }

    fn from_snapshot(&self, _relations: ()) -> Settings {
        Settings {
            business_name: self.business_name.clone(),
            contact_email: self.contact_email.clone(),
            contact_phone: self.contact_phone.clone(),
            theme: self.theme,
            currency_symbol: self.currency_symbol.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EstimateRecord, EstimateRelations, EstimateSnapshot};
    use crate::model::client::Client;
    use crate::model::estimate::{Estimate, LineItem};
    use crate::storage::Snapshot;
    use uuid::Uuid;

    #[test]
    fn estimate_snapshot_keeps_only_client_id_and_item_positions() {
        let client = Client::new("Acme", 1);
        let mut estimate = Estimate::new(Uuid::new_v4(), "Roof", 2)
            .with_line_item(LineItem::new(Uuid::nil(), "Shingles", 10.0, 3.5))
            .with_line_item(LineItem::new(Uuid::nil(), "Nails", 1.0, 8.0));
        estimate.client = Some(client.clone());

        let snapshot = EstimateSnapshot::from_entity(&estimate);
        assert_eq!(snapshot.estimate.client_id, Some(client.id));
        let positions: Vec<u32> = snapshot.line_items.iter().map(|item| item.position).collect();
        assert_eq!(positions, vec![0, 1]);

        let json = serde_json::to_value(&snapshot.estimate).unwrap();
        assert!(json.get("client").is_none());
        assert!(json.get("line_items").is_none());
    }

    #[test]
    fn unresolved_relations_rebuild_with_empty_defaults() {
        let mut estimate = Estimate::new(Uuid::new_v4(), "Deck", 3);
        estimate.client = Some(Client::new("Gone", 1));
        let record = EstimateRecord::to_snapshot(&estimate);

        let rebuilt = record.from_snapshot(EstimateRelations::default());
        assert!(rebuilt.client.is_none());
        assert!(rebuilt.line_items.is_empty());
        assert_eq!(rebuilt.name, "Deck");
    }
}
