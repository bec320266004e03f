//! Storage record shapes and entity converters.
//!
//! # Responsibility
//! - Define the serializable shape persisted for each entity type.
//! - Convert between entities and records without I/O.
//!
//! # Invariants
//! - Every record type owns one `TYPE_ID`; ids are never reassigned to an
//!   incompatible shape, since already-persisted rows are decoded by it.
//! - Records hold foreign-key ids only, never nested entities.
//! - Converters never fail.

mod records;

pub use records::{
    ClientRecord, EstimateRecord, EstimateRelations, EstimateSnapshot, LineItemRecord,
    ProjectRecord, SettingsRecord, SETTINGS_KEY,
};

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// Schema identifiers persisted next to every record.
pub mod type_ids {
    pub const PROJECT: u32 = 1;
    pub const ESTIMATE: u32 = 2;
    pub const LINE_ITEM: u32 = 3;
    pub const CLIENT: u32 = 4;
    pub const SETTINGS: u32 = 5;
}

/// Record persisted in one keyed collection.
pub trait StorageRecord: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Stable schema identifier used to pick the decoder.
    const TYPE_ID: u32;
    /// Backing table name.
    const COLLECTION: &'static str;

    /// Primary key inside the collection.
    fn key(&self) -> Uuid;

    /// Foreign key matched by `find_by_parent`. `None` for root records.
    fn parent_key(&self) -> Option<Uuid> {
        None
    }
}

/// Pure conversion between an entity and its record.
pub trait Snapshot: Sized {
    type Entity;
    /// Already-resolved related values; `Default` is the unresolved case.
    type Relations: Default;

    fn to_snapshot(entity: &Self::Entity) -> Self;
    fn from_snapshot(&self, relations: Self::Relations) -> Self::Entity;
}
