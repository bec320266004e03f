//! Estimate collections and estimate relation resolution.

use crate::datasource::{ClientLocalDataSource, Collection, SourceResult};
use crate::db::Database;
use crate::model::estimate::{Estimate, EstimateId, LineItemId};
use crate::model::project::ProjectId;
use crate::storage::{EstimateRecord, EstimateRelations, LineItemRecord, Snapshot};

/// Estimate record together with its resolved relations.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEstimate {
    pub record: EstimateRecord,
    pub relations: EstimateRelations,
}

impl ResolvedEstimate {
    pub fn into_entity(self) -> Estimate {
        self.record.from_snapshot(self.relations)
    }
}

/// Owner of the `estimates` and `line_items` collections.
///
/// Reads clients through [`ClientLocalDataSource`] only to resolve the
/// optional client reference.
#[derive(Clone)]
pub struct EstimateLocalDataSource {
    estimates: Collection<EstimateRecord>,
    line_items: Collection<LineItemRecord>,
    clients: ClientLocalDataSource,
}

impl EstimateLocalDataSource {
    pub fn open(db: Database, clients: ClientLocalDataSource) -> SourceResult<Self> {
        Ok(Self {
            estimates: Collection::open(db.clone())?,
            line_items: Collection::open(db)?,
            clients,
        })
    }

    pub fn get(&self, id: EstimateId) -> SourceResult<EstimateRecord> {
        self.estimates.get(id)
    }

    pub fn find(&self, id: EstimateId) -> SourceResult<Option<EstimateRecord>> {
        self.estimates.find(id)
    }

    pub fn put(&self, record: &EstimateRecord) -> SourceResult<()> {
        self.estimates.put(record)
    }

    pub fn delete(&self, id: EstimateId) -> SourceResult<bool> {
        self.estimates.delete(id)
    }

    pub fn all(&self) -> SourceResult<Vec<EstimateRecord>> {
        self.estimates.all()
    }

    /// Estimates whose `project_id` matches.
    pub fn find_by_project(&self, project_id: ProjectId) -> SourceResult<Vec<EstimateRecord>> {
        self.estimates.find_by_parent(project_id)
    }

    /// Line items of one estimate, ordered by position.
    pub fn find_line_items(&self, estimate_id: EstimateId) -> SourceResult<Vec<LineItemRecord>> {
        let mut items = self.line_items.find_by_parent(estimate_id)?;
        items.sort_by_key(|item| item.position);
        Ok(items)
    }

    pub fn find_line_item(&self, id: LineItemId) -> SourceResult<Option<LineItemRecord>> {
        self.line_items.find(id)
    }

    pub fn all_line_items(&self) -> SourceResult<Vec<LineItemRecord>> {
        self.line_items.all()
    }

    pub fn put_line_item(&self, record: &LineItemRecord) -> SourceResult<()> {
        self.line_items.put(record)
    }

    pub fn delete_line_item(&self, id: LineItemId) -> SourceResult<bool> {
        self.line_items.delete(id)
    }

    /// Resolves line items and client for `record`.
    ///
    /// A `client_id` pointing at a deleted client resolves to `None`.
    pub fn resolve(&self, record: EstimateRecord) -> SourceResult<ResolvedEstimate> {
        let line_items = self
            .find_line_items(record.id)?
            .iter()
            .map(LineItemRecord::to_item)
            .collect();
        let client = match record.client_id {
            Some(client_id) => self
                .clients
                .find(client_id)?
                .map(|client| client.from_snapshot(())),
            None => None,
        };
        Ok(ResolvedEstimate {
            record,
            relations: EstimateRelations { line_items, client },
        })
    }

    /// Loads and resolves one estimate.
    pub fn get_resolved(&self, id: EstimateId) -> SourceResult<ResolvedEstimate> {
        self.resolve(self.get(id)?)
    }
}
