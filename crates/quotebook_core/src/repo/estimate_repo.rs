//! Estimate repository contract and local implementation.
//!
//! # Invariants
//! - Saves write the estimate record before any of its line items.
//! - Line items removed from an estimate are deleted after the new set is
//!   written, so a crash mid-save leaves extra rows rather than missing ones.
//! - Reads always return fully resolved estimates; a deleted client
//!   resolves to `None`.
//! - A save never touches line items owned by another estimate, and a line
//!   item id appears at most once per estimate.

use crate::datasource::{
    ClientLocalDataSource, EstimateLocalDataSource, ProjectLocalDataSource, SourceError,
};
use crate::model::estimate::{Estimate, EstimateId};
use crate::model::project::ProjectId;
use crate::repo::failure::{CoreResult, Failure};
use crate::repo::project_repo::project_not_found;
use crate::repo::CascadeReport;
use crate::storage::EstimateSnapshot;
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::HashSet;

/// Outcome of deleting one estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EstimateDeletion {
    /// Project the estimate belonged to.
    pub project_id: ProjectId,
    pub report: CascadeReport,
}

/// Repository interface for estimate operations.
pub trait EstimateRepository: Send + Sync {
    /// Resolved estimates of one project in creation order.
    fn list_estimates(&self, project_id: ProjectId) -> CoreResult<Vec<Estimate>>;
    fn get_estimate(&self, id: EstimateId) -> CoreResult<Estimate>;
    /// Persists a new estimate; its project (and client, if any) must exist.
    fn create_estimate(&self, estimate: &Estimate) -> CoreResult<Estimate>;
    /// Replaces an existing estimate and its full line item set.
    fn update_estimate(&self, estimate: &Estimate) -> CoreResult<Estimate>;
    /// Deletes the estimate after its line items.
    fn delete_estimate(&self, id: EstimateId) -> CoreResult<EstimateDeletion>;
}

/// Estimate repository over local collections.
pub struct LocalEstimateRepository {
    projects: ProjectLocalDataSource,
    estimates: EstimateLocalDataSource,
    clients: ClientLocalDataSource,
}

impl LocalEstimateRepository {
    pub fn new(
        projects: ProjectLocalDataSource,
        estimates: EstimateLocalDataSource,
        clients: ClientLocalDataSource,
    ) -> Self {
        Self {
            projects,
            estimates,
            clients,
        }
    }

    fn ensure_references(&self, estimate: &Estimate) -> CoreResult<()> {
        if !self.projects.exists(estimate.project_id)? {
            return Err(project_not_found(estimate.project_id));
        }
        if let Some(client_id) = estimate.client_id() {
            if self.clients.find(client_id)?.is_none() {
                return Err(Failure::not_found(format!("Client not found: {client_id}")));
            }
        }
        Ok(())
    }

    /// Rejects line items that are repeated or already owned elsewhere.
    fn ensure_line_items_owned(&self, estimate: &Estimate) -> CoreResult<()> {
        let mut seen = HashSet::with_capacity(estimate.line_items.len());
        for item in &estimate.line_items {
            if !seen.insert(item.id) {
                return Err(Failure::business(format!(
                    "Duplicate line item in estimate: {}",
                    item.id
                )));
            }
            let stored_owner = self
                .estimates
                .find_line_item(item.id)?
                .map(|stored| stored.estimate_id);
            let owner_mismatch = item.estimate_id != estimate.id
                || stored_owner.is_some_and(|owner| owner != estimate.id);
            if owner_mismatch {
                warn!(
                    "event=estimate_write module=repo status=error estimate_id={} line_item_id={} error_code=foreign_line_item",
                    estimate.id, item.id
                );
                return Err(Failure::business(format!(
                    "Line item belongs to another estimate: {}",
                    item.id
                )));
            }
        }
        Ok(())
    }

    fn write(&self, estimate: &Estimate) -> CoreResult<Estimate> {
        let snapshot = EstimateSnapshot::from_entity(estimate);
        self.estimates.put(&snapshot.estimate)?;
        for item in &snapshot.line_items {
            self.estimates.put_line_item(item)?;
        }

        let kept: HashSet<_> = snapshot.line_items.iter().map(|item| item.id).collect();
        for stale in self.estimates.find_line_items(estimate.id)? {
            if !kept.contains(&stale.id) {
                self.estimates.delete_line_item(stale.id)?;
            }
        }

        Ok(self.estimates.get_resolved(estimate.id)?.into_entity())
    }
}

impl EstimateRepository for LocalEstimateRepository {
    fn list_estimates(&self, project_id: ProjectId) -> CoreResult<Vec<Estimate>> {
        self.estimates
            .find_by_project(project_id)?
            .into_iter()
            .map(|record| -> CoreResult<Estimate> {
                Ok(self.estimates.resolve(record)?.into_entity())
            })
            .collect()
    }

    fn get_estimate(&self, id: EstimateId) -> CoreResult<Estimate> {
        let resolved = self
            .estimates
            .get_resolved(id)
            .map_err(|err| match err {
                SourceError::NotFound { .. } => estimate_not_found(id),
                other => other.into(),
            })?;
        Ok(resolved.into_entity())
    }

    fn create_estimate(&self, estimate: &Estimate) -> CoreResult<Estimate> {
        self.ensure_references(estimate)?;
        self.ensure_line_items_owned(estimate)?;
        if self.estimates.find(estimate.id)?.is_some() {
            return Err(Failure::business(format!(
                "Estimate already exists: {}",
                estimate.id
            )));
        }
        let saved = self.write(estimate)?;
        info!(
            "event=estimate_create module=repo status=ok estimate_id={} line_items={}",
            saved.id,
            saved.line_items.len()
        );
        Ok(saved)
    }

    fn update_estimate(&self, estimate: &Estimate) -> CoreResult<Estimate> {
        self.get_estimate(estimate.id)?;
        self.ensure_references(estimate)?;
        self.ensure_line_items_owned(estimate)?;
        self.write(estimate)
    }

    fn delete_estimate(&self, id: EstimateId) -> CoreResult<EstimateDeletion> {
        let project_id = self
            .estimates
            .find(id)?
            .ok_or_else(|| estimate_not_found(id))?
            .project_id;
        let report = cascade_delete_estimate(&self.estimates, id)?;
        info!(
            "event=estimate_delete module=repo status=ok estimate_id={} line_items_deleted={}",
            id, report.line_items_deleted
        );
        Ok(EstimateDeletion { project_id, report })
    }
}

/// Deletes every line item of `id`, then the estimate itself.
///
/// Stops at the first failure; deletions already performed stay deleted.
pub(crate) fn cascade_delete_estimate(
    estimates: &EstimateLocalDataSource,
    id: EstimateId,
) -> CoreResult<CascadeReport> {
    let mut report = CascadeReport::default();
    for item in estimates.find_line_items(id)? {
        estimates.delete_line_item(item.id)?;
        report.line_items_deleted += 1;
    }
    if estimates.delete(id)? {
        report.estimates_deleted += 1;
    }
    debug!(
        "event=estimate_cascade module=repo status=ok estimate_id={} line_items_deleted={}",
        id, report.line_items_deleted
    );
    Ok(report)
}

fn estimate_not_found(id: EstimateId) -> Failure {
    Failure::not_found(format!("Estimate not found: {id}"))
}
