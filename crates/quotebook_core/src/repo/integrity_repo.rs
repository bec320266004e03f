//! Referential integrity scan and repair.
//!
//! Writes across collections are not transactional, so an interrupted
//! cascade or save can leave estimates without a project or line items
//! without an estimate. This pass finds and removes them. Dangling client
//! references are reported but kept: they already resolve to "no client".

use crate::datasource::{ClientLocalDataSource, EstimateLocalDataSource, ProjectLocalDataSource};
use crate::model::estimate::{EstimateId, LineItemId};
use crate::repo::estimate_repo::cascade_delete_estimate;
use crate::repo::failure::CoreResult;
use log::{info, warn};
use serde::Serialize;
use std::collections::HashSet;

/// Findings of one integrity scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    /// Estimates whose project no longer exists.
    pub orphan_estimates: Vec<EstimateId>,
    /// Line items whose estimate no longer exists.
    pub orphan_line_items: Vec<LineItemId>,
    /// Estimates referencing a deleted client.
    pub dangling_client_refs: Vec<EstimateId>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.orphan_estimates.is_empty() && self.orphan_line_items.is_empty()
    }
}

/// Repository interface for integrity maintenance.
pub trait IntegrityRepository: Send + Sync {
    fn scan(&self) -> CoreResult<IntegrityReport>;
    /// Deletes orphans found by a fresh scan and returns that scan.
    fn repair(&self) -> CoreResult<IntegrityReport>;
}

pub struct LocalIntegrityRepository {
    projects: ProjectLocalDataSource,
    estimates: EstimateLocalDataSource,
    clients: ClientLocalDataSource,
}

impl LocalIntegrityRepository {
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
}

impl IntegrityRepository for LocalIntegrityRepository {
    fn scan(&self) -> CoreResult<IntegrityReport> {
        let project_ids: HashSet<_> = self.projects.all()?.iter().map(|p| p.id).collect();
        let client_ids: HashSet<_> = self.clients.all()?.iter().map(|c| c.id).collect();
        let estimates = self.estimates.all()?;
        let estimate_ids: HashSet<_> = estimates.iter().map(|e| e.id).collect();

        let mut report = IntegrityReport::default();
        for estimate in &estimates {
            if !project_ids.contains(&estimate.project_id) {
                report.orphan_estimates.push(estimate.id);
            }
            if let Some(client_id) = estimate.client_id {
                if !client_ids.contains(&client_id) {
                    report.dangling_client_refs.push(estimate.id);
                }
            }
        }
        for item in self.estimates.all_line_items()? {
            if !estimate_ids.contains(&item.estimate_id) {
                report.orphan_line_items.push(item.id);
            }
        }

        if !report.is_clean() {
            warn!(
                "event=integrity_scan module=repo status=dirty orphan_estimates={} orphan_line_items={}",
                report.orphan_estimates.len(),
                report.orphan_line_items.len()
            );
        }
        Ok(report)
    }

    fn repair(&self) -> CoreResult<IntegrityReport> {
        let report = self.scan()?;
        for estimate_id in &report.orphan_estimates {
            cascade_delete_estimate(&self.estimates, *estimate_id)?;
        }
        for item_id in &report.orphan_line_items {
            self.estimates.delete_line_item(*item_id)?;
        }
        info!(
            "event=integrity_repair module=repo status=ok orphan_estimates={} orphan_line_items={}",
            report.orphan_estimates.len(),
            report.orphan_line_items.len()
        );
        Ok(report)
    }
}
