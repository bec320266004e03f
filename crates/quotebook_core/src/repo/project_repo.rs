//! Project repository contract and local implementation.
//!
//! # Invariants
//! - Creation is "check capacity, then check identity, then write".
//! - Deleting a project cascades to its estimates and their line items.

use crate::datasource::{EstimateLocalDataSource, ProjectLocalDataSource, SourceError};
use crate::model::project::{Project, ProjectId};
use crate::repo::estimate_repo::cascade_delete_estimate;
use crate::repo::failure::{CoreResult, Failure};
use crate::repo::CascadeReport;
use crate::storage::{ProjectRecord, Snapshot};
use log::{info, warn};

/// Repository interface for project operations.
pub trait ProjectRepository: Send + Sync {
    /// Projects in creation order.
    fn list_projects(&self) -> CoreResult<Vec<Project>>;
    fn get_project(&self, id: ProjectId) -> CoreResult<Project>;
    /// Persists a new project, enforcing the configured capacity.
    fn create_project(&self, project: &Project) -> CoreResult<Project>;
    /// Overwrites an existing project.
    fn update_project(&self, project: &Project) -> CoreResult<Project>;
    /// Deletes the project and everything that references it.
    fn delete_project(&self, id: ProjectId) -> CoreResult<CascadeReport>;
}

/// Project repository over local collections.
pub struct LocalProjectRepository {
    projects: ProjectLocalDataSource,
    estimates: EstimateLocalDataSource,
    max_projects: usize,
}

impl LocalProjectRepository {
    pub fn new(
        projects: ProjectLocalDataSource,
        estimates: EstimateLocalDataSource,
        max_projects: usize,
    ) -> Self {
        Self {
            projects,
            estimates,
            max_projects,
        }
    }

    fn ensure_exists(&self, id: ProjectId) -> CoreResult<()> {
        if self.projects.exists(id)? {
            Ok(())
        } else {
            Err(project_not_found(id))
        }
    }
}

impl ProjectRepository for LocalProjectRepository {
    fn list_projects(&self) -> CoreResult<Vec<Project>> {
        Ok(self
            .projects
            .all()?
            .iter()
            .map(|record| record.from_snapshot(()))
            .collect())
    }

    fn get_project(&self, id: ProjectId) -> CoreResult<Project> {
        let record = self.projects.get(id).map_err(|err| match err {
            SourceError::NotFound { .. } => project_not_found(id),
            other => other.into(),
        })?;
        Ok(record.from_snapshot(()))
    }

    fn create_project(&self, project: &Project) -> CoreResult<Project> {
        if self.projects.count()? >= self.max_projects {
            return Err(Failure::business(format!(
                "Project limit reached (max {})",
                self.max_projects
            )));
        }
        if self.projects.exists(project.id)? {
            return Err(Failure::business(format!(
                "Project already exists: {}",
                project.id
            )));
        }

        self.projects.put(&ProjectRecord::to_snapshot(project))?;
        info!("event=project_create module=repo status=ok project_id={}", project.id);
        Ok(project.clone())
    }

    fn update_project(&self, project: &Project) -> CoreResult<Project> {
        self.ensure_exists(project.id)?;
        self.projects.put(&ProjectRecord::to_snapshot(project))?;
        Ok(project.clone())
    }

    fn delete_project(&self, id: ProjectId) -> CoreResult<CascadeReport> {
        self.ensure_exists(id)?;

        let mut report = CascadeReport::default();
        for estimate in self.estimates.find_by_project(id)? {
            match cascade_delete_estimate(&self.estimates, estimate.id) {
                Ok(step) => report.absorb(step),
                Err(failure) => {
                    warn!(
                        "event=project_delete module=repo status=error project_id={} estimates_deleted={} kind={}",
                        id,
                        report.estimates_deleted,
                        failure.kind.as_str()
                    );
                    return Err(failure);
                }
            }
        }
        self.projects.delete(id)?;

        info!(
            "event=project_delete module=repo status=ok project_id={} estimates_deleted={} line_items_deleted={}",
            id, report.estimates_deleted, report.line_items_deleted
        );
        Ok(report)
    }
}

pub(crate) fn project_not_found(id: ProjectId) -> Failure {
    Failure::not_found(format!("Project not found: {id}"))
}
