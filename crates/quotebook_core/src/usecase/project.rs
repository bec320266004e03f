//! Project operations.

use crate::model::now_epoch_ms;
use crate::model::project::{Project, ProjectId};
use crate::repo::failure::CoreResult;
use crate::repo::project_repo::ProjectRepository;
use crate::repo::CascadeReport;
use crate::usecase::validate::required_text;
use crate::usecase::UseCase;
use std::sync::Arc;

const EMPTY_NAME: &str = "Project name cannot be empty";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectParams {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameProjectParams {
    pub id: ProjectId,
    pub name: String,
}

pub struct CreateProject {
    repo: Arc<dyn ProjectRepository>,
}

impl CreateProject {
    pub fn new(repo: Arc<dyn ProjectRepository>) -> Self {
        Self { repo }
    }
}

impl UseCase for CreateProject {
    type Params = CreateProjectParams;
    type Output = Project;

    fn execute(&self, params: CreateProjectParams) -> CoreResult<Project> {
        let name = required_text(&params.name, EMPTY_NAME)?;
        self.repo.create_project(&Project::new(name, now_epoch_ms()))
    }
}

pub struct RenameProject {
    repo: Arc<dyn ProjectRepository>,
}

impl RenameProject {
    pub fn new(repo: Arc<dyn ProjectRepository>) -> Self {
        Self { repo }
    }
}

impl UseCase for RenameProject {
    type Params = RenameProjectParams;
    type Output = Project;

    fn execute(&self, params: RenameProjectParams) -> CoreResult<Project> {
        let name = required_text(&params.name, EMPTY_NAME)?;
        let current = self.repo.get_project(params.id)?;
        self.repo.update_project(&current.renamed(name))
    }
}

/// Deletes a project together with its estimates and line items.
pub struct DeleteProject {
    repo: Arc<dyn ProjectRepository>,
}

impl DeleteProject {
    pub fn new(repo: Arc<dyn ProjectRepository>) -> Self {
        Self { repo }
    }
}

impl UseCase for DeleteProject {
    type Params = ProjectId;
    type Output = CascadeReport;

    fn execute(&self, id: ProjectId) -> CoreResult<CascadeReport> {
        self.repo.delete_project(id)
    }
}

pub struct ListProjects {
    repo: Arc<dyn ProjectRepository>,
}

impl ListProjects {
    pub fn new(repo: Arc<dyn ProjectRepository>) -> Self {
        Self { repo }
    }
}

impl UseCase for ListProjects {
    type Params = ();
    type Output = Vec<Project>;

    fn execute(&self, _params: ()) -> CoreResult<Vec<Project>> {
        self.repo.list_projects()
    }
}

pub struct GetProject {
    repo: Arc<dyn ProjectRepository>,
}

impl GetProject {
    pub fn new(repo: Arc<dyn ProjectRepository>) -> Self {
        Self { repo }
    }
}

impl UseCase for GetProject {
    type Params = ProjectId;
    type Output = Project;

    fn execute(&self, id: ProjectId) -> CoreResult<Project> {
        self.repo.get_project(id)
    }
}
