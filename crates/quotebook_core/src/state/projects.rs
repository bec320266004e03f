use crate::analytics::AnalyticsEvent;
use crate::model::project::{Project, ProjectId};
use crate::repo::failure::CoreResult;
use crate::repo::project_repo::ProjectRepository;
use crate::repo::CascadeReport;
use crate::state::{FeatureHandler, Transition};
use crate::usecase::project::{
    CreateProject, CreateProjectParams, DeleteProject, ListProjects, RenameProject,
    RenameProjectParams,
};
use crate::usecase::UseCase;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectsEvent {
    Load,
    Create { name: String },
    Rename { id: ProjectId, name: String },
    Delete { id: ProjectId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectsData {
    Projects(Vec<Project>),
    Saved(Project),
    Deleted { id: ProjectId, report: CascadeReport },
}

/// Project list screen logic.
pub struct ProjectsHandler {
    list: ListProjects,
    create: CreateProject,
    rename: RenameProject,
    delete: DeleteProject,
}

impl ProjectsHandler {
    pub fn new(repo: Arc<dyn ProjectRepository>) -> Self {
        Self {
            list: ListProjects::new(Arc::clone(&repo)),
            create: CreateProject::new(Arc::clone(&repo)),
            rename: RenameProject::new(Arc::clone(&repo)),
            delete: DeleteProject::new(repo),
        }
    }
}

type ProjectsTransition = Transition<ProjectsData, ProjectsEvent>;

impl FeatureHandler for ProjectsHandler {
    type Event = ProjectsEvent;
    type Data = ProjectsData;

    const FEATURE: &'static str = "projects";

    fn event_name(event: &ProjectsEvent) -> &'static str {
        match event {
            ProjectsEvent::Load => "load",
            ProjectsEvent::Create { .. } => "create",
            ProjectsEvent::Rename { .. } => "rename",
            ProjectsEvent::Delete { .. } => "delete",
        }
    }

    fn handle(&mut self, event: ProjectsEvent) -> CoreResult<ProjectsTransition> {
        match event {
            ProjectsEvent::Load => {
                let projects = self.list.execute(())?;
                Ok(Transition::loaded(ProjectsData::Projects(projects)))
            }
            ProjectsEvent::Create { name } => {
                let project = self.create.execute(CreateProjectParams { name })?;
                let analytics = AnalyticsEvent::new("project_created")
                    .param("project_id", project.id.to_string());
                Ok(Transition::loaded(ProjectsData::Saved(project))
                    .with_analytics(analytics)
                    .then_refresh(ProjectsEvent::Load))
            }
            ProjectsEvent::Rename { id, name } => {
                let project = self.rename.execute(RenameProjectParams { id, name })?;
                let analytics = AnalyticsEvent::new("project_renamed")
                    .param("project_id", project.id.to_string());
                Ok(Transition::loaded(ProjectsData::Saved(project))
                    .with_analytics(analytics)
                    .then_refresh(ProjectsEvent::Load))
            }
            ProjectsEvent::Delete { id } => {
                let report = self.delete.execute(id)?;
                let analytics = AnalyticsEvent::new("project_deleted")
                    .param("project_id", id.to_string())
                    .param("estimates_deleted", report.estimates_deleted);
                Ok(Transition::loaded(ProjectsData::Deleted { id, report })
                    .with_analytics(analytics)
                    .then_refresh(ProjectsEvent::Load))
            }
        }
    }
}
