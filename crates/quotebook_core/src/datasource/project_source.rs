use crate::datasource::{Collection, SourceResult};
use crate::db::Database;
use crate::model::project::ProjectId;
use crate::storage::ProjectRecord;

/// Owner of the `projects` collection.
#[derive(Clone)]
pub struct ProjectLocalDataSource {
    projects: Collection<ProjectRecord>,
}

impl ProjectLocalDataSource {
    pub fn open(db: Database) -> SourceResult<Self> {
        Ok(Self {
            projects: Collection::open(db)?,
        })
    }

    pub fn get(&self, id: ProjectId) -> SourceResult<ProjectRecord> {
        self.projects.get(id)
    }

    pub fn exists(&self, id: ProjectId) -> SourceResult<bool> {
        Ok(self.projects.find(id)?.is_some())
    }

    pub fn put(&self, record: &ProjectRecord) -> SourceResult<()> {
        self.projects.put(record)
    }

    pub fn delete(&self, id: ProjectId) -> SourceResult<bool> {
        self.projects.delete(id)
    }

    pub fn all(&self) -> SourceResult<Vec<ProjectRecord>> {
        self.projects.all()
    }

    pub fn count(&self) -> SourceResult<usize> {
        self.projects.count()
    }
}
