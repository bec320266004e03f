//! Composition root.
//!
//! # Responsibility
//! - Build every collaborator once, in a fixed order, at startup.
//! - Hand out shared repositories, operation instances and state machines.
//!
//! # Invariants
//! - Init order: logging and analytics, then the database and every data
//!   source, then repositories.
//! - A `Registry` value only exists after `init` succeeded, so nothing can
//!   be resolved from a half-built graph.

use crate::analytics::{AnalyticsError, AnalyticsSink};
use crate::config::{ConfigError, CoreConfig, DatabaseLocation};
use crate::datasource::{
    ClientLocalDataSource, EstimateLocalDataSource, ProjectLocalDataSource,
    SettingsLocalDataSource, SourceError,
};
use crate::db::{Database, DbError};
use crate::logging::{init_logging, LoggingError};
use crate::repo::client_repo::{ClientRepository, LocalClientRepository};
use crate::repo::estimate_repo::{EstimateRepository, LocalEstimateRepository};
use crate::repo::integrity_repo::{IntegrityRepository, LocalIntegrityRepository};
use crate::repo::project_repo::{LocalProjectRepository, ProjectRepository};
use crate::repo::settings_repo::{LocalSettingsRepository, SettingsRepository};
use crate::state::{
    ClientsHandler, EstimatesHandler, ProjectsHandler, SettingsHandler, StateMachine,
};
use crate::usecase::client::{DeleteClient, ListClients, SaveClient};
use crate::usecase::estimate::{
    CreateEstimate, DeleteEstimate, GetEstimate, ListEstimates, UpdateEstimate,
};
use crate::usecase::integrity::{RepairIntegrity, ScanIntegrity};
use crate::usecase::project::{
    CreateProject, DeleteProject, GetProject, ListProjects, RenameProject,
};
use crate::usecase::settings::{GetSettings, UpdateSettings};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Instant;

/// Startup failures. Nothing is usable when `init` returns one.
#[derive(Debug)]
pub enum InitError {
    Config(ConfigError),
    Logging(LoggingError),
    Analytics(AnalyticsError),
    Db(DbError),
    Source(SourceError),
}

impl Display for InitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Logging(err) => write!(f, "{err}"),
            Self::Analytics(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Source(err) => write!(f, "{err}"),
        }
    }
}

impl Error for InitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Logging(err) => Some(err),
            Self::Analytics(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Source(err) => Some(err),
        }
    }
}

impl From<ConfigError> for InitError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<LoggingError> for InitError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<AnalyticsError> for InitError {
    fn from(value: AnalyticsError) -> Self {
        Self::Analytics(value)
    }
}

impl From<DbError> for InitError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<SourceError> for InitError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

struct DataSources {
    projects: ProjectLocalDataSource,
    estimates: EstimateLocalDataSource,
    clients: ClientLocalDataSource,
    settings: SettingsLocalDataSource,
}

/// Process-lifetime object graph.
pub struct Registry {
    config: CoreConfig,
    analytics: Arc<dyn AnalyticsSink>,
    projects: Arc<dyn ProjectRepository>,
    estimates: Arc<dyn EstimateRepository>,
    clients: Arc<dyn ClientRepository>,
    settings: Arc<dyn SettingsRepository>,
    integrity: Arc<dyn IntegrityRepository>,
}

impl Registry {
    /// Builds the full graph. Call once at startup and await it before
    /// dispatching any event.
    pub async fn init(
        config: CoreConfig,
        analytics: Arc<dyn AnalyticsSink>,
    ) -> Result<Self, InitError> {
        let started_at = Instant::now();
        match Self::build(config, analytics).await {
            Ok(registry) => {
                info!(
                    "event=registry_init module=registry status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(registry)
            }
            Err(err) => {
                error!(
                    "event=registry_init module=registry status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    async fn build(
        config: CoreConfig,
        analytics: Arc<dyn AnalyticsSink>,
    ) -> Result<Self, InitError> {
        config.validate()?;

        if let Some(logging) = &config.logging {
            init_logging(logging)?;
        }
        analytics.start().await?;

        let sources = open_data_sources(&config.database)?;

        let projects: Arc<dyn ProjectRepository> = Arc::new(LocalProjectRepository::new(
            sources.projects.clone(),
            sources.estimates.clone(),
            config.max_projects,
        ));
        let estimates: Arc<dyn EstimateRepository> = Arc::new(LocalEstimateRepository::new(
            sources.projects.clone(),
            sources.estimates.clone(),
            sources.clients.clone(),
        ));
        let clients: Arc<dyn ClientRepository> =
            Arc::new(LocalClientRepository::new(sources.clients.clone()));
        let settings: Arc<dyn SettingsRepository> =
            Arc::new(LocalSettingsRepository::new(sources.settings));
        let integrity: Arc<dyn IntegrityRepository> = Arc::new(LocalIntegrityRepository::new(
            sources.projects,
            sources.estimates,
            sources.clients,
        ));

        Ok(Self {
            config,
            analytics,
            projects,
            estimates,
            clients,
            settings,
            integrity,
        })
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn analytics(&self) -> Arc<dyn AnalyticsSink> {
        Arc::clone(&self.analytics)
    }

    pub fn project_repository(&self) -> Arc<dyn ProjectRepository> {
        Arc::clone(&self.projects)
    }

    pub fn estimate_repository(&self) -> Arc<dyn EstimateRepository> {
        Arc::clone(&self.estimates)
    }

    pub fn client_repository(&self) -> Arc<dyn ClientRepository> {
        Arc::clone(&self.clients)
    }

    pub fn settings_repository(&self) -> Arc<dyn SettingsRepository> {
        Arc::clone(&self.settings)
    }

    pub fn integrity_repository(&self) -> Arc<dyn IntegrityRepository> {
        Arc::clone(&self.integrity)
    }

    pub fn create_project(&self) -> CreateProject {
        CreateProject::new(self.project_repository())
    }

    pub fn rename_project(&self) -> RenameProject {
        RenameProject::new(self.project_repository())
    }

    pub fn delete_project(&self) -> DeleteProject {
        DeleteProject::new(self.project_repository())
    }

    pub fn list_projects(&self) -> ListProjects {
        ListProjects::new(self.project_repository())
    }

    pub fn get_project(&self) -> GetProject {
        GetProject::new(self.project_repository())
    }

    pub fn create_estimate(&self) -> CreateEstimate {
        CreateEstimate::new(self.estimate_repository(), self.client_repository())
    }

    pub fn update_estimate(&self) -> UpdateEstimate {
        UpdateEstimate::new(self.estimate_repository())
    }

    pub fn delete_estimate(&self) -> DeleteEstimate {
        DeleteEstimate::new(self.estimate_repository())
    }

    pub fn list_estimates(&self) -> ListEstimates {
        ListEstimates::new(self.estimate_repository())
    }

    pub fn get_estimate(&self) -> GetEstimate {
        GetEstimate::new(self.estimate_repository())
    }

    pub fn save_client(&self) -> SaveClient {
        SaveClient::new(self.client_repository())
    }

    pub fn delete_client(&self) -> DeleteClient {
        DeleteClient::new(self.client_repository())
    }

    pub fn list_clients(&self) -> ListClients {
        ListClients::new(self.client_repository())
    }

    pub fn get_settings(&self) -> GetSettings {
        GetSettings::new(self.settings_repository())
    }

    pub fn update_settings(&self) -> UpdateSettings {
        UpdateSettings::new(self.settings_repository())
    }

    pub fn scan_integrity(&self) -> ScanIntegrity {
        ScanIntegrity::new(self.integrity_repository())
    }

    pub fn repair_integrity(&self) -> RepairIntegrity {
        RepairIntegrity::new(self.integrity_repository())
    }

    /// Starts a fresh projects state machine.
    ///
    /// # Panics
    /// Panics outside a Tokio runtime.
    pub fn projects_machine(&self) -> StateMachine<ProjectsHandler> {
        StateMachine::spawn(ProjectsHandler::new(self.project_repository()), self.analytics())
    }

    pub fn estimates_machine(&self) -> StateMachine<EstimatesHandler> {
        StateMachine::spawn(
            EstimatesHandler::new(self.estimate_repository(), self.client_repository()),
            self.analytics(),
        )
    }

    pub fn clients_machine(&self) -> StateMachine<ClientsHandler> {
        StateMachine::spawn(ClientsHandler::new(self.client_repository()), self.analytics())
    }

    pub fn settings_machine(&self) -> StateMachine<SettingsHandler> {
        StateMachine::spawn(
            SettingsHandler::new(self.settings_repository()),
            self.analytics(),
        )
    }
}

fn open_data_sources(location: &DatabaseLocation) -> Result<DataSources, InitError> {
    let db = match location {
        DatabaseLocation::Memory => Database::open_in_memory()?,
        DatabaseLocation::File(path) => Database::open(path)?,
    };

    let clients = ClientLocalDataSource::open(db.clone())?;
    let projects = ProjectLocalDataSource::open(db.clone())?;
    let estimates = EstimateLocalDataSource::open(db.clone(), clients.clone())?;
    let settings = SettingsLocalDataSource::open(db)?;
    info!("event=datasource_open module=registry status=ok collections=5");

    Ok(DataSources {
        projects,
        estimates,
        clients,
        settings,
    })
}
