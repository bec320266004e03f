//! Offline-first data and state core for Quotebook.
//! This crate is the single source of truth for business invariants.

pub mod analytics;
pub mod config;
pub mod datasource;
pub mod db;
pub mod logging;
pub mod model;
pub mod registry;
pub mod repo;
pub mod state;
pub mod storage;
pub mod usecase;

pub use analytics::{
    AnalyticsError, AnalyticsEvent, AnalyticsParams, AnalyticsSink, AnalyticsValue,
    LogAnalytics, NoopAnalytics,
};
pub use config::{CoreConfig, DatabaseLocation, LoggingConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::client::{Client, ClientId};
pub use model::estimate::{Estimate, EstimateId, LineItem, LineItemId};
pub use model::project::{Project, ProjectId};
pub use model::settings::{Settings, ThemePreference};
pub use registry::{InitError, Registry};
pub use repo::failure::{CoreResult, CoreResultExt, Failure, FailureKind};
pub use repo::CascadeReport;
pub use state::{Emission, StateMachine, ViewState};
pub use usecase::UseCase;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
