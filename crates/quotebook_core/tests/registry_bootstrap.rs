use async_trait::async_trait;
use quotebook_core::usecase::project::CreateProjectParams;
use quotebook_core::{
    AnalyticsError, AnalyticsParams, AnalyticsSink, CoreConfig, InitError, LoggingConfig,
    NoopAnalytics, Registry, Settings, ThemePreference, UseCase,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

struct UnreachableSink {
    started: AtomicBool,
}

#[async_trait]
impl AnalyticsSink for UnreachableSink {
    async fn start(&self) -> Result<(), AnalyticsError> {
        self.started.store(true, Ordering::SeqCst);
        Err(AnalyticsError::Unavailable("no network".to_string()))
    }

    async fn log_event(&self, _name: &str, _params: &AnalyticsParams) -> Result<(), AnalyticsError> {
        Ok(())
    }
}

#[tokio::test]
async fn file_database_survives_reinitialisation() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("quotebook.sqlite3");

    {
        let registry = Registry::init(
            CoreConfig::with_database_file(&db_path),
            Arc::new(NoopAnalytics),
        )
        .await
        .unwrap();
        registry
            .create_project()
            .execute(CreateProjectParams {
                name: "Patio".to_string(),
            })
            .unwrap();
        registry
            .update_settings()
            .execute(Settings {
                business_name: "Acme Builders".to_string(),
                theme: ThemePreference::Light,
                ..Settings::default()
            })
            .unwrap();
    }

    let reopened = Registry::init(
        CoreConfig::with_database_file(&db_path),
        Arc::new(NoopAnalytics),
    )
    .await
    .unwrap();
    let projects = reopened.list_projects().execute(()).unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].name, "Patio");

    let settings = reopened.get_settings().execute(()).unwrap();
    assert_eq!(settings.business_name, "Acme Builders");
    assert_eq!(settings.theme, ThemePreference::Light);
}

#[tokio::test]
async fn settings_are_seeded_once_with_defaults() {
    let registry = Registry::init(CoreConfig::in_memory(), Arc::new(NoopAnalytics))
        .await
        .unwrap();

    assert_eq!(
        registry.get_settings().execute(()).unwrap(),
        Settings::default()
    );
    assert_eq!(
        registry.get_settings().execute(()).unwrap().currency_symbol,
        "$"
    );
}

#[tokio::test]
async fn configured_project_limit_reaches_the_repository() {
    let config = CoreConfig::from_json_str(r#"{"database": "memory", "max_projects": 1}"#).unwrap();
    let registry = Registry::init(config, Arc::new(NoopAnalytics)).await.unwrap();
    let create = registry.create_project();

    create
        .execute(CreateProjectParams {
            name: "only".to_string(),
        })
        .unwrap();
    let failure = create
        .execute(CreateProjectParams {
            name: "one too many".to_string(),
        })
        .unwrap_err();
    assert_eq!(failure.message, "Project limit reached (max 1)");
}

#[tokio::test]
async fn invalid_config_fails_before_anything_starts() {
    let sink = Arc::new(UnreachableSink {
        started: AtomicBool::new(false),
    });
    let config = CoreConfig {
        max_projects: 0,
        ..CoreConfig::in_memory()
    };

    let err = Registry::init(config, sink.clone()).await.err().unwrap();
    assert!(matches!(err, InitError::Config(_)));
    assert!(!sink.started.load(Ordering::SeqCst));
}

#[tokio::test]
async fn relative_log_directory_is_rejected() {
    let config = CoreConfig {
        logging: Some(LoggingConfig {
            level: "info".to_string(),
            dir: "relative/logs".to_string(),
        }),
        ..CoreConfig::in_memory()
    };

    let err = Registry::init(config, Arc::new(NoopAnalytics))
        .await
        .err()
        .unwrap();
    assert!(matches!(err, InitError::Logging(_)));
}

#[tokio::test]
async fn analytics_start_failure_aborts_init() {
    let sink = Arc::new(UnreachableSink {
        started: AtomicBool::new(false),
    });

    let err = Registry::init(CoreConfig::in_memory(), sink.clone())
        .await
        .err()
        .unwrap();
    assert!(matches!(err, InitError::Analytics(AnalyticsError::Unavailable(_))));
    assert!(sink.started.load(Ordering::SeqCst));
}
