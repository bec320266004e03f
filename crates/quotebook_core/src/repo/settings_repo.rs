//! Settings repository contract and local implementation.

use crate::datasource::SettingsLocalDataSource;
use crate::model::settings::Settings;
use crate::repo::failure::CoreResult;
use crate::storage::{SettingsRecord, Snapshot};
use log::info;

/// Repository interface for the settings singleton.
pub trait SettingsRepository: Send + Sync {
    /// Returns the stored settings, persisting defaults on first access.
    fn get_settings(&self) -> CoreResult<Settings>;
    fn save_settings(&self, settings: &Settings) -> CoreResult<Settings>;
}

/// Settings repository over the local `settings` collection.
pub struct LocalSettingsRepository {
    settings: SettingsLocalDataSource,
}

impl LocalSettingsRepository {
    pub fn new(settings: SettingsLocalDataSource) -> Self {
        Self { settings }
    }
}

impl SettingsRepository for LocalSettingsRepository {
    fn get_settings(&self) -> CoreResult<Settings> {
        if let Some(record) = self.settings.find()? {
            return Ok(record.from_snapshot(()));
        }

        let defaults = Settings::default();
        self.settings.put(&SettingsRecord::to_snapshot(&defaults))?;
        info!("event=settings_seed module=repo status=ok");
        Ok(defaults)
    }

    fn save_settings(&self, settings: &Settings) -> CoreResult<Settings> {
        self.settings.put(&SettingsRecord::to_snapshot(settings))?;
        Ok(settings.clone())
    }
}
