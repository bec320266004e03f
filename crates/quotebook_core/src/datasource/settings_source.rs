use crate::datasource::{Collection, SourceResult};
use crate::db::Database;
use crate::storage::{SettingsRecord, SETTINGS_KEY};

/// Owner of the single-row `settings` collection.
#[derive(Clone)]
pub struct SettingsLocalDataSource {
    settings: Collection<SettingsRecord>,
}

impl SettingsLocalDataSource {
    pub fn open(db: Database) -> SourceResult<Self> {
        Ok(Self {
            settings: Collection::open(db)?,
        })
    }

    pub fn find(&self) -> SourceResult<Option<SettingsRecord>> {
        self.settings.find(SETTINGS_KEY)
    }

    pub fn put(&self, record: &SettingsRecord) -> SourceResult<()> {
        self.settings.put(record)
    }
}
