use crate::analytics::AnalyticsEvent;
use crate::model::settings::{Settings, ThemePreference};
use crate::repo::failure::CoreResult;
use crate::repo::settings_repo::SettingsRepository;
use crate::state::{FeatureHandler, Transition};
use crate::usecase::settings::{GetSettings, UpdateSettings};
use crate::usecase::UseCase;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    Load,
    Update(Settings),
}

pub struct SettingsHandler {
    get: GetSettings,
    update: UpdateSettings,
}

impl SettingsHandler {
    pub fn new(repo: Arc<dyn SettingsRepository>) -> Self {
        Self {
            get: GetSettings::new(Arc::clone(&repo)),
            update: UpdateSettings::new(repo),
        }
    }
}

impl FeatureHandler for SettingsHandler {
    type Event = SettingsEvent;
    type Data = Settings;

    const FEATURE: &'static str = "settings";

    fn event_name(event: &SettingsEvent) -> &'static str {
        match event {
            SettingsEvent::Load => "load",
            SettingsEvent::Update(_) => "update",
        }
    }

    fn handle(&mut self, event: SettingsEvent) -> CoreResult<Transition<Settings, SettingsEvent>> {
        match event {
            SettingsEvent::Load => Ok(Transition::loaded(self.get.execute(())?)),
            SettingsEvent::Update(settings) => {
                let saved = self.update.execute(settings)?;
                let analytics =
                    AnalyticsEvent::new("settings_updated").param("theme", theme_label(saved.theme));
                Ok(Transition::loaded(saved)
                    .with_analytics(analytics)
                    .then_refresh(SettingsEvent::Load))
            }
        }
    }
}

fn theme_label(theme: ThemePreference) -> &'static str {
    match theme {
        ThemePreference::System => "system",
        ThemePreference::Light => "light",
        ThemePreference::Dark => "dark",
    }
}
