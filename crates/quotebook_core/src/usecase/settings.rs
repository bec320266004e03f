//! Settings operations.

use crate::model::settings::Settings;
use crate::repo::failure::CoreResult;
use crate::repo::settings_repo::SettingsRepository;
use crate::usecase::validate;
use crate::usecase::UseCase;
use std::sync::Arc;

pub struct GetSettings {
    repo: Arc<dyn SettingsRepository>,
}

impl GetSettings {
    pub fn new(repo: Arc<dyn SettingsRepository>) -> Self {
        Self { repo }
    }
}

impl UseCase for GetSettings {
    type Params = ();
    type Output = Settings;

    fn execute(&self, _params: ()) -> CoreResult<Settings> {
        self.repo.get_settings()
    }
}

pub struct UpdateSettings {
    repo: Arc<dyn SettingsRepository>,
}

impl UpdateSettings {
    pub fn new(repo: Arc<dyn SettingsRepository>) -> Self {
        Self { repo }
    }
}

impl UseCase for UpdateSettings {
    type Params = Settings;
    type Output = Settings;

    fn execute(&self, settings: Settings) -> CoreResult<Settings> {
        let currency_symbol =
            validate::required_text(&settings.currency_symbol, "Currency symbol cannot be empty")?;
        let contact_email = validate::optional_email(settings.contact_email.as_deref())?;
        let next = Settings {
            business_name: settings.business_name.trim().to_string(),
            contact_email,
            contact_phone: validate::optional_text(settings.contact_phone.as_deref()),
            theme: settings.theme,
            currency_symbol,
        };
        self.repo.save_settings(&next)
    }
}
