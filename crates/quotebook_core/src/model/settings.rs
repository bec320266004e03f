//! Singleton application settings.

use serde::{Deserialize, Serialize};

/// UI theme preference. Rendering itself is outside core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePreference {
    #[default]
    System,
    Light,
    Dark,
}

/// Business identity and display preferences.
///
/// Exactly one instance exists per database; the repository creates it with
/// [`Settings::default`] on first read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub business_name: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub theme: ThemePreference,
    pub currency_symbol: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            business_name: String::new(),
            contact_email: None,
            contact_phone: None,
            theme: ThemePreference::System,
            currency_symbol: "$".to_string(),
        }
    }
}
