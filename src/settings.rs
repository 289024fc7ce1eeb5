use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{
    cycle::{self, PERIOD_LENGTH_RANGE},
    error::{Error, Result},
    store::{keys, Store},
};

const SUPPORTED_LANGUAGES: [&str; 1] = ["en"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Pink,
    Purple,
    Blue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminders {
    pub period: bool,
    pub ovulation: bool,
    pub symptoms: bool,
}

impl Default for Reminders {
    fn default() -> Self {
        Self {
            period: true,
            ovulation: true,
            symptoms: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub cycle_length: u32,
    pub period_length: u32,
    pub notifications: bool,
    pub theme: Theme,
    pub language: String,
    pub reminders: Reminders,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cycle_length: 28,
            period_length: cycle::DEFAULT_PERIOD_LENGTH,
            notifications: true,
            theme: Theme::default(),
            language: "en".into(),
            reminders: Reminders::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemindersPatch {
    pub period: Option<bool>,
    pub ovulation: Option<bool>,
    pub symptoms: Option<bool>,
}

/// Partial settings; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub cycle_length: Option<u32>,
    pub period_length: Option<u32>,
    pub notifications: Option<bool>,
    pub theme: Option<Theme>,
    pub language: Option<String>,
    pub reminders: Option<RemindersPatch>,
}

impl Settings {
    pub fn merged(&self, patch: SettingsPatch) -> Settings {
        let mut next = self.clone();
        if let Some(v) = patch.cycle_length {
            next.cycle_length = v;
        }
        if let Some(v) = patch.period_length {
            next.period_length = v;
        }
        if let Some(v) = patch.notifications {
            next.notifications = v;
        }
        if let Some(v) = patch.theme {
            next.theme = v;
        }
        if let Some(v) = patch.language {
            next.language = v;
        }
        if let Some(r) = patch.reminders {
            next.reminders.period = r.period.unwrap_or(next.reminders.period);
            next.reminders.ovulation = r.ovulation.unwrap_or(next.reminders.ovulation);
            next.reminders.symptoms = r.symptoms.unwrap_or(next.reminders.symptoms);
        }
        next
    }

    pub fn validate(&self) -> Result<()> {
        cycle::validate_cycle_length(self.cycle_length)?;
        if !PERIOD_LENGTH_RANGE.contains(&self.period_length) {
            return Err(Error::validation(format!(
                "Period length must be between {} and {} days.",
                PERIOD_LENGTH_RANGE.start(),
                PERIOD_LENGTH_RANGE.end()
            )));
        }
        if !SUPPORTED_LANGUAGES.contains(&self.language.as_str()) {
            return Err(Error::validation(format!(
                "Language '{}' is not supported.",
                self.language
            )));
        }
        Ok(())
    }
}

/// Process-wide presentation state driven by the saved settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Presentation {
    pub theme: Theme,
}

#[derive(Clone, Default)]
pub struct PresentationState(Arc<RwLock<Presentation>>);

impl PresentationState {
    pub async fn current(&self) -> Presentation {
        *self.0.read().await
    }

    pub async fn apply(&self, settings: &Settings) {
        let mut guard = self.0.write().await;
        if guard.theme != settings.theme {
            tracing::info!("🎨 Theme set to {:?}", settings.theme);
        }
        guard.theme = settings.theme;
    }
}

/// Stored settings, or defaults when none are saved.
///
/// A stored value that no longer parses is treated as absent.
pub async fn load(store: &Store) -> Result<Settings> {
    let Some(raw) = store.load_raw(keys::USER_SETTINGS).await? else {
        return Ok(Settings::default());
    };

    match serde_json::from_str(&raw) {
        Ok(settings) => Ok(settings),
        Err(e) => {
            tracing::warn!("⚠️ Stored settings unreadable, using defaults: {}", e);
            Ok(Settings::default())
        }
    }
}

pub async fn update(
    store: &Store,
    presentation: &PresentationState,
    patch: SettingsPatch,
) -> Result<Settings> {
    let next = load(store).await?.merged(patch);
    next.validate()?;

    store.save(keys::USER_SETTINGS, &next).await?;
    presentation.apply(&next).await;
    tracing::info!("⚙️ Settings saved");
    Ok(next)
}

pub async fn reset(store: &Store, presentation: &PresentationState) -> Result<Settings> {
    store.remove(keys::USER_SETTINGS).await?;
    let defaults = Settings::default();
    presentation.apply(&defaults).await;
    tracing::info!("⚙️ Settings reset to default");
    Ok(defaults)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_run_yields_defaults() {
        let store = Store::in_memory();
        let settings = load(&store).await.unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.cycle_length, 28);
        assert_eq!(settings.theme, Theme::Pink);
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let store = Store::in_memory();
        let presentation = PresentationState::default();

        let patch = SettingsPatch {
            cycle_length: Some(30),
            reminders: Some(RemindersPatch {
                ovulation: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        };
        let saved = update(&store, &presentation, patch).await.unwrap();

        assert_eq!(saved.cycle_length, 30);
        assert_eq!(saved.period_length, 5);
        assert!(saved.reminders.period);
        assert!(!saved.reminders.ovulation);
        assert_eq!(load(&store).await.unwrap(), saved);
    }

    #[tokio::test]
    async fn saving_applies_theme() {
        let store = Store::in_memory();
        let presentation = PresentationState::default();

        let patch = SettingsPatch {
            theme: Some(Theme::Blue),
            ..Default::default()
        };
        update(&store, &presentation, patch).await.unwrap();

        assert_eq!(presentation.current().await.theme, Theme::Blue);
    }

    #[tokio::test]
    async fn invalid_update_leaves_store_untouched() {
        let store = Store::in_memory();
        let presentation = PresentationState::default();

        let patch = SettingsPatch {
            cycle_length: Some(40),
            theme: Some(Theme::Purple),
            ..Default::default()
        };
        let result = update(&store, &presentation, patch).await;

        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(store.load_raw(keys::USER_SETTINGS).await.unwrap().is_none());
        assert_eq!(presentation.current().await.theme, Theme::Pink);
    }

    #[tokio::test]
    async fn reset_erases_and_restores_default_theme() {
        let store = Store::in_memory();
        let presentation = PresentationState::default();
        let patch = SettingsPatch {
            theme: Some(Theme::Purple),
            ..Default::default()
        };
        update(&store, &presentation, patch).await.unwrap();

        let settings = reset(&store, &presentation).await.unwrap();

        assert_eq!(settings, Settings::default());
        assert!(store.load_raw(keys::USER_SETTINGS).await.unwrap().is_none());
        assert_eq!(presentation.current().await.theme, Theme::Pink);
    }

    #[tokio::test]
    async fn corrupt_stored_settings_fall_back_to_defaults() {
        let store = Store::in_memory();
        store.save(keys::USER_SETTINGS, "{broken").await.unwrap();
        assert_eq!(load(&store).await.unwrap(), Settings::default());
    }

    #[test]
    fn period_length_is_bounded() {
        let settings = Settings {
            period_length: 11,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn unsupported_language_is_rejected() {
        let settings = Settings {
            language: "fr".into(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
