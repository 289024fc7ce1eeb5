use chrono::{Local, NaiveDate};

use crate::{
    error::Result,
    settings::{self, PresentationState},
    store::Store,
};

/// Shared state handed to every route.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub presentation: PresentationState,
    fixed_today: Option<NaiveDate>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            presentation: PresentationState::default(),
            fixed_today: None,
        }
    }

    /// Pins "today" instead of reading the local clock.
    pub fn with_fixed_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_today
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Applies the stored settings to the presentation state.
    pub async fn apply_stored_settings(&self) -> Result<()> {
        let current = settings::load(&self.store).await?;
        self.presentation.apply(&current).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Theme;

    #[test]
    fn fixed_today_overrides_clock() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let state = AppState::new(Store::in_memory()).with_fixed_today(day);
        assert_eq!(state.today(), day);
    }

    #[tokio::test]
    async fn stored_theme_is_applied_on_startup() {
        let store = Store::in_memory();
        store
            .save(
                crate::store::keys::USER_SETTINGS,
                &settings::Settings {
                    theme: Theme::Purple,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let state = AppState::new(store);
        state.apply_stored_settings().await.unwrap();

        assert_eq!(state.presentation.current().await.theme, Theme::Purple);
    }
}
