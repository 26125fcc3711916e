use std::sync::Arc;

use flashy_core::model::Theme;
use storage::repository::PreferenceRepository;

use crate::error::ThemeServiceError;

/// Preference key holding the theme.
pub const THEME_KEY: &str = "theme";

/// Reads and writes the persisted theme preference.
#[derive(Clone)]
pub struct ThemeService {
    preferences: Arc<dyn PreferenceRepository>,
}

impl ThemeService {
    #[must_use]
    pub fn new(preferences: Arc<dyn PreferenceRepository>) -> Self {
        Self { preferences }
    }

    /// Stored theme, or dark when nothing usable is stored.
    ///
    /// # Errors
    ///
    /// Returns `ThemeServiceError::Storage` if the preference cannot be read.
    pub async fn load(&self) -> Result<Theme, ThemeServiceError> {
        let Some(raw) = self.preferences.get_preference(THEME_KEY).await? else {
            return Ok(Theme::default());
        };
        match raw.parse::<Theme>() {
            Ok(theme) => Ok(theme),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring stored theme");
                Ok(Theme::default())
            }
        }
    }

    /// # Errors
    ///
    /// Returns `ThemeServiceError::Storage` if the preference cannot be written.
    pub async fn save(&self, theme: Theme) -> Result<(), ThemeServiceError> {
        self.preferences
            .set_preference(THEME_KEY, theme.as_str())
            .await?;
        tracing::debug!(theme = theme.as_str(), "theme saved");
        Ok(())
    }
}
