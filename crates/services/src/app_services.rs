use std::sync::Arc;

use flashy_core::model::UserId;
use storage::repository::Storage;

use crate::Clock;
use crate::config::AppConfig;
use crate::error::AppServicesError;
use crate::generation::{GenerationService, QuizGenerator};
use crate::identity_service::IdentityService;
use crate::library_sync::LibrarySync;
use crate::theme_service::ThemeService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    storage: Storage,
    identity: Arc<IdentityService>,
    theme: Arc<ThemeService>,
    generator: Arc<dyn QuizGenerator>,
}

impl AppServices {
    /// Open `SQLite` storage and build the HTTP generator from `config`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the
    /// generation client cannot be built.
    pub async fn open(config: &AppConfig, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(&config.database_url).await?;
        let generator =
            GenerationService::new(&config.generator_url, config.generator_timeout)?;
        tracing::info!(
            db = %config.database_url,
            generator = %generator.endpoint(),
            "services ready"
        );
        Ok(Self::with_parts(clock, storage, Arc::new(generator)))
    }

    /// Build services from already constructed parts.
    #[must_use]
    pub fn with_parts(clock: Clock, storage: Storage, generator: Arc<dyn QuizGenerator>) -> Self {
        let identity = Arc::new(IdentityService::new(Arc::clone(&storage.credentials)));
        let theme = Arc::new(ThemeService::new(Arc::clone(&storage.preferences)));
        Self {
            clock,
            storage,
            identity,
            theme,
            generator,
        }
    }

    #[must_use]
    pub fn identity(&self) -> Arc<IdentityService> {
        Arc::clone(&self.identity)
    }

    #[must_use]
    pub fn theme(&self) -> Arc<ThemeService> {
        Arc::clone(&self.theme)
    }

    #[must_use]
    pub fn generator(&self) -> Arc<dyn QuizGenerator> {
        Arc::clone(&self.generator)
    }

    /// Sync layer scoped to `user`.
    #[must_use]
    pub fn library_for(&self, user: UserId) -> LibrarySync {
        LibrarySync::from_storage(user, self.clock, &self.storage)
    }
}
