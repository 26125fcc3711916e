use std::sync::Arc;

use flashy_core::model::{Theme, UserId};
use services::{Identity, LibrarySync, QuizGenerator, ThemeService};

/// What the composition root hands to the view layer.
pub trait UiApp: Send + Sync {
    /// `None` when sign-in failed at startup.
    fn identity(&self) -> Option<Identity>;
    fn startup_error(&self) -> Option<String>;

    fn library_for(&self, user: UserId) -> LibrarySync;
    fn generator(&self) -> Arc<dyn QuizGenerator>;
    fn theme_service(&self) -> Arc<ThemeService>;
    fn initial_theme(&self) -> Theme;
}

#[derive(Clone)]
pub struct AppContext {
    identity: Option<Identity>,
    startup_error: Option<String>,
    library: Option<LibrarySync>,
    generator: Arc<dyn QuizGenerator>,
    theme_service: Arc<ThemeService>,
    initial_theme: Theme,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let identity = app.identity();
        let library = identity
            .as_ref()
            .map(|identity| app.library_for(identity.user_id.clone()));

        Self {
            identity,
            startup_error: app.startup_error(),
            library,
            generator: app.generator(),
            theme_service: app.theme_service(),
            initial_theme: app.initial_theme(),
        }
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    #[must_use]
    pub fn signed_in(&self) -> bool {
        self.identity.is_some()
    }

    #[must_use]
    pub fn startup_error(&self) -> Option<&str> {
        self.startup_error.as_deref()
    }

    /// Sync layer of the signed-in user.
    #[must_use]
    pub fn library(&self) -> Option<LibrarySync> {
        self.library.clone()
    }

    #[must_use]
    pub fn generator(&self) -> Arc<dyn QuizGenerator> {
        Arc::clone(&self.generator)
    }

    #[must_use]
    pub fn theme_service(&self) -> Arc<ThemeService> {
        Arc::clone(&self.theme_service)
    }

    #[must_use]
    pub fn initial_theme(&self) -> Theme {
        self.initial_theme
    }
}

// Provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
