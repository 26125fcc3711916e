#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod error;
pub mod generation;
pub mod identity_service;
pub mod library_sync;
pub mod theme_service;

pub use flashy_core::Clock;

pub use app_services::AppServices;
pub use config::AppConfig;
pub use error::{
    AppServicesError, ConfigError, GenerationError, IdentityError, SyncError, ThemeServiceError,
};
pub use generation::{GenerationService, QuizGenerator, UploadFile};
pub use identity_service::{Identity, IdentityService};
pub use library_sync::LibrarySync;
pub use theme_service::ThemeService;
