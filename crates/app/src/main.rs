use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use flashy_core::model::{Theme, UserId};
use services::config::parse_generator_url;
use services::{AppConfig, AppServices, Clock, Identity, LibrarySync, QuizGenerator, ThemeService};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use ui::{App, UiApp, build_app_context};

const AUTH_FAILED: &str = "Authentication failed. Please try again.";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidGeneratorUrl { raw: String, reason: String },
    InvalidUserId { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidGeneratorUrl { raw, reason } => {
                write!(f, "invalid --generator-url value {raw}: {reason}")
            }
            ArgsError::InvalidUserId { raw } => write!(f, "invalid --user-id value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  flashygen [--db <sqlite_url>] [--generator-url <url>] [--user-id <id>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {}", services::config::DEFAULT_DB_URL);
    eprintln!("  --generator-url {}", services::config::DEFAULT_GENERATOR_URL);
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  FLASHY_DB_URL, FLASHY_GENERATOR_URL, FLASHY_GENERATOR_TIMEOUT_SECS,");
    eprintln!("  FLASHY_USER_ID, RUST_LOG");
}

enum Parsed {
    Run(AppConfig),
    Help,
}

/// Apply command-line flags on top of the environment configuration.
fn apply_args(
    mut config: AppConfig,
    args: &mut impl Iterator<Item = String>,
) -> Result<Parsed, ArgsError> {
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" => {
                let value = require_value(args, "--db")?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidDbUrl { raw: value });
                }
                config.database_url = value;
            }
            "--generator-url" => {
                let value = require_value(args, "--generator-url")?;
                config.generator_url = parse_generator_url(&value).map_err(|reason| {
                    ArgsError::InvalidGeneratorUrl {
                        raw: value.clone(),
                        reason,
                    }
                })?;
            }
            "--user-id" => {
                let value = require_value(args, "--user-id")?;
                let user = UserId::new(value.clone())
                    .map_err(|_| ArgsError::InvalidUserId { raw: value })?;
                config.user_id = Some(user);
            }
            "--help" | "-h" => return Ok(Parsed::Help),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }
    config.database_url = normalize_sqlite_url(&config.database_url);
    Ok(Parsed::Run(config))
}

fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

struct DesktopApp {
    services: AppServices,
    identity: Option<Identity>,
    startup_error: Option<String>,
    theme: Theme,
}

impl UiApp for DesktopApp {
    fn identity(&self) -> Option<Identity> {
        self.identity.clone()
    }

    fn startup_error(&self) -> Option<String> {
        self.startup_error.clone()
    }

    fn library_for(&self, user: UserId) -> LibrarySync {
        self.services.library_for(user)
    }

    fn generator(&self) -> Arc<dyn QuizGenerator> {
        self.services.generator()
    }

    fn theme_service(&self) -> Arc<ThemeService> {
        self.services.theme()
    }

    fn initial_theme(&self) -> Theme {
        self.theme
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    let mut argv = std::env::args().skip(1);
    let config = match apply_args(config, &mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })? {
        Parsed::Run(config) => config,
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
    };

    init_tracing();

    // Storage is opened in the binary so core/services never touch the filesystem layout.
    prepare_sqlite_file(&config.database_url)?;
    let services = AppServices::open(&config, Clock::system()).await?;

    let (identity, startup_error) = match services.identity().sign_in(config.user_id.clone()).await
    {
        Ok(identity) => (Some(identity), None),
        Err(err) => {
            tracing::error!(error = %err, "sign-in failed");
            (None, Some(AUTH_FAILED.to_string()))
        }
    };

    let theme = match services.theme().load().await {
        Ok(theme) => theme,
        Err(err) => {
            tracing::warn!(error = %err, "theme preference unavailable");
            Theme::default()
        }
    };

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        services,
        identity,
        startup_error,
        theme,
    });
    let context = build_app_context(&app);

    // Some dev setups default the window to always-on-top.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("FlashyGen")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
