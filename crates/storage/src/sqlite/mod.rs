use std::time::Duration;

use flashy_core::model::{Quiz, SavedCard, UserId};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use thiserror::Error;

use crate::feed::ChangeFeed;
use crate::repository::Storage;

mod local_repo;
mod mapping;
mod migrate;
mod quiz_repo;
mod saved_card_repo;

/// Embedded store. Change notification is served by the in-process feeds, so
/// every writer must go through the same `SqliteRepository` (or a clone).
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
    card_feed: ChangeFeed<SavedCard>,
    quiz_feed: ChangeFeed<Quiz>,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl SqliteRepository {
    /// Connect to `SQLite` using the given URL.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the connection cannot be established or if
    /// the connection pragmas fail during setup.
    pub async fn connect(database_url: &str) -> Result<Self, SqliteInitError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    sqlx::query("PRAGMA journal_mode = WAL;")
                        .execute(&mut *conn)
                        .await?;
                    sqlx::query("PRAGMA busy_timeout = 5000;")
                        .execute(&mut *conn)
                        .await?;
                    Ok(())
                })
            })
            .connect(database_url)
            .await?;
        tracing::debug!(url = database_url, "sqlite pool ready");
        Ok(Self {
            pool,
            card_feed: ChangeFeed::new(),
            quiz_feed: ChangeFeed::new(),
        })
    }

    /// Create tables if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if migration queries fail.
    pub async fn migrate(&self) -> Result<(), SqliteInitError> {
        migrate::run_migrations(&self.pool).await
    }

    async fn publish_cards(&self, user: &UserId) {
        match self.load_saved_cards(user).await {
            Ok(snapshot) => self.card_feed.publish(user, &snapshot),
            Err(err) => {
                tracing::warn!(error = %err, "saved card snapshot failed");
                self.card_feed.publish_error(user, &err);
            }
        }
    }

    async fn publish_quizzes(&self, user: &UserId) {
        match self.load_quizzes(user).await {
            Ok(snapshot) => self.quiz_feed.publish(user, &snapshot),
            Err(err) => {
                tracing::warn!(error = %err, "quiz snapshot failed");
                self.quiz_feed.publish_error(user, &err);
            }
        }
    }
}

impl Storage {
    /// Build a `Storage` backed by `SQLite`.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if connection or migrations cannot be
    /// completed.
    pub async fn sqlite(database_url: &str) -> Result<Self, SqliteInitError> {
        let repo = SqliteRepository::connect(database_url).await?;
        repo.migrate().await?;
        Ok(Self::from_repo(repo))
    }
}
