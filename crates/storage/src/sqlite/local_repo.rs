use async_trait::async_trait;
use chrono::Utc;
use flashy_core::model::UserId;
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{conn, ser};
use crate::repository::{CredentialRepository, PreferenceRepository, StorageError};

#[async_trait]
impl CredentialRepository for SqliteRepository {
    async fn load_credential(&self) -> Result<Option<UserId>, StorageError> {
        let row = sqlx::query("SELECT user_id FROM credentials WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let raw: String = row.try_get("user_id").map_err(ser)?;
        UserId::new(raw).map(Some).map_err(ser)
    }

    async fn store_credential(&self, user: &UserId) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO credentials (id, user_id, issued_at)
            VALUES (1, ?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                user_id = excluded.user_id,
                issued_at = excluded.issued_at
            ",
        )
        .bind(user.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(conn)?;
        Ok(())
    }
}

#[async_trait]
impl PreferenceRepository for SqliteRepository {
    async fn get_preference(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM preferences WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        row.map(|row| row.try_get::<String, _>("value").map_err(ser))
            .transpose()
    }

    async fn set_preference(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO preferences (key, value)
            VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            ",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(conn)?;
        Ok(())
    }
}
