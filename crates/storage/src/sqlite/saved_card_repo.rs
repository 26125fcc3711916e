use std::sync::Arc;

use async_trait::async_trait;
use flashy_core::model::{CardKey, SavedCard, UserId};

use super::SqliteRepository;
use super::mapping::{conn, map_saved_card_row};
use crate::feed::{Listener, Subscription};
use crate::repository::{SavedCardRepository, StorageError};

impl SqliteRepository {
    pub(super) async fn load_saved_cards(
        &self,
        user: &UserId,
    ) -> Result<Vec<SavedCard>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT question, answer, saved_at
            FROM saved_cards
            WHERE user_id = ?1
            ORDER BY rowid ASC
            ",
        )
        .bind(user.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_saved_card_row).collect()
    }
}

#[async_trait]
impl SavedCardRepository for SqliteRepository {
    async fn upsert_saved_card(&self, user: &UserId, card: &SavedCard) -> Result<(), StorageError> {
        // keep saved_at from the original insert
        sqlx::query(
            r"
            INSERT INTO saved_cards (user_id, card_key, question, answer, saved_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(user_id, card_key) DO UPDATE SET
                question = excluded.question,
                answer = excluded.answer
            ",
        )
        .bind(user.as_str())
        .bind(card.key().as_str())
        .bind(card.question())
        .bind(card.answer())
        .bind(card.saved_at())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        self.publish_cards(user).await;
        Ok(())
    }

    async fn delete_saved_card(&self, user: &UserId, key: &CardKey) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM saved_cards WHERE user_id = ?1 AND card_key = ?2")
            .bind(user.as_str())
            .bind(key.as_str())
            .execute(&self.pool)
            .await
            .map_err(conn)?;

        if res.rows_affected() > 0 {
            self.publish_cards(user).await;
        }
        Ok(())
    }

    async fn list_saved_cards(&self, user: &UserId) -> Result<Vec<SavedCard>, StorageError> {
        self.load_saved_cards(user).await
    }

    async fn subscribe_saved_cards(
        &self,
        user: &UserId,
        listener: Listener<SavedCard>,
    ) -> Result<Subscription, StorageError> {
        let subscription = self.card_feed.register(user, Arc::clone(&listener));
        listener(self.load_saved_cards(user).await);
        Ok(subscription)
    }
}
