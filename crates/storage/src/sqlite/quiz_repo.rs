use std::sync::Arc;

use async_trait::async_trait;
use flashy_core::model::{Quiz, QuizDraft, QuizId, UserId, validate_quiz_name};

use super::SqliteRepository;
use super::mapping::{conn, map_quiz_row};
use crate::feed::{Listener, Subscription};
use crate::repository::{QuizRepository, StorageError, invalid_name};

const QUIZ_COLUMNS: &str =
    "id, name, created_at, card_data, format, difficulty, original_file_name";

impl SqliteRepository {
    pub(super) async fn load_quizzes(&self, user: &UserId) -> Result<Vec<Quiz>, StorageError> {
        let sql = format!(
            "SELECT {QUIZ_COLUMNS} FROM quizzes WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC"
        );
        let rows = sqlx::query(&sql)
            .bind(user.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;

        rows.iter().map(map_quiz_row).collect()
    }
}

#[async_trait]
impl QuizRepository for SqliteRepository {
    async fn insert_quiz(&self, user: &UserId, draft: &QuizDraft) -> Result<QuizId, StorageError> {
        let id = QuizId::generate();
        sqlx::query(
            r"
            INSERT INTO quizzes (id, user_id, name, created_at, card_data, format, difficulty, original_file_name)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ",
        )
        .bind(id.to_string())
        .bind(user.as_str())
        .bind(&draft.name)
        .bind(draft.created_at)
        .bind(&draft.card_data)
        .bind(draft.format.as_str())
        .bind(draft.difficulty.as_str())
        .bind(&draft.original_file_name)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        self.publish_quizzes(user).await;
        Ok(id)
    }

    async fn get_quiz(&self, user: &UserId, id: QuizId) -> Result<Option<Quiz>, StorageError> {
        let sql = format!("SELECT {QUIZ_COLUMNS} FROM quizzes WHERE user_id = ?1 AND id = ?2");
        let row = sqlx::query(&sql)
            .bind(user.as_str())
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        row.as_ref().map(map_quiz_row).transpose()
    }

    async fn rename_quiz(
        &self,
        user: &UserId,
        id: QuizId,
        name: &str,
    ) -> Result<(), StorageError> {
        let name = validate_quiz_name(name).map_err(invalid_name)?;
        let res = sqlx::query("UPDATE quizzes SET name = ?1 WHERE user_id = ?2 AND id = ?3")
            .bind(&name)
            .bind(user.as_str())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        self.publish_quizzes(user).await;
        Ok(())
    }

    async fn delete_quiz(&self, user: &UserId, id: QuizId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM quizzes WHERE user_id = ?1 AND id = ?2")
            .bind(user.as_str())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(conn)?;

        if res.rows_affected() > 0 {
            self.publish_quizzes(user).await;
        }
        Ok(())
    }

    async fn list_quizzes(&self, user: &UserId) -> Result<Vec<Quiz>, StorageError> {
        self.load_quizzes(user).await
    }

    async fn subscribe_quizzes(
        &self,
        user: &UserId,
        listener: Listener<Quiz>,
    ) -> Result<Subscription, StorageError> {
        let subscription = self.quiz_feed.register(user, Arc::clone(&listener));
        listener(self.load_quizzes(user).await);
        Ok(subscription)
    }
}
