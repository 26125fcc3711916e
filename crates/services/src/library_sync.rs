use std::sync::Arc;

use flashy_core::Clock;
use flashy_core::model::{
    Card, Difficulty, Quiz, QuizDraft, QuizFormat, QuizId, SavedCard, UserId, validate_quiz_name,
};
use storage::repository::{QuizRepository, SavedCardRepository, Storage};
use storage::{Listener, Subscription};

use crate::error::SyncError;

/// Saved cards and quiz library of one signed-in user.
///
/// Writes do not return the new collection state. Callers observe their own
/// writes through the live subscriptions, the same way they observe writes
/// made elsewhere.
#[derive(Clone)]
pub struct LibrarySync {
    user: UserId,
    clock: Clock,
    saved_cards: Arc<dyn SavedCardRepository>,
    quizzes: Arc<dyn QuizRepository>,
}

impl LibrarySync {
    #[must_use]
    pub fn new(
        user: UserId,
        clock: Clock,
        saved_cards: Arc<dyn SavedCardRepository>,
        quizzes: Arc<dyn QuizRepository>,
    ) -> Self {
        Self {
            user,
            clock,
            saved_cards,
            quizzes,
        }
    }

    #[must_use]
    pub fn from_storage(user: UserId, clock: Clock, storage: &Storage) -> Self {
        Self::new(
            user,
            clock,
            Arc::clone(&storage.saved_cards),
            Arc::clone(&storage.quizzes),
        )
    }

    #[must_use]
    pub fn user(&self) -> &UserId {
        &self.user
    }

    //
    // ─── SUBSCRIPTIONS ─────────────────────────────────────────────────────────
    //

    /// Live saved-card collection in arrival order. The listener gets the
    /// current state right away.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Storage` if the subscription cannot be set up.
    pub async fn subscribe_saved_cards(
        &self,
        listener: Listener<SavedCard>,
    ) -> Result<Subscription, SyncError> {
        let sub = self
            .saved_cards
            .subscribe_saved_cards(&self.user, listener)
            .await?;
        tracing::debug!(user = %self.user, id = sub.id(), "subscribed to saved cards");
        Ok(sub)
    }

    /// Live quiz library, newest first.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Storage` if the subscription cannot be set up.
    pub async fn subscribe_quizzes(&self, listener: Listener<Quiz>) -> Result<Subscription, SyncError> {
        let sub = self.quizzes.subscribe_quizzes(&self.user, listener).await?;
        tracing::debug!(user = %self.user, id = sub.id(), "subscribed to quizzes");
        Ok(sub)
    }

    //
    // ─── SAVED CARDS ───────────────────────────────────────────────────────────
    //

    /// Bookmark `card`. Saving the same content again leaves one record.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Storage` if the write fails.
    pub async fn save_card(&self, card: &Card) -> Result<(), SyncError> {
        let saved = SavedCard::new(card.clone(), self.clock.now());
        let result = self.saved_cards.upsert_saved_card(&self.user, &saved).await;
        log_write("save_card", &self.user, &result);
        result.map_err(SyncError::from)
    }

    /// Remove the bookmark for `card`, if any.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Storage` if the delete call fails.
    pub async fn unsave_card(&self, card: &Card) -> Result<(), SyncError> {
        let result = self
            .saved_cards
            .delete_saved_card(&self.user, &card.key())
            .await;
        log_write("unsave_card", &self.user, &result);
        result.map_err(SyncError::from)
    }

    //
    // ─── QUIZZES ───────────────────────────────────────────────────────────────
    //

    /// Store the session's cards as a new quiz named after `file_name`.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Quiz` if `cards` is empty, or `SyncError::Storage`
    /// if the write fails.
    pub async fn save_quiz(
        &self,
        cards: &[Card],
        file_name: &str,
        format: QuizFormat,
        difficulty: Difficulty,
    ) -> Result<QuizId, SyncError> {
        let draft = QuizDraft::from_cards(cards, file_name, format, difficulty, self.clock.now())?;
        let result = self.quizzes.insert_quiz(&self.user, &draft).await;
        log_write("save_quiz", &self.user, &result);
        let id = result?;
        tracing::debug!(quiz = %id, name = %draft.name, cards = cards.len(), "quiz stored");
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns `SyncError::Storage` on read failures.
    pub async fn get_quiz(&self, id: QuizId) -> Result<Option<Quiz>, SyncError> {
        Ok(self.quizzes.get_quiz(&self.user, id).await?)
    }

    /// Delete a quiz. An already absent quiz is not an error.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Storage` if the delete call fails.
    pub async fn delete_quiz(&self, id: QuizId) -> Result<(), SyncError> {
        let result = self.quizzes.delete_quiz(&self.user, id).await;
        log_write("delete_quiz", &self.user, &result);
        result.map_err(SyncError::from)
    }

    /// Change only the display name of a quiz.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Quiz(QuizError::EmptyName)` without touching
    /// storage when the trimmed name is empty, or `SyncError::Storage` if the
    /// update fails.
    pub async fn rename_quiz(&self, id: QuizId, new_name: &str) -> Result<(), SyncError> {
        let name = validate_quiz_name(new_name)?;
        let result = self.quizzes.rename_quiz(&self.user, id, &name).await;
        log_write("rename_quiz", &self.user, &result);
        result.map_err(SyncError::from)
    }
}

fn log_write<T, E: std::fmt::Display>(op: &'static str, user: &UserId, result: &Result<T, E>) {
    match result {
        Ok(_) => tracing::info!(op, user = %user, "library write ok"),
        Err(err) => tracing::warn!(op, user = %user, error = %err, "library write failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashy_core::model::QuizError;
    use flashy_core::time::fixed_clock;
    use std::sync::Mutex;
    use storage::repository::StorageError;

    fn sync() -> LibrarySync {
        LibrarySync::from_storage(
            UserId::new("user-1").unwrap(),
            fixed_clock(),
            &Storage::in_memory(),
        )
    }

    #[tokio::test]
    async fn save_quiz_rejects_empty_session() {
        let err = sync()
            .save_quiz(&[], "a.pdf", QuizFormat::Flashcard, Difficulty::Medium)
            .await
            .unwrap_err();
        assert_eq!(err, SyncError::Quiz(QuizError::NoCards));
    }

    #[tokio::test]
    async fn subscriber_sees_own_writes_echoed() {
        let sync = sync();
        let latest = Arc::new(Mutex::new(Vec::<SavedCard>::new()));
        let sink = Arc::clone(&latest);
        let _sub = sync
            .subscribe_saved_cards(Arc::new(
                move |snapshot: Result<Vec<SavedCard>, StorageError>| {
                    if let Ok(cards) = snapshot {
                        *sink.lock().unwrap() = cards;
                    }
                },
            ))
            .await
            .unwrap();

        sync.save_card(&Card::new("Q", "A")).await.unwrap();
        assert_eq!(latest.lock().unwrap().len(), 1);

        sync.unsave_card(&Card::new("Q", "A")).await.unwrap();
        assert!(latest.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rename_trims_new_name() {
        let sync = sync();
        let id = sync
            .save_quiz(
                &[Card::new("Q", "A")],
                "chem.txt",
                QuizFormat::MultipleChoice,
                Difficulty::Hard,
            )
            .await
            .unwrap();
        sync.rename_quiz(id, "  Chemistry 1 ").await.unwrap();

        let quiz = sync.get_quiz(id).await.unwrap().unwrap();
        assert_eq!(quiz.name(), "Chemistry 1");
        assert_eq!(quiz.format(), QuizFormat::MultipleChoice);
        assert_eq!(quiz.difficulty(), Difficulty::Hard);
    }
}
