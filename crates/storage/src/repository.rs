use async_trait::async_trait;
use flashy_core::model::{CardKey, Quiz, QuizDraft, QuizError, QuizId, SavedCard, UserId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::feed::{ChangeFeed, Listener, Subscription};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Blank quiz names never reach a backend; both report them the same way.
pub(crate) fn invalid_name(err: QuizError) -> StorageError {
    StorageError::Serialization(err.to_string())
}

/// The user's bookmarked cards, keyed by content.
#[async_trait]
pub trait SavedCardRepository: Send + Sync {
    /// Create the record at the card's content key, or merge into the existing
    /// one. An existing record keeps its original `saved_at`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    async fn upsert_saved_card(&self, user: &UserId, card: &SavedCard) -> Result<(), StorageError>;

    /// Delete the record at `key`. Deleting an absent record succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the delete call itself fails.
    async fn delete_saved_card(&self, user: &UserId, key: &CardKey) -> Result<(), StorageError>;

    /// All saved cards in arrival order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read failures.
    async fn list_saved_cards(&self, user: &UserId) -> Result<Vec<SavedCard>, StorageError>;

    /// Receive the current collection now and again after every change.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the subscription cannot be set up.
    async fn subscribe_saved_cards(
        &self,
        user: &UserId,
        listener: Listener<SavedCard>,
    ) -> Result<Subscription, StorageError>;
}

/// The user's quiz library.
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Store a new quiz under a freshly assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    async fn insert_quiz(&self, user: &UserId, draft: &QuizDraft) -> Result<QuizId, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on read failures.
    async fn get_quiz(&self, user: &UserId, id: QuizId) -> Result<Option<Quiz>, StorageError>;

    /// Update only the name of a stored quiz.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the quiz does not exist.
    async fn rename_quiz(&self, user: &UserId, id: QuizId, name: &str)
    -> Result<(), StorageError>;

    /// Delete a quiz. Deleting an absent quiz succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the delete call itself fails.
    async fn delete_quiz(&self, user: &UserId, id: QuizId) -> Result<(), StorageError>;

    /// All quizzes, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read failures.
    async fn list_quizzes(&self, user: &UserId) -> Result<Vec<Quiz>, StorageError>;

    /// Receive the current library now and again after every change.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the subscription cannot be set up.
    async fn subscribe_quizzes(
        &self,
        user: &UserId,
        listener: Listener<Quiz>,
    ) -> Result<Subscription, StorageError>;
}

/// Locally kept identity credential.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` on read failures.
    async fn load_credential(&self) -> Result<Option<UserId>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the credential cannot be written.
    async fn store_credential(&self, user: &UserId) -> Result<(), StorageError>;
}

/// Local key/value preferences.
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` on read failures.
    async fn get_preference(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    async fn set_preference(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory document store for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    saved_cards: Arc<Mutex<HashMap<UserId, Vec<SavedCard>>>>,
    quizzes: Arc<Mutex<HashMap<UserId, Vec<Quiz>>>>,
    credential: Arc<Mutex<Option<UserId>>>,
    preferences: Arc<Mutex<HashMap<String, String>>>,
    card_feed: ChangeFeed<SavedCard>,
    quiz_feed: ChangeFeed<Quiz>,
}

fn poisoned<E: ToString>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn saved_snapshot(&self, user: &UserId) -> Result<Vec<SavedCard>, StorageError> {
        let guard = self.saved_cards.lock().map_err(poisoned)?;
        Ok(guard.get(user).cloned().unwrap_or_default())
    }

    fn quiz_snapshot(&self, user: &UserId) -> Result<Vec<Quiz>, StorageError> {
        let guard = self.quizzes.lock().map_err(poisoned)?;
        let mut quizzes = guard.get(user).cloned().unwrap_or_default();
        quizzes.reverse();
        quizzes.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(quizzes)
    }

    fn publish_cards(&self, user: &UserId) {
        match self.saved_snapshot(user) {
            Ok(snapshot) => self.card_feed.publish(user, &snapshot),
            Err(err) => self.card_feed.publish_error(user, &err),
        }
    }

    fn publish_quizzes(&self, user: &UserId) {
        match self.quiz_snapshot(user) {
            Ok(snapshot) => self.quiz_feed.publish(user, &snapshot),
            Err(err) => self.quiz_feed.publish_error(user, &err),
        }
    }
}

#[async_trait]
impl SavedCardRepository for InMemoryRepository {
    async fn upsert_saved_card(&self, user: &UserId, card: &SavedCard) -> Result<(), StorageError> {
        {
            let mut guard = self.saved_cards.lock().map_err(poisoned)?;
            let cards = guard.entry(user.clone()).or_default();
            let key = card.key();
            match cards.iter_mut().find(|existing| existing.key() == key) {
                Some(existing) => {
                    *existing = SavedCard::new(card.card().clone(), existing.saved_at());
                }
                None => cards.push(card.clone()),
            }
        }
        self.publish_cards(user);
        Ok(())
    }

    async fn delete_saved_card(&self, user: &UserId, key: &CardKey) -> Result<(), StorageError> {
        {
            let mut guard = self.saved_cards.lock().map_err(poisoned)?;
            if let Some(cards) = guard.get_mut(user) {
                cards.retain(|existing| &existing.key() != key);
            }
        }
        self.publish_cards(user);
        Ok(())
    }

    async fn list_saved_cards(&self, user: &UserId) -> Result<Vec<SavedCard>, StorageError> {
        self.saved_snapshot(user)
    }

    async fn subscribe_saved_cards(
        &self,
        user: &UserId,
        listener: Listener<SavedCard>,
    ) -> Result<Subscription, StorageError> {
        let subscription = self.card_feed.register(user, Arc::clone(&listener));
        listener(self.saved_snapshot(user));
        Ok(subscription)
    }
}

#[async_trait]
impl QuizRepository for InMemoryRepository {
    async fn insert_quiz(&self, user: &UserId, draft: &QuizDraft) -> Result<QuizId, StorageError> {
        let id = QuizId::generate();
        {
            let mut guard = self.quizzes.lock().map_err(poisoned)?;
            guard
                .entry(user.clone())
                .or_default()
                .push(draft.clone().assign_id(id));
        }
        self.publish_quizzes(user);
        Ok(id)
    }

    async fn get_quiz(&self, user: &UserId, id: QuizId) -> Result<Option<Quiz>, StorageError> {
        let guard = self.quizzes.lock().map_err(poisoned)?;
        Ok(guard
            .get(user)
            .and_then(|quizzes| quizzes.iter().find(|q| q.id() == id))
            .cloned())
    }

    async fn rename_quiz(
        &self,
        user: &UserId,
        id: QuizId,
        name: &str,
    ) -> Result<(), StorageError> {
        {
            let mut guard = self.quizzes.lock().map_err(poisoned)?;
            let quiz = guard
                .get_mut(user)
                .and_then(|quizzes| quizzes.iter_mut().find(|q| q.id() == id))
                .ok_or(StorageError::NotFound)?;
            quiz.rename(name).map_err(invalid_name)?;
        }
        self.publish_quizzes(user);
        Ok(())
    }

    async fn delete_quiz(&self, user: &UserId, id: QuizId) -> Result<(), StorageError> {
        {
            let mut guard = self.quizzes.lock().map_err(poisoned)?;
            if let Some(quizzes) = guard.get_mut(user) {
                quizzes.retain(|q| q.id() != id);
            }
        }
        self.publish_quizzes(user);
        Ok(())
    }

    async fn list_quizzes(&self, user: &UserId) -> Result<Vec<Quiz>, StorageError> {
        self.quiz_snapshot(user)
    }

    async fn subscribe_quizzes(
        &self,
        user: &UserId,
        listener: Listener<Quiz>,
    ) -> Result<Subscription, StorageError> {
        let subscription = self.quiz_feed.register(user, Arc::clone(&listener));
        listener(self.quiz_snapshot(user));
        Ok(subscription)
    }
}

#[async_trait]
impl CredentialRepository for InMemoryRepository {
    async fn load_credential(&self) -> Result<Option<UserId>, StorageError> {
        let guard = self.credential.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }

    async fn store_credential(&self, user: &UserId) -> Result<(), StorageError> {
        let mut guard = self.credential.lock().map_err(poisoned)?;
        *guard = Some(user.clone());
        Ok(())
    }
}

#[async_trait]
impl PreferenceRepository for InMemoryRepository {
    async fn get_preference(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self.preferences.lock().map_err(poisoned)?;
        Ok(guard.get(key).cloned())
    }

    async fn set_preference(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self.preferences.lock().map_err(poisoned)?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Aggregates the store's repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub saved_cards: Arc<dyn SavedCardRepository>,
    pub quizzes: Arc<dyn QuizRepository>,
    pub credentials: Arc<dyn CredentialRepository>,
    pub preferences: Arc<dyn PreferenceRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repo(InMemoryRepository::new())
    }

    /// Use one repository value for every collection.
    #[must_use]
    pub fn from_repo<R>(repo: R) -> Self
    where
        R: SavedCardRepository
            + QuizRepository
            + CredentialRepository
            + PreferenceRepository
            + Clone
            + 'static,
    {
        Self {
            saved_cards: Arc::new(repo.clone()),
            quizzes: Arc::new(repo.clone()),
            credentials: Arc::new(repo.clone()),
            preferences: Arc::new(repo),
        }
    }
}
