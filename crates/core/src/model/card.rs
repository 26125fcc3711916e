use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardError {
    #[error("card question cannot be empty")]
    EmptyQuestion,

    #[error("card answer cannot be empty")]
    EmptyAnswer,
}

//
// ─── CARD ──────────────────────────────────────────────────────────────────────
//

/// A question/answer pair.
///
/// Text is kept verbatim; two cards are the same card when both fields match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    question: String,
    answer: String,
}

impl Card {
    #[must_use]
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Accepts a pair produced by the generation service.
    ///
    /// # Errors
    ///
    /// Returns `CardError` if either side is blank.
    pub fn from_generated(
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<Self, CardError> {
        let card = Self::new(question, answer);
        if card.question.trim().is_empty() {
            return Err(CardError::EmptyQuestion);
        }
        if card.answer.trim().is_empty() {
            return Err(CardError::EmptyAnswer);
        }
        Ok(card)
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn key(&self) -> CardKey {
        CardKey::for_content(&self.question, &self.answer)
    }
}

//
// ─── CONTENT KEY ───────────────────────────────────────────────────────────────
//

/// Content-derived record key for a saved card.
///
/// Hex-encoded blake3 digest of the question length, the question, and the
/// answer. The length prefix keeps `("ab", "c")` and `("a", "bc")` apart.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardKey(String);

impl CardKey {
    #[must_use]
    pub fn for_content(question: &str, answer: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(question.len() as u64).to_le_bytes());
        hasher.update(question.as_bytes());
        hasher.update(answer.as_bytes());
        Self(hasher.finalize().to_hex().to_string())
    }

    /// Rehydrate a key read back from storage.
    #[must_use]
    pub fn from_persisted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardKey({})", &self.0[..self.0.len().min(12)])
    }
}

impl fmt::Display for CardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//
// ─── SAVED CARD ────────────────────────────────────────────────────────────────
//

/// A bookmarked card in the user's library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedCard {
    card: Card,
    saved_at: DateTime<Utc>,
}

impl SavedCard {
    #[must_use]
    pub fn new(card: Card, saved_at: DateTime<Utc>) -> Self {
        Self { card, saved_at }
    }

    #[must_use]
    pub fn key(&self) -> CardKey {
        self.card.key()
    }

    #[must_use]
    pub fn card(&self) -> &Card {
        &self.card
    }

    #[must_use]
    pub fn question(&self) -> &str {
        self.card.question()
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        self.card.answer()
    }

    #[must_use]
    pub fn saved_at(&self) -> DateTime<Utc> {
        self.saved_at
    }
}

/// Whether `card` is present in the saved collection, compared by content.
#[must_use]
pub fn is_saved(saved: &[SavedCard], card: &Card) -> bool {
    saved.iter().any(|entry| entry.card() == card)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
