use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::card::Card;
use crate::model::ids::QuizId;

/// Display name used when the source file name has no usable stem.
pub const UNTITLED_QUIZ_NAME: &str = "Untitled Quiz";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz name cannot be empty")]
    EmptyName,

    #[error("quiz must contain at least one card")]
    NoCards,

    #[error("quiz card data is corrupted: {0}")]
    CorruptedData(String),

    #[error("unknown quiz format: {0}")]
    UnknownFormat(String),

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

//
// ─── OPTIONS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum QuizFormat {
    #[default]
    Flashcard,
    MultipleChoice,
}

impl QuizFormat {
    pub const ALL: [QuizFormat; 2] = [QuizFormat::Flashcard, QuizFormat::MultipleChoice];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuizFormat::Flashcard => "flashcard",
            QuizFormat::MultipleChoice => "multiple_choice",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            QuizFormat::Flashcard => "Flashcard",
            QuizFormat::MultipleChoice => "Multiple choice",
        }
    }
}

impl FromStr for QuizFormat {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flashcard" => Ok(QuizFormat::Flashcard),
            "multiple_choice" => Ok(QuizFormat::MultipleChoice),
            other => Err(QuizError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for QuizFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(QuizError::UnknownDifficulty(other.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── CARD PAYLOAD ──────────────────────────────────────────────────────────────
//

/// Serialize a card sequence into the stored quiz payload (a JSON array).
///
/// # Errors
///
/// Returns `QuizError::CorruptedData` if serialization fails.
pub fn encode_cards(cards: &[Card]) -> Result<String, QuizError> {
    serde_json::to_string(cards).map_err(|err| QuizError::CorruptedData(err.to_string()))
}

/// Parse a stored quiz payload back into its card sequence.
///
/// # Errors
///
/// Returns `QuizError::CorruptedData` if the payload is not a JSON array of
/// `{question, answer}` objects.
pub fn decode_cards(raw: &str) -> Result<Vec<Card>, QuizError> {
    serde_json::from_str(raw).map_err(|err| QuizError::CorruptedData(err.to_string()))
}

//
// ─── NAMES ─────────────────────────────────────────────────────────────────────
//

/// Default display name for a quiz built from `file_name`.
///
/// Uses the text before the first `.` of the base name; falls back to
/// [`UNTITLED_QUIZ_NAME`] when that stem is blank.
#[must_use]
pub fn default_quiz_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);
    let stem = base.split('.').next().unwrap_or("").trim();
    if stem.is_empty() {
        UNTITLED_QUIZ_NAME.to_string()
    } else {
        stem.to_string()
    }
}

/// Normalize a user-supplied quiz name.
///
/// # Errors
///
/// Returns `QuizError::EmptyName` if the name is blank after trimming.
pub fn validate_quiz_name(raw: &str) -> Result<String, QuizError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(QuizError::EmptyName);
    }
    Ok(trimmed.to_string())
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

/// A quiz about to be stored; the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDraft {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub card_data: String,
    pub format: QuizFormat,
    pub difficulty: Difficulty,
    pub original_file_name: String,
}

impl QuizDraft {
    /// Build a draft from the cards of a study session.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoCards` for an empty sequence, or
    /// `QuizError::CorruptedData` if the cards cannot be serialized.
    pub fn from_cards(
        cards: &[Card],
        file_name: &str,
        format: QuizFormat,
        difficulty: Difficulty,
        now: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        if cards.is_empty() {
            return Err(QuizError::NoCards);
        }
        Ok(Self {
            name: default_quiz_name(file_name),
            created_at: now,
            card_data: encode_cards(cards)?,
            format,
            difficulty,
            original_file_name: file_name.to_string(),
        })
    }

    #[must_use]
    pub fn assign_id(self, id: QuizId) -> Quiz {
        Quiz {
            id,
            name: self.name,
            created_at: self.created_at,
            card_data: self.card_data,
            format: self.format,
            difficulty: self.difficulty,
            original_file_name: self.original_file_name,
        }
    }
}

/// A quiz stored in the user's library.
///
/// The card sequence is kept in its serialized form and only parsed when the
/// quiz is loaded for study.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    id: QuizId,
    name: String,
    created_at: DateTime<Utc>,
    card_data: String,
    format: QuizFormat,
    difficulty: Difficulty,
    original_file_name: String,
}

impl Quiz {
    /// Rehydrate a quiz from persisted storage.
    #[must_use]
    pub fn from_persisted(
        id: QuizId,
        name: String,
        created_at: DateTime<Utc>,
        card_data: String,
        format: QuizFormat,
        difficulty: Difficulty,
        original_file_name: String,
    ) -> Self {
        Self {
            id,
            name,
            created_at,
            card_data,
            format,
            difficulty,
            original_file_name,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuizId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn card_data(&self) -> &str {
        &self.card_data
    }

    #[must_use]
    pub fn format(&self) -> QuizFormat {
        self.format
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn original_file_name(&self) -> &str {
        &self.original_file_name
    }

    /// Parse the stored card sequence.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::CorruptedData` if the payload cannot be parsed.
    pub fn cards(&self) -> Result<Vec<Card>, QuizError> {
        decode_cards(&self.card_data)
    }

    /// Replace the display name.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyName` and leaves the name unchanged if the new
    /// name is blank after trimming.
    pub fn rename(&mut self, new_name: &str) -> Result<(), QuizError> {
        self.name = validate_quiz_name(new_name)?;
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn sample_cards() -> Vec<Card> {
        vec![Card::new("Q1", "A1"), Card::new("Q2", "A2")]
    }

    #[test]
    fn default_name_uses_file_stem() {
        assert_eq!(default_quiz_name("history101.pdf"), "history101");
        assert_eq!(default_quiz_name("notes.final.pptx"), "notes");
        assert_eq!(default_quiz_name("/tmp/dir.v2/lecture.txt"), "lecture");
    }

    #[test]
    fn default_name_falls_back_when_stem_blank() {
        assert_eq!(default_quiz_name(".txt"), UNTITLED_QUIZ_NAME);
        assert_eq!(default_quiz_name(""), UNTITLED_QUIZ_NAME);
    }

    #[test]
    fn draft_keeps_metadata_and_card_order() {
        let draft = QuizDraft::from_cards(
            &sample_cards(),
            "history101.pdf",
            QuizFormat::Flashcard,
            Difficulty::Hard,
            fixed_now(),
        )
        .unwrap();
        let quiz = draft.assign_id(QuizId::generate());

        assert_eq!(quiz.name(), "history101");
        assert_eq!(quiz.original_file_name(), "history101.pdf");
        assert_eq!(quiz.difficulty(), Difficulty::Hard);
        assert_eq!(quiz.cards().unwrap(), sample_cards());
    }

    #[test]
    fn draft_rejects_empty_card_list() {
        let err = QuizDraft::from_cards(
            &[],
            "a.pdf",
            QuizFormat::Flashcard,
            Difficulty::Medium,
            fixed_now(),
        )
        .unwrap_err();
        assert_eq!(err, QuizError::NoCards);
    }

    #[test]
    fn corrupted_payload_is_reported() {
        let quiz = Quiz::from_persisted(
            QuizId::generate(),
            "broken".into(),
            fixed_now(),
            "{not json".into(),
            QuizFormat::Flashcard,
            Difficulty::Medium,
            "broken.txt".into(),
        );
        assert!(matches!(quiz.cards(), Err(QuizError::CorruptedData(_))));
    }

    #[test]
    fn rename_rejects_blank_and_keeps_old_name() {
        let mut quiz = QuizDraft::from_cards(
            &sample_cards(),
            "bio.txt",
            QuizFormat::Flashcard,
            Difficulty::Easy,
            fixed_now(),
        )
        .unwrap()
        .assign_id(QuizId::generate());

        assert_eq!(quiz.rename("   "), Err(QuizError::EmptyName));
        assert_eq!(quiz.name(), "bio");

        quiz.rename("  Biology  ").unwrap();
        assert_eq!(quiz.name(), "Biology");
    }

    #[test]
    fn options_parse_their_storage_form() {
        for format in QuizFormat::ALL {
            assert_eq!(format.as_str().parse::<QuizFormat>().unwrap(), format);
        }
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.as_str().parse::<Difficulty>().unwrap(), difficulty);
        }
        assert!("extreme".parse::<Difficulty>().is_err());
    }
}
