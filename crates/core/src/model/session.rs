use thiserror::Error;

use crate::model::{Card, Quiz};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no quiz questions were generated")]
    EmptyQuiz,

    #[error("no quiz in progress")]
    NotStudying,

    #[error("saved quiz data is corrupted")]
    CorruptedQuiz,
}

/// Coarse stage of a study session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Upload,
    Quiz,
    Done,
}

impl Phase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Upload => "upload",
            Phase::Quiz => "quiz",
            Phase::Done => "done",
        }
    }
}

/// Ephemeral study session: upload, then step through cards, then done.
///
/// Whenever the phase is [`Phase::Quiz`] the current index points at a card.
/// The card sequence is replaced wholesale on start/load and never edited in
/// place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudySession {
    cards: Vec<Card>,
    current: usize,
    phase: Phase,
}

impl StudySession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The card on screen, only while a quiz is in progress.
    #[must_use]
    pub fn current_card(&self) -> Option<&Card> {
        if self.phase == Phase::Quiz {
            self.cards.get(self.current)
        } else {
            None
        }
    }

    /// "Card i of n" while studying.
    #[must_use]
    pub fn progress_label(&self) -> Option<String> {
        (self.phase == Phase::Quiz)
            .then(|| format!("Card {} of {}", self.current + 1, self.cards.len()))
    }

    /// Enter the quiz with freshly generated cards.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyQuiz` for an empty sequence; the session is
    /// then back in [`Phase::Upload`] with no cards.
    pub fn start(&mut self, cards: Vec<Card>) -> Result<(), SessionError> {
        if cards.is_empty() {
            self.reset();
            return Err(SessionError::EmptyQuiz);
        }
        self.enter_quiz(cards);
        Ok(())
    }

    /// Enter the quiz with the cards of a saved quiz, skipping generation.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::CorruptedQuiz` if the stored cards cannot be
    /// parsed or are empty. The session is left untouched in that case.
    pub fn load(&mut self, quiz: &Quiz) -> Result<(), SessionError> {
        let cards = quiz.cards().map_err(|_| SessionError::CorruptedQuiz)?;
        if cards.is_empty() {
            return Err(SessionError::CorruptedQuiz);
        }
        self.enter_quiz(cards);
        Ok(())
    }

    /// Move past the current card; the last card leads to [`Phase::Done`].
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotStudying` outside of [`Phase::Quiz`].
    pub fn advance(&mut self) -> Result<Phase, SessionError> {
        if self.phase != Phase::Quiz {
            return Err(SessionError::NotStudying);
        }
        if self.current + 1 < self.cards.len() {
            self.current += 1;
        } else {
            self.phase = Phase::Done;
        }
        Ok(self.phase)
    }

    /// Back to [`Phase::Upload`] with no cards.
    pub fn reset(&mut self) {
        self.cards = Vec::new();
        self.current = 0;
        self.phase = Phase::Upload;
    }

    fn enter_quiz(&mut self, cards: Vec<Card>) {
        self.cards = cards;
        self.current = 0;
        self.phase = Phase::Quiz;
    }
}
