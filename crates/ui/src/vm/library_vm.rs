use flashy_core::model::{Card, Quiz, QuizId, SavedCard, is_saved};
use storage::repository::StorageError;

use crate::views::ViewError;
use crate::vm::time_fmt::format_created;

/// One push from a live subscription.
#[derive(Clone, Debug)]
pub enum FeedEvent {
    SavedCards(Result<Vec<SavedCard>, StorageError>),
    Quizzes(Result<Vec<Quiz>, StorageError>),
}

/// Local mirror of the user's library, replaced wholesale by each snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LibraryVm {
    saved_cards: Vec<SavedCard>,
    quizzes: Vec<Quiz>,
}

impl LibraryVm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a snapshot. A failed read keeps the cached data and reports.
    pub fn apply(&mut self, event: FeedEvent) -> Option<ViewError> {
        match event {
            FeedEvent::SavedCards(Ok(cards)) => {
                self.saved_cards = cards;
                None
            }
            FeedEvent::Quizzes(Ok(quizzes)) => {
                self.quizzes = quizzes;
                None
            }
            FeedEvent::SavedCards(Err(err)) => {
                tracing::warn!(error = %err, "saved cards feed failed");
                Some(ViewError::SavedCardsUnavailable)
            }
            FeedEvent::Quizzes(Err(err)) => {
                tracing::warn!(error = %err, "quiz feed failed");
                Some(ViewError::QuizzesUnavailable)
            }
        }
    }

    #[must_use]
    pub fn saved_cards(&self) -> &[SavedCard] {
        &self.saved_cards
    }

    #[must_use]
    pub fn quizzes(&self) -> &[Quiz] {
        &self.quizzes
    }

    #[must_use]
    pub fn is_saved(&self, card: &Card) -> bool {
        is_saved(&self.saved_cards, card)
    }

    #[must_use]
    pub fn quiz(&self, id: QuizId) -> Option<&Quiz> {
        self.quizzes.iter().find(|quiz| quiz.id() == id)
    }

    #[must_use]
    pub fn quiz_rows(&self) -> Vec<QuizRowVm> {
        self.quizzes.iter().map(QuizRowVm::from_quiz).collect()
    }
}

/// Display data for one library entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizRowVm {
    pub id: QuizId,
    pub name: String,
    pub format_label: &'static str,
    pub difficulty_label: &'static str,
    pub created_label: String,
    pub cards_label: String,
}

impl QuizRowVm {
    #[must_use]
    pub fn from_quiz(quiz: &Quiz) -> Self {
        let cards_label = match quiz.cards() {
            Ok(cards) if cards.len() == 1 => "1 card".to_string(),
            Ok(cards) => format!("{} cards", cards.len()),
            Err(_) => "Unreadable".to_string(),
        };
        Self {
            id: quiz.id(),
            name: quiz.name().to_string(),
            format_label: quiz.format().label(),
            difficulty_label: quiz.difficulty().as_str(),
            created_label: format_created(quiz.created_at()),
            cards_label,
        }
    }
}

/// Inline rename in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenameDraft {
    pub id: QuizId,
    pub name: String,
}

impl RenameDraft {
    #[must_use]
    pub fn start(row: &QuizRowVm) -> Self {
        Self {
            id: row.id,
            name: row.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use flashy_core::model::{Difficulty, QuizDraft, QuizFormat};
    use flashy_core::time::fixed_now;

    use super::*;

    fn quiz(file: &str, cards: &[Card]) -> Quiz {
        QuizDraft::from_cards(cards, file, QuizFormat::Flashcard, Difficulty::Medium, fixed_now())
            .unwrap()
            .assign_id(QuizId::generate())
    }

    #[test]
    fn read_failure_keeps_cached_cards() {
        let mut library = LibraryVm::new();
        let card = Card::new("Q", "A");
        let saved = SavedCard::new(card.clone(), fixed_now());
        assert_eq!(library.apply(FeedEvent::SavedCards(Ok(vec![saved]))), None);
        assert!(library.is_saved(&card));

        let err = library.apply(FeedEvent::SavedCards(Err(StorageError::Connection(
            "offline".into(),
        ))));
        assert_eq!(err, Some(ViewError::SavedCardsUnavailable));
        assert!(library.is_saved(&card));
    }

    #[test]
    fn snapshots_replace_previous_quizzes() {
        let mut library = LibraryVm::new();
        let first = quiz("a.txt", &[Card::new("Q", "A")]);
        let second = quiz("b.txt", &[Card::new("Q", "A"), Card::new("Q2", "A2")]);
        library.apply(FeedEvent::Quizzes(Ok(vec![first.clone()])));
        library.apply(FeedEvent::Quizzes(Ok(vec![second.clone()])));

        assert!(library.quiz(first.id()).is_none());
        let rows = library.quiz_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "b");
        assert_eq!(rows[0].cards_label, "2 cards");
        assert_eq!(rows[0].difficulty_label, "medium");
    }

    #[test]
    fn rename_draft_starts_from_current_name() {
        let row = QuizRowVm::from_quiz(&quiz("history101.pdf", &[Card::new("Q", "A")]));
        let draft = RenameDraft::start(&row);
        assert_eq!(draft.name, "history101");
        assert_eq!(draft.id, row.id);
    }
}
