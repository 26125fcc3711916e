mod card;
mod ids;
mod quiz;
mod session;
mod theme;

pub use ids::{ParseIdError, QuizId, UserId};

pub use card::{Card, CardError, CardKey, SavedCard, is_saved};
pub use quiz::{
    Difficulty, Quiz, QuizDraft, QuizError, QuizFormat, UNTITLED_QUIZ_NAME, decode_cards,
    default_quiz_name, encode_cards, validate_quiz_name,
};
pub use session::{Phase, SessionError, StudySession};
pub use theme::{Theme, ThemeParseError};
