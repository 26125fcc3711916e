/// User-facing failures. Each maps to one fixed message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    NoFile,
    UnsupportedFile,
    UnreadableFile,
    EmptyGeneration,
    CorruptedQuiz,
    NotSignedIn,
    NotStudying,
    EmptyQuizName,
    SaveCardFailed,
    UnsaveCardFailed,
    SaveQuizFailed,
    DeleteQuizFailed,
    RenameQuizFailed,
    SavedCardsUnavailable,
    QuizzesUnavailable,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::NoFile => "Please choose a file first.",
            ViewError::UnsupportedFile => "Only PDF, PPTX, or TXT files allowed.",
            ViewError::UnreadableFile => "Failed to read the selected file.",
            ViewError::EmptyGeneration => {
                "No quiz questions generated. Please try a different file."
            }
            ViewError::CorruptedQuiz => "Failed to load quiz data. It might be corrupted.",
            ViewError::NotSignedIn => "User not authenticated. Your library is unavailable.",
            ViewError::NotStudying => "No quiz in progress.",
            ViewError::EmptyQuizName => "Quiz name cannot be empty.",
            ViewError::SaveCardFailed => "Failed to save card to your library.",
            ViewError::UnsaveCardFailed => "Failed to unsave card from your library.",
            ViewError::SaveQuizFailed => "Failed to save quiz to your library.",
            ViewError::DeleteQuizFailed => "Failed to delete quiz from your library.",
            ViewError::RenameQuizFailed => "Failed to rename quiz.",
            ViewError::SavedCardsUnavailable => "Failed to load your saved cards.",
            ViewError::QuizzesUnavailable => "Failed to load your saved quizzes.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}
