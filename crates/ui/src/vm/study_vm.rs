use flashy_core::model::{
    Card, Difficulty, Phase, Quiz, QuizError, QuizFormat, SessionError, StudySession,
};
use services::{GenerationError, SyncError, UploadFile};

use crate::views::ViewError;
use crate::vm::card_face_vm::CardSlot;
use crate::vm::notices::Notices;

pub const DEFAULT_QUESTION_COUNT: u32 = 10;
pub const MAX_QUESTION_COUNT: u32 = 50;

/// Library writes the study screen can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LibraryWrite {
    SaveCard,
    UnsaveCard,
    SaveQuiz,
    DeleteQuiz,
    RenameQuiz,
}

impl LibraryWrite {
    #[must_use]
    pub fn success_message(self) -> &'static str {
        match self {
            LibraryWrite::SaveCard => "Card saved successfully!",
            LibraryWrite::UnsaveCard => "Card unsaved!",
            LibraryWrite::SaveQuiz => "Quiz saved successfully!",
            LibraryWrite::DeleteQuiz => "Quiz deleted successfully!",
            LibraryWrite::RenameQuiz => "Quiz renamed successfully!",
        }
    }

    #[must_use]
    pub fn failure(self) -> ViewError {
        match self {
            LibraryWrite::SaveCard => ViewError::SaveCardFailed,
            LibraryWrite::UnsaveCard => ViewError::UnsaveCardFailed,
            LibraryWrite::SaveQuiz => ViewError::SaveQuizFailed,
            LibraryWrite::DeleteQuiz => ViewError::DeleteQuizFailed,
            LibraryWrite::RenameQuiz => ViewError::RenameQuizFailed,
        }
    }
}

/// Everything needed to store the current session as a quiz.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizSaveRequest {
    pub cards: Vec<Card>,
    pub file_name: String,
    pub format: QuizFormat,
    pub difficulty: Difficulty,
}

/// State behind the study screen: session, upload selection, options and notices.
#[derive(Clone, Debug, PartialEq)]
pub struct StudyVm {
    session: StudySession,
    run: u64,
    file: Option<UploadFile>,
    source_name: Option<String>,
    loading: bool,
    format: QuizFormat,
    difficulty: Difficulty,
    question_count: u32,
    notices: Notices,
}

impl Default for StudyVm {
    fn default() -> Self {
        Self::new()
    }
}

impl StudyVm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            session: StudySession::new(),
            run: 0,
            file: None,
            source_name: None,
            loading: false,
            format: QuizFormat::default(),
            difficulty: Difficulty::default(),
            question_count: DEFAULT_QUESTION_COUNT,
            notices: Notices::new(),
        }
    }

    #[must_use]
    pub fn session(&self) -> &StudySession {
        &self.session
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    /// Bumped each time a session starts, so card views can key on it.
    #[must_use]
    pub fn run(&self) -> u64 {
        self.run
    }

    /// The card currently on screen, as the face state sees it.
    #[must_use]
    pub fn card_slot(&self) -> CardSlot {
        CardSlot {
            run: self.run,
            position: self.session.current_index(),
        }
    }

    #[must_use]
    pub fn current_card(&self) -> Option<&Card> {
        self.session.current_card()
    }

    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file.as_ref().map(UploadFile::name)
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn format(&self) -> QuizFormat {
        self.format
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Requested number of questions shown on the upload form.
    ///
    /// Display only: the generation request carries just the file and the
    /// count is not stored with saved quizzes.
    #[must_use]
    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    #[must_use]
    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }

    pub fn set_format(&mut self, format: QuizFormat) {
        self.format = format;
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn set_question_count(&mut self, count: u32) {
        self.question_count = count.clamp(1, MAX_QUESTION_COUNT);
    }

    pub fn select_file(&mut self, file: UploadFile) {
        self.file = Some(file);
        self.notices.clear();
    }

    /// Surface a file the picker could not accept and drop any prior selection.
    pub fn reject_file(&mut self, err: &GenerationError) {
        self.file = None;
        let view_err = match err {
            GenerationError::UnsupportedFile(_) => ViewError::UnsupportedFile,
            _ => ViewError::UnreadableFile,
        };
        self.notices.report(view_err);
    }

    /// Mark generation as in flight and hand back the file to upload.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::NoFile` when nothing is selected and
    /// `ViewError::Unknown` when a generation is already running.
    pub fn begin_generation(&mut self) -> Result<UploadFile, ViewError> {
        if self.loading {
            return Err(ViewError::Unknown);
        }
        let Some(file) = self.file.clone() else {
            self.notices.report(ViewError::NoFile);
            return Err(ViewError::NoFile);
        };
        self.loading = true;
        self.notices.clear();
        Ok(file)
    }

    /// Apply the generator's answer. Failures always land back on upload.
    pub fn finish_generation(&mut self, result: Result<Vec<Card>, GenerationError>) {
        self.loading = false;
        match result {
            Ok(cards) => match self.session.start(cards) {
                Ok(()) => {
                    self.run += 1;
                    self.source_name = self.file_name().map(str::to_owned);
                    self.notices.succeed("Quiz generated successfully!");
                }
                Err(_) => {
                    self.session.reset();
                    self.notices.report(ViewError::EmptyGeneration);
                }
            },
            Err(GenerationError::Empty) => {
                self.session.reset();
                self.notices.report(ViewError::EmptyGeneration);
            }
            Err(err) => {
                tracing::warn!(error = %err, "quiz generation failed");
                self.session.reset();
                self.notices
                    .set_error(format!("Failed to generate quiz: {err}"));
            }
        }
    }

    /// Jump straight into a saved quiz.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::CorruptedQuiz` when the stored cards cannot be
    /// read; the phase is left as it was.
    pub fn load_quiz(&mut self, quiz: &Quiz) -> Result<(), ViewError> {
        match self.session.load(quiz) {
            Ok(()) => {
                self.run += 1;
                self.source_name = Some(quiz.original_file_name().to_owned());
                self.format = quiz.format();
                self.difficulty = quiz.difficulty();
                self.notices
                    .succeed(format!("Loaded quiz: \"{}\"", quiz.name()));
                Ok(())
            }
            Err(err) => {
                tracing::warn!(quiz = %quiz.id(), error = %err, "saved quiz could not be loaded");
                self.notices.report(ViewError::CorruptedQuiz);
                Err(ViewError::CorruptedQuiz)
            }
        }
    }

    /// # Errors
    ///
    /// Returns `ViewError::NotStudying` outside the quiz phase.
    pub fn advance(&mut self) -> Result<Phase, ViewError> {
        self.session.advance().map_err(|err| match err {
            SessionError::NotStudying => ViewError::NotStudying,
            _ => ViewError::Unknown,
        })
    }

    /// Back to a blank upload screen. Options survive.
    pub fn reset(&mut self) {
        self.session.reset();
        self.file = None;
        self.source_name = None;
        self.loading = false;
        self.notices.clear();
    }

    #[must_use]
    pub fn can_save_quiz(&self, signed_in: bool) -> bool {
        signed_in && !self.loading && !self.session.is_empty()
    }

    #[must_use]
    pub fn save_request(&self) -> Option<QuizSaveRequest> {
        if self.loading || self.session.is_empty() {
            return None;
        }
        Some(QuizSaveRequest {
            cards: self.session.cards().to_vec(),
            file_name: self.source_name.clone().unwrap_or_default(),
            format: self.format,
            difficulty: self.difficulty,
        })
    }

    /// Turn a finished library write into a notice. Session state is never touched.
    pub fn record_write(&mut self, write: LibraryWrite, result: Result<(), SyncError>) {
        match result {
            Ok(()) => {
                self.notices.succeed(write.success_message());
            }
            Err(SyncError::Quiz(QuizError::EmptyName)) => {
                self.notices.report(ViewError::EmptyQuizName);
            }
            Err(err) => {
                tracing::warn!(?write, error = %err, "library write failed");
                self.notices.report(write.failure());
            }
        }
    }

    pub fn report_signed_out(&mut self) {
        self.notices.report(ViewError::NotSignedIn);
    }
}
