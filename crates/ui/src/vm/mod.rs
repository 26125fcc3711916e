mod card_face_vm;
mod library_vm;
mod loading_ticker;
mod notices;
mod study_vm;
mod time_fmt;

pub use card_face_vm::{BookmarkAction, CardFaceVm, CardSlot, SAVE_PULSE, bookmark_label};
pub use library_vm::{FeedEvent, LibraryVm, QuizRowVm, RenameDraft};
pub use loading_ticker::{LOADING_MESSAGES, LoadingTicker, TICK_INTERVAL};
pub use notices::{NOTICE_TIMEOUT, Notices};
pub use study_vm::{
    DEFAULT_QUESTION_COUNT, LibraryWrite, MAX_QUESTION_COUNT, QuizSaveRequest, StudyVm,
};
pub use time_fmt::format_created;
