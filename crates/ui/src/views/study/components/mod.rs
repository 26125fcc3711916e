mod done;
mod header;
mod library_panel;
mod notice_bar;
mod quiz_card;
mod saved_panel;
mod upload;

pub use done::DonePanel;
pub use header::StudyHeader;
pub use library_panel::LibraryPanel;
pub use notice_bar::NoticeBar;
pub use quiz_card::QuizCard;
pub use saved_panel::SavedCardsPanel;
pub use upload::UploadPanel;
