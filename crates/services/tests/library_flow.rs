use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use flashy_core::model::{
    Card, CardKey, Difficulty, Phase, Quiz, QuizDraft, QuizError, QuizFormat, QuizId, SavedCard,
    StudySession, UserId, is_saved,
};
use flashy_core::time::fixed_now;
use services::{AppServices, Clock, GenerationError, LibrarySync, QuizGenerator, SyncError, UploadFile};
use storage::repository::{QuizRepository, SavedCardRepository, Storage, StorageError};
use storage::{Listener, Subscription};

fn user() -> UserId {
    UserId::new("student").unwrap()
}

fn in_memory_sync() -> LibrarySync {
    LibrarySync::from_storage(user(), Clock::fixed(fixed_now()), &Storage::in_memory())
}

fn watch_saved() -> (Arc<Mutex<Vec<SavedCard>>>, Listener<SavedCard>) {
    let latest = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&latest);
    let listener: Listener<SavedCard> =
        Arc::new(move |snapshot: Result<Vec<SavedCard>, StorageError>| {
            if let Ok(cards) = snapshot {
                *sink.lock().unwrap() = cards;
            }
        });
    (latest, listener)
}

#[tokio::test]
async fn saving_same_content_from_two_instances_keeps_one_record() {
    let sync = in_memory_sync();
    let (latest, listener) = watch_saved();
    let _sub = sync.subscribe_saved_cards(listener).await.unwrap();

    let first_instance = Card::new("Q", "A");
    let second_instance = Card::new("Q", "A");
    sync.save_card(&first_instance).await.unwrap();
    sync.save_card(&second_instance).await.unwrap();

    let saved = latest.lock().unwrap().clone();
    assert_eq!(saved.len(), 1);
    assert!(is_saved(&saved, &first_instance));
    assert!(is_saved(&saved, &second_instance));
}

#[tokio::test]
async fn unsaving_absent_card_is_ok() {
    let sync = in_memory_sync();
    sync.unsave_card(&Card::new("never", "saved")).await.unwrap();
}

#[tokio::test]
async fn default_quiz_name_comes_from_file_stem() {
    let sync = in_memory_sync();
    let id = sync
        .save_quiz(
            &[Card::new("Q1", "A1")],
            "history101.pdf",
            QuizFormat::Flashcard,
            Difficulty::Medium,
        )
        .await
        .unwrap();
    let quiz = sync.get_quiz(id).await.unwrap().unwrap();
    assert_eq!(quiz.name(), "history101");
    assert_eq!(quiz.created_at(), fixed_now());
}

#[tokio::test]
async fn blank_rename_is_rejected_and_name_kept() {
    let sync = in_memory_sync();
    let id = sync
        .save_quiz(
            &[Card::new("Q1", "A1")],
            "history101.pdf",
            QuizFormat::Flashcard,
            Difficulty::Medium,
        )
        .await
        .unwrap();

    let err = sync.rename_quiz(id, "   ").await.unwrap_err();
    assert_eq!(err, SyncError::Quiz(QuizError::EmptyName));
    assert_eq!(sync.get_quiz(id).await.unwrap().unwrap().name(), "history101");
}

#[tokio::test]
async fn quiz_feed_lists_newest_first() {
    let storage = Storage::in_memory();
    let mut clock = Clock::fixed(fixed_now());
    let earlier = LibrarySync::from_storage(user(), clock, &storage);
    clock.advance(chrono::Duration::minutes(5));
    let later = LibrarySync::from_storage(user(), clock, &storage);

    let names = Arc::new(Mutex::new(Vec::<String>::new()));
    let sink = Arc::clone(&names);
    let listener: Listener<Quiz> = Arc::new(move |snapshot: Result<Vec<Quiz>, StorageError>| {
        if let Ok(quizzes) = snapshot {
            *sink.lock().unwrap() = quizzes.iter().map(|q| q.name().to_string()).collect();
        }
    });
    let _sub = earlier.subscribe_quizzes(listener).await.unwrap();

    earlier
        .save_quiz(&[Card::new("Q", "A")], "first.pdf", QuizFormat::Flashcard, Difficulty::Easy)
        .await
        .unwrap();
    later
        .save_quiz(&[Card::new("Q", "A")], "second.txt", QuizFormat::Flashcard, Difficulty::Easy)
        .await
        .unwrap();

    assert_eq!(*names.lock().unwrap(), vec!["second".to_string(), "first".to_string()]);
}

#[tokio::test]
async fn deleting_twice_is_ok() {
    let sync = in_memory_sync();
    let id = sync
        .save_quiz(&[Card::new("Q", "A")], "x.txt", QuizFormat::Flashcard, Difficulty::Easy)
        .await
        .unwrap();
    sync.delete_quiz(id).await.unwrap();
    sync.delete_quiz(id).await.unwrap();
    assert!(sync.get_quiz(id).await.unwrap().is_none());
}

//
// ─── FAILING STORE ─────────────────────────────────────────────────────────────
//

struct OfflineStore;

fn offline() -> StorageError {
    StorageError::Connection("offline".into())
}

#[async_trait]
impl SavedCardRepository for OfflineStore {
    async fn upsert_saved_card(&self, _: &UserId, _: &SavedCard) -> Result<(), StorageError> {
        Err(offline())
    }
    async fn delete_saved_card(&self, _: &UserId, _: &CardKey) -> Result<(), StorageError> {
        Err(offline())
    }
    async fn list_saved_cards(&self, _: &UserId) -> Result<Vec<SavedCard>, StorageError> {
        Err(offline())
    }
    async fn subscribe_saved_cards(
        &self,
        _: &UserId,
        _: Listener<SavedCard>,
    ) -> Result<Subscription, StorageError> {
        Err(offline())
    }
}

#[async_trait]
impl QuizRepository for OfflineStore {
    async fn insert_quiz(&self, _: &UserId, _: &QuizDraft) -> Result<QuizId, StorageError> {
        Err(offline())
    }
    async fn get_quiz(&self, _: &UserId, _: QuizId) -> Result<Option<Quiz>, StorageError> {
        Err(offline())
    }
    async fn rename_quiz(&self, _: &UserId, _: QuizId, _: &str) -> Result<(), StorageError> {
        Err(offline())
    }
    async fn delete_quiz(&self, _: &UserId, _: QuizId) -> Result<(), StorageError> {
        Err(offline())
    }
    async fn list_quizzes(&self, _: &UserId) -> Result<Vec<Quiz>, StorageError> {
        Err(offline())
    }
    async fn subscribe_quizzes(
        &self,
        _: &UserId,
        _: Listener<Quiz>,
    ) -> Result<Subscription, StorageError> {
        Err(offline())
    }
}

#[tokio::test]
async fn write_failures_surface_and_leave_session_alone() {
    let store = Arc::new(OfflineStore);
    let sync = LibrarySync::new(user(), Clock::fixed(fixed_now()), store.clone(), store);

    let mut session = StudySession::new();
    session
        .start(vec![Card::new("Q1", "A1"), Card::new("Q2", "A2")])
        .unwrap();
    session.advance().unwrap();
    let before = session.clone();

    let card = session.current_card().cloned().unwrap();
    assert!(matches!(
        sync.save_card(&card).await,
        Err(SyncError::Storage(StorageError::Connection(_)))
    ));
    assert!(sync.unsave_card(&card).await.is_err());
    assert!(
        sync.save_quiz(session.cards(), "a.txt", QuizFormat::Flashcard, Difficulty::Medium)
            .await
            .is_err()
    );
    assert!(sync.delete_quiz(QuizId::generate()).await.is_err());
    assert!(sync.rename_quiz(QuizId::generate(), "ok").await.is_err());

    assert_eq!(session, before);
    assert_eq!(session.phase(), Phase::Quiz);
}

//
// ─── END TO END ────────────────────────────────────────────────────────────────
//

struct FixedGenerator(Vec<Card>);

#[async_trait]
impl QuizGenerator for FixedGenerator {
    async fn generate(&self, _file: &UploadFile) -> Result<Vec<Card>, GenerationError> {
        if self.0.is_empty() {
            Err(GenerationError::Empty)
        } else {
            Ok(self.0.clone())
        }
    }
}

#[tokio::test]
async fn generate_study_save_and_reload_over_sqlite() {
    let storage = Storage::sqlite("sqlite:file:memdb_services_flow?mode=memory&cache=shared")
        .await
        .expect("connect sqlite");
    let generator = Arc::new(FixedGenerator(vec![Card::new("Q1", "A1")]));
    let services = AppServices::with_parts(Clock::fixed(fixed_now()), storage, generator);

    let identity = services.identity().sign_in(None).await.unwrap();
    let sync = services.library_for(identity.user_id.clone());

    let file = UploadFile::new("history101.pdf", b"%PDF".to_vec()).unwrap();
    let cards = services.generator().generate(&file).await.unwrap();

    let mut session = StudySession::new();
    session.start(cards).unwrap();
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.advance().unwrap(), Phase::Done);

    let id = sync
        .save_quiz(session.cards(), file.name(), QuizFormat::Flashcard, Difficulty::Medium)
        .await
        .unwrap();
    let stored = sync.get_quiz(id).await.unwrap().unwrap();
    assert_eq!(stored.name(), "history101");

    session.reset();
    session.load(&stored).unwrap();
    assert_eq!(session.phase(), Phase::Quiz);
    assert_eq!(session.current_card(), Some(&Card::new("Q1", "A1")));

    let again = services.identity().sign_in(None).await.unwrap();
    assert_eq!(again.user_id, identity.user_id);
}
