use dioxus::prelude::*;
use flashy_core::model::{Card, Difficulty, Phase, QuizFormat, Theme};

use crate::vm::RenameDraft;

use super::state::Panel;
use super::test_harness::{pdf, setup_signed_out_harness, setup_study_harness};

#[tokio::test(flavor = "current_thread")]
async fn upload_screen_renders_defaults() {
    let harness = setup_study_harness(vec![Card::new("Q1", "A1")]).await;
    let html = harness.render();

    assert!(html.contains("FLASHYGEN"), "{html}");
    assert!(html.contains("Choose File"), "{html}");
    assert!(html.contains("Only PDF, PPTX, or TXT files allowed"), "{html}");
    assert!(html.contains("Start Generating Flashcards"), "{html}");
    assert!(html.contains("theme-dark"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn generating_single_card_runs_to_done() {
    let mut harness = setup_study_harness(vec![Card::new("Q1", "A1")]).await;
    harness.with_state(|state| {
        let mut study = state.study;
        study.write().select_file(pdf());
    });
    harness.act(|actions| actions.generate.call(()));
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Card 1 of 1"), "{html}");
    assert!(html.contains("Q1"), "{html}");
    assert!(html.contains("Quiz generated successfully!"), "{html}");
    assert_eq!(
        harness.with_state(|state| state.study.read().phase()),
        Phase::Quiz
    );

    harness.act(|actions| actions.reveal.call(()));
    harness.act(|actions| actions.advance.call(()));
    assert_eq!(
        harness.with_state(|state| state.study.read().phase()),
        Phase::Done
    );
    assert!(harness.render().contains("Quiz complete!"));
}

#[tokio::test(flavor = "current_thread")]
async fn identical_cards_and_new_sessions_start_face_down() {
    let mut harness =
        setup_study_harness(vec![Card::new("Q", "A"), Card::new("Q", "A")]).await;
    harness.with_state(|state| {
        let mut study = state.study;
        study.write().select_file(pdf());
    });
    harness.act(|actions| actions.generate.call(()));
    harness.settle().await;

    harness.act(|actions| actions.advance.call(()));
    assert!(harness.render().contains("Card 1 of 2"));

    harness.act(|actions| actions.reveal.call(()));
    assert!(harness.render().contains("flashcard--flipped"));

    harness.act(|actions| actions.advance.call(()));
    let html = harness.render();
    assert!(html.contains("Card 2 of 2"), "{html}");
    assert!(!html.contains("flashcard--flipped"), "{html}");

    harness.act(|actions| actions.reveal.call(()));
    assert!(harness.render().contains("flashcard--flipped"));

    let id = harness
        .library()
        .save_quiz(
            &[Card::new("Q", "A")],
            "review.txt",
            QuizFormat::Flashcard,
            Difficulty::Easy,
        )
        .await
        .expect("save quiz");
    harness.settle().await;
    harness.act(|actions| actions.load_quiz.call(id));

    let html = harness.render();
    assert!(html.contains("Card 1 of 1"), "{html}");
    assert!(!html.contains("flashcard--flipped"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn empty_generation_returns_to_upload_with_error() {
    let mut harness = setup_study_harness(Vec::new()).await;
    harness.with_state(|state| {
        let mut study = state.study;
        study.write().select_file(pdf());
    });
    harness.act(|actions| actions.generate.call(()));
    harness.settle().await;

    let (phase, loading) = harness.with_state(|state| {
        let study = state.study.read();
        (study.phase(), study.loading())
    });
    assert_eq!(phase, Phase::Upload);
    assert!(!loading);
    assert!(
        harness
            .render()
            .contains("No quiz questions generated. Please try a different file.")
    );
}

#[tokio::test(flavor = "current_thread")]
async fn saving_a_card_twice_shows_one_entry() {
    let mut harness = setup_study_harness(vec![Card::new("Q", "A")]).await;
    harness.act(|actions| actions.save_card.call(Card::new("Q", "A")));
    harness.settle().await;
    harness.act(|actions| actions.save_card.call(Card::new("Q", "A")));
    harness.settle().await;

    let user = harness.identity.as_ref().unwrap().user_id.clone();
    let stored = harness.storage.saved_cards.list_saved_cards(&user).await.unwrap();
    assert_eq!(stored.len(), 1);

    let mirrored = harness.with_state(|state| state.library.read().saved_cards().len());
    assert_eq!(mirrored, 1);

    harness.with_state(|state| state.toggle_panel(Panel::SavedCards));
    let html = harness.render();
    assert!(html.contains("Saved Cards"), "{html}");
    assert!(html.contains("Unsave"), "{html}");
    assert!(html.contains("Card saved successfully!"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn library_lists_and_loads_saved_quiz() {
    let mut harness = setup_study_harness(Vec::new()).await;
    let id = harness
        .library()
        .save_quiz(
            &[Card::new("Q1", "A1"), Card::new("Q2", "A2")],
            "history101.pdf",
            QuizFormat::Flashcard,
            Difficulty::Hard,
        )
        .await
        .expect("save quiz");
    harness.settle().await;

    harness.with_state(|state| state.toggle_panel(Panel::Library));
    let html = harness.render();
    assert!(html.contains("My Quiz Library"), "{html}");
    assert!(html.contains("history101"), "{html}");
    assert!(html.contains("2 cards"), "{html}");

    harness.act(|actions| actions.load_quiz.call(id));
    let (phase, panel, difficulty) = harness.with_state(|state| {
        let study = state.study.read();
        (study.phase(), (state.panel)(), study.difficulty())
    });
    assert_eq!(phase, Phase::Quiz);
    assert_eq!(panel, None);
    assert_eq!(difficulty, Difficulty::Hard);
    let info = harness.with_state(|state| state.study.read().notices().info().map(str::to_owned));
    assert_eq!(info.as_deref(), Some("Loaded quiz: \"history101\""));
    assert!(harness.render().contains("Card 1 of 2"));
}

#[tokio::test(flavor = "current_thread")]
async fn blank_rename_keeps_stored_name() {
    let mut harness = setup_study_harness(Vec::new()).await;
    let id = harness
        .library()
        .save_quiz(
            &[Card::new("Q1", "A1")],
            "history101.pdf",
            QuizFormat::Flashcard,
            Difficulty::Medium,
        )
        .await
        .expect("save quiz");
    harness.settle().await;

    harness.with_state(|state| {
        let mut rename = state.rename;
        rename.set(Some(RenameDraft {
            id,
            name: "   ".to_string(),
        }));
    });
    harness.act(|actions| actions.commit_rename.call(()));
    harness.settle().await;

    let error = harness.with_state(|state| {
        state.study.read().notices().error().map(str::to_owned)
    });
    assert_eq!(error.as_deref(), Some("Quiz name cannot be empty."));
    let stored = harness.library().get_quiz(id).await.unwrap().unwrap();
    assert_eq!(stored.name(), "history101");
}

#[tokio::test(flavor = "current_thread")]
async fn theme_toggle_is_persisted() {
    let mut harness = setup_study_harness(Vec::new()).await;
    harness.act(|actions| actions.toggle_theme.call(()));
    harness.settle().await;

    assert!(harness.render().contains("theme-light"));
    assert_eq!(harness.services.theme().load().await.unwrap(), Theme::Light);
}

#[tokio::test(flavor = "current_thread")]
async fn failed_sign_in_blocks_the_screen() {
    let harness = setup_signed_out_harness().await;
    let html = harness.render();

    assert!(html.contains("Authentication failed. Please try again."), "{html}");
    assert!(!html.contains("Choose File"), "{html}");
}
