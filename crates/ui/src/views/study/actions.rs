use dioxus::prelude::*;
use flashy_core::model::{Card, QuizId};
use services::LibrarySync;

use crate::context::AppContext;
use crate::vm::{LibraryWrite, StudyVm};

use super::state::StudyState;

/// Everything the study screen can ask for.
#[derive(Clone, Copy, PartialEq)]
pub struct StudyActions {
    pub generate: Callback<()>,
    pub reveal: Callback<()>,
    pub advance: Callback<()>,
    pub reset: Callback<()>,
    pub save_card: Callback<Card>,
    pub unsave_card: Callback<Card>,
    pub save_quiz: Callback<()>,
    pub load_quiz: Callback<QuizId>,
    pub delete_quiz: Callback<QuizId>,
    pub commit_rename: Callback<()>,
    pub cancel_rename: Callback<()>,
    pub toggle_theme: Callback<()>,
}

fn library_or_report(ctx: &AppContext, mut study: Signal<StudyVm>) -> Option<LibrarySync> {
    let sync = ctx.library();
    if sync.is_none() {
        study.write().report_signed_out();
    }
    sync
}

pub fn use_study_actions(state: StudyState) -> StudyActions {
    let ctx = use_context::<AppContext>();

    let ctx_for_generate = ctx.clone();
    let generate = use_callback(move |()| {
        let mut study = state.study;
        let mut ticker = state.ticker;
        let Ok(file) = study.write().begin_generation() else {
            return;
        };
        ticker.write().reset();
        let generator = ctx_for_generate.generator();
        spawn(async move {
            let result = generator.generate(&file).await;
            study.write().finish_generation(result);
            ticker.write().reset();
        });
    });

    let reveal = use_callback(move |()| {
        let mut face = state.face;
        let slot = state.study.read().card_slot();
        face.write().reveal(slot);
    });

    let advance = use_callback(move |()| {
        let mut study = state.study;
        let mut face = state.face;
        let slot = study.read().card_slot();
        if !face.write().advance(slot) {
            return;
        }
        if let Err(err) = study.write().advance() {
            tracing::debug!(?err, "advance ignored");
        }
    });

    let reset = use_callback(move |()| {
        let mut study = state.study;
        let mut ticker = state.ticker;
        study.write().reset();
        ticker.write().reset();
    });

    let ctx_for_save_card = ctx.clone();
    let save_card = use_callback(move |card: Card| {
        let mut study = state.study;
        let Some(sync) = library_or_report(&ctx_for_save_card, study) else {
            return;
        };
        spawn(async move {
            let result = sync.save_card(&card).await;
            study.write().record_write(LibraryWrite::SaveCard, result);
        });
    });

    let ctx_for_unsave_card = ctx.clone();
    let unsave_card = use_callback(move |card: Card| {
        let mut study = state.study;
        let Some(sync) = library_or_report(&ctx_for_unsave_card, study) else {
            return;
        };
        spawn(async move {
            let result = sync.unsave_card(&card).await;
            study.write().record_write(LibraryWrite::UnsaveCard, result);
        });
    });

    let ctx_for_save_quiz = ctx.clone();
    let save_quiz = use_callback(move |()| {
        let mut study = state.study;
        let Some(request) = study.read().save_request() else {
            return;
        };
        let Some(sync) = library_or_report(&ctx_for_save_quiz, study) else {
            return;
        };
        spawn(async move {
            let result = sync
                .save_quiz(
                    &request.cards,
                    &request.file_name,
                    request.format,
                    request.difficulty,
                )
                .await
                .map(|_| ());
            study.write().record_write(LibraryWrite::SaveQuiz, result);
        });
    });

    let load_quiz = use_callback(move |id: QuizId| {
        let mut study = state.study;
        let mut panel = state.panel;
        let mut rename = state.rename;
        let Some(quiz) = state.library.read().quiz(id).cloned() else {
            return;
        };
        if study.write().load_quiz(&quiz).is_ok() {
            rename.set(None);
            panel.set(None);
        }
    });

    let ctx_for_delete = ctx.clone();
    let delete_quiz = use_callback(move |id: QuizId| {
        let mut study = state.study;
        let Some(sync) = library_or_report(&ctx_for_delete, study) else {
            return;
        };
        spawn(async move {
            let result = sync.delete_quiz(id).await;
            study.write().record_write(LibraryWrite::DeleteQuiz, result);
        });
    });

    let ctx_for_rename = ctx.clone();
    let commit_rename = use_callback(move |()| {
        let mut study = state.study;
        let mut rename = state.rename;
        let Some(draft) = rename.read().clone() else {
            return;
        };
        let Some(sync) = library_or_report(&ctx_for_rename, study) else {
            return;
        };
        spawn(async move {
            let result = sync.rename_quiz(draft.id, &draft.name).await;
            if result.is_ok() {
                rename.set(None);
            }
            study.write().record_write(LibraryWrite::RenameQuiz, result);
        });
    });

    let cancel_rename = use_callback(move |()| {
        let mut rename = state.rename;
        rename.set(None);
    });

    let ctx_for_theme = ctx;
    let toggle_theme = use_callback(move |()| {
        let mut theme = state.theme;
        let next = theme().toggle();
        theme.set(next);
        let service = ctx_for_theme.theme_service();
        spawn(async move {
            if let Err(err) = service.save(next).await {
                tracing::warn!(error = %err, theme = next.as_str(), "theme not persisted");
            }
        });
    });

    StudyActions {
        generate,
        reveal,
        advance,
        reset,
        save_card,
        unsave_card,
        save_quiz,
        load_quiz,
        delete_quiz,
        commit_rename,
        cancel_rename,
        toggle_theme,
    }
}
