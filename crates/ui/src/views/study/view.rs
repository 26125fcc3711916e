use dioxus::prelude::*;
use flashy_core::model::Phase;

use crate::context::AppContext;

use super::actions::{StudyActions, use_study_actions};
use super::components::{
    DonePanel, LibraryPanel, NoticeBar, QuizCard, SavedCardsPanel, StudyHeader, UploadPanel,
};
use super::feed::use_library_feed;
use super::state::{Panel, StudyState, use_study_state};

/// The whole study screen: upload, quiz and done phases plus the library panels.
#[component]
pub fn StudyView() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_study_state(ctx.initial_theme());
    use_context_provider(|| state);
    let actions = use_study_actions(state);
    use_context_provider(|| actions);
    use_library_feed(state);

    rsx! { StudyScreen {} }
}

#[component]
pub(super) fn StudyScreen() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<StudyState>();
    let actions = use_context::<StudyActions>();
    let theme = (state.theme)();

    if let Some(message) = ctx.startup_error().filter(|_| !ctx.signed_in()) {
        return rsx! {
            div { class: "app-shell theme-{theme.as_str()}",
                div { class: "blocking-error", role: "alert",
                    h1 { class: "brand", "FLASHYGEN" }
                    p { "{message}" }
                }
            }
        };
    }

    let panel = (state.panel)();
    let phase = state.study.read().phase();
    let can_save_quiz = state.study.read().can_save_quiz(ctx.signed_in());

    rsx! {
        div { class: "app-shell theme-{theme.as_str()}",
            StudyHeader {}
            NoticeBar {}
            main { class: "study-main",
                match phase {
                    Phase::Upload => rsx! { UploadPanel {} },
                    Phase::Quiz => {
                        let study = state.study.read();
                        let slot = study.card_slot();
                        let card_key = format!("{}-{}", slot.run, slot.position);
                        let progress = study.session().progress_label().unwrap_or_default();
                        let card = study.current_card().cloned();
                        let saved = card
                            .as_ref()
                            .is_some_and(|card| state.library.read().is_saved(card));
                        rsx! {
                            if let Some(card) = card {
                                QuizCard {
                                    key: "{card_key}",
                                    card,
                                    slot,
                                    progress,
                                    saved,
                                }
                            }
                            div { class: "quiz-actions",
                                button {
                                    class: "btn btn-secondary",
                                    r#type: "button",
                                    disabled: !can_save_quiz,
                                    onclick: move |_| actions.save_quiz.call(()),
                                    "Save Quiz to Library"
                                }
                                button {
                                    class: "btn btn-ghost",
                                    r#type: "button",
                                    onclick: move |_| actions.reset.call(()),
                                    "Start Over"
                                }
                            }
                        }
                    }
                    Phase::Done => rsx! { DonePanel {} },
                }
            }
            match panel {
                Some(Panel::SavedCards) => rsx! { SavedCardsPanel {} },
                Some(Panel::Library) => rsx! { LibraryPanel {} },
                None => rsx! {},
            }
        }
    }
}
