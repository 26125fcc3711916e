use dioxus::prelude::*;
use flashy_core::model::Card;

use crate::vm::{BookmarkAction, CardSlot, SAVE_PULSE, bookmark_label};

use super::super::actions::StudyActions;
use super::super::state::StudyState;

/// One card of the running session, drawn from the face state of `slot`.
#[component]
pub fn QuizCard(card: Card, slot: CardSlot, progress: String, saved: bool) -> Element {
    let actions = use_context::<StudyActions>();
    let state = use_context::<StudyState>();
    let mut face = state.face;

    let flipped = face.read().flipped(slot);
    let just_saved = face.read().just_saved(slot);
    let card_class = if flipped { "flashcard flashcard--flipped" } else { "flashcard" };
    let bookmark_class = match (saved, just_saved) {
        (_, true) => "bookmark bookmark--saved bookmark--pulse",
        (true, false) => "bookmark bookmark--saved",
        (false, false) => "bookmark",
    };
    let label = bookmark_label(saved);
    let question = card.question().to_string();
    let answer = card.answer().to_string();

    let on_bookmark = move |event: MouseEvent| {
        event.stop_propagation();
        let action = face.write().bookmark(slot, saved);
        match action {
            BookmarkAction::Save => {
                actions.save_card.call(card.clone());
                spawn(async move {
                    tokio::time::sleep(SAVE_PULSE).await;
                    face.write().end_save_pulse(slot);
                });
            }
            BookmarkAction::Unsave => actions.unsave_card.call(card.clone()),
        }
    };

    rsx! {
        section { class: "quiz-panel",
            p { class: "quiz-progress", "{progress}" }
            div {
                class: "{card_class}",
                role: "button",
                tabindex: "0",
                onclick: move |_| actions.reveal.call(()),
                button {
                    class: "{bookmark_class}",
                    r#type: "button",
                    title: "{label}",
                    onclick: on_bookmark,
                    "{label}"
                }
                div { class: "flashcard-face flashcard-front",
                    p { class: "flashcard-text", "{question}" }
                    span { class: "flashcard-hint", "Click to reveal the answer" }
                }
                div { class: "flashcard-face flashcard-back",
                    p { class: "flashcard-text", "{answer}" }
                }
            }
            button {
                class: "btn btn-primary next-button",
                r#type: "button",
                disabled: !flipped,
                onclick: move |_| actions.advance.call(()),
                "Next Card"
            }
        }
    }
}
