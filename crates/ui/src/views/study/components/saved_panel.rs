use dioxus::prelude::*;

use super::super::actions::StudyActions;
use super::super::state::StudyState;

#[component]
pub fn SavedCardsPanel() -> Element {
    let state = use_context::<StudyState>();
    let actions = use_context::<StudyActions>();
    let mut panel = state.panel;
    let saved = state.library.read().saved_cards().to_vec();

    let rows = saved.into_iter().map(|saved| {
        let key = saved.key().as_str().to_string();
        let card = saved.card().clone();
        rsx! {
            li { key: "{key}", class: "saved-card",
                div { class: "saved-card-text",
                    p { class: "saved-card-question", "{saved.question()}" }
                    p { class: "saved-card-answer", "{saved.answer()}" }
                }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| actions.unsave_card.call(card.clone()),
                    "Unsave"
                }
            }
        }
    });

    rsx! {
        aside { class: "side-panel saved-panel",
            header { class: "side-panel-header",
                h2 { "Saved Cards" }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| panel.set(None),
                    "Close"
                }
            }
            if state.library.read().saved_cards().is_empty() {
                p { class: "side-panel-empty",
                    "No cards saved yet. Click the bookmark icon on a flashcard to save it!"
                }
            } else {
                ul { class: "saved-card-list", {rows} }
            }
        }
    }
}
