use dioxus::prelude::*;

use crate::context::AppContext;

use super::super::actions::StudyActions;
use super::super::state::StudyState;

#[component]
pub fn DonePanel() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<StudyState>();
    let actions = use_context::<StudyActions>();
    let count = state.study.read().session().len();
    let can_save = state.study.read().can_save_quiz(ctx.signed_in());

    rsx! {
        section { class: "done-panel",
            h2 { "Quiz complete!" }
            p { class: "done-summary", "You went through {count} cards." }
            div { class: "done-actions",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: !can_save,
                    onclick: move |_| actions.save_quiz.call(()),
                    "Save Quiz to Library"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| actions.reset.call(()),
                    "Start Over"
                }
            }
        }
    }
}
