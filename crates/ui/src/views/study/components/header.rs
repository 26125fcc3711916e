use dioxus::prelude::*;
use flashy_core::model::Theme;

use super::super::actions::StudyActions;
use super::super::state::{Panel, StudyState};

#[component]
pub fn StudyHeader() -> Element {
    let state = use_context::<StudyState>();
    let actions = use_context::<StudyActions>();
    let theme = (state.theme)();
    let saved_count = state.library.read().saved_cards().len();
    let quiz_count = state.library.read().quizzes().len();
    let theme_label = match theme {
        Theme::Dark => "Light mode",
        Theme::Light => "Dark mode",
    };

    rsx! {
        header { class: "study-header",
            h1 { class: "brand", "FLASHYGEN" }
            nav { class: "study-header-actions",
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| state.toggle_panel(Panel::SavedCards),
                    "Saved Cards ({saved_count})"
                }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| state.toggle_panel(Panel::Library),
                    "My Quiz Library ({quiz_count})"
                }
                button {
                    class: "btn btn-ghost theme-toggle",
                    r#type: "button",
                    title: "Toggle theme",
                    onclick: move |_| actions.toggle_theme.call(()),
                    "{theme_label}"
                }
            }
        }
    }
}
