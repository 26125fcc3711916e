use dioxus::prelude::*;

use crate::vm::{QuizRowVm, RenameDraft};

use super::super::actions::StudyActions;
use super::super::state::StudyState;

#[component]
pub fn LibraryPanel() -> Element {
    let state = use_context::<StudyState>();
    let mut panel = state.panel;
    let rows = state.library.read().quiz_rows();

    rsx! {
        aside { class: "side-panel library-panel",
            header { class: "side-panel-header",
                h2 { "My Quiz Library" }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| panel.set(None),
                    "Close"
                }
            }
            if rows.is_empty() {
                p { class: "side-panel-empty", "No quizzes saved yet. Generate one and save it!" }
            } else {
                ul { class: "quiz-list",
                    for row in rows {
                        QuizRow { key: "{row.id}", row: row.clone() }
                    }
                }
            }
        }
    }
}

#[component]
fn QuizRow(row: QuizRowVm) -> Element {
    let state = use_context::<StudyState>();
    let actions = use_context::<StudyActions>();
    let mut rename = state.rename;
    let id = row.id;
    let editing = rename.read().as_ref().is_some_and(|draft| draft.id == id);
    let draft_name = rename
        .read()
        .as_ref()
        .filter(|draft| draft.id == id)
        .map(|draft| draft.name.clone())
        .unwrap_or_default();
    let row_for_edit = row.clone();

    rsx! {
        li { class: "quiz-row",
            if editing {
                div { class: "quiz-rename",
                    input {
                        class: "quiz-rename-input",
                        r#type: "text",
                        value: "{draft_name}",
                        oninput: move |event: FormEvent| {
                            if let Some(draft) = rename.write().as_mut() {
                                draft.name = event.value();
                            }
                        },
                        onkeydown: move |event: KeyboardEvent| match event.key() {
                            Key::Enter => actions.commit_rename.call(()),
                            Key::Escape => actions.cancel_rename.call(()),
                            _ => {}
                        },
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| actions.commit_rename.call(()),
                        "Save"
                    }
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: move |_| actions.cancel_rename.call(()),
                        "Cancel"
                    }
                }
            } else {
                div { class: "quiz-row-main",
                    h3 { class: "quiz-row-name", "{row.name}" }
                    p { class: "quiz-row-meta",
                        "{row.format_label} · {row.difficulty_label} · {row.cards_label} · {row.created_label}"
                    }
                }
                div { class: "quiz-row-actions",
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| actions.load_quiz.call(id),
                        "Load"
                    }
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: move |_| rename.set(Some(RenameDraft::start(&row_for_edit))),
                        "Rename"
                    }
                    button {
                        class: "btn btn-danger",
                        r#type: "button",
                        onclick: move |_| actions.delete_quiz.call(id),
                        "Delete"
                    }
                }
            }
        }
    }
}
