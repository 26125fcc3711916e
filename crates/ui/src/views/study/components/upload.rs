use dioxus::prelude::*;
use flashy_core::model::{Difficulty, QuizFormat};
use services::UploadFile;

use crate::vm::{MAX_QUESTION_COUNT, TICK_INTERVAL};

use super::super::actions::StudyActions;
use super::super::state::StudyState;

const ACCEPTED_TYPES: &str = ".pdf,.pptx,.txt";

#[component]
pub fn UploadPanel() -> Element {
    let state = use_context::<StudyState>();
    let actions = use_context::<StudyActions>();
    let mut study = state.study;

    let loading = study.read().loading();
    let file_name = study.read().file_name().map(str::to_owned);
    let format = study.read().format();
    let difficulty = study.read().difficulty();
    let question_count = study.read().question_count();

    let on_pick = move |event: FormEvent| {
        let mut files = event.files();
        let Some(file) = files.pop() else {
            return;
        };
        let name = file.name();
        spawn(async move {
            let picked = match file.read_bytes().await {
                Ok(bytes) => UploadFile::new(name, bytes.to_vec()),
                Err(err) => {
                    tracing::warn!(error = %err, "selected file could not be read");
                    Err(services::GenerationError::Read {
                        path: name,
                        message: err.to_string(),
                    })
                }
            };
            match picked {
                Ok(file) => study.write().select_file(file),
                Err(err) => study.write().reject_file(&err),
            }
        });
    };

    let format_options = QuizFormat::ALL.iter().map(|option| {
        let value = option.as_str();
        rsx! {
            option { value: "{value}", selected: *option == format, "{option.label()}" }
        }
    });
    let difficulty_options = Difficulty::ALL.iter().map(|option| {
        let value = option.as_str();
        rsx! {
            option { value: "{value}", selected: *option == difficulty, "{value}" }
        }
    });

    rsx! {
        section { class: "upload-panel",
            h2 { class: "upload-title", "Turn your notes into flashcards" }
            label { class: "file-picker",
                input {
                    r#type: "file",
                    accept: ACCEPTED_TYPES,
                    disabled: loading,
                    onchange: on_pick,
                }
                span { class: "btn btn-secondary", "Choose File" }
                span { class: "file-picker-name",
                    if let Some(name) = file_name {
                        "{name}"
                    } else {
                        "Only PDF, PPTX, or TXT files allowed"
                    }
                }
            }
            div { class: "upload-options",
                label { class: "upload-option",
                    span { "Format" }
                    select {
                        disabled: loading,
                        onchange: move |event: FormEvent| {
                            if let Ok(format) = event.value().parse::<QuizFormat>() {
                                study.write().set_format(format);
                            }
                        },
                        {format_options}
                    }
                }
                label { class: "upload-option",
                    span { "Difficulty" }
                    select {
                        disabled: loading,
                        onchange: move |event: FormEvent| {
                            if let Ok(difficulty) = event.value().parse::<Difficulty>() {
                                study.write().set_difficulty(difficulty);
                            }
                        },
                        {difficulty_options}
                    }
                }
                label { class: "upload-option",
                    span { "Questions" }
                    input {
                        r#type: "number",
                        min: "1",
                        max: "{MAX_QUESTION_COUNT}",
                        value: "{question_count}",
                        disabled: loading,
                        oninput: move |event: FormEvent| {
                            if let Ok(count) = event.value().trim().parse::<u32>() {
                                study.write().set_question_count(count);
                            }
                        },
                    }
                }
            }
            if loading {
                LoadingStatus {}
            } else {
                button {
                    class: "btn btn-primary generate-button",
                    r#type: "button",
                    onclick: move |_| actions.generate.call(()),
                    "Start Generating Flashcards"
                }
            }
        }
    }
}

/// Mounted only while a generation is in flight; unmounting stops the ticker.
#[component]
fn LoadingStatus() -> Element {
    let state = use_context::<StudyState>();
    let mut ticker = state.ticker;

    use_future(move || async move {
        loop {
            tokio::time::sleep(TICK_INTERVAL).await;
            ticker.write().tick();
        }
    });

    let message = ticker.read().message();
    rsx! {
        div { class: "loading-status", role: "status",
            span { class: "spinner" }
            p { class: "loading-message", "{message}" }
        }
    }
}
