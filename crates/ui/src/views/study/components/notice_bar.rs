use dioxus::prelude::*;

use crate::vm::NOTICE_TIMEOUT;

use super::super::state::StudyState;

#[component]
pub fn NoticeBar() -> Element {
    let state = use_context::<StudyState>();
    let study = state.study;

    let error_generation = use_memo(move || study.read().notices().error_generation());
    let info_generation = use_memo(move || study.read().notices().info_generation());

    use_effect(move || {
        let Some(generation) = error_generation() else {
            return;
        };
        let mut study = study;
        spawn(async move {
            tokio::time::sleep(NOTICE_TIMEOUT).await;
            study.write().notices_mut().dismiss_error(generation);
        });
    });

    use_effect(move || {
        let Some(generation) = info_generation() else {
            return;
        };
        let mut study = study;
        spawn(async move {
            tokio::time::sleep(NOTICE_TIMEOUT).await;
            study.write().notices_mut().dismiss_info(generation);
        });
    });

    let error = study.read().notices().error().map(str::to_owned);
    let info = study.read().notices().info().map(str::to_owned);

    rsx! {
        div { class: "notice-bar",
            if let Some(message) = error {
                p { class: "notice notice--error", role: "alert", "{message}" }
            }
            if let Some(message) = info {
                p { class: "notice notice--info", role: "status", "{message}" }
            }
        }
    }
}
