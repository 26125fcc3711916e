use dioxus::prelude::*;
use flashy_core::model::Theme;

use crate::vm::{CardFaceVm, LibraryVm, LoadingTicker, RenameDraft, StudyVm};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    SavedCards,
    Library,
}

/// Signals shared by every part of the study screen.
#[derive(Clone, Copy, PartialEq)]
pub struct StudyState {
    pub study: Signal<StudyVm>,
    pub face: Signal<CardFaceVm>,
    pub library: Signal<LibraryVm>,
    pub ticker: Signal<LoadingTicker>,
    pub theme: Signal<Theme>,
    pub panel: Signal<Option<Panel>>,
    pub rename: Signal<Option<RenameDraft>>,
}

impl StudyState {
    pub fn toggle_panel(mut self, panel: Panel) {
        let next = if (self.panel)() == Some(panel) {
            None
        } else {
            Some(panel)
        };
        self.panel.set(next);
    }
}

pub fn use_study_state(initial_theme: Theme) -> StudyState {
    StudyState {
        study: use_signal(StudyVm::new),
        face: use_signal(CardFaceVm::default),
        library: use_signal(LibraryVm::new),
        ticker: use_signal(LoadingTicker::default),
        theme: use_signal(|| initial_theme),
        panel: use_signal(|| None::<Panel>),
        rename: use_signal(|| None::<RenameDraft>),
    }
}
