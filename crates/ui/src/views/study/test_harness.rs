use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use flashy_core::model::{Card, Theme};
use flashy_core::time::fixed_now;
use services::{
    AppServices, Clock, GenerationError, Identity, LibrarySync, QuizGenerator, ThemeService,
    UploadFile,
};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};

use super::actions::{StudyActions, use_study_actions};
use super::feed::use_library_feed;
use super::state::{StudyState, use_study_state};
use super::view::StudyScreen;

/// Answers every upload with the same cards; an empty list means "nothing generated".
pub struct ScriptedGenerator(pub Vec<Card>);

#[async_trait]
impl QuizGenerator for ScriptedGenerator {
    async fn generate(&self, _file: &UploadFile) -> Result<Vec<Card>, GenerationError> {
        if self.0.is_empty() {
            Err(GenerationError::Empty)
        } else {
            Ok(self.0.clone())
        }
    }
}

struct TestApp {
    services: AppServices,
    identity: Option<Identity>,
    startup_error: Option<String>,
}

impl UiApp for TestApp {
    fn identity(&self) -> Option<Identity> {
        self.identity.clone()
    }

    fn startup_error(&self) -> Option<String> {
        self.startup_error.clone()
    }

    fn library_for(&self, user: flashy_core::model::UserId) -> LibrarySync {
        self.services.library_for(user)
    }

    fn generator(&self) -> Arc<dyn QuizGenerator> {
        self.services.generator()
    }

    fn theme_service(&self) -> Arc<ThemeService> {
        self.services.theme()
    }

    fn initial_theme(&self) -> Theme {
        Theme::Dark
    }
}

#[derive(Clone, Default)]
pub struct HarnessHandles {
    state: Rc<RefCell<Option<StudyState>>>,
    actions: Rc<RefCell<Option<StudyActions>>>,
}

impl PartialEq for HarnessHandles {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl HarnessHandles {
    fn state(&self) -> StudyState {
        self.state.borrow().clone().expect("state registered")
    }

    fn actions(&self) -> StudyActions {
        self.actions.borrow().clone().expect("actions registered")
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
    handles: HarnessHandles,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn StudyHarnessRoot(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! {
        StudyProbe { handles: props.handles.clone() }
    }
}

#[component]
fn StudyProbe(handles: HarnessHandles) -> Element {
    let ctx = use_context::<crate::context::AppContext>();
    let state = use_study_state(ctx.initial_theme());
    use_context_provider(|| state);
    let actions = use_study_actions(state);
    use_context_provider(|| actions);
    use_library_feed(state);

    let mut registered = use_signal(|| false);
    if !registered() {
        registered.set(true);
        *handles.state.borrow_mut() = Some(state);
        *handles.actions.borrow_mut() = Some(actions);
    }
    rsx! { StudyScreen {} }
}

pub struct StudyHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub services: AppServices,
    pub identity: Option<Identity>,
    handles: HarnessHandles,
}

impl StudyHarness {
    /// Run `f` with the screen's actions inside the dom runtime, then render.
    pub fn act(&mut self, f: impl FnOnce(StudyActions)) {
        let actions = self.handles.actions();
        self.dom.in_runtime(|| f(actions));
        drive_dom(&mut self.dom);
    }

    /// Read or poke the screen's signals inside the dom runtime, then render.
    pub fn with_state<O>(&mut self, f: impl FnOnce(StudyState) -> O) -> O {
        let state = self.handles.state();
        let out = self.dom.in_runtime(|| f(state));
        drive_dom(&mut self.dom);
        out
    }

    /// Let spawned tasks and feed snapshots run to quiescence.
    pub async fn settle(&mut self) {
        for _ in 0..6 {
            let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
            drive_dom(&mut self.dom);
        }
    }

    pub fn library(&self) -> LibrarySync {
        let identity = self.identity.as_ref().expect("signed in");
        self.services.library_for(identity.user_id.clone())
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn pdf() -> UploadFile {
    UploadFile::new("history101.pdf", b"%PDF-1.7".to_vec()).expect("pdf upload")
}

async fn build(cards: Vec<Card>, signed_in: bool) -> StudyHarness {
    let storage = Storage::in_memory();
    let services = AppServices::with_parts(
        Clock::fixed(fixed_now()),
        storage.clone(),
        Arc::new(ScriptedGenerator(cards)),
    );
    let (identity, startup_error) = if signed_in {
        let identity = services.identity().sign_in(None).await.expect("sign in");
        (Some(identity), None)
    } else {
        (None, Some("Authentication failed. Please try again.".to_string()))
    };

    let handles = HarnessHandles::default();
    let app = Arc::new(TestApp {
        services: services.clone(),
        identity: identity.clone(),
        startup_error,
    });
    let mut dom = VirtualDom::new_with_props(
        StudyHarnessRoot,
        HarnessProps {
            app,
            handles: handles.clone(),
        },
    );
    dom.rebuild_in_place();
    drive_dom(&mut dom);

    StudyHarness {
        dom,
        storage,
        services,
        identity,
        handles,
    }
}

pub async fn setup_study_harness(cards: Vec<Card>) -> StudyHarness {
    let mut harness = build(cards, true).await;
    harness.settle().await;
    harness
}

pub async fn setup_signed_out_harness() -> StudyHarness {
    build(vec![Card::new("Q1", "A1")], false).await
}
