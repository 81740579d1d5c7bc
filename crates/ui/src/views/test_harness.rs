use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::trivia_core::model::{QuizOptions, RawQuestion};
use services::{LoadError, QuestionSource, QuizHandle, QuizLoopService};

use crate::context::{UiApp, build_app_context};
use crate::views::{QuizBoard, QuizView};
use crate::vm::QuizVm;

pub fn raw_question(question: &str, correct: &str, incorrect: &[&str]) -> RawQuestion {
    RawQuestion {
        kind: "multiple".into(),
        difficulty: "easy".into(),
        category: "Geography".into(),
        question: question.into(),
        correct_answer: correct.into(),
        incorrect_answers: incorrect.iter().map(|s| (*s).to_string()).collect(),
    }
}

/// Serves the same batch, or the same API error, on every fetch.
pub struct StaticSource {
    outcome: Result<Vec<RawQuestion>, u8>,
}

impl StaticSource {
    pub fn serving(batch: Vec<RawQuestion>) -> Arc<Self> {
        Arc::new(Self { outcome: Ok(batch) })
    }

    pub fn failing(code: u8) -> Arc<Self> {
        Arc::new(Self { outcome: Err(code) })
    }
}

#[async_trait]
impl QuestionSource for StaticSource {
    async fn fetch(&self, _options: &QuizOptions) -> Result<Vec<RawQuestion>, LoadError> {
        match &self.outcome {
            Ok(batch) => Ok(batch.clone()),
            Err(code) => Err(LoadError::Api { code: *code }),
        }
    }
}

struct TestApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for TestApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handle: QuizHandle,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handle.clone());
    rsx! { QuizView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    /// The loop the view renders; commands sent here bypass the view entirely.
    pub handle: QuizHandle,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive the dom until the rendered html satisfies `ready`, returning the last render.
    pub async fn drive_until(&mut self, ready: impl Fn(&str) -> bool) -> String {
        for _ in 0..40 {
            let html = self.render();
            if ready(&html) {
                return html;
            }
            self.drive_async().await;
        }
        self.render()
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

/// Mount a live `QuizView` over `source`. Must run inside a tokio runtime.
pub fn setup_quiz_harness(source: Arc<dyn QuestionSource>) -> ViewHarness {
    let quiz_loop = Arc::new(QuizLoopService::new(source, QuizOptions::default()));
    let handle = quiz_loop.start();
    let dom = VirtualDom::new_with_props(
        ViewHarnessRoot,
        ViewHarnessProps {
            app: Arc::new(TestApp { quiz_loop }),
            handle: handle.clone(),
        },
    );
    ViewHarness { dom, handle }
}

#[derive(Props, Clone, PartialEq)]
struct BoardHarnessProps {
    vm: QuizVm,
}

#[component]
fn BoardHarness(props: BoardHarnessProps) -> Element {
    rsx! {
        QuizBoard {
            vm: props.vm.clone(),
            on_select: move |_| {},
            on_submit: move |()| {},
            on_retry: move |()| {},
        }
    }
}

/// Render a static board for `vm` to html.
pub fn render_board(vm: QuizVm) -> String {
    let mut dom = VirtualDom::new_with_props(BoardHarness, BoardHarnessProps { vm });
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}
