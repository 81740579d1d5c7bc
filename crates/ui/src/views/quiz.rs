use dioxus::prelude::*;

use services::{QuizHandle, QuizLoopError};
use trivia_core::QuizState;
use trivia_core::model::AnswerId;

use crate::context::AppContext;
use crate::vm::QuizVm;

/// The whole quiz screen, driven by one quiz loop for the lifetime of the view.
///
/// Uses a `QuizHandle` from context when an ancestor provides one, otherwise starts
/// its own loop. The rendered snapshot only ever comes from the handle's watch channel.
#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let handle = use_hook(|| {
        try_consume_context::<QuizHandle>().unwrap_or_else(|| ctx.quiz_loop().start())
    });
    let mut snapshot = use_signal(|| handle.current());

    let watcher = handle.clone();
    use_future(move || {
        let mut updates = watcher.subscribe();
        async move {
            while updates.changed().await.is_ok() {
                let next = updates.borrow_and_update().clone();
                snapshot.set(next);
            }
        }
    });

    let on_drop = handle.clone();
    use_drop(move || on_drop.cancel());

    let on_select = {
        let handle = handle.clone();
        use_callback(move |id: AnswerId| {
            let handle = handle.clone();
            spawn(async move {
                log_dropped(handle.select(id).await);
            });
        })
    };
    let on_submit = {
        let handle = handle.clone();
        use_callback(move |()| {
            let handle = handle.clone();
            spawn(async move {
                log_dropped(handle.submit().await);
            });
        })
    };
    let on_retry = {
        let handle = handle.clone();
        use_callback(move |()| {
            let handle = handle.clone();
            spawn(async move {
                log_dropped(handle.retry().await);
            });
        })
    };

    let vm = QuizVm::from_state(&snapshot.read());
    rsx! {
        QuizBoard { vm, on_select, on_submit, on_retry }
    }
}

fn log_dropped(reply: Result<QuizState, QuizLoopError>) {
    if let Err(err) = reply {
        tracing::debug!(error = %err, "quiz command dropped");
    }
}

#[component]
pub fn QuizBoard(
    vm: QuizVm,
    on_select: Callback<AnswerId>,
    on_submit: Callback<()>,
    on_retry: Callback<()>,
) -> Element {
    let root_class = if vm.loading { "quiz quiz--locked" } else { "quiz" };
    let answers_class = if vm.locked {
        "quiz-answers quiz-answers--locked"
    } else {
        "quiz-answers"
    };

    let question_blocks = vm.questions.iter().map(|question| {
        let answer_buttons = question.answers.iter().map(|answer| {
            let id = answer.id;
            rsx! {
                button {
                    key: "{id}",
                    class: answer.highlight.class(),
                    r#type: "button",
                    onclick: move |_| on_select.call(id),
                    "{answer.text}"
                }
            }
        });
        rsx! {
            section { key: "{question.id}", class: "quiz-question",
                h2 { class: "quiz-question-text", "{question.text}" }
                p { class: "quiz-caption", "{question.caption}" }
                div { class: answers_class, {answer_buttons} }
                div { class: "quiz-separator" }
            }
        }
    });

    rsx! {
        main { class: root_class,
            if let Some(message) = vm.error.as_ref() {
                div { class: "quiz-error",
                    p { class: "quiz-error-title", "Could not load questions" }
                    p { class: "quiz-error-message", "{message}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_retry.call(()),
                        "Retry"
                    }
                }
            }
            if vm.loading && vm.questions.is_empty() {
                p { class: "quiz-status", "Loading questions..." }
            }
            {question_blocks}
            div { class: "quiz-footer",
                if let Some(label) = vm.score_label.as_ref() {
                    p { class: "quiz-score", "{label}" }
                }
                if vm.show_submit {
                    button {
                        class: "btn btn-main",
                        r#type: "button",
                        onclick: move |_| on_submit.call(()),
                        "{vm.submit_label}"
                    }
                }
            }
        }
    }
}
