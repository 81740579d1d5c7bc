use trivia_core::derive_questions;
use trivia_core::model::AnswerId;
use trivia_core::{LoadFailure, QuizState};

use super::test_harness::{StaticSource, raw_question, render_board, setup_quiz_harness};
use crate::vm::QuizVm;

fn ready_state() -> QuizState {
    let raw = [raw_question(
        "What is the capital of France?",
        "Paris",
        &["Rome", "Berlin", "Madrid"],
    )];
    QuizState::loading().on_loaded(derive_questions(&raw, &mut rand::rng()))
}

fn answer_id(state: &QuizState, text: &str) -> AnswerId {
    state.questions()[0]
        .answers()
        .iter()
        .find(|answer| answer.text() == text)
        .unwrap()
        .id()
}

#[test]
fn board_renders_a_ready_round() {
    let html = render_board(QuizVm::from_state(&ready_state()));

    assert!(html.contains("What is the capital of France?"), "missing question in {html}");
    assert!(html.contains("Geography · easy"), "missing caption in {html}");
    for city in ["Paris", "Rome", "Berlin", "Madrid"] {
        assert!(html.contains(city), "missing {city} in {html}");
    }
    assert!(html.contains("Check answers"), "missing submit in {html}");
    assert!(!html.contains("You scored"), "unexpected score in {html}");
}

#[test]
fn board_renders_score_after_reveal() {
    let state = ready_state();
    let (revealed, _) = state.select(answer_id(&state, "Rome")).submit();
    let html = render_board(QuizVm::from_state(&revealed));

    assert!(html.contains("You scored 0/1 correct answers"), "missing score in {html}");
    assert!(html.contains("Play again"), "missing play again in {html}");
    assert!(html.contains("answer--lost"), "missing lost highlight in {html}");
    assert!(!html.contains("answer--win"), "unexpected win highlight in {html}");
}

#[test]
fn board_renders_first_load_placeholder() {
    let html = render_board(QuizVm::from_state(&QuizState::loading()));

    assert!(html.contains("Loading questions..."), "missing placeholder in {html}");
    assert!(html.contains("quiz--locked"), "missing locked look in {html}");
    assert!(!html.contains("Check answers"), "unexpected submit in {html}");
}

#[test]
fn board_renders_failure_with_retry() {
    let failed = QuizState::loading().on_load_failed(LoadFailure::new("network down"));
    let html = render_board(QuizVm::from_state(&failed));

    assert!(html.contains("network down"), "missing message in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
    assert!(!html.contains("Check answers"), "unexpected submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_loads_and_decodes_a_round() {
    let source = StaticSource::serving(vec![raw_question(
        "Who wrote &quot;Hamlet&quot;?",
        "Shakespeare",
        &["Marlowe"],
    )]);
    let mut harness = setup_quiz_harness(source);
    harness.rebuild();

    let html = harness
        .drive_until(|html| html.contains("Shakespeare"))
        .await;

    assert!(html.contains("Hamlet"), "missing question in {html}");
    assert!(!html.contains("&amp;quot;"), "entities left encoded in {html}");
    assert!(html.contains("Check answers"), "missing submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_shows_load_errors() {
    let mut harness = setup_quiz_harness(StaticSource::failing(1));
    harness.rebuild();

    let html = harness.drive_until(|html| html.contains("Retry")).await;

    assert!(html.contains("not enough questions"), "missing api message in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_renders_whatever_the_loop_publishes() {
    let source = StaticSource::serving(vec![raw_question(
        "What is the capital of France?",
        "Paris",
        &["Rome"],
    )]);
    let mut harness = setup_quiz_harness(source);
    harness.rebuild();
    harness
        .drive_until(|html| html.contains("Check answers"))
        .await;

    let ready = harness.handle.current();
    let rome = answer_id(&ready, "Rome");
    harness.handle.select(rome).await.unwrap();
    let html = harness
        .drive_until(|html| html.contains("answer--selected"))
        .await;
    assert!(html.contains("answer--selected"), "selection not mirrored in {html}");

    harness.handle.submit().await.unwrap();
    let html = harness
        .drive_until(|html| html.contains("You scored"))
        .await;
    assert!(html.contains("You scored 0/1 correct answers"), "reveal not mirrored in {html}");
    assert!(html.contains("answer--lost"), "missing lost highlight in {html}");
}
