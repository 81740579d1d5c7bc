use rand::Rng;

use crate::model::{Answer, Question, RawQuestion};

/// Turns fetched questions into in-play questions.
///
/// Each incorrect answer keeps its source order; the correct answer is inserted at a
/// slot drawn uniformly from `0..=incorrect_answers.len()`. Output order mirrors input
/// order, and every question and answer gets a fresh id.
pub fn derive_questions<R: Rng + ?Sized>(raw: &[RawQuestion], rng: &mut R) -> Vec<Question> {
    raw.iter().map(|item| derive_question(item, rng)).collect()
}

fn derive_question<R: Rng + ?Sized>(raw: &RawQuestion, rng: &mut R) -> Question {
    let mut answers: Vec<Answer> = raw
        .incorrect_answers
        .iter()
        .map(|text| Answer::new(text.clone(), false))
        .collect();

    let slot = rng.random_range(0..=answers.len());
    answers.insert(slot, Answer::new(raw.correct_answer.clone(), true));

    Question::new(
        raw.kind.clone(),
        raw.difficulty.clone(),
        raw.category.clone(),
        raw.question.clone(),
        answers,
    )
}
