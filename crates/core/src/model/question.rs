use crate::model::answer::Answer;
use crate::model::ids::{AnswerId, QuestionId};

/// A question in play, with its answers in display order.
///
/// Built once per round by [`derive_questions`](crate::derive_questions); exactly one
/// answer is correct and at most one is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    kind: String,
    difficulty: String,
    category: String,
    text: String,
    answers: Vec<Answer>,
}

impl Question {
    pub(crate) fn new(
        kind: String,
        difficulty: String,
        category: String,
        text: String,
        answers: Vec<Answer>,
    ) -> Self {
        Self {
            id: QuestionId::generate(),
            kind,
            difficulty,
            category,
            text,
            answers,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    /// `"multiple"` or `"boolean"` as reported by the source.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Raw (entity-encoded) question text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    #[must_use]
    pub fn answer(&self, id: AnswerId) -> Option<&Answer> {
        self.answers.iter().find(|answer| answer.id() == id)
    }

    #[must_use]
    pub fn owns(&self, id: AnswerId) -> bool {
        self.answer(id).is_some()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Answer> {
        self.answers.iter().find(|answer| answer.is_selected())
    }

    #[must_use]
    pub fn correct(&self) -> Option<&Answer> {
        self.answers.iter().find(|answer| answer.is_correct())
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.selected().is_some()
    }

    /// Index of the correct answer in display order.
    #[must_use]
    pub fn correct_position(&self) -> Option<usize> {
        self.answers.iter().position(Answer::is_correct)
    }

    /// Selects `id` and clears every sibling. Caller guarantees `id` belongs here.
    pub(crate) fn select(&mut self, id: AnswerId) {
        for answer in &mut self.answers {
            answer.set_selected(answer.id() == id);
        }
    }

    /// Sets `win` on the selected answer and reports whether it was correct.
    pub(crate) fn settle(&mut self) -> bool {
        for answer in &mut self.answers {
            answer.settle();
        }
        self.selected().is_some_and(Answer::is_correct)
    }
}
