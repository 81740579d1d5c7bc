use trivia_core::model::{Answer, AnswerId, Question, QuestionId};
use trivia_core::{QuizPhase, QuizState};

use crate::vm::text_fmt::decode_entities;

pub const CHECK_ANSWERS_LABEL: &str = "Check answers";
pub const PLAY_AGAIN_LABEL: &str = "Play again";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerHighlight {
    Plain,
    Selected,
    /// Selected and correct, after reveal.
    Win,
    /// Selected and wrong, after reveal.
    Lost,
}

impl AnswerHighlight {
    fn for_answer(answer: &Answer) -> Self {
        match answer.win() {
            Some(true) => Self::Win,
            Some(false) => Self::Lost,
            None if answer.is_selected() => Self::Selected,
            None => Self::Plain,
        }
    }

    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Plain => "answer",
            Self::Selected => "answer answer--selected",
            Self::Win => "answer answer--win",
            Self::Lost => "answer answer--lost",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerVm {
    pub id: AnswerId,
    pub text: String,
    pub highlight: AnswerHighlight,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub id: QuestionId,
    pub text: String,
    /// `"{category} · {difficulty}"`, decoded.
    pub caption: String,
    pub answers: Vec<AnswerVm>,
}

/// Everything the quiz board renders, derived from one state snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub questions: Vec<QuestionVm>,
    /// Clicks on answers have no effect.
    pub locked: bool,
    pub loading: bool,
    pub score_label: Option<String>,
    pub submit_label: &'static str,
    pub show_submit: bool,
    pub error: Option<String>,
}

impl QuizVm {
    #[must_use]
    pub fn from_state(state: &QuizState) -> Self {
        // Loading with questions on screen only happens while a restart is pending.
        let restarting = state.is_loading() && !state.questions().is_empty();
        let scored = state.is_revealed() || restarting;
        let total = state.questions().len();

        Self {
            questions: state.questions().iter().map(map_question).collect(),
            locked: !matches!(state.phase(), QuizPhase::Ready),
            loading: state.is_loading(),
            score_label: scored.then(|| {
                format!("You scored {}/{total} correct answers", state.score())
            }),
            submit_label: if scored {
                PLAY_AGAIN_LABEL
            } else {
                CHECK_ANSWERS_LABEL
            },
            show_submit: total > 0,
            error: state.failure().map(|failure| failure.message().to_string()),
        }
    }
}

fn map_question(question: &Question) -> QuestionVm {
    QuestionVm {
        id: question.id(),
        text: decode_entities(question.text()),
        caption: format!(
            "{} · {}",
            decode_entities(question.category()),
            question.difficulty()
        ),
        answers: question
            .answers()
            .iter()
            .map(|answer| AnswerVm {
                id: answer.id(),
                text: decode_entities(answer.text()),
                highlight: AnswerHighlight::for_answer(answer),
            })
            .collect(),
    }
}
