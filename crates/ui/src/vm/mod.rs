mod quiz_vm;
mod text_fmt;

pub use quiz_vm::{
    AnswerHighlight, AnswerVm, CHECK_ANSWERS_LABEL, PLAY_AGAIN_LABEL, QuestionVm, QuizVm,
};
pub use text_fmt::decode_entities;
