mod answer;
mod ids;
mod options;
mod question;
mod raw;

pub use answer::Answer;
pub use ids::{AnswerId, ParseIdError, QuestionId};
pub use options::{Difficulty, OptionsError, QuizOptions};
pub use question::Question;
pub use raw::{RawQuestion, TriviaResponse};
