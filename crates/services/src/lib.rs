#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod quiz_loop;
pub mod source;

pub use trivia_core;

pub use config::QuizConfig;
pub use error::{ConfigError, LoadError, QuizLoopError};
pub use quiz_loop::{QuizHandle, QuizLoopService};
pub use source::{OpenTdbSource, QuestionSource};
