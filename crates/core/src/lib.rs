#![forbid(unsafe_code)]

pub mod derive;
pub mod model;
pub mod quiz;

pub use derive::derive_questions;
pub use quiz::{EMPTY_BATCH_MESSAGE, LoadFailure, QuizEffect, QuizPhase, QuizState};
