//! Shared error types for the services crate.

use thiserror::Error;

use trivia_core::model::OptionsError;

/// Errors emitted while fetching a batch of questions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("could not reach the trivia service: {0}")]
    Network(#[from] reqwest::Error),
    #[error("trivia service answered with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("trivia service returned an unreadable body: {0}")]
    Parse(String),
    #[error("trivia service rejected the request: {}", api_code_message(*code))]
    Api { code: u8 },
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Parse(err.to_string())
    }
}

fn api_code_message(code: u8) -> &'static str {
    match code {
        1 => "not enough questions for this query",
        2 => "invalid parameter",
        3 => "session token not found",
        4 => "session token exhausted",
        5 => "too many requests, try again in a few seconds",
        _ => "unknown response code",
    }
}

/// Errors emitted while reading quiz configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error(transparent)]
    Options(#[from] OptionsError),
    #[error("invalid {name} value: {raw}")]
    InvalidNumber { name: &'static str, raw: String },
    #[error("invalid trivia API url {raw}: {source}")]
    InvalidUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },
}

/// Errors emitted by a `QuizHandle` once its loop is gone.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizLoopError {
    #[error("quiz loop has been cancelled")]
    Closed,
}
