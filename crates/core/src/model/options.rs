use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OptionsError {
    #[error("question amount must be between 1 and {max}, got {got}")]
    InvalidAmount { got: u32, max: u32 },

    #[error("unknown difficulty: {0} (expected easy, medium or hard)")]
    UnknownDifficulty(String),
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Query-string value understood by the trivia API.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(OptionsError::UnknownDifficulty(s.to_string())),
        }
    }
}

//
// ─── OPTIONS ───────────────────────────────────────────────────────────────────
//

/// What to ask the question source for on every load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOptions {
    amount: u32,
    difficulty: Difficulty,
}

impl QuizOptions {
    pub const DEFAULT_AMOUNT: u32 = 5;
    /// Upper bound accepted by Open Trivia DB for a single request.
    pub const MAX_AMOUNT: u32 = 50;

    /// # Errors
    ///
    /// Returns `OptionsError::InvalidAmount` when `amount` is 0 or above `MAX_AMOUNT`.
    pub fn new(amount: u32, difficulty: Difficulty) -> Result<Self, OptionsError> {
        if amount == 0 || amount > Self::MAX_AMOUNT {
            return Err(OptionsError::InvalidAmount {
                got: amount,
                max: Self::MAX_AMOUNT,
            });
        }
        Ok(Self { amount, difficulty })
    }

    #[must_use]
    pub fn amount(&self) -> u32 {
        self.amount
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }
}

impl Default for QuizOptions {
    fn default() -> Self {
        Self {
            amount: Self::DEFAULT_AMOUNT,
            difficulty: Difficulty::Easy,
        }
    }
}
