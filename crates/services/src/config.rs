use std::env;
use std::time::Duration;

use trivia_core::model::{Difficulty, QuizOptions};
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "https://opentdb.com/api.php";
pub const DEFAULT_RESTART_DELAY: Duration = Duration::from_millis(1000);

/// Runtime knobs for the quiz loop and its question source.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizConfig {
    pub api_url: Url,
    pub options: QuizOptions,
    pub restart_delay: Duration,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            options: QuizOptions::default(),
            restart_delay: DEFAULT_RESTART_DELAY,
        }
    }
}

impl QuizConfig {
    /// Read `TRIVIA_API_URL`, `TRIVIA_AMOUNT`, `TRIVIA_DIFFICULTY` and `TRIVIA_RESTART_MS`.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`QuizConfig::from_env`] with an injectable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a value is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(raw) = value("TRIVIA_API_URL") {
            config = config.with_api_url(&raw)?;
        }
        if let Some(raw) = value("TRIVIA_AMOUNT") {
            config = config.with_amount(parse_number("TRIVIA_AMOUNT", &raw)?)?;
        }
        if let Some(raw) = value("TRIVIA_DIFFICULTY") {
            config = config.with_difficulty(raw.parse::<Difficulty>()?);
        }
        if let Some(raw) = value("TRIVIA_RESTART_MS") {
            let millis = parse_number("TRIVIA_RESTART_MS", &raw)?;
            config.restart_delay = Duration::from_millis(u64::from(millis));
        }

        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` when `raw` is not an absolute URL.
    pub fn with_api_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.api_url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl {
            raw: raw.to_string(),
            source,
        })?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Options` when `amount` is out of range.
    pub fn with_amount(mut self, amount: u32) -> Result<Self, ConfigError> {
        self.options = QuizOptions::new(amount, self.options.difficulty())?;
        Ok(self)
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.options = self.options.with_difficulty(difficulty);
        self
    }

    #[must_use]
    pub fn with_restart_delay(mut self, delay: Duration) -> Self {
        self.restart_delay = delay;
        self
    }
}

fn default_api_url() -> Url {
    Url::parse(DEFAULT_API_URL).expect("default API url should be valid")
}

fn parse_number(name: &'static str, raw: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| ConfigError::InvalidNumber {
            name,
            raw: raw.to_string(),
        })
}
