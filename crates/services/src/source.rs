use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use trivia_core::model::{QuizOptions, RawQuestion, TriviaResponse};

use crate::error::LoadError;

/// Where batches of questions come from.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch one batch. Implementations make a single attempt and never retry.
    async fn fetch(&self, options: &QuizOptions) -> Result<Vec<RawQuestion>, LoadError>;
}

/// Open Trivia DB over HTTP.
#[derive(Clone)]
pub struct OpenTdbSource {
    client: Client,
    api_url: Url,
}

impl OpenTdbSource {
    #[must_use]
    pub fn new(api_url: Url) -> Self {
        Self {
            client: Client::new(),
            api_url,
        }
    }

    /// The GET url for one batch, e.g. `https://opentdb.com/api.php?amount=5&difficulty=easy`.
    #[must_use]
    pub fn request_url(&self, options: &QuizOptions) -> Url {
        let mut url = self.api_url.clone();
        url.query_pairs_mut()
            .append_pair("amount", &options.amount().to_string())
            .append_pair("difficulty", options.difficulty().as_str());
        url
    }
}

#[async_trait]
impl QuestionSource for OpenTdbSource {
    async fn fetch(&self, options: &QuizOptions) -> Result<Vec<RawQuestion>, LoadError> {
        let url = self.request_url(options);
        tracing::debug!(%url, "requesting trivia batch");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(LoadError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}

/// Decode an `api.php` body into raw questions.
///
/// # Errors
///
/// Returns `LoadError::Parse` for malformed JSON or missing fields and
/// `LoadError::Api` for a non-zero `response_code`.
pub fn parse_response(body: &str) -> Result<Vec<RawQuestion>, LoadError> {
    let parsed: TriviaResponse = serde_json::from_str(body)?;
    if parsed.response_code != 0 {
        return Err(LoadError::Api {
            code: parsed.response_code,
        });
    }
    Ok(parsed.results)
}
