use serde::{Deserialize, Serialize};

/// A question exactly as the remote trivia source returns it.
///
/// All text fields are HTML-entity encoded; decoding happens at display time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuestion {
    #[serde(rename = "type")]
    pub kind: String,
    pub difficulty: String,
    pub category: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

/// Envelope of an Open Trivia DB `api.php` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaResponse {
    pub response_code: u8,
    pub results: Vec<RawQuestion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_open_trivia_payload() {
        let body = r#"{
            "response_code": 0,
            "results": [{
                "type": "multiple",
                "difficulty": "easy",
                "category": "Geography",
                "question": "What is the capital of France?",
                "correct_answer": "Paris",
                "incorrect_answers": ["Rome", "Berlin", "Madrid"]
            }]
        }"#;

        let parsed: TriviaResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.response_code, 0);
        assert_eq!(parsed.results.len(), 1);
        let raw = &parsed.results[0];
        assert_eq!(raw.kind, "multiple");
        assert_eq!(raw.correct_answer, "Paris");
        assert_eq!(raw.incorrect_answers, vec!["Rome", "Berlin", "Madrid"]);
    }

    #[test]
    fn rejects_payload_missing_answers() {
        let body = r#"{
            "response_code": 0,
            "results": [{
                "type": "boolean",
                "difficulty": "easy",
                "category": "Science",
                "question": "Water is wet.",
                "correct_answer": "True"
            }]
        }"#;

        assert!(serde_json::from_str::<TriviaResponse>(body).is_err());
    }
}
