use html_escape::decode_html_entities;

/// Decode HTML entities (`&quot;`, `&#039;`, `&amp;`, ...) the trivia API leaves in its text.
#[must_use]
pub fn decode_entities(raw: &str) -> String {
    decode_html_entities(raw).into_owned()
}
