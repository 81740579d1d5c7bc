use crate::model::ids::AnswerId;

/// One selectable answer of a [`Question`](crate::model::Question).
///
/// `is_correct` is fixed at creation. `win` stays `None` until the round is
/// revealed, and is only ever set on the selected answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    id: AnswerId,
    text: String,
    is_correct: bool,
    is_selected: bool,
    win: Option<bool>,
}

impl Answer {
    #[must_use]
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            id: AnswerId::generate(),
            text: text.into(),
            is_correct,
            is_selected: false,
            win: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> AnswerId {
        self.id
    }

    /// Raw (entity-encoded) answer text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    #[must_use]
    pub fn win(&self) -> Option<bool> {
        self.win
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.is_selected = selected;
    }

    /// Locks in the outcome for a selected answer. Unselected answers keep `win` unset.
    pub(crate) fn settle(&mut self) {
        if self.is_selected {
            self.win = Some(self.is_correct);
        }
    }
}
