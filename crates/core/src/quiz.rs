//! Round state and its transitions.
//!
//! Every transition takes `&self` and returns a new snapshot, so a driver can hand
//! the previous snapshot to the renderer while computing the next one. Transitions
//! that need a side effect also return a [`QuizEffect`] describing it.

use crate::model::{AnswerId, Question};

/// Failure message for a load that returned no questions.
pub const EMPTY_BATCH_MESSAGE: &str = "no questions returned";

/// Why the last load did not produce a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    message: String,
}

impl LoadFailure {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizPhase {
    /// A load is in flight or scheduled; questions, if any, belong to the previous round.
    Loading,
    /// Questions are in play and selections may change.
    Ready,
    /// Selections are locked in and scored.
    Revealed,
    /// The last load failed; waiting for a retry.
    Failed(LoadFailure),
}

/// Side effect the driver must run after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizEffect {
    None,
    /// Fetch a new batch now.
    Load,
    /// Fetch a new batch after the restart delay.
    ScheduleRestart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizState {
    phase: QuizPhase,
    questions: Vec<Question>,
    score: u32,
    round: u64,
}

impl Default for QuizState {
    fn default() -> Self {
        Self::loading()
    }
}

impl QuizState {
    /// Initial state: nothing loaded yet, a load is expected.
    #[must_use]
    pub fn loading() -> Self {
        Self {
            phase: QuizPhase::Loading,
            questions: Vec::new(),
            score: 0,
            round: 0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Score of the current round. Only meaningful once revealed.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of rounds loaded so far; increases on every successful load.
    #[must_use]
    pub fn round(&self) -> u64 {
        self.round
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, QuizPhase::Loading)
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        matches!(self.phase, QuizPhase::Revealed)
    }

    #[must_use]
    pub fn failure(&self) -> Option<&LoadFailure> {
        match &self.phase {
            QuizPhase::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// True when there is at least one question and every question has a selection.
    #[must_use]
    pub fn all_answered(&self) -> bool {
        !self.questions.is_empty() && self.questions.iter().all(Question::is_answered)
    }

    /// Starts a fresh round from derived questions. Ignored unless loading.
    ///
    /// An empty batch cannot be played, so it is recorded as a failed load.
    #[must_use]
    pub fn on_loaded(&self, questions: Vec<Question>) -> Self {
        if !self.is_loading() {
            return self.clone();
        }
        if questions.is_empty() {
            return self.on_load_failed(LoadFailure::new(EMPTY_BATCH_MESSAGE));
        }
        Self {
            phase: QuizPhase::Ready,
            questions,
            score: 0,
            round: self.round + 1,
        }
    }

    /// Records a failed load. Ignored unless loading.
    #[must_use]
    pub fn on_load_failed(&self, failure: LoadFailure) -> Self {
        if !self.is_loading() {
            return self.clone();
        }
        Self {
            phase: QuizPhase::Failed(failure),
            questions: Vec::new(),
            score: 0,
            round: self.round,
        }
    }

    /// Selects `id` within its owning question and clears its siblings.
    ///
    /// Only effective while `Ready`; unknown ids are ignored.
    #[must_use]
    pub fn select(&self, id: AnswerId) -> Self {
        if self.phase != QuizPhase::Ready {
            return self.clone();
        }
        let Some(owner) = self.questions.iter().position(|q| q.owns(id)) else {
            return self.clone();
        };

        let mut next = self.clone();
        next.questions[owner].select(id);
        next
    }

    /// Reveals when every question is answered; restarts when already revealed.
    #[must_use]
    pub fn submit(&self) -> (Self, QuizEffect) {
        match self.phase {
            QuizPhase::Ready if self.all_answered() => {
                let mut next = self.clone();
                let mut score = 0;
                for question in &mut next.questions {
                    if question.settle() {
                        score += 1;
                    }
                }
                next.score = score;
                next.phase = QuizPhase::Revealed;
                (next, QuizEffect::None)
            }
            QuizPhase::Revealed => {
                let mut next = self.clone();
                next.phase = QuizPhase::Loading;
                (next, QuizEffect::ScheduleRestart)
            }
            _ => (self.clone(), QuizEffect::None),
        }
    }

    /// Leaves `Failed` by starting a new load. Ignored in every other phase.
    #[must_use]
    pub fn retry(&self) -> (Self, QuizEffect) {
        match self.phase {
            QuizPhase::Failed(_) => {
                let mut next = self.clone();
                next.phase = QuizPhase::Loading;
                (next, QuizEffect::Load)
            }
            _ => (self.clone(), QuizEffect::None),
        }
    }
}
