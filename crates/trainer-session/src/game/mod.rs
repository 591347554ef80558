//! Per-mode game reducers with score and timer bookkeeping.
//!
//! Reducers are driven by a closed action vocabulary and report answer
//! outcomes back to the session layer as values instead of performing side
//! effects themselves.

mod acaan;
mod flashcard;

pub use acaan::AcaanGame;
pub use flashcard::{FlashcardGame, FlashcardQuestion, CHOICE_COUNT};

use crate::models::AnswerOutcome;
use deck_engine::StackKey;

/// Actions driving a game reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// The player answered correctly.
    CorrectAnswer,
    /// The player answered incorrectly; the question stays up for a retry.
    WrongAnswer,
    /// The countdown ran out.
    Timeout,
    /// The player asked to see the answer.
    RevealAnswer,
    /// One second of countdown elapsed.
    Tick,
    /// The timer-duration setting changed mid-session.
    ResetTimer { duration_secs: u32 },
    /// The stack selection changed; start over.
    ResetGame {
        stack: StackKey,
        timer_duration_secs: u32,
    },
}

/// The outcome a reducer reports to the session layer for an action, if any.
pub(crate) fn action_outcome(action: GameAction) -> Option<AnswerOutcome> {
    match action {
        GameAction::CorrectAnswer => Some(AnswerOutcome {
            correct: true,
            question_advanced: true,
        }),
        GameAction::WrongAnswer => Some(AnswerOutcome {
            correct: false,
            question_advanced: false,
        }),
        GameAction::Timeout | GameAction::RevealAnswer => Some(AnswerOutcome {
            correct: false,
            question_advanced: true,
        }),
        GameAction::Tick | GameAction::ResetTimer { .. } | GameAction::ResetGame { .. } => None,
    }
}

/// Countdown timer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    /// Seconds left on the clock.
    pub remaining_secs: u32,
    /// Configured full duration.
    pub duration_secs: u32,
}

impl Countdown {
    /// Fresh countdown at full duration.
    pub fn new(duration_secs: u32) -> Self {
        Self {
            remaining_secs: duration_secs,
            duration_secs,
        }
    }

    /// One second elapses; the clock floors at zero.
    pub fn tick(&mut self) {
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
    }

    /// Refill to the configured duration.
    pub fn refill(&mut self) {
        self.remaining_secs = self.duration_secs;
    }

    /// Overwrite both remaining time and configured duration.
    pub fn reconfigure(&mut self, duration_secs: u32) {
        self.duration_secs = duration_secs;
        self.remaining_secs = duration_secs;
    }

    /// Whether time has run out.
    pub fn expired(&self) -> bool {
        self.remaining_secs == 0
    }
}
