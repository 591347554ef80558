//! Flashcard drill: name the card at a position (or the position of a card).

use super::{action_outcome, Countdown, GameAction};
use crate::models::AnswerOutcome;
use deck_engine::{random_card, unique_card_choices, PlayingCardPosition, StackKey};
use rand::seq::SliceRandom;

/// Answer choices offered per question.
pub const CHOICE_COUNT: usize = 4;

/// One flashcard question: a prompt position and a shuffled choice set that
/// contains the prompt among distinct decoys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardQuestion {
    /// The position/card being asked about.
    pub prompt: PlayingCardPosition,
    /// Candidate answers, shuffled.
    pub choices: Vec<PlayingCardPosition>,
}

impl FlashcardQuestion {
    fn generate(key: StackKey) -> Self {
        let stack = key.stack();
        let prompt = random_card(stack);
        let mut choices = unique_card_choices(stack, vec![prompt], CHOICE_COUNT)
            .expect("choice count never exceeds deck size");
        choices.shuffle(&mut rand::rng());
        Self { prompt, choices }
    }

    /// Whether the chosen position answers this question.
    pub fn is_correct(&self, answer: PlayingCardPosition) -> bool {
        answer.index == self.prompt.index
    }
}

/// Flashcard drill state.
#[derive(Debug, Clone)]
pub struct FlashcardGame {
    stack: StackKey,
    /// Current question.
    pub question: FlashcardQuestion,
    /// Correct answers this game.
    pub successes: u32,
    /// Incorrect answers this game.
    pub fails: u32,
    /// Countdown for the current question.
    pub timer: Countdown,
}

impl FlashcardGame {
    /// Fresh game against a stack.
    pub fn new(stack: StackKey, timer_duration_secs: u32) -> Self {
        Self {
            stack,
            question: FlashcardQuestion::generate(stack),
            successes: 0,
            fails: 0,
            timer: Countdown::new(timer_duration_secs),
        }
    }

    /// Stack this game runs against.
    pub fn stack(&self) -> StackKey {
        self.stack
    }

    /// Apply one action. Returns the outcome to report to the session, if
    /// the action produced one.
    pub fn apply(&mut self, action: GameAction) -> Option<AnswerOutcome> {
        match action {
            GameAction::CorrectAnswer => {
                self.successes += 1;
                self.advance();
            }
            // The question stays up for a retry; the clock keeps running.
            GameAction::WrongAnswer => self.fails += 1,
            GameAction::Timeout | GameAction::RevealAnswer => {
                self.fails += 1;
                self.advance();
            }
            GameAction::Tick => self.timer.tick(),
            GameAction::ResetTimer { duration_secs } => self.timer.reconfigure(duration_secs),
            GameAction::ResetGame {
                stack,
                timer_duration_secs,
            } => *self = Self::new(stack, timer_duration_secs),
        }
        action_outcome(action)
    }

    fn advance(&mut self) {
        self.question = FlashcardQuestion::generate(self.stack);
        self.timer.refill();
    }
}
