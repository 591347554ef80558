//! ACAAN drill: cut the deck so the named card lands at the target number.

use super::{action_outcome, Countdown, GameAction};
use crate::models::AnswerOutcome;
use deck_engine::{generate_scenario, AcaanScenario, StackKey};

/// ACAAN drill state.
#[derive(Debug, Clone)]
pub struct AcaanGame {
    stack: StackKey,
    /// Current scenario.
    pub scenario: AcaanScenario,
    /// Correct answers this game.
    pub successes: u32,
    /// Incorrect answers this game.
    pub fails: u32,
    /// Countdown for the current scenario.
    pub timer: Countdown,
}

impl AcaanGame {
    /// Fresh game against a stack.
    pub fn new(stack: StackKey, timer_duration_secs: u32) -> Self {
        Self {
            stack,
            scenario: generate_scenario(stack.stack()),
            successes: 0,
            fails: 0,
            timer: Countdown::new(timer_duration_secs),
        }
    }

    /// Stack this game runs against.
    pub fn stack(&self) -> StackKey {
        self.stack
    }

    /// The cut depth that solves the current scenario.
    pub fn expected_cut_depth(&self) -> u8 {
        self.scenario.cut_depth()
    }

    /// Whether a proposed cut depth solves the current scenario.
    pub fn is_correct(&self, answer: u8) -> bool {
        answer == self.expected_cut_depth()
    }

    /// Apply one action. Returns the outcome to report to the session, if
    /// the action produced one.
    pub fn apply(&mut self, action: GameAction) -> Option<AnswerOutcome> {
        match action {
            GameAction::CorrectAnswer => {
                self.successes += 1;
                self.advance();
            }
            // The scenario stays up for a retry; the clock keeps running.
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
        self.scenario = generate_scenario(self.stack.stack());
        self.timer.refill();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_engine::cut_depth;

    fn game() -> AcaanGame {
        AcaanGame::new(StackKey::Mnemonica, 45)
    }

    #[test]
    fn test_scenario_matches_stack() {
        for _ in 0..50 {
            let game = game();
            let stack = game.stack().stack();
            assert_eq!(stack.card_at(game.scenario.card_position), game.scenario.card);
            assert_ne!(game.scenario.card_position, game.scenario.target_position);
        }
    }

    #[test]
    fn test_expected_cut_depth_uses_the_formula() {
        let game = game();
        assert_eq!(
            game.expected_cut_depth(),
            cut_depth(game.scenario.card_position, game.scenario.target_position)
        );
        assert!(game.is_correct(game.expected_cut_depth()));
    }

    #[test]
    fn test_correct_answer_advances_scenario() {
        let mut game = game();
        game.apply(GameAction::Tick);

        let outcome = game.apply(GameAction::CorrectAnswer).unwrap();
        assert!(outcome.correct);
        assert_eq!(game.successes, 1);
        assert_eq!(game.timer.remaining_secs, 45);
    }

    #[test]
    fn test_wrong_answer_keeps_scenario() {
        let mut game = game();
        let scenario = game.scenario;

        let outcome = game.apply(GameAction::WrongAnswer).unwrap();
        assert!(!outcome.correct);
        assert!(!outcome.question_advanced);
        assert_eq!(game.scenario, scenario);
        assert_eq!(game.fails, 1);
    }

    #[test]
    fn test_reset_timer_mid_scenario() {
        let mut game = game();
        let scenario = game.scenario;
        game.apply(GameAction::ResetTimer { duration_secs: 20 });
        assert_eq!(game.timer.remaining_secs, 20);
        // Changing the timer setting does not change the question.
        assert_eq!(game.scenario, scenario);
    }
}
