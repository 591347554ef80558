//! Any Card At Any Number: cut-depth scenarios.

use crate::card::PlayingCard;
use crate::sampling::random_card;
use crate::stack::{Stack, DECK_SIZE};
use rand::Rng;

/// One ACAAN drill question: make `card` (at `card_position`) land at
/// `target_position`. The two positions are always distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcaanScenario {
    /// The named card.
    pub card: PlayingCard,
    /// Where the card currently sits, in [1, 52].
    pub card_position: u8,
    /// Where it must land, in [1, 52].
    pub target_position: u8,
}

impl AcaanScenario {
    /// Number of cards to cut from the top to solve this scenario.
    pub fn cut_depth(&self) -> u8 {
        cut_depth(self.card_position, self.target_position)
    }
}

/// Draw a uniformly random position in [1, 52], excluding one value.
pub fn random_target_position(exclude: u8) -> u8 {
    let mut rng = rand::rng();
    loop {
        let candidate = rng.random_range(1..=DECK_SIZE as u8);
        if candidate != exclude {
            return candidate;
        }
    }
}

/// Build a random scenario against the given stack.
pub fn generate_scenario(stack: &Stack) -> AcaanScenario {
    let position = random_card(stack);
    AcaanScenario {
        card: position.card,
        card_position: position.index,
        target_position: random_target_position(position.index),
    }
}

/// Cards to cut from the top so the card at `card_position` lands at
/// `target_position`. Result is in [0, 51]; 0 means no cut is needed.
pub fn cut_depth(card_position: u8, target_position: u8) -> u8 {
    (card_position as i16 - target_position as i16).rem_euclid(DECK_SIZE as i16) as u8
}
