//! Random card sampling over a stack.

use crate::stack::{PlayingCardPosition, Stack, DECK_SIZE};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::HashSet;
use thiserror::Error;

/// Errors from unique-card sampling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SamplingError {
    /// The caller asked for more unique cards than the deck holds.
    #[error("all {deck_size} cards in the deck have already been chosen")]
    Exhausted { deck_size: usize },
}

/// Random draws attempted before falling back to a scan of free positions.
const MAX_RANDOM_ATTEMPTS: usize = 16;

/// Draw a uniformly random position from the stack.
pub fn random_card(stack: &Stack) -> PlayingCardPosition {
    let index = rand::rng().random_range(1..=DECK_SIZE as u8);
    PlayingCardPosition {
        index,
        card: stack.card_at(index),
    }
}

/// Draw a random position not already present (by index) in `existing`.
///
/// A bounded number of rejection draws handles the common sparse case; once
/// those collide, the remaining free positions are collected and one is
/// picked uniformly, so the draw always terminates.
pub fn unique_random_card(
    stack: &Stack,
    existing: &[PlayingCardPosition],
) -> Result<PlayingCardPosition, SamplingError> {
    if existing.len() >= DECK_SIZE {
        return Err(SamplingError::Exhausted { deck_size: DECK_SIZE });
    }

    let taken: HashSet<u8> = existing.iter().map(|p| p.index).collect();
    let mut rng = rand::rng();

    for _ in 0..MAX_RANDOM_ATTEMPTS {
        let index = rng.random_range(1..=DECK_SIZE as u8);
        if !taken.contains(&index) {
            return Ok(PlayingCardPosition {
                index,
                card: stack.card_at(index),
            });
        }
    }

    let free: Vec<u8> = (1..=DECK_SIZE as u8).filter(|i| !taken.contains(i)).collect();
    let index = *free
        .choose(&mut rng)
        .ok_or(SamplingError::Exhausted { deck_size: DECK_SIZE })?;
    Ok(PlayingCardPosition {
        index,
        card: stack.card_at(index),
    })
}

/// Grow `initial` to `total` unique entries by repeated unique draws.
///
/// The initial choices are kept verbatim and in order. If `initial` already
/// holds at least `total` entries it is returned unchanged, even if longer.
pub fn unique_card_choices(
    stack: &Stack,
    initial: Vec<PlayingCardPosition>,
    total: usize,
) -> Result<Vec<PlayingCardPosition>, SamplingError> {
    if initial.len() >= total {
        return Ok(initial);
    }

    let mut choices = initial;
    while choices.len() < total {
        let next = unique_random_card(stack, &choices)?;
        choices.push(next);
    }
    Ok(choices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::StackKey;

    #[test]
    fn test_random_card_in_range() {
        let stack = StackKey::Mnemonica.stack();
        for _ in 0..100 {
            let pos = random_card(stack);
            assert!((1..=52).contains(&pos.index));
            assert_eq!(pos.card, stack.card_at(pos.index));
        }
    }

    #[test]
    fn test_unique_choices_fill_the_deck() {
        let stack = StackKey::Mnemonica.stack();
        let choices = unique_card_choices(stack, Vec::new(), DECK_SIZE).unwrap();
        assert_eq!(choices.len(), DECK_SIZE);

        let indices: HashSet<u8> = choices.iter().map(|p| p.index).collect();
        assert_eq!(indices.len(), DECK_SIZE);
    }

    #[test]
    fn test_exhausted_pool_errors() {
        let stack = StackKey::Mnemonica.stack();
        let full: Vec<PlayingCardPosition> = stack.positions().collect();

        let err = unique_random_card(stack, &full).unwrap_err();
        assert_eq!(err, SamplingError::Exhausted { deck_size: 52 });

        let err = unique_card_choices(stack, full, 53).unwrap_err();
        assert_eq!(err, SamplingError::Exhausted { deck_size: 52 });
    }

    #[test]
    fn test_initial_choices_kept_verbatim() {
        let stack = StackKey::SiStebbins.stack();
        let initial: Vec<PlayingCardPosition> = stack.positions().take(3).collect();

        let grown = unique_card_choices(stack, initial.clone(), 6).unwrap();
        assert_eq!(grown.len(), 6);
        assert_eq!(&grown[..3], &initial[..]);

        // Already long enough: returned unchanged, even when longer.
        let unchanged = unique_card_choices(stack, initial.clone(), 2).unwrap();
        assert_eq!(unchanged, initial);
    }
}
