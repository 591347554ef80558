//! Cyclic sequence decomposition of a stack.
//!
//! Treats the 52 positions as a cyclic group under addition of a step and
//! partitions them into disjoint cycles, one per residue class.

use crate::stack::{PlayingCardPosition, Stack, DECK_SIZE};

/// The cycles a stack decomposes into under a given step.
#[derive(Debug, Clone)]
pub struct CycleDecomposition {
    /// The normalized step, in [1, 52].
    pub step: u8,
    /// Number of disjoint cycles: gcd(52, step).
    pub cycle_count: usize,
    /// Length of each cycle: 52 / cycle_count.
    pub cycle_length: usize,
    /// Cycles in traversal order, one per residue class representative.
    pub cycles: Vec<Vec<PlayingCardPosition>>,
}

/// Decompose the stack's positions into cycles under `step`.
///
/// `step` is floored; non-positive and non-finite values default to 1;
/// values above 52 wrap back into [1, 52].
pub fn compute_sequences(stack: &Stack, step: f64) -> CycleDecomposition {
    let step = normalize_step(step);
    let cycle_count = gcd(DECK_SIZE, step as usize);
    let cycle_length = DECK_SIZE / cycle_count;

    let mut cycles = Vec::with_capacity(cycle_count);
    for start in 1..=cycle_count as u8 {
        let mut cycle = Vec::with_capacity(cycle_length);
        let mut index = start;
        for _ in 0..cycle_length {
            cycle.push(PlayingCardPosition {
                index,
                card: stack.card_at(index),
            });
            index = ((index as usize - 1 + step as usize) % DECK_SIZE) as u8 + 1;
        }
        cycles.push(cycle);
    }

    CycleDecomposition {
        step,
        cycle_count,
        cycle_length,
        cycles,
    }
}

fn normalize_step(step: f64) -> u8 {
    if !step.is_finite() || step < 1.0 {
        return 1;
    }
    ((step.floor() as u64 - 1) % DECK_SIZE as u64) as u8 + 1
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}
