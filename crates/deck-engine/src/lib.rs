//! # deck-engine
//!
//! Deck and scenario primitives for memorized-stack training.
//!
//! ## Features
//!
//! - Named memorized stacks (new deck order, Mnemonica, Si Stebbins)
//! - Uniform and unique-constrained random card sampling
//! - ACAAN cut-depth scenarios and the cut-depth formula
//! - Faro shuffle simulation
//! - Cyclic sequence decomposition

mod acaan;
mod card;
mod faro;
mod sampling;
mod sequences;
mod stack;

pub use acaan::{cut_depth, generate_scenario, random_target_position, AcaanScenario};
pub use card::{PlayingCard, Rank, Suit};
pub use faro::{faro_shuffle, FaroKind};
pub use sampling::{random_card, unique_card_choices, unique_random_card, SamplingError};
pub use sequences::{compute_sequences, CycleDecomposition};
pub use stack::{PlayingCardPosition, Stack, StackKey, DECK_SIZE};
