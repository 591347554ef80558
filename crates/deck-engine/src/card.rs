//! Playing card value types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Card suit, in CHaSeD order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suit {
    Clubs,
    Hearts,
    Spades,
    Diamonds,
}

impl Suit {
    /// All suits in CHaSeD order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Hearts, Suit::Spades, Suit::Diamonds];

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Clubs => "Clubs",
            Self::Hearts => "Hearts",
            Self::Spades => "Spades",
            Self::Diamonds => "Diamonds",
        }
    }

    /// Single-letter abbreviation.
    pub fn letter(&self) -> char {
        match self {
            Self::Clubs => 'C',
            Self::Hearts => 'H',
            Self::Spades => 'S',
            Self::Diamonds => 'D',
        }
    }

    /// Unicode suit symbol.
    pub fn symbol(&self) -> char {
        match self {
            Self::Clubs => '♣',
            Self::Hearts => '♥',
            Self::Spades => '♠',
            Self::Diamonds => '♦',
        }
    }

    /// The next suit in CHaSeD rotation, wrapping around.
    pub fn next(&self) -> Suit {
        match self {
            Self::Clubs => Self::Hearts,
            Self::Hearts => Self::Spades,
            Self::Spades => Self::Diamonds,
            Self::Diamonds => Self::Clubs,
        }
    }
}

/// Card rank, ace low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// All ranks, ace through king.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Numeric value, ace = 1 through king = 13.
    pub fn value(&self) -> u8 {
        *self as u8 + 1
    }

    /// Look up a rank by its numeric value in [1, 13].
    pub fn from_value(value: u8) -> Option<Rank> {
        match value {
            1..=13 => Some(Self::ALL[(value - 1) as usize]),
            _ => None,
        }
    }

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ace => "Ace",
            Self::Two => "Two",
            Self::Three => "Three",
            Self::Four => "Four",
            Self::Five => "Five",
            Self::Six => "Six",
            Self::Seven => "Seven",
            Self::Eight => "Eight",
            Self::Nine => "Nine",
            Self::Ten => "Ten",
            Self::Jack => "Jack",
            Self::Queen => "Queen",
            Self::King => "King",
        }
    }

    /// Short symbol ("A", "2", ... "10", "J", "Q", "K").
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Ace => "A",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
        }
    }
}

/// A playing card. Equality is by suit and rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayingCard {
    /// Card rank.
    pub rank: Rank,
    /// Card suit.
    pub suit: Suit,
}

impl PlayingCard {
    /// Create a card.
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Full display name, e.g. "Ace of Spades".
    pub fn name(&self) -> String {
        format!("{} of {}", self.rank.name(), self.suit.name())
    }
}

impl fmt::Display for PlayingCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_by_value() {
        let a = PlayingCard::new(Rank::Ace, Suit::Spades);
        let b = PlayingCard::new(Rank::Ace, Suit::Spades);
        assert_eq!(a, b);
        assert_ne!(a, PlayingCard::new(Rank::Ace, Suit::Hearts));
    }

    #[test]
    fn test_rank_values() {
        assert_eq!(Rank::Ace.value(), 1);
        assert_eq!(Rank::King.value(), 13);
        assert_eq!(Rank::from_value(10), Some(Rank::Ten));
        assert_eq!(Rank::from_value(0), None);
        assert_eq!(Rank::from_value(14), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(PlayingCard::new(Rank::Ten, Suit::Hearts).to_string(), "10H");
        assert_eq!(PlayingCard::new(Rank::Queen, Suit::Clubs).to_string(), "QC");
        assert_eq!(
            PlayingCard::new(Rank::Four, Suit::Diamonds).name(),
            "Four of Diamonds"
        );
    }

    #[test]
    fn test_suit_rotation() {
        assert_eq!(Suit::Clubs.next(), Suit::Hearts);
        assert_eq!(Suit::Diamonds.next(), Suit::Clubs);
    }
}
