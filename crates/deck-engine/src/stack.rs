//! Memorized stacks: fixed orderings of the 52-card deck.

use crate::card::{PlayingCard, Rank, Suit};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// A 1-based deck position paired with the card occupying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayingCardPosition {
    /// Position in the stack, in [1, 52].
    pub index: u8,
    /// Card at that position.
    pub card: PlayingCard,
}

/// Identifier for a named memorized stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackKey {
    /// USPCC new-deck order.
    NewDeckOrder,
    /// Juan Tamariz's Mnemonica.
    Mnemonica,
    /// Si Stebbins arithmetic stack (CHaSeD, +3).
    SiStebbins,
}

impl StackKey {
    /// All known stacks.
    pub const ALL: [StackKey; 3] = [StackKey::NewDeckOrder, StackKey::Mnemonica, StackKey::SiStebbins];

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NewDeckOrder => "New Deck Order",
            Self::Mnemonica => "Mnemonica",
            Self::SiStebbins => "Si Stebbins",
        }
    }

    /// Stable identifier used in persisted keys.
    pub fn id(&self) -> &'static str {
        match self {
            Self::NewDeckOrder => "new_deck_order",
            Self::Mnemonica => "mnemonica",
            Self::SiStebbins => "si_stebbins",
        }
    }

    /// The full 52-card ordering for this stack.
    pub fn stack(&self) -> &'static Stack {
        match self {
            Self::NewDeckOrder => &NEW_DECK_ORDER,
            Self::Mnemonica => &MNEMONICA,
            Self::SiStebbins => &SI_STEBBINS,
        }
    }
}

impl fmt::Display for StackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for StackKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter().copied().find(|k| k.id() == s).ok_or(())
    }
}

/// A fixed ordering of all 52 cards, addressed 1-based.
#[derive(Debug, Clone)]
pub struct Stack {
    key: StackKey,
    cards: [PlayingCard; DECK_SIZE],
}

impl Stack {
    /// Which named stack this is.
    pub fn key(&self) -> StackKey {
        self.key
    }

    /// All cards in stack order, top first.
    pub fn cards(&self) -> &[PlayingCard; DECK_SIZE] {
        &self.cards
    }

    /// Card at a 1-based position. `index` must be in [1, 52].
    pub fn card_at(&self, index: u8) -> PlayingCard {
        self.cards[(index - 1) as usize]
    }

    /// 1-based position of a card in this stack.
    pub fn position_of(&self, card: PlayingCard) -> u8 {
        self.cards
            .iter()
            .position(|c| *c == card)
            .map(|i| i as u8 + 1)
            .expect("a full stack holds every card")
    }

    /// Iterate (position, card) pairs in stack order.
    pub fn positions(&self) -> impl Iterator<Item = PlayingCardPosition> + '_ {
        self.cards.iter().enumerate().map(|(i, card)| PlayingCardPosition {
            index: i as u8 + 1,
            card: *card,
        })
    }
}

static NEW_DECK_ORDER: LazyLock<Stack> = LazyLock::new(new_deck_order);
static MNEMONICA: LazyLock<Stack> = LazyLock::new(mnemonica);
static SI_STEBBINS: LazyLock<Stack> = LazyLock::new(si_stebbins);

/// USPCC new-deck order: spades and diamonds ace to king, then clubs and
/// hearts king back to ace.
fn new_deck_order() -> Stack {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    for rank in Rank::ALL {
        cards.push(PlayingCard::new(rank, Suit::Spades));
    }
    for rank in Rank::ALL {
        cards.push(PlayingCard::new(rank, Suit::Diamonds));
    }
    for rank in Rank::ALL.iter().rev() {
        cards.push(PlayingCard::new(*rank, Suit::Clubs));
    }
    for rank in Rank::ALL.iter().rev() {
        cards.push(PlayingCard::new(*rank, Suit::Hearts));
    }
    Stack {
        key: StackKey::NewDeckOrder,
        cards: to_array(cards),
    }
}

/// Si Stebbins: each card is three values above the previous, suits cycling
/// in CHaSeD order, starting from the ace of clubs.
fn si_stebbins() -> Stack {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    let mut value = 1u8;
    let mut suit = Suit::Clubs;
    for _ in 0..DECK_SIZE {
        let rank = Rank::from_value(value).unwrap();
        cards.push(PlayingCard::new(rank, suit));
        value = (value + 3 - 1) % 13 + 1;
        suit = suit.next();
    }
    Stack {
        key: StackKey::SiStebbins,
        cards: to_array(cards),
    }
}

/// Tamariz's Mnemonica order.
fn mnemonica() -> Stack {
    use Rank::*;
    use Suit::{Clubs as C, Diamonds as D, Hearts as H, Spades as S};

    let c = PlayingCard::new;
    let cards = [
        c(Four, C), c(Two, H), c(Seven, D), c(Three, C), c(Four, H), c(Six, D),
        c(Ace, S), c(Five, H), c(Nine, S), c(Two, S), c(Queen, H), c(Three, D),
        c(Queen, C), c(Eight, H), c(Six, S), c(Five, S), c(Nine, H), c(King, C),
        c(Two, D), c(Jack, H), c(Three, S), c(Eight, S), c(Six, H), c(Ten, C),
        c(Five, D), c(King, D), c(Two, C), c(Three, H), c(Eight, D), c(Five, C),
        c(King, S), c(Jack, D), c(Eight, C), c(Ten, S), c(King, H), c(Jack, C),
        c(Seven, S), c(Ten, H), c(Ace, D), c(Four, S), c(Seven, H), c(Four, D),
        c(Ace, C), c(Nine, C), c(Jack, S), c(Queen, D), c(Seven, C), c(Queen, S),
        c(Ten, D), c(Six, C), c(Ace, H), c(Nine, D),
    ];
    Stack {
        key: StackKey::Mnemonica,
        cards,
    }
}

fn to_array(cards: Vec<PlayingCard>) -> [PlayingCard; DECK_SIZE] {
    cards.try_into().unwrap_or_else(|v: Vec<_>| {
        panic!("stack built with {} cards, expected {}", v.len(), DECK_SIZE)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_stacks_have_52_distinct_cards() {
        for key in StackKey::ALL {
            let stack = key.stack();
            let unique: HashSet<PlayingCard> = stack.cards().iter().copied().collect();
            assert_eq!(unique.len(), DECK_SIZE, "{} has duplicates", key);
        }
    }

    #[test]
    fn test_card_at_position_of_round_trip() {
        for key in StackKey::ALL {
            let stack = key.stack();
            for index in 1..=DECK_SIZE as u8 {
                let card = stack.card_at(index);
                assert_eq!(stack.position_of(card), index);
            }
        }
    }

    #[test]
    fn test_mnemonica_landmarks() {
        let stack = StackKey::Mnemonica.stack();
        assert_eq!(stack.card_at(1), PlayingCard::new(Rank::Four, Suit::Clubs));
        assert_eq!(stack.card_at(26), PlayingCard::new(Rank::King, Suit::Diamonds));
        assert_eq!(stack.card_at(52), PlayingCard::new(Rank::Nine, Suit::Diamonds));
    }

    #[test]
    fn test_si_stebbins_steps_by_three() {
        let stack = StackKey::SiStebbins.stack();
        for index in 1..DECK_SIZE as u8 {
            let here = stack.card_at(index);
            let next = stack.card_at(index + 1);
            assert_eq!(next.rank.value(), (here.rank.value() + 3 - 1) % 13 + 1);
            assert_eq!(next.suit, here.suit.next());
        }
    }

    #[test]
    fn test_stack_key_round_trip() {
        for key in StackKey::ALL {
            assert_eq!(key.id().parse::<StackKey>(), Ok(key));
        }
        assert!("faro_order".parse::<StackKey>().is_err());
    }

    #[test]
    fn test_positions_iterator() {
        let stack = StackKey::NewDeckOrder.stack();
        let positions: Vec<_> = stack.positions().collect();
        assert_eq!(positions.len(), DECK_SIZE);
        assert_eq!(positions[0].index, 1);
        assert_eq!(positions[0].card, PlayingCard::new(Rank::Ace, Suit::Spades));
        assert_eq!(positions[51].index, 52);
    }
}
