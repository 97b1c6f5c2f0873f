//! Card type and deck constants.

/// A card carrying a single signed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    /// The value the card contributes at settlement.
    pub value: i32,
}

impl Card {
    /// Creates a new card.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self { value }
    }
}

/// Card values of a fresh deck, in canonical order.
pub const DECK_VALUES: [i32; DECK_SIZE] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 20, -10,
];

/// Number of cards in a fresh deck.
pub const DECK_SIZE: usize = 17;

/// Sum of every card value in a fresh deck.
pub const DECK_TOTAL: i64 = 130;

/// Number of community cards dealt each round.
pub const COMMUNITY_CARDS: usize = 3;
