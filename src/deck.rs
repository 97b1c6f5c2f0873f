//! Deck generation, shuffling, and drawing.

use alloc::vec::Vec;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, DECK_VALUES};
use crate::error::DeckError;

/// An ordered stack of cards. Cards are drawn from the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Creates the fixed 17-card deck in canonical order.
    ///
    /// # Example
    ///
    /// ```
    /// use tradetable::{Deck, DECK_SIZE, DECK_TOTAL};
    ///
    /// let deck = Deck::generate();
    /// assert_eq!(deck.len(), DECK_SIZE);
    /// assert_eq!(deck.total(), DECK_TOTAL);
    /// ```
    #[must_use]
    pub fn generate() -> Self {
        Self::from_values(&DECK_VALUES)
    }

    /// Creates a deck from raw values. The last value is drawn first.
    #[must_use]
    pub fn from_values(values: &[i32]) -> Self {
        Self {
            cards: values.iter().copied().map(Card::new).collect(),
        }
    }

    /// Creates a deck from cards. The last card is drawn first.
    #[must_use]
    pub const fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Shuffles the deck in place.
    ///
    /// This is a Fisher-Yates shuffle: walking from the last index down, each
    /// position is swapped with a uniformly chosen index at or below it.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Removes and returns the last card.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Exhausted`] if the deck is empty.
    pub fn pop(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::Exhausted)
    }

    /// Returns the number of cards left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the deck is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the sum of the values of the remaining cards.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.cards.iter().map(|card| i64::from(card.value)).sum()
    }

    /// Returns the remaining cards, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
