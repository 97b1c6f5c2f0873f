use core::mem;

use crate::card::COMMUNITY_CARDS;
use crate::error::DealError;

use super::{Round, RoundState, Stage};

impl Round {
    /// Shuffles the deck and deals one hidden card per player, then the
    /// community cards.
    ///
    /// Players receive cards in seating order, each drawn from the end of the
    /// deck, followed by the community cards. Every player's position is reset
    /// to zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not in the deal state, or the deck
    /// cannot cover every player plus the community cards. The table is left
    /// untouched on error.
    pub fn deal(&mut self) -> Result<(), DealError> {
        let Stage::Deal { deck } = &mut self.stage else {
            return Err(DealError::InvalidTransition);
        };

        let cards_needed = self.table.len() + COMMUNITY_CARDS;
        if deck.len() < cards_needed {
            log::debug!(
                "cannot deal {cards_needed} cards from a deck of {}",
                deck.len()
            );
            return Err(DealError::DeckExhausted);
        }

        if self.shuffle {
            deck.shuffle(&mut self.rng);
        }

        for player in &mut self.table.players {
            player.card = Some(deck.pop()?);
            player.position = 0;
        }
        let community = [deck.pop()?, deck.pop()?, deck.pop()?];
        let remaining = mem::take(deck);

        self.stage = Stage::Trading {
            community,
            remaining,
        };
        log::debug!(
            "dealt {} players, round is {:?}",
            self.table.len(),
            RoundState::Trading
        );

        Ok(())
    }
}
