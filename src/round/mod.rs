//! Round engine: deal, trade, reveal, settle.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::card::{COMMUNITY_CARDS, Card};
use crate::deck::Deck;
use crate::error::RevealError;
use crate::options::RoundOptions;
use crate::result::Settlement;
use crate::table::Table;

mod deal;
mod settle;
pub mod state;

pub use state::RoundState;
use state::Stage;

/// A single round played at a table.
///
/// The round owns its table for its whole lifetime and hands it back through
/// [`Round::into_table`], so balances carry into the next round. Each round
/// is driven exactly once through [`deal`](Round::deal),
/// [`reveal`](Round::reveal) and [`settle`](Round::settle); calls out of
/// order fail without changing anything.
#[derive(Debug, Clone)]
pub struct Round {
    table: Table,
    house_fee_rate: f64,
    shuffle: bool,
    stage: Stage,
    rng: ChaCha8Rng,
}

impl Round {
    /// Creates a round in the [`RoundState::Deal`] state.
    ///
    /// The caller is expected to have seated at least two players and to
    /// supply a deck holding at least one card per player plus the community
    /// cards; a short deck is reported by [`Round::deal`].
    ///
    /// # Example
    ///
    /// ```
    /// use tradetable::{Deck, Round, RoundOptions, RoundState, Table};
    ///
    /// let table = Table::with_players(["alice", "bob"], 0.0).unwrap();
    /// let round = Round::new(table, Deck::generate(), RoundOptions::default(), 42);
    /// assert_eq!(round.state(), RoundState::Deal);
    /// ```
    #[must_use]
    pub fn new(table: Table, deck: Deck, options: RoundOptions, seed: u64) -> Self {
        Self {
            table,
            house_fee_rate: options.effective_fee_rate(),
            shuffle: options.shuffle,
            stage: Stage::Deal { deck },
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> RoundState {
        self.stage.state()
    }

    /// Returns the house fee rate, fixed for the life of the round.
    #[must_use]
    pub const fn house_fee_rate(&self) -> f64 {
        self.house_fee_rate
    }

    /// Returns the table.
    #[must_use]
    pub const fn table(&self) -> &Table {
        &self.table
    }

    /// Consumes the round and returns its table.
    #[must_use]
    pub fn into_table(self) -> Table {
        self.table
    }

    /// Returns the number of cards left in the deck.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        match &self.stage {
            Stage::Deal { deck } => deck.len(),
            Stage::Trading { remaining, .. } => remaining.len(),
            Stage::Reveal { .. } | Stage::Settle { .. } => 0,
        }
    }

    /// Returns the hidden card dealt to a player.
    ///
    /// This is the player's own view: available from dealing onwards.
    #[must_use]
    pub fn hole_card(&self, player_id: &str) -> Option<Card> {
        if self.state() == RoundState::Deal {
            return None;
        }
        self.table.player(player_id).and_then(|player| player.card)
    }

    /// Returns the community cards once they are revealed.
    #[must_use]
    pub fn community(&self) -> Option<&[Card]> {
        match &self.stage {
            Stage::Reveal { community } | Stage::Settle { community, .. } => Some(community),
            Stage::Deal { .. } | Stage::Trading { .. } => None,
        }
    }

    /// Returns the settlement once the round is settled.
    #[must_use]
    pub const fn settlement(&self) -> Option<&Settlement> {
        match &self.stage {
            Stage::Settle { settlement, .. } => Some(settlement),
            _ => None,
        }
    }

    /// Closes trading and reveals every card.
    ///
    /// Returns the community cards. The deck left over after dealing is
    /// discarded.
    ///
    /// # Errors
    ///
    /// Returns [`RevealError::InvalidTransition`] unless the round is trading.
    pub fn reveal(&mut self) -> Result<[Card; COMMUNITY_CARDS], RevealError> {
        let Stage::Trading { community, .. } = self.stage else {
            return Err(RevealError::InvalidTransition);
        };
        self.stage = Stage::Reveal { community };
        log::debug!("trading closed, community cards revealed");
        Ok(community)
    }
}
