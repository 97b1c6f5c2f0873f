//! Round state types.

use crate::card::{COMMUNITY_CARDS, Card};
use crate::deck::Deck;
use crate::result::Settlement;

/// Round state. Advances strictly in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundState {
    /// Waiting for cards to be dealt.
    Deal,
    /// Cards dealt; trades may be submitted.
    Trading,
    /// Trading closed; all cards are visible.
    Reveal,
    /// Balances updated. Terminal.
    Settle,
}

/// Data held by a round in each state.
#[derive(Debug, Clone)]
pub(super) enum Stage {
    Deal {
        deck: Deck,
    },
    Trading {
        community: [Card; COMMUNITY_CARDS],
        remaining: Deck,
    },
    Reveal {
        community: [Card; COMMUNITY_CARDS],
    },
    Settle {
        community: [Card; COMMUNITY_CARDS],
        settlement: Settlement,
    },
}

impl Stage {
    pub(super) const fn state(&self) -> RoundState {
        match self {
            Self::Deal { .. } => RoundState::Deal,
            Self::Trading { .. } => RoundState::Trading,
            Self::Reveal { .. } => RoundState::Reveal,
            Self::Settle { .. } => RoundState::Settle,
        }
    }
}
