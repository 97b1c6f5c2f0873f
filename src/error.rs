//! Error types for table and round operations.

use thiserror::Error;

/// Errors that can occur when drawing from a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    /// No cards left in the deck.
    #[error("no cards left in the deck")]
    Exhausted,
}

/// Errors that can occur during dealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// The round is not waiting to be dealt.
    #[error("round is not in the deal state")]
    InvalidTransition,
    /// Not enough cards for every player plus the community cards.
    #[error("not enough cards in the deck")]
    DeckExhausted,
}

impl From<DeckError> for DealError {
    fn from(err: DeckError) -> Self {
        match err {
            DeckError::Exhausted => Self::DeckExhausted,
        }
    }
}

/// Errors that can occur when closing the trading window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RevealError {
    /// The round is not trading.
    #[error("round is not in the trading state")]
    InvalidTransition,
}

/// Errors that can occur during settlement.
///
/// `trade` is the index of the offending trade in the submitted batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SettleError {
    /// Cards have not been revealed, or the round is already settled.
    #[error("round is not in the reveal state")]
    InvalidTransition,
    /// A trade references a player not seated at the table.
    #[error("trade {trade} references a player not seated at the table")]
    UnknownPlayer {
        /// Index of the trade.
        trade: usize,
    },
    /// A trade has a non-positive quantity, a bad price, or trades with itself.
    #[error("trade {trade} is invalid")]
    InvalidTrade {
        /// Index of the trade.
        trade: usize,
    },
}

/// Errors that can occur when validating a single trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TradeError {
    /// Buyer or seller is not seated at the table.
    #[error("player not seated at the table")]
    UnknownPlayer,
    /// Quantity is zero or negative.
    #[error("quantity must be positive")]
    InvalidQuantity,
    /// Price is negative, infinite, or NaN.
    #[error("price must be finite and non-negative")]
    InvalidPrice,
    /// Buyer and seller are the same player.
    #[error("player cannot trade with themselves")]
    SelfTrade,
}

/// Errors that can occur when seating or unseating players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// A player with this ID is already seated.
    #[error("player already seated")]
    DuplicatePlayer,
    /// Player not found.
    #[error("player not found")]
    PlayerNotFound,
}

/// Errors returned by the session registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No table with this ID.
    #[error("table not found")]
    TableNotFound,
    /// The table has no free seat.
    #[error("table is full")]
    TableFull,
    /// Too few players to start a round.
    #[error("not enough players to start a round")]
    NotEnoughPlayers,
    /// A round is already being played at this table.
    #[error("a round is in progress")]
    RoundInProgress,
    /// No round is being played at this table.
    #[error("no round in progress")]
    NoRoundInProgress,
    /// The trading window of the current round has closed.
    #[error("trading window is closed")]
    TradingClosed,
    /// Seating error.
    #[error(transparent)]
    Table(#[from] TableError),
    /// Trade rejected.
    #[error(transparent)]
    Trade(#[from] TradeError),
    /// Dealing failed.
    #[error(transparent)]
    Deal(#[from] DealError),
    /// Revealing failed.
    #[error(transparent)]
    Reveal(#[from] RevealError),
    /// Settlement failed.
    #[error(transparent)]
    Settle(#[from] SettleError),
}
