//! A card trading table engine with optional `no_std` support.
//!
//! Each player at a table is dealt one hidden card, and three community cards
//! are dealt face down. Players trade units with each other while the trading
//! window is open. Once trading closes the cards are revealed and every
//! player is settled at card value plus community total plus net position,
//! less a house fee on traded notional.
//!
//! The crate provides a [`Round`] type that runs one round through
//! deal, trading, reveal, and settlement, and a [`SessionRegistry`] that
//! seats players at tables and runs rounds back to back.
//!
//! # Example
//!
//! ```
//! use tradetable::{Deck, Round, RoundOptions, RoundState, Table, Trade};
//!
//! let table = Table::with_players(["alice", "bob"], 100.0).unwrap();
//! let mut round = Round::new(table, Deck::generate(), RoundOptions::default(), 42);
//!
//! round.deal().unwrap();
//! round.reveal().unwrap();
//! let settlement = round.settle(&[Trade::new("alice", "bob", 9.5, 3)]).unwrap();
//!
//! assert_eq!(round.state(), RoundState::Settle);
//! assert_eq!(settlement.net_position_total(), 0);
//! let table = round.into_table();
//! assert_eq!(table.len(), 2);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod deck;
pub mod error;
pub mod options;
pub mod result;
pub mod round;
pub mod session;
pub mod sync;
pub mod table;
pub mod trade;

// Re-export main types
pub use card::{COMMUNITY_CARDS, Card, DECK_SIZE, DECK_TOTAL, DECK_VALUES};
pub use deck::Deck;
pub use error::{
    DealError, DeckError, RevealError, SessionError, SettleError, TableError, TradeError,
};
pub use options::{DEFAULT_HOUSE_FEE_RATE, RoundOptions, TableOptions};
pub use result::{PlayerSettlement, Settlement};
pub use round::{Round, RoundState};
pub use session::{
    Departure, MemoryStore, SessionRegistry, Standing, TableId, TableSession, TableStore,
    TableSummary,
};
pub use table::{Player, Table};
pub use trade::{Trade, TradeBook};
