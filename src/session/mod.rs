//! Table registry: seating, round lifecycle, and trade intake.
//!
//! The registry is the layer a lobby or HTTP service talks to. It owns a
//! [`TableStore`], applies the seating policy from [`TableOptions`], and
//! drives one [`Round`] at a time per table.

use core::mem;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::card::{COMMUNITY_CARDS, Card};
use crate::deck::Deck;
use crate::error::{SessionError, TableError};
use crate::options::TableOptions;
use crate::result::Settlement;
use crate::round::{Round, RoundState};
use crate::sync::Mutex;
use crate::table::{Player, Table};
use crate::trade::{Trade, TradeBook};

mod store;

pub use store::{MemoryStore, SharedSession, TableId, TableStore};

#[derive(Debug)]
enum Slot {
    Idle(Table),
    Playing(Box<Round>),
}

/// A table and whatever round is being played at it.
#[derive(Debug)]
pub struct TableSession {
    slot: Slot,
    book: TradeBook,
    leaving: Vec<String>,
    last_settlement: Option<Settlement>,
    rounds_played: u32,
    closed: bool,
}

impl TableSession {
    /// Creates an idle session around a table.
    #[must_use]
    pub const fn new(table: Table) -> Self {
        Self {
            slot: Slot::Idle(table),
            book: TradeBook::new(),
            leaving: Vec::new(),
            last_settlement: None,
            rounds_played: 0,
            closed: false,
        }
    }

    /// Returns the table.
    #[must_use]
    pub fn table(&self) -> &Table {
        match &self.slot {
            Slot::Idle(table) => table,
            Slot::Playing(round) => round.table(),
        }
    }

    /// Returns the state of the round in progress, if any.
    #[must_use]
    pub fn round_state(&self) -> Option<RoundState> {
        match &self.slot {
            Slot::Idle(_) => None,
            Slot::Playing(round) => Some(round.state()),
        }
    }

    /// Returns the round in progress, if any.
    #[must_use]
    pub fn round(&self) -> Option<&Round> {
        match &self.slot {
            Slot::Idle(_) => None,
            Slot::Playing(round) => Some(&**round),
        }
    }

    /// Returns the trades submitted in the current round.
    #[must_use]
    pub fn trades(&self) -> &[Trade] {
        self.book.trades()
    }

    /// Returns players who will leave once the current round settles.
    #[must_use]
    pub fn leaving(&self) -> &[String] {
        &self.leaving
    }

    /// Returns the settlement of the most recent round.
    #[must_use]
    pub const fn last_settlement(&self) -> Option<&Settlement> {
        self.last_settlement.as_ref()
    }

    /// Returns the number of rounds settled at this table.
    #[must_use]
    pub const fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    const fn is_playing(&self) -> bool {
        matches!(self.slot, Slot::Playing(_))
    }

    fn take_table(&mut self) -> Table {
        match mem::replace(&mut self.slot, Slot::Idle(Table::new())) {
            Slot::Idle(table) => table,
            Slot::Playing(round) => round.into_table(),
        }
    }
}

/// What happened when a player left a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Departure {
    /// The player was unseated.
    Left,
    /// A round is in progress; the player is unseated once it settles.
    Deferred,
    /// The player was the last one seated and the table was closed.
    TableClosed,
}

/// A player's balance for display.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Standing {
    /// The player ID.
    pub player_id: String,
    /// Current balance.
    pub balance: f64,
    /// Whether the player leaves after the current round.
    pub leaving: bool,
}

/// Listing entry for a table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableSummary {
    /// Table ID.
    pub id: TableId,
    /// Seated player IDs in seating order.
    pub players: Vec<String>,
    /// State of the round in progress, if any.
    pub state: Option<RoundState>,
    /// Rounds settled so far.
    pub rounds_played: u32,
}

/// Creates, seats, and runs tables held in a [`TableStore`].
///
/// # Example
///
/// ```
/// use tradetable::{MemoryStore, SessionRegistry, TableOptions, Trade};
///
/// let registry = SessionRegistry::new(MemoryStore::new(), TableOptions::default(), 7);
/// let id = registry.create_table(["alice", "bob"]).unwrap();
///
/// registry.start_round(id).unwrap();
/// registry.submit_trade(id, Trade::new("alice", "bob", 12.0, 1)).unwrap();
/// registry.close_trading(id).unwrap();
/// let settlement = registry.settle(id).unwrap();
/// assert_eq!(settlement.net_position_total(), 0);
/// ```
#[derive(Debug)]
pub struct SessionRegistry<S: TableStore = MemoryStore> {
    store: S,
    options: TableOptions,
    rng: Mutex<ChaCha8Rng>,
}

impl<S: TableStore> SessionRegistry<S> {
    /// Creates a registry. Round seeds are drawn from an RNG seeded with `seed`.
    #[must_use]
    pub fn new(store: S, options: TableOptions, seed: u64) -> Self {
        Self {
            store,
            options,
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Returns the table options.
    #[must_use]
    pub const fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Runs `f` on a table while holding its lock.
    ///
    /// A table closed by another caller while this one waited for the lock
    /// reports [`SessionError::TableNotFound`].
    fn with_session<T>(
        &self,
        id: TableId,
        f: impl FnOnce(&mut TableSession) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let shared = self.store.get(id).ok_or(SessionError::TableNotFound)?;
        let mut session = shared.lock();
        if session.closed {
            return Err(SessionError::TableNotFound);
        }
        f(&mut *session)
    }

    /// Marks a table closed and removes it from the store. The caller holds
    /// the table's lock.
    fn close(&self, id: TableId, session: &mut TableSession) {
        session.closed = true;
        self.store.remove(id);
        log::info!("table {id} closed");
    }

    /// Creates a table seating `players` in order with the starting balance.
    ///
    /// # Errors
    ///
    /// Returns an error if no players are given, there are more players than
    /// seats, or an ID appears twice.
    pub fn create_table<I, P>(&self, players: I) -> Result<TableId, SessionError>
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let table = Table::with_players(players, self.options.starting_balance)?;
        if table.is_empty() {
            return Err(SessionError::NotEnoughPlayers);
        }
        if table.len() > self.options.max_players {
            return Err(SessionError::TableFull);
        }

        let seated = table.len();
        let id = self.store.insert(TableSession::new(table));
        log::info!("table {id} created with {seated} players");
        Ok(id)
    }

    /// Seats a player at an idle table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table does not exist, a round is in progress,
    /// the table is full, or the player is already seated.
    pub fn join(&self, id: TableId, player_id: &str) -> Result<(), SessionError> {
        self.with_session(id, |session| {
            let Slot::Idle(table) = &mut session.slot else {
                return Err(SessionError::RoundInProgress);
            };
            if table.len() >= self.options.max_players {
                return Err(SessionError::TableFull);
            }
            table.seat(Player::new(player_id, self.options.starting_balance))?;
            log::info!("{player_id} joined table {id}");
            Ok(())
        })
    }

    /// Removes a player from a table.
    ///
    /// During a round the player keeps their seat until the round settles:
    /// their card and trades settle like everyone else's. A table left empty
    /// is closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the table does not exist or the player is not
    /// seated.
    pub fn leave(&self, id: TableId, player_id: &str) -> Result<Departure, SessionError> {
        self.with_session(id, |session| {
            if session.is_playing() {
                if !session.table().contains(player_id) {
                    return Err(TableError::PlayerNotFound.into());
                }
                if !session.leaving.iter().any(|leaving| leaving == player_id) {
                    session.leaving.push(player_id.into());
                }
                log::info!("{player_id} leaves table {id} after the current round");
                return Ok(Departure::Deferred);
            }

            let Slot::Idle(table) = &mut session.slot else {
                return Err(SessionError::RoundInProgress);
            };
            table.unseat(player_id)?;
            log::info!("{player_id} left table {id}");

            if table.is_empty() {
                self.close(id, session);
                return Ok(Departure::TableClosed);
            }
            Ok(Departure::Left)
        })
    }

    /// Lists every table.
    #[must_use]
    pub fn list(&self) -> Vec<TableSummary> {
        self.store
            .ids()
            .into_iter()
            .filter_map(|id| {
                self.with_session(id, |session| {
                    Ok(TableSummary {
                        id,
                        players: session.table().ids().map(String::from).collect(),
                        state: session.round_state(),
                        rounds_played: session.rounds_played,
                    })
                })
                .ok()
            })
            .collect()
    }

    /// Starts a round with a fresh deck and deals it.
    ///
    /// # Errors
    ///
    /// Returns an error if the table does not exist, a round is already in
    /// progress, too few players are seated, or dealing fails.
    pub fn start_round(&self, id: TableId) -> Result<(), SessionError> {
        self.with_session(id, |session| {
            if session.is_playing() {
                return Err(SessionError::RoundInProgress);
            }
            if session.table().len() < self.options.min_players {
                return Err(SessionError::NotEnoughPlayers);
            }

            let seed = self.rng.lock().next_u64();
            let mut table = session.take_table();
            table.clear_round();
            let mut round = Round::new(table, Deck::generate(), self.options.round, seed);
            if let Err(err) = round.deal() {
                session.slot = Slot::Idle(round.into_table());
                return Err(err.into());
            }

            session.book.clear();
            session.slot = Slot::Playing(Box::new(round));
            log::info!("table {id} started round {}", session.rounds_played + 1);
            Ok(())
        })
    }

    /// Records a trade during the trading window.
    ///
    /// # Errors
    ///
    /// Returns an error if the table does not exist, no round is in progress,
    /// trading has closed, or the trade is invalid for this table.
    pub fn submit_trade(&self, id: TableId, trade: Trade) -> Result<(), SessionError> {
        self.with_session(id, |session| {
            let Slot::Playing(round) = &session.slot else {
                return Err(SessionError::NoRoundInProgress);
            };
            if round.state() != RoundState::Trading {
                return Err(SessionError::TradingClosed);
            }
            session.book.submit(round.table(), trade)?;
            Ok(())
        })
    }

    /// Closes the trading window and reveals the community cards.
    ///
    /// # Errors
    ///
    /// Returns an error if the table does not exist, no round is in progress,
    /// or the round is not trading.
    pub fn close_trading(&self, id: TableId) -> Result<[Card; COMMUNITY_CARDS], SessionError> {
        self.with_session(id, |session| {
            let Slot::Playing(round) = &mut session.slot else {
                return Err(SessionError::NoRoundInProgress);
            };
            let community = round.reveal()?;
            log::info!("table {id} closed trading");
            Ok(community)
        })
    }

    /// Settles the round against the recorded trades, then unseats players
    /// who asked to leave.
    ///
    /// # Errors
    ///
    /// Returns an error if the table does not exist, no round is in progress,
    /// or settlement fails. A failed settlement changes no balance.
    pub fn settle(&self, id: TableId) -> Result<Settlement, SessionError> {
        self.with_session(id, |session| {
            let Slot::Playing(round) = &mut session.slot else {
                return Err(SessionError::NoRoundInProgress);
            };
            let settlement = round.settle(session.book.trades())?;

            let mut table = session.take_table();
            for player_id in session.leaving.drain(..) {
                if table.unseat(&player_id).is_ok() {
                    log::info!("{player_id} left table {id}");
                }
            }
            let empty = table.is_empty();
            session.slot = Slot::Idle(table);
            session.book.clear();
            session.rounds_played += 1;
            session.last_settlement = Some(settlement.clone());
            log::info!(
                "table {id} settled round {} with {} trades",
                session.rounds_played,
                settlement.trade_count
            );

            if empty {
                self.close(id, session);
            }
            Ok(settlement)
        })
    }

    /// Returns balances ordered from highest to lowest.
    ///
    /// # Errors
    ///
    /// Returns an error if the table does not exist.
    pub fn standings(&self, id: TableId) -> Result<Vec<Standing>, SessionError> {
        self.with_session(id, |session| {
            let mut standings: Vec<Standing> = session
                .table()
                .players
                .iter()
                .map(|player| Standing {
                    player_id: player.id.clone(),
                    balance: player.balance,
                    leaving: session.leaving.contains(&player.id),
                })
                .collect();
            standings.sort_by(|a, b| b.balance.total_cmp(&a.balance));
            Ok(standings)
        })
    }

    /// Returns the state of the round in progress, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the table does not exist.
    pub fn round_state(&self, id: TableId) -> Result<Option<RoundState>, SessionError> {
        self.with_session(id, |session| Ok(session.round_state()))
    }

    /// Returns a player's own hidden card for the round in progress.
    ///
    /// # Errors
    ///
    /// Returns an error if the table does not exist or no round is in
    /// progress.
    pub fn hole_card(&self, id: TableId, player_id: &str) -> Result<Option<Card>, SessionError> {
        self.with_session(id, |session| {
            let round = session.round().ok_or(SessionError::NoRoundInProgress)?;
            Ok(round.hole_card(player_id))
        })
    }

    /// Closes a table, discarding any round in progress.
    ///
    /// Returns the table with balances as of the last settlement.
    ///
    /// # Errors
    ///
    /// Returns an error if the table does not exist.
    pub fn close_table(&self, id: TableId) -> Result<Table, SessionError> {
        self.with_session(id, |session| {
            let mut table = session.take_table();
            table.clear_round();
            self.close(id, session);
            Ok(table)
        })
    }
}
