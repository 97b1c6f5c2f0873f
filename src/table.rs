//! Seated players and the pot.

use alloc::string::String;
use alloc::vec::Vec;

use crate::card::Card;
use crate::error::TableError;

/// A player seated at a table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    /// Player ID, unique within the table.
    pub id: String,
    /// The hidden card dealt this round.
    pub card: Option<Card>,
    /// Balance carried across rounds.
    pub balance: f64,
    /// Net quantity bought minus sold in the last settled round.
    pub position: i64,
}

impl Player {
    /// Creates a player with no card and a zero position.
    #[must_use]
    pub fn new(id: impl Into<String>, balance: f64) -> Self {
        Self {
            id: id.into(),
            card: None,
            balance,
            position: 0,
        }
    }
}

/// Players in seating order plus the pot.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    /// Seated players. Insertion order is seating order.
    pub players: Vec<Player>,
    /// Fees collected by the house.
    pub pot: f64,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            players: Vec::new(),
            pot: 0.0,
        }
    }

    /// Creates a table seating `ids` in order, each with `balance`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DuplicatePlayer`] if an ID appears twice.
    ///
    /// # Example
    ///
    /// ```
    /// use tradetable::Table;
    ///
    /// let table = Table::with_players(["alice", "bob"], 100.0).unwrap();
    /// assert_eq!(table.len(), 2);
    /// ```
    pub fn with_players<I, S>(ids: I, balance: f64) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for id in ids {
            table.seat(Player::new(id, balance))?;
        }
        Ok(table)
    }

    /// Seats a player at the end of the seating order.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DuplicatePlayer`] if the ID is already seated.
    pub fn seat(&mut self, player: Player) -> Result<(), TableError> {
        if self.contains(&player.id) {
            return Err(TableError::DuplicatePlayer);
        }
        self.players.push(player);
        Ok(())
    }

    /// Removes a player, keeping the seating order of the rest.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::PlayerNotFound`] if the ID is not seated.
    pub fn unseat(&mut self, id: &str) -> Result<Player, TableError> {
        let seat = self.seat_of(id).ok_or(TableError::PlayerNotFound)?;
        Ok(self.players.remove(seat))
    }

    /// Returns the seat index of a player.
    #[must_use]
    pub fn seat_of(&self, id: &str) -> Option<usize> {
        self.players.iter().position(|player| player.id == id)
    }

    /// Returns whether a player is seated.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.seat_of(id).is_some()
    }

    /// Returns a seated player.
    #[must_use]
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    /// Returns the balance of a seated player.
    #[must_use]
    pub fn balance(&self, id: &str) -> Option<f64> {
        self.player(id).map(|player| player.balance)
    }

    /// Returns player IDs in seating order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(|player| player.id.as_str())
    }

    /// Returns the number of seated players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns whether nobody is seated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Clears every player's card and position, keeping balances.
    pub fn clear_round(&mut self) {
        for player in &mut self.players {
            player.card = None;
            player.position = 0;
        }
    }
}
