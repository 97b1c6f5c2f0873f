//! Settlement report.

use alloc::string::String;
use alloc::vec::Vec;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

/// Settlement of a single player.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSettlement {
    /// The player ID.
    pub player_id: String,
    /// Value of the player's hidden card (0 if none was dealt).
    pub card_value: i32,
    /// Units bought minus units sold.
    pub net_position: i64,
    /// Sum of `price * quantity` over every trade the player was part of.
    pub trade_volume: f64,
    /// House fees charged.
    pub fees: f64,
    /// Card value plus community total plus net position.
    pub final_value: f64,
    /// Change applied to the balance: `final_value - fees`.
    pub delta: f64,
    /// Balance after settlement.
    pub balance: f64,
}

/// Result of settling a round.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settlement {
    /// Per-player results in seating order.
    pub players: Vec<PlayerSettlement>,
    /// Sum of the community card values.
    pub community_total: i64,
    /// Fees collected from all players, added to the pot.
    pub fees_collected: f64,
    /// Number of trades settled.
    pub trade_count: usize,
}

impl Settlement {
    /// Returns the settlement of one player.
    #[must_use]
    pub fn player(&self, id: &str) -> Option<&PlayerSettlement> {
        self.players.iter().find(|player| player.player_id == id)
    }

    /// Returns the balance change of one player.
    #[must_use]
    pub fn delta(&self, id: &str) -> Option<f64> {
        self.player(id).map(|player| player.delta)
    }

    /// Returns every player's balance change keyed by player ID.
    #[must_use]
    pub fn deltas(&self) -> HashMap<String, f64> {
        self.players
            .iter()
            .map(|player| (player.player_id.clone(), player.delta))
            .collect()
    }

    /// Sum of net positions over all players. Always zero.
    #[must_use]
    pub fn net_position_total(&self) -> i64 {
        self.players.iter().map(|player| player.net_position).sum()
    }
}
