//! Trades between players and the book that collects them.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::TradeError;
use crate::table::Table;

/// `quantity` units sold by `from` to `to` at `price` each.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trade {
    /// Seller.
    pub from: String,
    /// Buyer.
    pub to: String,
    /// Price per unit.
    pub price: f64,
    /// Units traded. Must be positive.
    pub quantity: i64,
}

impl Trade {
    /// Creates a trade.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            price,
            quantity,
        }
    }

    /// Traded notional: `price * quantity`.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "trade quantities are far below 2^52"
    )]
    pub fn notional(&self) -> f64 {
        self.price * self.quantity as f64
    }

    /// Checks the trade on its own, without looking at a table.
    ///
    /// # Errors
    ///
    /// Returns an error if the quantity is not positive, the price is negative
    /// or not finite, the notional overflows, or both sides are the same
    /// player.
    pub fn check(&self) -> Result<(), TradeError> {
        if self.quantity <= 0 {
            return Err(TradeError::InvalidQuantity);
        }
        if !self.price.is_finite() || self.price < 0.0 || !self.notional().is_finite() {
            return Err(TradeError::InvalidPrice);
        }
        if self.from == self.to {
            return Err(TradeError::SelfTrade);
        }
        Ok(())
    }

    /// Checks the trade and that both sides are seated at `table`.
    ///
    /// # Errors
    ///
    /// Returns [`TradeError::UnknownPlayer`] if either side is not seated, or
    /// any error from [`Trade::check`].
    pub fn validate(&self, table: &Table) -> Result<(), TradeError> {
        if !table.contains(&self.from) || !table.contains(&self.to) {
            return Err(TradeError::UnknownPlayer);
        }
        self.check()
    }
}

/// Trades submitted during a trading window, validated on entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeBook {
    trades: Vec<Trade>,
}

impl TradeBook {
    /// Creates an empty book.
    #[must_use]
    pub const fn new() -> Self {
        Self { trades: Vec::new() }
    }

    /// Validates a trade against `table` and records it.
    ///
    /// # Errors
    ///
    /// Returns the validation error; the book is unchanged on error.
    pub fn submit(&mut self, table: &Table, trade: Trade) -> Result<(), TradeError> {
        if let Err(err) = trade.validate(table) {
            log::warn!("rejected trade {} -> {}: {err}", trade.from, trade.to);
            return Err(err);
        }
        self.trades.push(trade);
        Ok(())
    }

    /// Returns recorded trades in submission order.
    #[must_use]
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Returns the number of recorded trades.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trades.len()
    }

    /// Returns whether no trades have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Drops every recorded trade.
    pub fn clear(&mut self) {
        self.trades.clear();
    }

    /// Running net position of each player at `table`, in seating order.
    #[must_use]
    pub fn net_positions(&self, table: &Table) -> Vec<(String, i64)> {
        table
            .players
            .iter()
            .map(|player| {
                let net = self
                    .trades
                    .iter()
                    .map(|trade| {
                        if trade.to == player.id {
                            trade.quantity
                        } else if trade.from == player.id {
                            -trade.quantity
                        } else {
                            0
                        }
                    })
                    .sum();
                (player.id.clone(), net)
            })
            .collect()
    }

    /// Consumes the book, returning its trades.
    #[must_use]
    pub fn into_trades(self) -> Vec<Trade> {
        self.trades
    }
}
