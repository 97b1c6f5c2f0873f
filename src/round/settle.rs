use alloc::vec;
use alloc::vec::Vec;

use crate::error::{SettleError, TradeError};
use crate::result::{PlayerSettlement, Settlement};
use crate::trade::Trade;

use super::{Round, Stage};

impl Round {
    /// Settles the round against a batch of trades.
    ///
    /// This function:
    /// 1. Validates every trade and accumulates each player's net position
    ///    and traded notional
    /// 2. Values each player at card value plus community total plus net
    ///    position, less `trade_volume * house_fee_rate` in fees
    /// 3. Adds that delta to each balance and the fees to the pot
    ///
    /// Settlement is all-or-nothing: if any trade is rejected, no balance
    /// changes and the round stays in the reveal state.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not in the reveal state, a trade
    /// names a player not seated at the table, or a trade is malformed.
    ///
    /// # Example
    ///
    /// ```
    /// use tradetable::{Deck, Round, RoundOptions, Table, Trade};
    ///
    /// let table = Table::with_players(["p1", "p2"], 0.0).unwrap();
    /// let deck = Deck::from_values(&[1, 2, 3, 4, 5]);
    /// let options = RoundOptions::default().with_shuffle(false);
    /// let mut round = Round::new(table, deck, options, 0);
    ///
    /// round.deal().unwrap();
    /// round.reveal().unwrap();
    /// let settlement = round.settle(&[Trade::new("p1", "p2", 10.0, 2)]).unwrap();
    /// assert_eq!(settlement.net_position_total(), 0);
    /// ```
    pub fn settle(&mut self, trades: &[Trade]) -> Result<Settlement, SettleError> {
        let Stage::Reveal { community } = self.stage else {
            return Err(SettleError::InvalidTransition);
        };

        let seats = self.table.len();
        let mut volume = vec![0.0_f64; seats];
        let mut net = vec![0_i64; seats];

        for (index, trade) in trades.iter().enumerate() {
            let (Some(from), Some(to)) = (
                self.table.seat_of(&trade.from),
                self.table.seat_of(&trade.to),
            ) else {
                log::warn!("trade {index} names a player not seated at the table");
                return Err(SettleError::UnknownPlayer { trade: index });
            };
            trade.check().map_err(|err| {
                log::warn!("trade {index} rejected: {err}");
                settle_error(index, err)
            })?;

            let notional = trade.notional();
            volume[from] += notional;
            volume[to] += notional;
            if !volume[from].is_finite() || !volume[to].is_finite() {
                log::warn!("trade {index} overflows the traded volume");
                return Err(SettleError::InvalidTrade { trade: index });
            }
            net[from] = net[from]
                .checked_sub(trade.quantity)
                .ok_or(SettleError::InvalidTrade { trade: index })?;
            net[to] = net[to]
                .checked_add(trade.quantity)
                .ok_or(SettleError::InvalidTrade { trade: index })?;
        }

        let community_total: i64 = community.iter().map(|card| i64::from(card.value)).sum();
        let rate = self.house_fee_rate;
        let mut players = Vec::with_capacity(seats);
        let mut fees_collected = 0.0;

        for (seat, player) in self.table.players.iter_mut().enumerate() {
            let card_value = player.card.map_or(0, |card| card.value);
            #[expect(
                clippy::cast_precision_loss,
                reason = "card totals and positions are far below 2^52"
            )]
            let final_value = f64::from(card_value) + community_total as f64 + net[seat] as f64;
            let fees = volume[seat] * rate;
            let delta = final_value - fees;

            player.balance += delta;
            player.position = net[seat];
            fees_collected += fees;

            log::debug!(
                "settled {}: card {card_value}, position {}, fees {fees}, delta {delta}",
                player.id,
                net[seat]
            );

            players.push(PlayerSettlement {
                player_id: player.id.clone(),
                card_value,
                net_position: net[seat],
                trade_volume: volume[seat],
                fees,
                final_value,
                delta,
                balance: player.balance,
            });
        }
        self.table.pot += fees_collected;

        let settlement = Settlement {
            players,
            community_total,
            fees_collected,
            trade_count: trades.len(),
        };
        self.stage = Stage::Settle {
            community,
            settlement: settlement.clone(),
        };

        Ok(settlement)
    }
}

const fn settle_error(index: usize, err: TradeError) -> SettleError {
    match err {
        TradeError::UnknownPlayer => SettleError::UnknownPlayer { trade: index },
        TradeError::InvalidQuantity | TradeError::InvalidPrice | TradeError::SelfTrade => {
            SettleError::InvalidTrade { trade: index }
        }
    }
}
