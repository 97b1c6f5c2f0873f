//! Round and table configuration.

/// House fee rate used when none is configured.
pub const DEFAULT_HOUSE_FEE_RATE: f64 = 0.01;

/// Configuration options for a single round.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use tradetable::RoundOptions;
///
/// let options = RoundOptions::default()
///     .with_house_fee_rate(0.02)
///     .with_shuffle(false);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundOptions {
    /// Fraction of traded notional charged to each side of a trade.
    pub house_fee_rate: f64,
    /// Whether the deck is shuffled before dealing.
    /// Disable only for fixed decks in tests and replays.
    pub shuffle: bool,
}

impl Default for RoundOptions {
    fn default() -> Self {
        Self {
            house_fee_rate: DEFAULT_HOUSE_FEE_RATE,
            shuffle: true,
        }
    }
}

impl RoundOptions {
    /// Sets the house fee rate.
    ///
    /// Rates outside `[0, 1]` are clamped when the round is created.
    ///
    /// # Example
    ///
    /// ```
    /// use tradetable::RoundOptions;
    ///
    /// let options = RoundOptions::default().with_house_fee_rate(0.05);
    /// assert_eq!(options.house_fee_rate, 0.05);
    /// ```
    #[must_use]
    pub const fn with_house_fee_rate(mut self, rate: f64) -> Self {
        self.house_fee_rate = rate;
        self
    }

    /// Sets whether the deck is shuffled before dealing.
    ///
    /// # Example
    ///
    /// ```
    /// use tradetable::RoundOptions;
    ///
    /// let options = RoundOptions::default().with_shuffle(false);
    /// assert!(!options.shuffle);
    /// ```
    #[must_use]
    pub const fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Returns the fee rate clamped into `[0, 1]`, with NaN treated as zero.
    #[must_use]
    pub fn effective_fee_rate(&self) -> f64 {
        if self.house_fee_rate.is_nan() {
            0.0
        } else {
            self.house_fee_rate.clamp(0.0, 1.0)
        }
    }
}

/// Seating policy and round options for tables created by a registry.
///
/// ```
/// use tradetable::{RoundOptions, TableOptions};
///
/// let options = TableOptions::default()
///     .with_max_players(4)
///     .with_starting_balance(100.0)
///     .with_round(RoundOptions::default().with_house_fee_rate(0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableOptions {
    /// Players needed to start a round.
    pub min_players: usize,
    /// Seats at the table.
    pub max_players: usize,
    /// Balance given to newly seated players.
    pub starting_balance: f64,
    /// Options applied to every round at the table.
    pub round: RoundOptions,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            min_players: 2,
            max_players: 5,
            starting_balance: 0.0,
            round: RoundOptions::default(),
        }
    }
}

impl TableOptions {
    /// Sets the number of players needed to start a round.
    ///
    /// # Example
    ///
    /// ```
    /// use tradetable::TableOptions;
    ///
    /// let options = TableOptions::default().with_min_players(3);
    /// assert_eq!(options.min_players, 3);
    /// ```
    #[must_use]
    pub const fn with_min_players(mut self, min: usize) -> Self {
        self.min_players = min;
        self
    }

    /// Sets the number of seats.
    #[must_use]
    pub const fn with_max_players(mut self, max: usize) -> Self {
        self.max_players = max;
        self
    }

    /// Sets the balance given to newly seated players.
    #[must_use]
    pub const fn with_starting_balance(mut self, balance: f64) -> Self {
        self.starting_balance = balance;
        self
    }

    /// Sets the options applied to every round.
    #[must_use]
    pub const fn with_round(mut self, round: RoundOptions) -> Self {
        self.round = round;
        self
    }
}
