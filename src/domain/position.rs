//! Open-position state and trade records.

use chrono::NaiveDate;

/// A live long position in a single symbol.
///
/// `shares` may be zero when the allotted capital cannot buy a whole share;
/// the position still occupies the symbol's slot until it exits.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub symbol: String,
    pub entry_date: NaiveDate,
    pub entry_price: f64,
    pub shares: u64,
    pub stop_loss_price: f64,
    /// Trading days held, counted from the bar after entry.
    pub days_held: u32,
}

impl Position {
    /// Opens a position at the given close. `stop_loss` is the fractional
    /// distance below the entry price.
    pub fn open(
        symbol: String,
        entry_date: NaiveDate,
        entry_price: f64,
        shares: u64,
        stop_loss: f64,
    ) -> Self {
        Position {
            symbol,
            entry_date,
            entry_price,
            shares,
            stop_loss_price: entry_price * (1.0 - stop_loss),
            days_held: 0,
        }
    }

    /// Stop-loss fires when the close touches or crosses the stop price.
    pub fn should_stop_out(&self, close: f64) -> bool {
        close <= self.stop_loss_price
    }

    pub fn realized_pnl(&self, exit_price: f64) -> f64 {
        self.shares as f64 * (exit_price - self.entry_price)
    }

    pub fn to_open_trade(&self) -> OpenTrade {
        OpenTrade {
            symbol: self.symbol.clone(),
            entry_date: self.entry_date,
            entry_price: self.entry_price,
            shares: self.shares,
            stop_loss_price: self.stop_loss_price,
        }
    }
}

/// A trade whose exit has not happened yet.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenTrade {
    pub symbol: String,
    pub entry_date: NaiveDate,
    pub entry_price: f64,
    pub shares: u64,
    pub stop_loss_price: f64,
}

impl OpenTrade {
    pub fn complete(self, exit_date: NaiveDate, exit_price: f64) -> CompletedTrade {
        let trade_return = if self.entry_price != 0.0 {
            (exit_price - self.entry_price) / self.entry_price
        } else {
            0.0
        };
        CompletedTrade {
            symbol: self.symbol,
            entry_date: self.entry_date,
            entry_price: self.entry_price,
            shares: self.shares,
            stop_loss_price: self.stop_loss_price,
            exit_date,
            exit_price,
            trade_return,
        }
    }
}

/// A round-trip trade with both legs settled.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedTrade {
    pub symbol: String,
    pub entry_date: NaiveDate,
    pub entry_price: f64,
    pub shares: u64,
    pub stop_loss_price: f64,
    pub exit_date: NaiveDate,
    pub exit_price: f64,
    /// Fractional price return of the round trip, independent of share count.
    pub trade_return: f64,
}

impl CompletedTrade {
    pub fn is_win(&self) -> bool {
        self.trade_return > 0.0
    }

    pub fn realized_pnl(&self) -> f64 {
        self.shares as f64 * (self.exit_price - self.entry_price)
    }
}

/// A ledger entry: either still open or fully settled.
#[derive(Debug, Clone, PartialEq)]
pub enum Trade {
    Open(OpenTrade),
    Completed(CompletedTrade),
}

impl Trade {
    pub fn symbol(&self) -> &str {
        match self {
            Trade::Open(t) => &t.symbol,
            Trade::Completed(t) => &t.symbol,
        }
    }

    pub fn entry_date(&self) -> NaiveDate {
        match self {
            Trade::Open(t) => t.entry_date,
            Trade::Completed(t) => t.entry_date,
        }
    }

    pub fn as_completed(&self) -> Option<&CompletedTrade> {
        match self {
            Trade::Completed(t) => Some(t),
            Trade::Open(_) => None,
        }
    }
}
