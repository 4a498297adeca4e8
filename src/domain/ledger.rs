//! Per-symbol trade ledger.

use chrono::NaiveDate;

use crate::domain::position::{CompletedTrade, OpenTrade, Trade};

/// Ordered record of every trade one symbol produced.
///
/// At most one trade is open at a time, and an open trade is always the most
/// recently appended entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TradeLedger {
    trades: Vec<Trade>,
}

impl TradeLedger {
    pub fn new() -> Self {
        TradeLedger { trades: Vec::new() }
    }

    /// Appends a newly opened trade.
    pub fn open(&mut self, trade: OpenTrade) {
        debug_assert!(self.open_trade().is_none());
        self.trades.push(Trade::Open(trade));
    }

    /// Settles the currently open trade. No-op when nothing is open.
    pub fn complete(&mut self, exit_date: NaiveDate, exit_price: f64) {
        if let Some(slot) = self.trades.last_mut() {
            if let Trade::Open(open) = slot {
                *slot = Trade::Completed(open.clone().complete(exit_date, exit_price));
            }
        }
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn completed(&self) -> impl Iterator<Item = &CompletedTrade> {
        self.trades.iter().filter_map(Trade::as_completed)
    }

    /// The trade still open at the end of the run, if any.
    pub fn open_trade(&self) -> Option<&OpenTrade> {
        match self.trades.last() {
            Some(Trade::Open(t)) => Some(t),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}
