//! Aggregate performance statistics.

use crate::domain::position::CompletedTrade;

/// Performance summary over every completed trade in a run.
///
/// Open trades never contribute. `total_return` is the plain sum of
/// per-trade fractional returns, not a compounded figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_return: f64,
    pub num_trades: usize,
    pub num_wins: usize,
    pub num_losses: usize,
    pub win_rate: f64,
}

impl Summary {
    pub fn compute(trades: &[CompletedTrade]) -> Self {
        let num_trades = trades.len();
        let num_wins = trades.iter().filter(|t| t.is_win()).count();
        let num_losses = num_trades - num_wins;
        let total_return = trades.iter().map(|t| t.trade_return).sum();
        let win_rate = if num_trades > 0 {
            num_wins as f64 / num_trades as f64
        } else {
            0.0
        };

        Summary {
            total_return,
            num_trades,
            num_wins,
            num_losses,
            win_rate,
        }
    }
}
