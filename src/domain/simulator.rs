//! Single-symbol backtest simulation.
//!
//! Each symbol runs against its own isolated portfolio slice: the run starts
//! at the full initial capital and portfolio value changes only when a trade
//! settles. Unrealized gains and losses never move the curve.

use crate::domain::equity::EquityCurve;
use crate::domain::ledger::TradeLedger;
use crate::domain::position::Position;
use crate::domain::price::SymbolSeries;
use crate::domain::signal::compute_rolling_stats;
use crate::domain::strategy::Strategy;

/// Outcome of simulating one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolResult {
    pub symbol: String,
    pub ledger: TradeLedger,
    pub equity: EquityCurve,
    pub final_value: f64,
}

/// Runs the mean-reversion state machine over one symbol's history.
///
/// Per bar, in order: enter when flat and the signal fires, otherwise age the
/// open position and exit on stop-loss or the holding-period cap. An exit bar
/// never re-enters. The equity curve gets one point per bar, recorded after
/// any settlement on that bar.
pub fn simulate_symbol(
    series: &SymbolSeries,
    strategy: &Strategy,
    initial_capital: f64,
) -> SymbolResult {
    let stats = compute_rolling_stats(series.bars(), strategy);

    let mut portfolio_value = initial_capital;
    let mut position: Option<Position> = None;
    let mut ledger = TradeLedger::new();
    let mut equity = EquityCurve::new();

    for (bar, stat) in series.bars().iter().zip(&stats) {
        if position.is_none() && stat.entry_signal(bar.close) {
            let position_value = portfolio_value * strategy.position_fraction;
            let shares = whole_shares(position_value, bar.close);
            let pos = Position::open(
                series.symbol.clone(),
                bar.date,
                bar.close,
                shares,
                strategy.stop_loss,
            );
            ledger.open(pos.to_open_trade());
            position = Some(pos);
        } else if let Some(mut pos) = position.take() {
            pos.days_held += 1;
            if pos.should_stop_out(bar.close) || pos.days_held >= strategy.max_hold_days {
                portfolio_value += pos.realized_pnl(bar.close);
                ledger.complete(bar.date, bar.close);
            } else {
                position = Some(pos);
            }
        }
        equity.record(bar.date, portfolio_value);
    }

    SymbolResult {
        symbol: series.symbol.clone(),
        ledger,
        equity,
        final_value: portfolio_value,
    }
}

/// Whole shares purchasable with `position_value` at `close`. Zero when the
/// close is non-positive or the budget does not cover one share.
fn whole_shares(position_value: f64, close: f64) -> u64 {
    if close > 0.0 {
        (position_value / close).floor() as u64
    } else {
        0
    }
}
