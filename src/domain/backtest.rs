//! Universe-level backtest orchestration.

use chrono::NaiveDate;
use rayon::prelude::*;

use crate::domain::aggregate::combine_equity_curves;
use crate::domain::equity::EquityCurve;
use crate::domain::position::CompletedTrade;
use crate::domain::price::SymbolSeries;
use crate::domain::simulator::{SymbolResult, simulate_symbol};
use crate::domain::strategy::Strategy;
use crate::domain::summary::Summary;

/// Run parameters independent of the strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_capital: f64,
}

/// Everything a finished run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct UniverseResult {
    /// Per-symbol outcomes, in the universe's ticker order.
    pub symbols: Vec<SymbolResult>,
    pub combined_equity: EquityCurve,
    pub summary: Summary,
}

impl UniverseResult {
    /// All completed trades across the universe, grouped by symbol in
    /// universe order.
    pub fn completed_trades(&self) -> Vec<CompletedTrade> {
        self.symbols
            .iter()
            .flat_map(|r| r.ledger.completed().cloned())
            .collect()
    }
}

/// Simulates every symbol independently and aggregates the results.
///
/// Symbols run in parallel; each starts from the full initial capital.
/// Output order matches input order regardless of scheduling.
pub fn run_universe(
    universe: &[SymbolSeries],
    strategy: &Strategy,
    initial_capital: f64,
) -> UniverseResult {
    let symbols: Vec<SymbolResult> = universe
        .par_iter()
        .map(|series| simulate_symbol(series, strategy, initial_capital))
        .collect();

    let combined_equity = combine_equity_curves(symbols.iter().map(|r| &r.equity));
    let completed: Vec<CompletedTrade> = symbols
        .iter()
        .flat_map(|r| r.ledger.completed().cloned())
        .collect();
    let summary = Summary::compute(&completed);

    UniverseResult {
        symbols,
        combined_equity,
        summary,
    }
}
