//! Ticker universe parsing and loading.
//!
//! Parses ticker lists from configuration and loads each symbol's price
//! history, degrading to a partial universe when individual symbols fail.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::domain::price::SymbolSeries;
use crate::ports::data_port::DataPort;

#[derive(Debug, Clone, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in ticker list")]
    EmptyToken,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),
}

/// Parses a comma-separated ticker list: tokens are trimmed and uppercased,
/// empty tokens and duplicates are rejected.
pub fn parse_tickers(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut tickers = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let ticker = trimmed.to_uppercase();
        if seen.contains(&ticker) {
            return Err(UniverseError::DuplicateTicker(ticker));
        }
        seen.insert(ticker.clone());
        tickers.push(ticker);
    }

    Ok(tickers)
}

/// A symbol dropped from the run, with the failure that caused it.
#[derive(Debug, Clone)]
pub struct UnavailableSymbol {
    pub symbol: String,
    pub reason: String,
}

/// Fetches price history for every ticker in order.
///
/// Symbols whose fetch fails are reported and skipped; the rest of the run
/// continues. A symbol that loads zero bars stays in the universe and simply
/// produces an empty result downstream.
pub fn load_universe(
    data_port: &dyn DataPort,
    tickers: &[String],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> (Vec<SymbolSeries>, Vec<UnavailableSymbol>) {
    let mut loaded = Vec::new();
    let mut unavailable = Vec::new();

    for ticker in tickers {
        match data_port.fetch_bars(ticker, start_date, end_date) {
            Ok(bars) => {
                eprintln!("  {}: {} bars", ticker, bars.len());
                loaded.push(SymbolSeries::new(ticker.clone(), bars));
            }
            Err(e) => {
                eprintln!("Warning: skipping {} ({})", ticker, e);
                unavailable.push(UnavailableSymbol {
                    symbol: ticker.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    (loaded, unavailable)
}
