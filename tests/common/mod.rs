#![allow(dead_code)]

use chrono::NaiveDate;
use omxtrader::domain::backtest::BacktestConfig;
use omxtrader::domain::error::OmxtraderError;
pub use omxtrader::domain::price::{PriceBar, SymbolSeries};
use omxtrader::domain::strategy::Strategy;
use omxtrader::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PriceBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_bars(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceBar>, OmxtraderError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(OmxtraderError::Data {
                reason: reason.clone(),
            });
        }
        match self.data.get(symbol) {
            Some(bars) => Ok(bars
                .iter()
                .filter(|b| b.date >= start_date && b.date <= end_date)
                .copied()
                .collect()),
            None => Err(OmxtraderError::NoData {
                symbol: symbol.to_string(),
            }),
        }
    }

    fn list_symbols(&self) -> Result<Vec<String>, OmxtraderError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, OmxtraderError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(OmxtraderError::Data {
                reason: reason.clone(),
            });
        }
        match self.data.get(symbol) {
            Some(bars) if !bars.is_empty() => {
                let min = bars.iter().map(|b| b.date).min().unwrap();
                let max = bars.iter().map(|b| b.date).max().unwrap();
                Ok(Some((min, max, bars.len())))
            }
            _ => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bar(date_str: &str, close: f64) -> PriceBar {
    PriceBar {
        date: NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
        close,
    }
}

/// Consecutive calendar-day bars with the given closes.
pub fn bars_from_closes(start_date: &str, closes: &[f64]) -> Vec<PriceBar> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceBar {
            date: start + chrono::Duration::days(i as i64),
            close,
        })
        .collect()
}

pub fn series_from_closes(symbol: &str, start_date: &str, closes: &[f64]) -> SymbolSeries {
    SymbolSeries::new(symbol.to_string(), bars_from_closes(start_date, closes))
}

/// Default-parameter strategy: windows 20/200, 2-sigma bands, 10% sizing,
/// 2% stop, 5-day cap.
pub fn default_strategy() -> Strategy {
    Strategy::default()
}

/// Small-window variant so short series can produce signals.
pub fn small_strategy() -> Strategy {
    Strategy {
        short_window: 3,
        long_window: 5,
        band_width: 1.0,
        ..Strategy::default()
    }
}

pub fn sample_config() -> BacktestConfig {
    BacktestConfig {
        start_date: date(2020, 1, 1),
        end_date: date(2024, 12, 31),
        initial_capital: 100_000.0,
    }
}

/// A 220-bar uptrend (0.5/day) with one engineered dip. The dip at
/// `dip_index` closes below the 20-day lower band while staying above the
/// 200-day average, so the default strategy signals there and nowhere else.
pub fn trending_closes_with_dip(dip_index: usize, dip_close: f64) -> Vec<f64> {
    let mut closes: Vec<f64> = (0..220).map(|i| 100.0 + 0.5 * i as f64).collect();
    closes[dip_index] = dip_close;
    closes
}
