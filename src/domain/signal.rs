//! Entry-signal generation from rolling statistics.

use chrono::NaiveDate;

use crate::domain::indicator::{rolling_mean, rolling_stddev};
use crate::domain::price::PriceBar;
use crate::domain::strategy::Strategy;

/// Per-bar rolling statistics. Fields are `None` until the corresponding
/// window has filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollingStats {
    pub date: NaiveDate,
    pub sma_short: Option<f64>,
    pub sma_long: Option<f64>,
    pub stddev: Option<f64>,
    pub upper_band: Option<f64>,
    pub lower_band: Option<f64>,
}

impl RollingStats {
    /// True when the close dips below the lower band while the longer trend
    /// is still up (close above the long moving average).
    ///
    /// Bars inside either warmup period never signal.
    pub fn entry_signal(&self, close: f64) -> bool {
        match (self.lower_band, self.sma_long) {
            (Some(lower), Some(long)) => close < lower && close > long,
            _ => false,
        }
    }
}

/// Computes rolling statistics for every bar of a series, aligned with the
/// input. Band width and window lengths come from the strategy.
pub fn compute_rolling_stats(bars: &[PriceBar], strategy: &Strategy) -> Vec<RollingStats> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let sma_short = rolling_mean(&closes, strategy.short_window);
    let sma_long = rolling_mean(&closes, strategy.long_window);
    let stddev = rolling_stddev(&closes, strategy.short_window);

    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let (upper_band, lower_band) = match (sma_short[i], stddev[i]) {
                (Some(mean), Some(sd)) => (
                    Some(mean + strategy.band_width * sd),
                    Some(mean - strategy.band_width * sd),
                ),
                _ => (None, None),
            };
            RollingStats {
                date: bar.date,
                sma_short: sma_short[i],
                sma_long: sma_long[i],
                stddev: stddev[i],
                upper_band,
                lower_band,
            }
        })
        .collect()
}
