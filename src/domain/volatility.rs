//! Annualized historical volatility from log returns.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::OmxtraderError;
use crate::domain::indicator::sample_stddev;

/// Bar spacing of the price series being measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Daily,
    Weekly,
    Monthly,
}

impl Timeframe {
    /// Trading days represented by one bar of this timeframe.
    pub fn periods_per_bar(&self) -> f64 {
        match self {
            Timeframe::Daily => 1.0,
            Timeframe::Weekly => 5.0,
            Timeframe::Monthly => 21.0,
        }
    }
}

impl FromStr for Timeframe {
    type Err = OmxtraderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Timeframe::Daily),
            "weekly" => Ok(Timeframe::Weekly),
            "monthly" => Ok(Timeframe::Monthly),
            _ => Err(OmxtraderError::UnsupportedTimeframe {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Timeframe::Daily => "daily",
            Timeframe::Weekly => "weekly",
            Timeframe::Monthly => "monthly",
        };
        write!(f, "{name}")
    }
}

/// Annualized historical volatility in percent.
///
/// Takes the sample standard deviation of the last `window` log returns and
/// scales it by the square root of bars per year. Needs `window + 1` closes
/// and `window >= 2`; otherwise `None`.
pub fn historical_volatility(
    closes: &[f64],
    window: usize,
    annual_days: f64,
    timeframe: Timeframe,
) -> Option<f64> {
    if window < 2 {
        return None;
    }
    let returns: Vec<f64> = closes.windows(2).map(|w| (w[1] / w[0]).ln()).collect();
    if returns.len() < window {
        return None;
    }
    let tail = &returns[returns.len() - window..];
    let stddev = sample_stddev(tail);
    Some(100.0 * stddev * (annual_days / timeframe.periods_per_bar()).sqrt())
}
