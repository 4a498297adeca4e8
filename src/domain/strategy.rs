//! Strategy parameters for the mean-reversion system.

/// Tunable parameters for the long-only mean-reversion strategy.
///
/// Windows are counted in trading days (bars), not calendar days.
#[derive(Debug, Clone, PartialEq)]
pub struct Strategy {
    pub name: String,
    /// Short moving-average window; also the Bollinger band window.
    pub short_window: usize,
    /// Long moving-average window used as the trend filter.
    pub long_window: usize,
    /// Band half-width in standard deviations.
    pub band_width: f64,
    /// Fraction of current portfolio value committed per entry.
    pub position_fraction: f64,
    /// Stop-loss distance as a fraction below the entry price.
    pub stop_loss: f64,
    /// Maximum holding period in trading days before a forced exit.
    pub max_hold_days: u32,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy {
            name: "Mean Reversion".to_string(),
            short_window: 20,
            long_window: 200,
            band_width: 2.0,
            position_fraction: 0.10,
            stop_loss: 0.02,
            max_hold_days: 5,
        }
    }
}
