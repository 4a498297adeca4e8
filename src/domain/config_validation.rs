//! Configuration validation.
//!
//! Checks every config field a run depends on before any data is touched.
//! Absent keys fall back to their documented defaults and pass; present but
//! malformed values fail.

use chrono::NaiveDate;

use crate::domain::error::OmxtraderError;
use crate::ports::config_port::ConfigPort;

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), OmxtraderError> {
    validate_initial_capital(config)?;
    validate_dates(config)?;
    validate_tickers(config)?;
    validate_csv_dir(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), OmxtraderError> {
    validate_short_window(config)?;
    validate_long_window(config)?;
    validate_band_width(config)?;
    validate_position_fraction(config)?;
    validate_stop_loss(config)?;
    validate_max_hold_days(config)?;
    Ok(())
}

pub fn validate_volatility_config(config: &dyn ConfigPort) -> Result<(), OmxtraderError> {
    validate_volatility_window(config)?;
    validate_annual_days(config)?;
    validate_timeframe(config)?;
    Ok(())
}

fn validate_initial_capital(config: &dyn ConfigPort) -> Result<(), OmxtraderError> {
    let value = config.get_double("backtest", "initial_capital", 100_000.0);
    if value <= 0.0 {
        return Err(OmxtraderError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "initial_capital".to_string(),
            reason: "initial_capital must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), OmxtraderError> {
    let start_str = config.get_string("backtest", "start_date");
    let end_str = config.get_string("backtest", "end_date");

    let start_date = parse_date(start_str.as_deref(), "start_date")?;
    let end_date = parse_date(end_str.as_deref(), "end_date")?;

    if start_date >= end_date {
        return Err(OmxtraderError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "start_date".to_string(),
            reason: "start_date must be before end_date".to_string(),
        });
    }
    Ok(())
}

fn parse_date(value: Option<&str>, field: &str) -> Result<NaiveDate, OmxtraderError> {
    match value {
        None => Err(OmxtraderError::ConfigMissing {
            section: "backtest".to_string(),
            key: field.to_string(),
        }),
        Some(s) => {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| OmxtraderError::ConfigInvalid {
                section: "backtest".to_string(),
                key: field.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", field),
            })
        }
    }
}

fn validate_tickers(config: &dyn ConfigPort) -> Result<(), OmxtraderError> {
    let tickers = config.get_string("backtest", "tickers");
    let ticker = config.get_string("backtest", "ticker");

    match (tickers, ticker) {
        (Some(t), _) if !t.trim().is_empty() => Ok(()),
        (None, Some(t)) if !t.trim().is_empty() => Ok(()),
        _ => Err(OmxtraderError::ConfigMissing {
            section: "backtest".to_string(),
            key: "ticker".to_string(),
        }),
    }
}

fn validate_csv_dir(config: &dyn ConfigPort) -> Result<(), OmxtraderError> {
    match config.get_string("data", "csv_dir") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(OmxtraderError::ConfigMissing {
            section: "data".to_string(),
            key: "csv_dir".to_string(),
        }),
    }
}

fn validate_short_window(config: &dyn ConfigPort) -> Result<(), OmxtraderError> {
    let value = config.get_int("strategy", "short_window", 20);
    if value < 2 {
        return Err(OmxtraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "short_window".to_string(),
            reason: "short_window must be at least 2".to_string(),
        });
    }
    Ok(())
}

fn validate_long_window(config: &dyn ConfigPort) -> Result<(), OmxtraderError> {
    let value = config.get_int("strategy", "long_window", 200);
    if value < 1 {
        return Err(OmxtraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "long_window".to_string(),
            reason: "long_window must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_band_width(config: &dyn ConfigPort) -> Result<(), OmxtraderError> {
    let value = config.get_double("strategy", "band_width", 2.0);
    if value < 0.0 {
        return Err(OmxtraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "band_width".to_string(),
            reason: "band_width must be non-negative".to_string(),
        });
    }
    Ok(())
}

fn validate_position_fraction(config: &dyn ConfigPort) -> Result<(), OmxtraderError> {
    let value = config.get_double("strategy", "position_fraction", 0.10);
    if value <= 0.0 || value > 1.0 {
        return Err(OmxtraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "position_fraction".to_string(),
            reason: "position_fraction must be between 0 and 1".to_string(),
        });
    }
    Ok(())
}

fn validate_stop_loss(config: &dyn ConfigPort) -> Result<(), OmxtraderError> {
    let value = config.get_double("strategy", "stop_loss", 0.02);
    if !(0.0..1.0).contains(&value) {
        return Err(OmxtraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "stop_loss".to_string(),
            reason: "stop_loss must be at least 0 and below 1".to_string(),
        });
    }
    Ok(())
}

fn validate_max_hold_days(config: &dyn ConfigPort) -> Result<(), OmxtraderError> {
    let value = config.get_int("strategy", "max_hold_days", 5);
    if value < 1 {
        return Err(OmxtraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "max_hold_days".to_string(),
            reason: "max_hold_days must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_volatility_window(config: &dyn ConfigPort) -> Result<(), OmxtraderError> {
    let value = config.get_int("volatility", "window", 10);
    if value < 2 {
        return Err(OmxtraderError::ConfigInvalid {
            section: "volatility".to_string(),
            key: "window".to_string(),
            reason: "window must be at least 2".to_string(),
        });
    }
    Ok(())
}

fn validate_annual_days(config: &dyn ConfigPort) -> Result<(), OmxtraderError> {
    let value = config.get_int("volatility", "annual_days", 365);
    if value < 1 {
        return Err(OmxtraderError::ConfigInvalid {
            section: "volatility".to_string(),
            key: "annual_days".to_string(),
            reason: "annual_days must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_timeframe(config: &dyn ConfigPort) -> Result<(), OmxtraderError> {
    let value = config
        .get_string("volatility", "timeframe")
        .unwrap_or_else(|| "daily".to_string());
    value
        .parse::<crate::domain::volatility::Timeframe>()
        .map_err(|_| OmxtraderError::ConfigInvalid {
            section: "volatility".to_string(),
            key: "timeframe".to_string(),
            reason: format!("unsupported timeframe '{}'", value),
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn make_config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn valid_backtest_config_passes() {
        let config = make_config(
            r#"
[backtest]
initial_capital = 100000.0
start_date = 2000-01-01
end_date = 2024-06-19
tickers = VOLV-B.ST,ERIC-B.ST

[data]
csv_dir = data/omxs30
"#,
        );
        assert!(validate_backtest_config(&config).is_ok());
    }

    #[test]
    fn defaults_cover_absent_capital() {
        let config = make_config(
            "[backtest]\nstart_date = 2020-01-01\nend_date = 2024-12-31\nticker = ABB.ST\n\n[data]\ncsv_dir = data\n",
        );
        assert!(validate_backtest_config(&config).is_ok());
    }

    #[test]
    fn initial_capital_must_be_positive() {
        let config = make_config(
            "[backtest]\ninitial_capital = -100\nstart_date = 2020-01-01\nend_date = 2024-12-31\nticker = ABB.ST\n\n[data]\ncsv_dir = data\n",
        );
        let err = validate_backtest_config(&config).unwrap_err();
        assert!(
            matches!(err, OmxtraderError::ConfigInvalid { key, .. } if key == "initial_capital")
        );
    }

    #[test]
    fn initial_capital_zero_fails() {
        let config = make_config(
            "[backtest]\ninitial_capital = 0\nstart_date = 2020-01-01\nend_date = 2024-12-31\nticker = ABB.ST\n\n[data]\ncsv_dir = data\n",
        );
        let err = validate_backtest_config(&config).unwrap_err();
        assert!(
            matches!(err, OmxtraderError::ConfigInvalid { key, .. } if key == "initial_capital")
        );
    }

    #[test]
    fn invalid_start_date_format_fails() {
        let config = make_config(
            "[backtest]\nstart_date = 2020/01/01\nend_date = 2024-12-31\nticker = ABB.ST\n\n[data]\ncsv_dir = data\n",
        );
        let err = validate_backtest_config(&config).unwrap_err();
        assert!(matches!(err, OmxtraderError::ConfigInvalid { key, .. } if key == "start_date"));
    }

    #[test]
    fn missing_end_date_fails() {
        let config = make_config(
            "[backtest]\nstart_date = 2020-01-01\nticker = ABB.ST\n\n[data]\ncsv_dir = data\n",
        );
        let err = validate_backtest_config(&config).unwrap_err();
        assert!(matches!(err, OmxtraderError::ConfigMissing { key, .. } if key == "end_date"));
    }

    #[test]
    fn start_date_after_end_date_fails() {
        let config = make_config(
            "[backtest]\nstart_date = 2024-12-31\nend_date = 2020-01-01\nticker = ABB.ST\n\n[data]\ncsv_dir = data\n",
        );
        let err = validate_backtest_config(&config).unwrap_err();
        assert!(matches!(err, OmxtraderError::ConfigInvalid { key, .. } if key == "start_date"));
    }

    #[test]
    fn missing_tickers_fails() {
        let config = make_config(
            "[backtest]\nstart_date = 2020-01-01\nend_date = 2024-12-31\n\n[data]\ncsv_dir = data\n",
        );
        let err = validate_backtest_config(&config).unwrap_err();
        assert!(matches!(err, OmxtraderError::ConfigMissing { key, .. } if key == "ticker"));
    }

    #[test]
    fn singular_ticker_accepted() {
        let config = make_config(
            "[backtest]\nstart_date = 2020-01-01\nend_date = 2024-12-31\nticker = AZN.ST\n\n[data]\ncsv_dir = data\n",
        );
        assert!(validate_backtest_config(&config).is_ok());
    }

    #[test]
    fn missing_csv_dir_fails() {
        let config = make_config(
            "[backtest]\nstart_date = 2020-01-01\nend_date = 2024-12-31\nticker = ABB.ST\n",
        );
        let err = validate_backtest_config(&config).unwrap_err();
        assert!(matches!(err, OmxtraderError::ConfigMissing { key, .. } if key == "csv_dir"));
    }

    #[test]
    fn valid_strategy_config_passes() {
        let config = make_config(
            r#"
[strategy]
short_window = 20
long_window = 200
band_width = 2.0
position_fraction = 0.10
stop_loss = 0.02
max_hold_days = 5
"#,
        );
        assert!(validate_strategy_config(&config).is_ok());
    }

    #[test]
    fn empty_strategy_section_uses_defaults() {
        let config = make_config("[strategy]\n");
        assert!(validate_strategy_config(&config).is_ok());
    }

    #[test]
    fn short_window_below_two_fails() {
        let config = make_config("[strategy]\nshort_window = 1\n");
        let err = validate_strategy_config(&config).unwrap_err();
        assert!(matches!(err, OmxtraderError::ConfigInvalid { key, .. } if key == "short_window"));
    }

    #[test]
    fn long_window_zero_fails() {
        let config = make_config("[strategy]\nlong_window = 0\n");
        let err = validate_strategy_config(&config).unwrap_err();
        assert!(matches!(err, OmxtraderError::ConfigInvalid { key, .. } if key == "long_window"));
    }

    #[test]
    fn band_width_negative_fails() {
        let config = make_config("[strategy]\nband_width = -1.0\n");
        let err = validate_strategy_config(&config).unwrap_err();
        assert!(matches!(err, OmxtraderError::ConfigInvalid { key, .. } if key == "band_width"));
    }

    #[test]
    fn position_fraction_zero_fails() {
        let config = make_config("[strategy]\nposition_fraction = 0\n");
        let err = validate_strategy_config(&config).unwrap_err();
        assert!(
            matches!(err, OmxtraderError::ConfigInvalid { key, .. } if key == "position_fraction")
        );
    }

    #[test]
    fn position_fraction_above_one_fails() {
        let config = make_config("[strategy]\nposition_fraction = 1.5\n");
        let err = validate_strategy_config(&config).unwrap_err();
        assert!(
            matches!(err, OmxtraderError::ConfigInvalid { key, .. } if key == "position_fraction")
        );
    }

    #[test]
    fn stop_loss_negative_fails() {
        let config = make_config("[strategy]\nstop_loss = -0.02\n");
        let err = validate_strategy_config(&config).unwrap_err();
        assert!(matches!(err, OmxtraderError::ConfigInvalid { key, .. } if key == "stop_loss"));
    }

    #[test]
    fn stop_loss_of_one_fails() {
        let config = make_config("[strategy]\nstop_loss = 1.0\n");
        let err = validate_strategy_config(&config).unwrap_err();
        assert!(matches!(err, OmxtraderError::ConfigInvalid { key, .. } if key == "stop_loss"));
    }

    #[test]
    fn max_hold_days_zero_fails() {
        let config = make_config("[strategy]\nmax_hold_days = 0\n");
        let err = validate_strategy_config(&config).unwrap_err();
        assert!(matches!(err, OmxtraderError::ConfigInvalid { key, .. } if key == "max_hold_days"));
    }

    #[test]
    fn valid_volatility_config_passes() {
        let config = make_config("[volatility]\nwindow = 10\nannual_days = 365\ntimeframe = daily\n");
        assert!(validate_volatility_config(&config).is_ok());
    }

    #[test]
    fn empty_volatility_section_uses_defaults() {
        let config = make_config("[volatility]\n");
        assert!(validate_volatility_config(&config).is_ok());
    }

    #[test]
    fn volatility_window_below_two_fails() {
        let config = make_config("[volatility]\nwindow = 1\n");
        let err = validate_volatility_config(&config).unwrap_err();
        assert!(matches!(err, OmxtraderError::ConfigInvalid { key, .. } if key == "window"));
    }

    #[test]
    fn annual_days_zero_fails() {
        let config = make_config("[volatility]\nannual_days = 0\n");
        let err = validate_volatility_config(&config).unwrap_err();
        assert!(matches!(err, OmxtraderError::ConfigInvalid { key, .. } if key == "annual_days"));
    }

    #[test]
    fn unknown_timeframe_fails() {
        let config = make_config("[volatility]\ntimeframe = hourly\n");
        let err = validate_volatility_config(&config).unwrap_err();
        assert!(matches!(err, OmxtraderError::ConfigInvalid { key, .. } if key == "timeframe"));
    }

    #[test]
    fn weekly_and_monthly_timeframes_pass() {
        for tf in ["weekly", "Monthly"] {
            let config = make_config(&format!("[volatility]\ntimeframe = {tf}\n"));
            assert!(validate_volatility_config(&config).is_ok());
        }
    }
}
