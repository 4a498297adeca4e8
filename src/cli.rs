//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{BacktestConfig, run_universe};
use crate::domain::config_validation::{
    validate_backtest_config, validate_strategy_config, validate_volatility_config,
};
use crate::domain::error::OmxtraderError;
use crate::domain::price::SymbolSeries;
use crate::domain::strategy::Strategy;
use crate::domain::universe::{UniverseError, load_universe, parse_tickers};
use crate::domain::volatility::{Timeframe, historical_volatility};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "omxtrader", about = "Mean-reversion backtester for OMX equities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest over the configured universe
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        tickers: Option<String>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List symbols available in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show data range for symbol(s)
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        tickers: Option<String>,
    },
    /// Print annualized historical volatility per symbol
    Volatility {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        tickers: Option<String>,
        #[arg(long)]
        window: Option<usize>,
        #[arg(long)]
        timeframe: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            output,
            tickers,
            dry_run,
        } => {
            if dry_run {
                run_dry_run(&config)
            } else {
                run_backtest(&config, output.as_ref(), tickers.as_deref())
            }
        }
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { config } => run_list_symbols(&config),
        Command::Info { config, tickers } => run_info(&config, tickers.as_deref()),
        Command::Volatility {
            config,
            tickers,
            window,
            timeframe,
        } => run_volatility(&config, tickers.as_deref(), window, timeframe.as_deref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = OmxtraderError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn run_backtest(
    config_path: &PathBuf,
    output_path: Option<&PathBuf>,
    tickers_override: Option<&str>,
) -> ExitCode {
    // Stage 1: Load config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    // Stage 2: Validate
    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_strategy_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 3: Build strategy and run parameters
    let strategy = build_strategy(&adapter);
    eprintln!("Loading strategy: {}", strategy.name);

    let bt_config = match build_backtest_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 4: Resolve tickers
    let tickers = match resolve_tickers(tickers_override, &adapter) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };
    if tickers.is_empty() {
        eprintln!("error: no tickers configured");
        return ExitCode::from(2);
    }

    // Output dir: flag wins over [report] output_dir; absent means no files.
    let output_dir = output_path
        .cloned()
        .or_else(|| adapter.get_string("report", "output_dir").map(PathBuf::from));

    // Stage 5: Data port
    let data_port = match CsvAdapter::from_config(&adapter) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    run_backtest_pipeline(
        &data_port,
        &strategy,
        &bt_config,
        &tickers,
        output_dir.as_ref(),
    )
}

pub fn build_backtest_config(adapter: &dyn ConfigPort) -> Result<BacktestConfig, OmxtraderError> {
    let start_str = adapter
        .get_string("backtest", "start_date")
        .ok_or_else(|| OmxtraderError::ConfigMissing {
            section: "backtest".into(),
            key: "start_date".into(),
        })?;
    let end_str = adapter.get_string("backtest", "end_date").ok_or_else(|| {
        OmxtraderError::ConfigMissing {
            section: "backtest".into(),
            key: "end_date".into(),
        }
    })?;

    let start_date = NaiveDate::parse_from_str(&start_str, "%Y-%m-%d").map_err(|_| {
        OmxtraderError::ConfigInvalid {
            section: "backtest".into(),
            key: "start_date".into(),
            reason: "invalid date format (expected YYYY-MM-DD)".into(),
        }
    })?;
    let end_date = NaiveDate::parse_from_str(&end_str, "%Y-%m-%d").map_err(|_| {
        OmxtraderError::ConfigInvalid {
            section: "backtest".into(),
            key: "end_date".into(),
            reason: "invalid date format (expected YYYY-MM-DD)".into(),
        }
    })?;

    Ok(BacktestConfig {
        start_date,
        end_date,
        initial_capital: adapter.get_double("backtest", "initial_capital", 100_000.0),
    })
}

/// Builds a [`Strategy`] from the `[strategy]` section, falling back to the
/// documented defaults for absent keys. Values are validated before this
/// runs, so present keys are taken as-is.
pub fn build_strategy(adapter: &dyn ConfigPort) -> Strategy {
    let defaults = Strategy::default();
    Strategy {
        name: adapter
            .get_string("strategy", "name")
            .unwrap_or(defaults.name),
        short_window: adapter.get_int("strategy", "short_window", 20) as usize,
        long_window: adapter.get_int("strategy", "long_window", 200) as usize,
        band_width: adapter.get_double("strategy", "band_width", 2.0),
        position_fraction: adapter.get_double("strategy", "position_fraction", 0.10),
        stop_loss: adapter.get_double("strategy", "stop_loss", 0.02),
        max_hold_days: adapter.get_int("strategy", "max_hold_days", 5) as u32,
    }
}

/// Ticker precedence: `--tickers` override, then `[backtest] tickers`, then
/// the singular `[backtest] ticker`. An absent or blank source resolves to
/// an empty list rather than an error.
pub fn resolve_tickers(
    tickers_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Result<Vec<String>, UniverseError> {
    let source = tickers_override
        .map(str::to_string)
        .or_else(|| config.get_string("backtest", "tickers"))
        .or_else(|| config.get_string("backtest", "ticker"));

    match source {
        Some(s) if !s.trim().is_empty() => parse_tickers(&s),
        _ => Ok(Vec::new()),
    }
}

pub fn run_backtest_pipeline(
    data_port: &dyn DataPort,
    strategy: &Strategy,
    bt_config: &BacktestConfig,
    tickers: &[String],
    output_dir: Option<&PathBuf>,
) -> ExitCode {
    // Stage 6: Load price history, skipping unavailable symbols
    eprintln!("Loading {} symbols...", tickers.len());
    let (universe, unavailable) = load_universe(
        data_port,
        tickers,
        bt_config.start_date,
        bt_config.end_date,
    );

    if !unavailable.is_empty() {
        eprintln!(
            "{} of {} symbols unavailable",
            unavailable.len(),
            tickers.len()
        );
    }
    if universe.is_empty() {
        eprintln!("error: no symbols with data to backtest");
        return ExitCode::from(5);
    }

    // Stage 7: Simulate and aggregate
    eprintln!(
        "Running backtest: {} symbols, {} to {}",
        universe.len(),
        bt_config.start_date,
        bt_config.end_date,
    );

    let result = run_universe(&universe, strategy, bt_config.initial_capital);

    // Stage 8: Console summary
    let summary = &result.summary;
    println!("=== {} ===", strategy.name);
    println!("Total Return: {:.2}", summary.total_return);
    println!("Number of Trades: {}", summary.num_trades);
    println!("Win Rate: {:.2}%", summary.win_rate * 100.0);
    println!("Number of Wins: {}", summary.num_wins);
    println!("Number of Losses: {}", summary.num_losses);

    eprintln!("\n=== Per-Symbol Summary ===");
    for sym in &result.symbols {
        eprintln!(
            "  {}: {} trades, final value {:.2}",
            sym.symbol,
            sym.ledger.len(),
            sym.final_value,
        );
    }

    // Stage 9: Report files
    if let Some(dir) = output_dir {
        if let Err(e) = CsvReportAdapter::new().write_report(&result, strategy, dir) {
            eprintln!("error: failed to write report: {e}");
            return (&e).into();
        }
        eprintln!("\nReport written to: {}", dir.display());
    }

    ExitCode::SUCCESS
}

pub fn run_dry_run(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_strategy_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    eprintln!("Config validated successfully");

    let strategy = build_strategy(&adapter);
    eprintln!("\nStrategy: {}", strategy.name);
    eprintln!("  short_window:      {}", strategy.short_window);
    eprintln!("  long_window:       {}", strategy.long_window);
    eprintln!("  band_width:        {}", strategy.band_width);
    eprintln!("  position_fraction: {}", strategy.position_fraction);
    eprintln!("  stop_loss:         {}", strategy.stop_loss);
    eprintln!("  max_hold_days:     {}", strategy.max_hold_days);

    let tickers = match resolve_tickers(None, &adapter) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: failed to parse tickers: {e}");
            return ExitCode::from(2);
        }
    };
    if tickers.is_empty() {
        eprintln!("error: no tickers configured");
        return ExitCode::from(2);
    }

    eprintln!("\nUniverse ({} tickers):", tickers.len());
    eprintln!("  {}", tickers.join(", "));

    eprintln!("\nDry run complete: configuration is valid");
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_strategy_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_volatility_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    eprintln!("Configuration is valid.");
    ExitCode::SUCCESS
}

fn run_list_symbols(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let adapter = match CsvAdapter::from_config(&config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbols = match adapter.list_symbols() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if symbols.is_empty() {
        eprintln!("No symbols found");
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        eprintln!("{} symbols found", symbols.len());
    }
    ExitCode::SUCCESS
}

fn run_info(config_path: &PathBuf, tickers_override: Option<&str>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let tickers = match resolve_tickers(tickers_override, &config) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };
    if tickers.is_empty() {
        eprintln!("error: no tickers configured (use --tickers or set in config)");
        return ExitCode::from(2);
    }

    let adapter = match CsvAdapter::from_config(&config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    for ticker in &tickers {
        match adapter.get_data_range(ticker) {
            Ok(Some((min_date, max_date, count))) => {
                println!("{}: {} bars, {} to {}", ticker, count, min_date, max_date);
            }
            Ok(None) => {
                eprintln!("{}: no data found", ticker);
            }
            Err(e) => {
                eprintln!("error querying {}: {}", ticker, e);
            }
        }
    }
    ExitCode::SUCCESS
}

fn run_volatility(
    config_path: &PathBuf,
    tickers_override: Option<&str>,
    window_override: Option<usize>,
    timeframe_override: Option<&str>,
) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(e) = validate_volatility_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let tickers = match resolve_tickers(tickers_override, &config) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };
    if tickers.is_empty() {
        eprintln!("error: no tickers configured (use --tickers or set in config)");
        return ExitCode::from(2);
    }

    let window =
        window_override.unwrap_or_else(|| config.get_int("volatility", "window", 10) as usize);
    let annual_days = config.get_int("volatility", "annual_days", 365) as f64;
    let timeframe_str = timeframe_override
        .map(str::to_string)
        .or_else(|| config.get_string("volatility", "timeframe"))
        .unwrap_or_else(|| "daily".to_string());
    let timeframe: Timeframe = match timeframe_str.parse() {
        Ok(tf) => tf,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let adapter = match CsvAdapter::from_config(&config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Historical volatility: window {}, {} bars",
        window, timeframe
    );
    for ticker in &tickers {
        match adapter.fetch_bars(ticker, NaiveDate::MIN, NaiveDate::MAX) {
            Ok(bars) => {
                let series = SymbolSeries::new(ticker.clone(), bars);
                match historical_volatility(&series.closes(), window, annual_days, timeframe) {
                    Some(hv) => println!("{}  {:.2}", ticker, hv),
                    None => println!("{}  n/a", ticker),
                }
            }
            Err(e) => {
                eprintln!("Warning: {} ({})", ticker, e);
                println!("{}  n/a", ticker);
            }
        }
    }
    ExitCode::SUCCESS
}
