//! CSV report adapter implementing ReportPort.
//!
//! Writes three artifacts into the output directory: `trades.csv` with every
//! ledger entry, `equity.csv` with the combined curve, and `summary.txt`
//! with the aggregate statistics.

use std::fs;
use std::path::Path;

use crate::domain::backtest::UniverseResult;
use crate::domain::error::OmxtraderError;
use crate::domain::position::Trade;
use crate::domain::strategy::Strategy;
use crate::ports::report_port::ReportPort;

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn csv_error(path: &Path, e: csv::Error) -> OmxtraderError {
    OmxtraderError::Data {
        reason: format!("failed to write {}: {}", path.display(), e),
    }
}

fn write_trades(result: &UniverseResult, path: &Path) -> Result<(), OmxtraderError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;
    writer
        .write_record([
            "symbol",
            "entry_date",
            "entry_price",
            "shares",
            "stop_loss_price",
            "exit_date",
            "exit_price",
            "return",
        ])
        .map_err(|e| csv_error(path, e))?;

    for symbol in &result.symbols {
        for trade in symbol.ledger.trades() {
            let record = match trade {
                Trade::Completed(t) => [
                    trade.symbol().to_string(),
                    trade.entry_date().to_string(),
                    t.entry_price.to_string(),
                    t.shares.to_string(),
                    t.stop_loss_price.to_string(),
                    t.exit_date.to_string(),
                    t.exit_price.to_string(),
                    t.trade_return.to_string(),
                ],
                Trade::Open(t) => [
                    trade.symbol().to_string(),
                    trade.entry_date().to_string(),
                    t.entry_price.to_string(),
                    t.shares.to_string(),
                    t.stop_loss_price.to_string(),
                    String::new(),
                    String::new(),
                    String::new(),
                ],
            };
            writer.write_record(&record).map_err(|e| csv_error(path, e))?;
        }
    }

    writer.flush().map_err(OmxtraderError::Io)?;
    Ok(())
}

fn write_equity(result: &UniverseResult, path: &Path) -> Result<(), OmxtraderError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;
    writer
        .write_record(["date", "equity"])
        .map_err(|e| csv_error(path, e))?;

    for point in &result.combined_equity.points {
        writer
            .write_record([point.date.to_string(), point.equity.to_string()])
            .map_err(|e| csv_error(path, e))?;
    }

    writer.flush().map_err(OmxtraderError::Io)?;
    Ok(())
}

fn write_summary(
    result: &UniverseResult,
    strategy: &Strategy,
    path: &Path,
) -> Result<(), OmxtraderError> {
    let summary = &result.summary;
    let content = format!(
        "Strategy: {}\n\
         Total Return: {:.2}\n\
         Number of Trades: {}\n\
         Win Rate: {:.2}%\n\
         Number of Wins: {}\n\
         Number of Losses: {}\n",
        strategy.name,
        summary.total_return,
        summary.num_trades,
        summary.win_rate * 100.0,
        summary.num_wins,
        summary.num_losses,
    );
    fs::write(path, content).map_err(OmxtraderError::Io)?;
    Ok(())
}

impl ReportPort for CsvReportAdapter {
    fn write_report(
        &self,
        result: &UniverseResult,
        strategy: &Strategy,
        output_dir: &Path,
    ) -> Result<(), OmxtraderError> {
        fs::create_dir_all(output_dir).map_err(OmxtraderError::Io)?;

        write_trades(result, &output_dir.join("trades.csv"))?;
        write_equity(result, &output_dir.join("equity.csv"))?;
        write_summary(result, strategy, &output_dir.join("summary.txt"))?;

        Ok(())
    }
}
