//! CSV file data adapter.
//!
//! Reads one `<SYMBOL>.csv` file per symbol from a base directory. Files
//! carry a header row followed by `date,close` records with ISO dates.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::domain::error::OmxtraderError;
use crate::domain::price::PriceBar;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

#[derive(Debug)]
pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Builds the adapter from the `[data] csv_dir` config key.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, OmxtraderError> {
        let dir = config
            .get_string("data", "csv_dir")
            .ok_or_else(|| OmxtraderError::ConfigMissing {
                section: "data".to_string(),
                key: "csv_dir".to_string(),
            })?;
        Ok(Self::new(PathBuf::from(dir)))
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

impl DataPort for CsvAdapter {
    fn fetch_bars(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceBar>, OmxtraderError> {
        let path = self.csv_path(symbol);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(OmxtraderError::NoData {
                    symbol: symbol.to_string(),
                });
            }
            Err(e) => return Err(OmxtraderError::Io(e)),
        };

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| OmxtraderError::Data {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let date_str = record.get(0).ok_or_else(|| OmxtraderError::Data {
                reason: format!("missing date column in {}", path.display()),
            })?;
            let date =
                NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                    OmxtraderError::Data {
                        reason: format!("invalid date '{}' in {}: {}", date_str, path.display(), e),
                    }
                })?;

            if date < start_date || date > end_date {
                continue;
            }

            let close: f64 = record
                .get(1)
                .ok_or_else(|| OmxtraderError::Data {
                    reason: format!("missing close column in {}", path.display()),
                })?
                .parse()
                .map_err(|e| OmxtraderError::Data {
                    reason: format!("invalid close value in {}: {}", path.display(), e),
                })?;

            bars.push(PriceBar { date, close });
        }

        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, OmxtraderError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| OmxtraderError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| OmxtraderError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(symbol) = name_str.strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, OmxtraderError> {
        let bars = self.fetch_bars(symbol, NaiveDate::MIN, NaiveDate::MAX)?;
        Ok(match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date, bars.len())),
            _ => None,
        })
    }
}
