//! Data access port trait.

use chrono::NaiveDate;

use crate::domain::error::OmxtraderError;
use crate::domain::price::PriceBar;

pub trait DataPort {
    /// Closing prices for one symbol within the inclusive date range,
    /// normalized to ascending date order.
    fn fetch_bars(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceBar>, OmxtraderError>;

    fn list_symbols(&self) -> Result<Vec<String>, OmxtraderError>;

    /// Earliest date, latest date and bar count for one symbol, or `None`
    /// when the symbol holds no rows.
    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, OmxtraderError>;
}
