//! Equity curve tracking.

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

/// A date-ordered series of portfolio-value observations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EquityCurve {
    pub points: Vec<EquityPoint>,
}

impl EquityCurve {
    pub fn new() -> Self {
        EquityCurve { points: Vec::new() }
    }

    pub fn record(&mut self, date: NaiveDate, equity: f64) {
        self.points.push(EquityPoint { date, equity });
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    pub fn last_equity(&self) -> Option<f64> {
        self.points.last().map(|p| p.equity)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
