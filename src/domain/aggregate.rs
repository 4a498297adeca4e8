//! Combining per-symbol equity curves into one portfolio curve.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::equity::EquityCurve;

/// Merges per-symbol curves into a single curve over continuous calendar
/// days.
///
/// Dates contributed by more than one curve resolve to the first curve in
/// iteration order. The result spans every calendar day from the earliest to
/// the latest observed date; days with no observation carry the previous
/// day's value forward.
pub fn combine_equity_curves<'a, I>(curves: I) -> EquityCurve
where
    I: IntoIterator<Item = &'a EquityCurve>,
{
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for curve in curves {
        for point in &curve.points {
            by_date.entry(point.date).or_insert(point.equity);
        }
    }

    let mut combined = EquityCurve::new();
    let (first, last) = match (by_date.keys().next(), by_date.keys().next_back()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return combined,
    };

    let mut equity = 0.0;
    for date in first.iter_days() {
        if date > last {
            break;
        }
        if let Some(&observed) = by_date.get(&date) {
            equity = observed;
        }
        combined.record(date, equity);
    }
    combined
}
