//! Stockholders' equity series.

use crate::series::MetricSeries;
use hobart_data::{BalanceSheet, PeriodRecord, StatementSeries};

/// Stockholders' equity per period, as reported.
pub fn compute(balance: &StatementSeries<BalanceSheet>) -> MetricSeries {
    balance
        .iter()
        .filter_map(|bal| Some((bal.fiscal_year(), bal.stockholders_equity?)))
        .collect()
}
