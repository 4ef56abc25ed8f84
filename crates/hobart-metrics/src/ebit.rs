//! EBIT series.

use crate::series::MetricSeries;
use hobart_data::{IncomeStatement, PeriodRecord, StatementSeries};

/// EBIT per period, as reported.
pub fn compute(income: &StatementSeries<IncomeStatement>) -> MetricSeries {
    income
        .iter()
        .filter_map(|inc| Some((inc.fiscal_year(), inc.ebit?)))
        .collect()
}
