//! Sales (total revenue) series.

use crate::series::MetricSeries;
use hobart_data::{IncomeStatement, PeriodRecord, StatementSeries};

/// Total revenue per period, as reported. Periods without a reported revenue
/// figure are skipped.
pub fn compute(income: &StatementSeries<IncomeStatement>) -> MetricSeries {
    income
        .iter()
        .filter_map(|inc| Some((inc.fiscal_year(), inc.total_revenue?)))
        .collect()
}
