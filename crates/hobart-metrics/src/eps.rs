//! Earnings per share.

use crate::series::MetricSeries;
use hobart_data::{IncomeStatement, PeriodRecord, StatementSeries};

/// EPS per period: `net_income / diluted_average_shares`.
///
/// A period is skipped when either field is absent or shares are zero.
pub fn compute(income: &StatementSeries<IncomeStatement>) -> MetricSeries {
    let mut series = MetricSeries::new();

    for inc in income {
        let (Some(net_income), Some(shares)) = (inc.net_income, inc.diluted_average_shares) else {
            log::debug!("eps: skipped {}: inputs missing", inc.fiscal_year());
            continue;
        };
        if shares == 0.0 {
            log::debug!("eps: skipped {}: zero diluted shares", inc.fiscal_year());
            continue;
        }
        series.insert(inc.fiscal_year(), net_income / shares);
    }

    series
}
