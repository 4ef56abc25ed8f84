//! Free cash flow.

use crate::series::MetricSeries;
use hobart_data::{CashFlowStatement, PeriodRecord, StatementSeries};

/// FCF per period: `operating_cash_flow - |capital_expenditure|`.
///
/// Capital expenditure is conventionally reported negative; taking the
/// absolute value defends against providers that report it positive. Periods
/// missing either input are skipped.
pub fn compute(cashflow: &StatementSeries<CashFlowStatement>) -> MetricSeries {
    let mut series = MetricSeries::new();

    for cf in cashflow {
        let (Some(operating), Some(capex)) = (cf.operating_cash_flow, cf.capital_expenditure)
        else {
            log::debug!("fcf: skipped {}: inputs missing", cf.fiscal_year());
            continue;
        };
        series.insert(cf.fiscal_year(), operating - capex.abs());
    }

    series
}
