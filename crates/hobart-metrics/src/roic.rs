//! Return on invested capital.

use crate::series::MetricSeries;
use hobart_data::{BalanceSheet, IncomeStatement, PeriodRecord, StatementSeries};

/// Compute the ROIC series, in percent, for every period present in both the
/// income and balance-sheet series.
///
/// `NOPAT = operating_income * (1 - tax_provision / pretax_income)`.
///
/// Invested capital comes in two variants depending on what the balance sheet
/// exposes:
///
/// - variant A, when cash is reported:
///   `total_assets - current_liabilities - cash`
/// - variant B, when cash is absent but the debt breakdown is reported:
///   `total_assets - current_liabilities + (long_term_debt - short_term_debt)`
///   with short-term debt defaulting to zero when absent.
///
/// A period is skipped — not zero-filled — when pretax income is zero, when a
/// required line item is absent, or when invested capital works out to zero.
pub fn compute(
    income: &StatementSeries<IncomeStatement>,
    balance: &StatementSeries<BalanceSheet>,
) -> MetricSeries {
    let mut series = MetricSeries::new();

    for inc in income {
        let year = inc.fiscal_year();
        let Some(bal) = balance.get(inc.period_end()) else {
            log::debug!("roic: no balance sheet for period ending {}", inc.period_end());
            continue;
        };

        let Some(nopat) = nopat(inc) else {
            log::debug!("roic: skipped {year}: NOPAT inputs missing or pretax income is zero");
            continue;
        };
        let Some(invested_capital) = invested_capital(bal) else {
            log::debug!("roic: skipped {year}: invested-capital inputs missing");
            continue;
        };
        if invested_capital == 0.0 {
            log::debug!("roic: skipped {year}: zero invested capital");
            continue;
        }

        series.insert(year, nopat / invested_capital * 100.0);
    }

    series
}

/// Net operating profit after tax, `None` when not computable.
fn nopat(inc: &IncomeStatement) -> Option<f64> {
    let operating_income = inc.operating_income?;
    let pretax_income = inc.pretax_income?;
    let tax_provision = inc.tax_provision?;
    if pretax_income == 0.0 {
        return None;
    }
    let tax_rate = tax_provision / pretax_income;
    Some(operating_income * (1.0 - tax_rate))
}

/// Invested capital, `None` when neither variant's inputs are reported.
fn invested_capital(bal: &BalanceSheet) -> Option<f64> {
    let total_assets = bal.total_assets?;
    let current_liabilities = bal.current_liabilities?;

    match (bal.cash_and_equivalents, bal.long_term_debt) {
        (Some(cash), _) => Some(total_assets - current_liabilities - cash),
        (None, Some(long_term_debt)) => {
            let short_term_debt = bal.short_term_debt.unwrap_or(0.0);
            Some(total_assets - current_liabilities + (long_term_debt - short_term_debt))
        }
        (None, None) => None,
    }
}
