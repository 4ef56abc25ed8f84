//! Typed financial-statement records and the series container.
//!
//! Every line item is `Option<f64>`: a provider that does not report a line
//! item yields `None`, which downstream computations treat as "skip this
//! period", never as zero. The one documented exception is short-term debt,
//! which the ROIC invested-capital formula defaults to zero when absent.

use crate::error::{DataError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A record keyed by the end date of its reporting period.
pub trait PeriodRecord {
    /// End date of the reporting period.
    fn period_end(&self) -> NaiveDate;

    /// Calendar year of the period end, used to key metric series.
    fn fiscal_year(&self) -> i32 {
        self.period_end().year()
    }
}

/// One annual income-statement period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatement {
    /// Period end date
    pub period_end: NaiveDate,
    /// Operating income
    pub operating_income: Option<f64>,
    /// Pretax income
    pub pretax_income: Option<f64>,
    /// Tax provision
    pub tax_provision: Option<f64>,
    /// Net income
    pub net_income: Option<f64>,
    /// Total revenue
    pub total_revenue: Option<f64>,
    /// Diluted average shares outstanding over the period
    pub diluted_average_shares: Option<f64>,
    /// Earnings before interest and taxes
    pub ebit: Option<f64>,
}

impl IncomeStatement {
    /// Create an empty record for the given period end.
    pub const fn new(period_end: NaiveDate) -> Self {
        Self {
            period_end,
            operating_income: None,
            pretax_income: None,
            tax_provision: None,
            net_income: None,
            total_revenue: None,
            diluted_average_shares: None,
            ebit: None,
        }
    }
}

impl PeriodRecord for IncomeStatement {
    fn period_end(&self) -> NaiveDate {
        self.period_end
    }
}

/// One annual balance-sheet period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// Period end date
    pub period_end: NaiveDate,
    /// Total assets
    pub total_assets: Option<f64>,
    /// Current liabilities
    pub current_liabilities: Option<f64>,
    /// Cash and cash equivalents
    pub cash_and_equivalents: Option<f64>,
    /// Long-term debt
    pub long_term_debt: Option<f64>,
    /// Short-term (current) debt
    pub short_term_debt: Option<f64>,
    /// Stockholders' equity
    pub stockholders_equity: Option<f64>,
}

impl BalanceSheet {
    /// Create an empty record for the given period end.
    pub const fn new(period_end: NaiveDate) -> Self {
        Self {
            period_end,
            total_assets: None,
            current_liabilities: None,
            cash_and_equivalents: None,
            long_term_debt: None,
            short_term_debt: None,
            stockholders_equity: None,
        }
    }
}

impl PeriodRecord for BalanceSheet {
    fn period_end(&self) -> NaiveDate {
        self.period_end
    }
}

/// One annual cash-flow-statement period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowStatement {
    /// Period end date
    pub period_end: NaiveDate,
    /// Net cash provided by operating activities
    pub operating_cash_flow: Option<f64>,
    /// Capital expenditure (usually reported negative)
    pub capital_expenditure: Option<f64>,
    /// Provider-reported free cash flow
    pub free_cash_flow: Option<f64>,
    /// Stock-based compensation
    pub stock_based_compensation: Option<f64>,
}

impl CashFlowStatement {
    /// Create an empty record for the given period end.
    pub const fn new(period_end: NaiveDate) -> Self {
        Self {
            period_end,
            operating_cash_flow: None,
            capital_expenditure: None,
            free_cash_flow: None,
            stock_based_compensation: None,
        }
    }
}

impl PeriodRecord for CashFlowStatement {
    fn period_end(&self) -> NaiveDate {
        self.period_end
    }
}

/// An ordered-by-date collection of statement records for one ticker.
///
/// Dates are unique within a series; gaps between periods are allowed, and
/// growth downstream is computed against the nearest earlier period present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementSeries<R> {
    records: Vec<R>,
}

impl<R: PeriodRecord> StatementSeries<R> {
    /// Build a series from unordered records.
    ///
    /// Records are sorted ascending by period end. Returns
    /// [`DataError::DuplicatePeriod`] if two records share a period-end date.
    pub fn from_records(mut records: Vec<R>) -> Result<Self> {
        records.sort_by_key(PeriodRecord::period_end);

        for pair in records.windows(2) {
            if pair[0].period_end() == pair[1].period_end() {
                return Err(DataError::DuplicatePeriod {
                    date: pair[0].period_end(),
                });
            }
        }

        Ok(Self { records })
    }

    /// Create an empty series.
    pub const fn empty() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Number of periods in the series.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the series holds no periods.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    /// The record for an exact period-end date, if present.
    pub fn get(&self, date: NaiveDate) -> Option<&R> {
        self.records
            .binary_search_by_key(&date, |r| r.period_end())
            .ok()
            .map(|idx| &self.records[idx])
    }

    /// The most recent record, if any.
    pub fn latest(&self) -> Option<&R> {
        self.records.last()
    }
}

impl<'a, R: PeriodRecord> IntoIterator for &'a StatementSeries<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// The three aligned statement series for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialStatements {
    /// Stock symbol
    pub symbol: String,
    /// Annual income statements
    pub income: StatementSeries<IncomeStatement>,
    /// Annual balance sheets
    pub balance: StatementSeries<BalanceSheet>,
    /// Annual cash-flow statements
    pub cashflow: StatementSeries<CashFlowStatement>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_series_sorts_ascending() {
        let series = StatementSeries::from_records(vec![
            IncomeStatement::new(date(2023, 12, 31)),
            IncomeStatement::new(date(2021, 12, 31)),
            IncomeStatement::new(date(2022, 12, 31)),
        ])
        .unwrap();

        let years: Vec<i32> = series.iter().map(|r| r.fiscal_year()).collect();
        assert_eq!(years, vec![2021, 2022, 2023]);
        assert_eq!(series.latest().unwrap().fiscal_year(), 2023);
    }

    #[test]
    fn test_series_rejects_duplicate_dates() {
        let result = StatementSeries::from_records(vec![
            BalanceSheet::new(date(2023, 12, 31)),
            BalanceSheet::new(date(2023, 12, 31)),
        ]);

        assert!(matches!(
            result,
            Err(DataError::DuplicatePeriod { date: dup }) if dup == date(2023, 12, 31)
        ));
    }

    #[test]
    fn test_series_allows_gaps() {
        let series = StatementSeries::from_records(vec![
            CashFlowStatement::new(date(2019, 12, 31)),
            CashFlowStatement::new(date(2023, 12, 31)),
        ])
        .unwrap();

        assert_eq!(series.len(), 2);
        assert!(series.get(date(2021, 12, 31)).is_none());
        assert!(series.get(date(2019, 12, 31)).is_some());
    }
}
