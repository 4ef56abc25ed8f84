//! Annual financial statements from the Yahoo Finance fundamentals
//! timeseries API.
//!
//! One request fetches every line item Hobart consumes. The response carries
//! one result entry per requested type; each entry holds an array of yearly
//! datapoints that may contain explicit nulls for unreported periods. Those
//! nulls stay `None` in the assembled records.

use crate::error::{DataError, Result};
use crate::statements::{
    BalanceSheet, CashFlowStatement, FinancialStatements, IncomeStatement, StatementSeries,
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tokio::time::sleep;

/// Income-statement line items, keyed by the timeseries type name.
const INCOME_TYPES: [&str; 7] = [
    "annualOperatingIncome",
    "annualPretaxIncome",
    "annualTaxProvision",
    "annualNetIncome",
    "annualTotalRevenue",
    "annualDilutedAverageShares",
    "annualEBIT",
];

/// Balance-sheet line items.
const BALANCE_TYPES: [&str; 6] = [
    "annualTotalAssets",
    "annualCurrentLiabilities",
    "annualCashAndCashEquivalents",
    "annualLongTermDebt",
    "annualCurrentDebt",
    "annualStockholdersEquity",
];

/// Cash-flow-statement line items.
const CASHFLOW_TYPES: [&str; 4] = [
    "annualOperatingCashFlow",
    "annualCapitalExpenditure",
    "annualFreeCashFlow",
    "annualStockBasedCompensation",
];

/// How far back to request annual periods.
const LOOKBACK_YEARS: i32 = 12;

/// Response from the fundamentals timeseries API.
#[derive(Debug, Deserialize)]
struct TimeseriesResponse {
    timeseries: TimeseriesBody,
}

#[derive(Debug, Deserialize)]
struct TimeseriesBody {
    result: Option<Vec<TimeseriesEntry>>,
    error: Option<serde_json::Value>,
}

/// One entry per requested type. The datapoint array lives under a key named
/// after the type itself, so it is captured through a flattened map and
/// decoded against the type name in `meta`.
#[derive(Debug, Deserialize)]
struct TimeseriesEntry {
    meta: TimeseriesMeta,
    #[serde(flatten)]
    fields: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct TimeseriesMeta {
    #[serde(rename = "type")]
    types: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Datapoint {
    as_of_date: String,
    reported_value: Option<ReportedValue>,
}

#[derive(Debug, Clone, Deserialize)]
struct ReportedValue {
    raw: f64,
}

impl TimeseriesEntry {
    /// The (date, value) pairs reported for this entry's type.
    fn datapoints(&self) -> Vec<(NaiveDate, f64)> {
        let Some(kind) = self.meta.types.first() else {
            return Vec::new();
        };
        let Some(raw) = self.fields.get(kind) else {
            return Vec::new();
        };
        let Ok(points) = serde_json::from_value::<Vec<Option<Datapoint>>>(raw.clone()) else {
            log::debug!("unparseable datapoint array for {kind}");
            return Vec::new();
        };

        points
            .into_iter()
            .flatten()
            .filter_map(|point| {
                let value = point.reported_value.as_ref()?.raw;
                let date = NaiveDate::parse_from_str(&point.as_of_date, "%Y-%m-%d").ok()?;
                Some((date, value))
            })
            .collect()
    }
}

/// Values per line-item type, each keyed by period-end date.
type FieldTable = HashMap<String, BTreeMap<NaiveDate, f64>>;

/// Yahoo Finance annual-fundamentals provider.
#[derive(Debug)]
pub struct YahooFundamentalsProvider {
    client: reqwest::Client,
    rate_limit_delay: Duration,
}

impl YahooFundamentalsProvider {
    /// Create a new fundamentals provider with default rate limiting (1 req/sec).
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)")
                .build()
                .expect("Failed to create HTTP client"),
            rate_limit_delay: Duration::from_millis(1000),
        }
    }

    /// Create a new provider with custom rate limiting.
    pub fn with_rate_limit(rate_limit_delay: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)")
                .build()
                .expect("Failed to create HTTP client"),
            rate_limit_delay,
        }
    }

    /// Fetch the three annual statement series for a symbol.
    pub async fn fetch_statements(&self, symbol: &str) -> Result<FinancialStatements> {
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let all_types: Vec<&str> = INCOME_TYPES
            .iter()
            .chain(BALANCE_TYPES.iter())
            .chain(CASHFLOW_TYPES.iter())
            .copied()
            .collect();

        let now = Utc::now();
        let period2 = now.timestamp();
        let period1 = now
            .with_year(now.year() - LOOKBACK_YEARS)
            .map_or(0, |start| start.timestamp());

        let url = format!(
            "https://query2.finance.yahoo.com/ws/fundamentals-timeseries/v1/finance/timeseries/{symbol}?symbol={symbol}&type={}&period1={period1}&period2={period2}",
            all_types.join(",")
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(DataError::Http(format!(
                "Failed to fetch fundamentals for {}: {}",
                symbol,
                response.status()
            )));
        }

        let body = response.text().await?;

        // Apply rate limiting
        sleep(self.rate_limit_delay).await;

        parse_timeseries(symbol, &body)
    }
}

impl Default for YahooFundamentalsProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a fundamentals timeseries response body into statement series.
///
/// Exposed separately from the fetch path so fixture-based tests can exercise
/// the full assembly without a network.
pub fn parse_timeseries(symbol: &str, body: &str) -> Result<FinancialStatements> {
    let response: TimeseriesResponse = serde_json::from_str(body)?;

    if let Some(error) = response.timeseries.error {
        return Err(DataError::YahooApi(error.to_string()));
    }

    let entries = response.timeseries.result.unwrap_or_default();
    if entries.is_empty() {
        return Err(DataError::MissingData {
            symbol: symbol.to_string(),
            reason: "No timeseries results returned".to_string(),
        });
    }

    let mut fields: FieldTable = HashMap::new();
    for entry in &entries {
        let Some(kind) = entry.meta.types.first() else {
            continue;
        };
        fields
            .entry(kind.clone())
            .or_default()
            .extend(entry.datapoints());
    }

    Ok(FinancialStatements {
        symbol: symbol.to_string(),
        income: assemble_income(&fields)?,
        balance: assemble_balance(&fields)?,
        cashflow: assemble_cashflow(&fields)?,
    })
}

/// All period-end dates reported under any of the given types.
fn period_ends(fields: &FieldTable, types: &[&str]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = types
        .iter()
        .filter_map(|kind| fields.get(*kind))
        .flat_map(|series| series.keys().copied())
        .collect();
    dates.sort_unstable();
    dates.dedup();
    dates
}

fn value_at(fields: &FieldTable, kind: &str, date: NaiveDate) -> Option<f64> {
    fields.get(kind).and_then(|series| series.get(&date)).copied()
}

fn assemble_income(fields: &FieldTable) -> Result<StatementSeries<IncomeStatement>> {
    let records = period_ends(fields, &INCOME_TYPES)
        .into_iter()
        .map(|date| IncomeStatement {
            period_end: date,
            operating_income: value_at(fields, "annualOperatingIncome", date),
            pretax_income: value_at(fields, "annualPretaxIncome", date),
            tax_provision: value_at(fields, "annualTaxProvision", date),
            net_income: value_at(fields, "annualNetIncome", date),
            total_revenue: value_at(fields, "annualTotalRevenue", date),
            diluted_average_shares: value_at(fields, "annualDilutedAverageShares", date),
            ebit: value_at(fields, "annualEBIT", date),
        })
        .collect();

    StatementSeries::from_records(records)
}

fn assemble_balance(fields: &FieldTable) -> Result<StatementSeries<BalanceSheet>> {
    let records = period_ends(fields, &BALANCE_TYPES)
        .into_iter()
        .map(|date| BalanceSheet {
            period_end: date,
            total_assets: value_at(fields, "annualTotalAssets", date),
            current_liabilities: value_at(fields, "annualCurrentLiabilities", date),
            cash_and_equivalents: value_at(fields, "annualCashAndCashEquivalents", date),
            long_term_debt: value_at(fields, "annualLongTermDebt", date),
            short_term_debt: value_at(fields, "annualCurrentDebt", date),
            stockholders_equity: value_at(fields, "annualStockholdersEquity", date),
        })
        .collect();

    StatementSeries::from_records(records)
}

fn assemble_cashflow(fields: &FieldTable) -> Result<StatementSeries<CashFlowStatement>> {
    let records = period_ends(fields, &CASHFLOW_TYPES)
        .into_iter()
        .map(|date| CashFlowStatement {
            period_end: date,
            operating_cash_flow: value_at(fields, "annualOperatingCashFlow", date),
            capital_expenditure: value_at(fields, "annualCapitalExpenditure", date),
            free_cash_flow: value_at(fields, "annualFreeCashFlow", date),
            stock_based_compensation: value_at(fields, "annualStockBasedCompensation", date),
        })
        .collect();

    StatementSeries::from_records(records)
}
