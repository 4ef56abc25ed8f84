//! End-to-end parsing of a fundamentals timeseries payload into aligned
//! statement series.

use chrono::NaiveDate;
use hobart_data::yahoo::fundamentals::parse_timeseries;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A trimmed but structurally faithful payload: three statement groups, two
/// fiscal years, one explicit null datapoint, one line item missing entirely.
const FIXTURE: &str = r#"{
    "timeseries": {
        "result": [
            {
                "meta": {"symbol": ["ACME"], "type": ["annualOperatingIncome"]},
                "timestamp": [1640908800, 1672444800],
                "annualOperatingIncome": [
                    {"asOfDate": "2021-12-31", "periodType": "12M", "currencyCode": "USD",
                     "reportedValue": {"raw": 75000.0, "fmt": "75.00k"}},
                    {"asOfDate": "2022-12-31", "periodType": "12M", "currencyCode": "USD",
                     "reportedValue": {"raw": 90000.0, "fmt": "90.00k"}}
                ]
            },
            {
                "meta": {"symbol": ["ACME"], "type": ["annualPretaxIncome"]},
                "timestamp": [1640908800, 1672444800],
                "annualPretaxIncome": [
                    {"asOfDate": "2021-12-31", "periodType": "12M", "currencyCode": "USD",
                     "reportedValue": {"raw": 70000.0, "fmt": "70.00k"}},
                    {"asOfDate": "2022-12-31", "periodType": "12M", "currencyCode": "USD",
                     "reportedValue": {"raw": 85000.0, "fmt": "85.00k"}}
                ]
            },
            {
                "meta": {"symbol": ["ACME"], "type": ["annualTaxProvision"]},
                "timestamp": [1640908800, 1672444800],
                "annualTaxProvision": [
                    {"asOfDate": "2021-12-31", "periodType": "12M", "currencyCode": "USD",
                     "reportedValue": {"raw": 14000.0, "fmt": "14.00k"}},
                    null
                ]
            },
            {
                "meta": {"symbol": ["ACME"], "type": ["annualTotalAssets"]},
                "timestamp": [1640908800, 1672444800],
                "annualTotalAssets": [
                    {"asOfDate": "2021-12-31", "periodType": "12M", "currencyCode": "USD",
                     "reportedValue": {"raw": 900000.0, "fmt": "900.00k"}},
                    {"asOfDate": "2022-12-31", "periodType": "12M", "currencyCode": "USD",
                     "reportedValue": {"raw": 1000000.0, "fmt": "1.00M"}}
                ]
            },
            {
                "meta": {"symbol": ["ACME"], "type": ["annualCurrentLiabilities"]},
                "timestamp": [1672444800],
                "annualCurrentLiabilities": [
                    {"asOfDate": "2022-12-31", "periodType": "12M", "currencyCode": "USD",
                     "reportedValue": {"raw": 100000.0, "fmt": "100.00k"}}
                ]
            },
            {
                "meta": {"symbol": ["ACME"], "type": ["annualOperatingCashFlow"]},
                "timestamp": [1640908800, 1672444800],
                "annualOperatingCashFlow": [
                    {"asOfDate": "2021-12-31", "periodType": "12M", "currencyCode": "USD",
                     "reportedValue": {"raw": 50000.0, "fmt": "50.00k"}},
                    {"asOfDate": "2022-12-31", "periodType": "12M", "currencyCode": "USD",
                     "reportedValue": {"raw": 60000.0, "fmt": "60.00k"}}
                ]
            },
            {
                "meta": {"symbol": ["ACME"], "type": ["annualCapitalExpenditure"]},
                "timestamp": [1640908800, 1672444800],
                "annualCapitalExpenditure": [
                    {"asOfDate": "2021-12-31", "periodType": "12M", "currencyCode": "USD",
                     "reportedValue": {"raw": -20000.0, "fmt": "-20.00k"}},
                    {"asOfDate": "2022-12-31", "periodType": "12M", "currencyCode": "USD",
                     "reportedValue": {"raw": -18000.0, "fmt": "-18.00k"}}
                ]
            }
        ],
        "error": null
    }
}"#;

#[test]
fn parses_all_three_statement_groups() {
    let statements = parse_timeseries("ACME", FIXTURE).unwrap();

    assert_eq!(statements.symbol, "ACME");
    assert_eq!(statements.income.len(), 2);
    assert_eq!(statements.balance.len(), 2);
    assert_eq!(statements.cashflow.len(), 2);
}

#[test]
fn income_values_land_on_the_right_periods() {
    let statements = parse_timeseries("ACME", FIXTURE).unwrap();

    let y2021 = statements.income.get(date(2021, 12, 31)).unwrap();
    assert_eq!(y2021.operating_income, Some(75000.0));
    assert_eq!(y2021.pretax_income, Some(70000.0));
    assert_eq!(y2021.tax_provision, Some(14000.0));

    let y2022 = statements.income.get(date(2022, 12, 31)).unwrap();
    assert_eq!(y2022.operating_income, Some(90000.0));
    // Explicit null in the payload: absent, not zero
    assert_eq!(y2022.tax_provision, None);
    // Never requested/reported for this ticker: absent
    assert_eq!(y2022.net_income, None);
}

#[test]
fn balance_sheet_gap_produces_partial_record() {
    let statements = parse_timeseries("ACME", FIXTURE).unwrap();

    // 2021 has assets but no current liabilities; record exists, field absent
    let y2021 = statements.balance.get(date(2021, 12, 31)).unwrap();
    assert_eq!(y2021.total_assets, Some(900000.0));
    assert_eq!(y2021.current_liabilities, None);

    let y2022 = statements.balance.get(date(2022, 12, 31)).unwrap();
    assert_eq!(y2022.current_liabilities, Some(100000.0));
}

#[test]
fn negative_capex_is_preserved_as_reported() {
    let statements = parse_timeseries("ACME", FIXTURE).unwrap();

    let y2022 = statements.cashflow.get(date(2022, 12, 31)).unwrap();
    assert_eq!(y2022.capital_expenditure, Some(-18000.0));
    assert_eq!(y2022.free_cash_flow, None);
}
