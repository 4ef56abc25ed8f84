//! One-call analysis orchestration.
//!
//! Pure over already-fetched inputs: every fetch completes before this runs,
//! and each analysis builds its own series and discards them afterwards.
//! Independent computations degrade independently — a failed valuation or an
//! empty metric becomes a labeled gap in the report, never an aborted run.

use chrono::Utc;
use hobart_data::{BondYield, BondYieldSource, FinancialStatements, QuoteSnapshot};
use hobart_metrics::{GrowthMode, GrowthSummary, ebit, eps, equity, fcf, roic, sales};
use hobart_output::report::{AnalysisReport, MetricReport, MetricsSection};
use hobart_valuation::dcf::{self, ValuationMode};
use hobart_valuation::{DcfParameters, DcfValuation, PriceRatios, YieldComparison, scenario};

/// Configuration for one analysis run, passed explicitly at call time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    /// Parameters for the standard DCF model
    pub dcf: DcfParameters,
    /// Parameters for the reinvestment-adjusted DCF model
    pub reinvestment_dcf: DcfParameters,
    /// Optional hypothetical price for the scenario comparison
    pub target_price: Option<f64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            dcf: DcfParameters::default(),
            reinvestment_dcf: DcfParameters::reinvestment_adjusted(),
            target_price: None,
        }
    }
}

/// Run the full analysis over fetched inputs.
pub fn run_analysis(
    statements: &FinancialStatements,
    quote: &QuoteSnapshot,
    bond_yield: &BondYield,
    config: &AnalysisConfig,
) -> AnalysisReport {
    let mut notes = Vec::new();

    if bond_yield.source == BondYieldSource::Fallback {
        notes.push(format!(
            "Bond yield uses the documented default of {:.1}%; the Treasury quote was unavailable",
            bond_yield.pct
        ));
    }

    let metrics = MetricsSection {
        roic: MetricReport::new(
            "ROIC",
            roic::compute(&statements.income, &statements.balance),
            GrowthMode::PercentagePoints,
        ),
        equity: MetricReport::new(
            "Equity",
            equity::compute(&statements.balance),
            GrowthMode::PercentChange,
        ),
        eps: MetricReport::new(
            "EPS",
            eps::compute(&statements.income),
            GrowthMode::PercentChange,
        ),
        sales: MetricReport::new(
            "Sales",
            sales::compute(&statements.income),
            GrowthMode::PercentChange,
        ),
        free_cash_flow: MetricReport::new(
            "Free Cash Flow",
            fcf::compute(&statements.cashflow),
            GrowthMode::PercentChange,
        ),
        ebit: MetricReport::new(
            "EBIT",
            ebit::compute(&statements.income),
            GrowthMode::PercentChange,
        ),
    };

    let growth_summary = GrowthSummary {
        roic: metrics.roic.average_growth,
        equity: metrics.equity.average_growth,
        earnings: metrics.eps.average_growth,
        sales: metrics.sales.average_growth,
        free_cash_flow: metrics.free_cash_flow.average_growth,
    };

    let standard_valuation = valuate(
        ValuationMode::Standard,
        statements,
        quote,
        config.dcf,
        &mut notes,
    );
    let reinvestment_valuation = valuate(
        ValuationMode::ReinvestmentAdjusted,
        statements,
        quote,
        config.reinvestment_dcf,
        &mut notes,
    );

    let scenario = config.target_price.and_then(|target_price| {
        match scenario::price_scenario(quote, target_price, bond_yield) {
            Ok(scenario) => Some(scenario),
            Err(e) => {
                log::warn!("price scenario skipped: {e}");
                notes.push(format!("Price scenario skipped: {e}"));
                None
            }
        }
    });

    AnalysisReport {
        symbol: statements.symbol.clone(),
        generated_at: Utc::now(),
        quote: quote.clone(),
        bond_yield: *bond_yield,
        growth_summary,
        ratios: PriceRatios::from_quote(quote, bond_yield),
        yields: YieldComparison::from_quote(quote, bond_yield),
        metrics,
        standard_valuation,
        reinvestment_valuation,
        scenario,
        notes,
    }
}

/// Run one DCF mode, degrading to `None` plus a note on failure.
fn valuate(
    mode: ValuationMode,
    statements: &FinancialStatements,
    quote: &QuoteSnapshot,
    params: DcfParameters,
    notes: &mut Vec<String>,
) -> Option<DcfValuation> {
    let Some(latest) = statements.cashflow.latest() else {
        notes.push(format!("{mode} DCF skipped: no cash flow statements"));
        return None;
    };
    let Some(base_fcf) = dcf::base_cash_flow(mode, latest) else {
        notes.push(format!("{mode} DCF skipped: no cash flow base to project from"));
        return None;
    };

    match dcf::run(mode, base_fcf, params, quote) {
        Ok(valuation) => {
            if valuation.terminal_clamped {
                notes.push(format!(
                    "{mode} DCF: terminal growth clamped to {:.1}% to keep it below the discount rate",
                    valuation.params.terminal_growth * 100.0
                ));
            }
            Some(valuation)
        }
        Err(e) => {
            log::warn!("{mode} DCF skipped: {e}");
            notes.push(format!("{mode} DCF skipped: {e}"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use hobart_data::{
        BalanceSheet, CashFlowStatement, IncomeStatement, StatementSeries,
    };

    fn date(y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, 12, 31).unwrap()
    }

    fn statements() -> FinancialStatements {
        let income = StatementSeries::from_records(
            (2021..=2023)
                .map(|year| IncomeStatement {
                    operating_income: Some(75_000.0 + 5_000.0 * (year - 2021) as f64),
                    pretax_income: Some(70_000.0),
                    tax_provision: Some(14_000.0),
                    net_income: Some(40_000.0 + 5_000.0 * (year - 2021) as f64),
                    total_revenue: Some(400_000.0 + 50_000.0 * (year - 2021) as f64),
                    diluted_average_shares: Some(10_000.0),
                    ebit: Some(80_000.0),
                    ..IncomeStatement::new(date(year))
                })
                .collect(),
        )
        .unwrap();

        let balance = StatementSeries::from_records(
            (2021..=2023)
                .map(|year| BalanceSheet {
                    total_assets: Some(900_000.0),
                    current_liabilities: Some(100_000.0),
                    cash_and_equivalents: Some(50_000.0),
                    stockholders_equity: Some(500_000.0 + 50_000.0 * (year - 2021) as f64),
                    ..BalanceSheet::new(date(year))
                })
                .collect(),
        )
        .unwrap();

        let cashflow = StatementSeries::from_records(
            (2021..=2023)
                .map(|year| CashFlowStatement {
                    operating_cash_flow: Some(60_000.0),
                    capital_expenditure: Some(-20_000.0),
                    free_cash_flow: Some(40_000.0),
                    ..CashFlowStatement::new(date(year))
                })
                .collect(),
        )
        .unwrap();

        FinancialStatements {
            symbol: "TEST".to_string(),
            income,
            balance,
            cashflow,
        }
    }

    fn quote() -> QuoteSnapshot {
        let mut q = QuoteSnapshot::empty("TEST");
        q.current_price = Some(50.0);
        q.trailing_eps = Some(4.5);
        q.forward_eps = Some(5.0);
        q.dividend_rate = Some(1.0);
        q.shares_outstanding = Some(10_000.0);
        q
    }

    #[test]
    fn test_full_run_produces_both_valuations() {
        let report = run_analysis(
            &statements(),
            &quote(),
            &BondYield::market(4.0),
            &AnalysisConfig::default(),
        );

        assert_eq!(report.symbol, "TEST");
        assert_eq!(report.metrics.roic.series.len(), 3);
        assert!(report.standard_valuation.is_some());
        assert!(report.reinvestment_valuation.is_some());
        assert!(report.scenario.is_none());

        let standard = report.standard_valuation.unwrap();
        assert_relative_eq!(standard.base_fcf, 40_000.0);
        let reinvestment = report.reinvestment_valuation.unwrap();
        assert_relative_eq!(reinvestment.base_fcf, 60_000.0 * 0.67, max_relative = 1e-10);
    }

    #[test]
    fn test_growth_summary_wired_from_metrics() {
        let report = run_analysis(
            &statements(),
            &quote(),
            &BondYield::market(4.0),
            &AnalysisConfig::default(),
        );

        // Sales grow 450k -> 500k over 400k -> 450k: (50/400 + 50/450)/2
        let expected = (50.0 / 400.0 * 100.0 + 50.0 / 450.0 * 100.0) / 2.0;
        assert_relative_eq!(
            report.growth_summary.sales.unwrap(),
            expected,
            max_relative = 1e-10
        );
        assert!(report.growth_summary.overall().is_some());
    }

    #[test]
    fn test_missing_shares_degrades_valuations_only() {
        let mut q = quote();
        q.shares_outstanding = None;

        let report = run_analysis(
            &statements(),
            &q,
            &BondYield::market(4.0),
            &AnalysisConfig::default(),
        );

        // Valuations degrade with notes; metrics are untouched
        assert!(report.standard_valuation.is_none());
        assert!(report.reinvestment_valuation.is_none());
        assert_eq!(report.notes.len(), 2);
        assert!(!report.metrics.roic.series.is_empty());
        assert!(!report.metrics.sales.series.is_empty());
    }

    #[test]
    fn test_fallback_bond_yield_is_noted() {
        let report = run_analysis(
            &statements(),
            &quote(),
            &BondYield::fallback(),
            &AnalysisConfig::default(),
        );

        assert!(report.notes.iter().any(|n| n.contains("default")));
    }

    #[test]
    fn test_target_price_produces_scenario() {
        let config = AnalysisConfig {
            target_price: Some(40.0),
            ..AnalysisConfig::default()
        };
        let report = run_analysis(&statements(), &quote(), &BondYield::market(4.0), &config);

        let scenario = report.scenario.unwrap();
        assert_relative_eq!(scenario.target.price, 40.0);
        assert_relative_eq!(scenario.price_change_pct, -20.0);
    }

    #[test]
    fn test_empty_statements_still_produce_a_report() {
        let statements = FinancialStatements {
            symbol: "EMPTY".to_string(),
            income: StatementSeries::empty(),
            balance: StatementSeries::empty(),
            cashflow: StatementSeries::empty(),
        };

        let report = run_analysis(
            &statements,
            &quote(),
            &BondYield::market(4.0),
            &AnalysisConfig::default(),
        );

        assert!(report.metrics.roic.series.is_empty());
        assert_eq!(report.growth_summary.overall(), None);
        assert!(report.standard_valuation.is_none());
        assert!(report.notes.iter().any(|n| n.contains("no cash flow")));
    }
}
