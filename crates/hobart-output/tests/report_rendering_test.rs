//! Rendering and export of a report assembled from engine outputs,
//! including one with missing data.

use chrono::Utc;
use hobart_data::{BondYield, QuoteSnapshot};
use hobart_metrics::{GrowthMode, GrowthSummary, MetricSeries};
use hobart_output::render::render_report;
use hobart_output::report::{AnalysisReport, MetricReport, MetricsSection};
use hobart_output::export::write_metrics_csv;
use hobart_valuation::dcf::{self, ValuationMode};
use hobart_valuation::{DcfParameters, PriceRatios, YieldComparison};

fn quote() -> QuoteSnapshot {
    let mut q = QuoteSnapshot::empty("ACME");
    q.current_price = Some(50.0);
    q.trailing_eps = Some(4.5);
    q.dividend_rate = Some(1.0);
    q.shares_outstanding = Some(10_000.0);
    q.market_cap = Some(500_000.0);
    q
}

fn metric(name: &str, pairs: &[(i32, f64)], mode: GrowthMode) -> MetricReport {
    let series: MetricSeries = pairs.iter().copied().collect();
    MetricReport::new(name, series, mode)
}

fn report() -> AnalysisReport {
    let q = quote();
    let bond = BondYield::market(4.0);

    let metrics = MetricsSection {
        roic: metric(
            "ROIC",
            &[(2021, 10.0), (2022, 12.5), (2023, 11.0)],
            GrowthMode::PercentagePoints,
        ),
        equity: metric(
            "Equity",
            &[(2021, 500_000.0), (2022, 0.0), (2023, 550_000.0)],
            GrowthMode::PercentChange,
        ),
        eps: metric("EPS", &[(2021, 4.0), (2022, 4.4)], GrowthMode::PercentChange),
        sales: metric(
            "Sales",
            &[(2021, 400_000.0), (2022, 450_000.0)],
            GrowthMode::PercentChange,
        ),
        free_cash_flow: metric(
            "Free Cash Flow",
            &[(2021, 38_000.0), (2022, 40_000.0)],
            GrowthMode::PercentChange,
        ),
        ebit: metric("EBIT", &[], GrowthMode::PercentChange),
    };

    let growth_summary = GrowthSummary {
        roic: metrics.roic.average_growth,
        equity: metrics.equity.average_growth,
        earnings: metrics.eps.average_growth,
        sales: metrics.sales.average_growth,
        free_cash_flow: metrics.free_cash_flow.average_growth,
    };

    let standard_valuation =
        dcf::run(ValuationMode::Standard, 40_000.0, DcfParameters::default(), &q).ok();

    AnalysisReport {
        symbol: "ACME".to_string(),
        generated_at: Utc::now(),
        ratios: PriceRatios::from_quote(&q, &bond),
        yields: YieldComparison::from_quote(&q, &bond),
        quote: q,
        bond_yield: bond,
        metrics,
        growth_summary,
        standard_valuation,
        reinvestment_valuation: None,
        scenario: None,
        notes: vec!["Reinvestment-adjusted DCF skipped: no cash flow base".to_string()],
    }
}

#[test]
fn renders_every_section() {
    let rendered = render_report(&report());

    assert!(rendered.contains("STOCK ANALYSIS: ACME"));
    assert!(rendered.contains("BUSINESS METRICS"));
    assert!(rendered.contains("AVERAGE ANNUAL GROWTH RATES"));
    assert!(rendered.contains("YIELD COMPARISON AND MARGIN OF SAFETY"));
    assert!(rendered.contains("DCF VALUATION"));
}

#[test]
fn missing_data_renders_labeled_not_crashed() {
    let rendered = render_report(&report());

    // Empty EBIT series
    assert!(rendered.contains("EBIT: insufficient data"));
    // Absent reinvestment valuation
    assert!(rendered.contains("Reinvestment-adjusted DCF valuation: insufficient data"));
    // Zero-base equity growth observation
    assert!(rendered.contains("N/A"));
    // The note list survives
    assert!(rendered.contains("Reinvestment-adjusted DCF skipped"));
}

#[test]
fn valuation_section_shows_verdict() {
    let r = report();
    let valuation = r.standard_valuation.as_ref().unwrap();
    let rendered = render_report(&r);

    if valuation.is_undervalued() {
        assert!(rendered.contains("UNDERVALUED"));
    } else {
        assert!(rendered.contains("OVERVALUED"));
    }
}

#[test]
fn report_round_trips_through_json() {
    let r = report();
    let json = r.to_json().unwrap();
    let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.symbol, r.symbol);
    assert_eq!(parsed.metrics.roic.series, r.metrics.roic.series);
    assert_eq!(parsed.standard_valuation, r.standard_valuation);
}

#[test]
fn csv_export_covers_populated_metrics() {
    let r = report();
    let mut buffer = Vec::new();
    write_metrics_csv(&mut buffer, &r.symbol, &r.metrics).unwrap();

    let text = String::from_utf8(buffer).unwrap();
    // header + 3 roic + 3 equity + 2 eps + 2 sales + 2 fcf (ebit empty)
    assert_eq!(text.lines().count(), 13);
    assert!(!text.contains("EBIT"));
}
