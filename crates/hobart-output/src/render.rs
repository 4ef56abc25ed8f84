//! Text rendering of an analysis report.
//!
//! Tables and boxed panels in the style of the terminal dashboard. Sections
//! whose inputs were unavailable render a labeled "insufficient data" line;
//! rendering never fails.

use crate::report::{AnalysisReport, MetricReport};
use hobart_data::BondYieldSource;
use hobart_metrics::{GrowthClass, GrowthSummary};
use hobart_valuation::{DcfValuation, PriceRatios, PriceScenario, YieldComparison};
use std::fmt::Write as _;

const BOX_WIDTH: usize = 70;

/// Render the full report as display text.
pub fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();

    out.push_str(&section_header(&format!(
        "STOCK ANALYSIS: {}",
        report.symbol
    )));
    out.push_str(&render_quote(report));

    out.push_str(&section_header("BUSINESS METRICS"));
    for metric in report.metrics.iter() {
        out.push_str(&subsection_header(&metric.name));
        out.push_str(&render_metric_table(metric));
    }

    out.push_str(&render_growth_summary(&report.growth_summary));

    out.push_str(&section_header("VALUATION METRICS"));
    out.push_str(&render_ratios(&report.ratios, report.quote.current_price));
    out.push_str(&render_yields(&report.yields));

    out.push_str(&section_header("DCF VALUATION"));
    match &report.standard_valuation {
        Some(valuation) => out.push_str(&render_valuation(valuation)),
        None => out.push_str("Standard DCF valuation: insufficient data\n"),
    }
    match &report.reinvestment_valuation {
        Some(valuation) => out.push_str(&render_valuation(valuation)),
        None => out.push_str("Reinvestment-adjusted DCF valuation: insufficient data\n"),
    }

    if let Some(scenario) = &report.scenario {
        out.push_str(&section_header("PRICE SCENARIO"));
        out.push_str(&render_scenario(scenario));
    }

    if !report.notes.is_empty() {
        out.push_str(&subsection_header("Notes"));
        for note in &report.notes {
            let _ = writeln!(out, "• {note}");
        }
    }

    out
}

/// Double-lined section banner.
pub fn section_header(title: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "╔{}╗", "═".repeat(BOX_WIDTH));
    let _ = writeln!(out, "║{:^BOX_WIDTH$}║", title);
    let _ = writeln!(out, "╚{}╝", "═".repeat(BOX_WIDTH));
    out
}

/// Single-lined subsection banner.
pub fn subsection_header(title: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "┌{}┐", "─".repeat(BOX_WIDTH));
    let _ = writeln!(out, "│{:^BOX_WIDTH$}│", title);
    let _ = writeln!(out, "└{}┘", "─".repeat(BOX_WIDTH));
    out
}

fn render_quote(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let quote = &report.quote;

    let _ = writeln!(out, "{:<25} | {}", "Current Price", format_opt_money(quote.current_price));
    let _ = writeln!(
        out,
        "{:<25} | {}",
        "Market Cap",
        format_opt_money(quote.market_cap_or_derived())
    );
    let _ = writeln!(
        out,
        "{:<25} | {}",
        "Shares Outstanding",
        format_opt_count(quote.shares_outstanding)
    );
    let _ = writeln!(out, "{:<25} | {}", "Volume", format_opt_count(quote.volume));
    let _ = writeln!(
        out,
        "{:<25} | {}",
        "Average Volume",
        format_opt_count(quote.average_volume)
    );
    out
}

/// One metric's year/value/growth table. The first row is the base year; an
/// undefined growth observation renders "N/A".
pub fn render_metric_table(metric: &MetricReport) -> String {
    let mut out = String::new();

    if metric.series.is_empty() {
        let _ = writeln!(out, "{}: insufficient data", metric.name);
        return out;
    }

    let _ = writeln!(out, "{:<6} | {:>15} | {:>12}", "Year", "Value", "Growth");
    let _ = writeln!(out, "{}", "-".repeat(39));

    let mut growth_iter = metric.growth.iter();
    for (i, (year, value)) in metric.series.iter().enumerate() {
        let growth_str = if i == 0 {
            "Base Year".to_string()
        } else {
            growth_iter
                .next()
                .and_then(|obs| obs.rate)
                .map_or_else(|| "N/A".to_string(), |rate| format!("{rate:+.2}%"))
        };
        let _ = writeln!(out, "{year:<6} | {:>15} | {growth_str:>12}", format_value(value));
    }

    match metric.average_growth {
        Some(avg) => {
            let _ = writeln!(out, "Average growth: {avg:+.2}%");
        }
        None => {
            let _ = writeln!(out, "Average growth: N/A");
        }
    }

    out
}

fn render_growth_summary(summary: &GrowthSummary) -> String {
    let mut out = String::new();

    out.push_str(&subsection_header("AVERAGE ANNUAL GROWTH RATES"));

    let rows = [
        ("ROIC", summary.roic),
        ("Equity", summary.equity),
        ("Earnings", summary.earnings),
        ("Sales", summary.sales),
        ("Free Cash Flow", summary.free_cash_flow),
    ];
    for (label, rate) in rows {
        match rate {
            Some(rate) => {
                let _ = writeln!(
                    out,
                    "{label:<20} | {rate:>9.2}% | {:<12}",
                    GrowthClass::classify(rate).to_string()
                );
            }
            None => {
                let _ = writeln!(out, "{label:<20} | {:>10} | {:<12}", "NO DATA", "NO DATA");
            }
        }
    }

    match (summary.overall(), summary.health()) {
        (Some(overall), Some(health)) => {
            let _ = writeln!(out, "\nOverall growth: {overall:.2}% ({health})");
        }
        _ => {
            let _ = writeln!(out, "\nOverall growth: insufficient data");
        }
    }

    out
}

fn render_ratios(ratios: &PriceRatios, current_price: Option<f64>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{:<25} | {:>12}", "Metric", "Value");
    let _ = writeln!(out, "{}", "-".repeat(40));
    let _ = writeln!(out, "{:<25} | {:>12}", "Trailing P/E", format_opt_ratio(ratios.trailing_pe));
    let _ = writeln!(out, "{:<25} | {:>12}", "Forward P/E", format_opt_ratio(ratios.forward_pe));
    let _ = writeln!(
        out,
        "{:<25} | {:>11.2}%",
        "Trailing Earnings Yield", ratios.trailing_earnings_yield_pct
    );
    let _ = writeln!(
        out,
        "{:<25} | {:>11.2}%",
        "Forward Earnings Yield", ratios.forward_earnings_yield_pct
    );
    let _ = writeln!(out, "{:<25} | {:>11.2}%", "Dividend Yield", ratios.dividend_yield_pct);

    match (ratios.breakeven_price, current_price) {
        (Some(breakeven), Some(price)) => {
            let verdict = if price > breakeven { "OVERVALUED" } else { "UNDERVALUED" };
            let _ = writeln!(
                out,
                "{:<25} | {:>12} | {verdict} vs bond benchmark",
                "Breakeven Price",
                format_money(breakeven)
            );
        }
        _ => {
            let _ = writeln!(out, "{:<25} | {:>12}", "Breakeven Price", "N/A");
        }
    }

    out
}

fn render_yields(yields: &YieldComparison) -> String {
    let mut out = String::new();

    out.push_str(&subsection_header("YIELD COMPARISON AND MARGIN OF SAFETY"));

    let _ = writeln!(out, "{:<30} | {:>9.2}%", "Earnings Yield (EPS/Price)", yields.earnings_yield_pct);
    let _ = writeln!(out, "{:<30} | {:>9.2}%", "Dividend Yield", yields.dividend_yield_pct);
    let _ = writeln!(out, "{:<30} | {:>9.2}%", "Total Stock Yield", yields.total_yield_pct);

    let bond_label = match yields.bond_yield_source {
        BondYieldSource::Market => "Bond Yield".to_string(),
        BondYieldSource::Fallback => "Bond Yield (default)".to_string(),
    };
    let _ = writeln!(out, "{bond_label:<30} | {:>9.2}%", yields.bond_yield_pct);
    let _ = writeln!(out, "{:<30} | {:>9.2}%", "Margin of Safety", yields.margin_of_safety_pct);

    if yields.margin_of_safety_pct > 0.0 {
        let _ = writeln!(
            out,
            "• Stock yields {:.2}% more than the bond",
            yields.margin_of_safety_pct
        );
    } else {
        let _ = writeln!(
            out,
            "• Stock yields {:.2}% less than the bond",
            yields.margin_of_safety_pct.abs()
        );
    }

    out
}

/// Projection table plus the boxed valuation summary.
pub fn render_valuation(valuation: &DcfValuation) -> String {
    let mut out = String::new();

    out.push_str(&subsection_header(&format!(
        "DCF ({} model)",
        valuation.mode
    )));

    let _ = writeln!(
        out,
        "{:<5} | {:>8} | {:>16} | {:>15} | {:>16}",
        "Year", "Growth", "Projected FCF", "Discount Factor", "Present Value"
    );
    let _ = writeln!(out, "{}", "-".repeat(72));
    for projection in &valuation.projections {
        let _ = writeln!(
            out,
            "{:<5} | {:>7.1}% | {:>16} | {:>15.4} | {:>16}",
            projection.year_offset,
            projection.growth_rate * 100.0,
            format_money(projection.projected_fcf),
            projection.discount_factor,
            format_money(projection.present_value)
        );
    }

    let _ = writeln!(out, "{:<25} {}", "Base Cash Flow:", format_money(valuation.base_fcf));
    let _ = writeln!(
        out,
        "{:<25} {} (PV {})",
        "Terminal Value:",
        format_money(valuation.terminal_value),
        format_money(valuation.terminal_value_pv)
    );
    let _ = writeln!(
        out,
        "{:<25} {}",
        "Enterprise Value:",
        format_money(valuation.enterprise_value)
    );
    let _ = writeln!(
        out,
        "{:<25} {}",
        "Fair Value per Share:",
        format_money(valuation.fair_value_per_share)
    );
    let _ = writeln!(out, "{:<25} {}", "Current Price:", format_money(valuation.current_price));
    let _ = writeln!(
        out,
        "{:<25} {:.1}%",
        "Margin of Safety:", valuation.margin_of_safety_pct
    );

    if valuation.is_undervalued() {
        let _ = writeln!(
            out,
            "VERDICT: appears UNDERVALUED by {:.1}%",
            valuation.margin_of_safety_pct
        );
    } else {
        let _ = writeln!(
            out,
            "VERDICT: appears OVERVALUED by {:.1}%",
            valuation.margin_of_safety_pct.abs()
        );
    }

    if valuation.terminal_clamped {
        let _ = writeln!(
            out,
            "Note: terminal growth clamped to {:.1}% to stay below the discount rate",
            valuation.params.terminal_growth * 100.0
        );
    }

    out
}

fn render_scenario(scenario: &PriceScenario) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<25} | {:>12} | {:>12} | {:>12}",
        "Metric", "Current", "At Target", "Change"
    );
    let _ = writeln!(out, "{}", "-".repeat(70));

    let _ = writeln!(
        out,
        "{:<25} | {:>12} | {:>12} | {:>+11.1}%",
        "Price",
        format_money(scenario.current.price),
        format_money(scenario.target.price),
        scenario.price_change_pct
    );

    match (scenario.current.market_cap, scenario.target.market_cap) {
        (Some(current), Some(target)) => {
            let _ = writeln!(
                out,
                "{:<25} | {:>12} | {:>12} | {:>12}",
                "Market Cap",
                format_money(current),
                format_money(target),
                format_money(target - current)
            );
        }
        _ => {
            let _ = writeln!(
                out,
                "{:<25} | {:>12} | {:>12} | {:>12}",
                "Market Cap", "N/A", "N/A", "N/A"
            );
        }
    }

    let _ = writeln!(
        out,
        "{:<25} | {:>12} | {:>12} |",
        "P/E Ratio",
        format_opt_ratio(scenario.current.pe_ratio),
        format_opt_ratio(scenario.target.pe_ratio)
    );
    let _ = writeln!(
        out,
        "{:<25} | {:>11.2}% | {:>11.2}% |",
        "Earnings Yield", scenario.current.earnings_yield_pct, scenario.target.earnings_yield_pct
    );
    let _ = writeln!(
        out,
        "{:<25} | {:>11.2}% | {:>11.2}% |",
        "Dividend Yield", scenario.current.dividend_yield_pct, scenario.target.dividend_yield_pct
    );
    let _ = writeln!(
        out,
        "{:<25} | {:>11.2}% | {:>11.2}% |",
        "Total Yield", scenario.current.total_yield_pct, scenario.target.total_yield_pct
    );
    let _ = writeln!(
        out,
        "{:<25} | {:>11.2}% | {:>11.2}% |",
        "Yield Spread", scenario.current.yield_spread_pct, scenario.target.yield_spread_pct
    );

    match scenario.breakeven_price {
        Some(breakeven) => {
            let _ = writeln!(out, "{:<25} | {:>12}", "Breakeven Price", format_money(breakeven));
        }
        None => {
            let _ = writeln!(out, "{:<25} | {:>12}", "Breakeven Price", "N/A");
        }
    }
    match (
        scenario.current.price_margin_of_safety_pct,
        scenario.target.price_margin_of_safety_pct,
    ) {
        (Some(current), Some(target)) => {
            let _ = writeln!(
                out,
                "{:<25} | {:>11.2}% | {:>11.2}% |",
                "Margin of Safety", current, target
            );
        }
        _ => {
            let _ = writeln!(
                out,
                "{:<25} | {:>12} | {:>12} |",
                "Margin of Safety", "N/A", "N/A"
            );
        }
    }

    out
}

/// `$1.23T` / `$4.56B` / `$7.89M` above a million, plain dollars below.
fn format_money(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e12 {
        format!("${:.2}T", value / 1e12)
    } else if abs >= 1e9 {
        format!("${:.2}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("${:.2}M", value / 1e6)
    } else {
        format!("${value:.2}")
    }
}

fn format_value(value: f64) -> String {
    if value.abs() >= 1e6 {
        format_money(value)
    } else {
        format!("{value:.2}")
    }
}

fn format_opt_money(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), format_money)
}

fn format_opt_count(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.0}"))
}

fn format_opt_ratio(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}x"))
}
