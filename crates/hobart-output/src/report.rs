//! The structured analysis report.

use chrono::{DateTime, Utc};
use hobart_data::{BondYield, QuoteSnapshot};
use hobart_metrics::{GrowthMode, GrowthSeries, GrowthSummary, MetricSeries};
use hobart_valuation::{DcfValuation, PriceRatios, PriceScenario, YieldComparison};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One metric's values and derived growth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    /// Display name ("ROIC", "Sales", ...)
    pub name: String,
    /// How the growth column was derived
    pub growth_mode: GrowthMode,
    /// Year-keyed values
    pub series: MetricSeries,
    /// Year-over-year growth observations
    pub growth: GrowthSeries,
    /// Mean of the defined growth observations
    pub average_growth: Option<f64>,
}

impl MetricReport {
    /// Build a metric report, deriving growth under the given mode.
    pub fn new(name: impl Into<String>, series: MetricSeries, growth_mode: GrowthMode) -> Self {
        let growth = hobart_metrics::growth::series(&series, growth_mode);
        let average_growth = growth.mean();
        Self {
            name: name.into(),
            growth_mode,
            series,
            growth,
            average_growth,
        }
    }
}

/// The six metric reports of an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSection {
    /// Return on invested capital, percent
    pub roic: MetricReport,
    /// Stockholders' equity
    pub equity: MetricReport,
    /// Earnings per share
    pub eps: MetricReport,
    /// Total revenue
    pub sales: MetricReport,
    /// Free cash flow
    pub free_cash_flow: MetricReport,
    /// EBIT
    pub ebit: MetricReport,
}

impl MetricsSection {
    /// Iterate the metric reports in display order.
    pub fn iter(&self) -> impl Iterator<Item = &MetricReport> {
        [
            &self.roic,
            &self.equity,
            &self.eps,
            &self.sales,
            &self.free_cash_flow,
            &self.ebit,
        ]
        .into_iter()
    }
}

/// A full analysis run for one ticker.
///
/// Plain structured numeric data; no formatting concerns. Built fresh per
/// run and discarded after rendering or export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Symbol being analyzed
    pub symbol: String,
    /// Report generation timestamp
    pub generated_at: DateTime<Utc>,
    /// Market snapshot the valuation ran against
    pub quote: QuoteSnapshot,
    /// Bond-yield benchmark, with provenance
    pub bond_yield: BondYield,
    /// Per-metric series and growth
    pub metrics: MetricsSection,
    /// Average growth across metrics
    pub growth_summary: GrowthSummary,
    /// P/E ratios and yields at the current price
    pub ratios: PriceRatios,
    /// Stock yield against the bond benchmark
    pub yields: YieldComparison,
    /// Standard DCF valuation, absent when its inputs were unavailable
    pub standard_valuation: Option<DcfValuation>,
    /// Reinvestment-adjusted DCF valuation, absent when unavailable
    pub reinvestment_valuation: Option<DcfValuation>,
    /// Target-price comparison, present when a target price was supplied
    pub scenario: Option<PriceScenario>,
    /// Warnings surfaced to the user (fallback bond yield, clamped terminal
    /// growth, skipped valuations)
    pub notes: Vec<String>,
}

impl AnalysisReport {
    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
