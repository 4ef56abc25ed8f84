//! Aggregate growth summary across metrics.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Qualitative band for an average growth rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum GrowthClass {
    /// Above 15%
    #[display("STRONG")]
    Strong,
    /// Above 10%
    #[display("GOOD")]
    Good,
    /// Above 5%
    #[display("MODERATE")]
    Moderate,
    /// Above 0%
    #[display("SLOW")]
    Slow,
    /// Zero or below
    #[display("NEGATIVE")]
    Negative,
}

impl GrowthClass {
    /// Classify an average growth rate in percent.
    pub fn classify(rate: f64) -> Self {
        if rate > 15.0 {
            Self::Strong
        } else if rate > 10.0 {
            Self::Good
        } else if rate > 5.0 {
            Self::Moderate
        } else if rate > 0.0 {
            Self::Slow
        } else {
            Self::Negative
        }
    }
}

/// Qualitative band for the overall average across metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum OverallHealth {
    /// Above 15%
    #[display("EXCELLENT")]
    Excellent,
    /// Above 10%
    #[display("STRONG")]
    Strong,
    /// Above 5%
    #[display("MODERATE")]
    Moderate,
    /// Above 0%
    #[display("MODEST")]
    Modest,
    /// Zero or below
    #[display("CONCERNING")]
    Concerning,
}

impl OverallHealth {
    /// Classify the overall average growth rate in percent.
    pub fn classify(rate: f64) -> Self {
        if rate > 15.0 {
            Self::Excellent
        } else if rate > 10.0 {
            Self::Strong
        } else if rate > 5.0 {
            Self::Moderate
        } else if rate > 0.0 {
            Self::Modest
        } else {
            Self::Concerning
        }
    }
}

/// Average annual growth per metric.
///
/// ROIC growth is in percentage points; the rest are percent change. A
/// metric that could not be computed for at least two periods is `None` and
/// excluded from the overall average — one metric failing never blocks the
/// others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthSummary {
    /// Average ROIC change, percentage points
    pub roic: Option<f64>,
    /// Average equity growth, percent
    pub equity: Option<f64>,
    /// Average earnings (EPS) growth, percent
    pub earnings: Option<f64>,
    /// Average sales growth, percent
    pub sales: Option<f64>,
    /// Average free-cash-flow growth, percent
    pub free_cash_flow: Option<f64>,
}

impl GrowthSummary {
    /// The metrics with a defined average, as `(label, rate)` pairs.
    pub fn available(&self) -> Vec<(&'static str, f64)> {
        [
            ("ROIC", self.roic),
            ("Equity", self.equity),
            ("Earnings", self.earnings),
            ("Sales", self.sales),
            ("Free Cash Flow", self.free_cash_flow),
        ]
        .into_iter()
        .filter_map(|(label, rate)| Some((label, rate?)))
        .collect()
    }

    /// Mean across the available metrics, `None` when none are available.
    pub fn overall(&self) -> Option<f64> {
        let rates: Vec<f64> = self.available().into_iter().map(|(_, rate)| rate).collect();
        if rates.is_empty() {
            return None;
        }
        Some(rates.iter().sum::<f64>() / rates.len() as f64)
    }

    /// Overall health band, `None` when no metric is available.
    pub fn health(&self) -> Option<OverallHealth> {
        self.overall().map(OverallHealth::classify)
    }
}
