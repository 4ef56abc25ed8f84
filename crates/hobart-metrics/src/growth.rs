//! Year-over-year growth derivation.
//!
//! Growth is computed between consecutive years *present* in a metric series;
//! a gap in the data produces an observation spanning the gap rather than a
//! dropped or zero-filled year.

use crate::series::MetricSeries;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// How the change between two observations is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum GrowthMode {
    /// `curr - prev`, no division. Used for rates such as ROIC, where the
    /// change in percentage points is what matters.
    #[display("percentage-points")]
    PercentagePoints,
    /// `(curr - prev) / |prev| * 100`. The absolute value keeps the sign of
    /// the change correct when the base is negative.
    #[display("percent-change")]
    PercentChange,
}

/// Growth between two observed years.
///
/// `rate` is `None` when the growth is undefined — a zero base under
/// [`GrowthMode::PercentChange`]. Undefined observations are excluded from
/// [`GrowthSeries::mean`] and rendered as "N/A", never as infinity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthObservation {
    /// Earlier year of the pair
    pub from_year: i32,
    /// Later year of the pair
    pub to_year: i32,
    /// Growth rate, or `None` when undefined
    pub rate: Option<f64>,
}

/// An ordered sequence of year-over-year growth observations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthSeries {
    observations: Vec<GrowthObservation>,
}

impl GrowthSeries {
    /// Iterate observations, oldest pair first.
    pub fn iter(&self) -> std::slice::Iter<'_, GrowthObservation> {
        self.observations.iter()
    }

    /// Number of observations, defined or not.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether there are no observations.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Arithmetic mean over the defined observations only.
    ///
    /// `None` when no observation is defined — an empty series and a series
    /// of all-undefined observations both average to `None`, so undefined
    /// growth never leaks into arithmetic as zero or NaN.
    pub fn mean(&self) -> Option<f64> {
        let rates: Vec<f64> = self.observations.iter().filter_map(|o| o.rate).collect();
        if rates.is_empty() {
            return None;
        }
        Some(rates.iter().sum::<f64>() / rates.len() as f64)
    }
}

/// Derive the growth series for a metric series under the given mode.
pub fn series(values: &MetricSeries, mode: GrowthMode) -> GrowthSeries {
    let observations = values
        .iter()
        .zip(values.iter().skip(1))
        .map(|((from_year, prev), (to_year, curr))| {
            let rate = match mode {
                GrowthMode::PercentagePoints => Some(curr - prev),
                GrowthMode::PercentChange => {
                    if prev == 0.0 {
                        None
                    } else {
                        Some((curr - prev) / prev.abs() * 100.0)
                    }
                }
            };
            GrowthObservation {
                from_year,
                to_year,
                rate,
            }
        })
        .collect();

    GrowthSeries { observations }
}

/// Arithmetic mean of a set of growth rates, `None` over an empty set.
pub fn mean(rates: &[f64]) -> Option<f64> {
    if rates.is_empty() {
        return None;
    }
    Some(rates.iter().sum::<f64>() / rates.len() as f64)
}
