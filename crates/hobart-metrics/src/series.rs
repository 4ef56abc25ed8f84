//! Year-keyed metric series.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An ordered-by-year mapping from calendar year to a computed value.
///
/// Built fresh per analysis run and discarded after rendering; nothing is
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    values: BTreeMap<i32, f64>,
}

impl MetricSeries {
    /// Create an empty series.
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Insert a value for a year, replacing any prior value for that year.
    pub fn insert(&mut self, year: i32, value: f64) {
        self.values.insert(year, value);
    }

    /// The value for a year, if computed.
    pub fn get(&self, year: i32) -> Option<f64> {
        self.values.get(&year).copied()
    }

    /// Number of years with a computed value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no year has a computed value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(year, value)` ascending by year.
    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.values.iter().map(|(&year, &value)| (year, value))
    }

    /// The years present, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.values.keys().copied()
    }

    /// The most recent `(year, value)`, if any.
    pub fn latest(&self) -> Option<(i32, f64)> {
        self.values
            .last_key_value()
            .map(|(&year, &value)| (year, value))
    }
}

impl FromIterator<(i32, f64)> for MetricSeries {
    fn from_iter<I: IntoIterator<Item = (i32, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iterates_ascending_by_year() {
        let series: MetricSeries =
            [(2023, 3.0), (2021, 1.0), (2022, 2.0)].into_iter().collect();

        let years: Vec<i32> = series.years().collect();
        assert_eq!(years, vec![2021, 2022, 2023]);
        assert_eq!(series.latest(), Some((2023, 3.0)));
    }

    #[test]
    fn test_insert_replaces() {
        let mut series = MetricSeries::new();
        series.insert(2022, 1.0);
        series.insert(2022, 2.0);
        assert_eq!(series.len(), 1);
        assert_eq!(series.get(2022), Some(2.0));
    }
}
