//! CSV and JSON export of analysis results.

use crate::report::{AnalysisReport, MetricsSection};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One flat row of the metrics CSV: a metric value for a year, with the
/// growth rate into that year when defined.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricRow {
    /// Symbol the metrics belong to
    pub symbol: String,
    /// Metric display name
    pub metric: String,
    /// Calendar year
    pub year: i32,
    /// Metric value for the year
    pub value: f64,
    /// Growth into this year, empty for the base year and for undefined
    /// observations
    pub growth_pct: Option<f64>,
}

/// Flatten the metric section into CSV rows.
pub fn metric_rows(symbol: &str, metrics: &MetricsSection) -> Vec<MetricRow> {
    let mut rows = Vec::new();

    for metric in metrics.iter() {
        let mut growth_iter = metric.growth.iter();
        for (i, (year, value)) in metric.series.iter().enumerate() {
            let growth_pct = if i == 0 {
                None
            } else {
                growth_iter.next().and_then(|obs| obs.rate)
            };
            rows.push(MetricRow {
                symbol: symbol.to_string(),
                metric: metric.name.clone(),
                year,
                value,
                growth_pct,
            });
        }
    }

    rows
}

/// Write the metrics CSV to any writer.
pub fn write_metrics_csv<W: Write>(
    writer: W,
    symbol: &str,
    metrics: &MetricsSection,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in metric_rows(symbol, metrics) {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Export the metrics CSV to a file.
pub fn export_metrics_csv<P: AsRef<Path>>(
    path: P,
    symbol: &str,
    metrics: &MetricsSection,
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_metrics_csv(file, symbol, metrics)
}

/// Export the full report as pretty-printed JSON.
pub fn export_report_json<P: AsRef<Path>>(
    path: P,
    report: &AnalysisReport,
) -> Result<(), ExportError> {
    let mut file = File::create(path)?;
    let json = serde_json::to_string_pretty(report)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
