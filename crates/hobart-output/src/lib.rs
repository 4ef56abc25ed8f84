#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod render;
pub mod report;

pub use export::{ExportError, export_metrics_csv, export_report_json};
pub use render::render_report;
pub use report::{AnalysisReport, MetricReport, MetricsSection, ReportError};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
