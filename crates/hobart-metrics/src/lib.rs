#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod ebit;
pub mod eps;
pub mod equity;
pub mod fcf;
pub mod growth;
pub mod roic;
pub mod sales;
pub mod series;
pub mod summary;

pub use growth::{GrowthMode, GrowthObservation, GrowthSeries};
pub use series::MetricSeries;
pub use summary::{GrowthClass, GrowthSummary, OverallHealth};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
