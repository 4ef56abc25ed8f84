#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod dcf;
pub mod error;
pub mod params;
pub mod scenario;
pub mod yields;

pub use dcf::{DcfValuation, ProjectedCashFlow, ValuationMode};
pub use error::{Result, ValuationError};
pub use params::DcfParameters;
pub use scenario::{PriceScenario, ScenarioLeg};
pub use yields::{PriceRatios, YieldComparison};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
