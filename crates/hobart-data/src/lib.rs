#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod statements;
pub mod yahoo;

pub use error::{DataError, Result};
pub use statements::{
    BalanceSheet, CashFlowStatement, FinancialStatements, IncomeStatement, PeriodRecord,
    StatementSeries,
};
pub use yahoo::{BondYield, BondYieldSource, QuoteSnapshot};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
