//! Yahoo Finance providers.

pub mod fundamentals;
pub mod quotes;
pub mod treasury;

pub use fundamentals::YahooFundamentalsProvider;
pub use quotes::{QuoteSnapshot, YahooQuoteProvider};
pub use treasury::{BondYield, BondYieldSource, TreasuryYieldProvider};
