//! Error types for valuation operations.

use thiserror::Error;

/// Result type for valuation operations.
pub type Result<T> = std::result::Result<T, ValuationError>;

/// Errors that can occur during a valuation.
#[derive(Debug, Error)]
pub enum ValuationError {
    /// The parameter combination produced a negative terminal value. The
    /// valuation is aborted rather than reporting a negative enterprise
    /// value.
    #[error(
        "negative terminal value ({terminal_value:.0}); check growth and discount rate assumptions"
    )]
    NegativeTerminalValue {
        /// The offending terminal value
        terminal_value: f64,
    },

    /// Shares outstanding absent or zero.
    #[error("no shares outstanding data for {symbol}")]
    NoSharesData {
        /// Symbol being valued
        symbol: String,
    },

    /// Current market price absent or zero.
    #[error("no market price data for {symbol}")]
    NoPriceData {
        /// Symbol being valued
        symbol: String,
    },

    /// No cash-flow figure to base the projection on.
    #[error("no cash flow data to base the projection on for {symbol}")]
    NoCashFlowData {
        /// Symbol being valued
        symbol: String,
    },

    /// Projection horizon of zero years.
    #[error("projection horizon must be at least one year")]
    ZeroHorizon,
}
