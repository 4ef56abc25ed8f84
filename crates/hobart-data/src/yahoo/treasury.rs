//! 10-year Treasury yield used as the risk-free benchmark.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use yahoo_finance_api as yahoo;

/// Yahoo symbol for the CBOE 10-year Treasury yield index. Quoted directly in
/// percentage points (4.5 means 4.5%).
const TREASURY_SYMBOL: &str = "^TNX";

/// Yield assumed when the Treasury quote cannot be fetched. A deliberate
/// policy value, surfaced to the user via [`BondYieldSource::Fallback`].
pub const DEFAULT_TREASURY_YIELD: f64 = 4.0;

/// Where a bond yield figure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum BondYieldSource {
    /// Latest market close of the Treasury yield index
    #[display("market")]
    Market,
    /// The documented default, used when the market quote was unavailable
    #[display("fallback")]
    Fallback,
}

/// A bond-yield reference value in percentage points, with provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondYield {
    /// Yield in percentage points (4.5 means 4.5%)
    pub pct: f64,
    /// Whether the value was quoted or fell back to the default
    pub source: BondYieldSource,
}

impl BondYield {
    /// A market-quoted yield.
    pub const fn market(pct: f64) -> Self {
        Self {
            pct,
            source: BondYieldSource::Market,
        }
    }

    /// The documented fallback yield.
    pub const fn fallback() -> Self {
        Self {
            pct: DEFAULT_TREASURY_YIELD,
            source: BondYieldSource::Fallback,
        }
    }
}

/// Provider for the 10-year Treasury yield.
pub struct TreasuryYieldProvider {
    connector: yahoo::YahooConnector,
}

impl std::fmt::Debug for TreasuryYieldProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreasuryYieldProvider").finish_non_exhaustive()
    }
}

impl TreasuryYieldProvider {
    /// Create a new Treasury yield provider.
    pub fn new() -> Self {
        Self {
            connector: yahoo::YahooConnector::new().expect("Failed to create Yahoo connector"),
        }
    }

    /// Fetch the most recent closing yield of ^TNX.
    ///
    /// Never fails: when the quote is unavailable or non-positive this
    /// returns [`BondYield::fallback`] and logs a warning, so the caller can
    /// always proceed with a benchmark.
    pub async fn fetch(&self) -> BondYield {
        match self.latest_close().await {
            Ok(pct) if pct > 0.0 => BondYield::market(pct),
            Ok(pct) => {
                log::warn!(
                    "non-positive Treasury yield {pct} from {TREASURY_SYMBOL}; using default {DEFAULT_TREASURY_YIELD}%"
                );
                BondYield::fallback()
            }
            Err(e) => {
                log::warn!(
                    "failed to fetch Treasury yield from {TREASURY_SYMBOL}: {e}; using default {DEFAULT_TREASURY_YIELD}%"
                );
                BondYield::fallback()
            }
        }
    }

    async fn latest_close(&self) -> crate::error::Result<f64> {
        let response = self
            .connector
            .get_latest_quotes(TREASURY_SYMBOL, "1d")
            .await?;
        let quote = response.last_quote()?;
        Ok(quote.close)
    }
}

impl Default for TreasuryYieldProvider {
    fn default() -> Self {
        Self::new()
    }
}
