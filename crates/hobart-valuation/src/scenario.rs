//! Price-scenario comparison.
//!
//! Recomputes every ratio at a hypothetical target price, holding EPS,
//! dividend rate, and shares outstanding fixed. Pure once inputs are
//! supplied; nothing is fetched.

use crate::error::{Result, ValuationError};
use crate::yields::{breakeven_price, dividend_yield, earnings_yield};
use hobart_data::{BondYield, QuoteSnapshot};
use serde::{Deserialize, Serialize};

/// Every ratio evaluated at one price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioLeg {
    /// The price this leg is evaluated at
    pub price: f64,
    /// `price * shares_outstanding`
    pub market_cap: Option<f64>,
    /// Price / trailing EPS
    pub pe_ratio: Option<f64>,
    /// Trailing EPS / price, percent
    pub earnings_yield_pct: f64,
    /// Dividend rate / price, percent
    pub dividend_yield_pct: f64,
    /// Earnings plus dividend yield, percent
    pub total_yield_pct: f64,
    /// Total yield minus the bond yield, percent
    pub yield_spread_pct: f64,
    /// `(breakeven - price) / breakeven * 100`; positive while the price
    /// sits below breakeven
    pub price_margin_of_safety_pct: Option<f64>,
}

/// Comparison of the current market price against a hypothetical target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceScenario {
    /// Ratios at the current market price
    pub current: ScenarioLeg,
    /// Ratios at the target price
    pub target: ScenarioLeg,
    /// Price where total yield equals the bond yield
    pub breakeven_price: Option<f64>,
    /// Benchmark bond yield, percent
    pub bond_yield_pct: f64,
    /// Target price change versus current, percent
    pub price_change_pct: f64,
    /// Market-cap change versus current, percent
    pub market_cap_change_pct: Option<f64>,
}

/// Build the scenario comparison for a target price.
///
/// Errors with [`ValuationError::NoPriceData`] when the snapshot has no
/// current price to compare against.
pub fn price_scenario(
    quote: &QuoteSnapshot,
    target_price: f64,
    bond: &BondYield,
) -> Result<PriceScenario> {
    let current_price =
        quote
            .current_price
            .filter(|&p| p != 0.0)
            .ok_or_else(|| ValuationError::NoPriceData {
                symbol: quote.symbol.clone(),
            })?;

    let breakeven = breakeven_price(quote.trailing_eps, quote.dividend_rate, bond.pct);
    let current = leg(current_price, quote, bond, breakeven);
    let target = leg(target_price, quote, bond, breakeven);

    let market_cap_change_pct = match (current.market_cap, target.market_cap) {
        (Some(curr), Some(tgt)) if curr != 0.0 => Some((tgt - curr) / curr * 100.0),
        _ => None,
    };

    Ok(PriceScenario {
        current,
        target,
        breakeven_price: breakeven,
        bond_yield_pct: bond.pct,
        price_change_pct: (target_price - current_price) / current_price * 100.0,
        market_cap_change_pct,
    })
}

fn leg(price: f64, quote: &QuoteSnapshot, bond: &BondYield, breakeven: Option<f64>) -> ScenarioLeg {
    let earnings = earnings_yield(quote.trailing_eps, Some(price));
    let dividend = dividend_yield(quote.dividend_rate, Some(price));
    let total = earnings + dividend;

    ScenarioLeg {
        price,
        market_cap: quote.shares_outstanding.map(|shares| price * shares),
        pe_ratio: quote
            .trailing_eps
            .filter(|&eps| eps != 0.0)
            .map(|eps| price / eps),
        earnings_yield_pct: earnings,
        dividend_yield_pct: dividend,
        total_yield_pct: total,
        yield_spread_pct: total - bond.pct,
        price_margin_of_safety_pct: breakeven
            .filter(|&b| b != 0.0)
            .map(|b| (b - price) / b * 100.0),
    }
}
