//! Earnings, dividend and bond-yield comparison.

use hobart_data::{BondYield, BondYieldSource, QuoteSnapshot};
use serde::{Deserialize, Serialize};

/// Earnings yield in percent: `eps / price * 100`, 0.0 when price or EPS is
/// absent or zero.
pub fn earnings_yield(eps: Option<f64>, price: Option<f64>) -> f64 {
    match (eps, price) {
        (Some(eps), Some(price)) if price != 0.0 => eps / price * 100.0,
        _ => 0.0,
    }
}

/// Dividend yield in percent: `dividend_rate / price * 100`, 0.0 when price
/// or dividend rate is absent or zero.
pub fn dividend_yield(dividend_rate: Option<f64>, price: Option<f64>) -> f64 {
    earnings_yield(dividend_rate, price)
}

/// The price at which the combined earnings and dividend yield equals the
/// bond yield exactly.
///
/// `(eps + dividend_rate) / (bond_yield / 100)`; the dividend rate
/// contributes zero when absent. `None` when EPS is absent/zero or the bond
/// yield is zero.
pub fn breakeven_price(
    eps: Option<f64>,
    dividend_rate: Option<f64>,
    bond_yield_pct: f64,
) -> Option<f64> {
    let eps = eps.filter(|&e| e != 0.0)?;
    if bond_yield_pct == 0.0 {
        return None;
    }
    Some((eps + dividend_rate.unwrap_or(0.0)) / (bond_yield_pct / 100.0))
}

/// Trailing and forward price ratios against the quote snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRatios {
    /// Price / trailing EPS, `None` when EPS is absent or zero
    pub trailing_pe: Option<f64>,
    /// Price / forward EPS, `None` when EPS is absent or zero
    pub forward_pe: Option<f64>,
    /// Trailing EPS / price, percent
    pub trailing_earnings_yield_pct: f64,
    /// Forward EPS / price, percent
    pub forward_earnings_yield_pct: f64,
    /// Dividend rate / price, percent
    pub dividend_yield_pct: f64,
    /// Price where total yield equals the bond yield
    pub breakeven_price: Option<f64>,
}

impl PriceRatios {
    /// Compute every ratio from a quote snapshot and bond yield.
    pub fn from_quote(quote: &QuoteSnapshot, bond: &BondYield) -> Self {
        let price = quote.current_price;

        let pe = |eps: Option<f64>| -> Option<f64> {
            let eps = eps.filter(|&e| e != 0.0)?;
            Some(price? / eps)
        };

        Self {
            trailing_pe: pe(quote.trailing_eps),
            forward_pe: pe(quote.forward_eps),
            trailing_earnings_yield_pct: earnings_yield(quote.trailing_eps, price),
            forward_earnings_yield_pct: earnings_yield(quote.forward_eps, price),
            dividend_yield_pct: dividend_yield(quote.dividend_rate, price),
            breakeven_price: breakeven_price(quote.trailing_eps, quote.dividend_rate, bond.pct),
        }
    }
}

/// Stock yield against the bond benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldComparison {
    /// Trailing earnings yield, percent
    pub earnings_yield_pct: f64,
    /// Dividend yield, percent
    pub dividend_yield_pct: f64,
    /// Earnings yield plus dividend yield
    pub total_yield_pct: f64,
    /// Benchmark bond yield, percent
    pub bond_yield_pct: f64,
    /// Where the bond yield came from; a fallback is a policy value the
    /// renderer must flag
    pub bond_yield_source: BondYieldSource,
    /// `total_yield - bond_yield`; positive favors the stock
    pub margin_of_safety_pct: f64,
}

impl YieldComparison {
    /// Compare a stock's total yield to the bond benchmark.
    pub fn from_quote(quote: &QuoteSnapshot, bond: &BondYield) -> Self {
        let earnings = earnings_yield(quote.trailing_eps, quote.current_price);
        let dividend = dividend_yield(quote.dividend_rate, quote.current_price);
        let total = earnings + dividend;

        Self {
            earnings_yield_pct: earnings,
            dividend_yield_pct: dividend,
            total_yield_pct: total,
            bond_yield_pct: bond.pct,
            bond_yield_source: bond.source,
            margin_of_safety_pct: total - bond.pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hobart_data::BondYield;
    use rstest::rstest;

    fn quote(price: Option<f64>, eps: Option<f64>, dividend: Option<f64>) -> QuoteSnapshot {
        let mut q = QuoteSnapshot::empty("TEST");
        q.current_price = price;
        q.trailing_eps = eps;
        q.dividend_rate = dividend;
        q
    }

    #[test]
    fn test_yield_spread_against_bond() {
        // EPS 5 at price 100 -> 5%; dividend 2 at price 100 -> 2%;
        // bond 4% -> margin of safety 3%
        let q = quote(Some(100.0), Some(5.0), Some(2.0));
        let comparison = YieldComparison::from_quote(&q, &BondYield::market(4.0));

        assert_relative_eq!(comparison.earnings_yield_pct, 5.0);
        assert_relative_eq!(comparison.dividend_yield_pct, 2.0);
        assert_relative_eq!(comparison.total_yield_pct, 7.0);
        assert_relative_eq!(comparison.margin_of_safety_pct, 3.0);
    }

    #[rstest]
    #[case(None, Some(5.0))]
    #[case(Some(0.0), Some(5.0))]
    #[case(Some(100.0), None)]
    fn test_degenerate_yield_inputs_are_zero(
        #[case] price: Option<f64>,
        #[case] eps: Option<f64>,
    ) {
        assert_relative_eq!(earnings_yield(eps, price), 0.0);
    }

    #[test]
    fn test_breakeven_price() {
        // (5 + 2) / 0.04 = 175
        assert_relative_eq!(
            breakeven_price(Some(5.0), Some(2.0), 4.0).unwrap(),
            175.0,
            max_relative = 1e-10
        );
        // Dividend absent contributes zero: 5 / 0.04 = 125
        assert_relative_eq!(
            breakeven_price(Some(5.0), None, 4.0).unwrap(),
            125.0,
            max_relative = 1e-10
        );
        assert_eq!(breakeven_price(None, Some(2.0), 4.0), None);
        assert_eq!(breakeven_price(Some(5.0), Some(2.0), 0.0), None);
    }

    #[test]
    fn test_price_ratios() {
        let mut q = quote(Some(100.0), Some(5.0), Some(2.0));
        q.forward_eps = Some(8.0);

        let ratios = PriceRatios::from_quote(&q, &BondYield::market(4.0));
        assert_relative_eq!(ratios.trailing_pe.unwrap(), 20.0);
        assert_relative_eq!(ratios.forward_pe.unwrap(), 12.5);
        assert_relative_eq!(ratios.trailing_earnings_yield_pct, 5.0);
        assert_relative_eq!(ratios.forward_earnings_yield_pct, 8.0);
        assert_relative_eq!(ratios.dividend_yield_pct, 2.0);
    }

    #[test]
    fn test_zero_eps_gives_no_pe() {
        let q = quote(Some(100.0), Some(0.0), None);
        let ratios = PriceRatios::from_quote(&q, &BondYield::fallback());
        assert_eq!(ratios.trailing_pe, None);
        assert_relative_eq!(ratios.trailing_earnings_yield_pct, 0.0);
    }

    #[test]
    fn test_fallback_source_is_carried() {
        let q = quote(Some(100.0), Some(5.0), None);
        let comparison = YieldComparison::from_quote(&q, &BondYield::fallback());
        assert_eq!(comparison.bond_yield_source, BondYieldSource::Fallback);
        assert_relative_eq!(comparison.bond_yield_pct, 4.0);
    }
}
