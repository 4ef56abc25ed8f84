//! Multi-stage discounted-cash-flow valuation.

use crate::error::{Result, ValuationError};
use crate::params::DcfParameters;
use derive_more::Display;
use hobart_data::{CashFlowStatement, QuoteSnapshot};
use serde::{Deserialize, Serialize};

/// Years compounded at the near-term growth rate before the schedule drops
/// to terminal growth. Fixed by design, not configurable independently of
/// the horizon.
pub const NEAR_TERM_YEARS: u32 = 5;

/// Fraction of operating cash flow treated as maintenance capital
/// expenditure in the reinvestment-adjusted model.
pub const MAINTENANCE_CAPEX_FRACTION: f64 = 0.33;

/// Which cash-flow base the valuation projects from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum ValuationMode {
    /// Latest reported free cash flow (or OCF − |CapEx| when not reported)
    #[display("standard")]
    Standard,
    /// Operating cash flow net of a fixed 33% maintenance-CapEx charge; the
    /// 67% growth CapEx is treated as investment, not outflow
    #[display("reinvestment-adjusted")]
    ReinvestmentAdjusted,
}

/// One projected year of the DCF table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedCashFlow {
    /// Years from now, starting at 1
    pub year_offset: u32,
    /// Growth rate applied this year
    pub growth_rate: f64,
    /// Projected free cash flow
    pub projected_fcf: f64,
    /// `1 / (1 + discount_rate)^year_offset`
    pub discount_factor: f64,
    /// `projected_fcf * discount_factor`
    pub present_value: f64,
}

/// Result of a DCF valuation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfValuation {
    /// Which cash-flow base was projected
    pub mode: ValuationMode,
    /// The parameters actually used (post-clamp)
    pub params: DcfParameters,
    /// Whether terminal growth had to be clamped below the discount rate
    pub terminal_clamped: bool,
    /// The cash flow the projection starts from
    pub base_fcf: f64,
    /// Per-year projection table
    pub projections: Vec<ProjectedCashFlow>,
    /// Gordon-growth terminal value at the end of the horizon
    pub terminal_value: f64,
    /// Terminal value discounted back to today
    pub terminal_value_pv: f64,
    /// Sum of projected present values plus discounted terminal value
    pub enterprise_value: f64,
    /// Shares outstanding used for the per-share figure
    pub shares_outstanding: f64,
    /// `enterprise_value / shares_outstanding`
    pub fair_value_per_share: f64,
    /// Current market price the fair value is compared against
    pub current_price: f64,
    /// `(fair_value - price) / fair_value * 100`; positive means undervalued
    pub margin_of_safety_pct: f64,
}

impl DcfValuation {
    /// Whether the stock appears undervalued at the current price.
    pub fn is_undervalued(&self) -> bool {
        self.margin_of_safety_pct > 0.0
    }
}

/// Project the per-year cash-flow table.
///
/// Year offsets 1 through [`NEAR_TERM_YEARS`] compound at the near-term
/// growth rate, later years at terminal growth. Parameters are expected to
/// be pre-clamped.
pub fn project_cash_flows(base_fcf: f64, params: &DcfParameters) -> Vec<ProjectedCashFlow> {
    let mut projections = Vec::with_capacity(params.years as usize);
    let mut fcf = base_fcf;

    for year_offset in 1..=params.years {
        let growth_rate = if year_offset <= NEAR_TERM_YEARS {
            params.near_term_growth
        } else {
            params.terminal_growth
        };
        fcf *= 1.0 + growth_rate;

        let discount_factor = 1.0 / (1.0 + params.discount_rate).powi(year_offset as i32);
        projections.push(ProjectedCashFlow {
            year_offset,
            growth_rate,
            projected_fcf: fcf,
            discount_factor,
            present_value: fcf * discount_factor,
        });
    }

    projections
}

/// Gordon-growth terminal value of the final projected cash flow.
///
/// Errors with [`ValuationError::NegativeTerminalValue`] instead of letting a
/// negative perpetuity through; the caller must abort the valuation.
pub fn terminal_value(last_projected_fcf: f64, params: &DcfParameters) -> Result<f64> {
    let value = last_projected_fcf * (1.0 + params.terminal_growth)
        / (params.discount_rate - params.terminal_growth);
    if value < 0.0 {
        return Err(ValuationError::NegativeTerminalValue {
            terminal_value: value,
        });
    }
    Ok(value)
}

/// Fair value per share from enterprise value.
pub fn fair_value(enterprise_value: f64, shares_outstanding: f64, symbol: &str) -> Result<f64> {
    if shares_outstanding == 0.0 {
        return Err(ValuationError::NoSharesData {
            symbol: symbol.to_string(),
        });
    }
    Ok(enterprise_value / shares_outstanding)
}

/// Margin of safety in percent. Positive means the market price sits below
/// fair value.
pub fn margin_of_safety(fair_value: f64, current_price: f64) -> f64 {
    (fair_value - current_price) / fair_value * 100.0
}

/// Select the cash-flow base for a mode from the latest cash-flow statement.
///
/// `None` when the statement does not carry the inputs the mode needs.
pub fn base_cash_flow(mode: ValuationMode, latest: &CashFlowStatement) -> Option<f64> {
    match mode {
        ValuationMode::Standard => latest.free_cash_flow.or_else(|| {
            let operating = latest.operating_cash_flow?;
            let capex = latest.capital_expenditure?;
            Some(operating - capex.abs())
        }),
        ValuationMode::ReinvestmentAdjusted => latest
            .operating_cash_flow
            .map(|ocf| ocf - MAINTENANCE_CAPEX_FRACTION * ocf),
    }
}

/// Run a full DCF valuation against a market quote.
pub fn run(
    mode: ValuationMode,
    base_fcf: f64,
    params: DcfParameters,
    quote: &QuoteSnapshot,
) -> Result<DcfValuation> {
    if params.years == 0 {
        return Err(ValuationError::ZeroHorizon);
    }

    let (params, terminal_clamped) = params.clamped();

    let shares_outstanding =
        quote
            .shares_outstanding
            .filter(|&s| s != 0.0)
            .ok_or_else(|| ValuationError::NoSharesData {
                symbol: quote.symbol.clone(),
            })?;
    let current_price =
        quote
            .current_price
            .filter(|&p| p != 0.0)
            .ok_or_else(|| ValuationError::NoPriceData {
                symbol: quote.symbol.clone(),
            })?;

    let projections = project_cash_flows(base_fcf, &params);
    let last_fcf = projections
        .last()
        .map(|p| p.projected_fcf)
        .unwrap_or(base_fcf);

    let terminal = terminal_value(last_fcf, &params)?;
    let terminal_value_pv = terminal / (1.0 + params.discount_rate).powi(params.years as i32);

    let enterprise_value =
        projections.iter().map(|p| p.present_value).sum::<f64>() + terminal_value_pv;
    let fair = fair_value(enterprise_value, shares_outstanding, &quote.symbol)?;

    Ok(DcfValuation {
        mode,
        params,
        terminal_clamped,
        base_fcf,
        projections,
        terminal_value: terminal,
        terminal_value_pv,
        enterprise_value,
        shares_outstanding,
        fair_value_per_share: fair,
        current_price,
        margin_of_safety_pct: margin_of_safety(fair, current_price),
    })
}
