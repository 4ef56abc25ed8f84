//! DCF parameter set.

use serde::{Deserialize, Serialize};

/// Spread kept below the discount rate when terminal growth has to be
/// clamped, so the Gordon-growth denominator stays positive.
pub const TERMINAL_CLAMP_SPREAD: f64 = 0.02;

/// Parameters of a multi-stage DCF projection. Rates are decimals
/// (0.05 means 5%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DcfParameters {
    /// Projection horizon in years
    pub years: u32,
    /// Growth rate applied through year 5
    pub near_term_growth: f64,
    /// Rate future cash flows are discounted at
    pub discount_rate: f64,
    /// Growth rate applied after year 5 and in the terminal value
    pub terminal_growth: f64,
}

impl Default for DcfParameters {
    /// Conservative standard-model defaults: 10-year horizon, 5% near-term
    /// growth, 12% discount rate, 2% terminal growth.
    fn default() -> Self {
        Self {
            years: 10,
            near_term_growth: 0.05,
            discount_rate: 0.12,
            terminal_growth: 0.02,
        }
    }
}

impl DcfParameters {
    /// Defaults for the reinvestment-adjusted model: a longer 15-year
    /// horizon with 12% growth and an 8% discount rate.
    pub const fn reinvestment_adjusted() -> Self {
        Self {
            years: 15,
            near_term_growth: 0.12,
            discount_rate: 0.08,
            terminal_growth: 0.02,
        }
    }

    /// Enforce `terminal_growth < discount_rate`.
    ///
    /// When violated (including equality), terminal growth is pulled down to
    /// `discount_rate - TERMINAL_CLAMP_SPREAD` and the second element of the
    /// return is `true`, so callers surface a warning instead of failing.
    pub fn clamped(self) -> (Self, bool) {
        if self.terminal_growth >= self.discount_rate {
            let clamped = Self {
                terminal_growth: self.discount_rate - TERMINAL_CLAMP_SPREAD,
                ..self
            };
            log::warn!(
                "terminal growth {:.1}% >= discount rate {:.1}%; clamped to {:.1}%",
                self.terminal_growth * 100.0,
                self.discount_rate * 100.0,
                clamped.terminal_growth * 100.0
            );
            (clamped, true)
        } else {
            (self, false)
        }
    }
}
