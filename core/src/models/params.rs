//! Payment flow parameters
//!
//! `PaymentFlowParams` is the immutable macro-financial snapshot every model
//! in this crate evaluates against: annual revenue, load volume, payment
//! timing (DSO/DPO), and the cost rates attached to the traditional payment
//! stack.
//!
//! CRITICAL: instances are validated at construction and never mutated.
//! Parameter sweeps build a fresh instance per point.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when validating parameter or scenario fields
#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("annual_revenue must be positive (got {0})")]
    NonPositiveRevenue(f64),

    #[error("loads_per_year must be positive")]
    NonPositiveLoads,

    #[error("dso_days cannot be negative (got {0})")]
    NegativeDso(f64),

    #[error("dpo_days cannot be negative (got {0})")]
    NegativeDpo(f64),

    #[error("days_in_year must be positive")]
    NonPositiveDayCount,

    #[error("{field} must lie in [0, 1] (got {value})")]
    FractionOutOfRange { field: &'static str, value: f64 },

    #[error("{field} cannot be negative (got {value})")]
    NegativeValue { field: &'static str, value: f64 },
}

/// Macro financial parameters for one analysis run.
///
/// All monetary values are annual USD unless stated otherwise. Derived
/// quantities (daily revenue, revenue per load, working-capital gap) are
/// computed on demand and never stored.
///
/// # Example
///
/// ```
/// use freight_settlement_core_rs::models::PaymentFlowParams;
///
/// let params = PaymentFlowParams::default().validated().unwrap();
/// assert_eq!(params.working_capital_gap_days(), 22.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentFlowParams {
    /// Gross annual revenue (USD)
    pub annual_revenue: f64,

    /// Shipments handled per year
    pub loads_per_year: u64,

    /// Days sales outstanding (average days to collect from shippers)
    pub dso_days: f64,

    /// Days payable outstanding (average days to pay carriers)
    pub dpo_days: f64,

    /// Annual cost of capital applied to tied-up working capital
    pub cost_of_capital: f64,

    /// Factoring fee rate charged on factored receivables
    pub factoring_rate: f64,

    /// Fraction of revenue lost to payment fraud annually
    pub fraud_loss_rate: f64,

    /// Administrative processing cost per load (USD)
    pub admin_cost_per_load: f64,

    /// Day-count convention for converting annual to daily figures
    pub days_in_year: u32,
}

impl Default for PaymentFlowParams {
    /// C.H. Robinson FY2024 10-K figures.
    fn default() -> Self {
        Self {
            annual_revenue: 17_700_000_000.0,
            loads_per_year: 15_700_000,
            dso_days: 49.0,
            dpo_days: 27.0,
            cost_of_capital: 0.07,
            factoring_rate: 0.03,
            fraud_loss_rate: 0.005,
            admin_cost_per_load: 15.0,
            days_in_year: 365,
        }
    }
}

impl PaymentFlowParams {
    /// Validate field invariants, returning the params unchanged on success.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError` for non-positive revenue or load counts,
    /// negative DSO/DPO, or rate fields outside [0, 1].
    pub fn validated(self) -> Result<Self, ParamsError> {
        if !(self.annual_revenue > 0.0) {
            return Err(ParamsError::NonPositiveRevenue(self.annual_revenue));
        }
        if self.loads_per_year == 0 {
            return Err(ParamsError::NonPositiveLoads);
        }
        if self.dso_days < 0.0 {
            return Err(ParamsError::NegativeDso(self.dso_days));
        }
        if self.dpo_days < 0.0 {
            return Err(ParamsError::NegativeDpo(self.dpo_days));
        }
        if self.days_in_year == 0 {
            return Err(ParamsError::NonPositiveDayCount);
        }
        for (field, value) in [
            ("cost_of_capital", self.cost_of_capital),
            ("factoring_rate", self.factoring_rate),
            ("fraud_loss_rate", self.fraud_loss_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ParamsError::FractionOutOfRange { field, value });
            }
        }
        if self.admin_cost_per_load < 0.0 {
            return Err(ParamsError::NegativeValue {
                field: "admin_cost_per_load",
                value: self.admin_cost_per_load,
            });
        }
        Ok(self)
    }

    /// Average revenue per calendar day.
    pub fn daily_revenue(&self) -> f64 {
        self.annual_revenue / self.days_in_year as f64
    }

    /// Average revenue per load.
    pub fn revenue_per_load(&self) -> f64 {
        self.annual_revenue / self.loads_per_year as f64
    }

    /// Working-capital gap in days: DSO minus DPO.
    ///
    /// The number of days each revenue dollar is tied up between paying the
    /// carrier and collecting from the shipper.
    pub fn working_capital_gap_days(&self) -> f64 {
        self.dso_days - self.dpo_days
    }
}

/// Days sales outstanding from balance-sheet figures.
///
/// # Panics
/// Panics if `revenue` is not positive.
pub fn dso_from_balance_sheet(accounts_receivable: f64, revenue: f64, days_in_year: u32) -> f64 {
    assert!(revenue > 0.0, "revenue must be positive");
    accounts_receivable / revenue * days_in_year as f64
}

/// Days payable outstanding from balance-sheet figures.
///
/// # Panics
/// Panics if `cogs` is not positive.
pub fn dpo_from_balance_sheet(accounts_payable: f64, cogs: f64, days_in_year: u32) -> f64 {
    assert!(cogs > 0.0, "cogs must be positive");
    accounts_payable / cogs * days_in_year as f64
}

/// Cash conversion cycle: DSO + DIO − DPO.
///
/// Freight brokerage carries no inventory, so callers usually pass 0 days
/// of inventory outstanding.
pub fn cash_conversion_cycle(dso_days: f64, dpo_days: f64, dio_days: f64) -> f64 {
    dso_days + dio_days - dpo_days
}
