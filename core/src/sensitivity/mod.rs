//! Sensitivity engine
//!
//! Three sweep strategies over the deterministic cost model:
//! - Tornado: one-at-a-time low/high perturbation, ranked by output swing
//! - Spider: evenly spaced percentage offsets per variable
//! - Monte Carlo: resample cost-model inputs from per-parameter distributions
//!
//! The Monte Carlo sweep here perturbs *model inputs* once per trial; it is
//! unrelated to the day-by-day cash recurrence in `crate::simulation`.

pub mod distribution;
pub mod monte_carlo;
pub mod tornado;

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::costs::{BlockchainPaymentModel, DEFAULT_FRAUD_REDUCTION, DEFAULT_PCT_FACTORED};
use crate::models::PaymentFlowParams;

pub use distribution::{Distribution, DistributionError};
pub use monte_carlo::{
    breakeven_probability, default_input_distributions, monte_carlo_sensitivity,
    BreakevenProbability, McInput, McSensitivityResults, SampleStats,
};
pub use tornado::{
    identify_key_uncertainties, spider_analysis, tornado_analysis, SensitivityResult, SpiderData,
    SpiderSeries,
};

/// Evaluation-time errors from the sensitivity engine.
#[derive(Debug, Error, PartialEq)]
pub enum SensitivityError {
    #[error("unsupported output metric: '{0}'")]
    UnsupportedMetric(String),
}

/// A cost-model parameter that sweeps can perturb.
///
/// Typed stand-in for field-name string lookup: a sweep over a parameter
/// that does not exist cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostParameter {
    AnnualRevenue,
    LoadsPerYear,
    DsoDays,
    DpoDays,
    CostOfCapital,
    FactoringRate,
    FraudLossRate,
    AdminCostPerLoad,
}

impl CostParameter {
    /// Field name as it appears on [`PaymentFlowParams`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::AnnualRevenue => "annual_revenue",
            Self::LoadsPerYear => "loads_per_year",
            Self::DsoDays => "dso_days",
            Self::DpoDays => "dpo_days",
            Self::CostOfCapital => "cost_of_capital",
            Self::FactoringRate => "factoring_rate",
            Self::FraudLossRate => "fraud_loss_rate",
            Self::AdminCostPerLoad => "admin_cost_per_load",
        }
    }

    /// Current value of this parameter in `params`.
    pub fn base_value(&self, params: &PaymentFlowParams) -> f64 {
        match self {
            Self::AnnualRevenue => params.annual_revenue,
            Self::LoadsPerYear => params.loads_per_year as f64,
            Self::DsoDays => params.dso_days,
            Self::DpoDays => params.dpo_days,
            Self::CostOfCapital => params.cost_of_capital,
            Self::FactoringRate => params.factoring_rate,
            Self::FraudLossRate => params.fraud_loss_rate,
            Self::AdminCostPerLoad => params.admin_cost_per_load,
        }
    }

    /// Copy of `params` with this parameter set to `value`.
    ///
    /// Load counts are rounded to the nearest whole load. The result is not
    /// re-validated here; model constructors validate downstream.
    pub fn with_value(&self, params: &PaymentFlowParams, value: f64) -> PaymentFlowParams {
        let mut out = *params;
        match self {
            Self::AnnualRevenue => out.annual_revenue = value,
            Self::LoadsPerYear => out.loads_per_year = value.round().max(0.0) as u64,
            Self::DsoDays => out.dso_days = value,
            Self::DpoDays => out.dpo_days = value,
            Self::CostOfCapital => out.cost_of_capital = value,
            Self::FactoringRate => out.factoring_rate = value,
            Self::FraudLossRate => out.fraud_loss_rate = value,
            Self::AdminCostPerLoad => out.admin_cost_per_load = value,
        }
        out
    }
}

/// The cost-model output a sweep measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputMetric {
    NetSavings,
    FinancingSavings,
    FactoringSavings,
    FraudSavings,
    TotalCost,
}

impl OutputMetric {
    /// Evaluate this metric on a blockchain model at the crate default
    /// factoring and fraud-reduction assumptions.
    pub fn evaluate(&self, model: &BlockchainPaymentModel) -> f64 {
        match self {
            Self::NetSavings => model.net_savings(DEFAULT_PCT_FACTORED, DEFAULT_FRAUD_REDUCTION),
            Self::FinancingSavings => model.financing_savings(),
            Self::FactoringSavings => model.factoring_savings(DEFAULT_PCT_FACTORED),
            Self::FraudSavings => model.fraud_savings(DEFAULT_FRAUD_REDUCTION),
            Self::TotalCost => model.total_cost(DEFAULT_PCT_FACTORED, DEFAULT_FRAUD_REDUCTION),
        }
    }
}

impl FromStr for OutputMetric {
    type Err = SensitivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "net_savings" => Ok(Self::NetSavings),
            "financing_savings" => Ok(Self::FinancingSavings),
            "factoring_savings" => Ok(Self::FactoringSavings),
            "fraud_savings" => Ok(Self::FraudSavings),
            "total_cost" => Ok(Self::TotalCost),
            other => Err(SensitivityError::UnsupportedMetric(other.to_string())),
        }
    }
}
