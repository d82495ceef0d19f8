//! Adoption scenarios
//!
//! A scenario bundles the assumptions behind one adoption trajectory:
//! headline adoption rate, the readiness of each side of the market, the
//! per-load transaction cost, and the implementation budget. The binding
//! constraint on adoption is whichever readiness fraction is lowest.

use serde::{Deserialize, Serialize};

use super::params::ParamsError;

/// A named bundle of blockchain adoption assumptions.
///
/// All fractional fields lie in [0, 1]; enforce with [`AdoptionScenario::validated`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdoptionScenario {
    /// Human-readable scenario name
    pub name: String,

    /// Headline fraction of load volume targeted for blockchain settlement
    pub adoption_rate: f64,

    /// Fraction of shippers able to fund settlement escrow
    pub shipper_escrow_pct: f64,

    /// Fraction of carriers with the required settlement tooling
    pub carrier_tech_ready_pct: f64,

    /// Per-load blockchain transaction cost (USD)
    pub tx_cost_per_load: f64,

    /// Assumed fraud-reduction effectiveness on adopted volume
    pub fraud_reduction_pct: f64,

    /// Whether the scenario assumes regulatory approval
    pub regulatory_approval: bool,

    /// One-time implementation cost (USD)
    pub implementation_cost: f64,

    /// Recurring annual maintenance cost (USD)
    pub annual_maintenance_cost: f64,
}

impl AdoptionScenario {
    /// Validate fractional and cost fields.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError` when a fractional field leaves [0, 1] or a
    /// cost field is negative.
    pub fn validated(self) -> Result<Self, ParamsError> {
        for (field, value) in [
            ("adoption_rate", self.adoption_rate),
            ("shipper_escrow_pct", self.shipper_escrow_pct),
            ("carrier_tech_ready_pct", self.carrier_tech_ready_pct),
            ("fraud_reduction_pct", self.fraud_reduction_pct),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ParamsError::FractionOutOfRange { field, value });
            }
        }
        for (field, value) in [
            ("tx_cost_per_load", self.tx_cost_per_load),
            ("implementation_cost", self.implementation_cost),
            ("annual_maintenance_cost", self.annual_maintenance_cost),
        ] {
            if value < 0.0 {
                return Err(ParamsError::NegativeValue { field, value });
            }
        }
        Ok(self)
    }

    /// Effective adoption: the minimum of the headline rate and both
    /// readiness fractions. Whichever side of the market is least ready
    /// caps realized adoption.
    pub fn effective_adoption(&self) -> f64 {
        self.adoption_rate
            .min(self.shipper_escrow_pct)
            .min(self.carrier_tech_ready_pct)
    }
}
