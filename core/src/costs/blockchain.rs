//! Blockchain-adoption cost model
//!
//! Models partial adoption: a fraction `a` of load volume settles on-chain
//! in roughly half a day per leg, while the remainder keeps traditional
//! timing. Every savings component is the delta attributable to the adopted
//! fraction; blockchain transaction fees are a straight cost against them.

use serde::{Deserialize, Serialize};

use crate::models::{ParamsError, PaymentFlowParams};

use super::traditional::TraditionalPaymentModel;
use super::{ADMIN_EFFICIENCY, DEFAULT_POST_ADOPTION_SETTLEMENT_DAYS};

/// Cost/savings model for partial blockchain settlement adoption.
#[derive(Debug, Clone)]
pub struct BlockchainPaymentModel {
    params: PaymentFlowParams,
    adoption_rate: f64,
    tx_cost_per_load: f64,
    post_adoption_dso_days: f64,
    post_adoption_dpo_days: f64,
}

/// Itemized annual savings (and costs) attributable to adoption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockchainSavingsBreakdown {
    /// Reduction in working capital tied up (a stock, not a cost)
    pub working_capital_reduction: f64,
    pub financing_savings: f64,
    pub factoring_savings: f64,
    pub fraud_savings: f64,
    pub admin_savings: f64,
    /// Blockchain transaction fees on adopted volume (a cost)
    pub blockchain_tx_costs: f64,
    /// Gross savings minus transaction fees
    pub net_savings: f64,
}

impl BlockchainPaymentModel {
    /// Create a model at the given adoption rate and per-load fee.
    ///
    /// Post-adoption settlement takes
    /// [`DEFAULT_POST_ADOPTION_SETTLEMENT_DAYS`] on each leg; override with
    /// [`BlockchainPaymentModel::with_settlement_days`].
    ///
    /// # Errors
    ///
    /// Returns `ParamsError` if the parameter snapshot fails validation,
    /// the adoption rate leaves [0, 1], or the fee is negative.
    pub fn new(
        params: PaymentFlowParams,
        adoption_rate: f64,
        tx_cost_per_load: f64,
    ) -> Result<Self, ParamsError> {
        if !(0.0..=1.0).contains(&adoption_rate) {
            return Err(ParamsError::FractionOutOfRange {
                field: "adoption_rate",
                value: adoption_rate,
            });
        }
        if tx_cost_per_load < 0.0 {
            return Err(ParamsError::NegativeValue {
                field: "tx_cost_per_load",
                value: tx_cost_per_load,
            });
        }
        Ok(Self {
            params: params.validated()?,
            adoption_rate,
            tx_cost_per_load,
            post_adoption_dso_days: DEFAULT_POST_ADOPTION_SETTLEMENT_DAYS,
            post_adoption_dpo_days: DEFAULT_POST_ADOPTION_SETTLEMENT_DAYS,
        })
    }

    /// Override the post-adoption settlement times (days) for each leg.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError` if either value is negative.
    pub fn with_settlement_days(mut self, dso_days: f64, dpo_days: f64) -> Result<Self, ParamsError> {
        for (field, value) in [
            ("post_adoption_dso_days", dso_days),
            ("post_adoption_dpo_days", dpo_days),
        ] {
            if value < 0.0 {
                return Err(ParamsError::NegativeValue { field, value });
            }
        }
        self.post_adoption_dso_days = dso_days;
        self.post_adoption_dpo_days = dpo_days;
        Ok(self)
    }

    /// The adoption fraction this model evaluates at.
    pub fn adoption_rate(&self) -> f64 {
        self.adoption_rate
    }

    fn traditional(&self) -> TraditionalPaymentModel {
        TraditionalPaymentModel::from_validated(self.params)
    }

    /// Working-capital gap blended across adopted and unadopted volume.
    pub fn blended_working_capital_gap(&self) -> f64 {
        let traditional_gap = self.params.working_capital_gap_days();
        let post_adoption_gap = self.post_adoption_dso_days - self.post_adoption_dpo_days;
        (1.0 - self.adoption_rate) * traditional_gap + self.adoption_rate * post_adoption_gap
    }

    /// Working capital still tied up under the blended gap.
    pub fn reduced_working_capital(&self) -> f64 {
        self.params.daily_revenue() * self.blended_working_capital_gap()
    }

    /// Working capital released by adoption.
    pub fn working_capital_savings(&self) -> f64 {
        self.traditional().working_capital_tied_up() - self.reduced_working_capital()
    }

    /// Annual financing saved on the released working capital.
    pub fn financing_savings(&self) -> f64 {
        self.working_capital_savings() * self.params.cost_of_capital
    }

    /// Annual blockchain transaction fees on adopted loads.
    pub fn blockchain_tx_costs(&self) -> f64 {
        let adopted_loads = (self.params.loads_per_year as f64 * self.adoption_rate).floor();
        adopted_loads * self.tx_cost_per_load
    }

    /// Annual fraud losses avoided on adopted volume.
    ///
    /// `fraud_reduction_pct` is the effectiveness of on-chain settlement
    /// against fraud; only the adopted fraction of volume benefits.
    pub fn fraud_savings(&self, fraud_reduction_pct: f64) -> f64 {
        self.traditional().fraud_losses() * fraud_reduction_pct * self.adoption_rate
    }

    /// Annual factoring fees eliminated: adopted volume no longer factors.
    pub fn factoring_savings(&self, pct_factored: f64) -> f64 {
        self.traditional().factoring_cost(pct_factored) * self.adoption_rate
    }

    /// Annual admin cost avoided on adopted loads, at [`ADMIN_EFFICIENCY`].
    pub fn admin_savings(&self) -> f64 {
        self.traditional().admin_costs() * self.adoption_rate * ADMIN_EFFICIENCY
    }

    /// Net annual savings: gross component savings minus transaction fees.
    pub fn net_savings(&self, pct_factored: f64, fraud_reduction_pct: f64) -> f64 {
        let gross = self.financing_savings()
            + self.factoring_savings(pct_factored)
            + self.fraud_savings(fraud_reduction_pct)
            + self.admin_savings();
        gross - self.blockchain_tx_costs()
    }

    /// Total annual payment infrastructure cost under partial adoption.
    ///
    /// Reconstituted component by component rather than derived from
    /// `net_savings`, so the two derivations cross-check each other:
    /// for any `(pct_factored, fraud_reduction_pct)`,
    /// `traditional.total_cost(..) - net_savings(..) == total_cost(..)`
    /// up to floating-point noise.
    pub fn total_cost(&self, pct_factored: f64, fraud_reduction_pct: f64) -> f64 {
        let traditional = self.traditional();
        let financing_cost = self.reduced_working_capital() * self.params.cost_of_capital;
        let factoring_cost = traditional.factoring_cost(pct_factored) * (1.0 - self.adoption_rate);
        let fraud_cost = traditional.fraud_losses() - self.fraud_savings(fraud_reduction_pct);
        let admin_cost = traditional.admin_costs() - self.admin_savings();
        financing_cost + factoring_cost + fraud_cost + admin_cost + self.blockchain_tx_costs()
    }

    /// Itemized savings breakdown.
    pub fn savings_breakdown(
        &self,
        pct_factored: f64,
        fraud_reduction_pct: f64,
    ) -> BlockchainSavingsBreakdown {
        BlockchainSavingsBreakdown {
            working_capital_reduction: self.working_capital_savings(),
            financing_savings: self.financing_savings(),
            factoring_savings: self.factoring_savings(pct_factored),
            fraud_savings: self.fraud_savings(fraud_reduction_pct),
            admin_savings: self.admin_savings(),
            blockchain_tx_costs: self.blockchain_tx_costs(),
            net_savings: self.net_savings(pct_factored, fraud_reduction_pct),
        }
    }
}
