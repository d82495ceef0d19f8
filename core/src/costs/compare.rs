//! Side-by-side comparison of the two cost models

use serde::{Deserialize, Serialize};

use super::blockchain::{BlockchainPaymentModel, BlockchainSavingsBreakdown};
use super::traditional::{TraditionalCostBreakdown, TraditionalPaymentModel};

/// Full comparison of the traditional and blockchain cost models at one
/// adoption rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelComparison {
    pub traditional: TraditionalCostBreakdown,
    pub blockchain: BlockchainSavingsBreakdown,
    pub adoption_rate: f64,
    pub traditional_total: f64,
    pub blockchain_total: f64,
    /// Traditional total minus blockchain total
    pub net_savings: f64,
    /// Net savings as a percentage of the traditional total (0 when the
    /// traditional total is 0)
    pub savings_pct: f64,
    /// Net savings per dollar of blockchain transaction fees.
    /// `f64::INFINITY` when fees are zero and savings positive; 0 when fees
    /// are zero and savings non-positive.
    pub roi_on_tx_costs: f64,
}

/// Compare the two models on identical factoring and fraud assumptions.
pub fn compare_models(
    traditional: &TraditionalPaymentModel,
    blockchain: &BlockchainPaymentModel,
    pct_factored: f64,
    fraud_reduction_pct: f64,
) -> ModelComparison {
    let trad_breakdown = traditional.cost_breakdown(pct_factored);
    let bc_breakdown = blockchain.savings_breakdown(pct_factored, fraud_reduction_pct);
    let traditional_total = trad_breakdown.total_cost;
    let blockchain_total = blockchain.total_cost(pct_factored, fraud_reduction_pct);
    let net_savings = traditional_total - blockchain_total;

    let savings_pct = if traditional_total > 0.0 {
        net_savings / traditional_total * 100.0
    } else {
        0.0
    };

    let tx_costs = bc_breakdown.blockchain_tx_costs;
    let roi_on_tx_costs = if tx_costs > 0.0 {
        net_savings / tx_costs
    } else if net_savings > 0.0 {
        f64::INFINITY
    } else {
        0.0
    };

    ModelComparison {
        traditional: trad_breakdown,
        blockchain: bc_breakdown,
        adoption_rate: blockchain.adoption_rate(),
        traditional_total,
        blockchain_total,
        net_savings,
        savings_pct,
        roi_on_tx_costs,
    }
}
