//! Breakeven-adoption search and adoption-rate sweeps

use serde::{Deserialize, Serialize};

use crate::models::{ParamsError, PaymentFlowParams};

use super::blockchain::BlockchainPaymentModel;

/// Net savings must come within this many dollars of zero for the bisection
/// to stop early.
const BREAKEVEN_TOLERANCE: f64 = 1_000.0;

const BISECTION_ITERATIONS: usize = 100;

/// Find the adoption rate at which net savings crosses zero.
///
/// Bisection over [0.001, 1.0]; deterministic. Net savings is monotonically
/// non-decreasing in adoption, so negative savings at the midpoint pushes
/// the lower bound up.
///
/// # Errors
///
/// Returns `ParamsError` if the parameter snapshot fails validation.
pub fn breakeven_adoption(
    params: PaymentFlowParams,
    tx_cost_per_load: f64,
    pct_factored: f64,
    fraud_reduction_pct: f64,
) -> Result<f64, ParamsError> {
    let params = params.validated()?;
    let mut low = 0.001_f64;
    let mut high = 1.0_f64;
    let mut mid = (low + high) / 2.0;

    for _ in 0..BISECTION_ITERATIONS {
        let model = BlockchainPaymentModel::new(params, mid, tx_cost_per_load)?;
        let savings = model.net_savings(pct_factored, fraud_reduction_pct);
        if savings.abs() < BREAKEVEN_TOLERANCE {
            return Ok(mid);
        }
        if savings < 0.0 {
            low = mid;
        } else {
            high = mid;
        }
        mid = (low + high) / 2.0;
    }

    Ok(mid)
}

/// Savings components at one adoption rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdoptionSweepPoint {
    pub adoption_rate: f64,
    pub net_savings: f64,
    pub financing_savings: f64,
    pub factoring_savings: f64,
    pub fraud_savings: f64,
    pub blockchain_tx_costs: f64,
}

/// Evaluate the savings components across a list of adoption rates.
///
/// Uses the crate default factoring and fraud-reduction assumptions
/// ([`super::DEFAULT_PCT_FACTORED`], [`super::DEFAULT_FRAUD_REDUCTION`]).
///
/// # Errors
///
/// Returns `ParamsError` if validation fails or a rate leaves [0, 1].
pub fn adoption_sweep(
    params: PaymentFlowParams,
    adoption_rates: &[f64],
    tx_cost_per_load: f64,
) -> Result<Vec<AdoptionSweepPoint>, ParamsError> {
    let params = params.validated()?;
    let mut points = Vec::with_capacity(adoption_rates.len());

    for &rate in adoption_rates {
        let model = BlockchainPaymentModel::new(params, rate, tx_cost_per_load)?;
        points.push(AdoptionSweepPoint {
            adoption_rate: rate,
            net_savings: model.net_savings(super::DEFAULT_PCT_FACTORED, super::DEFAULT_FRAUD_REDUCTION),
            financing_savings: model.financing_savings(),
            factoring_savings: model.factoring_savings(super::DEFAULT_PCT_FACTORED),
            fraud_savings: model.fraud_savings(super::DEFAULT_FRAUD_REDUCTION),
            blockchain_tx_costs: model.blockchain_tx_costs(),
        });
    }

    Ok(points)
}
