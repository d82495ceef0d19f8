//! Simulation result reports
//!
//! The terminal report object for one simulation batch, plus the pairwise
//! traditional-vs-blockchain risk-reduction comparison consumed by the
//! reporting layer.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::stats;

use super::engine::{SettlementPolicy, SimulationError, SimulationParams};
use super::ensemble::Ensemble;
use super::risk::compute_risk_statistics;

/// Output of one simulation batch. Read-only once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResults {
    /// Identifier for this batch object (not part of the random stream)
    pub run_id: Uuid,

    /// Policy the batch ran under
    pub policy: SettlementPolicy,

    /// SHA-256 digest of (params, policy); results with equal digests came
    /// from like-for-like configurations and are directly comparable
    pub params_digest: String,

    /// Full trials × days position ensemble
    pub daily_positions: Ensemble,

    /// Cross-trial mean position per day
    pub mean_position: Vec<f64>,

    /// Cross-trial std dev per day
    pub std_position: Vec<f64>,

    pub var_95: f64,
    pub var_99: f64,
    pub cvar_95: f64,
    /// 95th percentile of per-trial max drawdown
    pub max_drawdown: f64,
    pub peak_capital_required: f64,
}

/// Flat scalar summary of one batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Mean over days of the per-day mean position
    pub mean_daily_position: f64,
    /// Mean over days of the per-day std dev
    pub std_daily_position: f64,
    pub var_95: f64,
    pub var_99: f64,
    pub cvar_95: f64,
    pub max_drawdown: f64,
    pub peak_capital_required: f64,
}

impl SimulationResults {
    /// Assemble the report from a finished ensemble.
    pub(crate) fn from_ensemble(
        params: &SimulationParams,
        policy: SettlementPolicy,
        ensemble: Ensemble,
    ) -> Result<Self, SimulationError> {
        let risk = compute_risk_statistics(&ensemble);
        Ok(Self {
            run_id: Uuid::new_v4(),
            policy,
            params_digest: digest_config(params, policy)?,
            mean_position: ensemble.mean_by_day(),
            std_position: ensemble.std_by_day(),
            var_95: risk.var_95,
            var_99: risk.var_99,
            cvar_95: risk.cvar_95,
            max_drawdown: risk.max_drawdown,
            peak_capital_required: risk.peak_capital_required,
            daily_positions: ensemble,
        })
    }

    /// Flat scalar summary.
    pub fn summary(&self) -> SimulationSummary {
        SimulationSummary {
            mean_daily_position: stats::mean(&self.mean_position),
            std_daily_position: stats::mean(&self.std_position),
            var_95: self.var_95,
            var_99: self.var_99,
            cvar_95: self.cvar_95,
            max_drawdown: self.max_drawdown,
            peak_capital_required: self.peak_capital_required,
        }
    }

    /// Mean daily volatility: mean over the horizon of the per-day std dev.
    pub fn mean_daily_volatility(&self) -> f64 {
        stats::mean(&self.std_position)
    }
}

/// SHA-256 over the JSON encoding of (params, policy).
fn digest_config(
    params: &SimulationParams,
    policy: SettlementPolicy,
) -> Result<String, SimulationError> {
    let json = serde_json::to_string(&(params, policy))?;
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

/// Risk reduction achieved by a blockchain-policy run relative to a
/// traditional-policy run at the same horizon and trial count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskReduction {
    pub var_95_reduction: f64,
    /// Percent reduction in VaR(95%); 0 when the traditional VaR is 0
    pub var_95_reduction_pct: f64,
    pub cvar_95_reduction: f64,
    pub peak_capital_reduction: f64,
    /// Reduction in mean daily volatility across the horizon
    pub volatility_reduction: f64,
}

/// Compare a traditional-policy result against a blockchain-policy result.
pub fn risk_reduction(
    traditional: &SimulationResults,
    blockchain: &SimulationResults,
) -> RiskReduction {
    let var_95_reduction = traditional.var_95 - blockchain.var_95;
    let var_95_reduction_pct = if traditional.var_95 > 0.0 {
        var_95_reduction / traditional.var_95 * 100.0
    } else {
        0.0
    };

    RiskReduction {
        var_95_reduction,
        var_95_reduction_pct,
        cvar_95_reduction: traditional.cvar_95 - blockchain.cvar_95,
        peak_capital_reduction: traditional.peak_capital_required
            - blockchain.peak_capital_required,
        volatility_reduction: traditional.mean_daily_volatility()
            - blockchain.mean_daily_volatility(),
    }
}
