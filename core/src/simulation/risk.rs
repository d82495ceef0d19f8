//! Tail-risk statistics over a simulation ensemble
//!
//! All statistics are defined on the per-trial *peak* position: the largest
//! cash exposure a trial ever reaches over the horizon. Degenerate inputs
//! (empty tails, single trials) fall back to documented values rather than
//! erroring.

use serde::{Deserialize, Serialize};

use crate::stats;

use super::ensemble::Ensemble;

/// The standard risk report derived from one ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskStatistics {
    /// 95th percentile of per-trial peak exposure
    pub var_95: f64,
    /// 99th percentile of per-trial peak exposure
    pub var_99: f64,
    /// Mean of the peak-exposure tail at or beyond VaR(95%)
    pub cvar_95: f64,
    /// 95th percentile across trials of the largest within-trial drop from
    /// a running maximum
    pub max_drawdown: f64,
    /// Capital buffer covering 95% of simulated outcomes; by definition the
    /// same statistic as `var_95`, reported under both names
    pub peak_capital_required: f64,
}

/// Value-at-Risk: the `confidence` percentile of per-trial peak exposure.
///
/// VaR(0.95) is the exposure level not exceeded in 95% of trials.
pub fn value_at_risk(ensemble: &Ensemble, confidence: f64) -> f64 {
    let mut peaks = ensemble.trial_peaks();
    peaks.sort_by(f64::total_cmp);
    stats::percentile_of_sorted(&peaks, confidence * 100.0)
}

/// Expected shortfall (CVaR): mean of the trial peaks at or beyond the VaR
/// threshold. Falls back to the threshold itself when no peak reaches it
/// (degenerate case with very few trials).
pub fn expected_shortfall(ensemble: &Ensemble, confidence: f64) -> f64 {
    let mut peaks = ensemble.trial_peaks();
    peaks.sort_by(f64::total_cmp);
    let threshold = stats::percentile_of_sorted(&peaks, confidence * 100.0);

    let tail: Vec<f64> = peaks.iter().copied().filter(|p| *p >= threshold).collect();
    if tail.is_empty() {
        threshold
    } else {
        stats::mean(&tail)
    }
}

/// 95th percentile across trials of the maximum within-trial drawdown
/// (largest drop from a running maximum to a later position).
pub fn max_drawdown_p95(ensemble: &Ensemble) -> f64 {
    let (n_trials, _) = ensemble.shape();
    let drawdowns: Vec<f64> = (0..n_trials)
        .map(|t| {
            let mut running_max = f64::NEG_INFINITY;
            let mut worst = 0.0_f64;
            for &position in ensemble.trial(t) {
                running_max = running_max.max(position);
                worst = worst.max(running_max - position);
            }
            worst
        })
        .collect();
    stats::percentile(&drawdowns, 95.0)
}

/// Compute the full risk report, sharing one peak computation.
pub fn compute_risk_statistics(ensemble: &Ensemble) -> RiskStatistics {
    let mut peaks = ensemble.trial_peaks();
    peaks.sort_by(f64::total_cmp);

    let var_95 = stats::percentile_of_sorted(&peaks, 95.0);
    let var_99 = stats::percentile_of_sorted(&peaks, 99.0);

    let tail: Vec<f64> = peaks.iter().copied().filter(|p| *p >= var_95).collect();
    let cvar_95 = if tail.is_empty() { var_95 } else { stats::mean(&tail) };

    RiskStatistics {
        var_95,
        var_99,
        cvar_95,
        max_drawdown: max_drawdown_p95(ensemble),
        peak_capital_required: var_95,
    }
}
