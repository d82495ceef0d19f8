//! Monte Carlo input sensitivity
//!
//! Draws independent parameter vectors from per-input distributions and
//! re-evaluates the cost model for every draw. Each trial resamples the
//! *inputs* once; there is no time stepping here.

use serde::{Deserialize, Serialize};

use crate::costs::{
    BlockchainPaymentModel, DEFAULT_FRAUD_REDUCTION, DEFAULT_PCT_FACTORED,
    DEFAULT_TX_COST_PER_LOAD,
};
use crate::models::{ParamsError, PaymentFlowParams};
use crate::rng::RngManager;
use crate::stats;

use super::distribution::Distribution;
use super::CostParameter;

/// Sampled adoption rates are clamped into this range before evaluation.
const ADOPTION_CLAMP: (f64, f64) = (0.01, 1.0);

/// An uncertain input the Monte Carlo sweep can resample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum McInput {
    /// A cost-model parameter
    Param(CostParameter),
    /// The adoption rate itself
    AdoptionRate,
}

/// Empirical distribution summary for one sampled output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleStats {
    pub mean: f64,
    pub std_dev: f64,
    pub median: f64,
    pub p5: f64,
    pub p95: f64,
    /// Fraction of samples strictly greater than zero
    pub prob_positive: f64,
}

impl SampleStats {
    /// Summarize a sample set.
    pub fn from_samples(samples: &[f64]) -> Self {
        Self {
            mean: stats::mean(samples),
            std_dev: stats::std_dev(samples),
            median: stats::median(samples),
            p5: stats::percentile(samples, 5.0),
            p95: stats::percentile(samples, 95.0),
            prob_positive: stats::fraction_positive(samples),
        }
    }
}

/// Results of a Monte Carlo input sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McSensitivityResults {
    pub net_savings: SampleStats,
    pub financing_savings: SampleStats,
    pub factoring_savings: SampleStats,
    pub fraud_savings: SampleStats,
    /// Raw net-savings draws, in trial order (kept for downstream
    /// probability-of-breakeven analysis)
    pub net_savings_samples: Vec<f64>,
    pub n_samples: usize,
}

/// The default input uncertainty set: timing parameters with relative
/// normal uncertainty, rate parameters with bounded uniform/triangular
/// ranges, and the adoption rate itself uniform around its point estimate.
pub fn default_input_distributions(
    params: &PaymentFlowParams,
    adoption_rate: f64,
) -> Vec<(McInput, Distribution)> {
    vec![
        (
            McInput::Param(CostParameter::DsoDays),
            Distribution::Normal { mean: params.dso_days, std_dev: params.dso_days * 0.15 },
        ),
        (
            McInput::Param(CostParameter::DpoDays),
            Distribution::Normal { mean: params.dpo_days, std_dev: params.dpo_days * 0.10 },
        ),
        (
            McInput::Param(CostParameter::CostOfCapital),
            Distribution::Uniform { low: 0.05, high: 0.09 },
        ),
        (
            McInput::Param(CostParameter::FactoringRate),
            Distribution::Uniform { low: 0.02, high: 0.04 },
        ),
        (
            McInput::Param(CostParameter::FraudLossRate),
            Distribution::Triangular { low: 0.003, mode: 0.005, high: 0.008 },
        ),
        (
            McInput::AdoptionRate,
            Distribution::Uniform {
                low: adoption_rate * 0.5,
                high: (adoption_rate * 1.5).min(1.0),
            },
        ),
    ]
}

/// Resample the cost-model inputs `n_samples` times and summarize the
/// resulting savings distributions.
///
/// With a seed the draw sequence is fully deterministic; inputs are sampled
/// in slice order within each trial.
///
/// # Errors
///
/// Returns `ParamsError` if a sampled parameter vector fails validation
/// (e.g. a wide normal on DSO drawing negative days). Callers wanting hard
/// guarantees should bound their distributions accordingly.
pub fn monte_carlo_sensitivity(
    params: PaymentFlowParams,
    inputs: &[(McInput, Distribution)],
    n_samples: usize,
    adoption_rate: f64,
    random_seed: Option<u64>,
) -> Result<McSensitivityResults, ParamsError> {
    let params = params.validated()?;
    let mut rng = match random_seed {
        Some(seed) => RngManager::new(seed),
        None => RngManager::from_entropy(),
    };

    let mut net_savings = Vec::with_capacity(n_samples);
    let mut financing = Vec::with_capacity(n_samples);
    let mut factoring = Vec::with_capacity(n_samples);
    let mut fraud = Vec::with_capacity(n_samples);

    for _ in 0..n_samples {
        let mut trial_params = params;
        let mut trial_adoption = adoption_rate;

        for (input, dist) in inputs {
            let value = dist.sample(&mut rng);
            match input {
                McInput::Param(p) => trial_params = p.with_value(&trial_params, value),
                McInput::AdoptionRate => {
                    trial_adoption = value.clamp(ADOPTION_CLAMP.0, ADOPTION_CLAMP.1)
                }
            }
        }

        let model =
            BlockchainPaymentModel::new(trial_params, trial_adoption, DEFAULT_TX_COST_PER_LOAD)?;
        net_savings.push(model.net_savings(DEFAULT_PCT_FACTORED, DEFAULT_FRAUD_REDUCTION));
        financing.push(model.financing_savings());
        factoring.push(model.factoring_savings(DEFAULT_PCT_FACTORED));
        fraud.push(model.fraud_savings(DEFAULT_FRAUD_REDUCTION));
    }

    Ok(McSensitivityResults {
        net_savings: SampleStats::from_samples(&net_savings),
        financing_savings: SampleStats::from_samples(&financing),
        factoring_savings: SampleStats::from_samples(&factoring),
        fraud_savings: SampleStats::from_samples(&fraud),
        net_savings_samples: net_savings,
        n_samples,
    })
}

/// Probability-of-breakeven summary over an investment horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakevenProbability {
    /// P(cumulative savings over the horizon exceed the implementation cost)
    pub prob_breakeven: f64,
    /// P(cumulative savings exceed twice the implementation cost)
    pub prob_2x_return: f64,
    /// Mean cumulative savings minus implementation cost (undiscounted)
    pub expected_npv: f64,
    pub median_savings: f64,
    pub savings_p5: f64,
    pub savings_p95: f64,
}

/// Estimate the probability that cumulative savings over `years` recover an
/// implementation cost, under input uncertainty.
///
/// # Errors
///
/// Propagates validation errors from [`monte_carlo_sensitivity`].
pub fn breakeven_probability(
    params: PaymentFlowParams,
    inputs: &[(McInput, Distribution)],
    implementation_cost: f64,
    years: u32,
    n_samples: usize,
    random_seed: Option<u64>,
) -> Result<BreakevenProbability, ParamsError> {
    let mc = monte_carlo_sensitivity(params, inputs, n_samples, 0.30, random_seed)?;

    let period_savings: Vec<f64> = mc
        .net_savings_samples
        .iter()
        .map(|s| s * years as f64)
        .collect();

    let count = period_savings.len().max(1) as f64;
    let prob_breakeven =
        period_savings.iter().filter(|s| **s > implementation_cost).count() as f64 / count;
    let prob_2x_return =
        period_savings.iter().filter(|s| **s > 2.0 * implementation_cost).count() as f64 / count;

    Ok(BreakevenProbability {
        prob_breakeven,
        prob_2x_return,
        expected_npv: stats::mean(&period_savings) - implementation_cost,
        median_savings: stats::median(&period_savings),
        savings_p5: stats::percentile(&period_savings, 5.0),
        savings_p95: stats::percentile(&period_savings, 95.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sweeps_reproduce() {
        let params = PaymentFlowParams::default();
        let inputs = default_input_distributions(&params, 0.30);
        let a = monte_carlo_sensitivity(params, &inputs, 200, 0.30, Some(42)).unwrap();
        let b = monte_carlo_sensitivity(params, &inputs, 200, 0.30, Some(42)).unwrap();
        assert_eq!(a.net_savings_samples, b.net_savings_samples);
    }

    #[test]
    fn sample_count_matches_request() {
        let params = PaymentFlowParams::default();
        let inputs = default_input_distributions(&params, 0.30);
        let results = monte_carlo_sensitivity(params, &inputs, 50, 0.30, Some(1)).unwrap();
        assert_eq!(results.n_samples, 50);
        assert_eq!(results.net_savings_samples.len(), 50);
    }
}
