//! Tornado and spider sweeps
//!
//! One-at-a-time deterministic perturbation of cost-model inputs. Tornado
//! ranks parameters by output swing (ascending, the conventional chart
//! order); spider traces each variable across evenly spaced percentage
//! offsets from base.

use serde::{Deserialize, Serialize};

use crate::costs::{BlockchainPaymentModel, DEFAULT_TX_COST_PER_LOAD};
use crate::models::{ParamsError, PaymentFlowParams};

use super::{CostParameter, OutputMetric};

/// One row of a tornado analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityResult {
    pub parameter: CostParameter,
    pub base_value: f64,
    pub low_value: f64,
    pub high_value: f64,
    pub base_output: f64,
    pub low_output: f64,
    pub high_output: f64,
    /// Absolute output swing between the low and high evaluations
    pub swing: f64,
    /// Elasticity: (% output change) / (% input change); 0 when either base
    /// is zero
    pub sensitivity: f64,
}

/// Parameters swept by default, in evaluation order.
const DEFAULT_TORNADO_PARAMS: [CostParameter; 6] = [
    CostParameter::DsoDays,
    CostParameter::DpoDays,
    CostParameter::CostOfCapital,
    CostParameter::FactoringRate,
    CostParameter::FraudLossRate,
    CostParameter::AnnualRevenue,
];

/// One-at-a-time low/high perturbation of each parameter.
///
/// With `param_ranges = None`, each default parameter sweeps to
/// base × (1 ± `range_pct`). Results are sorted by ascending swing.
///
/// # Errors
///
/// Returns `ParamsError` if the base snapshot or a perturbed snapshot fails
/// validation.
pub fn tornado_analysis(
    base_params: PaymentFlowParams,
    param_ranges: Option<&[(CostParameter, (f64, f64))]>,
    metric: OutputMetric,
    adoption_rate: f64,
    range_pct: f64,
) -> Result<Vec<SensitivityResult>, ParamsError> {
    let base_params = base_params.validated()?;

    let ranges: Vec<(CostParameter, (f64, f64))> = match param_ranges {
        Some(ranges) => ranges.to_vec(),
        None => DEFAULT_TORNADO_PARAMS
            .iter()
            .map(|&p| {
                let base = p.base_value(&base_params);
                (p, (base * (1.0 - range_pct), base * (1.0 + range_pct)))
            })
            .collect(),
    };

    let base_model =
        BlockchainPaymentModel::new(base_params, adoption_rate, DEFAULT_TX_COST_PER_LOAD)?;
    let base_output = metric.evaluate(&base_model);

    let mut results = Vec::with_capacity(ranges.len());
    for (parameter, (low_value, high_value)) in ranges {
        let base_value = parameter.base_value(&base_params);

        let low_model = BlockchainPaymentModel::new(
            parameter.with_value(&base_params, low_value),
            adoption_rate,
            DEFAULT_TX_COST_PER_LOAD,
        )?;
        let low_output = metric.evaluate(&low_model);

        let high_model = BlockchainPaymentModel::new(
            parameter.with_value(&base_params, high_value),
            adoption_rate,
            DEFAULT_TX_COST_PER_LOAD,
        )?;
        let high_output = metric.evaluate(&high_model);

        let sensitivity = if base_value != 0.0 && base_output != 0.0 {
            let pct_change_input = (high_value - low_value) / base_value;
            if pct_change_input != 0.0 {
                ((high_output - low_output) / base_output) / pct_change_input
            } else {
                0.0
            }
        } else {
            0.0
        };

        results.push(SensitivityResult {
            parameter,
            base_value,
            low_value,
            high_value,
            base_output,
            low_output,
            high_output,
            swing: (high_output - low_output).abs(),
            sensitivity,
        });
    }

    results.sort_by(|a, b| a.swing.total_cmp(&b.swing));
    Ok(results)
}

/// Parameters whose swing clears a fraction of the base output.
///
/// `threshold_pct` is relative to |base output|: 0.10 keeps parameters that
/// move the output by at least 10%.
pub fn identify_key_uncertainties(
    results: &[SensitivityResult],
    threshold_pct: f64,
) -> Vec<CostParameter> {
    let Some(first) = results.first() else {
        return Vec::new();
    };
    let threshold = first.base_output.abs() * threshold_pct;
    results
        .iter()
        .filter(|r| r.swing >= threshold)
        .map(|r| r.parameter)
        .collect()
}

/// One variable's trace in a spider analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpiderSeries {
    pub parameter: CostParameter,
    /// Net savings at each offset, as percent change from the base output
    pub outputs_pct: Vec<f64>,
}

/// Spider analysis output: one shared offset axis, one series per variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpiderData {
    /// Fractional offsets from base (e.g. -0.3 ..= 0.3)
    pub pct_changes: Vec<f64>,
    pub series: Vec<SpiderSeries>,
}

/// Variables traced by default.
const DEFAULT_SPIDER_PARAMS: [CostParameter; 5] = [
    CostParameter::DsoDays,
    CostParameter::DpoDays,
    CostParameter::CostOfCapital,
    CostParameter::FactoringRate,
    CostParameter::FraudLossRate,
];

/// Sweep each variable across `n_points` evenly spaced offsets in
/// ±`range_pct`, reporting net savings normalized as percent change from the
/// base-case output (0 when the base output is 0).
///
/// # Errors
///
/// Returns `ParamsError` if any perturbed snapshot fails validation.
pub fn spider_analysis(
    params: PaymentFlowParams,
    variables: Option<&[CostParameter]>,
    range_pct: f64,
    n_points: usize,
    adoption_rate: f64,
) -> Result<SpiderData, ParamsError> {
    let params = params.validated()?;
    let variables: Vec<CostParameter> = match variables {
        Some(vars) => vars.to_vec(),
        None => DEFAULT_SPIDER_PARAMS.to_vec(),
    };

    let pct_changes = linspace(-range_pct, range_pct, n_points);

    let base_model = BlockchainPaymentModel::new(params, adoption_rate, DEFAULT_TX_COST_PER_LOAD)?;
    let base_output = OutputMetric::NetSavings.evaluate(&base_model);

    let mut series = Vec::with_capacity(variables.len());
    for parameter in variables {
        let base_value = parameter.base_value(&params);
        let mut outputs_pct = Vec::with_capacity(pct_changes.len());

        for &pct in &pct_changes {
            let model = BlockchainPaymentModel::new(
                parameter.with_value(&params, base_value * (1.0 + pct)),
                adoption_rate,
                DEFAULT_TX_COST_PER_LOAD,
            )?;
            let output = OutputMetric::NetSavings.evaluate(&model);
            let normalized = if base_output != 0.0 {
                (output - base_output) / base_output * 100.0
            } else {
                0.0
            };
            outputs_pct.push(normalized);
        }

        series.push(SpiderSeries { parameter, outputs_pct });
    }

    Ok(SpiderData { pct_changes, series })
}

/// `n` evenly spaced points across [start, end], inclusive of both ends.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => (0..n)
            .map(|i| start + (end - start) * i as f64 / (n - 1) as f64)
            .collect(),
    }
}
