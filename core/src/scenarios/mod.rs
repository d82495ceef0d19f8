//! Scenario engine
//!
//! Evaluates named adoption scenarios against the cost models and derives
//! the investment metrics a steering committee asks for: net annual savings,
//! ROI, payback period, and discounted NPV over the analysis horizon.
//!
//! Scenario evaluation composes the deterministic cost models; it draws no
//! random numbers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::costs::{
    BlockchainPaymentModel, BlockchainSavingsBreakdown, TraditionalPaymentModel,
    DEFAULT_PCT_FACTORED,
};
use crate::models::{AdoptionScenario, ParamsError, PaymentFlowParams};

/// Default annual discount rate for NPV.
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.10;

/// Default analysis horizon in years.
pub const DEFAULT_ANALYSIS_YEARS: u32 = 5;

/// Payback period (years) the breakeven-scenario search solves for.
const TARGET_PAYBACK_YEARS: f64 = 3.0;

/// Evaluated financial outcome of one adoption scenario.
///
/// `roi` and `payback_years` use `f64::INFINITY` as the documented sentinel
/// for "never pays back" / "free money" edge cases; they are never produced
/// by overflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResults {
    pub scenario: AdoptionScenario,
    /// Annual cost of the traditional regime
    pub traditional_cost: f64,
    /// Annual cost under the scenario (traditional minus savings plus maintenance)
    pub blockchain_cost: f64,
    /// Net annual savings after maintenance
    pub net_savings: f64,
    /// Net annual savings per dollar of implementation cost
    pub roi: f64,
    /// Years to recover the implementation cost
    pub payback_years: f64,
    /// Discounted NPV over the analysis horizon
    pub npv: f64,
    pub savings_breakdown: BlockchainSavingsBreakdown,
}

/// Evaluate one scenario.
///
/// Effective adoption is the scenario's binding minimum of headline rate and
/// readiness fractions. Net annual savings subtracts the scenario's
/// maintenance cost from the model's net savings.
///
/// # Errors
///
/// Returns `ParamsError` if the parameter snapshot or scenario fails
/// validation.
pub fn evaluate_scenario(
    params: PaymentFlowParams,
    scenario: &AdoptionScenario,
    discount_rate: f64,
    analysis_years: u32,
) -> Result<ScenarioResults, ParamsError> {
    let scenario = scenario.clone().validated()?;
    let traditional = TraditionalPaymentModel::new(params)?;
    let blockchain = BlockchainPaymentModel::new(
        params,
        scenario.effective_adoption(),
        scenario.tx_cost_per_load,
    )?;

    let traditional_cost = traditional.total_cost(DEFAULT_PCT_FACTORED, true);
    let model_savings = blockchain.net_savings(DEFAULT_PCT_FACTORED, scenario.fraud_reduction_pct);
    let net_annual_savings = model_savings - scenario.annual_maintenance_cost;
    let blockchain_cost = traditional_cost - model_savings + scenario.annual_maintenance_cost;

    let implementation = scenario.implementation_cost;
    let (roi, payback_years) = if implementation > 0.0 {
        let roi = net_annual_savings / implementation;
        let payback = if net_annual_savings > 0.0 {
            implementation / net_annual_savings
        } else {
            f64::INFINITY
        };
        (roi, payback)
    } else if net_annual_savings > 0.0 {
        (f64::INFINITY, 0.0)
    } else {
        (0.0, 0.0)
    };

    let mut npv = -implementation;
    for year in 1..=analysis_years {
        npv += net_annual_savings / (1.0 + discount_rate).powi(year as i32);
    }

    let savings_breakdown =
        blockchain.savings_breakdown(DEFAULT_PCT_FACTORED, scenario.fraud_reduction_pct);

    Ok(ScenarioResults {
        scenario,
        traditional_cost,
        blockchain_cost,
        net_savings: net_annual_savings,
        roi,
        payback_years,
        npv,
        savings_breakdown,
    })
}

/// The standard scenario catalog: conservative through aggressive adoption
/// trajectories with matching cost assumptions.
pub fn standard_scenarios() -> BTreeMap<String, AdoptionScenario> {
    let mut scenarios = BTreeMap::new();
    scenarios.insert(
        "conservative".to_string(),
        AdoptionScenario {
            name: "Conservative".to_string(),
            adoption_rate: 0.10,
            shipper_escrow_pct: 0.20,
            carrier_tech_ready_pct: 0.50,
            tx_cost_per_load: 10.0,
            fraud_reduction_pct: 0.05,
            regulatory_approval: false,
            implementation_cost: 75_000_000.0,
            annual_maintenance_cost: 15_000_000.0,
        },
    );
    scenarios.insert(
        "base_case".to_string(),
        AdoptionScenario {
            name: "Base Case".to_string(),
            adoption_rate: 0.30,
            shipper_escrow_pct: 0.40,
            carrier_tech_ready_pct: 0.70,
            tx_cost_per_load: 5.0,
            fraud_reduction_pct: 0.15,
            regulatory_approval: true,
            implementation_cost: 50_000_000.0,
            annual_maintenance_cost: 10_000_000.0,
        },
    );
    scenarios.insert(
        "optimistic".to_string(),
        AdoptionScenario {
            name: "Optimistic".to_string(),
            adoption_rate: 0.50,
            shipper_escrow_pct: 0.60,
            carrier_tech_ready_pct: 0.85,
            tx_cost_per_load: 3.0,
            fraud_reduction_pct: 0.25,
            regulatory_approval: true,
            implementation_cost: 40_000_000.0,
            annual_maintenance_cost: 8_000_000.0,
        },
    );
    scenarios.insert(
        "aggressive".to_string(),
        AdoptionScenario {
            name: "Aggressive".to_string(),
            adoption_rate: 0.75,
            shipper_escrow_pct: 0.80,
            carrier_tech_ready_pct: 0.95,
            tx_cost_per_load: 2.0,
            fraud_reduction_pct: 0.40,
            regulatory_approval: true,
            implementation_cost: 35_000_000.0,
            annual_maintenance_cost: 7_000_000.0,
        },
    );
    scenarios
}

/// Evaluate every scenario in a catalog, keyed as given.
///
/// # Errors
///
/// Returns the first validation error encountered.
pub fn evaluate_all(
    params: PaymentFlowParams,
    scenarios: &BTreeMap<String, AdoptionScenario>,
    discount_rate: f64,
) -> Result<BTreeMap<String, ScenarioResults>, ParamsError> {
    let mut results = BTreeMap::new();
    for (key, scenario) in scenarios {
        let result = evaluate_scenario(params, scenario, discount_rate, DEFAULT_ANALYSIS_YEARS)?;
        results.insert(key.clone(), result);
    }
    Ok(results)
}

/// Aggregate view across a set of evaluated scenarios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub avg_annual_savings: f64,
    pub min_annual_savings: f64,
    pub max_annual_savings: f64,
    pub avg_npv: f64,
    /// Mean of the finite payback periods; INFINITY when none is finite
    pub avg_payback_years: f64,
    pub best_scenario: String,
    pub worst_scenario: String,
    pub all_positive_npv: bool,
}

/// Summarize evaluated scenarios. Returns `None` for an empty set.
pub fn scenario_summary(results: &BTreeMap<String, ScenarioResults>) -> Option<ScenarioSummary> {
    if results.is_empty() {
        return None;
    }

    let savings: Vec<f64> = results.values().map(|r| r.net_savings).collect();
    let npvs: Vec<f64> = results.values().map(|r| r.npv).collect();
    let finite_paybacks: Vec<f64> = results
        .values()
        .map(|r| r.payback_years)
        .filter(|p| p.is_finite())
        .collect();

    let best = results
        .values()
        .max_by(|a, b| a.npv.total_cmp(&b.npv))?;
    let worst = results
        .values()
        .min_by(|a, b| a.npv.total_cmp(&b.npv))?;

    Some(ScenarioSummary {
        avg_annual_savings: crate::stats::mean(&savings),
        min_annual_savings: savings.iter().copied().fold(f64::INFINITY, f64::min),
        max_annual_savings: savings.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        avg_npv: crate::stats::mean(&npvs),
        avg_payback_years: if finite_paybacks.is_empty() {
            f64::INFINITY
        } else {
            crate::stats::mean(&finite_paybacks)
        },
        best_scenario: best.scenario.name.clone(),
        worst_scenario: worst.scenario.name.clone(),
        all_positive_npv: npvs.iter().all(|npv| *npv > 0.0),
    })
}

/// Find the adoption rate that hits a three-year payback, with readiness
/// constraints removed.
///
/// Bisection over [0.001, 1.0]: payback shortens as adoption (and savings)
/// rises, so a too-long payback pushes the lower bound up.
///
/// # Errors
///
/// Returns `ParamsError` if the parameter snapshot fails validation.
pub fn breakeven_scenario(
    params: PaymentFlowParams,
    implementation_cost: f64,
    annual_maintenance_cost: f64,
    tx_cost_per_load: f64,
) -> Result<f64, ParamsError> {
    let params = params.validated()?;
    let mut low = 0.001_f64;
    let mut high = 1.0_f64;
    let mut mid = (low + high) / 2.0;

    for _ in 0..100 {
        let scenario = AdoptionScenario {
            name: "Breakeven probe".to_string(),
            adoption_rate: mid,
            shipper_escrow_pct: 1.0,
            carrier_tech_ready_pct: 1.0,
            tx_cost_per_load,
            fraud_reduction_pct: 0.15,
            regulatory_approval: true,
            implementation_cost,
            annual_maintenance_cost,
        };
        let result =
            evaluate_scenario(params, &scenario, DEFAULT_DISCOUNT_RATE, DEFAULT_ANALYSIS_YEARS)?;

        if (result.payback_years - TARGET_PAYBACK_YEARS).abs() < 0.1 {
            return Ok(mid);
        }
        if result.payback_years > TARGET_PAYBACK_YEARS {
            low = mid;
        } else {
            high = mid;
        }
        mid = (low + high) / 2.0;
    }

    Ok(mid)
}

/// A scenario field that can be swept over candidate values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioParameter {
    AdoptionRate,
    ShipperEscrowPct,
    CarrierTechReadyPct,
    TxCostPerLoad,
    FraudReductionPct,
    ImplementationCost,
    AnnualMaintenanceCost,
}

impl ScenarioParameter {
    /// Field name as it appears on [`AdoptionScenario`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::AdoptionRate => "adoption_rate",
            Self::ShipperEscrowPct => "shipper_escrow_pct",
            Self::CarrierTechReadyPct => "carrier_tech_ready_pct",
            Self::TxCostPerLoad => "tx_cost_per_load",
            Self::FraudReductionPct => "fraud_reduction_pct",
            Self::ImplementationCost => "implementation_cost",
            Self::AnnualMaintenanceCost => "annual_maintenance_cost",
        }
    }

    /// Copy of `base` with this field set to `value`.
    pub fn apply(&self, base: &AdoptionScenario, value: f64) -> AdoptionScenario {
        let mut scenario = base.clone();
        scenario.name = format!("{} ({}={})", base.name, self.name(), value);
        match self {
            Self::AdoptionRate => scenario.adoption_rate = value,
            Self::ShipperEscrowPct => scenario.shipper_escrow_pct = value,
            Self::CarrierTechReadyPct => scenario.carrier_tech_ready_pct = value,
            Self::TxCostPerLoad => scenario.tx_cost_per_load = value,
            Self::FraudReductionPct => scenario.fraud_reduction_pct = value,
            Self::ImplementationCost => scenario.implementation_cost = value,
            Self::AnnualMaintenanceCost => scenario.annual_maintenance_cost = value,
        }
        scenario
    }
}

/// Investment metrics at one swept parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSweepPoint {
    pub parameter_value: f64,
    pub net_savings: f64,
    pub roi: f64,
    pub payback_years: f64,
    pub npv: f64,
}

/// Re-evaluate a scenario across candidate values of one field.
///
/// # Errors
///
/// Returns `ParamsError` if validation fails at any point (e.g. sweeping a
/// fractional field past 1.0).
pub fn scenario_parameter_sweep(
    params: PaymentFlowParams,
    base: &AdoptionScenario,
    parameter: ScenarioParameter,
    values: &[f64],
) -> Result<Vec<ScenarioSweepPoint>, ParamsError> {
    let mut points = Vec::with_capacity(values.len());
    for &value in values {
        let scenario = parameter.apply(base, value);
        let result =
            evaluate_scenario(params, &scenario, DEFAULT_DISCOUNT_RATE, DEFAULT_ANALYSIS_YEARS)?;
        points.push(ScenarioSweepPoint {
            parameter_value: value,
            net_savings: result.net_savings,
            roi: result.roi,
            payback_years: result.payback_years,
            npv: result.npv,
        });
    }
    Ok(points)
}
