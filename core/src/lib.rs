//! Freight Settlement Analytics - Rust Engine
//!
//! Estimates the financial impact of adopting blockchain-based settlement in
//! freight payment operations, relative to traditional factoring/invoicing:
//! deterministic cost/savings models, scenario ROI/NPV analysis, sensitivity
//! sweeps, and a Monte Carlo working-capital risk simulator.
//!
//! # Architecture
//!
//! - **models**: Validated parameter snapshots and adoption scenarios
//! - **costs**: Deterministic traditional/blockchain cost models
//! - **scenarios**: Scenario evaluation (ROI, payback, NPV)
//! - **sensitivity**: Tornado, spider, and Monte-Carlo-over-inputs sweeps
//! - **simulation**: Day-by-day working-capital risk simulator (VaR/CVaR)
//! - **rng**: Deterministic random number generation
//! - **stats**: Shared percentile/moment helpers
//!
//! # Critical Invariants
//!
//! 1. Parameter objects are validated at construction and never mutated
//! 2. All randomness is deterministic (seeded RNG, per-trial sub-streams)
//! 3. Degenerate statistics fall back to documented values, never errors

// Module declarations
pub mod costs;
pub mod models;
pub mod rng;
pub mod scenarios;
pub mod sensitivity;
pub mod simulation;
pub mod stats;

// Re-exports for convenience
pub use costs::{
    adoption_sweep, breakeven_adoption, compare_models, AdoptionSweepPoint,
    BlockchainPaymentModel, BlockchainSavingsBreakdown, ModelComparison,
    TraditionalCostBreakdown, TraditionalPaymentModel,
};
pub use models::{AdoptionScenario, ParamsError, PaymentFlowParams};
pub use rng::RngManager;
pub use scenarios::{
    evaluate_all, evaluate_scenario, scenario_summary, standard_scenarios, ScenarioResults,
    ScenarioSummary,
};
pub use sensitivity::{
    monte_carlo_sensitivity, spider_analysis, tornado_analysis, CostParameter, Distribution,
    McSensitivityResults, OutputMetric, SensitivityError, SensitivityResult,
};
pub use simulation::{
    compute_risk_statistics, risk_reduction, Ensemble, RiskReduction, RiskStatistics,
    SettlementPolicy, SimulationError, SimulationParams, SimulationResults,
    WorkingCapitalSimulator,
};
