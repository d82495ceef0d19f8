//! Working-capital Monte Carlo simulator
//!
//! The stochastic core of the crate: a day-by-day simulation of the net cash
//! position a freight broker must fund between paying carriers and
//! collecting from shippers, run across thousands of independent trials.
//!
//! # Architecture
//!
//! - `engine`: simulation parameters, settlement policies, and the trial loop
//! - `ensemble`: the trials × days position matrix
//! - `risk`: VaR / expected shortfall / drawdown statistics over an ensemble
//! - `results`: the assembled per-run report object and policy comparison
//!
//! # Critical Invariants
//!
//! 1. All randomness flows through seeded [`crate::rng::RngManager`] streams
//! 2. Each trial owns a sub-stream derived from (run seed, trial index);
//!    no state is shared across trials
//! 3. Ensembles always have shape (n_simulations, simulation_days)

pub mod engine;
pub mod ensemble;
pub mod results;
pub mod risk;

pub use engine::{
    SettlementPolicy, SimulationError, SimulationParams, WorkingCapitalSimulator,
    CARRIER_COST_RATIO, DEFAULT_ADOPTION_RATES, POSITION_DECAY, REVENUE_FLOOR_FRACTION,
};
pub use ensemble::Ensemble;
pub use results::{risk_reduction, RiskReduction, SimulationResults, SimulationSummary};
pub use risk::{
    compute_risk_statistics, expected_shortfall, max_drawdown_p95, value_at_risk, RiskStatistics,
};
