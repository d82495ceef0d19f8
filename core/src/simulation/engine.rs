//! Simulation engine
//!
//! Runs the day-by-day cash-position recurrence across independent trials
//! under a settlement policy.
//!
//! # The recurrence (fast path)
//!
//! For each trial, for each day:
//!
//! 1. Draw aggregate daily revenue: Normal(loads/day × mean revenue/load,
//!    √(loads/day) × revenue std). Aggregating over independent loads
//!    shrinks relative volatility by √loads. Floored at 50% of the mean.
//! 2. Draw the day's "gap days": a collection-timing draw minus a
//!    disbursement-timing draw, with policy-blended means and stds.
//! 3. Update `position = position × POSITION_DECAY + revenue × gap / days`
//!    and record it.
//!
//! An exact per-load variant ([`WorkingCapitalSimulator::simulate_exact_traditional`])
//! ledgers every load's payment and collection day individually. It is the
//! correctness oracle for small trial counts; the fast path is the
//! production path and the two must agree statistically.
//!
//! # Determinism
//!
//! Trial `i` always draws from `RngManager::substream(run_seed, i)`, so
//! results are identical regardless of trial execution order, and
//! ensembles from the same seed are bit-for-bit reproducible.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::rng::RngManager;

use super::ensemble::Ensemble;
use super::results::SimulationResults;

/// Day-over-day carry factor for the cash position.
///
/// Models gradual resolution of prior-day exposure. Empirically chosen
/// smoothing constant, not derived from DSO/DPO.
pub const POSITION_DECAY: f64 = 0.98;

/// Daily revenue draws are floored at this fraction of the mean.
pub const REVENUE_FLOOR_FRACTION: f64 = 0.5;

/// Fraction of load revenue paid out to the carrier (per-load oracle path).
pub const CARRIER_COST_RATIO: f64 = 0.85;

/// Per-load revenue floor in the oracle path (USD).
const MIN_LOAD_REVENUE: f64 = 100.0;

/// Minimum payment delay in the oracle path (days).
const MIN_PAYMENT_DELAY_DAYS: f64 = 1.0;

/// Adoption rates used by comparative sweeps unless the caller supplies
/// their own list.
pub const DEFAULT_ADOPTION_RATES: [f64; 6] = [0.0, 0.10, 0.30, 0.50, 0.75, 1.0];

/// Simulation error types
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation error
    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),

    /// Result serialization error (run digests)
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration for one simulation batch.
///
/// Immutable after construction; the optional seed fully determines the
/// random stream of every trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Number of independent trials
    pub n_simulations: usize,

    /// Horizon in days
    pub simulation_days: usize,

    /// Loads settled per day
    pub loads_per_day: u64,

    /// Shipper payment timing (DSO-like), days
    pub shipper_payment_mean: f64,
    pub shipper_payment_std: f64,

    /// Carrier payment timing (DPO-like), days
    pub carrier_payment_mean: f64,
    pub carrier_payment_std: f64,

    /// Per-load revenue (USD)
    pub revenue_per_load_mean: f64,
    pub revenue_per_load_std: f64,

    /// On-chain settlement time for adopted volume, days
    pub blockchain_settlement_days: f64,

    /// Seed for the run's random streams; `None` = non-reproducible
    pub random_seed: Option<u64>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            n_simulations: 10_000,
            simulation_days: 365,
            loads_per_day: 43_014,
            shipper_payment_mean: 49.0,
            shipper_payment_std: 15.0,
            carrier_payment_mean: 27.0,
            carrier_payment_std: 5.0,
            revenue_per_load_mean: 1_127.0,
            revenue_per_load_std: 500.0,
            blockchain_settlement_days: 0.5,
            random_seed: Some(42),
        }
    }
}

impl SimulationParams {
    fn validate(&self) -> Result<(), SimulationError> {
        if self.n_simulations == 0 {
            return Err(SimulationError::InvalidConfig(
                "n_simulations must be > 0".to_string(),
            ));
        }
        if self.simulation_days == 0 {
            return Err(SimulationError::InvalidConfig(
                "simulation_days must be > 0".to_string(),
            ));
        }
        if self.loads_per_day == 0 {
            return Err(SimulationError::InvalidConfig(
                "loads_per_day must be > 0".to_string(),
            ));
        }
        if self.revenue_per_load_mean <= 0.0 {
            return Err(SimulationError::InvalidConfig(
                "revenue_per_load_mean must be > 0".to_string(),
            ));
        }
        for (name, value) in [
            ("shipper_payment_mean", self.shipper_payment_mean),
            ("shipper_payment_std", self.shipper_payment_std),
            ("carrier_payment_mean", self.carrier_payment_mean),
            ("carrier_payment_std", self.carrier_payment_std),
            ("revenue_per_load_std", self.revenue_per_load_std),
            ("blockchain_settlement_days", self.blockchain_settlement_days),
        ] {
            if value < 0.0 {
                return Err(SimulationError::InvalidConfig(format!(
                    "{name} cannot be negative (got {value})"
                )));
            }
        }
        Ok(())
    }
}

/// Settlement policy for a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SettlementPolicy {
    /// Status-quo invoicing: full DSO/DPO timing variance
    Traditional,

    /// Partial on-chain settlement at the given adoption fraction.
    /// Adopted volume settles in `blockchain_settlement_days` with near-zero
    /// variance, pulling both the blended mean and std toward zero.
    Blockchain { adoption_rate: f64 },
}

/// Policy-effective timing distribution for one payment leg.
#[derive(Debug, Clone, Copy)]
struct LegTiming {
    mean: f64,
    std_dev: f64,
}

/// Monte Carlo simulator for working-capital exposure.
///
/// # Example
///
/// ```
/// use freight_settlement_core_rs::simulation::{
///     SettlementPolicy, SimulationParams, WorkingCapitalSimulator,
/// };
///
/// let params = SimulationParams {
///     n_simulations: 200,
///     simulation_days: 60,
///     ..Default::default()
/// };
/// let simulator = WorkingCapitalSimulator::new(params).unwrap();
/// let ensemble = simulator.simulate(SettlementPolicy::Traditional).unwrap();
/// assert_eq!(ensemble.shape(), (200, 60));
/// ```
pub struct WorkingCapitalSimulator {
    params: SimulationParams,
    /// Resolved run seed (explicit seed, or entropy when none was given)
    run_seed: u64,
}

impl WorkingCapitalSimulator {
    /// Create a simulator over validated parameters.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidConfig` on zero counts or negative
    /// timing/revenue spreads.
    pub fn new(params: SimulationParams) -> Result<Self, SimulationError> {
        params.validate()?;
        let run_seed = match params.random_seed {
            Some(seed) => seed,
            None => RngManager::from_entropy().get_state(),
        };
        Ok(Self { params, run_seed })
    }

    /// The parameter snapshot this simulator runs.
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Mean aggregate daily revenue.
    fn mean_daily_revenue(&self) -> f64 {
        self.params.loads_per_day as f64 * self.params.revenue_per_load_mean
    }

    /// Aggregate daily revenue std: √loads × per-load std (diversification
    /// across independent loads).
    fn daily_revenue_std(&self) -> f64 {
        (self.params.loads_per_day as f64).sqrt() * self.params.revenue_per_load_std
    }

    /// Policy-effective timing for (collection leg, disbursement leg).
    fn policy_timing(
        &self,
        policy: SettlementPolicy,
    ) -> Result<(LegTiming, LegTiming), SimulationError> {
        let p = &self.params;
        match policy {
            SettlementPolicy::Traditional => Ok((
                LegTiming { mean: p.shipper_payment_mean, std_dev: p.shipper_payment_std },
                LegTiming { mean: p.carrier_payment_mean, std_dev: p.carrier_payment_std },
            )),
            SettlementPolicy::Blockchain { adoption_rate } => {
                if !(0.0..=1.0).contains(&adoption_rate) {
                    return Err(SimulationError::InvalidConfig(format!(
                        "adoption_rate must lie in [0, 1] (got {adoption_rate})"
                    )));
                }
                let blend = |mean: f64, std_dev: f64| LegTiming {
                    mean: (1.0 - adoption_rate) * mean
                        + adoption_rate * p.blockchain_settlement_days,
                    std_dev: (1.0 - adoption_rate) * std_dev,
                };
                Ok((
                    blend(p.shipper_payment_mean, p.shipper_payment_std),
                    blend(p.carrier_payment_mean, p.carrier_payment_std),
                ))
            }
        }
    }

    /// Run the fast aggregate recurrence under a settlement policy.
    ///
    /// Returns an ensemble of shape (n_simulations, simulation_days). Trial
    /// draw order within a day is fixed: revenue, collection timing,
    /// disbursement timing.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidConfig` if a blockchain policy
    /// carries an adoption rate outside [0, 1].
    pub fn simulate(&self, policy: SettlementPolicy) -> Result<Ensemble, SimulationError> {
        let (collection, disbursement) = self.policy_timing(policy)?;
        let p = &self.params;
        let n_days = p.simulation_days;

        let mean_revenue = self.mean_daily_revenue();
        let revenue_std = self.daily_revenue_std();
        let revenue_floor = REVENUE_FLOOR_FRACTION * mean_revenue;

        debug!(
            "simulating {} trials x {} days under {:?}",
            p.n_simulations, n_days, policy
        );

        let mut ensemble = Ensemble::zeros(p.n_simulations, n_days);
        for trial in 0..p.n_simulations {
            let mut rng = RngManager::substream(self.run_seed, trial as u64);
            let mut position = 0.0;
            let trajectory = ensemble.trial_mut(trial);

            for day in 0..n_days {
                let revenue = rng.normal(mean_revenue, revenue_std).max(revenue_floor);
                let collection_days = rng.normal(collection.mean, collection.std_dev);
                let disbursement_days = rng.normal(disbursement.mean, disbursement.std_dev);
                let gap_days = collection_days - disbursement_days;

                position = position * POSITION_DECAY + revenue * gap_days / n_days as f64;
                trajectory[day] = position;
            }
        }

        Ok(ensemble)
    }

    /// Exact per-load reference simulation of the traditional policy.
    ///
    /// Ledgers every load's carrier payment day and shipper collection day
    /// individually; position(t) is cumulative carrier outflows
    /// (revenue × [`CARRIER_COST_RATIO`]) minus cumulative shipper inflows.
    /// O(trials × days × loads): a correctness oracle for small trial
    /// counts, not a production path.
    pub fn simulate_exact_traditional(&self) -> Ensemble {
        let p = &self.params;
        let n_days = p.simulation_days;

        let mut ensemble = Ensemble::zeros(p.n_simulations, n_days);
        for trial in 0..p.n_simulations {
            let mut rng = RngManager::substream(self.run_seed, trial as u64);
            let mut outflow_on_day = vec![0.0; n_days];
            let mut inflow_on_day = vec![0.0; n_days];

            for day in 0..n_days {
                for _ in 0..p.loads_per_day {
                    let revenue = rng
                        .normal(p.revenue_per_load_mean, p.revenue_per_load_std)
                        .max(MIN_LOAD_REVENUE);
                    let carrier_delay = rng
                        .normal(p.carrier_payment_mean, p.carrier_payment_std)
                        .max(MIN_PAYMENT_DELAY_DAYS) as usize;
                    let shipper_delay = rng
                        .normal(p.shipper_payment_mean, p.shipper_payment_std)
                        .max(MIN_PAYMENT_DELAY_DAYS) as usize;

                    // Payments past the horizon land on the final day.
                    let payment_day = (day + carrier_delay).min(n_days - 1);
                    let collection_day = (day + shipper_delay).min(n_days - 1);
                    outflow_on_day[payment_day] += revenue * CARRIER_COST_RATIO;
                    inflow_on_day[collection_day] += revenue;
                }
            }

            let trajectory = ensemble.trial_mut(trial);
            let mut cumulative_outflows = 0.0;
            let mut cumulative_inflows = 0.0;
            for day in 0..n_days {
                cumulative_outflows += outflow_on_day[day];
                cumulative_inflows += inflow_on_day[day];
                trajectory[day] = cumulative_outflows - cumulative_inflows;
            }
        }

        ensemble
    }

    /// Run one batch and assemble the full risk report.
    ///
    /// # Errors
    ///
    /// Propagates policy validation and digest serialization errors.
    pub fn run_monte_carlo(
        &self,
        policy: SettlementPolicy,
    ) -> Result<SimulationResults, SimulationError> {
        info!(
            "working-capital batch: {} trials, {} days, policy {:?}",
            self.params.n_simulations, self.params.simulation_days, policy
        );
        let ensemble = self.simulate(policy)?;
        SimulationResults::from_ensemble(&self.params, policy, ensemble)
    }

    /// Run the simulation once per adoption rate and key the results by
    /// percentage label ("0%", "30%", ...).
    ///
    /// A rate of zero resolves to the traditional policy; every other rate
    /// to the blockchain policy at that rate.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidConfig` on a rate outside [0, 1].
    pub fn run_comparative(
        &self,
        adoption_rates: &[f64],
    ) -> Result<BTreeMap<String, SimulationResults>, SimulationError> {
        info!("comparative sweep over {} adoption rates", adoption_rates.len());

        let mut results = BTreeMap::new();
        for &rate in adoption_rates {
            let policy = if rate == 0.0 {
                SettlementPolicy::Traditional
            } else {
                SettlementPolicy::Blockchain { adoption_rate: rate }
            };
            let label = format!("{:.0}%", rate * 100.0);
            debug!("comparative sweep: {label}");
            results.insert(label, self.run_monte_carlo(policy)?);
        }
        Ok(results)
    }
}
