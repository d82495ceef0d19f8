//! Simulation ensemble
//!
//! A trials × days matrix of daily net cash positions, stored row-major so
//! each trial's trajectory is one contiguous slice.

use serde::{Deserialize, Serialize};

use crate::stats;

/// Trials × days matrix of simulated cash positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ensemble {
    n_trials: usize,
    n_days: usize,
    positions: Vec<f64>,
}

impl Ensemble {
    /// Zero-filled ensemble of the given shape.
    pub(crate) fn zeros(n_trials: usize, n_days: usize) -> Self {
        Self {
            n_trials,
            n_days,
            positions: vec![0.0; n_trials * n_days],
        }
    }

    /// (n_trials, n_days)
    pub fn shape(&self) -> (usize, usize) {
        (self.n_trials, self.n_days)
    }

    /// One trial's day-by-day position trajectory.
    ///
    /// # Panics
    /// Panics if `trial` is out of range.
    pub fn trial(&self, trial: usize) -> &[f64] {
        assert!(trial < self.n_trials, "trial index out of range");
        &self.positions[trial * self.n_days..(trial + 1) * self.n_days]
    }

    pub(crate) fn trial_mut(&mut self, trial: usize) -> &mut [f64] {
        assert!(trial < self.n_trials, "trial index out of range");
        &mut self.positions[trial * self.n_days..(trial + 1) * self.n_days]
    }

    /// Maximum position reached within each trial.
    pub fn trial_peaks(&self) -> Vec<f64> {
        (0..self.n_trials)
            .map(|t| {
                self.trial(t)
                    .iter()
                    .copied()
                    .fold(f64::NEG_INFINITY, f64::max)
            })
            .collect()
    }

    /// Cross-trial mean position for each day.
    pub fn mean_by_day(&self) -> Vec<f64> {
        (0..self.n_days)
            .map(|d| {
                let sum: f64 = (0..self.n_trials).map(|t| self.trial(t)[d]).sum();
                sum / self.n_trials as f64
            })
            .collect()
    }

    /// Cross-trial population standard deviation for each day.
    pub fn std_by_day(&self) -> Vec<f64> {
        (0..self.n_days)
            .map(|d| {
                let column: Vec<f64> = (0..self.n_trials).map(|t| self.trial(t)[d]).collect();
                stats::std_dev(&column)
            })
            .collect()
    }
}
