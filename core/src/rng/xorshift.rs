//! xorshift64* random number generator
//!
//! This is a fast, high-quality PRNG that is deterministic and suitable
//! for simulation purposes.
//!
//! # Algorithm
//!
//! xorshift64* is a variant of xorshift that passes TestU01's BigCrush
//! statistical tests. It uses 64-bit state and produces 64-bit output.
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers. This is CRITICAL for:
//! - Debugging (reproduce exact simulation)
//! - Testing (verify behavior)
//! - Research (validate results)
//!
//! # Sub-streams
//!
//! Monte Carlo trials run independently of one another, so each trial gets
//! its own generator derived from `(run_seed, trial_index)` via
//! [`RngManager::substream`]. Results are therefore identical no matter in
//! which order trials execute.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use freight_settlement_core_rs::rng::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let value = rng.next();
/// let fraction = rng.next_f64(); // [0.0, 1.0)
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// # Arguments
    /// * `seed` - Initial seed value (u64)
    pub fn new(seed: u64) -> Self {
        // Ensure seed is never zero (xorshift requirement)
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Create an RNG seeded from the system clock.
    ///
    /// Only used when the caller supplies no explicit seed; such runs are
    /// not reproducible by contract.
    pub fn from_entropy() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5EED_5EED_5EED_5EED);
        Self::new(nanos)
    }

    /// Derive an independent sub-stream for one simulation trial.
    ///
    /// The derived seed mixes the run seed with the trial index through a
    /// splitmix64-style finalizer so that adjacent indices produce unrelated
    /// streams. Trial 7 of a run always sees the same draws, regardless of
    /// how many trials run or in what order.
    ///
    /// # Example
    /// ```
    /// use freight_settlement_core_rs::rng::RngManager;
    ///
    /// let mut trial_0 = RngManager::substream(42, 0);
    /// let mut trial_1 = RngManager::substream(42, 1);
    /// assert_ne!(trial_0.next(), trial_1.next());
    /// ```
    pub fn substream(run_seed: u64, trial_index: u64) -> Self {
        let mut z = run_seed ^ trial_index.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        Self::new(z ^ (z >> 31))
    }

    /// Generate next random u64 value
    ///
    /// This advances the internal state and returns a random value.
    pub fn next(&mut self) -> u64 {
        // xorshift64* algorithm
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Get current RNG state (for replay)
    pub fn get_state(&self) -> u64 {
        self.state
    }

    /// Generate random f64 in range [0.0, 1.0)
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        // Convert to [0.0, 1.0) using the top 53 bits
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Sample from the standard normal distribution (Box-Muller transform).
    pub fn standard_normal(&mut self) -> f64 {
        // Clamp away from zero so ln() stays finite.
        let u1 = self.next_f64().max(1e-12);
        let u2 = self.next_f64();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }

    /// Sample from a normal distribution with the given mean and std dev.
    ///
    /// # Example
    /// ```
    /// use freight_settlement_core_rs::rng::RngManager;
    ///
    /// let mut rng = RngManager::new(7);
    /// let days = rng.normal(49.0, 15.0);
    /// assert!(days.is_finite());
    /// ```
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        mean + std_dev * self.standard_normal()
    }

    /// Sample uniformly from [low, high).
    ///
    /// # Panics
    /// Panics if low > high.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        assert!(low <= high, "low must not exceed high");
        low + (high - low) * self.next_f64()
    }

    /// Sample from a triangular distribution via the inverse CDF.
    ///
    /// # Panics
    /// Panics if the support is malformed (low > high or mode outside
    /// [low, high]). Callers validate distribution specs at construction,
    /// so this only trips on internal misuse.
    pub fn triangular(&mut self, low: f64, mode: f64, high: f64) -> f64 {
        assert!(
            low <= mode && mode <= high,
            "triangular support must satisfy low <= mode <= high"
        );
        if high == low {
            return low;
        }
        let u = self.next_f64();
        let cut = (mode - low) / (high - low);
        if u < cut {
            low + (u * (high - low) * (mode - low)).sqrt()
        } else {
            high - ((1.0 - u) * (high - low) * (high - mode)).sqrt()
        }
    }
}
