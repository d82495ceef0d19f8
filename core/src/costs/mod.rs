//! Deterministic cost models for the two payment regimes
//!
//! This module provides:
//! - `TraditionalPaymentModel`: the factoring/invoicing status quo
//! - `BlockchainPaymentModel`: partial adoption of on-chain settlement
//! - Model comparison and breakeven-adoption search
//!
//! Both models are pure functions of a validated [`PaymentFlowParams`]
//! snapshot: no state, no randomness. The stochastic treatment of the same
//! cash flows lives in `crate::simulation`.

pub mod blockchain;
pub mod breakeven;
pub mod compare;
pub mod traditional;

pub use blockchain::{BlockchainPaymentModel, BlockchainSavingsBreakdown};
pub use breakeven::{adoption_sweep, breakeven_adoption, AdoptionSweepPoint};
pub use compare::{compare_models, ModelComparison};
pub use traditional::{TraditionalCostBreakdown, TraditionalPaymentModel};

/// Fraction of receivables factored in the traditional regime unless the
/// caller says otherwise.
pub const DEFAULT_PCT_FACTORED: f64 = 0.30;

/// Default per-load blockchain transaction cost (USD).
pub const DEFAULT_TX_COST_PER_LOAD: f64 = 5.0;

/// Default fraud-reduction effectiveness on adopted volume.
pub const DEFAULT_FRAUD_REDUCTION: f64 = 0.50;

/// Fraction of per-load admin cost eliminated on adopted loads.
///
/// Fixed empirical assumption: smart-contract settlement removes most but
/// not all back-office handling (disputes, exceptions, onboarding remain).
pub const ADMIN_EFFICIENCY: f64 = 0.70;

/// Post-adoption settlement time for either leg, in days.
pub const DEFAULT_POST_ADOPTION_SETTLEMENT_DAYS: f64 = 0.5;
