//! Domain types for the payment flow analysis
//!
//! - `params`: macro payment-flow parameters (the immutable input snapshot)
//! - `scenario`: named adoption assumption bundles

pub mod params;
pub mod scenario;

pub use params::{
    cash_conversion_cycle, dpo_from_balance_sheet, dso_from_balance_sheet, ParamsError,
    PaymentFlowParams,
};
pub use scenario::AdoptionScenario;
