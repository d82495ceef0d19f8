//! Tests for the deterministic cost models
//!
//! Covers the traditional cost breakdown, blockchain savings deltas, the
//! independent total-cost reconstitution identity, monotonicity in adoption,
//! and the breakeven bisection.

use freight_settlement_core_rs::costs::{
    adoption_sweep, breakeven_adoption, compare_models, BlockchainPaymentModel,
    TraditionalPaymentModel, ADMIN_EFFICIENCY, DEFAULT_FRAUD_REDUCTION, DEFAULT_PCT_FACTORED,
};
use freight_settlement_core_rs::models::PaymentFlowParams;

fn approx_eq(actual: f64, expected: f64, rel: f64) -> bool {
    if expected == 0.0 {
        return actual.abs() < 1e-9;
    }
    ((actual - expected) / expected).abs() < rel
}

// ============================================================================
// Traditional model
// ============================================================================

#[test]
fn test_working_capital_tied_up() {
    let params = PaymentFlowParams::default();
    let model = TraditionalPaymentModel::new(params).unwrap();
    let expected = params.daily_revenue() * params.working_capital_gap_days();
    assert!(approx_eq(model.working_capital_tied_up(), expected, 0.01));
    // ~$1.067B at the default snapshot
    assert!(approx_eq(model.working_capital_tied_up(), 1.0668e9, 0.01));
}

#[test]
fn test_financing_cost() {
    let params = PaymentFlowParams::default();
    let model = TraditionalPaymentModel::new(params).unwrap();
    let expected = model.working_capital_tied_up() * params.cost_of_capital;
    assert!(approx_eq(model.financing_cost(), expected, 0.01));
}

#[test]
fn test_factoring_cost() {
    let params = PaymentFlowParams::default();
    let model = TraditionalPaymentModel::new(params).unwrap();
    let expected = params.annual_revenue * 0.30 * params.factoring_rate;
    assert!(approx_eq(model.factoring_cost(0.30), expected, 0.01));
}

#[test]
fn test_fraud_losses() {
    let params = PaymentFlowParams::default();
    let model = TraditionalPaymentModel::new(params).unwrap();
    assert!(approx_eq(
        model.fraud_losses(),
        params.annual_revenue * params.fraud_loss_rate,
        0.01
    ));
}

#[test]
fn test_admin_costs() {
    let params = PaymentFlowParams::default();
    let model = TraditionalPaymentModel::new(params).unwrap();
    assert!(approx_eq(
        model.admin_costs(),
        params.loads_per_year as f64 * params.admin_cost_per_load,
        0.01
    ));
}

#[test]
fn test_total_cost_is_sum_of_components() {
    let model = TraditionalPaymentModel::new(PaymentFlowParams::default()).unwrap();
    let expected = model.financing_cost()
        + model.factoring_cost(DEFAULT_PCT_FACTORED)
        + model.fraud_losses()
        + model.admin_costs();
    assert!(approx_eq(
        model.total_cost(DEFAULT_PCT_FACTORED, true),
        expected,
        0.01
    ));
}

#[test]
fn test_breakdown_total_matches_total_cost() {
    let model = TraditionalPaymentModel::new(PaymentFlowParams::default()).unwrap();
    let breakdown = model.cost_breakdown(DEFAULT_PCT_FACTORED);
    assert_eq!(breakdown.total_cost, model.total_cost(DEFAULT_PCT_FACTORED, true));
}

// ============================================================================
// Blockchain model
// ============================================================================

#[test]
fn test_blended_gap_at_30_pct_adoption() {
    let params = PaymentFlowParams::default();
    let model = BlockchainPaymentModel::new(params, 0.30, 5.0).unwrap();
    // Default post-adoption legs are symmetric, so the adopted gap is zero.
    let expected = 0.70 * (params.dso_days - params.dpo_days);
    assert!(approx_eq(model.blended_working_capital_gap(), expected, 0.01));
}

#[test]
fn test_adoption_reduces_working_capital() {
    let params = PaymentFlowParams::default();
    let traditional = TraditionalPaymentModel::new(params).unwrap();
    let blockchain = BlockchainPaymentModel::new(params, 0.30, 5.0).unwrap();
    assert!(blockchain.reduced_working_capital() < traditional.working_capital_tied_up());
}

#[test]
fn test_tx_costs_floor_adopted_loads() {
    let params = PaymentFlowParams::default();
    let model = BlockchainPaymentModel::new(params, 0.30, 5.0).unwrap();
    let expected = (params.loads_per_year as f64 * 0.30).floor() * 5.0;
    assert_eq!(model.blockchain_tx_costs(), expected);
}

#[test]
fn test_fraud_savings_scale_with_adoption_and_effectiveness() {
    let params = PaymentFlowParams::default();
    let traditional = TraditionalPaymentModel::new(params).unwrap();
    let blockchain = BlockchainPaymentModel::new(params, 0.30, 5.0).unwrap();
    // 30% adoption x 50% effectiveness = 15% of fraud losses
    let expected = traditional.fraud_losses() * 0.30 * 0.50;
    assert!(approx_eq(blockchain.fraud_savings(0.50), expected, 0.01));
}

#[test]
fn test_factoring_eliminated_on_adopted_volume() {
    let params = PaymentFlowParams::default();
    let traditional = TraditionalPaymentModel::new(params).unwrap();
    let blockchain = BlockchainPaymentModel::new(params, 0.30, 5.0).unwrap();
    let expected = traditional.factoring_cost(DEFAULT_PCT_FACTORED) * 0.30;
    assert!(approx_eq(
        blockchain.factoring_savings(DEFAULT_PCT_FACTORED),
        expected,
        0.01
    ));
}

#[test]
fn test_admin_savings_use_efficiency_factor() {
    let params = PaymentFlowParams::default();
    let traditional = TraditionalPaymentModel::new(params).unwrap();
    let blockchain = BlockchainPaymentModel::new(params, 0.40, 5.0).unwrap();
    let expected = traditional.admin_costs() * 0.40 * ADMIN_EFFICIENCY;
    assert!(approx_eq(blockchain.admin_savings(), expected, 1e-9));
}

#[test]
fn test_net_savings_positive_at_30_pct() {
    let model = BlockchainPaymentModel::new(PaymentFlowParams::default(), 0.30, 5.0).unwrap();
    assert!(model.net_savings(DEFAULT_PCT_FACTORED, DEFAULT_FRAUD_REDUCTION) > 0.0);
}

#[test]
fn test_savings_monotonic_in_adoption() {
    let params = PaymentFlowParams::default();
    let model_30 = BlockchainPaymentModel::new(params, 0.30, 5.0).unwrap();
    let model_50 = BlockchainPaymentModel::new(params, 0.50, 5.0).unwrap();
    assert!(
        model_50.net_savings(DEFAULT_PCT_FACTORED, DEFAULT_FRAUD_REDUCTION)
            > model_30.net_savings(DEFAULT_PCT_FACTORED, DEFAULT_FRAUD_REDUCTION)
    );
}

#[test]
fn test_total_cost_identity() {
    // The reconstituted blockchain total and the savings-derived total are
    // independent derivations and must agree to reporting precision.
    let params = PaymentFlowParams::default();
    for adoption in [0.0, 0.10, 0.30, 0.50, 0.75, 1.0] {
        let traditional = TraditionalPaymentModel::new(params).unwrap();
        let blockchain = BlockchainPaymentModel::new(params, adoption, 5.0).unwrap();

        let traditional_total = traditional.total_cost(DEFAULT_PCT_FACTORED, true);
        let net = blockchain.net_savings(DEFAULT_PCT_FACTORED, DEFAULT_FRAUD_REDUCTION);
        let reconstituted = blockchain.total_cost(DEFAULT_PCT_FACTORED, DEFAULT_FRAUD_REDUCTION);

        let diff = (traditional_total - net - reconstituted).abs();
        assert!(
            diff / traditional_total < 1e-9,
            "identity violated at adoption {adoption}: diff {diff}"
        );
    }
}

// ============================================================================
// Comparison, breakeven, adoption sweep
// ============================================================================

#[test]
fn test_compare_models_net_savings_positive() {
    let params = PaymentFlowParams::default();
    let traditional = TraditionalPaymentModel::new(params).unwrap();
    let blockchain = BlockchainPaymentModel::new(params, 0.30, 5.0).unwrap();
    let comparison =
        compare_models(&traditional, &blockchain, DEFAULT_PCT_FACTORED, DEFAULT_FRAUD_REDUCTION);

    assert!(comparison.net_savings > 0.0);
    assert!(comparison.savings_pct > 0.0 && comparison.savings_pct < 50.0);
    assert!(comparison.roi_on_tx_costs.is_finite());
}

#[test]
fn test_compare_models_totals_match_breakdowns() {
    let params = PaymentFlowParams::default();
    let traditional = TraditionalPaymentModel::new(params).unwrap();
    let blockchain = BlockchainPaymentModel::new(params, 0.30, 5.0).unwrap();
    let comparison =
        compare_models(&traditional, &blockchain, DEFAULT_PCT_FACTORED, DEFAULT_FRAUD_REDUCTION);

    assert_eq!(comparison.traditional_total, comparison.traditional.total_cost);
    assert!(approx_eq(
        comparison.net_savings,
        comparison.traditional_total - comparison.blockchain_total,
        1e-9
    ));
}

#[test]
fn test_breakeven_adoption_in_range() {
    let rate = breakeven_adoption(
        PaymentFlowParams::default(),
        5.0,
        DEFAULT_PCT_FACTORED,
        DEFAULT_FRAUD_REDUCTION,
    )
    .unwrap();
    assert!(rate > 0.0 && rate < 1.0);
}

#[test]
fn test_adoption_sweep_monotonic_net_savings() {
    let rates: Vec<f64> = (1..=10).map(|i| i as f64 / 10.0).collect();
    let points = adoption_sweep(PaymentFlowParams::default(), &rates, 5.0).unwrap();
    assert_eq!(points.len(), 10);
    for pair in points.windows(2) {
        assert!(
            pair[1].net_savings > pair[0].net_savings,
            "net savings not increasing between {} and {}",
            pair[0].adoption_rate,
            pair[1].adoption_rate
        );
    }
}
