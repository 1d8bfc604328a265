use hydrogen_cost_calculator::hydrogen::lcoh::{capital_recovery_factor, levelized_cost};
use hydrogen_cost_calculator::hydrogen::transport::{transport_cost, TransportMode};
use proptest::prelude::*;

fn mode() -> impl Strategy<Value = TransportMode> {
    prop::sample::select(TransportMode::ALL.to_vec())
}

proptest! {
    #[test]
    fn valid_inputs_give_finite_non_negative_lcoh(
        capex in 0.0..5000.0f64,
        opex in 0.0..200.0f64,
        efficiency in 0.05..=1.0f64,
        wacc in 0.0..=1.0f64,
        lifetime in 1u32..=60,
        price in 0.0..500.0f64,
    ) {
        let v = levelized_cost(capex, opex, efficiency, wacc, lifetime, price).unwrap();
        prop_assert!(v.is_finite());
        prop_assert!(v >= 0.0);
    }

    #[test]
    fn lcoh_increases_with_costs(
        capex in 0.0..5000.0f64,
        opex in 0.0..200.0f64,
        efficiency in 0.05..=1.0f64,
        wacc in 0.0..=1.0f64,
        lifetime in 1u32..=60,
        price in 0.0..500.0f64,
        delta in 1.0..100.0f64,
    ) {
        let base = levelized_cost(capex, opex, efficiency, wacc, lifetime, price).unwrap();
        prop_assert!(levelized_cost(capex + delta, opex, efficiency, wacc, lifetime, price).unwrap() > base);
        prop_assert!(levelized_cost(capex, opex + delta, efficiency, wacc, lifetime, price).unwrap() > base);
        prop_assert!(levelized_cost(capex, opex, efficiency, wacc, lifetime, price + delta).unwrap() > base);
    }

    #[test]
    fn lcoh_decreases_with_efficiency(
        efficiency in 0.05..0.9f64,
        step in 0.01..0.1f64,
        price in 1.0..500.0f64,
    ) {
        let lo = levelized_cost(900.0, 20.0, efficiency, 0.08, 25, price).unwrap();
        let hi = levelized_cost(900.0, 20.0, efficiency + step, 0.08, 25, price).unwrap();
        prop_assert!(hi < lo);
    }

    #[test]
    fn crf_stays_between_wacc_and_one(wacc in 1e-6..=1.0f64, lifetime in 1u32..=100) {
        let crf = capital_recovery_factor(wacc, lifetime).unwrap();
        prop_assert!(crf >= wacc * (1.0 - 1e-12));
        prop_assert!(crf <= 1.0 + wacc + 1e-12);
    }

    #[test]
    fn transport_is_linear_in_distance(d in 0.0..20_000.0f64, m in mode()) {
        let single = transport_cost(d, m).unwrap();
        let double = transport_cost(2.0 * d, m).unwrap();
        prop_assert!((double - 2.0 * single).abs() <= 1e-12 * double.max(1.0));
    }
}
