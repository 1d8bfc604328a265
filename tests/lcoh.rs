use hydrogen_cost_calculator::hydrogen::lcoh::{
    capital_recovery_factor, compute_lcoh, levelized_cost, LcohError, LcohInput,
};

fn reference_input() -> LcohInput {
    LcohInput {
        capex_per_kw: 900.0,
        opex_per_kw_year: 20.0,
        efficiency: 0.66,
        wacc: 0.08,
        lifetime_years: 25,
        energy_price_per_mwh: 50.0,
    }
}

#[test]
fn reference_case_breakdown() {
    let res = compute_lcoh(&reference_input()).expect("lcoh calc");
    assert!(
        (res.capital_recovery_factor - 0.09368).abs() < 1e-5,
        "crf={}",
        res.capital_recovery_factor
    );
    assert!((res.fixed_costs - 104.31).abs() < 0.01, "fixed={}", res.fixed_costs);
    assert!((res.variable_costs - 75.76).abs() < 0.01, "variable={}", res.variable_costs);
    assert!((res.lcoh_per_kg - 180.07).abs() < 0.1, "lcoh={}", res.lcoh_per_kg);
}

#[test]
fn six_argument_form_matches_breakdown() {
    let total = levelized_cost(900.0, 20.0, 0.66, 0.08, 25, 50.0).unwrap();
    let res = compute_lcoh(&reference_input()).unwrap();
    assert_eq!(total, res.lcoh_per_kg);
}

#[test]
fn zero_wacc_crf_is_one_over_lifetime() {
    assert_eq!(capital_recovery_factor(0.0, 25).unwrap(), 0.04);
    let input = LcohInput {
        wacc: 0.0,
        ..reference_input()
    };
    let res = compute_lcoh(&input).unwrap();
    // 900 * 0.04 + 20 + 50/0.66
    assert!((res.lcoh_per_kg - (36.0 + 20.0 + 50.0 / 0.66)).abs() < 1e-9);
}

#[test]
fn crf_is_continuous_near_zero_wacc() {
    for w in [1e-6, 1e-9, 1e-12, -1e-9] {
        let crf = capital_recovery_factor(w, 25).unwrap();
        assert!((crf - 0.04).abs() < 1e-5, "w={w} crf={crf}");
    }
}

#[test]
fn zero_efficiency_is_domain_error() {
    let err = levelized_cost(900.0, 20.0, 0.0, 0.08, 25, 50.0).unwrap_err();
    assert_eq!(err, LcohError::EfficiencyOutOfRange(0.0));
}

#[test]
fn zero_lifetime_is_rejected() {
    let err = levelized_cost(900.0, 20.0, 0.66, 0.08, 0, 50.0).unwrap_err();
    assert_eq!(err, LcohError::InvalidLifetime(0));
}

#[test]
fn negative_and_non_finite_inputs_are_rejected() {
    let neg = LcohInput {
        opex_per_kw_year: -1.0,
        ..reference_input()
    };
    assert!(matches!(
        compute_lcoh(&neg),
        Err(LcohError::Negative { field: "opex", .. })
    ));

    let nan = LcohInput {
        energy_price_per_mwh: f64::NAN,
        ..reference_input()
    };
    assert_eq!(compute_lcoh(&nan), Err(LcohError::NonFinite("energy_price")));

    let inf_wacc = LcohInput {
        wacc: f64::INFINITY,
        ..reference_input()
    };
    assert_eq!(compute_lcoh(&inf_wacc), Err(LcohError::NonFinite("wacc")));
}

#[test]
fn free_electricity_leaves_only_fixed_costs() {
    let input = LcohInput {
        energy_price_per_mwh: 0.0,
        ..reference_input()
    };
    let res = compute_lcoh(&input).unwrap();
    assert_eq!(res.variable_costs, 0.0);
    assert_eq!(res.lcoh_per_kg, res.fixed_costs);
}
