use hydrogen_cost_calculator::form::{self, check_field, CalculatorForm, Field, FormError};
use hydrogen_cost_calculator::hydrogen::{evaluate, CostScenario, LcohInput, TransportMode};
use hydrogen_cost_calculator::i18n::Translator;
use hydrogen_cost_calculator::units::{EnergyPriceUnit, LengthUnit};

fn chile_form() -> CalculatorForm {
    CalculatorForm {
        country: "Chile".into(),
        ..CalculatorForm::default()
    }
}

#[test]
fn full_calculation_renders_three_lines() {
    let report = chile_form().submit().expect("submit");
    let tr = Translator::new("en");
    let lines = form::render_report(&report, &tr, "$");
    assert_eq!(
        lines,
        vec![
            "### Results for Chile".to_string(),
            "LCOH: $180.07/kg".to_string(),
            "Transport Cost: $1.28/kg".to_string(),
            "Total Cost: $181.35/kg".to_string(),
        ]
    );
}

#[test]
fn empty_country_uses_plain_header() {
    let report = CalculatorForm::default().submit().unwrap();
    let tr = Translator::new("en");
    assert_eq!(form::report_header(&report, &tr), "### Results");
}

#[test]
fn country_is_echoed_but_does_not_change_numbers() {
    let a = chile_form().submit().unwrap();
    let b = CalculatorForm {
        country: "  Australia ".into(),
        ..CalculatorForm::default()
    }
    .submit()
    .unwrap();
    assert_eq!(b.country, "Australia");
    assert_eq!(a.total_cost_per_kg, b.total_cost_per_kg);
}

#[test]
fn breakdown_lists_crf_and_share() {
    let report = chile_form().submit().unwrap();
    let tr = Translator::new("en");
    let lines = form::render_breakdown(&report, &tr, "$");
    assert_eq!(lines[0], "Capital recovery factor: 0.09368");
    assert_eq!(lines[1], "Fixed costs: $104.31/kg");
    assert_eq!(lines[2], "Variable costs: $75.76/kg");
    assert!(lines[3].starts_with("Production share: 99.3"), "{}", lines[3]);
}

#[test]
fn total_is_sum_of_parts() {
    let scenario = CostScenario {
        country: String::new(),
        production: LcohInput {
            capex_per_kw: 900.0,
            opex_per_kw_year: 20.0,
            efficiency: 0.66,
            wacc: 0.08,
            lifetime_years: 25,
            energy_price_per_mwh: 50.0,
        },
        transport_distance_km: 2000.0,
        transport_mode: TransportMode::ShippingLh2,
    };
    let report = evaluate(&scenario).unwrap();
    assert!((report.transport_cost_per_kg - 3.0).abs() < 1e-12);
    assert_eq!(
        report.total_cost_per_kg,
        report.lcoh_per_kg() + report.transport_cost_per_kg
    );
}

#[test]
fn form_ranges_follow_widgets() {
    assert!(matches!(
        check_field(Field::Efficiency, 1.5),
        Err(FormError::AboveMaximum { field: "efficiency", .. })
    ));
    assert!(matches!(
        check_field(Field::Wacc, -0.1),
        Err(FormError::BelowMinimum { field: "wacc", .. })
    ));
    assert!(matches!(
        check_field(Field::Capex, f64::NAN),
        Err(FormError::NotANumber { field: "capex" })
    ));
    assert_eq!(check_field(Field::Distance, 0.0), Ok(0.0));
}

#[test]
fn zero_efficiency_passes_the_form_but_fails_the_core() {
    let form = CalculatorForm {
        efficiency: 0.0,
        ..CalculatorForm::default()
    };
    assert!(matches!(form.submit(), Err(FormError::Calculation(_))));
}

#[test]
fn display_units_do_not_change_the_result() {
    let metric = CalculatorForm::default().submit().unwrap();

    let mut form = CalculatorForm::default();
    form.set_distance_unit(LengthUnit::Mile);
    form.set_energy_price_unit(EnergyPriceUnit::PerKilowattHour);
    assert!((form.energy_price - 0.05).abs() < 1e-12);
    let converted = form.submit().unwrap();

    assert!((converted.total_cost_per_kg - metric.total_cost_per_kg).abs() < 1e-9);
}
