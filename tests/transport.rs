use hydrogen_cost_calculator::hydrogen::transport::{
    transport_cost, transport_cost_by_code, TransportError, TransportMode,
};
use serde::Deserialize;

#[test]
fn unit_cost_table() {
    assert_eq!(TransportMode::PipelineNew.unit_cost_per_1000km(), 0.64);
    assert_eq!(TransportMode::PipelineRetrofit.unit_cost_per_1000km(), 0.13);
    assert_eq!(TransportMode::ShippingLh2.unit_cost_per_1000km(), 1.5);
}

#[test]
fn two_thousand_km_per_mode() {
    let cases = [
        ("pipeline_new", 1.28),
        ("pipeline_retrofit", 0.26),
        ("shipping_LH2", 3.00),
    ];
    for (code, expected) in cases {
        let cost = transport_cost_by_code(2000.0, code).unwrap();
        assert!((cost - expected).abs() < 1e-12, "{code}: {cost}");
    }
}

#[test]
fn unknown_mode_is_an_error_not_free_transport() {
    let err = transport_cost_by_code(2000.0, "rail").unwrap_err();
    assert_eq!(err, TransportError::UnknownMode("rail".into()));
}

#[test]
fn negative_distance_is_rejected() {
    assert_eq!(
        transport_cost(-5.0, TransportMode::PipelineNew),
        Err(TransportError::NegativeDistance(-5.0))
    );
    assert_eq!(
        transport_cost(f64::NAN, TransportMode::PipelineNew),
        Err(TransportError::NonFiniteDistance)
    );
}

#[derive(Debug, Deserialize)]
struct ModeHolder {
    mode: TransportMode,
}

#[test]
fn serde_uses_canonical_codes() {
    let held: ModeHolder = toml::from_str("mode = \"shipping_LH2\"").unwrap();
    assert_eq!(held.mode, TransportMode::ShippingLh2);
    assert!(toml::from_str::<ModeHolder>("mode = \"rail\"").is_err());
}
