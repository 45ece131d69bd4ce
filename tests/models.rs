use std::collections::HashSet;

use thruster_sim::propulsion::{
    ParameterError, PropellantModel, PropellantProperties, ThrusterConfig, ThrusterParameters,
};

fn field_of(err: ParameterError) -> &'static str {
    match err {
        ParameterError::InvalidParameter { field, .. } => field,
    }
}

#[test]
fn water_preset_round_trips_through_validation() {
    let water = PropellantModel::water();
    let rebuilt = PropellantModel::new("water", *water.properties()).expect("valid water");
    assert_eq!(rebuilt, water);
    assert_eq!(water.flow_coefficient(), rebuilt.flow_coefficient());
    assert_eq!(water.density_liquid(), 997.0);
}

#[test]
fn propellant_rejects_out_of_domain_constants() {
    let mut props = *PropellantModel::water().properties();
    props.specific_heat_ratio = 1.0;
    let err = PropellantModel::new("bad", props).unwrap_err();
    assert_eq!(field_of(err), "specific_heat_ratio");

    let mut props = *PropellantModel::water().properties();
    props.density_liquid = -1.0;
    let err = PropellantModel::new("bad", props).unwrap_err();
    assert_eq!(field_of(err), "density_liquid");

    let mut props = *PropellantModel::water().properties();
    props.latent_heat_vaporization = f64::NAN;
    assert!(PropellantModel::new("bad", props).is_err());
}

#[test]
fn flow_coefficient_depends_only_on_gamma() {
    let base = *PropellantModel::water().properties();
    let other = PropellantProperties {
        gas_constant: 287.0,
        density_liquid: 800.0,
        ..base
    };
    let a = PropellantModel::new("a", base).unwrap();
    let b = PropellantModel::new("b", other).unwrap();
    assert_eq!(a.flow_coefficient().to_bits(), b.flow_coefficient().to_bits());
}

#[test]
fn fill_fraction_above_one_is_rejected() {
    let params = ThrusterParameters {
        fill_volume_fraction: 1.5,
        ..ThrusterParameters::default()
    };
    let err = ThrusterConfig::new(params).unwrap_err();
    assert_eq!(field_of(err), "fill_volume_fraction");
}

#[test]
fn thruster_rejects_non_positive_geometry() {
    for params in [
        ThrusterParameters {
            throat_area_m2: 0.0,
            ..ThrusterParameters::default()
        },
        ThrusterParameters {
            tube_diameter_m: -1e-3,
            ..ThrusterParameters::default()
        },
        ThrusterParameters {
            discharge_coefficient: 0.0,
            ..ThrusterParameters::default()
        },
        ThrusterParameters {
            initial_chamber_temperature_k: Some(-5.0),
            ..ThrusterParameters::default()
        },
    ] {
        assert!(ThrusterConfig::new(params).is_err(), "{params:?}");
    }
}

#[test]
fn derived_volumes_follow_geometry() {
    let config = ThrusterConfig::new(ThrusterParameters::default()).unwrap();
    let expected = 0.3 * std::f64::consts::PI * 1.57e-3_f64.powi(2) / 4.0;
    assert!((config.tube_volume() - expected).abs() < 1e-18);
    assert!((config.initial_ullage_volume() - 0.12 * expected).abs() < 1e-18);
}

#[test]
fn identity_key_distinguishes_varied_parameters() {
    let variant = |params: ThrusterParameters| ThrusterConfig::new(params).unwrap();
    let base = ThrusterParameters::default();
    let configs = [
        variant(base),
        variant(base),
        variant(ThrusterParameters {
            initial_fill_pressure_pa: 2e5,
            ..base
        }),
        variant(ThrusterParameters {
            throat_area_m2: 9e-9,
            ..base
        }),
        variant(ThrusterParameters {
            heating_efficiency: 0.5,
            ..base
        }),
        variant(ThrusterParameters {
            ambient_temperature_k: 300.0,
            ..base
        }),
        variant(ThrusterParameters {
            initial_chamber_temperature_k: Some(390.0),
            ..base
        }),
    ];

    let keys: HashSet<_> = configs.iter().map(|c| c.identity_key()).collect();
    assert_eq!(keys.len(), 6);
    let labels: HashSet<String> = configs.iter().map(|c| c.identity_key().to_string()).collect();
    assert_eq!(labels.len(), 6);
    assert!(configs[2].identity_key().to_string().contains("p0=200000Pa"));
    assert!(configs[3].identity_key().to_string().contains("At=0.000000009m2"));
    assert!(configs[6].identity_key().to_string().ends_with("Tc0=390K"));
}

#[test]
fn identity_key_tracks_propellant_properties() {
    let config = ThrusterConfig::new(ThrusterParameters::default()).unwrap();
    let water = PropellantModel::water();
    let denser = PropellantModel::new(
        "water",
        PropellantProperties {
            density_liquid: 1000.0,
            ..*water.properties()
        },
    )
    .unwrap();

    let bare = config.identity_key();
    let with_water = config.identity_key().with_propellant(&water);
    let with_denser = config.identity_key().with_propellant(&denser);
    assert_ne!(bare, with_water);
    assert_ne!(with_water, with_denser);
    assert_eq!(with_water, config.identity_key().with_propellant(&PropellantModel::water()));

    assert!(with_water.to_string().starts_with("water#"));
    assert_ne!(with_water.to_string(), with_denser.to_string());
}
