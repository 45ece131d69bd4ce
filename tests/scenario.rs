use thruster_sim::config::{IspConfig, PropellantConfig, parse_scenario_toml};
use thruster_sim::propulsion::PropellantModel;
use thruster_sim::scenario::{
    Scenario, ScenarioError, experiment, load_scenarios, propellant_from_config,
};
use thruster_sim::transient::IspPolicy;

#[test]
fn bundled_scenarios_cover_the_reference_comparison() {
    let scenarios = load_scenarios("data/scenarios").expect("scenario directory");
    let names: Vec<&str> = scenarios.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["oe1", "oe2", "oe3"]);

    let oe2 = &scenarios[1];
    assert_eq!(oe2.engine.config().initial_fill_pressure(), 2e5);
    assert_eq!(oe2.engine.propellant().name(), "water");
    assert_eq!(oe2.dt_s, 0.1);
    assert_eq!(oe2.duration_s, 1200.0);

    let oe3 = &scenarios[2];
    assert_eq!(oe3.engine.config().fill_volume_fraction(), 0.2);
    assert_eq!(oe3.engine.config().isp_quality_factor(), 0.6);
}

#[test]
fn yaml_catalog_supports_fixed_isp_and_explicit_propellants() {
    let scenarios = load_scenarios("data/catalog.yaml").expect("yaml catalog");
    assert_eq!(scenarios.len(), 2);

    let fixed = &scenarios[0];
    assert_eq!(fixed.engine.isp_policy(), IspPolicy::Fixed { isp_s: 70.0 });
    assert_eq!(fixed.engine.config().heating_efficiency(), 0.7);
    assert_eq!(fixed.dt_s, 0.5);

    let explicit = &scenarios[1];
    assert_eq!(explicit.engine.propellant().name(), "water (explicit)");
    assert_eq!(
        explicit.engine.initial_conditions().chamber_temperature_k,
        390.0
    );
    // Unspecified simulation section falls back to the defaults.
    assert_eq!(explicit.dt_s, 0.1);
    assert_eq!(explicit.duration_s, 1200.0);
}

#[test]
fn preset_fields_can_be_overridden() {
    let config = PropellantConfig {
        preset: Some("Water".to_string()),
        density_liquid_kg_m3: Some(1000.0),
        ..PropellantConfig::default()
    };
    let model = propellant_from_config(&config).unwrap();
    assert_eq!(model.density_liquid(), 1000.0);
    assert_eq!(model.latent_heat_vaporization(), 2256e3);
}

#[test]
fn unknown_preset_and_missing_properties_are_reported() {
    let config = PropellantConfig {
        preset: Some("hydrazine".to_string()),
        ..PropellantConfig::default()
    };
    assert!(matches!(
        propellant_from_config(&config),
        Err(ScenarioError::UnknownPreset(name)) if name == "hydrazine"
    ));

    let config = PropellantConfig {
        latent_heat_j_kg: Some(2256e3),
        ..PropellantConfig::default()
    };
    assert!(matches!(
        propellant_from_config(&config),
        Err(ScenarioError::MissingProperty("specific_heat_liquid_j_kg_k"))
    ));
}

#[test]
fn omitted_propellant_section_defaults_to_water() {
    let record = parse_scenario_toml(
        r#"
name = "bare"

[thruster]
throat_area_m2 = 4.5e-9
tube_length_m = 0.3
tube_diameter_m = 1.57e-3
discharge_coefficient = 0.66
initial_fill_pressure_pa = 1.1e5
fill_volume_fraction = 0.12
"#,
    )
    .unwrap();
    let scenario = Scenario::try_from(&record).expect("water by default");
    assert_eq!(scenario.engine.propellant(), &PropellantModel::water());

    // A name alone does not describe a fluid.
    let named = PropellantConfig {
        name: Some("mystery".to_string()),
        ..PropellantConfig::default()
    };
    assert!(matches!(
        propellant_from_config(&named),
        Err(ScenarioError::MissingProperty("latent_heat_j_kg"))
    ));
}

#[test]
fn out_of_range_scenario_values_fail_validation() {
    let record = parse_scenario_toml(
        r#"
name = "overfilled"

[thruster]
throat_area_m2 = 4.5e-9
tube_length_m = 0.3
tube_diameter_m = 1.57e-3
discharge_coefficient = 0.66
initial_fill_pressure_pa = 1.1e5
fill_volume_fraction = 1.5
"#,
    )
    .unwrap();
    // Omitted sections take their defaults.
    assert_eq!(
        record.isp,
        IspConfig::TemperatureDerived {
            reference_temperature_k: None,
            reference_isp_s: None
        }
    );
    assert!(matches!(
        Scenario::try_from(&record),
        Err(ScenarioError::Parameter(_))
    ));
}

#[test]
fn scenarios_feed_an_experiment() {
    let scenarios = load_scenarios("data/scenarios").unwrap();
    let results = experiment(&scenarios).run(1.0, 30.0).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].label, "oe1");
    assert!(results.iter().all(|r| r.state.len() == 30));
}
