use std::sync::atomic::AtomicBool;

use thruster_sim::propulsion::{PropellantModel, ThrusterConfig, ThrusterParameters};
use thruster_sim::transient::comparison::{ComparisonError, Experiment};
use thruster_sim::transient::summary::SimulationSummary;
use thruster_sim::transient::{IspPolicy, SimulationEngine, SimulationError};

fn engine(fill_pressure_pa: f64, fill_fraction: f64) -> SimulationEngine {
    let config = ThrusterConfig::new(ThrusterParameters {
        initial_fill_pressure_pa: fill_pressure_pa,
        fill_volume_fraction: fill_fraction,
        ..ThrusterParameters::default()
    })
    .unwrap();
    SimulationEngine::new(PropellantModel::water(), config, IspPolicy::default()).unwrap()
}

#[test]
fn summary_reports_series_extrema() {
    let state = engine(1.1e5, 0.12).run(0.1, 300.0).unwrap();
    let summary = SimulationSummary::from_state(&state);

    assert_eq!(summary.samples, state.len());
    assert_eq!(summary.pressure_pa.max, 1.1e5);
    assert_eq!(summary.pressure_pa.min, *state.pressure_pa().last().unwrap());
    assert_eq!(summary.mass_flow_kg_s.max, state.mass_flow_kg_s()[0]);
    assert!(summary.thrust_n.min >= 0.0 && summary.thrust_n.min <= summary.thrust_n.max);
    assert!(summary.chamber_temperature_k.min <= summary.chamber_temperature_k.max);
    assert_eq!(summary.specific_impulse_s, state.specific_impulse_s());

    let mass = state.propellant_mass_kg();
    assert!((summary.propellant_expelled_kg - (mass[0] - mass[mass.len() - 1])).abs() < 1e-15);
    let impulse: f64 = state.thrust_n().iter().sum::<f64>() * 0.1;
    assert!((summary.total_impulse_n_s - impulse).abs() <= 1e-12 * impulse);
}

#[test]
fn experiment_preserves_case_order_and_matches_single_runs() {
    let ex = Experiment::new()
        .with_case("low", engine(1.1e5, 0.12))
        .with_case("high", engine(2.0e5, 0.12))
        .with_case("roomy", engine(1.1e5, 0.2));
    let results = ex.run(0.5, 120.0).unwrap();

    let labels: Vec<&str> = results.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, ["low", "high", "roomy"]);

    let direct = engine(2.0e5, 0.12).run(0.5, 120.0).unwrap();
    assert_eq!(results[1].state, direct);
    assert!(results.iter().all(|r| r.state.time_s() == results[0].state.time_s()));

    // Higher fill pressure pushes more propellant out.
    let peak = |i: usize| SimulationSummary::from_state(&results[i].state).mass_flow_kg_s.max;
    assert!(peak(1) > peak(0));
}

#[test]
fn unlabelled_cases_fall_back_to_identity_key() {
    let e = engine(1.1e5, 0.12);
    let key = e.identity_key();
    let mut ex = Experiment::new();
    ex.push("", e);
    assert_eq!(ex.cases()[0].label, key.to_string());
}

#[test]
fn unlabelled_cases_with_different_throats_stay_apart() {
    let narrow = engine(1.1e5, 0.12);
    let config = ThrusterConfig::new(ThrusterParameters {
        throat_area_m2: 9e-9,
        ..ThrusterParameters::default()
    })
    .unwrap();
    let wide = SimulationEngine::new(PropellantModel::water(), config, IspPolicy::default()).unwrap();

    let mut ex = Experiment::new();
    ex.push("", narrow);
    ex.push("", wide);
    assert_ne!(ex.cases()[0].label, ex.cases()[1].label);

    let results = ex.run(1.0, 10.0).unwrap();
    assert_ne!(results[0].key, results[1].key);
    assert_eq!(results[1].key, ex.cases()[1].engine.identity_key());
}

#[test]
fn empty_experiment_is_an_error() {
    let err = Experiment::new().run(0.1, 1.0).unwrap_err();
    assert!(matches!(err, ComparisonError::EmptyExperiment));
}

#[test]
fn cancelled_experiment_runs_nothing() {
    let ex = Experiment::new()
        .with_case("a", engine(1.1e5, 0.12))
        .with_case("b", engine(2.0e5, 0.12));
    let cancel = AtomicBool::new(true);
    let err = ex.run_with_cancel(0.1, 10.0, &cancel).unwrap_err();
    assert!(matches!(err, ComparisonError::Cancelled));
}

#[test]
fn failing_case_is_reported_with_its_label() {
    let ex = Experiment::new().with_case("broken-grid", engine(1.1e5, 0.12));
    let err = ex.run(-1.0, 10.0).unwrap_err();
    match err {
        ComparisonError::Case { label, source } => {
            assert_eq!(label, "broken-grid");
            assert!(matches!(source, SimulationError::InvalidParameter(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}
