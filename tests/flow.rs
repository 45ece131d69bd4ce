use thruster_sim::propulsion::flow::{
    blowdown_pressure, choked_mass_flow, flow_coefficient, vapor_temperature,
};

#[test]
fn choked_mass_flow_matches_hand_calculation() {
    let tol = 1e-2;
    let mdot_clc = 9.48686;
    let mdot_fcn = choked_mass_flow(1e5, 0.1, 0.6, 400.0, 1000.0);
    assert!((mdot_fcn - mdot_clc).abs() < tol);
}

#[test]
fn choked_mass_flow_is_linear_in_pressure() {
    let mdot_clc = 9.48686;
    for k in 1..=5 {
        let k = k as f64;
        let mdot = choked_mass_flow(k * 1e5, 0.1, 0.6, 400.0, 1000.0);
        assert!(
            (mdot - k * mdot_clc).abs() < 1e-2 * k,
            "k = {k}: got {mdot}"
        );
    }
}

#[test]
fn flow_coefficient_reference_values() {
    // Air-like gas: Γ(1.4) ≈ 0.6847
    assert!((flow_coefficient(1.4) - 0.684731).abs() < 1e-5);
    // Steam used by the water preset.
    let gamma_water = flow_coefficient(1.33);
    assert!(gamma_water > 0.66 && gamma_water < 0.68);
    // Pure function of γ.
    assert_eq!(flow_coefficient(1.33).to_bits(), gamma_water.to_bits());
}

#[test]
fn blowdown_pressure_scales_with_ullage_growth() {
    let p = blowdown_pressure(1.0e-7, 2.0e5, 0.0);
    assert_eq!(p, 2.0e5);
    // Doubling the gas volume halves the pressure.
    let p = blowdown_pressure(1.0e-7, 2.0e5, 1.0e-7);
    assert!((p - 1.0e5).abs() < 1e-9);
}

#[test]
fn vapor_temperature_passes_through_reference_point() {
    let t = vapor_temperature(1e5, 2256e3, 461.67, 1e5, 373.0);
    assert!((t - 373.0).abs() < 1e-12);

    // Above the reference pressure the saturation temperature rises.
    let t_hot = vapor_temperature(1.1e5, 2256e3, 461.67, 1e5, 373.0);
    assert!((t_hot - 375.733).abs() < 1e-2, "got {t_hot}");

    // Far above it the closed form loses its positive root.
    let t_bad = vapor_temperature(1e12, 2256e3, 461.67, 1e5, 373.0);
    assert!(t_bad <= 0.0);
}
