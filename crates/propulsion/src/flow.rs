//! Closed-form relations for choked nozzle flow, isothermal blowdown, and the
//! Clausius-Clapeyron vapor-pressure curve.
//!
//! These are plain functions of their arguments; callers are responsible for checking the
//! results for finiteness where the inputs are not already known to be in range.

/// Vandenkerckhove flow coefficient Γ(γ) for a calorically perfect gas.
///
/// `Γ = √γ · (2 / (γ + 1))^((γ + 1) / (2 (γ − 1)))`
pub fn flow_coefficient(gamma: f64) -> f64 {
    gamma.sqrt() * (2.0 / (gamma + 1.0)).powf((gamma + 1.0) / (2.0 * (gamma - 1.0)))
}

/// Ideal choked mass flow through a throat (kg/s), before any discharge coefficient.
///
/// Inputs:
/// - `pressure_pa`: upstream stagnation pressure
/// - `throat_area_m2`: geometric throat area
/// - `gamma_coefficient`: Γ from [`flow_coefficient`]
/// - `gas_constant`: specific gas constant (J/kg/K)
/// - `chamber_temperature_k`: upstream stagnation temperature
pub fn choked_mass_flow(
    pressure_pa: f64,
    throat_area_m2: f64,
    gamma_coefficient: f64,
    gas_constant: f64,
    chamber_temperature_k: f64,
) -> f64 {
    (pressure_pa * throat_area_m2 * gamma_coefficient)
        / (gas_constant * chamber_temperature_k).sqrt()
}

/// Ullage pressure after `vented_volume_m3` of liquid has left an isothermal tube.
///
/// Evaluated as `p0 · (V0 / (V0 + ΔV))` so that nothing vented returns `p0` exactly and the
/// result never increases with `ΔV`.
pub fn blowdown_pressure(
    initial_ullage_m3: f64,
    initial_pressure_pa: f64,
    vented_volume_m3: f64,
) -> f64 {
    initial_pressure_pa * (initial_ullage_m3 / (initial_ullage_m3 + vented_volume_m3))
}

/// Saturation temperature at `pressure_pa` from the integrated Clausius-Clapeyron relation
/// anchored at (`reference_pressure_pa`, `reference_temperature_k`).
///
/// Returns a non-positive or non-finite value when the pressure lies so far above the
/// reference point that the denominator vanishes; callers must reject those.
pub fn vapor_temperature(
    pressure_pa: f64,
    latent_heat: f64,
    gas_constant: f64,
    reference_pressure_pa: f64,
    reference_temperature_k: f64,
) -> f64 {
    (latent_heat * reference_temperature_k)
        / (reference_temperature_k * gas_constant * (reference_pressure_pa / pressure_pa).ln()
            + latent_heat)
}
