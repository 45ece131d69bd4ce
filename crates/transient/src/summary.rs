//! Min/max reporting over a finished run.

use serde::Serialize;
use thruster_core::series::{integrate_uniform, min_max};

use crate::SimulationState;

/// Closed range spanned by one series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesRange {
    pub min: f64,
    pub max: f64,
}

impl SeriesRange {
    /// Range of `values`; NaN bounds for an empty slice.
    pub fn of(values: &[f64]) -> Self {
        let (min, max) = min_max(values).unwrap_or((f64::NAN, f64::NAN));
        Self { min, max }
    }
}

/// Headline figures of a run, as printed by the CLI and written to JSON sidecars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub samples: usize,
    pub duration_s: f64,
    pub pressure_pa: SeriesRange,
    pub mass_flow_kg_s: SeriesRange,
    pub thrust_n: SeriesRange,
    pub chamber_temperature_k: SeriesRange,
    pub propellant_mass_kg: SeriesRange,
    pub required_power_w: SeriesRange,
    pub specific_impulse_s: f64,
    pub effective_specific_impulse_s: f64,
    pub propellant_expelled_kg: f64,
    pub total_impulse_n_s: f64,
}

impl SimulationSummary {
    pub fn from_state(state: &SimulationState) -> Self {
        let mass = state.propellant_mass_kg();
        let expelled = match (mass.first(), mass.last()) {
            (Some(first), Some(last)) => first - last,
            _ => 0.0,
        };
        Self {
            samples: state.len(),
            duration_s: state.time_s().last().copied().unwrap_or_default(),
            pressure_pa: SeriesRange::of(state.pressure_pa()),
            mass_flow_kg_s: SeriesRange::of(state.mass_flow_kg_s()),
            thrust_n: SeriesRange::of(state.thrust_n()),
            chamber_temperature_k: SeriesRange::of(state.chamber_temperature_k()),
            propellant_mass_kg: SeriesRange::of(mass),
            required_power_w: SeriesRange::of(state.required_power_w()),
            specific_impulse_s: state.specific_impulse_s(),
            effective_specific_impulse_s: state.effective_specific_impulse_s(),
            propellant_expelled_kg: expelled,
            total_impulse_n_s: integrate_uniform(state.thrust_n(), state.dt_s()),
        }
    }
}
