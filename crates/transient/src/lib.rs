//! Transient blowdown simulation of a vaporizing-propellant micro-thruster.
//!
//! [`SimulationEngine`] solves the operating point at t = 0 and marches the coupled
//! pressure / mass-flow / chamber-temperature recurrence forward on a fixed grid. Results come
//! back as an immutable [`SimulationState`]; [`summary`] and [`comparison`] build on top of it.

pub mod comparison;
mod engine;
mod isp;
mod state;
pub mod summary;

pub use engine::{InitialConditions, SimulationEngine};
pub use isp::IspPolicy;
pub use state::SimulationState;

use thiserror::Error;
use thruster_propulsion::ParameterError;

/// Errors surfaced by the initial solve or the time-stepping pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error(transparent)]
    InvalidParameter(#[from] ParameterError),
    #[error("non-physical {quantity} = {value} at step {index} (t = {time_s} s)")]
    NonPhysicalState {
        index: usize,
        time_s: f64,
        quantity: &'static str,
        value: f64,
    },
}
