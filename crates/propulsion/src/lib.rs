//! Propellant descriptors, thruster geometry, and the nozzle flow relations shared by the
//! transient solver.
//!
//! Both [`PropellantModel`] and [`ThrusterConfig`] are validated once at construction and are
//! immutable afterwards; everything downstream may assume their documented domains hold.

pub mod flow;
mod propellant;
mod thruster;

pub use propellant::{PropellantModel, PropellantProperties};
pub use thruster::{ConfigKey, ThrusterConfig, ThrusterParameters};

use thiserror::Error;

/// Raised when a model or config field violates its physical domain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("invalid parameter `{field}` = {value}: {reason}")]
    InvalidParameter {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64, ParameterError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ParameterError::InvalidParameter {
            field,
            value,
            reason: "must be finite and positive",
        })
    }
}

pub(crate) fn require_fraction(field: &'static str, value: f64) -> Result<f64, ParameterError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(ParameterError::InvalidParameter {
            field,
            value,
            reason: "must lie in (0, 1]",
        })
    }
}
