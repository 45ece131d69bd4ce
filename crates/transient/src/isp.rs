use thruster_core::series::mean;
use thruster_propulsion::ParameterError;

/// How the run's specific impulse is obtained before the quality factor is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IspPolicy {
    /// Externally supplied specific impulse (s).
    Fixed { isp_s: f64 },
    /// Empirical scaling with the run's mean chamber temperature:
    /// `Isp = √(mean(T_c) / reference_temperature_k) · reference_isp_s`.
    ///
    /// The default 500 K / 95 s anchor is an uncalibrated fit for water; override it when better
    /// data exists for the propellant at hand.
    TemperatureDerived {
        reference_temperature_k: f64,
        reference_isp_s: f64,
    },
}

impl IspPolicy {
    pub const DEFAULT_REFERENCE_TEMPERATURE_K: f64 = 500.0;
    pub const DEFAULT_REFERENCE_ISP_S: f64 = 95.0;

    /// Temperature-derived policy with the default anchor point.
    pub fn temperature_derived() -> Self {
        Self::TemperatureDerived {
            reference_temperature_k: Self::DEFAULT_REFERENCE_TEMPERATURE_K,
            reference_isp_s: Self::DEFAULT_REFERENCE_ISP_S,
        }
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        let checks: &[(&'static str, f64)] = match self {
            Self::Fixed { isp_s } => &[("isp_s", *isp_s)],
            Self::TemperatureDerived {
                reference_temperature_k,
                reference_isp_s,
            } => &[
                ("reference_temperature_k", *reference_temperature_k),
                ("reference_isp_s", *reference_isp_s),
            ],
        };
        for &(field, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(ParameterError::InvalidParameter {
                    field,
                    value,
                    reason: "must be finite and positive",
                });
            }
        }
        Ok(())
    }

    /// Specific impulse (s) for a run with the given chamber temperature history.
    pub fn specific_impulse(&self, chamber_temperatures_k: &[f64]) -> f64 {
        match *self {
            Self::Fixed { isp_s } => isp_s,
            Self::TemperatureDerived {
                reference_temperature_k,
                reference_isp_s,
            } => {
                let mean_t = mean(chamber_temperatures_k).unwrap_or(f64::NAN);
                (mean_t / reference_temperature_k).sqrt() * reference_isp_s
            }
        }
    }
}

impl Default for IspPolicy {
    fn default() -> Self {
        Self::temperature_derived()
    }
}
