use std::f64::consts::PI;
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};

use crate::{ParameterError, PropellantModel, require_fraction, require_positive};

/// Raw geometry and operating point of a tube-fed micro-thruster, prior to validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrusterParameters {
    pub throat_area_m2: f64,
    pub tube_length_m: f64,
    pub tube_diameter_m: f64,
    pub discharge_coefficient: f64,
    pub isp_quality_factor: f64,
    pub heating_efficiency: f64,
    pub ambient_temperature_k: f64,
    pub initial_fill_pressure_pa: f64,
    pub fill_volume_fraction: f64,
    /// Overrides the vapor-curve solve for the initial chamber temperature.
    pub initial_chamber_temperature_k: Option<f64>,
}

impl Default for ThrusterParameters {
    /// Water-filled 0.3 m tube feeding a 4.5e-9 m² throat at 1.1 bar.
    fn default() -> Self {
        Self {
            throat_area_m2: 4.5e-9,
            tube_length_m: 0.3,
            tube_diameter_m: 1.57e-3,
            discharge_coefficient: 0.66,
            isp_quality_factor: 1.0,
            heating_efficiency: 1.0,
            ambient_temperature_k: 283.0,
            initial_fill_pressure_pa: 1.1e5,
            fill_volume_fraction: 0.12,
            initial_chamber_temperature_k: None,
        }
    }
}

/// Validated, immutable thruster configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ThrusterConfig {
    params: ThrusterParameters,
}

impl ThrusterConfig {
    pub fn new(params: ThrusterParameters) -> Result<Self, ParameterError> {
        require_positive("throat_area_m2", params.throat_area_m2)?;
        require_positive("tube_length_m", params.tube_length_m)?;
        require_positive("tube_diameter_m", params.tube_diameter_m)?;
        require_fraction("discharge_coefficient", params.discharge_coefficient)?;
        require_fraction("isp_quality_factor", params.isp_quality_factor)?;
        require_fraction("heating_efficiency", params.heating_efficiency)?;
        require_positive("ambient_temperature_k", params.ambient_temperature_k)?;
        require_positive("initial_fill_pressure_pa", params.initial_fill_pressure_pa)?;
        require_fraction("fill_volume_fraction", params.fill_volume_fraction)?;
        if let Some(t) = params.initial_chamber_temperature_k {
            require_positive("initial_chamber_temperature_k", t)?;
        }
        Ok(Self { params })
    }

    pub fn parameters(&self) -> &ThrusterParameters {
        &self.params
    }

    pub fn throat_area(&self) -> f64 {
        self.params.throat_area_m2
    }

    pub fn tube_length(&self) -> f64 {
        self.params.tube_length_m
    }

    pub fn tube_diameter(&self) -> f64 {
        self.params.tube_diameter_m
    }

    pub fn discharge_coefficient(&self) -> f64 {
        self.params.discharge_coefficient
    }

    pub fn isp_quality_factor(&self) -> f64 {
        self.params.isp_quality_factor
    }

    pub fn heating_efficiency(&self) -> f64 {
        self.params.heating_efficiency
    }

    pub fn ambient_temperature(&self) -> f64 {
        self.params.ambient_temperature_k
    }

    pub fn initial_fill_pressure(&self) -> f64 {
        self.params.initial_fill_pressure_pa
    }

    pub fn fill_volume_fraction(&self) -> f64 {
        self.params.fill_volume_fraction
    }

    pub fn initial_chamber_temperature(&self) -> Option<f64> {
        self.params.initial_chamber_temperature_k
    }

    /// Internal volume of the propellant tube (m³).
    pub fn tube_volume(&self) -> f64 {
        self.params.tube_length_m * PI * self.params.tube_diameter_m.powi(2) / 4.0
    }

    /// Gas-filled share of the tube at t = 0 (m³).
    pub fn initial_ullage_volume(&self) -> f64 {
        self.tube_volume() * self.params.fill_volume_fraction
    }

    /// Identity of the thruster alone; [`ConfigKey::with_propellant`] completes it for a run.
    pub fn identity_key(&self) -> ConfigKey {
        let p = &self.params;
        ConfigKey {
            thruster: [
                p.throat_area_m2.to_bits(),
                p.tube_length_m.to_bits(),
                p.tube_diameter_m.to_bits(),
                p.discharge_coefficient.to_bits(),
                p.isp_quality_factor.to_bits(),
                p.heating_efficiency.to_bits(),
                p.ambient_temperature_k.to_bits(),
                p.initial_fill_pressure_pa.to_bits(),
                p.fill_volume_fraction.to_bits(),
            ],
            initial_chamber_temperature_k: p.initial_chamber_temperature_k.map(f64::to_bits),
            propellant: None,
        }
    }
}

/// Hashable identity of everything that shapes a run: every thruster parameter and, once
/// attached, the propellant name and properties. Floats are compared by bit pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigKey {
    thruster: [u64; 9],
    initial_chamber_temperature_k: Option<u64>,
    propellant: Option<(String, [u64; 8])>,
}

impl ConfigKey {
    pub fn with_propellant(mut self, propellant: &PropellantModel) -> Self {
        self.propellant = Some((propellant.name().to_string(), propellant.property_bits()));
        self
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((name, bits)) = &self.propellant {
            // Same-named fluids with different constants still print differently.
            let mut hasher = DefaultHasher::new();
            bits.hash(&mut hasher);
            write!(f, "{name}#{:08x} ", hasher.finish() as u32)?;
        }
        let [a_t, l, d, cd, xi, eta, t_amb, p0, v] = self.thruster.map(f64::from_bits);
        write!(
            f,
            "l={l}m d={d}m At={a_t}m2 p0={p0}Pa V={v} Cd={cd} xi={xi} eta={eta} Tamb={t_amb}K"
        )?;
        match self.initial_chamber_temperature_k {
            Some(bits) => write!(f, " Tc0={}K", f64::from_bits(bits)),
            None => Ok(()),
        }
    }
}
