use crate::flow::flow_coefficient;
use crate::{ParameterError, require_positive};

/// Raw thermophysical constants for a working fluid, prior to validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropellantProperties {
    /// Latent heat of vaporization (J/kg).
    pub latent_heat_vaporization: f64,
    /// Liquid specific heat (J/kg/K).
    pub specific_heat_liquid: f64,
    /// Vapor specific heat (J/kg/K).
    pub specific_heat_vapor: f64,
    /// Specific gas constant of the vapor (J/kg/K).
    pub gas_constant: f64,
    /// Liquid density (kg/m³).
    pub density_liquid: f64,
    /// Pressure of the vapor-curve anchor point (Pa).
    pub reference_vapor_pressure: f64,
    /// Temperature of the vapor-curve anchor point (K).
    pub reference_vapor_temperature: f64,
    /// Ratio of specific heats γ of the vapor.
    pub specific_heat_ratio: f64,
}

/// Validated, immutable working-fluid model.
#[derive(Debug, Clone, PartialEq)]
pub struct PropellantModel {
    name: String,
    props: PropellantProperties,
}

impl PropellantModel {
    /// Validate `props` and build a named model.
    pub fn new(name: impl Into<String>, props: PropellantProperties) -> Result<Self, ParameterError> {
        require_positive("latent_heat_vaporization", props.latent_heat_vaporization)?;
        require_positive("specific_heat_liquid", props.specific_heat_liquid)?;
        require_positive("specific_heat_vapor", props.specific_heat_vapor)?;
        require_positive("gas_constant", props.gas_constant)?;
        require_positive("density_liquid", props.density_liquid)?;
        require_positive("reference_vapor_pressure", props.reference_vapor_pressure)?;
        require_positive("reference_vapor_temperature", props.reference_vapor_temperature)?;
        let gamma = props.specific_heat_ratio;
        if !(gamma.is_finite() && gamma > 1.0) {
            return Err(ParameterError::InvalidParameter {
                field: "specific_heat_ratio",
                value: gamma,
                reason: "must be finite and greater than 1",
            });
        }
        Ok(Self {
            name: name.into(),
            props,
        })
    }

    /// Liquid water boiling at 1 bar, the default working fluid.
    pub fn water() -> Self {
        Self {
            name: "water".to_string(),
            props: PropellantProperties {
                latent_heat_vaporization: 2256e3,
                specific_heat_liquid: 4187.0,
                specific_heat_vapor: 1996.0,
                gas_constant: 461.67,
                density_liquid: 997.0,
                reference_vapor_pressure: 1e5,
                reference_vapor_temperature: 373.0,
                specific_heat_ratio: 1.33,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &PropellantProperties {
        &self.props
    }

    pub fn latent_heat_vaporization(&self) -> f64 {
        self.props.latent_heat_vaporization
    }

    pub fn specific_heat_liquid(&self) -> f64 {
        self.props.specific_heat_liquid
    }

    pub fn specific_heat_vapor(&self) -> f64 {
        self.props.specific_heat_vapor
    }

    pub fn gas_constant(&self) -> f64 {
        self.props.gas_constant
    }

    pub fn density_liquid(&self) -> f64 {
        self.props.density_liquid
    }

    pub fn reference_vapor_pressure(&self) -> f64 {
        self.props.reference_vapor_pressure
    }

    pub fn reference_vapor_temperature(&self) -> f64 {
        self.props.reference_vapor_temperature
    }

    pub fn specific_heat_ratio(&self) -> f64 {
        self.props.specific_heat_ratio
    }

    /// Bit patterns of every property, in declaration order.
    pub fn property_bits(&self) -> [u64; 8] {
        let p = &self.props;
        [
            p.latent_heat_vaporization.to_bits(),
            p.specific_heat_liquid.to_bits(),
            p.specific_heat_vapor.to_bits(),
            p.gas_constant.to_bits(),
            p.density_liquid.to_bits(),
            p.reference_vapor_pressure.to_bits(),
            p.reference_vapor_temperature.to_bits(),
            p.specific_heat_ratio.to_bits(),
        ]
    }

    /// Nozzle flow coefficient Γ, recomputed from γ on every call.
    pub fn flow_coefficient(&self) -> f64 {
        flow_coefficient(self.props.specific_heat_ratio)
    }

    /// Saturation temperature (K) at `pressure_pa` on this fluid's vapor curve.
    pub fn vapor_temperature(&self, pressure_pa: f64) -> f64 {
        crate::flow::vapor_temperature(
            pressure_pa,
            self.props.latent_heat_vaporization,
            self.props.gas_constant,
            self.props.reference_vapor_pressure,
            self.props.reference_vapor_temperature,
        )
    }
}
