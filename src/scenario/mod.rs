use std::path::Path;

use thiserror::Error;
use tracing::debug;

use thruster_config::{ConfigError, IspConfig, PropellantConfig, ScenarioConfig, ThrusterSection};
use thruster_propulsion::{
    ParameterError, PropellantModel, PropellantProperties, ThrusterConfig, ThrusterParameters,
};
use thruster_transient::comparison::Experiment;
use thruster_transient::{IspPolicy, SimulationEngine, SimulationError};

/// A scenario with its engine already built and its initial operating point solved.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub engine: SimulationEngine,
    pub dt_s: f64,
    pub duration_s: f64,
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("unknown propellant preset '{0}'")]
    UnknownPreset(String),
    #[error("propellant property `{0}` is required when no preset is given")]
    MissingProperty(&'static str),
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error("scenario '{name}' has no valid initial state")]
    Simulation {
        name: String,
        #[source]
        source: SimulationError,
    },
}

/// Load scenario records from `path` and build an engine for each.
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>, ScenarioError> {
    let path = path.as_ref();
    let scenarios = thruster_config::load_scenarios(path)?
        .iter()
        .map(Scenario::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    debug!(path = %path.display(), count = scenarios.len(), "loaded scenarios");
    Ok(scenarios)
}

/// Bundle scenarios into an experiment, keeping their order and names.
pub fn experiment(scenarios: &[Scenario]) -> Experiment {
    scenarios.iter().fold(Experiment::new(), |ex, scenario| {
        ex.with_case(scenario.name.clone(), scenario.engine.clone())
    })
}

impl TryFrom<&ScenarioConfig> for Scenario {
    type Error = ScenarioError;

    fn try_from(value: &ScenarioConfig) -> Result<Self, Self::Error> {
        let propellant = propellant_from_config(&value.propellant)?;
        let thruster = thruster_from_config(&value.thruster)?;
        let isp = isp_policy_from_config(&value.isp);
        let engine = SimulationEngine::new(propellant, thruster, isp).map_err(|source| {
            ScenarioError::Simulation {
                name: value.name.clone(),
                source,
            }
        })?;
        debug!(
            scenario = %value.name,
            propellant = engine.propellant().name(),
            key = %engine.identity_key(),
            "built engine"
        );
        Ok(Scenario {
            name: value.name.clone(),
            engine,
            dt_s: value.simulation.dt_s,
            duration_s: value.simulation.duration_s,
        })
    }
}

/// Resolve a propellant record: start from the preset (if any) and apply explicit overrides.
///
/// A record with neither a preset nor any property (an omitted `[propellant]` section)
/// resolves to water.
pub fn propellant_from_config(config: &PropellantConfig) -> Result<PropellantModel, ScenarioError> {
    let base = match config.preset.as_deref() {
        Some(preset) => Some(preset_propellant(preset)?),
        None if config.name.is_none() && !has_explicit_properties(config) => {
            Some(PropellantModel::water())
        }
        None => None,
    };
    let base_props = base.as_ref().map(PropellantModel::properties);

    let props = PropellantProperties {
        latent_heat_vaporization: pick_property(
            config.latent_heat_j_kg,
            base_props,
            |p| p.latent_heat_vaporization,
            "latent_heat_j_kg",
        )?,
        specific_heat_liquid: pick_property(
            config.specific_heat_liquid_j_kg_k,
            base_props,
            |p| p.specific_heat_liquid,
            "specific_heat_liquid_j_kg_k",
        )?,
        specific_heat_vapor: pick_property(
            config.specific_heat_vapor_j_kg_k,
            base_props,
            |p| p.specific_heat_vapor,
            "specific_heat_vapor_j_kg_k",
        )?,
        gas_constant: pick_property(
            config.gas_constant_j_kg_k,
            base_props,
            |p| p.gas_constant,
            "gas_constant_j_kg_k",
        )?,
        density_liquid: pick_property(
            config.density_liquid_kg_m3,
            base_props,
            |p| p.density_liquid,
            "density_liquid_kg_m3",
        )?,
        reference_vapor_pressure: pick_property(
            config.reference_vapor_pressure_pa,
            base_props,
            |p| p.reference_vapor_pressure,
            "reference_vapor_pressure_pa",
        )?,
        reference_vapor_temperature: pick_property(
            config.reference_vapor_temperature_k,
            base_props,
            |p| p.reference_vapor_temperature,
            "reference_vapor_temperature_k",
        )?,
        specific_heat_ratio: pick_property(
            config.specific_heat_ratio,
            base_props,
            |p| p.specific_heat_ratio,
            "specific_heat_ratio",
        )?,
    };

    let name = config
        .name
        .clone()
        .or_else(|| base.as_ref().map(|b| b.name().to_string()))
        .unwrap_or_else(|| "custom".to_string());
    Ok(PropellantModel::new(name, props)?)
}

fn has_explicit_properties(config: &PropellantConfig) -> bool {
    [
        config.latent_heat_j_kg,
        config.specific_heat_liquid_j_kg_k,
        config.specific_heat_vapor_j_kg_k,
        config.gas_constant_j_kg_k,
        config.density_liquid_kg_m3,
        config.reference_vapor_pressure_pa,
        config.reference_vapor_temperature_k,
        config.specific_heat_ratio,
    ]
    .iter()
    .any(Option::is_some)
}

fn pick_property(
    explicit: Option<f64>,
    base: Option<&PropellantProperties>,
    from_base: fn(&PropellantProperties) -> f64,
    field: &'static str,
) -> Result<f64, ScenarioError> {
    explicit
        .or_else(|| base.map(from_base))
        .ok_or(ScenarioError::MissingProperty(field))
}

fn preset_propellant(preset: &str) -> Result<PropellantModel, ScenarioError> {
    match preset.to_ascii_lowercase().as_str() {
        "water" => Ok(PropellantModel::water()),
        _ => Err(ScenarioError::UnknownPreset(preset.to_string())),
    }
}

pub fn thruster_from_config(section: &ThrusterSection) -> Result<ThrusterConfig, ScenarioError> {
    Ok(ThrusterConfig::new(ThrusterParameters {
        throat_area_m2: section.throat_area_m2,
        tube_length_m: section.tube_length_m,
        tube_diameter_m: section.tube_diameter_m,
        discharge_coefficient: section.discharge_coefficient,
        isp_quality_factor: section.isp_quality_factor,
        heating_efficiency: section.heating_efficiency,
        ambient_temperature_k: section.ambient_temperature_k,
        initial_fill_pressure_pa: section.initial_fill_pressure_pa,
        fill_volume_fraction: section.fill_volume_fraction,
        initial_chamber_temperature_k: section.initial_chamber_temperature_k,
    })?)
}

pub fn isp_policy_from_config(config: &IspConfig) -> IspPolicy {
    match *config {
        IspConfig::Fixed { isp_s } => IspPolicy::Fixed { isp_s },
        IspConfig::TemperatureDerived {
            reference_temperature_k,
            reference_isp_s,
        } => IspPolicy::TemperatureDerived {
            reference_temperature_k: reference_temperature_k
                .unwrap_or(IspPolicy::DEFAULT_REFERENCE_TEMPERATURE_K),
            reference_isp_s: reference_isp_s.unwrap_or(IspPolicy::DEFAULT_REFERENCE_ISP_S),
        },
    }
}
