//! Configuration models and loaders for micro-thruster scenarios.
//!
//! A scenario is one TOML document (or one entry of a YAML list) naming a propellant, the
//! thruster geometry, the Isp policy, and the time grid. Values are taken as written; physical
//! validation happens when the records are turned into models.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// One simulation case parsed from a scenario file.
#[derive(Debug, Deserialize, Clone)]
pub struct ScenarioConfig {
    pub name: String,
    #[serde(default)]
    pub propellant: PropellantConfig,
    pub thruster: ThrusterSection,
    #[serde(default)]
    pub isp: IspConfig,
    #[serde(default)]
    pub simulation: SimulationSection,
}

/// Working fluid: a named preset, explicit constants, or a preset with individual overrides.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PropellantConfig {
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub latent_heat_j_kg: Option<f64>,
    #[serde(default)]
    pub specific_heat_liquid_j_kg_k: Option<f64>,
    #[serde(default)]
    pub specific_heat_vapor_j_kg_k: Option<f64>,
    #[serde(default)]
    pub gas_constant_j_kg_k: Option<f64>,
    #[serde(default)]
    pub density_liquid_kg_m3: Option<f64>,
    #[serde(default)]
    pub reference_vapor_pressure_pa: Option<f64>,
    #[serde(default)]
    pub reference_vapor_temperature_k: Option<f64>,
    #[serde(default)]
    pub specific_heat_ratio: Option<f64>,
}

/// Thruster geometry and fill state.
#[derive(Debug, Deserialize, Clone)]
pub struct ThrusterSection {
    pub throat_area_m2: f64,
    pub tube_length_m: f64,
    pub tube_diameter_m: f64,
    pub discharge_coefficient: f64,
    #[serde(default = "unity")]
    pub isp_quality_factor: f64,
    #[serde(default = "unity")]
    pub heating_efficiency: f64,
    #[serde(default = "default_ambient_temperature")]
    pub ambient_temperature_k: f64,
    pub initial_fill_pressure_pa: f64,
    pub fill_volume_fraction: f64,
    #[serde(default)]
    pub initial_chamber_temperature_k: Option<f64>,
}

/// Specific impulse policy selection.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "policy")]
pub enum IspConfig {
    #[serde(rename = "fixed")]
    Fixed { isp_s: f64 },
    #[serde(rename = "temperature_derived")]
    TemperatureDerived {
        #[serde(default)]
        reference_temperature_k: Option<f64>,
        #[serde(default)]
        reference_isp_s: Option<f64>,
    },
}

impl Default for IspConfig {
    fn default() -> Self {
        IspConfig::TemperatureDerived {
            reference_temperature_k: None,
            reference_isp_s: None,
        }
    }
}

/// Time grid for the run.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SimulationSection {
    #[serde(default = "default_dt")]
    pub dt_s: f64,
    #[serde(default = "default_duration")]
    pub duration_s: f64,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            dt_s: default_dt(),
            duration_s: default_duration(),
        }
    }
}

fn unity() -> f64 {
    1.0
}

fn default_ambient_temperature() -> f64 {
    283.0
}

fn default_dt() -> f64 {
    0.1
}

fn default_duration() -> f64 {
    1200.0
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("no scenarios found at {0}")]
    Empty(PathBuf),
}

/// Load scenarios from a TOML file, a YAML list, or a directory of TOML files.
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioConfig>, ConfigError> {
    let path = path.as_ref();
    let scenarios: Vec<ScenarioConfig> = load_records(path)?;
    if scenarios.is_empty() {
        return Err(ConfigError::Empty(path.to_path_buf()));
    }
    Ok(scenarios)
}

/// Parse a single scenario from TOML text.
pub fn parse_scenario_toml(contents: &str) -> Result<ScenarioConfig, ConfigError> {
    Ok(toml::from_str(contents)?)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
