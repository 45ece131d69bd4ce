/// Time series produced by one [`crate::SimulationEngine::run`] call.
///
/// Every series has the same length as [`SimulationState::time_s`]; index 0 is the initial
/// condition. The state is only ever handed out fully populated.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub(crate) dt_s: f64,
    pub(crate) time_s: Vec<f64>,
    pub(crate) pressure_pa: Vec<f64>,
    pub(crate) mass_flow_kg_s: Vec<f64>,
    pub(crate) chamber_temperature_k: Vec<f64>,
    pub(crate) vapor_temperature_k: Vec<f64>,
    pub(crate) heating_power_w: Vec<f64>,
    pub(crate) required_power_w: Vec<f64>,
    pub(crate) gas_volume_m3: Vec<f64>,
    pub(crate) propellant_mass_kg: Vec<f64>,
    pub(crate) thrust_n: Vec<f64>,
    pub(crate) specific_impulse_s: f64,
    pub(crate) effective_specific_impulse_s: f64,
}

impl SimulationState {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.time_s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_s.is_empty()
    }

    pub fn dt_s(&self) -> f64 {
        self.dt_s
    }

    pub fn time_s(&self) -> &[f64] {
        &self.time_s
    }

    pub fn pressure_pa(&self) -> &[f64] {
        &self.pressure_pa
    }

    pub fn mass_flow_kg_s(&self) -> &[f64] {
        &self.mass_flow_kg_s
    }

    pub fn chamber_temperature_k(&self) -> &[f64] {
        &self.chamber_temperature_k
    }

    /// Saturation temperature at each sample's own pressure; tracks the chamber temperature one
    /// step ahead.
    pub fn vapor_temperature_k(&self) -> &[f64] {
        &self.vapor_temperature_k
    }

    /// Heating power needed to warm and evaporate the instantaneous flow (W).
    pub fn heating_power_w(&self) -> &[f64] {
        &self.heating_power_w
    }

    /// Heating power divided by the heater efficiency (W).
    pub fn required_power_w(&self) -> &[f64] {
        &self.required_power_w
    }

    pub fn gas_volume_m3(&self) -> &[f64] {
        &self.gas_volume_m3
    }

    pub fn propellant_mass_kg(&self) -> &[f64] {
        &self.propellant_mass_kg
    }

    pub fn thrust_n(&self) -> &[f64] {
        &self.thrust_n
    }

    /// Specific impulse returned by the Isp policy (s).
    pub fn specific_impulse_s(&self) -> f64 {
        self.specific_impulse_s
    }

    /// Policy Isp scaled by the thruster's quality factor (s).
    pub fn effective_specific_impulse_s(&self) -> f64 {
        self.effective_specific_impulse_s
    }
}
