use thruster_core::constants::G0;
use thruster_core::series::first_non_finite;
use thruster_propulsion::flow::{blowdown_pressure, choked_mass_flow};
use thruster_propulsion::{ConfigKey, ParameterError, PropellantModel, ThrusterConfig};
use tracing::{debug, info};

use crate::{IspPolicy, SimulationError, SimulationState};

/// Upper bound on samples per run; ten series of this length already take ~4 GB.
const MAX_SAMPLES: usize = 50_000_000;

/// Operating point at t = 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialConditions {
    pub pressure_pa: f64,
    pub chamber_temperature_k: f64,
    pub mass_flow_kg_s: f64,
}

/// Fixed-step blowdown solver for one propellant / thruster pairing.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    propellant: PropellantModel,
    config: ThrusterConfig,
    isp_policy: IspPolicy,
    initial: InitialConditions,
}

impl SimulationEngine {
    /// Build an engine and solve the initial operating point.
    ///
    /// Without an explicit initial chamber temperature, `T_c0` is taken from the vapor curve at
    /// the fill pressure; a fill pressure so high that the curve has no positive solution fails
    /// with [`SimulationError::NonPhysicalState`].
    pub fn new(
        propellant: PropellantModel,
        config: ThrusterConfig,
        isp_policy: IspPolicy,
    ) -> Result<Self, SimulationError> {
        isp_policy.validate()?;

        let p0 = config.initial_fill_pressure();
        let t_c0 = match config.initial_chamber_temperature() {
            Some(t) => t,
            None => propellant.vapor_temperature(p0),
        };
        ensure_positive(0, 0.0, "initial chamber temperature", t_c0)?;

        let mut engine = Self {
            propellant,
            config,
            isp_policy,
            initial: InitialConditions {
                pressure_pa: p0,
                chamber_temperature_k: t_c0,
                mass_flow_kg_s: 0.0,
            },
        };
        let mdot0 = engine.nozzle_mass_flow(p0, t_c0);
        ensure_non_negative(0, 0.0, "initial mass flow", mdot0)?;
        engine.initial.mass_flow_kg_s = mdot0;

        debug!(
            propellant = engine.propellant.name(),
            p0_pa = p0,
            t_c0_k = t_c0,
            mdot0_kg_s = mdot0,
            "solved initial operating point"
        );
        Ok(engine)
    }

    pub fn propellant(&self) -> &PropellantModel {
        &self.propellant
    }

    pub fn config(&self) -> &ThrusterConfig {
        &self.config
    }

    pub fn isp_policy(&self) -> IspPolicy {
        self.isp_policy
    }

    pub fn initial_conditions(&self) -> InitialConditions {
        self.initial
    }

    /// Identity of the full run setup: thruster parameters plus propellant.
    pub fn identity_key(&self) -> ConfigKey {
        self.config.identity_key().with_propellant(&self.propellant)
    }

    /// Choked mass flow through the throat including the discharge coefficient (kg/s).
    pub fn nozzle_mass_flow(&self, pressure_pa: f64, chamber_temperature_k: f64) -> f64 {
        choked_mass_flow(
            pressure_pa,
            self.config.throat_area(),
            self.propellant.flow_coefficient(),
            self.propellant.gas_constant(),
            chamber_temperature_k,
        ) * self.config.discharge_coefficient()
    }

    /// Number of samples a run over `duration_s` with step `dt_s` produces.
    ///
    /// `floor(duration / dt)`, never fewer than one (the initial condition). A relative slack of
    /// 1e-12 keeps ratios like `1200 / 0.1` from losing their last sample to rounding.
    pub fn sample_count(dt_s: f64, duration_s: f64) -> Result<usize, SimulationError> {
        if !(dt_s.is_finite() && dt_s > 0.0) {
            return Err(ParameterError::InvalidParameter {
                field: "dt_s",
                value: dt_s,
                reason: "must be finite and positive",
            }
            .into());
        }
        if !(duration_s.is_finite() && duration_s >= 0.0) {
            return Err(ParameterError::InvalidParameter {
                field: "duration_s",
                value: duration_s,
                reason: "must be finite and non-negative",
            }
            .into());
        }
        let ratio = duration_s / dt_s;
        let steps = (ratio * (1.0 + 1e-12)).floor();
        if steps > MAX_SAMPLES as f64 {
            return Err(ParameterError::InvalidParameter {
                field: "duration_s",
                value: duration_s,
                reason: "too many samples for the requested step size",
            }
            .into());
        }
        Ok((steps as usize).max(1))
    }

    /// March the blowdown forward on a uniform grid `t[i] = i · dt_s`.
    ///
    /// Each step only reads values from the previous index: pressure from the vented volume,
    /// mass flow and chamber temperature from the previous pressure/temperature, and the vented
    /// volume from the previous mass flow. Evaporated propellant is assumed not to replenish
    /// ullage pressure; the tube expands isothermally as liquid leaves.
    pub fn run(&self, dt_s: f64, duration_s: f64) -> Result<SimulationState, SimulationError> {
        let n = Self::sample_count(dt_s, duration_s)?;
        match self.march(dt_s, n) {
            Ok(state) => {
                info!(
                    samples = n,
                    final_pressure_pa = state.pressure_pa[n - 1],
                    isp_s = state.specific_impulse_s,
                    "blowdown run complete"
                );
                Ok(state)
            }
            Err(err) => {
                debug!(%err, "blowdown run aborted");
                Err(err)
            }
        }
    }

    fn march(&self, dt: f64, n: usize) -> Result<SimulationState, SimulationError> {
        let v0 = self.config.initial_ullage_volume();
        let p0 = self.initial.pressure_pa;
        let rho = self.propellant.density_liquid();

        let mut pressure = Vec::with_capacity(n);
        let mut mass_flow = Vec::with_capacity(n);
        let mut chamber = Vec::with_capacity(n);
        pressure.push(p0);
        mass_flow.push(self.initial.mass_flow_kg_s);
        chamber.push(self.initial.chamber_temperature_k);

        let mut vented = 0.0;
        for i in 1..n {
            let t = i as f64 * dt;
            let p_prev = pressure[i - 1];
            let t_prev = chamber[i - 1];
            let mdot_prev = mass_flow[i - 1];

            let p = blowdown_pressure(v0, p0, vented);
            let mdot = self.nozzle_mass_flow(p_prev, t_prev);
            let t_c = self.propellant.vapor_temperature(p_prev);
            vented += mdot_prev * dt / rho;

            ensure_positive(i, t, "pressure", p)?;
            ensure_non_negative(i, t, "mass flow", mdot)?;
            ensure_positive(i, t, "chamber temperature", t_c)?;

            pressure.push(p);
            mass_flow.push(mdot);
            chamber.push(t_c);
        }

        let h = self.propellant.latent_heat_vaporization();
        let c_l = self.propellant.specific_heat_liquid();
        let t_amb = self.config.ambient_temperature();
        let eta = self.config.heating_efficiency();
        let tube_volume = self.config.tube_volume();

        let mut vapor = Vec::with_capacity(n);
        for (i, &p) in pressure.iter().enumerate() {
            let t_vap = self.propellant.vapor_temperature(p);
            ensure_positive(i, i as f64 * dt, "vapor temperature", t_vap)?;
            vapor.push(t_vap);
        }

        let heating: Vec<f64> = mass_flow
            .iter()
            .zip(&chamber)
            .map(|(&mdot, &t_c)| mdot * (t_c - t_amb) * c_l + h * mdot)
            .collect();
        let required: Vec<f64> = heating.iter().map(|q| q / eta).collect();
        let gas_volume: Vec<f64> = pressure.iter().map(|p| v0 * (p0 / p)).collect();
        let propellant_mass: Vec<f64> = gas_volume
            .iter()
            .map(|v_t| (tube_volume - v_t) * rho)
            .collect();

        let isp = self.isp_policy.specific_impulse(&chamber);
        ensure_positive(0, 0.0, "specific impulse", isp)?;
        let xi = self.config.isp_quality_factor();
        let thrust: Vec<f64> = mass_flow.iter().map(|mdot| mdot * isp * xi * G0).collect();

        for (quantity, series) in [
            ("heating power", &heating),
            ("required power", &required),
            ("gas volume", &gas_volume),
            ("propellant mass", &propellant_mass),
            ("thrust", &thrust),
        ] {
            if let Some((index, value)) = first_non_finite(series) {
                return Err(SimulationError::NonPhysicalState {
                    index,
                    time_s: index as f64 * dt,
                    quantity,
                    value,
                });
            }
        }

        Ok(SimulationState {
            dt_s: dt,
            time_s: (0..n).map(|i| i as f64 * dt).collect(),
            pressure_pa: pressure,
            mass_flow_kg_s: mass_flow,
            chamber_temperature_k: chamber,
            vapor_temperature_k: vapor,
            heating_power_w: heating,
            required_power_w: required,
            gas_volume_m3: gas_volume,
            propellant_mass_kg: propellant_mass,
            thrust_n: thrust,
            specific_impulse_s: isp,
            effective_specific_impulse_s: isp * xi,
        })
    }
}

fn ensure_positive(
    index: usize,
    time_s: f64,
    quantity: &'static str,
    value: f64,
) -> Result<(), SimulationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::NonPhysicalState {
            index,
            time_s,
            quantity,
            value,
        })
    }
}

fn ensure_non_negative(
    index: usize,
    time_s: f64,
    quantity: &'static str,
    value: f64,
) -> Result<(), SimulationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimulationError::NonPhysicalState {
            index,
            time_s,
            quantity,
            value,
        })
    }
}
