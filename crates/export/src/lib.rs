//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod timeseries {
    use std::io::{self, Write};

    use thruster_transient::SimulationState;

    pub const HEADER: &str = "label,time_s,pressure_pa,mass_flow_kg_s,chamber_temperature_k,vapor_temperature_k,heating_power_w,required_power_w,gas_volume_m3,propellant_mass_kg,thrust_n";

    /// Write the standard time-series CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// One CSV row: a single sample of a labelled run.
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub label: &'a str,
        pub time_s: f64,
        pub pressure_pa: f64,
        pub mass_flow_kg_s: f64,
        pub chamber_temperature_k: f64,
        pub vapor_temperature_k: f64,
        pub heating_power_w: f64,
        pub required_power_w: f64,
        pub gas_volume_m3: f64,
        pub propellant_mass_kg: f64,
        pub thrust_n: f64,
    }

    impl<'a> Record<'a> {
        /// Sample `index` of `state`, or `None` past the end.
        pub fn from_state(label: &'a str, state: &SimulationState, index: usize) -> Option<Self> {
            if index >= state.len() {
                return None;
            }
            Some(Self {
                label,
                time_s: state.time_s()[index],
                pressure_pa: state.pressure_pa()[index],
                mass_flow_kg_s: state.mass_flow_kg_s()[index],
                chamber_temperature_k: state.chamber_temperature_k()[index],
                vapor_temperature_k: state.vapor_temperature_k()[index],
                heating_power_w: state.heating_power_w()[index],
                required_power_w: state.required_power_w()[index],
                gas_volume_m3: state.gas_volume_m3()[index],
                propellant_mass_kg: state.propellant_mass_kg()[index],
                thrust_n: state.thrust_n()[index],
            })
        }

        /// Serialize the record to CSV, matching the standard header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{},{:.6},{:.6},{:.6e},{:.6},{:.6},{:.6e},{:.6e},{:.6e},{:.6e},{:.6e}",
                self.label,
                self.time_s,
                self.pressure_pa,
                self.mass_flow_kg_s,
                self.chamber_temperature_k,
                self.vapor_temperature_k,
                self.heating_power_w,
                self.required_power_w,
                self.gas_volume_m3,
                self.propellant_mass_kg,
                self.thrust_n,
            )
        }
    }

    /// Write every `stride`-th sample of a run (the last sample is always included).
    pub fn write_state(
        writer: &mut dyn Write,
        label: &str,
        state: &SimulationState,
        stride: usize,
    ) -> io::Result<()> {
        let stride = stride.max(1);
        let last = state.len().saturating_sub(1);
        for index in 0..state.len() {
            if index % stride != 0 && index != last {
                continue;
            }
            if let Some(record) = Record::from_state(label, state, index) {
                record.write_to(writer)?;
            }
        }
        Ok(())
    }
}

pub mod summary {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::io::{self, Write};

    use thruster_transient::summary::SimulationSummary;

    #[derive(Serialize)]
    struct SummaryEntry<'a> {
        label: &'a str,
        #[serde(flatten)]
        summary: &'a SimulationSummary,
    }

    /// Write a JSON array with one summary object per labelled run.
    pub fn write_summaries(
        writer: &mut dyn Write,
        runs: &[(&str, SimulationSummary)],
    ) -> io::Result<()> {
        let entries: Vec<SummaryEntry<'_>> = runs
            .iter()
            .map(|(label, summary)| SummaryEntry {
                label: *label,
                summary,
            })
            .collect();
        to_writer_pretty(&mut *writer, &entries)?;
        writeln!(writer)
    }
}
