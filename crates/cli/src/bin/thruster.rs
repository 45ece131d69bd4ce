use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use thruster_sim::core::units::{kg_s_to_mg_s, n_to_mn, pa_to_bar};
use thruster_sim::export::{summary as summary_export, timeseries, writer_for_path};
use thruster_sim::scenario::{Scenario, experiment, load_scenarios};
use thruster_sim::transient::comparison::CaseResult;
use thruster_sim::transient::summary::{SeriesRange, SimulationSummary};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Simulate vaporizing-propellant micro-thruster blowdown runs"
)]
struct Cli {
    /// Scenario file (TOML or YAML list) or directory of TOML files; repeatable
    #[arg(long, default_value = "data/scenarios")]
    scenario: Vec<PathBuf>,

    /// Time step in seconds (defaults to the first scenario's)
    #[arg(long)]
    dt: Option<f64>,

    /// Simulated duration in seconds (defaults to the first scenario's)
    #[arg(long)]
    t_end: Option<f64>,

    /// Write the time series of every run to this CSV path (`-` for stdout)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Keep every n-th sample in the CSV output
    #[arg(long, default_value_t = 1)]
    csv_stride: usize,

    /// Write per-run summaries as JSON to this path (`-` for stdout)
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Log progress at info level (overridden by RUST_LOG)
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut scenarios: Vec<Scenario> = Vec::new();
    for path in &cli.scenario {
        scenarios.extend(load_scenarios(path)?);
    }
    let first = scenarios
        .first()
        .ok_or_else(|| anyhow::anyhow!("no scenarios loaded"))?;
    let dt = cli.dt.unwrap_or(first.dt_s);
    let t_end = cli.t_end.unwrap_or(first.duration_s);
    if cli.dt.is_none() || cli.t_end.is_none() {
        for s in &scenarios[1..] {
            if s.dt_s != first.dt_s || s.duration_s != first.duration_s {
                warn!(
                    scenario = %s.name,
                    "time grid differs from '{}'; running all cases with dt = {dt} s, t_end = {t_end} s",
                    first.name
                );
            }
        }
    }

    let results = experiment(&scenarios).run(dt, t_end)?;
    let summaries: Vec<(&str, SimulationSummary)> = results
        .iter()
        .map(|r| (r.label.as_str(), SimulationSummary::from_state(&r.state)))
        .collect();

    for (result, (_, summary)) in results.iter().zip(&summaries) {
        print_summary(result, summary);
    }

    if let Some(path) = &cli.csv {
        let mut writer = writer_for_path(path)?;
        timeseries::write_header(&mut *writer)?;
        for result in &results {
            timeseries::write_state(&mut *writer, &result.label, &result.state, cli.csv_stride)?;
        }
        writer.flush()?;
    }

    if let Some(path) = &cli.summary_json {
        let mut writer = writer_for_path(path)?;
        summary_export::write_summaries(&mut *writer, &summaries)?;
        writer.flush()?;
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_summary(result: &CaseResult, summary: &SimulationSummary) {
    println!("=== {} ({}) ===", result.label, result.key);
    println!(
        "Samples         : {} over {:.1} s",
        summary.samples, summary.duration_s
    );
    let (lo, hi) = scaled(&summary.pressure_pa, pa_to_bar);
    println!("Pressure        : min = {lo:.4} bar, max = {hi:.4} bar");
    let (lo, hi) = scaled(&summary.mass_flow_kg_s, kg_s_to_mg_s);
    println!("Mass flow       : min = {lo:.4} mg/s, max = {hi:.4} mg/s");
    let (lo, hi) = scaled(&summary.thrust_n, n_to_mn);
    println!("Thrust          : min = {lo:.4} mN, max = {hi:.4} mN");
    println!(
        "Chamber temp.   : min = {:.2} K, max = {:.2} K",
        summary.chamber_temperature_k.min, summary.chamber_temperature_k.max
    );
    println!(
        "Propellant mass : min = {:.4e} kg, max = {:.4e} kg",
        summary.propellant_mass_kg.min, summary.propellant_mass_kg.max
    );
    println!(
        "Required power  : min = {:.3} W, max = {:.3} W",
        summary.required_power_w.min, summary.required_power_w.max
    );
    println!(
        "Isp             : {:.2} s (effective {:.2} s)",
        summary.specific_impulse_s, summary.effective_specific_impulse_s
    );
    println!(
        "Totals          : impulse = {:.4e} N·s, propellant expelled = {:.4e} kg",
        summary.total_impulse_n_s, summary.propellant_expelled_kg
    );
}

fn scaled(range: &SeriesRange, convert: fn(f64) -> f64) -> (f64, f64) {
    (convert(range.min), convert(range.max))
}
