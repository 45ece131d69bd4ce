use clap::Parser;
use csv::ReaderBuilder;
use plotters::prelude::*;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render thruster time series from CSV, one panel per quantity"
)]
struct Cli {
    #[arg(long)]
    input: String,
    #[arg(long, default_value = "artifacts/thruster.png")]
    output: PathBuf,
    #[arg(long, default_value_t = 1600)]
    width: u32,
    #[arg(long, default_value_t = 1200)]
    height: u32,
}

/// Column name, panel caption, axis label, and display scale for each panel.
const PANELS: [(&str, &str, &str, f64); 9] = [
    ("pressure_pa", "Chamber pressure", "p (bar)", 1.0e-5),
    ("mass_flow_kg_s", "Mass flow", "mdot (mg/s)", 1.0e6),
    ("thrust_n", "Thrust", "F (mN)", 1.0e3),
    ("chamber_temperature_k", "Chamber temperature", "T_c (K)", 1.0),
    ("vapor_temperature_k", "Saturation temperature", "T_vap (K)", 1.0),
    ("heating_power_w", "Heating power", "Q (W)", 1.0),
    ("required_power_w", "Required power", "P (W)", 1.0),
    ("gas_volume_m3", "Gas volume", "V_t (mm³)", 1.0e9),
    ("propellant_mass_kg", "Propellant mass", "m (g)", 1.0e3),
];

#[derive(Debug)]
struct Run {
    label: String,
    time_s: Vec<f64>,
    columns: Vec<Vec<f64>>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let runs = read_runs(&cli.input)?;
    if runs.is_empty() {
        return Err(anyhow::anyhow!("No samples in the provided CSV"));
    }
    check_time_base(&runs)?;

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path contains invalid UTF-8"))?;
    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 20.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 14.0, FontStyle::Normal);

    let t_max = runs[0].time_s.last().copied().unwrap_or(0.0).max(f64::EPSILON);
    let areas = root.split_evenly((3, 3));

    for (panel_idx, (area, &(_, caption, y_desc, scale))) in
        areas.iter().zip(&PANELS).enumerate()
    {
        let (y_min, y_max) = padded_range(
            runs.iter()
                .flat_map(|run| run.columns[panel_idx].iter().map(|v| v * scale)),
        );

        let mut chart = ChartBuilder::on(area)
            .margin(15)
            .caption(caption, caption_font.clone())
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(0.0..t_max, y_min..y_max)?;

        chart
            .configure_mesh()
            .x_desc("t (s)")
            .y_desc(y_desc)
            .label_style(label_font.clone())
            .x_labels(6)
            .y_labels(6)
            .y_label_formatter(&|v| format!("{v:.3}"))
            .draw()?;

        for (run_idx, run) in runs.iter().enumerate() {
            let color = Palette99::pick(run_idx).to_rgba();
            chart
                .draw_series(LineSeries::new(
                    run.time_s
                        .iter()
                        .zip(&run.columns[panel_idx])
                        .map(|(&t, &v)| (t, v * scale)),
                    ShapeStyle::from(&color).stroke_width(2),
                ))?
                .label(run.label.clone())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font(label_font.clone())
            .draw()?;
    }

    root.present()?;
    Ok(())
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

/// Group CSV rows into runs by label, keeping the order in which labels first appear.
fn read_runs(path: &str) -> anyhow::Result<Vec<Run>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow::anyhow!("CSV missing '{}' column", name))
    };
    let label_idx = column("label")?;
    let time_idx = column("time_s")?;
    let panel_idx: Vec<usize> = PANELS
        .iter()
        .map(|&(name, ..)| column(name))
        .collect::<anyhow::Result<_>>()?;

    let mut runs: Vec<Run> = Vec::new();
    for rec in rdr.records() {
        let r = rec?;
        let label = r.get(label_idx).unwrap_or("");
        let time_s: f64 = r.get(time_idx).unwrap_or("").parse().unwrap_or(f64::NAN);
        if !time_s.is_finite() {
            continue;
        }
        let pos = match runs.iter().position(|run| run.label == label) {
            Some(pos) => pos,
            None => {
                runs.push(Run {
                    label: label.to_string(),
                    time_s: Vec::new(),
                    columns: vec![Vec::new(); PANELS.len()],
                });
                runs.len() - 1
            }
        };
        let run = &mut runs[pos];
        run.time_s.push(time_s);
        for (slot, &idx) in run.columns.iter_mut().zip(&panel_idx) {
            slot.push(r.get(idx).unwrap_or("").parse().unwrap_or(f64::NAN));
        }
    }
    Ok(runs)
}

/// Overlaid runs must share sample times, otherwise the panels would be misleading.
fn check_time_base(runs: &[Run]) -> anyhow::Result<()> {
    let reference = &runs[0];
    for run in &runs[1..] {
        let same_len = run.time_s.len() == reference.time_s.len();
        let same_times = same_len
            && run
                .time_s
                .iter()
                .zip(&reference.time_s)
                .all(|(a, b)| (a - b).abs() <= 1e-9 * b.abs().max(1.0));
        if !same_times {
            return Err(anyhow::anyhow!(
                "Run '{}' does not share the time base of '{}'",
                run.label,
                reference.label
            ));
        }
    }
    Ok(())
}

fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let span = hi - lo;
    let pad = if span.abs() < f64::EPSILON {
        lo.abs().max(1.0) * 0.05
    } else {
        span * 0.05
    };
    (lo - pad, hi + pad)
}
