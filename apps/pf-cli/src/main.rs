use clap::{Args, Parser, Subcommand};
use pf_core::units::{kg_m3, m, pa, pa_s};
use pf_core::{PfError, PfResult};
use pf_meter::{
    sweep_flow_curve, EdgeType, PlateParameters, PressureSweep, TapType, DEFAULT_SWEEP_POINTS,
};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pf-cli")]
#[command(about = "Plateflow CLI - orifice-plate flow meter calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Plate geometry and fluid properties shared by all subcommands.
#[derive(Args)]
struct PlateArgs {
    /// Pipe inner diameter [m]
    #[arg(long)]
    pipe_diameter: f64,
    /// Orifice bore diameter [m]
    #[arg(long)]
    orifice_diameter: f64,
    /// Differential pressure across the plate [Pa]
    #[arg(long)]
    differential_pressure: f64,
    /// Fluid density [kg/m^3]
    #[arg(long)]
    fluid_density: f64,
    /// Fluid viscosity [Pa·s] (recognized, unused by the current correlation)
    #[arg(long, default_value_t = 0.0)]
    fluid_viscosity: f64,
    /// Reynolds number of the pipe flow
    #[arg(long)]
    reynolds: f64,
    /// Edge type: sharp, round, v-shaped
    #[arg(long, default_value = "sharp")]
    edge: String,
    /// Tap type: center, corner, pipe, radial
    #[arg(long, default_value = "corner")]
    tap: String,
}

impl PlateArgs {
    fn build(&self) -> Result<PlateParameters, PfError> {
        let edge = EdgeType::from_label(&self.edge)?;
        let tap = TapType::from_label(&self.tap)?;
        Ok(PlateParameters::new(
            m(self.pipe_diameter),
            m(self.orifice_diameter),
            pa(self.differential_pressure),
            kg_m3(self.fluid_density),
            pa_s(self.fluid_viscosity),
            self.reynolds,
            edge,
            tap,
        ))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the discharge coefficient and flow rate for one driving pressure
    Flow {
        #[command(flatten)]
        plate: PlateArgs,
        /// Driving pressure [Pa] (defaults to the differential pressure)
        #[arg(long)]
        driving_pressure: Option<f64>,
    },
    /// Export a driving-pressure / flow-rate curve as CSV
    Sweep {
        #[command(flatten)]
        plate: PlateArgs,
        /// Number of samples across the span
        #[arg(long, default_value_t = DEFAULT_SWEEP_POINTS)]
        points: usize,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> PfResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Flow {
            plate,
            driving_pressure,
        } => cmd_flow(&plate, driving_pressure),
        Commands::Sweep {
            plate,
            points,
            output,
        } => cmd_sweep(&plate, points, output.as_deref()),
    }
}

fn cmd_flow(args: &PlateArgs, driving_pressure: Option<f64>) -> PfResult<()> {
    let plate = args.build()?;
    let dp = pa(driving_pressure.unwrap_or(args.differential_pressure));

    let beta = plate.diameter_ratio()?;
    let taps = plate.tap_locations();
    let cd = plate.discharge_coefficient()?;
    let q = plate.flow_rate(dp)?;

    println!("Edge type:             {}", plate.edge_type);
    println!("Tap type:              {}", plate.tap_type);
    println!("Diameter ratio (beta): {beta:.6}");
    println!("Orifice area:          {:.6e} m^2", plate.orifice_area().value);
    println!(
        "Tap locations:         {:.4} m upstream, {:.4} m downstream",
        taps.upstream.value, taps.downstream.value
    );
    println!("Discharge coefficient: {cd:.6}");
    println!("Driving pressure:      {:.3} Pa", dp.value);
    println!("Flow rate:             {:.6} kg/s", q.value);

    Ok(())
}

fn cmd_sweep(args: &PlateArgs, points: usize, output: Option<&Path>) -> PfResult<()> {
    let plate = args.build()?;

    let mut sweep = PressureSweep::around(plate.differential_pressure);
    sweep.num_points = points;

    let curve = sweep_flow_curve(&plate, &sweep);
    tracing::info!(
        successful = curve.num_successful,
        failed = curve.num_failed,
        "sweep complete"
    );

    if curve.num_successful == 0 {
        if let Some(err) = &curve.last_error {
            return Err(err.clone().into());
        }
    }

    let mut out: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    writeln!(out, "driving_pressure_pa,flow_rate_kg_s")?;
    for [dp, q] in curve.points() {
        writeln!(out, "{dp},{q}")?;
    }

    if curve.num_failed > 0 {
        tracing::warn!(skipped = curve.num_failed, "samples failed and were skipped");
    }

    Ok(())
}
