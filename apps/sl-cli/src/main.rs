use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;
use uom::si::{
    thermodynamic_temperature::degree_celsius, time::minute, volume::liter,
    volume_rate::liter_per_minute,
};

use sl_core::timing::{Throughput, Timer};
use sl_sim::{
    Panel, PanelParams, SimError, SimOptions, SimResult, SolarLoop, StatusLine, StatusSink, Tank,
    TankParams, WallClock, WriterSink, run_live, run_sim,
};

#[derive(Parser)]
#[command(name = "sl-cli")]
#[command(about = "SolarLoop CLI - solar collector and storage tank simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report the loop state once per tick, pausing between ticks
    Run {
        #[command(flatten)]
        sim: LoopArgs,
        /// Stop after this many ticks (runs until interrupted if omitted)
        #[arg(long)]
        ticks: Option<usize>,
    },
    /// Simulate a fixed number of ticks with no pauses
    Batch {
        #[command(flatten)]
        sim: LoopArgs,
        /// Number of ticks to simulate
        #[arg(long, default_value_t = 60)]
        ticks: usize,
    },
}

#[derive(Args, Clone, Debug)]
struct LoopArgs {
    /// Pump flow rate in liters per second
    #[arg(long, default_value_t = 0.25)]
    flow_rate: f64,
    /// Sub-step in seconds
    #[arg(long, default_value_t = 0.1)]
    dt: f64,
    /// Sub-steps per reported tick
    #[arg(long, default_value_t = 600)]
    steps_per_tick: usize,
    /// Wall-clock pause between ticks in seconds
    #[arg(long, default_value_t = 1.0)]
    tick_delay: f64,
    /// Initial panel temperature in kelvin
    #[arg(long)]
    panel_temp: Option<f64>,
    /// Solar heat absorbed by the panel in watts
    #[arg(long)]
    solar_input: Option<f64>,
    /// Initial tank temperature in kelvin
    #[arg(long)]
    tank_temp: Option<f64>,
    /// Tank volume in liters
    #[arg(long)]
    tank_volume: Option<f64>,
    /// Status line format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Sim(#[from] SimError),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    // Logs go to stderr so stdout carries only status lines.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { sim, ticks } => cmd_run(&sim, ticks),
        Commands::Batch { sim, ticks } => cmd_batch(&sim, ticks),
    }
}

impl LoopArgs {
    fn options(&self) -> SimOptions {
        SimOptions {
            flow_rate_lps: self.flow_rate,
            dt_s: self.dt,
            steps_per_tick: self.steps_per_tick,
            tick_delay_s: self.tick_delay,
        }
    }

    fn panel_params(&self) -> PanelParams {
        let defaults = PanelParams::default();
        PanelParams {
            temp_k: self.panel_temp.unwrap_or(defaults.temp_k),
            solar_input_w: self.solar_input.unwrap_or(defaults.solar_input_w),
            ..defaults
        }
    }

    fn tank_params(&self) -> TankParams {
        let defaults = TankParams::default();
        let volume_l = self.tank_volume.unwrap_or(defaults.volume_l);
        TankParams {
            temp_k: self.tank_temp.unwrap_or(defaults.temp_k),
            // Keep the heat capacity proportional to the water held.
            heat_capacity_j_per_k: defaults.heat_capacity_j_per_k * volume_l / defaults.volume_l,
            volume_l,
            ..defaults
        }
    }

    fn build(&self) -> SimResult<SolarLoop> {
        let panel = Panel::new(self.panel_params())?;
        let tank = Tank::new(self.tank_params())?;
        SolarLoop::new(panel, tank, self.options())
    }
}

/// One JSON object per status line.
struct JsonSink<W> {
    out: W,
}

impl<W: Write> StatusSink for JsonSink<W> {
    fn emit(&mut self, line: &StatusLine) -> SimResult<()> {
        serde_json::to_writer(&mut self.out, line).map_err(|e| SimError::Backend {
            message: e.to_string(),
        })?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

fn status_sink(format: Format) -> Box<dyn StatusSink> {
    match format {
        Format::Text => Box::new(WriterSink::new(io::stdout())),
        Format::Json => Box::new(JsonSink { out: io::stdout() }),
    }
}

/// Where the loop ended up, in the units a reader thinks in.
#[derive(Debug)]
struct RunSummary {
    minutes: f64,
    panel_temp_c: f64,
    tank_temp_c: f64,
    tank_volume_l: f64,
    flow_l_per_min: f64,
}

impl RunSummary {
    fn of(sim: &SolarLoop) -> Self {
        Self {
            minutes: sim.elapsed().get::<minute>(),
            panel_temp_c: sim.panel().temperature().get::<degree_celsius>(),
            tank_temp_c: sim.tank().temperature().get::<degree_celsius>(),
            tank_volume_l: sim.tank().volume().get::<liter>(),
            flow_l_per_min: sim.options().flow_rate().get::<liter_per_minute>(),
        }
    }

    fn log(&self) {
        tracing::info!(
            minutes = self.minutes,
            panel_temp_c = self.panel_temp_c,
            tank_temp_c = self.tank_temp_c,
            tank_volume_l = self.tank_volume_l,
            flow_l_per_min = self.flow_l_per_min,
            "final state"
        );
    }
}

fn cmd_run(args: &LoopArgs, ticks: Option<usize>) -> CliResult<()> {
    let mut sim = args.build()?;
    let mut sink = status_sink(args.format);
    run_live(&mut sim, sink.as_mut(), &mut WallClock, ticks)?;
    RunSummary::of(&sim).log();
    Ok(())
}

fn cmd_batch(args: &LoopArgs, ticks: usize) -> CliResult<()> {
    let mut sim = args.build()?;

    let timer = Timer::start("batch");
    let record = run_sim(&mut sim, ticks)?;
    let elapsed_s = timer.stop_and_log();

    let mut sink = status_sink(args.format);
    for line in &record.x {
        sink.emit(line)?;
    }

    if let Some((idx, coldest)) = record.min_panel() {
        tracing::info!(
            tick = idx,
            minute = coldest.elapsed_min,
            panel_temp_k = coldest.panel_temp_k,
            "coldest panel temperature"
        );
    }
    RunSummary::of(&sim).log();
    let throughput = Throughput::new(elapsed_s, sim.steps());
    tracing::info!(
        steps = sim.steps(),
        elapsed_s,
        steps_per_s = throughput.per_second(),
        "batch timing"
    );
    Ok(())
}
