use clap::{Parser, ValueEnum};
use disk_sim::{
    driver::{self, CsvRenderer, FixedFrames, NullRenderer, Pacing},
    ScenarioConfig, Screen, StepMode,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "disk-sim", about = "Headless gravitational disk simulation")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Screen width in pixels
    #[arg(long, default_value = "1500")]
    width: u32,

    /// Screen height in pixels
    #[arg(long, default_value = "900")]
    height: u32,

    /// Number of randomly placed bodies
    #[arg(short, long, default_value = "100")]
    bodies: usize,

    /// RNG seed for placement
    #[arg(short, long, default_value = "0")]
    seed: u64,

    /// Frames to simulate before quitting
    #[arg(short, long, default_value = "600")]
    frames: usize,

    /// Target frame rate; 0 steps as fast as possible
    #[arg(long, default_value = "60")]
    fps: u32,

    /// Fixed timestep in seconds
    #[arg(long)]
    dt: Option<f32>,

    /// Use the measured frame time as the timestep
    #[arg(long, conflicts_with = "dt")]
    realtime: bool,

    /// YAML scenario; overrides the placement flags
    #[arg(long)]
    scenario: Option<std::path::PathBuf>,

    /// Start from the Earth-Moon preset
    #[arg(long, conflicts_with = "scenario")]
    earth_moon: bool,

    /// Contact ordering
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Run the gravity pass on the Rayon pool
    #[arg(long)]
    rayon: bool,

    /// Write every frame's disks to stdout as CSV
    #[arg(long)]
    csv: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Pair,
    Sequential,
}

impl From<Mode> for StepMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Pair => StepMode::PairResolved,
            Mode::Sequential => StepMode::Sequential,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let mut config = match (&cli.scenario, cli.earth_moon) {
        (Some(path), _) => ScenarioConfig::from_path(path)?,
        (None, true) => ScenarioConfig::earth_moon(),
        (None, false) => ScenarioConfig {
            bodies: cli.bodies,
            seed: cli.seed,
            ..ScenarioConfig::default()
        },
    };
    if cli.scenario.is_none() {
        config.screen = Screen::new(cli.width, cli.height)?;
    }
    if cli.dt.is_some() {
        config.dt = cli.dt;
    }
    if let Some(mode) = cli.mode {
        config.mode = mode.into();
    }

    let mut sim = config.build()?;
    sim.set_use_rayon(cli.rayon);

    let pacing = match (cli.fps, cli.realtime) {
        (0, _) => Pacing::Unthrottled,
        (fps, true) => Pacing::RealTime { fps },
        (fps, false) => Pacing::Throttled { fps },
    };
    tracing::info!(
        bodies = sim.bodies.len(),
        g = sim.g,
        dt = sim.dt,
        mode = ?sim.mode,
        ?pacing,
        "starting simulation"
    );

    let mut events = FixedFrames::new(cli.frames);
    let summary = if cli.csv {
        let mut renderer = CsvRenderer::new(std::io::stdout().lock())?;
        driver::run(&mut sim, &mut renderer, &mut events, pacing)?
    } else {
        driver::run(&mut sim, &mut NullRenderer, &mut events, pacing)?
    };

    // stdout carries the CSV rows, so the summary goes through the log on stderr
    let p = sim.total_momentum();
    tracing::info!(
        frames = summary.frames,
        contacts = summary.contacts,
        kinetic_energy = sim.kinetic_energy(),
        momentum_x = p.x,
        momentum_y = p.y,
        "run summary"
    );

    Ok(())
}
