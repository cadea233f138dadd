use bhdisk::{bench_step, FrameSink, Scenario, ScenarioConfig, StatsSink};
use bhdisk::benchmark::benchmark::DEFAULT_SIZES;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Headless accretion disk simulation")]
struct Args {
    /// Scenario YAML, defaults are used when omitted
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Override the number of frames to run
    #[arg(long)]
    frames: Option<u64>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the particle count
    #[arg(long)]
    particles: Option<usize>,

    /// Step on the current thread instead of the rayon pool
    #[arg(long)]
    serial: bool,

    /// Log disk statistics every N frames
    #[arg(long, default_value_t = 60)]
    report_every: u64,

    /// Time serial vs parallel steps and exit
    #[arg(long)]
    bench: bool,
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    let mut cfg = match &args.file {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening scenario {}", path.display()))?;
            ScenarioConfig::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing scenario {}", path.display()))?
        }
        None => ScenarioConfig::default(),
    };

    if let Some(frames) = args.frames {
        cfg.parameters.frames = frames;
    }
    if let Some(seed) = args.seed {
        cfg.parameters.seed = Some(seed);
    }
    if let Some(n) = args.particles {
        cfg.disk.count = n;
    }
    if args.serial {
        cfg.engine.parallel = false;
    }

    Ok(cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging();

    if args.bench {
        bench_step(&DEFAULT_SIZES, 5)?;
        return Ok(());
    }

    let cfg = load_scenario(&args)?;
    let mut scenario = Scenario::build_scenario(cfg).context("building scenario")?;
    let mut sink = StatsSink::new(args.report_every);

    // Frame loop: step, then hand the finished field to the sink
    let frames = scenario.parameters.frames;
    sink.consume(0, scenario.field());
    for _ in 0..frames {
        scenario.step()?;
        sink.consume(scenario.frame(), scenario.field());
    }

    tracing::info!(frames, t = scenario.field().t(), "done");
    Ok(())
}
