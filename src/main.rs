use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use parking_lot::Mutex;

use pagesim::common::config::{
    DEFAULT_FRAMES, DEFAULT_PAGE_RANGE, DEFAULT_REFERENCE_SIZE, DEFAULT_STEP_INTERVAL_MS,
};
use pagesim::{GenerateParams, Player, Simulation, SimulationConfig, StepReport};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Operating System Page Replacement Algorithms Simulator"
)]
struct Cli {
    /// Number of frames every policy gets
    #[arg(short, long, default_value_t = DEFAULT_FRAMES as i64, allow_negative_numbers = true)]
    frames: i64,

    /// Delay between steps in milliseconds (used with --play)
    #[arg(short, long, default_value_t = DEFAULT_STEP_INTERVAL_MS as i64, allow_negative_numbers = true)]
    interval: i64,

    /// Comma separated reference string, e.g. "30, 51, 25"
    #[arg(short, long)]
    reference: Option<String>,

    /// Size of the generated reference string
    #[arg(short, long, default_value_t = DEFAULT_REFERENCE_SIZE as i64, allow_negative_numbers = true)]
    size: i64,

    /// Generated page numbers fall in [0, range)
    #[arg(long, default_value_t = i64::from(DEFAULT_PAGE_RANGE), allow_negative_numbers = true)]
    range: i64,

    /// Seed for reference string generation
    #[arg(long)]
    seed: Option<u64>,

    /// Step on a timer instead of as fast as possible
    #[arg(short, long)]
    play: bool,
}

fn print_report(report: &StepReport) {
    print!("{}", report);
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = SimulationConfig::new(cli.frames, cli.interval)?;
    let mut sim = match cli.seed {
        Some(seed) => Simulation::with_seed(config, seed),
        None => Simulation::new(config),
    };

    if let Some(text) = &cli.reference {
        sim.define_reference(text)
            .with_context(|| format!("could not use reference string {:?}", text))?;
    }
    sim.commit_setup(Some(GenerateParams::new(cli.size, cli.range)))
        .context("setup failed")?;

    if let Some(reference) = sim.reference() {
        println!("Using the following reference string: {}", reference);
    }
    println!();

    let summary = if cli.play {
        let shared = Arc::new(Mutex::new(sim));
        Player::start(Arc::clone(&shared), Box::new(|report: &StepReport| print_report(report)))?
            .wait();
        let summary = shared.lock().all_stats();
        summary
    } else {
        for report in sim.run_to_end()? {
            print_report(&report);
        }
        sim.all_stats()
    };

    println!();
    println!("Summary ({} frames):", config.frames());
    for (kind, stats) in summary {
        println!("  {:<8} {}", kind.name(), stats);
    }

    Ok(())
}
