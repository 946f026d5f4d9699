#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays one Act-Man run from a layout file.

mod report;

use std::{fs, path::PathBuf};

use act_man_system_turn_loop::{Config, SeededDice, Simulation};
use act_man_world::{layout, World};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::report::{render_report, RunSummary};

const DEFAULT_MAX_TURNS: u64 = 100_000;

/// Simulates a single automated run through a dungeon layout.
#[derive(Debug, Parser)]
#[command(name = "act-man", version)]
struct Args {
    /// Layout file: a `rows cols` header followed by the grid rows.
    input: PathBuf,
    /// File the report is written to.
    output: PathBuf,
    /// Seed for the dice; drawn at random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Stop the run after this many turns; 0 removes the limit.
    #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
    max_turns: u64,
    /// Also write a JSON summary of the run to this file.
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,
}

/// Entry point for the Act-Man command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read layout {}", args.input.display()))?;
    let grid = layout::parse(&text)
        .with_context(|| format!("invalid layout in {}", args.input.display()))?;
    let world = World::from_grid(grid)
        .with_context(|| format!("invalid layout in {}", args.input.display()))?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, input = %args.input.display(), "loaded layout");

    let max_turns = (args.max_turns > 0).then_some(args.max_turns);
    let config = Config::new().with_max_turns(max_turns);
    let mut simulation = Simulation::new(world, SeededDice::new(seed), config);
    let report = simulation.run();

    fs::write(&args.output, render_report(&report))
        .with_context(|| format!("failed to write report {}", args.output.display()))?;

    if let Some(path) = &args.summary {
        let json = RunSummary::new(seed, &report)
            .to_json()
            .context("failed to serialize run summary")?;
        fs::write(path, json)
            .with_context(|| format!("failed to write summary {}", path.display()))?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
