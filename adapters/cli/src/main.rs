#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Maze Escape headlessly.

mod autopilot;
mod config;
mod logging;
mod simulation;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use maze_escape_core::WELCOME_BANNER;

use crate::{autopilot::Autopilot, config::GameConfig, simulation::Simulation};

/// Runs a seeded, headless playthrough of Maze Escape.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Tiled JSON map to play on.
    #[arg(long, default_value = "assets/maps/campus.json")]
    map: PathBuf,
    /// Optional TOML file overriding the default tunables.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum number of frames to simulate.
    #[arg(long, default_value_t = 20_000)]
    frames: u64,
    /// Simulated milliseconds per frame.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    /// Seed driving the autopilot's input.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the Maze Escape command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);
    println!("{WELCOME_BANNER}");

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let grid = maze_escape_tiled::load_map(&args.map)
        .with_context(|| format!("failed to load map {}", args.map.display()))?;
    let mut simulation = Simulation::new(grid, &config)?;
    let mut autopilot = Autopilot::new(args.seed);
    let dt = Duration::from_millis(args.frame_ms);

    for _ in 0..args.frames {
        if simulation.is_over() {
            break;
        }
        let input = autopilot.next_input(simulation.phase());
        let _ = simulation.frame(&input, dt);
    }

    let summary = simulation.summary();
    info!("run finished after {} frames", summary.frames);
    println!("outcome: {:?}", summary.phase);
    println!("frames: {}", summary.frames);
    println!("captures: {}", summary.captures);
    println!("time left: {}", summary.time_left);
    println!("ticket: {:?}", summary.ticket);
    println!(
        "encounters: positive {}, negative {}, hidden {}",
        u8::from(summary.encounters.positive),
        u8::from(summary.encounters.negative),
        u8::from(summary.encounters.hidden)
    );
    println!(
        "player: ({:.1}, {:.1})",
        summary.player.x(),
        summary.player.y()
    );
    match summary.score {
        Some(score) => println!("score: {score}"),
        None => println!("score: -"),
    }
    Ok(())
}
