//! Frontier Realms - headless runner
//!
//! Generates a world, advances it a number of turns with the scripted
//! opponent (and optionally the player) under AI control, then prints a
//! summary as text or JSON.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use frontier_realms::core::config::GameConfig;
use frontier_realms::core::error::Result;
use frontier_realms::simulation::{TurnEvent, World};

#[derive(Parser, Debug)]
#[command(name = "frontier-realms")]
#[command(about = "Run a headless turn-based strategy simulation")]
struct Args {
    /// Number of turns to advance
    #[arg(long, default_value_t = 50)]
    turns: u32,

    /// TOML config file; command-line values override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Map width in tiles
    #[arg(long)]
    width: Option<u32>,

    /// Map height in tiles
    #[arg(long)]
    height: Option<u32>,

    /// Seed for map generation and every random decision
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,

    /// Let the AI play the player faction as well
    #[arg(long)]
    autoplay: bool,

    /// Print notable events every turn
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("frontier_realms=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load_from_toml(path)?,
        None => GameConfig::default(),
    };
    if let Some(width) = args.width {
        config.map.width = width;
    }
    if let Some(height) = args.height {
        config.map.height = height;
    }
    if let Some(seed) = args.seed {
        config.map.seed = seed;
    }

    let mut world = World::generate(config)?;
    world.autoplay = args.autoplay;

    for _ in 0..args.turns {
        world.continue_orders();
        let report = world.advance_turn();
        if args.verbose {
            for event in &report.events {
                println!("[turn {}] {}", report.turn, describe(event));
            }
        }
    }

    let summary = world.summary();
    match args.format.as_str() {
        "json" => println!("{}", summary.to_json()?),
        _ => print!("{}", summary.to_text()),
    }

    Ok(())
}

fn describe(event: &TurnEvent) -> String {
    match event {
        TurnEvent::Combat(report) => format!(
            "combat at ({}, {}): {} dealt, {} taken{}{}",
            report.location.x,
            report.location.y,
            report.damage_to_defender,
            report.damage_to_attacker,
            if report.defender_destroyed { ", defender destroyed" } else { "" },
            if report.attacker_destroyed { ", attacker destroyed" } else { "" },
        ),
        TurnEvent::UnitProduced { city, kind, .. } => {
            format!("city {} produced a {}", city.0, kind.name())
        }
        TurnEvent::BuildingCompleted { city, building } => {
            format!("city {} completed a {}", city.0, building.name())
        }
        TurnEvent::ProductionStalled { city, reason, .. } => {
            format!("city {} stalled: {:?}", city.0, reason)
        }
        TurnEvent::CityFounded { city, owner, position } => format!(
            "{} founded city {} at ({}, {})",
            owner.name(),
            city.0,
            position.x,
            position.y
        ),
        TurnEvent::BuildChosen { city, target } => format!("city {} now builds {:?}", city.0, target),
    }
}
