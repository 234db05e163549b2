//! # Delve Main Entry Point
//!
//! Generates one dungeon floor, spawns its enemies, runs a few enemy turns
//! against a stationary player, and prints the result.

use clap::Parser;
use delve::{
    DelveResult, DungeonGenerator, Encounter, EncounterGenerator, Enemy, Floor, FloorSnapshot,
    GenerationConfig, Generator, LevelConfig, Position, TileKind,
};
use log::{info, warn};
use serde::Serialize;
use std::path::PathBuf;

/// Command line arguments for Delve.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "Procedural dungeon floors with depth-scaled enemy AI")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of rooms to generate
    #[arg(short, long)]
    rooms: Option<usize>,

    /// Dungeon depth, starting at 1
    #[arg(short, long, default_value_t = 1)]
    depth: u32,

    /// Enemy rounds to simulate
    #[arg(short, long, default_value_t = 3)]
    turns: u32,

    /// JSON generation config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a JSON snapshot instead of the ASCII map
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Everything printed with `--json`.
#[derive(Serialize)]
struct Report<'a> {
    seed: u64,
    depth: u32,
    player: Position,
    floor: FloorSnapshot,
    enemies: &'a [Enemy],
}

fn main() -> DelveResult<()> {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Starting Delve v{}", delve::VERSION);

    let mut config = match &args.config {
        Some(path) => GenerationConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => GenerationConfig::default(),
    };
    if args.config.is_none() || args.seed.is_some() {
        config.seed = args.seed.unwrap_or_else(rand::random);
    }

    let mut level = LevelConfig::for_depth(args.depth);
    if let Some(rooms) = args.rooms {
        level.room_count = rooms;
    }
    level.validate()?;

    info!("Seed {}, depth {}", config.seed, level.depth);
    let mut rng = config.create_rng();
    let mut floor =
        DungeonGenerator::with_room_count(level.room_count).generate(&config, &mut rng)?;

    let player = floor
        .start_room_id()
        .and_then(|id| floor.room(id))
        .map(|room| room.center())
        .unwrap_or_else(Position::origin);
    let mut encounter = EncounterGenerator::new(level.clone()).populate(&floor, player);

    for turn in 1..=args.turns {
        let report = encounter.run_round(&mut floor, player, &mut rng);
        info!(
            "Turn {}: {} enemy actions, {} attacks, rooms cleared {:?}",
            turn,
            report.outcomes.len(),
            report.attacks(),
            report.cleared_rooms
        );
        if report.attacks() > 0 {
            warn!("The player is under attack");
        }
    }

    if args.json {
        let report = Report {
            seed: config.seed,
            depth: level.depth,
            player,
            floor: floor.snapshot(),
            enemies: encounter.enemies(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_ascii(&floor, &encounter, player));
    }

    Ok(())
}

/// Initializes `env_logger` at the requested level. `RUST_LOG` takes precedence.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();
}

/// Draws the floor with `@` for the player and the enemy marker for enemies.
fn render_ascii(floor: &Floor, encounter: &Encounter, player: Position) -> String {
    let mut out = String::new();
    for (y, row) in floor.grid().rows().enumerate() {
        for (x, tile) in row.iter().enumerate() {
            let pos = Position::new(x as i32, y as i32);
            let glyph = if pos == player {
                '@'
            } else if encounter.enemies().iter().any(|enemy| enemy.position == pos) {
                TileKind::Enemy.glyph()
            } else {
                tile.glyph()
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}
