#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots and drives a maze-crawler world.
//!
//! The binary builds a world from command-line flags (or a previously
//! emitted run code), renders the minimap as text, and prints the enemy
//! roster along with any notifications the world broadcast while spawning.

mod run_code;

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use maze_crawler_core::{
    floor_plan, Command as WorldCommand, DifficultyId, Event, GridSpec, MinimapGrid, MinimapTile,
    Severity, DEFAULT_GRID_COLUMNS, DEFAULT_GRID_ROWS, DEFAULT_TILE_LENGTH,
};
use maze_crawler_world::{self as world, query, World};
use run_code::RunSnapshot;

/// Procedural maze-crawler world generator.
#[derive(Debug, Parser)]
#[command(name = "maze-crawler")]
struct Args {
    /// Number of tile columns in the floor grid.
    #[arg(long, default_value_t = DEFAULT_GRID_COLUMNS)]
    columns: u32,

    /// Number of tile rows in the floor grid.
    #[arg(long, default_value_t = DEFAULT_GRID_ROWS)]
    rows: u32,

    /// Edge length of a single tile in world units.
    #[arg(long, default_value_t = DEFAULT_TILE_LENGTH)]
    tile_length: f32,

    /// One-based floor to generate.
    #[arg(long, default_value_t = 1)]
    floor: u32,

    /// Difficulty applied to spawned enemies.
    #[arg(long, value_enum, default_value = "normal")]
    difficulty: DifficultyArg,

    /// Session seed; a random seed is drawn when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Reproduce a prior run from its run code, ignoring the other flags.
    #[arg(long)]
    code: Option<String>,

    /// Print the run code for this run so it can be reproduced later.
    #[arg(long)]
    emit_code: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum DifficultyArg {
    Easy,
    Normal,
    Hard,
    Expert,
}

impl DifficultyArg {
    fn id(self) -> DifficultyId {
        match self {
            Self::Easy => DifficultyId::Easy,
            Self::Normal => DifficultyId::Normal,
            Self::Hard => DifficultyId::Hard,
            Self::Expert => DifficultyId::Expert,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let snapshot = match &args.code {
        Some(code) => RunSnapshot::decode(code).map_err(|error| anyhow!(error))?,
        None => RunSnapshot {
            columns: args.columns,
            rows: args.rows,
            tile_length: args.tile_length,
            floor: args.floor.max(1),
            difficulty: args.difficulty.id(),
            seed: args.seed.unwrap_or_else(rand::random),
        },
    };

    let spec = GridSpec::new(snapshot.columns, snapshot.rows, snapshot.tile_length)?;

    let mut world = World::with_seed(snapshot.seed);
    let mut events = Vec::new();
    world::apply(&mut world, WorldCommand::ConfigureGrid { spec }, &mut events);
    world::apply(
        &mut world,
        WorldCommand::NewGame {
            difficulty: snapshot.difficulty,
        },
        &mut events,
    );
    if snapshot.floor > 1 {
        world::apply(
            &mut world,
            WorldCommand::EnterFloor {
                floor: snapshot.floor,
            },
            &mut events,
        );
    }

    println!("{}", query::welcome_banner(&world));
    println!(
        "{} ({} difficulty, seed {:#x})",
        floor_plan(snapshot.floor).name,
        snapshot.difficulty.descriptor().name,
        snapshot.seed
    );
    println!();

    print_minimap(&query::minimap(&world));
    println!();
    print_roster(&world);
    print_notifications(&events);

    if args.emit_code {
        println!();
        println!("run code: {}", snapshot.encode());
    }

    Ok(())
}

fn print_minimap(minimap: &MinimapGrid) {
    for row in 0..minimap.rows() {
        let Some(tiles) = minimap.row(row) else {
            continue;
        };
        let line: String = tiles.iter().map(|tile| tile_glyph(*tile)).collect();
        println!("{line}");
    }
}

fn tile_glyph(tile: MinimapTile) -> char {
    match tile {
        MinimapTile::Empty => '.',
        MinimapTile::Wall => '#',
        MinimapTile::Player => '@',
        MinimapTile::Enemy => 'e',
        MinimapTile::Item => 'i',
        MinimapTile::Exit => 'X',
    }
}

fn print_roster(world: &World) {
    let player = query::player(world);
    println!(
        "player: {:.0}/{:.0} hp at ({:.0}, {:.0})",
        player.health, player.max_health, player.x, player.y
    );

    for enemy in query::enemies(world) {
        println!(
            "{} {}: {:.0} hp, {:.0} dmg, speed {:.1}",
            enemy.archetype.icon(),
            enemy.archetype.name(),
            enemy.max_health,
            enemy.damage,
            enemy.speed
        );
    }
    for item in query::items(world) {
        println!(
            "{} {}: {}",
            item.archetype.icon(),
            item.archetype.name(),
            item.archetype.description()
        );
    }
}

fn print_notifications(events: &[Event]) {
    for event in events {
        if let Event::Notified { text, severity } = event {
            println!("[{}] {text}", severity_label(*severity));
        }
    }
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "info",
        Severity::Success => "success",
        Severity::Warning => "warning",
        Severity::Error => "error",
    }
}
