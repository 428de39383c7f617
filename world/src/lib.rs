#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the maze crawler.
//!
//! The world exclusively owns the tile grid and every entity collection.
//! Adapters submit [`Command`] values through [`apply`], the world mutates
//! itself deterministically, and [`Event`] values are broadcast for
//! collaborators; read access flows through the [`query`] module. There is
//! exactly one logical thread of control: no call here blocks, suspends, or
//! tolerates re-entrant invocation.
//!
//! Every floor rebuild derives labeled per-floor seeds from the session
//! seed, so a given `(seed, floor, grid)` triple always produces the same
//! maze and the same entity placements.

use glam::Vec2;
use maze_crawler_core::{
    floor_plan, CellCoord, Command, DifficultyId, Enemy, Event, ExitPortal, GridSpec, GroundItem,
    Player, Severity, TileRect, WELCOME_BANNER,
};
use maze_crawler_system_collision as collision;
use maze_crawler_system_difficulty as scaling;
use maze_crawler_system_generation as generation;
use maze_crawler_system_minimap as minimap;
use maze_crawler_system_placement as placement;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

/// Session seed used when the host does not supply one.
const DEFAULT_SESSION_SEED: u64 = 0x6d61_7a65_6372_6177;

/// Stream label for the maze layout RNG.
const LAYOUT_STREAM: &str = "maze-layout";

/// Stream label for the entity placement RNG.
const PLACEMENT_STREAM: &str = "placement";

/// Represents the authoritative maze-crawler world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    spec: GridSpec,
    session_seed: u64,
    floor: u32,
    difficulty: DifficultyId,
    walls: Vec<TileRect>,
    floors: Vec<TileRect>,
    player: Player,
    enemies: Vec<Enemy>,
    items: Vec<GroundItem>,
    exit: Option<ExitPortal>,
}

impl World {
    /// Creates a new world with the default grid, difficulty, and session
    /// seed, generated and populated up to floor one.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SESSION_SEED)
    }

    /// Creates a new world whose floors derive from the provided session
    /// seed.
    ///
    /// The returned world is immediately usable: floor one has been
    /// generated and populated, and the player carries the bootstrap
    /// inventory.
    #[must_use]
    pub fn with_seed(session_seed: u64) -> Self {
        let mut world = Self {
            banner: WELCOME_BANNER,
            spec: GridSpec::default(),
            session_seed,
            floor: 1,
            difficulty: DifficultyId::Normal,
            walls: Vec::new(),
            floors: Vec::new(),
            player: Player::new(),
            enemies: Vec::new(),
            items: Vec::new(),
            exit: None,
        };
        world.bootstrap_player();

        let mut events = Vec::new();
        world.rebuild_floor(&mut events);
        world
    }

    fn bootstrap_player(&mut self) {
        let bootstrap = placement::bootstrap_inventory();
        self.player = Player::new();
        self.player.inventory = bootstrap.items;
        self.player.equipped_weapon = Some(bootstrap.equipped_weapon);
    }

    /// Tears down and rebuilds the grid and every per-floor entity
    /// collection. The player survives; only its position changes.
    fn rebuild_floor(&mut self, out_events: &mut Vec<Event>) {
        let columns = self.spec.columns();
        let rows = self.spec.rows();

        // Generation faults degrade to the trivially connected maze and are
        // never surfaced as errors.
        let mut layout_rng = self.stream_rng(LAYOUT_STREAM);
        let layout = generation::generate(columns, rows, &mut layout_rng)
            .unwrap_or_else(|_| generation::trivial(columns, rows));

        let tile_length = self.spec.tile_length();
        self.walls = layout
            .wall_cells()
            .map(|cell| TileRect::from_cell(cell, tile_length))
            .collect();
        self.floors = layout
            .floor_cells()
            .map(|cell| TileRect::from_cell(cell, tile_length))
            .collect();

        out_events.push(Event::FloorEntered { floor: self.floor });

        let mut placement_rng = self.stream_rng(PLACEMENT_STREAM);

        let spawn = placement::place_player(
            &self.spec,
            &self.walls,
            self.player.width,
            self.player.height,
            &mut placement_rng,
        );
        self.player.x = spawn.x;
        self.player.y = spawn.y;
        out_events.push(Event::PlayerSpawned { cell: spawn.cell });
        if spawn.exhausted {
            out_events.push(notify(
                "Could not find a safe spawn position, using grid center",
            ));
        }

        let plan = floor_plan(self.floor);

        let enemy_placement =
            placement::place_enemies(&self.spec, &self.walls, spawn.cell, plan, &mut placement_rng);
        self.enemies = enemy_placement.enemies;
        scaling::apply(&mut self.enemies, &self.difficulty.descriptor());
        for enemy in &self.enemies {
            out_events.push(Event::EnemySpawned {
                id: enemy.id,
                archetype: enemy.archetype,
                cell: self.spec.cell_of(enemy.x, enemy.y),
            });
        }
        if enemy_placement.fallback_count > 0 {
            out_events.push(notify(&format!(
                "{} enemies spawned without a safe position",
                enemy_placement.fallback_count
            )));
        }

        let item_placement =
            placement::place_items(&self.spec, &self.walls, plan.item_count, &mut placement_rng);
        self.items = item_placement.items;
        for item in &self.items {
            out_events.push(Event::ItemSpawned {
                id: item.id,
                archetype: item.archetype,
                cell: self.spec.cell_of(item.x, item.y),
            });
        }
        if item_placement.fallback_count > 0 {
            out_events.push(notify(&format!(
                "{} items spawned without a safe position",
                item_placement.fallback_count
            )));
        }

        let exit_placement =
            placement::place_exit(&self.spec, &self.walls, spawn.cell, &mut placement_rng);
        self.exit = Some(exit_placement.exit);
        out_events.push(Event::ExitSpawned {
            cell: exit_placement.cell,
        });
        if exit_placement.exhausted {
            out_events.push(notify("Exit spawned without a safe position"));
        }
    }

    /// Derives the deterministic RNG for one labeled stream of the current
    /// floor.
    fn stream_rng(&self, label: &str) -> ChaCha8Rng {
        let mut hasher = Sha256::new();
        hasher.update(self.session_seed.to_le_bytes());
        hasher.update(self.floor.to_le_bytes());
        hasher.update(label.as_bytes());
        let seed: [u8; 32] = hasher.finalize().into();
        ChaCha8Rng::from_seed(seed)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn notify(text: &str) -> Event {
    Event::Notified {
        text: text.to_owned(),
        severity: Severity::Warning,
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureGrid { spec } => {
            world.spec = spec;
            out_events.push(Event::GridConfigured { spec });
            world.rebuild_floor(out_events);
        }
        Command::NewGame { difficulty } => {
            world.difficulty = difficulty;
            world.floor = 1;
            world.bootstrap_player();
            world.rebuild_floor(out_events);
        }
        Command::EnterFloor { floor } => {
            world.floor = floor.max(1);
            world.rebuild_floor(out_events);
        }
        Command::MovePlayer { x, y } => {
            let resolution = collision::resolve(
                &world.walls,
                Vec2::new(x, y),
                world.player.width,
                world.player.height,
            );
            world.player.x = resolution.position.x;
            world.player.y = resolution.position.y;
            out_events.push(Event::PlayerMoved {
                x: world.player.x,
                y: world.player.y,
                blocked_x: resolution.collided_x,
                blocked_y: resolution.collided_y,
            });
        }
        Command::SetDifficulty { difficulty } => {
            world.difficulty = difficulty;
            scaling::apply(&mut world.enemies, &difficulty.descriptor());
            out_events.push(Event::DifficultyApplied { difficulty });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{minimap, CellCoord, World};
    use maze_crawler_core::{
        DifficultyId, Enemy, ExitPortal, GridSpec, GroundItem, MinimapGrid, Player, TileRect,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the grid configuration.
    #[must_use]
    pub fn grid_spec(world: &World) -> &GridSpec {
        &world.spec
    }

    /// Wall rectangles of the current floor.
    #[must_use]
    pub fn walls(world: &World) -> &[TileRect] {
        &world.walls
    }

    /// Floor rectangles of the current floor.
    #[must_use]
    pub fn floors(world: &World) -> &[TileRect] {
        &world.floors
    }

    /// Provides read-only access to the player entity.
    #[must_use]
    pub fn player(world: &World) -> &Player {
        &world.player
    }

    /// Cell currently containing the player's center.
    #[must_use]
    pub fn player_cell(world: &World) -> CellCoord {
        world.spec.cell_of(world.player.x, world.player.y)
    }

    /// Enemies inhabiting the current floor.
    #[must_use]
    pub fn enemies(world: &World) -> &[Enemy] {
        &world.enemies
    }

    /// Ground items lying on the current floor.
    #[must_use]
    pub fn items(world: &World) -> &[GroundItem] {
        &world.items
    }

    /// The current floor's exit portal.
    #[must_use]
    pub fn exit(world: &World) -> Option<&ExitPortal> {
        world.exit.as_ref()
    }

    /// One-based number of the current floor.
    #[must_use]
    pub fn current_floor(world: &World) -> u32 {
        world.floor
    }

    /// Difficulty currently applied to the world.
    #[must_use]
    pub fn difficulty(world: &World) -> DifficultyId {
        world.difficulty
    }

    /// Projects the current state into a render-ready minimap.
    ///
    /// The projection is recomputed in full on every call and is not
    /// retained by the world.
    #[must_use]
    pub fn minimap(world: &World) -> MinimapGrid {
        minimap::project(
            &world.spec,
            &world.walls,
            player_cell(world),
            &world.enemies,
            &world.items,
            world.exit.as_ref(),
        )
    }
}
