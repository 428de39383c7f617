#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Rejection-sampling placement of the player, enemies, items, and exit.
//!
//! Every placement draws uniformly random cells and retries until all
//! constraints hold or a bounded attempt budget runs out. The budgets are
//! load-bearing: they guarantee termination, and exhausting them degrades
//! to deterministic fallback positions rather than errors. Soft constraints
//! (spacing, same-kind overlap) are waived on exhaustion; the hard
//! wall-avoidance constraint is re-imposed whenever a free floor cell still
//! exists.

use std::time::Duration;

use glam::Vec2;
use maze_crawler_core::{
    BehaviorState, CellCoord, Enemy, EnemyArchetype, EnemyId, ExitPortal, FloorPlan, GridSpec,
    GroundItem, InventoryItem, ItemArchetype, ItemId, TileRect,
};
use maze_crawler_system_collision as collision;
use rand::Rng;

/// Retry budget for the player's safe-spawn search.
pub const PLAYER_PLACEMENT_ATTEMPTS: u32 = 200;

/// Retry budget for each enemy, item, and exit placement.
pub const ENTITY_PLACEMENT_ATTEMPTS: u32 = 100;

/// Minimum Euclidean cell-distance between a spawned enemy and the player.
pub const ENEMY_MIN_PLAYER_DISTANCE: f32 = 5.0;

/// Minimum Euclidean cell-distance between the exit and the player.
///
/// A design parameter; it defaults to the enemy threshold for consistency.
pub const EXIT_MIN_PLAYER_DISTANCE: f32 = ENEMY_MIN_PLAYER_DISTANCE;

/// Margin added around the player's hitbox during the geometric spawn test,
/// in world units.
pub const PLAYER_SPAWN_MARGIN: f32 = 5.0;

/// Known-safe interior cell the player snaps to when even the fallback
/// position collides.
pub const PLAYER_SAFE_CELL: CellCoord = CellCoord::new(2, 2);

/// Resolved player spawn position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPlacement {
    /// World-space X coordinate of the player's center.
    pub x: f32,
    /// World-space Y coordinate of the player's center.
    pub y: f32,
    /// Cell containing the spawn position.
    pub cell: CellCoord,
    /// Whether the retry budget ran out and the grid-center fallback was
    /// used.
    pub exhausted: bool,
}

/// Enemies resolved for a floor, with the number of budget exhaustions.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyPlacement {
    /// Fully initialized enemies in spawn order.
    pub enemies: Vec<Enemy>,
    /// How many enemies fell back to an unconstrained position.
    pub fallback_count: u32,
}

/// Ground items resolved for a floor, with the number of budget exhaustions.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemPlacement {
    /// Fully initialized ground items in spawn order.
    pub items: Vec<GroundItem>,
    /// How many items fell back to an unconstrained position.
    pub fallback_count: u32,
}

/// Exit portal resolved for a floor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExitPlacement {
    /// The placed exit rectangle.
    pub exit: ExitPortal,
    /// Cell containing the exit's center.
    pub cell: CellCoord,
    /// Whether the retry budget ran out.
    pub exhausted: bool,
}

/// The player's fixed, non-randomized starting loadout.
#[derive(Clone, Debug, PartialEq)]
pub struct BootstrapInventory {
    /// Inventory entries in display order.
    pub items: Vec<InventoryItem>,
    /// Identifier of the pre-equipped weapon entry.
    pub equipped_weapon: ItemId,
}

/// Builds the bootstrap inventory granted on player spawn: one equipped
/// rusty sword and a stack of three health potions.
#[must_use]
pub fn bootstrap_inventory() -> BootstrapInventory {
    let sword = InventoryItem {
        id: ItemId::new(1),
        archetype: ItemArchetype::RustySword,
        quantity: 1,
        equipped: true,
    };
    let potions = InventoryItem {
        id: ItemId::new(2),
        archetype: ItemArchetype::HealthPotion,
        quantity: 3,
        equipped: false,
    };
    BootstrapInventory {
        equipped_weapon: sword.id,
        items: vec![sword, potions],
    }
}

/// Samples a safe spawn position for the player.
///
/// Candidates come from the padded interior (two cells away from the
/// border). Acceptance requires a true geometric check: both the exact
/// hitbox and a [`PLAYER_SPAWN_MARGIN`]-expanded hitbox must clear every
/// wall rectangle, because a cell-centered hitbox can still span into an
/// adjacent wall cell. Exhausting the budget falls back to the grid
/// center; if that still collides, the position snaps to
/// [`PLAYER_SAFE_CELL`].
pub fn place_player<R: Rng>(
    spec: &GridSpec,
    walls: &[TileRect],
    width: f32,
    height: f32,
    rng: &mut R,
) -> PlayerPlacement {
    let mut cell = spec.center_cell();
    let mut exhausted = true;

    for _ in 0..PLAYER_PLACEMENT_ATTEMPTS {
        let candidate = sample_padded_cell(spec, rng);
        let (x, y) = spec.cell_center(candidate);
        let center = Vec2::new(x, y);

        let clears_margin = !collision::collides(
            walls,
            center,
            width + PLAYER_SPAWN_MARGIN * 2.0,
            height + PLAYER_SPAWN_MARGIN * 2.0,
        );
        if clears_margin && !collision::collides(walls, center, width, height) {
            cell = candidate;
            exhausted = false;
            break;
        }
    }

    let (mut x, mut y) = spec.cell_center(cell);
    if collision::collides(walls, Vec2::new(x, y), width, height) {
        cell = PLAYER_SAFE_CELL;
        let (safe_x, safe_y) = spec.cell_center(cell);
        x = safe_x;
        y = safe_y;
    }

    PlayerPlacement {
        x,
        y,
        cell,
        exhausted,
    }
}

/// Places the floor's enemies.
///
/// Each enemy rejects candidate cells that are walls, already hold an
/// enemy, or lie closer than [`ENEMY_MIN_PLAYER_DISTANCE`] cells to the
/// player. On exhaustion the last candidate is kept, except that a wall
/// candidate is replaced by the first free floor cell when one exists.
/// Archetypes are drawn uniformly from [`EnemyArchetype::CATALOG`] and
/// stats are scaled by the floor plan's multipliers; difficulty scaling is
/// applied afterwards by the caller.
pub fn place_enemies<R: Rng>(
    spec: &GridSpec,
    walls: &[TileRect],
    player_cell: CellCoord,
    plan: &FloorPlan,
    rng: &mut R,
) -> EnemyPlacement {
    let mut enemies: Vec<Enemy> = Vec::with_capacity(plan.enemy_count as usize);
    let mut fallback_count = 0;

    for index in 0..plan.enemy_count {
        let mut cell = sample_padded_cell(spec, rng);
        let mut placed = false;

        for _ in 0..ENTITY_PLACEMENT_ATTEMPTS {
            cell = sample_padded_cell(spec, rng);
            let occupied = enemies
                .iter()
                .any(|enemy| spec.cell_of(enemy.x, enemy.y) == cell);
            if !is_wall_cell(walls, spec.tile_length(), cell)
                && !occupied
                && player_cell.distance(cell) >= ENEMY_MIN_PLAYER_DISTANCE
            {
                placed = true;
                break;
            }
        }

        if !placed {
            fallback_count += 1;
            if is_wall_cell(walls, spec.tile_length(), cell) {
                let occupied: Vec<CellCoord> = enemies
                    .iter()
                    .map(|enemy| spec.cell_of(enemy.x, enemy.y))
                    .collect();
                if let Some(free) = first_free_floor_cell(spec, walls, &occupied) {
                    cell = free;
                }
            }
        }

        let archetype =
            EnemyArchetype::CATALOG[rng.gen_range(0..EnemyArchetype::CATALOG.len())];
        let (x, y) = spec.cell_center(cell);
        enemies.push(build_enemy(EnemyId::new(index), archetype, x, y, plan));
    }

    EnemyPlacement {
        enemies,
        fallback_count,
    }
}

/// Places the floor's ground items.
///
/// Items sample the full interior, reject wall cells and cells already
/// holding an item, and carry no distance constraint. Exhaustion keeps the
/// last candidate, rescued onto a floor cell when it landed on a wall.
pub fn place_items<R: Rng>(
    spec: &GridSpec,
    walls: &[TileRect],
    count: u32,
    rng: &mut R,
) -> ItemPlacement {
    let mut items: Vec<GroundItem> = Vec::with_capacity(count as usize);
    let mut fallback_count = 0;

    for index in 0..count {
        let mut cell = sample_interior_cell(spec, rng);
        let mut placed = false;

        for _ in 0..ENTITY_PLACEMENT_ATTEMPTS {
            cell = sample_interior_cell(spec, rng);
            let occupied = items
                .iter()
                .any(|item| spec.cell_of(item.x, item.y) == cell);
            if !is_wall_cell(walls, spec.tile_length(), cell) && !occupied {
                placed = true;
                break;
            }
        }

        if !placed {
            fallback_count += 1;
            if is_wall_cell(walls, spec.tile_length(), cell) {
                let occupied: Vec<CellCoord> = items
                    .iter()
                    .map(|item| spec.cell_of(item.x, item.y))
                    .collect();
                if let Some(free) = first_free_floor_cell(spec, walls, &occupied) {
                    cell = free;
                }
            }
        }

        let archetype =
            ItemArchetype::SPAWN_CATALOG[rng.gen_range(0..ItemArchetype::SPAWN_CATALOG.len())];
        let (x, y) = spec.cell_center(cell);
        items.push(GroundItem {
            id: ItemId::new(index),
            archetype,
            x,
            y,
            width: GroundItem::HITBOX,
            height: GroundItem::HITBOX,
            quantity: 1,
            collected: false,
        });
    }

    ItemPlacement {
        items,
        fallback_count,
    }
}

/// Places the floor's exit portal.
///
/// The exit rejects wall cells and cells closer than
/// [`EXIT_MIN_PLAYER_DISTANCE`] to the player, so a fresh floor never ends
/// the moment it starts. Exhaustion keeps the last candidate, rescued onto
/// a floor cell when it landed on a wall.
pub fn place_exit<R: Rng>(
    spec: &GridSpec,
    walls: &[TileRect],
    player_cell: CellCoord,
    rng: &mut R,
) -> ExitPlacement {
    let mut cell = sample_padded_cell(spec, rng);
    let mut placed = false;

    for _ in 0..ENTITY_PLACEMENT_ATTEMPTS {
        cell = sample_padded_cell(spec, rng);
        if !is_wall_cell(walls, spec.tile_length(), cell)
            && player_cell.distance(cell) >= EXIT_MIN_PLAYER_DISTANCE
        {
            placed = true;
            break;
        }
    }

    if !placed && is_wall_cell(walls, spec.tile_length(), cell) {
        if let Some(free) = first_free_floor_cell(spec, walls, &[]) {
            cell = free;
        }
    }

    let (x, y) = spec.cell_center(cell);
    ExitPlacement {
        exit: ExitPortal {
            x,
            y,
            width: spec.tile_length(),
            height: spec.tile_length(),
        },
        cell,
        exhausted: !placed,
    }
}

fn build_enemy(id: EnemyId, archetype: EnemyArchetype, x: f32, y: f32, plan: &FloorPlan) -> Enemy {
    let max_health = archetype.base_health() * plan.enemy_health_mult;
    Enemy {
        id,
        archetype,
        x,
        y,
        width: Enemy::HITBOX,
        height: Enemy::HITBOX,
        health: max_health,
        max_health,
        damage: archetype.base_damage() * plan.enemy_damage_mult,
        speed: archetype.speed(),
        experience: archetype.experience(),
        level_health_mult: plan.enemy_health_mult,
        level_damage_mult: plan.enemy_damage_mult,
        behavior: BehaviorState::Idle,
        target: None,
        attack_cooldown: Enemy::ATTACK_COOLDOWN,
        attack_elapsed: Duration::ZERO,
        detection_range: Enemy::DETECTION_RANGE,
        attack_range: Enemy::ATTACK_RANGE,
    }
}

/// Uniform cell two tiles in from every border, matching the player, enemy,
/// and exit sampling window.
fn sample_padded_cell<R: Rng>(spec: &GridSpec, rng: &mut R) -> CellCoord {
    let column = rng.gen_range(2..spec.columns() - 2);
    let row = rng.gen_range(2..spec.rows() - 2);
    CellCoord::new(column, row)
}

/// Uniform cell anywhere inside the border walls, matching item sampling.
fn sample_interior_cell<R: Rng>(spec: &GridSpec, rng: &mut R) -> CellCoord {
    let column = rng.gen_range(1..spec.columns() - 1);
    let row = rng.gen_range(1..spec.rows() - 1);
    CellCoord::new(column, row)
}

fn is_wall_cell(walls: &[TileRect], tile_length: f32, cell: CellCoord) -> bool {
    walls.iter().any(|wall| wall.cell(tile_length) == cell)
}

fn first_free_floor_cell(
    spec: &GridSpec,
    walls: &[TileRect],
    occupied: &[CellCoord],
) -> Option<CellCoord> {
    for row in 1..spec.rows() - 1 {
        for column in 1..spec.columns() - 1 {
            let cell = CellCoord::new(column, row);
            if !is_wall_cell(walls, spec.tile_length(), cell) && !occupied.contains(&cell) {
                return Some(cell);
            }
        }
    }
    None
}
